use rand::Rng;

/// Injectable source of `[0, 1)` values feeding the score jitter term.
/// Swap in [`NoJitter`] to make a whole scoring pass deterministic.
pub trait JitterSource: Send {
    fn next_unit(&mut self) -> f64;
}

/// Production source backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngJitter;

impl JitterSource for ThreadRngJitter {
    fn next_unit(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Zero jitter; scores depend only on the contact data and the clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn next_unit(&mut self) -> f64 {
        0.0
    }
}

/// Replays a fixed sequence, then zeroes. Lets tests force unequal jitter
/// across contacts in a single pass.
#[derive(Debug, Clone)]
pub struct SequenceJitter {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceJitter {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl JitterSource for SequenceJitter {
    fn next_unit(&mut self) -> f64 {
        let value = self.values.get(self.cursor).copied().unwrap_or(0.0);
        self.cursor += 1;
        value
    }
}
