//! Contact domain model and the external store boundary.
//!
//! The engine never persists anything itself. Contacts arrive as raw
//! [`ContactRecord`]s owned by an external store, are normalized once into
//! [`ContactSnapshot`]s, and leave the engine only as ids referenced by
//! suggestions.

pub mod domain;
pub mod import;
pub mod repository;

pub use domain::{
    Cadence, CadenceProfile, CadenceTable, CadenceTableError, CalendarEvent, ContactId,
    ContactRecord, ContactSnapshot, EventKind, LinkedEvent, DEFAULT_CADENCE,
};
pub use import::{ContactCsvImporter, ContactImportError, ContactImportSummary};
pub use repository::{ContactStore, EventStore, NoEvents, StoreError};
