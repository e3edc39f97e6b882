use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryContactStore, InMemoryEventStore};
use crate::routes::with_suggestion_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use reachout::config::AppConfig;
use reachout::contacts::ContactCsvImporter;
use reachout::error::AppError;
use reachout::suggestions::{
    SuggestionRanker, SuggestionSession, SystemClock, ThreadRngJitter,
};
use reachout::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let contacts = Arc::new(InMemoryContactStore::default());
    let events = Arc::new(InMemoryEventStore::default());

    if let Some(path) = args.contacts_csv.take() {
        let summary = ContactCsvImporter::from_path(&path, Utc::now())?;
        info!(
            imported = summary.records.len(),
            skipped = summary.skipped,
            "seeded contact store from csv export"
        );
        contacts.seed(summary.records);
    }

    let mut session = SuggestionSession::new(
        contacts.clone(),
        events,
        SuggestionRanker::with_defaults(),
        Arc::new(SystemClock),
        Box::new(ThreadRngJitter),
    )
    .with_limit(config.suggestion_limit);
    session.regenerate().await;

    let app = with_suggestion_routes(Arc::new(Mutex::new(session)), contacts)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "suggestion service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
