use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde_json::json;
use tokio::sync::Mutex;

use reachout::contacts::{ContactStore, EventStore};
use reachout::suggestions::{suggestion_router, SuggestionSession};

use crate::infra::{AppState, InMemoryContactStore};

pub(crate) fn with_suggestion_routes<E>(
    session: Arc<Mutex<SuggestionSession<InMemoryContactStore, E>>>,
    contacts: Arc<InMemoryContactStore>,
) -> axum::Router
where
    E: EventStore + 'static,
    InMemoryContactStore: ContactStore,
{
    suggestion_router(session)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/contacts",
            axum::routing::get(move || contacts_endpoint(contacts.clone())),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn contacts_endpoint(contacts: Arc<InMemoryContactStore>) -> impl IntoResponse {
    Json(json!({ "contacts": contacts.all() }))
}
