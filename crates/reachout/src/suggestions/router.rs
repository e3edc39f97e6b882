use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tokio::sync::Mutex;

use crate::contacts::repository::{ContactStore, EventStore, StoreError};
use crate::contacts::ContactId;

use super::session::SuggestionSession;

type SharedSession<C, E> = Arc<Mutex<SuggestionSession<C, E>>>;

/// Router builder exposing the suggestion session over HTTP.
pub fn suggestion_router<C, E>(session: SharedSession<C, E>) -> Router
where
    C: ContactStore + 'static,
    E: EventStore + 'static,
{
    Router::new()
        .route("/api/v1/suggestions", get(list_handler::<C, E>))
        .route(
            "/api/v1/suggestions/regenerate",
            post(regenerate_handler::<C, E>),
        )
        .route(
            "/api/v1/contacts/:contact_id/contacted",
            post(mark_contacted_handler::<C, E>),
        )
        .with_state(session)
}

pub(crate) async fn list_handler<C, E>(State(session): State<SharedSession<C, E>>) -> Response
where
    C: ContactStore + 'static,
    E: EventStore + 'static,
{
    let session = session.lock().await;
    ranking_payload(&session)
}

pub(crate) async fn regenerate_handler<C, E>(State(session): State<SharedSession<C, E>>) -> Response
where
    C: ContactStore + 'static,
    E: EventStore + 'static,
{
    let mut session = session.lock().await;
    session.regenerate().await;
    ranking_payload(&session)
}

pub(crate) async fn mark_contacted_handler<C, E>(
    State(session): State<SharedSession<C, E>>,
    Path(contact_id): Path<String>,
) -> Response
where
    C: ContactStore + 'static,
    E: EventStore + 'static,
{
    let id = ContactId(contact_id);
    let mut session = session.lock().await;
    match session.mark_contacted(&id).await {
        Ok(()) => ranking_payload(&session),
        Err(StoreError::NotFound) => {
            let payload = json!({ "error": format!("contact {id} not found") });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}

fn ranking_payload<C, E>(session: &SuggestionSession<C, E>) -> Response
where
    C: ContactStore,
    E: EventStore,
{
    let payload = json!({
        "featured": session.current(),
        "suggestions": session.suggestions(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
