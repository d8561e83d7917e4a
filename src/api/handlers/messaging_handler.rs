//! Messaging handlers: threads, inbox, unread badge.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Actor, MessageResponse, ThreadDetail, ThreadSummary};
use crate::errors::AppResult;
use crate::types::Created;

/// Message body
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PostMessageRequest {
    #[validate(length(min = 1, message = "Message content cannot be empty"))]
    pub content: String,
}

/// Unread badge payload
#[derive(Debug, Serialize, ToSchema)]
pub struct UnreadCount {
    pub unread: u64,
}

/// Thread id returned when starting a conversation
#[derive(Debug, Serialize, ToSchema)]
pub struct ThreadRef {
    pub thread_id: Uuid,
}

/// Authenticated messaging routes
pub fn messaging_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", get(inbox))
        .route("/messages/unread-count", get(unread_count))
        .route("/messages/with/:user_id", post(start_thread))
        .route("/messages/:thread_id", get(open_thread).post(post_message))
}

/// Start (or resume) a conversation with another user. The same pair
/// always resolves to the same thread.
#[utoipa::path(
    post,
    path = "/messages/with/{user_id}",
    tag = "Messaging",
    params(("user_id" = Uuid, Path, description = "The other participant")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Existing or new thread", body = ThreadRef),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn start_thread(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<ThreadRef>> {
    let thread = state.messaging_service.start_thread(&actor, user_id).await?;
    Ok(Json(ThreadRef {
        thread_id: thread.id,
    }))
}

/// Inbox: the actor's threads, most recently active first
pub async fn inbox(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> AppResult<Json<Vec<ThreadSummary>>> {
    Ok(Json(state.messaging_service.inbox(&actor).await?))
}

/// Open a thread. Everything the other side sent becomes read.
#[utoipa::path(
    get,
    path = "/messages/{thread_id}",
    tag = "Messaging",
    params(("thread_id" = Uuid, Path, description = "Thread id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Thread with messages", body = ThreadDetail),
        (status = 403, description = "Not a participant")
    )
)]
pub async fn open_thread(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(thread_id): Path<Uuid>,
) -> AppResult<Json<ThreadDetail>> {
    Ok(Json(
        state.messaging_service.open_thread(&actor, thread_id).await?,
    ))
}

/// Post a message into a thread
pub async fn post_message(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(thread_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<PostMessageRequest>,
) -> AppResult<Created<MessageResponse>> {
    let message = state
        .messaging_service
        .post_message(&actor, thread_id, payload.content)
        .await?;
    Ok(Created(message))
}

/// Unread badge count
pub async fn unread_count(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> AppResult<Json<UnreadCount>> {
    Ok(Json(UnreadCount {
        unread: state.messaging_service.unread_count(&actor).await?,
    }))
}
