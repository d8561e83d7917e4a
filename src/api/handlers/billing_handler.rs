//! Billing handlers: the contact-unlock purchase stub.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::domain::{Actor, UnlockResponse};
use crate::errors::AppResult;

/// Authenticated billing routes
pub fn billing_routes() -> Router<AppState> {
    Router::new()
        .route("/tutors/:id/unlock", post(unlock_contact))
        .route("/unlocks", get(my_unlocks))
}

/// Purchase a contact unlock. Idempotent: buying an already-unlocked
/// contact returns the existing record without charging again.
#[utoipa::path(
    post,
    path = "/tutors/{id}/unlock",
    tag = "Billing",
    params(("id" = Uuid, Path, description = "Tutor profile id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Contact unlocked (or already was)", body = UnlockResponse),
        (status = 403, description = "Not a parent account"),
        (status = 404, description = "Unknown or non-validated tutor")
    )
)]
pub async fn unlock_contact(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UnlockResponse>> {
    let unlock = state.billing_service.unlock_contact(&actor, id).await?;
    Ok(Json(unlock))
}

/// The parent's purchased unlocks
pub async fn my_unlocks(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> AppResult<Json<Vec<UnlockResponse>>> {
    Ok(Json(state.billing_service.my_unlocks(&actor).await?))
}
