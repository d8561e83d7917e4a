//! Profile handlers: role-branched dashboard and profile edits.

use axum::{
    extract::State,
    response::Json,
    routing::{get, put},
    Extension, Router,
};

use crate::api::AppState;
use crate::domain::{
    Actor, ParentProfile, ParentProfileUpdate, TutorProfile, TutorProfileUpdate, UpdateAccount,
    UserResponse,
};
use crate::errors::AppResult;
use crate::services::Dashboard;

/// Authenticated profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/profile/account", put(update_account))
        .route("/profile/tutor", put(update_tutor_profile))
        .route("/profile/parent", put(update_parent_profile))
}

/// Role-branched dashboard. First visit creates the profile row.
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> AppResult<Json<Dashboard>> {
    Ok(Json(state.profile_service.dashboard(&actor).await?))
}

/// Shared account fields (names, email, phone)
pub async fn update_account(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<UpdateAccount>,
) -> AppResult<Json<UserResponse>> {
    let user = state.profile_service.update_account(&actor, payload).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Tutor profile edit. A draft or rejected profile re-enters the
/// moderation queue on save.
pub async fn update_tutor_profile(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<TutorProfileUpdate>,
) -> AppResult<Json<TutorProfile>> {
    let profile = state
        .profile_service
        .update_tutor_profile(&actor, payload)
        .await?;
    Ok(Json(profile))
}

/// Parent profile edit
pub async fn update_parent_profile(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<ParentProfileUpdate>,
) -> AppResult<Json<ParentProfile>> {
    let profile = state
        .profile_service
        .update_parent_profile(&actor, payload)
        .await?;
    Ok(Json(profile))
}
