//! Back-office handlers. All routes here sit behind the staff guard;
//! superuser-only actions are re-checked in the services.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{delete, get, post, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::AppState;
use crate::domain::{
    Actor, Article, Country, CountryConfigUpdate, NewCountry, TutorProfile, UserResponse,
};
use crate::errors::AppResult;
use crate::services::{AdminDashboard, ArticleUpdate, ModerationDecision, NewAdmin, NewArticle};
use crate::types::{Created, MessageResponse, NoContent};

/// Category creation body
#[derive(Debug, Deserialize, ToSchema)]
pub struct NewCategoryRequest {
    pub name: String,
}

/// Back-office routes (nested under /admin)
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/tutors/:id/moderate", post(moderate_tutor))
        .route("/tutors/:id/suspend", post(suspend_tutor))
        .route("/admins", post(create_sub_admin))
        .route("/users/:id/toggle-active", post(toggle_user_active))
        .route("/users/:id", delete(delete_user))
        .route("/countries", post(add_country))
        .route("/countries/:id/config", put(update_country_config))
        .route("/countries/:id/toggle", post(toggle_country))
        .route("/countries/:id", delete(delete_country))
        .route("/requests/:id", delete(delete_request))
        .route("/articles", get(list_articles).post(create_article))
        .route("/articles/:id", put(edit_article).delete(delete_article))
        .route("/articles/:id/toggle-publish", post(toggle_publish))
        .route("/categories", post(create_category))
        .route("/categories/:id", delete(delete_category))
}

/// Back-office dashboard: stats and working lists
pub async fn dashboard(State(state): State<AppState>) -> AppResult<Json<AdminDashboard>> {
    Ok(Json(state.admin_service.dashboard().await?))
}

/// Validate or reject a pending tutor profile
#[utoipa::path(
    post,
    path = "/admin/tutors/{id}/moderate",
    tag = "Back-office",
    params(("id" = Uuid, Path, description = "Tutor profile id")),
    request_body = ModerationDecision,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile moderated"),
        (status = 400, description = "Not awaiting moderation, or missing rejection note")
    )
)]
pub async fn moderate_tutor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(decision): Json<ModerationDecision>,
) -> AppResult<Json<TutorProfile>> {
    Ok(Json(state.admin_service.moderate_tutor(id, decision).await?))
}

/// Suspend a validated tutor
pub async fn suspend_tutor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<TutorProfile>> {
    Ok(Json(state.admin_service.suspend_tutor(id).await?))
}

/// Create a staff account (superuser only)
pub async fn create_sub_admin(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<NewAdmin>,
) -> AppResult<Created<UserResponse>> {
    let user = state.admin_service.create_sub_admin(&actor, payload).await?;
    Ok(Created(UserResponse::from(user)))
}

/// Activate/deactivate an account
pub async fn toggle_user_active(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = state.admin_service.toggle_user_active(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Hard-delete an account. Superusers and the acting admin are protected.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.admin_service.delete_user(&actor, id).await?;
    Ok(Json(MessageResponse::new("User permanently deleted")))
}

/// Add a country
pub async fn add_country(
    State(state): State<AppState>,
    Json(payload): Json<NewCountry>,
) -> AppResult<Created<Country>> {
    Ok(Created(state.admin_service.add_country(payload).await?))
}

/// Update a country's financial configuration
pub async fn update_country_config(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CountryConfigUpdate>,
) -> AppResult<Json<Country>> {
    Ok(Json(
        state.admin_service.update_country_config(id, payload).await?,
    ))
}

/// Toggle a country's active flag
pub async fn toggle_country(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Country>> {
    Ok(Json(state.admin_service.toggle_country(id).await?))
}

/// Delete a country (superuser only)
pub async fn delete_country(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.admin_service.delete_country(&actor, id).await?;
    Ok(NoContent)
}

/// Delete a course request (superuser only)
pub async fn delete_request(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.admin_service.delete_request(&actor, id).await?;
    Ok(NoContent)
}

/// All articles including drafts
pub async fn list_articles(State(state): State<AppState>) -> AppResult<Json<Vec<Article>>> {
    Ok(Json(state.blog_service.list_all_articles().await?))
}

/// Publish an article
pub async fn create_article(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<NewArticle>,
) -> AppResult<Created<Article>> {
    Ok(Created(
        state.blog_service.create_article(&actor, payload).await?,
    ))
}

/// Edit an article
pub async fn edit_article(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ArticleUpdate>,
) -> AppResult<Json<Article>> {
    Ok(Json(state.blog_service.edit_article(id, payload).await?))
}

/// Toggle an article online/draft
pub async fn toggle_publish(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Article>> {
    Ok(Json(state.blog_service.toggle_publish(id).await?))
}

/// Delete an article (superuser only)
pub async fn delete_article(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.blog_service.delete_article(&actor, id).await?;
    Ok(NoContent)
}

/// Add a blog category
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<NewCategoryRequest>,
) -> AppResult<Created<crate::domain::Category>> {
    Ok(Created(
        state.blog_service.create_category(payload.name).await?,
    ))
}

/// Delete a blog category
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.blog_service.delete_category(id).await?;
    Ok(NoContent)
}
