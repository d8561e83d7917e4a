//! Blog handlers: public reading, comments and likes.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Actor, ArticleDetail, ArticleSummary, Category, CommentResponse};
use crate::errors::AppResult;
use crate::services::LikeStatus;
use crate::types::{Created, Paginated};

/// Blog listing query
#[derive(Debug, Deserialize)]
pub struct BlogFilter {
    pub category: Option<String>,
    #[serde(default = "default_page")]
    pub page: u64,
}

fn default_page() -> u64 {
    1
}

/// Comment body
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CommentRequest {
    #[validate(length(min = 1, message = "Comment cannot be empty"))]
    pub content: String,
}

/// Public blog routes
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/blog", get(list_articles))
        .route("/blog/categories", get(list_categories))
        .route("/blog/:slug", get(article_detail))
}

/// Authenticated blog routes
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/blog/:slug/comments", post(add_comment))
        .route("/blog/:slug/like", post(toggle_like))
}

/// Published articles, optionally filtered by category slug
pub async fn list_articles(
    State(state): State<AppState>,
    Query(filter): Query<BlogFilter>,
) -> AppResult<Json<Paginated<ArticleSummary>>> {
    let page = state
        .blog_service
        .list_articles(filter.category, filter.page)
        .await?;
    Ok(Json(page))
}

pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(state.blog_service.list_categories().await?))
}

/// Full article with comments and like count
pub async fn article_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ArticleDetail>> {
    Ok(Json(state.blog_service.article_detail(&slug).await?))
}

/// Comment on an article
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(slug): Path<String>,
    ValidatedJson(payload): ValidatedJson<CommentRequest>,
) -> AppResult<Created<CommentResponse>> {
    let comment = state
        .blog_service
        .add_comment(&actor, &slug, payload.content)
        .await?;
    Ok(Created(comment))
}

/// Like or unlike an article
pub async fn toggle_like(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(slug): Path<String>,
) -> AppResult<Json<LikeStatus>> {
    Ok(Json(state.blog_service.toggle_like(&actor, &slug).await?))
}
