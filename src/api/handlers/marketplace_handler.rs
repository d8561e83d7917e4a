//! Marketplace handlers: tutor directory, course requests, reviews.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::MaybeActor;
use crate::api::AppState;
use crate::domain::{
    Actor, City, CourseRequestResponse, CourseRequestUpdate, Level, NewCourseRequest, ReviewResponse,
    Subject, TutorCard, TutorDetail,
};
use crate::errors::AppResult;
use crate::infra::TutorSearch;
use crate::types::Created;

/// Directory filter query
#[derive(Debug, Deserialize)]
pub struct TutorFilter {
    pub subject_id: Option<Uuid>,
    pub level_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
}

/// Tutor feed filter query
#[derive(Debug, Deserialize)]
pub struct RequestFilter {
    pub city_id: Option<Uuid>,
}

/// Review submission body
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReviewRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    #[schema(minimum = 1, maximum = 5, example = 5)]
    pub rating: i16,
    #[serde(default)]
    pub comment: String,
}

/// Public marketplace routes (no authentication required)
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/tutors", get(list_tutors))
        .route("/tutors/:id", get(tutor_detail))
        .route("/catalog/subjects", get(list_subjects))
        .route("/catalog/levels", get(list_levels))
        .route("/catalog/cities", get(list_cities))
}

/// Authenticated marketplace routes
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/requests", post(create_request).get(browse_requests))
        .route("/requests/mine", get(my_requests))
        .route("/requests/:id", put(update_request))
        .route("/tutors/:id/reviews", post(submit_review))
}

/// Public tutor directory with subject/level/city filters
#[utoipa::path(
    get,
    path = "/tutors",
    tag = "Marketplace",
    params(
        ("subject_id" = Option<Uuid>, Query, description = "Filter by subject"),
        ("level_id" = Option<Uuid>, Query, description = "Filter by level"),
        ("city_id" = Option<Uuid>, Query, description = "Filter by city")
    ),
    responses((status = 200, description = "Validated tutors", body = [TutorCard]))
)]
pub async fn list_tutors(
    State(state): State<AppState>,
    Query(filter): Query<TutorFilter>,
) -> AppResult<Json<Vec<TutorCard>>> {
    let cards = state
        .marketplace_service
        .list_tutors(TutorSearch {
            subject_id: filter.subject_id,
            level_id: filter.level_id,
            city_id: filter.city_id,
        })
        .await?;
    Ok(Json(cards))
}

/// Tutor detail page. Contact fields stay masked until the viewer is the
/// tutor, a superuser, or has purchased an unlock.
#[utoipa::path(
    get,
    path = "/tutors/{id}",
    tag = "Marketplace",
    params(("id" = Uuid, Path, description = "Tutor profile id")),
    responses(
        (status = 200, description = "Tutor detail with paywall applied", body = TutorDetail),
        (status = 404, description = "Unknown or non-validated tutor")
    )
)]
pub async fn tutor_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    MaybeActor(viewer): MaybeActor,
) -> AppResult<Json<TutorDetail>> {
    let detail = state
        .marketplace_service
        .tutor_detail(id, viewer.as_ref())
        .await?;
    Ok(Json(detail))
}

pub async fn list_subjects(State(state): State<AppState>) -> AppResult<Json<Vec<Subject>>> {
    Ok(Json(state.marketplace_service.subjects().await?))
}

pub async fn list_levels(State(state): State<AppState>) -> AppResult<Json<Vec<Level>>> {
    Ok(Json(state.marketplace_service.levels().await?))
}

pub async fn list_cities(State(state): State<AppState>) -> AppResult<Json<Vec<City>>> {
    Ok(Json(state.marketplace_service.cities().await?))
}

/// Post a new course request (parents only). Scoring happens here, once.
#[utoipa::path(
    post,
    path = "/requests",
    tag = "Marketplace",
    request_body = NewCourseRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Request posted and scored", body = CourseRequestResponse),
        (status = 403, description = "Not a parent account")
    )
)]
pub async fn create_request(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<NewCourseRequest>,
) -> AppResult<Created<CourseRequestResponse>> {
    let request = state
        .marketplace_service
        .create_request(&actor, payload)
        .await?;
    Ok(Created(CourseRequestResponse::from(request)))
}

/// Edit an owned request; any edit puts it back on the market
pub async fn update_request(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CourseRequestUpdate>,
) -> AppResult<Json<CourseRequestResponse>> {
    let request = state
        .marketplace_service
        .update_request(&actor, id, payload)
        .await?;
    Ok(Json(CourseRequestResponse::from(request)))
}

/// The parent's own requests
pub async fn my_requests(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> AppResult<Json<Vec<CourseRequestResponse>>> {
    let requests = state.marketplace_service.my_requests(&actor).await?;
    Ok(Json(
        requests.into_iter().map(CourseRequestResponse::from).collect(),
    ))
}

/// Tutor-facing feed of active requests
#[utoipa::path(
    get,
    path = "/requests",
    tag = "Marketplace",
    params(("city_id" = Option<Uuid>, Query, description = "Filter by city")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active requests", body = [CourseRequestResponse]),
        (status = 403, description = "Not a tutor account")
    )
)]
pub async fn browse_requests(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(filter): Query<RequestFilter>,
) -> AppResult<Json<Vec<CourseRequestResponse>>> {
    let requests = state
        .marketplace_service
        .browse_requests(&actor, filter.city_id)
        .await?;
    Ok(Json(
        requests.into_iter().map(CourseRequestResponse::from).collect(),
    ))
}

/// Leave a review on a tutor (requires a contact unlock)
#[utoipa::path(
    post,
    path = "/tutors/{id}/reviews",
    tag = "Marketplace",
    params(("id" = Uuid, Path, description = "Tutor profile id")),
    request_body = ReviewRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Review published", body = ReviewResponse),
        (status = 403, description = "No unlock for this tutor"),
        (status = 409, description = "Already reviewed this tutor")
    )
)]
pub async fn submit_review(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ReviewRequest>,
) -> AppResult<Created<ReviewResponse>> {
    let review = state
        .marketplace_service
        .submit_review(&actor, id, payload.rating, payload.comment)
        .await?;

    Ok(Created(ReviewResponse {
        id: review.id,
        author_name: actor.username.clone(),
        rating: review.rating,
        comment: review.comment,
        created_at: review.created_at,
    }))
}
