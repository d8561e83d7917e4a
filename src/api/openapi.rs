//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    admin_handler, auth_handler, billing_handler, marketplace_handler, messaging_handler,
};
use crate::domain::{
    billing::UnlockResponse,
    messaging::{MessageResponse, Participant, ThreadDetail, ThreadSummary},
    profiles::{ContactInfo, TutorCard, TutorDetail, TutorStatus},
    request::{CourseRequestResponse, NewCourseRequest, RequestStatus},
    review::ReviewResponse,
    scoring::{BudgetRange, Intention, Qualification, StartTime},
    user::{Role, UserResponse},
};
use crate::services::{ModerationDecision, TokenResponse};

/// OpenAPI documentation for the marketplace API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tutormarket API",
        version = "0.1.0",
        description = "Tutoring marketplace: course requests with lead scoring, \
                       moderated tutor directory with a contact paywall, messaging",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication
        auth_handler::register,
        auth_handler::login,
        auth_handler::admin_login,
        // Marketplace
        marketplace_handler::list_tutors,
        marketplace_handler::tutor_detail,
        marketplace_handler::create_request,
        marketplace_handler::browse_requests,
        marketplace_handler::submit_review,
        // Billing
        billing_handler::unlock_contact,
        // Messaging
        messaging_handler::start_thread,
        messaging_handler::open_thread,
        // Back-office
        admin_handler::moderate_tutor,
    ),
    components(
        schemas(
            Role,
            UserResponse,
            TokenResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            TutorStatus,
            TutorCard,
            TutorDetail,
            ContactInfo,
            BudgetRange,
            StartTime,
            Intention,
            Qualification,
            RequestStatus,
            NewCourseRequest,
            CourseRequestResponse,
            ReviewResponse,
            marketplace_handler::ReviewRequest,
            UnlockResponse,
            Participant,
            MessageResponse,
            ThreadSummary,
            ThreadDetail,
            messaging_handler::ThreadRef,
            messaging_handler::UnreadCount,
            ModerationDecision,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Marketplace", description = "Tutor directory, course requests, reviews"),
        (name = "Billing", description = "Contact-unlock purchases"),
        (name = "Messaging", description = "Two-party conversations"),
        (name = "Back-office", description = "Moderation and administration")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
