//! Tutormarket - tutoring marketplace backend
//!
//! Connects parents looking for tutors with tutors offering lessons:
//! course requests with lead scoring, a moderated tutor directory behind a
//! contact paywall, two-party messaging, a blog, and an admin back-office.
//!
//! # Architecture Layers
//!
//! - **cli** / **commands**: command-line interface (`serve`, `migrate`,
//!   `jobs`, `seed`)
//! - **config**: environment configuration and constants
//! - **domain**: business entities, role capabilities, the scoring engine
//!   and the moderation state machine
//! - **services**: use cases behind traits
//! - **infra**: database, repositories, Redis cache
//! - **api**: HTTP handlers, middleware, routes
//! - **jobs**: background worker (emails, maintenance sweep)
//! - **types**: pagination and response envelopes
//! - **errors**: centralized error handling

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod jobs;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Actor, Role, User};
pub use errors::{AppError, AppResult};
