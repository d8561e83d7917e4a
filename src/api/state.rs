//! Application state - Dependency injection container for handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Cache, Database};
use crate::services::{
    AdminService, AuthService, BillingService, BlogService, MarketplaceService, MessagingService,
    ProfileService, Services,
};

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub profile_service: Arc<dyn ProfileService>,
    pub marketplace_service: Arc<dyn MarketplaceService>,
    pub billing_service: Arc<dyn BillingService>,
    pub messaging_service: Arc<dyn MessagingService>,
    pub admin_service: Arc<dyn AdminService>,
    pub blog_service: Arc<dyn BlogService>,
    /// Redis cache backing rate limiting
    pub cache: Arc<Cache>,
    /// Database handle, used by health checks
    pub database: Arc<Database>,
}

impl AppState {
    /// Build state with the full service graph wired over the database.
    pub fn from_config(database: Arc<Database>, cache: Arc<Cache>, config: Config) -> Self {
        let services = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: services.auth,
            profile_service: services.profiles,
            marketplace_service: services.marketplace,
            billing_service: services.billing,
            messaging_service: services.messaging,
            admin_service: services.admin,
            blog_service: services.blog,
            cache,
            database,
        }
    }
}
