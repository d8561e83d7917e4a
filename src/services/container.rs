//! Service container - wires every service over one Unit of Work.

use std::sync::Arc;

use super::{
    AdminService, AuthService, Authenticator, BackOffice, Billing, BillingService, BlogService,
    MarketplaceService, Marketplace, Messenger, MessagingService, Newsroom, ProfileService,
    Profiles,
};
use crate::config::Config;
use crate::infra::Persistence;

/// All application services, shared behind Arcs.
pub struct Services {
    pub auth: Arc<dyn AuthService>,
    pub profiles: Arc<dyn ProfileService>,
    pub marketplace: Arc<dyn MarketplaceService>,
    pub billing: Arc<dyn BillingService>,
    pub messaging: Arc<dyn MessagingService>,
    pub admin: Arc<dyn AdminService>,
    pub blog: Arc<dyn BlogService>,
}

impl Services {
    /// Build the full service graph from a database connection.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth: Arc::new(Authenticator::new(uow.clone(), config)),
            profiles: Arc::new(Profiles::new(uow.clone())),
            marketplace: Arc::new(Marketplace::new(uow.clone())),
            billing: Arc::new(Billing::new(uow.clone())),
            messaging: Arc::new(Messenger::new(uow.clone())),
            admin: Arc::new(BackOffice::new(uow.clone())),
            blog: Arc::new(Newsroom::new(uow)),
        }
    }
}
