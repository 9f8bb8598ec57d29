//! Business logic services

pub mod catalog;
pub mod loans;
pub mod sessions;
pub mod stats;
pub mod users;

use crate::{config::AuthConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
    pub stats: stats::StatsService,
    pub users: users::UsersService,
    pub sessions: sessions::SessionsService,
}

impl Services {
    /// Create all services with the given repository
    pub async fn new(
        repository: Repository,
        auth_config: AuthConfig,
        sessions: sessions::SessionsService,
    ) -> AppResult<Self> {
        Ok(Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            loans: loans::LoansService::new(repository.clone()),
            stats: stats::StatsService::new(repository.clone()),
            users: users::UsersService::new(repository, auth_config),
            sessions,
        })
    }
}
