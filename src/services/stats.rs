//! Catalog-wide counts for the home view

use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::instance::InstanceStatus, repository::Repository};

/// Aggregate counts reported by the home view
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogCounts {
    /// Total books on record
    pub num_books: i64,
    /// Total authors on record
    pub num_authors: i64,
    /// Total physical copies
    pub num_instances: i64,
    /// Copies currently available
    pub num_instances_available: i64,
    /// Books whose title and genre both match the configured substrings
    pub num_books_featured: i64,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Compute the home-view counts. Each count reflects live data; nothing
    /// is cached between requests.
    pub async fn catalog_counts(
        &self,
        title_contains: &str,
        genre_contains: &str,
    ) -> AppResult<CatalogCounts> {
        let num_books = self.repository.books.count().await?;
        let num_authors = self.repository.authors.count().await?;
        let num_instances = self.repository.instances.count().await?;
        let num_instances_available = self
            .repository
            .instances
            .count_by_status(InstanceStatus::Available)
            .await?;
        let num_books_featured = self
            .repository
            .books
            .count_title_genre_contains(title_contains, genre_contains)
            .await?;

        Ok(CatalogCounts {
            num_books,
            num_authors,
            num_instances,
            num_instances_available,
            num_books_featured,
        })
    }
}
