//! Data models for the library catalog

pub mod author;
pub mod book;
pub mod genre;
pub mod instance;
pub mod language;
pub mod user;

use serde::Deserialize;
use utoipa::IntoParams;

// Re-export commonly used types
pub use author::Author;
pub use book::{Book, BookDetails, BookShort};
pub use genre::Genre;
pub use instance::{BookInstance, InstanceDetails, InstanceStatus};
pub use language::Language;
pub use user::{User, UserClaims};

/// Common pagination query parameters
#[derive(Debug, Default, Clone, Copy, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Page number, 1-based (default: 1)
    pub page: Option<i64>,
    /// Items per page (default depends on the listing)
    pub per_page: Option<i64>,
}

impl PageQuery {
    /// Resolve the page/per_page pair against a listing's default size.
    pub fn resolve(&self, default_per_page: i64) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(default_per_page).clamp(1, 100);
        (page, per_page)
    }
}
