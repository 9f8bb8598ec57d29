//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::author::Author;
use super::genre::Genre;
use super::instance::BookInstance;
use super::language::Language;

/// Book record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: Option<i32>,
    pub language_id: Option<i32>,
}

/// Book row for paginated listings
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BookShort {
    pub id: i32,
    pub title: String,
    /// "Last, First" of the author, when the book has one
    pub author_name: Option<String>,
    /// Comma-joined genre names
    pub display_genre: String,
}

/// Book with its related records for the detail view
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetails {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author: Option<Author>,
    pub language: Option<Language>,
    pub genres: Vec<Genre>,
    /// Comma-joined genre names
    pub display_genre: String,
    /// Physical copies of this book
    pub copies: Vec<BookInstance>,
}

/// Comma-join genre names for display
pub fn display_genre(genres: &[Genre]) -> String {
    genres
        .iter()
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_genre_joins_names() {
        let genres = vec![
            Genre { id: 1, name: "Fantasy".to_string() },
            Genre { id: 2, name: "Poetry".to_string() },
        ];
        assert_eq!(display_genre(&genres), "Fantasy, Poetry");
        assert_eq!(display_genre(&[]), "");
    }
}
