//! Book create/update form.
//!
//! Field subset: title, author, summary, isbn, genre(s), language. The
//! author is optional (a book may have no author on record); the language
//! is required. Referential checks on the submitted ids happen in the
//! service layer and are merged into the same error set.

use serde::Deserialize;
use utoipa::ToSchema;

use super::{required_text, FieldError, FormErrors};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BookPayload {
    pub title: Option<String>,
    pub author: Option<i32>,
    pub summary: Option<String>,
    pub isbn: Option<String>,
    #[serde(default)]
    pub genre: Vec<i32>,
    pub language: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedBook {
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: Option<i32>,
    pub language_id: i32,
    pub genre_ids: Vec<i32>,
}

pub fn clean(payload: &BookPayload) -> Result<CleanedBook, FormErrors> {
    let mut errors = FormErrors::new();

    let title = required_text(&payload.title, "title", &mut errors);
    let summary = required_text(&payload.summary, "summary", &mut errors);
    let isbn = required_text(&payload.isbn, "isbn", &mut errors);
    if payload.language.is_none() {
        errors.add("language", FieldError::required());
    }

    errors.into_result()?;

    let mut genre_ids = payload.genre.clone();
    genre_ids.sort_unstable();
    genre_ids.dedup();

    Ok(CleanedBook {
        title: title.unwrap(),
        summary: summary.unwrap(),
        isbn: isbn.unwrap(),
        author_id: payload.author,
        language_id: payload.language.unwrap(),
        genre_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::super::FieldErrorCode;
    use super::*;

    #[test]
    fn full_payload_cleans_and_dedups_genres() {
        let cleaned = clean(&BookPayload {
            title: Some("A Wizard of Earthsea".to_string()),
            author: Some(3),
            summary: Some("Ged learns the true names of things.".to_string()),
            isbn: Some("9780547773742".to_string()),
            genre: vec![2, 1, 2],
            language: Some(1),
        })
        .unwrap();
        assert_eq!(cleaned.genre_ids, vec![1, 2]);
        assert_eq!(cleaned.author_id, Some(3));
    }

    #[test]
    fn missing_required_fields_are_all_reported() {
        let errors = clean(&BookPayload {
            title: None,
            author: None,
            summary: None,
            isbn: Some("9780547773742".to_string()),
            genre: vec![],
            language: None,
        })
        .unwrap_err();
        for field in ["title", "summary", "language"] {
            assert_eq!(
                errors.field(field).unwrap()[0].code,
                FieldErrorCode::RequiredFieldMissing,
                "expected a required error on {}",
                field
            );
        }
        assert!(errors.field("isbn").is_none());
        assert!(errors.field("author").is_none());
    }
}
