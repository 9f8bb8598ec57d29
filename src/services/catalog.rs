//! Catalog management service.
//!
//! Orchestrates form binding for books, authors and copies: the pure form
//! errors and the referential checks on submitted ids are merged into one
//! field-keyed set, so a submission reports everything wrong with it in a
//! single response.

use uuid::Uuid;

use crate::{
    error::AppResult,
    forms::{
        self,
        author::AuthorPayload,
        book::BookPayload,
        instance::{InstanceCreatePayload, InstanceUpdatePayload},
        FieldError, FormErrors,
    },
    models::{
        author::Author,
        book::{BookDetails, BookShort},
        genre::Genre,
        instance::{BookInstance, InstanceDetails},
        language::Language,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // Books

    pub async fn list_books(&self, page: i64, per_page: i64) -> AppResult<(Vec<BookShort>, i64)> {
        self.repository.books.list(page, per_page).await
    }

    pub async fn get_book(&self, id: i32) -> AppResult<BookDetails> {
        self.repository.books.get_details(id).await
    }

    pub async fn create_book(&self, payload: BookPayload) -> AppResult<BookDetails> {
        let cleaned = self.clean_book(&payload).await?;
        let id = self.repository.books.create(&cleaned).await?;
        self.repository.books.get_details(id).await
    }

    pub async fn update_book(&self, id: i32, payload: BookPayload) -> AppResult<BookDetails> {
        // Surface a missing book before reporting validation errors
        self.repository.books.get_by_id(id).await?;
        let cleaned = self.clean_book(&payload).await?;
        self.repository.books.update(id, &cleaned).await?;
        self.repository.books.get_details(id).await
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    /// Bind a book submission, merging form and referential failures
    async fn clean_book(&self, payload: &BookPayload) -> AppResult<forms::book::CleanedBook> {
        let mut errors = FormErrors::new();
        let cleaned = match forms::book::clean(payload) {
            Ok(cleaned) => Some(cleaned),
            Err(form_errors) => {
                errors.merge(form_errors);
                None
            }
        };

        if let Some(author_id) = payload.author {
            if !self.repository.authors.exists(author_id).await? {
                errors.add(
                    "author",
                    FieldError::invalid_choice(format!("Author {} does not exist", author_id)),
                );
            }
        }
        if let Some(language_id) = payload.language {
            if !self.repository.languages.exists(language_id).await? {
                errors.add(
                    "language",
                    FieldError::invalid_choice(format!("Language {} does not exist", language_id)),
                );
            }
        }
        for genre_id in self.repository.genres.missing_ids(&payload.genre).await? {
            errors.add(
                "genre",
                FieldError::invalid_choice(format!("Genre {} does not exist", genre_id)),
            );
        }

        errors.into_result()?;
        Ok(cleaned.unwrap())
    }

    // Authors

    pub async fn list_authors(&self, page: i64, per_page: i64) -> AppResult<(Vec<Author>, i64)> {
        self.repository.authors.list(page, per_page).await
    }

    pub async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    pub async fn create_author(&self, payload: AuthorPayload) -> AppResult<Author> {
        let cleaned = forms::author::clean(&payload)?;
        self.repository.authors.create(&cleaned).await
    }

    pub async fn update_author(&self, id: i32, payload: AuthorPayload) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await?;
        let cleaned = forms::author::clean(&payload)?;
        self.repository.authors.update(id, &cleaned).await
    }

    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await
    }

    // Copies

    pub async fn list_copies(
        &self,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<InstanceDetails>, i64)> {
        self.repository.instances.list(page, per_page).await
    }

    pub async fn get_copy(&self, id: Uuid) -> AppResult<InstanceDetails> {
        self.repository.instances.get_details(id).await
    }

    pub async fn create_copy(&self, payload: InstanceCreatePayload) -> AppResult<BookInstance> {
        let mut errors = FormErrors::new();
        let cleaned = match forms::instance::clean_create(&payload) {
            Ok(cleaned) => Some(cleaned),
            Err(form_errors) => {
                errors.merge(form_errors);
                None
            }
        };

        if let Some(book_id) = payload.book {
            if !self.repository.books.exists(book_id).await? {
                errors.add(
                    "book",
                    FieldError::invalid_choice(format!("Book {} does not exist", book_id)),
                );
            }
        }
        self.check_borrower(payload.borrower, "borrower", &mut errors)
            .await?;

        errors.into_result()?;
        self.repository.instances.create(&cleaned.unwrap()).await
    }

    pub async fn update_copy(
        &self,
        id: Uuid,
        payload: InstanceUpdatePayload,
    ) -> AppResult<BookInstance> {
        self.repository.instances.get_by_id(id).await?;

        let mut errors = FormErrors::new();
        let cleaned = match forms::instance::clean_update(&payload) {
            Ok(cleaned) => Some(cleaned),
            Err(form_errors) => {
                errors.merge(form_errors);
                None
            }
        };
        self.check_borrower(payload.borrower, "borrower", &mut errors)
            .await?;

        errors.into_result()?;
        self.repository.instances.update(id, &cleaned.unwrap()).await
    }

    pub async fn delete_copy(&self, id: Uuid) -> AppResult<()> {
        self.repository.instances.delete(id).await
    }

    async fn check_borrower(
        &self,
        borrower_id: Option<i32>,
        field: &str,
        errors: &mut FormErrors,
    ) -> AppResult<()> {
        if let Some(id) = borrower_id {
            if !self.repository.users.exists(id).await? {
                errors.add(
                    field,
                    FieldError::invalid_choice(format!("User {} does not exist", id)),
                );
            }
        }
        Ok(())
    }

    // Genres and languages

    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }

    pub async fn create_genre(&self, name: &str) -> AppResult<Genre> {
        self.repository.genres.create(required_name(name)?).await
    }

    pub async fn update_genre(&self, id: i32, name: &str) -> AppResult<Genre> {
        self.repository.genres.update(id, required_name(name)?).await
    }

    pub async fn delete_genre(&self, id: i32) -> AppResult<()> {
        self.repository.genres.delete(id).await
    }

    pub async fn list_languages(&self) -> AppResult<Vec<Language>> {
        self.repository.languages.list().await
    }

    pub async fn create_language(&self, name: &str) -> AppResult<Language> {
        self.repository
            .languages
            .create(required_name(name)?)
            .await
    }

    pub async fn update_language(&self, id: i32, name: &str) -> AppResult<Language> {
        self.repository
            .languages
            .update(id, required_name(name)?)
            .await
    }

    pub async fn delete_language(&self, id: i32) -> AppResult<()> {
        self.repository.languages.delete(id).await
    }
}

/// Genre and language names are the whole submission; reject blanks.
fn required_name(name: &str) -> Result<&str, crate::error::AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        let mut errors = FormErrors::new();
        errors.add("name", FieldError::required());
        return Err(errors.into());
    }
    Ok(trimmed)
}
