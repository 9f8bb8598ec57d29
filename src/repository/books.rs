//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    forms::book::CleanedBook,
    models::{
        author::Author,
        book::{display_genre, Book, BookDetails, BookShort},
        genre::Genre,
        instance::BookInstance,
        language::Language,
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get the bare book row by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Whether a book exists (referential check for copy forms)
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Get a book with author, language, genres and copies
    pub async fn get_details(&self, id: i32) -> AppResult<BookDetails> {
        let book = self.get_by_id(id).await?;

        let author = match book.author_id {
            Some(author_id) => {
                sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
                    .bind(author_id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            None => None,
        };

        let language = match book.language_id {
            Some(language_id) => {
                sqlx::query_as::<_, Language>("SELECT * FROM languages WHERE id = $1")
                    .bind(language_id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            None => None,
        };

        let genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.* FROM genres g
            JOIN book_genres bg ON bg.genre_id = g.id
            WHERE bg.book_id = $1
            ORDER BY g.name
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let copies = sqlx::query_as::<_, BookInstance>(
            "SELECT * FROM book_instances WHERE book_id = $1 ORDER BY imprint, id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let display_genre = display_genre(&genres);

        Ok(BookDetails {
            id: book.id,
            title: book.title,
            summary: book.summary,
            isbn: book.isbn,
            author,
            language,
            genres,
            display_genre,
            copies,
        })
    }

    /// List books ordered by title, with author name and joined genres
    pub async fn list(&self, page: i64, per_page: i64) -> AppResult<(Vec<BookShort>, i64)> {
        let books = sqlx::query_as::<_, BookShort>(
            r#"
            SELECT b.id, b.title,
                   CASE WHEN a.id IS NULL THEN NULL
                        ELSE a.last_name || ', ' || a.first_name
                   END AS author_name,
                   COALESCE((
                       SELECT string_agg(g.name, ', ' ORDER BY g.name)
                       FROM genres g
                       JOIN book_genres bg ON bg.genre_id = g.id
                       WHERE bg.book_id = b.id
                   ), '') AS display_genre
            FROM books b
            LEFT JOIN authors a ON b.author_id = a.id
            ORDER BY b.title, b.id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.pool)
        .await?;

        let total = self.count().await?;
        Ok((books, total))
    }

    /// Create a book and its genre links from a cleaned submission
    pub async fn create(&self, values: &CleanedBook) -> AppResult<i32> {
        let mut tx = self.pool.begin().await?;

        let book_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO books (title, summary, isbn, author_id, language_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&values.title)
        .bind(&values.summary)
        .bind(&values.isbn)
        .bind(values.author_id)
        .bind(values.language_id)
        .fetch_one(&mut *tx)
        .await?;

        for genre_id in &values.genre_ids {
            sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2)")
                .bind(book_id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(book_id)
    }

    /// Update a book and replace its genre links
    pub async fn update(&self, id: i32, values: &CleanedBook) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $1, summary = $2, isbn = $3, author_id = $4, language_id = $5
            WHERE id = $6
            "#,
        )
        .bind(&values.title)
        .bind(&values.summary)
        .bind(&values.isbn)
        .bind(values.author_id)
        .bind(values.language_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for genre_id in &values.genre_ids {
            sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2)")
                .bind(id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Delete a book (copies and genre links cascade)
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }

    /// Count all books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count books whose title contains one substring AND whose genre name
    /// contains another, both case-insensitive
    pub async fn count_title_genre_contains(
        &self,
        title_contains: &str,
        genre_contains: &str,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(DISTINCT b.id)
            FROM books b
            JOIN book_genres bg ON bg.book_id = b.id
            JOIN genres g ON g.id = bg.genre_id
            WHERE b.title ILIKE '%' || $1 || '%'
              AND g.name ILIKE '%' || $2 || '%'
            "#,
        )
        .bind(title_contains)
        .bind(genre_contains)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
