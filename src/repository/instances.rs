//! Book copies repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    forms::instance::{CleanedInstanceCreate, CleanedInstanceUpdate},
    models::instance::{derive_status, BookInstance, InstanceDetails, InstanceStatus},
};

const DETAILS_SELECT: &str = r#"
    SELECT bi.id, bi.book_id, b.title AS book_title, bi.imprint, bi.due_back,
           bi.status, bi.borrower_id,
           CASE WHEN u.id IS NULL THEN NULL
                ELSE u.last_name || ', ' || u.first_name
           END AS borrower_name,
           COALESCE(bi.status = 'o' AND bi.due_back < CURRENT_DATE, FALSE) AS is_overdue
    FROM book_instances bi
    JOIN books b ON bi.book_id = b.id
    LEFT JOIN users u ON bi.borrower_id = u.id
"#;

#[derive(Clone)]
pub struct InstancesRepository {
    pool: Pool<Postgres>,
}

impl InstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a copy by its token
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstance>("SELECT * FROM book_instances WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book copy {} not found", id)))
    }

    /// Get a copy with display fields
    pub async fn get_details(&self, id: Uuid) -> AppResult<InstanceDetails> {
        let query = format!("{} WHERE bi.id = $1", DETAILS_SELECT);
        sqlx::query_as::<_, InstanceDetails>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book copy {} not found", id)))
    }

    /// List every copy, soonest due first
    pub async fn list(&self, page: i64, per_page: i64) -> AppResult<(Vec<InstanceDetails>, i64)> {
        let query = format!(
            "{} ORDER BY bi.due_back ASC NULLS LAST, bi.id LIMIT $1 OFFSET $2",
            DETAILS_SELECT
        );
        let instances = sqlx::query_as::<_, InstanceDetails>(&query)
            .bind(per_page)
            .bind((page - 1) * per_page)
            .fetch_all(&self.pool)
            .await?;

        let total = self.count().await?;
        Ok((instances, total))
    }

    /// List copies currently on loan, ascending by due date, optionally
    /// restricted to one borrower
    pub async fn list_on_loan(
        &self,
        borrower_id: Option<i32>,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<InstanceDetails>, i64)> {
        let query = format!(
            r#"{} WHERE bi.status = 'o' AND ($1::int4 IS NULL OR bi.borrower_id = $1)
            ORDER BY bi.due_back ASC, bi.id LIMIT $2 OFFSET $3"#,
            DETAILS_SELECT
        );
        let instances = sqlx::query_as::<_, InstanceDetails>(&query)
            .bind(borrower_id)
            .bind(per_page)
            .bind((page - 1) * per_page)
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM book_instances
            WHERE status = 'o' AND ($1::int4 IS NULL OR borrower_id = $1)
            "#,
        )
        .bind(borrower_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((instances, total))
    }

    /// Create a copy; the stored status is derived from the loan fields
    pub async fn create(&self, values: &CleanedInstanceCreate) -> AppResult<BookInstance> {
        let status = derive_status(
            InstanceStatus::Maintenance,
            values.borrower_id,
            values.due_back,
        );

        let instance = sqlx::query_as::<_, BookInstance>(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, due_back, status, borrower_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(values.id)
        .bind(values.book_id)
        .bind(&values.imprint)
        .bind(values.due_back)
        .bind(status)
        .bind(values.borrower_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(instance)
    }

    /// Update a copy; the stored status is re-derived from the loan fields
    pub async fn update(
        &self,
        id: Uuid,
        values: &CleanedInstanceUpdate,
    ) -> AppResult<BookInstance> {
        let current = self.get_by_id(id).await?;
        let status = derive_status(current.status, values.borrower_id, values.due_back);

        let instance = sqlx::query_as::<_, BookInstance>(
            r#"
            UPDATE book_instances
            SET imprint = $1, due_back = $2, status = $3, borrower_id = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&values.imprint)
        .bind(values.due_back)
        .bind(status)
        .bind(values.borrower_id)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(instance)
    }

    /// Renew a loan: set the due date and borrower, marking the copy on loan
    pub async fn renew(
        &self,
        id: Uuid,
        due_back: NaiveDate,
        borrower_id: i32,
    ) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstance>(
            r#"
            UPDATE book_instances
            SET due_back = $1, borrower_id = $2, status = 'o'
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(due_back)
        .bind(borrower_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book copy {} not found", id)))
    }

    /// Delete a copy
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book copy {} not found", id)));
        }
        Ok(())
    }

    /// Count all copies
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count copies with a given status
    pub async fn count_by_status(&self, status: InstanceStatus) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
                .bind(status)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
