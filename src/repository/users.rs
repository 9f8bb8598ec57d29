//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::User,
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Get user by username
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Whether a user exists (borrower referential check)
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// List every user ordered by last name (borrower selectors)
    pub async fn list_ordered(&self) -> AppResult<Vec<User>> {
        let users =
            sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY last_name, first_name, id")
                .fetch_all(&self.pool)
                .await?;
        Ok(users)
    }

    /// Create a user with an already-hashed password
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        first_name: &str,
        last_name: &str,
        can_mark_returned: bool,
    ) -> AppResult<User> {
        let existing: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;
        if existing {
            return Err(AppError::Conflict(format!(
                "Username {} is already taken",
                username
            )));
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password, first_name, last_name, can_mark_returned)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(first_name)
        .bind(last_name)
        .bind(can_mark_returned)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
