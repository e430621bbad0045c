//! User repository (数据库访问层)

use crate::{
    error::AppError,
    models::user::{NewUser, User, UserId, EMAIL_TAKEN_ON_CREATE, EMAIL_TAKEN_ON_UPDATE},
};
use async_trait::async_trait;
use sqlx::PgPool;

/// User storage used by the user service.
///
/// Deletion is soft: rows keep their data and get `deleted_at` set, and every
/// read ignores them.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, new_user: &NewUser) -> Result<User, AppError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Persist name, email and password hash of an existing user
    async fn update(&self, user: &User) -> Result<Option<User>, AppError>;

    /// Returns false when no live user had this id
    async fn delete(&self, id: UserId) -> Result<bool, AppError>;

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, AppError>;
}

/// PostgreSQL implementation
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// 唯一索引冲突（并发写入同一邮箱）转为 409
fn email_conflict(e: sqlx::Error, message: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            tracing::debug!(error = %e, "Email uniqueness violated on write");
            AppError::Conflict(message.to_string())
        }
        _ => AppError::Database(e),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    /// 创建用户
    async fn create(&self, new_user: &NewUser) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|e| email_conflict(e, EMAIL_TAKEN_ON_CREATE))?;

        Ok(user)
    }

    /// 根据 ID 查找用户
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    /// 根据邮箱查找用户
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = $1 AND deleted_at IS NULL",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    /// 更新用户
    async fn update(&self, user: &User) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                name = $2,
                email = $3,
                password_hash = $4,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| email_conflict(e, EMAIL_TAKEN_ON_UPDATE))?;

        Ok(user)
    }

    /// 软删除用户
    async fn delete(&self, id: UserId) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 分页列出用户
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE deleted_at IS NULL
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok(users)
    }
}
