use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use hmms_core::{models::User, traits::UserRepository, MaintenanceResult};

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> MaintenanceResult<User> {
        Ok(User {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            push_token: row.try_get("push_token")?,
        })
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &User) -> MaintenanceResult<User> {
        sqlx::query("INSERT INTO users (id, name, push_token) VALUES (?, ?, ?)")
            .bind(&user.id)
            .bind(&user.name)
            .bind(&user.push_token)
            .execute(&self.pool)
            .await?;

        Ok(user.clone())
    }

    async fn find_by_id(&self, id: &str) -> MaintenanceResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn update_push_token(&self, id: &str, push_token: Option<&str>) -> MaintenanceResult<()> {
        sqlx::query("UPDATE users SET push_token = ? WHERE id = ?")
            .bind(push_token)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
