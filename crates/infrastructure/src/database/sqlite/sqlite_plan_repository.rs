use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use hmms_core::{
    models::{PlanFilter, PreventivePlan},
    traits::PlanRepository,
    MaintenanceResult,
};

pub struct SqlitePlanRepository {
    pool: SqlitePool,
}

impl SqlitePlanRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_plan(row: &sqlx::sqlite::SqliteRow) -> MaintenanceResult<PreventivePlan> {
        Ok(PreventivePlan {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            frequency: row.try_get("frequency")?,
            asset_id: row.try_get("asset_id")?,
            assigned_to_id: row.try_get("assigned_to_id")?,
            next_due: row.try_get("next_due")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl PlanRepository for SqlitePlanRepository {
    async fn create(&self, plan: &PreventivePlan) -> MaintenanceResult<PreventivePlan> {
        sqlx::query(
            r#"
            INSERT INTO preventive_plans
                (id, name, description, frequency, asset_id, assigned_to_id,
                 next_due, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&plan.id)
        .bind(&plan.name)
        .bind(&plan.description)
        .bind(plan.frequency)
        .bind(&plan.asset_id)
        .bind(&plan.assigned_to_id)
        .bind(plan.next_due)
        .bind(plan.is_active)
        .bind(plan.created_at)
        .bind(plan.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(plan.clone())
    }

    async fn get_by_id(&self, id: &str) -> MaintenanceResult<Option<PreventivePlan>> {
        let row = sqlx::query("SELECT * FROM preventive_plans WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_plan).transpose()
    }

    async fn list(&self, filter: &PlanFilter) -> MaintenanceResult<Vec<PreventivePlan>> {
        let mut sql = String::from("SELECT * FROM preventive_plans WHERE 1=1");
        if filter.is_active.is_some() {
            sql.push_str(" AND is_active = ?");
        }
        if filter.assigned_to_id.is_some() {
            sql.push_str(" AND assigned_to_id = ?");
        }
        sql.push_str(" ORDER BY created_at DESC");
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
            if let Some(offset) = filter.offset {
                sql.push_str(&format!(" OFFSET {offset}"));
            }
        }

        let mut query = sqlx::query(&sql);
        if let Some(is_active) = filter.is_active {
            query = query.bind(is_active);
        }
        if let Some(assigned_to_id) = &filter.assigned_to_id {
            query = query.bind(assigned_to_id);
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(Self::row_to_plan).collect()
    }

    async fn update(&self, plan: &PreventivePlan) -> MaintenanceResult<()> {
        sqlx::query(
            r#"
            UPDATE preventive_plans
            SET name = ?, description = ?, frequency = ?, asset_id = ?,
                assigned_to_id = ?, next_due = ?, is_active = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&plan.name)
        .bind(&plan.description)
        .bind(plan.frequency)
        .bind(&plan.asset_id)
        .bind(&plan.assigned_to_id)
        .bind(plan.next_due)
        .bind(plan.is_active)
        .bind(Utc::now())
        .bind(&plan.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_due_plans(&self, now: DateTime<Utc>) -> MaintenanceResult<Vec<PreventivePlan>> {
        let rows = sqlx::query(
            "SELECT * FROM preventive_plans WHERE is_active = 1 AND next_due <= ? \
             ORDER BY next_due ASC",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_plan).collect()
    }

    async fn update_next_due(&self, id: &str, next_due: DateTime<Utc>) -> MaintenanceResult<()> {
        sqlx::query("UPDATE preventive_plans SET next_due = ?, updated_at = ? WHERE id = ?")
            .bind(next_due)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
