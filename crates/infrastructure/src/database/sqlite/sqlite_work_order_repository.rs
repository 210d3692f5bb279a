use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use hmms_core::{
    models::{WorkOrder, WorkOrderFilter},
    traits::WorkOrderRepository,
    MaintenanceResult,
};

pub struct SqliteWorkOrderRepository {
    pool: SqlitePool,
}

impl SqliteWorkOrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_work_order(row: &sqlx::sqlite::SqliteRow) -> MaintenanceResult<WorkOrder> {
        Ok(WorkOrder {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            priority: row.try_get("priority")?,
            status: row.try_get("status")?,
            asset_id: row.try_get("asset_id")?,
            assigned_to_id: row.try_get("assigned_to_id")?,
            created_by_id: row.try_get("created_by_id")?,
            plan_id: row.try_get("plan_id")?,
            plan_due: row.try_get("plan_due")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl WorkOrderRepository for SqliteWorkOrderRepository {
    async fn create(&self, work_order: &WorkOrder) -> MaintenanceResult<WorkOrder> {
        sqlx::query(
            r#"
            INSERT INTO work_orders
                (id, title, description, priority, status, asset_id, assigned_to_id,
                 created_by_id, plan_id, plan_due, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&work_order.id)
        .bind(&work_order.title)
        .bind(&work_order.description)
        .bind(work_order.priority)
        .bind(work_order.status)
        .bind(&work_order.asset_id)
        .bind(&work_order.assigned_to_id)
        .bind(&work_order.created_by_id)
        .bind(&work_order.plan_id)
        .bind(work_order.plan_due)
        .bind(work_order.created_at)
        .bind(work_order.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(work_order.clone())
    }

    async fn get_by_id(&self, id: &str) -> MaintenanceResult<Option<WorkOrder>> {
        let row = sqlx::query("SELECT * FROM work_orders WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_work_order).transpose()
    }

    async fn list(&self, filter: &WorkOrderFilter) -> MaintenanceResult<Vec<WorkOrder>> {
        let mut sql = String::from("SELECT * FROM work_orders WHERE 1=1");
        if filter.status.is_some() {
            sql.push_str(" AND status = ?");
        }
        if filter.priority.is_some() {
            sql.push_str(" AND priority = ?");
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
        if let Some(status) = filter.status {
            query = query.bind(status);
        }
        if let Some(priority) = filter.priority {
            query = query.bind(priority);
        }
        if let Some(assigned_to_id) = &filter.assigned_to_id {
            query = query.bind(assigned_to_id);
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(Self::row_to_work_order).collect()
    }

    async fn update(&self, work_order: &WorkOrder) -> MaintenanceResult<()> {
        sqlx::query(
            r#"
            UPDATE work_orders
            SET title = ?, description = ?, priority = ?, status = ?, asset_id = ?,
                assigned_to_id = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&work_order.title)
        .bind(&work_order.description)
        .bind(work_order.priority)
        .bind(work_order.status)
        .bind(&work_order.asset_id)
        .bind(&work_order.assigned_to_id)
        .bind(Utc::now())
        .bind(&work_order.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_plan_due(
        &self,
        plan_id: &str,
        plan_due: DateTime<Utc>,
    ) -> MaintenanceResult<Option<WorkOrder>> {
        let row = sqlx::query("SELECT * FROM work_orders WHERE plan_id = ? AND plan_due = ?")
            .bind(plan_id)
            .bind(plan_due)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_work_order).transpose()
    }
}
