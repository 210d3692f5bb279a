use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use hmms_core::{
    models::{NewWorkOrder, NotificationKind, WorkOrder, WorkOrderFilter, WorkOrderStatus, WorkOrderUpdate},
    traits::WorkOrderRepository,
    MaintenanceError, MaintenanceResult,
};

use crate::notification::NotificationDispatcher;

/// 工单生命周期服务
///
/// 工单创建和更新操作的同步通知挂点：
/// 新指派时通知负责人，完成时通知创建者。
pub struct WorkOrderService {
    work_order_repo: Arc<dyn WorkOrderRepository>,
    dispatcher: Arc<NotificationDispatcher>,
}

impl WorkOrderService {
    pub fn new(
        work_order_repo: Arc<dyn WorkOrderRepository>,
        dispatcher: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            work_order_repo,
            dispatcher,
        }
    }

    /// 创建工单；指定了负责人时同步通知
    pub async fn create_work_order(&self, input: NewWorkOrder) -> MaintenanceResult<WorkOrder> {
        let now = Utc::now();
        let work_order = WorkOrder {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            description: input.description,
            priority: input.priority,
            status: WorkOrderStatus::Pending,
            asset_id: input.asset_id,
            assigned_to_id: input.assigned_to_id,
            created_by_id: input.created_by_id,
            plan_id: None,
            plan_due: None,
            created_at: now,
            updated_at: now,
        };

        let created = self.work_order_repo.create(&work_order).await?;
        info!("创建工单 {} ({})", created.title, created.id);

        if let Some(user_id) = &created.assigned_to_id {
            let message = format!("New Work Order Assigned: {}", created.title);
            self.dispatcher
                .notify(user_id, NotificationKind::NewAssignment, &message, &created.id)
                .await;
        }

        Ok(created)
    }

    /// 部分更新工单
    ///
    /// 本次更新将状态置为已完成时通知创建者；
    /// 负责人变更为新用户时通知新负责人。
    pub async fn update_work_order(
        &self,
        id: &str,
        update: WorkOrderUpdate,
    ) -> MaintenanceResult<WorkOrder> {
        let Some(existing) = self.work_order_repo.get_by_id(id).await? else {
            return Err(MaintenanceError::WorkOrderNotFound { id: id.to_string() });
        };
        let previous_assignee = existing.assigned_to_id.clone();

        let mut work_order = existing;
        if let Some(title) = update.title {
            work_order.title = title;
        }
        if let Some(description) = update.description {
            work_order.description = Some(description);
        }
        if let Some(priority) = update.priority {
            work_order.priority = priority;
        }
        if let Some(status) = update.status {
            work_order.status = status;
        }
        if let Some(asset_id) = update.asset_id {
            work_order.asset_id = Some(asset_id);
        }
        if let Some(assigned_to_id) = update.assigned_to_id.clone() {
            work_order.assigned_to_id = Some(assigned_to_id);
        }
        work_order.updated_at = Utc::now();

        self.work_order_repo.update(&work_order).await?;
        info!("更新工单 {} ({})", work_order.title, work_order.id);

        if update.status == Some(WorkOrderStatus::Completed) {
            let message = format!("Work Order Completed: {}", work_order.title);
            self.dispatcher
                .notify(
                    &work_order.created_by_id,
                    NotificationKind::WorkOrderCompleted,
                    &message,
                    &work_order.id,
                )
                .await;
        }

        if let Some(new_assignee) = &update.assigned_to_id {
            if previous_assignee.as_deref() != Some(new_assignee.as_str()) {
                let message = format!("You have been assigned to: {}", work_order.title);
                self.dispatcher
                    .notify(
                        new_assignee,
                        NotificationKind::NewAssignment,
                        &message,
                        &work_order.id,
                    )
                    .await;
            }
        }

        Ok(work_order)
    }

    pub async fn get_work_order(&self, id: &str) -> MaintenanceResult<WorkOrder> {
        self.work_order_repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| MaintenanceError::WorkOrderNotFound { id: id.to_string() })
    }

    pub async fn list_work_orders(
        &self,
        filter: &WorkOrderFilter,
    ) -> MaintenanceResult<Vec<WorkOrder>> {
        self.work_order_repo.list(filter).await
    }
}
