use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use hmms_core::{
    models::{NotificationKind, PreventivePlan, Priority, WorkOrder, WorkOrderStatus},
    traits::{PlanRepository, WorkOrderRepository},
    MaintenanceResult,
};

use crate::due_date;
use crate::notification::NotificationDispatcher;

/// 维护计划扫描器
///
/// 由定时器按固定间隔驱动。每个tick查询所有到期的活跃计划，
/// 逐个生成工单、通知负责人并推进下次到期时间。
pub struct PlanScanner {
    plan_repo: Arc<dyn PlanRepository>,
    work_order_repo: Arc<dyn WorkOrderRepository>,
    dispatcher: Arc<NotificationDispatcher>,
    system_user_id: String,
    scan_lock: Mutex<()>,
}

impl PlanScanner {
    pub fn new(
        plan_repo: Arc<dyn PlanRepository>,
        work_order_repo: Arc<dyn WorkOrderRepository>,
        dispatcher: Arc<NotificationDispatcher>,
        system_user_id: String,
    ) -> Self {
        Self {
            plan_repo,
            work_order_repo,
            dispatcher,
            system_user_id,
            scan_lock: Mutex::new(()),
        }
    }

    /// 扫描到期的维护计划并生成工单
    ///
    /// 上一次扫描尚未结束时跳过本次tick，不允许重入。
    /// 存储错误会中止整个tick；已处理的计划保留其效果，
    /// 仍然到期的计划由下一个tick重试。
    pub async fn scan_and_generate(&self) -> MaintenanceResult<Vec<WorkOrder>> {
        let Ok(_guard) = self.scan_lock.try_lock() else {
            warn!("上一次扫描尚未结束，跳过本次扫描");
            return Ok(Vec::new());
        };

        let now = Utc::now();
        let due_plans = self.plan_repo.find_due_plans(now).await?;
        info!("发现 {} 个到期的维护计划", due_plans.len());

        let mut generated = Vec::new();
        for plan in due_plans {
            if let Some(work_order) = self.process_due_plan(&plan).await? {
                generated.push(work_order);
            }
        }

        info!("本次扫描完成，共生成 {} 个预防性维护工单", generated.len());
        Ok(generated)
    }

    /// 处理单个到期计划：生成工单 → 通知负责人 → 推进到期时间
    ///
    /// 三步没有事务包裹。工单创建成功后通知失败不回滚；
    /// 到期时间推进失败时，下一个tick依靠 (plan_id, plan_due)
    /// 幂等检查避免重复生成工单。
    async fn process_due_plan(
        &self,
        plan: &PreventivePlan,
    ) -> MaintenanceResult<Option<WorkOrder>> {
        if let Some(existing) = self
            .work_order_repo
            .find_by_plan_due(&plan.id, plan.next_due)
            .await?
        {
            info!(
                "计划 {} 在 {} 的工单已存在 ({})，仅推进到期时间",
                plan.name, plan.next_due, existing.id
            );
            self.advance_plan(plan).await?;
            return Ok(None);
        }

        let work_order = self.build_work_order(plan);
        let created = self.work_order_repo.create(&work_order).await?;
        info!("为计划 {} 生成工单 {} ({})", plan.name, created.title, created.id);

        if let Some(user_id) = &plan.assigned_to_id {
            let message = format!("New PM Work Order: {}", created.title);
            self.dispatcher
                .notify(user_id, NotificationKind::NewAssignment, &message, &created.id)
                .await;
        }

        self.advance_plan(plan).await?;
        Ok(Some(created))
    }

    async fn advance_plan(&self, plan: &PreventivePlan) -> MaintenanceResult<()> {
        let next = due_date::next_due(plan.next_due, plan.frequency);
        self.plan_repo.update_next_due(&plan.id, next).await
    }

    fn build_work_order(&self, plan: &PreventivePlan) -> WorkOrder {
        let now = Utc::now();
        WorkOrder {
            id: Uuid::new_v4().to_string(),
            title: format!("PM: {}", plan.name),
            description: Some(
                plan.description
                    .clone()
                    .unwrap_or_else(|| "Scheduled Preventive Maintenance".to_string()),
            ),
            priority: Priority::Medium,
            status: WorkOrderStatus::Pending,
            asset_id: plan.asset_id.clone(),
            assigned_to_id: plan.assigned_to_id.clone(),
            created_by_id: plan
                .assigned_to_id
                .clone()
                .unwrap_or_else(|| self.system_user_id.clone()),
            plan_id: Some(plan.id.clone()),
            plan_due: Some(plan.next_due),
            created_at: now,
            updated_at: now,
        }
    }
}
