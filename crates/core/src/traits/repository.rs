//! 仓储抽象
//!
//! 定义数据访问的抽象接口，遵循依赖倒置原则。
//! 调度核心只依赖这些接口，具体实现由infrastructure提供。

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::MaintenanceResult;
use crate::models::{PlanFilter, PreventivePlan, User, WorkOrder, WorkOrderFilter};

/// 维护计划仓储抽象
#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn create(&self, plan: &PreventivePlan) -> MaintenanceResult<PreventivePlan>;
    async fn get_by_id(&self, id: &str) -> MaintenanceResult<Option<PreventivePlan>>;
    async fn list(&self, filter: &PlanFilter) -> MaintenanceResult<Vec<PreventivePlan>>;
    async fn update(&self, plan: &PreventivePlan) -> MaintenanceResult<()>;

    /// 查询所有到期的活跃计划（is_active = true 且 next_due <= now）
    ///
    /// 返回顺序由实现决定。
    async fn find_due_plans(&self, now: DateTime<Utc>) -> MaintenanceResult<Vec<PreventivePlan>>;

    /// 推进计划的下次到期时间
    async fn update_next_due(&self, id: &str, next_due: DateTime<Utc>) -> MaintenanceResult<()>;
}

/// 工单仓储抽象
#[async_trait]
pub trait WorkOrderRepository: Send + Sync {
    async fn create(&self, work_order: &WorkOrder) -> MaintenanceResult<WorkOrder>;
    async fn get_by_id(&self, id: &str) -> MaintenanceResult<Option<WorkOrder>>;
    async fn list(&self, filter: &WorkOrderFilter) -> MaintenanceResult<Vec<WorkOrder>>;
    async fn update(&self, work_order: &WorkOrder) -> MaintenanceResult<()>;

    /// 按来源计划与被服务的到期时刻查找已生成的工单
    ///
    /// 扫描器据此实现幂等：同一 (plan_id, plan_due) 最多一个工单。
    async fn find_by_plan_due(
        &self,
        plan_id: &str,
        plan_due: DateTime<Utc>,
    ) -> MaintenanceResult<Option<WorkOrder>>;
}

/// 用户仓储抽象
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> MaintenanceResult<User>;
    async fn find_by_id(&self, id: &str) -> MaintenanceResult<Option<User>>;
    async fn update_push_token(&self, id: &str, push_token: Option<&str>) -> MaintenanceResult<()>;
}
