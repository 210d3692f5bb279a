pub mod config;
pub mod errors;
pub mod models;
pub mod traits;

pub use self::config::*;
pub use errors::*;
// 按名称重导出模型，避免通配导入引起的冲突
pub use models::{
    Frequency, NewWorkOrder, NotificationEvent, NotificationKind, PlanFilter, PreventivePlan,
    Priority, PushMessage, User, WorkOrder, WorkOrderFilter, WorkOrderStatus, WorkOrderUpdate,
};
pub use traits::{PlanRepository, PushGateway, RealtimeBroadcaster, UserRepository, WorkOrderRepository};
