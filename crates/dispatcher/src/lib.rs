//! 预防性维护调度核心
//!
//! 包含到期时间计算、计划扫描、通知分发与工单生命周期服务。
//! 所有外部协作者（存储、实时广播、推送网关）通过构造函数注入。

pub mod due_date;
pub mod notification;
pub mod scanner;
pub mod work_orders;

pub use notification::NotificationDispatcher;
pub use scanner::PlanScanner;
pub use work_orders::WorkOrderService;
