pub mod notification;
pub mod plan;
pub mod user;
pub mod work_order;

pub use notification::{NotificationEvent, NotificationKind, PushMessage};
pub use plan::{Frequency, PlanFilter, PreventivePlan};
pub use user::User;
pub use work_order::{NewWorkOrder, Priority, WorkOrder, WorkOrderFilter, WorkOrderStatus, WorkOrderUpdate};
