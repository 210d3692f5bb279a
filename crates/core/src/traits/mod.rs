pub mod notifier;
pub mod repository;

pub use notifier::{PushGateway, RealtimeBroadcaster};
pub use repository::{PlanRepository, UserRepository, WorkOrderRepository};
