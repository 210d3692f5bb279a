//! Test data builders for creating test entities
//!
//! This module provides builder patterns for creating test data with
//! sensible defaults and easy customization.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use hmms_core::models::{Frequency, PreventivePlan, Priority, User, WorkOrder, WorkOrderStatus};

/// A push token that passes the Expo shape check
pub const VALID_PUSH_TOKEN: &str = "ExponentPushToken[test-token]";

/// Builder for creating test PreventivePlan entities
pub struct PlanBuilder {
    plan: PreventivePlan,
}

impl PlanBuilder {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            plan: PreventivePlan {
                id: Uuid::new_v4().to_string(),
                name: "test_plan".to_string(),
                description: None,
                frequency: Frequency::Weekly,
                asset_id: None,
                assigned_to_id: None,
                next_due: now,
                is_active: true,
                created_at: now,
                updated_at: now,
            },
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.plan.id = id.to_string();
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.plan.name = name.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.plan.description = Some(description.to_string());
        self
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.plan.frequency = frequency;
        self
    }

    pub fn with_asset(mut self, asset_id: &str) -> Self {
        self.plan.asset_id = Some(asset_id.to_string());
        self
    }

    pub fn with_assignee(mut self, user_id: &str) -> Self {
        self.plan.assigned_to_id = Some(user_id.to_string());
        self
    }

    pub fn with_next_due(mut self, next_due: DateTime<Utc>) -> Self {
        self.plan.next_due = next_due;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.plan.is_active = false;
        self
    }

    pub fn build(self) -> PreventivePlan {
        self.plan
    }
}

impl Default for PlanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating test WorkOrder entities
pub struct WorkOrderBuilder {
    work_order: WorkOrder,
}

impl WorkOrderBuilder {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            work_order: WorkOrder {
                id: Uuid::new_v4().to_string(),
                title: "test_work_order".to_string(),
                description: None,
                priority: Priority::Medium,
                status: WorkOrderStatus::Pending,
                asset_id: None,
                assigned_to_id: None,
                created_by_id: "SYSTEM_ADMIN".to_string(),
                plan_id: None,
                plan_due: None,
                created_at: now,
                updated_at: now,
            },
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.work_order.id = id.to_string();
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.work_order.title = title.to_string();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.work_order.priority = priority;
        self
    }

    pub fn with_status(mut self, status: WorkOrderStatus) -> Self {
        self.work_order.status = status;
        self
    }

    pub fn with_assignee(mut self, user_id: &str) -> Self {
        self.work_order.assigned_to_id = Some(user_id.to_string());
        self
    }

    pub fn with_created_by(mut self, user_id: &str) -> Self {
        self.work_order.created_by_id = user_id.to_string();
        self
    }

    pub fn with_plan(mut self, plan_id: &str, plan_due: DateTime<Utc>) -> Self {
        self.work_order.plan_id = Some(plan_id.to_string());
        self.work_order.plan_due = Some(plan_due);
        self
    }

    pub fn build(self) -> WorkOrder {
        self.work_order
    }
}

impl Default for WorkOrderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating test User entities
pub struct UserBuilder {
    user: User,
}

impl UserBuilder {
    pub fn new() -> Self {
        Self {
            user: User {
                id: Uuid::new_v4().to_string(),
                name: "test_user".to_string(),
                push_token: None,
            },
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.user.id = id.to_string();
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.user.name = name.to_string();
        self
    }

    pub fn with_push_token(mut self, token: &str) -> Self {
        self.user.push_token = Some(token.to_string());
        self
    }

    pub fn with_valid_push_token(mut self) -> Self {
        self.user.push_token = Some(VALID_PUSH_TOKEN.to_string());
        self
    }

    pub fn build(self) -> User {
        self.user
    }
}

impl Default for UserBuilder {
    fn default() -> Self {
        Self::new()
    }
}
