//! Mock implementations for all repository and notification traits
//!
//! This module provides in-memory mock implementations that can be used
//! for unit testing without requiring actual database connections or
//! external services. The work-order and user mocks support failure
//! injection to exercise the engine's error paths.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use hmms_core::{
    models::{PlanFilter, PreventivePlan, PushMessage, User, WorkOrder, WorkOrderFilter},
    traits::{PlanRepository, PushGateway, RealtimeBroadcaster, UserRepository, WorkOrderRepository},
    MaintenanceError, MaintenanceResult,
};

/// Mock implementation of PlanRepository for testing
///
/// `set_find_delay_ms` slows down `find_due_plans`, which lets tests hold a
/// scan open long enough to observe overlapping-tick behavior.
#[derive(Debug, Clone, Default)]
pub struct MockPlanRepository {
    plans: Arc<Mutex<HashMap<String, PreventivePlan>>>,
    find_delay_ms: Arc<Mutex<u64>>,
}

impl MockPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plans(plans: Vec<PreventivePlan>) -> Self {
        let mut plan_map = HashMap::new();
        for plan in plans {
            plan_map.insert(plan.id.clone(), plan);
        }
        Self {
            plans: Arc::new(Mutex::new(plan_map)),
            find_delay_ms: Arc::new(Mutex::new(0)),
        }
    }

    pub fn set_find_delay_ms(&self, delay_ms: u64) {
        *self.find_delay_ms.lock().unwrap() = delay_ms;
    }

    pub fn count(&self) -> usize {
        self.plans.lock().unwrap().len()
    }

    pub fn get_all_plans(&self) -> Vec<PreventivePlan> {
        self.plans.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl PlanRepository for MockPlanRepository {
    async fn create(&self, plan: &PreventivePlan) -> MaintenanceResult<PreventivePlan> {
        let mut plans = self.plans.lock().unwrap();
        plans.insert(plan.id.clone(), plan.clone());
        Ok(plan.clone())
    }

    async fn get_by_id(&self, id: &str) -> MaintenanceResult<Option<PreventivePlan>> {
        let plans = self.plans.lock().unwrap();
        Ok(plans.get(id).cloned())
    }

    async fn list(&self, filter: &PlanFilter) -> MaintenanceResult<Vec<PreventivePlan>> {
        let plans = self.plans.lock().unwrap();
        let mut filtered: Vec<PreventivePlan> = plans.values().cloned().collect();

        if let Some(is_active) = filter.is_active {
            filtered.retain(|p| p.is_active == is_active);
        }
        if let Some(assigned_to_id) = &filter.assigned_to_id {
            filtered.retain(|p| p.assigned_to_id.as_deref() == Some(assigned_to_id.as_str()));
        }

        filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        if let Some(offset) = filter.offset {
            filtered = filtered.into_iter().skip(offset as usize).collect();
        }
        if let Some(limit) = filter.limit {
            filtered.truncate(limit as usize);
        }

        Ok(filtered)
    }

    async fn update(&self, plan: &PreventivePlan) -> MaintenanceResult<()> {
        let mut plans = self.plans.lock().unwrap();
        plans.insert(plan.id.clone(), plan.clone());
        Ok(())
    }

    async fn find_due_plans(&self, now: DateTime<Utc>) -> MaintenanceResult<Vec<PreventivePlan>> {
        let delay_ms = *self.find_delay_ms.lock().unwrap();
        if delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
        }
        let plans = self.plans.lock().unwrap();
        Ok(plans
            .values()
            .filter(|p| p.is_active && p.next_due <= now)
            .cloned()
            .collect())
    }

    async fn update_next_due(
        &self,
        id: &str,
        next_due: DateTime<Utc>,
    ) -> MaintenanceResult<()> {
        let mut plans = self.plans.lock().unwrap();
        if let Some(plan) = plans.get_mut(id) {
            plan.next_due = next_due;
            plan.updated_at = Utc::now();
        }
        Ok(())
    }
}

/// Mock implementation of WorkOrderRepository for testing
///
/// `set_fail_create` makes the next create calls fail, to exercise the
/// scanner's tick-abort semantics.
#[derive(Debug, Clone, Default)]
pub struct MockWorkOrderRepository {
    work_orders: Arc<Mutex<HashMap<String, WorkOrder>>>,
    fail_create: Arc<Mutex<bool>>,
}

impl MockWorkOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_create(&self, fail: bool) {
        *self.fail_create.lock().unwrap() = fail;
    }

    pub fn count(&self) -> usize {
        self.work_orders.lock().unwrap().len()
    }

    pub fn get_all_work_orders(&self) -> Vec<WorkOrder> {
        self.work_orders.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl WorkOrderRepository for MockWorkOrderRepository {
    async fn create(&self, work_order: &WorkOrder) -> MaintenanceResult<WorkOrder> {
        if *self.fail_create.lock().unwrap() {
            return Err(MaintenanceError::Internal(
                "simulated work order creation failure".to_string(),
            ));
        }
        let mut work_orders = self.work_orders.lock().unwrap();
        work_orders.insert(work_order.id.clone(), work_order.clone());
        Ok(work_order.clone())
    }

    async fn get_by_id(&self, id: &str) -> MaintenanceResult<Option<WorkOrder>> {
        let work_orders = self.work_orders.lock().unwrap();
        Ok(work_orders.get(id).cloned())
    }

    async fn list(&self, filter: &WorkOrderFilter) -> MaintenanceResult<Vec<WorkOrder>> {
        let work_orders = self.work_orders.lock().unwrap();
        let mut filtered: Vec<WorkOrder> = work_orders.values().cloned().collect();

        if let Some(status) = filter.status {
            filtered.retain(|w| w.status == status);
        }
        if let Some(priority) = filter.priority {
            filtered.retain(|w| w.priority == priority);
        }
        if let Some(assigned_to_id) = &filter.assigned_to_id {
            filtered.retain(|w| w.assigned_to_id.as_deref() == Some(assigned_to_id.as_str()));
        }

        filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        if let Some(offset) = filter.offset {
            filtered = filtered.into_iter().skip(offset as usize).collect();
        }
        if let Some(limit) = filter.limit {
            filtered.truncate(limit as usize);
        }

        Ok(filtered)
    }

    async fn update(&self, work_order: &WorkOrder) -> MaintenanceResult<()> {
        let mut work_orders = self.work_orders.lock().unwrap();
        work_orders.insert(work_order.id.clone(), work_order.clone());
        Ok(())
    }

    async fn find_by_plan_due(
        &self,
        plan_id: &str,
        plan_due: DateTime<Utc>,
    ) -> MaintenanceResult<Option<WorkOrder>> {
        let work_orders = self.work_orders.lock().unwrap();
        Ok(work_orders
            .values()
            .find(|w| {
                w.plan_id.as_deref() == Some(plan_id) && w.plan_due == Some(plan_due)
            })
            .cloned())
    }
}

/// Mock implementation of UserRepository for testing
///
/// `set_fail_lookup` makes lookups fail, to verify the dispatcher keeps
/// lookup errors away from its callers.
#[derive(Debug, Clone, Default)]
pub struct MockUserRepository {
    users: Arc<Mutex<HashMap<String, User>>>,
    fail_lookup: Arc<Mutex<bool>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<User>) -> Self {
        let mut user_map = HashMap::new();
        for user in users {
            user_map.insert(user.id.clone(), user);
        }
        Self {
            users: Arc::new(Mutex::new(user_map)),
            fail_lookup: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_fail_lookup(&self, fail: bool) {
        *self.fail_lookup.lock().unwrap() = fail;
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, user: &User) -> MaintenanceResult<User> {
        let mut users = self.users.lock().unwrap();
        users.insert(user.id.clone(), user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: &str) -> MaintenanceResult<Option<User>> {
        if *self.fail_lookup.lock().unwrap() {
            return Err(MaintenanceError::Internal(
                "simulated user lookup failure".to_string(),
            ));
        }
        let users = self.users.lock().unwrap();
        Ok(users.get(id).cloned())
    }

    async fn update_push_token(
        &self,
        id: &str,
        push_token: Option<&str>,
    ) -> MaintenanceResult<()> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.get_mut(id) {
            user.push_token = push_token.map(String::from);
        }
        Ok(())
    }
}

/// A room event captured by [`RecordingBroadcaster`]
#[derive(Debug, Clone)]
pub struct EmittedEvent {
    pub room: String,
    pub event: String,
    pub payload: Value,
}

/// Mock broadcaster that records every emitted room event
#[derive(Debug, Clone, Default)]
pub struct RecordingBroadcaster {
    events: Arc<Mutex<Vec<EmittedEvent>>>,
}

impl RecordingBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emitted_events(&self) -> Vec<EmittedEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn events_for_room(&self, room: &str) -> Vec<EmittedEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.room == room)
            .cloned()
            .collect()
    }
}

impl RealtimeBroadcaster for RecordingBroadcaster {
    fn emit_to_room(&self, room: &str, event: &str, payload: &Value) {
        self.events.lock().unwrap().push(EmittedEvent {
            room: room.to_string(),
            event: event.to_string(),
            payload: payload.clone(),
        });
    }
}

/// Mock push gateway that records submitted batches
///
/// Token validation uses the same shape check as the real Expo client.
/// `set_fail_sends` makes every send reject, to exercise the dispatcher's
/// catch-and-log path.
#[derive(Debug, Clone, Default)]
pub struct MockPushGateway {
    sent: Arc<Mutex<Vec<PushMessage>>>,
    fail_sends: Arc<Mutex<bool>>,
}

impl MockPushGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_sends(&self, fail: bool) {
        *self.fail_sends.lock().unwrap() = fail;
    }

    pub fn sent_messages(&self) -> Vec<PushMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushGateway for MockPushGateway {
    fn is_valid_token(&self, token: &str) -> bool {
        (token.starts_with("ExponentPushToken[") || token.starts_with("ExpoPushToken["))
            && token.ends_with(']')
    }

    async fn send_batch(&self, messages: &[PushMessage]) -> MaintenanceResult<()> {
        if *self.fail_sends.lock().unwrap() {
            return Err(MaintenanceError::PushGateway(
                "simulated push gateway failure".to_string(),
            ));
        }
        self.sent.lock().unwrap().extend_from_slice(messages);
        Ok(())
    }
}
