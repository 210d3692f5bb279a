//! SQLite仓储集成测试
//!
//! 全部针对内存数据库运行，不依赖外部服务。

use chrono::{Duration, TimeZone, Utc};
use hmms_core::{
    models::{Frequency, PlanFilter, Priority, User, WorkOrderFilter, WorkOrderStatus},
    traits::{PlanRepository, UserRepository, WorkOrderRepository},
    DatabaseConfig,
};
use hmms_infrastructure::{
    create_embedded_pool, SqlitePlanRepository, SqliteUserRepository, SqliteWorkOrderRepository,
};
use hmms_testing_utils::{PlanBuilder, WorkOrderBuilder};
use sqlx::SqlitePool;

async fn memory_pool() -> SqlitePool {
    // 内存数据库必须保持单连接，多个连接会各自看到独立的空库
    create_embedded_pool(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        connection_timeout_seconds: 5,
        idle_timeout_seconds: 600,
    })
    .await
    .expect("failed to create in-memory pool")
}

#[tokio::test]
async fn test_plan_create_and_get_round_trip() {
    let repo = SqlitePlanRepository::new(memory_pool().await);
    let next_due = Utc.with_ymd_and_hms(2026, 9, 1, 8, 0, 0).unwrap();
    let plan = PlanBuilder::new()
        .with_id("plan-1")
        .with_name("CT扫描仪月度保养")
        .with_description("检查冷却系统")
        .with_frequency(Frequency::Monthly)
        .with_asset("asset-ct-1")
        .with_assignee("tech-1")
        .with_next_due(next_due)
        .build();

    repo.create(&plan).await.unwrap();
    let fetched = repo.get_by_id("plan-1").await.unwrap().unwrap();

    assert_eq!(fetched.name, "CT扫描仪月度保养");
    assert_eq!(fetched.description.as_deref(), Some("检查冷却系统"));
    assert_eq!(fetched.frequency, Frequency::Monthly);
    assert_eq!(fetched.asset_id.as_deref(), Some("asset-ct-1"));
    assert_eq!(fetched.assigned_to_id.as_deref(), Some("tech-1"));
    assert_eq!(fetched.next_due, next_due);
    assert!(fetched.is_active);
}

#[tokio::test]
async fn test_get_missing_plan_returns_none() {
    let repo = SqlitePlanRepository::new(memory_pool().await);
    assert!(repo.get_by_id("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_due_plans_filters_active_and_overdue() {
    let repo = SqlitePlanRepository::new(memory_pool().await);
    let now = Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap();

    // 到期的活跃计划：入选
    repo.create(
        &PlanBuilder::new()
            .with_id("due-active")
            .with_next_due(now - Duration::hours(1))
            .build(),
    )
    .await
    .unwrap();
    // 到期但非活跃：排除
    repo.create(
        &PlanBuilder::new()
            .with_id("due-inactive")
            .with_next_due(now - Duration::days(30))
            .inactive()
            .build(),
    )
    .await
    .unwrap();
    // 活跃但未到期：排除
    repo.create(
        &PlanBuilder::new()
            .with_id("future-active")
            .with_next_due(now + Duration::days(1))
            .build(),
    )
    .await
    .unwrap();
    // 恰好到期（next_due == now）：入选
    repo.create(
        &PlanBuilder::new()
            .with_id("due-exactly")
            .with_next_due(now)
            .build(),
    )
    .await
    .unwrap();

    let due = repo.find_due_plans(now).await.unwrap();
    let ids: Vec<&str> = due.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(due.len(), 2);
    assert!(ids.contains(&"due-active"));
    assert!(ids.contains(&"due-exactly"));
}

#[tokio::test]
async fn test_update_next_due_persists() {
    let repo = SqlitePlanRepository::new(memory_pool().await);
    let old_due = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
    let new_due = Utc.with_ymd_and_hms(2026, 2, 8, 0, 0, 0).unwrap();
    repo.create(
        &PlanBuilder::new()
            .with_id("plan-1")
            .with_next_due(old_due)
            .build(),
    )
    .await
    .unwrap();

    repo.update_next_due("plan-1", new_due).await.unwrap();

    let fetched = repo.get_by_id("plan-1").await.unwrap().unwrap();
    assert_eq!(fetched.next_due, new_due);
}

#[tokio::test]
async fn test_plan_update_persists_admin_edit() {
    let repo = SqlitePlanRepository::new(memory_pool().await);
    let plan = PlanBuilder::new()
        .with_id("plan-1")
        .with_name("旧名称")
        .build();
    repo.create(&plan).await.unwrap();

    let mut edited = plan.clone();
    edited.name = "新名称".to_string();
    edited.frequency = Frequency::Yearly;
    edited.is_active = false;
    repo.update(&edited).await.unwrap();

    let fetched = repo.get_by_id("plan-1").await.unwrap().unwrap();
    assert_eq!(fetched.name, "新名称");
    assert_eq!(fetched.frequency, Frequency::Yearly);
    assert!(!fetched.is_active);
}

#[tokio::test]
async fn test_plan_list_filters() {
    let repo = SqlitePlanRepository::new(memory_pool().await);
    repo.create(&PlanBuilder::new().with_id("a").with_assignee("tech-1").build())
        .await
        .unwrap();
    repo.create(&PlanBuilder::new().with_id("b").inactive().build())
        .await
        .unwrap();
    repo.create(&PlanBuilder::new().with_id("c").build())
        .await
        .unwrap();

    let active = repo
        .list(&PlanFilter {
            is_active: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(active.len(), 2);

    let assigned = repo
        .list(&PlanFilter {
            assigned_to_id: Some("tech-1".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0].id, "a");

    let limited = repo
        .list(&PlanFilter {
            limit: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(limited.len(), 2);
}

#[tokio::test]
async fn test_work_order_create_and_get_round_trip() {
    let repo = SqliteWorkOrderRepository::new(memory_pool().await);
    let plan_due = Utc.with_ymd_and_hms(2026, 8, 1, 6, 0, 0).unwrap();
    let work_order = WorkOrderBuilder::new()
        .with_id("wo-1")
        .with_title("PM: 电梯保养")
        .with_priority(Priority::Medium)
        .with_assignee("tech-1")
        .with_plan("plan-1", plan_due)
        .build();

    repo.create(&work_order).await.unwrap();
    let fetched = repo.get_by_id("wo-1").await.unwrap().unwrap();

    assert_eq!(fetched.title, "PM: 电梯保养");
    assert_eq!(fetched.priority, Priority::Medium);
    assert_eq!(fetched.status, WorkOrderStatus::Pending);
    assert_eq!(fetched.assigned_to_id.as_deref(), Some("tech-1"));
    assert_eq!(fetched.plan_id.as_deref(), Some("plan-1"));
    assert_eq!(fetched.plan_due, Some(plan_due));
}

#[tokio::test]
async fn test_find_by_plan_due() {
    let repo = SqliteWorkOrderRepository::new(memory_pool().await);
    let plan_due = Utc.with_ymd_and_hms(2026, 8, 1, 6, 0, 0).unwrap();
    repo.create(
        &WorkOrderBuilder::new()
            .with_id("wo-1")
            .with_plan("plan-1", plan_due)
            .build(),
    )
    .await
    .unwrap();

    let hit = repo.find_by_plan_due("plan-1", plan_due).await.unwrap();
    assert_eq!(hit.map(|w| w.id), Some("wo-1".to_string()));

    // 同计划的另一个到期时刻没有工单
    let miss = repo
        .find_by_plan_due("plan-1", plan_due + Duration::days(7))
        .await
        .unwrap();
    assert!(miss.is_none());
}

#[tokio::test]
async fn test_duplicate_plan_due_violates_unique_index() {
    let repo = SqliteWorkOrderRepository::new(memory_pool().await);
    let plan_due = Utc.with_ymd_and_hms(2026, 8, 1, 6, 0, 0).unwrap();
    repo.create(
        &WorkOrderBuilder::new()
            .with_id("wo-1")
            .with_plan("plan-1", plan_due)
            .build(),
    )
    .await
    .unwrap();

    // 同一 (plan_id, plan_due) 的第二个工单被唯一索引拒绝
    let duplicate = repo
        .create(
            &WorkOrderBuilder::new()
                .with_id("wo-2")
                .with_plan("plan-1", plan_due)
                .build(),
        )
        .await;
    assert!(duplicate.is_err());

    // 手工创建的工单没有计划来源，不受唯一索引约束
    repo.create(&WorkOrderBuilder::new().with_id("wo-3").build())
        .await
        .unwrap();
    repo.create(&WorkOrderBuilder::new().with_id("wo-4").build())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_work_order_update_persists() {
    let repo = SqliteWorkOrderRepository::new(memory_pool().await);
    let work_order = WorkOrderBuilder::new().with_id("wo-1").build();
    repo.create(&work_order).await.unwrap();

    let mut updated = work_order.clone();
    updated.status = WorkOrderStatus::Completed;
    updated.assigned_to_id = Some("tech-2".to_string());
    repo.update(&updated).await.unwrap();

    let fetched = repo.get_by_id("wo-1").await.unwrap().unwrap();
    assert_eq!(fetched.status, WorkOrderStatus::Completed);
    assert_eq!(fetched.assigned_to_id.as_deref(), Some("tech-2"));
}

#[tokio::test]
async fn test_work_order_list_filters() {
    let repo = SqliteWorkOrderRepository::new(memory_pool().await);
    repo.create(
        &WorkOrderBuilder::new()
            .with_id("wo-1")
            .with_priority(Priority::High)
            .with_assignee("tech-1")
            .build(),
    )
    .await
    .unwrap();
    repo.create(
        &WorkOrderBuilder::new()
            .with_id("wo-2")
            .with_status(WorkOrderStatus::Closed)
            .build(),
    )
    .await
    .unwrap();

    let pending = repo
        .list(&WorkOrderFilter {
            status: Some(WorkOrderStatus::Pending),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, "wo-1");

    let high = repo
        .list(&WorkOrderFilter {
            priority: Some(Priority::High),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(high.len(), 1);

    let by_assignee = repo
        .list(&WorkOrderFilter {
            assigned_to_id: Some("tech-1".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_assignee.len(), 1);

    let all = repo.list(&WorkOrderFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_user_push_token_round_trip() {
    let repo = SqliteUserRepository::new(memory_pool().await);
    let user = User::new("user-1".to_string(), "张技师".to_string());
    repo.create(&user).await.unwrap();

    let fetched = repo.find_by_id("user-1").await.unwrap().unwrap();
    assert_eq!(fetched.name, "张技师");
    assert_eq!(fetched.push_token, None);

    repo.update_push_token("user-1", Some("ExponentPushToken[abc]"))
        .await
        .unwrap();
    let fetched = repo.find_by_id("user-1").await.unwrap().unwrap();
    assert_eq!(fetched.push_token.as_deref(), Some("ExponentPushToken[abc]"));

    // 登出时清除token
    repo.update_push_token("user-1", None).await.unwrap();
    let fetched = repo.find_by_id("user-1").await.unwrap().unwrap();
    assert_eq!(fetched.push_token, None);
}

#[tokio::test]
async fn test_find_missing_user_returns_none() {
    let repo = SqliteUserRepository::new(memory_pool().await);
    assert!(repo.find_by_id("ghost").await.unwrap().is_none());
}
