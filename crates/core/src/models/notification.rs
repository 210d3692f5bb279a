use serde::{Deserialize, Serialize};
use serde_json::json;

/// 通知类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NotificationKind {
    #[serde(rename = "NEW_ASSIGNMENT")]
    NewAssignment,
    #[serde(rename = "WORK_ORDER_COMPLETED")]
    WorkOrderCompleted,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::NewAssignment => "NEW_ASSIGNMENT",
            NotificationKind::WorkOrderCompleted => "WORK_ORDER_COMPLETED",
        }
    }
}

/// 通知事件（瞬态，不持久化）
///
/// 通过房间广播投递给前端，字段名与前端约定保持camelCase。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationEvent {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    #[serde(rename = "workOrderId")]
    pub work_order_id: String,
}

impl NotificationEvent {
    pub fn new(kind: NotificationKind, message: String, work_order_id: String) -> Self {
        Self {
            kind,
            message,
            work_order_id,
        }
    }
}

/// 推送网关消息
///
/// 与Expo推送API的消息体对应：{to, sound, body, data}。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PushMessage {
    pub to: String,
    pub sound: String,
    pub body: String,
    pub data: serde_json::Value,
}

impl PushMessage {
    pub fn new(to: String, body: String, work_order_id: &str) -> Self {
        Self {
            to,
            sound: "default".to_string(),
            body,
            data: json!({ "workOrderId": work_order_id }),
        }
    }
}
