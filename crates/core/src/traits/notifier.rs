//! 通知通道抽象
//!
//! 实时房间广播与移动端推送是两条相互独立的通道，
//! 互相不保证顺序，任一失败不影响另一条。

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::MaintenanceResult;
use crate::models::PushMessage;

/// 实时房间广播抽象
///
/// 房间以用户ID命名。发送即忘：不等待确认，
/// 房间内没有客户端时事件直接丢弃，没有队列也没有重试。
pub trait RealtimeBroadcaster: Send + Sync {
    fn emit_to_room(&self, room: &str, event: &str, payload: &Value);
}

/// 推送网关抽象
#[async_trait]
pub trait PushGateway: Send + Sync {
    /// 校验推送token格式是否有效
    fn is_valid_token(&self, token: &str) -> bool;

    /// 批量提交推送消息，失败由调用方捕获记录
    async fn send_batch(&self, messages: &[PushMessage]) -> MaintenanceResult<()>;
}
