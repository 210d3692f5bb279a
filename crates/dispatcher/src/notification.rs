use std::sync::Arc;

use tracing::{debug, error};

use hmms_core::{
    models::{NotificationEvent, NotificationKind, PushMessage},
    traits::{PushGateway, RealtimeBroadcaster, UserRepository},
};

/// 通知分发器
///
/// 通过两条独立通道向单个用户投递通知：以用户ID命名的实时房间，
/// 以及按推送token寻址的移动端推送。两条通道各自尽力而为，
/// 任何内部错误都被捕获记录，绝不向调用方传播。
pub struct NotificationDispatcher {
    user_repo: Arc<dyn UserRepository>,
    broadcaster: Arc<dyn RealtimeBroadcaster>,
    push_gateway: Arc<dyn PushGateway>,
}

impl NotificationDispatcher {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        broadcaster: Arc<dyn RealtimeBroadcaster>,
        push_gateway: Arc<dyn PushGateway>,
    ) -> Self {
        Self {
            user_repo,
            broadcaster,
            push_gateway,
        }
    }

    /// 向指定用户发送通知
    ///
    /// 房间广播发送即忘；推送通道在用户不存在、没有token或
    /// token格式无效时静默跳过，这些情况不算错误。
    pub async fn notify(
        &self,
        user_id: &str,
        kind: NotificationKind,
        message: &str,
        work_order_id: &str,
    ) {
        let event =
            NotificationEvent::new(kind, message.to_string(), work_order_id.to_string());
        let payload = match serde_json::to_value(&event) {
            Ok(value) => value,
            Err(e) => {
                error!("序列化通知事件失败: {e}");
                return;
            }
        };

        self.broadcaster.emit_to_room(user_id, "notification", &payload);

        let token = match self.user_repo.find_by_id(user_id).await {
            Ok(Some(user)) => user.push_token,
            Ok(None) => {
                debug!("用户 {} 不存在，跳过推送", user_id);
                None
            }
            Err(e) => {
                error!("查询用户 {} 失败: {e}", user_id);
                None
            }
        };

        let Some(token) = token else {
            return;
        };

        if !self.push_gateway.is_valid_token(&token) {
            debug!("用户 {} 的推送token格式无效，跳过推送", user_id);
            return;
        }

        let push = PushMessage::new(token, message.to_string(), work_order_id);
        if let Err(e) = self.push_gateway.send_batch(&[push]).await {
            error!("发送推送通知失败: {e}");
        }
    }
}
