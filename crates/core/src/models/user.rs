use serde::{Deserialize, Serialize};

/// 用户记录
///
/// 调度核心只关心 `push_token`：移动端登录后注册Expo推送token，
/// 通知分发器据此决定是否走推送通道。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub push_token: Option<String>,
}

impl User {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            push_token: None,
        }
    }
}
