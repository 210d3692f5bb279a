//! 基础设施实现
//!
//! 嵌入式SQLite存储、进程内实时房间广播、Expo推送网关客户端。

pub mod database;
pub mod push;
pub mod realtime;

pub use database::sqlite::{
    create_embedded_pool, SqlitePlanRepository, SqliteUserRepository, SqliteWorkOrderRepository,
};
pub use push::ExpoPushClient;
pub use realtime::InMemoryRoomBroadcaster;
