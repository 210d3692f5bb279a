//! 进程内实时房间广播
//!
//! 每个房间一条Tokio广播通道。发送即忘：没有订阅者时事件直接丢弃，
//! 订阅者处理过慢时会丢失早期事件，与实时通知的语义一致。

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;
use tokio::sync::broadcast;
use tracing::debug;

use hmms_core::traits::RealtimeBroadcaster;

/// 房间事件
#[derive(Debug, Clone)]
pub struct RoomEvent {
    pub event: String,
    pub payload: Value,
}

/// 基于Tokio广播通道的进程内房间广播器
pub struct InMemoryRoomBroadcaster {
    rooms: RwLock<HashMap<String, broadcast::Sender<RoomEvent>>>,
    capacity: usize,
}

impl InMemoryRoomBroadcaster {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    /// 加入房间，返回事件接收端
    pub fn subscribe(&self, room: &str) -> broadcast::Receiver<RoomEvent> {
        let mut rooms = match self.rooms.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        rooms
            .entry(room.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    /// 当前房间的在线订阅者数量
    pub fn room_size(&self, room: &str) -> usize {
        let rooms = match self.rooms.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        rooms
            .get(room)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }
}

impl Default for InMemoryRoomBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl RealtimeBroadcaster for InMemoryRoomBroadcaster {
    fn emit_to_room(&self, room: &str, event: &str, payload: &Value) {
        let rooms = match self.rooms.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match rooms.get(room) {
            Some(sender) => {
                let room_event = RoomEvent {
                    event: event.to_string(),
                    payload: payload.clone(),
                };
                // send仅在没有接收者时失败，按丢弃处理
                if sender.send(room_event).is_err() {
                    debug!("房间 {} 没有在线订阅者，事件被丢弃", room);
                }
            }
            None => {
                debug!("房间 {} 不存在，事件被丢弃", room);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_subscriber_receives_emitted_event() {
        let broadcaster = InMemoryRoomBroadcaster::new();
        let mut rx = broadcaster.subscribe("user-1");

        broadcaster.emit_to_room("user-1", "notification", &json!({"message": "hello"}));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event, "notification");
        assert_eq!(event.payload["message"], "hello");
    }

    #[tokio::test]
    async fn test_emit_without_subscribers_is_dropped() {
        let broadcaster = InMemoryRoomBroadcaster::new();
        // 从未订阅过的房间
        broadcaster.emit_to_room("nobody", "notification", &json!({}));

        // 订阅后又全部退出的房间
        let rx = broadcaster.subscribe("user-2");
        drop(rx);
        broadcaster.emit_to_room("user-2", "notification", &json!({}));
        assert_eq!(broadcaster.room_size("user-2"), 0);
    }

    #[tokio::test]
    async fn test_rooms_are_isolated() {
        let broadcaster = InMemoryRoomBroadcaster::new();
        let mut rx_a = broadcaster.subscribe("user-a");
        let mut rx_b = broadcaster.subscribe("user-b");

        broadcaster.emit_to_room("user-a", "notification", &json!({"for": "a"}));

        let event = rx_a.recv().await.unwrap();
        assert_eq!(event.payload["for"], "a");
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_multiple_subscribers_in_one_room() {
        let broadcaster = InMemoryRoomBroadcaster::new();
        let mut rx1 = broadcaster.subscribe("user-c");
        let mut rx2 = broadcaster.subscribe("user-c");
        assert_eq!(broadcaster.room_size("user-c"), 2);

        broadcaster.emit_to_room("user-c", "notification", &json!({"n": 1}));

        assert_eq!(rx1.recv().await.unwrap().payload["n"], 1);
        assert_eq!(rx2.recv().await.unwrap().payload["n"], 1);
    }
}
