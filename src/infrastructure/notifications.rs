//! Notification Center - 瞬时通知广播
//!
//! 状态容器的成功/失败提示经此广播给订阅者（CLI 通知行），
//! 同时保留最近的若干条供查看。

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::application::ports::{Notification, NotifierPort};

const CHANNEL_CAPACITY: usize = 100;
const DEFAULT_RETAINED: usize = 20;

pub struct NotificationCenter {
    channel: broadcast::Sender<Notification>,
    recent: Mutex<VecDeque<Notification>>,
    retained: usize,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RETAINED)
    }

    pub fn with_capacity(retained: usize) -> Self {
        let (channel, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            channel,
            recent: Mutex::new(VecDeque::with_capacity(retained)),
            retained,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.channel.subscribe()
    }

    /// 最近的通知，按时间先后
    pub fn recent(&self) -> Vec<Notification> {
        self.lock().iter().cloned().collect()
    }

    /// 关闭一条通知
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut recent = self.lock();
        let before = recent.len();
        recent.retain(|n| n.id != id);
        recent.len() != before
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Notification>> {
        self.recent.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifierPort for NotificationCenter {
    fn notify(&self, notification: Notification) {
        tracing::debug!(
            id = %notification.id,
            level = ?notification.level,
            message = %notification.message,
            "Notification"
        );

        {
            let mut recent = self.lock();
            if self.retained > 0 && recent.len() == self.retained {
                recent.pop_front();
            }
            if self.retained > 0 {
                recent.push_back(notification.clone());
            }
        }

        // 没有订阅者时 send 返回 Err，可忽略
        let _ = self.channel.send(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::NotificationLevel;

    #[tokio::test]
    async fn test_subscribers_receive_notifications() {
        let center = NotificationCenter::new();
        let mut rx = center.subscribe();

        center.notify(Notification::success("Exam created"));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.message, "Exam created");
        assert_eq!(received.level, NotificationLevel::Success);
    }

    #[test]
    fn test_recent_is_bounded_and_dismissable() {
        let center = NotificationCenter::with_capacity(2);
        center.notify(Notification::info("one"));
        center.notify(Notification::info("two"));
        center.notify(Notification::error("three"));

        let recent = center.recent();
        let messages: Vec<_> = recent.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["two", "three"]);

        assert!(center.dismiss(recent[0].id));
        assert!(!center.dismiss(recent[0].id));
        assert_eq!(center.recent().len(), 1);
    }
}
