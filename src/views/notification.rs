//! Notification Line - 单行通知

use crate::application::ports::{Notification, NotificationLevel};

pub fn render_notification(notification: &Notification) -> String {
    let tag = match notification.level {
        NotificationLevel::Info => "info",
        NotificationLevel::Success => "ok",
        NotificationLevel::Error => "error",
    };
    format!("[{}] {}", tag, notification.message)
}
