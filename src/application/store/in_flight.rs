//! In-Flight Registry - 同一操作同时只允许一个请求
//!
//! key 形如 `resource:operation:target`，guard 被 drop 时释放

use dashmap::DashSet;
use std::sync::Arc;

use crate::application::error::StoreError;

#[derive(Clone, Default)]
pub struct InFlightRegistry {
    keys: Arc<DashSet<String>>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记操作；同 key 已在进行中时返回 Busy
    pub fn begin(&self, key: impl Into<String>) -> Result<InFlightGuard, StoreError> {
        let key = key.into();
        if !self.keys.insert(key.clone()) {
            tracing::debug!(key = %key, "Rejected overlapping submission");
            return Err(StoreError::Busy(key));
        }
        Ok(InFlightGuard {
            keys: self.keys.clone(),
            key,
        })
    }

    pub fn is_in_flight(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// 进行中的操作
#[must_use]
pub struct InFlightGuard {
    keys: Arc<DashSet<String>>,
    key: String,
}

impl InFlightGuard {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.keys.remove(&self.key);
    }
}
