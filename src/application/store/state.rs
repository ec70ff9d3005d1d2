//! Resource State - 归一化集合状态

use crate::domain::Entity;

/// 加载状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Error,
}

impl LoadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Idle => "idle",
            LoadStatus::Loading => "loading",
            LoadStatus::Ready => "ready",
            LoadStatus::Error => "error",
        }
    }
}

/// 单个资源的客户端缓存
///
/// 不变量: items 中不存在重复 ID；pending > 0 时 status 为 Loading
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub items: Vec<T>,
    pub status: LoadStatus,
    pub error: Option<String>,
    /// 已发出尚未完成的请求数
    pub pending: usize,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: LoadStatus::Idle,
            error: None,
            pending: 0,
        }
    }
}

impl<T: Entity> ResourceState<T> {
    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }
}
