//! Resource Store - 单个资源的状态容器
//!
//! 状态只通过 reducer 修改；视图可以 subscribe 监听变化。
//! 每个异步动作:
//! 1. 登记 in-flight key（重叠提交直接拒绝，状态不变）
//! 2. dispatch Started
//! 3. 等待服务调用
//! 4. 成功 → 对应的合并动作；失败 → Failed + 错误通知
//!
//! 不同 key 的动作可以并发；状态里的 pending 计数保证
//! 任一请求未完成时 status 都保持 Loading。
//!
//! 嵌套资源变更分两步：先变更，再重新拉取父资源。
//! 变更成功即发成功通知；拉取失败单独记为 ReloadFailed。

use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

use super::in_flight::InFlightRegistry;
use super::reducer::{CollectionReducer, Reducer, StoreAction};
use super::state::ResourceState;
use crate::application::error::{ApiError, StoreError};
use crate::application::ports::{Notification, NotifierPort};
use crate::domain::Entity;

/// 一次动作的描述
#[derive(Debug, Clone)]
pub struct ActionPlan {
    pub operation: &'static str,
    pub target: String,
    /// 成功时的提示（拉取类动作为 None）
    pub success_message: Option<String>,
}

impl ActionPlan {
    pub fn fetch(target: impl Into<String>) -> Self {
        Self {
            operation: "fetch",
            target: target.into(),
            success_message: None,
        }
    }

    pub fn mutation(
        operation: &'static str,
        target: impl Into<String>,
        success_message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            target: target.into(),
            success_message: Some(success_message.into()),
        }
    }
}

/// 资源状态容器
pub struct ResourceStore<T: Entity> {
    state: watch::Sender<ResourceState<T>>,
    in_flight: InFlightRegistry,
    notifier: Arc<dyn NotifierPort>,
}

impl<T: Entity> ResourceStore<T> {
    pub fn new(notifier: Arc<dyn NotifierPort>) -> Self {
        let (state, _) = watch::channel(ResourceState::default());
        Self {
            state,
            in_flight: InFlightRegistry::new(),
            notifier,
        }
    }

    /// 当前状态快照
    pub fn snapshot(&self) -> ResourceState<T> {
        self.state.borrow().clone()
    }

    /// 订阅状态变化
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.state.subscribe()
    }

    pub fn in_flight(&self) -> &InFlightRegistry {
        &self.in_flight
    }

    /// 同步应用一个动作
    pub fn dispatch(&self, action: StoreAction<T>) {
        self.state.send_modify(|state| {
            let current = std::mem::take(state);
            *state = CollectionReducer::reduce(current, action);
        });
    }

    /// 执行异步动作
    ///
    /// `reconcile` 把成功结果映射为合并动作
    pub async fn execute<R, F, M>(
        &self,
        plan: ActionPlan,
        request: F,
        reconcile: M,
    ) -> Result<R, StoreError>
    where
        F: Future<Output = Result<R, ApiError>>,
        M: FnOnce(&R) -> StoreAction<T>,
    {
        let key = format!("{}:{}:{}", T::KIND, plan.operation, plan.target);
        let _guard = self.in_flight.begin(key.clone())?;

        self.dispatch(StoreAction::Started);

        match request.await {
            Ok(result) => {
                self.dispatch(reconcile(&result));
                tracing::debug!(key = %key, "Store action succeeded");
                if let Some(message) = plan.success_message {
                    self.notifier.notify(Notification::success(message));
                }
                Ok(result)
            }
            Err(err) => {
                let message = err.display_message();
                tracing::warn!(key = %key, error = %err, "Store action failed");
                self.dispatch(StoreAction::Failed(message.clone()));
                self.notifier.notify(Notification::error(message));
                Err(StoreError::Api(err))
            }
        }
    }
}

impl<T: Entity> ResourceStore<T> {
    /// 执行变更后重新拉取权威状态
    ///
    /// 两步共用同一个 in-flight key；`reload` 只在变更成功后才被 poll
    pub async fn execute_then_reload<R, F, L, M>(
        &self,
        plan: ActionPlan,
        mutation: F,
        reload: L,
        reconcile: M,
    ) -> Result<R, StoreError>
    where
        F: Future<Output = Result<(), ApiError>>,
        L: Future<Output = Result<R, ApiError>>,
        M: FnOnce(&R) -> StoreAction<T>,
    {
        let key = format!("{}:{}:{}", T::KIND, plan.operation, plan.target);
        let _guard = self.in_flight.begin(key.clone())?;

        self.dispatch(StoreAction::Started);

        if let Err(err) = mutation.await {
            let message = err.display_message();
            tracing::warn!(key = %key, error = %err, "Store mutation failed");
            self.dispatch(StoreAction::Failed(message.clone()));
            self.notifier.notify(Notification::error(message));
            return Err(StoreError::Api(err));
        }

        let action = plan
            .success_message
            .unwrap_or_else(|| format!("{} {}", T::KIND, plan.operation));
        self.notifier.notify(Notification::success(action.clone()));

        match reload.await {
            Ok(result) => {
                self.dispatch(reconcile(&result));
                tracing::debug!(key = %key, "Store mutation applied and reloaded");
                Ok(result)
            }
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Reload after mutation failed");
                let error = StoreError::ReloadFailed { action, source: err };
                let message = error.display_message();
                self.dispatch(StoreAction::Failed(message.clone()));
                self.notifier.notify(Notification::error(message));
                Err(error)
            }
        }
    }
}

/// 资源类型的展示名："past_paper" → "Past paper"
pub(crate) fn kind_label<T: Entity>() -> String {
    let words = T::KIND.replace('_', " ");
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
