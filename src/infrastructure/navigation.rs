//! In-Memory Navigator - 当前视图与导航历史
//!
//! CLI 中每条命令对应一个视图；认证拦截器据此判断是否需要跳转到登录视图。

use std::sync::Mutex;

use crate::application::ports::{NavigatorPort, View};

struct NavigationState {
    current: View,
    history: Vec<View>,
}

pub struct InMemoryNavigator {
    state: Mutex<NavigationState>,
}

impl InMemoryNavigator {
    pub fn new(initial: View) -> Self {
        Self {
            state: Mutex::new(NavigationState {
                current: initial,
                history: vec![initial],
            }),
        }
    }

    /// 访问过的视图（含初始视图）
    pub fn history(&self) -> Vec<View> {
        self.lock().history.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NavigationState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl NavigatorPort for InMemoryNavigator {
    fn current(&self) -> View {
        self.lock().current
    }

    fn navigate(&self, view: View) {
        let mut state = self.lock();
        if state.current == view {
            return;
        }
        tracing::debug!(from = state.current.as_str(), to = view.as_str(), "Navigate");
        state.current = view;
        state.history.push(view);
    }

    fn redirect_to_login(&self) -> bool {
        let mut state = self.lock();
        if state.current == View::Login {
            return false;
        }
        tracing::info!(from = state.current.as_str(), "Redirecting to login");
        state.current = View::Login;
        state.history.push(View::Login);
        true
    }
}
