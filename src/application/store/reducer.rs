//! Reducer - 纯函数状态迁移
//!
//! ```text
//! Action ──→ Reducer ──→ State ──→ View
//! ```

use std::collections::HashSet;
use std::marker::PhantomData;

use super::state::{LoadStatus, ResourceState};
use crate::domain::Entity;

/// 状态迁移：(State, Action) -> State，无副作用
pub trait Reducer {
    type State;
    type Action;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State;
}

/// 集合动作
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction<T> {
    /// 请求已发出
    Started,
    /// 拉取成功：整体替换
    Fetched(Vec<T>),
    /// 创建成功：追加
    Created(T),
    /// 更新成功：替换匹配项
    Updated(T),
    /// 重新拉取单个实体：替换或追加
    Upserted(T),
    /// 删除成功
    Deleted(String),
    /// 批量删除
    DeletedMany(Vec<String>),
    /// 请求失败：集合不变
    Failed(String),
}

/// 归一化集合的 reducer
pub struct CollectionReducer<T>(PhantomData<T>);

impl<T: Entity> Reducer for CollectionReducer<T> {
    type State = ResourceState<T>;
    type Action = StoreAction<T>;

    fn reduce(mut state: ResourceState<T>, action: StoreAction<T>) -> ResourceState<T> {
        match action {
            StoreAction::Started => {
                state.pending += 1;
                state.status = LoadStatus::Loading;
                state.error = None;
            }
            StoreAction::Fetched(items) => {
                state.items = dedupe(items);
                settle(&mut state, LoadStatus::Ready);
            }
            StoreAction::Created(item) | StoreAction::Upserted(item) => {
                match state.position(item.id()) {
                    Some(index) => state.items[index] = item,
                    None => state.items.push(item),
                }
                settle(&mut state, LoadStatus::Ready);
            }
            StoreAction::Updated(item) => {
                if let Some(index) = state.position(item.id()) {
                    state.items[index] = item;
                }
                settle(&mut state, LoadStatus::Ready);
            }
            StoreAction::Deleted(id) => {
                state.items.retain(|item| item.id() != id);
                settle(&mut state, LoadStatus::Ready);
            }
            StoreAction::DeletedMany(ids) => {
                let ids: HashSet<String> = ids.into_iter().collect();
                state.items.retain(|item| !ids.contains(item.id()));
                settle(&mut state, LoadStatus::Ready);
            }
            StoreAction::Failed(message) => {
                settle(&mut state, LoadStatus::Error);
                state.error = Some(message);
            }
        }
        state
    }
}

/// 一个请求完成；仍有其他请求未完成时保持 Loading
fn settle<T>(state: &mut ResourceState<T>, outcome: LoadStatus) {
    state.pending = state.pending.saturating_sub(1);
    state.status = if state.pending > 0 {
        LoadStatus::Loading
    } else {
        outcome
    };
}

/// 按 ID 去重，保留最后出现的值、首次出现的位置
fn dedupe<T: Entity>(items: Vec<T>) -> Vec<T> {
    let mut result: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        match result.iter().position(|existing| existing.id() == item.id()) {
            Some(index) => result[index] = item,
            None => result.push(item),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Exam;

    type R = CollectionReducer<Exam>;

    fn exam(id: &str, name: &str) -> Exam {
        Exam {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
        }
    }

    fn ready(items: Vec<Exam>) -> ResourceState<Exam> {
        R::reduce(ResourceState::default(), StoreAction::Fetched(items))
    }

    #[test]
    fn test_started_sets_loading_and_keeps_items() {
        let mut state = ready(vec![exam("1", "A")]);
        state.error = Some("old".to_string());

        let state = R::reduce(state, StoreAction::Started);
        assert_eq!(state.status, LoadStatus::Loading);
        assert_eq!(state.error, None);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_fetch_replaces_wholesale_and_dedupes() {
        let state = ready(vec![exam("1", "A"), exam("2", "B")]);
        let state = R::reduce(
            state,
            StoreAction::Fetched(vec![exam("3", "C"), exam("4", "D"), exam("3", "C2")]),
        );

        let ids: Vec<_> = state.items.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "4"]);
        assert_eq!(state.find("3").unwrap().name, "C2");
        assert_eq!(state.status, LoadStatus::Ready);
    }

    #[test]
    fn test_create_appends_exactly_one() {
        let state = ready(vec![exam("1", "A")]);
        let state = R::reduce(state, StoreAction::Created(exam("9", "Z")));

        assert_eq!(state.len(), 2);
        assert_eq!(state.items.last().unwrap().id, "9");
    }

    #[test]
    fn test_update_replaces_only_matching_entry_in_place() {
        let state = ready(vec![exam("1", "A"), exam("2", "B"), exam("3", "C")]);
        let state = R::reduce(state, StoreAction::Updated(exam("2", "B2")));

        assert_eq!(state.items, vec![exam("1", "A"), exam("2", "B2"), exam("3", "C")]);
    }

    #[test]
    fn test_update_of_unknown_id_leaves_items() {
        let state = ready(vec![exam("1", "A")]);
        let state = R::reduce(state, StoreAction::Updated(exam("7", "X")));
        assert_eq!(state.items, vec![exam("1", "A")]);
    }

    #[test]
    fn test_upsert_appends_unknown_id() {
        let state = ready(vec![exam("1", "A")]);
        let state = R::reduce(state, StoreAction::Upserted(exam("7", "X")));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_delete_removes_exactly_matching_entry() {
        let state = ready(vec![exam("1", "A"), exam("2", "B"), exam("3", "C")]);
        let state = R::reduce(state, StoreAction::Deleted("2".to_string()));

        assert_eq!(state.items, vec![exam("1", "A"), exam("3", "C")]);

        let state = R::reduce(state, StoreAction::DeletedMany(vec!["1".into(), "3".into()]));
        assert!(state.is_empty());
    }

    #[test]
    fn test_failure_keeps_collection_and_records_error() {
        let before = ready(vec![exam("1", "A")]);
        let loading = R::reduce(before.clone(), StoreAction::Started);
        let failed = R::reduce(loading, StoreAction::Failed("boom".to_string()));

        assert_eq!(failed.items, before.items);
        assert_eq!(failed.status, LoadStatus::Error);
        assert_eq!(failed.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_status_stays_loading_while_other_requests_pending() {
        let state = ready(vec![exam("1", "A")]);
        let state = R::reduce(state, StoreAction::Started);
        let state = R::reduce(state, StoreAction::Started);

        let state = R::reduce(state, StoreAction::Created(exam("2", "B")));
        assert_eq!(state.status, LoadStatus::Loading);
        assert!(state.is_loading());
        assert_eq!(state.len(), 2);

        let state = R::reduce(state, StoreAction::Fetched(vec![exam("3", "C")]));
        assert_eq!(state.status, LoadStatus::Ready);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_failure_while_other_request_pending_keeps_error() {
        let state = R::reduce(ResourceState::default(), StoreAction::Started);
        let state = R::reduce(state, StoreAction::Started);
        let state = R::reduce(state, StoreAction::Failed("boom".to_string()));

        assert_eq!(state.status, LoadStatus::Loading);
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert_eq!(state.pending, 1);
    }
}
