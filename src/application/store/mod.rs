//! State Containers - 客户端状态容器
//!
//! 每个资源一个容器：归一化集合 + 加载状态 + 错误值，
//! 以及调用对应服务并合并结果的异步动作。
//!
//! - state: ResourceState / LoadStatus
//! - reducer: 纯函数状态迁移
//! - in_flight: 重叠提交保护
//! - container: ResourceStore 通用容器
//! - crud / banner / publication / past_paper: 各资源容器

mod banner;
mod container;
mod crud;
mod in_flight;
mod past_paper;
mod publication;
mod reducer;
mod state;

pub use banner::BannerStore;
pub use container::{ActionPlan, ResourceStore};
pub use crud::{CategoryStore, CrudStore, ExamStore, SubCategoryStore, SubjectStore};
pub use in_flight::{InFlightGuard, InFlightRegistry};
pub use past_paper::PastPaperStore;
pub use publication::PublicationStore;
pub use reducer::{CollectionReducer, Reducer, StoreAction};
pub use state::{LoadStatus, ResourceState};
