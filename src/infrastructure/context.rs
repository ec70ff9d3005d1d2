//! Admin Context - 依赖装配
//!
//! 持有传输层、服务与各状态容器，显式注入给命令处理；不存在全局单例。

use std::sync::Arc;

use super::credentials::FileCredentialStore;
use super::http::{HttpTransport, HttpTransportConfig};
use super::navigation::InMemoryNavigator;
use super::notifications::NotificationCenter;
use crate::application::error::ApiError;
use crate::application::ports::{CredentialStorePort, NavigatorPort, NotifierPort, TransportPort, View};
use crate::application::services::{
    AuthService, BannerService, CategoryService, ExamService, PastPaperService,
    PublicationService, SubCategoryService, SubjectService,
};
use crate::application::session::SessionExpiry;
use crate::application::store::{
    BannerStore, CategoryStore, ExamStore, PastPaperStore, PublicationStore, SubCategoryStore,
    SubjectStore,
};
use crate::config::AppConfig;

pub struct AdminContext {
    pub credentials: Arc<dyn CredentialStorePort>,
    pub navigator: Arc<InMemoryNavigator>,
    pub notifications: Arc<NotificationCenter>,
    pub auth: AuthService,
    pub banners: BannerStore,
    pub exams: ExamStore,
    pub subjects: SubjectStore,
    pub categories: CategoryStore,
    pub sub_categories: SubCategoryStore,
    pub publications: PublicationStore,
    pub past_papers: PastPaperStore,
}

impl AdminContext {
    /// 按配置装配：文件凭据存储 + HTTP 传输
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        let credentials: Arc<dyn CredentialStorePort> =
            Arc::new(FileCredentialStore::open(&config.auth.credentials_path));
        let navigator = Arc::new(InMemoryNavigator::new(Self::initial_view(credentials.as_ref())));
        let session = SessionExpiry::new(credentials.clone(), navigator.clone());

        let transport = HttpTransport::new(
            HttpTransportConfig::new(config.api.base_url.clone())
                .with_timeout(config.api.timeout_secs),
            credentials.clone(),
            session,
        )?;

        Ok(Self::with_transport(Arc::new(transport), credentials, navigator))
    }

    /// 使用指定传输层装配（测试或嵌入使用）
    pub fn with_transport(
        transport: Arc<dyn TransportPort>,
        credentials: Arc<dyn CredentialStorePort>,
        navigator: Arc<InMemoryNavigator>,
    ) -> Self {
        let notifications = NotificationCenter::new().arc();
        let notifier: Arc<dyn NotifierPort> = notifications.clone();

        let auth = AuthService::new(transport.clone(), credentials.clone(), navigator.clone());

        Self {
            auth,
            banners: BannerStore::new(Arc::new(BannerService::new(transport.clone())), notifier.clone()),
            exams: ExamStore::new(Arc::new(ExamService::new(transport.clone())), notifier.clone()),
            subjects: SubjectStore::new(Arc::new(SubjectService::new(transport.clone())), notifier.clone()),
            categories: CategoryStore::new(
                Arc::new(CategoryService::new(transport.clone())),
                notifier.clone(),
            ),
            sub_categories: SubCategoryStore::new(
                Arc::new(SubCategoryService::new(transport.clone())),
                notifier.clone(),
            ),
            publications: PublicationStore::new(
                Arc::new(PublicationService::new(transport.clone())),
                notifier.clone(),
            ),
            past_papers: PastPaperStore::new(Arc::new(PastPaperService::new(transport)), notifier),
            credentials,
            navigator,
            notifications,
        }
    }

    fn initial_view(credentials: &dyn CredentialStorePort) -> View {
        if credentials.token().is_some() {
            View::Dashboard
        } else {
            View::Login
        }
    }

    /// 进入某个视图（CLI 命令开始时调用）
    pub fn enter(&self, view: View) {
        self.navigator.navigate(view);
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::testing::MockTransport;
    use crate::application::services::CatalogFilters;
    use crate::config::AppConfig;
    use crate::infrastructure::credentials::InMemoryCredentialStore;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_from_config_starts_on_login_without_credentials() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.auth.credentials_path = dir.path().join("credentials.json");

        let context = AdminContext::from_config(&config).unwrap();
        assert!(!context.is_authenticated());
        assert_eq!(context.navigator.current(), View::Login);
    }

    #[tokio::test]
    async fn test_stores_share_notification_center() {
        let transport = Arc::new(
            MockTransport::new()
                .respond(json!([{"_id": "s1", "name": "Physics"}]))
                .fail(ApiError::from_status(500, "boom")),
        );
        let context = AdminContext::with_transport(
            transport,
            Arc::new(InMemoryCredentialStore::new()),
            Arc::new(InMemoryNavigator::new(View::Subjects)),
        );

        context.subjects.fetch(&CatalogFilters::default()).await.unwrap();
        assert!(context.exams.fetch(&CatalogFilters::default()).await.is_err());

        assert_eq!(context.subjects.snapshot().len(), 1);
        let recent = context.notifications.recent();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].message, "Server error: boom");
    }
}
