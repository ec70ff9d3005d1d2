//! Navigator Port - 视图导航抽象
//!
//! 认证拦截器需要知道当前视图，并能强制跳转到登录视图

/// 前端视图
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard,
    Banners,
    Exams,
    Subjects,
    Categories,
    Publications,
    PastPapers,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Login => "login",
            View::Dashboard => "dashboard",
            View::Banners => "banners",
            View::Exams => "exams",
            View::Subjects => "subjects",
            View::Categories => "categories",
            View::Publications => "publications",
            View::PastPapers => "past-papers",
        }
    }
}

/// Navigator Port
pub trait NavigatorPort: Send + Sync {
    /// 当前视图
    fn current(&self) -> View;

    /// 跳转到指定视图
    fn navigate(&self, view: View);

    /// 若当前不在登录视图则跳转到登录视图
    ///
    /// 检查与跳转必须原子完成；返回是否发生了跳转
    fn redirect_to_login(&self) -> bool;
}
