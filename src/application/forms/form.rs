//! Form - 表单状态
//!
//! 草稿从实体或默认值初始化；提交期间拒绝再次提交；
//! 成功后复位（编辑表单以服务端返回的实体重新初始化），
//! 失败后回到编辑态并保留错误提示。

use std::future::Future;

use crate::application::error::FormError;

/// 表单阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Editing,
    Submitting,
}

#[derive(Debug, Clone)]
pub struct Form<D> {
    initial: D,
    draft: D,
    phase: FormPhase,
    last_error: Option<String>,
}

impl<D: Clone + Default> Default for Form<D> {
    fn default() -> Self {
        Self::seeded(D::default())
    }
}

impl<D: Clone + Default> Form<D> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: Clone> Form<D> {
    /// 以已有实体的字段初始化（编辑表单）
    pub fn seeded(draft: D) -> Self {
        Self {
            initial: draft.clone(),
            draft,
            phase: FormPhase::Idle,
            last_error: None,
        }
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn initial(&self) -> &D {
        &self.initial
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// 修改草稿
    pub fn edit(&mut self, change: impl FnOnce(&mut D)) -> Result<(), FormError> {
        if self.is_submitting() {
            return Err(FormError::AlreadySubmitting);
        }
        change(&mut self.draft);
        self.phase = FormPhase::Editing;
        Ok(())
    }

    /// 以新的基准重新初始化（例如保存后服务端返回的实体）
    pub fn reseed(&mut self, draft: D) {
        *self = Self::seeded(draft);
    }

    /// 放弃修改
    pub fn reset(&mut self) {
        self.draft = self.initial.clone();
        self.phase = FormPhase::Idle;
        self.last_error = None;
    }

    /// 提交：action 接收草稿副本
    pub async fn submit<R, F, Fut>(&mut self, action: F) -> Result<R, FormError>
    where
        F: FnOnce(D, D) -> Fut,
        Fut: Future<Output = Result<R, FormError>>,
    {
        if self.is_submitting() {
            return Err(FormError::AlreadySubmitting);
        }
        self.phase = FormPhase::Submitting;
        self.last_error = None;

        match action(self.draft.clone(), self.initial.clone()).await {
            Ok(result) => {
                self.reset();
                Ok(result)
            }
            Err(err) => {
                self.phase = FormPhase::Editing;
                self.last_error = Some(err.display_message());
                Err(err)
            }
        }
    }
}

impl<D: Clone> Form<D> {
    /// 提交编辑：成功后以返回的实体作为新的 initial
    pub async fn submit_edit<R, F, Fut>(&mut self, action: F) -> Result<R, FormError>
    where
        D: for<'a> From<&'a R>,
        F: FnOnce(D, D) -> Fut,
        Fut: Future<Output = Result<R, FormError>>,
    {
        let saved = self.submit(action).await?;
        self.reseed(D::from(&saved));
        Ok(saved)
    }
}

impl<D: Clone + PartialEq> Form<D> {
    pub fn is_dirty(&self) -> bool {
        self.draft != self.initial
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error::{ApiError, StoreError};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Draft {
        name: String,
    }

    #[tokio::test]
    async fn test_success_resets_form() {
        let mut form: Form<Draft> = Form::new();
        form.edit(|d| d.name = "GATE".to_string()).unwrap();
        assert_eq!(form.phase(), FormPhase::Editing);
        assert!(form.is_dirty());

        let submitted = form
            .submit(|draft, _| async move { Ok::<_, FormError>(draft.name) })
            .await
            .unwrap();

        assert_eq!(submitted, "GATE");
        assert_eq!(form.phase(), FormPhase::Idle);
        assert_eq!(form.draft().name, "");
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Saved {
        name: String,
    }

    impl From<&Saved> for Draft {
        fn from(saved: &Saved) -> Self {
            Draft {
                name: saved.name.clone(),
            }
        }
    }

    #[tokio::test]
    async fn test_edit_success_reseeds_from_saved_entity() {
        let mut form = Form::seeded(Draft {
            name: "NEET".to_string(),
        });
        form.edit(|d| d.name = "neet ug".to_string()).unwrap();

        form.submit_edit(|draft, _| async move {
            // 服务端做了规范化
            Ok::<_, FormError>(Saved {
                name: draft.name.to_uppercase(),
            })
        })
        .await
        .unwrap();

        assert_eq!(form.initial().name, "NEET UG");
        assert_eq!(form.draft().name, "NEET UG");
        assert_eq!(form.phase(), FormPhase::Idle);
        assert!(!form.is_dirty());
    }

    #[tokio::test]
    async fn test_failure_returns_to_editing_with_message() {
        let mut form = Form::seeded(Draft {
            name: "NEET".to_string(),
        });
        form.edit(|d| d.name = "NEET UG".to_string()).unwrap();

        let result = form
            .submit(|_, _| async {
                Err::<(), _>(FormError::Store(StoreError::Api(ApiError::from_status(
                    422,
                    "Name already taken",
                ))))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.last_error(), Some("Name already taken"));
        assert_eq!(form.draft().name, "NEET UG");
    }
}
