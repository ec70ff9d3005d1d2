//! Form Submission - 表单提交到状态容器
//!
//! 新建与编辑分别调用容器的 create / update，
//! 校验失败在发出请求之前返回。编辑成功后以返回的实体重新初始化表单。

use super::drafts::{
    AuthorDraft, BannerDraft, BannerImageDraft, NamedDraft, PastPaperDraft, PublicationDraft,
    SubCategoryDraft,
};
use super::form::Form;
use crate::application::error::FormError;
use crate::application::services::{CatalogResource, CatalogService, NamedPayload};
use crate::application::store::{BannerStore, CrudStore, PastPaperStore, PublicationStore, SubCategoryStore};
use crate::domain::{Banner, PageType, PastPaper, Publication, SubCategory};

impl Form<NamedDraft> {
    pub async fn submit_create<T>(&mut self, store: &CrudStore<CatalogService<T>>) -> Result<T, FormError>
    where
        T: CatalogResource<Payload = NamedPayload>,
    {
        self.submit(|draft, _| async move {
            Ok::<_, FormError>(store.create(draft.into_payload()?).await?)
        })
        .await
    }

    pub async fn submit_update<T>(
        &mut self,
        store: &CrudStore<CatalogService<T>>,
        id: &str,
    ) -> Result<T, FormError>
    where
        T: CatalogResource<Payload = NamedPayload>,
        NamedDraft: for<'a> From<&'a T>,
    {
        self.submit_edit(|draft, _| async move {
            Ok::<_, FormError>(store.update(id, draft.into_payload()?).await?)
        })
        .await
    }
}

impl Form<SubCategoryDraft> {
    pub async fn submit_create(&mut self, store: &SubCategoryStore) -> Result<SubCategory, FormError> {
        self.submit(|draft, _| async move {
            Ok::<_, FormError>(store.create(draft.into_payload()?).await?)
        })
        .await
    }

    pub async fn submit_update(
        &mut self,
        store: &SubCategoryStore,
        id: &str,
    ) -> Result<SubCategory, FormError> {
        self.submit_edit(|draft, _| async move {
            Ok::<_, FormError>(store.update(id, draft.into_payload()?).await?)
        })
        .await
    }
}

impl Form<PastPaperDraft> {
    pub async fn submit_create(&mut self, store: &PastPaperStore) -> Result<PastPaper, FormError> {
        self.submit(|draft, _| async move {
            if draft.paper.is_none() {
                return Err(FormError::MissingField("paper"));
            }
            Ok::<_, FormError>(store.create(draft.into_submission()?).await?)
        })
        .await
    }

    pub async fn submit_update(&mut self, store: &PastPaperStore, id: &str) -> Result<PastPaper, FormError> {
        self.submit_edit(|draft, _| async move {
            Ok::<_, FormError>(store.update(id, draft.into_submission()?).await?)
        })
        .await
    }
}

impl Form<PublicationDraft> {
    pub async fn submit_create(&mut self, store: &PublicationStore) -> Result<Publication, FormError> {
        self.submit(|draft, _| async move {
            Ok::<_, FormError>(store.create(draft.into_new()?).await?)
        })
        .await
    }

    /// 编辑只发送变化的标量字段（PATCH）
    pub async fn submit_update(
        &mut self,
        store: &PublicationStore,
        id: &str,
    ) -> Result<Publication, FormError> {
        self.submit_edit(|draft, initial| async move {
            let fields = draft.changed_fields(&initial)?;
            Ok::<_, FormError>(store.update(id, fields).await?)
        })
        .await
    }
}

impl Form<AuthorDraft> {
    pub async fn submit_add(
        &mut self,
        store: &PublicationStore,
        publication_id: &str,
    ) -> Result<Publication, FormError> {
        self.submit(|draft, _| async move {
            Ok::<_, FormError>(store.add_author(publication_id, draft.into_payload()?).await?)
        })
        .await
    }

    pub async fn submit_update(
        &mut self,
        store: &PublicationStore,
        publication_id: &str,
        author_id: &str,
    ) -> Result<Publication, FormError> {
        let publication = self
            .submit(|draft, _| async move {
                Ok::<_, FormError>(store
                    .update_author(publication_id, author_id, draft.into_payload()?)
                    .await?)
            })
            .await?;
        if let Some(author) = publication.author(author_id) {
            self.reseed(AuthorDraft::from(author));
        }
        Ok(publication)
    }
}

impl Form<BannerDraft> {
    pub async fn submit_create(
        &mut self,
        store: &BannerStore,
        page_type: &PageType,
    ) -> Result<Banner, FormError> {
        self.submit(|draft, _| async move {
            Ok::<_, FormError>(store.create(page_type, draft.into_new()?).await?)
        })
        .await
    }
}

impl Form<BannerImageDraft> {
    pub async fn submit_add(
        &mut self,
        store: &BannerStore,
        page_type: &PageType,
    ) -> Result<Vec<Banner>, FormError> {
        self.submit(|draft, _| async move {
            let (image, link) = draft.into_parts()?;
            Ok::<_, FormError>(store.add_image(page_type, image, link).await?)
        })
        .await
    }

    pub async fn submit_replace(
        &mut self,
        store: &BannerStore,
        page_type: &PageType,
        image_id: &str,
    ) -> Result<Vec<Banner>, FormError> {
        self.submit(|draft, _| async move {
            let (image, link) = draft.into_parts()?;
            Ok::<_, FormError>(store.replace_image(page_type, image_id, image, link).await?)
        })
        .await
    }
}
