//! Form Drafts - 各资源表单的草稿及其到请求体的转换

use crate::application::error::FormError;
use crate::application::ports::FileUpload;
use crate::application::services::{
    AuthorPayload, NamedPayload, NewBanner, NewPublication, PastPaperFields, PastPaperSubmission,
    PublicationFields, SubCategoryPayload,
};
use crate::domain::{Author, Category, EntityRef, Exam, PastPaper, Publication, SubCategory, Subject};

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(value.to_string())
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn ref_id<T: crate::domain::Entity>(reference: &Option<EntityRef<T>>) -> String {
    reference
        .as_ref()
        .map(|r| r.id().to_string())
        .unwrap_or_default()
}

// ============================================================================
// 名称类（考试 / 科目 / 分类）
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedDraft {
    pub name: String,
    pub description: String,
}

impl NamedDraft {
    pub fn into_payload(self) -> Result<NamedPayload, FormError> {
        Ok(NamedPayload {
            name: required(&self.name, "name")?,
            description: optional(&self.description),
        })
    }
}

macro_rules! named_draft_from {
    ($ty:ty) => {
        impl From<&$ty> for NamedDraft {
            fn from(entity: &$ty) -> Self {
                Self {
                    name: entity.name.clone(),
                    description: entity.description.clone().unwrap_or_default(),
                }
            }
        }
    };
}

named_draft_from!(Exam);
named_draft_from!(Subject);
named_draft_from!(Category);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubCategoryDraft {
    pub name: String,
    pub category_id: String,
}

impl SubCategoryDraft {
    pub fn into_payload(self) -> Result<SubCategoryPayload, FormError> {
        Ok(SubCategoryPayload {
            name: required(&self.name, "name")?,
            category: required(&self.category_id, "category")?,
        })
    }
}

impl From<&SubCategory> for SubCategoryDraft {
    fn from(sub_category: &SubCategory) -> Self {
        Self {
            name: sub_category.name.clone(),
            category_id: ref_id(&sub_category.category),
        }
    }
}

// ============================================================================
// 真题
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PastPaperDraft {
    pub category_id: String,
    pub sub_category_id: String,
    pub exam_id: String,
    pub subject_id: String,
    pub description: String,
    pub year: Option<u16>,
    pub thumbnail: Option<FileUpload>,
    pub paper: Option<FileUpload>,
    /// 编辑时已有文件的 URL（预览用）
    pub existing_thumbnail: Option<String>,
    pub existing_paper: Option<String>,
}

impl From<&PastPaper> for PastPaperDraft {
    fn from(paper: &PastPaper) -> Self {
        Self {
            category_id: ref_id(&paper.category),
            sub_category_id: ref_id(&paper.sub_category),
            exam_id: ref_id(&paper.exam),
            subject_id: ref_id(&paper.subject),
            description: paper.description.clone().unwrap_or_default(),
            year: paper.year,
            thumbnail: None,
            paper: None,
            existing_thumbnail: paper.thumbnail.as_ref().map(|m| m.url().to_string()),
            existing_paper: paper.paper.as_ref().map(|m| m.url().to_string()),
        }
    }
}

impl PastPaperDraft {
    /// 新建时必须带试卷文件；编辑时文件可选（不传则保留原文件）
    pub fn into_submission(self) -> Result<PastPaperSubmission, FormError> {
        if self.paper.is_none() && self.existing_paper.is_none() {
            return Err(FormError::MissingField("paper"));
        }
        Ok(PastPaperSubmission {
            fields: PastPaperFields {
                category: Some(required(&self.category_id, "category")?),
                sub_category: optional(&self.sub_category_id),
                exam: optional(&self.exam_id),
                subject: optional(&self.subject_id),
                description: optional(&self.description),
                year: self.year,
            },
            thumbnail: self.thumbnail,
            paper: self.paper,
        })
    }
}

// ============================================================================
// 出版物
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorDraft {
    pub name: String,
    pub bio: String,
}

impl AuthorDraft {
    pub fn into_payload(self) -> Result<AuthorPayload, FormError> {
        Ok(AuthorPayload {
            name: required(&self.name, "author name")?,
            bio: optional(&self.bio),
        })
    }
}

impl From<&Author> for AuthorDraft {
    fn from(author: &Author) -> Self {
        Self {
            name: author.name.clone(),
            bio: author.bio.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublicationDraft {
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub category_id: String,
    /// 仅新建时随主体一起提交；编辑时作者走嵌套端点
    pub authors: Vec<AuthorDraft>,
    pub thumbnail: Option<FileUpload>,
    pub book: Option<FileUpload>,
    pub images: Vec<FileUpload>,
}

impl From<&Publication> for PublicationDraft {
    fn from(publication: &Publication) -> Self {
        Self {
            title: publication.title.clone(),
            description: publication.description.clone().unwrap_or_default(),
            price: publication.price,
            category_id: ref_id(&publication.category),
            authors: publication.authors.iter().map(AuthorDraft::from).collect(),
            thumbnail: None,
            book: None,
            images: Vec::new(),
        }
    }
}

impl PublicationDraft {
    pub fn into_new(self) -> Result<NewPublication, FormError> {
        let authors = self
            .authors
            .into_iter()
            .map(AuthorDraft::into_payload)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NewPublication {
            fields: PublicationFields {
                title: Some(required(&self.title, "title")?),
                description: optional(&self.description),
                price: self.price,
                category: optional(&self.category_id),
                authors,
            },
            thumbnail: self.thumbnail,
            book: self.book,
            images: self.images,
        })
    }

    /// 与初始草稿比较，只保留变化的字段
    pub fn changed_fields(&self, initial: &PublicationDraft) -> Result<PublicationFields, FormError> {
        let mut fields = PublicationFields::default();
        if self.title != initial.title {
            fields.title = Some(required(&self.title, "title")?);
        }
        if self.description != initial.description {
            fields.description = Some(self.description.trim().to_string());
        }
        if self.price != initial.price {
            fields.price = self.price;
        }
        if self.category_id != initial.category_id {
            fields.category = Some(self.category_id.trim().to_string());
        }
        Ok(fields)
    }
}

// ============================================================================
// 横幅
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BannerDraft {
    pub images: Vec<BannerImageDraft>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BannerImageDraft {
    pub image: Option<FileUpload>,
    pub link: String,
}

impl BannerImageDraft {
    pub fn into_parts(self) -> Result<(FileUpload, Option<String>), FormError> {
        let image = self.image.ok_or(FormError::MissingField("image"))?;
        Ok((image, optional(&self.link)))
    }
}

impl BannerDraft {
    pub fn into_new(self) -> Result<NewBanner, FormError> {
        if self.images.is_empty() {
            return Err(FormError::MissingField("images"));
        }
        let mut banner = NewBanner::default();
        for draft in self.images {
            let (image, link) = draft.into_parts()?;
            banner.images.push(image);
            banner.links.push(link);
        }
        Ok(banner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_draft_requires_name() {
        let draft = NamedDraft {
            name: "  ".to_string(),
            description: String::new(),
        };
        assert_eq!(draft.into_payload(), Err(FormError::MissingField("name")));
    }

    #[test]
    fn test_past_paper_draft_seeded_from_entity() {
        let paper: PastPaper = serde_json::from_value(serde_json::json!({
            "_id": "p1",
            "category": {"_id": "c1", "name": "Banking"},
            "exam": "e1",
            "description": "2019",
            "paper": "https://cdn/p1.pdf"
        }))
        .unwrap();

        let draft = PastPaperDraft::from(&paper);
        assert_eq!(draft.category_id, "c1");
        assert_eq!(draft.exam_id, "e1");
        assert_eq!(draft.existing_paper.as_deref(), Some("https://cdn/p1.pdf"));

        // 编辑已有试卷时无需重新上传文件
        let submission = draft.into_submission().unwrap();
        assert!(submission.paper.is_none());
        assert_eq!(submission.fields.exam.as_deref(), Some("e1"));
        assert_eq!(submission.fields.subject, None);
    }

    #[test]
    fn test_new_past_paper_requires_file() {
        let draft = PastPaperDraft {
            category_id: "c1".to_string(),
            ..Default::default()
        };
        assert_eq!(
            draft.into_submission().unwrap_err(),
            FormError::MissingField("paper")
        );
    }

    #[test]
    fn test_publication_changed_fields() {
        let initial = PublicationDraft {
            title: "Atlas".to_string(),
            description: "Maps".to_string(),
            price: Some(10.0),
            ..Default::default()
        };
        let mut edited = initial.clone();
        edited.price = Some(12.5);

        let fields = edited.changed_fields(&initial).unwrap();
        assert_eq!(
            fields,
            PublicationFields {
                price: Some(12.5),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_banner_draft_collects_links() {
        let draft = BannerDraft {
            images: vec![
                BannerImageDraft {
                    image: Some(FileUpload::new("a.png", "image/png", vec![1])),
                    link: "/offers".to_string(),
                },
                BannerImageDraft {
                    image: Some(FileUpload::new("b.png", "image/png", vec![2])),
                    link: String::new(),
                },
            ],
        };

        let banner = draft.into_new().unwrap();
        assert_eq!(banner.images.len(), 2);
        assert_eq!(banner.links, vec![Some("/offers".to_string()), None]);
    }
}
