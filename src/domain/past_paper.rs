//! Past Paper Context - 历年真题 (PYQ)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, Entity, EntityRef, Exam, MediaRef, Named, SubCategory, Subject};

/// 历年真题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PastPaper {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<EntityRef<Category>>,
    #[serde(default, alias = "subcategory", skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<EntityRef<SubCategory>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam: Option<EntityRef<Exam>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<EntityRef<Subject>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<MediaRef>,
    #[serde(default, alias = "file", skip_serializing_if = "Option::is_none")]
    pub paper: Option<MediaRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for PastPaper {
    const KIND: &'static str = "past_paper";

    fn id(&self) -> &str {
        &self.id
    }
}

impl PastPaper {
    /// 客户端搜索
    ///
    /// 大小写不敏感地匹配分类、子分类、考试、科目名称以及描述。
    /// 只有 ID 的引用不参与匹配；空搜索词匹配所有记录。
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        let contains = |haystack: Option<&str>| {
            haystack
                .map(|text| text.to_lowercase().contains(&needle))
                .unwrap_or(false)
        };

        contains(ref_name(&self.category))
            || contains(ref_name(&self.sub_category))
            || contains(ref_name(&self.exam))
            || contains(ref_name(&self.subject))
            || contains(self.description.as_deref())
    }
}

fn ref_name<T: Entity + Named>(reference: &Option<EntityRef<T>>) -> Option<&str> {
    reference.as_ref().and_then(EntityRef::name)
}

/// 按搜索词过滤真题列表（保持原顺序）
pub fn search_past_papers<'a>(papers: &'a [PastPaper], term: &str) -> Vec<&'a PastPaper> {
    papers.iter().filter(|paper| paper.matches_search(term)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(id: &str, category: &str, exam: &str, description: &str) -> PastPaper {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "category": {"_id": format!("c-{id}"), "name": category},
            "subCategory": {"_id": format!("s-{id}"), "name": "General"},
            "exam": {"_id": format!("e-{id}"), "name": exam},
            "subject": "subject-id-only",
            "description": description,
        }))
        .unwrap()
    }

    #[test]
    fn test_empty_term_matches_everything() {
        let papers = vec![paper("1", "Banking", "IBPS PO", "2019 prelims")];
        assert_eq!(search_past_papers(&papers, "").len(), 1);
        assert_eq!(search_past_papers(&papers, "   ").len(), 1);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let papers = vec![
            paper("1", "Banking", "IBPS PO", "2019 prelims"),
            paper("2", "Engineering", "GATE", "Civil mains"),
            paper("3", "Medical", "NEET", "Biology set"),
        ];

        let ids = |term: &str| {
            search_past_papers(&papers, term)
                .into_iter()
                .map(|p| p.id.as_str())
                .collect::<Vec<_>>()
        };

        assert_eq!(ids("banking"), vec!["1"]);
        assert_eq!(ids("gate"), vec!["2"]);
        assert_eq!(ids("BIOLOGY"), vec!["3"]);
        assert_eq!(ids("general"), vec!["1", "2", "3"]);
        assert!(ids("nothing-like-this").is_empty());
    }

    #[test]
    fn test_id_only_references_do_not_match() {
        let papers = vec![paper("1", "Banking", "IBPS PO", "2019 prelims")];
        assert!(search_past_papers(&papers, "subject-id-only").is_empty());
    }
}
