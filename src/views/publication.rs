//! Publication Detail - 出版物详情分页（概览 / 作者 / 图片）

use super::preview::FilePreview;
use super::table::{ref_label, Table};
use crate::domain::{MediaRef, Publication};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublicationTab {
    #[default]
    Overview,
    Authors,
    Images,
}

impl PublicationTab {
    pub const ALL: [PublicationTab; 3] = [Self::Overview, Self::Authors, Self::Images];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Authors => "Authors",
            Self::Images => "Images",
        }
    }
}

impl std::str::FromStr for PublicationTab {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown tab '{}', expected overview, authors or images", value))
    }
}

/// 渲染某个分页，标题行标出当前分页
pub fn render_publication(publication: &Publication, tab: PublicationTab) -> String {
    let header: Vec<String> = PublicationTab::ALL
        .iter()
        .map(|t| {
            if *t == tab {
                format!("[{}]", t.as_str())
            } else {
                t.as_str().to_string()
            }
        })
        .collect();

    let body = match tab {
        PublicationTab::Overview => overview(publication),
        PublicationTab::Authors => authors(publication),
        PublicationTab::Images => images(publication),
    };

    format!("{}\n{}\n\n{}", publication.title, header.join(" | "), body)
}

fn overview(publication: &Publication) -> String {
    let mut lines = vec![
        format!("ID:          {}", publication.id),
        format!("Category:    {}", ref_label(&publication.category)),
        format!(
            "Price:       {}",
            publication
                .price
                .map(|p| format!("{:.2}", p))
                .unwrap_or_else(|| "-".to_string())
        ),
    ];
    if let Some(description) = publication.description.as_deref() {
        lines.push(format!("Description: {}", description));
    }
    let file = |media: &Option<MediaRef>| {
        media
            .as_ref()
            .map(|m| FilePreview::from_media(m).render())
            .unwrap_or_else(|| "-".to_string())
    };
    lines.push(format!("Thumbnail:   {}", file(&publication.thumbnail)));
    lines.push(format!("Book:        {}", file(&publication.book)));
    if let Some(updated) = publication.updated_at {
        lines.push(format!("Updated:     {}", updated.format("%Y-%m-%d %H:%M")));
    }
    lines.join("\n") + "\n"
}

fn authors(publication: &Publication) -> String {
    let mut table = Table::new(["ID", "NAME", "BIO"]);
    for author in &publication.authors {
        table.push(vec![
            author.id.clone(),
            author.name.clone(),
            author.bio.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    table.render()
}

fn images(publication: &Publication) -> String {
    let mut table = Table::new(["ID", "FILE", "URL"]);
    for image in &publication.images {
        let preview = FilePreview::from_media(&MediaRef::Asset(image.clone()));
        table.push(vec![image.id.clone(), preview.render(), image.url.clone()]);
    }
    table.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn publication() -> Publication {
        serde_json::from_value(json!({
            "_id": "p1",
            "title": "Atlas",
            "price": 12.5,
            "category": {"_id": "c1", "name": "Geography"},
            "authors": [{"_id": "a1", "name": "Ada"}],
            "images": [{"_id": "i1", "url": "https://cdn/img/cover.png"}],
            "book": "https://cdn/books/atlas.pdf"
        }))
        .unwrap()
    }

    #[test]
    fn test_tab_from_str() {
        assert_eq!("authors".parse::<PublicationTab>(), Ok(PublicationTab::Authors));
        assert!("cover".parse::<PublicationTab>().is_err());
    }

    #[test]
    fn test_overview_tab() {
        let rendered = render_publication(&publication(), PublicationTab::Overview);
        assert!(rendered.starts_with("Atlas\n[Overview] | Authors | Images\n"));
        assert!(rendered.contains("Category:    Geography"));
        assert!(rendered.contains("Price:       12.50"));
        assert!(rendered.contains("Book:        atlas.pdf"));
        assert!(rendered.contains("Thumbnail:   -"));
    }

    #[test]
    fn test_authors_and_images_tabs() {
        let authors = render_publication(&publication(), PublicationTab::Authors);
        assert!(authors.contains("Overview | [Authors] | Images"));
        assert!(authors.contains("a1  Ada   -"));

        let images = render_publication(&publication(), PublicationTab::Images);
        assert!(images.contains("i1  cover.png  https://cdn/img/cover.png"));
    }
}
