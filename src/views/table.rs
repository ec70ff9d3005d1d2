//! Table - 纯文本表格渲染

use crate::domain::{
    Banner, Category, Entity, EntityRef, Exam, Named, PastPaper, Publication, SubCategory, Subject,
};

/// 纯文本表格
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, cells: Vec<String>) -> Self {
        self.push(cells);
        self
    }

    /// 添加一行，缺少的单元格补空
    pub fn push(&mut self, mut cells: Vec<String>) {
        cells.resize(self.headers.len(), String::new());
        self.rows.push(cells);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        if self.rows.is_empty() {
            return "No records.\n".to_string();
        }

        let widths: Vec<usize> = (0..self.headers.len())
            .map(|col| {
                self.rows
                    .iter()
                    .map(|row| row[col].chars().count())
                    .chain(std::iter::once(self.headers[col].chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        out.push_str(&Self::line(&self.headers, &widths));
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&Self::line(&rule, &widths));
        for row in &self.rows {
            out.push_str(&Self::line(row, &widths));
        }
        out
    }

    fn line(cells: &[String], widths: &[usize]) -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| {
                let pad = width.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    }
}

/// 可渲染为表格行的资源
pub trait TableRow {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

pub fn render_table<T: TableRow>(items: &[T]) -> String {
    let mut table = Table::new(T::headers().iter().copied());
    for item in items {
        table.push(item.cells());
    }
    table.render()
}

/// 引用字段的展示文本，缺省为 "-"
pub(crate) fn ref_label<T: Entity + Named>(reference: &Option<EntityRef<T>>) -> String {
    reference
        .as_ref()
        .map(|r| r.label().to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn text_or_dash(value: &Option<String>) -> String {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => "-".to_string(),
    }
}

macro_rules! named_row {
    ($ty:ty) => {
        impl TableRow for $ty {
            fn headers() -> &'static [&'static str] {
                &["ID", "NAME", "DESCRIPTION"]
            }

            fn cells(&self) -> Vec<String> {
                vec![self.id.clone(), self.name.clone(), text_or_dash(&self.description)]
            }
        }
    };
}

named_row!(Exam);
named_row!(Subject);
named_row!(Category);

impl TableRow for SubCategory {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "CATEGORY"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.clone(), self.name.clone(), ref_label(&self.category)]
    }
}

impl TableRow for Publication {
    fn headers() -> &'static [&'static str] {
        &["ID", "TITLE", "CATEGORY", "AUTHORS", "PRICE", "IMAGES"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            ref_label(&self.category),
            if self.authors.is_empty() {
                "-".to_string()
            } else {
                self.author_names()
            },
            self.price
                .map(|p| format!("{:.2}", p))
                .unwrap_or_else(|| "-".to_string()),
            self.images.len().to_string(),
        ]
    }
}

impl TableRow for PastPaper {
    fn headers() -> &'static [&'static str] {
        &["ID", "CATEGORY", "SUB-CATEGORY", "EXAM", "SUBJECT", "YEAR", "DESCRIPTION"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            ref_label(&self.category),
            ref_label(&self.sub_category),
            ref_label(&self.exam),
            ref_label(&self.subject),
            self.year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "-".to_string()),
            text_or_dash(&self.description),
        ]
    }
}

impl TableRow for Banner {
    fn headers() -> &'static [&'static str] {
        &["BANNER", "IMAGE", "URL", "LINK"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            format!("{} image(s)", self.images.len()),
            String::new(),
            String::new(),
        ]
    }
}

/// 横幅及其图片：每张图片一行
pub fn render_banners(banners: &[Banner]) -> String {
    let mut table = Table::new(Banner::headers().iter().copied());
    for banner in banners {
        if banner.images.is_empty() {
            table.push(banner.cells());
        }
        for image in &banner.images {
            table.push(vec![
                banner.id.clone(),
                image.id.clone(),
                image.url.clone(),
                text_or_dash(&image.link),
            ]);
        }
    }
    table.render()
}
