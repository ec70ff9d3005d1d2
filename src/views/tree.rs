//! Category Tree - 分类 → 子分类 嵌套视图

use crate::domain::{Category, SubCategory};

/// 渲染分类树；找不到所属分类的子分类归入 "(uncategorized)"
pub fn render_category_tree(categories: &[Category], sub_categories: &[SubCategory]) -> String {
    let mut out = String::new();

    for category in categories {
        out.push_str(&format!("{} ({})\n", category.name, category.id));
        let children: Vec<&SubCategory> = sub_categories
            .iter()
            .filter(|sub| sub.category_id() == Some(category.id.as_str()))
            .collect();
        push_children(&mut out, &children);
    }

    let orphans: Vec<&SubCategory> = sub_categories
        .iter()
        .filter(|sub| {
            sub.category_id()
                .map_or(true, |id| !categories.iter().any(|c| c.id == id))
        })
        .collect();
    if !orphans.is_empty() {
        out.push_str("(uncategorized)\n");
        push_children(&mut out, &orphans);
    }

    if out.is_empty() {
        out.push_str("No categories.\n");
    }
    out
}

fn push_children(out: &mut String, children: &[&SubCategory]) {
    for (index, sub) in children.iter().enumerate() {
        let branch = if index + 1 == children.len() { "└─" } else { "├─" };
        out.push_str(&format!("  {} {} ({})\n", branch, sub.name, sub.id));
    }
}
