use super::{Category, Item};

/// 検索戦略
///
/// カタログ全体から条件に合う資料を抽出する。空の条件は常に空の結果を返す。
pub trait SearchStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn search(&self, items: &[Item], criterion: &str) -> Vec<Item>;
}

/// タイトルの部分一致（大文字小文字を区別しない）
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchByTitle;

impl SearchStrategy for SearchByTitle {
    fn name(&self) -> &'static str {
        "title"
    }

    fn search(&self, items: &[Item], criterion: &str) -> Vec<Item> {
        contains_ignore_case(items, criterion, Item::title)
    }
}

/// 著者名の部分一致（大文字小文字を区別しない）
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchByAuthor;

impl SearchStrategy for SearchByAuthor {
    fn name(&self) -> &'static str {
        "author"
    }

    fn search(&self, items: &[Item], criterion: &str) -> Vec<Item> {
        contains_ignore_case(items, criterion, Item::author)
    }
}

/// 分類の完全一致
///
/// 条件は "fiction" / "non-fiction" などの表記ゆれを許容する。解釈できない条件は空の結果。
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchByCategory;

impl SearchStrategy for SearchByCategory {
    fn name(&self) -> &'static str {
        "category"
    }

    fn search(&self, items: &[Item], criterion: &str) -> Vec<Item> {
        let Ok(category) = criterion.parse::<Category>() else {
            return Vec::new();
        };

        items
            .iter()
            .filter(|item| item.category() == category)
            .cloned()
            .collect()
    }
}

fn contains_ignore_case(items: &[Item], criterion: &str, field: fn(&Item) -> &str) -> Vec<Item> {
    let needle = criterion.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    items
        .iter()
        .filter(|item| field(item).to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
