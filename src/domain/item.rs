use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::{Availability, Category, ItemId, Medium};

/// Item集約 - カタログに登録された1冊の資料
///
/// 不変条件：
/// - availabilityは常に値を持つ
/// - category, mediumは閉じた集合のいずれか（型で保証）
/// - 変更は状態遷移（lifecycle）または明示的なsetterのみ。いずれもupdated_atを更新する
///
/// フィールドはクレート内（ライフサイクル関数・ストアアダプター）からのみ直接触れる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    // 識別子（ストアが採番、登録前はNone）
    pub(crate) id: Option<ItemId>,

    // 書誌情報
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) category: Category,
    pub(crate) medium: Medium,

    // 貸出状態
    pub(crate) availability: Availability,

    // 楽観的排他制御用のバージョン（未保存は0）
    pub(crate) version: i64,

    // 監査情報
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Item {
    pub fn id(&self) -> Option<ItemId> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn medium(&self) -> Medium {
        self.medium
    }

    pub fn availability(&self) -> Availability {
        self.availability
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_available(&self) -> bool {
        self.availability.is_available()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = author.into();
        self.touch();
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
        self.touch();
    }

    pub fn set_medium(&mut self, medium: Medium) {
        self.medium = medium;
        self.touch();
    }

    /// 再検証用に候補資料へ戻す
    pub fn to_draft(&self) -> ItemDraft {
        ItemDraft {
            title: self.title.clone(),
            author: self.author.clone(),
            category: Some(self.category),
            medium: Some(self.medium),
            availability: Some(self.availability),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "unsaved".to_string());
        write!(
            f,
            "Item[id={}, title='{}', author='{}', category={}, medium={}, availability={}]",
            id,
            self.title,
            self.author,
            self.category.label(),
            self.medium.as_str(),
            self.availability
        )
    }
}

/// 登録候補の資料
///
/// 外部から届いたままの値を保持する。文字列は空の場合があり、
/// 分類・媒体・状態は未設定の場合がある。検証パイプラインはこの型を評価する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub title: String,
    pub author: String,
    pub category: Option<Category>,
    pub medium: Option<Medium>,
    pub availability: Option<Availability>,
}

impl ItemDraft {
    /// 貸出可能状態の候補を作る
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        category: Category,
        medium: Medium,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            category: Some(category),
            medium: Some(medium),
            availability: Some(Availability::Available),
        }
    }

    /// 候補の値を引き継いだビルダーを返す
    pub fn into_builder(self) -> ItemBuilder {
        let mut builder = ItemBuilder::new()
            .title(self.title)
            .author(self.author)
            .availability(self.availability.unwrap_or_default());
        if let Some(category) = self.category {
            builder = builder.category(category);
        }
        if let Some(medium) = self.medium {
            builder = builder.medium(medium);
        }
        builder
    }
}

/// ビルダーの必須項目エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemBuildError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Author is required")]
    MissingAuthor,
    #[error("Category is required")]
    MissingCategory,
    #[error("Medium is required")]
    MissingMedium,
}

/// Itemのビルダー
///
/// 必須項目（タイトル・著者・分類・媒体）が揃っていることを構築前に確認する。
/// タイトルと著者は前後の空白を除去して保存する。状態の既定値はAvailable。
#[derive(Debug, Clone, Default)]
pub struct ItemBuilder {
    title: Option<String>,
    author: Option<String>,
    category: Option<Category>,
    medium: Option<Medium>,
    availability: Availability,
}

impl ItemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn medium(mut self, medium: Medium) -> Self {
        self.medium = Some(medium);
        self
    }

    pub fn availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    pub fn fiction(self) -> Self {
        self.category(Category::Fiction)
    }

    pub fn non_fiction(self) -> Self {
        self.category(Category::NonFiction)
    }

    pub fn physical(self) -> Self {
        self.medium(Medium::Physical)
    }

    pub fn digital(self) -> Self {
        self.medium(Medium::Digital)
    }

    /// # エラー
    /// 必須項目が欠けている場合は最初に見つかった欠落を返す
    pub fn build(self) -> Result<Item, ItemBuildError> {
        let title = non_blank(self.title).ok_or(ItemBuildError::MissingTitle)?;
        let author = non_blank(self.author).ok_or(ItemBuildError::MissingAuthor)?;
        let category = self.category.ok_or(ItemBuildError::MissingCategory)?;
        let medium = self.medium.ok_or(ItemBuildError::MissingMedium)?;

        let now = Utc::now();
        Ok(Item {
            id: None,
            title,
            author,
            category,
            medium,
            availability: self.availability,
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orwell() -> ItemBuilder {
        ItemBuilder::new()
            .title("1984")
            .author("George Orwell")
            .fiction()
            .physical()
    }

    #[test]
    fn test_builder_creates_available_unsaved_item() {
        let item = orwell().build().unwrap();

        assert_eq!(item.id(), None);
        assert_eq!(item.title(), "1984");
        assert_eq!(item.author(), "George Orwell");
        assert_eq!(item.category(), Category::Fiction);
        assert_eq!(item.medium(), Medium::Physical);
        assert_eq!(item.availability(), Availability::Available);
        assert_eq!(item.version(), 0);
        assert_eq!(item.created_at(), item.updated_at());
    }

    #[test]
    fn test_builder_trims_text_fields() {
        let item = ItemBuilder::new()
            .title("  Dune ")
            .author(" Frank Herbert  ")
            .fiction()
            .digital()
            .build()
            .unwrap();

        assert_eq!(item.title(), "Dune");
        assert_eq!(item.author(), "Frank Herbert");
    }

    #[test]
    fn test_builder_requires_title() {
        let result = ItemBuilder::new()
            .title("   ")
            .author("George Orwell")
            .fiction()
            .physical()
            .build();
        assert_eq!(result.unwrap_err(), ItemBuildError::MissingTitle);
    }

    #[test]
    fn test_builder_requires_author_category_and_medium() {
        let no_author = ItemBuilder::new().title("1984").fiction().physical().build();
        assert_eq!(no_author.unwrap_err(), ItemBuildError::MissingAuthor);

        let no_category = ItemBuilder::new()
            .title("1984")
            .author("George Orwell")
            .physical()
            .build();
        assert_eq!(no_category.unwrap_err(), ItemBuildError::MissingCategory);

        let no_medium = ItemBuilder::new()
            .title("1984")
            .author("George Orwell")
            .non_fiction()
            .build();
        assert_eq!(no_medium.unwrap_err(), ItemBuildError::MissingMedium);
    }

    #[test]
    fn test_setters_refresh_updated_at() {
        let mut item = orwell().build().unwrap();
        let before = item.updated_at();

        item.set_title("Animal Farm");
        item.set_category(Category::NonFiction);
        item.set_medium(Medium::Digital);
        item.set_author("Eric Blair");

        assert_eq!(item.title(), "Animal Farm");
        assert_eq!(item.author(), "Eric Blair");
        assert_eq!(item.category(), Category::NonFiction);
        assert_eq!(item.medium(), Medium::Digital);
        assert!(item.updated_at() >= before);
        assert_eq!(item.created_at(), before);
    }

    #[test]
    fn test_draft_round_trips_through_builder() {
        let draft = ItemDraft::new("Sapiens", "Yuval Noah Harari", Category::NonFiction, Medium::Digital);
        let item = draft.clone().into_builder().build().unwrap();

        assert_eq!(item.to_draft(), draft);
    }

    #[test]
    fn test_draft_without_availability_defaults_to_available() {
        let draft = ItemDraft {
            availability: None,
            ..ItemDraft::new("Dune", "Frank Herbert", Category::Fiction, Medium::Physical)
        };
        let item = draft.into_builder().build().unwrap();
        assert_eq!(item.availability(), Availability::Available);
    }
}
