use crate::domain::{Availability, Item, ItemId};
use async_trait::async_trait;
use thiserror::Error;

/// ストアのエラー
#[derive(Debug, Error)]
pub enum StoreError {
    /// 楽観的排他制御の競合（読み込み後に他者が更新または削除した）
    #[error("Item {0} was modified concurrently")]
    VersionConflict(ItemId),

    /// 保存済みデータがドメインの制約を満たさない
    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    /// バックエンド固有のエラー
    #[error("Store backend error")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// 資料リポジトリポート
///
/// カタログの永続化を抽象化する。コアが依存する唯一の境界。
///
/// 版管理の契約：
/// - 未保存（IDなし）の資料を保存するとIDを採番し、バージョン1で登録する
/// - 保存済みの資料は、ストア上のバージョンが一致する場合のみ更新し、バージョンを1増やす
/// - 削除もバージョンが一致する場合のみ行う
/// - 不一致の場合は `StoreError::VersionConflict` を返す
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// 資料を保存し、ID・バージョンが反映された資料を返す
    async fn save(&self, item: &Item) -> Result<Item>;

    /// IDで資料を取得する
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>>;

    /// 同じタイトルと著者（完全一致）の資料が存在するか
    ///
    /// 登録時の重複検出に使用される。
    async fn exists_by_title_and_author(&self, title: &str, author: &str) -> Result<bool>;

    /// 指定状態の資料を登録順に取得する
    async fn find_by_availability(&self, availability: Availability) -> Result<Vec<Item>>;

    /// すべての資料を登録順に取得する
    ///
    /// 検索戦略の入力として使用される。
    async fn find_all(&self) -> Result<Vec<Item>>;

    /// 資料を削除する
    async fn delete(&self, item: &Item) -> Result<()>;

    /// 指定状態の資料数
    async fn count_by_availability(&self, availability: Availability) -> Result<u64>;

    /// 全資料数
    async fn count(&self) -> Result<u64>;
}
