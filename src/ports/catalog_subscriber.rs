use crate::domain::{AvailabilityChanged, Item};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// カタログ購読者ポート
///
/// 登録と状態変化の通知を受け取る外部の観測者。
/// ハンドラーは同期的に呼ばれるため、重い処理は購読者側で別タスクに逃がすこと。
/// エラーを返しても配信元の処理（永続化）は取り消されない。
pub trait CatalogSubscriber: Send + Sync {
    /// ログ出力用の名前
    fn name(&self) -> &str;

    /// 資料が登録されたときに呼ばれる
    fn on_item_admitted(&self, item: &Item) -> Result<()>;

    /// 資料の貸出状態が変わったときに呼ばれる
    ///
    /// `change.from` が旧状態、`change.to` が新状態。
    fn on_availability_changed(&self, item: &Item, change: &AvailabilityChanged) -> Result<()>;
}
