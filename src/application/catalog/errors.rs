use thiserror::Error;

use crate::domain::{ItemId, LifecycleError, validation::ValidationResult};
use crate::ports::StoreError;

/// カタログ管理アプリケーション層のエラー
///
/// いずれも呼び出し元へそのまま伝播する（この層では回復しない）。
#[derive(Debug, Error)]
pub enum CatalogError {
    /// 検証失敗（全バリデーターのエラーと警告を保持）
    #[error("Validation failed: {0}")]
    Validation(ValidationResult),

    /// 資料が見つからない
    #[error("Item not found: {0}")]
    NotFound(ItemId),

    /// 状態遷移・削除の規則違反、重複登録、同時更新の競合
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// ストアのエラー
    #[error("Store error")]
    Store(#[source] StoreError),
}

impl From<LifecycleError> for CatalogError {
    fn from(err: LifecycleError) -> Self {
        CatalogError::InvalidOperation(err.to_string())
    }
}

/// 競合は規則違反として、それ以外はインフラ障害として扱う
impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::VersionConflict(id) => CatalogError::InvalidOperation(format!(
                "Item {} was modified concurrently, retry the operation",
                id
            )),
            other => CatalogError::Store(other),
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, CatalogError>;
