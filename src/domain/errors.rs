use thiserror::Error;

/// 状態遷移のエラー
///
/// いずれも資料のタイトルを含む。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// 貸出中のため貸出不可
    #[error("Item '{title}' is not available for loan")]
    NotAvailable { title: String },

    /// 貸出中でないため返却不可
    #[error("Item '{title}' is not on loan")]
    NotLoaned { title: String },

    /// 貸出中のため削除不可
    #[error("Item '{title}' cannot be removed while it is on loan")]
    RemovalWhileLoaned { title: String },
}
