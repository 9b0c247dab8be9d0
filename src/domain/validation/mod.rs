//! 登録候補の検証
//!
//! 各バリデーターは単一の責務を持ち、1件の候補に対して `ValidationResult` を返す。
//! バリデーター内のチェックは途中で打ち切らず、該当するものをすべて実行して蓄積する。

mod author;
mod consistency;
mod pipeline;
mod result;
mod title;

pub use author::AuthorValidator;
pub use consistency::ConsistencyValidator;
pub use pipeline::ValidationPipeline;
pub use result::ValidationResult;
pub use title::TitleValidator;

use crate::domain::ItemDraft;

/// バリデーター
///
/// 副作用なし。パイプラインから順番に呼び出される。
pub trait Validator: Send + Sync {
    /// ログ出力用の名前
    fn name(&self) -> &'static str;

    fn validate(&self, draft: &ItemDraft) -> ValidationResult;

    /// このステージの後に後続ステージを実行するか
    ///
    /// 既定はすべてのエラーを収集するため常に継続する。
    fn should_continue(&self, _result: &ValidationResult) -> bool {
        true
    }
}
