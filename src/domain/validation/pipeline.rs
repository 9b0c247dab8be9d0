use super::{
    AuthorValidator, ConsistencyValidator, TitleValidator, ValidationResult, Validator,
};
use crate::domain::ItemDraft;

/// 検証パイプライン
///
/// 構築時に順序が確定する不変のバリデーター列。
/// 前段が失敗しても後段を実行し、全結果を `combine` で結合する。
/// 打ち切りはステージ自身の `should_continue` が false を返した場合のみ。
pub struct ValidationPipeline {
    stages: Vec<Box<dyn Validator>>,
}

impl ValidationPipeline {
    pub fn new(stages: Vec<Box<dyn Validator>>) -> Self {
        Self { stages }
    }

    /// 標準構成：タイトル → 著者 → 整合性
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(TitleValidator),
            Box::new(AuthorValidator),
            Box::new(ConsistencyValidator),
        ])
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    pub fn run(&self, draft: &ItemDraft) -> ValidationResult {
        let mut combined = ValidationResult::success();

        for stage in &self.stages {
            let result = stage.validate(draft);
            tracing::debug!(
                stage = stage.name(),
                valid = result.is_valid(),
                errors = result.errors().len(),
                warnings = result.warnings().len(),
                "validation stage finished"
            );

            combined = combined.combine(&result);

            if !stage.should_continue(&result) {
                tracing::debug!(stage = stage.name(), "validation pipeline stopped early");
                break;
            }
        }

        combined
    }
}

impl Default for ValidationPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for ValidationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationPipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Medium};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 常に失敗し、後続を止めるバリデーター
    struct Veto;

    impl Validator for Veto {
        fn name(&self) -> &'static str {
            "veto"
        }

        fn validate(&self, _draft: &ItemDraft) -> ValidationResult {
            ValidationResult::error("vetoed")
        }

        fn should_continue(&self, result: &ValidationResult) -> bool {
            result.is_valid()
        }
    }

    /// 呼び出し回数を数えるバリデーター
    struct Counting(Arc<AtomicUsize>);

    impl Validator for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn validate(&self, _draft: &ItemDraft) -> ValidationResult {
            self.0.fetch_add(1, Ordering::SeqCst);
            ValidationResult::success()
        }
    }

    #[test]
    fn test_standard_pipeline_order() {
        let pipeline = ValidationPipeline::standard();
        assert_eq!(pipeline.stage_names(), vec!["title", "author", "consistency"]);
    }

    #[test]
    fn test_pipeline_collects_errors_from_every_stage() {
        let draft = ItemDraft {
            title: String::new(),
            author: "1".to_string(),
            category: None,
            medium: Some(Medium::Physical),
            availability: Some(Default::default()),
        };

        let result = ValidationPipeline::standard().run(&draft);

        assert!(!result.is_valid());
        assert_eq!(result.errors()[0], "Title must not be empty");
        assert!(result.errors().iter().any(|e| e.contains("at least 2")));
        assert_eq!(result.errors().last().map(String::as_str), Some("Category is required"));
    }

    #[test]
    fn test_pipeline_passes_valid_draft_with_warnings() {
        let draft = ItemDraft::new("1984", "George Orwell", Category::Fiction, Medium::Physical);

        let result = ValidationPipeline::standard().run(&draft);

        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
    }

    #[test]
    fn test_should_continue_veto_stops_later_stages() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline = ValidationPipeline::new(vec![
            Box::new(Counting(calls.clone())),
            Box::new(Veto),
            Box::new(Counting(calls.clone())),
        ]);
        let draft = ItemDraft::new("Dune", "Frank Herbert", Category::Fiction, Medium::Physical);

        let result = pipeline.run(&draft);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.errors(), ["vetoed".to_string()]);
    }

    #[test]
    fn test_empty_pipeline_succeeds() {
        let draft = ItemDraft::new("Dune", "Frank Herbert", Category::Fiction, Medium::Physical);
        assert!(ValidationPipeline::new(Vec::new()).run(&draft).is_valid());
    }
}
