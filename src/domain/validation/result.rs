use serde::Serialize;
use std::fmt;

/// 検証結果（不変の値オブジェクト）
///
/// 不変条件：`is_valid()` が false であることと、エラーが1件以上あることは同値。
/// 警告は妥当性と独立している。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self::from_checks(Vec::new(), Vec::new())
    }

    pub fn success_with_warnings(warnings: Vec<String>) -> Self {
        Self::from_checks(Vec::new(), warnings)
    }

    /// エラーが空の場合は不変条件に従い成功として扱われる
    pub fn failure(errors: Vec<String>) -> Self {
        Self::from_checks(errors, Vec::new())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::failure(vec![message.into()])
    }

    /// 蓄積したエラーと警告から結果を作る
    pub fn from_checks(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// 2つの結果を評価順に結合する
    pub fn combine(&self, other: &ValidationResult) -> ValidationResult {
        let errors = self.errors.iter().chain(&other.errors).cloned().collect();
        let warnings = self.warnings.iter().chain(&other.warnings).cloned().collect();

        ValidationResult {
            valid: self.valid && other.valid,
            errors,
            warnings,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// 人が読むための要約
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            f.write_str("validation passed")?;
        } else {
            f.write_str("validation failed")?;
        }

        if self.has_errors() {
            f.write_str("\nErrors:")?;
            for error in &self.errors {
                write!(f, "\n  - {}", error)?;
            }
        }

        if self.has_warnings() {
            f.write_str("\nWarnings:")?;
            for warning in &self.warnings {
                write!(f, "\n  - {}", warning)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_success_is_valid_without_messages() {
        let result = ValidationResult::success();
        assert!(result.is_valid());
        assert!(!result.has_errors());
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_success_with_warnings_stays_valid() {
        let result = ValidationResult::success_with_warnings(vec!["long title".to_string()]);
        assert!(result.is_valid());
        assert_eq!(result.warnings(), ["long title".to_string()]);
    }

    #[test]
    fn test_failure_is_invalid() {
        let result = ValidationResult::failure(vec!["empty title".to_string()]);
        assert!(!result.is_valid());
        assert_eq!(result.errors(), ["empty title".to_string()]);
    }

    #[test]
    fn test_failure_without_errors_keeps_invariant() {
        let result = ValidationResult::failure(Vec::new());
        assert!(result.is_valid());
    }

    #[test]
    fn test_combine_preserves_evaluation_order() {
        let first = ValidationResult::from_checks(vec!["e1".into()], vec!["w1".into()]);
        let second = ValidationResult::from_checks(vec!["e2".into()], vec!["w2".into()]);

        let combined = first.combine(&second);

        assert!(!combined.is_valid());
        assert_eq!(combined.errors(), ["e1".to_string(), "e2".to_string()]);
        assert_eq!(combined.warnings(), ["w1".to_string(), "w2".to_string()]);
    }

    #[test]
    fn test_summary_lists_errors_and_warnings() {
        let result = ValidationResult::from_checks(vec!["bad".into()], vec!["hmm".into()]);
        let summary = result.summary();

        assert!(summary.starts_with("validation failed"));
        assert!(summary.contains("  - bad"));
        assert!(summary.contains("  - hmm"));
    }

    fn arb_result() -> impl Strategy<Value = ValidationResult> {
        (
            prop::collection::vec("[a-z]{1,8}", 0..3),
            prop::collection::vec("[a-z]{1,8}", 0..3),
        )
            .prop_map(|(errors, warnings)| ValidationResult::from_checks(errors, warnings))
    }

    proptest! {
        #[test]
        fn combine_is_associative(a in arb_result(), b in arb_result(), c in arb_result()) {
            let left = a.combine(&b).combine(&c);
            let right = a.combine(&b.combine(&c));
            prop_assert_eq!(left, right);
        }

        #[test]
        fn combine_validity_is_logical_and(a in arb_result(), b in arb_result()) {
            prop_assert_eq!(a.combine(&b).is_valid(), a.is_valid() && b.is_valid());
            prop_assert_eq!(b.combine(&a).is_valid(), a.is_valid() && b.is_valid());
        }

        #[test]
        fn combine_keeps_invariant(a in arb_result(), b in arb_result()) {
            let combined = a.combine(&b);
            prop_assert_eq!(combined.is_valid(), combined.errors().is_empty());
        }
    }
}
