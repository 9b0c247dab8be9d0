use super::{ValidationResult, Validator};
use crate::domain::ItemDraft;

/// 必須項目と全体の整合性の検証
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsistencyValidator;

impl Validator for ConsistencyValidator {
    fn name(&self) -> &'static str {
        "consistency"
    }

    fn validate(&self, draft: &ItemDraft) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if draft.category.is_none() {
            errors.push("Category is required".to_string());
        }

        if draft.medium.is_none() {
            errors.push("Medium is required".to_string());
        }

        if draft.availability.is_none() {
            errors.push("Availability is required".to_string());
        }

        if draft.title.trim().to_lowercase() == draft.author.trim().to_lowercase() {
            warnings.push("Title and author are identical. Please double-check.".to_string());
        }

        ValidationResult::from_checks(errors, warnings)
    }
}
