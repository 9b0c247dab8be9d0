use super::{ValidationResult, Validator};
use crate::domain::ItemDraft;

const TITLE_MIN_LENGTH: usize = 1;
const TITLE_MAX_LENGTH: usize = 200;
const TITLE_WARNING_LENGTH: usize = 100;
const SHOUTING_MIN_LENGTH: usize = 10;
const FORBIDDEN_CHARS: [char; 5] = ['<', '>', '"', '\'', '&'];

/// タイトルの検証
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleValidator;

impl Validator for TitleValidator {
    fn name(&self) -> &'static str {
        "title"
    }

    fn validate(&self, draft: &ItemDraft) -> ValidationResult {
        let title = draft.title.trim();
        if title.is_empty() {
            return ValidationResult::error("Title must not be empty");
        }

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let length = title.chars().count();

        if length < TITLE_MIN_LENGTH {
            errors.push(format!(
                "Title must be at least {} character long",
                TITLE_MIN_LENGTH
            ));
        }

        if length > TITLE_MAX_LENGTH {
            errors.push(format!(
                "Title must not exceed {} characters",
                TITLE_MAX_LENGTH
            ));
        }

        if length > TITLE_WARNING_LENGTH {
            warnings.push(format!(
                "Title is very long ({} characters). Consider shortening it.",
                length
            ));
        }

        if title.contains(FORBIDDEN_CHARS) {
            errors.push("Title contains forbidden characters (<, >, \", ', &)".to_string());
        }

        if title.chars().all(|c| c.is_ascii_digit()) {
            warnings.push("Title contains only digits. Consider adding descriptive text.".to_string());
        }

        if title == title.to_uppercase() && length > SHOUTING_MIN_LENGTH {
            warnings.push("Title is entirely upper-case. Consider using title case.".to_string());
        }

        ValidationResult::from_checks(errors, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Medium};

    fn validate(title: &str) -> ValidationResult {
        let draft = ItemDraft::new(title, "George Orwell", Category::Fiction, Medium::Physical);
        TitleValidator.validate(&draft)
    }

    #[test]
    fn test_regular_title_passes_cleanly() {
        let result = validate("Brave New World");
        assert!(result.is_valid());
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_blank_title_fails() {
        let result = validate("   ");
        assert!(!result.is_valid());
        assert_eq!(result.errors(), ["Title must not be empty".to_string()]);
    }

    #[test]
    fn test_title_over_max_length_fails_and_warns() {
        let result = validate(&"a".repeat(201));
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.warnings().len(), 1);
    }

    #[test]
    fn test_long_title_warns_only() {
        let result = validate(&"a".repeat(150));
        assert!(result.is_valid());
        assert!(result.warnings()[0].contains("150 characters"));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 100文字（マルチバイト）は警告の閾値ちょうど
        let result = validate(&"é".repeat(100));
        assert!(result.is_valid());
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_forbidden_characters_fail() {
        for title in ["<b>Bold</b>", "Tom & Jerry", "The \"Quote\"", "Rock 'n' Roll"] {
            let result = validate(title);
            assert!(!result.is_valid(), "{title} should be rejected");
        }
    }

    #[test]
    fn test_digit_only_title_warns() {
        let result = validate("1984");
        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
        assert!(result.warnings()[0].contains("only digits"));
    }

    #[test]
    fn test_shouting_title_warns_when_longer_than_ten() {
        assert!(validate("THE HOBBIT").warnings().is_empty());

        let result = validate("THE SILMARILLION");
        assert!(result.is_valid());
        assert!(result.warnings()[0].contains("upper-case"));
    }

    #[test]
    fn test_checks_accumulate() {
        let title = format!("<{}>", "A".repeat(210));
        let result = validate(&title);

        assert_eq!(result.errors().len(), 2);
        assert_eq!(result.warnings().len(), 2);
    }
}
