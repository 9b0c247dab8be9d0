use once_cell::sync::Lazy;
use regex::Regex;

use super::{ValidationResult, Validator};
use crate::domain::ItemDraft;

const AUTHOR_MIN_LENGTH: usize = 2;
const AUTHOR_MAX_LENGTH: usize = 100;

// 英字とLatin-1のアクセント付き文字、空白、ピリオド、ハイフン、アポストロフィ
static VALID_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-ZÀ-ÿ\s.'\-]+$").expect("valid author pattern"));
static HAS_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-ZÀ-ÿ]").expect("valid letter pattern"));

/// 著者名の検証
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorValidator;

impl Validator for AuthorValidator {
    fn name(&self) -> &'static str {
        "author"
    }

    fn validate(&self, draft: &ItemDraft) -> ValidationResult {
        let author = draft.author.trim();
        if author.is_empty() {
            return ValidationResult::error("Author must not be empty");
        }

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let length = author.chars().count();

        if length < AUTHOR_MIN_LENGTH {
            errors.push(format!(
                "Author name must be at least {} characters long",
                AUTHOR_MIN_LENGTH
            ));
        }

        if length > AUTHOR_MAX_LENGTH {
            errors.push(format!(
                "Author name must not exceed {} characters",
                AUTHOR_MAX_LENGTH
            ));
        }

        if !VALID_NAME.is_match(author) {
            errors.push(
                "Author name contains invalid characters. Use only letters, spaces, periods, hyphens and apostrophes."
                    .to_string(),
            );
        }

        if author.contains("  ") {
            warnings.push("Author name contains repeated spaces. Use single spaces.".to_string());
        }

        if author.chars().all(|c| c.is_ascii_digit()) {
            errors.push("Author name must not consist only of digits".to_string());
        }

        if !HAS_LETTER.is_match(author) {
            errors.push("Author name must contain at least one letter".to_string());
        }

        if !author.contains(' ') && length > 2 {
            warnings.push(
                "Author name is a single word. Consider adding first and last name.".to_string(),
            );
        }

        if author == author.to_lowercase() {
            warnings.push("Author name is entirely lower-case. Consider proper-name casing.".to_string());
        } else if author == author.to_uppercase() {
            warnings.push("Author name is entirely upper-case. Consider proper-name casing.".to_string());
        }

        ValidationResult::from_checks(errors, warnings)
    }
}
