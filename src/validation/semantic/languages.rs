/*!
 * Language code validation.
 *
 * Codes may come from either ISO 639-1 or ISO 639-3, but a single document
 * has to stick to one of the two standards.
 */

use crate::document::model::{Document, Indexed};
use crate::language_utils::{
    get_language_name, language_codes_match, validate_language_code, LanguageCodeType,
};
use crate::validation::issue::{item_path, Issue, RuleKind};

use super::{segment_field_path, SemanticRule};

/// Every language code is known, and all codes share one standard
pub struct LanguageCodeRule;

impl LanguageCodeRule {
    /// Every language code in the document with its field path, in traversal order
    fn collect_codes(document: &Document) -> Vec<(String, &str)> {
        let mut codes = Vec::new();

        if let Some(metadata) = &document.metadata {
            push_codes(&mut codes, "metadata.languages", metadata.languages.as_ref());
            if let Some(source) = &metadata.source {
                push_codes(&mut codes, "metadata.source.languages", source.languages.as_ref());
            }
        }

        for segment in document.segments() {
            if let Some(language) = segment.language.as_deref() {
                codes.push((segment_field_path(segment, "language"), language));
            }
        }

        codes
    }
}

fn push_codes<'a>(
    codes: &mut Vec<(String, &'a str)>,
    path: &str,
    list: Option<&'a Vec<Indexed<String>>>,
) {
    for code in list.into_iter().flatten() {
        codes.push((item_path(path, code.index), code.value.as_str()));
    }
}

impl SemanticRule for LanguageCodeRule {
    fn kind(&self) -> RuleKind {
        RuleKind::LanguageCodes
    }

    fn check(&self, document: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();
        // First valid code seen for each standard: (position, path, code)
        let mut first_part1: Option<(usize, String, &str)> = None;
        let mut first_part3: Option<(usize, String, &str)> = None;

        for (position, (path, code)) in Self::collect_codes(document).into_iter().enumerate() {
            match validate_language_code(code) {
                Ok(LanguageCodeType::Part1) => {
                    first_part1.get_or_insert((position, path, code));
                }
                Ok(LanguageCodeType::Part3) => {
                    first_part3.get_or_insert((position, path, code));
                }
                Err(e) => issues.push(Issue::semantic(self.kind(), path, e.to_string())),
            }
        }

        if let (Some(part1), Some(part3)) = (first_part1, first_part3) {
            let mut standards = [(part1, LanguageCodeType::Part1), (part3, LanguageCodeType::Part3)];
            standards.sort_by_key(|((position, _, _), _)| *position);
            let [((_, first_path, first_code), first_type), ((_, second_path, second_code), second_type)] =
                standards;

            let mut message = format!(
                "Inconsistent language code standard: '{}' at {} is {} but '{}' at {} is {}; use one standard throughout the document",
                first_code, first_path, first_type, second_code, second_path, second_type
            );
            if language_codes_match(first_code, second_code) {
                if let Ok(name) = get_language_name(first_code) {
                    message.push_str(&format!(
                        " ('{}' and '{}' are both {})",
                        first_code, second_code, name
                    ));
                }
            }

            // Reported at the code that introduced the second standard
            issues.push(Issue::semantic(self.kind(), second_path.clone(), message));
        }

        issues
    }
}
