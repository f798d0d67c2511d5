use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// STJ documents identify languages with either ISO 639-1 (2-letter) or
/// ISO 639-3 (3-letter) codes, and one document must stick to one of them.
/// Language code standard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-3 (3-letter) code
    Part3,
}

impl LanguageCodeType {
    pub fn standard_name(&self) -> &'static str {
        match self {
            Self::Part1 => "ISO 639-1",
            Self::Part3 => "ISO 639-3",
        }
    }
}

impl std::fmt::Display for LanguageCodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.standard_name())
    }
}

/// ISO 639-2/B bibliographic codes that differ from their ISO 639-3 form
const PART2B_TO_PART3: &[(&str, &str)] = &[
    ("fre", "fra"), // French
    ("ger", "deu"), // German
    ("dut", "nld"), // Dutch
    ("gre", "ell"), // Greek
    ("chi", "zho"), // Chinese
    ("cze", "ces"), // Czech
    ("ice", "isl"), // Icelandic
    ("alb", "sqi"), // Albanian
    ("arm", "hye"), // Armenian
    ("baq", "eus"), // Basque
    ("bur", "mya"), // Burmese
    ("per", "fas"), // Persian
    ("geo", "kat"), // Georgian
    ("may", "msa"), // Malay
    ("mac", "mkd"), // Macedonian
    ("rum", "ron"), // Romanian
    ("slo", "slk"), // Slovak
    ("wel", "cym"), // Welsh
    ("tib", "bod"), // Tibetan
];

/// ISO 639-3 equivalent of an ISO 639-2/B code, if `code` is one
pub fn part2b_to_part3(code: &str) -> Option<&'static str> {
    let normalized_code = code.trim().to_lowercase();
    PART2B_TO_PART3
        .iter()
        .find(|(part2b, _)| *part2b == normalized_code)
        .map(|(_, part3)| *part3)
}

/// Validate that a language code is a known ISO 639-1 or ISO 639-3 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if Language::from_639_1(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part1);
        }
    } else if normalized_code.len() == 3 {
        if let Some(part3) = part2b_to_part3(&normalized_code) {
            return Err(anyhow!(
                "Invalid language code: '{}' is an ISO 639-2/B code, use '{}' instead",
                code,
                part3
            ));
        }

        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part3);
        }
    }

    Err(anyhow!("Invalid language code: '{}'", code))
}

/// Normalize a language code to ISO 639-3 (3-letter) format
pub fn normalize_to_part3(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized_code) {
            return Ok(lang.to_639_3().to_string());
        }
    } else if normalized_code.len() == 3 {
        if let Some(part3) = part2b_to_part3(&normalized_code) {
            return Ok(part3.to_string());
        }

        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(normalized_code);
        }
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Check if two language codes represent the same language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_part3(code1), normalize_to_part3(code2)) {
        (Ok(normalized1), Ok(normalized2)) => normalized1 == normalized2,
        _ => false,
    }
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part3(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}
