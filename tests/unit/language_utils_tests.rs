/*!
 * Tests for language utility functions
 */

use stj_validator::language_utils::{
    get_language_name, language_codes_match, normalize_to_part3, part2b_to_part3,
    validate_language_code, LanguageCodeType,
};

/// Test validation of language codes
#[test]
fn test_validate_language_code_withValidCodes_shouldReturnCorrectType() {
    // ISO 639-1 tests
    assert_eq!(validate_language_code("en").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("fr").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("de").unwrap(), LanguageCodeType::Part1);

    // ISO 639-3 tests
    assert_eq!(validate_language_code("eng").unwrap(), LanguageCodeType::Part3);
    assert_eq!(validate_language_code("fra").unwrap(), LanguageCodeType::Part3);
    assert_eq!(validate_language_code("spa").unwrap(), LanguageCodeType::Part3);

    // Whitespace and case tests
    assert_eq!(validate_language_code(" EN ").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("ENG").unwrap(), LanguageCodeType::Part3);
}

#[test]
fn test_validate_language_code_withInvalidCodes_shouldFail() {
    assert!(validate_language_code("xx").is_err());
    assert!(validate_language_code("123").is_err());
    assert!(validate_language_code("e").is_err());
    assert!(validate_language_code("english").is_err());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_validate_language_code_withBibliographicCode_shouldSuggestPart3() {
    let error = validate_language_code("ger").unwrap_err().to_string();
    assert!(error.contains("ISO 639-2/B"));
    assert!(error.contains("'deu'"));
    assert_eq!(part2b_to_part3("FRE"), Some("fra"));
    assert_eq!(part2b_to_part3("eng"), None);
}

/// Test normalization of language codes to ISO 639-3 format
#[test]
fn test_normalize_to_part3_withValidCodes_shouldNormalizeCorrectly() {
    assert_eq!(normalize_to_part3("en").unwrap(), "eng");
    assert_eq!(normalize_to_part3("fr").unwrap(), "fra");
    assert_eq!(normalize_to_part3("eng").unwrap(), "eng");
    assert_eq!(normalize_to_part3("fre").unwrap(), "fra");
    assert_eq!(normalize_to_part3("ger").unwrap(), "deu");

    // Case insensitivity and whitespace
    assert_eq!(normalize_to_part3("EN").unwrap(), "eng");
    assert_eq!(normalize_to_part3(" en ").unwrap(), "eng");

    assert!(normalize_to_part3("zz").is_err());
}

/// Test matching of different language code formats
#[test]
fn test_language_codes_match_withMatchingCodes_shouldReturnTrue() {
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("eng", "en"));
    assert!(language_codes_match("fr", "fra"));
    assert!(language_codes_match("fre", "fr"));
}

#[test]
fn test_language_codes_match_withDifferentCodes_shouldReturnFalse() {
    assert!(!language_codes_match("en", "fr"));
    assert!(!language_codes_match("eng", "spa"));
    assert!(!language_codes_match("en", "invalid"));
}

#[test]
fn test_get_language_name_withValidCodes_shouldReturnEnglishName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("fra").unwrap(), "French");
    assert!(get_language_name("xx").is_err());
}

#[test]
fn test_languageCodeType_display_shouldNameStandard() {
    assert_eq!(LanguageCodeType::Part1.to_string(), "ISO 639-1");
    assert_eq!(LanguageCodeType::Part3.to_string(), "ISO 639-3");
}
