use std::str::FromStr;

use malacca::domain::LanguageTag;

#[test]
fn given_regional_tag_when_taking_base_then_subtag_before_dash_is_returned() {
    let tag = LanguageTag::new("hi-IN");
    assert_eq!(tag.base(), "hi");
    assert_eq!(tag.as_str(), "hi-IN");
}

#[test]
fn given_plain_tag_when_taking_base_then_whole_tag_is_returned() {
    let tag = LanguageTag::new("bho");
    assert_eq!(tag.base(), "bho");
}

#[test]
fn given_known_tag_when_asking_display_name_then_english_name_is_returned() {
    assert_eq!(LanguageTag::new("hi").display_name(), "Hindi");
    assert_eq!(LanguageTag::new("bho-IN").display_name(), "Bhojpuri");
}

#[test]
fn given_unknown_tag_when_asking_display_name_then_raw_code_is_returned() {
    let tag = LanguageTag::new("xx-YY");
    assert_eq!(tag.display_name(), "xx-YY");
}

#[test]
fn given_gemini_preferred_targets_when_checking_single_pass_then_true() {
    for code in ["brx", "doi", "ks", "kok", "mai", "mni", "sat", "mwr", "bgc"] {
        assert!(
            LanguageTag::new(code).is_single_pass_target(),
            "{code} should be single-pass"
        );
    }
}

#[test]
fn given_bhojpuri_when_checking_single_pass_then_false() {
    // Bhojpuri routes through Google plus the dialect rewrite, not Gemini.
    assert!(!LanguageTag::new("bho").is_single_pass_target());
    assert!(!LanguageTag::new("hi").is_single_pass_target());
}

#[test]
fn given_extended_set_when_checking_google_extended_then_true() {
    for code in ["as", "ne", "sa", "sd", "ur"] {
        assert!(
            LanguageTag::new(code).is_google_extended(),
            "{code} should be google-extended"
        );
    }
    assert!(!LanguageTag::new("hi").is_google_extended());
}

#[test]
fn given_bhojpuri_when_asking_google_code_then_hindi_is_returned() {
    assert_eq!(LanguageTag::new("bho").google_code(), "hi");
    assert_eq!(LanguageTag::new("ta").google_code(), "ta");
    assert_eq!(LanguageTag::new("ur-IN").google_code(), "ur");
}

#[test]
fn given_uncovered_languages_when_asking_basic_tts_code_then_relative_is_borrowed() {
    assert_eq!(LanguageTag::new("mwr").basic_tts_code(), "hi");
    assert_eq!(LanguageTag::new("bho").basic_tts_code(), "hi");
    assert_eq!(LanguageTag::new("sa").basic_tts_code(), "hi");
    assert_eq!(LanguageTag::new("ks").basic_tts_code(), "ur");
    assert_eq!(LanguageTag::new("sd").basic_tts_code(), "ur");
    assert_eq!(LanguageTag::new("ta").basic_tts_code(), "ta");
}

#[test]
fn given_valid_string_when_parsing_then_tag_is_accepted() {
    let tag = LanguageTag::from_str(" hi-IN ").unwrap();
    assert_eq!(tag.as_str(), "hi-IN");
}

#[test]
fn given_empty_or_garbage_string_when_parsing_then_error_is_returned() {
    assert!(LanguageTag::from_str("").is_err());
    assert!(LanguageTag::from_str("   ").is_err());
    assert!(LanguageTag::from_str("hi_IN").is_err());
    assert!(LanguageTag::from_str("hi IN").is_err());
}
