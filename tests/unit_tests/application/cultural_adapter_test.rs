use std::collections::BTreeMap;

use malacca::application::services::CulturalAdapter;
use malacca::domain::LanguageTag;

fn rules(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(literal, preferred)| (literal.to_string(), preferred.to_string()))
        .collect()
}

#[test]
fn given_course_rule_when_adapting_then_literal_phrasing_is_swapped() {
    let adapter = CulturalAdapter::new();
    let rules = rules(&[("विद्यार्थी", "छात्र")]);

    let result = adapter.adapt("हर विद्यार्थी ध्यान दे", &LanguageTag::new("hi"), &rules);

    assert_eq!(result, "हर छात्र ध्यान दे");
}

#[test]
fn given_hindi_target_when_adapting_then_builtin_courtesy_applies() {
    let adapter = CulturalAdapter::new();

    let result = adapter.adapt("धन्यवाद", &LanguageTag::new("hi"), &BTreeMap::new());

    assert_eq!(result, "शुक्रिया");
}

#[test]
fn given_course_rule_for_builtin_literal_when_adapting_then_course_rule_wins() {
    let adapter = CulturalAdapter::new();
    let rules = rules(&[("धन्यवाद", "आभार")]);

    let result = adapter.adapt("धन्यवाद", &LanguageTag::new("hi"), &rules);

    assert_eq!(result, "आभार");
}

#[test]
fn given_bhojpuri_target_when_adapting_then_hindi_courtesy_table_is_shared() {
    let adapter = CulturalAdapter::new();

    let result = adapter.adapt("धन्यवाद", &LanguageTag::new("bho"), &BTreeMap::new());

    assert_eq!(result, "शुक्रिया");
}

#[test]
fn given_unrelated_target_when_adapting_then_no_builtin_rules_fire() {
    let adapter = CulturalAdapter::new();

    let result = adapter.adapt("धन्यवाद", &LanguageTag::new("ta"), &BTreeMap::new());

    assert_eq!(result, "धन्यवाद");
}

#[test]
fn given_identity_or_empty_rule_when_adapting_then_it_is_skipped() {
    let adapter = CulturalAdapter::new();
    let rules = rules(&[("", "ghost"), ("same", "same")]);

    let result = adapter.adapt("same text", &LanguageTag::new("en"), &rules);

    assert_eq!(result, "same text");
}
