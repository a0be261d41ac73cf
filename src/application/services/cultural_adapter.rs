use std::collections::BTreeMap;

use crate::domain::LanguageTag;

/// Post-translation pass that swaps literal renderings for locally
/// expected phrasing. Course-provided rules run first and take priority;
/// a small built-in courtesy table per language fills the gaps.
pub struct CulturalAdapter;

const HINDI_COURTESY: &[(&str, &str)] = &[
    ("धन्यवाद", "शुक्रिया"),
    ("कृपया ध्यान दें", "ज़रा ध्यान दीजिए"),
];

const URDU_COURTESY: &[(&str, &str)] = &[("شکریہ ادا کرتے ہیں", "شکر گزار ہیں")];

const NEPALI_COURTESY: &[(&str, &str)] = &[("धन्यवाद छ", "धन्यवाद")];

impl CulturalAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn adapt(
        &self,
        text: &str,
        target: &LanguageTag,
        rules: &BTreeMap<String, String>,
    ) -> String {
        let mut result = text.to_string();
        for (literal, preferred) in rules {
            if literal.is_empty() || literal == preferred {
                continue;
            }
            result = result.replace(literal.as_str(), preferred.as_str());
        }
        for (literal, preferred) in builtin_rules(target) {
            if rules.contains_key(*literal) {
                continue;
            }
            result = result.replace(literal, preferred);
        }
        result
    }
}

impl Default for CulturalAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin_rules(target: &LanguageTag) -> &'static [(&'static str, &'static str)] {
    match target.base() {
        "hi" | "bho" | "mai" | "mwr" | "bgc" | "doi" => HINDI_COURTESY,
        "ur" | "ks" | "sd" => URDU_COURTESY,
        "ne" => NEPALI_COURTESY,
        _ => &[],
    }
}
