use std::sync::LazyLock;

/// Deterministic Hindi to Bhojpuri surface rewrite, applied to Google output
/// because Google cannot translate into Bhojpuri directly. Rules cover the
/// copula, pronouns, negation, tense auxiliaries, question words and modals.
///
/// Matching is plain substring replacement, longest pattern first, so that
/// compound auxiliaries win over their fragments ("रहा है" before "है").
const RULES: &[(&str, &str)] = &[
    // progressive and perfective auxiliaries
    ("हो रहा है", "होत बा"),
    ("हो रही है", "होत बिया"),
    ("हो रहे हैं", "होत बाड़ें"),
    ("कर रहा है", "करत बा"),
    ("कर रही है", "करत बिया"),
    ("कर रहे हैं", "करत बाड़ें"),
    ("रहा है", "रहल बा"),
    ("रही है", "रहल बिया"),
    ("रहे हैं", "रहल बाड़ें"),
    ("गया है", "गइल बा"),
    ("गई है", "गइल बिया"),
    ("गए हैं", "गइल बाड़ें"),
    ("किया है", "कइले बा"),
    ("की है", "कइले बिया"),
    ("किए हैं", "कइले बाड़ें"),
    // habitual present
    ("होता है", "होला"),
    ("होती है", "होले"),
    ("होते हैं", "होलें"),
    ("करता है", "करेला"),
    ("करती है", "करेले"),
    ("करते हैं", "करेलें"),
    // modals
    ("सकता है", "सकेला"),
    ("सकती है", "सकेली"),
    ("सकते हैं", "सकेलें"),
    ("चाहता है", "चाहेला"),
    ("चाहती है", "चाहेली"),
    ("चाहते हैं", "चाहेलें"),
    ("चाहिए", "चाहीं"),
    // negated copula
    ("नहीं है", "नइखे"),
    ("नहीं हैं", "नइखन"),
    // copula
    ("हैं", "बाड़ें"),
    ("है", "बा"),
    // past copula
    ("था", "रहल"),
    ("थी", "रहली"),
    ("थे", "रहलन"),
    // future auxiliaries
    ("होगा", "होई"),
    ("होगी", "होई"),
    ("होंगे", "होइहें"),
    ("करेगा", "करी"),
    ("करेगी", "करी"),
    ("करेंगे", "करिहें"),
    // pronouns and possessives
    ("मैं", "हम"),
    ("मुझे", "हमरा के"),
    ("मेरा", "हमार"),
    ("मेरी", "हमार"),
    ("मेरे", "हमरा"),
    ("हमारा", "हमनी के"),
    ("तुम्हारा", "तोहार"),
    ("तुम", "तू"),
    ("आपका", "राउर"),
    ("आप", "रउआ"),
    ("यह", "ई"),
    ("वह", "ऊ"),
    ("ये", "ई"),
    ("वो", "ऊ"),
    ("इसका", "एकर"),
    ("उसका", "ओकर"),
    // question words
    ("क्या", "का"),
    ("क्यों", "काहे"),
    ("कैसे", "कइसे"),
    ("कहाँ", "कहँवा"),
    ("कौन", "के"),
    ("कितना", "केतना"),
    ("कितने", "केतने"),
    // negation and particles
    ("नहीं", "ना"),
    ("मत", "जनि"),
    ("और", "अउरी"),
    ("अभी", "अबहीं"),
    ("यहाँ", "इहाँ"),
    ("वहाँ", "उहाँ"),
    ("लेकिन", "बाकिर"),
    ("क्योंकि", "काहेंकि"),
    ("बहुत", "बहुते"),
    ("थोड़ा", "तनी"),
    ("साथ", "संगे"),
    ("अच्छा", "बढ़िया"),
];

static ORDERED_RULES: LazyLock<Vec<(&'static str, &'static str)>> = LazyLock::new(|| {
    let mut rules = RULES.to_vec();
    rules.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));
    rules
});

pub fn rewrite_hindi_to_bhojpuri(text: &str) -> String {
    let mut result = text.to_string();
    for (hindi, bhojpuri) in ORDERED_RULES.iter() {
        if result.contains(hindi) {
            result = result.replace(hindi, bhojpuri);
        }
    }
    result
}

/// Number of rewrite rules, exposed for sanity checks.
pub fn rule_count() -> usize {
    RULES.len()
}
