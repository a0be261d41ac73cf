/// Caller preference for neural voice selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceGender {
    Female,
    Male,
    Any,
}

impl VoiceGender {
    /// Compare against the gender string a voice catalog reports.
    pub fn accepts(&self, catalog_gender: &str) -> bool {
        match self {
            VoiceGender::Any => true,
            VoiceGender::Female => catalog_gender.eq_ignore_ascii_case("female"),
            VoiceGender::Male => catalog_gender.eq_ignore_ascii_case("male"),
        }
    }
}

impl Default for VoiceGender {
    fn default() -> Self {
        VoiceGender::Female
    }
}
