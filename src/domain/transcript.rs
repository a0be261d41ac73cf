/// One recognized span of speech, timestamped in seconds relative to the
/// audio that was transcribed (not the global timeline).
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transcript {
    pub text: String,
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    pub fn new(text: String, segments: Vec<TranscriptSegment>) -> Self {
        Self { text, segments }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
