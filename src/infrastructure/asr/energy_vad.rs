/// Energy-based edge trimming. Removes leading and trailing silence so the
/// recognizer does not waste windows on dead air, while reporting how much
/// leading audio was dropped so segment timestamps can be shifted back.
pub struct EnergyVad {
    threshold: f32,
    frame_samples: usize,
}

const DEFAULT_RMS_THRESHOLD: f32 = 0.008;
const DEFAULT_FRAME_SAMPLES: usize = 480;

impl EnergyVad {
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_RMS_THRESHOLD,
            frame_samples: DEFAULT_FRAME_SAMPLES,
        }
    }

    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            threshold,
            frame_samples: DEFAULT_FRAME_SAMPLES,
        }
    }

    /// Returns the voiced middle of `pcm` plus the seconds of leading audio
    /// that were trimmed away. All-silent input yields an empty slice.
    pub fn trim_edges<'a>(&self, pcm: &'a [f32], sample_rate: u32) -> (&'a [f32], f64) {
        if pcm.is_empty() {
            return (pcm, 0.0);
        }

        let frame_count = pcm.len().div_ceil(self.frame_samples);
        let mut first_voiced: Option<usize> = None;
        let mut last_voiced: Option<usize> = None;

        for frame_idx in 0..frame_count {
            let start = frame_idx * self.frame_samples;
            let end = (start + self.frame_samples).min(pcm.len());
            if rms(&pcm[start..end]) >= self.threshold {
                if first_voiced.is_none() {
                    first_voiced = Some(frame_idx);
                }
                last_voiced = Some(frame_idx);
            }
        }

        let (Some(first), Some(last)) = (first_voiced, last_voiced) else {
            return (&pcm[0..0], 0.0);
        };

        // keep one frame of padding on each side so onsets survive
        let start_frame = first.saturating_sub(1);
        let start = start_frame * self.frame_samples;
        let end = ((last + 2) * self.frame_samples).min(pcm.len());

        let leading_secs = start as f64 / sample_rate as f64;
        (&pcm[start..end], leading_secs)
    }
}

impl Default for EnergyVad {
    fn default() -> Self {
        Self::new()
    }
}

fn rms(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = frame.iter().map(|s| s * s).sum();
    (sum_sq / frame.len() as f32).sqrt()
}
