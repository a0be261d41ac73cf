/// Decomposition of a duration ratio into ffmpeg `atempo` stages.
///
/// A single `atempo` filter only accepts factors in [0.5, 2.0], so larger
/// corrections are expressed as a chain whose product equals the ratio.
/// Ratios within 1% of unity collapse to a single no-op stage so that
/// healthy chunks are never re-resampled.
#[derive(Debug, Clone, PartialEq)]
pub struct StretchPlan {
    ratio: f64,
    stages: Vec<f64>,
}

const UNITY_TOLERANCE: f64 = 0.01;
const STAGE_MAX: f64 = 2.0;
const STAGE_MIN: f64 = 0.5;

impl StretchPlan {
    /// `ratio` is `source_duration / target_duration`: above 1.0 the audio
    /// must speed up, below 1.0 it must slow down.
    pub fn for_ratio(ratio: f64) -> Self {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Self {
                ratio: 1.0,
                stages: vec![1.0],
            };
        }

        if (ratio - 1.0).abs() < UNITY_TOLERANCE {
            return Self {
                ratio,
                stages: vec![1.0],
            };
        }

        let mut stages = Vec::new();
        let mut remaining = ratio;
        while remaining > STAGE_MAX {
            stages.push(STAGE_MAX);
            remaining /= STAGE_MAX;
        }
        while remaining < STAGE_MIN {
            stages.push(STAGE_MIN);
            remaining /= STAGE_MIN;
        }
        stages.push(remaining);

        Self { ratio, stages }
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn stages(&self) -> &[f64] {
        &self.stages
    }

    pub fn is_unit(&self) -> bool {
        self.stages == [1.0]
    }
}
