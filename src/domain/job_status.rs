use std::fmt;
use std::str::FromStr;

/// States of the dubbing state machine. Transitions are linear and strictly
/// forward; any failure moves the job to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Init,
    Chunked,
    FannedOut,
    Assembled,
    Muxed,
    Published,
    ManifestWritten,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Init => "INIT",
            JobStatus::Chunked => "CHUNKED",
            JobStatus::FannedOut => "FANNED_OUT",
            JobStatus::Assembled => "ASSEMBLED",
            JobStatus::Muxed => "MUXED",
            JobStatus::Published => "PUBLISHED",
            JobStatus::ManifestWritten => "MANIFEST_WRITTEN",
            JobStatus::Failed => "FAILED",
        }
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INIT" => Ok(JobStatus::Init),
            "CHUNKED" => Ok(JobStatus::Chunked),
            "FANNED_OUT" => Ok(JobStatus::FannedOut),
            "ASSEMBLED" => Ok(JobStatus::Assembled),
            "MUXED" => Ok(JobStatus::Muxed),
            "PUBLISHED" => Ok(JobStatus::Published),
            "MANIFEST_WRITTEN" => Ok(JobStatus::ManifestWritten),
            "FAILED" => Ok(JobStatus::Failed),
            _ => Err(format!("Invalid job status: {}", s)),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
