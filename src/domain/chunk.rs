use std::path::PathBuf;

/// One fixed-duration window of the source media. Consecutive chunks start
/// `chunk_length - overlap` seconds apart; the index is dense and zero-based.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub index: u32,
    pub start: f64,
    pub end: f64,
    pub video_path: PathBuf,
    pub audio_path: PathBuf,
}

impl Chunk {
    pub fn new(index: u32, start: f64, end: f64, video_path: PathBuf, audio_path: PathBuf) -> Self {
        Self {
            index,
            start,
            end,
            video_path,
            audio_path,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}
