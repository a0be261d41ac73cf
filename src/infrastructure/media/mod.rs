mod ffmpeg;
mod mock_toolkit;

pub use ffmpeg::FfmpegToolkit;
pub use mock_toolkit::MockMediaToolkit;
