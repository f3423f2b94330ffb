pub mod caption;
pub mod ffmpeg;
pub mod live_renderer;
pub mod session;
pub mod video_exporter;

pub use caption::{
    caption_prompt, describe_or_fallback, CaptionService, HttpCaptionService, EMPTY_CAPTION,
    FALLBACK_CAPTION,
};
pub use ffmpeg::{is_ffmpeg_on_path, FfmpegSink};
pub use live_renderer::{LiveRenderer, RevealPhase, TickOutcome};
pub use session::Session;
pub use video_exporter::{
    ExportOutput, ExportSettings, Frame, FrameSink, FrameSpec, MemorySink, VideoExporter,
};
