use crate::shared::frame::Frame;

/// Domain interface for a stream of grayscale frames.
///
/// `Ok(None)` signals the end of the stream. Acquisition details (files,
/// devices) live entirely in infrastructure implementations.
pub trait FrameSource: Send {
    fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;
}
