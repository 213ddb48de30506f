use crate::shared::frame::Frame;

/// Bounding box of a detected face, in frame pixels.
#[derive(Clone, Debug)]
pub struct FaceRegion {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Backend-specific confidence score.
    pub score: f64,
}

/// Domain interface for face detection.
///
/// Implementations may be stateful (e.g., per-frame caches),
/// hence `&mut self`.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceRegion>, Box<dyn std::error::Error>>;
}
