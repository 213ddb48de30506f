use crate::detection::domain::face_detector::FaceDetector;
use crate::presence::domain::presence_source::PresenceSource;
use crate::video::domain::frame_source::FrameSource;

/// Adapts a frame stream plus a face detector into a presence stream.
///
/// A frame counts as "present" when the detector finds at least one face
/// in it; region geometry is discarded at this boundary.
pub struct DetectorPresenceSource {
    frames: Box<dyn FrameSource>,
    detector: Box<dyn FaceDetector>,
}

impl DetectorPresenceSource {
    pub fn new(frames: Box<dyn FrameSource>, detector: Box<dyn FaceDetector>) -> Self {
        Self { frames, detector }
    }
}

impl PresenceSource for DetectorPresenceSource {
    fn next_sample(&mut self) -> Result<Option<bool>, Box<dyn std::error::Error>> {
        let Some(frame) = self.frames.next_frame()? else {
            return Ok(None);
        };
        let faces = self.detector.detect(&frame)?;
        log::debug!("frame {}: {} face(s)", frame.index(), faces.len());
        Ok(Some(!faces.is_empty()))
    }
}
