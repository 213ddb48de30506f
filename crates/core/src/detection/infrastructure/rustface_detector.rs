use std::path::Path;

use crate::detection::domain::face_detector::{FaceDetector, FaceRegion};
use crate::shared::frame::Frame;

/// Face detector backed by the `rustface` crate (SeetaFace engine).
///
/// The model is loaded once at construction; a detector instance is built
/// per call from a clone of the model because the underlying detector is
/// not `Send`. Detection parameters match the noisy-webcam use: small
/// minimum face size, moderate score threshold.
pub struct RustfaceDetector {
    model: rustface::Model,
}

impl RustfaceDetector {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let bytes = std::fs::read(model_path)?;
        let model = rustface::read_model(std::io::Cursor::new(bytes))?;
        Ok(Self { model })
    }
}

impl FaceDetector for RustfaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceRegion>, Box<dyn std::error::Error>> {
        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(20);
        detector.set_score_thresh(2.0);
        detector.set_pyramid_scale_factor(0.8);
        detector.set_slide_window_step(4, 4);

        let image = rustface::ImageData::new(frame.data(), frame.width(), frame.height());
        let faces = detector.detect(&image);

        Ok(faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceRegion {
                    x: bbox.x(),
                    y: bbox.y(),
                    width: bbox.width(),
                    height: bbox.height(),
                    score: face.score(),
                }
            })
            .collect())
    }
}
