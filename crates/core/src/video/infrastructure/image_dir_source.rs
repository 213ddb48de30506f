use std::path::{Path, PathBuf};

use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::Frame;
use crate::video::domain::frame_source::FrameSource;

/// Frame source over a directory of image files, in filename order.
///
/// Each file is decoded to 8-bit luma on demand. Non-image files are
/// ignored when listing the directory.
pub struct ImageDirSource {
    paths: Vec<PathBuf>,
    next_index: usize,
}

impl ImageDirSource {
    pub fn new(dir: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| is_image(path))
            .collect();
        paths.sort();
        Ok(Self {
            paths,
            next_index: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FrameSource for ImageDirSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let Some(path) = self.paths.get(self.next_index) else {
            return Ok(None);
        };
        let index = self.next_index;
        self.next_index += 1;

        let gray = image::open(path)?.to_luma8();
        let (width, height) = gray.dimensions();
        Ok(Some(Frame::new(gray.into_raw(), width, height, index)))
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
