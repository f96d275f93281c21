use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::capture::domain::capture_source::CaptureSource;
use crate::shared::capture_metadata::CaptureMetadata;
use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("cannot read frame directory {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no image files in {0}")]
    Empty(PathBuf),
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Adapts a directory of still images to the [`CaptureSource`] interface.
///
/// Files are decoded in lexical order, each becoming one frame; with
/// `repeat` the sequence cycles forever, simulating a live camera. Images
/// whose dimensions differ from the first are resized to match, so the
/// overlay surface keeps a single geometry for the whole session.
pub struct ImageDirSource {
    dir: PathBuf,
    repeat: bool,
    paths: Vec<PathBuf>,
    next_index: usize,
    cycle: u64,
    dims: Option<(u32, u32)>,
}

impl ImageDirSource {
    pub fn new(dir: impl Into<PathBuf>, repeat: bool) -> Self {
        Self {
            dir: dir.into(),
            repeat,
            paths: Vec::new(),
            next_index: 0,
            cycle: 0,
            dims: None,
        }
    }

    fn scan(&self) -> Result<Vec<PathBuf>, CaptureError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| CaptureError::Unreadable {
            path: self.dir.clone(),
            source: e,
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| is_image(p))
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(CaptureError::Empty(self.dir.clone()));
        }
        Ok(paths)
    }

    fn decode(&self, path: &Path) -> Result<Frame, CaptureError> {
        let img = image::open(path)
            .map_err(|e| CaptureError::Decode {
                path: path.to_path_buf(),
                source: e,
            })?
            .to_rgb8();

        let img = match self.dims {
            Some((w, h)) if img.dimensions() != (w, h) => {
                image::imageops::resize(&img, w, h, image::imageops::FilterType::Triangle)
            }
            _ => img,
        };

        let (w, h) = img.dimensions();
        Ok(Frame::new(img.into_raw(), w, h, 3, self.cycle))
    }

    fn next_frame(&mut self) -> Option<Result<Frame, Box<dyn std::error::Error>>> {
        if self.next_index >= self.paths.len() {
            if !self.repeat || self.paths.is_empty() {
                return None;
            }
            self.next_index = 0;
        }
        let path = self.paths[self.next_index].clone();
        self.next_index += 1;
        let result = self.decode(&path);
        if result.is_ok() {
            self.cycle += 1;
        }
        Some(result.map_err(Into::into))
    }
}

impl CaptureSource for ImageDirSource {
    fn open(&mut self) -> Result<CaptureMetadata, Box<dyn std::error::Error>> {
        self.paths = self.scan()?;
        self.next_index = 0;
        self.cycle = 0;

        // Probe the first image for the session geometry
        let first = self.decode(&self.paths[0])?;
        self.dims = Some((first.width(), first.height()));

        Ok(CaptureMetadata {
            width: first.width(),
            height: first.height(),
            fps: 0.0,
            total_frames: if self.repeat {
                None
            } else {
                Some(self.paths.len())
            },
            source_path: Some(self.dir.clone()),
        })
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        Box::new(std::iter::from_fn(move || self.next_frame()))
    }

    fn close(&mut self) {
        self.paths.clear();
        self.next_index = 0;
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
