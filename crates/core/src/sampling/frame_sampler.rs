use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;

use crate::shared::constants::JPEG_QUALITY;
use crate::shared::face_box::PixelRegion;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum SampleError {
    #[error("JPEG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("crop produced an invalid buffer ({width}x{height})")]
    BadCrop { width: u32, height: u32 },
}

/// An encoded still ready for the prediction endpoint.
///
/// `data_url` is a `data:image/jpeg;base64,` string, the exact body format
/// the backend expects. Dimensions are those of the encoded crop.
#[derive(Clone, Debug)]
pub struct EncodedStill {
    pub data_url: String,
    pub width: u32,
    pub height: u32,
}

/// Extracts a still image from the current frame.
///
/// Crops to the given region (full frame when `None`), JPEG-encodes the
/// pixels, and wraps them as a data URL. An empty region short-circuits to
/// `Ok(None)`: the cycle must not reach the prediction client at all.
pub struct FrameSampler {
    quality: u8,
}

impl FrameSampler {
    pub fn new(quality: u8) -> Self {
        Self { quality }
    }

    pub fn sample(
        &self,
        frame: &Frame,
        region: Option<&PixelRegion>,
    ) -> Result<Option<EncodedStill>, SampleError> {
        let full = PixelRegion::full(frame);
        let region = region.copied().unwrap_or(full);
        if region.is_empty() {
            return Ok(None);
        }

        let (crop, w, h) = crop_rgb(frame, &region);
        if w == 0 || h == 0 {
            return Ok(None);
        }

        let img = image::RgbImage::from_raw(w, h, crop)
            .ok_or(SampleError::BadCrop { width: w, height: h })?;

        let mut jpeg = Vec::new();
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, self.quality)
            .encode_image(&img)?;

        let data_url = format!("data:image/jpeg;base64,{}", BASE64.encode(&jpeg));
        Ok(Some(EncodedStill {
            data_url,
            width: w,
            height: h,
        }))
    }
}

impl Default for FrameSampler {
    fn default() -> Self {
        Self::new(JPEG_QUALITY)
    }
}

/// Copies the region out of the frame row by row, re-clamping against the
/// frame in case the caller built the region by hand.
fn crop_rgb(frame: &Frame, region: &PixelRegion) -> (Vec<u8>, u32, u32) {
    let fw = frame.width() as usize;
    let fh = frame.height() as usize;
    let channels = frame.channels() as usize;
    let data = frame.data();

    let rx = region.x.max(0) as usize;
    let ry = region.y.max(0) as usize;
    let rw = (region.width.max(0) as usize).min(fw.saturating_sub(rx));
    let rh = (region.height.max(0) as usize).min(fh.saturating_sub(ry));

    let mut crop = Vec::with_capacity(rw * rh * channels);
    for row in 0..rh {
        let src_offset = ((ry + row) * fw + rx) * channels;
        crop.extend_from_slice(&data[src_offset..src_offset + rw * channels]);
    }
    (crop, rw as u32, rh as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

    fn gradient_frame(w: u32, h: u32) -> Frame {
        let mut data = Vec::with_capacity((w * h * 3) as usize);
        for y in 0..h {
            for x in 0..w {
                data.push((x % 256) as u8);
                data.push((y % 256) as u8);
                data.push(128);
            }
        }
        Frame::new(data, w, h, 3, 0)
    }

    fn decode_data_url(still: &EncodedStill) -> image::RgbImage {
        let b64 = still.data_url.strip_prefix(DATA_URL_PREFIX).unwrap();
        let jpeg = BASE64.decode(b64).unwrap();
        image::load_from_memory(&jpeg).unwrap().to_rgb8()
    }

    #[test]
    fn test_full_frame_sample_has_frame_dimensions() {
        let frame = gradient_frame(64, 48);
        let still = FrameSampler::default().sample(&frame, None).unwrap().unwrap();
        assert_eq!(still.width, 64);
        assert_eq!(still.height, 48);
        assert!(still.data_url.starts_with(DATA_URL_PREFIX));
    }

    #[test]
    fn test_cropped_sample_has_region_dimensions() {
        let frame = gradient_frame(64, 48);
        let region = PixelRegion {
            x: 10,
            y: 8,
            width: 20,
            height: 16,
        };
        let still = FrameSampler::default()
            .sample(&frame, Some(&region))
            .unwrap()
            .unwrap();
        assert_eq!(still.width, 20);
        assert_eq!(still.height, 16);
    }

    #[test]
    fn test_encode_decode_preserves_dimensions() {
        // The round trip that matters: the backend decodes the same pixel
        // grid the bounding-box conversion was computed against.
        let frame = gradient_frame(100, 80);
        let region = PixelRegion {
            x: 25,
            y: 10,
            width: 33,
            height: 41,
        };
        let still = FrameSampler::default()
            .sample(&frame, Some(&region))
            .unwrap()
            .unwrap();
        let decoded = decode_data_url(&still);
        assert_eq!(decoded.dimensions(), (33, 41));
    }

    #[test]
    fn test_empty_region_skips_encoding() {
        let frame = gradient_frame(64, 48);
        let region = PixelRegion {
            x: 10,
            y: 10,
            width: 0,
            height: 16,
        };
        let result = FrameSampler::default().sample(&frame, Some(&region)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_zero_height_region_skips_encoding() {
        let frame = gradient_frame(64, 48);
        let region = PixelRegion {
            x: 10,
            y: 10,
            width: 16,
            height: 0,
        };
        let result = FrameSampler::default().sample(&frame, Some(&region)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_region_exceeding_frame_is_clamped() {
        let frame = gradient_frame(32, 32);
        let region = PixelRegion {
            x: 20,
            y: 20,
            width: 100,
            height: 100,
        };
        let still = FrameSampler::default()
            .sample(&frame, Some(&region))
            .unwrap()
            .unwrap();
        assert_eq!(still.width, 12);
        assert_eq!(still.height, 12);
    }

    #[test]
    fn test_region_fully_outside_frame_skips() {
        let frame = gradient_frame(32, 32);
        let region = PixelRegion {
            x: 40,
            y: 40,
            width: 10,
            height: 10,
        };
        let result = FrameSampler::default().sample(&frame, Some(&region)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_crop_picks_the_right_pixels() {
        // 4x4 frame, red channel encodes the column index
        let frame = gradient_frame(4, 4);
        let region = PixelRegion {
            x: 2,
            y: 1,
            width: 2,
            height: 2,
        };
        let (crop, w, h) = crop_rgb(&frame, &region);
        assert_eq!((w, h), (2, 2));
        // First pixel of the crop is column 2 of the frame
        assert_eq!(crop[0], 2);
    }
}
