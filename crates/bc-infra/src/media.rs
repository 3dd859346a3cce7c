//! Upload preparation for animal photos and shelter logos.
//!
//! Every image leaves the device as a JPEG: center-cropped to an allowed
//! aspect ratio, downscaled to a maximum edge and re-encoded.

use anyhow::{Context, Result};
use image::{imageops::FilterType, DynamicImage, GenericImageView};

use bc_core::form::FileRef;

const JPEG_MIME: &str = "image/jpeg";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePreparer {
    max_edge: u32,
    /// Widest accepted width/height ratio; its inverse bounds portraits.
    max_aspect: f64,
    quality: u8,
}

impl ImagePreparer {
    pub fn new(max_edge: u32, max_aspect: f64, quality: u8) -> Self {
        Self {
            max_edge,
            max_aspect: max_aspect.max(1.0),
            quality: quality.clamp(1, 100),
        }
    }

    /// Animal gallery photos: up to 16:9 either way, 1600px.
    pub fn photo() -> Self {
        Self::new(1600, 16.0 / 9.0, 85)
    }

    /// Shelter logos: square, 512px.
    pub fn logo() -> Self {
        Self::new(512, 1.0, 90)
    }

    pub fn prepare(&self, file: &FileRef) -> Result<FileRef> {
        let decoded = image::load_from_memory(&file.bytes)
            .with_context(|| format!("decode image {}", file.file_name))?;
        let cropped = self.crop(decoded);
        let (width, height) = cropped.dimensions();
        let (target_width, target_height) = calculate_target_size(width, height, self.max_edge);
        let resized = if (target_width, target_height) == (width, height) {
            cropped
        } else {
            cropped.resize_exact(target_width, target_height, FilterType::Triangle)
        };

        let rgb = resized.to_rgb8();
        let mut bytes = Vec::new();
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, self.quality)
            .encode_image(&rgb)
            .with_context(|| format!("encode {} as jpeg", file.file_name))?;

        Ok(FileRef::new(jpeg_name(&file.file_name), JPEG_MIME, bytes))
    }

    fn crop(&self, image: DynamicImage) -> DynamicImage {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return image;
        }
        let ratio = width as f64 / height as f64;
        if ratio > self.max_aspect {
            let kept = ((height as f64) * self.max_aspect).round() as u32;
            let kept = kept.clamp(1, width);
            image.crop_imm((width - kept) / 2, 0, kept, height)
        } else if ratio < 1.0 / self.max_aspect {
            let kept = ((width as f64) * self.max_aspect).round() as u32;
            let kept = kept.clamp(1, height);
            image.crop_imm(0, (height - kept) / 2, width, kept)
        } else {
            image
        }
    }
}

fn calculate_target_size(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width <= max_edge && height <= max_edge {
        return (width, height);
    }

    if width >= height {
        let scaled_height = ((height as f64) * (max_edge as f64) / (width as f64)).round() as u32;
        (max_edge, scaled_height.max(1))
    } else {
        let scaled_width = ((width as f64) * (max_edge as f64) / (height as f64)).round() as u32;
        (scaled_width.max(1), max_edge)
    }
}

fn jpeg_name(original: &str) -> String {
    let stem = original
        .rsplit_once('.')
        .map_or(original, |(stem, _)| stem)
        .trim();
    if stem.is_empty() {
        "image.jpg".to_string()
    } else {
        format!("{stem}.jpg")
    }
}
