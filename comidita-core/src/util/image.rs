use std::io::Cursor;

use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, ImageFormat};
use thiserror::Error;

use crate::entities::ImageFile;

pub const MAX_IMAGE_FILE_SIZE: usize = 10 * 1024 * 1024;

pub const ALLOWED_CONTENT_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/webp", "image/gif"];

pub const ALLOWED_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".webp", ".gif"];

pub const COMPRESSED_CONTENT_TYPE: &str = "image/jpeg";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageInvalidation {
    #[error("The file is empty")]
    Empty,
    #[error("Unsupported image type '{0}', allowed are JPEG, PNG, WebP and GIF")]
    ContentType(String),
    #[error("Unsupported file extension of '{0}', allowed are .jpg, .jpeg, .png, .webp and .gif")]
    Extension(String),
    #[error("The file is too large ({size} bytes), the maximum is {max} bytes")]
    TooLarge { size: usize, max: usize },
    #[error("The file content is not a valid image")]
    UnrecognizedContent,
    #[error("The file content ({detected}) does not match its type ({declared})")]
    ContentMismatch {
        declared: String,
        detected: &'static str,
    },
}

fn normalized_content_type(content_type: &str) -> String {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if essence == "image/jpg" {
        "image/jpeg".to_string()
    } else {
        essence
    }
}

fn is_allowed_format(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP | ImageFormat::Gif
    )
}

/// Checks type, name, size and content of an uploaded image.
pub fn validate_image_file(file: &ImageFile) -> Result<(), ImageInvalidation> {
    if file.data.is_empty() {
        return Err(ImageInvalidation::Empty);
    }
    let content_type = normalized_content_type(&file.content_type);
    if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
        return Err(ImageInvalidation::ContentType(file.content_type.clone()));
    }
    let file_name = file.file_name.to_ascii_lowercase();
    if !ALLOWED_EXTENSIONS.iter().any(|ext| file_name.ends_with(ext)) {
        return Err(ImageInvalidation::Extension(file.file_name.clone()));
    }
    if file.size() > MAX_IMAGE_FILE_SIZE {
        return Err(ImageInvalidation::TooLarge {
            size: file.size(),
            max: MAX_IMAGE_FILE_SIZE,
        });
    }
    let format = image::guess_format(&file.data)
        .ok()
        .filter(|format| is_allowed_format(*format))
        .ok_or(ImageInvalidation::UnrecognizedContent)?;
    let detected = format.to_mime_type();
    if detected != content_type {
        return Err(ImageInvalidation::ContentMismatch {
            declared: file.content_type.clone(),
            detected,
        });
    }
    Ok(())
}

/// Fits the dimensions into the bounding box preserving the aspect ratio.
///
/// Images are never enlarged.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }
    let aspect_ratio = f64::from(width) / f64::from(height);
    let mut w = f64::from(width);
    let mut h = f64::from(height);
    if w > f64::from(max_width) {
        w = f64::from(max_width);
        h = w / aspect_ratio;
    }
    if h > f64::from(max_height) {
        h = f64::from(max_height);
        w = h * aspect_ratio;
    }
    ((w.round() as u32).max(1), (h.round() as u32).max(1))
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionOptions {
    pub max_width       : u32,
    pub max_height      : u32,
    pub initial_quality : u8,
    pub quality_step    : u8,
    pub min_quality     : u8,
    pub max_size_bytes  : usize,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            max_width: 800,
            max_height: 600,
            initial_quality: 85,
            quality_step: 10,
            min_quality: 10,
            max_size_bytes: 400 * 1024,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct CompressedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub quality: u8,
}

impl std::fmt::Debug for CompressedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompressedImage")
            .field("size", &self.data.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("quality", &self.quality)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
}

/// Resizes the image into the configured bounding box and re-encodes
/// it as JPEG, lowering the quality step by step until the result
/// is small enough or the minimum quality has been reached.
pub fn compress_image(
    file: &ImageFile,
    options: &CompressionOptions,
) -> Result<CompressedImage, CompressionError> {
    let img = image::load_from_memory(&file.data).map_err(CompressionError::Decode)?;
    let (width, height) = fit_within(
        img.width(),
        img.height(),
        options.max_width,
        options.max_height,
    );
    let img = if (width, height) == (img.width(), img.height()) {
        img
    } else {
        img.resize_exact(width, height, FilterType::Triangle)
    };
    let rgb = img.to_rgb8();
    let step = options.quality_step.max(1);
    let min_quality = options.min_quality.max(1);
    let mut quality = options.initial_quality.clamp(1, 100);
    loop {
        let mut data = Vec::new();
        let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut data), quality);
        rgb.write_with_encoder(encoder)
            .map_err(CompressionError::Encode)?;
        if data.len() <= options.max_size_bytes || quality <= min_quality {
            log::debug!(
                "Compressed {} ({} bytes) into {}x{} JPEG with quality {} ({} bytes)",
                file.file_name,
                file.size(),
                width,
                height,
                quality,
                data.len()
            );
            return Ok(CompressedImage {
                data,
                width,
                height,
                quality,
            });
        }
        quality = quality.saturating_sub(step).max(1);
    }
}
