use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use tracing::{info, warn};

use crate::error::ScheduleError;

/// Side of the square canvas sponsor images are placed on.
pub const SPONSOR_IMAGE_SIZE: u32 = 1200;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// An encoded image ready for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBlob {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Scale `source` to fit a `size`×`size` white square, centred, and encode it as PNG.
pub fn normalize_image(source: &DynamicImage, size: u32) -> Result<Vec<u8>, ScheduleError> {
    let (width, height) = (source.width(), source.height());
    if width == 0 || height == 0 || size == 0 {
        return Err(ScheduleError::Image(image::ImageError::Parameter(
            image::error::ParameterError::from_kind(image::error::ParameterErrorKind::DimensionMismatch),
        )));
    }

    let (fit_width, fit_height) = if width >= height {
        (size, ((u64::from(size) * u64::from(height)) / u64::from(width)).max(1) as u32)
    } else {
        (((u64::from(size) * u64::from(width)) / u64::from(height)).max(1) as u32, size)
    };
    let resized = imageops::resize(&source.to_rgba8(), fit_width, fit_height, FilterType::Lanczos3);

    let mut canvas = RgbaImage::from_pixel(size, size, Rgba([255, 255, 255, 255]));
    let x = i64::from((size - fit_width) / 2);
    let y = i64::from((size - fit_height) / 2);
    imageops::overlay(&mut canvas, &resized, x, y);

    let flattened = DynamicImage::ImageRgba8(canvas).to_rgb8();
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(flattened).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Normalize every sponsor image in `dir`, in file-name order.
///
/// Files that cannot be read or decoded are skipped; a missing directory yields nothing.
pub fn load_sponsor_images(dir: &Path, size: u32) -> Vec<ImageBlob> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "Sponsor directory not readable; no images");
            return Vec::new();
        }
    };

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && has_image_extension(path))
        .collect();
    paths.sort();
    info!(count = paths.len(), dir = %dir.display(), "Sponsor images found");

    let mut blobs = Vec::with_capacity(paths.len());
    for path in paths {
        let normalized = image::open(&path)
            .map_err(ScheduleError::from)
            .and_then(|img| normalize_image(&img, size));
        match normalized {
            Ok(bytes) => {
                let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("sponsor");
                info!(path = %path.display(), kib = bytes.len() / 1024, "Sponsor image normalized");
                blobs.push(ImageBlob { file_name: format!("resized_{stem}.png"), bytes });
            }
            Err(e) => warn!(path = %path.display(), error = %e, "Skipping sponsor image"),
        }
    }
    blobs
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}
