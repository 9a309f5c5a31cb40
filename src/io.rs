use crate::components::dialogs::SaveFormat;
use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ImageError, ImageFormat, RgbImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default JPEG quality when none is given.
pub const DEFAULT_QUALITY: u8 = 90;

/// Format and size of a decoded file, for the info line under the preview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    /// `None` when the content did not match a known signature.
    pub format: Option<ImageFormat>,
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    pub fn format_label(&self) -> String {
        match self.format {
            Some(ImageFormat::Png) => "PNG".to_string(),
            Some(ImageFormat::Jpeg) => "JPEG".to_string(),
            Some(ImageFormat::Bmp) => "BMP".to_string(),
            Some(ImageFormat::Gif) => "GIF".to_string(),
            Some(other) => format!("{:?}", other).to_uppercase(),
            None => "Unknown".to_string(),
        }
    }
}

impl std::fmt::Display for ImageInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Format: {} | Size: {} x {} px",
            self.format_label(),
            self.width,
            self.height
        )
    }
}

/// A decoded image reduced to RGB, plus where it came from.
#[derive(Clone, Debug)]
pub struct LoadedImage {
    pub pixels: RgbImage,
    pub info: ImageInfo,
    pub path: PathBuf,
}

// ============================================================================
// LOADING
// ============================================================================

/// Decode any supported raster file (PNG, JPEG, BMP, GIF first frame) and
/// drop alpha. The format is sniffed from content, not the extension.
pub fn load_rgb(path: &Path) -> Result<LoadedImage, ImageError> {
    let reader = image::io::Reader::open(path)?.with_guessed_format()?;
    let format = reader.format();
    let decoded = reader.decode()?;
    let pixels = decoded.to_rgb8();

    Ok(LoadedImage {
        info: ImageInfo {
            format,
            width: pixels.width(),
            height: pixels.height(),
        },
        pixels,
        path: path.to_path_buf(),
    })
}

// ============================================================================
// ENCODING
// ============================================================================

/// Encode and write an RGB image to a file.
///
/// The buffered writer is flushed before returning, so a full disk or a
/// failing device surfaces here as an error. On any error the partially
/// written file is removed.
pub fn encode_and_write(
    image: &RgbImage,
    path: &Path,
    format: SaveFormat,
    quality: u8,
) -> Result<(), ImageError> {
    let file = File::create(path)?;
    let result = write_encoded(image, BufWriter::new(file), format, quality);
    if result.is_err() && std::fs::metadata(path).is_ok_and(|m| m.is_file()) {
        let _ = std::fs::remove_file(path);
    }
    result
}

fn write_encoded<W: Write>(
    image: &RgbImage,
    mut writer: BufWriter<W>,
    format: SaveFormat,
    quality: u8,
) -> Result<(), ImageError> {
    match format {
        SaveFormat::Png => {
            let encoder = PngEncoder::new(&mut writer);
            #[allow(deprecated)]
            encoder.encode(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ColorType::Rgb8,
            )?;
        }
        SaveFormat::Jpeg => {
            let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100));
            encoder.encode(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ColorType::Rgb8,
            )?;
        }
        SaveFormat::Bmp => {
            let mut encoder = BmpEncoder::new(&mut writer);
            encoder.encode(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ColorType::Rgb8,
            )?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Append `.png` when the user typed a file name without an extension.
pub fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(SaveFormat::default().extension())
    }
}
