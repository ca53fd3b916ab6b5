//! Best-effort image header inspection.

use std::io::Cursor;

use ::image::{ColorType, ImageDecoder, ImageError, ImageFormat, ImageReader};
use thiserror::Error;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const PNG_COLOR_TYPE_OFFSET: usize = 25;
/// IHDR colour types: indexed, grey + alpha, RGB + alpha.
const PNG_LAYERED_COLOR_TYPES: [u8; 3] = [3, 4, 6];

/// Why an image could not be inspected.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("unrecognised image format")]
    UnknownFormat,

    #[error("image has a zero dimension ({width}x{height})")]
    EmptyDimensions { width: u32, height: u32 },

    #[error("read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("decode error: {0}")]
    Decode(#[from] ImageError),
}

/// Properties read from an image header.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageProbe {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    /// Layout as reported by the decoder, after any palette expansion.
    pub color: ColorType,
    /// Stored as palette, luminance-alpha, or with an alpha channel.
    pub layered_channels: bool,
    /// Embedded EXIF capture metadata with at least one field.
    pub capture_metadata: bool,
}

impl ImageProbe {
    pub fn megapixels(&self) -> f64 {
        f64::from(self.width) * f64::from(self.height) / 1_000_000.0
    }

    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Read dimensions, colour layout and metadata presence without decoding pixels.
pub fn probe(data: &[u8]) -> Result<ImageProbe, ProbeError> {
    let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
    let format = reader.format().ok_or(ProbeError::UnknownFormat)?;

    let decoder = reader.into_decoder()?;
    let (width, height) = decoder.dimensions();
    let color = decoder.color_type();

    if width == 0 || height == 0 {
        return Err(ProbeError::EmptyDimensions { width, height });
    }

    Ok(ImageProbe {
        format,
        width,
        height,
        color,
        layered_channels: stored_layered(format, color, data),
        capture_metadata: carries_exif(format) && has_capture_metadata(data),
    })
}

/// Decoders expand palettes and transparency chunks, so PNG and GIF are
/// judged by how the file stores its pixels.
fn stored_layered(format: ImageFormat, color: ColorType, data: &[u8]) -> bool {
    match format {
        ImageFormat::Png => png_color_type(data)
            .map(|ct| PNG_LAYERED_COLOR_TYPES.contains(&ct))
            .unwrap_or(false),
        ImageFormat::Gif => true,
        _ => color.has_alpha(),
    }
}

/// IHDR colour type of a PNG stream.
fn png_color_type(data: &[u8]) -> Option<u8> {
    if !data.starts_with(PNG_SIGNATURE) || data.get(12..16) != Some(b"IHDR".as_slice()) {
        return None;
    }
    data.get(PNG_COLOR_TYPE_OFFSET).copied()
}

/// Containers whose EXIF block counts as capture metadata.
fn carries_exif(format: ImageFormat) -> bool {
    matches!(format, ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP)
}

fn has_capture_metadata(data: &[u8]) -> bool {
    let mut cursor = Cursor::new(data);
    match exif::Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif.fields().next().is_some(),
        // Not an error - many images don't carry EXIF
        Err(_) => false,
    }
}
