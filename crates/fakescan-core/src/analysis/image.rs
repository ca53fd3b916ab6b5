//! Image heuristics.

use rand::Rng;
use tracing::debug;

use super::probe::{probe, ImageProbe};
use crate::model::AnalysisResult;
use crate::score::RiskScore;

const BASE_RISK: f64 = 50.0;
const JITTER: f64 = 5.0;

const MIN_SIDE: u32 = 400;
const DENSE_MEGAPIXELS: f64 = 4.0;
const DENSE_MAX_KB: f64 = 300.0;
const WIDE_RATIO: f64 = 2.0;
const TALL_RATIO: f64 = 0.5;
const LARGE_PNG_KB: f64 = 4096.0;

pub const LOW_RESOLUTION: &str =
    "Unusually low resolution imagery that can hide blending artifacts.";
pub const DENSE_COMPRESSION: &str =
    "High resolution with aggressive compression, which can mask generation patterns.";
pub const ODD_ASPECT_RATIO: &str =
    "Non-standard aspect ratio that may indicate recomposed or stitched content.";
pub const MISSING_METADATA: &str =
    "Missing camera metadata, often seen when content is exported or heavily edited.";
pub const METADATA_PRESENT: &str =
    "Camera metadata present, which is more common for organic captures.";
pub const LAYERED_CHANNELS: &str =
    "Complex channel structure that can result from layered editing or compositing.";
pub const INSPECTION_FALLBACK: &str =
    "Basic analysis fallback used; detailed image inspection unavailable.";
pub const LARGE_PNG: &str =
    "Very large PNG file, suggesting export from creative tools rather than direct capture.";

/// Score an uploaded image.
///
/// `filename` is expected lower-cased; only its extension is consulted.
pub fn analyze_image<R: Rng + ?Sized>(data: &[u8], filename: &str, rng: &mut R) -> AnalysisResult {
    let size_kb = data.len() as f64 / 1024.0;
    let mut score = RiskScore::new(BASE_RISK);

    match probe(data) {
        Ok(image) => {
            debug!(
                filename,
                format = ?image.format,
                width = image.width,
                height = image.height,
                color = ?image.color,
                "Inspected image header"
            );
            score_probe(&mut score, &image, size_kb)
        }
        Err(e) => {
            debug!(filename, error = %e, "Image inspection failed, using fallback");
            score.note(INSPECTION_FALLBACK);
        }
    }

    if extension(filename) == Some("png") && size_kb > LARGE_PNG_KB {
        score.flag(6.0, LARGE_PNG);
    }

    score.perturb(rng, JITTER);
    score.finish()
}

fn score_probe(score: &mut RiskScore, image: &ImageProbe, size_kb: f64) {
    if image.width < MIN_SIDE || image.height < MIN_SIDE {
        score.flag(8.0, LOW_RESOLUTION);
    } else if image.megapixels() > DENSE_MEGAPIXELS && size_kb < DENSE_MAX_KB {
        score.flag(14.0, DENSE_COMPRESSION);
    }

    let ratio = image.aspect_ratio();
    if ratio > WIDE_RATIO || ratio < TALL_RATIO {
        score.flag(6.0, ODD_ASPECT_RATIO);
    }

    if image.capture_metadata {
        score.flag(-5.0, METADATA_PRESENT);
    } else {
        score.flag(6.0, MISSING_METADATA);
    }

    if image.layered_channels {
        score.flag(4.0, LAYERED_CHANNELS);
    }
}

/// Text after the last dot, if any.
fn extension(filename: &str) -> Option<&str> {
    filename.rsplit_once('.').map(|(_, ext)| ext)
}
