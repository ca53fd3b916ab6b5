//! Video heuristics. Only the byte count and filename are inspected.

use rand::Rng;

use crate::model::AnalysisResult;
use crate::score::RiskScore;

const BASE_RISK: f64 = 55.0;
const JITTER: f64 = 6.0;

const SMALL_MB: f64 = 1.0;
const LARGE_MB: f64 = 200.0;
const TYPICAL_MB: std::ops::RangeInclusive<f64> = 5.0..=60.0;
const SCREEN_HINTS: [&str; 2] = ["screen", "capture"];

pub const SMALL_FILE: &str =
    "Very small video file size, which can suggest heavy compression or synthetic content.";
pub const LARGE_FILE: &str =
    "Very large video file that may contain multiple processing or export passes.";
pub const TYPICAL_SIZE: &str =
    "File size falls within a typical range for short-form captures from consumer devices.";
pub const SCREEN_RECORDING: &str =
    "Filename hints at screen recording, which can be used to relay synthetic content.";

/// Score an uploaded video from its size in bytes and its filename.
pub fn analyze_video<R: Rng + ?Sized>(size_bytes: usize, filename: &str, rng: &mut R) -> AnalysisResult {
    let size_mb = size_bytes as f64 / (1024.0 * 1024.0);
    let mut score = RiskScore::new(BASE_RISK);

    if size_mb < SMALL_MB {
        score.flag(12.0, SMALL_FILE);
    } else if size_mb > LARGE_MB {
        score.flag(8.0, LARGE_FILE);
    }

    if TYPICAL_MB.contains(&size_mb) {
        score.flag(-5.0, TYPICAL_SIZE);
    }

    let name = filename.to_lowercase();
    if SCREEN_HINTS.iter().any(|hint| name.contains(hint)) {
        score.flag(4.0, SCREEN_RECORDING);
    }

    score.perturb(rng, JITTER);
    score.finish()
}
