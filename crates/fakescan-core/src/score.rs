//! Risk score accumulation and verdict mapping.

use rand::Rng;

use crate::model::{AnalysisResult, Verdict};

/// Indicator appended when no rule fired.
pub const NO_ANOMALIES: &str = "No strong anomalies detected by the current heuristic checks.";

const SUSPICIOUS_AT: f64 = 70.0;
const AUTHENTIC_AT: f64 = 40.0;
const REVIEW_CONFIDENCE: u8 = 60;

/// Map a raw risk score to a label and confidence.
///
/// The score is clamped to `[0, 100]` first. Scores at or above 70 are
/// `Suspicious` with confidence equal to the rounded score; scores at or
/// below 40 are `Likely Authentic` with confidence equal to the rounded
/// distance from 100; anything in between is `Needs Review` at a fixed 60.
/// Confidence is always within `[1, 99]`.
pub fn verdict_for(risk: f64) -> (Verdict, u8) {
    let clamped = if risk.is_nan() { 0.0 } else { risk.clamp(0.0, 100.0) };

    let (verdict, confidence) = if clamped >= SUSPICIOUS_AT {
        (Verdict::Suspicious, clamped.round_ties_even())
    } else if clamped <= AUTHENTIC_AT {
        (Verdict::LikelyAuthentic, (100.0 - clamped).round_ties_even())
    } else {
        (Verdict::NeedsReview, f64::from(REVIEW_CONFIDENCE))
    };

    (verdict, confidence.clamp(1.0, 99.0) as u8)
}

/// Running risk score plus the indicators explaining it.
#[derive(Debug, Clone)]
pub struct RiskScore {
    value: f64,
    indicators: Vec<String>,
}

impl RiskScore {
    pub fn new(base: f64) -> Self {
        Self {
            value: base,
            indicators: Vec::new(),
        }
    }

    /// Apply a rule: shift the score and record why.
    pub fn flag(&mut self, delta: f64, indicator: impl Into<String>) {
        self.value += delta;
        self.indicators.push(indicator.into());
    }

    /// Record an indicator without touching the score.
    pub fn note(&mut self, indicator: impl Into<String>) {
        self.indicators.push(indicator.into());
    }

    /// Add a uniform draw from `[-amplitude, amplitude]`.
    pub fn perturb<R: Rng + ?Sized>(&mut self, rng: &mut R, amplitude: f64) {
        if amplitude > 0.0 {
            self.value += rng.gen_range(-amplitude..=amplitude);
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn indicators(&self) -> &[String] {
        &self.indicators
    }

    pub fn finish(mut self) -> AnalysisResult {
        let (result, confidence) = verdict_for(self.value);
        if self.indicators.is_empty() {
            self.indicators.push(NO_ANOMALIES.to_string());
        }
        AnalysisResult {
            result,
            confidence,
            indicators: self.indicators,
        }
    }
}
