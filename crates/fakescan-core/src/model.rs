//! Analysis domain models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome category returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Suspicious")]
    Suspicious,
    #[serde(rename = "Needs Review")]
    NeedsReview,
    #[serde(rename = "Likely Authentic")]
    LikelyAuthentic,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Suspicious => "Suspicious",
            Verdict::NeedsReview => "Needs Review",
            Verdict::LikelyAuthentic => "Likely Authentic",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The verdict for a single upload.
///
/// `indicators` keeps the order in which the heuristic rules fired and is
/// never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub result: Verdict,
    pub confidence: u8,
    pub indicators: Vec<String>,
}

/// Kind of media an upload was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Image => f.write_str("image"),
            MediaKind::Video => f.write_str("video"),
        }
    }
}

/// A submitted file as received from the transport layer.
#[derive(Debug, Clone, Copy)]
pub struct Upload<'a> {
    pub filename: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> Upload<'a> {
    pub fn new(filename: Option<&'a str>, content_type: Option<&'a str>, data: &'a [u8]) -> Self {
        Self {
            filename,
            content_type,
            data,
        }
    }
}
