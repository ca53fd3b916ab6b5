//! fakescan Core Library
//!
//! Upload classification and heuristic media scoring for the fakescan service.

pub mod analysis;
pub mod error;
pub mod model;
pub mod score;
pub mod upload;

pub use error::{DetectError, DetectResult};
pub use model::{AnalysisResult, MediaKind, Upload, Verdict};
pub use upload::{analyze_upload, classify};
