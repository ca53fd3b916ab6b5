//! Heuristic media analysis (images and videos).

pub mod image;
pub mod probe;
pub mod video;

pub use self::image::analyze_image;
pub use self::probe::{probe, ImageProbe, ProbeError};
pub use self::video::analyze_video;
