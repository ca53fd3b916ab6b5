//! Upload validation and dispatch.

use rand::Rng;
use tracing::debug;

use crate::analysis::{analyze_image, analyze_video};
use crate::error::{DetectError, DetectResult};
use crate::model::{AnalysisResult, MediaKind, Upload};

pub const MISSING_FILE: &str = "No file was provided.";
pub const EMPTY_FILE: &str = "Uploaded file is empty.";
pub const UNSUPPORTED_FILE: &str = "Unsupported file type. Use JPG, PNG, or MP4.";

const IMAGE_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];
const VIDEO_EXTENSIONS: [&str; 1] = [".mp4"];

/// Validate an upload and decide which scorer handles it.
///
/// Images win when both the content type and the extension could match.
pub fn classify(upload: &Upload<'_>) -> DetectResult<MediaKind> {
    let filename = required_filename(upload)?;
    if upload.data.is_empty() {
        return Err(DetectError::invalid_request(EMPTY_FILE));
    }
    kind_of(&filename.to_lowercase(), upload.content_type)
}

/// Validate, classify and score an upload.
pub fn analyze_upload<R: Rng + ?Sized>(
    upload: &Upload<'_>,
    rng: &mut R,
) -> DetectResult<AnalysisResult> {
    let kind = classify(upload)?;
    let filename = required_filename(upload)?.to_lowercase();
    debug!(%kind, filename = %filename, bytes = upload.data.len(), "Dispatching upload");

    Ok(match kind {
        MediaKind::Image => analyze_image(upload.data, &filename, rng),
        MediaKind::Video => analyze_video(upload.data.len(), &filename, rng),
    })
}

fn required_filename<'a>(upload: &Upload<'a>) -> DetectResult<&'a str> {
    match upload.filename {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(DetectError::invalid_request(MISSING_FILE)),
    }
}

fn kind_of(filename: &str, content_type: Option<&str>) -> DetectResult<MediaKind> {
    let content_type = content_type.unwrap_or_default().to_lowercase();

    if content_type.contains("image") || IMAGE_EXTENSIONS.iter().any(|ext| filename.ends_with(ext)) {
        return Ok(MediaKind::Image);
    }
    if content_type.contains("video") || VIDEO_EXTENSIONS.iter().any(|ext| filename.ends_with(ext)) {
        return Ok(MediaKind::Video);
    }
    Err(DetectError::unsupported(UNSUPPORTED_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::probe::tests::jpeg;
    use crate::analysis::{image, video};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1)
    }

    #[test]
    fn test_missing_filename() {
        for name in [None, Some("")] {
            let err = classify(&Upload::new(name, Some("image/png"), b"abc")).unwrap_err();
            assert!(matches!(err, DetectError::InvalidRequest(ref m) if m == MISSING_FILE));
        }
    }

    #[test]
    fn test_empty_upload_rejected_regardless_of_name() {
        for name in ["a.jpg", "b.mp4", "notes.txt", "noext"] {
            let err = classify(&Upload::new(Some(name), None, b"")).unwrap_err();
            assert!(matches!(err, DetectError::InvalidRequest(ref m) if m == EMPTY_FILE));
        }
    }

    #[test]
    fn test_unsupported_type() {
        let err = classify(&Upload::new(Some("README"), Some("text/plain"), b"x")).unwrap_err();
        assert!(matches!(err, DetectError::UnsupportedType(_)));
        assert_eq!(err.to_string(), UNSUPPORTED_FILE);
        assert!(err.is_client_error());
    }

    #[test]
    fn test_classification_by_extension() {
        let cases = [
            ("PHOTO.JPG", MediaKind::Image),
            ("a.jpeg", MediaKind::Image),
            ("b.png", MediaKind::Image),
            ("clip.Mp4", MediaKind::Video),
        ];
        for (name, expected) in cases {
            assert_eq!(classify(&Upload::new(Some(name), None, b"x")).unwrap(), expected);
        }
    }

    #[test]
    fn test_classification_by_content_type() {
        let image = Upload::new(Some("blob"), Some("IMAGE/WEBP"), b"x");
        assert_eq!(classify(&image).unwrap(), MediaKind::Image);

        let video = Upload::new(Some("blob"), Some("video/quicktime"), b"x");
        assert_eq!(classify(&video).unwrap(), MediaKind::Video);
    }

    #[test]
    fn test_image_checked_before_video() {
        let upload = Upload::new(Some("frame.png"), Some("video/mp4"), b"x");
        assert_eq!(classify(&upload).unwrap(), MediaKind::Image);
    }

    #[test]
    fn test_dispatches_to_image_scorer() {
        let data = jpeg(1, 1);
        let result = analyze_upload(&Upload::new(Some("Face.JPG"), Some("image/jpeg"), &data), &mut rng()).unwrap();
        assert!(result.indicators.iter().any(|i| i == image::LOW_RESOLUTION));
        assert!(result.indicators.iter().any(|i| i == image::MISSING_METADATA));
    }

    #[test]
    fn test_dispatches_to_video_scorer() {
        let data = vec![1u8; 2048];
        let upload = Upload::new(Some("ScreenRecording.mp4"), None, &data);
        let result = analyze_upload(&upload, &mut rng()).unwrap();
        assert_eq!(result.indicators, vec![video::SMALL_FILE, video::SCREEN_RECORDING]);
    }
}
