//! fakescan Web Server
//!
//! Axum-based HTTP service exposing the media analysis endpoint.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::{extract::DefaultBodyLimit, routing::post, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::ServerConfig;
use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.config.max_upload_bytes();

    Router::new()
        .route("/analyze", post(routes::analyze::analyze))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;
    let addr = config.bind_addr();
    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use fakescan_core::upload::{EMPTY_FILE, MISSING_FILE, UNSUPPORTED_FILE};
    use serde_json::Value;
    use std::io::Cursor;
    use tower::ServiceExt;

    const BOUNDARY: &str = "fakescan-test-boundary";

    fn app() -> Router {
        create_router(AppState::new(ServerConfig {
            seed: Some(11),
            ..ServerConfig::default()
        }))
    }

    fn tiny_jpeg() -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(image::RgbImage::new(1, 1))
            .write_to(&mut buf, image::ImageFormat::Jpeg)
            .unwrap();
        buf.into_inner()
    }

    fn multipart_body(
        field: &str,
        filename: Option<&str>,
        content_type: Option<&str>,
        data: &[u8],
    ) -> Vec<u8> {
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", field);
        if let Some(name) = filename {
            disposition.push_str(&format!("; filename=\"{}\"", name));
        }

        let mut body = format!("--{}\r\n{}\r\n", BOUNDARY, disposition).into_bytes();
        if let Some(ct) = content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", ct).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn upload_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_analyze_image() {
        let body = multipart_body("file", Some("face.jpg"), Some("image/jpeg"), &tiny_jpeg());
        let (status, json) = send(app(), upload_request(body)).await;

        assert_eq!(status, StatusCode::OK);
        let indicators: Vec<&str> = json["indicators"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(
            indicators,
            vec![
                fakescan_core::analysis::image::LOW_RESOLUTION,
                fakescan_core::analysis::image::MISSING_METADATA,
            ]
        );
        let confidence = json["confidence"].as_u64().unwrap();
        assert!((1..=99).contains(&confidence));
        assert!(json["result"].is_string());
    }

    #[tokio::test]
    async fn test_analyze_video() {
        let body = multipart_body("file", Some("clip.mp4"), Some("video/mp4"), &[7u8; 4096]);
        let (status, json) = send(app(), upload_request(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["indicators"][0],
            fakescan_core::analysis::video::SMALL_FILE
        );
    }

    #[tokio::test]
    async fn test_seeded_responses_repeat() {
        let body = multipart_body("file", Some("clip.mp4"), None, &[1u8; 128]);
        let (_, first) = send(app(), upload_request(body.clone())).await;
        let (_, second) = send(app(), upload_request(body)).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_empty_upload() {
        let body = multipart_body("file", Some("face.jpg"), Some("image/jpeg"), b"");
        let (status, json) = send(app(), upload_request(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["detail"], EMPTY_FILE);
    }

    #[tokio::test]
    async fn test_unsupported_type() {
        let body = multipart_body("file", Some("notes"), Some("text/plain"), b"hello");
        let (status, json) = send(app(), upload_request(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["detail"], UNSUPPORTED_FILE);
    }

    #[tokio::test]
    async fn test_missing_file_field() {
        let body = multipart_body("attachment", Some("face.jpg"), None, b"abc");
        let (status, json) = send(app(), upload_request(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["detail"], MISSING_FILE);
    }

    #[tokio::test]
    async fn test_missing_filename() {
        let body = multipart_body("file", None, None, b"abc");
        let (status, json) = send(app(), upload_request(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["detail"], MISSING_FILE);
    }

    #[tokio::test]
    async fn test_non_multipart_body() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let (status, json) = send(app(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["detail"].is_string());
    }

    #[tokio::test]
    async fn test_upload_limit() {
        let app = create_router(AppState::new(ServerConfig {
            max_upload_mb: 1,
            ..ServerConfig::default()
        }));
        let body = multipart_body("file", Some("big.mp4"), None, &vec![0u8; 2 * 1024 * 1024]);
        let (status, _) = send(app, upload_request(body)).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/analyze")
            .header(header::ORIGIN, "https://example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
        assert!(!response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_CREDENTIALS));
    }

    #[tokio::test]
    async fn test_get_not_allowed() {
        let request = Request::builder()
            .uri("/analyze")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
