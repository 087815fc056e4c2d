//! Custom protocol handlers for efficient data transfer
//!
//! This module implements the `frame://` custom protocol for direct binary
//! transfer of render frames, bypassing Tauri's IPC JSON serialization.

use bevy::log::{debug, error};
use image::{codecs::jpeg::JpegEncoder, ImageBuffer, ImageEncoder, Rgba};
use tauri::http::Response as HttpResponse;

use super::shared_state::{SharedFrameBuffer, SharedPerfStats};
use crate::config::{compression::JPEG_QUALITY, RENDER_HEIGHT, RENDER_WIDTH};

type Response = HttpResponse<Vec<u8>>;

/// Handle requests to the custom `frame://` protocol
///
/// Supported endpoints:
/// - `frame` or `frame.jpg`: JPEG-compressed frame
/// - `frame.raw`: Raw RGBA frame
/// - `stats`: Performance statistics as JSON
pub fn handle_frame_protocol(
    uri_path: &str,
    buffer: &SharedFrameBuffer,
    perf_stats: &SharedPerfStats,
) -> Response {
    let resource = uri_path.trim_start_matches('/');
    debug!("[Protocol] Resolved resource: {}", resource);

    match resource {
        "frame" | "frame.jpg" => with_frame(buffer, |rgba| match encode_jpeg(rgba) {
            Ok(jpeg) => frame_response("image/jpeg", jpeg),
            Err(message) => {
                error!("[Protocol] {message}");
                respond(500, "text/plain", message.into_bytes())
            }
        }),
        "frame.raw" => with_frame(buffer, |rgba| {
            frame_response("application/octet-stream", rgba.to_vec())
        }),
        "stats" => {
            let json = match perf_stats.0.lock() {
                Ok(stats) => serde_json::to_vec(&*stats).unwrap_or_default(),
                Err(_) => Vec::new(),
            };
            respond(200, "application/json", json)
        }
        _ => respond(404, "text/plain", b"Not Found".to_vec()),
    }
}

/// Run `f` on the latest frame, or answer 503 while none exists
fn with_frame(buffer: &SharedFrameBuffer, f: impl FnOnce(&[u8]) -> Response) -> Response {
    let Ok(guard) = buffer.0.lock() else {
        return respond(500, "text/plain", b"Frame buffer poisoned".to_vec());
    };
    match &*guard {
        Some(rgba) => f(rgba),
        None => respond(503, "text/plain", b"Frame not ready".to_vec()),
    }
}

/// Compress an RGBA frame to JPEG (no alpha channel)
fn encode_jpeg(rgba: &[u8]) -> Result<Vec<u8>, String> {
    let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(RENDER_WIDTH, RENDER_HEIGHT, rgba.to_vec())
            .ok_or_else(|| format!("Frame has unexpected size {} bytes", rgba.len()))?;
    let rgb = image::DynamicImage::ImageRgba8(img).to_rgb8();

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .write_image(
            rgb.as_raw(),
            RENDER_WIDTH,
            RENDER_HEIGHT,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| format!("JPEG encoding failed: {e}"))?;
    Ok(jpeg)
}

fn frame_response(content_type: &str, body: Vec<u8>) -> Response {
    HttpResponse::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("X-Frame-Width", RENDER_WIDTH.to_string())
        .header("X-Frame-Height", RENDER_HEIGHT.to_string())
        .header("Access-Control-Allow-Origin", "*")
        .header(
            "Access-Control-Expose-Headers",
            "X-Frame-Width, X-Frame-Height",
        )
        .body(body)
        .unwrap_or_else(|_| HttpResponse::new(Vec::new()))
}

fn respond(status: u16, content_type: &str, body: Vec<u8>) -> Response {
    HttpResponse::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Access-Control-Allow-Origin", "*")
        .body(body)
        .unwrap_or_else(|_| HttpResponse::new(Vec::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_frame_is_service_unavailable() {
        let buffer = SharedFrameBuffer::default();
        let stats = SharedPerfStats::default();
        let response = handle_frame_protocol("/frame", &buffer, &stats);
        assert_eq!(response.status(), 503);
    }

    #[test]
    fn raw_frame_is_served_as_is() {
        let buffer = SharedFrameBuffer::default();
        let stats = SharedPerfStats::default();
        *buffer.0.lock().unwrap() = Some(vec![1, 2, 3, 4]);

        let response = handle_frame_protocol("/frame.raw", &buffer, &stats);
        assert_eq!(response.status(), 200);
        assert_eq!(response.body(), &vec![1, 2, 3, 4]);
    }

    #[test]
    fn jpeg_frame_is_encoded() {
        let buffer = SharedFrameBuffer::default();
        let stats = SharedPerfStats::default();
        *buffer.0.lock().unwrap() = Some(vec![128; (RENDER_WIDTH * RENDER_HEIGHT * 4) as usize]);

        let response = handle_frame_protocol("frame.jpg", &buffer, &stats);
        assert_eq!(response.status(), 200);
        assert_eq!(&response.body()[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn truncated_frame_is_an_error_not_a_panic() {
        let buffer = SharedFrameBuffer::default();
        let stats = SharedPerfStats::default();
        *buffer.0.lock().unwrap() = Some(vec![0; 16]);

        let response = handle_frame_protocol("frame", &buffer, &stats);
        assert_eq!(response.status(), 500);
    }

    #[test]
    fn stats_and_unknown_paths() {
        let buffer = SharedFrameBuffer::default();
        let stats = SharedPerfStats::default();
        let response = handle_frame_protocol("/stats", &buffer, &stats);
        assert_eq!(response.status(), 200);
        let json: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(json["frame_count"], 0);

        assert_eq!(handle_frame_protocol("/nope", &buffer, &stats).status(), 404);
    }
}
