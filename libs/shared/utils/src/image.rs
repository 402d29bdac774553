//! Base64 data-URL helpers for doctor avatars and hospital images.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;
use tracing::debug;

const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a base64 data URL")]
    NotDataUrl,

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

pub fn encode_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Reads a file and returns it as a `data:<mime>;base64,...` URL.
pub async fn file_to_data_url(path: impl AsRef<Path>) -> Result<String, ImageError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let mime = mime_for_path(path).unwrap_or(FALLBACK_MIME);
    debug!("Encoded {} bytes from {} as {}", bytes.len(), path.display(), mime);
    Ok(encode_data_url(&bytes, mime))
}

pub fn is_data_url(value: &str) -> bool {
    value.starts_with("data:") && value.contains(";base64,")
}

/// Splits a data URL into its MIME type and decoded bytes.
pub fn decode_data_url(value: &str) -> Result<(String, Vec<u8>), ImageError> {
    let rest = value.strip_prefix("data:").ok_or(ImageError::NotDataUrl)?;
    let (mime, payload) = rest.split_once(";base64,").ok_or(ImageError::NotDataUrl)?;
    let bytes = STANDARD.decode(payload)?;
    Ok((mime.to_string(), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn encode_and_decode_data_url() {
        let url = encode_data_url(b"\x89PNG", "image/png");
        assert!(url.starts_with("data:image/png;base64,"));
        assert!(is_data_url(&url));

        let (mime, bytes) = decode_data_url(&url).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, b"\x89PNG");
    }

    #[test]
    fn rejects_plain_urls() {
        assert!(!is_data_url("https://cdn.example.com/a.png"));
        assert_matches!(decode_data_url("https://cdn.example.com/a.png"), Err(ImageError::NotDataUrl));
        assert_matches!(decode_data_url("data:image/png;base64,@@@"), Err(ImageError::Base64(_)));
    }

    #[test]
    fn mime_from_extension() {
        assert_eq!(mime_for_path(Path::new("avatar.JPG")), Some("image/jpeg"));
        assert_eq!(mime_for_path(Path::new("notes.txt")), None);
        assert_eq!(mime_for_path(Path::new("noext")), None);
    }

    #[tokio::test]
    async fn reads_file_into_data_url() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"img-bytes").unwrap();

        let url = file_to_data_url(file.path()).await.unwrap();
        let (mime, bytes) = decode_data_url(&url).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, b"img-bytes");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let result = file_to_data_url("/definitely/not/here.png").await;
        assert_matches!(result, Err(ImageError::Io(_)));
    }
}
