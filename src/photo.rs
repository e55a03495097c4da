// src/photo.rs
//! Upload-time validation for the optional profile photo.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::{BuilderError, Result};

const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];

// 10MB cap, matching the upload control
const MAX_PHOTO_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoFormat {
    Png,
    Jpeg,
}

impl PhotoFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            PhotoFormat::Png => "image/png",
            PhotoFormat::Jpeg => "image/jpeg",
        }
    }
}

/// Validate an uploaded photo by signature. The resume renders fine without
/// a photo, so callers may treat failures as a rejected upload only.
pub fn validate_photo(bytes: &[u8]) -> Result<PhotoFormat> {
    if bytes.is_empty() {
        return Err(BuilderError::InvalidPhoto(
            "photo file is empty".to_string(),
        ));
    }

    if bytes.len() > MAX_PHOTO_BYTES {
        return Err(BuilderError::InvalidPhoto(format!(
            "photo too large: {:.1}MB (max 10MB)",
            bytes.len() as f64 / 1024.0 / 1024.0
        )));
    }

    if bytes.len() < 8 {
        return Err(BuilderError::InvalidPhoto(
            "photo file too small or corrupted".to_string(),
        ));
    }

    if bytes.starts_with(PNG_SIGNATURE) {
        Ok(PhotoFormat::Png)
    } else if bytes.starts_with(JPEG_SIGNATURE) {
        Ok(PhotoFormat::Jpeg)
    } else {
        Err(BuilderError::InvalidPhoto(
            "unsupported photo format, use PNG or JPEG".to_string(),
        ))
    }
}

/// Build the inline preview string shown next to the upload control.
pub fn preview_data_url(bytes: &[u8], format: PhotoFormat) -> String {
    format!("data:{};base64,{}", format.mime_type(), BASE64.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes() -> Vec<u8> {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&[0u8; 16]);
        bytes
    }

    #[test]
    fn test_validate_photo_by_signature() {
        assert_eq!(validate_photo(&png_bytes()).unwrap(), PhotoFormat::Png);

        let mut jpeg = JPEG_SIGNATURE.to_vec();
        jpeg.extend_from_slice(&[0u8; 16]);
        assert_eq!(validate_photo(&jpeg).unwrap(), PhotoFormat::Jpeg);
    }

    #[test]
    fn test_validate_photo_rejects_garbage() {
        assert!(validate_photo(&[]).is_err());
        assert!(validate_photo(&[1, 2, 3]).is_err());
        assert!(validate_photo(&[0u8; 64]).is_err());
    }

    #[test]
    fn test_validate_photo_rejects_oversized() {
        let mut bytes = png_bytes();
        bytes.resize(MAX_PHOTO_BYTES + 1, 0);
        let err = validate_photo(&bytes).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_preview_data_url_prefix() {
        let url = preview_data_url(&png_bytes(), PhotoFormat::Png);
        assert!(url.starts_with("data:image/png;base64,"));
    }
}
