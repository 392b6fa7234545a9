// src/services/issue_slip.rs

// Foto do comprovante de retirada -> data URI para gravar junto do uso.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::common::error::AppError;

pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

pub fn encode(content_type: Option<&str>, bytes: &[u8]) -> Result<String, AppError> {
    let mime = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .filter(|ct| ct.starts_with("image/"))
        .ok_or(AppError::NotAnImage)?;

    if bytes.is_empty() {
        return Err(AppError::NotAnImage);
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(AppError::ImageTooLarge);
    }

    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_becomes_data_uri() {
        let uri = encode(Some("image/png"), b"\x89PNG").unwrap();
        assert_eq!(uri, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn content_type_parameters_are_dropped() {
        let uri = encode(Some("Image/JPEG; charset=binary"), b"abc").unwrap();
        assert!(uri.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn non_images_are_refused() {
        assert!(matches!(encode(Some("application/pdf"), b"%PDF"), Err(AppError::NotAnImage)));
        assert!(matches!(encode(None, b"abc"), Err(AppError::NotAnImage)));
    }

    #[test]
    fn two_megabytes_is_the_limit() {
        let at_limit = vec![0u8; MAX_IMAGE_BYTES];
        assert!(encode(Some("image/png"), &at_limit).is_ok());

        let over = vec![0u8; MAX_IMAGE_BYTES + 1];
        assert!(matches!(encode(Some("image/png"), &over), Err(AppError::ImageTooLarge)));
    }
}
