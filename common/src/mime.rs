//! MIMEタイプ判定

use crate::error::{Error, Result};

/// カメラ撮影画像のMIMEタイプ
pub const JPEG_MIME: &str = "image/jpeg";

/// `image/` で始まるMIMEタイプか
pub fn is_image_mime(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}

/// 画像以外のMIMEタイプを拒否
pub fn validate_image_mime(mime: &str) -> Result<()> {
    if is_image_mime(mime) {
        Ok(())
    } else {
        Err(Error::InvalidFileType(mime.to_string()))
    }
}
