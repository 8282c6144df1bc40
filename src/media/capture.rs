use super::camera::{CameraSession, RawFrame};
use crate::error::{LensError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use std::sync::Arc;
use tracing::debug;
use waste_lens_common::JPEG_MIME;

/// 撮影またはアップロードされた画像
///
/// 生成後は変更しない。プレビュー用にData URLを保持する。
#[derive(Clone, PartialEq, Eq)]
pub struct CapturedImage {
    bytes: Arc<[u8]>,
    mime_type: String,
    file_name: String,
    preview: String,
}

impl CapturedImage {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>, file_name: impl Into<String>) -> Self {
        let mime_type = mime_type.into();
        let preview = format!("data:{};base64,{}", mime_type, STANDARD.encode(&bytes));
        Self {
            bytes: bytes.into(),
            mime_type,
            file_name: file_name.into(),
            preview,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Data URL形式のプレビュー
    pub fn preview(&self) -> &str {
        &self.preview
    }
}

impl std::fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturedImage")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// 現在のフレームをJPEGで切り出す
///
/// セッションは成否にかかわらずここで閉じる。
pub async fn capture_frame(mut session: CameraSession, quality: u8) -> Result<CapturedImage> {
    let frame = session.grab_frame().await;
    session.close();

    let bytes = encode_jpeg(&frame?, quality)?;
    debug!("captured frame: {} bytes", bytes.len());

    Ok(CapturedImage::new(bytes, JPEG_MIME, "captured-image.jpg"))
}

/// RGBフレームをJPEGにエンコード
pub fn encode_jpeg(frame: &RawFrame, quality: u8) -> Result<Vec<u8>> {
    if frame.width == 0 || frame.height == 0 {
        return Err(LensError::CaptureFailed("frame has no pixels".into()));
    }

    let image = RgbImage::from_raw(frame.width, frame.height, frame.rgb.clone()).ok_or_else(|| {
        LensError::CaptureFailed(format!(
            "frame buffer size mismatch: {}x{} with {} bytes",
            frame.width,
            frame.height,
            frame.rgb.len()
        ))
    })?;

    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100))
        .encode_image(&image)
        .map_err(|e| LensError::CaptureFailed(e.to_string()))?;

    if bytes.is_empty() {
        return Err(LensError::CaptureFailed("encoder produced no data".into()));
    }

    Ok(bytes)
}
