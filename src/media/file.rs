use super::capture::CapturedImage;
use crate::error::Result;
use image::ImageFormat;
use std::path::Path;
use waste_lens_common::validate_image_mime;

const UNKNOWN_MIME: &str = "application/octet-stream";

/// 利用者が選んだファイル
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// ディスク上のファイルを読み込む（MIMEタイプは拡張子から判定）
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self::new(name, mime_from_path(path), bytes))
    }
}

fn mime_from_path(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(UNKNOWN_MIME)
}

/// 画像ファイルのみ受け付ける
pub fn accept_file(file: SelectedFile) -> Result<CapturedImage> {
    validate_image_mime(&file.mime_type)?;
    Ok(CapturedImage::new(file.bytes, file.mime_type, file.name))
}
