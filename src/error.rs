use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LensError {
    #[error("Camera access denied. Please allow camera permissions.")]
    PermissionDenied,

    #[error("Camera unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Please upload an image file (got {0})")]
    InvalidFileType(String),

    #[error("Failed to capture image: {0}")]
    CaptureFailed(String),

    #[error("Classification failed: {0}")]
    ClassificationFailed(String),

    #[error("Item detail lookup failed: {0}")]
    DetailLookupFailed(String),

    #[error("{stage} timed out after {after:?}")]
    Timeout { stage: &'static str, after: Duration },

    #[error("Processing in progress. Please wait.")]
    Busy,

    #[error("Camera is not ready. Retake or upload an image instead.")]
    CameraNotReady,

    #[error("Capture was replaced by a newer action.")]
    Superseded,

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(waste_lens_common::Error),
}

impl From<waste_lens_common::Error> for LensError {
    fn from(err: waste_lens_common::Error) -> Self {
        match err {
            waste_lens_common::Error::InvalidFileType(mime) => LensError::InvalidFileType(mime),
            other => LensError::Common(other),
        }
    }
}

impl LensError {
    /// 画面に出す1行メッセージ
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            "Processing failed".to_string()
        } else {
            message
        }
    }

    /// 状態を変えずに拒否された操作か
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            LensError::Busy | LensError::CameraNotReady | LensError::Superseded
        )
    }
}

pub type Result<T> = std::result::Result<T, LensError>;
