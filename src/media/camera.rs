//! カメラセッション
//!
//! `CameraSession` は開いているストリームを1つだけ所有し、
//! `close()` または `Drop` のどちらか最初の1回でトラックを停止する。

use crate::error::{LensError, Result};
use async_trait::async_trait;
use std::fmt;
use tracing::{debug, warn};

/// カメラの向き
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacingMode {
    /// 背面カメラ
    #[default]
    Environment,
    /// 前面カメラ
    User,
}

/// 未圧縮のRGB8フレーム
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

/// 開いている映像ストリーム
#[async_trait]
pub trait VideoStream: Send {
    /// 現在のフレームを取得
    async fn grab_frame(&mut self) -> Result<RawFrame>;

    /// 全トラックを停止
    fn stop_tracks(&mut self);
}

/// ストリームを開くためのカメラ機能
#[async_trait]
pub trait CameraDevice: Send + Sync {
    async fn open_stream(&self, facing: FacingMode) -> Result<Box<dyn VideoStream>>;
}

pub struct CameraSession {
    stream: Option<Box<dyn VideoStream>>,
}

impl CameraSession {
    pub fn new(stream: Box<dyn VideoStream>) -> Self {
        Self { stream: Some(stream) }
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// トラックを停止（何度呼んでもよい）
    pub fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop_tracks();
            debug!("camera session closed");
        }
    }

    pub(crate) async fn grab_frame(&mut self) -> Result<RawFrame> {
        match self.stream.as_mut() {
            Some(stream) => stream.grab_frame().await,
            None => Err(LensError::CaptureFailed("camera session is closed".into())),
        }
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for CameraSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraSession")
            .field("open", &self.is_open())
            .finish()
    }
}

/// 背面カメラを開く
///
/// 失敗時はセッションを残さない。エラーは `PermissionDenied` か
/// `DeviceUnavailable` に揃える。
pub async fn open_camera(device: &dyn CameraDevice) -> Result<CameraSession> {
    match device.open_stream(FacingMode::Environment).await {
        Ok(stream) => {
            debug!("camera session opened");
            Ok(CameraSession::new(stream))
        }
        Err(err) => {
            warn!("Camera error: {}", err);
            Err(match err {
                LensError::PermissionDenied => LensError::PermissionDenied,
                LensError::DeviceUnavailable(msg) => LensError::DeviceUnavailable(msg),
                other => LensError::DeviceUnavailable(other.to_string()),
            })
        }
    }
}
