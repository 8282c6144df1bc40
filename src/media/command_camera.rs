//! 外部コマンドによるカメラ
//!
//! `fswebcam` や `libcamera-still` のように、静止画を標準出力へ書き出す
//! コマンドを1フレームごとに実行する。

use super::camera::{CameraDevice, FacingMode, RawFrame, VideoStream};
use crate::error::{LensError, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CommandCamera {
    program: String,
    args: Vec<String>,
}

impl CommandCamera {
    pub fn new(command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| LensError::Config("camera_command が空です".into()))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    async fn run(&self) -> Result<Vec<u8>> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::PermissionDenied => LensError::PermissionDenied,
                _ => LensError::DeviceUnavailable(format!("{}: {}", self.program, e)),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.to_lowercase().contains("permission denied") {
                return Err(LensError::PermissionDenied);
            }
            return Err(LensError::DeviceUnavailable(format!(
                "{} failed (code {:?}): {}",
                self.program,
                output.status.code(),
                stderr.trim()
            )));
        }

        debug!("{} wrote {} bytes", self.program, output.stdout.len());
        Ok(output.stdout)
    }
}

#[async_trait]
impl CameraDevice for CommandCamera {
    async fn open_stream(&self, facing: FacingMode) -> Result<Box<dyn VideoStream>> {
        if facing != FacingMode::Environment {
            debug!("facing mode {:?} is not selectable; using the configured device", facing);
        }
        // 起動確認を兼ねて1枚撮る
        self.run().await?;
        Ok(Box::new(CommandStream {
            camera: self.clone(),
            stopped: false,
        }))
    }
}

struct CommandStream {
    camera: CommandCamera,
    stopped: bool,
}

#[async_trait]
impl VideoStream for CommandStream {
    async fn grab_frame(&mut self) -> Result<RawFrame> {
        if self.stopped {
            return Err(LensError::CaptureFailed("camera stream is stopped".into()));
        }

        let bytes = self.camera.run().await.map_err(|e| match e {
            LensError::PermissionDenied => e,
            other => LensError::CaptureFailed(other.to_string()),
        })?;
        decode_frame(&bytes)
    }

    fn stop_tracks(&mut self) {
        self.stopped = true;
    }
}

fn decode_frame(bytes: &[u8]) -> Result<RawFrame> {
    if bytes.is_empty() {
        return Err(LensError::CaptureFailed("camera command produced no data".into()));
    }
    let image = image::load_from_memory(bytes)
        .map_err(|e| LensError::CaptureFailed(format!("frame decode error: {}", e)))?
        .to_rgb8();
    Ok(RawFrame {
        width: image.width(),
        height: image.height(),
        rgb: image.into_raw(),
    })
}
