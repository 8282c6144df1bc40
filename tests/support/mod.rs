//! 結合テスト用のカメラ・分類サービスの代替実装

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;
use waste_lens::error::{LensError, Result};
use waste_lens::media::{CameraDevice, CapturedImage, FacingMode, RawFrame, VideoStream};
use waste_lens::pipeline::ClassifierService;
use waste_lens_common::{ClassificationResult, ItemDetail};

/// カメラの開閉回数
#[derive(Default)]
pub struct CameraStats {
    pub opens: AtomicUsize,
    pub stops: AtomicUsize,
    pub grabs: AtomicUsize,
}

impl CameraStats {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

pub enum CameraBehavior {
    Frames,
    EmptyFrame,
    Denied,
    Missing,
}

pub struct FakeCamera {
    pub stats: Arc<CameraStats>,
    behavior: CameraBehavior,
    frame_gate: Option<Arc<Notify>>,
}

impl FakeCamera {
    pub fn new(behavior: CameraBehavior) -> (Self, Arc<CameraStats>) {
        let stats = Arc::new(CameraStats::default());
        (
            Self {
                stats: stats.clone(),
                behavior,
                frame_gate: None,
            },
            stats,
        )
    }

    /// 通知されるまでフレームを返さないようにする
    pub fn gate_frames(&mut self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.frame_gate = Some(gate.clone());
        gate
    }
}

#[async_trait]
impl CameraDevice for FakeCamera {
    async fn open_stream(&self, facing: FacingMode) -> Result<Box<dyn VideoStream>> {
        assert_eq!(facing, FacingMode::Environment);
        match self.behavior {
            CameraBehavior::Denied => Err(LensError::PermissionDenied),
            CameraBehavior::Missing => Err(LensError::DeviceUnavailable("no video device".into())),
            CameraBehavior::Frames | CameraBehavior::EmptyFrame => {
                self.stats.opens.fetch_add(1, Ordering::SeqCst);
                Ok(Box::new(FakeStream {
                    stats: self.stats.clone(),
                    empty: matches!(self.behavior, CameraBehavior::EmptyFrame),
                    gate: self.frame_gate.clone(),
                }))
            }
        }
    }
}

struct FakeStream {
    stats: Arc<CameraStats>,
    empty: bool,
    gate: Option<Arc<Notify>>,
}

#[async_trait]
impl VideoStream for FakeStream {
    async fn grab_frame(&mut self) -> Result<RawFrame> {
        self.stats.grabs.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.empty {
            return Ok(RawFrame { width: 0, height: 0, rgb: Vec::new() });
        }
        Ok(RawFrame { width: 4, height: 4, rgb: vec![200; 4 * 4 * 3] })
    }

    fn stop_tracks(&mut self) {
        self.stats.stops.fetch_add(1, Ordering::SeqCst);
    }
}

/// ラベル → 詳細を返す分類サービス
///
/// 分類ラベルは画像のファイル名（拡張子なし）。`gates` に登録したラベルは
/// 通知されるまで詳細の返却を待つ。
#[derive(Default)]
pub struct FakeService {
    pub classify_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub details: HashMap<String, ItemDetail>,
    pub classify_error: Option<String>,
    pub detail_delay: Option<Duration>,
    pub gates: Mutex<HashMap<String, Arc<Notify>>>,
    pub labels_seen: Mutex<Vec<String>>,
}

impl FakeService {
    pub fn with_detail(mut self, label: &str, detail: ItemDetail) -> Self {
        self.details.insert(label.to_string(), detail);
        self
    }

    pub fn gate(&self, label: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(label.to_string(), notify.clone());
        notify
    }

    pub fn classify_calls(&self) -> usize {
        self.classify_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClassifierService for FakeService {
    async fn classify(&self, image: &CapturedImage) -> Result<ClassificationResult> {
        self.classify_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.classify_error {
            return Err(LensError::ClassificationFailed(message.clone()));
        }
        let label = image
            .file_name()
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(image.file_name());
        Ok(ClassificationResult::new(label))
    }

    async fn lookup_detail(&self, label: &str) -> Result<ItemDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.labels_seen.lock().unwrap().push(label.to_string());

        let gate = self.gates.lock().unwrap().get(label).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if let Some(delay) = self.detail_delay {
            tokio::time::sleep(delay).await;
        }

        self.details
            .get(label)
            .cloned()
            .ok_or_else(|| LensError::DetailLookupFailed(format!("HTTP error! status: 404 ({})", label)))
    }
}

pub fn detail(description: &str) -> ItemDetail {
    ItemDetail {
        item_description: description.to_string(),
        recyclable_method: format!("{} recycling", description),
        safe_waste_disposal: format!("{} disposal", description),
    }
}

pub fn plastic_bottle() -> ItemDetail {
    ItemDetail {
        item_description: "A PET plastic container".into(),
        recyclable_method: "Rinse and place in recycling bin".into(),
        safe_waste_disposal: "N/A".into(),
    }
}

pub fn jpeg(name: &str) -> CapturedImage {
    CapturedImage::new(vec![0xFF, 0xD8, 0xFF, 0xE0], "image/jpeg", name)
}
