//! 撮影→解析→表示の流れを束ねるコントローラ
//!
//! 状態はロックの内側に置くが、ロックを保持したまま `.await` しない。
//! 処理中の通信は取り消さず、通し番号で古い応答を捨てる。

use super::state::{Presentation, Ticket, View, WorkflowState};
use crate::error::{LensError, Result};
use crate::media::{accept_file, capture_frame, open_camera, CameraDevice, CameraSession, CapturedImage, SelectedFile};
use crate::pipeline::{ClassifierService, Pipeline, ProcessOutcome};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

struct Inner {
    presentation: Presentation,
    session: Option<CameraSession>,
}

pub struct Controller<C, S> {
    camera: C,
    pipeline: Pipeline<S>,
    jpeg_quality: u8,
    inner: Mutex<Inner>,
}

impl<C: CameraDevice, S: ClassifierService> Controller<C, S> {
    pub fn new(camera: C, pipeline: Pipeline<S>, jpeg_quality: u8) -> Self {
        Self {
            camera,
            pipeline,
            jpeg_quality,
            inner: Mutex::new(Inner {
                presentation: Presentation::new(),
                session: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn pipeline(&self) -> &Pipeline<S> {
        &self.pipeline
    }

    pub fn view(&self) -> View {
        self.lock().presentation.view()
    }

    pub fn state(&self) -> WorkflowState {
        self.lock().presentation.state().clone()
    }

    pub fn has_camera_session(&self) -> bool {
        self.lock().session.as_ref().is_some_and(CameraSession::is_open)
    }

    /// 初期化: 待機状態でカメラを開く
    ///
    /// 失敗してもアップロードは使える。
    pub async fn start(&self) -> Result<()> {
        self.open_camera_session().await
    }

    async fn open_camera_session(&self) -> Result<()> {
        // 新しいセッションの前に古いものを必ず閉じる
        let previous = self.lock().session.take();
        drop(previous);

        match open_camera(&self.camera).await {
            Ok(session) => {
                let mut inner = self.lock();
                if inner.presentation.preview_visible() || inner.presentation.is_processing() {
                    // 開いている間に画像が選ばれた
                    debug!("discarding camera session opened behind a preview");
                    return Ok(());
                }
                inner.session = Some(session);
                inner.presentation.camera_opened();
                Ok(())
            }
            Err(err) => {
                self.lock().presentation.camera_failed(err.user_message());
                Err(err)
            }
        }
    }

    /// カメラの現在フレームを撮影して処理する
    pub async fn capture_and_process(&self) -> Result<ProcessOutcome> {
        let (ticket, session) = {
            let mut inner = self.lock();
            if inner.presentation.is_processing() {
                return Err(LensError::Busy);
            }
            if !inner.presentation.controls().capture_enabled {
                return Err(LensError::CameraNotReady);
            }
            let session = inner.session.take().ok_or(LensError::CameraNotReady)?;
            (inner.presentation.begin_capture(), session)
        };

        match capture_frame(session, self.jpeg_quality).await {
            Ok(image) => self.run_pipeline(image, Some(ticket)).await,
            Err(err) => {
                let (applied, leftover) = {
                    let mut inner = self.lock();
                    let applied = inner.presentation.capture_failed(ticket, err.user_message());
                    // 失敗表示中にカメラを開いたままにしない
                    let leftover = if applied { inner.session.take() } else { None };
                    (applied, leftover)
                };
                drop(leftover);

                if applied {
                    warn!("Capture failed: {}", err);
                } else {
                    debug!("discarding stale capture failure for {:?}: {}", ticket, err);
                }
                Err(err)
            }
        }
    }

    /// 選択ファイルを検証して処理する
    ///
    /// 画像以外は通信せずに拒否する。
    pub async fn upload_and_process(&self, file: SelectedFile) -> Result<ProcessOutcome> {
        if self.lock().presentation.is_processing() {
            return Err(LensError::Busy);
        }

        match accept_file(file) {
            Ok(image) => self.process(image).await,
            Err(err) => {
                warn!("Upload failed: {}", err);
                self.lock().presentation.file_rejected(err.user_message());
                Err(err)
            }
        }
    }

    /// 画像を分類パイプラインに流す
    ///
    /// 同じ画像・別の画像で何度呼んでもよい。画面には最後に呼んだ分だけが残る。
    pub async fn process(&self, image: CapturedImage) -> Result<ProcessOutcome> {
        self.run_pipeline(image, None).await
    }

    /// `capture` は撮影時の番号。撮影中に別の操作が始まっていたら処理しない
    async fn run_pipeline(
        &self,
        image: CapturedImage,
        capture: Option<Ticket>,
    ) -> Result<ProcessOutcome> {
        let (ticket, session) = {
            let mut inner = self.lock();
            if capture.is_some_and(|ticket| !inner.presentation.is_current(ticket)) {
                debug!("dropping frame from superseded capture {:?}", capture);
                return Err(LensError::Superseded);
            }
            let session = inner.session.take();
            (inner.presentation.begin_processing(image.clone()), session)
        };
        drop(session);

        let result = self.pipeline.process(&image).await;

        let applied = self.lock().presentation.finish(
            ticket,
            result.as_ref().cloned().map_err(LensError::user_message),
        );
        if applied {
            match &result {
                Ok(outcome) => info!("classified as {:?}", outcome.classification.label),
                Err(err) => warn!("Processing failed: {}", err),
            }
        } else {
            debug!("discarding stale response for {:?}", ticket);
        }

        result
    }

    /// 撮り直し: 画像を破棄してカメラを開き直す
    pub async fn retake(&self) -> Result<()> {
        {
            let mut inner = self.lock();
            if inner.presentation.is_processing() {
                return Err(LensError::Busy);
            }
            inner.presentation.reset_for_retake();
        }
        self.open_camera_session().await
    }

    /// 画面を離れるときにカメラを解放する
    pub fn shutdown(&self) {
        let mut inner = self.lock();
        if let Some(mut session) = inner.session.take() {
            session.close();
        }
        inner.presentation.camera_closed();
    }
}
