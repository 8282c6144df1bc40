//! 表示状態マシン
//!
//! I/Oを持たない純粋な状態遷移。コントローラが結果を流し込み、
//! 画面側は `view()` のスナップショットだけを見る。

use crate::media::CapturedImage;
use crate::pipeline::ProcessOutcome;
use waste_lens_common::{ClassificationResult, ItemDetail};

/// ワークフローの状態（常にどれか1つ）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Capturing,
    Processing,
    Result {
        classification: ClassificationResult,
        detail: ItemDetail,
    },
    Failed {
        message: String,
    },
}

/// 表示モード（スタイルはこの値からのみ決める）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualMode {
    LiveCamera,
    CameraUnavailable,
    Preview,
    Loading,
    Showing,
    Error,
}

/// 操作ボタンの有効/無効
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub capture_enabled: bool,
    pub upload_enabled: bool,
    pub retake_enabled: bool,
}

/// 画面に渡すスナップショット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub mode: VisualMode,
    pub controls: Controls,
    pub camera_live: bool,
    pub preview: Option<CapturedImage>,
    /// ラベルと詳細は揃ったときだけ入る
    pub result: Option<(String, ItemDetail)>,
    pub message: Option<String>,
}

/// 撮影・処理呼び出しごとの通し番号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct Presentation {
    state: WorkflowState,
    preview: Option<CapturedImage>,
    notice: Option<String>,
    camera_live: bool,
    seq: u64,
}

impl Presentation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn is_processing(&self) -> bool {
        self.state == WorkflowState::Processing
    }

    pub fn preview_visible(&self) -> bool {
        self.preview.is_some()
    }

    pub fn camera_live(&self) -> bool {
        self.camera_live
    }

    pub fn camera_opened(&mut self) {
        self.camera_live = true;
    }

    /// カメラを開けなかった（状態は変えずメッセージのみ）
    pub fn camera_failed(&mut self, message: String) {
        self.camera_live = false;
        self.notice = Some(message);
    }

    pub fn camera_closed(&mut self) {
        self.camera_live = false;
    }

    fn next_ticket(&mut self) -> Ticket {
        self.seq += 1;
        Ticket(self.seq)
    }

    /// 後から撮影・処理・撮り直しが始まっていなければ `true`
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.seq
    }

    pub fn begin_capture(&mut self) -> Ticket {
        self.state = WorkflowState::Capturing;
        self.notice = None;
        self.next_ticket()
    }

    /// 撮影失敗。セッションは消費済みで、カメラは自動では開き直さない
    ///
    /// 撮影中に撮り直しやアップロードがあった場合は何もせず `false`。
    pub fn capture_failed(&mut self, ticket: Ticket, message: String) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.camera_live = false;
        self.notice = None;
        self.state = WorkflowState::Failed { message };
        true
    }

    /// 受け付けなかったファイル（状態は変えずメッセージのみ）
    ///
    /// 表示中の結果や失敗メッセージより優先して表示される。
    pub fn file_rejected(&mut self, message: String) {
        self.notice = Some(message);
    }

    /// プレビューを表示して処理中へ。以前の呼び出しはすべて古くなる
    pub fn begin_processing(&mut self, image: CapturedImage) -> Ticket {
        self.camera_live = false;
        self.preview = Some(image);
        self.notice = None;
        self.state = WorkflowState::Processing;
        self.next_ticket()
    }

    /// 最新の呼び出しの結果だけを反映する
    ///
    /// 反映した場合は `true`、古い呼び出しとして捨てた場合は `false`。
    pub fn finish(&mut self, ticket: Ticket, outcome: Result<ProcessOutcome, String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.notice = None;

        self.state = match outcome {
            Ok(outcome) => WorkflowState::Result {
                classification: outcome.classification,
                detail: outcome.detail,
            },
            Err(message) => WorkflowState::Failed { message },
        };
        true
    }

    /// 撮り直し: 画像を破棄して待機状態へ
    pub fn reset_for_retake(&mut self) {
        self.preview = None;
        self.notice = None;
        self.state = WorkflowState::Idle;
        self.next_ticket();
    }

    pub fn controls(&self) -> Controls {
        let processing = self.is_processing();
        let finished = matches!(
            self.state,
            WorkflowState::Result { .. } | WorkflowState::Failed { .. }
        );
        Controls {
            capture_enabled: self.camera_live && !processing,
            upload_enabled: !processing,
            retake_enabled: !processing && (finished || self.preview.is_some() || !self.camera_live),
        }
    }

    pub fn visual_mode(&self) -> VisualMode {
        match &self.state {
            WorkflowState::Processing => VisualMode::Loading,
            WorkflowState::Result { .. } => VisualMode::Showing,
            WorkflowState::Failed { .. } => VisualMode::Error,
            WorkflowState::Idle | WorkflowState::Capturing => {
                if self.preview.is_some() {
                    VisualMode::Preview
                } else if self.camera_live {
                    VisualMode::LiveCamera
                } else {
                    VisualMode::CameraUnavailable
                }
            }
        }
    }

    pub fn view(&self) -> View {
        let (result, message) = match &self.state {
            WorkflowState::Result { classification, detail } => (
                Some((classification.display_label().to_string(), detail.clone())),
                self.notice.clone(),
            ),
            WorkflowState::Failed { message } => (
                None,
                Some(self.notice.clone().unwrap_or_else(|| message.clone())),
            ),
            _ => (None, self.notice.clone()),
        };

        View {
            mode: self.visual_mode(),
            controls: self.controls(),
            camera_live: self.camera_live,
            preview: self.preview.clone(),
            result,
            message,
        }
    }
}
