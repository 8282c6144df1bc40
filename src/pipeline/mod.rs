//! 分類パイプライン
//!
//! 2段階の処理:
//! - classify: 画像 → ラベル
//! - lookup_detail: ラベル → 説明・分別方法
//!
//! classify が失敗した場合 lookup_detail は呼ばない。自動リトライはしない。

mod http;

pub use http::HttpClassifier;

use crate::error::{LensError, Result};
use crate::media::CapturedImage;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::debug;
use waste_lens_common::{ClassificationResult, ItemDetail};

/// リモート分類サービス
#[async_trait]
pub trait ClassifierService: Send + Sync {
    async fn classify(&self, image: &CapturedImage) -> Result<ClassificationResult>;

    async fn lookup_detail(&self, label: &str) -> Result<ItemDetail>;
}

/// 1回の処理結果（ラベルと詳細は常に揃って返る）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub classification: ClassificationResult,
    pub detail: ItemDetail,
}

pub struct Pipeline<S> {
    service: S,
    timeout: Duration,
}

impl<S: ClassifierService> Pipeline<S> {
    pub fn new(service: S, timeout: Duration) -> Self {
        Self { service, timeout }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub async fn process(&self, image: &CapturedImage) -> Result<ProcessOutcome> {
        debug!("classify: {:?}", image);
        let classification = self
            .bounded("classify", self.service.classify(image))
            .await
            .map_err(|e| stage_error(e, LensError::ClassificationFailed))?;

        debug!("lookup_detail: {}", classification.label);
        let detail = self
            .bounded("detail lookup", self.service.lookup_detail(&classification.label))
            .await
            .map_err(|e| stage_error(e, LensError::DetailLookupFailed))?;

        Ok(ProcessOutcome { classification, detail })
    }

    async fn bounded<T>(
        &self,
        stage: &'static str,
        call: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(LensError::Timeout {
                stage,
                after: self.timeout,
            }),
        }
    }
}

/// 各段階のエラーを段階固有の種別に揃える
fn stage_error(err: LensError, wrap: fn(String) -> LensError) -> LensError {
    match err {
        LensError::ClassificationFailed(_)
        | LensError::DetailLookupFailed(_)
        | LensError::Timeout { .. } => err,
        other => wrap(other.to_string()),
    }
}
