//! 分類APIのHTTPクライアント
//!
//! - `POST /api/classify` (multipart `file`)
//! - `POST /api/LLM-response` (multipart `item`)

use super::ClassifierService;
use crate::error::{LensError, Result};
use crate::media::CapturedImage;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::debug;
use waste_lens_common::{parse_classify_response, parse_detail_response, ClassificationResult, ItemDetail};

const CLASSIFY_PATH: &str = "/api/classify";
const DETAIL_PATH: &str = "/api/LLM-response";

#[derive(Debug, Clone)]
pub struct HttpClassifier {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpClassifier {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LensError::Config(format!("HTTPクライアント初期化エラー: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// multipartフォームを送信し、成功時の本文を返す
    ///
    /// タイムアウト以外の失敗は `wrap` で段階固有のエラーにする。
    async fn post_form(
        &self,
        path: &str,
        form: Form,
        stage: &'static str,
        wrap: fn(String) -> LensError,
    ) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(e, stage, wrap))?;

        let status = response.status();
        if !status.is_success() {
            return Err(wrap(format!("HTTP error! status: {}", status.as_u16())));
        }

        response
            .text()
            .await
            .map_err(|e| self.transport_error(e, stage, wrap))
    }

    fn transport_error(
        &self,
        err: reqwest::Error,
        stage: &'static str,
        wrap: fn(String) -> LensError,
    ) -> LensError {
        if err.is_timeout() {
            LensError::Timeout {
                stage,
                after: self.timeout,
            }
        } else {
            wrap(err.to_string())
        }
    }
}

#[async_trait]
impl ClassifierService for HttpClassifier {
    async fn classify(&self, image: &CapturedImage) -> Result<ClassificationResult> {
        let part = Part::bytes(image.bytes().to_vec())
            .file_name(image.file_name().to_string())
            .mime_str(image.mime_type())
            .map_err(|e| LensError::ClassificationFailed(e.to_string()))?;
        let form = Form::new().part("file", part);

        let body = self
            .post_form(CLASSIFY_PATH, form, "classify", LensError::ClassificationFailed)
            .await?;

        parse_classify_response(&body).map_err(|e| LensError::ClassificationFailed(e.to_string()))
    }

    async fn lookup_detail(&self, label: &str) -> Result<ItemDetail> {
        let form = Form::new().text("item", label.to_string());

        let body = self
            .post_form(DETAIL_PATH, form, "detail lookup", LensError::DetailLookupFailed)
            .await?;

        parse_detail_response(&body).map_err(|e| LensError::DetailLookupFailed(e.to_string()))
    }
}
