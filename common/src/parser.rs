//! APIレスポンスパーサー
//!
//! 分類APIのレスポンス本文をパースする。
//! どちらのエンドポイントも本文はJSONオブジェクトのみ。

use crate::error::{Error, Result};
use crate::types::{ClassificationResult, DetailEnvelope, ItemDetail};

/// `/api/classify` のレスポンスをパース
///
/// # Arguments
/// * `body` - レスポンス本文（`{"prediction": "..."}`）
///
/// # Returns
/// * `Ok(ClassificationResult)` - パース成功
/// * `Err` - 本文が空、またはJSONが不正
///
/// # Examples
/// ```
/// use waste_lens_common::parse_classify_response;
///
/// let result = parse_classify_response(r#"{"prediction": "plastic bottle"}"#).unwrap();
/// assert_eq!(result.label, "plastic bottle");
/// ```
pub fn parse_classify_response(body: &str) -> Result<ClassificationResult> {
    let body = non_empty(body)?;
    serde_json::from_str(body)
        .map_err(|e| Error::Parse(format!("classify JSON parse error: {}", e)))
}

/// `/api/LLM-response` のレスポンスをパース
///
/// `response` オブジェクトの3項目がすべて揃っている場合のみ成功する。
pub fn parse_detail_response(body: &str) -> Result<ItemDetail> {
    let body = non_empty(body)?;
    let envelope: DetailEnvelope = serde_json::from_str(body)
        .map_err(|e| Error::Parse(format!("detail JSON parse error: {}", e)))?;
    Ok(envelope.response)
}

fn non_empty(body: &str) -> Result<&str> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(Error::Parse("empty response body".into()));
    }
    Ok(trimmed)
}
