//! 分類APIの型定義
//!
//! - ClassificationResult: `/api/classify` の出力
//! - ItemDetail: `/api/LLM-response` の出力（`response` に包まれて届く）

use serde::{Deserialize, Serialize};

/// ラベルが空のときに表示する代替テキスト
pub const FALLBACK_LABEL: &str = "Item identified";

/// 分類結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(rename = "prediction")]
    pub label: String,
}

impl ClassificationResult {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }

    /// 表示用ラベル（空なら代替テキスト）
    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            FALLBACK_LABEL
        } else {
            &self.label
        }
    }
}

/// 物品の説明と分別・廃棄方法
///
/// 3項目とも自由記述。空文字列もあり得るが、キー自体は必須。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub item_description: String,
    pub recyclable_method: String,
    pub safe_waste_disposal: String,
}

/// `/api/LLM-response` のレスポンス全体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailEnvelope {
    pub response: ItemDetail,
}
