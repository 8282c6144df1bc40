//! waste-lens Common Library
//!
//! 分類APIとの契約（ワイヤ型・パーサー・MIME判定）をまとめた共有クレート。
//! I/Oは一切行わない。

pub mod types;
pub mod error;
pub mod parser;
pub mod mime;

pub use types::{ClassificationResult, DetailEnvelope, ItemDetail};
pub use error::{Error, Result};
pub use parser::{parse_classify_response, parse_detail_response};
pub use mime::{is_image_mime, validate_image_mime, JPEG_MIME};
