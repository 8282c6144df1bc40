//! waste-lens
//!
//! カメラまたはファイルから画像を取得し、リモートの分類APIで物品を判定して
//! 分別・廃棄方法を表示する。

pub mod cli;
pub mod config;
pub mod error;
pub mod interactive;
pub mod logging;
pub mod media;
pub mod pipeline;
pub mod render;
pub mod workflow;
