//! 画面描画（端末向けテキスト）
//!
//! `View` だけを入力にする純粋関数。状態は一切変更しない。

use crate::workflow::{Controls, View, VisualMode};
use std::fmt::Write;

const RULE: &str = "────────────────────────────────";

/// 表示モードごとの見出し
pub fn headline(mode: VisualMode) -> &'static str {
    match mode {
        VisualMode::LiveCamera => "📷 Camera ready",
        VisualMode::CameraUnavailable => "🚫 Camera unavailable (upload still works)",
        VisualMode::Preview => "🖼  Image selected",
        VisualMode::Loading => "⏳ Processing...",
        VisualMode::Showing => "✅ Result",
        VisualMode::Error => "❌ Failed",
    }
}

pub fn render_controls(controls: &Controls) -> String {
    let flag = |enabled: bool| if enabled { "on" } else { "off" };
    format!(
        "[capture: {}] [upload: {}] [retake: {}]",
        flag(controls.capture_enabled),
        flag(controls.upload_enabled),
        flag(controls.retake_enabled)
    )
}

pub fn render_view(view: &View) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", headline(view.mode));

    if let Some(image) = &view.preview {
        let _ = writeln!(
            out,
            "  {} ({}, {} bytes)",
            image.file_name(),
            image.mime_type(),
            image.bytes().len()
        );
    }

    if let Some(message) = &view.message {
        let _ = writeln!(out, "Error: {}", message);
    }

    if let Some((label, detail)) = &view.result {
        let _ = writeln!(out, "\n{}", label);
        let _ = writeln!(out, "{}", RULE);
        let _ = writeln!(out, "{}", detail.item_description);
        let _ = writeln!(out, "{}", RULE);
        let _ = writeln!(out, "{}", detail.recyclable_method);
        let _ = writeln!(out, "{}", RULE);
        let _ = writeln!(out, "{}", detail.safe_waste_disposal);
    }

    let _ = write!(out, "{}", render_controls(&view.controls));
    out
}
