//! 診断ログ
//!
//! `tracing` の購読者を標準エラーに出す。利用者向けの進捗表示は
//! 標準出力の `println!` のままで、ここには混ぜない。

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// グローバルな購読者を初期化（2回目以降は無視）
///
/// `RUST_LOG` が設定されていればそれを優先する。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_ansi(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init();
}
