//! 対話モード
//!
//! メニューから撮影・アップロード・撮り直しを選び、操作のたびに画面を描き直す。

use crate::cli::MenuAction;
use crate::error::{LensError, Result};
use crate::media::{CameraDevice, SelectedFile};
use crate::pipeline::ClassifierService;
use crate::render::render_view;
use crate::workflow::{Controller, Controls};
use dialoguer::{Input, Select};
use std::path::PathBuf;
use tracing::debug;

/// 今押せる操作だけを並べる（終了は常に可能）
pub fn available_actions(controls: &Controls) -> Vec<MenuAction> {
    MenuAction::ALL
        .into_iter()
        .filter(|action| match action {
            MenuAction::Capture => controls.capture_enabled,
            MenuAction::Upload => controls.upload_enabled,
            MenuAction::Retake => controls.retake_enabled,
            MenuAction::Quit => true,
        })
        .collect()
}

pub async fn run_interactive<C, S>(controller: &Controller<C, S>) -> Result<()>
where
    C: CameraDevice,
    S: ClassifierService,
{
    // カメラが使えなくてもアップロードは続けられる
    let _ = controller.start().await;

    loop {
        let view = controller.view();
        println!("\n{}\n", render_view(&view));

        let actions = available_actions(&view.controls);
        let labels: Vec<&str> = actions.iter().map(MenuAction::label).collect();
        let index = Select::new()
            .with_prompt("操作を選択")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(|e| LensError::CliExecution(e.to_string()))?;

        let outcome = match actions[index] {
            MenuAction::Capture => {
                println!("撮影中...");
                controller.capture_and_process().await.map(|_| ())
            }
            MenuAction::Upload => {
                let path = prompt_path()?;
                match SelectedFile::from_path(&path) {
                    Ok(file) => {
                        println!("解析中...");
                        controller.upload_and_process(file).await.map(|_| ())
                    }
                    Err(err) => {
                        println!("Error: {}", err);
                        continue;
                    }
                }
            }
            MenuAction::Retake => controller.retake().await,
            MenuAction::Quit => break,
        };

        match outcome {
            // 拒否された操作は状態に残らないのでここで表示
            Err(err) if err.is_rejection() => println!("{}", err.user_message()),
            // それ以外は画面のメッセージとして表示済み
            Err(err) => debug!("action ended with error: {}", err),
            Ok(()) => {}
        }
    }

    controller.shutdown();
    Ok(())
}

fn prompt_path() -> Result<PathBuf> {
    let input: String = Input::new()
        .with_prompt("画像ファイルのパス")
        .interact_text()
        .map_err(|e| LensError::CliExecution(e.to_string()))?;
    Ok(PathBuf::from(input.trim()))
}
