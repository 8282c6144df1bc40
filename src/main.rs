use clap::Parser;
use std::process::ExitCode;
use waste_lens::{cli, config, interactive, logging, media, pipeline, render, workflow};
use cli::{Cli, Commands};
use config::Config;
use media::{CommandCamera, SelectedFile};
use pipeline::{HttpClassifier, Pipeline};
use workflow::{Controller, WorkflowState};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let mut config = Config::load()?;

    match cli.command {
        Commands::Classify { file } => {
            println!("♻️  waste-lens - 画像を分類\n");
            let controller = build_controller(&config, cli.api_url.as_deref())?;

            let selected = SelectedFile::from_path(&file)?;
            println!("[1/2] {} を送信中...", selected.name);
            let _ = controller.upload_and_process(selected).await;
            println!("[2/2] 完了\n");

            return Ok(finish(&controller));
        }

        Commands::Capture => {
            println!("♻️  waste-lens - 撮影して分類\n");
            let controller = build_controller(&config, cli.api_url.as_deref())?;

            println!("[1/3] カメラを起動中...");
            if controller.start().await.is_ok() {
                println!("[2/3] 撮影・解析中...");
                let _ = controller.capture_and_process().await;
            }
            println!("[3/3] 完了\n");

            return Ok(finish(&controller));
        }

        Commands::Interactive => {
            let controller = build_controller(&config, cli.api_url.as_deref())?;
            interactive::run_interactive(&controller).await?;
        }

        Commands::Config { set_api_url, set_timeout, set_camera_command, show } => {
            let mut changed = false;

            if let Some(url) = set_api_url {
                config.set_api_base_url(url);
                changed = true;
            }
            if let Some(seconds) = set_timeout {
                config.set_timeout_seconds(seconds);
                changed = true;
            }
            if let Some(command) = set_camera_command {
                config.set_camera_command(&command);
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  APIベースURL: {}", config.api_base_url());
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  JPEG品質: {}", config.jpeg_quality);
                println!("  撮影コマンド: {}", config.camera_command.join(" "));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

type CliController = Controller<CommandCamera, HttpClassifier>;

fn build_controller(config: &Config, api_url: Option<&str>) -> anyhow::Result<CliController> {
    let base_url = api_url
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| config.api_base_url());
    let service = HttpClassifier::new(base_url, config.timeout())?;
    let camera = CommandCamera::new(&config.camera_command)?;
    Ok(Controller::new(
        camera,
        Pipeline::new(service, config.timeout()),
        config.jpeg_quality,
    ))
}

/// 結果を描画し、失敗なら非ゼロで終了
fn finish(controller: &CliController) -> ExitCode {
    controller.shutdown();
    println!("{}", render::render_view(&controller.view()));

    match controller.state() {
        WorkflowState::Result { .. } => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
