use anyhow::Context;
use clap::Parser;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use texture_scan::{cli, config, error, report, scanner};
use texture_scan::{AnalysisCoordinator, CatalogStore, GeminiClient, ImageInput, Submission};
use cli::{Cli, Commands};
use config::Config;
use error::ScanError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "texture_scan=debug" } else { "texture_scan=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

/// カタログを表示（--json / --browse）
fn show_catalog(store: &CatalogStore, json: bool, browse: bool) -> anyhow::Result<()> {
    let products = store.all();

    if json {
        let plain: Vec<&texture_scan::Product> = products.iter().map(|p| p.as_ref()).collect();
        println!("{}", serde_json::to_string_pretty(&plain)?);
        return Ok(());
    }

    let selected = store.current_selection().map(|p| p.id.clone());
    print!("{}", report::render_catalog(&products, selected.as_deref()));

    if browse {
        let items: Vec<String> = products
            .iter()
            .map(|p| format!("{} ({})", p.label, p.scan_id))
            .collect();
        let default = products
            .iter()
            .position(|p| Some(&p.id) == selected.as_ref())
            .unwrap_or(0);

        while let Some(index) = Select::new()
            .with_prompt("表示するエントリ（Escで終了）")
            .items(&items)
            .default(default)
            .interact_opt()
            .context("エントリ選択に失敗")?
        {
            let product = store.select(&products[index].id)?;
            println!("\n{}", report::render_product(&product));
        }
    } else if let Some(product) = store.current_selection() {
        println!("\n{}", report::render_product(&product));
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { paths, hint, json, browse } => {
            println!("📸 texture-scan - 素材解析\n");

            let images = scanner::collect_images(&paths)?;
            if images.is_empty() {
                let joined = paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(ScanError::NoImagesFound(joined).into());
            }

            let analyzer = GeminiClient::from_config(&config)?;
            tracing::debug!(model = analyzer.model(), "推論クライアント初期化");

            let store = Arc::new(CatalogStore::with_seed()?);
            let coordinator = AnalysisCoordinator::new(Arc::new(analyzer), Arc::clone(&store));

            let total = images.len();
            let mut failures = 0usize;

            for (i, image) in images.iter().enumerate() {
                let bar = spinner(format!("[{}/{}] {} を解析中...", i + 1, total, image.file_name));

                let mut submission = Submission::new(ImageInput::file(&image.path));
                if let Some(h) = &hint {
                    submission = submission.with_hint(h.clone());
                }

                match coordinator.submit(submission).await {
                    Ok(product) => bar.finish_with_message(format!(
                        "✔ {} → {} ({})",
                        image.file_name, product.label, product.scan_id
                    )),
                    Err(e) => {
                        failures += 1;
                        bar.abandon_with_message(format!("✖ {}: {}", image.file_name, e));
                    }
                }
            }

            println!();
            show_catalog(&store, json, browse)?;

            if failures > 0 {
                println!("\n⚠ {}/{}件の解析に失敗しました", failures, total);
            } else {
                println!("\n✅ 解析完了");
            }
        }

        Commands::Catalog { json, browse } => {
            let store = CatalogStore::with_seed()?;
            show_catalog(&store, json, browse)?;
        }

        Commands::Schema => {
            let schema = texture_scan_common::material_analysis_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }

        Commands::Config { set_api_key, set_model, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if let Some(model) = set_model {
                config.set_model(model)?;
                println!("✔ モデルを設定しました");
            }

            if show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  エンドポイント: {}", config.base_url);
                println!("  temperature: {}", config.temperature);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!(
                    "  APIキー: {}",
                    if config.get_api_key().is_ok() { "設定済み" } else { "未設定" }
                );
            }
        }
    }

    Ok(())
}
