use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, Level};

use bw_dataset::{DatasetLoader, DEFAULT_DATASET_PATH};
use bw_web::{create_app, AppState, ModelFactory};

#[derive(Parser, Debug)]
#[command(author, version, about = "Per-publisher clickbait analysis over a cached news dataset")]
struct Cli {
    /// Address to serve the UI and API on.
    #[arg(long, default_value = "127.0.0.1:3000")]
    listen: String,

    /// Path to the gzip-compressed NDJSON dataset.
    #[arg(long, default_value = DEFAULT_DATASET_PATH)]
    dataset: PathBuf,

    /// Classifier backend. Available models: openai (default), dummy (offline).
    #[arg(long, default_value = "openai", value_parser = ["openai", "dummy"])]
    model: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();
    let loader = DatasetLoader::new(&cli.dataset);

    let kind = cli.model.clone();
    let models: ModelFactory =
        Arc::new(move |api_key| bw_inference::create_model(&kind, api_key));

    let app = create_app(AppState::new(loader, models)).await;
    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    info!(
        listen = %cli.listen,
        dataset = %cli.dataset.display(),
        model = %cli.model,
        "baitwatch listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
