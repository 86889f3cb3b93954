//! Vocabulary API server
//!
//! ```text
//! vocab-server --config vocab.yaml
//! RUST_LOG=vocab=debug VOCAB_JWT_SECRET=... vocab-server
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vocab::config::AppConfig;
use vocab::seed::seed_languages;
use vocab::server::ServerBuilder;
use vocab::storage::InMemoryStore;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a YAML configuration file
    #[arg(short, long, env = "VOCAB_CONFIG")]
    config: Option<String>,

    /// Do not seed reference data, whatever the configuration says
    #[arg(long)]
    skip_seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("vocab=info,vocab_server=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::from_yaml_file(path)
            .with_context(|| format!("loading configuration from {}", path))?,
        None => AppConfig::default(),
    };
    config.apply_env().context("applying environment overrides")?;

    let store = InMemoryStore::new();
    if config.seed.languages && !args.skip_seed {
        seed_languages(&store)
            .await
            .context("seeding languages")?;
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.server.bind_addr(),
        "starting vocab server"
    );

    ServerBuilder::new()
        .with_config(config)
        .with_store(store)
        .serve()
        .await
}
