//! Game Crawler CLI
//!
//! Runs the REST API with its crawl scheduler, or a single crawl on demand.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use game_crawler::{
    error::Result,
    models::{Config, CrawlMode},
    pipeline::CrawlJob,
    provider::HttpProvider,
    router::api_router,
    services::GooglePlayService,
    state::AppState,
    storage::{AppStorage, SqliteStorage},
    utils::log,
};

/// Game Crawler - Google Play data service
#[derive(Parser, Debug)]
#[command(
    name = "game-crawler",
    version,
    about = "REST gateway and scheduled crawler for Google Play data"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Listen port (overrides server.port)
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Store provider base URL (overrides provider.base_url)
    #[arg(long, env = "PROVIDER_URL")]
    provider_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API and run the crawl scheduler (default)
    Serve,

    /// Run one crawl immediately and exit
    Crawl,

    /// Validate the configuration file
    Validate,

    /// Show stored snapshot info
    Info {
        /// Number of recent rows to print
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

/// Load config and apply command line overrides.
///
/// A missing file means defaults; a file that fails to parse is an error.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };
    apply_overrides(cli, &mut config);
    Ok(config)
}

fn apply_overrides(cli: &Cli, config: &mut Config) {
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(url) = &cli.provider_url {
        config.provider.base_url = url.clone();
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
}

/// Open the snapshot database when the crawl job needs it.
fn open_storage(config: &Config) -> Result<Option<Arc<dyn AppStorage>>> {
    if config.crawl.mode != CrawlMode::Persist {
        return Ok(None);
    }
    let storage = SqliteStorage::open(&config.storage.database_path)?;
    Ok(Some(Arc::new(storage)))
}

async fn serve(config: Config) -> Result<()> {
    let provider = Arc::new(HttpProvider::new(&config.provider)?);
    let service = GooglePlayService::new(provider);

    let scheduler = if config.crawl.enabled {
        let storage = open_storage(&config)?;
        let job = CrawlJob::new(config.crawl.clone(), service.clone(), storage)?;
        Some(Arc::new(job).spawn())
    } else {
        tracing::info!("Crawl scheduler disabled");
        None
    };

    let app = api_router(AppState::with_service(service), &config.server);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(%addr, provider = %config.provider.base_url, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = scheduler {
        handle.abort();
    }
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = load_config(&cli);

    // Logging comes up before anything about the config is reported.
    let logging = match &loaded {
        Ok(config) => config.logging.clone(),
        Err(_) => {
            let mut fallback = Config::default();
            apply_overrides(&cli, &mut fallback);
            fallback.logging
        }
    };
    log::init(&logging);

    tracing::info!("Game Crawler starting...");

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config from {}: {}", cli.config.display(), e);
            return Err(e);
        }
    };
    if !cli.config.exists() {
        tracing::warn!("No config file at {}, using defaults", cli.config.display());
    }

    match cli.command.as_ref().unwrap_or(&Command::Serve) {
        Command::Serve => {
            config.validate()?;
            serve(config).await?;
        }

        Command::Crawl => {
            config.validate()?;
            let provider = Arc::new(HttpProvider::new(&config.provider)?);
            let service = GooglePlayService::new(provider);
            let storage = open_storage(&config)?;
            let job = CrawlJob::new(config.crawl.clone(), service, storage)?;

            let outcome = job.run_once().await?;
            tracing::info!(
                fetched = outcome.fetched,
                saved = outcome.saved,
                skipped = outcome.skipped,
                "Crawl complete!"
            );
        }

        Command::Validate => {
            tracing::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                tracing::error!("Config validation failed: {}", e);
                return Err(e);
            }
            tracing::info!("✓ Config OK ({})", cli.config.display());
        }

        Command::Info { limit } => {
            tracing::info!("Config file: {}", cli.config.display());
            tracing::info!("Provider: {}", config.provider.base_url);
            tracing::info!(
                "Crawl: {} every {}s ({:?} mode)",
                if config.crawl.enabled { "enabled" } else { "disabled" },
                config.crawl.interval_secs,
                config.crawl.mode
            );

            let db_path = PathBuf::from(&config.storage.database_path);
            if !db_path.exists() {
                tracing::info!("No snapshot database at {} yet.", db_path.display());
                return Ok(());
            }

            let storage = SqliteStorage::open(&db_path)?;
            tracing::info!("Stored rows: {}", storage.count().await?);
            for app in storage.recent(*limit).await? {
                tracing::info!(
                    "  {} | {} | {} | {} | {}",
                    app.crawled_at.to_rfc3339(),
                    app.app_id,
                    app.title,
                    app.developer,
                    app.score.map_or_else(|| "-".to_string(), |s| format!("{s:.1}"))
                );
            }
        }
    }

    Ok(())
}
