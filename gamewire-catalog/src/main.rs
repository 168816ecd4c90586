//! gamewire-catalog - game catalog front-end backend
//!
//! Serves catalog views over HTTP for the browser front-end, or renders a
//! single view to the terminal.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gamewire_common::config::{
    CatalogConfig, ConfigOverrides, ConfigResolver, DEFAULT_LOG_LEVEL, ENV_LOG_LEVEL,
};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter};

use gamewire_catalog::render::{render_detail, render_list};
use gamewire_catalog::services::{CatalogSource, RawgClient};
use gamewire_catalog::views::catalog::{platform_title, search_title, CRITICS_TITLE};
use gamewire_catalog::views::{
    critic_list, game_detail_view, news_list, platform_list, search_list, CatalogList,
    GameDetailView, NewsKind,
};
use gamewire_catalog::{build_router, AppState};

#[derive(Parser, Debug)]
#[command(name = "gamewire-catalog")]
#[command(about = "Game catalog views backed by the RAWG API")]
#[command(version)]
struct Args {
    /// Path to config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog API key
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Catalog API base address
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// List views: also open the game shown at this rank (1 = featured)
    #[arg(long, global = true, value_name = "RANK")]
    open: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve views over HTTP
    Serve {
        /// Address to listen on
        #[arg(long)]
        bind: Option<String>,
    },
    /// Latest, upcoming or popular games
    News { kind: NewsKind },
    /// Top critic-scored games
    Critics,
    /// Top rated games on one platform
    Platform { platform_id: String },
    /// Free-text search
    Search { term: String },
    /// Details, screenshots and reviews for one game
    Game {
        game_id: u64,
        /// List every screenshot instead of the preview
        #[arg(long)]
        all_screenshots: bool,
    },
}

type FilterHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

/// Install the subscriber with an early filter; returns a handle for the
/// configured level
fn init_tracing() -> Option<FilterHandle> {
    let from_rust_log = EnvFilter::try_from_default_env().ok();
    let pinned = from_rust_log.is_some();

    let early = from_rust_log.unwrap_or_else(|| {
        let level = std::env::var(ENV_LOG_LEVEL).unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
        EnvFilter::new(level)
    });
    let (filter, handle) = reload::Layer::new(early);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // RUST_LOG wins over any configured level
    (!pinned).then_some(handle)
}

fn apply_log_level(handle: Option<FilterHandle>, level: &str) {
    if let Some(handle) = handle {
        if let Err(e) = handle.reload(EnvFilter::new(level)) {
            error!("Failed to apply log level '{}': {}", level, e);
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let handle = init_tracing();
    let args = Args::parse();

    match run(args, handle).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, handle: Option<FilterHandle>) -> Result<ExitCode> {
    let bind_override = match &args.command {
        Command::Serve { bind } => bind.clone(),
        _ => None,
    };

    let resolver = ConfigResolver::new(ConfigOverrides {
        api_key: args.api_key.clone(),
        base_url: args.base_url.clone(),
        bind_address: bind_override,
        config_path: args.config.clone(),
    });
    let config = resolver.resolve().context("Failed to resolve configuration")?;
    apply_log_level(handle, &config.log_level);

    info!(
        "Starting GameWire catalog v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Catalog API: {}", config.base_url);

    let client = RawgClient::from_config(&config).context("Failed to create catalog client")?;
    let source: Arc<dyn CatalogSource> = Arc::new(client);
    let detail = game_detail_view(Arc::clone(&source));
    let open = args.open;

    match args.command {
        Command::Serve { .. } => {
            serve(&config, source).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::News { kind } => {
            let view = news_list(source);
            Ok(print_list(&view, kind, kind.title(), open, &detail).await)
        }
        Command::Critics => {
            let view = critic_list(source);
            Ok(print_list(&view, (), CRITICS_TITLE, open, &detail).await)
        }
        Command::Platform { platform_id } => {
            let view = platform_list(source);
            let title = platform_title(&platform_id);
            Ok(print_list(&view, platform_id, &title, open, &detail).await)
        }
        Command::Search { term } => {
            let view = search_list(source);
            let title = search_title(&term);
            Ok(print_list(&view, term, &title, open, &detail).await)
        }
        Command::Game {
            game_id,
            all_screenshots,
        } => {
            let snapshot = detail.settle(game_id).await;
            println!("{}", render_detail(&snapshot, all_screenshots));
            Ok(exit_code(snapshot.is_failed()))
        }
    }
}

async fn print_list<K>(
    view: &CatalogList<K>,
    key: K,
    title: &str,
    open: Option<usize>,
    detail: &GameDetailView,
) -> ExitCode
where
    K: Clone + Send + 'static,
{
    let snapshot = view.settle(key).await;
    println!("{}", render_list(title, &snapshot));
    if snapshot.is_failed() {
        return ExitCode::FAILURE;
    }

    let Some(rank) = open else {
        return ExitCode::SUCCESS;
    };
    let selected = match rank.checked_sub(1) {
        Some(index) => view.select_index(index).await,
        None => None,
    };
    if selected.is_none() {
        error!("No game at rank {}", rank);
        return ExitCode::FAILURE;
    }

    match view.open_selected(detail).await {
        Some(snapshot) => {
            println!();
            println!("{}", render_detail(&snapshot, false));
            exit_code(snapshot.is_failed())
        }
        None => ExitCode::FAILURE,
    }
}

fn exit_code(failed: bool) -> ExitCode {
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn serve(config: &CatalogConfig, source: Arc<dyn CatalogSource>) -> Result<()> {
    let app = build_router(AppState::new(source));

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_address))?;

    info!("gamewire-catalog listening on http://{}", config.bind_address);
    info!("Health check: http://{}/health", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
