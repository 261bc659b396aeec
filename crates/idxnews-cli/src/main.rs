mod scheduler;

use std::sync::Arc;

use clap::Parser;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use idxnews_core::{Lexicon, RelevanceFilter, Tier};
use idxnews_scraper::BrowserlessSession;

#[derive(Debug, Parser)]
#[command(name = "idxnews")]
#[command(about = "IDX ticker news ingestion")]
struct Cli {
    /// Scrape one tier and exit.
    #[arg(long, conflicts_with_all = ["symbol", "daemon"])]
    tier: Option<Tier>,

    /// Scrape one symbol and exit.
    #[arg(long)]
    symbol: Option<String>,

    /// Restrict a --symbol run to a single source id.
    #[arg(long, requires = "symbol")]
    source: Option<String>,

    /// Run the per-tier schedule until interrupted.
    #[arg(long, conflicts_with = "symbol")]
    daemon: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = Arc::new(idxnews_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = idxnews_db::PoolConfig::from_app_config(&config);
    let pool = idxnews_db::connect_pool(&config.database_url, pool_config).await?;
    idxnews_db::run_migrations(&pool).await?;
    let store = Arc::new(idxnews_db::NewsStore::new(pool.clone()));

    let lexicon = Lexicon::load_or_default(&config.keywords_path);
    let filter = Arc::new(RelevanceFilter::new(lexicon));

    // Browserless must be reachable before any run starts.
    let session =
        BrowserlessSession::connect(&config.browserless_url, config.browserless_token.as_deref())
            .await?;
    let session = Arc::new(Mutex::new(session));

    if let Some(symbol) = cli.symbol.as_deref() {
        let symbol = symbol.to_uppercase();
        let mut page = session.lock().await;
        let count = idxnews_scraper::run_symbol(
            &mut *page,
            store.as_ref(),
            &filter,
            &config,
            &symbol,
            cli.source.as_deref(),
        )
        .await;
        tracing::info!(symbol, new_articles = count, "run finished");
    } else if let Some(tier) = cli.tier {
        let mut page = session.lock().await;
        let count =
            idxnews_scraper::run_tier(&mut *page, store.as_ref(), &filter, &config, tier).await;
        tracing::info!(%tier, new_articles = count, "run finished");
    } else if cli.daemon {
        let mut sched = scheduler::build_scheduler(
            Arc::clone(&session),
            Arc::clone(&store),
            Arc::clone(&filter),
            Arc::clone(&config),
        )
        .await?;
        shutdown_signal().await;
        sched.shutdown().await?;
    } else {
        tracing::info!("nothing to do; pass --tier, --symbol, or --daemon");
    }

    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
