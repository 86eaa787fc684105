//! ESG Lens HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use esg::analysis::EsgAnalyzer;
use esg::cache::{CacheStore, spawn_expiry_sweeper};
use esg::config::Config;
use esg::gateway::{HandlerState, create_router_with_state};
use esg::history::InMemoryHistory;
use esg::search::OpenAiSearchClient;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
  ┌─┐┌─┐┌─┐  ┬  ┌─┐┌┐┌┌─┐
  ├┤ └─┐│ ┬  │  ├┤ │││└─┐
  └─┘└─┘└─┘  ┴─┘└─┘┘└┘└─┘
        NEWS IN. RISK OUT.
                    AGPL-3.0
"#
    );

    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        cache_capacity = config.cache_capacity,
        cache_ttl_secs = config.cache_ttl_secs,
        "ESG Lens starting"
    );

    let search = OpenAiSearchClient::new(config.openai_config())?;
    if !search.is_configured() {
        tracing::warn!(
            "No ESG_OPENAI_API_KEY or OPENAI_API_KEY configured; analyses will fail until one is set"
        );
    }

    let cache = Arc::new(CacheStore::with_limits(
        config.cache_capacity,
        config.cache_ttl(),
    ));
    let sweeper = spawn_expiry_sweeper(Arc::clone(&cache), config.cache_ttl());
    let history = Arc::new(InMemoryHistory::with_limit(config.history_limit));
    let analyzer = Arc::new(EsgAnalyzer::new(
        cache,
        Arc::new(search),
        history,
        config.analyzer_config(),
    ));

    let state = HandlerState::new(analyzer, config.history_limit);
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    tracing::info!("ESG Lens shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("ESG_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(_) => return 1,
    };

    rt.block_on(async {
        let client = match reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
        {
            Ok(client) => client,
            Err(_) => return 1,
        };

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
