//! Agent Gateway - a cached query-answering service
//!
//! # Startup Sequence
//! 1. Load `.env` and initialize the tracing subscriber
//! 2. Load configuration from environment variables
//! 3. Build the runtime with the configured worker count
//! 4. Construct the cache, execution pools, tools, agent graph, and gateway
//! 5. Start the background TTL cleanup task
//! 6. Start the HTTP server with graceful shutdown on SIGINT/SIGTERM

mod agent;
mod api;
mod backends;
mod cache;
mod config;
mod error;
mod eval;
mod exec;
mod gateway;
mod models;
mod tasks;
mod tools;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent::ToolRouterGraph;
use api::{create_router, AppState};
use backends::{OpenAiCompletion, TavilySearch};
use cache::TtlCache;
use config::Config;
use eval::MemoEvaluator;
use exec::ExecPools;
use gateway::AnswerGateway;
use tasks::spawn_cleanup_task;
use tools::{MathTool, SearchTool};

fn main() {
    // Load .env before reading any configuration
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agent_gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Agent Gateway");

    let config = Config::from_env();
    info!(
        "Configuration loaded: api_workers={}, io_pool={}, cpu_pool={}, answer_ttl={}s, port={}",
        config.api_workers,
        config.io_pool_workers,
        config.cpu_pool_workers,
        config.answer_ttl,
        config.server_port
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.api_workers)
        .enable_all()
        .build()
        .expect("failed to build runtime");

    runtime.block_on(run(config));
}

async fn run(config: Config) {
    // Process-wide cache shared by the gateway and the search tool
    let cache = TtlCache::new(config.max_cache_entries).shared();

    // Execution pools: I/O permits and CPU workers exist from here on
    let pools = ExecPools::new(config.io_pool_workers, config.cpu_pool_workers);
    info!(
        "Execution pools ready: {} I/O permits, {} CPU workers",
        pools.io.workers(),
        pools.cpu.workers()
    );

    // Backends, tools, and the agent graph with its registered tool set
    let search_backend = Arc::new(TavilySearch::new(config.tavily_api_key.clone()));
    let llm_backend = Arc::new(OpenAiCompletion::new(
        config.llm_base_url.clone(),
        config.llm_api_key.clone(),
        config.llm_model.clone(),
    ));
    let search_tool = Arc::new(SearchTool::new(
        cache.clone(),
        pools.io.clone(),
        search_backend,
        config.search_ttl,
    ));
    let math_tool = Arc::new(MathTool::new(
        pools.clone(),
        Arc::new(MemoEvaluator::new()),
        llm_backend,
    ));
    let graph = Arc::new(ToolRouterGraph::new(search_tool, math_tool));

    let gateway = Arc::new(AnswerGateway::new(
        cache.clone(),
        graph,
        config.answer_ttl,
    ));
    let state = AppState::new(cache.clone(), gateway);
    info!("Gateway initialized");

    // Start background cleanup task
    let cleanup_handle = spawn_cleanup_task(cache, config.cleanup_interval);
    info!("Background cleanup task started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .unwrap();

    info!("Server shutdown complete");
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    cleanup_handle.abort();
    warn!("Cleanup task aborted");
}
