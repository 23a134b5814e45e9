use std::sync::Arc;

mod api;
mod config;
mod handler;
mod http;
mod logger;
mod recommend;
mod server;

use server::{ServerError, SignalHandler};

fn main() -> Result<(), ServerError> {
    // Usage: service-recommender [CONFIG_PATH]
    let cfg = match std::env::args().nth(1) {
        Some(path) => config::Config::load_from(&path)?,
        None => config::Config::load()?,
    };

    logger::init(&cfg.logging)?;

    let state = config::AppState::from_config(cfg)
        .inspect_err(|e| tracing::error!("Startup failed: {e}"))?;

    let runtime = runtime_builder(state.config.server.workers)
        .inspect_err(|e| tracing::error!("Startup failed: {e}"))?
        .build()?;

    runtime
        .block_on(async_main(state))
        .inspect_err(|e| tracing::error!("Server stopped with error: {e}"))
}

/// Multi-thread runtime builder; worker count follows `server.workers`,
/// defaulting to CPU cores
fn runtime_builder(workers: Option<usize>) -> Result<tokio::runtime::Builder, ServerError> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    match workers {
        Some(0) => return Err(ServerError::InvalidWorkers),
        Some(workers) => {
            builder.worker_threads(workers);
        }
        None => {}
    }
    Ok(builder)
}

async fn async_main(state: config::AppState) -> Result<(), ServerError> {
    let addr = state
        .config
        .get_socket_addr()
        .map_err(ServerError::Address)?;

    let listener = server::create_reusable_listener(addr)
        .map_err(|source| ServerError::Bind { addr, source })?;

    logger::log_server_start(&addr, &state.config, &state.rules);

    let signals = Arc::new(SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals))?;

    server::run_server_loop(listener, Arc::new(state), Arc::clone(&signals.shutdown)).await
}
