// Server loop module
// Accepts connections until shutdown is requested, then drains open connections

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use super::error::ServerError;
use crate::config::AppState;
use crate::logger;

/// Interval between checks of the active connection counter while draining
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run the accept loop until `shutdown` is notified.
///
/// After the signal the listener is closed and open connections get up to
/// `performance.shutdown_timeout` seconds to finish.
pub async fn run_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> Result<(), ServerError> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => tracing::error!("Failed to accept connection: {e}"),
                }
            }

            () = shutdown.notified() => break,
        }
    }

    drop(listener);
    logger::log_shutdown_started(active_connections.load(Ordering::SeqCst));

    let grace = Duration::from_secs(state.config.performance.shutdown_timeout);
    let remaining = drain_connections(&active_connections, grace).await;
    logger::log_shutdown_complete(remaining);

    Ok(())
}

/// Wait until the counter reaches zero or `grace` elapses; returns what is left
async fn drain_connections(active_connections: &AtomicUsize, grace: Duration) -> usize {
    let deadline = tokio::time::Instant::now() + grace;

    loop {
        let active = active_connections.load(Ordering::SeqCst);
        if active == 0 || tokio::time::Instant::now() >= deadline {
            return active;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::recommend::RuleTable;
    use crate::server::create_reusable_listener;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    #[tokio::test]
    async fn test_drain_returns_immediately_when_idle() {
        let counter = AtomicUsize::new(0);
        assert_eq!(drain_connections(&counter, Duration::from_secs(5)).await, 0);
    }

    #[tokio::test]
    async fn test_drain_gives_up_after_grace() {
        let counter = AtomicUsize::new(2);
        assert_eq!(drain_connections(&counter, Duration::from_millis(50)).await, 2);
    }

    #[tokio::test]
    async fn test_serves_until_shutdown() {
        let mut config = Config::load_from("/nonexistent/recommender-config").unwrap();
        config.logging.access_log = false;
        config.performance.shutdown_timeout = 1;
        let state = Arc::new(AppState::new(config, RuleTable::builtin().unwrap()));

        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(Notify::new());
        let server = tokio::spawn(run_server_loop(listener, state, Arc::clone(&shutdown)));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.ends_with(r#"{"ok":true}"#));

        shutdown.notify_one();
        assert!(server.await.unwrap().is_ok());
    }
}
