// Connection handling module
// Accepts a single TCP connection and serves it over HTTP/1.1

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;

use crate::config::{AppState, PerformanceConfig};
use crate::handler;
use crate::logger;

/// Accept a connection, enforcing `performance.max_connections`.
///
/// Returns `false` when the connection was rejected because the limit is
/// reached; the stream is dropped in that case.
pub fn accept_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
    conn_counter: &Arc<AtomicUsize>,
) -> bool {
    // Increment first, then check, so concurrent accepts cannot both slip under the limit
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            tracing::warn!(
                "Max connections reached: {prev_count}/{max_conn}. Connection from {peer_addr} rejected."
            );
            drop(stream);
            return false;
        }
    }

    tracing::trace!("Accepted connection from {peer_addr}");
    handle_connection(stream, peer_addr, Arc::clone(state), Arc::clone(conn_counter));
    true
}

/// Serve one connection in a spawned task.
///
/// The whole connection is bounded by `connection_timeout`, and the active
/// counter is decremented when it ends.
fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
    conn_counter: Arc<AtomicUsize>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let performance = &state.config.performance;
        let timeout_duration = connection_timeout(performance);

        let mut builder = http1::Builder::new();
        builder.keep_alive(performance.keep_alive_timeout > 0);

        let service_state = Arc::clone(&state);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&service_state), peer_addr)),
        );

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => {
                tracing::warn!(
                    "Connection from {peer_addr} timed out after {} seconds",
                    timeout_duration.as_secs()
                );
            }
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}

/// Upper bound on a connection's lifetime.
///
/// Without keep-alive a connection carries one request, so the larger of the
/// read and write timeouts applies. With keep-alive the connection may stay
/// open for `keep_alive_timeout` seconds, but never less than one request needs.
fn connection_timeout(performance: &PerformanceConfig) -> Duration {
    let request = performance.read_timeout.max(performance.write_timeout);
    match performance.keep_alive_timeout {
        0 => Duration::from_secs(request),
        keep_alive => Duration::from_secs(request.max(keep_alive)),
    }
}
