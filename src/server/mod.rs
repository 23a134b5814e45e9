// Server module entry
// Listener setup, connection serving, signal handling and graceful shutdown

pub mod connection;
mod error;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is exposed as server_loop
#[path = "loop.rs"]
pub mod server_loop;

pub use error::ServerError;
pub use listener::create_reusable_listener;
pub use server_loop::run_server_loop;
pub use signal::{start_signal_handler, SignalHandler};
