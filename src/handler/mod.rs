//! Request handler module
//!
//! Connection-facing entry point: every request served by the server loop
//! passes through `handle_request`, which dispatches to the API and applies
//! CORS, `Server` and access logging.

pub mod router;

// Re-export main entry point
pub use router::handle_request;
