//! HTTP protocol layer module
//!
//! Response builders and CORS handling, independent of the endpoints that
//! use them.

pub mod cors;
pub mod response;

// Re-export commonly used types
pub use cors::{apply_cors_headers, CorsRequest};
pub use response::{
    build_404_response, build_405_response, build_413_response, build_error_response,
    build_json_response, build_options_response, HttpResponse,
};
