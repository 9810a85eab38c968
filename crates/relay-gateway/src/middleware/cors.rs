//! CORS middleware.
//!
//! Wrapper around tower-http CORS. The relay's contract is fully
//! permissive: all origins, all methods, all headers.

use tower_http::cors::{Any, CorsLayer};

/// Create the permissive CORS layer applied to the whole router.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
