//! HTTP API surface.
//!
//! One route per application view, nested under `/api/`. Auth pages are
//! public; everything else requires a bearer token resolved to a
//! `Session` by the auth middleware.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod types;

pub use error::ApiError;
pub use router::app_router;
pub use types::ApiContext;
