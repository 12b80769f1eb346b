//! Users service with resilient store connection handling.
//!
//! The binary resolves a store connection at startup, falls back to degraded
//! mode when every attempt fails, and serves HTTP either way.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
