//! Meeting-room allocation backend.
//!
//! The domain core validates allocation requests and guards allocation
//! deletion; inbound HTTP adapters and outbound persistence/notification
//! adapters surround it following a hexagonal layout.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request-tracing middleware attaching per-request trace identifiers.
pub use middleware::trace::Trace;
