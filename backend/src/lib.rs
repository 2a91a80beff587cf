//! Order aggregation backend.
//!
//! Two HTTP services share this library: a user directory that publishes the
//! seeded user list, and an order aggregation service that looks a user up in
//! that directory over HTTP and joins it with locally held orders.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use domain::TraceId;
pub use middleware::Trace;
