//! Domain primitives, the aggregation use-case, and its ports.
//!
//! Purpose: keep users, orders, and the lookup-and-join rule free of HTTP and
//! storage concerns. Inbound adapters call the driving ports; outbound
//! adapters implement the driven ones.
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic failure payload.
//! - User / UserId: directory entries.
//! - Order: locally held orders keyed by owner.
//! - UserOrders / UserOrdersService: the aggregation outcome and service.

pub mod error;
pub mod order;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_orders;

pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::order::Order;
pub use self::trace_id::TraceId;
pub use self::user::{User, UserId};
pub use self::user_orders::{USER_NOT_FOUND_MESSAGE, UserOrders, UserOrdersService};
