//! Domain ports for the aggregation service.
//!
//! Driving ports are called by inbound adapters; driven ports are implemented
//! by outbound adapters. Handlers and services only see these traits, so
//! fixtures and mocks can stand in for the network and the seed store.

mod macros;
mod record_store;
mod user_directory;
mod user_orders_query;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use record_store::MockRecordStore;
pub use record_store::RecordStore;
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{UserDirectory, UserDirectoryError};
#[cfg(test)]
pub use user_orders_query::MockUserOrdersQuery;
pub use user_orders_query::UserOrdersQuery;
