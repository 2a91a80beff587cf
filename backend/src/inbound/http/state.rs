//! Shared HTTP adapter state.
//!
//! Handlers accept these bundles via `actix_web::web::Data` so they depend on
//! domain ports only and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{RecordStore, UserOrdersQuery};

/// Dependencies of the user directory endpoints.
#[derive(Clone)]
pub struct DirectoryState {
    /// Seeded users and orders.
    pub records: Arc<dyn RecordStore>,
}

impl DirectoryState {
    /// Bundle the directory dependencies.
    pub fn new(records: Arc<dyn RecordStore>) -> Self {
        Self { records }
    }
}

/// Dependencies of the order aggregation endpoints.
#[derive(Clone)]
pub struct AggregationState {
    /// Lookup-and-join use-case.
    pub user_orders: Arc<dyn UserOrdersQuery>,
}

impl AggregationState {
    /// Bundle the aggregation dependencies.
    pub fn new(user_orders: Arc<dyn UserOrdersQuery>) -> Self {
        Self { user_orders }
    }
}
