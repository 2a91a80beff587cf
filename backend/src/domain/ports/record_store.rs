//! Driven port for the read-only record store.
//!
//! The store holds the seed collections of users and orders. Both listings
//! preserve insertion order and cannot fail; a store that can fail belongs
//! behind a different port.

use async_trait::async_trait;

use crate::domain::{Order, User};

/// Read access to seeded users and orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Return every user in insertion order.
    async fn list_users(&self) -> Vec<User>;

    /// Return every order in insertion order.
    async fn list_orders(&self) -> Vec<Order>;
}
