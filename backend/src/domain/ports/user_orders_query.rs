//! Driving port for the "orders for user" use-case.

use async_trait::async_trait;

use crate::domain::{Error, UserId, UserOrders};

/// Look a user up in the directory and join it with that user's orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserOrdersQuery: Send + Sync {
    /// Resolve the aggregation for `user_id`.
    ///
    /// An absent user is a successful [`UserOrders::UserNotFound`] outcome;
    /// only directory failures are returned as errors.
    async fn orders_for_user(&self, user_id: UserId) -> Result<UserOrders, Error>;
}
