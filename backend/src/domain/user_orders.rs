//! Lookup-and-join of a directory user with locally held orders.
//!
//! ```text
//! fetch users from directory -> first user with matching id?
//!     no  -> UserNotFound (data, not a failure)
//!     yes -> orders filtered by owner, original order kept -> Found
//! ```
//!
//! Directory failures abort the lookup with a service-unavailable error. The
//! service holds no mutable state, so concurrent lookups need no locking and
//! repeated lookups against unchanged data return identical results.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use super::ports::{RecordStore, UserDirectory, UserDirectoryError, UserOrdersQuery};
use super::{Error, Order, User, UserId};

/// Message returned when the directory does not know the requested user.
pub const USER_NOT_FOUND_MESSAGE: &str = "Usuario no encontrado";

/// Outcome of an aggregation lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserOrders {
    /// The user exists; `orders` holds every order it owns, possibly none.
    Found {
        /// Matched directory user.
        user: User,
        /// Orders owned by the user, in store order.
        orders: Vec<Order>,
    },
    /// The directory does not list the requested user.
    UserNotFound,
}

/// Aggregation service backed by a user directory and a record store.
#[derive(Clone)]
pub struct UserOrdersService {
    directory: Arc<dyn UserDirectory>,
    records: Arc<dyn RecordStore>,
}

impl UserOrdersService {
    /// Create the service from its collaborators.
    pub fn new(directory: Arc<dyn UserDirectory>, records: Arc<dyn RecordStore>) -> Self {
        Self { directory, records }
    }
}

#[async_trait]
impl UserOrdersQuery for UserOrdersService {
    async fn orders_for_user(&self, user_id: UserId) -> Result<UserOrders, Error> {
        let users = self
            .directory
            .fetch_users()
            .await
            .map_err(map_directory_error)?;
        debug!(%user_id, directory_size = users.len(), "searching directory");

        let Some(user) = users.into_iter().find(|user| user.id() == user_id) else {
            info!(%user_id, "user not listed by directory");
            return Ok(UserOrders::UserNotFound);
        };

        let orders: Vec<Order> = self
            .records
            .list_orders()
            .await
            .into_iter()
            .filter(|order| order.belongs_to(user_id))
            .collect();
        debug!(%user_id, order_count = orders.len(), "joined user with orders");
        Ok(UserOrders::Found { user, orders })
    }
}

fn map_directory_error(error: UserDirectoryError) -> Error {
    warn!(%error, reason = error.reason(), "user directory unavailable");
    Error::service_unavailable("user directory unavailable").with_details(json!({
        "dependency": "usuarios",
        "reason": error.reason(),
    }))
}
