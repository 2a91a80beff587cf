//! Locally held orders.
//!
//! An order points at its owner by [`UserId`] only; there is no object graph
//! and no check that the owner exists in the directory.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;

/// An order owned by a directory user.
///
/// Serialises as `{ "id": <int|null>, "idUsuario": <int>, "producto": <string> }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    #[serde(default)]
    #[schema(example = 1)]
    id: Option<i64>,
    #[serde(rename = "idUsuario")]
    user_id: UserId,
    #[serde(rename = "producto")]
    #[schema(example = "Computador")]
    product: String,
}

impl Order {
    /// Build an order that has not been assigned an identifier yet.
    pub fn new(user_id: impl Into<UserId>, product: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            product: product.into(),
        }
    }

    /// Return the order with the given identifier.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Identifier, if one has been assigned.
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Owning user.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Product name.
    #[must_use]
    pub fn product(&self) -> &str {
        self.product.as_str()
    }

    /// Whether the order belongs to `user_id`.
    #[must_use]
    pub fn belongs_to(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}
