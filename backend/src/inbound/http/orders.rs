//! Order aggregation handlers.
//!
//! ```text
//! GET {base}/pedidos/{idUsuario}
//! ```
//!
//! A user missing from the directory is answered with `200 OK` and
//! `{"error":"Usuario no encontrado"}`, keeping the established wire contract.
//! Only a failing directory produces an error status (503).

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{Order, USER_NOT_FOUND_MESSAGE, User, UserOrders};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::AggregationState;
use crate::inbound::http::validation::{FieldName, parse_user_id};

const ID_USUARIO: FieldName = FieldName::new("idUsuario");

/// Response body of `GET /pedidos/{idUsuario}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum UserOrdersResponse {
    /// The user exists; its orders may be empty.
    Found {
        /// Matched directory user.
        #[serde(rename = "usuario")]
        user: User,
        /// Orders owned by the user.
        #[serde(rename = "pedidos")]
        orders: Vec<Order>,
    },
    /// The directory does not list the user.
    NotFound {
        /// Always [`USER_NOT_FOUND_MESSAGE`].
        #[schema(example = "Usuario no encontrado")]
        error: String,
    },
}

impl From<UserOrders> for UserOrdersResponse {
    fn from(value: UserOrders) -> Self {
        match value {
            UserOrders::Found { user, orders } => Self::Found { user, orders },
            UserOrders::UserNotFound => Self::NotFound {
                error: USER_NOT_FOUND_MESSAGE.to_owned(),
            },
        }
    }
}

/// Join a directory user with the orders it owns.
#[utoipa::path(
    get,
    path = "/pedidos/{idUsuario}",
    params(("idUsuario" = i64, Path, description = "Directory user identifier")),
    responses(
        (status = 200, description = "User with orders, or the not-found marker", body = UserOrdersResponse),
        (status = 400, description = "idUsuario is not an integer", body = crate::domain::Error),
        (status = 503, description = "User directory unavailable", body = crate::domain::Error)
    ),
    tags = ["pedidos"],
    operation_id = "getPedidosUsuario"
)]
#[get("/pedidos/{idUsuario}")]
pub async fn get_user_orders(
    state: web::Data<AggregationState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserOrdersResponse>> {
    let user_id = parse_user_id(&path.into_inner(), ID_USUARIO)?;
    debug!(%user_id, "aggregating orders");
    let outcome = state.user_orders.orders_for_user(user_id).await?;
    Ok(web::Json(outcome.into()))
}
