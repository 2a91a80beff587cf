//! OpenAPI documentation for both services.
//!
//! Each service gets its own document: [`UsuariosApiDoc`] for the user
//! directory and [`PedidosApiDoc`] for order aggregation. Documents are served
//! by Swagger UI in debug builds and printed by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, Order, User};
use crate::inbound::http::orders::UserOrdersResponse;

/// OpenAPI document for the user directory service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Usuarios service API",
        description = "Publishes the seeded user directory."
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(User, Error, ErrorCode)),
    tags(
        (name = "usuarios", description = "User directory"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct UsuariosApiDoc;

/// OpenAPI document for the order aggregation service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pedidos service API",
        description = "Joins a directory user with the orders it owns."
    ),
    paths(
        crate::inbound::http::orders::get_user_orders,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(User, Order, UserOrdersResponse, Error, ErrorCode)),
    tags(
        (name = "pedidos", description = "Order aggregation"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct PedidosApiDoc;
