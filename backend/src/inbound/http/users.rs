//! User directory handlers.
//!
//! ```text
//! GET {base}/usuarios
//! ```

use actix_web::{get, web};
use tracing::debug;

use crate::domain::User;
use crate::inbound::http::state::DirectoryState;

/// List every user in the directory, in store order.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use order_aggregation::inbound::http::users::list_users;
///
/// let app = App::new().service(web::scope("/api").service(list_users));
/// ```
#[utoipa::path(
    get,
    path = "/api/usuarios",
    responses((status = 200, description = "Directory users", body = [User])),
    tags = ["usuarios"],
    operation_id = "listUsuarios"
)]
#[get("/usuarios")]
pub async fn list_users(state: web::Data<DirectoryState>) -> web::Json<Vec<User>> {
    let users = state.records.list_users().await;
    debug!(count = users.len(), "listing directory users");
    web::Json(users)
}
