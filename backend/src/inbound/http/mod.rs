//! HTTP inbound adapter exposing the REST endpoints of both services.

pub mod error;
pub mod health;
pub mod orders;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;
