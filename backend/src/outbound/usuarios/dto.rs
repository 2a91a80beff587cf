//! Wire types for the users service payload.

use serde::Deserialize;

use crate::domain::User;

/// One entry of `GET /usuarios`. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    id: i64,
    nombre: String,
}

impl From<UserDto> for User {
    fn from(value: UserDto) -> Self {
        Self::new(value.id, value.nombre)
    }
}
