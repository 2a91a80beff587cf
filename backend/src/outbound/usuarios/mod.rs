//! User directory outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `UserDirectory`
//! port against the users service.

mod dto;
mod http_directory;

pub use http_directory::{HttpUserDirectory, HttpUserDirectoryBuildError, users_endpoint};
