//! Driven port for the remote user directory.
//!
//! The aggregation service asks the directory for its full user list on every
//! lookup. Failures are surfaced as typed errors; nothing here retries or
//! caches.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::User;

define_port_error! {
    /// Errors surfaced while calling the user directory.
    pub enum UserDirectoryError {
        /// The directory could not be reached or the connection failed.
        Transport { message: String } =>
            "user directory transport failed: {message}",
        /// The call exceeded the configured timeout.
        Timeout { message: String } =>
            "user directory timed out: {message}",
        /// The directory answered with a non-success status.
        Status { status: u16, message: String } =>
            "user directory returned status {status}: {message}",
        /// The directory payload could not be decoded.
        Decode { message: String } =>
            "user directory response decode failed: {message}",
    }
}

impl UserDirectoryError {
    /// Short machine-readable reason used in error details and logs.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Timeout { .. } => "timeout",
            Self::Status { .. } => "status",
            Self::Decode { .. } => "decode",
        }
    }
}

/// Port for listing the users published by the directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch every user the directory currently publishes, in directory order.
    async fn fetch_users(&self) -> Result<Vec<User>, UserDirectoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(UserDirectoryError::transport("refused"), "transport")]
    #[case(UserDirectoryError::timeout("10s"), "timeout")]
    #[case(UserDirectoryError::status(502_u16, "bad gateway"), "status")]
    #[case(UserDirectoryError::decode("not json"), "decode")]
    fn reasons_are_stable(#[case] error: UserDirectoryError, #[case] expected: &str) {
        assert_eq!(error.reason(), expected);
    }

    #[test]
    fn status_message_includes_code() {
        let error = UserDirectoryError::status(503_u16, "down");
        assert_eq!(
            error.to_string(),
            "user directory returned status 503: down"
        );
    }
}
