//! Command implementations.
//!
//! Each command drives one page controller from `leadscout-client` and hands
//! the resulting view to [`crate::output`].

pub mod admin;
pub mod auth;
pub mod companies;
pub mod dashboard;
pub mod search;

use leadscout_client::pages::Route;
use leadscout_client::{ApiError, ConfigError, ControllerError};
use thiserror::Error;

/// Errors that end a command with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// Environment configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP client could not be built.
    #[error("Failed to set up the HTTP client: {0}")]
    Client(#[from] ApiError),

    /// A page controller failed.
    #[error("{}", .0.user_message())]
    Controller(#[from] ControllerError),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A destructive command was run without `--yes`.
    #[error("Refusing to {0} without --yes")]
    NotConfirmed(&'static str),
}

impl CliError {
    /// Where a browser would have been sent, if anywhere.
    pub const fn redirect(&self) -> Option<Route> {
        match self {
            Self::Controller(e) => e.redirect(),
            _ => None,
        }
    }
}

/// Require `--yes` for destructive commands.
///
/// # Errors
///
/// Returns `CliError::NotConfirmed` when `yes` is false.
pub const fn confirm(yes: bool, action: &'static str) -> Result<(), CliError> {
    if yes {
        Ok(())
    } else {
        Err(CliError::NotConfirmed(action))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm() {
        assert!(confirm(true, "delete the company").is_ok());
        let err = confirm(false, "delete the company").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Refusing to delete the company without --yes"
        );
    }

    #[test]
    fn test_redirects_follow_controller() {
        assert_eq!(
            CliError::from(ControllerError::LoginRequired).redirect(),
            Some(Route::Login)
        );
        assert_eq!(
            CliError::from(ControllerError::Forbidden).redirect(),
            Some(Route::Dashboard)
        );
        assert_eq!(CliError::NotConfirmed("x").redirect(), None);
    }

    #[test]
    fn test_controller_message_is_user_facing() {
        let err = CliError::from(ControllerError::Validation("Açıklama girin".into()));
        assert_eq!(err.to_string(), "Açıklama girin");
    }
}
