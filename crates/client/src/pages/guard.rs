//! Session guards run on page load.

use tracing::debug;

use crate::error::ControllerError;
use crate::session::{Session, SessionStore};

/// The current session, or [`ControllerError::LoginRequired`].
///
/// # Errors
///
/// Returns `LoginRequired` when signed out and `Session` if the store cannot
/// be read.
pub fn require_session(store: &SessionStore) -> Result<Session, ControllerError> {
    store.load()?.ok_or_else(|| {
        debug!("No session; redirecting to login");
        ControllerError::LoginRequired
    })
}

/// The current session if it belongs to an admin.
///
/// # Errors
///
/// Returns `LoginRequired` when signed out and `Forbidden` for non-admins.
pub fn require_admin(store: &SessionStore) -> Result<Session, ControllerError> {
    let session = require_session(store)?;
    if !session.user.is_admin {
        debug!(user_id = %session.user.id, "Non-admin on admin page");
        return Err(ControllerError::Forbidden);
    }
    Ok(session)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pages::Route;
    use leadscout_core::{Theme, User, UserId};

    fn store_with(is_admin: bool) -> SessionStore {
        let store = SessionStore::in_memory();
        store
            .save(&Session::new(
                "tok",
                User {
                    id: UserId::new(1),
                    username: "zeynep".to_owned(),
                    email: "zeynep@example.com".to_owned(),
                    balance: 0,
                    is_admin,
                    theme: Theme::Dark,
                },
            ))
            .unwrap();
        store
    }

    #[test]
    fn test_signed_out_redirects_to_login() {
        let err = require_session(&SessionStore::in_memory()).unwrap_err();
        assert_eq!(err.redirect(), Some(Route::Login));
    }

    #[test]
    fn test_admin_guard() {
        assert!(require_admin(&store_with(true)).is_ok());

        let err = require_admin(&store_with(false)).unwrap_err();
        assert!(matches!(err, ControllerError::Forbidden));
        assert_eq!(err.redirect(), Some(Route::Dashboard));
    }
}
