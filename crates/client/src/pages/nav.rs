//! Navigation bar and theme switching.

use leadscout_core::{Theme, User};
use tracing::{debug, instrument, warn};

use crate::api::ApiClient;
use crate::error::ControllerError;

/// Navigation bar contents for a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavView {
    /// `"{username} ({balance} kredi)"`.
    pub label: String,
    pub show_admin_link: bool,
    pub theme: Theme,
    pub theme_icon: &'static str,
}

impl NavView {
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            label: format!("{} ({} kredi)", user.username, user.balance),
            show_admin_link: user.is_admin,
            theme: user.theme,
            theme_icon: theme_icon(user.theme),
        }
    }
}

/// Icon on the theme toggle button.
#[must_use]
pub const fn theme_icon(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "🌙",
        Theme::Light => "☀️",
    }
}

/// Reads and changes the theme of the stored user.
#[derive(Debug, Clone)]
pub struct ThemeSwitcher {
    api: ApiClient,
}

impl ThemeSwitcher {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Theme of the stored user; dark when signed out.
    ///
    /// # Errors
    ///
    /// Returns `Session` if the store cannot be read.
    pub fn current(&self) -> Result<Theme, ControllerError> {
        Ok(self
            .api
            .session()
            .load()?
            .map(|s| s.user.theme)
            .unwrap_or_default())
    }

    /// Switch to `theme`.
    ///
    /// The stored user is updated first; the backend is told afterwards when
    /// a token exists. A failed backend update is logged and otherwise
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns `Session` if the store cannot be read or written.
    #[instrument(skip(self))]
    pub async fn apply(&self, theme: Theme) -> Result<Theme, ControllerError> {
        let store = self.api.session();
        if store.update_user(|user| user.theme = theme)?.is_none() {
            debug!("No stored user; theme applied locally only");
            return Ok(theme);
        }

        if store.token()?.is_some()
            && let Err(e) = self.api.update_theme(theme).await
        {
            warn!(error = %e, "Failed to save theme preference");
        }
        Ok(theme)
    }

    /// Flip dark and light.
    ///
    /// # Errors
    ///
    /// Returns `Session` if the store cannot be read or written.
    pub async fn toggle(&self) -> Result<Theme, ControllerError> {
        let next = self.current()?.toggled();
        self.apply(next).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadscout_core::UserId;

    #[test]
    fn test_nav_label_and_admin_link() {
        let user = User {
            id: UserId::new(2),
            username: "elif".to_owned(),
            email: "elif@example.com".to_owned(),
            balance: 75,
            is_admin: true,
            theme: Theme::Light,
        };
        let nav = NavView::from_user(&user);
        assert_eq!(nav.label, "elif (75 kredi)");
        assert!(nav.show_admin_link);
        assert_eq!(nav.theme_icon, "☀️");
    }

    #[test]
    fn test_theme_icons() {
        assert_eq!(theme_icon(Theme::Dark), "🌙");
        assert_eq!(theme_icon(Theme::Light), "☀️");
    }
}
