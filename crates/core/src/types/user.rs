//! Signed-in user profile and UI theme.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// Colour theme preference stored on the user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Wire value (`"dark"` or `"light"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a theme name is not `dark` or `light`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid theme: {0} (expected dark or light)")]
pub struct ThemeParseError(pub String);

impl std::str::FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(ThemeParseError(s.to_owned())),
        }
    }
}

/// User profile returned by the auth endpoints and kept in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend user ID.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Account email as stored by the backend.
    pub email: String,
    /// Remaining search credits.
    pub balance: i64,
    /// Whether the user may open the admin console.
    #[serde(default)]
    pub is_admin: bool,
    /// Preferred theme.
    #[serde(default)]
    pub theme: Theme,
}

/// Successful response of `/api/auth/login` and `/api/auth/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthGrant {
    /// Bearer token; may be empty if the backend misbehaves.
    #[serde(default)]
    pub access_token: String,
    /// Token scheme, always `bearer` in practice.
    #[serde(default)]
    pub token_type: String,
    /// Profile of the authenticated user.
    pub user: User,
}
