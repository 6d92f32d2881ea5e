//! Page controllers.
//!
//! Each controller owns its page state, guards on the session, calls the
//! API and returns plain view-model structs. Rendering those to a terminal
//! or HTML is the caller's job.

pub mod admin;
pub mod auth;
pub mod companies;
pub mod dashboard;
pub mod guard;
pub mod nav;
pub mod search;

pub use admin::{AdminPage, CreditForm};
pub use auth::{AuthPage, LoginForm, RegisterForm};
pub use companies::CompaniesPage;
pub use dashboard::{DashboardPage, DashboardView};
pub use nav::{NavView, ThemeSwitcher};
pub use search::{SearchForm, SearchPage};

/// Navigation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Companies,
    Search,
    Admin,
}

impl Route {
    /// Path of the page in the web front end.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Dashboard => "/dashboard",
            Self::Companies => "/companies",
            Self::Search => "/search",
            Self::Admin => "/admin",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// A list section: either rows or a fixed empty-state message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView<T> {
    Empty(&'static str),
    Items(Vec<T>),
}

impl<T> ListView<T> {
    /// `Empty(message)` when `items` is empty.
    #[must_use]
    pub fn new(items: Vec<T>, empty_message: &'static str) -> Self {
        if items.is_empty() {
            Self::Empty(empty_message)
        } else {
            Self::Items(items)
        }
    }

    /// Rows; empty for [`ListView::Empty`].
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Empty(_) => &[],
            Self::Items(items) => items.as_slice(),
        }
    }

    /// The empty-state message, if there are no rows.
    #[must_use]
    pub const fn empty_message(&self) -> Option<&'static str> {
        match self {
            Self::Empty(message) => Some(message),
            Self::Items(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_view_empty() {
        let view: ListView<u8> = ListView::new(Vec::new(), "Henüz işlem yok");
        assert_eq!(view.empty_message(), Some("Henüz işlem yok"));
        assert!(view.items().is_empty());
    }

    #[test]
    fn test_list_view_items() {
        let view = ListView::new(vec![1, 2], "Henüz işlem yok");
        assert_eq!(view.empty_message(), None);
        assert_eq!(view.items(), &[1, 2]);
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Login.path(), "/");
        assert_eq!(Route::Admin.to_string(), "/admin");
    }
}
