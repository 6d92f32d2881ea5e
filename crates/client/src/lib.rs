//! LeadScout client library.
//!
//! Everything a LeadScout front end needs short of drawing pixels:
//!
//! - [`config`] - Environment-driven configuration
//! - [`session`] - Durable, origin-scoped token and profile storage
//! - [`api`] - Authenticated HTTP client for the backend API
//! - [`pages`] - Page controllers producing pure view-models
//! - [`format`] - Display helpers shared by the view-models
//!
//! Controllers own their page state explicitly. View-models are plain data
//! that any front end can render and tests can inspect.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod components;
pub mod config;
pub mod error;
pub mod format;
pub mod pages;
pub mod session;

pub use api::ApiClient;
pub use config::{ClientConfig, ConfigError, LogFormat};
pub use error::{ApiError, ControllerError};
pub use session::{Session, SessionError, SessionStore};
