//! Core types for LeadScout.
//!
//! Type-safe wrappers and record structs mirroring the backend's JSON.

pub mod admin;
pub mod company;
pub mod credit;
pub mod dashboard;
pub mod email;
pub mod id;
pub mod search;
pub mod settings;
pub mod user;

pub use admin::ManagedUser;
pub use company::{
    ALL_OPTION, Activity, Company, CompanyFilter, NewActivity, PhoneFilter, StageUpdate,
};
pub use credit::{CreditAmount, CreditError, CreditGrant, CreditGrantReceipt, CreditTransaction};
pub use dashboard::{DashboardStats, QueryRecord};
pub use email::{Email, EmailError};
pub use id::*;
pub use search::{SearchRequest, SearchResponse};
pub use settings::AppSettings;
pub use user::{AuthGrant, Theme, ThemeParseError, User};
