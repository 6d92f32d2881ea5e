//! Admin console records.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// A user account as listed in the admin console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedUser {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub balance: i64,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub created_at: String,
}
