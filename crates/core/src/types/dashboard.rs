//! Dashboard statistics.

use serde::{Deserialize, Deserializer, Serialize};

use super::credit::CreditTransaction;
use super::id::QueryId;

/// A past search run by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub id: QueryId,
    /// `None` or `"Tüm Şehirler"` for all-cities searches.
    #[serde(default)]
    pub sehir: Option<String>,
    pub kategori: String,
    #[serde(default)]
    pub ulke: Option<String>,
    #[serde(default)]
    pub result_count: i64,
    #[serde(default)]
    pub created_at: String,
}

/// Response of `GET /api/dashboard/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub balance: i64,
    pub total_queries: i64,
    pub total_companies: i64,
    pub queries_today: i64,
    #[serde(default)]
    pub companies_today: i64,
    /// Newest first, at most ten.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub recent_transactions: Vec<CreditTransaction>,
    /// Newest first, at most ten.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub recent_queries: Vec<QueryRecord>,
}

/// The backend sends `null` instead of `[]` for users without history.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
