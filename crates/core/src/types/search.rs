//! Paid company search.

use serde::{Deserialize, Serialize};

use super::company::Company;

/// Request body of `POST /api/search/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    /// City to search in; `None` when searching all cities.
    pub sehir: Option<String>,
    /// Country name, e.g. `"Türkiye"`.
    pub ulke: String,
    /// Business category, free text.
    pub kategori: String,
    /// Maximum results (per city when searching all cities).
    pub limit: u32,
    pub tum_sehirler: bool,
    /// Only keep results that have a phone number.
    pub telefon_filtre: bool,
}

/// Response of a successful search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub companies: Vec<Company>,
    #[serde(default)]
    pub total_found: i64,
    #[serde(default)]
    pub credits_used: i64,
    pub remaining_balance: i64,
}
