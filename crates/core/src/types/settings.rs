//! Application option lists served by `GET /api/config/`.

use serde::{Deserialize, Serialize};

/// Option lists used to populate selects.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppSettings {
    /// Cities offered by the search form.
    #[serde(default)]
    pub sehirler: Vec<String>,
    /// Countries offered by the search form.
    #[serde(default)]
    pub ulkeler: Vec<String>,
    /// Suggested business categories.
    #[serde(default)]
    pub kategoriler: Vec<String>,
    /// Pipeline stages a company can be in.
    #[serde(default)]
    pub asama_secenekleri: Vec<String>,
    /// Activity types that can be logged.
    #[serde(default)]
    pub aktivite_tipleri: Vec<String>,
}
