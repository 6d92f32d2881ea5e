//! Company (lead) records, activities and list filters.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::{ActivityId, CompanyId};

/// Select value meaning "no filter" for city, district and stage.
pub const ALL_OPTION: &str = "Hepsi";

/// A company collected by a search.
///
/// All fields are owned by the backend. Unknown fields are kept in
/// [`Company::extra`] so a record survives a round trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Missing on fresh search results that were not saved yet.
    #[serde(default)]
    pub id: Option<CompanyId>,
    /// Business name.
    pub firma_adi: String,
    #[serde(default)]
    pub sehir: Option<String>,
    #[serde(default)]
    pub ilce: Option<String>,
    #[serde(default)]
    pub ulke: Option<String>,
    #[serde(default)]
    pub adres: Option<String>,
    #[serde(default)]
    pub telefon: Option<String>,
    #[serde(default)]
    pub web: Option<String>,
    /// Sales pipeline stage.
    #[serde(default)]
    pub asama: Option<String>,
    #[serde(default)]
    pub kategori: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Remaining backend fields (`business_status`, `plus_code`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A logged interaction with a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    /// Activity type, one of the configured `aktivite_tipleri`.
    pub aktivite_tipi: String,
    /// Outcome or note.
    #[serde(default)]
    pub sonuc: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

/// Request body for `POST /api/companies/{id}/activities`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewActivity {
    pub aktivite_tipi: String,
    pub sonuc: Option<String>,
}

/// Request body for `PATCH /api/companies/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageUpdate {
    pub asama: String,
}

/// Phone number presence filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneFilter {
    /// No filtering (`hepsi`).
    #[default]
    #[serde(rename = "hepsi")]
    All,
    /// Only companies with a phone number (`var`).
    #[serde(rename = "var")]
    WithPhone,
    /// Only companies without a phone number (`yok`).
    #[serde(rename = "yok")]
    WithoutPhone,
}

impl PhoneFilter {
    /// Wire value used by the list and export endpoints.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "hepsi",
            Self::WithPhone => "var",
            Self::WithoutPhone => "yok",
        }
    }
}

impl std::fmt::Display for PhoneFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PhoneFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hepsi" | "all" => Ok(Self::All),
            "var" | "with" => Ok(Self::WithPhone),
            "yok" | "without" => Ok(Self::WithoutPhone),
            other => Err(format!("invalid phone filter: {other} (expected hepsi, var or yok)")),
        }
    }
}

/// Filters for the company list and Excel export.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompanyFilter {
    pub sehir: Option<String>,
    pub ilce: Option<String>,
    pub asama: Option<String>,
    pub telefon: PhoneFilter,
}

impl CompanyFilter {
    /// Query parameters for the backend, omitting "no filter" values.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (key, value) in [
            ("sehir_filtre", &self.sehir),
            ("ilce_filtre", &self.ilce),
            ("asama_filtre", &self.asama),
        ] {
            if let Some(value) = value.as_deref().and_then(selected_option) {
                pairs.push((key.to_owned(), value.to_owned()));
            }
        }
        if self.telefon != PhoneFilter::All {
            pairs.push(("telefon_filtre".to_owned(), self.telefon.as_str().to_owned()));
        }
        pairs
    }

    /// The city filter, if one is selected.
    #[must_use]
    pub fn selected_city(&self) -> Option<&str> {
        self.sehir.as_deref().and_then(selected_option)
    }
}

/// `None` for blank input and the [`ALL_OPTION`] sentinel.
fn selected_option(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty() && value != ALL_OPTION).then_some(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_company_keeps_unknown_fields() {
        let json = r#"{
            "id": 5, "firma_adi": "Deniz Lojistik", "sehir": "İzmir",
            "rating": 4.5, "business_status": "OPERATIONAL", "plus_code": null
        }"#;
        let company: Company = serde_json::from_str(json).unwrap();
        assert_eq!(company.id, Some(CompanyId::new(5)));
        assert_eq!(company.rating, Some(4.5));
        assert_eq!(company.extra["business_status"], "OPERATIONAL");

        let back = serde_json::to_value(&company).unwrap();
        assert_eq!(back["business_status"], "OPERATIONAL");
        assert!(back.get("plus_code").is_some());
    }

    #[test]
    fn test_search_result_without_id() {
        let company: Company = serde_json::from_str(r#"{"firma_adi": "Yeni Firma"}"#).unwrap();
        assert!(company.id.is_none());
        assert!(company.telefon.is_none());
    }

    #[test]
    fn test_filter_skips_all_option_and_blanks() {
        let filter = CompanyFilter {
            sehir: Some("Hepsi".to_owned()),
            ilce: Some("  ".to_owned()),
            asama: Some("Yeni".to_owned()),
            telefon: PhoneFilter::All,
        };
        assert_eq!(
            filter.query_pairs(),
            vec![("asama_filtre".to_owned(), "Yeni".to_owned())]
        );
        assert_eq!(filter.selected_city(), None);
    }

    #[test]
    fn test_filter_includes_phone_presence() {
        let filter = CompanyFilter {
            sehir: Some("Ankara".to_owned()),
            telefon: PhoneFilter::WithoutPhone,
            ..CompanyFilter::default()
        };
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("sehir_filtre".to_owned(), "Ankara".to_owned()),
                ("telefon_filtre".to_owned(), "yok".to_owned()),
            ]
        );
    }

    #[test]
    fn test_phone_filter_parse() {
        assert_eq!("var".parse::<PhoneFilter>().unwrap(), PhoneFilter::WithPhone);
        assert_eq!("HEPSI".parse::<PhoneFilter>().unwrap(), PhoneFilter::All);
        assert!("belki".parse::<PhoneFilter>().is_err());
    }
}
