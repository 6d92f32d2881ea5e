//! Paid company search.

use leadscout_core::{AppSettings, Company, SearchRequest, SearchResponse};
use tokio::sync::OnceCell;
use tracing::{info, instrument};

use super::ListView;
use super::companies::company_fields;
use super::guard::require_session;
use crate::api::ApiClient;
use crate::error::ControllerError;
use crate::format::rating_line;

pub const MSG_CATEGORY_REQUIRED: &str = "Lütfen kategori girin";
pub const MSG_CITY_REQUIRED: &str = "Lütfen şehir seçin veya \"Tüm Şehirler\" işaretleyin";
pub const MSG_INVALID_LIMIT: &str = "Geçerli bir sonuç limiti girin";
pub const MSG_NO_RESULTS: &str = "Sonuç bulunamadı";

/// Country used when the form leaves it blank.
pub const DEFAULT_COUNTRY: &str = "Türkiye";

/// Search form input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchForm {
    pub kategori: String,
    pub sehir: Option<String>,
    pub ulke: Option<String>,
    /// Raw limit field; must parse to an integer of at least 1.
    pub limit: String,
    pub all_cities: bool,
    pub with_phone: bool,
}

impl SearchForm {
    /// Check the form and build the request body.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Validation` with the first failing rule:
    /// category, then city, then limit.
    pub fn validate(&self) -> Result<SearchRequest, ControllerError> {
        let kategori = self.kategori.trim();
        if kategori.is_empty() {
            return Err(ControllerError::Validation(MSG_CATEGORY_REQUIRED.to_string()));
        }

        let sehir = self
            .sehir
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        if !self.all_cities && sehir.is_none() {
            return Err(ControllerError::Validation(MSG_CITY_REQUIRED.to_string()));
        }

        let limit = self
            .limit
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|l| *l >= 1)
            .ok_or_else(|| ControllerError::Validation(MSG_INVALID_LIMIT.to_string()))?;

        let ulke = self
            .ulke
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_COUNTRY);

        Ok(SearchRequest {
            sehir: if self.all_cities {
                None
            } else {
                sehir.map(ToString::to_string)
            },
            ulke: ulke.to_string(),
            kategori: kategori.to_string(),
            limit,
            tum_sehirler: self.all_cities,
            telefon_filtre: self.with_phone,
        })
    }
}

/// One result card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub title: String,
    pub fields: Vec<(&'static str, String)>,
    pub rating: Option<String>,
}

impl From<&Company> for ResultCard {
    fn from(company: &Company) -> Self {
        let fields = company_fields(company)
            .into_iter()
            .filter(|(label, _)| *label != "Kategori")
            .collect();
        Self {
            title: company.firma_adi.clone(),
            fields,
            rating: rating_line(company.rating, company.user_ratings_total),
        }
    }
}

/// Search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultsView {
    /// `"{total} sonuç bulundu ({credits} kredi harcandı)"`; absent when
    /// nothing was found.
    pub summary: Option<String>,
    pub cards: ListView<ResultCard>,
    pub remaining_balance: i64,
}

impl SearchResultsView {
    #[must_use]
    pub fn from_response(response: &SearchResponse) -> Self {
        let cards: Vec<ResultCard> = response.companies.iter().map(Into::into).collect();
        let summary = (!cards.is_empty()).then(|| {
            format!(
                "{} sonuç bulundu ({} kredi harcandı)",
                response.total_found, response.credits_used
            )
        });
        Self {
            summary,
            cards: ListView::new(cards, MSG_NO_RESULTS),
            remaining_balance: response.remaining_balance,
        }
    }
}

/// The search page.
#[derive(Debug)]
pub struct SearchPage {
    api: ApiClient,
    settings: OnceCell<AppSettings>,
}

impl SearchPage {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            settings: OnceCell::new(),
        }
    }

    /// Cities, countries and categories for the form; fetched once.
    ///
    /// # Errors
    ///
    /// `LoginRequired` when signed out or the token expired, otherwise the
    /// API error.
    pub async fn options(&self) -> Result<&AppSettings, ControllerError> {
        require_session(self.api.session())?;
        self.settings
            .get_or_try_init(|| async { self.api.app_settings().await.map_err(Into::into) })
            .await
    }

    /// Validate and run a search. The stored balance becomes the remaining
    /// balance reported by the backend.
    ///
    /// # Errors
    ///
    /// Validation errors before any request; `LoginRequired`; otherwise the
    /// backend's message (e.g. insufficient credits).
    #[instrument(skip(self, form), fields(kategori = %form.kategori))]
    pub async fn search(&self, form: &SearchForm) -> Result<SearchResultsView, ControllerError> {
        require_session(self.api.session())?;
        let request = form.validate()?;
        let response = self.api.search(&request).await?;
        self.api.session().set_balance(response.remaining_balance)?;
        info!(
            found = response.total_found,
            credits_used = response.credits_used,
            "Search completed"
        );
        Ok(SearchResultsView::from_response(&response))
    }
}
