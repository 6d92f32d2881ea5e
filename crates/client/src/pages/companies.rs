//! Company browser: filterable, sortable table with a detail panel.

use std::path::{Path, PathBuf};

use leadscout_core::{
    ALL_OPTION, Activity, ActivityId, AppSettings, Company, CompanyFilter, CompanyId, NewActivity,
};
use tracing::{info, instrument, warn};

use super::ListView;
use super::guard::require_session;
use crate::api::{ApiClient, ExcelExport};
use crate::components::{SortColumn, SortState, TableColumn, company_columns};
use crate::error::{ApiError, ControllerError};
use crate::format::{MISSING, format_timestamp, or_missing, rating_line};

pub const MSG_NO_COMPANIES: &str = "Firma bulunamadı";
pub const MSG_EXPORT_FAILED: &str = "Excel export hatası";
pub const MSG_ACTIVITY_TYPE_REQUIRED: &str = "Lütfen aktivite tipi seçin";

// ─────────────────────────────────────────────────────────────────────────────
// View-models
// ─────────────────────────────────────────────────────────────────────────────

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRow {
    pub id: Option<CompanyId>,
    /// Cell text in column order.
    pub cells: Vec<String>,
    pub selected: bool,
}

/// The company table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyTableView {
    pub columns: Vec<TableColumn>,
    pub sort: SortState,
    pub rows: ListView<CompanyRow>,
}

/// Select options for the filter bar, each starting with "Hepsi".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub cities: Vec<String>,
    pub districts: Vec<String>,
    pub stages: Vec<String>,
}

/// An `<option>` of a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRow {
    pub id: ActivityId,
    pub kind: String,
    pub result: Option<String>,
    pub date: String,
}

impl From<&Activity> for ActivityRow {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id,
            kind: activity.aktivite_tipi.clone(),
            result: activity.sonuc.clone().filter(|s| !s.trim().is_empty()),
            date: format_timestamp(&activity.created_at),
        }
    }
}

/// Detail panel of the selected company.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyDetailView {
    pub id: CompanyId,
    pub title: String,
    /// Label/value pairs; missing values read "Yok".
    pub fields: Vec<(&'static str, String)>,
    /// `"{rating} ({total} değerlendirme)"` for rated companies.
    pub rating: Option<String>,
    pub stage_options: Vec<SelectOption>,
    pub activities: Vec<ActivityRow>,
    pub activity_types: Vec<String>,
}

impl CompanyDetailView {
    #[must_use]
    pub fn build(
        id: CompanyId,
        company: &Company,
        activities: &[Activity],
        settings: &AppSettings,
    ) -> Self {
        let stage_options = settings
            .asama_secenekleri
            .iter()
            .map(|stage| SelectOption {
                value: stage.clone(),
                selected: company.asama.as_deref() == Some(stage.as_str()),
            })
            .collect();
        Self {
            id,
            title: company.firma_adi.clone(),
            fields: company_fields(company),
            rating: rating_line(company.rating, company.user_ratings_total),
            stage_options,
            activities: activities.iter().map(Into::into).collect(),
            activity_types: settings.aktivite_tipleri.clone(),
        }
    }

    /// Value of a field by label.
    #[must_use]
    pub fn field(&self, label: &str) -> &str {
        self.fields
            .iter()
            .find(|(l, _)| *l == label)
            .map_or(MISSING, |(_, v)| v.as_str())
    }
}

/// Contact fields shown for a company, "Yok" for missing ones.
#[must_use]
pub fn company_fields(company: &Company) -> Vec<(&'static str, String)> {
    vec![
        ("Adres", or_missing(company.adres.as_deref())),
        ("Şehir", or_missing(company.sehir.as_deref())),
        ("İlçe", or_missing(company.ilce.as_deref())),
        ("Telefon", or_missing(company.telefon.as_deref())),
        ("Web", or_missing(company.web.as_deref())),
        ("Kategori", or_missing(company.kategori.as_deref())),
    ]
}

/// `"Hepsi"` followed by `options`.
fn with_all_option(options: Vec<String>) -> Vec<String> {
    std::iter::once(ALL_OPTION.to_string())
        .chain(options.into_iter().filter(|o| o != ALL_OPTION))
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Controller
// ─────────────────────────────────────────────────────────────────────────────

/// The company browser page.
#[derive(Debug)]
pub struct CompaniesPage {
    api: ApiClient,
    filter: CompanyFilter,
    /// As fetched; sorting never reorders this.
    companies: Vec<Company>,
    sort: SortState,
    selected: Option<CompanyId>,
    settings: Option<AppSettings>,
}

impl CompaniesPage {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            filter: CompanyFilter::default(),
            companies: Vec::new(),
            sort: SortState::default(),
            selected: None,
            settings: None,
        }
    }

    #[must_use]
    pub const fn filter(&self) -> &CompanyFilter {
        &self.filter
    }

    /// Replace the filter; takes effect on the next [`CompaniesPage::load`].
    pub fn set_filter(&mut self, filter: CompanyFilter) {
        self.filter = filter;
    }

    #[must_use]
    pub const fn selected(&self) -> Option<CompanyId> {
        self.selected
    }

    /// Companies in fetch order.
    #[must_use]
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    /// Fetch companies for the current filter.
    ///
    /// # Errors
    ///
    /// `LoginRequired` when signed out or the token expired, otherwise the
    /// API error.
    #[instrument(skip(self), fields(filter = ?self.filter))]
    pub async fn load(&mut self) -> Result<CompanyTableView, ControllerError> {
        require_session(self.api.session())?;
        self.companies = self.api.list_companies(&self.filter).await?;
        info!(count = self.companies.len(), "Companies loaded");
        Ok(self.table())
    }

    /// Header click on `column`.
    pub fn sort_by(&mut self, column: SortColumn) -> CompanyTableView {
        self.sort.toggle(column);
        self.table()
    }

    /// Current table view.
    #[must_use]
    pub fn table(&self) -> CompanyTableView {
        let rows = self
            .sort
            .apply(&self.companies)
            .into_iter()
            .map(|company| CompanyRow {
                id: company.id,
                cells: SortColumn::ALL.iter().map(|c| c.cell(company)).collect(),
                selected: company.id.is_some() && company.id == self.selected,
            })
            .collect();
        CompanyTableView {
            columns: company_columns(),
            sort: self.sort,
            rows: ListView::new(rows, MSG_NO_COMPANIES),
        }
    }

    /// City, district and stage options. Districts are limited to the
    /// selected city, if any.
    ///
    /// # Errors
    ///
    /// `LoginRequired` when the token expired, otherwise the API error.
    #[instrument(skip(self))]
    pub async fn filter_options(&mut self) -> Result<FilterOptions, ControllerError> {
        let cities = self.api.company_cities().await?;
        let districts = self
            .api
            .company_districts(self.filter.selected_city())
            .await?;
        let stages = self.settings().await?.asama_secenekleri.clone();
        Ok(FilterOptions {
            cities: with_all_option(cities),
            districts: with_all_option(districts),
            stages: with_all_option(stages),
        })
    }

    /// Open the detail panel of a company.
    ///
    /// # Errors
    ///
    /// `LoginRequired` when signed out or the token expired, otherwise the
    /// API error.
    #[instrument(skip(self), fields(company_id = %id))]
    pub async fn select(&mut self, id: CompanyId) -> Result<CompanyDetailView, ControllerError> {
        require_session(self.api.session())?;
        self.selected = Some(id);
        let company = self.api.get_company(id).await?;
        let activities = self.api.list_activities(id).await?;
        let settings = self.settings().await?;
        Ok(CompanyDetailView::build(id, &company, &activities, settings))
    }

    /// Move a company to `stage`; the local row follows.
    ///
    /// # Errors
    ///
    /// `LoginRequired` when the token expired, otherwise the API error.
    #[instrument(skip(self), fields(company_id = %id))]
    pub async fn update_stage(&mut self, id: CompanyId, stage: &str) -> Result<Company, ControllerError> {
        let updated = self.api.update_company_stage(id, stage).await?;
        if let Some(row) = self.companies.iter_mut().find(|c| c.id == Some(id)) {
            row.asama = Some(stage.to_string());
        }
        Ok(updated)
    }

    /// Log an activity and refresh the detail panel.
    ///
    /// # Errors
    ///
    /// `Validation` when `kind` is blank, otherwise as [`CompaniesPage::select`].
    #[instrument(skip(self, result), fields(company_id = %id))]
    pub async fn add_activity(
        &mut self,
        id: CompanyId,
        kind: &str,
        result: Option<&str>,
    ) -> Result<CompanyDetailView, ControllerError> {
        let kind = kind.trim();
        if kind.is_empty() {
            return Err(ControllerError::Validation(
                MSG_ACTIVITY_TYPE_REQUIRED.to_string(),
            ));
        }
        let activity = NewActivity {
            aktivite_tipi: kind.to_string(),
            sonuc: result
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(ToString::to_string),
        };
        self.api.add_activity(id, &activity).await?;
        self.select(id).await
    }

    /// Delete an activity and refresh the detail panel.
    ///
    /// # Errors
    ///
    /// As [`CompaniesPage::select`].
    #[instrument(skip(self), fields(company_id = %id, activity_id = %activity_id))]
    pub async fn delete_activity(
        &mut self,
        id: CompanyId,
        activity_id: ActivityId,
    ) -> Result<CompanyDetailView, ControllerError> {
        self.api.delete_activity(id, activity_id).await?;
        self.select(id).await
    }

    /// Delete a company, clear the selection and reload the list.
    ///
    /// # Errors
    ///
    /// As [`CompaniesPage::load`].
    #[instrument(skip(self), fields(company_id = %id))]
    pub async fn delete_company(&mut self, id: CompanyId) -> Result<CompanyTableView, ControllerError> {
        self.api.delete_company(id).await?;
        self.selected = None;
        self.load().await
    }

    /// Download the filtered companies into `dir` as
    /// `firmalar_<epoch-millis>.xlsx`.
    ///
    /// # Errors
    ///
    /// `Action("Excel export hatası")` when the backend refuses, `Io` when
    /// the file cannot be written.
    #[instrument(skip(self))]
    pub async fn export(&self, dir: &Path) -> Result<PathBuf, ControllerError> {
        let export = self
            .api
            .export_companies(&self.filter)
            .await
            .map_err(|e| match e {
                ApiError::Unauthenticated | ApiError::Session(_) => ControllerError::from(e),
                other => {
                    warn!(error = %other, "Excel export failed");
                    ControllerError::Action(MSG_EXPORT_FAILED.to_string())
                }
            })?;

        let path = dir.join(ExcelExport::file_name(
            chrono::Utc::now().timestamp_millis(),
        ));
        tokio::fs::write(&path, &export.data).await?;
        info!(path = %path.display(), bytes = export.data.len(), "Excel export written");
        Ok(path)
    }

    /// App settings, fetched once per page.
    async fn settings(&mut self) -> Result<&AppSettings, ControllerError> {
        if self.settings.is_none() {
            self.settings = Some(self.api.app_settings().await?);
        }
        Ok(self.settings.get_or_insert_with(AppSettings::default))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::session::SessionStore;
    use std::time::Duration;
    use url::Url;

    fn company(json: serde_json::Value) -> Company {
        serde_json::from_value(json).unwrap()
    }

    fn offline_page() -> CompaniesPage {
        let api = ApiClient::with_session(
            Url::parse("http://127.0.0.1:9").unwrap(),
            SessionStore::in_memory(),
            Duration::from_secs(1),
        )
        .unwrap();
        CompaniesPage::new(api)
    }

    #[test]
    fn test_detail_view_uses_fallbacks_and_selects_stage() {
        let c = company(serde_json::json!({
            "id": 3, "firma_adi": "Ege Mobilya", "sehir": "İzmir", "telefon": "",
            "asama": "Görüşüldü", "rating": 4.2, "user_ratings_total": 18
        }));
        let settings = AppSettings {
            asama_secenekleri: vec!["Yeni".into(), "Görüşüldü".into()],
            aktivite_tipleri: vec!["Arama".into()],
            ..AppSettings::default()
        };
        let view = CompanyDetailView::build(CompanyId::new(3), &c, &[], &settings);

        assert_eq!(view.title, "Ege Mobilya");
        assert_eq!(view.field("Şehir"), "İzmir");
        assert_eq!(view.field("Telefon"), MISSING);
        assert_eq!(view.field("Adres"), MISSING);
        assert_eq!(view.rating.as_deref(), Some("4.2 (18 değerlendirme)"));
        assert!(!view.stage_options[0].selected);
        assert!(view.stage_options[1].selected);
        assert_eq!(view.activity_types, vec!["Arama".to_string()]);
    }

    #[test]
    fn test_unrated_company_has_no_rating_line() {
        let c = company(serde_json::json!({"id": 1, "firma_adi": "X"}));
        let view = CompanyDetailView::build(CompanyId::new(1), &c, &[], &AppSettings::default());
        assert!(view.rating.is_none());
    }

    #[test]
    fn test_with_all_option_prepends_once() {
        assert_eq!(
            with_all_option(vec!["Ankara".into(), "Hepsi".into()]),
            vec!["Hepsi".to_string(), "Ankara".to_string()]
        );
        assert_eq!(with_all_option(Vec::new()), vec!["Hepsi".to_string()]);
    }

    #[test]
    fn test_empty_table_message() {
        let page = offline_page();
        let table = page.table();
        assert_eq!(table.rows.empty_message(), Some(MSG_NO_COMPANIES));
        assert_eq!(table.columns.len(), 6);
    }

    #[test]
    fn test_sort_keeps_fetched_order_and_marks_selection() {
        let mut page = offline_page();
        page.companies = vec![
            company(serde_json::json!({"id": 1, "firma_adi": "Zeta"})),
            company(serde_json::json!({"id": 2, "firma_adi": "Alfa"})),
        ];
        page.selected = Some(CompanyId::new(1));

        let table = page.sort_by(SortColumn::FirmaAdi);
        let rows = table.rows.items();
        assert_eq!(rows[0].cells[0], "Alfa");
        assert!(rows[1].selected);
        assert!(!rows[0].selected);

        assert_eq!(page.companies()[0].firma_adi, "Zeta");
    }

    #[tokio::test]
    async fn test_add_activity_requires_type() {
        let mut page = offline_page();
        let err = page
            .add_activity(CompanyId::new(1), "  ", Some("not"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), MSG_ACTIVITY_TYPE_REQUIRED);
    }

    #[tokio::test]
    async fn test_load_without_session_redirects() {
        let mut page = offline_page();
        let err = page.load().await.unwrap_err();
        assert!(matches!(err, ControllerError::LoginRequired));
    }
}
