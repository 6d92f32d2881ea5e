//! Company (lead) endpoints.

use leadscout_core::{
    Activity, ActivityId, Company, CompanyFilter, CompanyId, NewActivity, StageUpdate,
};
use reqwest::Method;
use tracing::instrument;

use super::{ApiClient, RequestOptions};
use crate::error::ApiError;

impl ApiClient {
    /// Saved companies matching `filter` (`GET /api/companies/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    #[instrument(skip(self))]
    pub async fn list_companies(&self, filter: &CompanyFilter) -> Result<Vec<Company>, ApiError> {
        self.get_json("/api/companies/", filter.query_pairs()).await
    }

    /// One company (`GET /api/companies/{id}`).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` (404) if the company does not exist.
    #[instrument(skip(self), fields(company_id = %id))]
    pub async fn get_company(&self, id: CompanyId) -> Result<Company, ApiError> {
        self.get_json(&format!("/api/companies/{id}"), Vec::new())
            .await
    }

    /// Move a company to another pipeline stage (`PATCH /api/companies/{id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    #[instrument(skip(self), fields(company_id = %id))]
    pub async fn update_company_stage(
        &self,
        id: CompanyId,
        stage: &str,
    ) -> Result<Company, ApiError> {
        let body = StageUpdate {
            asama: stage.to_string(),
        };
        self.send_json(Method::PATCH, &format!("/api/companies/{id}"), &body)
            .await
    }

    /// Delete a company (`DELETE /api/companies/{id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(company_id = %id))]
    pub async fn delete_company(&self, id: CompanyId) -> Result<(), ApiError> {
        self.call(&format!("/api/companies/{id}"), RequestOptions::delete())
            .await?;
        Ok(())
    }

    /// Activity log of a company, newest first
    /// (`GET /api/companies/{id}/activities`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    #[instrument(skip(self), fields(company_id = %id))]
    pub async fn list_activities(&self, id: CompanyId) -> Result<Vec<Activity>, ApiError> {
        self.get_json(&format!("/api/companies/{id}/activities"), Vec::new())
            .await
    }

    /// Log an activity (`POST /api/companies/{id}/activities`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    #[instrument(skip(self, activity), fields(company_id = %id))]
    pub async fn add_activity(
        &self,
        id: CompanyId,
        activity: &NewActivity,
    ) -> Result<Activity, ApiError> {
        self.send_json(
            Method::POST,
            &format!("/api/companies/{id}/activities"),
            activity,
        )
        .await
    }

    /// Delete an activity (`DELETE /api/companies/{id}/activities/{activity_id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(company_id = %id, activity_id = %activity_id))]
    pub async fn delete_activity(
        &self,
        id: CompanyId,
        activity_id: ActivityId,
    ) -> Result<(), ApiError> {
        self.call(
            &format!("/api/companies/{id}/activities/{activity_id}"),
            RequestOptions::delete(),
        )
        .await?;
        Ok(())
    }

    /// Distinct cities among saved companies (`GET /api/companies/filters/cities`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    #[instrument(skip(self))]
    pub async fn company_cities(&self) -> Result<Vec<String>, ApiError> {
        self.get_json("/api/companies/filters/cities", Vec::new())
            .await
    }

    /// Distinct districts, optionally within one city
    /// (`GET /api/companies/filters/districts?sehir=`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    #[instrument(skip(self))]
    pub async fn company_districts(&self, city: Option<&str>) -> Result<Vec<String>, ApiError> {
        let query = city
            .map(|c| vec![("sehir".to_string(), c.to_string())])
            .unwrap_or_default();
        self.get_json("/api/companies/filters/districts", query)
            .await
    }
}
