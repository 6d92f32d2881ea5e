//! Application option lists and theme preference.

use leadscout_core::{AppSettings, Theme};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use super::{ApiClient, ApiResponse, RequestOptions};
use crate::error::ApiError;

#[derive(Serialize)]
struct ThemeBody {
    theme: Theme,
}

impl ApiClient {
    /// Cities, countries, categories, stages and activity types
    /// (`GET /api/config/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    #[instrument(skip(self))]
    pub async fn app_settings(&self) -> Result<AppSettings, ApiError> {
        self.get_json("/api/config/", Vec::new()).await
    }

    /// Save the theme preference (`PATCH /api/theme/`).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` when a 2xx body carries an `error`
    /// field, otherwise the usual request errors.
    #[instrument(skip(self))]
    pub async fn update_theme(&self, theme: Theme) -> Result<(), ApiError> {
        let options = RequestOptions::patch().json(&ThemeBody { theme })?;
        if let ApiResponse::Json(body) = self.call("/api/theme/", options).await?
            && let Some(error) = body.get("error").filter(|e| !e.is_null())
        {
            let message = match error {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return Err(ApiError::Rejected(message));
        }
        Ok(())
    }
}
