use leadscout_core::{SearchRequest, SearchResponse};
use reqwest::Method;
use tracing::instrument;

use super::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Run a paid search (`POST /api/search/`).
    ///
    /// The backend deducts credits and saves the results before answering.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the balance is insufficient or the
    /// search provider fails, otherwise the usual request errors.
    #[instrument(skip(self, request), fields(kategori = %request.kategori, limit = request.limit))]
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError> {
        self.send_json(Method::POST, "/api/search/", request).await
    }
}
