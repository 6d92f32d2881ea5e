//! Admin console endpoints. The backend answers 403 for non-admins.

use leadscout_core::{CreditGrant, CreditGrantReceipt, CreditTransaction, ManagedUser, UserId};
use reqwest::Method;
use tracing::instrument;

use super::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Users whose email or username contains `search`; all users when blank
    /// (`GET /api/admin/users?search=`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    #[instrument(skip(self))]
    pub async fn admin_users(&self, search: Option<&str>) -> Result<Vec<ManagedUser>, ApiError> {
        let query = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| vec![("search".to_string(), s.to_string())])
            .unwrap_or_default();
        self.get_json("/api/admin/users", query).await
    }

    /// One user (`GET /api/admin/users/{id}`).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` (404) if the user does not exist.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn admin_user(&self, id: UserId) -> Result<ManagedUser, ApiError> {
        self.get_json(&format!("/api/admin/users/{id}"), Vec::new())
            .await
    }

    /// Add credits to a user (`POST /api/admin/users/{id}/credit`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    #[instrument(skip(self, grant), fields(user_id = %id, amount = grant.amount.get()))]
    pub async fn admin_add_credit(
        &self,
        id: UserId,
        grant: &CreditGrant,
    ) -> Result<CreditGrantReceipt, ApiError> {
        self.send_json(
            Method::POST,
            &format!("/api/admin/users/{id}/credit"),
            grant,
        )
        .await
    }

    /// Credit ledger of a user (`GET /api/admin/users/{id}/transactions`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn admin_transactions(&self, id: UserId) -> Result<Vec<CreditTransaction>, ApiError> {
        self.get_json(&format!("/api/admin/users/{id}/transactions"), Vec::new())
            .await
    }
}
