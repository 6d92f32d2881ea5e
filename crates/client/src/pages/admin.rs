//! Admin console: user search, credit top-ups and ledgers.

use leadscout_core::{CreditAmount, CreditGrant, ManagedUser, UserId};
use tracing::{info, instrument};

use super::ListView;
use super::dashboard::TransactionRow;
use super::guard::require_admin;
use crate::api::ApiClient;
use crate::error::ControllerError;
use crate::format::credits;

pub const MSG_NO_USERS: &str = "Kullanıcı bulunamadı";
pub const MSG_INVALID_AMOUNT: &str = "Geçerli bir kredi miktarı girin";
pub const MSG_DESCRIPTION_REQUIRED: &str = "Açıklama girin";
pub const MSG_NO_TRANSACTIONS: &str = "İşlem bulunamadı";

/// A user card in the admin list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCard {
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// `"{balance} kredi"`.
    pub balance: String,
    pub is_admin: bool,
}

impl From<&ManagedUser> for UserCard {
    fn from(user: &ManagedUser) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            balance: credits(user.balance),
            is_admin: user.is_admin,
        }
    }
}

/// Credit top-up form input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreditForm {
    /// Raw amount field.
    pub amount: String,
    pub description: String,
}

impl CreditForm {
    /// Check the form and build the request body.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Validation` for a non-positive or
    /// non-numeric amount, then for a blank description.
    pub fn validate(&self) -> Result<CreditGrant, ControllerError> {
        let amount = CreditAmount::parse(&self.amount)
            .map_err(|_| ControllerError::Validation(MSG_INVALID_AMOUNT.to_string()))?;
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ControllerError::Validation(
                MSG_DESCRIPTION_REQUIRED.to_string(),
            ));
        }
        Ok(CreditGrant {
            amount,
            description: description.to_string(),
        })
    }
}

/// The admin console.
#[derive(Debug, Clone)]
pub struct AdminPage {
    api: ApiClient,
}

impl AdminPage {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Users matching `query` by email or username; all users when blank.
    ///
    /// # Errors
    ///
    /// `LoginRequired` when signed out, `Forbidden` for non-admins,
    /// otherwise the API error.
    #[instrument(skip(self))]
    pub async fn search_users(&self, query: &str) -> Result<ListView<UserCard>, ControllerError> {
        require_admin(self.api.session())?;
        let users = self.api.admin_users(Some(query)).await?;
        Ok(ListView::new(
            users.iter().map(Into::into).collect(),
            MSG_NO_USERS,
        ))
    }

    /// Add credits to a user and return the confirmation message.
    ///
    /// Topping up the signed-in admin also updates the stored balance.
    ///
    /// # Errors
    ///
    /// Validation errors before any request; `Action("Kredi ekleme hatası:
    /// ...")` when the backend refuses.
    #[instrument(skip(self, form), fields(user_id = %user_id))]
    pub async fn add_credit(
        &self,
        user_id: UserId,
        form: &CreditForm,
    ) -> Result<String, ControllerError> {
        let session = require_admin(self.api.session())?;
        let grant = form.validate()?;

        let receipt = self
            .api
            .admin_add_credit(user_id, &grant)
            .await
            .map_err(|e| match ControllerError::from(e) {
                ControllerError::Api(api) => {
                    ControllerError::Action(format!("Kredi ekleme hatası: {}", api.message()))
                }
                other => other,
            })?;

        if session.user.id == user_id {
            self.api.session().set_balance(receipt.new_balance)?;
        }
        info!(
            amount = grant.amount.get(),
            new_balance = receipt.new_balance,
            "Credits added"
        );
        Ok(format!("Kredi eklendi! Yeni bakiye: {}", receipt.new_balance))
    }

    /// Credit ledger of a user.
    ///
    /// # Errors
    ///
    /// `LoginRequired` when signed out, `Forbidden` for non-admins,
    /// otherwise the API error.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn transactions(
        &self,
        user_id: UserId,
    ) -> Result<ListView<TransactionRow>, ControllerError> {
        require_admin(self.api.session())?;
        let transactions = self.api.admin_transactions(user_id).await?;
        Ok(ListView::new(
            transactions.iter().map(Into::into).collect(),
            MSG_NO_TRANSACTIONS,
        ))
    }
}
