//! Credit amounts and ledger records.

use serde::{Deserialize, Serialize};

use super::id::TransactionId;

/// Errors for a credit amount entered by an admin.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CreditError {
    /// Input was not an integer.
    #[error("credit amount must be a whole number: {0}")]
    NotANumber(String),
    /// Zero or negative amount.
    #[error("credit amount must be positive (got {0})")]
    NotPositive(i64),
}

/// A strictly positive number of credits to add to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CreditAmount(i64);

impl CreditAmount {
    /// Validate a numeric amount.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::NotPositive`] for `amount <= 0`.
    pub const fn new(amount: i64) -> Result<Self, CreditError> {
        if amount <= 0 {
            return Err(CreditError::NotPositive(amount));
        }
        Ok(Self(amount))
    }

    /// Parse an amount typed into a form field.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::NotANumber`] for non-integer input and
    /// [`CreditError::NotPositive`] for `amount <= 0`.
    pub fn parse(input: &str) -> Result<Self, CreditError> {
        let trimmed = input.trim();
        let amount = trimmed
            .parse::<i64>()
            .map_err(|_| CreditError::NotANumber(trimmed.to_owned()))?;
        Self::new(amount)
    }

    /// Number of credits.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// One entry of a user's credit ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditTransaction {
    /// Ledger entry ID.
    pub id: TransactionId,
    /// Signed amount; positive for top-ups, negative for spend.
    pub amount: i64,
    /// Human readable reason.
    #[serde(default)]
    pub description: String,
    /// ISO-8601 timestamp as sent by the backend.
    #[serde(default)]
    pub created_at: String,
}

impl CreditTransaction {
    /// Whether this entry added credits.
    #[must_use]
    pub const fn is_credit(&self) -> bool {
        self.amount > 0
    }
}

/// Request body of `POST /api/admin/users/{id}/credit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreditGrant {
    /// Credits to add.
    pub amount: CreditAmount,
    /// Reason recorded on the ledger.
    pub description: String,
}

/// Response of a successful credit top-up.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreditGrantReceipt {
    /// Backend confirmation text.
    #[serde(default)]
    pub message: String,
    /// Balance after the top-up.
    pub new_balance: i64,
}
