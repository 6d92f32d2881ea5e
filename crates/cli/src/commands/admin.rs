//! Admin console commands.
//!
//! # Usage
//!
//! ```bash
//! # Find users by email or username
//! leadscout admin users -s elif
//!
//! # Add 50 credits to user 4
//! leadscout admin credit 4 50 "Kampanya"
//!
//! # Ledger of user 4
//! leadscout admin transactions 4
//! ```

use std::io;

use leadscout_client::ApiClient;
use leadscout_client::pages::{AdminPage, CreditForm};
use leadscout_core::UserId;

use super::CliError;
use crate::output;

pub async fn users(api: ApiClient, query: &str) -> Result<(), CliError> {
    let list = AdminPage::new(api).search_users(query).await?;
    let mut out = io::stdout().lock();
    output::users(&mut out, &list)?;
    Ok(())
}

pub async fn credit(
    api: ApiClient,
    user_id: UserId,
    amount: String,
    description: String,
) -> Result<(), CliError> {
    let form = CreditForm {
        amount,
        description,
    };
    let message = AdminPage::new(api).add_credit(user_id, &form).await?;
    let mut out = io::stdout().lock();
    output::line(&mut out, &message)?;
    Ok(())
}

pub async fn transactions(api: ApiClient, user_id: UserId) -> Result<(), CliError> {
    let list = AdminPage::new(api).transactions(user_id).await?;
    let mut out = io::stdout().lock();
    output::transactions(&mut out, &list)?;
    Ok(())
}
