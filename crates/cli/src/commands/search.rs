//! Search commands.

use std::io;

use leadscout_client::ApiClient;
use leadscout_client::pages::{SearchForm, SearchPage};

use super::CliError;
use crate::output;

pub async fn run(api: ApiClient, form: SearchForm) -> Result<(), CliError> {
    let view = SearchPage::new(api).search(&form).await?;
    let mut out = io::stdout().lock();
    output::search_results(&mut out, &view)?;
    Ok(())
}

pub async fn options(api: ApiClient) -> Result<(), CliError> {
    let page = SearchPage::new(api);
    let settings = page.options().await?;
    let mut out = io::stdout().lock();
    output::settings(&mut out, settings)?;
    Ok(())
}
