//! Company browser commands.

use std::io;
use std::path::Path;

use leadscout_client::ApiClient;
use leadscout_client::components::SortColumn;
use leadscout_client::pages::CompaniesPage;
use leadscout_client::pages::guard::require_session;
use leadscout_core::{ActivityId, CompanyFilter, CompanyId};

use super::{CliError, confirm};
use crate::output;

/// Build the page once a session is known to exist.
fn page(api: ApiClient) -> Result<CompaniesPage, CliError> {
    require_session(api.session())?;
    Ok(CompaniesPage::new(api))
}

/// Load with `filter`, then apply each sort column like a header click.
pub async fn list(
    api: ApiClient,
    filter: CompanyFilter,
    sort: &[SortColumn],
) -> Result<(), CliError> {
    let mut page = page(api)?;
    page.set_filter(filter);
    let mut view = page.load().await?;
    for column in sort {
        view = page.sort_by(*column);
    }

    let mut out = io::stdout().lock();
    output::company_table(&mut out, &view)?;
    Ok(())
}

pub async fn show(api: ApiClient, id: CompanyId) -> Result<(), CliError> {
    let view = page(api)?.select(id).await?;
    let mut out = io::stdout().lock();
    output::company_detail(&mut out, &view)?;
    Ok(())
}

pub async fn stage(api: ApiClient, id: CompanyId, stage: &str) -> Result<(), CliError> {
    let mut page = page(api)?;
    let company = page.update_stage(id, stage).await?;

    let mut out = io::stdout().lock();
    output::line(
        &mut out,
        &format!(
            "{}: {}",
            company.firma_adi,
            company.asama.as_deref().unwrap_or(stage)
        ),
    )?;
    Ok(())
}

pub async fn add_activity(
    api: ApiClient,
    id: CompanyId,
    kind: &str,
    result: Option<&str>,
) -> Result<(), CliError> {
    let view = page(api)?.add_activity(id, kind, result).await?;
    let mut out = io::stdout().lock();
    output::company_detail(&mut out, &view)?;
    Ok(())
}

pub async fn delete_activity(
    api: ApiClient,
    id: CompanyId,
    activity_id: ActivityId,
    yes: bool,
) -> Result<(), CliError> {
    confirm(yes, "delete the activity")?;
    let view = page(api)?.delete_activity(id, activity_id).await?;
    let mut out = io::stdout().lock();
    output::company_detail(&mut out, &view)?;
    Ok(())
}

/// Delete a company and show the remaining list.
pub async fn delete(api: ApiClient, id: CompanyId, yes: bool) -> Result<(), CliError> {
    confirm(yes, "delete the company")?;
    let view = page(api)?.delete_company(id).await?;
    let mut out = io::stdout().lock();
    output::company_table(&mut out, &view)?;
    Ok(())
}

pub async fn filters(api: ApiClient, sehir: Option<String>) -> Result<(), CliError> {
    let mut page = page(api)?;
    page.set_filter(CompanyFilter {
        sehir,
        ..CompanyFilter::default()
    });
    let options = page.filter_options().await?;

    let mut out = io::stdout().lock();
    output::filter_options(&mut out, &options)?;
    Ok(())
}

pub async fn export(api: ApiClient, filter: CompanyFilter, dir: &Path) -> Result<(), CliError> {
    let mut page = page(api)?;
    page.set_filter(filter);
    let path = page.export(dir).await?;

    let mut out = io::stdout().lock();
    output::line(&mut out, &path.display().to_string())?;
    Ok(())
}
