//! Dashboard commands.

use std::io;
use std::time::Duration;

use leadscout_client::pages::DashboardPage;
use leadscout_client::{ApiClient, ControllerError};
use tracing::{info, warn};

use super::CliError;
use crate::output;

pub async fn show(api: ApiClient) -> Result<(), CliError> {
    let view = DashboardPage::new(api).load().await?;
    let mut out = io::stdout().lock();
    output::dashboard(&mut out, &view)?;
    Ok(())
}

/// Print the dashboard every `period` until Ctrl-C.
///
/// A failed refresh is reported and the next one still runs; losing the
/// session ends the loop.
pub async fn watch(api: ApiClient, period: Duration) -> Result<(), CliError> {
    let (handle, mut updates) = DashboardPage::new(api).spawn_refresh(period);

    let result = loop {
        tokio::select! {
            update = updates.recv() => match update {
                Some(Ok(view)) => {
                    let mut out = io::stdout().lock();
                    output::line(&mut out, "")?;
                    output::dashboard(&mut out, &view)?;
                }
                Some(Err(e @ (ControllerError::LoginRequired | ControllerError::Forbidden))) => {
                    break Err(e.into());
                }
                Some(Err(e)) => warn!(error = %e, "Dashboard refresh failed"),
                None => break Ok(()),
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break Ok(());
            }
        }
    };

    handle.abort();
    result
}
