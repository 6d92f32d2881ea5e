//! Session commands: login, register, logout, whoami and theme.

use std::io::{self, BufRead, IsTerminal, Write};

use leadscout_client::ApiClient;
use leadscout_client::ControllerError;
use leadscout_client::pages::guard::require_session;
use leadscout_client::pages::nav::theme_icon;
use leadscout_client::pages::{AuthPage, LoginForm, NavView, RegisterForm, ThemeSwitcher};
use leadscout_core::Theme;
use secrecy::SecretString;

use super::CliError;
use crate::output;

/// What `leadscout theme` should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChange {
    Show,
    Toggle,
    Set(Theme),
}

/// Use the given password, or read one line from stdin.
fn read_password(password: Option<String>) -> Result<SecretString, CliError> {
    if let Some(password) = password {
        return Ok(SecretString::from(password));
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        let mut prompt = io::stderr().lock();
        write!(prompt, "Şifre: ")?;
        prompt.flush()?;
    }
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    Ok(SecretString::from(
        line.trim_end_matches(['\r', '\n']).to_owned(),
    ))
}

pub async fn login(
    api: ApiClient,
    username: String,
    password: Option<String>,
) -> Result<(), CliError> {
    let form = LoginForm {
        username,
        password: read_password(password)?,
    };
    let session = AuthPage::new(api).login(&form).await?;

    let mut out = io::stdout().lock();
    output::nav(&mut out, &NavView::from_user(&session.user))?;
    Ok(())
}

pub async fn register(
    api: ApiClient,
    email: String,
    username: String,
    password: Option<String>,
) -> Result<(), CliError> {
    let form = RegisterForm {
        email,
        username,
        password: read_password(password)?,
    };
    let session = AuthPage::new(api).register(&form).await?;

    let mut out = io::stdout().lock();
    output::nav(&mut out, &NavView::from_user(&session.user))?;
    Ok(())
}

pub fn logout(api: ApiClient) -> Result<(), CliError> {
    let route = AuthPage::new(api).logout()?;
    tracing::debug!(%route, "Logged out");

    let mut out = io::stdout().lock();
    output::line(&mut out, "Çıkış yapıldı")?;
    Ok(())
}

/// Fetch the profile and store it, so balance and theme are current.
pub async fn whoami(api: &ApiClient) -> Result<(), CliError> {
    require_session(api.session())?;
    let user = api.me().await.map_err(ControllerError::from)?;
    api.session()
        .update_user(|stored| *stored = user.clone())
        .map_err(ControllerError::from)?;

    let mut out = io::stdout().lock();
    output::nav(&mut out, &NavView::from_user(&user))?;
    Ok(())
}

pub async fn theme(api: ApiClient, change: ThemeChange) -> Result<(), CliError> {
    let switcher = ThemeSwitcher::new(api);
    let theme = match change {
        ThemeChange::Show => switcher.current()?,
        ThemeChange::Toggle => switcher.toggle().await?,
        ThemeChange::Set(theme) => switcher.apply(theme).await?,
    };

    let mut out = io::stdout().lock();
    output::line(&mut out, &format!("{} {}", theme_icon(theme), theme.as_str()))?;
    Ok(())
}
