//! LeadScout CLI - Terminal front end for the LeadScout backend.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (password from --password, LEADSCOUT_PASSWORD or stdin)
//! leadscout login -u elif
//!
//! # Dashboard, refreshed every LEADSCOUT_REFRESH_SECS
//! leadscout dashboard --watch
//!
//! # Browse saved companies sorted by rating, highest first
//! leadscout companies list --sehir Antalya --sort rating --sort rating
//!
//! # Paid search
//! leadscout search --kategori Restoran --sehir Antalya --limit 20
//!
//! # Top up a user's credits (admin only)
//! leadscout admin credit 4 50 "Kampanya"
//! ```
//!
//! # Commands
//!
//! - `login` / `register` / `logout` / `whoami` - Session management
//! - `theme` - Show or switch the colour theme
//! - `dashboard` - Balance, usage and recent activity
//! - `companies` - Saved companies, stages, activities and Excel export
//! - `search` - Paid company search
//! - `admin` - User search, credit top-ups and ledgers

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use leadscout_client::components::SortColumn;
use leadscout_client::{ApiClient, ClientConfig, LogFormat};
use leadscout_core::{ActivityId, CompanyId, PhoneFilter, Theme, UserId};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;
mod output;

use commands::CliError;
use commands::auth::ThemeChange;

#[derive(Parser)]
#[command(name = "leadscout")]
#[command(author, version, about = "LeadScout lead management from the terminal")]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "LEADSCOUT_API_BASE")]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        #[arg(short, long)]
        username: String,

        /// Read from stdin when omitted
        #[arg(short, long, env = "LEADSCOUT_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        username: String,

        /// Read from stdin when omitted
        #[arg(short, long, env = "LEADSCOUT_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user and refresh the stored profile
    Whoami,
    /// Show the current theme, or switch it
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Balance, usage and recent activity
    Dashboard {
        /// Keep refreshing until interrupted
        #[arg(short, long)]
        watch: bool,
    },
    /// Saved companies
    Companies {
        #[command(subcommand)]
        action: CompaniesAction,
    },
    /// Paid company search
    Search(SearchCommand),
    /// Administration (admin accounts only)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Flip between dark and light
    Toggle,
    /// Switch to the dark theme
    Dark,
    /// Switch to the light theme
    Light,
}

impl From<Option<ThemeAction>> for ThemeChange {
    fn from(action: Option<ThemeAction>) -> Self {
        match action {
            None => Self::Show,
            Some(ThemeAction::Toggle) => Self::Toggle,
            Some(ThemeAction::Dark) => Self::Set(Theme::Dark),
            Some(ThemeAction::Light) => Self::Set(Theme::Light),
        }
    }
}

/// Company list filters shared by `list` and `export`.
#[derive(Args, Debug, Clone, Default)]
struct FilterArgs {
    /// City (`Hepsi` for all)
    #[arg(long)]
    sehir: Option<String>,

    /// District (`Hepsi` for all)
    #[arg(long)]
    ilce: Option<String>,

    /// Pipeline stage (`Hepsi` for all)
    #[arg(long)]
    asama: Option<String>,

    /// Phone presence: hepsi, var or yok
    #[arg(long, default_value = "hepsi")]
    telefon: PhoneFilter,
}

#[derive(Subcommand)]
enum CompaniesAction {
    /// List companies as a table
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Sort column; repeat to flip the direction
        #[arg(long = "sort", value_name = "COLUMN")]
        sort: Vec<SortColumn>,
    },
    /// Show one company with its activities
    Show { id: CompanyId },
    /// Move a company to another pipeline stage
    Stage { id: CompanyId, stage: String },
    /// Manage a company's activities
    Activity {
        #[command(subcommand)]
        action: ActivityAction,
    },
    /// Delete a company
    Delete {
        id: CompanyId,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Show the available filter values
    Filters {
        /// Narrow districts to this city
        #[arg(long)]
        sehir: Option<String>,
    },
    /// Download the filtered list as an Excel file
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Target directory
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Subcommand)]
enum ActivityAction {
    /// Record an activity
    Add {
        id: CompanyId,

        /// Activity type, e.g. "Arama"
        kind: String,

        /// Outcome notes
        #[arg(long)]
        result: Option<String>,
    },
    /// Delete an activity
    Delete {
        id: CompanyId,
        activity_id: ActivityId,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
#[command(args_conflicts_with_subcommands = true)]
struct SearchCommand {
    #[command(subcommand)]
    action: Option<SearchAction>,

    #[command(flatten)]
    args: SearchArgs,
}

#[derive(Subcommand)]
enum SearchAction {
    /// Cities, countries and categories to choose from
    Options,
}

#[derive(Args, Debug, Default)]
struct SearchArgs {
    #[arg(short, long)]
    kategori: Option<String>,

    #[arg(short, long)]
    sehir: Option<String>,

    /// Country (defaults to Türkiye)
    #[arg(long)]
    ulke: Option<String>,

    /// Maximum number of results
    #[arg(short, long, default_value = "20", allow_hyphen_values = true)]
    limit: String,

    /// Search every city
    #[arg(long)]
    all_cities: bool,

    /// Only companies with a phone number
    #[arg(long)]
    with_phone: bool,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Search users by email or username
    Users {
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Add credits to a user
    Credit {
        user_id: UserId,

        #[arg(allow_hyphen_values = true)]
        amount: String,

        description: String,
    },
    /// Show a user's credit ledger
    Transactions { user_id: UserId },
}

/// Initialize Sentry error tracking.
///
/// Returns `None` if `SENTRY_DSN` is not configured.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config.sentry_environment.clone().map(Into::into),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Errors and warnings become Sentry events, everything else breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        tracing::Level::TRACE => sentry_tracing::EventFilter::Ignore,
    }
}

/// Logs go to stderr so command output stays clean on stdout.
fn init_tracing(config: &ClientConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "leadscout=warn".into());

    let (json_layer, text_layer) = match config.log_format {
        LogFormat::Json => (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            ),
            None,
        ),
        LogFormat::Text => (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        ),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ClientConfig::from_env_with_api_base(cli.api_base.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            output::error(&CliError::from(e));
            return ExitCode::FAILURE;
        }
    };

    let _sentry_guard = init_sentry(&config);
    init_tracing(&config);

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            output::error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: &ClientConfig) -> Result<(), CliError> {
    let api = ApiClient::new(config)?;

    match command {
        Commands::Login { username, password } => {
            commands::auth::login(api, username, password).await
        }
        Commands::Register {
            email,
            username,
            password,
        } => commands::auth::register(api, email, username, password).await,
        Commands::Logout => commands::auth::logout(api),
        Commands::Whoami => commands::auth::whoami(&api).await,
        Commands::Theme { action } => commands::auth::theme(api, action.into()).await,
        Commands::Dashboard { watch } => {
            if watch {
                commands::dashboard::watch(api, config.refresh_interval).await
            } else {
                commands::dashboard::show(api).await
            }
        }
        Commands::Companies { action } => match action {
            CompaniesAction::List { filter, sort } => {
                commands::companies::list(api, filter.into(), &sort).await
            }
            CompaniesAction::Show { id } => commands::companies::show(api, id).await,
            CompaniesAction::Stage { id, stage } => {
                commands::companies::stage(api, id, &stage).await
            }
            CompaniesAction::Activity { action } => match action {
                ActivityAction::Add { id, kind, result } => {
                    commands::companies::add_activity(api, id, &kind, result.as_deref()).await
                }
                ActivityAction::Delete {
                    id,
                    activity_id,
                    yes,
                } => commands::companies::delete_activity(api, id, activity_id, yes).await,
            },
            CompaniesAction::Delete { id, yes } => {
                commands::companies::delete(api, id, yes).await
            }
            CompaniesAction::Filters { sehir } => {
                commands::companies::filters(api, sehir).await
            }
            CompaniesAction::Export { filter, dir } => {
                commands::companies::export(api, filter.into(), &dir).await
            }
        },
        Commands::Search(SearchCommand { action, args }) => match action {
            Some(SearchAction::Options) => commands::search::options(api).await,
            None => commands::search::run(api, args.into()).await,
        },
        Commands::Admin { action } => match action {
            AdminAction::Users { search } => commands::admin::users(api, &search).await,
            AdminAction::Credit {
                user_id,
                amount,
                description,
            } => commands::admin::credit(api, user_id, amount, description).await,
            AdminAction::Transactions { user_id } => {
                commands::admin::transactions(api, user_id).await
            }
        },
    }
}

impl From<FilterArgs> for leadscout_core::CompanyFilter {
    fn from(args: FilterArgs) -> Self {
        Self {
            sehir: args.sehir,
            ilce: args.ilce,
            asama: args.asama,
            telefon: args.telefon,
        }
    }
}

impl From<SearchArgs> for leadscout_client::pages::SearchForm {
    fn from(args: SearchArgs) -> Self {
        Self {
            kategori: args.kategori.unwrap_or_default(),
            sehir: args.sehir,
            ulke: args.ulke,
            limit: args.limit,
            all_cities: args.all_cities,
            with_phone: args.with_phone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_repeated_sort_flags() {
        let cli = Cli::try_parse_from([
            "leadscout", "companies", "list", "--sort", "rating", "--sort", "firma-adi",
        ])
        .unwrap_or_else(|e| panic!("{e}"));
        let Commands::Companies {
            action: CompaniesAction::List { sort, filter },
        } = cli.command
        else {
            panic!("expected companies list");
        };
        assert_eq!(sort, vec![SortColumn::Rating, SortColumn::FirmaAdi]);
        assert_eq!(filter.telefon, PhoneFilter::All);
    }

    #[test]
    fn test_search_options_conflicts_with_flags() {
        assert!(Cli::try_parse_from(["leadscout", "search", "options"]).is_ok());
        assert!(
            Cli::try_parse_from(["leadscout", "search", "--kategori", "Kafe", "options"]).is_err()
        );
    }

    #[test]
    fn test_negative_credit_amount_reaches_validation() {
        let cli = Cli::try_parse_from(["leadscout", "admin", "credit", "4", "-5", "Hata"])
            .unwrap_or_else(|e| panic!("{e}"));
        let Commands::Admin {
            action: AdminAction::Credit { amount, .. },
        } = cli.command
        else {
            panic!("expected admin credit");
        };
        assert_eq!(amount, "-5");
    }
}
