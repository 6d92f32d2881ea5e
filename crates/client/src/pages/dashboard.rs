//! Dashboard: stat cards, recent transactions and queries, auto-refresh.

use std::time::Duration;

use leadscout_core::{CreditTransaction, DashboardStats, QueryRecord};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, instrument};

use super::ListView;
use super::guard::require_session;
use crate::api::ApiClient;
use crate::error::ControllerError;
use crate::format::{credit_delta, format_timestamp};

pub const MSG_NO_TRANSACTIONS: &str = "Henüz işlem yok";
pub const MSG_NO_QUERIES: &str = "Henüz sorgu yok";
pub const ALL_CITIES_LABEL: &str = "Tüm Şehirler";

/// One number on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: i64,
}

/// Colour of a ledger amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRow {
    pub description: String,
    /// `+N kredi` / `-N kredi`.
    pub amount: String,
    pub tone: Tone,
    pub date: String,
}

impl From<&CreditTransaction> for TransactionRow {
    fn from(tx: &CreditTransaction) -> Self {
        Self {
            description: tx.description.clone(),
            amount: credit_delta(tx.amount),
            tone: if tx.is_credit() {
                Tone::Positive
            } else {
                Tone::Negative
            },
            date: format_timestamp(&tx.created_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRow {
    pub kategori: String,
    /// City, or "Tüm Şehirler".
    pub location: String,
    /// `"{n} sonuç"`.
    pub results: String,
    pub date: String,
}

impl From<&QueryRecord> for QueryRow {
    fn from(query: &QueryRecord) -> Self {
        let location = query
            .sehir
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(ALL_CITIES_LABEL)
            .to_string();
        Self {
            kategori: query.kategori.clone(),
            location,
            results: format!("{} sonuç", query.result_count),
            date: format_timestamp(&query.created_at),
        }
    }
}

/// Everything the dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub cards: Vec<StatCard>,
    pub transactions: ListView<TransactionRow>,
    pub queries: ListView<QueryRow>,
}

impl DashboardView {
    #[must_use]
    pub fn from_stats(stats: &DashboardStats) -> Self {
        let cards = vec![
            StatCard {
                label: "Kredi Bakiyesi",
                value: stats.balance,
            },
            StatCard {
                label: "Toplam Sorgu",
                value: stats.total_queries,
            },
            StatCard {
                label: "Toplam Firma",
                value: stats.total_companies,
            },
            StatCard {
                label: "Bugünkü Sorgular",
                value: stats.queries_today,
            },
        ];
        Self {
            cards,
            transactions: ListView::new(
                stats.recent_transactions.iter().map(Into::into).collect(),
                MSG_NO_TRANSACTIONS,
            ),
            queries: ListView::new(
                stats.recent_queries.iter().map(Into::into).collect(),
                MSG_NO_QUERIES,
            ),
        }
    }
}

/// The dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardPage {
    api: ApiClient,
}

impl DashboardPage {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch stats and build the view. The stored balance follows the stats.
    ///
    /// # Errors
    ///
    /// `LoginRequired` when signed out or the token expired, otherwise the
    /// API error.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<DashboardView, ControllerError> {
        require_session(self.api.session())?;
        let stats = self.api.dashboard_stats().await?;
        self.api.session().set_balance(stats.balance)?;
        debug!(balance = stats.balance, "Dashboard loaded");
        Ok(DashboardView::from_stats(&stats))
    }

    /// Reload every `period`, starting immediately.
    ///
    /// Each result is sent on the returned channel. Missed ticks are skipped
    /// rather than bunched up. The task ends when the receiver is dropped.
    #[must_use]
    pub fn spawn_refresh(
        self,
        period: Duration,
    ) -> (
        JoinHandle<()>,
        mpsc::Receiver<Result<DashboardView, ControllerError>>,
    ) {
        let (tx, rx) = mpsc::channel(1);
        let handle = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let result = self.load().await;
                if tx.send(result).await.is_err() {
                    debug!("Dashboard refresh receiver dropped");
                    break;
                }
            }
        });
        (handle, rx)
    }
}
