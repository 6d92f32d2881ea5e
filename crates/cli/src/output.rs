//! Plain-text rendering of page views.
//!
//! Renderers write to any `io::Write` so commands pass a locked stdout and
//! tests pass a `Vec<u8>`.

use std::io::{self, Write};

use leadscout_client::components::SortDirection;
use leadscout_client::pages::Route;
use leadscout_client::pages::admin::UserCard;
use leadscout_client::pages::companies::{CompanyDetailView, CompanyTableView, FilterOptions};
use leadscout_client::pages::dashboard::{Tone, TransactionRow};
use leadscout_client::pages::search::SearchResultsView;
use leadscout_client::pages::{DashboardView, ListView, NavView};
use leadscout_core::AppSettings;

use crate::commands::CliError;

/// Report a failed command on stderr, with a hint when signing in would help.
pub fn error(err: &CliError) {
    let mut handle = io::stderr().lock();
    // Nothing sensible is left to do if stderr itself is gone.
    let _ = writeln!(handle, "Error: {err}");
    if err.redirect() == Some(Route::Login) {
        let _ = writeln!(handle, "Run `leadscout login` to sign in.");
    }
}

pub fn line(out: &mut impl Write, text: &str) -> io::Result<()> {
    writeln!(out, "{text}")
}

pub fn nav(out: &mut impl Write, view: &NavView) -> io::Result<()> {
    writeln!(out, "{} {}", view.theme_icon, view.label)?;
    if view.show_admin_link {
        writeln!(out, "Admin paneli: leadscout admin")?;
    }
    Ok(())
}

pub fn dashboard(out: &mut impl Write, view: &DashboardView) -> io::Result<()> {
    for card in &view.cards {
        writeln!(out, "{:<18} {}", card.label, card.value)?;
    }

    writeln!(out)?;
    writeln!(out, "Son İşlemler")?;
    transactions(out, &view.transactions)?;

    writeln!(out)?;
    writeln!(out, "Son Sorgular")?;
    match view.queries.empty_message() {
        Some(message) => writeln!(out, "  {message}"),
        None => {
            let rows: Vec<Vec<String>> = view
                .queries
                .items()
                .iter()
                .map(|q| {
                    vec![
                        q.kategori.clone(),
                        q.location.clone(),
                        q.results.clone(),
                        q.date.clone(),
                    ]
                })
                .collect();
            table(out, &["Kategori", "Konum", "Sonuç", "Tarih"], &rows)
        }
    }
}

pub fn transactions(out: &mut impl Write, list: &ListView<TransactionRow>) -> io::Result<()> {
    if let Some(message) = list.empty_message() {
        return writeln!(out, "  {message}");
    }
    let rows: Vec<Vec<String>> = list
        .items()
        .iter()
        .map(|tx| {
            let marker = match tx.tone {
                Tone::Positive => "▲",
                Tone::Negative => "▼",
            };
            vec![
                tx.description.clone(),
                format!("{marker} {}", tx.amount),
                tx.date.clone(),
            ]
        })
        .collect();
    table(out, &["Açıklama", "Miktar", "Tarih"], &rows)
}

pub fn company_table(out: &mut impl Write, view: &CompanyTableView) -> io::Result<()> {
    if let Some(message) = view.rows.empty_message() {
        return writeln!(out, "{message}");
    }

    let headers: Vec<String> = view
        .columns
        .iter()
        .map(|column| {
            let active = view.sort.column.is_some_and(|c| c.key() == column.key);
            match (active, view.sort.direction) {
                (true, SortDirection::Asc) => format!("{} ↑", column.label),
                (true, SortDirection::Desc) => format!("{} ↓", column.label),
                (false, _) => column.label.to_string(),
            }
        })
        .collect();
    let headers: Vec<&str> = std::iter::once("#")
        .chain(headers.iter().map(String::as_str))
        .collect();

    let rows: Vec<Vec<String>> = view
        .rows
        .items()
        .iter()
        .map(|row| {
            let id = row.id.map_or_else(|| "-".to_string(), |id| id.to_string());
            std::iter::once(id).chain(row.cells.iter().cloned()).collect()
        })
        .collect();
    table(out, &headers, &rows)
}

pub fn company_detail(out: &mut impl Write, view: &CompanyDetailView) -> io::Result<()> {
    writeln!(out, "{} (#{})", view.title, view.id)?;
    for (label, value) in &view.fields {
        writeln!(out, "  {label:<10} {value}")?;
    }
    if let Some(rating) = &view.rating {
        writeln!(out, "  {:<10} ⭐ {rating}", "Puan")?;
    }

    let stages: Vec<String> = view
        .stage_options
        .iter()
        .map(|o| {
            if o.selected {
                format!("[{}]", o.value)
            } else {
                o.value.clone()
            }
        })
        .collect();
    writeln!(out, "  {:<10} {}", "Aşama", stages.join(" "))?;

    writeln!(out)?;
    writeln!(out, "Aktiviteler")?;
    if view.activities.is_empty() {
        writeln!(out, "  Henüz aktivite yok")?;
    } else {
        let rows: Vec<Vec<String>> = view
            .activities
            .iter()
            .map(|a| {
                vec![
                    a.id.to_string(),
                    a.kind.clone(),
                    a.result.clone().unwrap_or_default(),
                    a.date.clone(),
                ]
            })
            .collect();
        table(out, &["#", "Tip", "Sonuç", "Tarih"], &rows)?;
    }
    if !view.activity_types.is_empty() {
        writeln!(out, "Aktivite tipleri: {}", view.activity_types.join(", "))?;
    }
    Ok(())
}

pub fn filter_options(out: &mut impl Write, options: &FilterOptions) -> io::Result<()> {
    writeln!(out, "Şehirler: {}", options.cities.join(", "))?;
    writeln!(out, "İlçeler:  {}", options.districts.join(", "))?;
    writeln!(out, "Aşamalar: {}", options.stages.join(", "))
}

pub fn search_results(out: &mut impl Write, view: &SearchResultsView) -> io::Result<()> {
    if let Some(message) = view.cards.empty_message() {
        writeln!(out, "{message}")?;
    } else {
        if let Some(summary) = &view.summary {
            writeln!(out, "{summary}")?;
        }
        for card in view.cards.items() {
            writeln!(out)?;
            writeln!(out, "{}", card.title)?;
            for (label, value) in &card.fields {
                writeln!(out, "  {label:<8} {value}")?;
            }
            if let Some(rating) = &card.rating {
                writeln!(out, "  ⭐ {rating}")?;
            }
        }
    }
    writeln!(out)?;
    writeln!(out, "Kalan bakiye: {} kredi", view.remaining_balance)
}

pub fn settings(out: &mut impl Write, settings: &AppSettings) -> io::Result<()> {
    writeln!(out, "Şehirler:    {}", settings.sehirler.join(", "))?;
    writeln!(out, "Ülkeler:     {}", settings.ulkeler.join(", "))?;
    writeln!(out, "Kategoriler: {}", settings.kategoriler.join(", "))
}

pub fn users(out: &mut impl Write, list: &ListView<UserCard>) -> io::Result<()> {
    if let Some(message) = list.empty_message() {
        return writeln!(out, "{message}");
    }
    let rows: Vec<Vec<String>> = list
        .items()
        .iter()
        .map(|u| {
            vec![
                u.id.to_string(),
                u.username.clone(),
                u.email.clone(),
                u.balance.clone(),
                if u.is_admin { "admin" } else { "" }.to_string(),
            ]
        })
        .collect();
    table(out, &["#", "Kullanıcı", "E-posta", "Bakiye", "Rol"], &rows)
}

/// Left-aligned columns sized to their widest cell.
fn table(out: &mut impl Write, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header_cells: Vec<String> = headers.iter().map(ToString::to_string).collect();
    write_row(out, &widths, &header_cells)?;
    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    write_row(out, &widths, &rule)?;
    for row in rows {
        write_row(out, &widths, row)?;
    }
    Ok(())
}

fn write_row(out: &mut impl Write, widths: &[usize], cells: &[String]) -> io::Result<()> {
    let padded: Vec<String> = widths
        .iter()
        .zip(cells)
        .map(|(&width, cell)| format!("{cell:<width$}"))
        .collect();
    writeln!(out, "{}", padded.join("  ").trim_end())
}
