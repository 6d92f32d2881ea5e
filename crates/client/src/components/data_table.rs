//! Data table types.
//!
//! Column definitions and single-column sorting for the company table.

use std::cmp::Ordering;

use leadscout_core::Company;
use serde::{Deserialize, Serialize};

/// Column definition for a data table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Whether clicking the header sorts by this column.
    pub sortable: bool,
}

impl TableColumn {
    /// Create a new sortable column.
    #[must_use]
    pub fn sortable(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: true,
        }
    }
}

/// A sortable column of the company table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    FirmaAdi,
    Sehir,
    Ilce,
    Kategori,
    Telefon,
    Rating,
}

impl SortColumn {
    /// All columns in display order.
    pub const ALL: [Self; 6] = [
        Self::FirmaAdi,
        Self::Sehir,
        Self::Ilce,
        Self::Kategori,
        Self::Telefon,
        Self::Rating,
    ];

    /// Company field name.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::FirmaAdi => "firma_adi",
            Self::Sehir => "sehir",
            Self::Ilce => "ilce",
            Self::Kategori => "kategori",
            Self::Telefon => "telefon",
            Self::Rating => "rating",
        }
    }

    /// Header label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirmaAdi => "Firma Adı",
            Self::Sehir => "Şehir",
            Self::Ilce => "İlçe",
            Self::Kategori => "Kategori",
            Self::Telefon => "Telefon",
            Self::Rating => "Rating",
        }
    }

    /// Text shown in this column's cell, empty when the field is missing.
    #[must_use]
    pub fn cell(self, company: &Company) -> String {
        match self {
            Self::FirmaAdi => company.firma_adi.clone(),
            Self::Rating => company.rating.map(|r| r.to_string()).unwrap_or_default(),
            _ => self.text(company).unwrap_or_default().to_string(),
        }
    }

    fn text(self, company: &Company) -> Option<&str> {
        match self {
            Self::FirmaAdi => Some(company.firma_adi.as_str()),
            Self::Sehir => company.sehir.as_deref(),
            Self::Ilce => company.ilce.as_deref(),
            Self::Kategori => company.kategori.as_deref(),
            Self::Telefon => company.telefon.as_deref(),
            Self::Rating => None,
        }
    }

    /// Relational comparison. Missing values order first; a missing text
    /// field compares equal to an empty one.
    fn compare(self, a: &Company, b: &Company) -> Ordering {
        match self {
            Self::Rating => match (a.rating, b.rating) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (x, y) => x.is_some().cmp(&y.is_some()),
            },
            _ => self.text(a).unwrap_or("").cmp(self.text(b).unwrap_or("")),
        }
    }
}

impl std::fmt::Display for SortColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|c| c.key() == key)
            .ok_or_else(|| {
                let keys: Vec<_> = Self::ALL.iter().map(|c| c.key()).collect();
                format!("unknown column: {s} (expected one of {})", keys.join(", "))
            })
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Active sort of a table: at most one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: Option<SortColumn>,
    pub direction: SortDirection,
}

impl SortState {
    /// Header click: a new column sorts ascending, the active column flips
    /// direction.
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == Some(column) {
            self.direction = self.direction.reversed();
        } else {
            self.column = Some(column);
            self.direction = SortDirection::Asc;
        }
    }

    /// Sorted view of `companies`.
    ///
    /// The sort is stable, so rows with equal keys keep the order they were
    /// fetched in. Without an active column the input order is returned.
    #[must_use]
    pub fn apply<'a>(&self, companies: &'a [Company]) -> Vec<&'a Company> {
        let mut rows: Vec<&Company> = companies.iter().collect();
        if let Some(column) = self.column {
            rows.sort_by(|a, b| {
                let ordering = column.compare(a, b);
                match self.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }
        rows
    }
}

/// Columns of the company table.
#[must_use]
pub fn company_columns() -> Vec<TableColumn> {
    SortColumn::ALL
        .iter()
        .map(|c| TableColumn::sortable(c.key(), c.label()))
        .collect()
}
