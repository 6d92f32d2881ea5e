//! Reusable view building blocks.

pub mod data_table;

pub use data_table::{SortColumn, SortDirection, SortState, TableColumn, company_columns};
