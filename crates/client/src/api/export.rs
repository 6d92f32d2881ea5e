use leadscout_core::CompanyFilter;
use tracing::instrument;

use super::{ApiClient, RequestOptions};
use crate::error::ApiError;

/// An Excel workbook downloaded from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcelExport {
    pub data: Vec<u8>,
}

impl ExcelExport {
    /// Local file name, `firmalar_<epoch-millis>.xlsx`.
    #[must_use]
    pub fn file_name(epoch_millis: i64) -> String {
        format!("firmalar_{epoch_millis}.xlsx")
    }
}

impl ApiClient {
    /// Download companies matching `filter` as `.xlsx`
    /// (`GET /api/excel/export`).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` (404) when nothing matches, otherwise the
    /// usual request errors.
    #[instrument(skip(self))]
    pub async fn export_companies(&self, filter: &CompanyFilter) -> Result<ExcelExport, ApiError> {
        let data = self
            .download(
                "/api/excel/export",
                RequestOptions::get().query(filter.query_pairs()),
            )
            .await?;
        Ok(ExcelExport { data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_uses_millis() {
        assert_eq!(
            ExcelExport::file_name(1_714_557_600_123),
            "firmalar_1714557600123.xlsx"
        );
    }
}
