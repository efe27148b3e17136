//! Published-spreadsheet CSV client
//!
//! Campaign contacts are imported from a shared Google Sheet. Instead of
//! the Sheets API this client pulls the sheet's CSV export
//! (`/spreadsheets/d/{id}/export?format=csv`), which works for any sheet
//! shared by link, and parses it with the `csv` crate. A specific tab can
//! be selected with its export `gid`.

use std::collections::HashMap;

use thiserror::Error;

use crate::error::ApiError;

const DEFAULT_BASE_URL: &str = "https://docs.google.com";

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("failed to fetch sheet: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to parse sheet csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("sheet has no header row")]
    Empty,
}

impl From<SheetError> for ApiError {
    fn from(e: SheetError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

/// Parsed sheet content: header row plus one map per data row.
#[derive(Debug, Clone)]
pub struct SheetData {
    pub columns: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

/// HTTP client for fetching sheet CSV exports.
#[derive(Clone)]
pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
}

impl SheetsClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch and parse a sheet. `gid` selects a tab; the default tab is
    /// used when absent.
    pub async fn fetch(&self, sheet_url: &str, gid: Option<&str>) -> Result<SheetData, SheetError> {
        // A bare spreadsheet id is accepted in place of a full URL.
        let spreadsheet_id =
            parse_sheet_id(sheet_url).unwrap_or_else(|| sheet_url.to_string());

        let mut url = format!(
            "{}/spreadsheets/d/{}/export?format=csv",
            self.base_url, spreadsheet_id
        );
        if let Some(gid) = gid {
            url.push_str("&gid=");
            url.push_str(gid);
        }

        let body = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_csv(&body)
    }
}

impl Default for SheetsClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the spreadsheet id from a Google Sheets URL.
///
/// URL format: `https://docs.google.com/spreadsheets/d/{ID}/edit...`
pub fn parse_sheet_id(url: &str) -> Option<String> {
    let rest = url.split("/spreadsheets/d/").nth(1)?;
    let id = rest.split(['/', '?', '#']).next()?;
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

fn parse_csv(body: &str) -> Result<SheetData, SheetError> {
    let mut reader = csv::Reader::from_reader(body.as_bytes());

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if columns.is_empty() {
        return Err(SheetError::Empty);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: HashMap<String, String> = columns
            .iter()
            .zip(record.iter())
            .map(|(col, val)| (col.clone(), val.trim().to_string()))
            .collect();
        rows.push(row);
    }

    Ok(SheetData { columns, rows })
}

/// Pull a contact name and phone out of a sheet row, tolerating the
/// column-name variants seen in real sheets. Rows without a phone number
/// are skipped by callers.
pub fn contact_fields(row: &HashMap<String, String>) -> Option<(String, String)> {
    let name = ["Name", "name", "Customer Name"]
        .iter()
        .find_map(|k| row.get(*k))
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| "Unknown".to_string());

    let phone = ["Phone", "phone", "Mobile", "Number"]
        .iter()
        .find_map(|k| row.get(*k))
        .filter(|v| !v.is_empty())
        .cloned()?;

    Some((name, phone))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn parses_sheet_id_from_edit_url() {
        let url = "https://docs.google.com/spreadsheets/d/1AbC_def-123/edit#gid=0";
        assert_eq!(parse_sheet_id(url), Some("1AbC_def-123".to_string()));
    }

    #[test]
    fn parses_sheet_id_without_trailing_path() {
        let url = "https://docs.google.com/spreadsheets/d/xyz789";
        assert_eq!(parse_sheet_id(url), Some("xyz789".to_string()));
    }

    #[test]
    fn rejects_non_sheet_url() {
        assert_eq!(parse_sheet_id("https://example.com/some/page"), None);
        assert_eq!(parse_sheet_id("raw-spreadsheet-id"), None);
    }

    #[test]
    fn contact_fields_handles_column_variants() {
        let mut row = HashMap::new();
        row.insert("Customer Name".to_string(), "Priya".to_string());
        row.insert("Mobile".to_string(), "+919876543210".to_string());
        assert_eq!(
            contact_fields(&row),
            Some(("Priya".to_string(), "+919876543210".to_string()))
        );
    }

    #[test]
    fn contact_fields_defaults_missing_name() {
        let mut row = HashMap::new();
        row.insert("Phone".to_string(), "12345".to_string());
        assert_eq!(
            contact_fields(&row),
            Some(("Unknown".to_string(), "12345".to_string()))
        );
    }

    #[test]
    fn contact_fields_requires_phone() {
        let mut row = HashMap::new();
        row.insert("Name".to_string(), "Rahul".to_string());
        assert_eq!(contact_fields(&row), None);
    }

    #[tokio::test]
    async fn fetches_and_parses_csv_export() {
        let server = MockServer::start().await;
        let csv = "Name,Phone\nRahul,+911111111111\nPriya,+912222222222\n";

        Mock::given(method("GET"))
            .and(path("/spreadsheets/d/sheet123/export"))
            .and(query_param("format", "csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string(csv))
            .mount(&server)
            .await;

        let client = SheetsClient::with_base_url(server.uri());
        let data = client
            .fetch(
                "https://docs.google.com/spreadsheets/d/sheet123/edit",
                None,
            )
            .await
            .unwrap();

        assert_eq!(data.columns, vec!["Name", "Phone"]);
        assert_eq!(data.rows.len(), 2);
        assert_eq!(data.rows[0]["Name"], "Rahul");
        assert_eq!(data.rows[1]["Phone"], "+912222222222");
    }

    #[tokio::test]
    async fn fetch_error_status_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = SheetsClient::with_base_url(server.uri());
        let result = client.fetch("missing-sheet", None).await;
        assert!(matches!(result, Err(SheetError::Http(_))));
    }
}
