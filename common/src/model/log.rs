use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single SMS log row. The server decides its columns; the client only
/// displays and forwards it.
pub type LogEntry = Value;

/// Body returned by one call to the paginated log endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub rows: Vec<LogEntry>,
}

/// One fetched page of the log listing.
#[derive(Debug, Clone, PartialEq)]
pub struct LogPage {
    /// 0-based page index.
    pub index: usize,
    pub rows: Vec<LogEntry>,
}

impl LogPage {
    pub fn new(index: usize, response: LogsResponse) -> Self {
        Self {
            index,
            rows: response.rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
