// src/error.rs
//! Failure kinds for a query run.
//!
//! Every stage maps its failures into one of these variants. The CLI prints
//! [`QueryError::user_message`] and stops; `Display` carries the detail that
//! goes to the log.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueryError>;

#[derive(Error, Debug)]
pub enum QueryError {
    /// The page could not be fetched (bad URL, DNS, refused, timeout, HTTP error status).
    #[error("could not fetch {url}: {reason}")]
    Connection { url: String, reason: String },

    /// Fewer matching tables than the requested index.
    #[error("no table at index {index} ({found} matching tables on the page)")]
    NoMatchingTable { index: usize, found: usize },

    /// The selected table lacks the `<thead>`/`<tbody>` structure we read from.
    #[error("malformed table: {0}")]
    MalformedTable(String),

    /// The output file could not be created, usually because it is open elsewhere.
    #[error("could not create {}: {source}", .path.display())]
    FileLocked {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Unknown(String),
}

impl QueryError {
    /// The single line shown to the user for this kind of failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            QueryError::Connection { .. } => "Make sure you are using a valid URL.",
            QueryError::NoMatchingTable { .. } => {
                "Verify the URL you are using has a suitable table."
            }
            QueryError::MalformedTable(_) => {
                "Table is missing its header or body; fix the table class parameter."
            }
            QueryError::FileLocked { .. } => {
                "Please close existing Excel spreadsheet and try again."
            }
            QueryError::Unknown(_) => "Unknown error, try again.",
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for QueryError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        QueryError::Unknown(format!("spreadsheet error: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_kind_has_its_own_message() {
        let errs = [
            QueryError::Connection { url: "x".into(), reason: "refused".into() },
            QueryError::NoMatchingTable { index: 5, found: 3 },
            QueryError::MalformedTable("no <thead>".into()),
            QueryError::FileLocked {
                path: PathBuf::from("DataQuery.xlsx"),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            },
            QueryError::Unknown("boom".into()),
        ];
        let mut msgs: Vec<&str> = errs.iter().map(|e| e.user_message()).collect();
        msgs.sort_unstable();
        msgs.dedup();
        assert_eq!(msgs.len(), errs.len());
    }

    #[test]
    fn display_carries_detail() {
        let e = QueryError::NoMatchingTable { index: 5, found: 3 };
        assert_eq!(e.to_string(), "no table at index 5 (3 matching tables on the page)");
    }
}
