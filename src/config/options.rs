// src/config/options.rs
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use super::consts::*;

#[derive(Clone, Debug, PartialEq)]
pub struct QueryOptions {
    pub url: String,
    pub table: TableSelector,
    pub format: FormatSpec,
    pub output: PathBuf,
    pub open_when_done: bool,
    pub timeout: Duration,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            table: TableSelector::default(),
            format: FormatSpec::default(),
            output: PathBuf::from(OUTPUT_FILE),
            open_when_done: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Which table on the page to read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSelector {
    /// Zero-based, counted among the tables that pass `class`.
    pub index: usize,
    /// Whitespace-separated class tokens; all must be present on the table.
    pub class: Option<String>,
}

impl Default for TableSelector {
    fn default() -> Self {
        Self {
            index: DEFAULT_TABLE_INDEX,
            class: Some(DEFAULT_TABLE_CLASS.to_string()),
        }
    }
}

/// Where the color-scale formatting goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatSpec {
    pub columns: Vec<ColumnRef>,
    /// 1-based sheet row (the `3` in `D3`).
    pub start_row: u32,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            columns: DEFAULT_FORMAT_COLUMNS
                .iter()
                .filter_map(|c| c.parse().ok())
                .collect(),
            start_row: DEFAULT_FORMAT_START_ROW,
        }
    }
}

impl FormatSpec {
    pub fn none() -> Self {
        Self { columns: Vec::new(), start_row: DEFAULT_FORMAT_START_ROW }
    }

    /// Parse a comma list such as `D,E,F` or `3,4`. Blank entries are skipped.
    pub fn parse_columns(list: &str) -> Result<Vec<ColumnRef>, ColumnParseError> {
        list.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse::<ColumnRef>)
            .collect()
    }
}

/// A sheet column, held as a zero-based index.
///
/// Parses from a column letter (`D`, `aa`) or a zero-based index (`3`).
/// Displays as the letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnRef(u16);

impl ColumnRef {
    pub fn from_index(index: u16) -> Option<Self> {
        (index < MAX_COLUMNS).then_some(Self(index))
    }

    pub fn index(self) -> u16 {
        self.0
    }

    /// 0 = A, 25 = Z, 26 = AA, ...
    pub fn letters(self) -> String {
        let mut out = String::new();
        let mut n = self.0 as u32;
        loop {
            out.insert(0, (b'A' + (n % 26) as u8) as char);
            if n < 26 {
                break;
            }
            n = n / 26 - 1;
        }
        out
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.letters())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid column '{0}': use a letter (D, AA) or a zero-based index")]
pub struct ColumnParseError(pub String);

impl FromStr for ColumnRef {
    type Err = ColumnParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let err = || ColumnParseError(t.to_string());
        if t.is_empty() {
            return Err(err());
        }

        if t.chars().all(|c| c.is_ascii_digit()) {
            let n: u16 = t.parse().map_err(|_| err())?;
            return ColumnRef::from_index(n).ok_or_else(err);
        }

        if !t.chars().all(|c| c.is_ascii_alphabetic()) || t.len() > 3 {
            return Err(err());
        }
        // Bijective base-26: A=1 .. Z=26, then shift to zero-based.
        let mut n: u32 = 0;
        for c in t.chars() {
            n = n * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        }
        u16::try_from(n - 1)
            .ok()
            .and_then(ColumnRef::from_index)
            .ok_or_else(err)
    }
}
