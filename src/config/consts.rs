// src/config/consts.rs

// Source page
pub const DEFAULT_URL: &str = "https://www.bls.gov/oes/current/oes_nat.htm";
pub const DEFAULT_TABLE_CLASS: &str = "display sortable_datatable fixed-headers";
pub const DEFAULT_TABLE_INDEX: usize = 0;

// Net
pub const USER_AGENT: &str = concat!("web_query/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Output
pub const OUTPUT_FILE: &str = "DataQuery.xlsx";

// Formatting: wage columns on the OES page, below the header and first data row
pub const DEFAULT_FORMAT_COLUMNS: &[&str] = &["D", "E", "F", "G", "H", "I", "J"];
pub const DEFAULT_FORMAT_START_ROW: u32 = 3;

// Sheet limits (xlsx)
pub const MAX_COLUMNS: u16 = 16_384;
