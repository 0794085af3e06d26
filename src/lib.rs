// src/lib.rs
//! Pull one HTML table off a web page into a formatted Excel sheet.
//!
//! ```text
//! core::net::fetch_page → table::extract_table → cell::normalize_row
//!                       → file::write_spreadsheet → file::open_spreadsheet
//! ```
//!
//! [`runner::run`] drives the whole thing from a [`config::QueryOptions`].

pub mod cell;
pub mod config;
pub mod core;
pub mod error;
pub mod file;
pub mod progress;
pub mod runner;
pub mod table;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{QueryError, Result};
