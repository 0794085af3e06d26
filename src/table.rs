// src/table.rs
//! Locate one `<table>` on a page and read it as header labels plus rows of
//! cell text.
//!
//! The shape read is the common data-table layout:
//!
//! ```text
//! <table class="...">
//!   <thead><tr><th>..</th>...</tr></thead>
//!   <tbody><tr><td>..</td>...</tr>...</tbody>
//! </table>
//! ```
//!
//! Headers come from the `<th>` cells of the first `<thead>` row; each
//! `<tbody>` row contributes its `<td>` cells. Rows are returned as found;
//! their width is not checked against the header.

use log::{debug, info};

use crate::core::html::{self, Element};
use crate::error::{QueryError, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One line of `--list` output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSummary {
    pub index: usize,
    pub class: Option<String>,
    pub headers: Vec<String>,
    pub rows: usize,
}

/// True when every whitespace-separated token of `filter` is one of the
/// table's classes. An empty filter matches every table.
pub fn class_matches(table: &Element<'_>, filter: &str) -> bool {
    let class = table.attr("class").unwrap_or_default();
    let have: Vec<&str> = class.split_whitespace().collect();
    filter.split_whitespace().all(|want| have.contains(&want))
}

/// Pick the table at `index`, counted among tables passing `class_filter`
/// (or among all tables when there is no filter), and read it.
pub fn extract_table(doc: &str, index: usize, class_filter: Option<&str>) -> Result<Table> {
    let all = html::elements(doc, "table");
    let candidates: Vec<Element<'_>> = match class_filter {
        Some(filter) => all.into_iter().filter(|t| class_matches(t, filter)).collect(),
        None => all,
    };
    debug!(
        "{} candidate tables (class filter: {:?})",
        candidates.len(),
        class_filter
    );

    let table = candidates.get(index).ok_or(QueryError::NoMatchingTable {
        index,
        found: candidates.len(),
    })?;

    let parsed = read_table(table)?;
    info!(
        "table {index}: {} columns, {} rows",
        parsed.headers.len(),
        parsed.rows.len()
    );
    Ok(parsed)
}

fn read_table(table: &Element<'_>) -> Result<Table> {
    let thead = html::first_element(table.inner, "thead")
        .ok_or_else(|| QueryError::MalformedTable("table has no <thead>".into()))?;
    let header_row = html::first_element(thead.inner, "tr")
        .ok_or_else(|| QueryError::MalformedTable("<thead> has no <tr>".into()))?;
    let tbody = html::first_element(table.inner, "tbody")
        .ok_or_else(|| QueryError::MalformedTable("table has no <tbody>".into()))?;

    let headers = cell_texts(&header_row, "th");
    let rows = html::elements(tbody.inner, "tr")
        .iter()
        .map(|tr| cell_texts(tr, "td"))
        .collect();

    Ok(Table { headers, rows })
}

fn cell_texts(row: &Element<'_>, tag: &str) -> Vec<String> {
    html::elements(row.inner, tag).iter().map(Element::text).collect()
}

/// Every table on the page with a peek at its shape. Tables without
/// `<thead>`/`<tbody>` are listed with empty headers / zero rows.
pub fn list_tables(doc: &str) -> Vec<TableSummary> {
    html::elements(doc, "table")
        .iter()
        .enumerate()
        .map(|(index, t)| {
            let headers = html::first_element(t.inner, "thead")
                .and_then(|h| html::first_element(h.inner, "tr"))
                .map(|tr| cell_texts(&tr, "th"))
                .unwrap_or_default();
            let rows = html::first_element(t.inner, "tbody")
                .map_or(0, |b| html::elements(b.inner, "tr").len());
            TableSummary { index, class: t.attr("class"), headers, rows }
        })
        .collect()
}
