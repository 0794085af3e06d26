// src/runner.rs
use log::{info, warn};

use crate::{
    cell,
    config::QueryOptions,
    core::net,
    error::Result,
    file::{self, WriteReport},
    progress::Progress,
    table,
};

/// fetch, extract, normalize, write, open
pub const STAGES: usize = 5;

/// Conceptual exit status of a run: `0` on success, `-1` on failure.
pub const STATUS_OK: i32 = 0;
pub const STATUS_FAILED: i32 = -1;

/// Summary of what was produced.
#[derive(Debug)]
pub struct RunSummary {
    pub report: WriteReport,
    pub opened: bool,
}

pub fn status<T>(result: &Result<T>) -> i32 {
    if result.is_ok() { STATUS_OK } else { STATUS_FAILED }
}

/// Top-level runner: fetch the page, export its table, then open the file.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(opts: &QueryOptions, mut progress: Option<&mut dyn Progress>) -> Result<RunSummary> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(STAGES);
    }
    let result = run_stages(opts, &mut |msg: String| {
        info!("{msg}");
        if let Some(p) = progress.as_deref_mut() {
            p.log(&msg);
        }
    });
    if let Some(p) = progress.as_deref_mut() {
        p.finish(result.is_ok());
    }
    result
}

fn run_stages(opts: &QueryOptions, say: &mut dyn FnMut(String)) -> Result<RunSummary> {
    say(format!("Fetching {}", opts.url));
    let http = net::client(opts.timeout)?;
    let doc = net::fetch_page(&http, &opts.url)?;

    let report = export_page(&doc, opts, say)?;

    let opened = if opts.open_when_done {
        say(format!("Opening {}", report.path.display()));
        match file::open_spreadsheet(&report.path) {
            Ok(()) => true,
            Err(e) => {
                // The file is already saved; a viewer that won't start is not a failed run.
                warn!("{e}");
                false
            }
        }
    } else {
        false
    };

    Ok(RunSummary { report, opened })
}

/// Extract, normalize and write, for a page already in hand.
pub fn export_page(
    doc: &str,
    opts: &QueryOptions,
    say: &mut dyn FnMut(String),
) -> Result<WriteReport> {
    let sel = &opts.table;
    say(format!(
        "Reading table {}{}",
        sel.index,
        sel.class.as_deref().map(|c| format!(" (class \"{c}\")")).unwrap_or_default()
    ));
    let tbl = table::extract_table(doc, sel.index, sel.class.as_deref())?;

    say(format!("Normalizing {} rows", tbl.rows.len()));
    let rows: Vec<_> = tbl.rows.iter().map(|r| cell::normalize_row(r)).collect();

    say(format!("Writing {}", opts.output.display()));
    let report = file::write_spreadsheet(&opts.output, &tbl.headers, &rows, &opts.format)?;
    for failure in &report.format_failures {
        say(format!("Formatting skipped: {failure}"));
    }
    Ok(report)
}
