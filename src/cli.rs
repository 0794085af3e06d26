// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::consts::*;
use crate::config::options::{ColumnParseError, FormatSpec, QueryOptions, TableSelector};
use crate::core::net;
use crate::error::Result;
use crate::progress::Progress;
use crate::{runner, table};

#[derive(Parser, Debug)]
#[command(name = "web_query")]
#[command(version)]
#[command(about = "Pull one HTML table off a web page into a formatted Excel sheet", long_about = None)]
pub struct Args {
    /// Page holding the table
    #[arg(value_name = "URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Zero-based table index, counted among tables matching --class
    #[arg(short, long, default_value_t = DEFAULT_TABLE_INDEX)]
    pub index: usize,

    /// Class tokens the table must carry (space separated)
    #[arg(long, value_name = "CLASSES")]
    pub class: Option<String>,

    /// Count every table on the page, ignoring class
    #[arg(long, conflicts_with = "class")]
    pub no_class: bool,

    /// Columns to color-scale, as letters or zero-based indices (e.g. D,E,F); "" for none
    #[arg(short, long, value_name = "LIST")]
    pub columns: Option<String>,

    /// First sheet row (1-based) of the color-scale ranges
    #[arg(long, default_value_t = DEFAULT_FORMAT_START_ROW, value_parser = clap::value_parser!(u32).range(1..))]
    pub start_row: u32,

    /// Output spreadsheet
    #[arg(short, long, value_name = "FILE", default_value = OUTPUT_FILE)]
    pub out: PathBuf,

    /// Don't open the spreadsheet when done
    #[arg(long)]
    pub no_open: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// List the tables on the page and exit
    #[arg(long)]
    pub list: bool,
}

impl Args {
    pub fn to_options(&self) -> std::result::Result<QueryOptions, ColumnParseError> {
        let class = if self.no_class {
            None
        } else {
            Some(self.class.clone().unwrap_or_else(|| DEFAULT_TABLE_CLASS.to_string()))
        };
        let columns = match &self.columns {
            Some(list) => FormatSpec::parse_columns(list)?,
            None => FormatSpec::default().columns,
        };

        Ok(QueryOptions {
            url: self.url.clone(),
            table: TableSelector { index: self.index, class },
            format: FormatSpec { columns, start_row: self.start_row },
            output: self.out.clone(),
            open_when_done: !self.no_open,
            timeout: Duration::from_secs(self.timeout),
        })
    }
}

/// Prints each stage to stderr as `[n/N] message`.
#[derive(Default)]
pub struct StderrProgress {
    total: usize,
    step: usize,
}

impl Progress for StderrProgress {
    fn begin(&mut self, stages: usize) {
        self.total = stages;
        self.step = 0;
    }
    fn log(&mut self, msg: &str) {
        self.step += 1;
        // Formatting notes can run past the stage count.
        eprintln!("[{}/{}] {}", self.step.min(self.total), self.total, msg);
    }
}

pub fn run(opts: &QueryOptions, list: bool) -> Result<()> {
    if list {
        return list_page_tables(opts);
    }
    let mut progress = StderrProgress::default();
    let summary = runner::run(opts, Some(&mut progress))?;
    println!("Wrote {}", summary.report.path.display());
    Ok(())
}

fn list_page_tables(opts: &QueryOptions) -> Result<()> {
    let http = net::client(opts.timeout)?;
    let doc = net::fetch_page(&http, &opts.url)?;
    for t in table::list_tables(&doc) {
        println!(
            "{}\tclass={:?}\trows={}\t{}",
            t.index,
            t.class.unwrap_or_default(),
            t.rows,
            t.headers.join(" | ")
        );
    }
    Ok(())
}
