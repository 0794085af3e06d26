// src/bin/cli.rs
use clap::{CommandFactory, Parser, error::ErrorKind};
use web_query::cli::{self, Args};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let opts = match args.to_options() {
        Ok(o) => o,
        Err(e) => Args::command().error(ErrorKind::ValueValidation, e).exit(),
    };

    if let Err(e) = cli::run(&opts, args.list) {
        log::error!("{e}");
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
    Ok(())
}
