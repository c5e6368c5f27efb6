use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use cno_viewer::data::load_file;
use cno_viewer::render;
use cno_viewer::species::CNO_SPECIES;

/// Plot CNO burn mass fractions against time on log-log axes
#[derive(Parser)]
#[command(name = "cno-viewer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Results table (.dat/.txt whitespace text, .csv, .json or .parquet)
    #[arg(value_name = "PATH", default_value = "results.dat")]
    path: PathBuf,

    /// Field delimiter for text tables; repeated delimiters collapse
    #[arg(short, long, default_value_t = ' ')]
    delimiter: char,

    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let table = load_file(&cli.path, cli.delimiter)
        .with_context(|| format!("cannot read {}", cli.path.display()))?;
    render(&table, &CNO_SPECIES, Some(cli.path.as_path()), cli.delimiter)
        .with_context(|| format!("cannot plot {}", cli.path.display()))?;
    Ok(())
}
