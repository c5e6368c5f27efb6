use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use cno_viewer::data::write_table;
use cno_viewer::network::{solar_core_start, Burn};

/// Integrate the CNO burn network at fixed temperature and density
#[derive(Parser)]
#[command(name = "cno-network")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Temperature in K
    #[arg(short = 'T', long, default_value_t = 1.5e7)]
    temperature: f64,

    /// Mass density in g/cm^3
    #[arg(short = 'r', long, default_value_t = 150.0)]
    density: f64,

    /// Final time in seconds
    #[arg(long, default_value_t = 1.0e22)]
    t_stop: f64,

    /// Output table
    #[arg(short, long, default_value = "results.dat")]
    output: PathBuf,

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

    let burn = Burn {
        temperature: cli.temperature,
        density: cli.density,
        t_stop: cli.t_stop,
        initial: solar_core_start(),
    };
    println!("{:>18} {:12.4e}", "TEMPERATURE:", burn.temperature);
    println!("{:>18} {:12.4e}", "MASS DENSITY:", burn.density);

    let table = burn.run().context("burn network integration failed")?;
    write_table(&cli.output, &table)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    println!("Wrote {} steps to {}", table.n_rows(), cli.output.display());
    Ok(())
}
