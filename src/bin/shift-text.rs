use anyhow::{Context, Result};
use clap::{value_parser, Arg, Command};
use std::io::{self, BufWriter};
use texdist::services::{shift, DEFAULT_SHIFT};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let matches = Command::new("shift-text")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Shift a text coming to stdin and print it to stdout")
        .arg(
            Arg::new("shift")
                .short('s')
                .long("shift")
                .value_name("int")
                .help("Number of spaces prepended to each line; negative means none")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .default_value("4"),
        )
        .get_matches();

    let width = matches
        .get_one::<i64>("shift")
        .map(|&shift| usize::try_from(shift.max(0)).unwrap_or(usize::MAX))
        .unwrap_or(DEFAULT_SHIFT);

    // Diagnostics only, on stderr; RUST_LOG enables them
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());

    let lines = shift(stdin, stdout, width).context("Failed to shift text")?;
    debug!("Shifted {} lines by {}", lines, width);

    Ok(())
}
