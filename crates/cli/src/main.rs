mod args;

use crate::args::Args;
use clap::Parser;
use gtfs_filter::{
    filter::{self, FilterChain, LocationFilter, ModeFilter, TimespanFilter},
    gtfs::{self, GtfsReader, GtfsWriter},
    repository::Repository,
};
use std::{process::ExitCode, time::Instant};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
enum Error {
    #[error(transparent)]
    Gtfs(#[from] gtfs::Error),
    #[error(transparent)]
    Filter(#[from] filter::Error),
}

fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn chain(args: &Args) -> Result<FilterChain, Error> {
    let mut chain = FilterChain::new();
    if let Some(bounds) = args.location {
        chain = chain.then(LocationFilter::new(bounds))?;
    }
    if let Some(range) = args.date {
        chain = chain.then(TimespanFilter::from_range(range))?;
    }
    if !args.types.is_empty() {
        chain = chain.then(ModeFilter::new(args.types.iter().copied())?)?;
    }
    Ok(chain)
}

fn run(args: Args) -> Result<(), Error> {
    let chain = chain(&args)?;

    info!("Loading {}...", args.input.display());
    let now = Instant::now();
    let reader = GtfsReader::default().from_path(&args.input)?;
    let repository = Repository::new().load_gtfs(reader)?;
    info!("Loading data took {:?}", now.elapsed());

    if chain.is_empty() {
        info!("No filters given, copying the feed as is");
    }
    let now = Instant::now();
    let filtered = chain.apply(repository);
    info!("Filtering took {:?}", now.elapsed());

    info!("Writing to {}...", args.output.display());
    GtfsWriter::default().write(&filtered, &args.output)?;
    Ok(())
}
