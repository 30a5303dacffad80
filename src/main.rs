use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};
use gsd_trips::{import_data::DEFAULT_EXTENSION, logs, pipeline};
use log::warn;
use simplelog::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert GPS logger traces into point and trip tables", long_about = None)]
struct Cli {
    /// Directory holding the logger files
    #[arg(short, long, default_value = "data")]
    input: PathBuf,

    /// Directory receiving PointLevelData.csv and TripSummary.csv
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Extension of the logger files
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Also write logs to rotating files in this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log every dropped line
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logs::init(cli.log_dir.as_deref(), level)?;

    let config =
        pipeline::PipelineConfig::new(cli.input, cli.output).with_extension(&cli.extension);
    let tables = pipeline::run(&config)?;
    if tables.rejections.malformed() > 0 {
        warn!(
            "{} malformed lines were dropped in total",
            tables.rejections.malformed()
        );
    }
    Ok(())
}
