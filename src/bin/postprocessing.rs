//! Derived fields: principal stresses and equivalent stress/strain measures.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use mesh_remap::algs::postprocess::run_postprocess;
use mesh_remap::config::PostprocessConfig;
use mesh_remap::io::case::TimeSelection;

#[derive(Parser)]
#[command(name = "postprocessing", version, about, long_about = None)]
struct Cli {
    /// Mesh case holding the fields.
    case: PathBuf,
    /// Fields to calculate: pstress, sigmaEq, epsilonEq, epsilonPEq.
    #[arg(long = "field-names", value_delimiter = ',', required = true)]
    field_names: Vec<String>,
    /// Only this time.
    #[arg(long, conflicts_with = "latest_time")]
    time: Option<String>,
    /// Only the latest time.
    #[arg(long)]
    latest_time: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = PostprocessConfig::new(cli.case, cli.field_names);
    config.times = match (cli.time, cli.latest_time) {
        (Some(time), _) => TimeSelection::Named(time),
        (None, true) => TimeSelection::Latest,
        (None, false) => TimeSelection::All,
    };
    run_postprocess(&config)?;
    log::info!("End");
    Ok(())
}
