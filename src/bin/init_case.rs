//! Write zero plastic-strain fields into a mesh case or every subdomain of
//! a decomposed case.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use mesh_remap::algs::init_case::run_init_case;
use mesh_remap::config::InitCaseConfig;

#[derive(Parser)]
#[command(name = "init-case", version, about, long_about = None)]
struct Cli {
    /// Mesh case or decomposed case.
    case: PathBuf,
    /// Time directory to write into.
    #[arg(long, default_value = "0")]
    time: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = InitCaseConfig::new(cli.case);
    config.time = cli.time;
    let n = run_init_case(&config)?;
    log::info!("End ({n} case(s) initialised)");
    Ok(())
}
