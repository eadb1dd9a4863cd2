//! Move fields between a global and a local decomposition through the maps
//! written by `create-maps`.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use mesh_remap::algs::transfer_case::run_transfer;
use mesh_remap::config::{TransferConfig, TransferDirection};

#[derive(Parser)]
#[command(name = "sub2mesh", version, about, long_about = None)]
struct Cli {
    /// Decomposed case of the global solve.
    global_case: PathBuf,
    /// Decomposed case of the local solve.
    local_case: PathBuf,
    /// Gather the global displacement into the local subdomains instead of
    /// scattering local plastic strain into the global ones.
    #[arg(long)]
    inverse: bool,
    /// Also move face-centred plastic strain.
    #[arg(long)]
    unstructured: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let direction = if cli.inverse {
        TransferDirection::GlobalToLocal
    } else {
        TransferDirection::LocalToGlobal
    };
    let config = TransferConfig::new(cli.global_case, cli.local_case)
        .with_direction(direction)
        .with_unstructured(cli.unstructured);
    let summary = run_transfer(&config)?;
    log::info!("End ({} pairs)", summary.pairs);
    Ok(())
}
