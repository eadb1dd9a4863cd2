//! Write per-pair decomposition maps between a global and a local
//! decomposition of the same mesh.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use mesh_remap::algs::create_maps::create_maps;
use mesh_remap::config::CreateMapsConfig;
use mesh_remap::overlap::filter::OverlapPolicy;

#[derive(Parser)]
#[command(name = "create-maps", version, about, long_about = None)]
struct Cli {
    /// Decomposed case of the global solve.
    global_case: PathBuf,
    /// Decomposed case of the local solve; maps are written here.
    local_case: PathBuf,
    /// Compute each global bounding box once instead of the legacy rule.
    #[arg(long)]
    compute_once: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let policy = if cli.compute_once {
        OverlapPolicy::ComputeOnce
    } else {
        OverlapPolicy::Legacy
    };
    let config = CreateMapsConfig::new(cli.global_case, cli.local_case).with_overlap_policy(policy);
    create_maps(&config)?;
    log::info!("End");
    Ok(())
}
