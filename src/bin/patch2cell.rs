//! Rotate boundary values of a symmetric-tensor field into a frame aligned
//! with a reference direction, writing `<field>_T`.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use mesh_remap::algs::orientation::run_orientation;
use mesh_remap::config::OrientationConfig;
use mesh_remap::io::case::TimeSelection;

#[derive(Parser)]
#[command(name = "patch2cell", version, about, long_about = None)]
struct Cli {
    /// Mesh case holding the field.
    case: PathBuf,
    /// Field to orient (`volSymmTensorField` or `surfaceSymmTensorField`).
    #[arg(long)]
    field: String,
    /// Reference direction.
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], default_values_t = [1.0, 0.0, 0.0])]
    reference: Vec<f64>,
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

    let mut config = OrientationConfig::new(cli.case, cli.field);
    if let [x, y, z] = cli.reference[..] {
        config.reference = [x, y, z];
    }
    config.times = match (cli.time, cli.latest_time) {
        (Some(time), _) => TimeSelection::Named(time),
        (None, true) => TimeSelection::Latest,
        (None, false) => TimeSelection::All,
    };
    run_orientation(&config)?;
    log::info!("End");
    Ok(())
}
