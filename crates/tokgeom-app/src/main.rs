//! TokGeom 命令行工具
//!
//! ```sh
//! tokgeom list shot.json.gz
//! tokgeom build shot.json.gz pf_active.coil.current --max-phi 3.14159 --num-phi 30 -o coils.obj
//! tokgeom run job.toml
//! tokgeom convert shot.json shot.json.gz
//! ```

mod config;
mod runner;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokgeom_core::config::BuildConfig;
use tokgeom_core::transform::OrientationFormula;
use tokgeom_file::{load_dataset, save_dataset};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "tokgeom")]
#[command(about = "Decode tokamak geometry containers and build render primitives")]
#[command(version)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the quantities that carry a geometry container.
    List {
        /// Dataset file (.json or .json.gz).
        dataset: PathBuf,
    },
    /// Build the geometry of one or more quantities.
    Build {
        /// Dataset file (.json or .json.gz).
        dataset: PathBuf,
        /// Quantity variable names.
        #[arg(required = true)]
        quantities: Vec<String>,
        /// Toroidal sweep angle in radians (poloidal geometry only).
        #[arg(long)]
        max_phi: Option<f64>,
        /// Number of toroidal segments (poloidal geometry only).
        #[arg(long)]
        num_phi: Option<usize>,
        /// Treat the toroidal normal angle as an absolute azimuth.
        #[arg(long)]
        absolute_orientation: bool,
        /// Export file (.obj or .json).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run a batch job from a TOML configuration file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Export file (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Re-encode a dataset dump (e.g. compress .json to .json.gz).
    Convert {
        /// Input dataset file.
        input: PathBuf,
        /// Output dataset file; the extension selects the encoding.
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing::subscriber::set_global_default(FmtSubscriber::builder().with_max_level(level).finish())?;

    match cli.command {
        Commands::List { dataset } => {
            let data = load_dataset(&dataset)?;
            let quantities = runner::list_quantities(&data);
            println!("{} quantities with geometry in {}", quantities.len(), dataset.display());
            for (quantity, container, geometry_type) in quantities {
                println!("  {:<40} {:<32} {}", quantity, container, geometry_type);
            }
            Ok(())
        }
        Commands::Build {
            dataset,
            quantities,
            max_phi,
            num_phi,
            absolute_orientation,
            output,
        } => {
            let mut config = BuildConfig::default();
            if let Some(max_phi) = max_phi {
                config = config.with_max_phi(max_phi);
            }
            if let Some(num_phi) = num_phi {
                config = config.with_num_phi(num_phi);
            }
            if absolute_orientation {
                config = config.with_orientation(OrientationFormula::Absolute);
            }

            let data = load_dataset(&dataset)?;
            let jobs: Vec<_> = quantities.into_iter().map(|q| (q, config)).collect();
            let session = runner::build_session(&data, &jobs);
            runner::print_summary(&session);

            if let Some(path) = output {
                runner::export_session(&session, &path)?;
            }
            Ok(())
        }
        Commands::Run { config, output } => {
            let job = config::load_config(&config)?;
            info!("Running job {}", config.display());

            let data = load_dataset(&job.dataset)?;
            let session = runner::build_session(&data, &job.jobs());
            runner::print_summary(&session);

            if let Some(path) = output.or(job.export) {
                runner::export_session(&session, &path)?;
            }
            Ok(())
        }
        Commands::Convert { input, output } => {
            let data = load_dataset(&input)?;
            save_dataset(&data, &output)?;
            println!("Converted {} -> {}", input.display(), output.display());
            Ok(())
        }
    }
}
