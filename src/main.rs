//! pedestrians-generate - adds social-force pedestrians to a Gazebo world.
//!
//! Reads `config/<file>` under the current package directory and writes
//! `worlds/<world>_with_pedestrians.world` next to the base world.

use clap::Parser;
use pedestrian_world::{PackageLayout, PedestrianGenerator};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "pedestrians-generate")]
#[command(about = "Generate a Gazebo world populated with pedestrian actors")]
struct Cli {
    /// Configuration file name, resolved inside the package's config/ directory
    config: PathBuf,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pedestrian_world=info,pedestrians_generate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let root = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            error!("Failed to determine package directory: {}", e);
            std::process::exit(1);
        }
    };

    let layout = PackageLayout::new(root);
    match PedestrianGenerator::default().run(&layout, &cli.config) {
        Ok(output) => info!("Generated {}", output.display()),
        Err(e) => {
            error!("Generation failed: {}", e);
            std::process::exit(1);
        }
    }
}
