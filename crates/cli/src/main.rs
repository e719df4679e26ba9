//! GeoEpi CLI - groundwater nitrate vs. cancer incidence analysis

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use geoepi_algorithms::pipeline::{self, PipelineParams};
use geoepi_core::geometry::collection_bbox;
use geoepi_core::io::{read_geojson, write_geojson};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "geoepi")]
#[command(author, version, about = "Spatial analysis of groundwater nitrate and cancer incidence", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a GeoJSON feature collection
    Info {
        /// Input GeoJSON file
        input: PathBuf,
    },
    /// Run the full interpolation → aggregation → regression → error pipeline
    Analyze {
        /// Well samples GeoJSON (point features with a nitrate property)
        #[arg(long)]
        wells: PathBuf,
        /// Census tracts GeoJSON (polygon features with an observed-rate property)
        #[arg(long)]
        tracts: PathBuf,
        /// IDW power parameter k (> 0)
        #[arg(short = 'k', long, default_value = "2.0")]
        power: f64,
        /// Hexagon edge length in kilometers (8-80)
        #[arg(short, long, default_value = "10.0")]
        edge_km: f64,
        /// Well property carrying the nitrate value (ppm)
        #[arg(long, default_value = "nitr_ran")]
        value_key: String,
        /// Tract property carrying the observed cancer rate (0-1)
        #[arg(long, default_value = "canrate")]
        response_key: String,
        /// Directory to write the output layers into
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Info { input } => {
            let collection = read_geojson(&input)
                .with_context(|| format!("reading {}", input.display()))?;

            println!("File: {}", input.display());
            println!("Features: {}", collection.len());
            if let Some(bbox) = collection_bbox(&collection) {
                println!(
                    "Bounds: ({:.6}, {:.6}) - ({:.6}, {:.6})",
                    bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y
                );
            } else {
                println!("Bounds: (no geometry)");
            }
        }

        Commands::Analyze {
            wells,
            tracts,
            power,
            edge_km,
            value_key,
            response_key,
            out_dir,
        } => {
            let wells_fc = read_geojson(&wells)
                .with_context(|| format!("reading wells from {}", wells.display()))?;
            let tracts_fc = read_geojson(&tracts)
                .with_context(|| format!("reading tracts from {}", tracts.display()))?;

            info!("Wells: {} features", wells_fc.len());
            info!("Tracts: {} features", tracts_fc.len());

            let params = PipelineParams {
                power,
                edge_km,
                value_key,
                response_key,
                ..Default::default()
            };

            let pb = spinner("Running pipeline...");
            let start = Instant::now();
            let output = pipeline::run(&wells_fc, &tracts_fc, &params)?;
            let elapsed = start.elapsed();
            pb.finish_and_clear();

            println!("k = {:.1}, edge = {:.1} km", params.power, params.edge_km);
            println!("Regression: {}", output.fit.equation());
            println!("R²: {:.3}", output.fit.r_squared);
            println!("Training pairs: {}", output.fit.pairs.len());
            println!("Field cells: {}", output.field.len());
            println!("Error cells: {}", output.error_grid.len());
            println!("Processing time: {:.2?}", elapsed);

            if let Some(dir) = out_dir {
                std::fs::create_dir_all(&dir)
                    .with_context(|| format!("creating {}", dir.display()))?;

                for (name, layer) in [
                    ("nitrate_field.geojson", &output.field),
                    ("tracts_enriched.geojson", &output.tracts),
                    ("residual_stddev.geojson", &output.error_grid),
                ] {
                    let path = dir.join(name);
                    write_geojson(&path, layer)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!("Wrote {}", path.display());
                }
            }
        }
    }

    Ok(())
}
