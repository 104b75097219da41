use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing::{info, warn};

use trackkit::{MapPipeline, MapSerializer, SplineKind, TrackDesign};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    trackkit::init_logging()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut design_path: Option<PathBuf> = None;
    let mut output_dir = PathBuf::from(".");
    let mut kind = SplineKind::Cubic;
    for arg in &args {
        match arg.as_str() {
            "--akima" => kind = SplineKind::Akima,
            "--version" => {
                println!("trackkit {} (built {})", trackkit::VERSION, trackkit::BUILD_DATE);
                return Ok(());
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other if other.starts_with("--") => {
                bail!("Unknown option: {other} (see --help)");
            }
            other => {
                if design_path.is_none() {
                    design_path = Some(PathBuf::from(other));
                } else {
                    output_dir = PathBuf::from(other);
                }
            }
        }
    }
    let Some(design_path) = design_path else {
        print_usage();
        bail!("Missing design file argument");
    };

    let design = TrackDesign::load_from_file(&design_path)
        .with_context(|| format!("Failed to load design {}", design_path.display()))?;
    info!(
        "Loaded design '{}' with {} waypoints",
        design.metadata.name,
        design.waypoints.len()
    );

    let pipeline = MapPipeline::new(kind);
    match pipeline.generate(&design.waypoints, &design.grid)? {
        Some(grid) => {
            let saved = MapSerializer::new(design.grid.resolution)
                .save(&grid, &output_dir)
                .context("Failed to save map artifacts")?;
            info!(
                "Wrote {} and {}",
                saved.image_path.display(),
                saved.metadata_path.display()
            );
        }
        None => {
            warn!("Design produced no curve (needs at least two waypoints); nothing saved");
        }
    }
    Ok(())
}

fn print_usage() {
    println!("Usage: trackkit [--akima] <design.json> [output-dir]");
    println!();
    println!("Loads a track design file, generates the occupancy grid, and writes");
    println!("the map image and metadata into the output directory (default: cwd).");
    println!();
    println!("Options:");
    println!("  --akima      use the Akima interpolant instead of the cubic spline");
    println!("  --version    print version information");
}
