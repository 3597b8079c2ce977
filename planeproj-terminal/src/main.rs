/// planeproj - Project point cloud to X, Y, and Z planes
///
/// Generates a synthetic cloud, computes its XY/XZ/YZ projections and shows
/// all four as scatter plots in the terminal.
/// Controls:
///   - WASD / Arrow Keys: Orbit the 3-D view
///   - Q/ESC: Quit

use anyhow::{Context, Result};
use clap::Parser;
use planeproj_core::{generate_sample_data, project_to_planes, DEFAULT_NUM_POINTS};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "planeproj", about = "Project point cloud to X, Y, and Z planes.")]
struct Args {
    /// Number of points to generate for each coordinate.
    #[arg(
        long = "num-points",
        visible_alias = "num_points",
        value_name = "N",
        default_value_t = DEFAULT_NUM_POINTS,
        allow_negative_numbers = true
    )]
    num_points: i64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so they never land inside the plot display
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cloud = generate_sample_data(args.num_points)
        .with_context(|| format!("failed to generate {} sample points", args.num_points))?;
    let projections = project_to_planes(&cloud);
    info!(points = cloud.len(), "projections ready, opening display");

    planeproj_terminal::plot_projections(
        &cloud,
        &projections.xy,
        &projections.xz,
        &projections.yz,
    )
    .context("terminal display failed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_point_count() {
        let args = Args::try_parse_from(["planeproj"]).unwrap();
        assert_eq!(args.num_points, 100);
    }

    #[test]
    fn test_both_flag_spellings() {
        let args = Args::try_parse_from(["planeproj", "--num-points", "7"]).unwrap();
        assert_eq!(args.num_points, 7);
        let args = Args::try_parse_from(["planeproj", "--num_points", "9"]).unwrap();
        assert_eq!(args.num_points, 9);
    }

    #[test]
    fn test_negative_count_parses_then_fails_generation() {
        let args = Args::try_parse_from(["planeproj", "--num-points", "-10"]).unwrap();
        assert_eq!(args.num_points, -10);
        assert!(generate_sample_data(args.num_points).is_err());
    }

    #[test]
    fn test_malformed_count_is_usage_error() {
        for bad in ["abc", "1.5", "ten"] {
            let err = Args::try_parse_from(["planeproj", "--num-points", bad]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        }
        let err = Args::try_parse_from(["planeproj", "extra"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
