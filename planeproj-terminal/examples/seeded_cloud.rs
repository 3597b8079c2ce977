/// Example: Show a reproducible sample cloud in the terminal
///
/// Usage: cargo run --example seeded_cloud -- [seed] [num-points]

use planeproj_core::{generate_sample_data_with, project_to_planes};
use planeproj_terminal::PlotApp;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::io;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let seed = match args.get(1) {
        Some(raw) => raw.parse::<u64>().map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("Invalid seed {raw:?}: {e}"))
        })?,
        None => {
            eprintln!("Usage: {} [seed] [num-points]", args[0]);
            eprintln!("\nNo seed provided, using 0...");
            0
        }
    };
    let num_points = match args.get(2) {
        Some(raw) => raw.parse::<i64>().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid point count {raw:?}: {e}"),
            )
        })?,
        None => 500,
    };

    let cloud = generate_sample_data_with(num_points, &mut StdRng::seed_from_u64(seed))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    let projections = project_to_planes(&cloud);

    println!("Generated {} points with seed {}", cloud.len(), seed);
    println!("Starting terminal display (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = PlotApp::new(&cloud, &projections.xy, &projections.xz, &projections.yz);
    app.run()
}
