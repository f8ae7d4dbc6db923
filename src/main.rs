use clap::Command;
use watershed_boundaries::{default_output_path, run, WriaService, WATERSHEDS};

fn main() {
    Command::new("Watershed Boundaries")
        .version("0.1.0")
        .author("Jesper Fjellin")
        .about("Downloads WRIA polygons and writes one merged boundary per Puget Sound watershed")
        .get_matches();

    let output = default_output_path();
    let service = WriaService::new();

    if let Err(e) = run(&service, WATERSHEDS, &output) {
        eprintln!("Error building watershed GeoJSON: {}", e);
        std::process::exit(1);
    }
}
