//! # Voxel Terrain Entry Point
//!
//! Runs a headless chunk streaming session through the library's `run()`.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- world.json
//! ```

fn main() {
    if let Err(e) = voxel_terrain::run() {
        log::error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }
}
