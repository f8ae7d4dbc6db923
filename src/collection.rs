use std::fs::create_dir_all;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use geojson::{Feature, FeatureCollection};
use tempfile::NamedTempFile;

use crate::error::Result;
use crate::feature::{build_feature, WatershedGeometry};
use crate::fetcher::BoundarySource;
use crate::regions::Watershed;

pub const OUTPUT_FILE: &str = "puget-sound-watersheds.geojson";

/// `data/puget-sound-watersheds.geojson` next to the crate that builds this tool.
pub fn default_output_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join(OUTPUT_FILE)
}

// Fetch and merge one feature per watershed, stopping at the first failure
pub fn build_collection<S: BoundarySource>(
    source: &S,
    watersheds: &[Watershed],
) -> Result<FeatureCollection> {
    let mut features: Vec<Feature> = Vec::with_capacity(watersheds.len());

    for watershed in watersheds {
        // One line per watershed, finished once its geometry is known
        print!(
            "Downloading geometry for {} (WRIA {:?})...",
            watershed.name, watershed.wrias
        );
        io::stdout().flush()?;

        let polygons = source.fetch(watershed.wrias)?;
        let geometry = WatershedGeometry::from_polygons(watershed, polygons)?;
        println!(
            " {} with {} polygon(s), {:.1} km²",
            geometry.type_name(),
            geometry.polygon_count(),
            geometry.area_sq_km()
        );
        features.push(build_feature(watershed.name, &geometry));
    }

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

/// Serializes into a temporary file beside `path` and renames it into place,
/// so a failed write never clobbers the previous output.
pub fn write_collection(path: &Path, collection: &FeatureCollection) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    create_dir_all(&parent)?;

    let tmp = NamedTempFile::new_in(&parent)?;
    let mut writer = BufWriter::new(tmp);
    serde_json::to_writer_pretty(&mut writer, collection)?;
    writer.flush()?;

    let tmp = writer.into_inner().map_err(|e| e.into_error())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Builds the whole collection before touching `output`, so a failed run
/// leaves any earlier file as it was.
pub fn run<S: BoundarySource>(source: &S, watersheds: &[Watershed], output: &Path) -> Result<()> {
    let collection = build_collection(source, watersheds)?;
    write_collection(output, &collection)?;
    println!("GeoJSON saved to {}", output.display());
    Ok(())
}
