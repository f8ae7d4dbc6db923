pub mod collection;
pub mod error;
pub mod feature;
pub mod fetcher;
pub mod regions;

pub use collection::{build_collection, default_output_path, run, write_collection};
pub use error::{Error, Result};
pub use feature::{build_feature, WatershedGeometry};
pub use fetcher::{parse_polygons, BoundarySource, WriaService};
pub use regions::{Watershed, WATERSHEDS};
