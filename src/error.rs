use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The request could not be sent, or the service answered with a non-success status.
    #[error("Request to feature service failed: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    /// The response body was not the GeoJSON we asked for.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A returned geometry was neither a Polygon nor a MultiPolygon.
    #[error("Unexpected geometry type: {0}")]
    UnexpectedGeometryType(String),

    /// The filter for a watershed matched no polygons at all.
    #[error("No geometry returned for {region} (WRIA numbers {wrias:?})")]
    NoGeometryFound { region: String, wrias: Vec<u32> },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not serialize GeoJSON: {0}")]
    Serialize(#[from] serde_json::Error),
}
