use geo::{Coord, LineString, Polygon};
use geojson::{GeoJson, Value as GeoJsonValue};
use reqwest::blocking::{Client, Request};

use crate::error::{Error, Result};

/// Department of Ecology feature layer with WRIA boundaries at 1:24,000 scale.
pub const SERVICE_URL: &str =
    "https://services.arcgis.com/6lCKYNJLvwTXqrmp/arcgis/rest/services/ECY/FeatureServer/11/query";

/// Output spatial reference: plain WGS84 longitude/latitude.
pub const OUT_SR: u32 = 4326;

/// Five decimal places is roughly 1.1 m, plenty for boundaries drawn at dashboard scale.
pub const GEOMETRY_PRECISION: u32 = 5;

const OUT_FIELDS: &str = "WRIA_NR,WRIA_NM";

/// Anything that can hand back the polygons for a set of WRIA numbers.
pub trait BoundarySource {
    fn fetch(&self, wrias: &[u32]) -> Result<Vec<Polygon<f64>>>;
}

pub struct WriaService {
    client: Client,
    url: String,
}

impl WriaService {
    pub fn new() -> Self {
        Self::with_url(SERVICE_URL)
    }

    pub fn with_url(url: &str) -> Self {
        WriaService {
            client: Client::new(),
            url: url.to_string(),
        }
    }

    /// The GET request for one set of WRIA numbers, query string encoded.
    pub fn request(&self, wrias: &[u32]) -> Result<Request> {
        let request = self
            .client
            .get(&self.url)
            .query(&query_params(wrias))
            .build()?;
        Ok(request)
    }
}

impl Default for WriaService {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundarySource for WriaService {
    fn fetch(&self, wrias: &[u32]) -> Result<Vec<Polygon<f64>>> {
        let request = self.request(wrias)?;
        let body = self
            .client
            .execute(request)?
            .error_for_status()?
            .text()?;
        parse_polygons(&body)
    }
}

pub fn where_clause(wrias: &[u32]) -> String {
    debug_assert!(!wrias.is_empty(), "a WRIA filter needs at least one number");
    let numbers: Vec<String> = wrias.iter().map(|n| n.to_string()).collect();
    format!("WRIA_NR in ({})", numbers.join(","))
}

pub fn query_params(wrias: &[u32]) -> Vec<(&'static str, String)> {
    vec![
        ("where", where_clause(wrias)),
        ("outFields", OUT_FIELDS.to_string()),
        ("outSR", OUT_SR.to_string()),
        ("geometryPrecision", GEOMETRY_PRECISION.to_string()),
        ("f", "geojson".to_string()),
    ]
}

// Parse a query response and flatten every MultiPolygon into its parts
pub fn parse_polygons(body: &str) -> Result<Vec<Polygon<f64>>> {
    let geojson: GeoJson = body
        .parse()
        .map_err(|e: geojson::Error| Error::MalformedResponse(e.to_string()))?;

    let fc = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        _ => {
            return Err(Error::MalformedResponse(
                "expected a FeatureCollection".to_string(),
            ))
        }
    };

    let mut polygons = Vec::new();
    for feature in fc.features {
        // Features without geometry carry no boundary
        let geometry = match feature.geometry {
            Some(geometry) => geometry,
            None => continue,
        };
        match geometry.value {
            GeoJsonValue::Polygon(rings) => polygons.push(rings_to_polygon(&rings)?),
            GeoJsonValue::MultiPolygon(parts) => {
                for rings in &parts {
                    polygons.push(rings_to_polygon(rings)?);
                }
            }
            other => {
                return Err(Error::UnexpectedGeometryType(
                    type_name(&other).to_string(),
                ))
            }
        }
    }

    Ok(polygons)
}

fn type_name(value: &GeoJsonValue) -> &'static str {
    match value {
        GeoJsonValue::Point(_) => "Point",
        GeoJsonValue::MultiPoint(_) => "MultiPoint",
        GeoJsonValue::LineString(_) => "LineString",
        GeoJsonValue::MultiLineString(_) => "MultiLineString",
        GeoJsonValue::Polygon(_) => "Polygon",
        GeoJsonValue::MultiPolygon(_) => "MultiPolygon",
        GeoJsonValue::GeometryCollection(_) => "GeometryCollection",
    }
}

fn rings_to_polygon(rings: &[Vec<Vec<f64>>]) -> Result<Polygon<f64>> {
    let (exterior, holes) = rings
        .split_first()
        .ok_or_else(|| Error::MalformedResponse("polygon has no rings".to_string()))?;

    let exterior = ring_to_line_string(exterior)?;
    let holes = holes
        .iter()
        .map(|ring| ring_to_line_string(ring))
        .collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(exterior, holes))
}

fn ring_to_line_string(ring: &[Vec<f64>]) -> Result<LineString<f64>> {
    let coords = ring
        .iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] => Ok(Coord { x: *x, y: *y }),
            _ => Err(Error::MalformedResponse(format!(
                "position {:?} has fewer than two ordinates",
                position
            ))),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(LineString::new(coords))
}
