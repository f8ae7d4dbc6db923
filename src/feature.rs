use geo::{GeodesicArea, MultiPolygon, Polygon};
use geojson::{Feature, Geometry as GeoJsonGeometry, Value as GeoJsonValue};

use crate::error::{Error, Result};
use crate::regions::Watershed;

/// The merged boundary of one watershed.
#[derive(Debug, Clone, PartialEq)]
pub enum WatershedGeometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl WatershedGeometry {
    /// A single polygon stays a Polygon; two or more become a MultiPolygon in the order given.
    pub fn from_polygons(watershed: &Watershed, mut polygons: Vec<Polygon<f64>>) -> Result<Self> {
        match polygons.len() {
            0 => Err(Error::NoGeometryFound {
                region: watershed.name.to_string(),
                wrias: watershed.wrias.to_vec(),
            }),
            1 => Ok(WatershedGeometry::Polygon(polygons.remove(0))),
            _ => Ok(WatershedGeometry::MultiPolygon(MultiPolygon::new(polygons))),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            WatershedGeometry::Polygon(_) => "Polygon",
            WatershedGeometry::MultiPolygon(_) => "MultiPolygon",
        }
    }

    pub fn polygon_count(&self) -> usize {
        match self {
            WatershedGeometry::Polygon(_) => 1,
            WatershedGeometry::MultiPolygon(multi) => multi.0.len(),
        }
    }

    /// Geodesic area on the WGS84 ellipsoid, holes excluded.
    pub fn area_sq_km(&self) -> f64 {
        let square_meters = match self {
            WatershedGeometry::Polygon(polygon) => polygon.geodesic_area_unsigned(),
            WatershedGeometry::MultiPolygon(multi) => multi.geodesic_area_unsigned(),
        };
        square_meters / 1_000_000.0
    }

    pub fn to_geojson(&self) -> GeoJsonGeometry {
        let value = match self {
            WatershedGeometry::Polygon(polygon) => GeoJsonValue::Polygon(polygon_rings(polygon)),
            WatershedGeometry::MultiPolygon(multi) => {
                GeoJsonValue::MultiPolygon(multi.iter().map(polygon_rings).collect())
            }
        };
        GeoJsonGeometry::new(value)
    }
}

// Exterior ring first, then holes
fn polygon_rings(polygon: &Polygon<f64>) -> Vec<Vec<Vec<f64>>> {
    let mut rings = vec![ring_positions(polygon.exterior())];
    rings.extend(polygon.interiors().iter().map(ring_positions));
    rings
}

fn ring_positions(ring: &geo::LineString<f64>) -> Vec<Vec<f64>> {
    ring.points().map(|p| vec![p.x(), p.y()]).collect()
}

pub fn build_feature(name: &str, geometry: &WatershedGeometry) -> Feature {
    let mut properties = serde_json::Map::new();
    properties.insert("name".to_string(), serde_json::Value::from(name));

    Feature {
        bbox: None,
        geometry: Some(geometry.to_geojson()),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{polygon, LineString};

    const SKAGIT: Watershed = Watershed {
        name: "Skagit River",
        wrias: &[3, 4],
    };

    fn square(origin: f64) -> Polygon<f64> {
        polygon![
            (x: origin, y: origin),
            (x: origin + 1.0, y: origin),
            (x: origin + 1.0, y: origin + 1.0),
            (x: origin, y: origin + 1.0),
        ]
    }

    #[test]
    fn empty_list_is_an_error() {
        match WatershedGeometry::from_polygons(&SKAGIT, vec![]) {
            Err(Error::NoGeometryFound { region, wrias }) => {
                assert_eq!(region, "Skagit River");
                assert_eq!(wrias, vec![3, 4]);
            }
            other => panic!("expected NoGeometryFound, got {:?}", other),
        }
    }

    #[test]
    fn single_polygon_stays_polygon() {
        let geometry = WatershedGeometry::from_polygons(&SKAGIT, vec![square(0.0)]).unwrap();
        assert_eq!(geometry.type_name(), "Polygon");
        assert_eq!(geometry, WatershedGeometry::Polygon(square(0.0)));
    }

    #[test]
    fn several_polygons_become_multipolygon_in_order() {
        let geometry =
            WatershedGeometry::from_polygons(&SKAGIT, vec![square(0.0), square(5.0), square(9.0)])
                .unwrap();
        assert_eq!(geometry.type_name(), "MultiPolygon");
        assert_eq!(geometry.polygon_count(), 3);
        match geometry.to_geojson().value {
            GeoJsonValue::MultiPolygon(parts) => {
                assert_eq!(parts.len(), 3);
                assert_eq!(parts[1][0][0], vec![5.0, 5.0]);
                assert_eq!(parts[2][0][0], vec![9.0, 9.0]);
            }
            other => panic!("expected MultiPolygon, got {:?}", other),
        }
    }

    #[test]
    fn holes_follow_the_exterior() {
        let exterior = LineString::from(vec![
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 4.0),
            (0.0, 4.0),
            (0.0, 0.0),
        ]);
        let hole = LineString::from(vec![(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 1.0)]);
        let geometry = WatershedGeometry::Polygon(Polygon::new(exterior, vec![hole]));
        match geometry.to_geojson().value {
            GeoJsonValue::Polygon(rings) => {
                assert_eq!(rings.len(), 2);
                assert_eq!(rings[0].len(), 5);
                assert_eq!(rings[1][0], vec![1.0, 1.0]);
            }
            other => panic!("expected Polygon, got {:?}", other),
        }
    }

    #[test]
    fn feature_carries_only_the_name() {
        let geometry = WatershedGeometry::Polygon(square(0.0));
        let feature = build_feature("Stillaguamish River", &geometry);
        let properties = feature.properties.as_ref().unwrap();
        assert_eq!(properties.len(), 1);
        assert_eq!(properties["name"], "Stillaguamish River");
        assert!(feature.id.is_none());
        assert!(feature.bbox.is_none());
        assert_eq!(feature.geometry, Some(geometry.to_geojson()));
    }

    #[test]
    fn area_of_a_one_degree_cell_near_the_equator() {
        let geometry = WatershedGeometry::Polygon(square(0.0));
        // A 1x1 degree cell at the equator is about 12,300 km²
        assert_relative_eq!(geometry.area_sq_km(), 12_308.0, max_relative = 0.01);

        let doubled =
            WatershedGeometry::MultiPolygon(MultiPolygon::new(vec![square(0.0), square(0.0)]));
        assert_relative_eq!(
            doubled.area_sq_km(),
            2.0 * geometry.area_sq_km(),
            max_relative = 1e-9
        );
    }
}
