use crate::types::{Coordinate, SensorCoverage};
use geo::{Coord, HaversineDestination, LineString, Point, Polygon};

pub const DEFAULT_STEPS: u32 = 64;

/// The shapes one sensor contributes. Either layer may be absent.
#[derive(Debug, Clone, Default)]
pub struct SensorShapes {
    pub detect: Option<Polygon<f64>>,
    pub blind: Option<Polygon<f64>>,
}

/// Builds a sensor's detect and blind polygons.
///
/// A boundary with at least 3 points is closed and cleaned; otherwise a
/// positive radius produces a circle approximated with `steps` segments
/// around the center. Pure function of its inputs.
pub fn build(sensor: &SensorCoverage, steps: u32) -> SensorShapes {
    let center = sensor.center_coordinate;
    SensorShapes {
        detect: layer_shape(center, &sensor.detect_coordinates, sensor.detect_radius, steps),
        blind: layer_shape(center, &sensor.blind_coordinates, sensor.blind_radius, steps),
    }
}

fn layer_shape(
    center: Coordinate,
    boundary: &[Coordinate],
    radius: Option<f64>,
    steps: u32,
) -> Option<Polygon<f64>> {
    if boundary.len() >= 3 {
        // An explicit boundary wins; if it degenerates after cleaning the
        // layer is absent, the radius is not consulted.
        polygon_from_points(boundary)
    } else {
        radius.and_then(|r| circle_around(center, r, steps))
    }
}

/// Closes an explicit outer ring, dropping consecutive duplicate points.
/// Rings with fewer than 3 distinct points yield no polygon.
fn polygon_from_points(points: &[Coordinate]) -> Option<Polygon<f64>> {
    let mut ring: Vec<Coord<f64>> = Vec::with_capacity(points.len() + 1);
    for p in points {
        let c = Coord { x: p.x, y: p.y };
        if ring.last() != Some(&c) {
            ring.push(c);
        }
    }
    // A supplied closing point counts as a duplicate of the start.
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    if ring.len() < 3 {
        return None;
    }
    let first = ring[0];
    ring.push(first);
    Some(Polygon::new(LineString::new(ring), vec![]))
}

/// Circle of `radius_m` meters around `center`, approximated with `steps`
/// straight segments. Vertices are placed by great-circle destination so
/// meter radii work over lon/lat centers, the same locally-flat compromise
/// the rest of the pipeline assumes.
fn circle_around(center: Coordinate, radius_m: f64, steps: u32) -> Option<Polygon<f64>> {
    if !radius_m.is_finite() || radius_m <= 0.0 || steps < 3 {
        return None;
    }
    let origin = Point::new(center.x, center.y);
    let mut ring: Vec<Coord<f64>> = Vec::with_capacity(steps as usize + 1);
    for i in 0..steps {
        let bearing = f64::from(i) * -360.0 / f64::from(steps);
        let vertex = origin.haversine_destination(bearing, radius_m);
        ring.push(Coord {
            x: vertex.x(),
            y: vertex.y(),
        });
    }
    ring.push(ring[0]);
    Some(Polygon::new(LineString::new(ring), vec![]))
}
