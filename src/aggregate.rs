use crate::algebra::{self, Fallback, OpOutcome};
use crate::error::MergeError;
use crate::flatten::flatten;
use crate::shape;
use crate::types::{DonutMode, SensorCoverage};
use geo::{MultiPolygon, Polygon};

/// Everything one aggregation produced. Regions are ordered polygon lists
/// (outer rings only); `fallbacks` records every boolean operation that
/// degraded instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub detect_union: Vec<Polygon<f64>>,
    pub blind_visible: Vec<Polygon<f64>>,
    pub donut: Vec<Polygon<f64>>,
    pub fallbacks: Vec<Fallback>,
}

impl Aggregation {
    pub fn is_degraded(&self) -> bool {
        !self.fallbacks.is_empty()
    }
}

/// Runs the full aggregation pipeline over a sensor list.
///
/// The only rejected input is an empty list. Every geometry failure inside
/// the pipeline is absorbed by the adapter's fallback policy and recorded
/// on the result instead of surfacing. Deterministic for a fixed sensor
/// order, `steps` and `mode`.
pub fn aggregate(
    sensors: &[SensorCoverage],
    steps: u32,
    mode: DonutMode,
) -> Result<Aggregation, MergeError> {
    if sensors.is_empty() {
        return Err(MergeError::EmptyCoverageList);
    }

    let mut fallbacks: Vec<Fallback> = Vec::new();

    // Index-aligned shape lists: a sensor without a usable shape keeps its
    // slot so detect_i and blind_i stay paired.
    let mut detect_polys: Vec<Option<MultiPolygon<f64>>> = Vec::with_capacity(sensors.len());
    let mut blind_polys: Vec<Option<MultiPolygon<f64>>> = Vec::with_capacity(sensors.len());
    for sensor in sensors {
        let shapes = shape::build(sensor, steps);
        detect_polys.push(shapes.detect.map(single));
        blind_polys.push(shapes.blind.map(single));
    }

    let detect_union_all = fold_union(detect_polys.iter().cloned(), &mut fallbacks);

    // visible_i = blind_i minus the union of every *other* sensor's detect
    // coverage. The occlusion union is recomputed per sensor (O(n^2) union
    // calls) since each one excludes exactly its own contribution.
    let mut blind_visible_pieces: Vec<Polygon<f64>> = Vec::new();
    for (i, blind_i) in blind_polys.iter().enumerate() {
        if blind_i.is_none() {
            continue;
        }
        let others = fold_union(
            detect_polys
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, d)| d.clone()),
            &mut fallbacks,
        );
        let visible = track(
            algebra::safe_difference(blind_i.clone(), others.as_ref()),
            &mut fallbacks,
        );
        blind_visible_pieces.extend(flatten(visible.as_ref()));
    }

    let blind_visible = fold_union(
        blind_visible_pieces.iter().map(|p| Some(single(p.clone()))),
        &mut fallbacks,
    );

    let donut = match mode {
        DonutMode::AggregateThenSubtract => track(
            algebra::safe_difference(detect_union_all.clone(), blind_visible.as_ref()),
            &mut fallbacks,
        ),
        DonutMode::PerSensorDonut => {
            let mut acc: Option<MultiPolygon<f64>> = None;
            for (detect_i, blind_i) in detect_polys.iter().zip(&blind_polys) {
                let own = track(
                    algebra::safe_difference(detect_i.clone(), blind_i.as_ref()),
                    &mut fallbacks,
                );
                acc = track(algebra::safe_union(acc, own), &mut fallbacks);
            }
            acc
        }
    };

    Ok(Aggregation {
        detect_union: flatten(detect_union_all.as_ref()),
        blind_visible: flatten(blind_visible.as_ref()),
        donut: flatten(donut.as_ref()),
        fallbacks,
    })
}

fn single(polygon: Polygon<f64>) -> MultiPolygon<f64> {
    MultiPolygon::new(vec![polygon])
}

/// Strict left-to-right union fold; order matters under the adapter's
/// left-keeping fallback and must match the input order.
fn fold_union<I>(shapes: I, fallbacks: &mut Vec<Fallback>) -> Option<MultiPolygon<f64>>
where
    I: Iterator<Item = Option<MultiPolygon<f64>>>,
{
    let mut acc: Option<MultiPolygon<f64>> = None;
    for shape in shapes {
        acc = track(algebra::safe_union(acc, shape), fallbacks);
    }
    acc
}

fn track(outcome: OpOutcome, fallbacks: &mut Vec<Fallback>) -> Option<MultiPolygon<f64>> {
    if let Some(fallback) = outcome.fallback {
        fallbacks.push(fallback);
    }
    outcome.geometry
}
