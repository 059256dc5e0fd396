use serde::{Deserialize, Serialize};

/// Planar-approximated position: `x` is longitude-like, `y` latitude-like.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

/// One sensor's declared footprint as received on the wire.
///
/// Explicit boundary points win over the radius fallback. A sensor that
/// resolves to neither a detect nor a blind shape contributes nothing;
/// that is not an error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorCoverage {
    pub center_coordinate: Coordinate,
    #[serde(default)]
    pub detect_coordinates: Vec<Coordinate>,
    #[serde(default)]
    pub blind_coordinates: Vec<Coordinate>,
    pub detect_radius: Option<f64>,
    pub blind_radius: Option<f64>,
}

/// Which of the two historical donut formulas to apply.
///
/// The formulas are not equivalent: `AggregateThenSubtract` removes blind
/// area only where no other sensor compensates for it, `PerSensorDonut`
/// removes each sensor's own blind area unconditionally before unioning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DonutMode {
    /// `donut = detectUnion - blindVisible`
    #[default]
    #[serde(rename = "aggregate-then-subtract")]
    AggregateThenSubtract,
    /// `donut = union of (detect_i - blind_i)`
    #[serde(rename = "per-sensor-donut")]
    PerSensorDonut,
}

/// Body of a merge request. `steps` and `mode` fall back to the configured
/// defaults when omitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeRequest {
    #[serde(default)]
    pub coverage_list: Vec<SensorCoverage>,
    pub steps: Option<u32>,
    pub mode: Option<DonutMode>,
}
