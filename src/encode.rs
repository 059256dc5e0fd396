use crate::aggregate::Aggregation;
use crate::types::Coordinate;
use geo::Polygon;
use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde::Serialize;
use serde_json::{json, Map};

/// Wire form of one aggregation: each region is a list of closed outer
/// rings, each ring a list of `{x, y}` pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeResponse {
    pub detect_union: Vec<Vec<Coordinate>>,
    pub blind_visible: Vec<Vec<Coordinate>>,
    pub donut: Vec<Vec<Coordinate>>,
    pub degraded: bool,
}

impl From<&Aggregation> for MergeResponse {
    fn from(aggregation: &Aggregation) -> Self {
        MergeResponse {
            detect_union: rings(&aggregation.detect_union),
            blind_visible: rings(&aggregation.blind_visible),
            donut: rings(&aggregation.donut),
            degraded: aggregation.is_degraded(),
        }
    }
}

/// Outer rings as point lists, closing point included.
pub fn rings(polygons: &[Polygon<f64>]) -> Vec<Vec<Coordinate>> {
    polygons
        .iter()
        .map(|p| {
            p.exterior()
                .0
                .iter()
                .map(|c| Coordinate { x: c.x, y: c.y })
                .collect()
        })
        .collect()
}

/// GeoJSON rendition: one feature per polygon piece, tagged with a `layer`
/// property so a map client can style each region independently.
pub fn to_feature_collection(aggregation: &Aggregation) -> FeatureCollection {
    let mut features = Vec::new();
    push_layer(&mut features, "detect-union", &aggregation.detect_union);
    push_layer(&mut features, "blind-visible", &aggregation.blind_visible);
    push_layer(&mut features, "donut", &aggregation.donut);
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn push_layer(features: &mut Vec<Feature>, layer: &str, polygons: &[Polygon<f64>]) {
    for polygon in polygons {
        let mut properties = Map::new();
        properties.insert("layer".to_string(), json!(layer));
        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::from(polygon))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn triangle() -> Polygon<f64> {
        polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 0.0, y: 1.0), (x: 0.0, y: 0.0)]
    }

    fn sample() -> Aggregation {
        Aggregation {
            detect_union: vec![triangle()],
            blind_visible: vec![],
            donut: vec![triangle(), triangle()],
            fallbacks: vec![],
        }
    }

    #[test]
    fn rings_include_the_closing_point() {
        let encoded = rings(&[triangle()]);
        assert_eq!(encoded.len(), 1);
        assert_eq!(encoded[0].len(), 4);
        assert_eq!(encoded[0].first(), encoded[0].last());
    }

    #[test]
    fn response_serializes_with_wire_field_names() {
        let response = MergeResponse::from(&sample());
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("detectUnion").is_some());
        assert!(value.get("blindVisible").is_some());
        assert_eq!(value["donut"].as_array().unwrap().len(), 2);
        assert_eq!(value["degraded"], json!(false));
    }

    #[test]
    fn feature_collection_tags_each_piece_with_its_layer() {
        let fc = to_feature_collection(&sample());
        assert_eq!(fc.features.len(), 3);
        let layers: Vec<_> = fc
            .features
            .iter()
            .map(|f| f.properties.as_ref().unwrap()["layer"].clone())
            .collect();
        assert_eq!(layers, vec![json!("detect-union"), json!("donut"), json!("donut")]);
    }
}
