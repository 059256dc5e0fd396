use geo::{MultiPolygon, Polygon};

/// Splits a possibly multi-part geometry into its simple pieces, in
/// representation order. Only outer rings are kept (interior holes are not
/// part of the output contract) and degenerate rings are dropped so no
/// malformed boolean debris reaches the encoder.
pub fn flatten(geometry: Option<&MultiPolygon<f64>>) -> Vec<Polygon<f64>> {
    let Some(multi) = geometry else {
        return Vec::new();
    };
    multi
        .0
        .iter()
        .filter(|p| distinct_points(p) >= 3)
        .map(|p| Polygon::new(p.exterior().clone(), vec![]))
        .collect()
}

fn distinct_points(polygon: &Polygon<f64>) -> usize {
    let coords = &polygon.exterior().0;
    match coords.split_last() {
        Some((last, rest)) if rest.first() == Some(last) => rest.len(),
        _ => coords.len(),
    }
}
