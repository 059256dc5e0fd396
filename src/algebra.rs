use geo::{BooleanOps, MultiPolygon};
use std::panic::{self, AssertUnwindSafe};

/// Records that a primitive operation failed and which fallback applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Union failed; the left operand was kept, the right one dropped.
    UnionKeptLeft,
    /// Difference failed; the minuend was kept unchanged.
    DifferenceKeptMinuend,
}

/// Outcome of one guarded boolean operation: the surviving geometry plus a
/// marker when the primitive failed, so callers can tell a genuinely empty
/// result apart from a triggered fallback.
#[derive(Debug, Clone)]
pub struct OpOutcome {
    pub geometry: Option<MultiPolygon<f64>>,
    pub fallback: Option<Fallback>,
}

impl OpOutcome {
    fn clean(geometry: Option<MultiPolygon<f64>>) -> Self {
        OpOutcome {
            geometry,
            fallback: None,
        }
    }
}

/// Union with "absent" as the identity element.
///
/// If the primitive fails the left operand is kept and the right
/// contribution is silently dropped, so a left-to-right fold degrades to a
/// coarser region instead of aborting. Fold order is significant on
/// pathological input; callers must not reorder.
pub fn safe_union(a: Option<MultiPolygon<f64>>, b: Option<MultiPolygon<f64>>) -> OpOutcome {
    let (a, b) = match (a, b) {
        (None, b) => return OpOutcome::clean(b),
        (a, None) => return OpOutcome::clean(a),
        (Some(a), Some(b)) => (a, b),
    };
    match contain(|| a.union(&b)) {
        Some(unioned) => OpOutcome::clean(Some(unioned)),
        None => {
            tracing::warn!("polygon union failed, keeping left operand");
            OpOutcome {
                geometry: Some(a),
                fallback: Some(Fallback::UnionKeptLeft),
            }
        }
    }
}

/// Difference that treats an absent subtrahend as nothing to subtract and
/// keeps the minuend unchanged when the primitive fails.
pub fn safe_difference(a: Option<MultiPolygon<f64>>, b: Option<&MultiPolygon<f64>>) -> OpOutcome {
    let (a, b) = match (a, b) {
        (a, None) => return OpOutcome::clean(a),
        (None, Some(_)) => return OpOutcome::clean(None),
        (Some(a), Some(b)) => (a, b),
    };
    match contain(|| a.difference(b)) {
        Some(diff) => OpOutcome::clean(Some(diff)),
        None => {
            tracing::warn!("polygon difference failed, keeping minuend unchanged");
            OpOutcome {
                geometry: Some(a),
                fallback: Some(Fallback::DifferenceKeptMinuend),
            }
        }
    }
}

/// Boolean algebra on polygons is not total: self-intersections and
/// near-degenerate tangencies can make the primitive panic. Contain the
/// panic so the aggregation never aborts for one bad pairwise operation.
fn contain<F>(op: F) -> Option<MultiPolygon<f64>>
where
    F: FnOnce() -> MultiPolygon<f64>,
{
    panic::catch_unwind(AssertUnwindSafe(op)).ok()
}
