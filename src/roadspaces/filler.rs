//! Filler surfaces (§4.3 point 6): small polygons that close gaps the lane
//! model otherwise leaves open — laterally between neighbouring lanes,
//! longitudinally at a lane-section boundary within one road, and
//! longitudinally between a road and its linked successor/predecessor.

use crate::math::curve2d::discretize_domain;
use crate::math::curve3d::Curve3D;
use crate::math::geometry::{Geometry3D, Polygon3D, RuledSurface3D};
use crate::math::range::Range;
use crate::math::vector::Vector3D;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillerKind {
    Lateral,
    LongitudinalWithinRoad,
    LongitudinalBetweenRoads,
}

#[derive(Debug, Clone)]
pub struct FillerSurface {
    pub kind: FillerKind,
    pub surface: Geometry3D,
}

/// A lateral filler between one lane's outer boundary and its neighbour's
/// inner boundary, emitted only if the two curves diverge by more than
/// `tolerance` somewhere along their shared domain. `probe_step` controls
/// how densely the gap is sampled before deciding.
pub fn lateral_filler(outer: &Curve3D, inner: &Curve3D, tolerance: f64, probe_step: f64) -> Option<FillerSurface> {
    let domain = Range::new(
        outer.domain().min.max(inner.domain().min),
        outer.domain().max.min(inner.domain().max),
    );
    if domain.max <= domain.min {
        return None;
    }
    let has_gap = discretize_domain(domain, probe_step).into_iter().any(|s| {
        match (outer.calculate_point(s), inner.calculate_point(s)) {
            (Ok(a), Ok(b)) => a.distance(&b) > tolerance,
            _ => false,
        }
    });
    if !has_gap {
        return None;
    }
    Some(FillerSurface {
        kind: FillerKind::Lateral,
        surface: Geometry3D::RuledSurface(RuledSurface3D {
            boundary_a: outer.clone(),
            boundary_b: inner.clone(),
        }),
    })
}

/// Closes a quadrilateral gap between four corner points, or reports none
/// needed when both edge pairs already meet within `tolerance`. Shared by
/// the within-road (lane-section boundary) and between-roads cases, which
/// differ only in which four points the caller evaluates.
fn corner_gap(
    kind: FillerKind,
    near_inner: Vector3D,
    near_outer: Vector3D,
    far_inner: Vector3D,
    far_outer: Vector3D,
    tolerance: f64,
) -> Option<FillerSurface> {
    if near_inner.distance(&far_inner) <= tolerance && near_outer.distance(&far_outer) <= tolerance {
        return None;
    }
    Some(FillerSurface {
        kind,
        surface: Geometry3D::Polygon(Polygon3D::quad(near_inner, near_outer, far_outer, far_inner)),
    })
}

/// Longitudinal filler at a lane-section boundary within one road: compares
/// the previous section's end-of-lane boundary points to the next section's
/// start-of-lane boundary points (§4.3 point 6).
pub fn longitudinal_within_road_filler(
    prev_inner_end: Vector3D,
    prev_outer_end: Vector3D,
    next_inner_start: Vector3D,
    next_outer_start: Vector3D,
    tolerance: f64,
) -> Option<FillerSurface> {
    corner_gap(
        FillerKind::LongitudinalWithinRoad,
        prev_inner_end,
        prev_outer_end,
        next_inner_start,
        next_outer_start,
        tolerance,
    )
}

/// Longitudinal filler between a road's end and its linked successor road's
/// agreed contact-point endpoint. The caller is responsible for evaluating
/// the successor boundary curves at `0` (contact `START`) or their own
/// length (contact `END`) before calling this (§4.3 point 6, "successor
/// endpoints are swapped when contactPoint = END").
pub fn longitudinal_between_roads_filler(
    this_inner_end: Vector3D,
    this_outer_end: Vector3D,
    successor_inner: Vector3D,
    successor_outer: Vector3D,
    tolerance: f64,
) -> Option<FillerSurface> {
    corner_gap(
        FillerKind::LongitudinalBetweenRoads,
        this_inner_end,
        this_outer_end,
        successor_inner,
        successor_outer,
        tolerance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::affine::AffineSequence2D;
    use crate::math::curve2d::{Curve2D, Line2D};
    use crate::math::function::{CubicFunction, StackedFunction};

    fn flat_curve(length: f64, t_offset: f64) -> Curve3D {
        let xy = Curve2D::Line(Line2D { length });
        let zero = StackedFunction::new(vec![(
            Range::new(0.0, length),
            CubicFunction::new(0.0, 0.0, 0.0, 0.0, 0.0, Range::new(0.0, length)),
        )]);
        let mut placement = AffineSequence2D::new();
        placement.push(crate::math::affine::Affine2D::new(crate::math::vector::Vector2D::new(0.0, t_offset), 0.0));
        Curve3D::new(xy, placement, zero.clone(), zero, 1e-9)
    }

    #[test]
    fn lateral_filler_present_when_lanes_leave_a_gap() {
        let outer = flat_curve(10.0, -3.5);
        let inner = flat_curve(10.0, -4.5);
        let filler = lateral_filler(&outer, &inner, 1e-6, 2.0);
        assert!(filler.is_some());
        assert_eq!(filler.unwrap().kind, FillerKind::Lateral);
    }

    #[test]
    fn lateral_filler_absent_when_boundaries_coincide() {
        let outer = flat_curve(10.0, -3.5);
        let inner = flat_curve(10.0, -3.5);
        assert!(lateral_filler(&outer, &inner, 1e-6, 2.0).is_none());
    }

    #[test]
    fn two_connected_roads_with_matching_endpoints_need_no_filler() {
        // Road A ends at (10,0,0); road B starts at (10,0,0) (origin shifted
        // by the planView placement, as in spec scenario 4).
        let this_inner_end = Vector3D::new(10.0, 0.0, 0.0);
        let this_outer_end = Vector3D::new(10.0, -3.5, 0.0);
        let successor_inner = Vector3D::new(10.0, 0.0, 0.0);
        let successor_outer = Vector3D::new(10.0, -3.5, 0.0);
        assert!(longitudinal_between_roads_filler(
            this_inner_end,
            this_outer_end,
            successor_inner,
            successor_outer,
            1e-9
        )
        .is_none());
    }
}
