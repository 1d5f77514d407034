//! Reference-line construction (§4.3 points 1-4): composing planView
//! segments into one `Curve2D`, stacking elevation/superelevation into
//! `heightFn`/`torsionFn`, and wrapping the result in a `Curve3D`.

use crate::math::affine::{Affine2D, AffineSequence2D};
use crate::math::curve2d::{
    Arc2D, CompositeCurve2D, CompositeSegment, CubicCurve2D, Curve2D, Line2D, Line2DOrOther,
    ParamPRange, ParametricCubicCurve2D, Spiral2D,
};
use crate::math::curve3d::Curve3D;
use crate::math::function::{CubicFunction, StackedFunction};
use crate::math::range::Range;
use crate::math::vector::Vector2D;
use crate::opendrive::geometry::{GeometryRecord, GeometryShape};
use crate::opendrive::profile::{ElevationRecord, SuperelevationRecord};
use crate::opendrive::road::Road;
use crate::roadspaces::error::{Result, RoadspacesError};

fn single_segment(shape: &GeometryShape, length: f64) -> Line2DOrOther {
    match shape {
        GeometryShape::Line => Line2DOrOther::Line(Line2D { length }),
        GeometryShape::Arc { curvature } => Line2DOrOther::Arc(Arc2D {
            length,
            curvature: curvature.value,
        }),
        GeometryShape::Spiral { curv_start, curv_end } => Line2DOrOther::Spiral(Spiral2D {
            length,
            curvature_start: curv_start.value,
            curvature_end: curv_end.value,
        }),
        GeometryShape::Poly3 { a, b, c, d } => Line2DOrOther::Cubic(CubicCurve2D {
            length,
            a: *a,
            b: *b,
            c: *c,
            d: *d,
        }),
        GeometryShape::ParamPoly3 {
            a_u,
            b_u,
            c_u,
            d_u,
            a_v,
            b_v,
            c_v,
            d_v,
            p_range,
        } => Line2DOrOther::ParamCubic(ParametricCubicCurve2D {
            length,
            a_u: *a_u,
            b_u: *b_u,
            c_u: *c_u,
            d_u: *d_u,
            a_v: *a_v,
            b_v: *b_v,
            c_v: *c_v,
            d_v: *d_v,
            p_range: match p_range {
                crate::opendrive::geometry::ParamPoly3PRange::ArcLength => ParamPRange::ArcLength,
                crate::opendrive::geometry::ParamPoly3PRange::Normalized => ParamPRange::Normalized,
            },
        }),
    }
}

/// Butts every `planView` record into one composite reference curve, each
/// placed at its own recorded `(x, y, hdg)` (§4.3 point 1). Gaps/overlaps
/// between a record's end and the next record's `s` are tolerated; the
/// caller is responsible for reporting them (§4.3 point 1, "do not abort").
pub fn build_plan_view_curve(road: &Road) -> Result<Curve2D> {
    if road.plan_view.is_empty() {
        return Err(RoadspacesError::EmptyPlanView(road.id.clone()));
    }
    let segments = road
        .plan_view
        .iter()
        .map(|record: &GeometryRecord| CompositeSegment {
            start: record.s.value,
            curve: single_segment(&record.shape, record.length.value),
            placement: Affine2D::new(Vector2D::new(record.x.value, record.y.value), record.hdg.value),
        })
        .collect();
    Ok(Curve2D::Composite(CompositeCurve2D::new(segments)))
}

/// Builds a `StackedFunction` from cubic records keyed by `s`, extending
/// the first piece's domain down to `0.0` and the last piece's domain up to
/// `road_length` so the function is total over `[0, road_length]` without
/// needing a `defaultValue` (§4.3 point 2 supplement).
fn stack_cubics(mut records: Vec<(f64, f64, f64, f64, f64)>, road_length: f64) -> StackedFunction {
    records.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
    if records.is_empty() {
        let domain = Range::new(0.0, road_length.max(0.0));
        return StackedFunction::new(vec![(domain, CubicFunction::new(0.0, 0.0, 0.0, 0.0, 0.0, domain))]);
    }
    let n = records.len();
    let pieces = records
        .iter()
        .enumerate()
        .map(|(i, &(s, a, b, c, d))| {
            let start = if i == 0 { 0.0 } else { s };
            let end = if i + 1 < n { records[i + 1].0 } else { road_length.max(s) };
            let domain = Range::new(start, end.max(start));
            (domain, CubicFunction::new(a, b, c, d, s, domain))
        })
        .collect();
    StackedFunction::new(pieces)
}

pub fn build_height_function(road: &Road) -> StackedFunction {
    let records = road
        .elevation_profile
        .as_ref()
        .map(|ep| {
            ep.elevation
                .iter()
                .map(|r: &ElevationRecord| (r.s.value, r.a, r.b, r.c, r.d))
                .collect()
        })
        .unwrap_or_default();
    stack_cubics(records, road.length.value)
}

pub fn build_torsion_function(road: &Road) -> StackedFunction {
    let records = road
        .lateral_profile
        .as_ref()
        .map(|lp| {
            lp.superelevation
                .iter()
                .map(|r: &SuperelevationRecord| (r.s.value, r.a, r.b, r.c, r.d))
                .collect()
        })
        .unwrap_or_default();
    stack_cubics(records, road.length.value)
}

/// Builds the `laneOffset(s)` function shifting the lane-section origin
/// away from the reference line (a cubic-keyed sequence, same shape as
/// elevation/superelevation).
pub fn build_lane_offset_function(road: &Road) -> StackedFunction {
    let records = road
        .lane_offset
        .iter()
        .map(|r| (r.s.value, r.a, r.b, r.c, r.d))
        .collect();
    stack_cubics(records, road.length.value)
}

/// Builds the 3D reference curve `Curve3D(referenceXY, heightFn, torsionFn)`
/// with the road's tolerance (§4.3 points 1-4).
pub fn build_reference_curve(road: &Road, tolerance: f64) -> Result<Curve3D> {
    let xy = build_plan_view_curve(road)?;
    let height = build_height_function(road);
    let torsion = build_torsion_function(road);
    Ok(Curve3D::new(xy, AffineSequence2D::new(), height, torsion, tolerance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opendrive::road::{Link, TrafficRule};
    use uom::si::angle::radian;
    use uom::si::f64::{Angle, Length};
    use uom::si::length::meter;

    fn straight_road() -> Road {
        Road {
            id: "1".to_string(),
            name: None,
            length: Length::new::<meter>(10.0),
            junction: None,
            rule: TrafficRule::RightHandTraffic,
            link: Link::default(),
            plan_view: vec![GeometryRecord {
                s: Length::new::<meter>(0.0),
                x: Length::new::<meter>(0.0),
                y: Length::new::<meter>(0.0),
                hdg: Angle::new::<radian>(0.0),
                length: Length::new::<meter>(10.0),
                shape: GeometryShape::Line,
            }],
            elevation_profile: None,
            lateral_profile: None,
            lane_offset: Vec::new(),
            lane_section: Vec::new(),
            object: Vec::new(),
            signal: Vec::new(),
        }
    }

    #[test]
    fn straight_single_segment_road_reaches_expected_endpoint() {
        let road = straight_road();
        let curve = build_reference_curve(&road, 1e-9).unwrap();
        let start = curve.calculate_point(0.0).unwrap();
        let end = curve.calculate_point(10.0).unwrap();
        assert_eq!(start, crate::math::vector::Vector3D::new(0.0, 0.0, 0.0));
        assert!((end.x - 10.0).abs() < 1e-9);
        assert_eq!(end.y, 0.0);
        assert_eq!(end.z, 0.0);
    }

    #[test]
    fn elevation_ramp_reaches_height_1_at_s_10() {
        let mut road = straight_road();
        road.elevation_profile = Some(crate::opendrive::profile::ElevationProfile {
            elevation: vec![ElevationRecord {
                s: Length::new::<meter>(0.0),
                a: 0.0,
                b: 0.1,
                c: 0.0,
                d: 0.0,
            }],
        });
        let curve = build_reference_curve(&road, 1e-9).unwrap();
        assert!((curve.calculate_point(10.0).unwrap().z - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_plan_view_is_an_error() {
        let mut road = straight_road();
        road.plan_view.clear();
        assert!(build_reference_curve(&road, 1e-9).is_err());
    }
}
