//! Per-lane-section boundary construction (§4.3 point 5): integrating each
//! lane's width cubic outward from the section's center line, signed by the
//! lane id's sign, into inner/outer/center `Curve3D` boundaries and a ruled
//! surface between them.

use crate::math::curve2d::{Curve2D, LateralOffsetCurve2D, SubCurve2D};
use crate::math::curve3d::Curve3D;
use crate::math::function::{CubicFunction, StackedFunction};
use crate::math::geometry::{Geometry3D, RuledSurface3D};
use crate::math::range::Range;
use crate::opendrive::lane::{Lane, LaneId, LaneSection, LaneType, RoadMark, RoadMarkType, Width};

/// Identifies one lane within its road and lane section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneIdentifier {
    pub road_id: String,
    pub lane_section_index: usize,
    pub lane_id: LaneId,
}

/// A fully built lane: its boundaries and center line as section-local
/// `Curve3D`s (s = 0 at the lane section's own start), plus the ruled
/// surface between inner and outer boundary.
#[derive(Debug, Clone)]
pub struct GeometricLane {
    pub identifier: LaneIdentifier,
    pub lane_type: LaneType,
    pub level: bool,
    pub inner_boundary: Curve3D,
    pub outer_boundary: Curve3D,
    pub center_line: Curve3D,
    pub surface: Geometry3D,
    pub road_marks: Vec<Geometry3D>,
}

/// Builds a `StackedFunction` from a lane's width records, already
/// section-local (`sOffset` is relative to the lane section's own start).
fn build_width_function(widths: &[Width], section_length: f64) -> StackedFunction {
    let mut records: Vec<_> = widths.iter().map(|w| (w.s_offset.value, w.a, w.b, w.c, w.d)).collect();
    records.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
    if records.is_empty() {
        let domain = Range::new(0.0, section_length.max(0.0));
        return StackedFunction::new(vec![(domain, CubicFunction::new(0.0, 0.0, 0.0, 0.0, 0.0, domain))]);
    }
    let n = records.len();
    let pieces = records
        .iter()
        .enumerate()
        .map(|(i, &(s, a, b, c, d))| {
            let start = if i == 0 { 0.0 } else { s };
            let end = if i + 1 < n { records[i + 1].0 } else { section_length.max(s) };
            let domain = Range::new(start, end.max(start));
            (domain, CubicFunction::new(a, b, c, d, s, domain))
        })
        .collect();
    StackedFunction::new(pieces)
}

fn zero_function(section_length: f64) -> StackedFunction {
    let domain = Range::new(0.0, section_length.max(0.0));
    StackedFunction::new(vec![(domain, CubicFunction::new(0.0, 0.0, 0.0, 0.0, 0.0, domain))])
}

fn constant_function(value: f64, section_length: f64) -> StackedFunction {
    let domain = Range::new(0.0, section_length.max(0.0));
    StackedFunction::new(vec![(domain, CubicFunction::new(value, 0.0, 0.0, 0.0, 0.0, domain))])
}

/// Default OpenDRIVE road-mark line width when `<roadMark>` omits `width`.
const DEFAULT_MARK_WIDTH: f64 = 0.12;

/// Builds one thin `RuledSurface3D` per road mark, centred on the lane's
/// inner boundary (the edge towards the lane of next-lower `|id|`), which is
/// where OpenDRIVE places a lane's road marks.
fn build_road_marks(marks: &[RoadMark], inner: &StackedFunction, section_length: f64, ctx: &SectionContext) -> Vec<Geometry3D> {
    marks
        .iter()
        .filter(|m| m.mark_type != RoadMarkType::None)
        .map(|mark| {
            let width = mark.width.map(|w| w.value).unwrap_or(DEFAULT_MARK_WIDTH);
            let half = constant_function(width / 2.0, section_length);
            let left_edge = inner.add(&half);
            let right_edge = inner.add(&half.scale(-1.0));
            Geometry3D::RuledSurface(RuledSurface3D {
                boundary_a: ctx.lane_curve(left_edge),
                boundary_b: ctx.lane_curve(right_edge),
            })
        })
        .collect()
}

fn offset_curve(center_base: &Curve2D, offset: StackedFunction) -> Curve2D {
    Curve2D::LateralOffset(LateralOffsetCurve2D {
        base: Box::new(center_base.clone()),
        offset,
    })
}

struct SectionContext<'a> {
    center_base: Curve2D,
    height: &'a StackedFunction,
    torsion: &'a StackedFunction,
    tolerance: f64,
}

impl<'a> SectionContext<'a> {
    fn lane_curve(&self, offset: StackedFunction) -> Curve3D {
        Curve3D::new(
            offset_curve(&self.center_base, offset),
            crate::math::affine::AffineSequence2D::new(),
            self.height.clone(),
            self.torsion.clone(),
            self.tolerance,
        )
    }
}

/// Builds every non-center `GeometricLane` in one lane section.
///
/// `reference_xy` is the road's full (global-`s`) reference line; `height`
/// and `torsion` are already restricted and re-keyed to this section's local
/// `s` by the caller, as is `lane_offset_local`. Right lanes (negative id)
/// are processed in ascending `|id|` order and left lanes (positive id) in
/// ascending `id` order, each accumulating outward from the section's
/// center line (§4.3 point 5).
pub fn build_lane_section(
    road_id: &str,
    lane_section_index: usize,
    section: &LaneSection,
    reference_xy: &Curve2D,
    section_start: f64,
    section_length: f64,
    lane_offset_local: &StackedFunction,
    height: &StackedFunction,
    torsion: &StackedFunction,
    tolerance: f64,
) -> Vec<GeometricLane> {
    let windowed = Curve2D::Sub(SubCurve2D {
        base: Box::new(reference_xy.clone()),
        start: section_start,
        length: section_length,
    });
    let center_base = offset_curve(&windowed, lane_offset_local.clone());
    let ctx = SectionContext {
        center_base,
        height,
        torsion,
        tolerance,
    };

    let mut lanes = Vec::new();
    for (side, sign) in [(&section.right, -1.0_f64), (&section.left, 1.0_f64)] {
        let mut ordered: Vec<&Lane> = side.iter().collect();
        ordered.sort_by_key(|l| l.id.abs());

        let mut cursor = zero_function(section_length);
        for lane in ordered {
            let signed_width = build_width_function(&lane.width, section_length).scale(sign);
            let inner = cursor.clone();
            let outer = cursor.add(&signed_width);
            let center = inner.add(&outer).scale(0.5);

            let road_marks = build_road_marks(&lane.road_mark, &inner, section_length, &ctx);
            let inner_curve = ctx.lane_curve(inner);
            let outer_curve = ctx.lane_curve(outer.clone());

            lanes.push(GeometricLane {
                identifier: LaneIdentifier {
                    road_id: road_id.to_string(),
                    lane_section_index,
                    lane_id: lane.id,
                },
                lane_type: lane.lane_type,
                level: lane.level,
                center_line: ctx.lane_curve(center),
                surface: Geometry3D::RuledSurface(RuledSurface3D {
                    boundary_a: inner_curve.clone(),
                    boundary_b: outer_curve.clone(),
                }),
                inner_boundary: inner_curve,
                outer_boundary: outer_curve,
                road_marks,
            });

            cursor = outer;
        }
    }
    lanes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::curve2d::Line2D;
    use crate::opendrive::lane::RoadMarkColor;
    use uom::si::f64::Length;
    use uom::si::length::meter;

    fn flat_height(length: f64) -> StackedFunction {
        zero_function(length)
    }

    fn straight_lane_section(lanes_right: Vec<Lane>) -> LaneSection {
        LaneSection {
            s: Length::new::<meter>(0.0),
            single_side: false,
            left: Vec::new(),
            center: Lane {
                id: 0,
                lane_type: LaneType::None,
                level: false,
                predecessor: None,
                successor: None,
                width: Vec::new(),
                road_mark: Vec::new(),
            },
            right: lanes_right,
        }
    }

    #[test]
    fn single_constant_width_right_lane_forms_expected_rectangle() {
        let reference = Curve2D::Line(Line2D { length: 10.0 });
        let section = straight_lane_section(vec![Lane {
            id: -1,
            lane_type: LaneType::Driving,
            level: false,
            predecessor: None,
            successor: None,
            width: vec![Width {
                s_offset: Length::new::<meter>(0.0),
                a: 3.5,
                b: 0.0,
                c: 0.0,
                d: 0.0,
            }],
            road_mark: Vec::new(),
        }]);

        let height = flat_height(10.0);
        let torsion = flat_height(10.0);
        let lane_offset = zero_function(10.0);

        let lanes = build_lane_section("r1", 0, &section, &reference, 0.0, 10.0, &lane_offset, &height, &torsion, 1e-9);
        assert_eq!(lanes.len(), 1);
        let lane = &lanes[0];

        let inner_start = lane.inner_boundary.calculate_point(0.0).unwrap();
        let inner_end = lane.inner_boundary.calculate_point(10.0).unwrap();
        let outer_start = lane.outer_boundary.calculate_point(0.0).unwrap();
        let outer_end = lane.outer_boundary.calculate_point(10.0).unwrap();

        assert!((inner_start.x - 0.0).abs() < 1e-9 && (inner_start.y - 0.0).abs() < 1e-9);
        assert!((inner_end.x - 10.0).abs() < 1e-9 && (inner_end.y - 0.0).abs() < 1e-9);
        assert!((outer_start.x - 0.0).abs() < 1e-9 && (outer_start.y - (-3.5)).abs() < 1e-9);
        assert!((outer_end.x - 10.0).abs() < 1e-9 && (outer_end.y - (-3.5)).abs() < 1e-9);
    }

    #[test]
    fn cubic_width_lane_matches_known_outer_boundary_samples() {
        let reference = Curve2D::Line(Line2D { length: 10.0 });
        let section = straight_lane_section(vec![Lane {
            id: -1,
            lane_type: LaneType::Driving,
            level: false,
            predecessor: None,
            successor: None,
            width: vec![Width {
                s_offset: Length::new::<meter>(0.0),
                a: 3.5,
                b: 0.0,
                c: -0.035,
                d: 0.0,
            }],
            road_mark: Vec::new(),
        }]);

        let height = flat_height(10.0);
        let torsion = flat_height(10.0);
        let lane_offset = zero_function(10.0);

        let lanes = build_lane_section("r1", 0, &section, &reference, 0.0, 10.0, &lane_offset, &height, &torsion, 1e-9);
        let outer = &lanes[0].outer_boundary;

        let at10 = outer.calculate_point(10.0).unwrap();
        assert!((at10.y - 0.0).abs() < 1e-9);
        let at5 = outer.calculate_point(5.0).unwrap();
        assert!((at5.y - (-2.625)).abs() < 1e-9);
    }

    #[test]
    fn lane_offset_shifts_the_whole_section_sideways() {
        let reference = Curve2D::Line(Line2D { length: 10.0 });
        let section = straight_lane_section(vec![Lane {
            id: -1,
            lane_type: LaneType::Driving,
            level: false,
            predecessor: None,
            successor: None,
            width: vec![Width {
                s_offset: Length::new::<meter>(0.0),
                a: 3.5,
                b: 0.0,
                c: 0.0,
                d: 0.0,
            }],
            road_mark: Vec::new(),
        }]);

        let height = flat_height(10.0);
        let torsion = flat_height(10.0);
        let domain = Range::new(0.0, 10.0);
        let lane_offset = StackedFunction::new(vec![(domain, CubicFunction::new(2.0, 0.0, 0.0, 0.0, 0.0, domain))]);

        let lanes = build_lane_section("r1", 0, &section, &reference, 0.0, 10.0, &lane_offset, &height, &torsion, 1e-9);
        let inner_start = lanes[0].inner_boundary.calculate_point(0.0).unwrap();
        assert!((inner_start.y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn solid_road_mark_becomes_a_thin_ruled_surface_on_the_inner_edge() {
        let reference = Curve2D::Line(Line2D { length: 10.0 });
        let section = straight_lane_section(vec![Lane {
            id: -1,
            lane_type: LaneType::Driving,
            level: false,
            predecessor: None,
            successor: None,
            width: vec![Width {
                s_offset: Length::new::<meter>(0.0),
                a: 3.5,
                b: 0.0,
                c: 0.0,
                d: 0.0,
            }],
            road_mark: vec![RoadMark {
                s_offset: Length::new::<meter>(0.0),
                mark_type: RoadMarkType::Solid,
                color: RoadMarkColor::Standard,
                width: Some(Length::new::<meter>(0.2)),
            }],
        }]);

        let height = flat_height(10.0);
        let torsion = flat_height(10.0);
        let lane_offset = zero_function(10.0);

        let lanes = build_lane_section("r1", 0, &section, &reference, 0.0, 10.0, &lane_offset, &height, &torsion, 1e-9);
        assert_eq!(lanes[0].road_marks.len(), 1);
        match &lanes[0].road_marks[0] {
            Geometry3D::RuledSurface(surface) => {
                let a = surface.boundary_a.calculate_point(0.0).unwrap();
                let b = surface.boundary_b.calculate_point(0.0).unwrap();
                assert!(((a.y - b.y).abs() - 0.2).abs() < 1e-9);
            }
            _ => panic!("expected ruled surface"),
        }
    }

    #[test]
    fn road_mark_of_type_none_is_skipped() {
        let reference = Curve2D::Line(Line2D { length: 10.0 });
        let section = straight_lane_section(vec![Lane {
            id: -1,
            lane_type: LaneType::Driving,
            level: false,
            predecessor: None,
            successor: None,
            width: vec![Width {
                s_offset: Length::new::<meter>(0.0),
                a: 3.5,
                b: 0.0,
                c: 0.0,
                d: 0.0,
            }],
            road_mark: vec![RoadMark {
                s_offset: Length::new::<meter>(0.0),
                mark_type: RoadMarkType::None,
                color: RoadMarkColor::Standard,
                width: None,
            }],
        }]);

        let height = flat_height(10.0);
        let torsion = flat_height(10.0);
        let lane_offset = zero_function(10.0);

        let lanes = build_lane_section("r1", 0, &section, &reference, 0.0, 10.0, &lane_offset, &height, &torsion, 1e-9);
        assert!(lanes[0].road_marks.is_empty());
    }
}
