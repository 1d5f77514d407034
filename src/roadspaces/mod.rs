//! The RoadSpaces builder (§4.3/B): turns one OpenDRIVE `Road` into a
//! reference line plus per-lane-section geometric lanes, independent of any
//! CityGML output concern.

pub mod error;
pub mod filler;
pub mod lane;
pub mod linkage;
pub mod object;
pub mod road;

pub use error::{Result, RoadspacesError};
pub use lane::{GeometricLane, LaneIdentifier};
pub use linkage::RoadspaceLinkage;
pub use object::RoadspaceObject;

use crate::math::affine::AffineSequence2D;
use crate::math::curve3d::Curve3D;
use crate::opendrive::road::Road;
use crate::opendrive::OpenDriveModel;

/// One lane section's worth of built lanes, with its own-local `s` window
/// into the road (`[s, s + length)`).
#[derive(Debug, Clone)]
pub struct LaneSectionSpace {
    pub s: f64,
    pub length: f64,
    pub lanes: Vec<GeometricLane>,
}

/// Everything the RoadSpaces builder produces for one `Road`.
#[derive(Debug, Clone)]
pub struct Roadspace {
    pub road_id: String,
    pub reference_line: Curve3D,
    pub lane_sections: Vec<LaneSectionSpace>,
    pub roadspace_objects: Vec<RoadspaceObject>,
    pub linkage: RoadspaceLinkage,
}

#[derive(Debug, Clone, Default)]
pub struct RoadspacesModel {
    pub roadspaces: Vec<Roadspace>,
}

impl RoadspacesModel {
    pub fn roadspace(&self, road_id: &str) -> Option<&Roadspace> {
        self.roadspaces.iter().find(|r| r.road_id == road_id)
    }
}

/// Builds one road's reference line and lane sections (§4.3 points 1-5).
pub fn build_roadspace(road: &Road, tolerance: f64) -> Result<Roadspace> {
    if road.lane_section.is_empty() {
        return Err(RoadspacesError::EmptyLaneSections(road.id.clone()));
    }

    let xy = road::build_plan_view_curve(road)?;
    let height = road::build_height_function(road);
    let torsion = road::build_torsion_function(road);
    let lane_offset = road::build_lane_offset_function(road);
    let reference_line = Curve3D::new(xy.clone(), AffineSequence2D::new(), height.clone(), torsion.clone(), tolerance);

    let sorted_sections = road.lane_sections_sorted();
    let mut lane_sections = Vec::with_capacity(sorted_sections.len());
    for (index, section) in sorted_sections.iter().enumerate() {
        let start = section.s.value;
        let end = sorted_sections
            .get(index + 1)
            .map(|next| next.s.value)
            .unwrap_or(road.length.value);
        let length = (end - start).max(0.0);

        let lane_offset_local = lane_offset.shift(start);
        let height_local = height.shift(start);
        let torsion_local = torsion.shift(start);

        let lanes = lane::build_lane_section(
            &road.id,
            index,
            section,
            &xy,
            start,
            length,
            &lane_offset_local,
            &height_local,
            &torsion_local,
            tolerance,
        );
        lane_sections.push(LaneSectionSpace { s: start, length, lanes });
    }

    let roadspace_objects = road
        .object
        .iter()
        .map(|object| object::build_roadspace_object(&reference_line, &road.id, object))
        .collect::<Result<Vec<_>>>()?;
    let linkage = linkage::build_linkage(road);

    Ok(Roadspace {
        road_id: road.id.clone(),
        reference_line,
        lane_sections,
        roadspace_objects,
        linkage,
    })
}

/// Builds every road in the model that has at least one lane section,
/// reporting roads skipped for lack of one rather than aborting (the fatal
/// pass, run earlier in the pipeline, is what actually excludes a model
/// from reaching this point).
pub fn build_roadspaces_model(model: &OpenDriveModel, tolerance: f64) -> (RoadspacesModel, Vec<RoadspacesError>) {
    let mut roadspaces = Vec::new();
    let mut errors = Vec::new();
    for road in &model.road {
        match build_roadspace(road, tolerance) {
            Ok(roadspace) => roadspaces.push(roadspace),
            Err(err) => errors.push(err),
        }
    }
    (RoadspacesModel { roadspaces }, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opendrive::geometry::{GeometryRecord, GeometryShape};
    use crate::opendrive::lane::{Lane, LaneSection, LaneType, Width};
    use crate::opendrive::road::{Link, TrafficRule};
    use uom::si::angle::radian;
    use uom::si::f64::{Angle, Length};
    use uom::si::length::meter;

    fn straight_single_lane_road() -> Road {
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
            lane_section: vec![LaneSection {
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
                right: vec![Lane {
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
                }],
            }],
            object: Vec::new(),
            signal: Vec::new(),
        }
    }

    #[test]
    fn single_straight_road_rectangle_matches_spec_scenario_1() {
        let road = straight_single_lane_road();
        let roadspace = build_roadspace(&road, 1e-9).unwrap();
        assert_eq!(roadspace.lane_sections.len(), 1);
        let lane = &roadspace.lane_sections[0].lanes[0];

        let corners = [
            (lane.inner_boundary.calculate_point(0.0).unwrap(), (0.0, 0.0)),
            (lane.inner_boundary.calculate_point(10.0).unwrap(), (10.0, 0.0)),
            (lane.outer_boundary.calculate_point(10.0).unwrap(), (10.0, -3.5)),
            (lane.outer_boundary.calculate_point(0.0).unwrap(), (0.0, -3.5)),
        ];
        for (point, (x, y)) in corners {
            assert!((point.x - x).abs() < 1e-9);
            assert!((point.y - y).abs() < 1e-9);
            assert_eq!(point.z, 0.0);
        }
    }

    #[test]
    fn road_without_lane_sections_is_an_error() {
        let mut road = straight_single_lane_road();
        road.lane_section.clear();
        assert!(build_roadspace(&road, 1e-9).is_err());
    }
}
