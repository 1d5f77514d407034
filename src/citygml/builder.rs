//! The RoadSpaces -> CityGML surface builder (§4.4): walks a
//! `RoadspacesModel`, runs the geometry visitor on each primitive, and
//! emits transportation, generics, building, city-furniture, and
//! vegetation features.

use std::collections::HashMap;

use crate::citygml::error::{CityGmlError, Result};
use crate::citygml::identifier::add_unique_identifier;
use crate::citygml::mapping::{self, ObjectTarget};
use crate::citygml::model::{
    AuxiliaryTrafficSpace, BoundarySurface, BoundarySurfaceKind, CityModel, Marking, RoadFeature, RoadObjectFeature,
    TrafficDirection, TrafficSpace,
};
use crate::config::Configuration;
use crate::math::geometry::{visit, GeometryOutput};
use crate::opendrive::lane::LaneId;
use crate::roadspaces::filler::{lateral_filler, longitudinal_within_road_filler, FillerKind};
use crate::roadspaces::lane::GeometricLane;
use crate::roadspaces::{LaneSectionSpace, Roadspace, RoadspacesModel};

fn visit_named(geometry: &crate::math::geometry::Geometry3D, config: &Configuration, feature: &str) -> Result<GeometryOutput> {
    visit(geometry, &config.discretization_config()).map_err(|source| CityGmlError::Geometry {
        feature: feature.to_string(),
        source,
    })
}

fn lod0_curve(lane: &GeometricLane, config: &Configuration) -> Result<Option<crate::math::geometry::LineString3D>> {
    let output = visit_named(
        &crate::math::geometry::Geometry3D::Curve(lane.center_line.clone()),
        config,
        &lane_feature_name(lane),
    )?;
    match output {
        GeometryOutput::LineString(line) if !line.points.is_empty() => Ok(Some(line)),
        _ => Ok(None),
    }
}

fn lane_feature_name(lane: &GeometricLane) -> String {
    format!(
        "{}:{}:{}",
        lane.identifier.road_id, lane.identifier.lane_section_index, lane.identifier.lane_id
    )
}

/// Extra boundary surfaces for one lane's road marks: attached to the same
/// traffic space when `mapping_backwards_compatibility` asks for CityGML
/// 2-style output; split into standalone `Marking` features otherwise (§9
/// open question 3).
fn build_road_mark_boundaries(lane: &GeometricLane, config: &Configuration) -> Result<(Vec<BoundarySurface>, Vec<Marking>)> {
    let mut boundaries = Vec::new();
    let mut markings = Vec::new();
    for (index, geometry) in lane.road_marks.iter().enumerate() {
        let feature = format!("{}:mark:{}", lane_feature_name(lane), index);
        let output = visit_named(geometry, config, &feature)?;
        if config.mapping_backwards_compatibility {
            boundaries.push(BoundarySurface {
                id: add_unique_identifier(&feature, "auxiliaryTrafficArea", config.generate_random_geometry_ids),
                kind: BoundarySurfaceKind::AuxiliaryTrafficArea,
                function_code: "mark",
                geometry: output,
            });
        } else {
            markings.push(Marking {
                id: add_unique_identifier(&feature, "marking", config.generate_random_geometry_ids),
                geometry: output,
            });
        }
    }
    Ok((boundaries, markings))
}

fn lateral_fillers_for_section(section: &LaneSectionSpace, config: &Configuration) -> Result<Vec<(LaneId, BoundarySurface)>> {
    let mut out = Vec::new();
    for sign in [-1, 1] {
        let mut side: Vec<&GeometricLane> = section
            .lanes
            .iter()
            .filter(|l| l.identifier.lane_id.signum() == sign)
            .collect();
        side.sort_by_key(|l| l.identifier.lane_id.abs());
        for pair in side.windows(2) {
            let (inner_lane, outer_lane) = (pair[0], pair[1]);
            let feature = format!("{}:filler-lateral", lane_feature_name(inner_lane));
            if let Some(filler) = lateral_filler(
                &inner_lane.outer_boundary,
                &outer_lane.inner_boundary,
                config.distance_tolerance(),
                config.discretization_step_size,
            ) {
                let output = visit_named(&filler.surface, config, &feature)?;
                out.push((
                    inner_lane.identifier.lane_id,
                    BoundarySurface {
                        id: add_unique_identifier(&feature, "auxiliaryTrafficArea", config.generate_random_geometry_ids),
                        kind: BoundarySurfaceKind::AuxiliaryTrafficArea,
                        function_code: "filler",
                        geometry: output,
                    },
                ));
            }
        }
    }
    Ok(out)
}

/// Longitudinal fillers at lane-section boundaries within one road (§4.3
/// point 6): compares each lane's end-of-section boundary points to its
/// same-id counterpart at the start of the next section.
fn longitudinal_fillers_within_road(roadspace: &Roadspace, config: &Configuration) -> Result<HashMap<LaneId, Vec<BoundarySurface>>> {
    let mut out: HashMap<LaneId, Vec<BoundarySurface>> = HashMap::new();
    for window in roadspace.lane_sections.windows(2) {
        let (prev, next) = (&window[0], &window[1]);
        let prev_by_id: HashMap<LaneId, &GeometricLane> = prev.lanes.iter().map(|l| (l.identifier.lane_id, l)).collect();
        for next_lane in &next.lanes {
            let Some(prev_lane) = prev_by_id.get(&next_lane.identifier.lane_id) else {
                continue;
            };
            let prev_inner_end = prev_lane.inner_boundary.calculate_point(prev.length).map_err(|source| CityGmlError::Geometry {
                feature: lane_feature_name(prev_lane),
                source,
            })?;
            let prev_outer_end = prev_lane.outer_boundary.calculate_point(prev.length).map_err(|source| CityGmlError::Geometry {
                feature: lane_feature_name(prev_lane),
                source,
            })?;
            let next_inner_start = next_lane.inner_boundary.calculate_point(0.0).map_err(|source| CityGmlError::Geometry {
                feature: lane_feature_name(next_lane),
                source,
            })?;
            let next_outer_start = next_lane.outer_boundary.calculate_point(0.0).map_err(|source| CityGmlError::Geometry {
                feature: lane_feature_name(next_lane),
                source,
            })?;

            if let Some(filler) = longitudinal_within_road_filler(
                prev_inner_end,
                prev_outer_end,
                next_inner_start,
                next_outer_start,
                config.distance_tolerance(),
            ) {
                debug_assert_eq!(filler.kind, FillerKind::LongitudinalWithinRoad);
                let feature = format!("{}:filler-longitudinal", lane_feature_name(next_lane));
                let output = visit_named(&filler.surface, config, &feature)?;
                out.entry(next_lane.identifier.lane_id).or_default().push(BoundarySurface {
                    id: add_unique_identifier(&feature, "auxiliaryTrafficArea", config.generate_random_geometry_ids),
                    kind: BoundarySurfaceKind::AuxiliaryTrafficArea,
                    function_code: "filler",
                    geometry: output,
                });
            }
        }
    }
    Ok(out)
}

fn traffic_direction(lane_id: LaneId) -> TrafficDirection {
    if lane_id <= 0 {
        TrafficDirection::Forwards
    } else {
        TrafficDirection::Backwards
    }
}

fn build_road_objects(roadspace: &Roadspace, config: &Configuration) -> Result<Vec<RoadObjectFeature>> {
    roadspace
        .roadspace_objects
        .iter()
        .map(|object| {
            let feature = format!("{}:object:{}", roadspace.road_id, object.id);
            let output = visit_named(&object.geometry, config, &feature)?;
            let id = add_unique_identifier(&feature, "roadObject", config.generate_random_geometry_ids);
            Ok(
                match mapping::map_object(object.name.as_deref(), &object.object_type) {
                    ObjectTarget::CityFurniture => RoadObjectFeature::CityFurniture { id, geometry: output },
                    ObjectTarget::TransportationComplex => RoadObjectFeature::TransportationComplex { id, geometry: output },
                    ObjectTarget::Vegetation => RoadObjectFeature::Vegetation { id, geometry: output },
                    ObjectTarget::Building => RoadObjectFeature::Building { id, geometry: output },
                    ObjectTarget::Generic => RoadObjectFeature::Generic { id, geometry: output },
                },
            )
        })
        .collect()
}

/// Builds the CityGML features for one roadspace: one `Road` owning a
/// `TrafficSpace`/`AuxiliaryTrafficSpace` per built lane plus its markings
/// and filler surfaces, and one object feature per roadspace object.
pub fn build_road_feature(roadspace: &Roadspace, config: &Configuration) -> Result<RoadFeature> {
    let lateral_by_section: Vec<HashMap<LaneId, Vec<BoundarySurface>>> = roadspace
        .lane_sections
        .iter()
        .map(|section| {
            let mut map: HashMap<LaneId, Vec<BoundarySurface>> = HashMap::new();
            for (lane_id, boundary) in lateral_fillers_for_section(section, config)? {
                map.entry(lane_id).or_default().push(boundary);
            }
            Ok(map)
        })
        .collect::<Result<Vec<_>>>()?;
    let longitudinal = longitudinal_fillers_within_road(roadspace, config)?;

    let mut traffic_spaces = Vec::new();
    let mut auxiliary_traffic_spaces = Vec::new();
    let mut markings = Vec::new();

    for (section_index, section) in roadspace.lane_sections.iter().enumerate() {
        for lane in &section.lanes {
            let feature = lane_feature_name(lane);
            let surface_output = visit_named(&lane.surface, config, &feature)?;
            let kind = if mapping::is_drivable(lane.lane_type) {
                BoundarySurfaceKind::TrafficArea
            } else {
                BoundarySurfaceKind::AuxiliaryTrafficArea
            };
            let mut boundaries = vec![BoundarySurface {
                id: add_unique_identifier(&feature, "surface", config.generate_random_geometry_ids),
                kind,
                function_code: mapping::lane_type_function_code(lane.lane_type),
                geometry: surface_output,
            }];

            if let Some(extra) = lateral_by_section[section_index].get(&lane.identifier.lane_id) {
                boundaries.extend(extra.iter().cloned());
            }
            if let Some(extra) = longitudinal.get(&lane.identifier.lane_id) {
                boundaries.extend(extra.iter().cloned());
            }
            let (mark_boundaries, mut mark_features) = build_road_mark_boundaries(lane, config)?;
            boundaries.extend(mark_boundaries);
            markings.append(&mut mark_features);

            let lod0_curve = lod0_curve(lane, config)?;
            let id = add_unique_identifier(&feature, "trafficSpace", config.generate_random_geometry_ids);

            if kind == BoundarySurfaceKind::TrafficArea {
                traffic_spaces.push(TrafficSpace {
                    id,
                    traffic_direction: traffic_direction(lane.identifier.lane_id),
                    lod0_curve,
                    boundaries,
                });
            } else {
                auxiliary_traffic_spaces.push(AuxiliaryTrafficSpace { id, lod0_curve, boundaries });
            }
        }
    }

    Ok(RoadFeature {
        id: add_unique_identifier(&roadspace.road_id, "road", config.generate_random_geometry_ids),
        traffic_spaces,
        auxiliary_traffic_spaces,
        markings,
        road_objects: build_road_objects(roadspace, config)?,
    })
}

/// Builds the full `CityModel` from every roadspace (§4.4). One CityGML
/// `Road` per roadspace; splitting into `Section`/`Intersection` per
/// connected component is not yet implemented.
pub fn build_city_model(model: &RoadspacesModel, config: &Configuration) -> Result<CityModel> {
    let roads = model
        .roadspaces
        .iter()
        .map(|roadspace| build_road_feature(roadspace, config))
        .collect::<Result<Vec<_>>>()?;
    Ok(CityModel { roads })
}
