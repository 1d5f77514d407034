//! The CityGML feature graph (§3 "CityGML feature graph"): a plain data
//! model shaped the way CityGML 2/3 transportation features nest, with no
//! serialisation concern. Writing it out to GML bytes is an external
//! collaborator (§6).

use crate::math::geometry::{GeometryOutput, LineString3D};

/// §4.4: right/center lanes face the direction of travel under right-hand
/// traffic; left lanes face the other way. Left-hand traffic is future
/// work (§9 open question 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficDirection {
    Forwards,
    Backwards,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundarySurfaceKind {
    TrafficArea,
    AuxiliaryTrafficArea,
}

/// One boundary thematic surface owned by a traffic space: a lane surface,
/// a filler surface, or a road mark.
#[derive(Debug, Clone)]
pub struct BoundarySurface {
    pub id: String,
    pub kind: BoundarySurfaceKind,
    pub function_code: &'static str,
    pub geometry: GeometryOutput,
}

#[derive(Debug, Clone)]
pub struct TrafficSpace {
    pub id: String,
    pub traffic_direction: TrafficDirection,
    pub lod0_curve: Option<LineString3D>,
    pub boundaries: Vec<BoundarySurface>,
}

#[derive(Debug, Clone)]
pub struct AuxiliaryTrafficSpace {
    pub id: String,
    pub lod0_curve: Option<LineString3D>,
    pub boundaries: Vec<BoundarySurface>,
}

#[derive(Debug, Clone)]
pub struct Marking {
    pub id: String,
    pub geometry: GeometryOutput,
}

/// A roadspace object promoted to its own CityGML feature (§4.4); the
/// target family was already decided by `mapping::map_object`.
#[derive(Debug, Clone)]
pub enum RoadObjectFeature {
    CityFurniture { id: String, geometry: GeometryOutput },
    TransportationComplex { id: String, geometry: GeometryOutput },
    Vegetation { id: String, geometry: GeometryOutput },
    Building { id: String, geometry: GeometryOutput },
    Generic { id: String, geometry: GeometryOutput },
}

/// One CityGML `Road` (optionally representing a `Section`/`Intersection`
/// split the builder does not yet perform; see `builder::build_city_model`)
/// with the traffic spaces, markings, and furniture built from one
/// roadspace.
#[derive(Debug, Clone, Default)]
pub struct RoadFeature {
    pub id: String,
    pub traffic_spaces: Vec<TrafficSpace>,
    pub auxiliary_traffic_spaces: Vec<AuxiliaryTrafficSpace>,
    pub markings: Vec<Marking>,
    pub road_objects: Vec<RoadObjectFeature>,
}

#[derive(Debug, Clone, Default)]
pub struct CityModel {
    pub roads: Vec<RoadFeature>,
}
