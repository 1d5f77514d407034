//! Fixed mapping tables the CityGML builder consults (§4.4, §6): lane type
//! to traffic-area function code, and roadspace-object name/type to target
//! feature.

use crate::opendrive::lane::LaneType;
use crate::opendrive::object::ObjectType;

/// True for lane types a motor vehicle may legally drive on; everything
/// else becomes an `AuxiliaryTrafficSpace` rather than a `TrafficSpace`
/// (§4.4).
pub fn is_drivable(lane_type: LaneType) -> bool {
    matches!(
        lane_type,
        LaneType::Driving
            | LaneType::Entry
            | LaneType::Exit
            | LaneType::OffRamp
            | LaneType::OnRamp
            | LaneType::ConnectingRamp
            | LaneType::Bidirectional
    )
}

/// Fixed lane-type -> function code table for boundary thematic surfaces
/// (§4.4). Stable strings, not meant to double as user-facing text.
pub fn lane_type_function_code(lane_type: LaneType) -> &'static str {
    match lane_type {
        LaneType::Driving => "1",
        LaneType::Sidewalk => "2",
        LaneType::Shoulder => "3",
        LaneType::Biking => "4",
        LaneType::Parking => "5",
        LaneType::Border => "6",
        LaneType::Restricted => "7",
        LaneType::Stop => "8",
        LaneType::Median => "9",
        LaneType::Rail => "10",
        LaneType::Entry | LaneType::Exit | LaneType::OffRamp | LaneType::OnRamp | LaneType::ConnectingRamp => "11",
        LaneType::Bidirectional => "12",
        LaneType::Special => "13",
        LaneType::None => "0",
    }
}

/// Which CityGML feature family a roadspace object becomes, by name first
/// and then by type (§6 mapping table).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectTarget {
    CityFurniture,
    TransportationComplex,
    Vegetation,
    Building,
    Generic,
}

const FURNITURE_NAMES: &[&str] = &[
    "bench",
    "controllerBox",
    "fence",
    "railing",
    "raiseMedian",
    "trafficLight",
    "trafficSign",
    "unknown",
    "wall",
];

const TRANSPORTATION_NAMES: &[&str] = &["bus", "crossWalk", "noParkingArea"];

/// Name wins over type (§4.4, §6).
pub fn map_object(name: Option<&str>, object_type: &ObjectType) -> ObjectTarget {
    if let Some(name) = name {
        if FURNITURE_NAMES.contains(&name) {
            return ObjectTarget::CityFurniture;
        }
        if TRANSPORTATION_NAMES.contains(&name) {
            return ObjectTarget::TransportationComplex;
        }
    }
    match object_type {
        ObjectType::Barrier | ObjectType::Streetlamp | ObjectType::Signal | ObjectType::Pole => ObjectTarget::CityFurniture,
        ObjectType::Tree | ObjectType::Vegetation => ObjectTarget::Vegetation,
        ObjectType::Building => ObjectTarget::Building,
        _ => ObjectTarget::Generic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_wins_over_a_conflicting_type() {
        let target = map_object(Some("trafficSign"), &ObjectType::Tree);
        assert_eq!(target, ObjectTarget::CityFurniture);
    }

    #[test]
    fn type_is_used_when_name_is_unmapped() {
        let target = map_object(Some("some-custom-name"), &ObjectType::Building);
        assert_eq!(target, ObjectTarget::Building);
    }

    #[test]
    fn unmapped_name_and_type_falls_back_to_generic() {
        let target = map_object(None, &ObjectType::Other("gadget".to_string()));
        assert_eq!(target, ObjectTarget::Generic);
    }

    #[test]
    fn drivable_lane_types_include_ramps() {
        assert!(is_drivable(LaneType::OnRamp));
        assert!(!is_drivable(LaneType::Sidewalk));
    }
}
