use uom::si::f64::Length;

use crate::opendrive::geometry::GeometryRecord;
use crate::opendrive::junction::{ContactPoint, ElementType};
use crate::opendrive::lane::{LaneOffsetRecord, LaneSection};
use crate::opendrive::object::RoadObject;
use crate::opendrive::profile::{ElevationProfile, LateralProfile};
use crate::opendrive::signal::Signal;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PredecessorSuccessor {
    pub element_id: String,
    pub element_type: ElementType,
    pub contact_point: Option<ContactPoint>,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Link {
    pub predecessor: Option<PredecessorSuccessor>,
    pub successor: Option<PredecessorSuccessor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TrafficRule {
    RightHandTraffic,
    LeftHandTraffic,
}

/// A single ASAM OpenDRIVE `<road>`. Field shapes mirror the union of
/// supported schema versions (1.1-1.7); the per-version XML binding that
/// produces this normalised form is an external collaborator (§6).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Road {
    pub id: String,
    pub name: Option<String>,
    pub length: Length,
    pub junction: Option<String>,
    pub rule: TrafficRule,
    pub link: Link,
    /// Expected non-empty (§3 invariant), but represented as a plain `Vec`
    /// so the fatal-violation pass (§4.2) can actually observe and report
    /// a road with no plan-view geometry instead of the state being
    /// unconstructible.
    pub plan_view: Vec<GeometryRecord>,
    pub elevation_profile: Option<ElevationProfile>,
    pub lateral_profile: Option<LateralProfile>,
    pub lane_offset: Vec<LaneOffsetRecord>,
    pub lane_section: Vec<LaneSection>,
    pub object: Vec<RoadObject>,
    pub signal: Vec<Signal>,
}

impl Road {
    pub fn lane_sections_sorted(&self) -> Vec<&LaneSection> {
        let mut sections: Vec<&LaneSection> = self.lane_section.iter().collect();
        sections.sort_by(|a, b| a.s.partial_cmp(&b.s).unwrap());
        sections
    }
}
