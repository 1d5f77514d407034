use uom::si::f64::Length;

/// A signed OpenDRIVE lane id: negative is right of the reference line,
/// zero is the center lane, positive is left.
pub type LaneId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LaneType {
    Driving,
    Sidewalk,
    Shoulder,
    Biking,
    Parking,
    Border,
    Restricted,
    Stop,
    Median,
    Rail,
    Entry,
    Exit,
    OffRamp,
    OnRamp,
    ConnectingRamp,
    Bidirectional,
    Special,
    None,
}

/// `a + b*ds + c*ds^2 + d*ds^3`, `ds` relative to the enclosing
/// `<laneSection>`'s `s`-coordinate plus `sOffset`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Width {
    pub s_offset: Length,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

/// A road-level `<laneOffset>` record shifting the center lane away from
/// the reference line.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LaneOffsetRecord {
    pub s: Length,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RoadMarkType {
    None,
    Solid,
    Broken,
    SolidSolid,
    SolidBroken,
    BrokenSolid,
    BrokenBroken,
    BottsDots,
    Grass,
    Curb,
    Custom,
    Edge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RoadMarkColor {
    Standard,
    Blue,
    Green,
    Red,
    White,
    Yellow,
    Orange,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RoadMark {
    pub s_offset: Length,
    pub mark_type: RoadMarkType,
    pub color: RoadMarkColor,
    pub width: Option<Length>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Lane {
    pub id: LaneId,
    pub lane_type: LaneType,
    pub level: bool,
    pub predecessor: Option<LaneId>,
    pub successor: Option<LaneId>,
    /// Empty only for the center lane, which instead carries a `border`
    /// (modelled here as a zero-width lane) per the OpenDRIVE schema.
    pub width: Vec<Width>,
    pub road_mark: Vec<RoadMark>,
}

impl Lane {
    pub fn is_driving(&self) -> bool {
        matches!(
            self.lane_type,
            LaneType::Driving
                | LaneType::Entry
                | LaneType::Exit
                | LaneType::OffRamp
                | LaneType::OnRamp
                | LaneType::ConnectingRamp
                | LaneType::Bidirectional
        )
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LaneSection {
    pub s: Length,
    pub single_side: bool,
    pub left: Vec<Lane>,
    pub center: Lane,
    pub right: Vec<Lane>,
}

impl LaneSection {
    /// All non-center lanes, left then right, matching the order the
    /// RoadSpaces builder integrates lane widths in (outward from center).
    pub fn all_lanes(&self) -> impl Iterator<Item = &Lane> {
        self.left.iter().chain(self.right.iter())
    }

    pub fn lane(&self, id: LaneId) -> Option<&Lane> {
        if id == 0 {
            Some(&self.center)
        } else {
            self.all_lanes().find(|l| l.id == id)
        }
    }
}
