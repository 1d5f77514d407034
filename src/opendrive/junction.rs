use crate::opendrive::lane::LaneId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ContactPoint {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ElementType {
    Road,
    Junction,
}

/// A from->to lane mapping within a `<connection>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LaneLink {
    pub from: LaneId,
    pub to: LaneId,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Connection {
    pub id: String,
    pub incoming_road: String,
    pub connecting_road: String,
    pub contact_point: ContactPoint,
    pub lane_link: Vec<LaneLink>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Junction {
    pub id: String,
    pub name: Option<String>,
    pub connection: Vec<Connection>,
}
