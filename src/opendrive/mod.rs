//! The OpenDRIVE data model (§3/E): a plain mirror of the union of
//! supported schema versions, with no XML-binding concerns. Parsing and
//! schema validation are external collaborators (§6); this module only
//! defines the normalised in-memory shape every per-version adapter
//! produces.

pub mod geometry;
pub mod header;
pub mod junction;
pub mod lane;
pub mod object;
pub mod profile;
pub mod road;
pub mod signal;

use header::Header;
use junction::Junction;
use road::Road;

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct OpenDriveModel {
    pub header: Option<Header>,
    pub road: Vec<Road>,
    pub junction: Vec<Junction>,
}

impl OpenDriveModel {
    pub fn road(&self, id: &str) -> Option<&Road> {
        self.road.iter().find(|r| r.id == id)
    }

    pub fn junction(&self, id: &str) -> Option<&Junction> {
        self.junction.iter().find(|j| j.id == id)
    }
}
