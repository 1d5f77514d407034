//! Topology: roadspace predecessor/successor linkage and the junction
//! connection graph (§4.3 "topology", §9 "linkage graph"). Roads and
//! junctions are addressed by id rather than back-pointer; lookups always
//! go through the owning model (§3 "cross-references are by value").

use std::collections::HashMap;

use crate::opendrive::junction::{ContactPoint, ElementType, Junction};
use crate::opendrive::lane::LaneId;
use crate::opendrive::road::{Link, Road};
use crate::roadspaces::error::{Result, RoadspacesError};

/// A road's predecessor/successor, resolved to either a plain road or a
/// junction id; the RoadSpaces model does not itself hold junction member
/// identity, so the distinction survives into `RoadspaceLinkage` unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Road { id: String, contact_point: ContactPoint },
    Junction { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoadspaceLinkage {
    pub predecessor: Option<LinkTarget>,
    pub successor: Option<LinkTarget>,
    pub junction: Option<String>,
}

fn resolve_target(link: &Option<crate::opendrive::road::PredecessorSuccessor>) -> Option<LinkTarget> {
    let target = link.as_ref()?;
    Some(match target.element_type {
        ElementType::Road => LinkTarget::Road {
            id: target.element_id.clone(),
            contact_point: target.contact_point.unwrap_or(ContactPoint::Start),
        },
        ElementType::Junction => LinkTarget::Junction {
            id: target.element_id.clone(),
        },
    })
}

pub fn build_linkage(road: &Road) -> RoadspaceLinkage {
    let Link { predecessor, successor } = &road.link;
    RoadspaceLinkage {
        predecessor: resolve_target(predecessor),
        successor: resolve_target(successor),
        junction: road.junction.clone(),
    }
}

/// The junction/connection graph for an entire model: a flat map from
/// `(incomingRoadId, laneId)` to every `(connectingRoadId, laneId, contact)`
/// it connects to, built once and then queried directly (§9 "linkage
/// graph").
#[derive(Debug, Clone, Default)]
pub struct LinkageGraph {
    connections: HashMap<(String, LaneId), Vec<(String, LaneId, ContactPoint)>>,
}

impl LinkageGraph {
    pub fn build(junctions: &[Junction]) -> Self {
        let mut connections: HashMap<(String, LaneId), Vec<(String, LaneId, ContactPoint)>> = HashMap::new();
        for junction in junctions {
            for connection in &junction.connection {
                for link in &connection.lane_link {
                    connections
                        .entry((connection.incoming_road.clone(), link.from))
                        .or_default()
                        .push((connection.connecting_road.clone(), link.to, connection.contact_point));
                }
            }
        }
        Self { connections }
    }

    /// Follows a direct road-to-road link, or (if the successor is a
    /// junction) every connection the junction exposes for this incoming
    /// lane (§4.3 "topology").
    pub fn successor_lane_identifiers(
        &self,
        linkage: &RoadspaceLinkage,
        incoming_road_id: &str,
        lane_id: LaneId,
    ) -> Result<Vec<(String, LaneId)>> {
        match &linkage.successor {
            Some(LinkTarget::Road { id, .. }) => Ok(vec![(id.clone(), lane_id)]),
            Some(LinkTarget::Junction { id }) => {
                let targets = self.connections.get(&(incoming_road_id.to_string(), lane_id));
                match targets {
                    Some(targets) if !targets.is_empty() => {
                        Ok(targets.iter().map(|(road, lane, _)| (road.clone(), *lane)).collect())
                    }
                    _ => Err(RoadspacesError::UnresolvedReference {
                        road: incoming_road_id.to_string(),
                        kind: "junction",
                        target: id.clone(),
                    }),
                }
            }
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opendrive::junction::{Connection, LaneLink};

    #[test]
    fn direct_road_successor_resolves_to_the_same_lane_id() {
        let linkage = RoadspaceLinkage {
            predecessor: None,
            successor: Some(LinkTarget::Road {
                id: "B".to_string(),
                contact_point: ContactPoint::Start,
            }),
            junction: None,
        };
        let graph = LinkageGraph::build(&[]);
        let targets = graph.successor_lane_identifiers(&linkage, "A", -1).unwrap();
        assert_eq!(targets, vec![("B".to_string(), -1)]);
    }

    #[test]
    fn junction_successor_with_no_matching_connection_is_unresolved() {
        let linkage = RoadspaceLinkage {
            predecessor: None,
            successor: Some(LinkTarget::Junction { id: "J".to_string() }),
            junction: None,
        };
        let junction = Junction {
            id: "J".to_string(),
            name: None,
            connection: vec![Connection {
                id: "c1".to_string(),
                incoming_road: "A".to_string(),
                connecting_road: "C".to_string(),
                contact_point: ContactPoint::Start,
                lane_link: vec![LaneLink { from: -1, to: -1 }],
            }],
        };
        let graph = LinkageGraph::build(std::slice::from_ref(&junction));
        assert!(graph.successor_lane_identifiers(&linkage, "A", -2).is_err());
        let ok = graph.successor_lane_identifiers(&linkage, "A", -1).unwrap();
        assert_eq!(ok, vec![("C".to_string(), -1)]);
    }
}
