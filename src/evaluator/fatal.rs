//! Fatal-violation detection (§4.2): emits diagnostics for unrecoverable
//! states and never mutates the model.

use crate::evaluator::message::{Message, MessageList};
use crate::opendrive::OpenDriveModel;

/// OpenDRIVE schema versions this core ships a reader adapter and schema
/// resource for (§6). Anything outside this set is fatal.
const SUPPORTED_SCHEMA_VERSIONS: &[(u16, u16)] = &[
    (1, 1),
    (1, 2),
    (1, 3),
    (1, 4),
    (1, 5),
    (1, 6),
    (1, 7),
];

/// A lane id of zero denotes the non-drivable center lane; a `laneLink`
/// naming it as a `from`/`to` endpoint is the sentinel-value violation §4.2
/// calls out.
const SENTINEL_LANE_ID: i32 = 0;

pub fn evaluate_fatal_violations(model: &OpenDriveModel) -> MessageList {
    let mut messages = Vec::new();

    if let Some(header) = &model.header {
        let version = header.schema_version();
        if !SUPPORTED_SCHEMA_VERSIONS.contains(&version) {
            messages.push(Message::fatal(
                "NoDedicatedSchemaAvailable",
                "header",
                format!("no bundled schema for OpenDRIVE version {}.{}", version.0, version.1),
            ));
        }
    }

    for road in &model.road {
        if road.id.trim().is_empty() {
            messages.push(Message::fatal("BlankRequiredId", "road", "road id is blank"));
            continue;
        }
        if !road.length.value.is_finite() || road.length.value < 0.0 {
            messages.push(Message::fatal(
                "NonFiniteRequiredNumeric",
                road.id.clone(),
                format!("road length {} is not a finite non-negative value", road.length.value),
            ));
        }
        if road.plan_view.is_empty() {
            messages.push(Message::fatal(
                "NoPlanViewGeometries",
                road.id.clone(),
                "road has no planView geometry segments",
            ));
        }
        if road.lane_section.is_empty() {
            messages.push(Message::fatal(
                "NoLaneSections",
                road.id.clone(),
                "road has no lane sections",
            ));
        }
    }

    for junction in &model.junction {
        for connection in &junction.connection {
            for link in &connection.lane_link {
                if link.from == SENTINEL_LANE_ID || link.to == SENTINEL_LANE_ID {
                    messages.push(
                        Message::fatal(
                            "SentinelLaneLinkValue",
                            connection.id.clone(),
                            format!("laneLink {} -> {} references the center lane", link.from, link.to),
                        )
                        .with_location("junction", junction.id.clone()),
                    );
                }
            }
        }
    }

    messages
}
