//! Cross-entity/topology rules (§4.2 "modeling-rules" plan): fixes that
//! need more than one record's context to resolve.

use crate::evaluator::message::{Message, MessageList, Severity};
use crate::evaluator::rules::basic_data_type::retain_strictly_increasing;
use crate::evaluator::rules::Rule;
use crate::evaluator::HealerConfig;
use crate::opendrive::OpenDriveModel;

pub const MODELING_RULES: &[Rule] = &[
    Rule {
        code: "NonSortedList.laneSection",
        apply: heal_lane_section_order,
    },
    Rule {
        code: "UnexpectedValue.shape",
        apply: clear_shape_when_lane_offset_present,
    },
];

/// `laneSection`s are either merely out of order (sort, report
/// `NonSortedList`) or contain duplicate `s` values (drop, report
/// `NonStrictlySortedList`) — §4.2 distinguishes the two because sorting
/// alone cannot resolve a tie.
fn heal_lane_section_order(model: &mut OpenDriveModel, _config: &HealerConfig) -> MessageList {
    let mut messages = Vec::new();
    for road in &mut model.road {
        let original = std::mem::take(&mut road.lane_section);
        let already_sorted = original.windows(2).all(|w| w[0].s.value < w[1].s.value);
        if already_sorted {
            road.lane_section = original;
            continue;
        }

        let mut sorted = original.clone();
        sorted.sort_by(|a, b| a.s.value.partial_cmp(&b.s.value).unwrap());
        let has_duplicates = sorted.windows(2).any(|w| w[0].s.value == w[1].s.value);

        if has_duplicates {
            let (kept, dropped) = retain_strictly_increasing(original, |ls| ls.s.value);
            road.lane_section = kept;
            messages.push(Message::fixed(
                "NonStrictlySortedList",
                Severity::Warning,
                road.id.clone(),
                format!("dropped {dropped} duplicate-s laneSection entries"),
            ).with_location("field", "laneSection"));
        } else {
            road.lane_section = sorted;
            messages.push(Message::fixed(
                "NonSortedList",
                Severity::Warning,
                road.id.clone(),
                "sorted out-of-order laneSection entries by s",
            ).with_location("field", "laneSection"));
        }
    }
    messages
}

/// A non-zero `laneOffset` and a `lateralProfile.shape` are mutually
/// exclusive per the OpenDRIVE schema; clearing `shape` is skippable via
/// `skipRoadShapeRemoval` (§6 configuration, §9 open question 1).
fn clear_shape_when_lane_offset_present(model: &mut OpenDriveModel, config: &HealerConfig) -> MessageList {
    if config.skip_road_shape_removal {
        return Vec::new();
    }
    let mut messages = Vec::new();
    for road in &mut model.road {
        let has_nonzero_lane_offset = road
            .lane_offset
            .iter()
            .any(|lo| lo.a != 0.0 || lo.b != 0.0 || lo.c != 0.0 || lo.d != 0.0);
        if !has_nonzero_lane_offset {
            continue;
        }
        if let Some(lateral) = &mut road.lateral_profile {
            if !lateral.shape.is_empty() {
                lateral.shape.clear();
                messages.push(Message::fixed(
                    "UnexpectedValue",
                    Severity::Warning,
                    road.id.clone(),
                    "cleared lateralProfile.shape: mutually exclusive with a non-zero laneOffset",
                ).with_location("field", "lateralProfile.shape"));
            }
        }
    }
    messages
}
