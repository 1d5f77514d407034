//! Per-entity local rules (§4.2 "basic-data-type" plan): fixes that only
//! need to look at one record or one sequence at a time.

use crate::evaluator::message::{Message, MessageList, Severity};
use crate::evaluator::rules::Rule;
use crate::evaluator::HealerConfig;
use crate::opendrive::OpenDriveModel;

pub const BASIC_DATA_TYPE_RULES: &[Rule] = &[
    Rule {
        code: "NoElevationProfileElements",
        apply: clear_empty_elevation_profile,
    },
    Rule {
        code: "OutOfBounds.laneOffset",
        apply: drop_out_of_bounds_lane_offset,
    },
    Rule {
        code: "OutOfBounds.laneSection",
        apply: drop_out_of_bounds_lane_section,
    },
    Rule {
        code: "NonStrictlySortedList.elevation",
        apply: drop_non_strictly_sorted_elevation,
    },
    Rule {
        code: "NonStrictlySortedList.superelevation",
        apply: drop_non_strictly_sorted_superelevation,
    },
    Rule {
        code: "NonStrictlySortedList.shape",
        apply: drop_non_strictly_sorted_shape,
    },
    Rule {
        code: "NonStrictlySortedList.laneOffset",
        apply: drop_non_strictly_sorted_lane_offset,
    },
    Rule {
        code: "EmptyValueForOptionalAttribute",
        apply: blank_optional_attributes_to_absent,
    },
];

/// Keeps the longest running prefix that is strictly increasing in `key`,
/// scanning `items` in their original order and dropping any entry that
/// does not exceed the last kept one. This is the one shared shape behind
/// every `NonStrictlySortedList` rule: "keep the earliest survivor by
/// stable order" (§4.2).
pub(crate) fn retain_strictly_increasing<T>(items: Vec<T>, key: impl Fn(&T) -> f64) -> (Vec<T>, usize) {
    let mut kept = Vec::with_capacity(items.len());
    let mut last: Option<f64> = None;
    let mut dropped = 0;
    for item in items {
        let k = key(&item);
        if last.map_or(true, |prev| k > prev) {
            last = Some(k);
            kept.push(item);
        } else {
            dropped += 1;
        }
    }
    (kept, dropped)
}

/// Drops every item whose `key` falls outside `[0, length]`, keeping the
/// rest in their original order (§3 invariant: "lane-offset and
/// lane-section `s` values lie in `[0, road.length]`").
fn drop_out_of_range<T>(items: Vec<T>, length: f64, key: impl Fn(&T) -> f64) -> (Vec<T>, usize) {
    let mut kept = Vec::with_capacity(items.len());
    let mut dropped = 0;
    for item in items {
        if (0.0..=length).contains(&key(&item)) {
            kept.push(item);
        } else {
            dropped += 1;
        }
    }
    (kept, dropped)
}

fn out_of_bounds_message(source_id: impl Into<String>, field: &str, dropped: usize) -> Message {
    Message::fixed(
        "OutOfBounds",
        Severity::Warning,
        source_id,
        format!(
            "dropped {dropped} {field} entr{} with s outside [0, road.length]",
            if dropped == 1 { "y" } else { "ies" }
        ),
    )
    .with_location("field", field)
}

fn drop_out_of_bounds_lane_offset(model: &mut OpenDriveModel, _config: &HealerConfig) -> MessageList {
    let mut messages = Vec::new();
    for road in &mut model.road {
        let length = road.length.value;
        let (kept, dropped) = drop_out_of_range(std::mem::take(&mut road.lane_offset), length, |r| r.s.value);
        road.lane_offset = kept;
        if dropped > 0 {
            messages.push(out_of_bounds_message(road.id.clone(), "laneOffset", dropped));
        }
    }
    messages
}

fn drop_out_of_bounds_lane_section(model: &mut OpenDriveModel, _config: &HealerConfig) -> MessageList {
    let mut messages = Vec::new();
    for road in &mut model.road {
        let length = road.length.value;
        let (kept, dropped) = drop_out_of_range(std::mem::take(&mut road.lane_section), length, |ls| ls.s.value);
        road.lane_section = kept;
        if dropped > 0 {
            messages.push(out_of_bounds_message(road.id.clone(), "laneSection", dropped));
        }
    }
    messages
}

fn non_strictly_sorted_message(source_id: impl Into<String>, field: &str, dropped: usize) -> Message {
    Message::fixed(
        "NonStrictlySortedList",
        Severity::Warning,
        source_id,
        format!("dropped {dropped} non-strictly-sorted {field} entr{}", if dropped == 1 { "y" } else { "ies" }),
    )
    .with_location("field", field)
}

fn clear_empty_elevation_profile(model: &mut OpenDriveModel, _config: &HealerConfig) -> MessageList {
    let mut messages = Vec::new();
    for road in &mut model.road {
        let is_empty = road
            .elevation_profile
            .as_ref()
            .map_or(false, |ep| ep.elevation.is_empty());
        if is_empty {
            road.elevation_profile = None;
            messages.push(Message::fixed(
                "NoElevationProfileElements",
                Severity::Warning,
                road.id.clone(),
                "cleared an elevationProfile with no elevation records",
            ));
        }
    }
    messages
}

fn drop_non_strictly_sorted_elevation(model: &mut OpenDriveModel, _config: &HealerConfig) -> MessageList {
    let mut messages = Vec::new();
    for road in &mut model.road {
        if let Some(profile) = &mut road.elevation_profile {
            let (kept, dropped) = retain_strictly_increasing(std::mem::take(&mut profile.elevation), |r| r.s.value);
            profile.elevation = kept;
            if dropped > 0 {
                messages.push(non_strictly_sorted_message(road.id.clone(), "elevation", dropped));
            }
        }
    }
    messages
}

fn drop_non_strictly_sorted_superelevation(model: &mut OpenDriveModel, _config: &HealerConfig) -> MessageList {
    let mut messages = Vec::new();
    for road in &mut model.road {
        if let Some(lateral) = &mut road.lateral_profile {
            let (kept, dropped) =
                retain_strictly_increasing(std::mem::take(&mut lateral.superelevation), |r| r.s.value);
            lateral.superelevation = kept;
            if dropped > 0 {
                messages.push(non_strictly_sorted_message(road.id.clone(), "superelevation", dropped));
            }
        }
    }
    messages
}

fn drop_non_strictly_sorted_lane_offset(model: &mut OpenDriveModel, _config: &HealerConfig) -> MessageList {
    let mut messages = Vec::new();
    for road in &mut model.road {
        let (kept, dropped) = retain_strictly_increasing(std::mem::take(&mut road.lane_offset), |r| r.s.value);
        road.lane_offset = kept;
        if dropped > 0 {
            messages.push(non_strictly_sorted_message(road.id.clone(), "laneOffset", dropped));
        }
    }
    messages
}

/// `shape` records must be strictly increasing in `s` across groups and
/// strictly increasing in `t` within a group sharing one `s` (§4.2).
fn drop_non_strictly_sorted_shape(model: &mut OpenDriveModel, _config: &HealerConfig) -> MessageList {
    let mut messages = Vec::new();
    for road in &mut model.road {
        let Some(lateral) = &mut road.lateral_profile else {
            continue;
        };
        let original = std::mem::take(&mut lateral.shape);
        let mut kept = Vec::with_capacity(original.len());
        let mut last_s: Option<f64> = None;
        let mut last_t_in_group: Option<f64> = None;
        let mut dropped = 0;
        for record in original {
            let s = record.s.value;
            let t = record.t.value;
            let accept = match last_s {
                None => true,
                Some(prev_s) if s > prev_s => true,
                Some(prev_s) if s == prev_s => last_t_in_group.map_or(true, |prev_t| t > prev_t),
                _ => false,
            };
            if accept {
                if last_s != Some(s) {
                    last_t_in_group = None;
                }
                last_s = Some(s);
                last_t_in_group = Some(t);
                kept.push(record);
            } else {
                dropped += 1;
            }
        }
        lateral.shape = kept;
        if dropped > 0 {
            messages.push(non_strictly_sorted_message(road.id.clone(), "shape", dropped));
        }
    }
    messages
}

fn blank_optional_attributes_to_absent(model: &mut OpenDriveModel, _config: &HealerConfig) -> MessageList {
    let mut messages = Vec::new();
    if let Some(header) = &mut model.header {
        for (field, value) in [("name", &mut header.name), ("vendor", &mut header.vendor)] {
            if value.as_deref().map_or(false, |s| s.trim().is_empty()) {
                *value = None;
                messages.push(
                    Message::fixed(
                        "EmptyValueForOptionalAttribute",
                        Severity::Info,
                        "header",
                        format!("blanked optional attribute {field}"),
                    )
                    .with_location("field", field),
                );
            }
        }
        for (field, value) in [
            ("north", &mut header.north),
            ("south", &mut header.south),
            ("east", &mut header.east),
            ("west", &mut header.west),
        ] {
            if value.map_or(false, |l| !l.value.is_finite()) {
                *value = None;
                messages.push(
                    Message::fixed(
                        "EmptyValueForOptionalAttribute",
                        Severity::Info,
                        "header",
                        format!("cleared non-finite optional attribute {field}"),
                    )
                    .with_location("field", field),
                );
            }
        }
    }
    for road in &mut model.road {
        if road.name.as_deref().map_or(false, |s| s.trim().is_empty()) {
            road.name = None;
            messages.push(Message::fixed(
                "EmptyValueForOptionalAttribute",
                Severity::Info,
                road.id.clone(),
                "blanked optional attribute name",
            ));
        }
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opendrive::profile::{ElevationProfile, ElevationRecord};
    use crate::opendrive::road::{Link, Road, TrafficRule};
    use uom::si::f64::Length;
    use uom::si::length::meter;

    fn road_with_elevations(values: &[f64]) -> Road {
        Road {
            id: "r1".to_string(),
            name: None,
            length: Length::new::<meter>(10.0),
            junction: None,
            rule: TrafficRule::RightHandTraffic,
            link: Link::default(),
            plan_view: Vec::new(),
            elevation_profile: Some(ElevationProfile {
                elevation: values
                    .iter()
                    .map(|&s| ElevationRecord {
                        s: Length::new::<meter>(s),
                        a: 0.0,
                        b: 0.0,
                        c: 0.0,
                        d: 0.0,
                    })
                    .collect(),
            }),
            lateral_profile: None,
            lane_offset: Vec::new(),
            lane_section: Vec::new(),
            object: Vec::new(),
            signal: Vec::new(),
        }
    }

    #[test]
    fn non_strictly_sorted_elevation_heals_to_0_5_7() {
        let mut model = OpenDriveModel::default();
        model.road.push(road_with_elevations(&[0.0, 5.0, 3.0, 7.0]));
        let config = HealerConfig::default();
        let messages = drop_non_strictly_sorted_elevation(&mut model, &config);

        let healed: Vec<f64> = model.road[0]
            .elevation_profile
            .as_ref()
            .unwrap()
            .elevation
            .iter()
            .map(|r| r.s.value)
            .collect();
        assert_eq!(healed, vec![0.0, 5.0, 7.0]);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].code, "NonStrictlySortedList");
        assert!(messages[0].was_fixed);
    }

    #[test]
    fn empty_elevation_profile_is_cleared() {
        let mut model = OpenDriveModel::default();
        model.road.push(road_with_elevations(&[]));
        let config = HealerConfig::default();
        let messages = clear_empty_elevation_profile(&mut model, &config);
        assert!(model.road[0].elevation_profile.is_none());
        assert_eq!(messages[0].code, "NoElevationProfileElements");
    }

    fn road_with_lane_offsets(values: &[f64]) -> Road {
        use crate::opendrive::lane::LaneOffsetRecord;
        Road {
            lane_offset: values
                .iter()
                .map(|&s| LaneOffsetRecord {
                    s: Length::new::<meter>(s),
                    a: 0.0,
                    b: 0.0,
                    c: 0.0,
                    d: 0.0,
                })
                .collect(),
            ..road_with_elevations(&[])
        }
    }

    fn center_lane() -> crate::opendrive::lane::Lane {
        use crate::opendrive::lane::{Lane, LaneType};
        Lane {
            id: 0,
            lane_type: LaneType::None,
            level: false,
            predecessor: None,
            successor: None,
            width: Vec::new(),
            road_mark: Vec::new(),
        }
    }

    fn road_with_lane_sections(values: &[f64]) -> Road {
        use crate::opendrive::lane::LaneSection;
        Road {
            lane_section: values
                .iter()
                .map(|&s| LaneSection {
                    s: Length::new::<meter>(s),
                    single_side: false,
                    left: Vec::new(),
                    center: center_lane(),
                    right: Vec::new(),
                })
                .collect(),
            ..road_with_elevations(&[])
        }
    }

    #[test]
    fn lane_offset_outside_road_length_is_dropped() {
        let mut model = OpenDriveModel::default();
        model.road.push(road_with_lane_offsets(&[-1.0, 0.0, 5.0, 10.0, 10.5]));
        let config = HealerConfig::default();
        let messages = drop_out_of_bounds_lane_offset(&mut model, &config);

        let kept: Vec<f64> = model.road[0].lane_offset.iter().map(|r| r.s.value).collect();
        assert_eq!(kept, vec![0.0, 5.0, 10.0]);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].code, "OutOfBounds");
        assert!(messages[0].was_fixed);
    }

    #[test]
    fn lane_section_outside_road_length_is_dropped() {
        let mut model = OpenDriveModel::default();
        model.road.push(road_with_lane_sections(&[0.0, 4.0, 11.0]));
        let config = HealerConfig::default();
        let messages = drop_out_of_bounds_lane_section(&mut model, &config);

        let kept: Vec<f64> = model.road[0].lane_section.iter().map(|ls| ls.s.value).collect();
        assert_eq!(kept, vec![0.0, 4.0]);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].code, "OutOfBounds");
    }

    #[test]
    fn lane_offset_within_bounds_is_left_untouched() {
        let mut model = OpenDriveModel::default();
        model.road.push(road_with_lane_offsets(&[0.0, 5.0, 10.0]));
        let config = HealerConfig::default();
        let messages = drop_out_of_bounds_lane_offset(&mut model, &config);
        assert!(messages.is_empty());
        assert_eq!(model.road[0].lane_offset.len(), 3);
    }
}
