//! Non-fatal evaluation (§4.2): returns a deep-cloned, repaired model plus
//! every repair applied, folding the basic-data-type plan before the
//! modeling-rules plan (§9 "no shared mutable model" — the source model is
//! never touched).

use crate::evaluator::message::MessageList;
use crate::evaluator::rules::{basic_data_type::BASIC_DATA_TYPE_RULES, modeling_rules::MODELING_RULES, run_plan};
use crate::evaluator::HealerConfig;
use crate::opendrive::OpenDriveModel;

pub fn evaluate_non_fatal_violations(model: &OpenDriveModel, config: &HealerConfig) -> (OpenDriveModel, MessageList) {
    let mut healed = model.clone();
    let mut messages = run_plan(&mut healed, BASIC_DATA_TYPE_RULES, config);
    messages.extend(run_plan(&mut healed, MODELING_RULES, config));
    (healed, messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opendrive::profile::{ElevationProfile, ElevationRecord};
    use crate::opendrive::road::{Link, Road, TrafficRule};
    use uom::si::f64::Length;
    use uom::si::length::meter;

    #[test]
    fn healing_is_idempotent_on_an_already_healed_model() {
        let mut model = OpenDriveModel::default();
        model.road.push(Road {
            id: "r1".to_string(),
            name: None,
            length: Length::new::<meter>(10.0),
            junction: None,
            rule: TrafficRule::RightHandTraffic,
            link: Link::default(),
            plan_view: Vec::new(),
            elevation_profile: Some(ElevationProfile {
                elevation: vec![
                    ElevationRecord { s: Length::new::<meter>(0.0), a: 0.0, b: 0.0, c: 0.0, d: 0.0 },
                    ElevationRecord { s: Length::new::<meter>(5.0), a: 0.0, b: 0.0, c: 0.0, d: 0.0 },
                    ElevationRecord { s: Length::new::<meter>(3.0), a: 0.0, b: 0.0, c: 0.0, d: 0.0 },
                    ElevationRecord { s: Length::new::<meter>(7.0), a: 0.0, b: 0.0, c: 0.0, d: 0.0 },
                ],
            }),
            lateral_profile: None,
            lane_offset: Vec::new(),
            lane_section: Vec::new(),
            object: Vec::new(),
            signal: Vec::new(),
        });

        let config = HealerConfig::default();
        let (healed_once, first_pass) = evaluate_non_fatal_violations(&model, &config);
        assert_eq!(first_pass.len(), 1);

        let (_, second_pass) = evaluate_non_fatal_violations(&healed_once, &config);
        assert!(second_pass.is_empty());
    }
}
