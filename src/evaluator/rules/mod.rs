//! The repair catalogue (§4.2/§9 "validators as data"): each plan is a
//! fixed list of rules, where a rule is a plain function pointer plus its
//! stable diagnostic code, not a trait-object hierarchy.

pub mod basic_data_type;
pub mod modeling_rules;

use crate::evaluator::message::MessageList;
use crate::evaluator::HealerConfig;
use crate::opendrive::OpenDriveModel;

/// One repair step: `apply` mutates `model` in place and returns the
/// messages describing what it changed.
pub struct Rule {
    pub code: &'static str,
    pub apply: fn(&mut OpenDriveModel, &HealerConfig) -> MessageList,
}

/// Runs `plan` once over `model`, folding every rule's messages together in
/// declaration order.
pub fn run_plan(model: &mut OpenDriveModel, plan: &[Rule], config: &HealerConfig) -> MessageList {
    let mut messages = Vec::new();
    for rule in plan {
        messages.extend((rule.apply)(model, config));
    }
    messages
}
