//! The OpenDRIVE evaluator/healer (§4.2): two pure passes over the
//! OpenDRIVE model. `fatal` never mutates; `healer` returns a repaired
//! copy alongside every diagnostic.

pub mod fatal;
pub mod healer;
pub mod message;
pub mod rules;

pub use fatal::evaluate_fatal_violations;
pub use healer::evaluate_non_fatal_violations;
pub use message::{Message, MessageList, Severity};

/// The subset of the pipeline's configuration (§6) the healer consults.
/// Kept as its own small struct rather than taking the full pipeline
/// configuration so the evaluator has no dependency on later layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealerConfig {
    pub skip_road_shape_removal: bool,
}

impl Default for HealerConfig {
    fn default() -> Self {
        Self {
            skip_road_shape_removal: false,
        }
    }
}
