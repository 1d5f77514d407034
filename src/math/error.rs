/// Errors raised while evaluating math-kernel primitives.
///
/// All coordinates and angles in this module are raw `f64` (meters, radians);
/// typed `uom` quantities are only used at the OpenDRIVE model boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NumericError {
    #[error("value {value} is out of domain [{min}, {max}]")]
    OutOfDomain { value: f64, min: f64, max: f64 },
    #[error("numeric integration failed to converge: {reason}")]
    IntegrationFailed { reason: String },
    #[error("degenerate geometry: {reason}")]
    Degenerate { reason: String },
}

pub type Result<T> = std::result::Result<T, NumericError>;
