use crate::math::NumericError;

/// Errors the RoadSpaces builder (§4.3) returns directly; everything else
/// (gaps, overlaps, unmet endpoint tolerances) is reported as a non-fatal
/// `Message` alongside the built model instead.
#[derive(Debug, thiserror::Error)]
pub enum RoadspacesError {
    #[error("road {0} has no planView geometries")]
    EmptyPlanView(String),
    #[error("road {0} has no lane sections")]
    EmptyLaneSections(String),
    #[error("numeric failure building road {road}: {source}")]
    Geometry {
        road: String,
        #[source]
        source: NumericError,
    },
    #[error("road {road} references unresolved {kind} id {target}")]
    UnresolvedReference {
        road: String,
        kind: &'static str,
        target: String,
    },
}

pub type Result<T> = std::result::Result<T, RoadspacesError>;
