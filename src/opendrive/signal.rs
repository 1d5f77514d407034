use uom::si::f64::{Angle, Length};

/// A minimal `<signal>` record. Deep signal-phase/controller-dependency
/// modelling is out of scope (SPEC_FULL §3 supplement); a `Signal` is
/// consumed by the CityGML builder the same way a `RoadObject` is, through
/// the name/type mapping table of §6.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Signal {
    pub id: String,
    pub name: Option<String>,
    pub s: Length,
    pub t: Length,
    pub z_offset: Length,
    pub orientation_angle: Angle,
    pub country: Option<String>,
    pub signal_type: Option<String>,
    pub height: Option<Length>,
    pub width: Option<Length>,
}
