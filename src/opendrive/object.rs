use uom::si::f64::{Angle, Length};

/// The OpenDRIVE `<object>` `type` attribute, restricted to the values the
/// CityGML mapping table (§6) actually distinguishes; anything else is
/// carried as `Other(name)`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ObjectType {
    Barrier,
    Bike,
    Building,
    Bus,
    ControllerBox,
    CrossWalk,
    Gantry,
    ParkingSpace,
    Patch,
    Pole,
    RailRoad,
    Signal,
    Streetlamp,
    Tree,
    Vegetation,
    Wind,
    None,
    Other(String),
}

/// A single vertex of a `<cornerLocal>` outline, relative to the object's
/// own pose.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OutlineCorner {
    pub u: Length,
    pub v: Length,
    pub z: Length,
    pub height: Length,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Outline {
    pub corners: Vec<OutlineCorner>,
}

/// A `<repeat>` element: the same object shape repeated along a range of
/// `s` at a fixed or linearly-interpolated lateral offset.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Repeat {
    pub s: Length,
    pub length: Length,
    pub distance: Length,
    pub t_start: Length,
    pub t_end: Length,
    pub width_start: Option<Length>,
    pub width_end: Option<Length>,
    pub height_start: Option<Length>,
    pub height_end: Option<Length>,
}

/// The object's shape, chosen by whichever fields are present, per §4.3
/// point 7 ("geometry is chosen by the object's shape fields").
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ObjectShape {
    /// `radius` + `height`: a cylinder.
    Cylinder { radius: Length, height: Length },
    /// `length` + `width` + `height`: an upright rectangular prism.
    Box {
        length: Length,
        width: Length,
        height: Length,
    },
    /// An explicit `<outline>` polygon, optionally extruded by `height`.
    Outline { outline: Outline, height: Length },
    /// No shape information at all: promoted to a point.
    Point,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RoadObject {
    pub id: String,
    pub name: Option<String>,
    pub object_type: ObjectType,
    pub s: Length,
    pub t: Length,
    pub z_offset: Length,
    pub valid_length: Length,
    pub orientation_angle: Angle,
    pub shape: ObjectShape,
    pub repeat: Option<Repeat>,
}
