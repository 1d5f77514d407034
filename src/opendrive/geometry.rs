use uom::si::f64::{Angle, Curvature, Length};

/// The shape variant of a single planView element.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum GeometryShape {
    Line,
    Arc {
        curvature: Curvature,
    },
    Spiral {
        curv_start: Curvature,
        curv_end: Curvature,
    },
    Poly3 {
        a: f64,
        b: f64,
        c: f64,
        d: f64,
    },
    ParamPoly3 {
        a_u: f64,
        b_u: f64,
        c_u: f64,
        d_u: f64,
        a_v: f64,
        b_v: f64,
        c_v: f64,
        d_v: f64,
        p_range: ParamPoly3PRange,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ParamPoly3PRange {
    ArcLength,
    Normalized,
}

/// One `<geometry>` element of the `planView`: start pose in the map frame
/// plus a shape variant valid over `[s, s+length)`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeometryRecord {
    pub s: Length,
    pub x: Length,
    pub y: Length,
    pub hdg: Angle,
    pub length: Length,
    pub shape: GeometryShape,
}
