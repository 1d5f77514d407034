use uom::si::f64::Length;

/// One `<elevation>` record: a cubic polynomial in `ds = s - self.s`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElevationRecord {
    pub s: Length,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct ElevationProfile {
    pub elevation: Vec<ElevationRecord>,
}

/// One `<superelevation>` record, same shape as elevation but describing the
/// cross-section roll angle (radians) instead of height.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SuperelevationRecord {
    pub s: Length,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

/// One `<shape>` record: a cubic in the lateral `t` direction, valid at a
/// given `s`-group (OpenDRIVE allows several `t` records sharing one `s`).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeRecord {
    pub s: Length,
    pub t: Length,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct LateralProfile {
    pub superelevation: Vec<SuperelevationRecord>,
    pub shape: Vec<ShapeRecord>,
}
