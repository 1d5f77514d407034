use chrono::{DateTime, Utc};
use uom::si::f64::Length;

/// The `<header>` element: metadata that precedes the road/junction list.
/// Mirrors the union of fields used across OpenDRIVE 1.1-1.7; per-version
/// binding happens in the external reader (§6), not here.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Header {
    pub rev_major: u16,
    pub rev_minor: u16,
    pub name: Option<String>,
    pub version: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds_option", default)]
    pub date: Option<DateTime<Utc>>,
    pub north: Option<Length>,
    pub south: Option<Length>,
    pub east: Option<Length>,
    pub west: Option<Length>,
    pub vendor: Option<String>,
    /// EPSG/proj georeference string, if the file carries one; the
    /// `crsEpsg` configuration option (§6) is authoritative at build time.
    pub geo_reference: Option<String>,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            rev_major: 1,
            rev_minor: 7,
            name: None,
            version: None,
            date: None,
            north: None,
            south: None,
            east: None,
            west: None,
            vendor: None,
            geo_reference: None,
        }
    }
}

impl Header {
    /// The dotted "major.minor" schema version this header declares, used
    /// by the reader-adapter registry (§6) to select a per-version adapter.
    pub fn schema_version(&self) -> (u16, u16) {
        (self.rev_major, self.rev_minor)
    }
}
