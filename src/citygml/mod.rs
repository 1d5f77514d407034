//! The CityGML builder (§4.4/C): walks a `RoadspacesModel`, runs the
//! geometry visitor on each primitive, and emits the CityGML feature
//! graph. GML serialisation is an external collaborator (§6).

pub mod builder;
pub mod error;
pub mod identifier;
pub mod mapping;
pub mod model;

pub use builder::build_city_model;
pub use error::{CityGmlError, Result};
pub use model::CityModel;
