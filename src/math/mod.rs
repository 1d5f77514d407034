//! The leaves-first math kernel (§4.1): ranges, univariate/bivariate
//! functions, vectors, 2D/3D curves, surfaces/solids, affine transforms, and
//! the geometry visitor. Nothing in this module depends on the OpenDRIVE
//! model or CityGML output schema.

pub mod affine;
pub mod curve2d;
pub mod curve3d;
pub mod error;
pub mod function;
pub mod geometry;
pub mod range;
pub mod vector;

pub use error::NumericError;
pub use range::Range;
