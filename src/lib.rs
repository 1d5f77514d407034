//! Converts ASAM OpenDRIVE road networks into CityGML transportation
//! features.
//!
//! Leaves-first module order: [`math`] (the numeric kernel), [`opendrive`]
//! (the input-shaped data model), [`evaluator`] (fatal/non-fatal
//! validation and healing), [`roadspaces`] (the intermediate geometric
//! model), [`citygml`] (the output feature graph), [`config`], and
//! [`pipeline`] (the per-file driver composing all of the above). XML
//! parsing, CityGML serialisation, and file I/O are external collaborators
//! consumed only through the traits in [`pipeline`].

pub mod citygml;
pub mod config;
pub mod evaluator;
pub mod math;
pub mod opendrive;
pub mod pipeline;
pub mod roadspaces;
