//! Pipeline-wide configuration (§6 "Configuration"): the options every
//! later layer (healer, RoadSpaces builder, geometry visitor, CityGML
//! builder) reads from rather than hard-coding.

use crate::evaluator::HealerConfig;
use crate::math::geometry::DiscretizationConfig;

/// Recognised options (§6). Threaded through the pipeline driver and split
/// into the narrower configs each layer actually needs, rather than passed
/// as a single god-object past the layer that consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub crs_epsg: i32,
    pub offset_x: f64,
    pub offset_y: f64,
    pub offset_z: f64,
    pub discretization_step_size: f64,
    pub sweep_discretization_step_size: f64,
    pub circle_slices: u32,
    pub distance_tolerance: f64,
    pub flatten_generic_attribute_sets: bool,
    pub generate_random_geometry_ids: bool,
    pub mapping_backwards_compatibility: bool,
    pub skip_road_shape_removal: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            crs_epsg: 32632,
            offset_x: 0.0,
            offset_y: 0.0,
            offset_z: 0.0,
            discretization_step_size: 1.0,
            sweep_discretization_step_size: 1.0,
            circle_slices: 16,
            distance_tolerance: 1e-9,
            flatten_generic_attribute_sets: false,
            generate_random_geometry_ids: false,
            mapping_backwards_compatibility: false,
            skip_road_shape_removal: false,
        }
    }
}

impl Configuration {
    /// Floor of `1e-9` regardless of what was configured (§9 "tolerances
    /// everywhere").
    pub fn distance_tolerance(&self) -> f64 {
        self.distance_tolerance.max(1e-9)
    }

    pub fn healer_config(&self) -> HealerConfig {
        HealerConfig {
            skip_road_shape_removal: self.skip_road_shape_removal,
        }
    }

    pub fn discretization_config(&self) -> DiscretizationConfig {
        DiscretizationConfig {
            discretization_step_size: self.discretization_step_size,
            sweep_discretization_step_size: self.sweep_discretization_step_size,
            circle_slices: self.circle_slices,
        }
    }
}
