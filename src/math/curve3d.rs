use crate::math::affine::AffineSequence2D;
use crate::math::curve2d::{discretize_domain, Curve2D};
use crate::math::error::Result;
use crate::math::function::{StackedFunction, UnivariateFunction};
use crate::math::range::Range;
use crate::math::vector::{Pose3D, Rotation3D, Vector3D};

/// A 2D curve in the XY plane, lifted to 3D with a height and a torsion
/// (roll) function whose domains must fuzzy-enclose the 2D curve's domain.
#[derive(Debug, Clone)]
pub struct Curve3D {
    pub xy: Curve2D,
    pub xy_placement: AffineSequence2D,
    pub height: StackedFunction,
    pub torsion: StackedFunction,
    pub tolerance: f64,
}

impl Curve3D {
    pub fn new(
        xy: Curve2D,
        xy_placement: AffineSequence2D,
        height: StackedFunction,
        torsion: StackedFunction,
        tolerance: f64,
    ) -> Self {
        Self {
            xy,
            xy_placement,
            height,
            torsion,
            tolerance,
        }
    }

    pub fn domain(&self) -> Range<f64> {
        self.xy.domain()
    }

    pub fn calculate_point(&self, s: f64) -> Result<Vector3D> {
        let xy = self.xy.calculate_point_global(s, &self.xy_placement)?;
        let z = self.height.value_in_fuzzy(s, self.tolerance)?;
        Ok(Vector3D::from_xy(xy, z))
    }

    pub fn calculate_pose(&self, s: f64) -> Result<Pose3D> {
        let pose2d = self.xy.calculate_pose_global(s, &self.xy_placement)?;
        let z = self.height.value_in_fuzzy(s, self.tolerance)?;
        let roll = self.torsion.value_in_fuzzy(s, self.tolerance)?;
        Ok(Pose3D {
            point: Vector3D::from_xy(pose2d.point, z),
            rotation: Rotation3D {
                yaw: pose2d.heading,
                pitch: 0.0,
                roll,
            },
        })
    }

    pub fn discretize_points(&self, step_size: f64) -> Result<Vec<Vector3D>> {
        discretize_domain(self.domain(), step_size)
            .into_iter()
            .map(|s| self.calculate_point(s))
            .collect()
    }
}
