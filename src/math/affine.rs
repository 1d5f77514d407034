use crate::math::vector::{Pose2D, Pose3D, Rotation3D, Vector2D, Vector3D};

/// A rigid 2D transform (rotation + translation); the placement of a
/// planView segment or a lane-section offset within its parent frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine2D {
    pub translation: Vector2D,
    pub rotation: f64,
}

impl Affine2D {
    pub const IDENTITY: Self = Self {
        translation: Vector2D::ZERO,
        rotation: 0.0,
    };

    pub fn new(translation: Vector2D, rotation: f64) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub fn apply_point(&self, p: Vector2D) -> Vector2D {
        p.rotated(self.rotation) + self.translation
    }

    pub fn apply_pose(&self, pose: Pose2D) -> Pose2D {
        Pose2D {
            point: self.apply_point(pose.point),
            heading: pose.heading + self.rotation,
        }
    }

    /// Composes `self` as the outer transform applied after `inner`:
    /// `self.compose(inner).apply_point(p) == self.apply_point(inner.apply_point(p))`.
    pub fn compose(&self, inner: &Affine2D) -> Affine2D {
        Affine2D {
            translation: self.apply_point(inner.translation),
            rotation: self.rotation + inner.rotation,
        }
    }
}

/// An ordered composition of 2D affine transforms, reduced to a single
/// transform by `solve`.
#[derive(Debug, Clone, Default)]
pub struct AffineSequence2D {
    pub transforms: Vec<Affine2D>,
}

impl AffineSequence2D {
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    pub fn push(&mut self, transform: Affine2D) -> &mut Self {
        self.transforms.push(transform);
        self
    }

    /// Reduces the sequence to one transform, outermost-first.
    pub fn solve(&self) -> Affine2D {
        self.transforms
            .iter()
            .fold(Affine2D::IDENTITY, |acc, t| acc.compose(t))
    }
}

/// A 3x3 rotation matrix, row-major, used only to compose and decompose
/// `Rotation3D` values (the geometry visitor needs to extract yaw/pitch/roll
/// back out of a composed transform when orienting discretised solids).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3(pub [[f64; 3]; 3]);

impl Matrix3 {
    pub const IDENTITY: Self = Self([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    pub fn from_rotation(r: Rotation3D) -> Self {
        let (sy, cy) = r.yaw.sin_cos();
        let (sp, cp) = r.pitch.sin_cos();
        let (sr, cr) = r.roll.sin_cos();
        // R = Rz(yaw) * Ry(pitch) * Rx(roll)
        let rz = [[cy, -sy, 0.0], [sy, cy, 0.0], [0.0, 0.0, 1.0]];
        let ry = [[cp, 0.0, sp], [0.0, 1.0, 0.0], [-sp, 0.0, cp]];
        let rx = [[1.0, 0.0, 0.0], [0.0, cr, -sr], [0.0, sr, cr]];
        Self(mat_mul(&mat_mul(&rz, &ry), &rx))
    }

    pub fn multiply(&self, other: &Matrix3) -> Matrix3 {
        Matrix3(mat_mul(&self.0, &other.0))
    }

    pub fn apply(&self, v: Vector3D) -> Vector3D {
        let m = &self.0;
        Vector3D::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }

    /// Decomposes the matrix back into yaw/pitch/roll, assuming it was built
    /// as `Rz(yaw) * Ry(pitch) * Rx(roll)`.
    pub fn extract_rotation(&self) -> Rotation3D {
        let m = &self.0;
        let pitch = (-m[2][0]).clamp(-1.0, 1.0).asin();
        let (yaw, roll) = if pitch.cos().abs() > 1e-9 {
            (m[1][0].atan2(m[0][0]), m[2][1].atan2(m[2][2]))
        } else {
            // Gimbal lock: yaw and roll are not independently recoverable;
            // fold everything into yaw.
            (m[0][1].atan2(m[1][1]), 0.0)
        };
        Rotation3D { yaw, pitch, roll }
    }
}

fn mat_mul(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

/// A rigid 3D transform (rotation + translation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine3D {
    pub rotation: Matrix3,
    pub translation: Vector3D,
}

impl Affine3D {
    pub const IDENTITY: Self = Self {
        rotation: Matrix3::IDENTITY,
        translation: Vector3D::ZERO,
    };

    pub fn from_pose(pose: Pose3D) -> Self {
        Self {
            rotation: Matrix3::from_rotation(pose.rotation),
            translation: pose.point,
        }
    }

    pub fn from_translation(t: Vector3D) -> Self {
        Self {
            rotation: Matrix3::IDENTITY,
            translation: t,
        }
    }

    pub fn apply_point(&self, p: Vector3D) -> Vector3D {
        self.rotation.apply(p) + self.translation
    }

    /// Composes `self` as the outer transform applied after `inner`.
    pub fn compose(&self, inner: &Affine3D) -> Affine3D {
        Affine3D {
            rotation: self.rotation.multiply(&inner.rotation),
            translation: self.rotation.apply(inner.translation) + self.translation,
        }
    }

    pub fn apply_pose(&self, pose: Pose3D) -> Pose3D {
        let combined = self.compose(&Affine3D::from_pose(pose));
        Pose3D {
            point: combined.translation,
            rotation: combined.rotation.extract_rotation(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AffineSequence3D {
    pub transforms: Vec<Affine3D>,
}

impl AffineSequence3D {
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    pub fn push(&mut self, transform: Affine3D) -> &mut Self {
        self.transforms.push(transform);
        self
    }

    pub fn solve(&self) -> Affine3D {
        self.transforms
            .iter()
            .fold(Affine3D::IDENTITY, |acc, t| acc.compose(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affine2d_sequence_composes_outermost_first() {
        let mut seq = AffineSequence2D::new();
        seq.push(Affine2D::new(Vector2D::new(10.0, 0.0), 0.0));
        seq.push(Affine2D::new(Vector2D::new(1.0, 0.0), 0.0));
        let solved = seq.solve();
        assert_eq!(solved.apply_point(Vector2D::ZERO), Vector2D::new(11.0, 0.0));
    }

    #[test]
    fn rotation_matrix_roundtrips_through_extraction() {
        let r = Rotation3D {
            yaw: 0.3,
            pitch: 0.1,
            roll: -0.2,
        };
        let m = Matrix3::from_rotation(r);
        let back = m.extract_rotation();
        assert!((back.yaw - r.yaw).abs() < 1e-9);
        assert!((back.pitch - r.pitch).abs() < 1e-9);
        assert!((back.roll - r.roll).abs() < 1e-9);
    }
}
