//! Roadspace objects (§4.3 point 7): placing an OpenDRIVE `<object>` at its
//! pose along the reference line and choosing a `Geometry3D` primitive from
//! whichever shape fields are present.

use crate::math::affine::Affine3D;
use crate::math::curve3d::Curve3D;
use crate::math::geometry::{Cylinder3D, Geometry3D, ParametricSweep3D};
use crate::math::vector::{Pose3D, Rotation3D, Vector2D, Vector3D};
use crate::opendrive::object::{ObjectShape, ObjectType, RoadObject};
use crate::roadspaces::error::{Result, RoadspacesError};

#[derive(Debug, Clone)]
pub struct RoadspaceObject {
    pub id: String,
    pub name: Option<String>,
    pub object_type: ObjectType,
    pub pose: Pose3D,
    pub geometry: Geometry3D,
}

/// `(pose of reference line at s) ∘ (t, hOffset) ∘ (rotation)` (§4.3 point
/// 7): the object's own lateral offset and height, then its own yaw about
/// the resulting local Z axis.
fn object_pose(reference: &Curve3D, road_id: &str, object: &RoadObject) -> Result<Pose3D> {
    let base_pose = reference
        .calculate_pose(object.s.value)
        .map_err(|source| RoadspacesError::Geometry {
            road: road_id.to_string(),
            source,
        })?;
    let base_affine = Affine3D::from_pose(base_pose);
    let local = Pose3D {
        point: Vector3D::new(0.0, object.t.value, object.z_offset.value),
        rotation: Rotation3D {
            yaw: object.orientation_angle.value,
            pitch: 0.0,
            roll: 0.0,
        },
    };
    Ok(base_affine.apply_pose(local))
}

/// Extrudes a local-XY cross-section from `placement` up by `height`, as a
/// two-pose `ParametricSweep3D` (reuses the same cap+side tessellation as
/// any other solid rather than hand-building faces).
fn extruded_solid(cross_section: Vec<Vector2D>, height: f64, placement: Pose3D) -> Geometry3D {
    let top = Pose3D {
        point: Affine3D::from_pose(placement).apply_point(Vector3D::new(0.0, 0.0, height)),
        rotation: placement.rotation,
    };
    Geometry3D::Sweep(ParametricSweep3D {
        path: vec![placement, top],
        cross_section,
    })
}

fn object_geometry(shape: &ObjectShape, placement: Pose3D) -> Geometry3D {
    match shape {
        ObjectShape::Cylinder { radius, height } => Geometry3D::Cylinder(Cylinder3D {
            radius: radius.value,
            height: height.value,
            placement,
        }),
        ObjectShape::Box { length, width, height } => {
            let hw = width.value / 2.0;
            let hl = length.value / 2.0;
            let cross_section = vec![
                Vector2D::new(-hl, -hw),
                Vector2D::new(hl, -hw),
                Vector2D::new(hl, hw),
                Vector2D::new(-hl, hw),
            ];
            extruded_solid(cross_section, height.value, placement)
        }
        ObjectShape::Outline { outline, height } => {
            let cross_section = outline.corners.iter().map(|c| Vector2D::new(c.u.value, c.v.value)).collect();
            extruded_solid(cross_section, height.value, placement)
        }
        ObjectShape::Point => Geometry3D::Point(placement.point),
    }
}

pub fn build_roadspace_object(reference: &Curve3D, road_id: &str, object: &RoadObject) -> Result<RoadspaceObject> {
    let pose = object_pose(reference, road_id, object)?;
    Ok(RoadspaceObject {
        id: object.id.clone(),
        name: object.name.clone(),
        object_type: object.object_type.clone(),
        geometry: object_geometry(&object.shape, pose),
        pose,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::affine::AffineSequence2D;
    use crate::math::curve2d::{Curve2D, Line2D};
    use crate::math::function::{CubicFunction, StackedFunction};
    use crate::math::range::Range;
    use uom::si::angle::radian;
    use uom::si::f64::{Angle, Length};
    use uom::si::length::meter;

    fn straight_reference(length: f64) -> Curve3D {
        let xy = Curve2D::Line(Line2D { length });
        let zero = StackedFunction::new(vec![(
            Range::new(0.0, length),
            CubicFunction::new(0.0, 0.0, 0.0, 0.0, 0.0, Range::new(0.0, length)),
        )]);
        Curve3D::new(xy, AffineSequence2D::new(), zero.clone(), zero, 1e-9)
    }

    fn cylinder_object() -> RoadObject {
        RoadObject {
            id: "o1".to_string(),
            name: None,
            object_type: ObjectType::Pole,
            s: Length::new::<meter>(5.0),
            t: Length::new::<meter>(-2.0),
            z_offset: Length::new::<meter>(0.0),
            valid_length: Length::new::<meter>(0.0),
            orientation_angle: Angle::new::<radian>(0.0),
            shape: ObjectShape::Cylinder {
                radius: Length::new::<meter>(0.15),
                height: Length::new::<meter>(3.0),
            },
            repeat: None,
        }
    }

    #[test]
    fn cylinder_object_is_placed_at_its_lateral_offset() {
        let reference = straight_reference(10.0);
        let object = cylinder_object();
        let built = build_roadspace_object(&reference, "r1", &object).unwrap();
        assert!((built.pose.point.x - 5.0).abs() < 1e-9);
        assert!((built.pose.point.y - (-2.0)).abs() < 1e-9);
        match built.geometry {
            Geometry3D::Cylinder(c) => assert!((c.radius - 0.15).abs() < 1e-9),
            _ => panic!("expected cylinder geometry"),
        }
    }

    #[test]
    fn box_shaped_object_becomes_an_extruded_sweep() {
        let reference = straight_reference(10.0);
        let mut object = cylinder_object();
        object.shape = ObjectShape::Box {
            length: Length::new::<meter>(2.0),
            width: Length::new::<meter>(1.0),
            height: Length::new::<meter>(1.5),
        };
        let built = build_roadspace_object(&reference, "r1", &object).unwrap();
        match built.geometry {
            Geometry3D::Sweep(sweep) => {
                assert_eq!(sweep.path.len(), 2);
                assert_eq!(sweep.cross_section.len(), 4);
                assert!((sweep.path[1].point.z - 1.5).abs() < 1e-9);
            }
            _ => panic!("expected sweep geometry"),
        }
    }

    #[test]
    fn object_with_no_shape_becomes_a_point() {
        let reference = straight_reference(10.0);
        let mut object = cylinder_object();
        object.shape = ObjectShape::Point;
        let built = build_roadspace_object(&reference, "r1", &object).unwrap();
        assert!(matches!(built.geometry, Geometry3D::Point(_)));
    }
}
