use crate::math::curve2d::discretize_domain;
use crate::math::curve3d::Curve3D;
use crate::math::error::Result;
use crate::math::range::Range;
use crate::math::vector::{Pose3D, Vector3D};

/// Step sizes and tessellation factors shared by every discretisation in
/// the crate; threaded through from `Configuration` (§6).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscretizationConfig {
    pub discretization_step_size: f64,
    pub sweep_discretization_step_size: f64,
    pub circle_slices: u32,
}

impl Default for DiscretizationConfig {
    fn default() -> Self {
        Self {
            discretization_step_size: 1.0,
            sweep_discretization_step_size: 1.0,
            circle_slices: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineString3D {
    pub points: Vec<Vector3D>,
}

/// A planar (or near-planar) polygon, outer ring only, points not repeated
/// at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon3D {
    pub points: Vec<Vector3D>,
}

impl Polygon3D {
    pub fn quad(a: Vector3D, b: Vector3D, c: Vector3D, d: Vector3D) -> Self {
        Self {
            points: vec![a, b, c, d],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiSurface3D {
    pub polygons: Vec<Polygon3D>,
}

impl MultiSurface3D {
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn merge(&mut self, mut other: MultiSurface3D) {
        self.polygons.append(&mut other.polygons);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle3D {
    pub center: Vector3D,
    pub radius: f64,
    /// Local pose; the circle lies in the local XY plane, z=0 is the
    /// center, tessellated counter-clockwise looking from +Z.
    pub placement: Pose3D,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder3D {
    pub radius: f64,
    pub height: f64,
    /// Local pose of the base circle's center; the cylinder extrudes along
    /// local +Z.
    pub placement: Pose3D,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParametricSweep3D {
    /// Poses along the sweep path, already discretised by the caller at
    /// `sweep_discretization_step_size`.
    pub path: Vec<Pose3D>,
    /// Closed cross-section polygon in the path's local XY frame at each
    /// pose (shared across the whole sweep).
    pub cross_section: Vec<crate::math::vector::Vector2D>,
}

/// A surface ruled between two parametrised curves that share a domain
/// (e.g. a lane's inner and outer boundary); discretised into a strip of
/// quads at shared `s` samples.
#[derive(Debug, Clone)]
pub struct RuledSurface3D {
    pub boundary_a: Curve3D,
    pub boundary_b: Curve3D,
}

/// The continuous ("abstract") geometry primitives the RoadSpaces builder
/// produces; the CityGML builder's visitor discretises each into a concrete
/// output form. A tagged sum, per the "no dynamic dispatch" design note,
/// rather than a trait-object visitor hierarchy.
#[derive(Debug, Clone)]
pub enum Geometry3D {
    Point(Vector3D),
    Curve(Curve3D),
    RuledSurface(RuledSurface3D),
    /// An already-flat polygon (filler surfaces, road marks): concrete, no
    /// further discretisation needed beyond being wrapped in a multi-surface.
    Polygon(Polygon3D),
    Circle(Circle3D),
    Cylinder(Cylinder3D),
    Sweep(ParametricSweep3D),
}

/// What the visitor produced for one `Geometry3D` value.
#[derive(Debug, Clone)]
pub enum GeometryOutput {
    Solid(MultiSurface3D),
    MultiSurface(MultiSurface3D),
    LineString(LineString3D),
    Point(Vector3D),
}

impl GeometryOutput {
    /// Rank used by the CityGML builder's solid -> multi-surface ->
    /// line-string -> point selection rule (§4.4).
    pub fn priority(&self) -> u8 {
        match self {
            GeometryOutput::Solid(_) => 0,
            GeometryOutput::MultiSurface(_) => 1,
            GeometryOutput::LineString(_) => 2,
            GeometryOutput::Point(_) => 3,
        }
    }
}

/// Picks the highest-priority (solid > multi-surface > line-string > point)
/// of the given outputs, discarding empty multi-surfaces/line-strings.
pub fn select_highest_priority(outputs: Vec<GeometryOutput>) -> Option<GeometryOutput> {
    outputs
        .into_iter()
        .filter(|o| match o {
            GeometryOutput::Solid(m) | GeometryOutput::MultiSurface(m) => !m.is_empty(),
            GeometryOutput::LineString(l) => !l.points.is_empty(),
            GeometryOutput::Point(_) => true,
        })
        .min_by_key(|o| o.priority())
}

/// Discretises one `Geometry3D` value into its `GeometryOutput` using the
/// configured step sizes / tessellation factors.
pub fn visit(geometry: &Geometry3D, config: &DiscretizationConfig) -> Result<GeometryOutput> {
    match geometry {
        Geometry3D::Point(p) => Ok(GeometryOutput::Point(*p)),
        Geometry3D::Curve(curve) => {
            let points = curve.discretize_points(config.discretization_step_size)?;
            Ok(GeometryOutput::LineString(LineString3D { points }))
        }
        Geometry3D::Polygon(polygon) => Ok(GeometryOutput::MultiSurface(MultiSurface3D {
            polygons: vec![polygon.clone()],
        })),
        Geometry3D::RuledSurface(surface) => {
            Ok(GeometryOutput::MultiSurface(ruled_surface_to_polygons(surface, config)?))
        }
        Geometry3D::Circle(circle) => Ok(GeometryOutput::MultiSurface(MultiSurface3D {
            polygons: vec![tessellate_circle(circle, config.circle_slices)],
        })),
        Geometry3D::Cylinder(cylinder) => Ok(GeometryOutput::Solid(tessellate_cylinder(cylinder, config.circle_slices))),
        Geometry3D::Sweep(sweep) => Ok(GeometryOutput::Solid(tessellate_sweep(sweep))),
    }
}

fn ruled_surface_to_polygons(surface: &RuledSurface3D, config: &DiscretizationConfig) -> Result<MultiSurface3D> {
    let domain_a = surface.boundary_a.domain();
    let domain_b = surface.boundary_b.domain();
    let domain = Range::new(domain_a.min.max(domain_b.min), domain_a.max.min(domain_b.max));
    let samples = discretize_domain(domain, config.discretization_step_size);

    let mut polygons = Vec::with_capacity(samples.len().saturating_sub(1));
    let mut prev: Option<(Vector3D, Vector3D)> = None;
    for s in samples {
        let a = surface.boundary_a.calculate_point(s)?;
        let b = surface.boundary_b.calculate_point(s)?;
        if let Some((prev_a, prev_b)) = prev {
            polygons.push(Polygon3D::quad(prev_a, a, b, prev_b));
        }
        prev = Some((a, b));
    }
    Ok(MultiSurface3D { polygons })
}

/// Tessellates a circle into `slices` wedges sharing the center point;
/// vertex 0 is at local angle 0, winding counter-clockwise looking from +Z.
fn tessellate_circle(circle: &Circle3D, slices: u32) -> Polygon3D {
    let affine = crate::math::affine::Affine3D::from_pose(circle.placement);
    let points = (0..slices)
        .map(|i| {
            let angle = 2.0 * std::f64::consts::PI * (i as f64) / (slices as f64);
            let local = Vector3D::new(circle.radius * angle.cos(), circle.radius * angle.sin(), 0.0);
            affine.apply_point(local)
        })
        .collect();
    Polygon3D { points }
}

fn tessellate_cylinder(cylinder: &Cylinder3D, slices: u32) -> MultiSurface3D {
    let affine = crate::math::affine::Affine3D::from_pose(cylinder.placement);
    let ring = |z: f64| -> Vec<Vector3D> {
        (0..slices)
            .map(|i| {
                let angle = 2.0 * std::f64::consts::PI * (i as f64) / (slices as f64);
                let local = Vector3D::new(cylinder.radius * angle.cos(), cylinder.radius * angle.sin(), z);
                affine.apply_point(local)
            })
            .collect()
    };
    let bottom = ring(0.0);
    let top = ring(cylinder.height);

    let mut polygons = Vec::with_capacity(slices as usize + 2);
    polygons.push(Polygon3D {
        points: bottom.iter().rev().copied().collect(),
    });
    polygons.push(Polygon3D { points: top.clone() });
    for i in 0..slices as usize {
        let j = (i + 1) % slices as usize;
        polygons.push(Polygon3D::quad(bottom[i], bottom[j], top[j], top[i]));
    }
    MultiSurface3D { polygons }
}

fn tessellate_sweep(sweep: &ParametricSweep3D) -> MultiSurface3D {
    let n = sweep.cross_section.len();
    if sweep.path.len() < 2 || n < 3 {
        return MultiSurface3D::default();
    }
    let ring_at = |pose: &Pose3D| -> Vec<Vector3D> {
        let affine = crate::math::affine::Affine3D::from_pose(*pose);
        sweep
            .cross_section
            .iter()
            .map(|p2| affine.apply_point(Vector3D::new(p2.x, p2.y, 0.0)))
            .collect()
    };

    let mut polygons = Vec::new();
    let first_ring = ring_at(&sweep.path[0]);
    polygons.push(Polygon3D {
        points: first_ring.iter().rev().copied().collect(),
    });

    let mut prev_ring = first_ring;
    for pose in &sweep.path[1..] {
        let ring = ring_at(pose);
        for i in 0..n {
            let j = (i + 1) % n;
            polygons.push(Polygon3D::quad(prev_ring[i], prev_ring[j], ring[j], ring[i]));
        }
        prev_ring = ring;
    }
    polygons.push(Polygon3D { points: prev_ring });
    MultiSurface3D { polygons }
}
