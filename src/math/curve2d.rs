use crate::math::affine::{Affine2D, AffineSequence2D};
use crate::math::error::{NumericError, Result};
use crate::math::range::Range;
use crate::math::vector::{Pose2D, Vector2D};

/// Whether a `ParametricCubicCurve2D`'s parameter `p` runs over `[0, 1]`
/// ("normalized") or `[0, length]` ("arcLength").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamPRange {
    Normalized,
    ArcLength,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2D {
    pub length: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc2D {
    pub length: f64,
    /// Signed curvature (1/radius), constant along the element.
    pub curvature: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spiral2D {
    pub length: f64,
    pub curvature_start: f64,
    pub curvature_end: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicCurve2D {
    pub length: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParametricCubicCurve2D {
    pub length: f64,
    pub a_u: f64,
    pub b_u: f64,
    pub c_u: f64,
    pub d_u: f64,
    pub a_v: f64,
    pub b_v: f64,
    pub c_v: f64,
    pub d_v: f64,
    pub p_range: ParamPRange,
}

/// One element of a `CompositeCurve2D`: a single-segment curve placed at
/// its own `(x, y, hdg)` within the composite's local frame, starting at
/// composite arc-length `start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeSegment {
    pub start: f64,
    pub curve: Line2DOrOther,
    pub placement: Affine2D,
}

/// A planView-style segment restricted to the non-composite variants (a
/// composite cannot nest another composite).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Line2DOrOther {
    Line(Line2D),
    Arc(Arc2D),
    Spiral(Spiral2D),
    Cubic(CubicCurve2D),
    ParamCubic(ParametricCubicCurve2D),
}

impl Line2DOrOther {
    fn length(&self) -> f64 {
        match self {
            Line2DOrOther::Line(l) => l.length,
            Line2DOrOther::Arc(a) => a.length,
            Line2DOrOther::Spiral(s) => s.length,
            Line2DOrOther::Cubic(c) => c.length,
            Line2DOrOther::ParamCubic(p) => p.length,
        }
    }

    fn calculate_pose_local(&self, s: f64) -> Result<Pose2D> {
        self.as_curve().calculate_pose_local(s)
    }

    fn as_curve(&self) -> Curve2D {
        match self {
            Line2DOrOther::Line(l) => Curve2D::Line(*l),
            Line2DOrOther::Arc(a) => Curve2D::Arc(*a),
            Line2DOrOther::Spiral(s) => Curve2D::Spiral(*s),
            Line2DOrOther::Cubic(c) => Curve2D::Cubic(*c),
            Line2DOrOther::ParamCubic(p) => Curve2D::ParamCubic(*p),
        }
    }
}

/// The 2D reference line of a road: its planView segments butted in
/// sequence along `s`, each placed at its own recorded `(x, y, hdg)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeCurve2D {
    pub segments: Vec<CompositeSegment>,
    pub length: f64,
}

impl CompositeCurve2D {
    pub fn new(segments: Vec<CompositeSegment>) -> Self {
        let length = segments
            .last()
            .map(|s| s.start + s.curve.length())
            .unwrap_or(0.0);
        Self { segments, length }
    }

    fn segment_at(&self, s: f64) -> Result<(&CompositeSegment, f64)> {
        if self.segments.is_empty() {
            return Err(NumericError::Degenerate {
                reason: "composite curve has no segments".to_string(),
            });
        }
        for (i, segment) in self.segments.iter().enumerate() {
            let segment_end = self
                .segments
                .get(i + 1)
                .map(|next| next.start)
                .unwrap_or(self.length);
            if s < segment_end || i == self.segments.len() - 1 {
                let local_s = (s - segment.start).clamp(0.0, segment.curve.length());
                return Ok((segment, local_s));
            }
        }
        unreachable!("last segment always matches")
    }
}

/// A curve obtained by offsetting `base` laterally by a `(s)`-keyed
/// function, e.g. a lane boundary offset from the road reference line by
/// its accumulated width (§4.3 point 5). The offset is applied in the XY
/// plane along the base curve's local normal; curvature-induced contraction
/// of the offset curve's own arc length is not modelled, which is accurate
/// for straight and mildly curved elements and is the same approximation
/// every lane-width integration in this crate uses.
#[derive(Debug, Clone)]
pub struct LateralOffsetCurve2D {
    pub base: Box<Curve2D>,
    pub offset: crate::math::function::StackedFunction,
}

impl LateralOffsetCurve2D {
    fn length(&self) -> f64 {
        self.base.length()
    }

    fn calculate_pose_local(&self, s: f64) -> Result<Pose2D> {
        let base_pose = self.base.calculate_pose_local(s)?;
        let t = self.offset.value(s)?;
        let left_normal = Vector2D::new(-base_pose.heading.sin(), base_pose.heading.cos());
        Ok(Pose2D {
            point: base_pose.point + left_normal * t,
            heading: base_pose.heading,
        })
    }
}

/// A window of `base` re-parametrised from `[start, start+length]` in
/// `base`'s own arc length down to `[0, length]` local arc length, e.g. one
/// lane section's slice of a road's full reference line (§4.3 point 3).
#[derive(Debug, Clone)]
pub struct SubCurve2D {
    pub base: Box<Curve2D>,
    pub start: f64,
    pub length: f64,
}

impl SubCurve2D {
    fn length(&self) -> f64 {
        self.length
    }

    fn calculate_pose_local(&self, s: f64) -> Result<Pose2D> {
        self.base.calculate_pose_local(self.start + s)
    }
}

/// A 2D curve segment in its own local frame (starts at the origin, heading
/// zero). Placement into a parent frame is the caller's job via
/// `calculate_*_global` and an `AffineSequence2D`.
///
/// Encoded as a tagged sum rather than a trait-object hierarchy, per the
/// "geometry visitor without dynamic dispatch" design note: the small,
/// closed set of planView geometry kinds is exhaustively matched instead of
/// double-dispatched.
#[derive(Debug, Clone)]
pub enum Curve2D {
    Line(Line2D),
    Arc(Arc2D),
    Spiral(Spiral2D),
    Cubic(CubicCurve2D),
    ParamCubic(ParametricCubicCurve2D),
    /// Several planView segments butted together (§4.3 point 1); the only
    /// variant that is itself a collection rather than one primitive.
    Composite(CompositeCurve2D),
    /// `base` offset laterally by a `StackedFunction` (§4.3 point 5: lane
    /// boundaries offset from the reference line).
    LateralOffset(LateralOffsetCurve2D),
    /// A re-parametrised window of `base` (§4.3 point 3: one lane section's
    /// slice of the road reference line).
    Sub(SubCurve2D),
}

impl Curve2D {
    pub fn length(&self) -> f64 {
        match self {
            Curve2D::Line(l) => l.length,
            Curve2D::Arc(a) => a.length,
            Curve2D::Spiral(s) => s.length,
            Curve2D::Cubic(c) => c.length,
            Curve2D::ParamCubic(p) => p.length,
            Curve2D::Composite(c) => c.length,
            Curve2D::LateralOffset(o) => o.length(),
            Curve2D::Sub(s) => s.length(),
        }
    }

    pub fn domain(&self) -> Range<f64> {
        Range::new(0.0, self.length())
    }

    fn check_domain(&self, s: f64) -> Result<()> {
        let domain = self.domain();
        if !domain.contains(s) {
            return Err(NumericError::OutOfDomain {
                value: s,
                min: domain.min,
                max: domain.max,
            });
        }
        Ok(())
    }

    pub fn calculate_pose_local(&self, s: f64) -> Result<Pose2D> {
        self.check_domain(s)?;
        match self {
            Curve2D::Line(_) => Ok(Pose2D {
                point: Vector2D::new(s, 0.0),
                heading: 0.0,
            }),
            Curve2D::Arc(arc) => {
                if arc.curvature.abs() < f64::EPSILON {
                    return Ok(Pose2D {
                        point: Vector2D::new(s, 0.0),
                        heading: 0.0,
                    });
                }
                let radius = 1.0 / arc.curvature;
                let heading = arc.curvature * s;
                let point = Vector2D::new(radius * heading.sin(), radius * (1.0 - heading.cos()));
                Ok(Pose2D { point, heading })
            }
            Curve2D::Spiral(spiral) => {
                let curvature_rate =
                    (spiral.curvature_end - spiral.curvature_start) / spiral.length.max(f64::EPSILON);
                let heading = spiral.curvature_start * s + 0.5 * curvature_rate * s * s;
                let point = spiral_point(s, spiral.curvature_start, curvature_rate);
                Ok(Pose2D { point, heading })
            }
            Curve2D::Cubic(cubic) => {
                let v = cubic.a + s * (cubic.b + s * (cubic.c + s * cubic.d));
                let dv = cubic.b + s * (2.0 * cubic.c + s * 3.0 * cubic.d);
                Ok(Pose2D {
                    point: Vector2D::new(s, v),
                    heading: dv.atan(),
                })
            }
            Curve2D::ParamCubic(pc) => {
                let p = match pc.p_range {
                    ParamPRange::Normalized => s / pc.length.max(f64::EPSILON),
                    ParamPRange::ArcLength => s,
                };
                let u = pc.a_u + p * (pc.b_u + p * (pc.c_u + p * pc.d_u));
                let v = pc.a_v + p * (pc.b_v + p * (pc.c_v + p * pc.d_v));
                let du = pc.b_u + p * (2.0 * pc.c_u + p * 3.0 * pc.d_u);
                let dv = pc.b_v + p * (2.0 * pc.c_v + p * 3.0 * pc.d_v);
                Ok(Pose2D {
                    point: Vector2D::new(u, v),
                    heading: dv.atan2(du),
                })
            }
            Curve2D::Composite(composite) => {
                let (segment, local_s) = composite.segment_at(s)?;
                let local_pose = segment.curve.calculate_pose_local(local_s)?;
                Ok(segment.placement.apply_pose(local_pose))
            }
            Curve2D::LateralOffset(offset) => offset.calculate_pose_local(s),
            Curve2D::Sub(sub) => sub.calculate_pose_local(s),
        }
    }

    pub fn calculate_point_local(&self, s: f64) -> Result<Vector2D> {
        self.calculate_pose_local(s).map(|pose| pose.point)
    }

    pub fn calculate_pose_global(&self, s: f64, placement: &AffineSequence2D) -> Result<Pose2D> {
        let local = self.calculate_pose_local(s)?;
        Ok(placement.solve().apply_pose(local))
    }

    pub fn calculate_point_global(&self, s: f64, placement: &AffineSequence2D) -> Result<Vector2D> {
        self.calculate_pose_global(s, placement).map(|pose| pose.point)
    }

    /// Arc-length-parameterised sample points: step is
    /// `min(step_size, remaining_length)`, and the final sample always lands
    /// exactly on the domain endpoint.
    pub fn discretize_s_values(&self, step_size: f64) -> Vec<f64> {
        discretize_domain(self.domain(), step_size)
    }
}

/// Shared arc-length stepping rule used by every curve discretisation in
/// this crate (planView curves, reference/boundary curves, sweep paths).
pub fn discretize_domain(domain: Range<f64>, step_size: f64) -> Vec<f64> {
    assert!(step_size > 0.0, "discretization step must be positive");
    let mut samples = Vec::new();
    let mut s = domain.min;
    loop {
        samples.push(s);
        if s >= domain.max {
            break;
        }
        let remaining = domain.max - s;
        let step = step_size.min(remaining);
        s += step;
        if domain.max - s < 1e-12 {
            s = domain.max;
        }
    }
    samples
}

/// Euler-spiral (clothoid) point at arc length `s`, given the curvature at
/// the start and its constant rate of change (`curvature_rate`), via the
/// Fresnel integrals.
///
/// `heading(u) = curvature_start*u + 0.5*curvature_rate*u^2` completes the
/// square to `0.5*curvature_rate*(u + shift)^2 + const`, which is a pure
/// clothoid in the shifted variable `u' = u + shift`; its closed form is the
/// canonical Fresnel integral, so the general (non-zero `curvature_start`)
/// case reduces to evaluating the same `fresnel` helper at two points and
/// subtracting, then rotating by `const`.
fn spiral_point(s: f64, curvature_start: f64, curvature_rate: f64) -> Vector2D {
    if curvature_rate.abs() < 1e-12 {
        let arc = Arc2D {
            length: s.abs().max(f64::EPSILON),
            curvature: curvature_start,
        };
        return Curve2D::Arc(arc)
            .calculate_pose_local(s.clamp(-arc.length, arc.length).abs().min(arc.length))
            .map(|pose| pose.point)
            .unwrap_or(Vector2D::new(s, 0.0));
    }

    let shift = curvature_start / curvature_rate;
    let rate_abs_sqrt = curvature_rate.abs().sqrt();
    let sign = curvature_rate.signum();
    let scale = (std::f64::consts::PI / curvature_rate.abs()).sqrt();
    let const_heading = -curvature_start * curvature_start / (2.0 * curvature_rate);

    let fresnel_at = |u_prime: f64| -> Vector2D {
        let t = u_prime * rate_abs_sqrt / std::f64::consts::PI.sqrt();
        let (fs, fc) = fresnel(t);
        Vector2D::new(scale * fc, sign * scale * fs)
    };

    let start = fresnel_at(shift);
    let end = fresnel_at(shift + s);
    (end - start).rotated(const_heading)
}

/// Fresnel integrals `(S(t), C(t))` via the Abramowitz & Stegun rational
/// approximation (accurate to ~1e-3, sufficient for tessellation purposes).
fn fresnel(t: f64) -> (f64, f64) {
    if t.abs() < 1e-9 {
        return (0.0, 0.0);
    }
    let sign = t.signum();
    let t = t.abs();
    let pi_2 = std::f64::consts::FRAC_PI_2;
    let x = pi_2 * t * t;
    // Rational approximation of the auxiliary functions f(x), g(x).
    let f = (1.0 + 0.926 * x) / (2.0 + 1.792 * x + 3.104 * x * x);
    let g = 1.0 / (2.0 + 4.142 * x + 3.492 * x * x + 6.670 * x * x * x);
    let s = 0.5 - f * (x).cos() - g * (x).sin();
    let c = 0.5 + f * (x).sin() - g * (x).cos();
    (sign * s, sign * c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_is_straight() {
        let line = Curve2D::Line(Line2D { length: 10.0 });
        let p = line.calculate_point_local(5.0).unwrap();
        assert_eq!(p, Vector2D::new(5.0, 0.0));
    }

    #[test]
    fn arc_of_known_radius_reaches_expected_chord() {
        let radius = 10.0;
        let arc = Curve2D::Arc(Arc2D {
            length: radius * std::f64::consts::FRAC_PI_2,
            curvature: 1.0 / radius,
        });
        let p = arc.calculate_point_local(arc.length()).unwrap();
        assert!((p.x - radius).abs() < 1e-6);
        assert!((p.y - radius).abs() < 1e-6);
    }

    #[test]
    fn discretize_domain_places_last_sample_at_endpoint() {
        let samples = discretize_domain(Range::new(0.0, 10.0), 3.0);
        assert_eq!(*samples.last().unwrap(), 10.0);
        assert!(samples.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn spiral_from_zero_curvature_is_smooth_and_finite() {
        let spiral = Curve2D::Spiral(Spiral2D {
            length: 20.0,
            curvature_start: 0.0,
            curvature_end: 0.05,
        });
        for s in discretize_domain(spiral.domain(), 2.0) {
            let p = spiral.calculate_point_local(s).unwrap();
            assert!(p.is_finite());
        }
    }

    #[test]
    fn composite_curve_butts_two_lines_in_sequence() {
        let composite = CompositeCurve2D::new(vec![
            CompositeSegment {
                start: 0.0,
                curve: Line2DOrOther::Line(Line2D { length: 10.0 }),
                placement: Affine2D::new(Vector2D::new(0.0, 0.0), 0.0),
            },
            CompositeSegment {
                start: 10.0,
                curve: Line2DOrOther::Line(Line2D { length: 10.0 }),
                placement: Affine2D::new(Vector2D::new(10.0, 0.0), 0.0),
            },
        ]);
        let curve = Curve2D::Composite(composite);
        assert_eq!(curve.length(), 20.0);
        let p = curve.calculate_point_local(15.0).unwrap();
        assert!((p.x - 15.0).abs() < 1e-9);
        assert!((p.y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn lateral_offset_shifts_a_straight_base_to_the_left() {
        use crate::math::function::{CubicFunction, StackedFunction};

        let base = Curve2D::Line(Line2D { length: 10.0 });
        let domain = Range::new(0.0, 10.0);
        let offset = StackedFunction::new(vec![(domain, CubicFunction::new(2.0, 0.0, 0.0, 0.0, 0.0, domain))]);
        let curve = Curve2D::LateralOffset(LateralOffsetCurve2D {
            base: Box::new(base),
            offset,
        });
        assert_eq!(curve.length(), 10.0);
        let p = curve.calculate_point_local(4.0).unwrap();
        assert!((p.x - 4.0).abs() < 1e-9);
        assert!((p.y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn sub_curve_reparametrises_a_window_of_the_base() {
        let base = Curve2D::Line(Line2D { length: 20.0 });
        let window = Curve2D::Sub(SubCurve2D {
            base: Box::new(base),
            start: 10.0,
            length: 5.0,
        });
        assert_eq!(window.length(), 5.0);
        let p = window.calculate_point_local(2.0).unwrap();
        assert!((p.x - 12.0).abs() < 1e-9);
    }

    #[test]
    fn cubic_curve_matches_known_samples() {
        // width-style test vehicle: a=3.5, c=-0.035 over length 10
        let cubic = Curve2D::Cubic(CubicCurve2D {
            length: 10.0,
            a: 3.5,
            b: 0.0,
            c: -0.035,
            d: 0.0,
        });
        let at10 = cubic.calculate_point_local(10.0).unwrap();
        assert!((at10.y - 0.0).abs() < 1e-9);
        let at5 = cubic.calculate_point_local(5.0).unwrap();
        assert!((at5.y - (-2.625)).abs() < 1e-9);
    }
}
