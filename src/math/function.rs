use crate::math::error::{NumericError, Result};
use crate::math::range::Range;

/// Common contract for scalar functions of one variable over a finite domain.
pub trait UnivariateFunction {
    fn domain(&self) -> Range<f64>;

    fn value(&self, x: f64) -> Result<f64>;

    /// Widens the domain check by `tol` before evaluating; the argument is
    /// clamped back into the true domain so callers at the fuzzy edge still
    /// get a real value rather than an extrapolation.
    fn value_in_fuzzy(&self, x: f64, tol: f64) -> Result<f64> {
        let domain = self.domain();
        if !domain.fuzzy_contains(x, tol) {
            return Err(NumericError::OutOfDomain {
                value: x,
                min: domain.min,
                max: domain.max,
            });
        }
        self.value(domain.clamp(x))
    }
}

/// `slope * x + intercept` over `domain`. The axis-x identity is
/// `slope = 1, intercept = 0, domain = [-inf, +inf]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFunction {
    pub slope: f64,
    pub intercept: f64,
    pub domain: Range<f64>,
}

impl LinearFunction {
    pub fn identity() -> Self {
        Self {
            slope: 1.0,
            intercept: 0.0,
            domain: Range::new(f64::NEG_INFINITY, f64::INFINITY),
        }
    }
}

impl UnivariateFunction for LinearFunction {
    fn domain(&self) -> Range<f64> {
        self.domain
    }

    fn value(&self, x: f64) -> Result<f64> {
        if !self.domain.contains(x) {
            return Err(NumericError::OutOfDomain {
                value: x,
                min: self.domain.min,
                max: self.domain.max,
            });
        }
        Ok(self.slope * x + self.intercept)
    }
}

/// `a + b*ds + c*ds^2 + d*ds^3` where `ds = x - origin`, evaluated by Horner.
///
/// Every OpenDRIVE cubic polynomial (elevation, superelevation, lane width,
/// lane offset, road-mark sway) shares this shape with its own local
/// `origin` (usually the record's `s`/`sOffset`), so a single type covers
/// all of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicFunction {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub origin: f64,
    pub domain: Range<f64>,
}

impl CubicFunction {
    pub fn new(a: f64, b: f64, c: f64, d: f64, origin: f64, domain: Range<f64>) -> Self {
        Self {
            a,
            b,
            c,
            d,
            origin,
            domain,
        }
    }

    pub fn derivative_at(&self, x: f64) -> f64 {
        let ds = x - self.origin;
        self.b + ds * (2.0 * self.c + ds * 3.0 * self.d)
    }
}

impl UnivariateFunction for CubicFunction {
    fn domain(&self) -> Range<f64> {
        self.domain
    }

    fn value(&self, x: f64) -> Result<f64> {
        if !self.domain.contains(x) {
            return Err(NumericError::OutOfDomain {
                value: x,
                min: self.domain.min,
                max: self.domain.max,
            });
        }
        let ds = x - self.origin;
        // Horner's method: a + ds*(b + ds*(c + ds*d))
        Ok(self.a + ds * (self.b + ds * (self.c + ds * self.d)))
    }
}

/// An ordered sequence of `(subDomain, subFunction)` pairs. `value(x)`
/// dispatches to the first sub-domain containing `x` (overlaps are broken
/// first-wins); a gap returns `OutOfDomain` unless `default_value` is set.
#[derive(Debug, Clone)]
pub struct StackedFunction {
    pub pieces: Vec<(Range<f64>, CubicFunction)>,
    pub default_value: Option<f64>,
}

impl StackedFunction {
    pub fn new(pieces: Vec<(Range<f64>, CubicFunction)>) -> Self {
        Self {
            pieces,
            default_value: None,
        }
    }

    pub fn with_default(mut self, default_value: f64) -> Self {
        self.default_value = Some(default_value);
        self
    }

    pub fn overall_domain(&self) -> Range<f64> {
        let min = self
            .pieces
            .iter()
            .map(|(d, _)| d.min)
            .fold(f64::INFINITY, f64::min);
        let max = self
            .pieces
            .iter()
            .map(|(d, _)| d.max)
            .fold(f64::NEG_INFINITY, f64::max);
        Range::new(min, max)
    }

    /// Re-keys every piece from global arc length to a local window starting
    /// at `delta`, e.g. a road-level function restricted to one lane
    /// section's local `s` (§4.3 point 3).
    pub fn shift(&self, delta: f64) -> StackedFunction {
        let pieces = self
            .pieces
            .iter()
            .map(|(d, f)| {
                let domain = Range::new(d.min - delta, d.max - delta);
                (domain, CubicFunction::new(f.a, f.b, f.c, f.d, f.origin - delta, domain))
            })
            .collect();
        StackedFunction::new(pieces)
    }

    /// Scales every piece's output by `k`, e.g. flipping a width function's
    /// sign for a right lane (§4.3 point 5).
    pub fn scale(&self, k: f64) -> StackedFunction {
        let pieces = self
            .pieces
            .iter()
            .map(|(d, f)| (*d, CubicFunction::new(f.a * k, f.b * k, f.c * k, f.d * k, f.origin, *d)))
            .collect();
        StackedFunction::new(pieces)
    }

    /// Pointwise sum of two stacked functions over their shared domain, e.g.
    /// accumulating per-lane width functions outward from the reference line
    /// (§4.3 point 5). Cubics are closed under addition, so each merged
    /// sub-piece is itself exact rather than resampled.
    pub fn add(&self, other: &StackedFunction) -> StackedFunction {
        let shared = Range::new(
            self.overall_domain().min.max(other.overall_domain().min),
            self.overall_domain().max.min(other.overall_domain().max),
        );
        let mut breakpoints: Vec<f64> = vec![shared.min, shared.max];
        for (d, _) in self.pieces.iter().chain(other.pieces.iter()) {
            if d.min > shared.min && d.min < shared.max {
                breakpoints.push(d.min);
            }
            if d.max > shared.min && d.max < shared.max {
                breakpoints.push(d.max);
            }
        }
        breakpoints.sort_by(|a, b| a.partial_cmp(b).unwrap());
        breakpoints.dedup_by(|a, b| (*a - *b).abs() < 1e-12);

        let mut pieces = Vec::with_capacity(breakpoints.len().saturating_sub(1));
        for w in breakpoints.windows(2) {
            let (start, end) = (w[0], w[1]);
            if end <= start {
                continue;
            }
            let midpoint = 0.5 * (start + end);
            let a = find_piece(&self.pieces, midpoint);
            let b = find_piece(&other.pieces, midpoint);
            let sum = match (a, b) {
                (Some(a), Some(b)) => add_cubic(a, b),
                (Some(a), None) => expand_to_origin_zero(a),
                (None, Some(b)) => expand_to_origin_zero(b),
                (None, None) => CubicFunction::new(0.0, 0.0, 0.0, 0.0, 0.0, Range::new(start, end)),
            };
            pieces.push((Range::new(start, end), CubicFunction { domain: Range::new(start, end), ..sum }));
        }
        StackedFunction::new(pieces)
    }
}

fn find_piece(pieces: &[(Range<f64>, CubicFunction)], x: f64) -> Option<&CubicFunction> {
    pieces.iter().find(|(d, _)| d.contains(x)).map(|(_, f)| f)
}

/// Re-expresses `f`'s polynomial with `origin = 0`, i.e. as plain monomial
/// coefficients in `x` rather than `x - origin`.
fn expand_to_origin_zero(f: &CubicFunction) -> CubicFunction {
    let o = f.origin;
    let o2 = o * o;
    let o3 = o2 * o;
    CubicFunction::new(
        f.a - f.b * o + f.c * o2 - f.d * o3,
        f.b - 2.0 * f.c * o + 3.0 * f.d * o2,
        f.c - 3.0 * f.d * o,
        f.d,
        0.0,
        f.domain,
    )
}

fn add_cubic(a: &CubicFunction, b: &CubicFunction) -> CubicFunction {
    let a = expand_to_origin_zero(a);
    let b = expand_to_origin_zero(b);
    CubicFunction::new(a.a + b.a, a.b + b.b, a.c + b.c, a.d + b.d, 0.0, a.domain)
}

impl UnivariateFunction for StackedFunction {
    fn domain(&self) -> Range<f64> {
        self.overall_domain()
    }

    fn value(&self, x: f64) -> Result<f64> {
        for (sub_domain, f) in &self.pieces {
            if sub_domain.contains(x) {
                return f.value(x);
            }
        }
        if let Some(default) = self.default_value {
            return Ok(default);
        }
        let domain = self.domain();
        Err(NumericError::OutOfDomain {
            value: x,
            min: domain.min,
            max: domain.max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_function_evaluates_by_horner() {
        let f = CubicFunction::new(1.0, 2.0, 3.0, 4.0, 0.0, Range::new(0.0, 10.0));
        // 1 + 2*2 + 3*4 + 4*8 = 1+4+12+32 = 49
        assert_eq!(f.value(2.0).unwrap(), 49.0);
    }

    #[test]
    fn stacked_function_first_wins_on_overlap() {
        let a = CubicFunction::new(1.0, 0.0, 0.0, 0.0, 0.0, Range::new(0.0, 5.0));
        let b = CubicFunction::new(2.0, 0.0, 0.0, 0.0, 0.0, Range::new(3.0, 8.0));
        let stacked = StackedFunction::new(vec![
            (Range::new(0.0, 5.0), a),
            (Range::new(3.0, 8.0), b),
        ]);
        assert_eq!(stacked.value(4.0).unwrap(), 1.0);
    }

    #[test]
    fn stacked_function_gap_without_default_is_out_of_domain() {
        let a = CubicFunction::new(1.0, 0.0, 0.0, 0.0, 0.0, Range::new(0.0, 2.0));
        let b = CubicFunction::new(2.0, 0.0, 0.0, 0.0, 0.0, Range::new(5.0, 8.0));
        let stacked = StackedFunction::new(vec![(Range::new(0.0, 2.0), a), (Range::new(5.0, 8.0), b)]);
        assert!(stacked.value(3.5).is_err());
    }

    #[test]
    fn stacked_function_gap_with_default() {
        let a = CubicFunction::new(1.0, 0.0, 0.0, 0.0, 0.0, Range::new(0.0, 2.0));
        let stacked = StackedFunction::new(vec![(Range::new(0.0, 2.0), a)]).with_default(9.0);
        assert_eq!(stacked.value(3.5).unwrap(), 9.0);
    }
}
