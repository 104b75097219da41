//! Parametric spline fitting for track centerlines.
//!
//! Fits each axis (x(t), y(t)) independently through the waypoint
//! parameters and samples the result densely:
//!
//! - Open sequences get integer parameters `0..n-1` and a **natural**
//!   boundary condition (zero second derivative at both ends).
//! - Closed sequences get parameters evenly spaced over `[0, 1]` including
//!   the closing duplicate and a **periodic** boundary condition
//!   (first-derivative continuity across the seam).
//!
//! The interpolant is selectable via [`SplineKind`]: a C2 cubic spline
//! (default) or the more shape-preserving Akima interpolant. Both feed the
//! same piecewise-cubic representation, so the surrounding contract does
//! not change with the strategy.

use trackkit_core::{Curve, Point, WaypointSequence};

use crate::error::CurveFitError;

/// Number of samples taken over the full parameter domain.
pub const CURVE_SAMPLES: usize = 200;

/// Pivot threshold below which the interpolation system counts as singular.
const SINGULAR_EPS: f64 = 1e-12;

/// Interpolation strategy for curve fitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplineKind {
    /// C2 cubic spline (natural or periodic boundary).
    #[default]
    Cubic,
    /// Akima interpolant; trades C2 continuity for fewer overshoots near
    /// uneven waypoint spacing.
    Akima,
}

/// One fitted axis as a piecewise cubic over the knot parameters.
///
/// Evaluation clamps to the parameter domain, so the first and last knot
/// values are reproduced exactly at the domain ends.
#[derive(Debug, Clone)]
pub struct AxisSpline {
    knots: Vec<f64>,
    values: Vec<f64>,
    /// Per-segment coefficients `[c0, c1, c2, c3]` in the local variable
    /// `u = t - knots[i]`.
    coeffs: Vec<[f64; 4]>,
}

impl AxisSpline {
    pub fn eval(&self, t: f64) -> f64 {
        let last = *self.knots.last().expect("spline has at least two knots");
        if t <= self.knots[0] {
            return self.values[0];
        }
        if t >= last {
            return *self.values.last().unwrap();
        }
        // knots[i] <= t < knots[i+1]
        let i = self.knots.partition_point(|k| *k <= t) - 1;
        let u = t - self.knots[i];
        let [c0, c1, c2, c3] = self.coeffs[i];
        c0 + u * (c1 + u * (c2 + u * c3))
    }

    /// Lower and upper ends of the parameter domain.
    pub fn domain(&self) -> (f64, f64) {
        (self.knots[0], *self.knots.last().unwrap())
    }
}

/// Fit one axis through `(params[i], values[i])` with the given strategy.
///
/// `params` must be strictly increasing. A periodic fit additionally
/// requires identical first and last values (the closing duplicate) and at
/// least four points.
pub fn fit_axis(
    kind: SplineKind,
    params: &[f64],
    values: &[f64],
    periodic: bool,
) -> Result<AxisSpline, CurveFitError> {
    assert_eq!(params.len(), values.len());
    let n = params.len();
    let min_points = if periodic { 4 } else { 2 };
    if n < min_points {
        return Err(CurveFitError::NotEnoughPoints { count: n });
    }

    let mut h = Vec::with_capacity(n - 1);
    for i in 0..n - 1 {
        let step = params[i + 1] - params[i];
        if !(step > 0.0) {
            return Err(CurveFitError::DegenerateParameters { index: i });
        }
        h.push(step);
    }

    if periodic {
        let scale = 1.0 + values[0].abs().max(values[n - 1].abs());
        if (values[0] - values[n - 1]).abs() > 1e-12 * scale {
            return Err(CurveFitError::NotPeriodic);
        }
    }

    let coeffs = match kind {
        SplineKind::Cubic => cubic_coefficients(params, values, &h, periodic)?,
        SplineKind::Akima => akima_coefficients(values, &h, periodic),
    };

    Ok(AxisSpline {
        knots: params.to_vec(),
        values: values.to_vec(),
        coeffs,
    })
}

/// Cubic spline segment coefficients from the second derivatives `m` at the
/// knots. On segment i:
///
///   S(u) = y_i + b_i u + (m_i / 2) u^2 + ((m_{i+1} - m_i) / 6 h_i) u^3
///   b_i  = (y_{i+1} - y_i) / h_i - h_i (2 m_i + m_{i+1}) / 6
fn cubic_coefficients(
    params: &[f64],
    values: &[f64],
    h: &[f64],
    periodic: bool,
) -> Result<Vec<[f64; 4]>, CurveFitError> {
    let n = params.len();
    let m = if periodic {
        periodic_second_derivatives(values, h)?
    } else {
        natural_second_derivatives(values, h)?
    };

    let mut coeffs = Vec::with_capacity(n - 1);
    for i in 0..n - 1 {
        let dy = (values[i + 1] - values[i]) / h[i];
        let b = dy - h[i] * (2.0 * m[i] + m[i + 1]) / 6.0;
        coeffs.push([
            values[i],
            b,
            m[i] / 2.0,
            (m[i + 1] - m[i]) / (6.0 * h[i]),
        ]);
    }
    Ok(coeffs)
}

/// Second derivatives for the natural boundary: zero curvature at both
/// ends, interior values from the standard tridiagonal continuity system.
fn natural_second_derivatives(values: &[f64], h: &[f64]) -> Result<Vec<f64>, CurveFitError> {
    let n = values.len();
    let mut m = vec![0.0; n];
    if n == 2 {
        return Ok(m);
    }

    let unknowns = n - 2;
    let mut sub = vec![0.0; unknowns.saturating_sub(1)];
    let mut diag = vec![0.0; unknowns];
    let mut sup = vec![0.0; unknowns.saturating_sub(1)];
    let mut rhs = vec![0.0; unknowns];
    for k in 0..unknowns {
        let i = k + 1;
        diag[k] = 2.0 * (h[i - 1] + h[i]);
        if k > 0 {
            sub[k - 1] = h[i - 1];
        }
        if k < unknowns - 1 {
            sup[k] = h[i];
        }
        rhs[k] = 6.0
            * ((values[i + 1] - values[i]) / h[i] - (values[i] - values[i - 1]) / h[i - 1]);
    }

    let interior = solve_tridiagonal(&sub, &diag, &sup, &rhs)?;
    m[1..n - 1].copy_from_slice(&interior);
    Ok(m)
}

/// Second derivatives for the periodic boundary. The last point duplicates
/// the first, so there are `n - 1` unknowns coupled cyclically; the corner
/// entries are folded away with the Sherman-Morrison identity.
fn periodic_second_derivatives(values: &[f64], h: &[f64]) -> Result<Vec<f64>, CurveFitError> {
    let n = values.len();
    let rim = n - 1;

    let mut sub = vec![0.0; rim];
    let mut diag = vec![0.0; rim];
    let mut sup = vec![0.0; rim];
    let mut rhs = vec![0.0; rim];
    for i in 0..rim {
        let h_prev = h[(i + rim - 1) % rim];
        let y_prev = values[(i + rim - 1) % rim];
        sub[i] = h_prev;
        diag[i] = 2.0 * (h_prev + h[i]);
        sup[i] = h[i];
        rhs[i] =
            6.0 * ((values[i + 1] - values[i]) / h[i] - (values[i] - y_prev) / h_prev);
    }

    let ring = solve_cyclic_tridiagonal(&sub, &diag, &sup, &rhs)?;
    let mut m = ring;
    m.push(m[0]);
    Ok(m)
}

/// Thomas algorithm. `sub` and `sup` are one element shorter than `diag`.
fn solve_tridiagonal(
    sub: &[f64],
    diag: &[f64],
    sup: &[f64],
    rhs: &[f64],
) -> Result<Vec<f64>, CurveFitError> {
    let n = diag.len();
    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    let mut pivot = diag[0];
    if pivot.abs() < SINGULAR_EPS {
        return Err(CurveFitError::Singular);
    }
    if n > 1 {
        c_prime[0] = sup[0] / pivot;
    }
    d_prime[0] = rhs[0] / pivot;

    for i in 1..n {
        pivot = diag[i] - sub[i - 1] * c_prime[i - 1];
        if pivot.abs() < SINGULAR_EPS {
            return Err(CurveFitError::Singular);
        }
        if i < n - 1 {
            c_prime[i] = sup[i] / pivot;
        }
        d_prime[i] = (rhs[i] - sub[i - 1] * d_prime[i - 1]) / pivot;
    }

    let mut x = d_prime;
    for i in (0..n - 1).rev() {
        x[i] -= c_prime[i] * x[i + 1];
    }
    Ok(x)
}

/// Cyclic tridiagonal solve via Sherman-Morrison: the corner entries
/// (`sub[0]` coupling to the last unknown, `sup[n-1]` to the first) are
/// expressed as a rank-one update of a plain tridiagonal matrix.
fn solve_cyclic_tridiagonal(
    sub: &[f64],
    diag: &[f64],
    sup: &[f64],
    rhs: &[f64],
) -> Result<Vec<f64>, CurveFitError> {
    let n = diag.len();
    debug_assert!(n >= 3);
    let alpha = sub[0]; // A[0][n-1]
    let beta = sup[n - 1]; // A[n-1][0]
    let gamma = -diag[0];

    let mut modified = diag.to_vec();
    modified[0] = diag[0] - gamma;
    modified[n - 1] = diag[n - 1] - alpha * beta / gamma;

    let inner_sub = &sub[1..];
    let inner_sup = &sup[..n - 1];

    let x = solve_tridiagonal(inner_sub, &modified, inner_sup, rhs)?;

    let mut u = vec![0.0; n];
    u[0] = gamma;
    u[n - 1] = beta;
    let z = solve_tridiagonal(inner_sub, &modified, inner_sup, &u)?;

    let numer = x[0] + alpha * x[n - 1] / gamma;
    let denom = 1.0 + z[0] + alpha * z[n - 1] / gamma;
    if denom.abs() < SINGULAR_EPS {
        return Err(CurveFitError::Singular);
    }
    let factor = numer / denom;

    Ok(x.iter().zip(&z).map(|(xi, zi)| xi - factor * zi).collect())
}

/// Akima segment coefficients. Knot slopes are the classic weighted average
/// of neighboring segment slopes:
///
///   s_i = (w1 m_{i-1} + w2 m_i) / (w1 + w2)
///   w1 = |m_{i+1} - m_i|, w2 = |m_{i-1} - m_{i-2}|
///
/// falling back to the plain average when both weights vanish (locally
/// linear data). Open ends extend the slope sequence by quadratic
/// extrapolation; periodic fits wrap it around the seam instead.
fn akima_coefficients(values: &[f64], h: &[f64], periodic: bool) -> Vec<[f64; 4]> {
    let segments = h.len();
    let slopes: Vec<f64> = (0..segments)
        .map(|i| (values[i + 1] - values[i]) / h[i])
        .collect();

    let knot_count = values.len();
    let mut knot_slopes = Vec::with_capacity(knot_count);
    if periodic {
        // Slope ring indexed modulo the segment count.
        let ring = |i: isize| slopes[(i.rem_euclid(segments as isize)) as usize];
        for i in 0..segments as isize {
            knot_slopes.push(akima_slope(
                ring(i - 2),
                ring(i - 1),
                ring(i),
                ring(i + 1),
            ));
        }
        knot_slopes.push(knot_slopes[0]);
    } else if segments == 1 {
        knot_slopes = vec![slopes[0]; 2];
    } else {
        // Two ghost slopes on each side, by quadratic extrapolation.
        let mut ext = Vec::with_capacity(segments + 4);
        ext.push(0.0);
        ext.push(0.0);
        ext.extend_from_slice(&slopes);
        ext[1] = 2.0 * ext[2] - ext[3];
        ext[0] = 2.0 * ext[1] - ext[2];
        ext.push(2.0 * ext[segments + 1] - ext[segments]);
        ext.push(2.0 * ext[segments + 2] - ext[segments + 1]);
        for i in 0..knot_count {
            knot_slopes.push(akima_slope(ext[i], ext[i + 1], ext[i + 2], ext[i + 3]));
        }
    }

    // Cubic Hermite coefficients per segment.
    let mut coeffs = Vec::with_capacity(segments);
    for i in 0..segments {
        let d = slopes[i];
        let s0 = knot_slopes[i];
        let s1 = knot_slopes[i + 1];
        let hi = h[i];
        coeffs.push([
            values[i],
            s0,
            (3.0 * d - 2.0 * s0 - s1) / hi,
            (s0 + s1 - 2.0 * d) / (hi * hi),
        ]);
    }
    coeffs
}

fn akima_slope(m_prev2: f64, m_prev: f64, m_here: f64, m_next: f64) -> f64 {
    let w1 = (m_next - m_here).abs();
    let w2 = (m_prev - m_prev2).abs();
    if w1 + w2 < f64::EPSILON {
        (m_prev + m_here) / 2.0
    } else {
        (w1 * m_prev + w2 * m_here) / (w1 + w2)
    }
}

/// Fits a smooth curve through a waypoint sequence and samples it densely.
#[derive(Debug, Clone)]
pub struct CurveFitter {
    kind: SplineKind,
    samples: usize,
}

impl Default for CurveFitter {
    fn default() -> Self {
        Self {
            kind: SplineKind::default(),
            samples: CURVE_SAMPLES,
        }
    }
}

impl CurveFitter {
    pub fn new(kind: SplineKind) -> Self {
        Self {
            kind,
            samples: CURVE_SAMPLES,
        }
    }

    /// Override the sample count (at least 2).
    pub fn with_samples(mut self, samples: usize) -> Self {
        assert!(samples >= 2);
        self.samples = samples;
        self
    }

    pub fn kind(&self) -> SplineKind {
        self.kind
    }

    /// Fit the committed waypoints.
    pub fn fit(&self, track: &WaypointSequence) -> Result<Curve, CurveFitError> {
        self.fit_with_preview(track, None)
    }

    /// Fit the committed waypoints plus a live preview point. The preview
    /// point is treated as one ordinary additional point; it is ignored
    /// when the loop is already closed.
    pub fn fit_with_preview(
        &self,
        track: &WaypointSequence,
        preview: Option<Point>,
    ) -> Result<Curve, CurveFitError> {
        let points = track.points_with_preview(preview);
        let n = points.len();
        if n < 2 {
            return Err(CurveFitError::NotEnoughPoints { count: n });
        }

        // A sequence that happens to end on its first point is fitted as a
        // loop even when it was never explicitly closed.
        let closed = track.is_closed() || (n >= 3 && coincident(&points[0], &points[n - 1]));

        let params: Vec<f64> = if closed {
            (0..n).map(|i| i as f64 / (n - 1) as f64).collect()
        } else {
            (0..n).map(|i| i as f64).collect()
        };
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();

        let spline_x = fit_axis(self.kind, &params, &xs, closed)?;
        let spline_y = fit_axis(self.kind, &params, &ys, closed)?;

        let (t0, t1) = spline_x.domain();
        let step = (t1 - t0) / (self.samples - 1) as f64;
        let samples = (0..self.samples)
            .map(|j| {
                // Pin the final sample to the domain end so the last
                // waypoint is reproduced exactly.
                let t = if j + 1 == self.samples {
                    t1
                } else {
                    t0 + step * j as f64
                };
                Point::new(spline_x.eval(t), spline_y.eval(t))
            })
            .collect();
        Ok(Curve::new(samples, closed))
    }
}

fn coincident(a: &Point, b: &Point) -> bool {
    (a.x - b.x).abs() <= 1e-8 && (a.y - b.y).abs() <= 1e-8
}
