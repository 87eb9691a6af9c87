//! Piecewise-linear torque curve with a validated, strictly increasing
//! RPM axis.
//!
//! The table is authored by convention: the second point is idle, the
//! second-to-last is redline, and both boundary torques are exactly zero.
//! Validation happens eagerly at construction — a bad table never reaches
//! the simulation loop.

use driveline_core::error::CurveError;

/// Stock RPM axis (landmarks by index: min, idle, ..., redline, max).
pub const STOCK_RPMS: [f64; 10] = [
    500.0, 1000.0, 1500.0, 2000.0, 2500.0, 3500.0, 5000.0, 6000.0, 7000.0, 7100.0,
];

/// Stock torque values (Nm), zero at both boundaries.
pub const STOCK_TORQUES: [f64; 10] = [
    0.0, 70.0, 130.0, 200.0, 250.0, 320.0, 330.0, 320.0, 260.0, 0.0,
];

// ---------------------------------------------------------------------------
// Interpolation
// ---------------------------------------------------------------------------

/// Linear interpolation over parallel tables.
///
/// `x` exactly on a table point returns that point's `y` exactly.
/// The `xs` axis must be strictly increasing; a violation is reported at
/// the offending index.
pub fn interpolate(x: f64, xs: &[f64], ys: &[f64]) -> Result<f64, CurveError> {
    if xs.len() != ys.len() {
        return Err(CurveError::LengthMismatch {
            rpms: xs.len(),
            torques: ys.len(),
        });
    }
    let (Some(&min), Some(&max)) = (xs.first(), xs.last()) else {
        return Err(CurveError::TooFewPoints(0));
    };
    if x < min || x > max {
        return Err(CurveError::OutOfBounds { value: x, min, max });
    }

    for (i, &xi) in xs.iter().enumerate() {
        if x == xi {
            return Ok(ys[i]);
        }
        if i > 0 {
            let (last_x, last_y) = (xs[i - 1], ys[i - 1]);
            if xi <= last_x {
                return Err(CurveError::NonMonotonic(i));
            }
            if x <= xi {
                let proportion = (x - last_x) / (xi - last_x);
                return Ok((ys[i] - last_y).mul_add(proportion, last_y));
            }
        }
    }
    // Unreachable: x is within [min, max] and the scan covers every segment.
    Err(CurveError::OutOfBounds { value: x, min, max })
}

// ---------------------------------------------------------------------------
// TorqueCurve
// ---------------------------------------------------------------------------

/// Immutable RPM → torque lookup table.
#[derive(Clone, Debug, PartialEq)]
pub struct TorqueCurve {
    rpms: Vec<f64>,
    torques: Vec<f64>,
    peak: usize,
}

impl Default for TorqueCurve {
    fn default() -> Self {
        Self::stock()
    }
}

impl TorqueCurve {
    /// Build a curve from parallel RPM/torque tables.
    ///
    /// Validation: equal lengths of at least 2, non-negative strictly
    /// increasing RPMs, non-negative torques, zero torque at both
    /// boundaries.
    pub fn new(rpms: Vec<f64>, torques: Vec<f64>) -> Result<Self, CurveError> {
        if rpms.len() != torques.len() {
            return Err(CurveError::LengthMismatch {
                rpms: rpms.len(),
                torques: torques.len(),
            });
        }
        if rpms.len() < 2 {
            return Err(CurveError::TooFewPoints(rpms.len()));
        }
        for (i, &r) in rpms.iter().enumerate() {
            if r < 0.0 {
                return Err(CurveError::NegativeRpm(r));
            }
            if i > 0 && r <= rpms[i - 1] {
                return Err(CurveError::NonMonotonic(i));
            }
        }
        for &t in &torques {
            if t < 0.0 {
                return Err(CurveError::NegativeTorque(t));
            }
        }
        for &boundary in &[torques[0], torques[torques.len() - 1]] {
            if boundary != 0.0 {
                return Err(CurveError::NonzeroBoundary(boundary));
            }
        }

        // First occurrence of the maximum torque.
        let mut peak = 0;
        for (i, &t) in torques.iter().enumerate() {
            if t > torques[peak] {
                peak = i;
            }
        }

        Ok(Self { rpms, torques, peak })
    }

    /// The stock curve (idle 1000 RPM, redline 7000 RPM, 330 Nm peak).
    #[must_use]
    pub fn stock() -> Self {
        Self::new(STOCK_RPMS.to_vec(), STOCK_TORQUES.to_vec())
            .expect("stock torque curve tables are valid")
    }

    /// Lowest mapped RPM.
    #[must_use]
    pub fn min_rpm(&self) -> f64 {
        self.rpms[0]
    }

    /// Idle RPM (second table point, by authoring convention).
    #[must_use]
    pub fn idle(&self) -> f64 {
        self.rpms[1]
    }

    /// Redline RPM (second-to-last table point, by authoring convention).
    #[must_use]
    pub fn redline(&self) -> f64 {
        self.rpms[self.rpms.len() - 2]
    }

    /// Highest mapped RPM.
    #[must_use]
    pub fn max_rpm(&self) -> f64 {
        self.rpms[self.rpms.len() - 1]
    }

    /// `(rpm, torque)` at peak torque; first occurrence on ties.
    #[must_use]
    pub fn peak(&self) -> (f64, f64) {
        (self.rpms[self.peak], self.torques[self.peak])
    }

    /// Number of table points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rpms.len()
    }

    /// Always `false` for a validated curve (`len >= 2`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rpms.is_empty()
    }

    /// The RPM axis.
    #[must_use]
    pub fn rpms(&self) -> &[f64] {
        &self.rpms
    }

    /// The torque values.
    #[must_use]
    pub fn torques(&self) -> &[f64] {
        &self.torques
    }

    /// Interpolated torque (Nm) at `rpm`.  Out-of-domain is an error.
    pub fn torque(&self, rpm: f64) -> Result<f64, CurveError> {
        interpolate(rpm, &self.rpms, &self.torques)
    }
}

impl std::fmt::Display for TorqueCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, r) in self.rpms.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:>5} RPM {:>4} Nm", r, self.torques[i])?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
