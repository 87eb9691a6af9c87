//! Torque-curve motor with throttle modulation and engine braking.
//!
//! All of the motor's rotating mass is represented as one flywheel
//! spinner; a `fixed_mass` accounts for the non-rotating block.
//!
//! # Physics
//!
//! - Open throttle: `T = curve(rpm) × throttle`.
//! - Closed throttle above `1.5 × idle`: engine braking — a negative
//!   fraction of curve torque ramping linearly with RPM up to
//!   [`ENGINE_BRAKING`] at redline.
//! - Crank alpha folds flywheel friction into the applied torque.

use driveline_core::environment::Environment;
use driveline_core::error::{MotorError, RangeError};
use driveline_core::units;

use crate::curve::TorqueCurve;
use crate::spinner::Spinner;

/// Throttle at or below this is treated as closed.
pub const CLOSED_THROTTLE: f64 = 0.01;

/// Engine-braking ceiling: fraction of curve torque at redline.
pub const ENGINE_BRAKING: f64 = 0.2;

// ---------------------------------------------------------------------------
// Motor
// ---------------------------------------------------------------------------

/// Throttle-modulated torque-curve motor.
#[derive(Clone, Debug)]
pub struct Motor {
    env: Environment,
    curve: TorqueCurve,
    spinner: Spinner,
    throttle: f64,
    /// Starter torque (Nm) available during ignition.
    pub starter_torque: f64,
    /// Non-rotating mass (kg): block, head, accessories.
    pub fixed_mass: f64,
}

impl Motor {
    /// Create a motor with the stock torque curve.
    pub fn new(env: &Environment) -> Self {
        Self::with_curve(env, TorqueCurve::stock())
    }

    /// Create a motor with a caller-supplied torque curve.
    pub fn with_curve(env: &Environment, curve: TorqueCurve) -> Self {
        let spinner = Spinner::new(env)
            .with_radius(0.25)
            .with_mass(75.0)
            .with_base_friction(1.0 / 1000.0)
            .with_omega_friction(5.0 / 100_000.0);
        Self {
            env: *env,
            curve,
            spinner,
            throttle: 0.0,
            starter_torque: 500.0,
            fixed_mass: 125.0,
        }
    }

    /// The environment this motor was built against.
    pub const fn env(&self) -> &Environment {
        &self.env
    }

    /// The torque curve.
    pub const fn curve(&self) -> &TorqueCurve {
        &self.curve
    }

    /// The crank/flywheel spinner.
    pub const fn spinner(&self) -> &Spinner {
        &self.spinner
    }

    /// Mutable access to the crank spinner, for configuration.
    pub const fn spinner_mut(&mut self) -> &mut Spinner {
        &mut self.spinner
    }

    /// Current throttle in `[0, 1]`.
    #[must_use]
    pub const fn throttle(&self) -> f64 {
        self.throttle
    }

    /// Set the throttle.  Rejects values outside `[0, 1]`.
    pub fn set_throttle(&mut self, value: f64) -> Result<(), RangeError> {
        self.throttle = units::unit_interval(value)?;
        Ok(())
    }

    /// Idle RPM from the curve's landmark convention.
    #[must_use]
    pub fn idle(&self) -> f64 {
        self.curve.idle()
    }

    /// Redline RPM from the curve's landmark convention.
    #[must_use]
    pub fn redline(&self) -> f64 {
        self.curve.redline()
    }

    /// Crank rotational inertia (kg·m²).
    #[must_use]
    pub fn inertia(&self) -> f64 {
        self.spinner.rotational_inertia()
    }

    /// Crank kinetic energy at `omega`.
    #[must_use]
    pub fn energy(&self, omega: f64) -> f64 {
        self.spinner.energy(omega)
    }

    /// Crank friction torque at `omega`.
    #[must_use]
    pub fn friction(&self, omega: f64) -> f64 {
        self.spinner.rotating_friction(omega)
    }

    /// Total mass: flywheel plus fixed mass.
    #[must_use]
    pub fn mass(&self) -> f64 {
        self.spinner.mass() + self.fixed_mass
    }

    /// Rotating mass only.
    #[must_use]
    pub fn rotating_mass(&self) -> f64 {
        self.spinner.mass()
    }

    /// Requested torque (Nm) at `rpm` under the current throttle.
    ///
    /// `Stall` below the curve minimum, `OverRev` above the maximum.
    pub fn torque(&self, rpm: f64) -> Result<f64, MotorError> {
        let curve_torque = match self.curve.torque(rpm) {
            Ok(t) => t,
            Err(_) if rpm < self.curve.min_rpm() => return Err(MotorError::Stall { rpm }),
            Err(_) => return Err(MotorError::OverRev { rpm }),
        };

        if self.throttle <= CLOSED_THROTTLE && rpm > self.curve.idle() * 1.5 {
            // Engine braking, strongest near redline.
            let fraction = ENGINE_BRAKING * (rpm / self.curve.redline()).min(1.0);
            Ok(-curve_torque * fraction)
        } else {
            Ok(curve_torque * self.throttle)
        }
    }

    /// Crank angular acceleration from an applied torque, folding in
    /// flywheel friction at `omega`.
    #[must_use]
    pub fn alpha(&self, torque: f64, omega: f64) -> f64 {
        self.spinner
            .alpha(torque + self.spinner.rotating_friction(omega), 0.0)
    }

    /// Torque implied by a crank acceleration.
    #[must_use]
    pub fn implied_torque(&self, alpha: f64) -> f64 {
        self.spinner.implied_torque(alpha)
    }

    /// Torque actually delivered at the crank after friction and inertia
    /// bookkeeping — distinct from the raw curve lookup.
    pub fn output_torque(&self, rpm: f64) -> Result<f64, MotorError> {
        let requested = self.torque(rpm)?;
        Ok(self.implied_torque(self.alpha(requested, units::omega(rpm))))
    }
}

impl std::fmt::Display for Motor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (peak_rpm, peak_torque) = self.curve.peak();
        writeln!(
            f,
            "Peak Torque: {peak_torque:.0} Nm @ {peak_rpm:.0} RPM  Redline: {:.0}",
            self.curve.redline()
        )?;
        writeln!(
            f,
            "   Throttle: {:.1}%  Mass: {:.1} kg  ({:.0} kg fixed)",
            self.throttle * 100.0,
            self.mass(),
            self.fixed_mass
        )?;
        write!(f, "   Rotating: {}", self.spinner)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn motor() -> Motor {
        Motor::new(&Environment::default())
    }

    #[test]
    fn default_flywheel_mass() {
        let m = motor();
        assert!((m.rotating_mass() - 75.0).abs() < 1e-9);
        assert!((m.mass() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn throttle_rejects_out_of_range() {
        let mut m = motor();
        assert!(m.set_throttle(1.5).is_err());
        assert!(m.set_throttle(-0.1).is_err());
        assert!((m.throttle()).abs() < f64::EPSILON);
        m.set_throttle(0.7).unwrap();
        assert!((m.throttle() - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn torque_scales_with_throttle() {
        let mut m = motor();
        m.set_throttle(1.0).unwrap();
        let full = m.torque(2500.0).unwrap();
        assert!((full - 250.0).abs() < 1e-9);
        m.set_throttle(0.5).unwrap();
        let half = m.torque(2500.0).unwrap();
        assert!((half - 125.0).abs() < 1e-9);
    }

    #[test]
    fn stall_below_curve_minimum() {
        let m = motor();
        assert!(matches!(
            m.torque(400.0),
            Err(MotorError::Stall { .. })
        ));
    }

    #[test]
    fn over_rev_above_curve_maximum() {
        let m = motor();
        assert!(matches!(
            m.torque(7200.0),
            Err(MotorError::OverRev { .. })
        ));
    }

    #[test]
    fn engine_braking_above_idle_threshold() {
        let m = motor(); // throttle 0.0
        let braking = m.torque(3000.0).unwrap();
        assert!(braking < 0.0);
    }

    #[test]
    fn engine_braking_grows_with_rpm() {
        let m = motor();
        // |T| at 6000 should exceed |T| at 3000 both from the curve shape
        // and from the RPM-ramped braking fraction.
        let low = m.torque(3000.0).unwrap();
        let high = m.torque(6000.0).unwrap();
        assert!(high < low && low < 0.0);
    }

    #[test]
    fn engine_braking_fraction_caps_at_ceiling() {
        let m = motor();
        // At redline the fraction is exactly ENGINE_BRAKING.
        let t = m.torque(7000.0).unwrap();
        assert!((t - (-260.0 * ENGINE_BRAKING)).abs() < 1e-9);
    }

    #[test]
    fn no_engine_braking_near_idle() {
        let m = motor(); // throttle 0.0, rpm below idle * 1.5
        let t = m.torque(1200.0).unwrap();
        assert!((t).abs() < f64::EPSILON);
    }

    #[test]
    fn idle_and_redline_from_curve() {
        let m = motor();
        assert!((m.idle() - 1000.0).abs() < f64::EPSILON);
        assert!((m.redline() - 7000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn alpha_folds_in_friction() {
        let m = motor();
        // Friction opposes rotation, so alpha at speed is lower than at rest.
        let at_rest = m.alpha(100.0, 0.0);
        let at_speed = m.alpha(100.0, 300.0);
        assert!(at_speed < at_rest);
    }

    #[test]
    fn output_torque_below_requested() {
        let mut m = motor();
        m.set_throttle(1.0).unwrap();
        let requested = m.torque(3000.0).unwrap();
        let output = m.output_torque(3000.0).unwrap();
        assert!(output < requested);
        assert!(output > 0.0);
    }

    #[test]
    fn starter_torque_spins_crank_from_rest() {
        let m = motor();
        let alpha = m.alpha(m.starter_torque, 0.0);
        assert!(alpha > 0.0);
    }

    #[test]
    fn display_shows_peak_and_throttle() {
        let out = motor().to_string();
        assert!(out.contains("330 Nm"));
        assert!(out.contains("Throttle: 0.0%"));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn motor_is_send_sync() {
        assert_send_sync::<Motor>();
    }
}
