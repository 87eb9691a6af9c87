//! Discrete PID control with independently clamped terms.
//!
//! Implemented in-house (no external `pid` crate dependency) for minimal
//! footprint and full control over the implementation.
//!
//! Control-loop vocabulary:
//! - SP — setpoint, the desired value.
//! - PV — process variable, the measured value.
//! - e — error, `SP − PV`.
//! - CV — control variable, the controller output.
//!
//! For example: where to set the throttle (CV) to hold 1000 RPM (SP)
//! given the sensed RPM (PV).
//!
//! # Anti-windup
//!
//! Whenever the error crosses zero (or either side is exactly zero), the
//! integral accumulator is *reset* to the current `error × dt` rather
//! than decayed — accumulated error from before the crossing never
//! carries across it.

use driveline_core::error::ControlError;

/// Default controller rate (Hz) when none is supplied.
pub const HZ: u32 = 1000;

/// An unbounded clamp range.
const UNBOUNDED: (f64, f64) = (f64::NEG_INFINITY, f64::INFINITY);

// ---------------------------------------------------------------------------
// PidController
// ---------------------------------------------------------------------------

/// Discrete PID controller with per-term and output clamps.
#[derive(Clone, Debug)]
pub struct PidController {
    /// Desired process value.
    pub setpoint: f64,
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain.
    pub ki: f64,
    /// Derivative gain.
    pub kd: f64,
    dt: f64,
    measure: f64,
    error: f64,
    last_error: f64,
    sum_error: f64,
    p_range: (f64, f64),
    i_range: (f64, f64),
    d_range: (f64, f64),
    o_range: (f64, f64),
}

impl PidController {
    /// Create a controller for `setpoint` at timestep `dt` seconds.
    ///
    /// Gains default to 1.0; all clamps default to unbounded.
    pub fn new(setpoint: f64, dt: f64) -> Self {
        Self {
            setpoint,
            kp: 1.0,
            ki: 1.0,
            kd: 1.0,
            dt,
            measure: 0.0,
            error: 0.0,
            last_error: 0.0,
            sum_error: 0.0,
            p_range: UNBOUNDED,
            i_range: UNBOUNDED,
            d_range: UNBOUNDED,
            o_range: UNBOUNDED,
        }
    }

    /// Set all three gains.
    #[must_use]
    pub const fn with_gains(mut self, kp: f64, ki: f64, kd: f64) -> Self {
        self.kp = kp;
        self.ki = ki;
        self.kd = kd;
        self
    }

    /// Clamp the proportional term.
    #[must_use]
    pub const fn with_p_range(mut self, min: f64, max: f64) -> Self {
        self.p_range = (min, max);
        self
    }

    /// Clamp the integral term.
    #[must_use]
    pub const fn with_i_range(mut self, min: f64, max: f64) -> Self {
        self.i_range = (min, max);
        self
    }

    /// Clamp the derivative term.
    #[must_use]
    pub const fn with_d_range(mut self, min: f64, max: f64) -> Self {
        self.d_range = (min, max);
        self
    }

    /// Clamp the final output.
    #[must_use]
    pub const fn with_output_range(mut self, min: f64, max: f64) -> Self {
        self.o_range = (min, max);
        self
    }

    /// The controller timestep (seconds).
    #[must_use]
    pub const fn dt(&self) -> f64 {
        self.dt
    }

    /// Last measured process value.
    #[must_use]
    pub const fn measure(&self) -> f64 {
        self.measure
    }

    /// Current error (`setpoint − measure`).
    #[must_use]
    pub const fn error(&self) -> f64 {
        self.error
    }

    /// Error from the previous update.
    #[must_use]
    pub const fn last_error(&self) -> f64 {
        self.last_error
    }

    /// Integral accumulator (`Σ error × dt` since the last crossing).
    #[must_use]
    pub const fn sum_error(&self) -> f64 {
        self.sum_error
    }

    /// Feed a measurement and return the control output.
    pub fn update(&mut self, measure: f64) -> f64 {
        self.measure = measure;
        self.last_error = self.error;
        self.error = self.setpoint - self.measure;

        let dt_error = self.error * self.dt;
        if self.error * self.last_error > 0.0 {
            self.sum_error += dt_error;
        } else {
            // Zero crossing: drop the accumulated error.
            self.sum_error = dt_error;
        }

        self.output()
    }

    /// Clamped sum of the three terms, clamped again to the output range.
    #[must_use]
    pub fn output(&self) -> f64 {
        clamp(
            self.proportion() + self.integral() + self.derivative(),
            self.o_range,
        )
    }

    /// Clamped proportional term.
    #[must_use]
    pub fn proportion(&self) -> f64 {
        clamp(self.kp * self.error, self.p_range)
    }

    /// Clamped integral term.
    #[must_use]
    pub fn integral(&self) -> f64 {
        clamp(self.ki * self.sum_error, self.i_range)
    }

    /// Clamped derivative term.
    #[must_use]
    pub fn derivative(&self) -> f64 {
        clamp(self.kd * (self.error - self.last_error) / self.dt, self.d_range)
    }

    /// Reset the error history without touching gains or clamps.
    pub const fn reset(&mut self) {
        self.measure = 0.0;
        self.error = 0.0;
        self.last_error = 0.0;
        self.sum_error = 0.0;
    }

    /// Enum-keyed runtime parameter dispatch, validated at one boundary.
    pub const fn set_param(&mut self, param: PidParam, value: f64) {
        match param {
            PidParam::Kp => self.kp = value,
            PidParam::Ki => self.ki = value,
            PidParam::Kd => self.kd = value,
            PidParam::Setpoint => self.setpoint = value,
            PidParam::Dt => self.dt = value,
        }
    }

    /// Apply a set of tuned gains; absent gains are left unchanged.
    pub fn apply_gains(&mut self, gains: &PidGains) {
        self.kp = gains.kp;
        if let Some(ki) = gains.ki {
            self.ki = ki;
        }
        if let Some(kd) = gains.kd {
            self.kd = kd;
        }
    }
}

impl std::fmt::Display for PidController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Setpoint: {:.3}  Measure: {:.3}",
            self.setpoint, self.measure
        )?;
        writeln!(
            f,
            "Error: {:+.3}  Last: {:+.3}  Sum: {:+.3}",
            self.error, self.last_error, self.sum_error
        )?;
        writeln!(f, " Gain: {:.3}  {:.3}  {:.3}", self.kp, self.ki, self.kd)?;
        write!(
            f,
            "  PID: {:+.3}  {:+.3}  {:+.3}",
            self.proportion(),
            self.integral(),
            self.derivative()
        )
    }
}

fn clamp(value: f64, range: (f64, f64)) -> f64 {
    value.clamp(range.0, range.1)
}

// ---------------------------------------------------------------------------
// PidParam
// ---------------------------------------------------------------------------

/// Runtime-tunable controller parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PidParam {
    Kp,
    Ki,
    Kd,
    Setpoint,
    Dt,
}

impl std::str::FromStr for PidParam {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kp" => Ok(Self::Kp),
            "ki" => Ok(Self::Ki),
            "kd" => Ok(Self::Kd),
            "setpoint" => Ok(Self::Setpoint),
            "dt" => Ok(Self::Dt),
            other => Err(ControlError::UnknownParam(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Ziegler-Nichols tuning
// ---------------------------------------------------------------------------

/// Gains produced by a [`ZieglerNichols`] rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PidGains {
    pub kp: f64,
    /// Integral time constant, when the rule defines one.
    pub ti: Option<f64>,
    /// Derivative time constant, when the rule defines one.
    pub td: Option<f64>,
    pub ki: Option<f64>,
    pub kd: Option<f64>,
}

/// Ziegler-Nichols tuning rules, from the ultimate gain `Ku` and the
/// oscillation period `Tu` observed at the stability boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ZieglerNichols {
    /// Proportional only.
    P,
    /// Proportional-integral.
    Pi,
    /// Proportional-derivative.
    Pd,
    /// Classic PID.
    Pid,
    /// Pessen integral rule.
    Pir,
    /// Some overshoot (gentler than classic PID).
    SomeOvershoot,
    /// No overshoot.
    NoOvershoot,
}

impl ZieglerNichols {
    //            Kp     Ti     Td     Ki     Kd
    //     Var:   Ku     Tu     Tu    Ku/Tu  Ku*Tu
    const TABLE: [(f64, Option<f64>, Option<f64>, Option<f64>, Option<f64>); 7] = [
        (0.500, None, None, None, None),
        (0.450, Some(0.800), None, Some(0.540), None),
        (0.800, None, Some(0.125), None, Some(0.100)),
        (0.600, Some(0.500), Some(0.125), Some(1.200), Some(0.075)),
        (0.700, Some(0.400), Some(0.150), Some(1.750), Some(0.105)),
        (0.333, Some(0.500), Some(0.333), Some(0.666), Some(0.111)),
        (0.200, Some(0.500), Some(0.333), Some(0.400), Some(0.066)),
    ];

    const fn row(self) -> (f64, Option<f64>, Option<f64>, Option<f64>, Option<f64>) {
        Self::TABLE[self as usize]
    }

    /// Compute gains from the ultimate gain and oscillation period.
    #[must_use]
    pub fn tune(self, ku: f64, tu: f64) -> PidGains {
        let (kp, ti, td, ki, kd) = self.row();
        PidGains {
            kp: kp * ku,
            ti: ti.map(|v| v * tu),
            td: td.map(|v| v * tu),
            ki: ki.map(|v| v * (ku / tu)),
            kd: kd.map(|v| v * (ku * tu)),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 0.001;

    fn p_only(kp: f64) -> PidController {
        PidController::new(1000.0, DT).with_gains(kp, 0.0, 0.0)
    }

    #[test]
    fn proportional_only() {
        let mut pid = p_only(2.0);
        let out = pid.update(900.0);
        // error 100 × kp 2 = 200
        assert!((out - 200.0).abs() < 1e-9);
    }

    #[test]
    fn integral_accumulates_between_crossings() {
        let mut pid = PidController::new(1000.0, DT).with_gains(0.0, 1.0, 0.0);
        pid.update(900.0); // error 100, first sample resets to 0.1
        pid.update(900.0); // error 100, same sign: sum 0.2
        assert!((pid.sum_error() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn zero_crossing_resets_integral() {
        let mut pid = PidController::new(1000.0, DT).with_gains(0.0, 1.0, 0.0);
        pid.update(900.0); // error +100 → sum 0.1
        pid.update(950.0); // error +50 → sum 0.15
        pid.update(1050.0); // error −50: crossing → sum = −0.05
        assert!((pid.sum_error() - (-0.05)).abs() < 1e-12);
    }

    #[test]
    fn first_sample_counts_as_crossing() {
        // last_error starts at 0, so error × last_error == 0 and the
        // accumulator starts fresh from the first sample.
        let mut pid = PidController::new(1000.0, DT).with_gains(0.0, 1.0, 0.0);
        pid.update(900.0);
        assert!((pid.sum_error() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn derivative_term() {
        let mut pid = PidController::new(1000.0, DT).with_gains(0.0, 0.0, 1.0);
        pid.update(900.0); // error 100 from 0 → derivative huge, ignore
        let out = pid.update(950.0); // error 50, delta −50 / 0.001 = −50000
        assert!((out - (-50_000.0)).abs() < 1e-6);
    }

    #[test]
    fn per_term_clamps() {
        let mut pid = PidController::new(1000.0, DT)
            .with_gains(1.0, 1.0, 1.0)
            .with_p_range(-10.0, 10.0)
            .with_i_range(-1.0, 1.0)
            .with_d_range(-5.0, 5.0);
        pid.update(0.0); // error 1000
        assert!((pid.proportion() - 10.0).abs() < f64::EPSILON);
        assert!(pid.integral() <= 1.0);
        assert!((pid.derivative() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn output_clamp() {
        let mut pid = p_only(1000.0).with_output_range(0.0, 1.0);
        let out = pid.update(0.0);
        assert!((out - 1.0).abs() < f64::EPSILON);
        let out = pid.update(2000.0);
        assert!((out).abs() < f64::EPSILON);
    }

    #[test]
    fn update_is_deterministic() {
        let mut a = PidController::new(1000.0, DT).with_gains(0.5, 0.2, 0.1);
        let mut b = a.clone();
        for m in [900.0, 940.0, 990.0, 1020.0, 1005.0] {
            assert_eq!(a.update(m).to_bits(), b.update(m).to_bits());
        }
    }

    #[test]
    fn reset_clears_history() {
        let mut pid = PidController::new(1000.0, DT);
        pid.update(900.0);
        pid.update(950.0);
        pid.reset();
        assert!((pid.error()).abs() < f64::EPSILON);
        assert!((pid.sum_error()).abs() < f64::EPSILON);
        assert!((pid.last_error()).abs() < f64::EPSILON);
    }

    #[test]
    fn set_param_dispatch() {
        let mut pid = PidController::new(1000.0, DT);
        pid.set_param(PidParam::Kp, 2.5);
        pid.set_param(PidParam::Ki, 0.5);
        pid.set_param(PidParam::Kd, 0.1);
        pid.set_param(PidParam::Setpoint, 1200.0);
        assert!((pid.kp - 2.5).abs() < f64::EPSILON);
        assert!((pid.ki - 0.5).abs() < f64::EPSILON);
        assert!((pid.kd - 0.1).abs() < f64::EPSILON);
        assert!((pid.setpoint - 1200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_parses_from_str() {
        assert_eq!("kp".parse::<PidParam>().unwrap(), PidParam::Kp);
        assert_eq!("setpoint".parse::<PidParam>().unwrap(), PidParam::Setpoint);
        assert!(matches!(
            "kq".parse::<PidParam>(),
            Err(ControlError::UnknownParam(_))
        ));
    }

    #[test]
    fn ziegler_nichols_classic_pid() {
        let gains = ZieglerNichols::Pid.tune(10.0, 2.0);
        assert!((gains.kp - 6.0).abs() < 1e-12);
        assert!((gains.ti.unwrap() - 1.0).abs() < 1e-12);
        assert!((gains.td.unwrap() - 0.25).abs() < 1e-12);
        assert!((gains.ki.unwrap() - 6.0).abs() < 1e-12);
        assert!((gains.kd.unwrap() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn ziegler_nichols_p_only() {
        let gains = ZieglerNichols::P.tune(10.0, 2.0);
        assert!((gains.kp - 5.0).abs() < 1e-12);
        assert!(gains.ki.is_none());
        assert!(gains.kd.is_none());
    }

    #[test]
    fn apply_gains_leaves_absent_untouched() {
        let mut pid = PidController::new(1000.0, DT).with_gains(1.0, 2.0, 3.0);
        pid.apply_gains(&ZieglerNichols::P.tune(10.0, 2.0));
        assert!((pid.kp - 5.0).abs() < 1e-12);
        assert!((pid.ki - 2.0).abs() < f64::EPSILON);
        assert!((pid.kd - 3.0).abs() < f64::EPSILON);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn control_types_are_send_sync() {
        assert_send_sync::<PidController>();
        assert_send_sync::<PidParam>();
        assert_send_sync::<PidGains>();
    }
}
