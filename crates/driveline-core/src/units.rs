//! Angular and kinematic unit math.
//!
//! Rotational complements to acceleration/velocity/position:
//! - alpha — angular acceleration (rad/s²)
//! - omega — angular velocity (rad/s)
//! - theta — angle (rad)
//!
//! Radius is always meters, force Newtons, torque Newton-meters.

use std::f64::consts::TAU;

use crate::error::RangeError;

pub const SECS_PER_MIN: f64 = 60.0;
pub const MINS_PER_HOUR: f64 = 60.0;
pub const SECS_PER_HOUR: f64 = SECS_PER_MIN * MINS_PER_HOUR;

/// Convert radians to revolutions; works for alpha/omega/theta.
#[must_use]
pub fn revs(rads: f64) -> f64 {
    rads / TAU
}

/// Convert revolutions to radians; works for alpha/omega/theta.
#[must_use]
pub fn rads(revs: f64) -> f64 {
    revs * TAU
}

/// Convert RPM to angular velocity (rad/s).
#[must_use]
pub fn omega(rpm: f64) -> f64 {
    rads(rpm / SECS_PER_MIN)
}

/// Convert angular velocity (rad/s) to RPM.
#[must_use]
pub fn rpm(omega: f64) -> f64 {
    revs(omega) * SECS_PER_MIN
}

/// Convert meters per second to kilometers per hour.
#[must_use]
pub fn kph(mps: f64) -> f64 {
    mps * SECS_PER_HOUR / 1000.0
}

/// Acceleration from force and mass (F = ma).
#[must_use]
pub fn acc(force: f64, mass: f64) -> f64 {
    force / mass
}

/// Work from force applied over a displacement (or torque over an angle).
#[must_use]
pub fn work(force: f64, displacement: f64) -> f64 {
    force * displacement
}

/// Power from force at a speed (or torque at an angular velocity).
#[must_use]
pub fn power(force: f64, speed: f64) -> f64 {
    force * speed
}

/// Validate a value in `[0, 1]` (throttle, clutch).
pub fn unit_interval(value: f64) -> Result<f64, RangeError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(RangeError::UnitInterval(value))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
