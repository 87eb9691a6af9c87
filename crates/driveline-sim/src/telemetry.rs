//! Per-tick telemetry: the force breakdown and a read-only snapshot of
//! car state for display layers.

use driveline_drivetrain::gearbox::Gear;

use crate::car::Phase;

// ---------------------------------------------------------------------------
// ForceBreakdown
// ---------------------------------------------------------------------------

/// Longitudinal forces (N) from the last tick.  Resistance terms carry
/// their sign (opposing motion), so `total()` is the plain sum.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ForceBreakdown {
    /// Traction-limited drive force.
    pub drive: f64,
    /// Aerodynamic drag.
    pub air: f64,
    /// Tire rolling resistance.
    pub rolling: f64,
    /// Tire rotational friction.
    pub rotational: f64,
    /// Tire rotational-inertia loss.
    pub inertial: f64,
}

impl ForceBreakdown {
    /// Net longitudinal force.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.drive + self.air + self.rolling + self.rotational + self.inertial
    }

    /// Total resistance (everything except drive).
    #[must_use]
    pub fn resistance(&self) -> f64 {
        self.air + self.rolling + self.rotational + self.inertial
    }
}

// ---------------------------------------------------------------------------
// Telemetry
// ---------------------------------------------------------------------------

/// Read-only snapshot of car state after a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Telemetry {
    pub tick: u64,
    pub phase: Phase,
    pub rpm: f64,
    pub gear: Gear,
    pub clutch: f64,
    pub throttle: f64,
    pub position: f64,
    pub velocity: f64,
    pub acceleration: f64,
    pub wheel_omega: f64,
    pub forces: ForceBreakdown,
    pub lurches: u64,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_plain_sum() {
        let forces = ForceBreakdown {
            drive: 1000.0,
            air: -100.0,
            rolling: -50.0,
            rotational: -10.0,
            inertial: -40.0,
        };
        assert!((forces.total() - 800.0).abs() < 1e-12);
        assert!((forces.resistance() - (-200.0)).abs() < 1e-12);
    }

    #[test]
    fn default_is_zeroed() {
        let forces = ForceBreakdown::default();
        assert!((forces.total()).abs() < f64::EPSILON);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn telemetry_is_send_sync() {
        assert_send_sync::<ForceBreakdown>();
        assert_send_sync::<Telemetry>();
    }
}
