//! Motor + gearbox aggregate.
//!
//! Focused on operations that involve both components; for anything
//! else it provides direct access to each.

use driveline_core::error::{DrivelineError, GearboxError};
use driveline_core::units;
use driveline_drivetrain::gearbox::{Gear, Gearbox};
use driveline_drivetrain::motor::Motor;

// ---------------------------------------------------------------------------
// PowertrainOutput
// ---------------------------------------------------------------------------

/// Axle-side output for a given crank RPM.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowertrainOutput {
    /// Power (W): torque × omega.
    pub power: f64,
    /// Axle torque (Nm).
    pub torque: f64,
    /// Axle angular velocity (rad/s).
    pub omega: f64,
}

// ---------------------------------------------------------------------------
// Powertrain
// ---------------------------------------------------------------------------

/// A motor bolted to a gearbox.
#[derive(Clone, Debug)]
pub struct Powertrain {
    pub motor: Motor,
    pub gearbox: Gearbox,
}

impl Powertrain {
    /// Combine a motor and a gearbox.
    pub const fn new(motor: Motor, gearbox: Gearbox) -> Self {
        Self { motor, gearbox }
    }

    /// Combined mass (kg).
    #[must_use]
    pub fn mass(&self) -> f64 {
        self.motor.mass() + self.gearbox.mass()
    }

    /// Select a gear.
    pub fn select_gear(&mut self, gear: Gear) -> Result<(), GearboxError> {
        self.gearbox.set_gear(gear)
    }

    /// Axle torque (Nm) delivered for a crank RPM, after motor and
    /// transmission friction/inertia bookkeeping.
    ///
    /// `axle_omega` is the previous axle speed, required once the clutch
    /// leaves full engagement.
    pub fn axle_torque(
        &self,
        rpm: f64,
        axle_omega: Option<f64>,
    ) -> Result<f64, DrivelineError> {
        let crank_torque = self.motor.output_torque(rpm)?;
        Ok(self.gearbox.output_torque(crank_torque, rpm, axle_omega)?)
    }

    /// Axle angular velocity for a crank RPM (clutch-blended).
    pub fn axle_omega(&self, rpm: f64, previous: Option<f64>) -> Result<f64, GearboxError> {
        self.gearbox.axle_omega(rpm, previous)
    }

    /// Crank RPM implied by an axle angular velocity (clutch-blended).
    pub fn crank_rpm(
        &self,
        axle_omega: f64,
        previous: Option<f64>,
    ) -> Result<f64, GearboxError> {
        self.gearbox.crank_rpm(axle_omega, previous)
    }

    /// Power, torque, and omega at the axle for a crank RPM.
    pub fn output(
        &self,
        rpm: f64,
        axle_omega: Option<f64>,
    ) -> Result<PowertrainOutput, DrivelineError> {
        let torque = self.axle_torque(rpm, axle_omega)?;
        let omega = self.axle_omega(rpm, axle_omega)?;
        Ok(PowertrainOutput {
            power: units::power(torque, omega),
            torque,
            omega,
        })
    }
}

impl std::fmt::Display for Powertrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\t[MOTOR]")?;
        writeln!(f, "{}", self.motor)?;
        writeln!(f, "\t[GEARBOX]")?;
        write!(f, "{}", self.gearbox)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
