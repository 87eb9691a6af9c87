//! Framework-agnostic drivetrain component models.
//!
//! Pure Rust library with no engine dependencies.  Provides the rotating
//! body primitive, torque-curve motor, geared clutch transmission,
//! traction-limited tire, and PID control.
//!
//! # Torque Pipeline
//!
//! ```text
//! Throttle → Motor → Gearbox → Tire → Drive Force
//!            (curve)  (ratio,   (traction
//!                     clutch)    limit)
//! ```
//!
//! # Quick Start
//!
//! ```
//! use driveline_core::Environment;
//! use driveline_drivetrain::prelude::*;
//!
//! let env = Environment::default();
//! let mut motor = Motor::new(&env);
//! let mut gearbox = Gearbox::new(&env);
//! let tire = Tire::new(&env);
//!
//! motor.set_throttle(1.0).unwrap();
//! gearbox.set_gear(Gear::Forward(1)).unwrap();
//!
//! let crank_torque = motor.output_torque(3000.0).unwrap();
//! let axle_torque = gearbox.axle_torque(crank_torque).unwrap();
//! let drive_force = tire.force(axle_torque);
//! assert!(drive_force > 0.0);
//! ```

pub mod control;
pub mod curve;
pub mod gearbox;
pub mod motor;
pub mod presets;
pub mod spinner;
pub mod tire;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::control::{PidController, PidGains, PidParam, ZieglerNichols};
    pub use crate::curve::TorqueCurve;
    pub use crate::gearbox::{Gear, Gearbox, MatchStatus, RevMatch};
    pub use crate::motor::Motor;
    pub use crate::presets;
    pub use crate::spinner::Spinner;
    pub use crate::tire::Tire;
}
