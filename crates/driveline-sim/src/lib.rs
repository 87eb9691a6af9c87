//! Drivetrain orchestration: the powertrain aggregate and the car-level
//! tick loop with its ignition → running → off-throttle → idling state
//! machine.
//!
//! Each tick is a pure function of the previous tick's state plus the
//! environment constants — single-threaded, synchronous, deterministic.

pub mod car;
pub mod powertrain;
pub mod telemetry;

pub use car::{Car, Phase};
pub use powertrain::{Powertrain, PowertrainOutput};
pub use telemetry::{ForceBreakdown, Telemetry};
