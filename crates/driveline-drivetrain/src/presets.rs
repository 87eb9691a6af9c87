//! Common component presets.

use driveline_core::environment::Environment;

use crate::curve::TorqueCurve;
use crate::gearbox::Gearbox;
use crate::tire::Tire;

/// Torque curve presets.
pub mod curves {
    use super::TorqueCurve;

    /// The stock curve: idle 1000 RPM, redline 7000 RPM, 330 Nm peak.
    #[must_use]
    pub fn stock() -> TorqueCurve {
        TorqueCurve::stock()
    }

    /// A small high-revving four: idle 1100 RPM, redline 7800 RPM.
    #[must_use]
    pub fn compact_four() -> TorqueCurve {
        TorqueCurve::new(
            vec![
                700.0, 1100.0, 1800.0, 2600.0, 3600.0, 4800.0, 6200.0, 7800.0, 8000.0,
            ],
            vec![0.0, 60.0, 95.0, 130.0, 150.0, 160.0, 150.0, 120.0, 0.0],
        )
        .expect("compact four torque curve tables are valid")
    }
}

/// Gearbox presets.
pub mod gearboxes {
    use super::{Environment, Gearbox};

    /// The stock six-speed.
    #[must_use]
    pub fn six_speed(env: &Environment) -> Gearbox {
        Gearbox::new(env)
    }

    /// A wide-ratio four-speed.
    #[must_use]
    pub fn four_speed(env: &Environment) -> Gearbox {
        Gearbox::new(env)
            .with_ratios(vec![0.25, 0.5, 0.75, 1.0])
            .expect("four speed ratio table is valid")
    }
}

/// Tire compound presets.
///
/// Dry pavement coefficients run roughly 1.0–1.3 static and 0.2–0.8
/// kinetic; wet pavement roughly 0.2–0.8 and 0.05–0.5.
pub mod tires {
    use super::{Environment, Tire};

    /// Street compound (the defaults).
    #[must_use]
    pub fn street(env: &Environment) -> Tire {
        Tire::new(env)
    }

    /// Racing slick: more grip, bigger static/kinetic gap.
    #[must_use]
    pub fn slick(env: &Environment) -> Tire {
        Tire::new(env).with_friction(1.3, 0.8)
    }

    /// Street compound in the wet.
    #[must_use]
    pub fn wet(env: &Environment) -> Tire {
        Tire::new(env)
            .with_friction(0.6, 0.4)
            .with_rolling_cof(0.012)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
