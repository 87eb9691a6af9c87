//! Simulation environment: physical constants and the fixed tick rate
//! shared by every component.
//!
//! Built once at startup, validated at the construction boundary, and
//! immutable afterwards.  Components receive `&Environment` in their
//! constructors and keep a copy — there are no process-wide globals.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_hz() -> u32 {
    1000
}
const fn default_gravity() -> f64 {
    9.8
}
const fn default_air_temp() -> f64 {
    25.0
}
const fn default_air_density() -> f64 {
    1.29
}
const fn default_petrol_density() -> f64 {
    0.71
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Physical constants and tick rate for a simulation run.
///
/// Units are metric throughout: m/s² for gravity, kg/m³ for air density,
/// kg/L for petrol density.  `tick()` is the fixed Euler timestep derived
/// from `hz`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Tick rate in Hz (default: 1000).
    #[serde(default = "default_hz")]
    pub hz: u32,

    /// Gravitational acceleration in m/s² (default: 9.8).
    #[serde(default = "default_gravity")]
    pub gravity: f64,

    /// Ambient air temperature in °C (default: 25).
    #[serde(default = "default_air_temp")]
    pub air_temp: f64,

    /// Air density in kg/m³ (default: 1.29).
    #[serde(default = "default_air_density")]
    pub air_density: f64,

    /// Petrol density in kg/L (default: 0.71).
    #[serde(default = "default_petrol_density")]
    pub petrol_density: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            hz: default_hz(),
            gravity: default_gravity(),
            air_temp: default_air_temp(),
            air_density: default_air_density(),
            petrol_density: default_petrol_density(),
        }
    }
}

impl Environment {
    /// Create an environment with default constants at the given tick rate.
    pub fn with_hz(hz: u32) -> Result<Self, ConfigError> {
        let env = Self {
            hz,
            ..Self::default()
        };
        env.validate()?;
        Ok(env)
    }

    /// Validate constants.  Returns `Err` on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hz == 0 {
            return Err(ConfigError::InvalidTickRate(self.hz));
        }
        if self.gravity <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "gravity".into(),
                message: format!("{} must be positive", self.gravity),
            });
        }
        if self.air_density <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "air_density".into(),
                message: format!("{} must be positive", self.air_density),
            });
        }
        if self.petrol_density <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "petrol_density".into(),
                message: format!("{} must be positive", self.petrol_density),
            });
        }
        Ok(())
    }

    /// Parse and validate an environment from TOML.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let env: Self = toml::from_str(s)?;
        env.validate()?;
        Ok(env)
    }

    /// Load and validate an environment from a TOML file.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Tick duration in seconds (`1 / hz`).
    #[must_use]
    pub fn tick(&self) -> f64 {
        1.0 / f64::from(self.hz)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tick: {} Hz | G: {:.2} m/s^2 | Air: {:.1} C {:.2} kg/m^3 | Petrol: {:.2} kg/L",
            self.hz, self.gravity, self.air_temp, self.air_density, self.petrol_density
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
