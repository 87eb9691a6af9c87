use thiserror::Error;

/// Top-level error type for the driveline workspace.
#[derive(Debug, Error)]
pub enum DrivelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Torque curve error: {0}")]
    Curve(#[from] CurveError),

    #[error("Motor error: {0}")]
    Motor(#[from] MotorError),

    #[error("Gearbox error: {0}")]
    Gearbox(#[from] GearboxError),

    #[error("Control error: {0}")]
    Control(#[from] ControlError),

    #[error("Range error: {0}")]
    Range(#[from] RangeError),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid tick rate: {0} Hz (must be > 0)")]
    InvalidTickRate(u32),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Torque-curve construction and lookup errors.
///
/// Copy + static payloads for cheap propagation in hot paths.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CurveError {
    #[error("Curve needs at least 2 points, got {0}")]
    TooFewPoints(usize),

    #[error("RPM and torque tables differ in length: {rpms} vs {torques}")]
    LengthMismatch { rpms: usize, torques: usize },

    #[error("RPM axis must be strictly increasing at index {0}")]
    NonMonotonic(usize),

    #[error("RPM values must be non-negative, got {0}")]
    NegativeRpm(f64),

    #[error("Torque values must be non-negative, got {0}")]
    NegativeTorque(f64),

    #[error("Boundary torque must be zero, got {0}")]
    NonzeroBoundary(f64),

    #[error("Value {value} outside curve domain [{min}, {max}]")]
    OutOfBounds { value: f64, min: f64, max: f64 },
}

/// Motor precondition errors: the requested RPM is outside the torque
/// curve's domain.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MotorError {
    #[error("Stall: {rpm} RPM below curve minimum")]
    Stall { rpm: f64 },

    #[error("Over-rev: {rpm} RPM above curve maximum")]
    OverRev { rpm: f64 },
}

/// Gearbox precondition errors.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GearboxError {
    #[error("Gearbox disengaged: cannot relate crank and axle in neutral")]
    Disengaged,

    #[error("Clutch not fully engaged and no prior state supplied")]
    ClutchDisengage,

    #[error("Bad gear: {requested} (valid forward gears: 1..={top})")]
    BadGear { requested: u8, top: u8 },

    #[error("Bad gear ratio: {0} (must be positive and finite)")]
    BadRatio(f64),
}

/// PID parameter dispatch errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("Unknown PID parameter: {0}")]
    UnknownParam(String),
}

/// Unit-interval violations (throttle, clutch).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RangeError {
    #[error("Value {0} should be between 0 and 1")]
    UnitInterval(f64),
}
