// driveline-core: environment constants, error taxonomy, and unit math for
// the driveline simulation workspace.

pub mod environment;
pub mod error;
pub mod units;

pub use environment::Environment;
pub use error::DrivelineError;
