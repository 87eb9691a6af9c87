//! Geared transmission with a continuously-variable clutch.
//!
//! # Gear Ratio Convention
//!
//! Ratios are stored as speed multipliers: a ratio above 1 multiplies
//! speed and divides torque.  The automotive convention inverts this —
//! the default final drive would conventionally be quoted as 3.73, but
//! 11/41 is stored.  First gear is therefore the *smallest* number in
//! the table.
//!
//! # Clutch Model
//!
//! One continuous blend models slip on both sides of the box:
//! - Torque: `axle = crank × clutch / ratio` — a slipping clutch
//!   transmits only a fraction of crank torque.
//! - Speed: with a prior value, `next = prev + (rigid − prev) × clutch`;
//!   at `clutch == 0` the two sides are independent, at `clutch == 1`
//!   they are rigidly coupled.

use std::fmt;

use driveline_core::environment::Environment;
use driveline_core::error::{GearboxError, RangeError};
use driveline_core::units;

use crate::spinner::Spinner;

/// Stock forward ratios, 1st through 6th (speed-multiplier convention).
pub const RATIOS: [f64; 6] = [
    1.0 / 5.0,
    2.0 / 5.0,
    5.0 / 9.0,
    5.0 / 7.0,
    1.0,
    5.0 / 4.0,
];

/// Stock final drive (11/41, conventionally 3.73).
pub const FINAL_DRIVE: f64 = 11.0 / 41.0;

/// Reverse ratio (negative: the axle counter-rotates).
pub const REVERSE_RATIO: f64 = -1.0 / 10.0;

/// Rev-match tolerance for a clean engagement.
pub const MATCH_TOLERANCE: f64 = 0.01;

/// Rev-match tolerance for acceptable clutch slip.
pub const SLIP_TOLERANCE: f64 = 0.1;

/// Lowest clutch fraction the rev-match recommendation will produce.
pub const CLUTCH_MIN: f64 = 0.1;

/// Below this crank RPM, first-gear launches tolerate any mismatch.
pub const GET_ROLLING_RPM: f64 = 1500.0;

/// Downshift when RPM falls below this floor.
pub const SHIFT_FLOOR: f64 = 2500.0;

/// Upshift when RPM exceeds this ceiling.
pub const SHIFT_CEILING: f64 = 6400.0;

// ---------------------------------------------------------------------------
// Gear
// ---------------------------------------------------------------------------

/// Selected gear.  Forward gears are 1-based indices into the ratio table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Gear {
    /// Reverse.
    Reverse,
    /// Neutral: crank and axle mechanically unrelated.
    #[default]
    Neutral,
    /// Forward gear `1..=top_gear`.
    Forward(u8),
}

impl Gear {
    /// Returns `true` for neutral.
    #[must_use]
    pub const fn is_neutral(self) -> bool {
        matches!(self, Self::Neutral)
    }

    /// Returns `true` for reverse.
    #[must_use]
    pub const fn is_reverse(self) -> bool {
        matches!(self, Self::Reverse)
    }

    /// 1-based forward gear number, if any.
    #[must_use]
    pub const fn forward_index(self) -> Option<u8> {
        match self {
            Self::Forward(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for Gear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reverse => write!(f, "R"),
            Self::Neutral => write!(f, "N"),
            Self::Forward(n) => write!(f, "{n}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Rev matching
// ---------------------------------------------------------------------------

/// Classification of a proposed crank RPM against the current one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchStatus {
    /// Within [`MATCH_TOLERANCE`]: clean engagement.
    Matched,
    /// Within [`SLIP_TOLERANCE`]: the clutch absorbs the difference.
    Slip,
    /// First-gear launch below [`GET_ROLLING_RPM`]: mismatch tolerated.
    GetRolling,
    /// Anything else: the clutch must open to avoid a torque spike.
    Mismatch,
}

/// Outcome of [`Gearbox::match_rpms`]: classification, the proportional
/// RPM difference, and the clutch fraction recommended for the next tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevMatch {
    pub status: MatchStatus,
    pub proportion: f64,
    pub clutch: f64,
}

// ---------------------------------------------------------------------------
// Gearbox
// ---------------------------------------------------------------------------

/// Discrete-ratio gearbox with a continuous clutch.
#[derive(Clone, Debug)]
pub struct Gearbox {
    env: Environment,
    spinner: Spinner,
    ratios: Vec<f64>,
    /// Final drive multiplier applied to every ratio.
    pub final_drive: f64,
    /// Reverse ratio (negative).
    pub reverse_ratio: f64,
    /// Non-rotating mass (kg): case, forks, oil.
    pub fixed_mass: f64,
    gear: Gear,
    clutch: f64,
}

impl Gearbox {
    /// Create a gearbox with the stock six-speed ratio table, in neutral
    /// with the clutch fully engaged.
    pub fn new(env: &Environment) -> Self {
        let spinner = Spinner::new(env)
            .with_radius(0.15)
            .with_base_friction(5.0 / 1000.0)
            .with_omega_friction(15.0 / 100_000.0)
            .with_mass(15.0);
        Self {
            env: *env,
            spinner,
            ratios: RATIOS.to_vec(),
            final_drive: FINAL_DRIVE,
            reverse_ratio: REVERSE_RATIO,
            fixed_mass: 30.0,
            gear: Gear::Neutral,
            clutch: 1.0,
        }
    }

    /// Replace the ratio table.  Every ratio must be positive and finite.
    pub fn with_ratios(mut self, ratios: Vec<f64>) -> Result<Self, GearboxError> {
        for &r in &ratios {
            if !(r > 0.0 && r < 99_999.0) {
                return Err(GearboxError::BadRatio(r));
            }
        }
        self.ratios = ratios;
        // The current gear must still index the new table.
        self.set_gear(self.gear)?;
        Ok(self)
    }

    /// Set the final drive multiplier.
    #[must_use]
    pub const fn with_final_drive(mut self, final_drive: f64) -> Self {
        self.final_drive = final_drive;
        self
    }

    /// The environment this gearbox was built against.
    pub const fn env(&self) -> &Environment {
        &self.env
    }

    /// The transmission spinner.
    pub const fn spinner(&self) -> &Spinner {
        &self.spinner
    }

    /// The forward ratio table.
    #[must_use]
    pub fn ratios(&self) -> &[f64] {
        &self.ratios
    }

    /// Highest forward gear.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn top_gear(&self) -> u8 {
        self.ratios.len() as u8
    }

    /// Currently selected gear.
    #[must_use]
    pub const fn gear(&self) -> Gear {
        self.gear
    }

    /// Select a gear.  Forward gears must index the ratio table.
    pub fn set_gear(&mut self, gear: Gear) -> Result<(), GearboxError> {
        if let Gear::Forward(n) = gear {
            if n < 1 || n > self.top_gear() {
                return Err(GearboxError::BadGear {
                    requested: n,
                    top: self.top_gear(),
                });
            }
        }
        self.gear = gear;
        Ok(())
    }

    /// Current clutch fraction: 0 fully disengaged, 1 fully locked.
    #[must_use]
    pub const fn clutch(&self) -> f64 {
        self.clutch
    }

    /// Set the clutch fraction.  Rejects values outside `[0, 1]`.
    pub fn set_clutch(&mut self, value: f64) -> Result<(), RangeError> {
        self.clutch = units::unit_interval(value)?;
        Ok(())
    }

    /// Total mass: spinner plus fixed mass.
    #[must_use]
    pub fn mass(&self) -> f64 {
        self.fixed_mass + self.spinner.mass()
    }

    /// Effective ratio for the current gear (including final drive).
    ///
    /// `Disengaged` in neutral — no ratio relates crank to axle.
    pub fn ratio(&self) -> Result<f64, GearboxError> {
        self.ratio_for(self.gear)
    }

    /// Effective ratio for an arbitrary gear.
    pub fn ratio_for(&self, gear: Gear) -> Result<f64, GearboxError> {
        match gear {
            Gear::Reverse => Ok(self.reverse_ratio * self.final_drive),
            Gear::Neutral => Err(GearboxError::Disengaged),
            Gear::Forward(n) => {
                let ratio = usize::from(n)
                    .checked_sub(1)
                    .and_then(|i| self.ratios.get(i))
                    .ok_or(GearboxError::BadGear {
                        requested: n,
                        top: self.top_gear(),
                    })?;
                Ok(ratio * self.final_drive)
            }
        }
    }

    /// Axle torque from crank torque: `crank × clutch / ratio`.
    ///
    /// The clutch linearly attenuates torque transfer; the remainder is
    /// dissipated as slip heat (not tracked).
    pub fn axle_torque(&self, crank_torque: f64) -> Result<f64, GearboxError> {
        Ok(crank_torque * self.clutch / self.ratio()?)
    }

    /// Axle angular velocity from crank RPM.
    ///
    /// Without a previous value the clutch must be fully engaged
    /// (`ClutchDisengage` otherwise) and the rigid kinematic value is
    /// returned.  With a previous value, the result blends toward the
    /// rigid value by the clutch fraction.
    pub fn axle_omega(
        &self,
        crank_rpm: f64,
        previous: Option<f64>,
    ) -> Result<f64, GearboxError> {
        let rigid = units::omega(crank_rpm) * self.ratio()?;
        match previous {
            Some(prev) => Ok((rigid - prev).mul_add(self.clutch, prev)),
            None if self.clutch >= 1.0 => Ok(rigid),
            None => Err(GearboxError::ClutchDisengage),
        }
    }

    /// Crank RPM from axle angular velocity; symmetric inverse of
    /// [`axle_omega`](Self::axle_omega).
    pub fn crank_rpm(
        &self,
        axle_omega: f64,
        previous: Option<f64>,
    ) -> Result<f64, GearboxError> {
        let rigid = units::rpm(axle_omega) / self.ratio()?;
        match previous {
            Some(prev) => Ok((rigid - prev).mul_add(self.clutch, prev)),
            None if self.clutch >= 1.0 => Ok(rigid),
            None => Err(GearboxError::ClutchDisengage),
        }
    }

    /// Axle-side angular acceleration from applied torque, folding in
    /// spinner friction at `omega`.
    #[must_use]
    pub fn alpha(&self, torque: f64, omega: f64) -> f64 {
        self.spinner
            .alpha(torque + self.spinner.rotating_friction(omega), 0.0)
    }

    /// Spinner friction torque at `omega`.
    #[must_use]
    pub fn rotating_friction(&self, omega: f64) -> f64 {
        self.spinner.rotating_friction(omega)
    }

    /// Torque implied by an axle-side acceleration.
    #[must_use]
    pub fn implied_torque(&self, alpha: f64) -> f64 {
        self.spinner.implied_torque(alpha)
    }

    /// Axle torque delivered after transmission friction and inertia,
    /// given crank torque and RPM.
    pub fn output_torque(
        &self,
        crank_torque: f64,
        crank_rpm: f64,
        axle_omega: Option<f64>,
    ) -> Result<f64, GearboxError> {
        let axle_torque = self.axle_torque(crank_torque)?;
        let omega = self.axle_omega(crank_rpm, axle_omega)?;
        Ok(self.implied_torque(self.alpha(axle_torque, omega)))
    }

    /// Shift policy: downshift below [`SHIFT_FLOOR`] unless already in
    /// 1st, upshift above [`SHIFT_CEILING`] unless already in top gear.
    /// Neutral and reverse hold.
    #[must_use]
    pub fn next_gear(&self, rpm: f64) -> Gear {
        match self.gear {
            Gear::Forward(n) if rpm < SHIFT_FLOOR && n > 1 => Gear::Forward(n - 1),
            Gear::Forward(n) if rpm > SHIFT_CEILING && n < self.top_gear() => {
                Gear::Forward(n + 1)
            }
            gear => gear,
        }
    }

    /// Classify how closely a proposed crank RPM matches the current one,
    /// and recommend a clutch fraction for the next tick.
    ///
    /// The more violent the mismatch, the further the clutch must open
    /// to avoid an unrealistic torque spike — this is the "lurch" the
    /// orchestration layer reports.
    #[must_use]
    pub fn match_rpms(&self, old_rpm: f64, new_rpm: f64) -> RevMatch {
        let proportion = (new_rpm - old_rpm) / old_rpm;
        let slipping = (1.0 - proportion.abs()).max(CLUTCH_MIN);

        if proportion.abs() < MATCH_TOLERANCE {
            RevMatch {
                status: MatchStatus::Matched,
                proportion,
                clutch: 1.0,
            }
        } else if proportion.abs() < SLIP_TOLERANCE {
            RevMatch {
                status: MatchStatus::Slip,
                proportion,
                clutch: slipping,
            }
        } else if self.gear == Gear::Forward(1)
            && new_rpm < old_rpm
            && old_rpm <= GET_ROLLING_RPM
        {
            // Low-speed launch: the crank drags the car up to speed.
            RevMatch {
                status: MatchStatus::GetRolling,
                proportion,
                clutch: self.clutch,
            }
        } else {
            RevMatch {
                status: MatchStatus::Mismatch,
                proportion,
                clutch: slipping,
            }
        }
    }
}

impl fmt::Display for Gearbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Gear: {}  Clutch: {:.1}%",
            self.gear,
            self.clutch * 100.0
        )?;
        writeln!(f, "Ratios: {:?}", self.ratios)?;
        write!(
            f,
            " Final: {:.4}  Mass: {:.1} kg  Rotating: {:.1} kg",
            self.final_drive,
            self.mass(),
            self.spinner.mass()
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
