//! Car orchestration: the per-tick force/torque balance and the
//! ignition → running → off-throttle → idling state machine.
//!
//! # Tick data flow
//!
//! Phase → torque request (starter or throttle-modulated motor torque) →
//! gearbox maps crank torque/RPM to axle torque/omega with clutch
//! blending → tire clamps to traction → force balance → Euler
//! integration of velocity/position and the wheel's rotational
//! equivalents → new crank RPM re-derived through the gearbox blend →
//! rev-match classification updates clutch and gear.

use driveline_core::environment::Environment;
use driveline_core::error::DrivelineError;
use driveline_core::units;
use driveline_drivetrain::control::PidController;
use driveline_drivetrain::gearbox::{Gear, MatchStatus};
use driveline_drivetrain::tire::Tire;

use crate::powertrain::Powertrain;
use crate::telemetry::{ForceBreakdown, Telemetry};

/// Default frontal area (m²), roughly a 2000s-era Corvette.
pub const FRONTAL_AREA: f64 = 2.2;

/// Default drag coefficient, same provenance.
pub const DRAG_COF: f64 = 0.3;

/// Clutch fraction applied when first gear is engaged at launch.
pub const LAUNCH_CLUTCH: f64 = 0.5;

/// Clutch fraction applied across a gear change.
pub const SHIFT_CLUTCH: f64 = 0.5;

/// Off-throttle hands over to the idle governor at `idle × this`.
const IDLE_ENTRY: f64 = 1.1;

/// Idle-governor PID gains, tuned for the stock motor at 1000 Hz.
const IDLE_KP: f64 = 3.0e-4;
const IDLE_KI: f64 = 1.0e-3;
const IDLE_KD: f64 = 1.0e-5;

/// Below this speed (m/s) a coasting car is considered stopped.
const STANDSTILL: f64 = 1.0e-4;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Lifecycle phase of the car.
///
/// `Idling` is a stable hold state, not a terminal one: `resume` moves
/// back to `Running`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Starter torque spins the crank; gearbox in neutral.
    #[default]
    Ignition,
    /// Full force balance under throttle.
    Running,
    /// Throttle lifted; engine braking decays RPM toward idle.
    OffThrottle,
    /// PID governor holds idle RPM; gearbox in neutral.
    Idling,
}

impl Phase {
    /// Returns `true` while the drivetrain is coupled to the wheels.
    #[must_use]
    pub const fn is_driving(self) -> bool {
        matches!(self, Self::Running | Self::OffThrottle)
    }

    /// Returns `true` once the motor has caught.
    #[must_use]
    pub const fn is_lit(self) -> bool {
        !matches!(self, Self::Ignition)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Ignition => "ignition",
            Self::Running => "running",
            Self::OffThrottle => "off-throttle",
            Self::Idling => "idling",
        };
        write!(f, "{label}")
    }
}

// ---------------------------------------------------------------------------
// Car
// ---------------------------------------------------------------------------

/// Single-body longitudinal vehicle: one powertrain, one lumped drive
/// tire shared across `num_tires` corners, and aerodynamic/rolling body
/// parameters.
#[derive(Clone, Debug)]
pub struct Car {
    env: Environment,
    tire: Tire,
    powertrain: Powertrain,
    /// Corner count sharing the body weight (canonically 4).
    pub num_tires: u32,
    /// Body mass (kg) excluding powertrain and tires.
    pub body_mass: f64,
    /// Frontal area (m²).
    pub frontal_area: f64,
    /// Drag coefficient.
    pub drag_cof: f64,

    phase: Phase,
    rpm: f64,
    position: f64,
    velocity: f64,
    acceleration: f64,
    wheel_theta: f64,
    wheel_omega: f64,
    wheel_alpha: f64,
    forces: ForceBreakdown,
    pid: PidController,
    lurches: u64,
    ticks: u64,
}

impl Car {
    /// Build a car from a tire and a powertrain, with stock body
    /// parameters.  Starts at rest in the `Ignition` phase.
    pub fn new(tire: Tire, powertrain: Powertrain) -> Self {
        let env = *tire.env();
        let pid = PidController::new(powertrain.motor.idle(), env.tick())
            .with_gains(IDLE_KP, IDLE_KI, IDLE_KD)
            .with_i_range(-0.2, 0.2)
            .with_output_range(0.0, 1.0);
        Self {
            env,
            tire,
            powertrain,
            num_tires: 4,
            body_mass: 1000.0,
            frontal_area: FRONTAL_AREA,
            drag_cof: DRAG_COF,
            phase: Phase::Ignition,
            rpm: 0.0,
            position: 0.0,
            velocity: 0.0,
            acceleration: 0.0,
            wheel_theta: 0.0,
            wheel_omega: 0.0,
            wheel_alpha: 0.0,
            forces: ForceBreakdown::default(),
            pid,
            lurches: 0,
            ticks: 0,
        }
    }

    // -- telemetry accessors --

    /// The environment this car runs in.
    pub const fn env(&self) -> &Environment {
        &self.env
    }

    /// The drive tire.
    pub const fn tire(&self) -> &Tire {
        &self.tire
    }

    /// The powertrain.
    pub const fn powertrain(&self) -> &Powertrain {
        &self.powertrain
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Current crank RPM.
    #[must_use]
    pub const fn rpm(&self) -> f64 {
        self.rpm
    }

    /// Position (m) along the straight.
    #[must_use]
    pub const fn position(&self) -> f64 {
        self.position
    }

    /// Velocity (m/s).
    #[must_use]
    pub const fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Acceleration (m/s²) from the last tick.
    #[must_use]
    pub const fn acceleration(&self) -> f64 {
        self.acceleration
    }

    /// Wheel angular velocity (rad/s).
    #[must_use]
    pub const fn wheel_omega(&self) -> f64 {
        self.wheel_omega
    }

    /// Wheel angle (rad) accumulated since the start.
    #[must_use]
    pub const fn wheel_theta(&self) -> f64 {
        self.wheel_theta
    }

    /// Wheel angular acceleration (rad/s²) from the last tick.
    #[must_use]
    pub const fn wheel_alpha(&self) -> f64 {
        self.wheel_alpha
    }

    /// Force breakdown from the last tick.
    pub const fn forces(&self) -> &ForceBreakdown {
        &self.forces
    }

    /// Count of rev mismatches ("lurches") so far.
    #[must_use]
    pub const fn lurches(&self) -> u64 {
        self.lurches
    }

    /// Ticks simulated so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Current throttle.
    #[must_use]
    pub const fn throttle(&self) -> f64 {
        self.powertrain.motor.throttle()
    }

    /// Set the throttle directly.
    pub fn set_throttle(&mut self, value: f64) -> Result<(), DrivelineError> {
        Ok(self.powertrain.motor.set_throttle(value)?)
    }

    /// Currently selected gear.
    #[must_use]
    pub const fn gear(&self) -> Gear {
        self.powertrain.gearbox.gear()
    }

    /// Select a gear directly.
    pub fn set_gear(&mut self, gear: Gear) -> Result<(), DrivelineError> {
        Ok(self.powertrain.gearbox.set_gear(gear)?)
    }

    /// Current clutch fraction.
    #[must_use]
    pub const fn clutch(&self) -> f64 {
        self.powertrain.gearbox.clutch()
    }

    /// Set the clutch fraction directly.
    pub fn set_clutch(&mut self, value: f64) -> Result<(), DrivelineError> {
        Ok(self.powertrain.gearbox.set_clutch(value)?)
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            tick: self.ticks,
            phase: self.phase,
            rpm: self.rpm,
            gear: self.gear(),
            clutch: self.clutch(),
            throttle: self.throttle(),
            position: self.position,
            velocity: self.velocity,
            acceleration: self.acceleration,
            wheel_omega: self.wheel_omega,
            forces: self.forces,
            lurches: self.lurches,
        }
    }

    // -- mass and load --

    /// Total mass: body plus powertrain plus all tires.
    #[must_use]
    pub fn total_mass(&self) -> f64 {
        self.body_mass + self.powertrain.mass() + self.tire.mass() * f64::from(self.num_tires)
    }

    /// Mass carried by one corner.
    #[must_use]
    pub fn corner_mass(&self) -> f64 {
        self.total_mass() / f64::from(self.num_tires)
    }

    /// Normal force on one tire.
    #[must_use]
    pub fn normal_force(&self) -> f64 {
        self.corner_mass() * self.env.gravity
    }

    /// Static traction available at one tire.
    #[must_use]
    pub fn tire_traction(&self) -> f64 {
        self.tire.traction(self.normal_force(), true)
    }

    /// Weight of the whole car.
    #[must_use]
    pub fn total_normal_force(&self) -> f64 {
        self.total_mass() * self.env.gravity
    }

    // -- force components --

    /// Aerodynamic drag (N), opposing velocity.
    #[must_use]
    pub fn air_force(&self, speed: f64) -> f64 {
        -0.5 * self.frontal_area * self.drag_cof * self.env.air_density * speed * speed.abs()
    }

    /// Rolling resistance (N) across all tires, opposing wheel rotation.
    #[must_use]
    pub fn tire_rolling_force(&self, omega: f64) -> f64 {
        f64::from(self.num_tires) * self.tire.rolling_friction(omega, self.normal_force())
            / self.tire.radius()
    }

    /// Rotational friction (N) across all tires, opposing wheel rotation.
    #[must_use]
    pub fn tire_rotational_force(&self, omega: f64) -> f64 {
        f64::from(self.num_tires) * self.tire.rotating_friction(omega, self.normal_force())
            / self.tire.radius()
    }

    /// Force (N) lost to spinning the tires up, opposing the applied
    /// force.  Fixed-point converged like the tire-level solve.
    #[must_use]
    pub fn tire_inertial_force(&self, force: f64) -> f64 {
        let mag = force.abs();
        if mag < 0.001 {
            return 0.0;
        }
        let mut force_loss = 0.0;
        for _ in 0..self.tire.solver_rounds {
            // magnitudes only, so only positive numbers are subtracted
            let acc = units::acc(mag - force_loss, self.total_mass());
            let alpha = acc / self.tire.radius();
            force_loss = f64::from(self.num_tires) * self.tire.implied_torque(alpha)
                / self.tire.radius();
        }
        -force.signum() * force_loss
    }

    /// Drive force (N) at the contact patch for a crank RPM, before the
    /// traction clamp.
    pub fn drive_force(&self, rpm: f64, axle_omega: Option<f64>) -> Result<f64, DrivelineError> {
        Ok(self.tire.force(self.powertrain.axle_torque(rpm, axle_omega)?))
    }

    /// Clamp an axle torque to what the tires can transmit.  Demanding
    /// more than the static limit breaks the contact patch loose and
    /// drops the available traction to the kinetic level.
    #[must_use]
    pub fn traction_limited(&self, axle_torque: f64) -> f64 {
        let normal_force = self.normal_force();
        let static_limit = self.tire.tractable_torque(normal_force, true);
        if axle_torque.abs() > static_limit {
            axle_torque.signum() * self.tire.tractable_torque(normal_force, false)
        } else {
            axle_torque
        }
    }

    // -- external signals --

    /// Lift off the throttle: `Running → OffThrottle`.
    pub fn lift_throttle(&mut self) -> Result<(), DrivelineError> {
        if self.phase == Phase::Running {
            self.powertrain.motor.set_throttle(0.0)?;
            self.set_phase(Phase::OffThrottle);
        }
        Ok(())
    }

    /// Reapply throttle: `OffThrottle | Idling → Running`.
    pub fn resume(&mut self, throttle: f64) -> Result<(), DrivelineError> {
        if matches!(self.phase, Phase::OffThrottle | Phase::Idling) {
            if self.gear().is_neutral() {
                self.powertrain.gearbox.set_gear(Gear::Forward(1))?;
                self.powertrain.gearbox.set_clutch(LAUNCH_CLUTCH)?;
            }
            self.powertrain.motor.set_throttle(throttle)?;
            self.set_phase(Phase::Running);
        }
        Ok(())
    }

    // -- the tick --

    /// Advance one tick.  State is read back through the accessors.
    pub fn tick(&mut self) -> Result<(), DrivelineError> {
        match self.phase {
            Phase::Ignition => self.ignition_tick()?,
            Phase::Running | Phase::OffThrottle => self.roll_tick()?,
            Phase::Idling => self.idle_tick()?,
        }
        self.ticks += 1;
        Ok(())
    }

    fn set_phase(&mut self, next: Phase) {
        log::debug!("phase: {} -> {} (tick {})", self.phase, next, self.ticks);
        self.phase = next;
    }

    /// Starter torque spins the crank against friction; no load from
    /// the wheels (gearbox is in neutral).
    fn ignition_tick(&mut self) -> Result<(), DrivelineError> {
        let crank_omega = units::omega(self.rpm);
        let alpha = self
            .powertrain
            .motor
            .alpha(self.powertrain.motor.starter_torque, crank_omega);
        self.rpm = units::rpm(alpha.mul_add(self.env.tick(), crank_omega));

        if self.rpm > self.powertrain.motor.idle() {
            // The motor has caught: first gear, full throttle, clutch
            // slipping for the launch.
            self.powertrain.gearbox.set_gear(Gear::Forward(1))?;
            self.powertrain.gearbox.set_clutch(LAUNCH_CLUTCH)?;
            self.powertrain.motor.set_throttle(1.0)?;
            self.set_phase(Phase::Running);
        }
        Ok(())
    }

    /// Full force balance while the drivetrain is coupled to the wheels
    /// (running and off-throttle are the same balance; only the
    /// throttle differs).
    fn roll_tick(&mut self) -> Result<(), DrivelineError> {
        let tick = self.env.tick();

        let axle_torque = self.powertrain.axle_torque(self.rpm, Some(self.wheel_omega))?;
        let drive = self.tire.force(self.traction_limited(axle_torque));
        let air = self.air_force(self.velocity);
        let rolling = self.tire_rolling_force(self.wheel_omega);
        let rotational = self.tire_rotational_force(self.wheel_omega);
        let inertial = self.tire_inertial_force(drive + air + rolling + rotational);
        self.forces = ForceBreakdown {
            drive,
            air,
            rolling,
            rotational,
            inertial,
        };

        self.acceleration = units::acc(self.forces.total(), self.total_mass());
        self.velocity = self.acceleration.mul_add(tick, self.velocity);
        self.position = self.velocity.mul_add(tick, self.position);

        // No-slip rolling: the wheel tracks the body.
        self.wheel_alpha = self.acceleration / self.tire.radius();
        self.wheel_omega = self.wheel_alpha.mul_add(tick, self.wheel_omega);
        self.wheel_theta = self.wheel_omega.mul_add(tick, self.wheel_theta);

        // New crank RPM from the new wheel speed, through the clutch
        // blend, then classify the mismatch.
        let proposed = self.powertrain.crank_rpm(self.wheel_omega, Some(self.rpm))?;
        let rev_match = self.powertrain.gearbox.match_rpms(self.rpm, proposed);
        if rev_match.status == MatchStatus::Mismatch {
            self.lurches += 1;
            log::trace!(
                "lurch: {:.0} -> {:.0} RPM (proportion {:+.3})",
                self.rpm,
                proposed,
                rev_match.proportion
            );
        }
        self.powertrain.gearbox.set_clutch(rev_match.clutch)?;
        self.rpm = proposed.clamp(
            self.powertrain.motor.idle(),
            self.powertrain.motor.redline(),
        );

        let next = self.powertrain.gearbox.next_gear(self.rpm);
        if next != self.powertrain.gearbox.gear() {
            log::debug!("shift: {} -> {} at {:.0} RPM", self.gear(), next, self.rpm);
            self.powertrain.gearbox.set_gear(next)?;
            self.powertrain.gearbox.set_clutch(SHIFT_CLUTCH)?;
        }

        if self.phase == Phase::OffThrottle
            && self.rpm <= self.powertrain.motor.idle() * IDLE_ENTRY
        {
            // Hand over to the idle governor; the car keeps coasting.
            self.powertrain.gearbox.set_gear(Gear::Neutral)?;
            self.powertrain.gearbox.set_clutch(1.0)?;
            self.pid.reset();
            self.set_phase(Phase::Idling);
        }
        Ok(())
    }

    /// The PID governor holds idle RPM via throttle while the car
    /// coasts in neutral.
    fn idle_tick(&mut self) -> Result<(), DrivelineError> {
        let tick = self.env.tick();

        let throttle = self.pid.update(self.rpm);
        self.powertrain.motor.set_throttle(throttle)?;

        let requested = self.powertrain.motor.torque(self.rpm)?;
        let crank_omega = units::omega(self.rpm);
        let alpha = self.powertrain.motor.alpha(requested, crank_omega);
        self.rpm = units::rpm(alpha.mul_add(tick, crank_omega))
            .max(self.powertrain.motor.curve().min_rpm());

        // Coast: resistance only, no drive through the neutral gearbox.
        let air = self.air_force(self.velocity);
        let rolling = self.tire_rolling_force(self.wheel_omega);
        let rotational = self.tire_rotational_force(self.wheel_omega);
        self.forces = ForceBreakdown {
            drive: 0.0,
            air,
            rolling,
            rotational,
            inertial: 0.0,
        };
        self.acceleration = units::acc(self.forces.total(), self.total_mass());
        self.velocity = self.acceleration.mul_add(tick, self.velocity);
        if self.velocity.abs() < STANDSTILL {
            self.velocity = 0.0;
        }
        self.position = self.velocity.mul_add(tick, self.position);
        self.wheel_alpha = self.acceleration / self.tire.radius();
        self.wheel_omega = self.wheel_alpha.mul_add(tick, self.wheel_omega);
        if self.wheel_omega.abs() < STANDSTILL {
            self.wheel_omega = 0.0;
        }
        self.wheel_theta = self.wheel_omega.mul_add(tick, self.wheel_theta);
        Ok(())
    }
}

impl std::fmt::Display for Car {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Mass: {:.1} kg | Fr.A: {:.2} m^2 | cD: {:.2}",
            self.total_mass(),
            self.frontal_area,
            self.drag_cof
        )?;
        writeln!(f, "POWERTRAIN:\n{}", self.powertrain)?;
        writeln!(f, "Tires: {}", self.tire)?;
        write!(
            f,
            "Corner mass: {:.1} kg | Normal force: {:.1} N",
            self.corner_mass(),
            self.normal_force()
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use driveline_drivetrain::gearbox::Gearbox;
    use driveline_drivetrain::motor::Motor;

    fn car() -> Car {
        let env = Environment::default();
        let tire = Tire::new(&env);
        let powertrain = Powertrain::new(Motor::new(&env), Gearbox::new(&env));
        Car::new(tire, powertrain)
    }

    #[test]
    fn starts_at_rest_in_ignition() {
        let c = car();
        assert_eq!(c.phase(), Phase::Ignition);
        assert!((c.rpm()).abs() < f64::EPSILON);
        assert!((c.velocity()).abs() < f64::EPSILON);
        assert_eq!(c.gear(), Gear::Neutral);
    }

    #[test]
    fn total_mass_sums_body_powertrain_tires() {
        let c = car();
        let expected = 1000.0 + c.powertrain().mass() + c.tire().mass() * 4.0;
        assert!((c.total_mass() - expected).abs() < 1e-9);
    }

    #[test]
    fn corner_carries_quarter_of_the_weight() {
        let c = car();
        assert!((c.corner_mass() * 4.0 - c.total_mass()).abs() < 1e-9);
        assert!((c.normal_force() - c.corner_mass() * 9.8).abs() < 1e-9);
    }

    #[test]
    fn air_force_opposes_motion_quadratically() {
        let c = car();
        let slow = c.air_force(10.0);
        let fast = c.air_force(20.0);
        assert!(slow < 0.0);
        assert!((fast / slow - 4.0).abs() < 1e-9);
        assert!(c.air_force(-10.0) > 0.0);
        assert!((c.air_force(0.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn rolling_force_opposes_rotation() {
        let c = car();
        assert!(c.tire_rolling_force(10.0) < 0.0);
        assert!(c.tire_rolling_force(-10.0) > 0.0);
        assert!((c.tire_rolling_force(0.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn inertial_force_opposes_applied_force() {
        let c = car();
        let loss = c.tire_inertial_force(2000.0);
        assert!(loss < 0.0);
        assert!(loss.abs() < 2000.0 * 0.1);
        let reverse = c.tire_inertial_force(-2000.0);
        assert!((reverse + loss).abs() < 1e-12);
    }

    #[test]
    fn inertial_force_negligible_input_is_zero() {
        let c = car();
        assert!((c.tire_inertial_force(0.0005)).abs() < f64::EPSILON);
    }

    #[test]
    fn traction_limit_passes_moderate_torque() {
        let c = car();
        assert!((c.traction_limited(500.0) - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn traction_limit_drops_to_kinetic_when_broken_loose() {
        let c = car();
        let normal_force = c.normal_force();
        let static_limit = c.tire().tractable_torque(normal_force, true);
        let kinetic_limit = c.tire().tractable_torque(normal_force, false);
        let clamped = c.traction_limited(static_limit * 2.0);
        assert!((clamped - kinetic_limit).abs() < 1e-9);
        let clamped = c.traction_limited(-static_limit * 2.0);
        assert!((clamped + kinetic_limit).abs() < 1e-9);
    }

    #[test]
    fn ignition_spins_the_crank_up() {
        let mut c = car();
        c.tick().unwrap();
        let first = c.rpm();
        assert!(first > 0.0);
        c.tick().unwrap();
        assert!(c.rpm() > first);
    }

    #[test]
    fn ignition_catches_within_a_second() {
        let mut c = car();
        for _ in 0..1000 {
            c.tick().unwrap();
            if c.phase() == Phase::Running {
                break;
            }
        }
        assert_eq!(c.phase(), Phase::Running);
        assert!(c.rpm() > c.powertrain().motor.idle());
        assert_eq!(c.gear(), Gear::Forward(1));
        assert!((c.throttle() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn lift_throttle_only_applies_when_running() {
        let mut c = car();
        c.lift_throttle().unwrap();
        assert_eq!(c.phase(), Phase::Ignition);
    }

    #[test]
    fn running_builds_speed() {
        let mut c = car();
        for _ in 0..5000 {
            c.tick().unwrap();
        }
        assert_eq!(c.phase(), Phase::Running);
        assert!(c.velocity() > 0.0);
        assert!(c.position() > 0.0);
        assert!(c.forces().drive > 0.0);
        assert!(c.wheel_omega() > 0.0);
    }

    #[test]
    fn lift_throttle_enters_off_throttle() {
        let mut c = car();
        for _ in 0..5000 {
            c.tick().unwrap();
        }
        c.lift_throttle().unwrap();
        assert_eq!(c.phase(), Phase::OffThrottle);
        assert!((c.throttle()).abs() < f64::EPSILON);
    }

    #[test]
    fn telemetry_mirrors_state() {
        let mut c = car();
        for _ in 0..100 {
            c.tick().unwrap();
        }
        let t = c.telemetry();
        assert_eq!(t.tick, 100);
        assert_eq!(t.phase, c.phase());
        assert!((t.rpm - c.rpm()).abs() < f64::EPSILON);
        assert!((t.velocity - c.velocity()).abs() < f64::EPSILON);
        assert_eq!(t.gear, c.gear());
    }

    #[test]
    fn phase_display_labels() {
        assert_eq!(Phase::Ignition.to_string(), "ignition");
        assert_eq!(Phase::OffThrottle.to_string(), "off-throttle");
    }

    #[test]
    fn drive_force_positive_under_throttle() {
        let mut c = car();
        for _ in 0..2000 {
            c.tick().unwrap();
        }
        let f = c.drive_force(c.rpm(), Some(c.wheel_omega())).unwrap();
        assert!(f > 0.0);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn car_is_send_sync() {
        assert_send_sync::<Car>();
        assert_send_sync::<Phase>();
    }
}
