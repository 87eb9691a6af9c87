//! Rotating body primitive: a rigid disk with geometry-derived mass,
//! speed-dependent friction, and forward/inverse rotational kinematics.
//!
//! # Physics
//!
//! - Mass from geometry: `m = π r² w × 1000 × density` (density in kg/L).
//! - Rotational inertia of a solid disk: `I = ½ m r²`.
//! - Friction torque opposing rotation:
//!   `-sign(ω) × N × (base_friction + |ω| × omega_friction)`.
//! - Forward kinematics: `α = (T - friction(ω)) / I`.
//! - Inverse kinematics: `T = α × I`.

use driveline_core::environment::Environment;

/// Default disk density (kg/L).
pub const DENSITY: f64 = 1.0;

// ---------------------------------------------------------------------------
// Geometry math
// ---------------------------------------------------------------------------

/// Disk volume in m³.
#[must_use]
pub fn volume(radius: f64, width: f64) -> f64 {
    std::f64::consts::PI * radius * radius * width
}

/// Disk volume in liters.
#[must_use]
pub fn volume_liters(radius: f64, width: f64) -> f64 {
    volume(radius, width) * 1000.0
}

/// Mass (kg) from geometry and density (kg/L).
#[must_use]
pub fn mass_of(radius: f64, width: f64, density: f64) -> f64 {
    volume_liters(radius, width) * density
}

/// Density (kg/L) back-solved from mass and volume.
#[must_use]
pub fn density_of(mass: f64, volume_liters: f64) -> f64 {
    mass / volume_liters
}

/// Rotational inertia of a solid disk: `½ m r²`.
#[must_use]
pub fn rotational_inertia(radius: f64, mass: f64) -> f64 {
    mass * radius * radius / 2.0
}

/// Force at the contact patch from axle torque: `F = T / r`.
#[must_use]
pub fn force_of(axle_torque: f64, radius: f64) -> f64 {
    axle_torque / radius
}

/// Convert alpha/omega/theta to acceleration/velocity/position.
#[must_use]
pub fn tangential(rotational: f64, radius: f64) -> f64 {
    rotational * radius
}

/// Convert acceleration/velocity/position to alpha/omega/theta.
#[must_use]
pub fn rotational(tangential: f64, radius: f64) -> f64 {
    tangential / radius
}

// ---------------------------------------------------------------------------
// Spinner
// ---------------------------------------------------------------------------

/// A component's lumped rotating mass, modeled as a solid disk.
///
/// Friction is a small torque opposing rotation that scales with normal
/// force and angular speed.  Not rigorously physical, but close enough
/// for a lumped drivetrain model.
#[derive(Clone, Debug)]
pub struct Spinner {
    env: Environment,
    /// Disk radius (m).
    pub radius: f64,
    /// Disk width (m).
    pub width: f64,
    /// Density (kg/L); mass derives from it.
    pub density: f64,
    /// Constant component of rotational friction.
    pub base_friction: f64,
    /// Speed-scaled component of rotational friction.
    pub omega_friction: f64,
}

impl Spinner {
    /// Create a spinner with default geometry (350 mm × 200 mm, 1 kg/L).
    pub fn new(env: &Environment) -> Self {
        Self {
            env: *env,
            radius: 0.35,
            width: 0.2,
            density: DENSITY,
            base_friction: 5.0 / 100_000.0,
            omega_friction: 5.0 / 100_000.0,
        }
    }

    /// Set the radius (m).
    #[must_use]
    pub const fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set the width (m).
    #[must_use]
    pub const fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Set the density (kg/L).
    #[must_use]
    pub const fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Set the mass (kg) by back-solving density for the current geometry.
    ///
    /// Apply after any radius/width change.
    #[must_use]
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.set_mass(mass);
        self
    }

    /// Set the constant friction component.
    #[must_use]
    pub const fn with_base_friction(mut self, f: f64) -> Self {
        self.base_friction = f;
        self
    }

    /// Set the speed-scaled friction component.
    #[must_use]
    pub const fn with_omega_friction(mut self, f: f64) -> Self {
        self.omega_friction = f;
        self
    }

    /// The environment this spinner was built against.
    pub const fn env(&self) -> &Environment {
        &self.env
    }

    /// Mass (kg) from current geometry and density.
    #[must_use]
    pub fn mass(&self) -> f64 {
        mass_of(self.radius, self.width, self.density)
    }

    /// Set mass (kg) by back-solving density.
    pub fn set_mass(&mut self, mass: f64) {
        self.density = density_of(mass, self.volume_liters());
    }

    /// Reduce the radius by `amount` meters.
    pub fn wear(&mut self, amount: f64) {
        self.radius -= amount;
    }

    /// Volume in m³.
    #[must_use]
    pub fn volume(&self) -> f64 {
        volume(self.radius, self.width)
    }

    /// Volume in liters.
    #[must_use]
    pub fn volume_liters(&self) -> f64 {
        volume_liters(self.radius, self.width)
    }

    /// Rotational inertia (kg·m²).
    #[must_use]
    pub fn rotational_inertia(&self) -> f64 {
        rotational_inertia(self.radius, self.mass())
    }

    /// Default normal force: own weight (`mass × g`).
    #[must_use]
    pub fn normal_force(&self) -> f64 {
        self.mass() * self.env.gravity
    }

    /// Friction torque opposing rotation, under the spinner's own weight.
    ///
    /// Exactly zero at `ω == 0` — no static friction torque is modeled.
    #[must_use]
    pub fn rotating_friction(&self, omega: f64) -> f64 {
        self.rotating_friction_loaded(omega, self.normal_force())
    }

    /// Friction torque opposing rotation under an explicit normal force.
    #[must_use]
    pub fn rotating_friction_loaded(&self, omega: f64, normal_force: f64) -> f64 {
        if omega == 0.0 {
            return 0.0;
        }
        -omega.signum() * normal_force * self.omega_friction.mul_add(omega.abs(), self.base_friction)
    }

    /// Angular acceleration from net torque, folding in friction at `ω`.
    #[must_use]
    pub fn alpha(&self, torque: f64, omega: f64) -> f64 {
        self.alpha_loaded(torque, omega, self.normal_force())
    }

    /// Angular acceleration under an explicit normal force.
    #[must_use]
    pub fn alpha_loaded(&self, torque: f64, omega: f64, normal_force: f64) -> f64 {
        (torque - self.rotating_friction_loaded(omega, normal_force)) / self.rotational_inertia()
    }

    /// Torque that must have produced `alpha`: `T = α × I`.
    #[must_use]
    pub fn implied_torque(&self, alpha: f64) -> f64 {
        alpha * self.rotational_inertia()
    }

    /// Rotational kinetic energy: `½ I ω²`.
    #[must_use]
    pub fn energy(&self, omega: f64) -> f64 {
        0.5 * self.rotational_inertia() * omega * omega
    }

    /// Force at the rim from axle torque.
    #[must_use]
    pub fn force(&self, axle_torque: f64) -> f64 {
        force_of(axle_torque, self.radius)
    }

    /// Tangential equivalent of a rotational quantity at the rim.
    #[must_use]
    pub fn tangential(&self, rotational: f64) -> f64 {
        tangential(rotational, self.radius)
    }
}

impl std::fmt::Display for Spinner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.0} mm x {:.0} mm (RxW) | {:.1} kg  {:.2} kg/L",
            self.radius * 1000.0,
            self.width * 1000.0,
            self.mass(),
            self.density
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn spinner() -> Spinner {
        Spinner::new(&Environment::default())
    }

    #[test]
    fn mass_from_geometry() {
        // π × 0.35² × 0.2 × 1000 L × 1.0 kg/L ≈ 76.97 kg
        let s = spinner();
        assert!((s.mass() - 76.969).abs() < 0.01);
    }

    #[test]
    fn set_mass_back_solves_density() {
        let mut s = spinner();
        s.set_mass(75.0);
        assert!((s.mass() - 75.0).abs() < 1e-9);
        assert!(s.density < DENSITY);
    }

    #[test]
    fn with_mass_after_radius_change() {
        let s = spinner().with_radius(0.25).with_mass(75.0);
        assert!((s.mass() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn inertia_is_half_m_r_squared() {
        let s = spinner();
        let expected = s.mass() * 0.35 * 0.35 / 2.0;
        assert!((s.rotational_inertia() - expected).abs() < 1e-9);
    }

    #[test]
    fn wear_reduces_radius_and_mass() {
        let mut s = spinner();
        let mass_before = s.mass();
        s.wear(0.05);
        assert!((s.radius - 0.30).abs() < 1e-12);
        assert!(s.mass() < mass_before);
    }

    #[test]
    fn friction_zero_at_rest() {
        let s = spinner();
        assert!((s.rotating_friction(0.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn friction_opposes_omega() {
        let s = spinner();
        assert!(s.rotating_friction(10.0) < 0.0);
        assert!(s.rotating_friction(-10.0) > 0.0);
    }

    #[test]
    fn friction_magnitude_grows_with_omega() {
        let s = spinner();
        assert!(s.rotating_friction(100.0).abs() > s.rotating_friction(10.0).abs());
    }

    #[test]
    fn friction_scales_with_normal_force() {
        let s = spinner();
        let light = s.rotating_friction_loaded(10.0, 100.0);
        let heavy = s.rotating_friction_loaded(10.0, 1000.0);
        assert!((heavy - light * 10.0).abs() < 1e-9);
    }

    #[test]
    fn alpha_is_pure() {
        let s = spinner();
        let a1 = s.alpha(100.0, 5.0);
        let a2 = s.alpha(100.0, 5.0);
        assert!((a1 - a2).abs() < f64::EPSILON);
    }

    #[test]
    fn alpha_at_rest_is_torque_over_inertia() {
        let s = spinner();
        let a = s.alpha(100.0, 0.0);
        assert!((a - 100.0 / s.rotational_inertia()).abs() < 1e-12);
    }

    #[test]
    fn implied_torque_inverts_alpha() {
        let s = spinner();
        let alpha = s.alpha(250.0, 0.0);
        assert!((s.implied_torque(alpha) - 250.0).abs() < 1e-9);
    }

    #[test]
    fn energy_at_rest_is_zero() {
        let s = spinner();
        assert!((s.energy(0.0)).abs() < f64::EPSILON);
        assert!(s.energy(10.0) > 0.0);
    }

    #[test]
    fn force_is_torque_over_radius() {
        let s = spinner();
        assert!((s.force(350.0) - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn tangential_conversions_round_trip() {
        let v = tangential(10.0, 0.35);
        assert!((rotational(v, 0.35) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn display_shows_geometry() {
        let s = spinner();
        let out = s.to_string();
        assert!(out.contains("350 mm"));
        assert!(out.contains("kg/L"));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn spinner_is_send_sync() {
        assert_send_sync::<Spinner>();
    }
}
