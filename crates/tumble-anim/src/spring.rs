//! Spring physics for interpolation that may overshoot before settling.
//!
//! Springs are described by friction and tension and converted to
//! stiffness and damping with the Origami conversion, then solved
//! analytically as a damped harmonic oscillator with unit mass. Solving
//! in closed form (rather than integrating per frame) keeps the result
//! independent of the frame rate.

use serde::{Deserialize, Serialize};

use crate::error::{AnimError, AnimResult};

/// Default friction, giving a well damped spring.
pub const DEFAULT_FRICTION: f64 = 7.0;
/// Default tension.
pub const DEFAULT_TENSION: f64 = 40.0;
/// Below this speed (units per second) a spring may come to rest.
pub const REST_SPEED_THRESHOLD: f64 = 0.001;
/// Below this distance from the target a spring may come to rest.
pub const REST_DISPLACEMENT_THRESHOLD: f64 = 0.001;
/// Damping ratios this close to 1.0 use the critically damped solution.
const CRITICAL_EPSILON: f64 = 1e-6;

/// Friction/tension parameters of a spring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Resistance; lower values oscillate longer.
    pub friction: f64,
    /// Pull toward the target; higher values move faster.
    pub tension: f64,
    /// Initial velocity in units per second.
    pub velocity: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            friction: DEFAULT_FRICTION,
            tension: DEFAULT_TENSION,
            velocity: 0.0,
        }
    }
}

impl SpringConfig {
    /// Create a spring from friction and tension, at rest initially.
    pub fn new(friction: f64, tension: f64) -> Self {
        Self {
            friction,
            tension,
            velocity: 0.0,
        }
    }

    /// Set the initial velocity in units per second.
    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = velocity;
        self
    }

    /// Stiffness derived from tension.
    pub fn stiffness(&self) -> f64 {
        (self.tension - 30.0) * 3.62 + 194.0
    }

    /// Damping derived from friction.
    pub fn damping(&self) -> f64 {
        (self.friction - 8.0) * 3.0 + 25.0
    }

    /// Damping ratio; below 1.0 the spring overshoots its target.
    pub fn damping_ratio(&self) -> f64 {
        self.damping() / (2.0 * self.stiffness().sqrt())
    }

    /// Check that the spring comes to rest.
    pub fn validate(&self) -> AnimResult<()> {
        if !self.friction.is_finite() || !self.tension.is_finite() || !self.velocity.is_finite() {
            return Err(AnimError::InvalidSpring(format!(
                "parameters must be finite (friction {}, tension {}, velocity {})",
                self.friction, self.tension, self.velocity
            )));
        }
        if self.stiffness() <= 0.0 {
            return Err(AnimError::InvalidSpring(format!(
                "tension {} gives non-positive stiffness",
                self.tension
            )));
        }
        if self.damping() <= 0.0 {
            return Err(AnimError::InvalidSpring(format!(
                "friction {} gives non-positive damping, the spring would never settle",
                self.friction
            )));
        }
        Ok(())
    }
}

/// Closed-form motion of one spring from `from` toward `to`.
#[derive(Debug, Clone, Copy)]
pub struct SpringMotion {
    to: f64,
    x0: f64,
    v0: f64,
    omega0: f64,
    zeta: f64,
}

impl SpringMotion {
    /// Prepare the motion of a spring released at `from` toward `to`.
    pub fn new(config: &SpringConfig, from: f64, to: f64) -> Self {
        let stiffness = config.stiffness();
        let damping = config.damping();
        Self {
            to,
            x0: to - from,
            v0: -config.velocity,
            omega0: stiffness.sqrt(),
            zeta: damping / (2.0 * stiffness.sqrt()),
        }
    }

    /// Position and velocity (units per second) after `t` seconds.
    pub fn sample(&self, t: f64) -> (f64, f64) {
        let Self {
            to,
            x0,
            v0,
            omega0,
            zeta,
        } = *self;

        if (zeta - 1.0).abs() < CRITICAL_EPSILON {
            let envelope = (-omega0 * t).exp();
            let position = to - envelope * (x0 + (v0 + omega0 * x0) * t);
            let velocity = envelope * (v0 * (t * omega0 - 1.0) + t * x0 * omega0 * omega0);
            (position, velocity)
        } else if zeta < 1.0 {
            let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * omega0 * t).exp();
            let (sin, cos) = (omega1 * t).sin_cos();
            let a = (v0 + zeta * omega0 * x0) / omega1;
            let position = to - envelope * (a * sin + x0 * cos);
            let velocity = zeta * omega0 * envelope * (a * sin + x0 * cos)
                - envelope * (a * omega1 * cos - omega1 * x0 * sin);
            (position, velocity)
        } else {
            // Overdamped: two real exponential modes.
            let root = omega0 * (zeta * zeta - 1.0).sqrt();
            let r1 = -zeta * omega0 + root;
            let r2 = -zeta * omega0 - root;
            // displacement(t) = c1 e^(r1 t) + c2 e^(r2 t), displacement(0) = x0,
            // displacement'(0) = v0 where displacement = to - position.
            let c2 = (v0 - r1 * x0) / (r2 - r1);
            let c1 = x0 - c2;
            let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
            let displacement = c1 * e1 + c2 * e2;
            let displacement_rate = c1 * r1 * e1 + c2 * r2 * e2;
            (to - displacement, -displacement_rate)
        }
    }

    /// Whether a sampled state is close enough to the target to stop.
    pub fn is_at_rest(&self, position: f64, velocity: f64) -> bool {
        velocity.abs() <= REST_SPEED_THRESHOLD
            && (self.to - position).abs() <= REST_DISPLACEMENT_THRESHOLD
    }

    /// The target value.
    pub fn target(&self) -> f64 {
        self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle_time(config: &SpringConfig, from: f64, to: f64) -> f64 {
        let motion = SpringMotion::new(config, from, to);
        let mut t = 0.0;
        loop {
            t += 1.0 / 60.0;
            let (p, v) = motion.sample(t);
            if motion.is_at_rest(p, v) {
                return t;
            }
            assert!(t < 30.0, "spring did not settle");
        }
    }

    #[test]
    fn origami_conversion() {
        let config = SpringConfig::new(3.0, 80.0);
        assert!((config.stiffness() - 375.0).abs() < 1e-9);
        assert!((config.damping() - 10.0).abs() < 1e-9);

        let default = SpringConfig::default();
        assert!((default.stiffness() - 230.2).abs() < 1e-9);
        assert!((default.damping() - 22.0).abs() < 1e-9);
    }

    #[test]
    fn starts_at_origin() {
        let motion = SpringMotion::new(&SpringConfig::new(3.0, 80.0), 0.4, 1.0);
        let (p, v) = motion.sample(0.0);
        assert!((p - 0.4).abs() < 1e-12);
        assert!(v.abs() < 1e-9);
    }

    #[test]
    fn low_friction_overshoots() {
        let config = SpringConfig::new(3.0, 80.0);
        assert!(config.damping_ratio() < 1.0);
        let motion = SpringMotion::new(&config, 0.4, 1.0);
        let peak = (1..200)
            .map(|i| motion.sample(f64::from(i) / 200.0).0)
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.05, "expected overshoot, peak was {peak}");
    }

    #[test]
    fn high_friction_does_not_overshoot() {
        let config = SpringConfig::new(40.0, 40.0);
        assert!(config.damping_ratio() > 1.0);
        let motion = SpringMotion::new(&config, 0.0, 1.0);
        for i in 0..400 {
            let (p, _) = motion.sample(f64::from(i) / 100.0);
            assert!(p <= 1.0 + 1e-9, "overdamped spring overshot at step {i}: {p}");
        }
    }

    #[test]
    fn critically_damped_converges() {
        // damping 2*sqrt(stiffness): stiffness 194 at tension 30.
        let friction = (2.0 * 194.0_f64.sqrt() - 25.0) / 3.0 + 8.0;
        let config = SpringConfig::new(friction, 30.0);
        assert!((config.damping_ratio() - 1.0).abs() < 1e-6);
        let motion = SpringMotion::new(&config, 0.0, 1.0);
        let (p, _) = motion.sample(3.0);
        assert!((p - 1.0).abs() < 1e-3);
    }

    #[test]
    fn all_regimes_settle() {
        for (friction, tension) in [(3.0, 40.0), (3.0, 80.0), (7.0, 40.0), (40.0, 40.0)] {
            let t = settle_time(&SpringConfig::new(friction, tension), 1.0, 0.9);
            assert!(t > 0.0);
        }
    }

    #[test]
    fn bounce_settles_within_a_few_seconds() {
        let t = settle_time(&SpringConfig::new(3.0, 80.0), 0.4, 1.0);
        assert!(t > 0.5 && t < 2.5, "settled after {t}s");
    }

    #[test]
    fn initial_velocity_moves_away_first() {
        let config = SpringConfig::default().with_velocity(-5.0);
        let motion = SpringMotion::new(&config, 0.0, 1.0);
        let (p, _) = motion.sample(0.01);
        assert!(p < 0.0, "negative velocity should pull below the origin, got {p}");
    }

    #[test]
    fn validation() {
        assert!(SpringConfig::default().validate().is_ok());
        assert!(SpringConfig::new(-1.0, 40.0).validate().is_err());
        assert!(SpringConfig::new(3.0, -40.0).validate().is_err());
        assert!(SpringConfig::new(f64::NAN, 40.0).validate().is_err());
    }
}
