//! Damped harmonic spring used to pull overscroll back to rest.
//!
//! Closed-form solution of `x'' = -k (x - target) - c x'` stepped from the
//! current (value, velocity) pair, so variable frame times don't accumulate
//! integration error.

/// Spring parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    pub stiffness: f32,
    /// 1.0 = critically damped, < 1.0 bounces, > 1.0 creeps.
    pub damping_ratio: f32,
    /// Distance from target under which the spring may settle.
    pub visibility_threshold: f32,
}

impl SpringSpec {
    pub const fn new(stiffness: f32, damping_ratio: f32, visibility_threshold: f32) -> Self {
        Self {
            stiffness,
            damping_ratio,
            visibility_threshold,
        }
    }

    #[inline]
    fn natural_freq(&self) -> f64 {
        f64::from(self.stiffness).sqrt()
    }

    /// Advance a spring by `dt` seconds. Returns `(value, velocity)`.
    pub fn step(&self, value: f32, velocity: f32, target: f32, dt: f32) -> (f32, f32) {
        let displacement = f64::from(value - target);
        let v0 = f64::from(velocity);
        let t = f64::from(dt);
        let zeta = f64::from(self.damping_ratio);
        let omega = self.natural_freq();

        let (x, v) = if zeta > 1.0 {
            // Overdamped
            let root = (zeta * zeta - 1.0).sqrt();
            let gamma_plus = -zeta * omega + omega * root;
            let gamma_minus = -zeta * omega - omega * root;
            let coeff_b = (gamma_minus * displacement - v0) / (gamma_minus - gamma_plus);
            let coeff_a = displacement - coeff_b;
            let x = coeff_a * (gamma_minus * t).exp() + coeff_b * (gamma_plus * t).exp();
            let v = coeff_a * gamma_minus * (gamma_minus * t).exp()
                + coeff_b * gamma_plus * (gamma_plus * t).exp();
            (x, v)
        } else if zeta == 1.0 {
            // Critically damped
            let r = -omega;
            let coeff_a = displacement;
            let coeff_b = v0 + omega * displacement;
            let decay = (r * t).exp();
            let x = (coeff_a + coeff_b * t) * decay;
            let v = (coeff_a + coeff_b * t) * decay * r + coeff_b * decay;
            (x, v)
        } else {
            // Underdamped
            let r = -zeta * omega;
            let damped_freq = omega * (1.0 - zeta * zeta).sqrt();
            let cos_coeff = displacement;
            let sin_coeff = (-r * displacement + v0) / damped_freq;
            let decay = (r * t).exp();
            let (sin, cos) = (damped_freq * t).sin_cos();
            let x = decay * (cos_coeff * cos + sin_coeff * sin);
            let v = x * r
                + decay * (-damped_freq * cos_coeff * sin + damped_freq * sin_coeff * cos);
            (x, v)
        };

        (target + x as f32, v as f32)
    }

    /// Whether the spring is close enough to rest to snap to the target.
    pub fn is_settled(&self, value: f32, velocity: f32, target: f32) -> bool {
        (value - target).abs() < self.visibility_threshold
            && velocity.abs() < self.visibility_threshold * 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(spec: SpringSpec, start: f32) -> (f32, usize) {
        let (mut value, mut velocity) = (start, 0.0);
        for frame in 0..600 {
            (value, velocity) = spec.step(value, velocity, 0.0, 1.0 / 60.0);
            if spec.is_settled(value, velocity, 0.0) {
                return (value, frame);
            }
        }
        (value, usize::MAX)
    }

    #[test]
    fn critically_damped_settles_without_crossing() {
        let spec = SpringSpec::new(400.0, 1.0, 0.01);
        let (mut value, mut velocity) = (150.0f32, 0.0f32);
        for _ in 0..120 {
            (value, velocity) = spec.step(value, velocity, 0.0, 1.0 / 60.0);
            assert!(value >= -0.001, "crossed target: {value}");
        }
        assert!(value.abs() < 0.01);
    }

    #[test]
    fn all_damping_regimes_settle() {
        for zeta in [0.5, 1.0, 1.5] {
            let (value, frames) = settle(SpringSpec::new(400.0, zeta, 0.01), -120.0);
            assert!(frames < 600, "zeta {zeta} never settled");
            assert!(value.abs() < 0.01);
        }
    }

    #[test]
    fn zero_dt_is_identity() {
        let spec = SpringSpec::new(400.0, 1.0, 0.01);
        let (value, velocity) = spec.step(42.0, -3.0, 0.0, 0.0);
        assert!((value - 42.0).abs() < 1e-4);
        assert!((velocity + 3.0).abs() < 1e-4);
    }
}
