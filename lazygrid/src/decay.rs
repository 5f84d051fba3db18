//! Spline-based fling decay.
//!
//! The classic Android scroller curve: a fling of initial velocity `v`
//! travels a distance and lasts a duration derived from the platform scroll
//! friction, and its progress over time follows a precomputed spline rather
//! than a plain exponential. The result feels like native touch scrolling.

/// Samples in the precomputed spline table.
const NB_SAMPLES: usize = 100;
const INFLEXION: f64 = 0.35;
const START_TENSION: f64 = 0.5;
const END_TENSION: f64 = 1.0;
const P1: f64 = START_TENSION * INFLEXION;
const P2: f64 = 1.0 - END_TENSION * (1.0 - INFLEXION);
const GRAVITY_EARTH: f64 = 9.806_65;
const INCHES_PER_METER: f64 = 39.37;

/// `ln(0.78) / ln(0.9)`.
fn deceleration_rate() -> f64 {
    0.78f64.ln() / 0.9f64.ln()
}

/// Normalized distance travelled at each of the `NB_SAMPLES + 1` time steps.
#[derive(Debug, Clone)]
pub struct FlingSpline {
    positions: Vec<f64>,
}

impl Default for FlingSpline {
    fn default() -> Self {
        Self::new()
    }
}

impl FlingSpline {
    pub fn new() -> Self {
        // Both ends are exact: a fling starts at its start and ends on its target.
        let mut positions = vec![0.0; NB_SAMPLES + 1];
        let mut x_min = 0.0f64;
        for (i, slot) in positions.iter_mut().enumerate().take(NB_SAMPLES).skip(1) {
            let alpha = i as f64 / NB_SAMPLES as f64;
            let mut x_max = 1.0f64;
            loop {
                let x = x_min + (x_max - x_min) / 2.0;
                let coef = 3.0 * x * (1.0 - x);
                let tx = coef * ((1.0 - x) * P1 + x * P2) + x * x * x;
                if (tx - alpha).abs() < 1e-5 {
                    *slot = coef * ((1.0 - x) * START_TENSION + x) + x * x * x;
                    break;
                }
                if tx > alpha {
                    x_max = x;
                } else {
                    x_min = x;
                }
            }
        }
        positions[NB_SAMPLES] = 1.0;
        Self { positions }
    }

    /// `(distance_coefficient, velocity_coefficient)` at normalized time `t` in `[0, 1]`.
    pub fn at(&self, t: f64) -> (f64, f64) {
        let t = t.clamp(0.0, 1.0);
        let index = (NB_SAMPLES as f64 * t) as usize;
        if index >= NB_SAMPLES {
            return (1.0, 0.0);
        }
        let t_inf = index as f64 / NB_SAMPLES as f64;
        let t_sup = (index + 1) as f64 / NB_SAMPLES as f64;
        let d_inf = self.positions[index];
        let d_sup = self.positions[index + 1];
        let velocity_coef = (d_sup - d_inf) / (t_sup - t_inf);
        (d_inf + (t - t_inf) * velocity_coef, velocity_coef)
    }
}

/// A fling decay curve for a given friction and screen density.
#[derive(Debug, Clone)]
pub struct SplineDecay {
    spline: FlingSpline,
    friction: f64,
    physical_coeff: f64,
}

impl SplineDecay {
    pub fn new(scroll_friction: f32, density: f32) -> Self {
        Self {
            spline: FlingSpline::new(),
            friction: f64::from(scroll_friction),
            physical_coeff: GRAVITY_EARTH * INCHES_PER_METER * f64::from(density) * 160.0 * 0.84,
        }
    }

    fn spline_deceleration(&self, velocity: f64) -> f64 {
        (INFLEXION * velocity.abs() / (self.friction * self.physical_coeff)).ln()
    }

    /// Fling duration in seconds for an initial velocity in px/s.
    pub fn duration(&self, velocity: f32) -> f64 {
        if velocity == 0.0 {
            return 0.0;
        }
        let l = self.spline_deceleration(f64::from(velocity));
        (l / (deceleration_rate() - 1.0)).exp()
    }

    /// Unsigned distance travelled by the whole fling.
    pub fn distance(&self, velocity: f32) -> f64 {
        if velocity == 0.0 {
            return 0.0;
        }
        let l = self.spline_deceleration(f64::from(velocity));
        let rate = deceleration_rate();
        self.friction * self.physical_coeff * (rate / (rate - 1.0) * l).exp()
    }

    /// Plan a fling starting at `start` with `velocity` (px/s, signed).
    pub fn fling(&self, start: f32, velocity: f32) -> Fling {
        Fling {
            start,
            sign: velocity.signum(),
            distance: self.distance(velocity),
            duration: self.duration(velocity),
            spline: self.spline.clone(),
        }
    }
}

/// One planned fling; query it at elapsed time.
#[derive(Debug, Clone)]
pub struct Fling {
    start: f32,
    sign: f32,
    distance: f64,
    /// Seconds.
    duration: f64,
    spline: FlingSpline,
}

impl Fling {
    pub fn duration_secs(&self) -> f64 {
        self.duration
    }

    /// Where the fling comes to rest if nothing stops it.
    pub fn target(&self) -> f32 {
        self.start + self.sign * self.distance as f32
    }

    fn progress(&self, elapsed: f64) -> f64 {
        if self.duration > 0.0 {
            elapsed / self.duration
        } else {
            1.0
        }
    }

    /// Position after `elapsed` seconds.
    pub fn value_at(&self, elapsed: f64) -> f32 {
        let (distance_coef, _) = self.spline.at(self.progress(elapsed));
        self.start + self.sign * (self.distance * distance_coef) as f32
    }

    /// Velocity (px/s) after `elapsed` seconds.
    pub fn velocity_at(&self, elapsed: f64) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        let (_, velocity_coef) = self.spline.at(self.progress(elapsed));
        self.sign * (velocity_coef * self.distance / self.duration) as f32
    }

    pub fn is_finished(&self, elapsed: f64) -> bool {
        elapsed >= self.duration
    }
}
