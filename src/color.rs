use crate::Age;
use crate::MAX_AGE;

const COLD_SCALE: f64 = 0.5;
const NEUTRAL_SCALE: f64 = 0.4;
const WARM_SCALE: f64 = 0.3;

/// A color with each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl LinearColor {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Interpolate from `self` (at `t = 0`) to `other` (at `t = 1`).
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        debug_assert!((0f64..=1f64).contains(&t), "lerp t lives in [0, 1]");

        let f = |a: f64, b: f64| a + (b - a) * t;

        Self {
            r: f(self.r, other.r),
            g: f(self.g, other.g),
            b: f(self.b, other.b),
        }
    }

    /// 8 bit channels, truncating.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let f = |c: f64| (c.clamp(0.0, 1.0) * 255.0) as u8;

        (f(self.r), f(self.g), f(self.b))
    }
}

/// Gradient stops, from freshly dead to long dead.
pub const GRADIENT: [LinearColor; 5] = [
    // blue
    LinearColor::new(0.447 * COLD_SCALE, 0.8549 * COLD_SCALE, 0.945 * COLD_SCALE),
    // white
    LinearColor::new(0.88 * NEUTRAL_SCALE, 0.89 * NEUTRAL_SCALE, 0.9 * NEUTRAL_SCALE),
    // orange
    LinearColor::new(0.98823 * WARM_SCALE, 0.584313 * WARM_SCALE, 0.062745 * WARM_SCALE),
    // red
    LinearColor::new(0.7 * WARM_SCALE, 0.2 * WARM_SCALE, 0.1 * WARM_SCALE),
    // black
    LinearColor::BLACK,
];

/// Map an age to its color on a 4 segment gradient.
///
/// The age is normalized to `[0, 1]` and scaled by 4. Its integer part selects the segment, and
/// the fractional part is the position inside it. Ages are clamped to `MAX_AGE - 1`, so the last
/// stop is approached but never quite reached.
pub fn age_to_color(age: Age) -> LinearColor {
    let age = age.min(MAX_AGE - 1);
    let t = age as f64 / MAX_AGE as f64 * 4.0;

    let segment = (t as usize).min(GRADIENT.len() - 2);
    let (from, to) = (&GRADIENT[segment], &GRADIENT[segment + 1]);

    from.lerp(to, t - segment as f64)
}
