//! Easing curves for transition progress.

/// Maps linear progress `t ∈ [0.0, 1.0]` onto a curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    /// `t²`
    EaseIn,
    /// `1 - (1-t)²`
    EaseOut,
    /// Quadratic, slow at both ends.
    EaseInOut,
}

impl Easing {
    /// Apply the curve. Input is clamped to `[0.0, 1.0]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(2),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}
