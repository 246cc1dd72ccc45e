use serde::{Deserialize, Serialize};

pub use interpolation::InterpolateFn;

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Duration of one quarter or half turn, in seconds.
    pub twist_duration: f32,
    pub twist_interpolation: InterpolateFn,

    pub scramble_length: usize,
    pub intro_scramble_length: usize,

    /// Pause between the end of a scramble and the start of its solve.
    pub scramble_pause: f32,
    /// Pause before and after the intro scramble.
    pub intro_pause: f32,
    /// Pause between the labels growing back and the destination reveal.
    pub reveal_pause: f32,

    pub label_small_scale: f32,
    pub label_large_scale: f32,
    pub label_shrink: TweenPreferences,
    pub label_grow: TweenPreferences,
}

/// Duration and easing of a tween.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq)]
#[serde(default)]
pub struct TweenPreferences {
    /// Duration in seconds.
    pub duration: f32,
    pub interpolation: InterpolateFn,
}

pub mod interpolation {
    //! Interpolation functions.

    use std::f32::consts::PI;

    use serde::{Deserialize, Serialize};
    use strum::VariantArray;

    /// Function that maps a float from the range 0.0 to 1.0 to another float,
    /// mapping 0.0 to 0.0 and 1.0 to 1.0.
    #[derive(
        Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, VariantArray,
    )]
    #[serde(rename_all = "snake_case")]
    pub enum InterpolateFn {
        Lerp,
        Cosine,
        Cubic,
        #[default]
        CubicInOut,
        QuadInOut,
        BackOut,
        ElasticOut,
    }

    impl InterpolateFn {
        /// Returns the interpolation value for `t` in the range [0, 1]. Inputs
        /// outside that range are clamped.
        ///
        /// Some functions overshoot 1.0 in the middle of the range.
        pub fn interpolate(self, t: f32) -> f32 {
            if t <= 0.0 {
                return 0.0;
            } else if t >= 1.0 {
                return 1.0;
            }
            match self {
                Self::Lerp => t,

                Self::Cosine => (1.0 - (t * PI).cos()) / 2.0,

                Self::Cubic => (3.0 - 2.0 * t) * t * t,

                Self::CubicInOut => {
                    if t < 0.5 {
                        4.0 * t * t * t
                    } else {
                        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                    }
                }

                Self::QuadInOut => {
                    if t < 0.5 {
                        2.0 * t * t
                    } else {
                        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                    }
                }

                Self::BackOut => {
                    // https://easings.net/#easeOutBack
                    let c1 = 1.70158;
                    let c3 = c1 + 1.0;
                    1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
                }

                Self::ElasticOut => {
                    // Amplitude 1, period 0.5
                    let period = 0.5;
                    let shift = period / 4.0;
                    2.0_f32.powf(-10.0 * t) * ((t - shift) * (2.0 * PI) / period).sin() + 1.0
                }
            }
        }
    }
}
