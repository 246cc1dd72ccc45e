use navcube_prefs::{InterpolateFn, TweenPreferences};
use web_time::Duration;

use crate::util::duration_from_secs;

/// Eased interpolation of a single value over time.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: Duration,
    interpolation: InterpolateFn,
    /// Progress from 0.0 to 1.0.
    progress: f32,
}
impl Tween {
    /// Constructs a tween from `from` to `to`.
    pub fn new(from: f32, to: f32, duration: Duration, interpolation: InterpolateFn) -> Self {
        Self {
            from,
            to,
            duration,
            interpolation,
            progress: 0.0,
        }
    }
    /// Constructs a tween from `from` to `to` with duration and easing taken
    /// from preferences.
    pub fn from_prefs(from: f32, to: f32, prefs: &TweenPreferences) -> Self {
        Self::new(
            from,
            to,
            duration_from_secs(prefs.duration),
            prefs.interpolation,
        )
    }

    /// Steps the tween forward. Returns whether it is still running.
    pub fn proceed(&mut self, delta: Duration) -> bool {
        if self.duration.is_zero() {
            self.progress = 1.0;
        } else {
            self.progress += delta.as_secs_f32() / self.duration.as_secs_f32();
        }
        // Also catches NaN from a degenerate duration.
        if !(0.0..1.0).contains(&self.progress) {
            self.progress = 1.0;
        }
        !self.is_done()
    }

    /// Returns whether the tween has reached its target.
    pub fn is_done(&self) -> bool {
        self.progress >= 1.0
    }
    /// Returns the current value.
    pub fn value(&self) -> f32 {
        if self.is_done() {
            return self.to;
        }
        let t = self.interpolation.interpolate(self.progress);
        self.from + (self.to - self.from) * t
    }
    /// Returns the value that the tween ends at.
    pub fn target(&self) -> f32 {
        self.to
    }
}

/// Scale of the face labels, which shrink while the cube is scrambled and
/// grow back once it is solved.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelScale {
    value: f32,
    tween: Option<Tween>,
}
impl LabelScale {
    /// Constructs a label scale that is not animating.
    pub fn new(value: f32) -> Self {
        Self { value, tween: None }
    }

    /// Returns the current scale.
    pub fn get(&self) -> f32 {
        match &self.tween {
            Some(tween) => tween.value(),
            None => self.value,
        }
    }
    /// Jumps to a scale, cancelling any running tween.
    pub fn set(&mut self, value: f32) {
        self.value = value;
        self.tween = None;
    }
    /// Starts animating from the current scale to `target`.
    pub fn animate_to(&mut self, target: f32, prefs: &TweenPreferences) {
        self.tween = Some(Tween::from_prefs(self.get(), target, prefs));
    }
    /// Returns whether a tween is running.
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Steps the tween forward. Returns whether the labels should be redrawn.
    pub fn proceed(&mut self, delta: Duration) -> bool {
        let Some(tween) = &mut self.tween else {
            return false;
        };
        if !tween.proceed(delta) {
            self.value = tween.target();
            self.tween = None;
        }
        true
    }
}
