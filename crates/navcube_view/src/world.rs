use std::f32::consts::TAU;

use cgmath::{Matrix3, Rad};
use navcube_prefs::{InteractionPreferences, PointerKind};
use web_time::Duration;

use crate::util::duration_from_secs;

/// What a pointer release turned out to be.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerRelease {
    /// The pointer never moved past the drag threshold. Contains the release
    /// position.
    Click([f32; 2]),
    /// The pointer rotated the cube.
    DragEnd,
    /// No press was in progress.
    Ignored,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct DragState {
    pointer: PointerKind,
    last: [f32; 2],
    dragged: bool,
}

/// Rotation of the whole assembly, controlled by pointer drags and by an
/// automatic spin after a period of inactivity.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WorldRotation {
    /// Rotation about the Y axis, in radians.
    yaw: f32,
    /// Rotation about the X axis, in radians.
    pitch: f32,
    drag: Option<DragState>,
    /// Time since the last input.
    idle: Duration,
    auto_rotating: bool,
}
impl WorldRotation {
    /// Returns the rotation about the Y axis, in radians.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }
    /// Returns the rotation about the X axis, in radians.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }
    /// Returns the rotation matrix, pitch applied after yaw.
    pub fn matrix(&self) -> Matrix3<f32> {
        Matrix3::from_angle_x(Rad(self.pitch)) * Matrix3::from_angle_y(Rad(self.yaw))
    }
    /// Returns whether the cube is spinning on its own.
    pub fn is_auto_rotating(&self) -> bool {
        self.auto_rotating
    }
    /// Returns whether a press has turned into a drag.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some_and(|d| d.dragged)
    }

    /// Records user input: stops the automatic spin and restarts the
    /// inactivity timer.
    pub fn touch(&mut self) {
        if self.auto_rotating {
            log::trace!("auto-rotate stopped");
        }
        self.auto_rotating = false;
        self.idle = Duration::ZERO;
    }

    /// Handles a pointer press.
    pub fn pointer_down(&mut self, pointer: PointerKind, pos: [f32; 2]) {
        self.touch();
        self.drag = Some(DragState {
            pointer,
            last: pos,
            dragged: false,
        });
    }
    /// Handles pointer movement. Returns whether the cube rotated.
    ///
    /// Movement is measured from the previous event, and only movement past
    /// the threshold for the pointer kind rotates the cube.
    pub fn pointer_move(&mut self, pos: [f32; 2], prefs: &InteractionPreferences) -> bool {
        let Some(drag) = &mut self.drag else {
            return false;
        };
        self.auto_rotating = false;
        self.idle = Duration::ZERO;

        let [dx, dy] = [pos[0] - drag.last[0], pos[1] - drag.last[1]];
        drag.last = pos;
        let drag_prefs = prefs.drag(drag.pointer);
        if dx.abs() > drag_prefs.threshold || dy.abs() > drag_prefs.threshold {
            drag.dragged = true;
            self.yaw += dx * drag_prefs.sensitivity_x;
            self.pitch += dy * drag_prefs.sensitivity_y;
            true
        } else {
            false
        }
    }
    /// Handles a pointer release.
    pub fn pointer_up(&mut self, pos: [f32; 2]) -> PointerRelease {
        match self.drag.take() {
            Some(drag) if drag.dragged => PointerRelease::DragEnd,
            Some(_) => PointerRelease::Click(pos),
            None => PointerRelease::Ignored,
        }
    }

    /// Steps the inactivity timer and the automatic spin forward. Returns
    /// whether more frames are needed, which is the case whenever no pointer
    /// is down.
    pub fn proceed(&mut self, delta: Duration, prefs: &InteractionPreferences) -> bool {
        if self.drag.is_some() {
            return false;
        }
        if !self.auto_rotating {
            self.idle += delta;
            if self.idle < duration_from_secs(prefs.inactivity_delay) {
                return true;
            }
            log::trace!("auto-rotate started");
            self.auto_rotating = true;
        }
        if prefs.auto_rotate_period > 0.0 {
            self.yaw += TAU * delta.as_secs_f32() / prefs.auto_rotate_period;
            self.yaw = self.yaw.rem_euclid(TAU);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use navcube_prefs::DEFAULT_PREFS;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_click_vs_drag() {
        let prefs = &DEFAULT_PREFS.interaction;
        let mut world = WorldRotation::default();

        world.pointer_down(PointerKind::Mouse, [100.0, 100.0]);
        assert!(!world.pointer_move([101.5, 100.0], prefs));
        assert_eq!(PointerRelease::Click([101.5, 100.0]), world.pointer_up([101.5, 100.0]));
        assert_eq!(0.0, world.yaw());

        world.pointer_down(PointerKind::Mouse, [100.0, 100.0]);
        assert!(world.pointer_move([110.0, 104.0], prefs));
        assert!(world.is_dragging());
        assert_eq!(PointerRelease::DragEnd, world.pointer_up([110.0, 104.0]));
        assert!((world.yaw() - 10.0 * 0.005).abs() < 1e-6);
        assert!((world.pitch() - 4.0 * 0.003).abs() < 1e-6);

        assert_eq!(PointerRelease::Ignored, world.pointer_up([0.0, 0.0]));
    }

    #[test]
    fn test_touch_is_more_sensitive_but_has_a_larger_threshold() {
        let prefs = &DEFAULT_PREFS.interaction;
        let mut world = WorldRotation::default();
        world.pointer_down(PointerKind::Touch, [0.0, 0.0]);
        assert!(!world.pointer_move([4.0, 4.0], prefs));
        assert!(world.pointer_move([14.0, 4.0], prefs));
        assert!((world.yaw() - 10.0 * 0.008).abs() < 1e-6);
        assert_eq!(0.0, world.pitch());
    }

    #[test]
    fn test_auto_rotate_after_inactivity() {
        let prefs = &DEFAULT_PREFS.interaction;
        let mut world = WorldRotation::default();
        // The countdown keeps the frame clock running without rotating.
        assert!(world.proceed(Duration::from_millis(1500), prefs));
        assert!(!world.is_auto_rotating());
        assert_eq!(0.0, world.yaw());
        assert!(world.proceed(Duration::from_millis(500), prefs));
        assert!(world.is_auto_rotating());

        let yaw = world.yaw();
        world.proceed(Duration::from_secs(5), prefs);
        // A quarter turn per five seconds.
        assert!((world.yaw() - yaw - TAU / 4.0).abs() < 1e-4);

        world.pointer_down(PointerKind::Mouse, [0.0, 0.0]);
        assert!(!world.is_auto_rotating());
        assert!(!world.proceed(Duration::from_secs(10), prefs));
    }
}
