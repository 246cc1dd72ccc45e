use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct InteractionPreferences {
    pub mouse: DragPreferences,
    pub touch: DragPreferences,

    /// Seconds without input before the cube starts spinning on its own.
    pub inactivity_delay: f32,
    /// Seconds per full turn while spinning on its own.
    pub auto_rotate_period: f32,
}

/// Tuning for dragging the whole cube around.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq)]
#[serde(default)]
pub struct DragPreferences {
    /// Radians of yaw per pixel of horizontal movement.
    pub sensitivity_x: f32,
    /// Radians of pitch per pixel of vertical movement.
    pub sensitivity_y: f32,
    /// Pixels the pointer must move before a press becomes a drag instead of
    /// a click.
    pub threshold: f32,
}

/// Kind of pointer that produced an input.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Mouse or trackpad.
    #[default]
    Mouse,
    /// Touchscreen.
    Touch,
}

impl InteractionPreferences {
    pub fn drag(&self, pointer: PointerKind) -> &DragPreferences {
        match pointer {
            PointerKind::Mouse => &self.mouse,
            PointerKind::Touch => &self.touch,
        }
    }
}
