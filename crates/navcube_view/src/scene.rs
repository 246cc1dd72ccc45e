use cgmath::Matrix3;
use navcube_core::{CubieId, CubieRegistry, CubieTransform};
use navcube_prefs::FaceColors;

/// Scene graph that draws the cubies.
///
/// The engine owns all transforms; the scene is only told when cubies move
/// between the root and the transient pivot of the current move. Every
/// method has a no-op default.
pub trait Scene {
    /// Moves a cubie under the pivot. The pivot rotation is the identity at
    /// this point, so the cubie's world transform is unchanged.
    fn attach(&mut self, cubie: CubieId) {
        let _ = cubie;
    }
    /// Moves a cubie back under the root with its new, snapped transform.
    fn detach(&mut self, cubie: CubieId, transform: &CubieTransform) {
        let _ = (cubie, transform);
    }
    /// Updates the rotation of the pivot.
    fn pivot_rotated(&mut self, rotation: &Matrix3<f32>) {
        let _ = rotation;
    }
    /// Replaces every cubie after a hard reset. Each sticker is drawn with
    /// the color of the face it is tagged with.
    fn rebuilt(&mut self, registry: &CubieRegistry, colors: &FaceColors) {
        let _ = (registry, colors);
    }
    /// Repaints the stickers without moving any cubie.
    fn recolored(&mut self, colors: &FaceColors) {
        let _ = colors;
    }
}

/// Scene that draws nothing.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct NullScene;
impl Scene for NullScene {}
