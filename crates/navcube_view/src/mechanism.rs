use navcube_core::{CubeError, CubieId, CubieRegistry, CubieTransform, Lattice, Move};
use navcube_prefs::{FaceColors, InterpolateFn, Preferences};
use web_time::Duration;

use crate::animations::TwistAnimationState;
use crate::{Completion, MoveError, MoveQueue, Scene};

/// Cubie registry together with the move engine and move queue that drive it.
#[derive(Debug, Clone)]
pub struct Mechanism {
    registry: CubieRegistry,
    twist: TwistAnimationState,
    queue: MoveQueue,
    interpolation: InterpolateFn,
    colors: FaceColors,
}
impl Default for Mechanism {
    fn default() -> Self {
        Self::new(Lattice::default(), InterpolateFn::default())
    }
}
impl Mechanism {
    /// Constructs a solved cube.
    pub fn new(lattice: Lattice, interpolation: InterpolateFn) -> Self {
        Self {
            registry: CubieRegistry::new(lattice),
            twist: TwistAnimationState::default(),
            queue: MoveQueue::default(),
            interpolation,
            colors: FaceColors::default(),
        }
    }
    /// Constructs a solved cube with lattice, easing, and colors taken from
    /// preferences.
    pub fn from_prefs(prefs: &Preferences) -> Self {
        let mut ret = Self::new(prefs.lattice(), prefs.animation.twist_interpolation);
        ret.colors = prefs.colors.clone();
        ret
    }

    /// Returns the cubies.
    pub fn registry(&self) -> &CubieRegistry {
        &self.registry
    }
    /// Returns the move engine.
    pub fn twist(&self) -> &TwistAnimationState {
        &self.twist
    }
    /// Returns the move queue.
    pub fn queue(&self) -> &MoveQueue {
        &self.queue
    }
    /// Returns the sticker colors.
    pub fn colors(&self) -> &FaceColors {
        &self.colors
    }
    /// Sets the easing used for moves that have not started yet.
    pub fn set_interpolation(&mut self, interpolation: InterpolateFn) {
        self.interpolation = interpolation;
    }
    /// Sets the sticker colors and repaints the scene if they changed.
    pub fn set_colors(&mut self, colors: FaceColors, scene: &mut impl Scene) {
        if self.colors != colors {
            self.colors = colors;
            scene.recolored(&self.colors);
        }
    }

    /// Returns whether no move is playing or waiting.
    pub fn is_idle(&self) -> bool {
        self.twist.is_idle() && self.queue.is_empty()
    }

    /// Appends a move to the queue.
    pub fn enqueue(&mut self, mv: Move, duration: Duration) -> Completion {
        self.queue.enqueue(mv, duration)
    }
    /// Returns a handle that resolves once every queued move has snapped.
    pub fn drain(&mut self) -> Completion {
        if self.is_idle() && !self.queue.is_draining() {
            return Completion::resolved(Ok(()));
        }
        self.queue.drain()
    }

    /// Returns the transform that `cubie` should be drawn with.
    pub fn render_transform(&self, cubie: CubieId) -> Result<CubieTransform, CubeError> {
        self.twist.render_transform(&self.registry, cubie)
    }

    /// Discards all cubies and rebuilds a solved cube on the same lattice.
    ///
    /// A move in progress is completed and snapped first. Moves still waiting
    /// are discarded, and so is the drain in progress.
    pub fn rebuild(&mut self, scene: &mut impl Scene) {
        let lattice = *self.registry.lattice();
        self.rebuild_with(lattice, scene);
    }
    /// Same as [`Mechanism::rebuild()`], but places the new cubies on
    /// `lattice`.
    pub fn rebuild_with(&mut self, lattice: Lattice, scene: &mut impl Scene) {
        if let Some(Err(e)) = self.twist.finish(&mut self.registry, scene) {
            log::warn!("error finishing move before rebuild: {e}");
        }
        let discarded = self.queue.abort(MoveError::Discarded);
        if discarded > 0 {
            log::debug!("discarded {discarded} queued moves");
        }
        if lattice == *self.registry.lattice() {
            self.registry.rebuild();
        } else {
            log::debug!("moving cubies to lattice gap {}", lattice.gap);
            self.registry = CubieRegistry::new(lattice);
        }
        scene.rebuilt(&self.registry, &self.colors);
    }

    /// Steps the mechanism forward. Returns whether the cube should be
    /// redrawn.
    pub fn proceed(&mut self, delta: Duration, scene: &mut impl Scene) -> bool {
        if self.twist.is_idle()
            && let Some(next) = self.queue.pop_front()
        {
            let started = self.twist.start(
                &mut self.registry,
                scene,
                next.mv,
                next.duration,
                self.interpolation,
                next.completion,
            );
            if let Err(e) = started {
                self.abort(e);
            }
        }

        let needs_redraw = !self.twist.is_idle();
        if let Some(Err(e)) = self.twist.proceed(delta, &mut self.registry, scene) {
            self.abort(e);
        }

        if self.is_idle() {
            self.queue.finish_drain();
        }
        needs_redraw
    }

    fn abort(&mut self, error: CubeError) {
        let discarded = self.queue.abort(error.into());
        log::error!("move aborted; discarded {discarded} queued moves");
    }
}
