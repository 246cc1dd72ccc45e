use navcube_core::{
    CubeError, CubieId, CubieRegistry, CubieTransform, Destination, Face, LatticePoint, Move,
    Scramble, parse_tokens,
};
use navcube_prefs::{PointerKind, Preferences};
use web_time::{Duration, Instant};

use crate::choreography::{Choreographer, Choreography, CubeEvent};
use crate::tween::LabelScale;
use crate::util::duration_from_secs;
use crate::world::{PointerRelease, WorldRotation};
use crate::{Completion, Mechanism, MoveError, NullScene, Scene};

const ASSUMED_FPS: f32 = 120.0;

/// Navigation cube simulation, which manages the cubies, the move queue,
/// choreographies, label scale, and world rotation.
#[derive(Debug)]
pub struct CubeSimulation<S = NullScene> {
    prefs: Preferences,
    mechanism: Mechanism,
    choreographer: Choreographer,
    label: LabelScale,
    world: WorldRotation,
    scene: S,

    /// Events not yet taken by [`CubeSimulation::drain_events()`].
    events: Vec<CubeEvent>,

    /// Time of last frame, or `None` if we are not in the middle of an
    /// animation.
    last_frame_time: Option<Instant>,
}
impl CubeSimulation<NullScene> {
    /// Constructs a simulation of a solved cube with no scene attached.
    pub fn new(prefs: Preferences) -> Self {
        Self::with_scene(prefs, NullScene)
    }
}
impl<S: Scene> CubeSimulation<S> {
    /// Constructs a simulation of a solved cube drawn by `scene`.
    pub fn with_scene(prefs: Preferences, mut scene: S) -> Self {
        let mechanism = Mechanism::from_prefs(&prefs);
        scene.rebuilt(mechanism.registry(), mechanism.colors());
        Self {
            mechanism,
            choreographer: Choreographer::default(),
            label: LabelScale::new(prefs.animation.label_large_scale),
            world: WorldRotation::default(),
            scene,

            events: vec![],

            last_frame_time: None,

            prefs,
        }
    }
    /// Makes choreography scrambles reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.choreographer = Choreographer::with_seed(seed);
        self
    }

    /// Returns the preferences.
    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }
    /// Replaces the preferences. New colors are repainted right away. The
    /// lattice gap only takes effect on the next hard reset.
    pub fn set_prefs(&mut self, prefs: Preferences) {
        self.mechanism
            .set_interpolation(prefs.animation.twist_interpolation);
        self.mechanism
            .set_colors(prefs.colors.clone(), &mut self.scene);
        self.prefs = prefs;
    }
    /// Returns the scene.
    pub fn scene(&self) -> &S {
        &self.scene
    }
    /// Returns the scene.
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }
    /// Returns the cubies.
    pub fn registry(&self) -> &CubieRegistry {
        self.mechanism.registry()
    }
    /// Returns the registry, move engine, and move queue.
    pub fn mechanism(&self) -> &Mechanism {
        &self.mechanism
    }
    /// Returns the rotation of the whole assembly.
    pub fn world(&self) -> &WorldRotation {
        &self.world
    }

    /// Returns the default duration of one move.
    pub fn twist_duration(&self) -> Duration {
        duration_from_secs(self.prefs.animation.twist_duration)
    }

    /// Decodes a move token and queues it. Nothing is queued if the token is
    /// invalid.
    pub fn apply_move(&mut self, token: &str, duration: Duration) -> Result<Completion, MoveError> {
        let mv: Move = token.parse()?;
        Ok(self.mechanism.enqueue(mv, duration))
    }
    /// Decodes every token and queues them, then returns a handle that
    /// resolves once the queue has drained. Nothing is queued if any token is
    /// invalid.
    pub fn enqueue_and_drain<T: AsRef<str>>(
        &mut self,
        tokens: &[T],
    ) -> Result<Completion, MoveError> {
        let moves = parse_tokens(tokens)?;
        Ok(self.enqueue_moves_and_drain(&moves))
    }
    /// Queues moves, then returns a handle that resolves once the queue has
    /// drained.
    pub fn enqueue_moves_and_drain(&mut self, moves: &[Move]) -> Completion {
        let duration = self.twist_duration();
        for &mv in moves {
            self.mechanism.enqueue(mv, duration);
        }
        self.mechanism.drain()
    }

    /// Discards all cubies and rebuilds a solved cube with the current lattice
    /// gap. A move in progress is completed first. Moves still waiting resolve
    /// with [`MoveError::Discarded`], and a choreography that is playing is
    /// aborted.
    pub fn rebuild_registry(&mut self) {
        log::info!("hard reset");
        self.choreographer
            .cancel(MoveError::Discarded, &mut self.events);
        self.mechanism
            .rebuild_with(self.prefs.lattice(), &mut self.scene);
        self.label.set(self.prefs.animation.label_large_scale);
    }

    /// Steps the simulation forward by `delta`. Returns whether the cube
    /// should be redrawn next frame.
    pub fn step(&mut self, delta: Duration) -> bool {
        let mut needs_redraw = false;

        needs_redraw |= self.choreographer.proceed(
            delta,
            &mut self.mechanism,
            &mut self.label,
            &mut self.scene,
            &self.prefs.animation,
            &mut self.events,
        );
        needs_redraw |= self.label.proceed(delta);
        needs_redraw |= self.mechanism.proceed(delta, &mut self.scene);
        if self.choreographer.is_busy() {
            self.world.touch();
        } else {
            needs_redraw |= self.world.proceed(delta, &self.prefs.interaction);
        }

        needs_redraw
    }
    /// Steps the simulation forward by the time elapsed since the previous
    /// frame. Returns whether the cube should be redrawn next frame.
    pub fn step_realtime(&mut self) -> bool {
        let now = Instant::now();
        let delta = match self.last_frame_time {
            Some(then) => now - then,
            None => Duration::from_secs_f32(1.0 / ASSUMED_FPS),
        };

        let needs_redraw = self.step(delta);
        if needs_redraw {
            self.last_frame_time = Some(now);
        } else {
            self.last_frame_time = None;
        }
        needs_redraw
    }

    /// Returns whether nothing is animating: no move is playing or waiting,
    /// no choreography is playing, and the labels are still.
    pub fn is_idle(&self) -> bool {
        self.mechanism.is_idle() && !self.choreographer.is_busy() && !self.label.is_animating()
    }
    /// Returns whether a choreography is playing.
    pub fn is_busy(&self) -> bool {
        self.choreographer.is_busy()
    }

    /// Returns the transform that `cubie` should be drawn with, relative to
    /// the assembly.
    pub fn render_transform(&self, cubie: CubieId) -> Result<CubieTransform, CubeError> {
        self.mechanism.render_transform(cubie)
    }
    /// Returns the current scale of the face labels.
    pub fn label_scale(&self) -> f32 {
        self.label.get()
    }
    /// Returns the most recent scramble played by a choreography.
    pub fn last_scramble(&self) -> Option<&Scramble> {
        self.choreographer.last_scramble()
    }
    /// Takes all events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<CubeEvent> {
        std::mem::take(&mut self.events)
    }

    /// Handles selection of a sticker tagged `face`. Returns whether anything
    /// happened; selections while a choreography is playing are ignored.
    pub fn select_face(&mut self, face: Face) -> bool {
        self.world.touch();
        if self.world.is_dragging() {
            log::debug!("ignoring selection of {face} during drag");
            return false;
        }
        let destination = Destination::from_face(face);
        if !destination.scrambles() {
            if self.choreographer.is_busy() {
                log::debug!("ignoring selection of {destination} while busy");
                return false;
            }
            log::info!("navigating to {destination}");
            self.events.push(CubeEvent::NavigateHome);
            return true;
        }
        self.choreographer.trigger(
            Choreography::ScrambleAndSolve(destination),
            &self.prefs.animation,
        )
    }
    /// Handles a click on the sticker of the cubie at `point` that faces
    /// `direction`. Returns whether anything happened.
    pub fn click_sticker(&mut self, point: LatticePoint, direction: Face) -> bool {
        match self.sticker_at(point, direction) {
            Some(face) => self.select_face(face),
            None => false,
        }
    }
    /// Returns the tag of the sticker on the cubie at `point` that faces
    /// `direction`, if there is one.
    pub fn sticker_at(&self, point: LatticePoint, direction: Face) -> Option<Face> {
        let registry = self.mechanism.registry();
        let cubie = registry.get(registry.cubie_at(point)?).ok()?;
        cubie
            .stickers()
            .iter()
            .copied()
            .find(|&sticker| cubie.facing(sticker) == Some(direction))
    }
    /// Plays the intro choreography. Returns `false` if a choreography is
    /// already playing.
    pub fn play_intro(&mut self) -> bool {
        self.choreographer
            .trigger(Choreography::Intro, &self.prefs.animation)
    }

    /// Handles a pointer press.
    pub fn pointer_down(&mut self, pointer: PointerKind, pos: [f32; 2]) {
        self.world.pointer_down(pointer, pos);
    }
    /// Handles pointer movement. Returns whether the assembly rotated.
    pub fn pointer_move(&mut self, pos: [f32; 2]) -> bool {
        self.world.pointer_move(pos, &self.prefs.interaction)
    }
    /// Handles a pointer release.
    pub fn pointer_up(&mut self, pos: [f32; 2]) -> PointerRelease {
        self.world.pointer_up(pos)
    }
}
