use cgmath::{Matrix3, SquareMatrix};
use navcube_core::{
    CubeError, CubieId, CubieRegistry, CubieTransform, LAYER_SIZE, LayerSelection, Move, MoveSpec,
};
use navcube_prefs::InterpolateFn;
use smallvec::SmallVec;
use web_time::Duration;

use crate::{Completion, Scene};

/// Phase of the move engine.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TwistPhase {
    /// No move in progress.
    #[default]
    Idle,
    /// The layer has been moved into the pivot but has not turned yet.
    Grouping,
    /// The pivot is turning.
    Rotating,
    /// The pivot has reached its final angle and its cubies are being
    /// released and snapped.
    Snapping,
}

/// Transient group that owns one layer of cubies while it turns about the
/// origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Pivot {
    spec: MoveSpec,
    cubies: SmallVec<[CubieId; LAYER_SIZE]>,
    rotation: Matrix3<f32>,
}
impl Pivot {
    fn new(spec: MoveSpec, selection: LayerSelection) -> Self {
        Self {
            spec,
            cubies: selection.cubies,
            rotation: Matrix3::identity(),
        }
    }

    /// Returns the cubies in the pivot.
    pub fn cubies(&self) -> &[CubieId] {
        &self.cubies
    }
    /// Returns whether `cubie` is in the pivot.
    pub fn contains(&self, cubie: CubieId) -> bool {
        self.cubies.contains(&cubie)
    }
    /// Returns the current rotation of the pivot.
    pub fn rotation(&self) -> &Matrix3<f32> {
        &self.rotation
    }
    /// Returns the move being animated.
    pub fn spec(&self) -> MoveSpec {
        self.spec
    }

    /// Sets the rotation to the fraction `t` of the full move angle.
    fn set_fraction(&mut self, t: f32) {
        self.rotation = Matrix3::from_axis_angle(self.spec.axis.unit(), self.spec.angle() * t);
    }
}

#[derive(Debug, Clone)]
struct ActiveTwist {
    mv: Move,
    phase: TwistPhase,
    pivot: Pivot,
    elapsed: Duration,
    duration: Duration,
    interpolation: InterpolateFn,
    completion: Completion,
}
impl ActiveTwist {
    fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        if (0.0..1.0).contains(&t) { t } else { 1.0 }
    }
}

/// Move engine: turns one layer at a time through
/// `Idle -> Grouping -> Rotating -> Snapping -> Idle`.
#[derive(Debug, Default, Clone)]
pub struct TwistAnimationState {
    active: Option<ActiveTwist>,
}
impl TwistAnimationState {
    /// Returns the current phase.
    pub fn phase(&self) -> TwistPhase {
        self.active.as_ref().map_or(TwistPhase::Idle, |a| a.phase)
    }
    /// Returns whether no move is in progress.
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }
    /// Returns the move in progress.
    pub fn current_move(&self) -> Option<Move> {
        Some(self.active.as_ref()?.mv)
    }
    /// Returns the pivot of the move in progress.
    pub fn pivot(&self) -> Option<&Pivot> {
        Some(&self.active.as_ref()?.pivot)
    }
    /// Returns the eased progress of the move in progress, from 0.0 to 1.0.
    pub fn progress(&self) -> Option<f32> {
        let active = self.active.as_ref()?;
        Some(active.interpolation.interpolate(active.progress()))
    }

    /// Starts a move by selecting its layer and moving it into a fresh pivot.
    ///
    /// If another move is still in progress, it is completed first. On error,
    /// `completion` is resolved with the error and no cubie is touched.
    pub fn start(
        &mut self,
        registry: &mut CubieRegistry,
        scene: &mut impl Scene,
        mv: Move,
        duration: Duration,
        interpolation: InterpolateFn,
        completion: Completion,
    ) -> Result<(), CubeError> {
        if let Some(Err(e)) = self.finish(registry, scene) {
            log::warn!("error finishing previous move: {e}");
        }

        let spec = mv.spec();
        let selection = match registry.select_layer(spec.axis, spec.layer) {
            Ok(selection) => selection,
            Err(e) => {
                completion.resolve(Err(e.clone().into()));
                return Err(e);
            }
        };
        for &cubie in &selection.cubies {
            scene.attach(cubie);
        }
        log::trace!("{mv}: idle -> grouping");

        self.active = Some(ActiveTwist {
            mv,
            phase: TwistPhase::Grouping,
            pivot: Pivot::new(spec, selection),
            elapsed: Duration::ZERO,
            duration,
            interpolation,
            completion,
        });
        Ok(())
    }

    /// Steps the animation forward. Returns the result of the move if it
    /// finished during this step.
    pub fn proceed(
        &mut self,
        delta: Duration,
        registry: &mut CubieRegistry,
        scene: &mut impl Scene,
    ) -> Option<Result<(), CubeError>> {
        let active = self.active.as_mut()?;

        if active.phase == TwistPhase::Grouping {
            log::trace!("{}: grouping -> rotating", active.mv);
            active.phase = TwistPhase::Rotating;
        }

        active.elapsed += delta;
        let t = active.progress();
        active.pivot.set_fraction(active.interpolation.interpolate(t));
        scene.pivot_rotated(&active.pivot.rotation);

        if t < 1.0 {
            return None;
        }
        self.finish(registry, scene)
    }

    /// Immediately completes the move in progress, if any, and returns its
    /// result.
    pub fn finish(
        &mut self,
        registry: &mut CubieRegistry,
        scene: &mut impl Scene,
    ) -> Option<Result<(), CubeError>> {
        let mut active = self.active.take()?;
        log::trace!("{}: {:?} -> snapping", active.mv, active.phase);
        active.phase = TwistPhase::Snapping;
        active.pivot.set_fraction(1.0);

        let result = release(&active.pivot, registry, scene);
        match &result {
            Ok(()) => active.completion.resolve(Ok(())),
            Err(e) => {
                log::error!("error snapping {}: {e}", active.mv);
                active.completion.resolve(Err(e.clone().into()));
            }
        }
        log::trace!("{}: snapping -> idle", active.mv);
        Some(result)
    }

    /// Returns the transform that `cubie` should be drawn with, including the
    /// rotation of the pivot if it is in one.
    pub fn render_transform(
        &self,
        registry: &CubieRegistry,
        cubie: CubieId,
    ) -> Result<CubieTransform, CubeError> {
        let transform = *registry.get(cubie)?.transform();
        Ok(match self.pivot() {
            Some(pivot) if pivot.contains(cubie) => {
                transform.rotated_about_origin(pivot.rotation())
            }
            _ => transform,
        })
    }
}

/// Composes the pivot rotation into each cubie, hands the cubies back to the
/// root, and snaps every one of them. Snapping continues past a failure and
/// the first error is returned.
fn release(
    pivot: &Pivot,
    registry: &mut CubieRegistry,
    scene: &mut impl Scene,
) -> Result<(), CubeError> {
    for &cubie in pivot.cubies() {
        let transform = registry
            .get(cubie)?
            .transform()
            .rotated_about_origin(pivot.rotation());
        registry.set_transform(cubie, transform)?;
    }

    let mut result = Ok(());
    for &cubie in pivot.cubies() {
        match registry.snap(cubie) {
            Ok(()) => scene.detach(cubie, registry.get(cubie)?.transform()),
            Err(e) => result = result.and(Err(e)),
        }
    }
    result
}
