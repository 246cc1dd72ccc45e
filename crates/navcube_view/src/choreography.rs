use std::collections::VecDeque;

use navcube_core::{Destination, Scramble};
use navcube_prefs::AnimationPreferences;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use web_time::Duration;

use crate::tween::LabelScale;
use crate::util::duration_from_secs;
use crate::{Completion, Mechanism, MoveError, Scene};

/// Orchestrated sequence of moves, pauses, and label animations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Choreography {
    /// Scramble the cube while the labels shrink, solve it, grow the labels
    /// back, and reveal a destination.
    ScrambleAndSolve(Destination),
    /// Reset the cube, then scramble and solve it once to show it off.
    Intro,
}

/// Notification emitted by the simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum CubeEvent {
    /// A choreography started.
    Started(Choreography),
    /// A scramble was generated and queued.
    Scrambled(Scramble),
    /// The solve of the last scramble finished.
    Solved,
    /// The destination panel should be shown.
    Reveal(Destination),
    /// The home page should be shown. No choreography is played for it.
    NavigateHome,
    /// A choreography finished.
    Finished(Choreography),
    /// A choreography stopped early because a move failed or the cube was
    /// reset underneath it.
    Aborted(Choreography, MoveError),
}

#[derive(Debug, Clone, PartialEq)]
enum Step {
    HardReset,
    SetLabelScale(f32),
    Wait(Duration),
    /// Queue a new scramble and shrink the labels at the same time. Finishes
    /// once both are done.
    Scramble { length: usize },
    /// Queue the inverse of the last scramble.
    Solve,
    GrowLabels,
    Emit(CubeEvent),
}

#[derive(Debug, Clone)]
struct ActiveStep {
    step: Step,
    drain: Option<Completion>,
    remaining: Duration,
}

enum StepStatus {
    Running,
    Done,
    Failed(MoveError),
}

/// Plays one choreography at a time. Triggers that arrive while one is
/// playing are ignored.
#[derive(Debug, Clone)]
pub struct Choreographer {
    current: Option<Choreography>,
    steps: VecDeque<Step>,
    active: Option<ActiveStep>,
    last_scramble: Option<Scramble>,
    rng: ChaCha12Rng,
}
impl Default for Choreographer {
    fn default() -> Self {
        Self::with_seed(rand::rng().random())
    }
}
impl Choreographer {
    /// Constructs a choreographer whose scrambles are derived from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            current: None,
            steps: VecDeque::new(),
            active: None,
            last_scramble: None,
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    /// Returns whether a choreography is playing.
    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }
    /// Returns the choreography that is playing.
    pub fn current(&self) -> Option<Choreography> {
        self.current
    }
    /// Returns the most recently generated scramble.
    pub fn last_scramble(&self) -> Option<&Scramble> {
        self.last_scramble.as_ref()
    }

    /// Starts a choreography. Returns `false` and does nothing if one is
    /// already playing.
    pub fn trigger(&mut self, choreography: Choreography, prefs: &AnimationPreferences) -> bool {
        if let Some(current) = self.current {
            log::debug!("ignoring {choreography:?} while {current:?} is playing");
            return false;
        }
        log::info!("starting {choreography:?}");

        let mut steps = vec![Step::Emit(CubeEvent::Started(choreography))];
        match choreography {
            Choreography::ScrambleAndSolve(destination) => steps.extend([
                Step::Scramble {
                    length: prefs.scramble_length,
                },
                Step::Wait(duration_from_secs(prefs.scramble_pause)),
                Step::Solve,
                Step::GrowLabels,
                Step::Wait(duration_from_secs(prefs.reveal_pause)),
                Step::Emit(CubeEvent::Reveal(destination)),
            ]),
            Choreography::Intro => steps.extend([
                Step::HardReset,
                Step::SetLabelScale(prefs.label_large_scale),
                Step::Wait(duration_from_secs(prefs.intro_pause)),
                Step::Scramble {
                    length: prefs.intro_scramble_length,
                },
                Step::Wait(duration_from_secs(prefs.intro_pause)),
                Step::Solve,
                Step::GrowLabels,
            ]),
        }
        steps.push(Step::Emit(CubeEvent::Finished(choreography)));

        self.current = Some(choreography);
        self.steps = steps.into();
        self.active = None;
        true
    }

    /// Stops the choreography that is playing, if any, and reports it as
    /// aborted with `reason`. Returns whether one was playing.
    pub fn cancel(&mut self, reason: MoveError, events: &mut Vec<CubeEvent>) -> bool {
        let Some(choreography) = self.current.take() else {
            return false;
        };
        log::info!("cancelling {choreography:?}: {reason}");
        self.steps.clear();
        self.active = None;
        events.push(CubeEvent::Aborted(choreography, reason));
        true
    }

    /// Steps the choreography forward, starting as many steps as can run this
    /// frame. Returns whether a choreography is playing.
    pub fn proceed(
        &mut self,
        delta: Duration,
        mechanism: &mut Mechanism,
        label: &mut LabelScale,
        scene: &mut impl Scene,
        prefs: &AnimationPreferences,
        events: &mut Vec<CubeEvent>,
    ) -> bool {
        let Some(choreography) = self.current else {
            return false;
        };

        if let Some(active) = &mut self.active
            && let Step::Wait(_) = active.step
        {
            active.remaining = active.remaining.saturating_sub(delta);
        }

        loop {
            if let Some(active) = &self.active {
                match active.status(label) {
                    StepStatus::Running => return true,
                    StepStatus::Done => {
                        if active.step == Step::Solve {
                            events.push(CubeEvent::Solved);
                        }
                        self.active = None;
                    }
                    StepStatus::Failed(e) => {
                        log::error!("{choreography:?} aborted: {e}");
                        self.steps.clear();
                        self.active = None;
                        self.current = None;
                        events.push(CubeEvent::Aborted(choreography, e));
                        return true;
                    }
                }
            }

            let Some(step) = self.steps.pop_front() else {
                log::info!("finished {choreography:?}");
                self.current = None;
                return true;
            };
            self.active = Some(self.start_step(step, mechanism, label, scene, prefs, events));
        }
    }

    fn start_step(
        &mut self,
        step: Step,
        mechanism: &mut Mechanism,
        label: &mut LabelScale,
        scene: &mut impl Scene,
        prefs: &AnimationPreferences,
        events: &mut Vec<CubeEvent>,
    ) -> ActiveStep {
        log::trace!("choreography step {step:?}");
        let twist_duration = duration_from_secs(prefs.twist_duration);
        let mut drain = None;
        let mut remaining = Duration::ZERO;

        match &step {
            Step::HardReset => mechanism.rebuild(scene),
            Step::SetLabelScale(scale) => label.set(*scale),
            Step::Wait(duration) => remaining = *duration,
            Step::Scramble { length } => {
                let scramble = Scramble::new_seeded(*length, self.rng.random());
                log::debug!("scramble: {}", navcube_core::format_moves(&scramble.moves));
                for &mv in &scramble.moves {
                    mechanism.enqueue(mv, twist_duration);
                }
                drain = Some(mechanism.drain());
                label.animate_to(prefs.label_small_scale, &prefs.label_shrink);
                events.push(CubeEvent::Scrambled(scramble.clone()));
                self.last_scramble = Some(scramble);
            }
            Step::Solve => {
                let solution = self
                    .last_scramble
                    .as_ref()
                    .map(Scramble::solution)
                    .unwrap_or_default();
                log::debug!("solve: {}", navcube_core::format_moves(&solution));
                for mv in solution {
                    mechanism.enqueue(mv, twist_duration);
                }
                drain = Some(mechanism.drain());
            }
            Step::GrowLabels => label.animate_to(prefs.label_large_scale, &prefs.label_grow),
            Step::Emit(event) => {
                if let CubeEvent::Reveal(destination) = event {
                    log::info!("revealing {destination}");
                }
                events.push(event.clone());
            }
        }

        ActiveStep {
            step,
            drain,
            remaining,
        }
    }
}

impl ActiveStep {
    fn status(&self, label: &LabelScale) -> StepStatus {
        let drained = match self.drain.as_ref().map(Completion::result) {
            None => true,
            Some(None) => false,
            Some(Some(Ok(()))) => true,
            Some(Some(Err(e))) => return StepStatus::Failed(e),
        };
        let done = match self.step {
            Step::Wait(_) => self.remaining.is_zero(),
            Step::Scramble { .. } => drained && !label.is_animating(),
            Step::Solve => drained,
            Step::GrowLabels => !label.is_animating(),
            Step::HardReset | Step::SetLabelScale(_) | Step::Emit(_) => true,
        };
        if done {
            StepStatus::Done
        } else {
            StepStatus::Running
        }
    }
}
