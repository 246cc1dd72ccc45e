//! Frame-stepped animation of the navigation cube: the move engine, the move
//! queue, label tweens, choreographies, and world rotation.

mod animations;
mod choreography;
mod completion;
mod error;
mod mechanism;
mod queue;
mod scene;
mod simulation;
#[cfg(test)]
mod tests;
mod tween;
mod util;
mod world;

pub use animations::{Pivot, TwistAnimationState, TwistPhase};
pub use choreography::{Choreographer, Choreography, CubeEvent};
pub use completion::Completion;
pub use error::MoveError;
pub use mechanism::Mechanism;
pub use queue::{MoveQueue, QueuedMove};
pub use scene::{NullScene, Scene};
pub use simulation::CubeSimulation;
pub use tween::{LabelScale, Tween};
pub use world::{PointerRelease, WorldRotation};
