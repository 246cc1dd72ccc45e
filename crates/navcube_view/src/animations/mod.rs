mod twist;

pub use twist::{Pivot, TwistAnimationState, TwistPhase};
