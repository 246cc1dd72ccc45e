//! Model of a 3x3x3 navigation cube: lattice, cubies, layers, move notation,
//! and scrambles.
//!
//! Everything here is discrete and instantaneous. Animated moves live in
//! `navcube_view`.

mod axis;
mod cubie;
pub mod destination;
mod error;
mod lattice;
mod layer;
mod notation;
mod orientation;
mod rgb;
mod scramble;

pub use axis::{Axis, Face, Sign};
pub use cubie::{Cubie, CubieId, CubieRegistry, CubieTransform, Placement};
pub use destination::{Destination, default_face_color};
pub use error::{CubeError, ParseMoveError};
pub use lattice::{DEFAULT_GAP, Lattice, LatticePoint};
pub use layer::{LAYER_SIZE, LayerSelection};
pub use notation::{FaceTwist, Move, MoveSpec, Turn, format_moves, parse_moves, parse_tokens};
pub use orientation::Orientation;
pub use rgb::{ParseRgbError, Rgb};
pub use scramble::{Scramble, generate_scramble, invert};
