use thiserror::Error;

use crate::{Axis, CubieId, Sign};

/// Error produced when parsing a move token such as `R'` or `F2`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParseMoveError {
    /// Empty token
    #[error("empty move token")]
    Empty,
    /// First character is not one of `U`, `D`, `L`, `R`, `F`, `B`
    #[error("unknown face symbol {0:?}")]
    UnknownFace(char),
    /// Anything after the face symbol other than nothing, `'`, or `2`
    #[error("malformed move suffix {0:?}")]
    BadSuffix(String),
}

/// Error produced when the cubie registry is not in the state a move expects.
///
/// These indicate that an earlier snap failed. The move that detects one is
/// aborted without touching any cubie.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CubeError {
    /// Layer selection did not return exactly 9 cubies.
    #[error("layer {layer:?} on axis {axis} has {count} cubies instead of 9")]
    Consistency {
        /// Axis of the layer.
        axis: Axis,
        /// Layer index along the axis.
        layer: Sign,
        /// Number of cubies actually found.
        count: usize,
    },
    /// A cubie position rounds to a point outside the 3x3x3 lattice.
    #[error("cubie {cubie} is outside the lattice")]
    OffLattice {
        /// Offending cubie.
        cubie: CubieId,
    },
    /// A cubie rotation is not close to any of the 24 cube rotations.
    #[error("cubie {cubie} has a rotation that is not a cube symmetry")]
    NotARotation {
        /// Offending cubie.
        cubie: CubieId,
    },
    /// A cubie handle does not exist in the registry.
    #[error("cubie {cubie} does not exist")]
    NoSuchCubie {
        /// Offending cubie.
        cubie: CubieId,
    },
}
