//! Move tokens such as `R`, `U'`, and `F2`.

use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use cgmath::Rad;
use serde::de::Error;

use crate::{Axis, Face, ParseMoveError, Sign};

/// Turn amount for a move, written as a suffix after the face symbol.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Turn {
    /// No suffix: a quarter turn in the face's base direction.
    #[default]
    Quarter,
    /// `'` suffix: a quarter turn in the opposite direction.
    Prime,
    /// `2` suffix: a half turn.
    Double,
}
impl Turn {
    /// All turn amounts.
    pub const ALL: [Turn; 3] = [Turn::Quarter, Turn::Prime, Turn::Double];

    /// Returns the suffix used in notation.
    pub fn suffix(self) -> &'static str {
        match self {
            Turn::Quarter => "",
            Turn::Prime => "'",
            Turn::Double => "2",
        }
    }
    /// Returns the turn that undoes this one. A half turn is its own inverse.
    #[must_use]
    pub fn rev(self) -> Self {
        match self {
            Turn::Quarter => Turn::Prime,
            Turn::Prime => Turn::Quarter,
            Turn::Double => Turn::Double,
        }
    }
    /// Returns the number of quarter turns in the base direction.
    pub fn multiplier(self) -> i32 {
        match self {
            Turn::Quarter => 1,
            Turn::Prime => -1,
            Turn::Double => 2,
        }
    }
}

/// Entry in the static face table: which layer a face symbol turns and which
/// way a plain turn goes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FaceTwist {
    /// Axis of rotation.
    pub axis: Axis,
    /// Layer along `axis` that the face turns.
    pub layer: Sign,
    /// Sign of a plain quarter turn, in right-handed quarter turns about
    /// `axis`. Every face turns clockwise when viewed from outside, which is
    /// `-1` for faces on the positive side.
    pub base: i32,
}

impl Face {
    /// Returns the static table entry for this face.
    pub const fn twist(self) -> FaceTwist {
        match self {
            Face::U => FaceTwist {
                axis: Axis::Y,
                layer: Sign::Pos,
                base: -1,
            },
            Face::D => FaceTwist {
                axis: Axis::Y,
                layer: Sign::Neg,
                base: 1,
            },
            Face::L => FaceTwist {
                axis: Axis::X,
                layer: Sign::Neg,
                base: 1,
            },
            Face::R => FaceTwist {
                axis: Axis::X,
                layer: Sign::Pos,
                base: -1,
            },
            Face::F => FaceTwist {
                axis: Axis::Z,
                layer: Sign::Pos,
                base: -1,
            },
            Face::B => FaceTwist {
                axis: Axis::Z,
                layer: Sign::Neg,
                base: 1,
            },
        }
    }
}

/// Decoded move: which layer to turn and by how much.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MoveSpec {
    /// Axis of rotation.
    pub axis: Axis,
    /// Layer along `axis`.
    pub layer: Sign,
    /// Signed number of right-handed quarter turns about `axis`.
    pub quarter_turns: i32,
}
impl MoveSpec {
    /// Returns the signed rotation angle.
    pub fn angle(self) -> Rad<f32> {
        Rad(self.quarter_turns as f32 * FRAC_PI_2)
    }
}

/// Single move on one face of the cube.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    /// Face to turn.
    pub face: Face,
    /// Turn amount.
    pub turn: Turn,
}
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.turn.suffix())
    }
}
impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let first = chars.next().ok_or(ParseMoveError::Empty)?;
        let face = Face::from_symbol(first).ok_or(ParseMoveError::UnknownFace(first))?;
        let turn = match chars.as_str() {
            "" => Turn::Quarter,
            "'" => Turn::Prime,
            "2" => Turn::Double,
            other => return Err(ParseMoveError::BadSuffix(other.to_owned())),
        };
        Ok(Move { face, turn })
    }
}
impl serde::Serialize for Move {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}
impl<'de> serde::Deserialize<'de> for Move {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Self>().map_err(D::Error::custom)
    }
}
impl Move {
    /// Constructs a move.
    pub fn new(face: Face, turn: Turn) -> Self {
        Self { face, turn }
    }

    /// Decodes the move using the static face table.
    pub fn spec(self) -> MoveSpec {
        let FaceTwist { axis, layer, base } = self.face.twist();
        MoveSpec {
            axis,
            layer,
            quarter_turns: base * self.turn.multiplier(),
        }
    }

    /// Returns the move that undoes this one.
    #[must_use]
    pub fn rev(self) -> Self {
        Self {
            face: self.face,
            turn: self.turn.rev(),
        }
    }
}

/// Parses a whitespace-separated sequence of moves.
///
/// Fails on the first invalid token.
pub fn parse_moves(s: &str) -> Result<Vec<Move>, ParseMoveError> {
    s.split_whitespace().map(str::parse).collect()
}

/// Parses a list of move tokens.
///
/// Fails on the first invalid token.
pub fn parse_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Move>, ParseMoveError> {
    tokens.iter().map(|t| t.as_ref().parse()).collect()
}

/// Formats a sequence of moves separated by spaces.
pub fn format_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
