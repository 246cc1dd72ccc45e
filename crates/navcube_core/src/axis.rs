//! Axes, signs, and faces of the cube.

use std::fmt;
use std::ops::{Mul, Neg};

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

/// A 3-dimensional axis.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// X axis (right).
    X = 0,
    /// Y axis (up).
    Y = 1,
    /// Z axis (towards the camera).
    Z = 2,
}
impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}
impl Axis {
    /// Returns an integer index for this axis; X = 0, Y = 1, Z = 2.
    pub fn int(self) -> usize {
        self as usize
    }
    /// Returns the unit vector along the positive direction of this axis.
    pub fn unit(self) -> Vector3<f32> {
        let mut ret = Vector3::new(0.0, 0.0, 0.0);
        ret[self.int()] = 1.0;
        ret
    }
    /// Returns the two other axes, ordered so that a positive (right-handed)
    /// quarter turn about `self` takes the first one to the second one.
    pub fn perpendiculars(self) -> (Axis, Axis) {
        match self {
            // X+ => rotate from Y+ to Z+.
            Axis::X => (Axis::Y, Axis::Z),
            // Y+ => rotate from Z+ to X+.
            Axis::Y => (Axis::Z, Axis::X),
            // Z+ => rotate from X+ to Y+.
            Axis::Z => (Axis::X, Axis::Y),
        }
    }
    /// Returns an iterator over all axes.
    pub fn iter() -> impl Iterator<Item = Axis> {
        [Axis::X, Axis::Y, Axis::Z].into_iter()
    }
}

/// Position of a lattice layer along an axis, or the direction of a face.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    /// Negative.
    Neg = -1,
    /// Zero.
    #[default]
    Zero = 0,
    /// Positive.
    Pos = 1,
}
impl Neg for Sign {
    type Output = Sign;
    fn neg(self) -> Self {
        match self {
            Sign::Neg => Sign::Pos,
            Sign::Zero => Sign::Zero,
            Sign::Pos => Sign::Neg,
        }
    }
}
impl Mul<Sign> for Sign {
    type Output = Sign;
    fn mul(self, rhs: Sign) -> Self {
        match rhs {
            Sign::Neg => -self,
            Sign::Zero => Sign::Zero,
            Sign::Pos => self,
        }
    }
}
impl Sign {
    /// All signs, from negative to positive.
    pub const ALL: [Sign; 3] = [Sign::Neg, Sign::Zero, Sign::Pos];

    /// Returns the sign as an integer: -1, 0, or 1.
    pub fn int(self) -> i32 {
        self as i32
    }
    /// Returns the sign as a float: -1.0, 0.0, or 1.0.
    pub fn float(self) -> f32 {
        self.int() as f32
    }
    /// Returns the sign for an integer in the range -1..=1, or `None` if it is
    /// out of range.
    pub fn from_int(i: i32) -> Option<Self> {
        match i {
            -1 => Some(Sign::Neg),
            0 => Some(Sign::Zero),
            1 => Some(Sign::Pos),
            _ => None,
        }
    }
    /// Returns whether the sign is `Neg` or `Pos`.
    pub fn is_nonzero(self) -> bool {
        self != Sign::Zero
    }
}

/// A face of the cube, named by its standard move symbol.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    /// Up (+Y).
    U,
    /// Down (-Y).
    D,
    /// Left (-X).
    L,
    /// Right (+X).
    R,
    /// Front (+Z).
    F,
    /// Back (-Z).
    B,
}
impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
impl Neg for Face {
    type Output = Face;
    fn neg(self) -> Self {
        Face::new(self.axis(), -self.sign())
    }
}
impl Mul<Sign> for Face {
    type Output = Face;
    /// Flips the face if `rhs` is negative.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is `Sign::Zero`.
    fn mul(self, rhs: Sign) -> Self {
        Face::new(self.axis(), self.sign() * rhs)
    }
}
impl Face {
    /// All six faces, in the order `U D L R F B`.
    pub const ALL: [Face; 6] = [Face::U, Face::D, Face::L, Face::R, Face::F, Face::B];

    /// Returns the face on the given axis with the given sign.
    ///
    /// # Panics
    ///
    /// Panics if given `Sign::Zero`.
    pub fn new(axis: Axis, sign: Sign) -> Self {
        Self::try_new(axis, sign).expect("invalid sign for face")
    }
    /// Returns the face on the given axis with the given sign, or `None` if
    /// `sign` is zero.
    pub fn try_new(axis: Axis, sign: Sign) -> Option<Self> {
        match (axis, sign) {
            (Axis::X, Sign::Pos) => Some(Face::R),
            (Axis::X, Sign::Neg) => Some(Face::L),
            (Axis::Y, Sign::Pos) => Some(Face::U),
            (Axis::Y, Sign::Neg) => Some(Face::D),
            (Axis::Z, Sign::Pos) => Some(Face::F),
            (Axis::Z, Sign::Neg) => Some(Face::B),
            (_, Sign::Zero) => None,
        }
    }
    /// Returns the axis perpendicular to this face.
    pub fn axis(self) -> Axis {
        match self {
            Face::L | Face::R => Axis::X,
            Face::U | Face::D => Axis::Y,
            Face::F | Face::B => Axis::Z,
        }
    }
    /// Returns the sign of this face along its perpendicular axis.
    pub fn sign(self) -> Sign {
        match self {
            Face::R | Face::U | Face::F => Sign::Pos,
            Face::L | Face::D | Face::B => Sign::Neg,
        }
    }
    /// Returns the outward unit normal of this face.
    pub fn normal(self) -> Vector3<f32> {
        self.axis().unit() * self.sign().float()
    }
    /// Returns the single-letter symbol for this face.
    pub fn symbol(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::L => 'L',
            Face::R => 'R',
            Face::F => 'F',
            Face::B => 'B',
        }
    }
    /// Returns the face with the given symbol, or `None` if there is none.
    pub fn from_symbol(c: char) -> Option<Self> {
        Face::ALL.into_iter().find(|f| f.symbol() == c)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_face_axis_sign_roundtrip() {
        for face in Face::ALL {
            assert_eq!(face, Face::new(face.axis(), face.sign()));
            assert_eq!(Some(face), Face::from_symbol(face.symbol()));
            assert_eq!(face.axis(), (-face).axis());
            assert_ne!(face, -face);
        }
        assert_eq!(None, Face::try_new(Axis::Y, Sign::Zero));
    }

    #[test]
    fn test_perpendiculars_are_right_handed() {
        for axis in Axis::iter() {
            let (a, b) = axis.perpendiculars();
            assert_eq!(axis.unit(), a.unit().cross(b.unit()));
        }
    }
}
