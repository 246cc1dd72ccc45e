use std::fmt;
use std::ops::{Index, IndexMut};

use cgmath::Vector3;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{Axis, Face, Sign};

/// Default spacing between neighboring cubie centers.
pub const DEFAULT_GAP: f32 = 0.96;

/// Integer slot in the 3x3x3 lattice, one [`Sign`] per axis.
#[derive(Serialize, Deserialize, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LatticePoint(pub [Sign; 3]);
impl fmt::Debug for LatticePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.0.map(Sign::int);
        write!(f, "({x:+}, {y:+}, {z:+})")
    }
}
impl Index<Axis> for LatticePoint {
    type Output = Sign;
    fn index(&self, axis: Axis) -> &Sign {
        &self.0[axis.int()]
    }
}
impl IndexMut<Axis> for LatticePoint {
    fn index_mut(&mut self, axis: Axis) -> &mut Sign {
        &mut self.0[axis.int()]
    }
}
impl LatticePoint {
    /// Slot at the center of the cube, which has no stickers.
    pub const CORE: Self = Self([Sign::Zero; 3]);

    /// Returns all 27 slots, with X varying slowest and Z fastest.
    pub fn iter() -> impl Iterator<Item = Self> {
        Sign::ALL.into_iter().flat_map(|x| {
            Sign::ALL
                .into_iter()
                .flat_map(move |y| Sign::ALL.into_iter().map(move |z| Self([x, y, z])))
        })
    }

    /// Returns the faces that are exposed at this slot, in axis order. Centers
    /// have 1, edges 2, and corners 3.
    pub fn exposed_faces(self) -> SmallVec<[Face; 3]> {
        Axis::iter()
            .filter_map(|axis| Face::try_new(axis, self[axis]))
            .collect()
    }
}

/// Mapping between continuous world coordinates and lattice slots.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Lattice {
    /// Distance between neighboring cubie centers.
    pub gap: f32,
}
impl Default for Lattice {
    fn default() -> Self {
        Self { gap: DEFAULT_GAP }
    }
}
impl Lattice {
    /// Constructs a lattice with the given spacing.
    pub fn new(gap: f32) -> Self {
        Self { gap }
    }

    /// Returns the nearest lattice index for a single coordinate:
    /// `round(coordinate / gap)`.
    ///
    /// Drift of up to half the spacing is tolerated.
    pub fn index(&self, coordinate: f32) -> i32 {
        (coordinate / self.gap).round() as i32
    }

    /// Returns the nearest slot to a position, or `None` if the position is
    /// outside the 3x3x3 lattice.
    pub fn point(&self, position: Vector3<f32>) -> Option<LatticePoint> {
        let mut ret = LatticePoint::CORE;
        for axis in Axis::iter() {
            ret[axis] = Sign::from_int(self.index(position[axis.int()]))?;
        }
        Some(ret)
    }

    /// Returns the world position of a slot.
    pub fn position(&self, point: LatticePoint) -> Vector3<f32> {
        let [x, y, z] = point.0.map(|s| s.float() * self.gap);
        Vector3::new(x, y, z)
    }

    /// Returns the position with every coordinate forced onto the nearest
    /// multiple of the spacing.
    pub fn snap(&self, position: Vector3<f32>) -> Vector3<f32> {
        position.map(|c| self.index(c) as f32 * self.gap)
    }
}
