use std::fmt;
use std::ops::{Index, IndexMut, Mul};

use cgmath::{Matrix3, Vector3};

use crate::{Axis, Face, LatticePoint, Sign};

/// An orientation of a cubie: one of the 24 rotations of a cube.
///
/// Stored as the face that each positive axis is sent to, so the identity is
/// `[R, U, F]`. Every orientation reachable by quarter turns about coordinate
/// axes is exactly representable.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Orientation([Face; 3]);
impl fmt::Debug for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.0;
        write!(f, "Orientation[x->{x}, y->{y}, z->{z}]")
    }
}
impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}
impl Index<Axis> for Orientation {
    type Output = Face;
    fn index(&self, axis: Axis) -> &Face {
        &self.0[axis.int()]
    }
}
impl IndexMut<Axis> for Orientation {
    fn index_mut(&mut self, axis: Axis) -> &mut Face {
        &mut self.0[axis.int()]
    }
}
impl Mul<Orientation> for Orientation {
    type Output = Self;
    /// Composes two orientations: `rhs` is applied first, then `self`.
    fn mul(self, rhs: Self) -> Self {
        let mut ret = Self::IDENTITY;
        for axis in Axis::iter() {
            ret[axis] = self * rhs[axis];
        }
        ret
    }
}
impl Mul<Face> for Orientation {
    type Output = Face;
    fn mul(self, rhs: Face) -> Face {
        self[rhs.axis()] * rhs.sign()
    }
}
impl Mul<LatticePoint> for Orientation {
    type Output = LatticePoint;
    fn mul(self, rhs: LatticePoint) -> LatticePoint {
        let mut ret = LatticePoint::CORE;
        for axis in Axis::iter() {
            let image = self[axis];
            ret[image.axis()] = rhs[axis] * image.sign();
        }
        ret
    }
}
impl Orientation {
    /// Identity orientation.
    pub const IDENTITY: Self = Self([Face::R, Face::U, Face::F]);

    /// Returns the inverse orientation.
    #[must_use]
    pub fn rev(self) -> Self {
        let mut ret = Self::IDENTITY;
        for axis in Axis::iter() {
            let image = self[axis];
            ret[image.axis()] = Face::new(axis, image.sign());
        }
        ret
    }

    /// Returns the faces that +X, +Y, and +Z are sent to.
    pub fn images(self) -> [Face; 3] {
        self.0
    }

    /// Returns the rotation by `quarter_turns` × 90° about `axis`, using the
    /// right-hand rule (positive turns are counterclockwise when looking from
    /// the positive end of the axis).
    pub fn quarter_turns(axis: Axis, quarter_turns: i32) -> Self {
        let (ax1, ax2) = axis.perpendiculars();
        let mut step = Self::IDENTITY;
        step[ax1] = Face::new(ax2, Sign::Pos);
        step[ax2] = Face::new(ax1, Sign::Neg);

        let mut ret = Self::IDENTITY;
        for _ in 0..quarter_turns.rem_euclid(4) {
            ret = step * ret;
        }
        ret
    }

    /// Returns all 24 orientations.
    pub fn all() -> Vec<Self> {
        let mut ret = vec![Self::IDENTITY];
        let mut i = 0;
        while i < ret.len() {
            for axis in Axis::iter() {
                let next = Self::quarter_turns(axis, 1) * ret[i];
                if !ret.contains(&next) {
                    ret.push(next);
                }
            }
            i += 1;
        }
        ret
    }

    /// Returns the rotation matrix for this orientation. Every entry is
    /// exactly -1, 0, or 1.
    pub fn to_matrix(self) -> Matrix3<f32> {
        let [x, y, z] = self.0.map(Face::normal);
        Matrix3::from_cols(x, y, z)
    }

    /// Returns the orientation closest to a rotation matrix that has drifted
    /// slightly from a cube symmetry, or `None` if the matrix is not close to
    /// any of them.
    ///
    /// Each column is assigned to the axis of its largest component, which
    /// tolerates drift well beyond what floating-point interpolation produces.
    pub fn nearest(matrix: &Matrix3<f32>) -> Option<Self> {
        let mut ret = Self::IDENTITY;
        let mut used = [false; 3];
        for axis in Axis::iter() {
            let column: Vector3<f32> = matrix[axis.int()];
            let image_axis = Axis::iter().max_by(|&a, &b| {
                column[a.int()].abs().total_cmp(&column[b.int()].abs())
            })?;
            let component = column[image_axis.int()];
            if component.abs() < 0.5 || used[image_axis.int()] {
                return None;
            }
            used[image_axis.int()] = true;
            let sign = if component > 0.0 { Sign::Pos } else { Sign::Neg };
            ret[axis] = Face::new(image_axis, sign);
        }
        // Reject reflections.
        ret.is_proper().then_some(ret)
    }

    /// Returns whether this is a proper rotation rather than a reflection.
    fn is_proper(self) -> bool {
        let [x, y, z] = self.0.map(Face::normal);
        x.cross(y) == z
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Rad, SquareMatrix};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_orientation_group() {
        let all = Orientation::all();
        assert_eq!(24, all.len());
        for &a in &all {
            assert!(a.is_proper());
            assert_eq!(Orientation::IDENTITY, a * a.rev());
            assert_eq!(Orientation::IDENTITY, a.rev() * a);
            assert_eq!(Some(a), Orientation::nearest(&a.to_matrix()));
            for &b in &all {
                assert_eq!((a * b).to_matrix(), a.to_matrix() * b.to_matrix());
            }
        }
    }

    #[test]
    fn test_quarter_turns_match_matrices() {
        let angle = Rad(std::f32::consts::FRAC_PI_2);
        let cases = [
            (Axis::X, Matrix3::from_angle_x(angle)),
            (Axis::Y, Matrix3::from_angle_y(angle)),
            (Axis::Z, Matrix3::from_angle_z(angle)),
        ];
        for (axis, matrix) in cases {
            assert_eq!(
                Some(Orientation::quarter_turns(axis, 1)),
                Orientation::nearest(&matrix),
            );
            assert_eq!(
                Orientation::IDENTITY,
                Orientation::quarter_turns(axis, 4),
            );
            assert_eq!(
                Orientation::quarter_turns(axis, -1),
                Orientation::quarter_turns(axis, 3),
            );
        }
    }

    #[test]
    fn test_nearest_rejects_garbage() {
        assert_eq!(None, Orientation::nearest(&Matrix3::from_value(0.0)));
        let ones = Matrix3::new(1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0);
        assert_eq!(None, Orientation::nearest(&ones));
        // Reflection through the XY plane.
        let mirror = Matrix3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.0);
        assert_eq!(None, Orientation::nearest(&mirror));
        // Drifted identity still snaps.
        let drift = Matrix3::new(0.01, -0.02, 0.0, 0.03, 0.0, 0.01, -0.01, 0.02, 0.0);
        let drifted = Matrix3::identity() + drift;
        assert_eq!(Some(Orientation::IDENTITY), Orientation::nearest(&drifted));
    }

    #[test]
    fn test_orientation_acts_on_faces_and_points() {
        let r = Orientation::quarter_turns(Axis::X, -1);
        // A clockwise turn of the right face brings the front to the top.
        assert_eq!(Face::U, r * Face::F);
        assert_eq!(Face::B, r * Face::U);
        assert_eq!(Face::R, r * Face::R);

        let corner = LatticePoint([Sign::Pos, Sign::Pos, Sign::Pos]);
        assert_eq!(LatticePoint([Sign::Pos, Sign::Pos, Sign::Neg]), r * corner);
    }
}
