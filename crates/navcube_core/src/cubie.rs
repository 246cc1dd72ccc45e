use std::fmt;

use cgmath::{Matrix3, SquareMatrix, Vector3};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{CubeError, Face, Lattice, LatticePoint, Move, Orientation};

/// Handle to a cubie in a [`CubieRegistry`].
#[derive(Serialize, Deserialize, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct CubieId(pub u8);
impl fmt::Debug for CubieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:?}", self.0)
    }
}
impl fmt::Display for CubieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
impl CubieId {
    /// Returns the index as a `usize`.
    pub fn to_index(self) -> usize {
        self.0 as usize
    }
}

/// World transform of a cubie: rotation about the cubie's own center followed
/// by translation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CubieTransform {
    /// Position of the cubie center.
    pub position: Vector3<f32>,
    /// Rotation of the cubie.
    pub rotation: Matrix3<f32>,
}
impl CubieTransform {
    /// Returns an unrotated transform at `position`.
    pub fn at(position: Vector3<f32>) -> Self {
        Self {
            position,
            rotation: Matrix3::identity(),
        }
    }

    /// Returns the transform after rotating the whole cubie about the world
    /// origin.
    #[must_use]
    pub fn rotated_about_origin(&self, rotation: &Matrix3<f32>) -> Self {
        Self {
            position: *rotation * self.position,
            rotation: *rotation * self.rotation,
        }
    }
}

/// One of the 27 movable sub-cubes.
#[derive(Debug, Clone, PartialEq)]
pub struct Cubie {
    home: LatticePoint,
    stickers: SmallVec<[Face; 3]>,
    transform: CubieTransform,
}
impl Cubie {
    fn new(lattice: &Lattice, home: LatticePoint) -> Self {
        Self {
            home,
            stickers: home.exposed_faces(),
            transform: CubieTransform::at(lattice.position(home)),
        }
    }

    /// Returns the slot that the cubie was built in.
    pub fn home(&self) -> LatticePoint {
        self.home
    }
    /// Returns the sticker color tags on this cubie. These are fixed when the
    /// cubie is built and never change; only the direction they point does.
    pub fn stickers(&self) -> &[Face] {
        &self.stickers
    }
    /// Returns the current transform.
    pub fn transform(&self) -> &CubieTransform {
        &self.transform
    }

    /// Returns the slot the cubie currently occupies, or `None` if it is
    /// outside the lattice.
    pub fn lattice_point(&self, lattice: &Lattice) -> Option<LatticePoint> {
        lattice.point(self.transform.position)
    }
    /// Returns the current orientation, or `None` if the rotation is not
    /// close to a cube symmetry.
    pub fn orientation(&self) -> Option<Orientation> {
        Orientation::nearest(&self.transform.rotation)
    }
    /// Returns the world direction that the sticker tagged `sticker` currently
    /// faces, or `None` if the cubie has no such sticker.
    pub fn facing(&self, sticker: Face) -> Option<Face> {
        if !self.stickers.contains(&sticker) {
            return None;
        }
        Some(self.orientation()? * sticker)
    }
}

/// Snapshot of where a cubie is, used to compare cube states.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Cubie handle.
    pub cubie: CubieId,
    /// Slot the cubie was built in.
    pub home: LatticePoint,
    /// Slot the cubie currently occupies.
    pub point: LatticePoint,
    /// Current orientation, as the faces that the +X, +Y, and +Z sides of the
    /// cubie point to.
    pub orientation: [Face; 3],
}

/// Arena owning all 27 cubies.
///
/// Cubies are addressed by [`CubieId`] and are never created or destroyed
/// except by [`CubieRegistry::rebuild()`].
#[derive(Debug, Clone, PartialEq)]
pub struct CubieRegistry {
    lattice: Lattice,
    cubies: Vec<Cubie>,
}
impl Default for CubieRegistry {
    fn default() -> Self {
        Self::new(Lattice::default())
    }
}
impl CubieRegistry {
    /// Number of cubies in the registry.
    pub const CUBIE_COUNT: usize = 27;

    /// Constructs a solved cube on the given lattice.
    pub fn new(lattice: Lattice) -> Self {
        let cubies = LatticePoint::iter()
            .map(|home| Cubie::new(&lattice, home))
            .collect();
        Self { lattice, cubies }
    }

    /// Discards all cubies and recreates them in their canonical slots with
    /// stickers reassigned from each slot.
    pub fn rebuild(&mut self) {
        log::debug!("rebuilding cubie registry");
        *self = Self::new(self.lattice);
    }

    /// Returns the lattice that the cubies live on.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Returns the number of cubies.
    pub fn len(&self) -> usize {
        self.cubies.len()
    }
    /// Returns whether there are no cubies. This is never true for a
    /// constructed registry.
    pub fn is_empty(&self) -> bool {
        self.cubies.is_empty()
    }

    /// Returns an iterator over all cubies and their handles.
    pub fn iter(&self) -> impl Iterator<Item = (CubieId, &Cubie)> {
        self.cubies
            .iter()
            .enumerate()
            .map(|(i, cubie)| (CubieId(i as u8), cubie))
    }
    /// Returns a cubie by handle.
    pub fn get(&self, id: CubieId) -> Result<&Cubie, CubeError> {
        self.cubies
            .get(id.to_index())
            .ok_or(CubeError::NoSuchCubie { cubie: id })
    }
    /// Returns the cubie currently occupying a slot, if any.
    pub fn cubie_at(&self, point: LatticePoint) -> Option<CubieId> {
        self.iter()
            .find(|(_, cubie)| cubie.lattice_point(&self.lattice) == Some(point))
            .map(|(id, _)| id)
    }

    /// Overwrites the transform of a cubie.
    pub fn set_transform(&mut self, id: CubieId, transform: CubieTransform) -> Result<(), CubeError> {
        let cubie = self
            .cubies
            .get_mut(id.to_index())
            .ok_or(CubeError::NoSuchCubie { cubie: id })?;
        cubie.transform = transform;
        Ok(())
    }

    /// Forces a cubie's position onto the nearest lattice point and its
    /// rotation onto the nearest multiple of 90° about each axis.
    ///
    /// The cubie is left untouched if either is too far off to snap.
    pub fn snap(&mut self, id: CubieId) -> Result<(), CubeError> {
        let lattice = self.lattice;
        let cubie = self
            .cubies
            .get_mut(id.to_index())
            .ok_or(CubeError::NoSuchCubie { cubie: id })?;
        let point = lattice
            .point(cubie.transform.position)
            .ok_or(CubeError::OffLattice { cubie: id })?;
        let orientation = cubie
            .orientation()
            .ok_or(CubeError::NotARotation { cubie: id })?;
        cubie.transform = CubieTransform {
            position: lattice.position(point),
            rotation: orientation.to_matrix(),
        };
        Ok(())
    }

    /// Applies a move in one step, with no animation.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), CubeError> {
        let spec = mv.spec();
        let selection = self.select_layer(spec.axis, spec.layer)?;
        let rotation = Orientation::quarter_turns(spec.axis, spec.quarter_turns).to_matrix();
        for &id in &selection.cubies {
            let new_transform = self.get(id)?.transform.rotated_about_origin(&rotation);
            self.set_transform(id, new_transform)?;
            self.snap(id)?;
        }
        Ok(())
    }

    /// Returns the placement of every cubie, in handle order.
    pub fn placements(&self) -> Result<Vec<Placement>, CubeError> {
        self.iter()
            .map(|(id, cubie)| {
                Ok(Placement {
                    cubie: id,
                    home: cubie.home,
                    point: cubie
                        .lattice_point(&self.lattice)
                        .ok_or(CubeError::OffLattice { cubie: id })?,
                    orientation: cubie
                        .orientation()
                        .ok_or(CubeError::NotARotation { cubie: id })?
                        .images(),
                })
            })
            .collect()
    }

    /// Returns whether every cubie is back in its home slot with its original
    /// orientation.
    pub fn is_solved(&self) -> bool {
        self.iter().all(|(_, cubie)| {
            cubie.lattice_point(&self.lattice) == Some(cubie.home)
                && cubie.orientation() == Some(Orientation::IDENTITY)
        })
    }

    /// Returns whether every cubie is exactly on the lattice: each position
    /// coordinate is exactly `-gap`, `0`, or `+gap`, and each rotation is
    /// exactly a signed permutation matrix.
    pub fn is_lattice_aligned(&self) -> bool {
        self.iter().all(|(_, cubie)| {
            let t = &cubie.transform;
            cubie
                .lattice_point(&self.lattice)
                .is_some_and(|p| self.lattice.position(p) == t.position)
                && cubie
                    .orientation()
                    .is_some_and(|o| o.to_matrix() == t.rotation)
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Sign;

    #[test]
    fn test_registry_construction() {
        let registry = CubieRegistry::default();
        assert_eq!(CubieRegistry::CUBIE_COUNT, registry.len());
        assert!(registry.is_solved());
        assert!(registry.is_lattice_aligned());

        let sticker_count: usize = registry.iter().map(|(_, c)| c.stickers().len()).sum();
        assert_eq!(54, sticker_count);

        for face in Face::ALL {
            let count = registry
                .iter()
                .filter(|(_, c)| c.stickers().contains(&face))
                .count();
            assert_eq!(9, count, "face {face}");
        }
    }

    #[test]
    fn test_sticker_tags_follow_the_cubie() {
        let mut registry = CubieRegistry::default();
        let ufr = registry
            .cubie_at(LatticePoint([Sign::Pos, Sign::Pos, Sign::Pos]))
            .expect("no UFR corner");
        registry.apply_move("R".parse().unwrap()).unwrap();

        let cubie = registry.get(ufr).unwrap();
        assert_eq!(&[Face::R, Face::U, Face::F], cubie.stickers());
        assert_eq!(
            Some(LatticePoint([Sign::Pos, Sign::Pos, Sign::Neg])),
            cubie.lattice_point(registry.lattice()),
        );
        assert_eq!(Some(Face::R), cubie.facing(Face::R));
        assert_eq!(Some(Face::B), cubie.facing(Face::U));
        assert_eq!(Some(Face::U), cubie.facing(Face::F));
        assert_eq!(None, cubie.facing(Face::L));
    }

    #[test]
    fn test_snap_and_rebuild() {
        let mut registry = CubieRegistry::default();
        let id = CubieId(0);
        let drifted = CubieTransform {
            position: registry.get(id).unwrap().transform().position
                + Vector3::new(0.01, -0.02, 0.0),
            rotation: Matrix3::from_angle_x(cgmath::Rad(0.01)),
        };
        registry.set_transform(id, drifted).unwrap();
        assert!(!registry.is_lattice_aligned());
        registry.snap(id).unwrap();
        assert!(registry.is_lattice_aligned());
        assert!(registry.is_solved());

        let far = CubieTransform::at(Vector3::new(5.0, 0.0, 0.0));
        registry.set_transform(id, far).unwrap();
        assert_eq!(Err(CubeError::OffLattice { cubie: id }), registry.snap(id));

        registry.rebuild();
        assert!(registry.is_solved());
        assert_eq!(
            Err(CubeError::NoSuchCubie { cubie: CubieId(27) }),
            registry.get(CubieId(27)).map(|_| ()),
        );
    }
}
