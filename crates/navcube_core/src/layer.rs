use smallvec::SmallVec;

use crate::{Axis, CubeError, CubieId, CubieRegistry, Sign};

/// Number of cubies in one layer of a 3x3x3 cube.
pub const LAYER_SIZE: usize = 9;

/// Cubies occupying one axis-aligned layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSelection {
    /// Axis perpendicular to the layer.
    pub axis: Axis,
    /// Position of the layer along `axis`.
    pub layer: Sign,
    /// Cubies in the layer, in handle order.
    pub cubies: SmallVec<[CubieId; LAYER_SIZE]>,
}

impl CubieRegistry {
    /// Returns every cubie whose current lattice index along `axis` equals
    /// `layer`.
    ///
    /// Returns [`CubeError::Consistency`] unless exactly 9 cubies are found,
    /// which can only happen if an earlier move failed to snap.
    pub fn select_layer(&self, axis: Axis, layer: Sign) -> Result<LayerSelection, CubeError> {
        let lattice = self.lattice();
        let cubies: SmallVec<[CubieId; LAYER_SIZE]> = self
            .iter()
            .filter(|(_, cubie)| {
                lattice.index(cubie.transform().position[axis.int()]) == layer.int()
            })
            .map(|(id, _)| id)
            .collect();

        if cubies.len() != LAYER_SIZE {
            log::error!(
                "layer {layer:?} on axis {axis} has {} cubies instead of {LAYER_SIZE}",
                cubies.len(),
            );
            return Err(CubeError::Consistency {
                axis,
                layer,
                count: cubies.len(),
            });
        }

        Ok(LayerSelection {
            axis,
            layer,
            cubies,
        })
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::CubieTransform;

    #[test]
    fn test_every_layer_has_nine_cubies() {
        let registry = CubieRegistry::default();
        for axis in Axis::iter() {
            for layer in Sign::ALL {
                let selection = registry.select_layer(axis, layer).unwrap();
                assert_eq!(LAYER_SIZE, selection.cubies.len());
                for id in selection.cubies {
                    let home = registry.get(id).unwrap().home();
                    assert_eq!(layer, home[axis]);
                }
            }
        }
    }

    #[test]
    fn test_misplaced_cubie_is_a_consistency_error() {
        let mut registry = CubieRegistry::default();
        let gap = registry.lattice().gap;
        // Move the core cubie into the top layer.
        let core = registry.cubie_at(crate::LatticePoint::CORE).unwrap();
        registry
            .set_transform(core, CubieTransform::at(Vector3::new(0.0, gap, 0.0)))
            .unwrap();

        assert_eq!(
            Err(CubeError::Consistency {
                axis: Axis::Y,
                layer: Sign::Pos,
                count: 10,
            }),
            registry.select_layer(Axis::Y, Sign::Pos),
        );
        assert_eq!(
            Err(CubeError::Consistency {
                axis: Axis::Y,
                layer: Sign::Zero,
                count: 8,
            }),
            registry.select_layer(Axis::Y, Sign::Zero),
        );
        // Layers along other axes are unaffected.
        assert!(registry.select_layer(Axis::X, Sign::Pos).is_ok());
    }
}
