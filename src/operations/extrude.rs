use tracing::{info, warn};

use crate::error::Result;
use crate::mesh::{MeshBuildContext, NodeRef, Prism, VolumeMesh};
use crate::model::{slices, LayerSpec};

use super::validate::validate_layers;

/// Counts reported by [`ExtrudeLayers::execute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtrusionSummary {
    /// Planes appended below the existing stack.
    pub planes_added: usize,
    /// Prisms created by this extrusion.
    pub prisms_added: usize,
    /// Material-group high-water mark after the extrusion.
    pub max_material_group: u32,
    /// Total element count after the extrusion.
    pub element_count: usize,
}

/// Extrudes the planar mesh of a volume down through a stack of layers.
///
/// Each slice appends one plane of nodes (a copy of the plane above, moved
/// down by the slice thickness) and one prism per planar triangle. The first
/// slice takes its top faces from the planar triangles; every later slice
/// takes them from the bottom faces of the prisms directly above.
pub struct ExtrudeLayers<'a> {
    layers: &'a [LayerSpec],
}

impl<'a> ExtrudeLayers<'a> {
    /// Creates a new `ExtrudeLayers` operation.
    #[must_use]
    pub fn new(layers: &'a [LayerSpec]) -> Self {
        Self { layers }
    }

    /// Executes the extrusion, appending planes and prisms to `volume`.
    ///
    /// Element identifiers come from `ctx`, and every layer's material group
    /// is recorded there, including layers without slices.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::InvalidLayerSpec`](crate::error::SpecError::InvalidLayerSpec)
    /// if the layer stack fails validation.
    pub fn execute(
        &self,
        volume: &mut VolumeMesh,
        ctx: &mut MeshBuildContext,
    ) -> Result<ExtrusionSummary> {
        validate_layers(self.layers)?;

        for (index, layer) in self.layers.iter().enumerate() {
            ctx.observe_material_group(layer.material_group);
            if layer.element_count == 0 {
                warn!(layer = index, "layer has no slices and adds no elements");
            }
        }

        let faces = volume.faces().to_vec();
        let per_slice = faces.len();
        let planes_before = volume.plane_count();
        let prisms_before = volume.prisms().len();

        // Start of the slice whose bottom faces seed the next slice.
        let mut above = (planes_before > 1 && prisms_before >= per_slice)
            .then(|| prisms_before - per_slice);

        for slice in slices(self.layers) {
            let top_plane = volume.push_plane_below(slice.thickness) - 1;
            let start = volume.prisms().len();

            match above {
                None => {
                    for face in &faces {
                        let top = face.map(|column| NodeRef::new(top_plane, column));
                        let id = ctx.allocate_element_id();
                        volume.push_prism(Prism::new(id, slice.material_group, top));
                    }
                }
                Some(first) => {
                    for k in 0..per_slice {
                        let upper = volume.prisms()[first + k];
                        let id = ctx.allocate_element_id();
                        volume.push_prism(Prism::new(id, slice.material_group, upper.bottom()));
                    }
                }
            }

            above = Some(start);
        }

        let summary = ExtrusionSummary {
            planes_added: volume.plane_count() - planes_before,
            prisms_added: volume.prisms().len() - prisms_before,
            max_material_group: ctx.max_material_group(),
            element_count: ctx.element_count(),
        };

        info!(
            nodes = volume.node_count(),
            elements = summary.element_count,
            "extrusion of planar mesh complete"
        );

        Ok(summary)
    }
}
