use crate::error::Result;
use crate::mesh::{BheMesh, MeshBuildContext, VolumeMesh};
use crate::model::{BoreholeSpec, LayerSpec, PlanarMesh};

use super::{ExtrudeLayers, MeshParams, SynthesizeBoreholes};

/// Builds the complete BHE mesh: layer extrusion followed by borehole lines.
pub struct BuildBheMesh<'a> {
    planar: &'a PlanarMesh,
    layers: &'a [LayerSpec],
    boreholes: &'a [BoreholeSpec],
    params: MeshParams,
}

impl<'a> BuildBheMesh<'a> {
    /// Creates a new `BuildBheMesh` operation.
    #[must_use]
    pub fn new(
        planar: &'a PlanarMesh,
        layers: &'a [LayerSpec],
        boreholes: &'a [BoreholeSpec],
        params: MeshParams,
    ) -> Self {
        Self {
            planar,
            layers,
            boreholes,
            params,
        }
    }

    /// Executes both stages on a fresh volume and build context.
    ///
    /// # Errors
    ///
    /// Propagates validation errors from either stage, and
    /// [`MeshError::TopologyMismatch`](crate::error::MeshError::TopologyMismatch)
    /// in strict mode.
    pub fn execute(&self) -> Result<BheMesh> {
        let mut volume = VolumeMesh::from_planar(self.planar);
        let mut context = MeshBuildContext::new();

        ExtrudeLayers::new(self.layers).execute(&mut volume, &mut context)?;
        let report =
            SynthesizeBoreholes::new(self.boreholes, self.params).execute(&volume, &mut context)?;

        Ok(BheMesh {
            volume,
            lines: report.lines,
            context,
            warnings: report.warnings,
        })
    }
}
