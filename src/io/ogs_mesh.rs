use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::mesh::BheMesh;

use super::number::format_number;

/// Element type tag of prism records.
pub const PRISM_TAG: &str = "pris";

/// Element type tag of line records.
pub const LINE_TAG: &str = "line";

/// Writes a [`BheMesh`] in the legacy OGS `#FEM_MSH` text format.
///
/// Prisms are listed before line elements, each with
/// `id material_group tag node-ids...`.
pub struct OgsMeshWriter<'a> {
    mesh: &'a BheMesh,
}

impl<'a> OgsMeshWriter<'a> {
    /// Creates a new `OgsMeshWriter`.
    #[must_use]
    pub fn new(mesh: &'a BheMesh) -> Self {
        Self { mesh }
    }

    /// Writes the mesh to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`BheMeshError::Io`](crate::error::BheMeshError::Io) if writing fails.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let volume = &self.mesh.volume;

        writeln!(out, "#FEM_MSH")?;
        writeln!(out, "$PCS_TYPE")?;
        writeln!(out, "NO_PCS")?;

        writeln!(out, "$NODES")?;
        writeln!(out, "{}", volume.node_count())?;
        for (node, p) in volume.nodes() {
            writeln!(
                out,
                "{} {} {} {}",
                volume.node_id(node),
                format_number(p.x),
                format_number(p.y),
                format_number(p.z)
            )?;
        }

        writeln!(out, "$ELEMENTS")?;
        writeln!(out, "{}", volume.prisms().len() + self.mesh.lines.len())?;
        for prism in volume.prisms() {
            write!(out, "{} {} {PRISM_TAG}", prism.id, prism.material_group)?;
            for node in prism.nodes() {
                write!(out, " {}", volume.node_id(node))?;
            }
            writeln!(out)?;
        }
        for line in &self.mesh.lines {
            writeln!(
                out,
                "{} {} {LINE_TAG} {} {}",
                line.id,
                line.material_group,
                volume.node_id(line.start),
                volume.node_id(line.end)
            )?;
        }
        writeln!(out, "#STOP")?;

        Ok(())
    }

    /// Writes the mesh to a file, conventionally `<project>.bhe.msh`.
    ///
    /// # Errors
    ///
    /// Returns [`BheMeshError::Io`](crate::error::BheMeshError::Io) if the
    /// file cannot be created or written.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut out = BufWriter::new(File::create(path)?);
        self.write_to(&mut out)?;
        out.flush()?;
        info!(path = %path.display(), "mesh written");
        Ok(())
    }
}
