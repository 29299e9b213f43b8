use tracing::{debug, info, warn};

use crate::error::{MeshError, Result, SpecError};
use crate::mesh::{LineElement, MeshBuildContext, NodeRef, VolumeMesh};
use crate::model::BoreholeSpec;

use super::column_lookup::ColumnLookup;
use super::params::MeshParams;
use super::validate::validate_boreholes;

/// Output of [`SynthesizeBoreholes::execute`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynthesisReport {
    /// Line elements of all boreholes, in borehole order.
    pub lines: Vec<LineElement>,
    /// One [`MeshError::TopologyMismatch`] per borehole that got no elements.
    pub warnings: Vec<MeshError>,
    /// Total element count, prisms plus line elements.
    pub element_count: usize,
}

/// Threads 1D line elements along each borehole axis through the volume.
pub struct SynthesizeBoreholes<'a> {
    boreholes: &'a [BoreholeSpec],
    params: MeshParams,
}

impl<'a> SynthesizeBoreholes<'a> {
    /// Creates a new `SynthesizeBoreholes` operation.
    #[must_use]
    pub fn new(boreholes: &'a [BoreholeSpec], params: MeshParams) -> Self {
        Self { boreholes, params }
    }

    /// Executes the synthesis over a fully extruded volume.
    ///
    /// Borehole `i` gets material group `max + 1 + i`, where `max` is the
    /// high-water mark in `ctx` on entry. Line element ids continue the
    /// element counter of `ctx`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters or borehole records are invalid,
    /// [`SpecError::InvalidLayerSpec`] if the borehole groups would exceed
    /// `u32::MAX`, or, with [`MeshParams::strict_boreholes`],
    /// [`MeshError::TopologyMismatch`] for the first borehole that matches
    /// fewer than two nodes.
    pub fn execute(
        &self,
        volume: &VolumeMesh,
        ctx: &mut MeshBuildContext,
    ) -> Result<SynthesisReport> {
        self.params.validate()?;
        let tol = self.params.coincidence_tolerance;
        validate_boreholes(self.boreholes, tol)?;

        let lookup = ColumnLookup::new(volume.plane(0).unwrap_or_default(), tol);
        let groups = borehole_groups(ctx.max_material_group(), self.boreholes.len())?;
        let mut report = SynthesisReport::default();

        for (borehole, group) in self.boreholes.iter().zip(groups) {
            ctx.observe_material_group(group);
            let chain = axis_nodes(volume, &lookup, borehole, tol);

            if chain.len() < 2 {
                let mismatch = MeshError::TopologyMismatch {
                    borehole: borehole.id,
                    matched: chain.len(),
                };
                if self.params.strict_boreholes {
                    return Err(mismatch.into());
                }
                warn!(borehole = borehole.id, matched = chain.len(), "borehole axis not found in mesh");
                report.warnings.push(mismatch);
                continue;
            }

            for pair in chain.windows(2) {
                report.lines.push(LineElement {
                    id: ctx.allocate_element_id(),
                    material_group: group,
                    borehole: borehole.id,
                    start: pair[0],
                    end: pair[1],
                });
            }

            debug!(borehole = borehole.id, elements = chain.len() - 1, "created borehole elements");
        }

        report.element_count = ctx.element_count();
        info!(
            lines = report.lines.len(),
            unmatched = report.warnings.len(),
            "borehole meshing complete"
        );

        Ok(report)
    }
}

/// Material groups `base + 1 ..= base + count`.
fn borehole_groups(base: u32, count: usize) -> Result<Vec<u32>> {
    (1..=count)
        .map(|offset| -> Result<u32> {
            u32::try_from(offset)
                .ok()
                .and_then(|offset| base.checked_add(offset))
                .ok_or_else(|| {
                    SpecError::InvalidLayerSpec(format!(
                        "material group {base} leaves no room for {count} borehole group(s)"
                    ))
                    .into()
                })
        })
        .collect()
}

/// Nodes on the borehole axis within its elevation range, top to bottom.
///
/// One column is used for the whole chain: the nearest one within the
/// tolerance. Planes are scanned in creation order, which is depth order.
fn axis_nodes(
    volume: &VolumeMesh,
    lookup: &ColumnLookup,
    borehole: &BoreholeSpec,
    tol: f64,
) -> Vec<NodeRef> {
    let candidates = lookup.columns_near(borehole.location());
    let Some(column) = lookup.nearest_column(borehole.location()) else {
        return Vec::new();
    };
    if candidates.len() > 1 {
        warn!(
            borehole = borehole.id,
            candidates = candidates.len(),
            column,
            "several columns lie on the borehole axis, using the nearest"
        );
    }

    volume
        .planes()
        .enumerate()
        .filter(|(_, points)| borehole.spans(points[column].z, tol))
        .map(|(plane, _)| NodeRef::new(plane, column))
        .collect()
}
