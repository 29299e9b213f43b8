mod context;
mod element;
mod node;

pub use context::MeshBuildContext;
pub use element::{LineElement, Prism};
pub use node::NodeRef;

use crate::error::MeshError;
use crate::math::Point3;
use crate::model::PlanarMesh;

/// The layered volume: an ordered stack of node planes plus prism elements.
///
/// Every plane mirrors the planar mesh column by column, so a node is
/// addressed by [`NodeRef`]. Flat node identifiers are derived only when
/// the mesh is serialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolumeMesh {
    planes: Vec<Vec<Point3>>,
    faces: Vec<[usize; 3]>,
    prisms: Vec<Prism>,
}

impl VolumeMesh {
    /// Seeds a volume with the planar mesh as plane 0 and no prisms.
    #[must_use]
    pub fn from_planar(planar: &PlanarMesh) -> Self {
        Self {
            planes: vec![planar.nodes().to_vec()],
            faces: planar.faces().to_vec(),
            prisms: Vec::new(),
        }
    }

    // --- Planes ---

    #[must_use]
    pub fn nodes_per_plane(&self) -> usize {
        self.planes.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    /// The node positions of one plane, or `None` past the last plane.
    #[must_use]
    pub fn plane(&self, index: usize) -> Option<&[Point3]> {
        self.planes.get(index).map(Vec::as_slice)
    }

    /// Iterates planes top to bottom.
    pub fn planes(&self) -> impl Iterator<Item = &[Point3]> + '_ {
        self.planes.iter().map(Vec::as_slice)
    }

    /// Appends a copy of the lowest plane shifted down by `thickness`.
    ///
    /// Only z changes; x and y are copied bit for bit so that later
    /// coincidence lookups see the planar coordinates unchanged.
    pub fn push_plane_below(&mut self, thickness: f64) -> usize {
        let next: Vec<Point3> = self
            .planes
            .last()
            .map(|prev| {
                prev.iter()
                    .map(|p| Point3::new(p.x, p.y, p.z - thickness))
                    .collect()
            })
            .unwrap_or_default();
        self.planes.push(next);
        self.planes.len() - 1
    }

    // --- Nodes ---

    /// Total node count over all planes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.planes.iter().map(Vec::len).sum()
    }

    /// Returns the position of a node.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::NodeOutOfRange`] if the plane or column does not exist.
    pub fn node(&self, node: NodeRef) -> Result<&Point3, MeshError> {
        self.planes
            .get(node.plane)
            .and_then(|plane| plane.get(node.column))
            .ok_or(MeshError::NodeOutOfRange {
                plane: node.plane,
                column: node.column,
            })
    }

    /// Flat serialized identifier of a node.
    #[must_use]
    pub fn node_id(&self, node: NodeRef) -> usize {
        node.flat_id(self.nodes_per_plane())
    }

    /// Iterates all nodes plane by plane, top to bottom.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeRef, &Point3)> + '_ {
        self.planes.iter().enumerate().flat_map(|(plane, points)| {
            points
                .iter()
                .enumerate()
                .map(move |(column, p)| (NodeRef::new(plane, column), p))
        })
    }

    // --- Elements ---

    /// Planar triangles the prisms are extruded from.
    #[must_use]
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    #[must_use]
    pub fn prisms(&self) -> &[Prism] {
        &self.prisms
    }

    pub fn push_prism(&mut self, prism: Prism) {
        self.prisms.push(prism);
    }
}

/// The combined result of extrusion and borehole synthesis.
#[derive(Debug, Clone, Default)]
pub struct BheMesh {
    pub volume: VolumeMesh,
    pub lines: Vec<LineElement>,
    pub context: MeshBuildContext,
    /// Boreholes that produced no line elements.
    pub warnings: Vec<MeshError>,
}

impl BheMesh {
    /// Total element count, prisms plus line elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.context.element_count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn triangle() -> PlanarMesh {
        PlanarMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
        .unwrap()
    }

    #[test]
    fn plane_below_shifts_only_z() {
        let mut volume = VolumeMesh::from_planar(&triangle());
        assert_eq!(volume.push_plane_below(2.0), 1);
        let p = volume.node(NodeRef::new(1, 1)).unwrap();
        assert_eq!(*p, Point3::new(1.0, 0.0, -2.0));
        assert_eq!(volume.node_count(), 6);
    }

    #[test]
    fn out_of_range_node_is_reported() {
        let volume = VolumeMesh::from_planar(&triangle());
        assert_eq!(
            volume.node(NodeRef::new(1, 0)),
            Err(MeshError::NodeOutOfRange { plane: 1, column: 0 })
        );
    }

    #[test]
    fn nodes_iterate_plane_major() {
        let mut volume = VolumeMesh::from_planar(&triangle());
        volume.push_plane_below(1.0);
        let ids: Vec<_> = volume.nodes().map(|(n, _)| volume.node_id(n)).collect();
        assert_eq!(ids, (0..6).collect::<Vec<_>>());
    }
}
