use crate::error::{Result, SpecError};
use crate::math::Point3;

/// A node record of the planar surface mesh, as delivered by the triangulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarNode {
    /// Zero-based node identifier.
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A triangular face record of the planar surface mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanarFace {
    /// Zero-based face identifier.
    pub id: usize,
    /// Node identifiers of the three corners.
    pub nodes: [usize; 3],
}

/// The flat 2D triangulated surface that seeds the extrusion.
///
/// Node and face identifiers are dense and equal to their position, so a
/// column of the extruded volume is addressed by the planar node index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanarMesh {
    nodes: Vec<Point3>,
    faces: Vec<[usize; 3]>,
}

impl PlanarMesh {
    /// Creates a planar mesh from node positions and triangle corner indices.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::InvalidPlanarMesh`] if a triangle references a
    /// node that does not exist.
    pub fn new(nodes: Vec<Point3>, faces: Vec<[usize; 3]>) -> Result<Self> {
        for (index, face) in faces.iter().enumerate() {
            if let Some(&bad) = face.iter().find(|&&n| n >= nodes.len()) {
                return Err(SpecError::InvalidPlanarMesh(format!(
                    "face {index} references node {bad}, mesh has {} nodes",
                    nodes.len()
                ))
                .into());
            }
        }
        Ok(Self { nodes, faces })
    }

    /// Creates a planar mesh from ordered node and face records.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::InvalidPlanarMesh`] if identifiers are not dense
    /// and zero-based in record order, or a face references a missing node.
    pub fn from_records(nodes: &[PlanarNode], faces: &[PlanarFace]) -> Result<Self> {
        if let Some((pos, node)) = nodes.iter().enumerate().find(|(i, n)| n.id != *i) {
            return Err(SpecError::InvalidPlanarMesh(format!(
                "node record {pos} carries id {}",
                node.id
            ))
            .into());
        }
        if let Some((pos, face)) = faces.iter().enumerate().find(|(i, f)| f.id != *i) {
            return Err(SpecError::InvalidPlanarMesh(format!(
                "face record {pos} carries id {}",
                face.id
            ))
            .into());
        }
        Self::new(
            nodes.iter().map(|n| Point3::new(n.x, n.y, n.z)).collect(),
            faces.iter().map(|f| f.nodes).collect(),
        )
    }

    /// Node positions in identifier order.
    #[must_use]
    pub fn nodes(&self) -> &[Point3] {
        &self.nodes
    }

    /// Triangles in identifier order.
    #[must_use]
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::BheMeshError;

    #[test]
    fn records_with_dense_ids_are_accepted() {
        let nodes = [
            PlanarNode { id: 0, x: 0.0, y: 0.0, z: 0.0 },
            PlanarNode { id: 1, x: 1.0, y: 0.0, z: 0.0 },
            PlanarNode { id: 2, x: 0.0, y: 1.0, z: 0.0 },
        ];
        let faces = [PlanarFace { id: 0, nodes: [0, 1, 2] }];
        let mesh = PlanarMesh::from_records(&nodes, &faces).unwrap();
        assert_eq!(mesh.node_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.nodes()[1], Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn sparse_node_ids_are_rejected() {
        let nodes = [
            PlanarNode { id: 0, x: 0.0, y: 0.0, z: 0.0 },
            PlanarNode { id: 5, x: 1.0, y: 0.0, z: 0.0 },
        ];
        let err = PlanarMesh::from_records(&nodes, &[]).unwrap_err();
        assert!(matches!(
            err,
            BheMeshError::Spec(SpecError::InvalidPlanarMesh(_))
        ));
    }

    #[test]
    fn dangling_face_is_rejected() {
        let nodes = vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        assert!(PlanarMesh::new(nodes, vec![[0, 1, 2]]).is_err());
    }
}
