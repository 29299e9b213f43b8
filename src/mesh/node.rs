/// Structured address of a volume node: extrusion plane and planar column.
///
/// Plane 0 is the planar surface; planes are numbered top to bottom. The
/// column is the index of the planar node the volume node was copied from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef {
    pub plane: usize,
    pub column: usize,
}

impl NodeRef {
    #[must_use]
    pub fn new(plane: usize, column: usize) -> Self {
        Self { plane, column }
    }

    /// The node directly beneath this one in the same column.
    #[must_use]
    pub fn below(self) -> Self {
        Self {
            plane: self.plane + 1,
            column: self.column,
        }
    }

    /// Flat identifier used in serialized output.
    #[must_use]
    pub fn flat_id(self, nodes_per_plane: usize) -> usize {
        self.plane * nodes_per_plane + self.column
    }
}
