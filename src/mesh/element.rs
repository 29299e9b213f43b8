use super::NodeRef;

/// A six-node triangular prism spanning one slice of the layer stack.
///
/// Nodes 1–3 form the top face; node `i + 3` lies directly below node `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prism {
    pub id: usize,
    pub material_group: u32,
    pub top: [NodeRef; 3],
}

impl Prism {
    #[must_use]
    pub fn new(id: usize, material_group: u32, top: [NodeRef; 3]) -> Self {
        Self {
            id,
            material_group,
            top,
        }
    }

    /// The bottom face, one plane below the top face.
    #[must_use]
    pub fn bottom(&self) -> [NodeRef; 3] {
        self.top.map(NodeRef::below)
    }

    /// All six nodes in serialization order.
    #[must_use]
    pub fn nodes(&self) -> [NodeRef; 6] {
        let [a, b, c] = self.top;
        [a, b, c, a.below(), b.below(), c.below()]
    }
}

/// A 1D element along a borehole axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineElement {
    pub id: usize,
    pub material_group: u32,
    /// Number of the borehole the element belongs to.
    pub borehole: u32,
    pub start: NodeRef,
    pub end: NodeRef,
}
