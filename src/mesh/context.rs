/// Running counters shared by the build operations.
///
/// Element identifiers are allocated from a single monotonic counter across
/// prisms and line elements. The material-group high-water mark is raised by
/// the extrusion and read by the borehole synthesis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshBuildContext {
    next_element_id: usize,
    max_material_group: u32,
}

impl MeshBuildContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the next element identifier.
    pub fn allocate_element_id(&mut self) -> usize {
        let id = self.next_element_id;
        self.next_element_id += 1;
        id
    }

    /// Records a caller-supplied material group.
    pub fn observe_material_group(&mut self, group: u32) {
        self.max_material_group = self.max_material_group.max(group);
    }

    /// Highest material group seen so far.
    #[must_use]
    pub fn max_material_group(&self) -> u32 {
        self.max_material_group
    }

    /// Number of elements allocated so far.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.next_element_id
    }
}
