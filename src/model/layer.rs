/// One material layer of the extrusion stack, ordered top to bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerSpec {
    /// Material group stamped onto every prism of the layer.
    pub material_group: u32,
    /// Number of prism slices generated within the layer.
    pub element_count: u32,
    /// Thickness of each slice (z-distance, positive downwards).
    pub thickness: f64,
}

impl LayerSpec {
    #[must_use]
    pub fn new(material_group: u32, element_count: u32, thickness: f64) -> Self {
        Self {
            material_group,
            element_count,
            thickness,
        }
    }

    /// Total thickness of the layer.
    #[must_use]
    pub fn depth(&self) -> f64 {
        f64::from(self.element_count) * self.thickness
    }
}

/// A single slice of the flattened layer stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    pub material_group: u32,
    pub thickness: f64,
}

/// Flattens a layer list into its top-to-bottom sequence of slices.
pub fn slices(layers: &[LayerSpec]) -> impl Iterator<Item = Slice> + '_ {
    layers.iter().flat_map(|spec| {
        (0..spec.element_count).map(move |_| Slice {
            material_group: spec.material_group,
            thickness: spec.thickness,
        })
    })
}
