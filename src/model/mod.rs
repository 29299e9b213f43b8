mod borehole;
mod geometry;
mod layer;
mod planar;

pub use borehole::{AdditionalPoint, BoreholeSpec};
pub use geometry::{ModelGeometry, RefinementBox};
pub use layer::{slices, LayerSpec, Slice};
pub use planar::{PlanarFace, PlanarMesh, PlanarNode};
