mod borehole_lines;
mod build;
mod column_lookup;
mod extrude;
mod params;
mod validate;

pub use borehole_lines::{SynthesisReport, SynthesizeBoreholes};
pub use build::BuildBheMesh;
pub use column_lookup::ColumnLookup;
pub use extrude::{ExtrudeLayers, ExtrusionSummary};
pub use params::MeshParams;
pub use validate::{validate_boreholes, validate_layers};
