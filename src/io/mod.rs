mod gli;
mod number;
mod ogs_mesh;

pub use gli::GliWriter;
pub use number::format_number;
pub use ogs_mesh::{OgsMeshWriter, LINE_TAG, PRISM_TAG};
