//! Layered prism meshes with borehole heat exchanger line elements.
//!
//! A planar triangulation is extruded down through a stack of material
//! layers into six-node prisms, and each borehole gets a chain of 1D line
//! elements threaded through the nodes on its axis.

pub mod error;
pub mod io;
pub mod math;
pub mod mesh;
pub mod model;
pub mod operations;
pub mod planar;

pub use error::{BheMeshError, Result};
