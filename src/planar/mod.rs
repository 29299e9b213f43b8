mod triangulate;

pub use triangulate::{borehole_ring, TriangulateDomain, TriangulationParams, RING_FACTOR};
