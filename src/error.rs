use thiserror::Error;

/// Top-level error type for BHE mesh preparation.
#[derive(Debug, Error)]
pub enum BheMeshError {
    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Triangulation(#[from] TriangulationError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors in caller-supplied input records.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("invalid layer specification: {0}")]
    InvalidLayerSpec(String),

    #[error("invalid borehole specification: {0}")]
    InvalidBoreholeSpec(String),

    #[error("invalid planar mesh: {0}")]
    InvalidPlanarMesh(String),

    #[error("invalid mesh parameters: {0}")]
    InvalidParameters(String),
}

/// Errors raised while building or addressing the volume mesh.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    #[error("borehole {borehole} matched {matched} node(s), at least 2 are required")]
    TopologyMismatch { borehole: u32, matched: usize },

    #[error("node reference (plane {plane}, column {column}) is out of range")]
    NodeOutOfRange { plane: usize, column: usize },
}

/// Errors from the planar triangulator.
#[derive(Debug, Error)]
pub enum TriangulationError {
    #[error("invalid triangulation parameters: {0}")]
    InvalidParameters(String),

    #[error("triangulation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`BheMeshError`].
pub type Result<T> = std::result::Result<T, BheMeshError>;
