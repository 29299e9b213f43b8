use crate::error::{Result, SpecError};
use crate::math::COINCIDENCE_TOLERANCE;

/// Parameters controlling the volume build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshParams {
    /// Maximum per-axis distance at which a node still counts as lying on a
    /// borehole axis. Zero requires exact coordinate equality.
    pub coincidence_tolerance: f64,
    /// Fail with [`MeshError::TopologyMismatch`](crate::error::MeshError::TopologyMismatch)
    /// instead of recording a warning when a borehole matches fewer than two nodes.
    pub strict_boreholes: bool,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            coincidence_tolerance: COINCIDENCE_TOLERANCE,
            strict_boreholes: false,
        }
    }
}

impl MeshParams {
    /// Checks that the parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::InvalidParameters`] if the tolerance is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if !self.coincidence_tolerance.is_finite() || self.coincidence_tolerance < 0.0 {
            return Err(SpecError::InvalidParameters(format!(
                "coincidence tolerance must be finite and non-negative, got {}",
                self.coincidence_tolerance
            ))
            .into());
        }
        Ok(())
    }
}
