use crate::math::{Point2, Point3};

/// A vertical borehole heat exchanger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoreholeSpec {
    /// User-facing borehole number.
    pub id: u32,
    pub x: f64,
    pub y: f64,
    /// Elevation of the borehole head.
    pub z_top: f64,
    /// Elevation of the borehole foot; must lie below `z_top`.
    pub z_bottom: f64,
    /// Only drives planar mesh density around the borehole.
    pub radius: f64,
}

impl BoreholeSpec {
    #[must_use]
    pub fn new(id: u32, x: f64, y: f64, z_top: f64, z_bottom: f64, radius: f64) -> Self {
        Self {
            id,
            x,
            y,
            z_top,
            z_bottom,
            radius,
        }
    }

    /// Planar location of the borehole axis.
    #[must_use]
    pub fn location(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    #[must_use]
    pub fn top(&self) -> Point3 {
        Point3::new(self.x, self.y, self.z_top)
    }

    #[must_use]
    pub fn bottom(&self) -> Point3 {
        Point3::new(self.x, self.y, self.z_bottom)
    }

    /// Returns `true` if `z` lies within `[z_bottom - tol, z_top + tol]`.
    #[must_use]
    pub fn spans(&self, z: f64, tol: f64) -> bool {
        z <= self.z_top + tol && z >= self.z_bottom - tol
    }
}

/// An extra point forced into the planar mesh and listed in the geometry file.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AdditionalPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Local element size: a six-point ring at this distance is meshed
    /// around the point. Zero inserts the bare point.
    pub delta: f64,
}

impl AdditionalPoint {
    #[must_use]
    pub fn new(x: f64, y: f64, delta: f64) -> Self {
        Self { x, y, z: 0.0, delta }
    }

    #[must_use]
    pub fn location(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    #[must_use]
    pub fn position(&self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }
}
