use crate::math::{Point2, Point3};

/// Outer dimensions of the rectangular model domain.
///
/// The surface spans `x ∈ [-width/2, width/2]`, `y ∈ [0, length]` at `z = 0`
/// and the model extends down to `z = -depth`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelGeometry {
    pub width: f64,
    pub length: f64,
    pub depth: f64,
    /// Target element size along the outer boundary; `None` meshes each
    /// side as a single edge.
    pub corner_size: Option<f64>,
    /// Region of finer elements around the borehole field.
    pub refinement_box: Option<RefinementBox>,
}

impl ModelGeometry {
    #[must_use]
    pub fn new(width: f64, length: f64, depth: f64) -> Self {
        Self {
            width,
            length,
            depth,
            corner_size: None,
            refinement_box: None,
        }
    }

    #[must_use]
    pub fn with_corner_size(mut self, size: f64) -> Self {
        self.corner_size = Some(size);
        self
    }

    #[must_use]
    pub fn with_refinement_box(mut self, refinement_box: RefinementBox) -> Self {
        self.refinement_box = Some(refinement_box);
        self
    }

    /// The eight bounding-box corners: the four surface corners
    /// counter-clockwise from `(-width/2, 0)`, then the same four at `-depth`.
    #[must_use]
    pub fn corners(&self) -> [Point3; 8] {
        let half = self.width / 2.0;
        let (l, d) = (self.length, -self.depth);
        [
            Point3::new(-half, 0.0, 0.0),
            Point3::new(half, 0.0, 0.0),
            Point3::new(half, l, 0.0),
            Point3::new(-half, l, 0.0),
            Point3::new(-half, 0.0, d),
            Point3::new(half, 0.0, d),
            Point3::new(half, l, d),
            Point3::new(-half, l, d),
        ]
    }

    /// The four surface corners in planar coordinates.
    #[must_use]
    pub fn outline(&self) -> [Point2; 4] {
        let [a, b, c, d, ..] = self.corners();
        [a, b, c, d].map(|p| Point2::new(p.x, p.y))
    }
}

/// An axis-aligned rectangle on the surface, centred on `x = 0`, meshed with
/// its own element size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefinementBox {
    /// Lower y edge.
    pub start: f64,
    /// Extent along y.
    pub length: f64,
    /// Extent along x.
    pub width: f64,
    pub element_size: f64,
}

impl RefinementBox {
    #[must_use]
    pub fn new(start: f64, length: f64, width: f64, element_size: f64) -> Self {
        Self {
            start,
            length,
            width,
            element_size,
        }
    }

    /// Corners counter-clockwise from `(-width/2, start)`.
    #[must_use]
    pub fn corners(&self) -> [Point2; 4] {
        let half = self.width / 2.0;
        let end = self.start + self.length;
        [
            Point2::new(-half, self.start),
            Point2::new(half, self.start),
            Point2::new(half, end),
            Point2::new(-half, end),
        ]
    }

    /// Returns `true` if `p` lies strictly inside the box.
    #[must_use]
    pub fn contains(&self, p: Point2) -> bool {
        let half = self.width / 2.0;
        p.x > -half && p.x < half && p.y > self.start && p.y < self.start + self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_follow_surface_then_base() {
        let c = ModelGeometry::new(10.0, 20.0, 50.0).corners();
        assert_eq!(c[0], Point3::new(-5.0, 0.0, 0.0));
        assert_eq!(c[2], Point3::new(5.0, 20.0, 0.0));
        assert_eq!(c[7], Point3::new(-5.0, 20.0, -50.0));
    }

    #[test]
    fn box_corners_and_containment() {
        let b = RefinementBox::new(10.0, 20.0, 8.0, 2.0);
        assert_eq!(b.corners()[0], Point2::new(-4.0, 10.0));
        assert_eq!(b.corners()[2], Point2::new(4.0, 30.0));
        assert!(b.contains(Point2::new(0.0, 15.0)));
        assert!(!b.contains(Point2::new(4.0, 15.0)));
        assert!(!b.contains(Point2::new(0.0, 31.0)));
    }
}
