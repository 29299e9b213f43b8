use spade::handles::FixedVertexHandle;
use spade::{
    AngleLimit, ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2,
    RefinementParameters, Triangulation,
};
use tracing::{info, warn};

use crate::error::{Result, SpecError, TriangulationError};
use crate::math::{Point2, Point3};
use crate::model::{AdditionalPoint, BoreholeSpec, ModelGeometry, PlanarMesh, RefinementBox};

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Ratio of ring distance to borehole radius for a six-point ring.
pub const RING_FACTOR: f64 = 6.134;

/// Parameters controlling the planar triangulation.
#[derive(Debug, Clone, Copy)]
pub struct TriangulationParams {
    /// Ring distance around each borehole, as a multiple of its radius.
    pub ring_factor: f64,
    /// Upper bound on triangle area; `None` keeps the plain Delaunay mesh.
    pub max_triangle_area: Option<f64>,
    /// Smallest interior angle targeted by refinement, in degrees.
    pub min_angle_deg: f64,
    /// Cap on vertices inserted by refinement, and on the vertices seeded
    /// along one side or inside the box by local element sizes.
    pub max_additional_vertices: usize,
}

impl Default for TriangulationParams {
    fn default() -> Self {
        Self {
            ring_factor: RING_FACTOR,
            max_triangle_area: None,
            min_angle_deg: 20.0,
            max_additional_vertices: 100_000,
        }
    }
}

/// The six ring points placed around a borehole axis at distance
/// `ring_factor * radius`.
#[must_use]
pub fn borehole_ring(borehole: &BoreholeSpec, ring_factor: f64) -> [Point2; 6] {
    hexagon(borehole.location(), ring_factor * borehole.radius)
}

fn hexagon(center: Point2, delta: f64) -> [Point2; 6] {
    let (x, y) = (center.x, center.y);
    [
        Point2::new(x, y - delta),
        Point2::new(x, y + delta),
        Point2::new(x + 0.866 * delta, y + 0.5 * delta),
        Point2::new(x - 0.866 * delta, y + 0.5 * delta),
        Point2::new(x + 0.866 * delta, y - 0.5 * delta),
        Point2::new(x - 0.866 * delta, y - 0.5 * delta),
    ]
}

/// Triangulates the rectangular model surface.
///
/// Each borehole axis is inserted as a vertex with its exact coordinates,
/// surrounded by a six-point ring; additional points are inserted as
/// vertices, ringed at their `delta` when it is positive. The outer boundary
/// and the refinement box are split into edges no longer than their element
/// sizes, and the box interior is seeded with a lattice of that spacing.
/// The result lies at `z = 0`.
pub struct TriangulateDomain<'a> {
    geometry: &'a ModelGeometry,
    boreholes: &'a [BoreholeSpec],
    points: &'a [AdditionalPoint],
    params: TriangulationParams,
}

impl<'a> TriangulateDomain<'a> {
    /// Creates a new `TriangulateDomain` operation.
    #[must_use]
    pub fn new(
        geometry: &'a ModelGeometry,
        boreholes: &'a [BoreholeSpec],
        points: &'a [AdditionalPoint],
        params: TriangulationParams,
    ) -> Self {
        Self {
            geometry,
            boreholes,
            points,
            params,
        }
    }

    /// Executes the triangulation.
    ///
    /// # Errors
    ///
    /// Returns [`TriangulationError::InvalidParameters`] for a degenerate
    /// domain or refinement box, bad element sizes or refinement bounds,
    /// [`SpecError::InvalidBoreholeSpec`] if a borehole ring or additional
    /// point leaves the domain, and [`TriangulationError::Failed`] if a
    /// vertex cannot be inserted.
    pub fn execute(&self) -> Result<PlanarMesh> {
        self.validate()?;
        let cap = self.params.max_additional_vertices;

        let mut cdt = Cdt::new();
        insert_loop(&mut cdt, &self.geometry.outline(), self.geometry.corner_size, cap)?;
        if let Some(refinement_box) = &self.geometry.refinement_box {
            insert_loop(
                &mut cdt,
                &refinement_box.corners(),
                Some(refinement_box.element_size),
                cap,
            )?;
            for p in self.box_lattice(refinement_box)? {
                insert(&mut cdt, p)?;
            }
        }

        for b in self.boreholes {
            insert(&mut cdt, b.location())?;
            for p in borehole_ring(b, self.params.ring_factor) {
                insert(&mut cdt, p)?;
            }
        }
        for point in self.points {
            insert(&mut cdt, point.location())?;
            if point.delta > 0.0 {
                for p in hexagon(point.location(), point.delta) {
                    insert(&mut cdt, p)?;
                }
            }
        }

        if let Some(area) = self.params.max_triangle_area {
            let refinement = RefinementParameters::<f64>::new()
                .with_max_allowed_area(area)
                .with_angle_limit(AngleLimit::from_deg(self.params.min_angle_deg))
                .with_max_additional_vertices(cap);
            if !cdt.refine(refinement).refinement_complete {
                warn!(cap, "refinement stopped at the vertex cap");
            }
        }

        let nodes: Vec<Point3> = cdt
            .vertices()
            .map(|v| {
                let p = v.position();
                Point3::new(p.x, p.y, 0.0)
            })
            .collect();
        let faces: Vec<[usize; 3]> = cdt
            .inner_faces()
            .map(|f| f.vertices().map(|v| v.fix().index()))
            .collect();

        info!(
            nodes = nodes.len(),
            triangles = faces.len(),
            "planar triangulation complete"
        );

        PlanarMesh::new(nodes, faces)
    }

    /// Interior lattice of the refinement box at its element size.
    ///
    /// Lattice points closer to a borehole axis or a sized additional point
    /// than its ring (or the box element size, if larger) are left out.
    #[allow(clippy::cast_precision_loss)]
    fn box_lattice(&self, refinement_box: &RefinementBox) -> Result<Vec<Point2>> {
        let size = refinement_box.element_size;
        let cap = self.params.max_additional_vertices;
        let nx = segments(refinement_box.width, size, cap)?;
        let ny = segments(refinement_box.length, size, cap)?;
        if (nx - 1).saturating_mul(ny - 1) > cap {
            return Err(TriangulationError::InvalidParameters(format!(
                "box element size {size} needs more than {cap} interior vertices"
            ))
            .into());
        }

        let keep_out: Vec<(Point2, f64)> = self
            .boreholes
            .iter()
            .map(|b| (b.location(), self.params.ring_factor * b.radius))
            .chain(
                self.points
                    .iter()
                    .filter(|p| p.delta > 0.0)
                    .map(|p| (p.location(), p.delta)),
            )
            .map(|(center, radius)| (center, radius.max(size)))
            .collect();

        let [origin, ..] = refinement_box.corners();
        let (dx, dy) = (
            refinement_box.width / nx as f64,
            refinement_box.length / ny as f64,
        );
        let mut lattice = Vec::new();
        for i in 1..nx {
            for j in 1..ny {
                let p = Point2::new(origin.x + dx * i as f64, origin.y + dy * j as f64);
                if keep_out.iter().all(|&(center, radius)| (p - center).norm() >= radius) {
                    lattice.push(p);
                }
            }
        }
        Ok(lattice)
    }

    fn validate(&self) -> Result<()> {
        let g = self.geometry;
        if !(g.width.is_finite() && g.length.is_finite() && g.width > 0.0 && g.length > 0.0) {
            return Err(TriangulationError::InvalidParameters(format!(
                "model surface {} x {} is degenerate",
                g.width, g.length
            ))
            .into());
        }
        if let Some(area) = self.params.max_triangle_area {
            if !area.is_finite() || area <= 0.0 {
                return Err(TriangulationError::InvalidParameters(format!(
                    "maximum triangle area must be positive, got {area}"
                ))
                .into());
            }
        }
        if let Some(size) = g.corner_size {
            check_size("corner", size)?;
        }
        if let Some(b) = &g.refinement_box {
            check_size("box", b.element_size)?;
            let fits = [b.start, b.length, b.width].iter().all(|v| v.is_finite())
                && b.length > 0.0
                && b.width > 0.0
                && b.start > 0.0
                && b.start + b.length < g.length
                && b.width < g.width;
            if !fits {
                return Err(TriangulationError::InvalidParameters(format!(
                    "refinement box (start {}, length {}, width {}) must lie inside the model surface",
                    b.start, b.length, b.width
                ))
                .into());
            }
        }

        let inside = |p: &Point2| {
            p.x > -g.width / 2.0 && p.x < g.width / 2.0 && p.y > 0.0 && p.y < g.length
        };
        for b in self.boreholes {
            if !borehole_ring(b, self.params.ring_factor).iter().all(inside) {
                return Err(SpecError::InvalidBoreholeSpec(format!(
                    "borehole {} or its mesh ring lies outside the model surface",
                    b.id
                ))
                .into());
            }
        }
        for p in self.points {
            if !p.delta.is_finite() || p.delta < 0.0 {
                return Err(SpecError::InvalidBoreholeSpec(format!(
                    "additional point ({}, {}) has invalid element size {}",
                    p.x, p.y, p.delta
                ))
                .into());
            }
            let ring_inside = p.delta <= 0.0 || hexagon(p.location(), p.delta).iter().all(inside);
            if !inside(&p.location()) || !ring_inside {
                return Err(SpecError::InvalidBoreholeSpec(format!(
                    "additional point ({}, {}) lies outside the model surface",
                    p.x, p.y
                ))
                .into());
            }
        }
        Ok(())
    }
}

fn check_size(what: &str, size: f64) -> Result<()> {
    if !size.is_finite() || size <= 0.0 {
        return Err(TriangulationError::InvalidParameters(format!(
            "{what} element size must be positive, got {size}"
        ))
        .into());
    }
    Ok(())
}

/// Number of equal segments of at most `size` covering `length`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn segments(length: f64, size: f64, cap: usize) -> Result<usize> {
    let n = (length / size).ceil().max(1.0);
    if n > cap as f64 {
        return Err(TriangulationError::InvalidParameters(format!(
            "element size {size} needs {n} segments over {length}, at most {cap} allowed"
        ))
        .into());
    }
    Ok(n as usize)
}

fn insert(cdt: &mut Cdt, p: Point2) -> Result<FixedVertexHandle> {
    cdt.insert(SpadePoint2::new(p.x, p.y))
        .map_err(|e: InsertionError| TriangulationError::Failed(format!("CDT insert: {e}")).into())
}

/// Inserts a closed polygon as constraint edges, splitting each side into
/// equal segments no longer than `max_segment`.
#[allow(clippy::cast_precision_loss)]
fn insert_loop(
    cdt: &mut Cdt,
    corners: &[Point2],
    max_segment: Option<f64>,
    cap: usize,
) -> Result<()> {
    if corners.len() < 3 {
        return Err(TriangulationError::InvalidParameters(format!(
            "a closed loop needs at least 3 corners, got {}",
            corners.len()
        ))
        .into());
    }

    let mut handles = Vec::new();
    for (i, &from) in corners.iter().enumerate() {
        let side = corners[(i + 1) % corners.len()] - from;
        let pieces = match max_segment {
            Some(size) => segments(side.norm(), size, cap)?,
            None => 1,
        };
        for k in 0..pieces {
            handles.push(insert(cdt, from + side * (k as f64 / pieces as f64))?);
        }
    }

    for (i, &from) in handles.iter().enumerate() {
        let to = handles[(i + 1) % handles.len()];
        if from != to {
            cdt.add_constraint(from, to);
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::error::BheMeshError;

    fn domain() -> ModelGeometry {
        ModelGeometry::new(20.0, 40.0, 100.0)
    }

    fn signed_area(mesh: &PlanarMesh, face: [usize; 3]) -> f64 {
        let [a, b, c] = face.map(|i| mesh.nodes()[i]);
        0.5 * ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y))
    }

    #[test]
    fn bare_domain_is_two_triangles() {
        let geometry = domain();
        let mesh = TriangulateDomain::new(&geometry, &[], &[], TriangulationParams::default())
            .execute()
            .unwrap();
        assert_eq!(mesh.node_count(), 4);
        assert_eq!(mesh.face_count(), 2);
    }

    #[test]
    fn borehole_axis_is_an_exact_vertex() {
        let geometry = domain();
        let boreholes = [BoreholeSpec::new(1, 0.3, 17.1, 0.0, -50.0, 0.063)];
        let mesh = TriangulateDomain::new(&geometry, &boreholes, &[], TriangulationParams::default())
            .execute()
            .unwrap();

        assert_eq!(mesh.node_count(), 4 + 7);
        assert!(mesh.nodes().iter().any(|p| p.x == 0.3 && p.y == 17.1));
        assert!(mesh.nodes().iter().all(|p| p.z == 0.0));
    }

    #[test]
    fn triangles_are_counter_clockwise_and_cover_domain() {
        let geometry = domain();
        let boreholes = [
            BoreholeSpec::new(1, -2.0, 20.0, 0.0, -50.0, 0.1),
            BoreholeSpec::new(2, 2.0, 20.0, 0.0, -50.0, 0.1),
        ];
        let points = [AdditionalPoint::new(5.0, 5.0, 0.0)];
        let mesh = TriangulateDomain::new(&geometry, &boreholes, &points, TriangulationParams::default())
            .execute()
            .unwrap();

        let total: f64 = mesh.faces().iter().map(|&f| signed_area(&mesh, f)).sum();
        assert!(mesh.faces().iter().all(|&f| signed_area(&mesh, f) > 0.0));
        approx::assert_relative_eq!(total, 20.0 * 40.0, epsilon = 1e-9);
    }

    #[test]
    fn refinement_bounds_triangle_area() {
        let geometry = domain();
        let params = TriangulationParams {
            max_triangle_area: Some(25.0),
            ..TriangulationParams::default()
        };
        let mesh = TriangulateDomain::new(&geometry, &[], &[], params)
            .execute()
            .unwrap();
        assert!(mesh.face_count() >= 32);
        assert!(mesh.faces().iter().all(|&f| signed_area(&mesh, f) <= 25.0 + 1e-9));
    }

    #[test]
    fn ring_outside_domain_is_rejected() {
        let geometry = domain();
        let boreholes = [BoreholeSpec::new(1, 9.9, 20.0, 0.0, -50.0, 0.1)];
        let err = TriangulateDomain::new(&geometry, &boreholes, &[], TriangulationParams::default())
            .execute()
            .unwrap_err();
        assert!(matches!(err, BheMeshError::Spec(SpecError::InvalidBoreholeSpec(_))));
    }

    #[test]
    fn corner_size_splits_the_boundary() {
        let geometry = domain().with_corner_size(10.0);
        let mesh = TriangulateDomain::new(&geometry, &[], &[], TriangulationParams::default())
            .execute()
            .unwrap();

        assert_eq!(mesh.node_count(), 12);
        for (x, y) in [(0.0, 0.0), (10.0, 10.0), (10.0, 30.0), (-10.0, 20.0), (0.0, 40.0)] {
            assert!(mesh.nodes().iter().any(|p| p.x == x && p.y == y));
        }
        let total: f64 = mesh.faces().iter().map(|&f| signed_area(&mesh, f)).sum();
        approx::assert_relative_eq!(total, 20.0 * 40.0, epsilon = 1e-9);
    }

    #[test]
    fn refinement_box_is_meshed_at_its_element_size() {
        let refinement_box = RefinementBox::new(10.0, 20.0, 8.0, 4.0);
        let geometry = domain().with_refinement_box(refinement_box);
        let mesh = TriangulateDomain::new(&geometry, &[], &[], TriangulationParams::default())
            .execute()
            .unwrap();

        // 4 domain corners, 14 box outline vertices, 4 lattice vertices.
        assert_eq!(mesh.node_count(), 22);
        let in_box: Vec<_> = mesh
            .faces()
            .iter()
            .copied()
            .filter(|&f| {
                let [a, b, c] = f.map(|i| mesh.nodes()[i]);
                refinement_box.contains(Point2::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0))
            })
            .collect();
        assert_eq!(in_box.len(), 20);
        assert!(in_box.iter().all(|&f| signed_area(&mesh, f) <= 8.0 + 1e-9));
        let total: f64 = mesh.faces().iter().map(|&f| signed_area(&mesh, f)).sum();
        approx::assert_relative_eq!(total, 20.0 * 40.0, epsilon = 1e-9);
    }

    #[test]
    fn box_lattice_keeps_clear_of_boreholes() {
        let geometry = domain().with_refinement_box(RefinementBox::new(10.0, 20.0, 8.0, 4.0));
        let boreholes = [BoreholeSpec::new(1, 0.0, 18.0, 0.0, -50.0, 0.063)];
        let mesh = TriangulateDomain::new(&geometry, &boreholes, &[], TriangulationParams::default())
            .execute()
            .unwrap();

        assert_eq!(mesh.node_count(), 4 + 14 + 3 + 7);
        let at_axis = mesh.nodes().iter().filter(|p| p.x == 0.0 && p.y == 18.0).count();
        assert_eq!(at_axis, 1);
    }

    #[test]
    fn box_outside_domain_is_rejected() {
        let geometry = domain().with_refinement_box(RefinementBox::new(30.0, 20.0, 8.0, 4.0));
        let err = TriangulateDomain::new(&geometry, &[], &[], TriangulationParams::default())
            .execute()
            .unwrap_err();
        assert!(matches!(
            err,
            BheMeshError::Triangulation(TriangulationError::InvalidParameters(_))
        ));
    }

    #[test]
    fn element_size_beyond_vertex_cap_is_rejected() {
        let geometry = domain().with_corner_size(1e-9);
        let err = TriangulateDomain::new(&geometry, &[], &[], TriangulationParams::default())
            .execute()
            .unwrap_err();
        assert!(matches!(
            err,
            BheMeshError::Triangulation(TriangulationError::InvalidParameters(_))
        ));
    }

    #[test]
    fn sized_additional_point_gets_a_ring() {
        let geometry = domain();
        let points = [AdditionalPoint::new(5.0, 5.0, 1.0)];
        let mesh = TriangulateDomain::new(&geometry, &[], &points, TriangulationParams::default())
            .execute()
            .unwrap();
        assert_eq!(mesh.node_count(), 4 + 7);
        assert!(mesh.nodes().iter().any(|p| p.x == 5.0 && p.y == 6.0));
    }

    #[test]
    fn short_loop_is_rejected() {
        let mut cdt = Cdt::new();
        let err = insert_loop(&mut cdt, &[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)], None, 10)
            .unwrap_err();
        assert!(matches!(
            err,
            BheMeshError::Triangulation(TriangulationError::InvalidParameters(_))
        ));
    }
}
