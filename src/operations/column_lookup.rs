use std::collections::HashMap;

use crate::math::{within, Point2, Point3};

/// Spatial index over the planar columns of an extruded volume.
///
/// With zero tolerance columns are bucketed by their exact coordinate bits;
/// otherwise by a uniform grid whose cells are twice the tolerance wide.
#[derive(Debug, Clone)]
pub struct ColumnLookup {
    tolerance: f64,
    points: Vec<Point2>,
    buckets: HashMap<(i64, i64), Vec<usize>>,
}

impl ColumnLookup {
    /// Builds the index from the nodes of one plane.
    #[must_use]
    pub fn new(plane: &[Point3], tolerance: f64) -> Self {
        let points: Vec<Point2> = plane.iter().map(|p| Point2::new(p.x, p.y)).collect();
        let mut buckets: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        for (column, p) in points.iter().enumerate() {
            buckets
                .entry(cell_key(p.x, p.y, tolerance))
                .or_default()
                .push(column);
        }
        Self {
            tolerance,
            points,
            buckets,
        }
    }

    /// Columns whose planar position lies within the tolerance of `at`,
    /// in ascending column order.
    #[must_use]
    pub fn columns_near(&self, at: Point2) -> Vec<usize> {
        let (kx, ky) = cell_key(at.x, at.y, self.tolerance);
        let reach = i64::from(self.tolerance > 0.0);

        // Keys saturate far from the origin, so neighbour cells can repeat.
        let mut columns: Vec<usize> = (-reach..=reach)
            .flat_map(|dx| {
                (-reach..=reach).map(move |dy| (kx.saturating_add(dx), ky.saturating_add(dy)))
            })
            .filter_map(|cell| self.buckets.get(&cell))
            .flatten()
            .copied()
            .filter(|&c| {
                let p = self.points[c];
                within(p.x, at.x, self.tolerance) && within(p.y, at.y, self.tolerance)
            })
            .collect();
        columns.sort_unstable();
        columns.dedup();
        columns
    }

    /// The single column closest to `at` within the tolerance.
    ///
    /// Ties go to the lowest column index.
    #[must_use]
    pub fn nearest_column(&self, at: Point2) -> Option<usize> {
        self.columns_near(at)
            .into_iter()
            .min_by(|&a, &b| {
                let da = (self.points[a] - at).norm_squared();
                let db = (self.points[b] - at).norm_squared();
                da.total_cmp(&db).then(a.cmp(&b))
            })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn cell_key(x: f64, y: f64, tolerance: f64) -> (i64, i64) {
    if tolerance > 0.0 {
        let cell = 2.0 * tolerance;
        ((x / cell).floor() as i64, (y / cell).floor() as i64)
    } else {
        // Adding zero folds -0.0 into 0.0 so both hash alike.
        ((x + 0.0).to_bits() as i64, (y + 0.0).to_bits() as i64)
    }
}
