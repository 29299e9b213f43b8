/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// Default tolerance for borehole-to-column coincidence.
///
/// Zero means exact floating-point equality.
pub const COINCIDENCE_TOLERANCE: f64 = 0.0;

/// Returns `true` if `a` and `b` differ by at most `tol`.
///
/// With `tol == 0.0` this is exact equality (NaN never matches).
#[must_use]
pub fn within(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}
