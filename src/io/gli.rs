use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::math::Point3;
use crate::model::{AdditionalPoint, BoreholeSpec, ModelGeometry};

use super::number::format_number;

/// Boundary polylines over the bounding-box corner ids, each closed.
const BOUNDARY_POLYLINES: [(&str, [usize; 5]); 6] = [
    ("top", [0, 1, 2, 3, 0]),
    ("bottom", [4, 5, 6, 7, 4]),
    ("left", [0, 3, 7, 4, 0]),
    ("right", [1, 2, 6, 5, 1]),
    ("inflow", [0, 1, 5, 4, 0]),
    ("outflow", [3, 2, 6, 7, 3]),
];

/// Writes the OGS geometry (`.gli`) describing the model box, the borehole
/// end points, and any additional points.
///
/// Point ids 0–7 are the box corners; borehole `i` owns ids `8 + 2i` (top)
/// and `9 + 2i` (bottom); additional points follow.
pub struct GliWriter<'a> {
    geometry: &'a ModelGeometry,
    boreholes: &'a [BoreholeSpec],
    points: &'a [AdditionalPoint],
}

impl<'a> GliWriter<'a> {
    /// Creates a new `GliWriter`.
    #[must_use]
    pub fn new(
        geometry: &'a ModelGeometry,
        boreholes: &'a [BoreholeSpec],
        points: &'a [AdditionalPoint],
    ) -> Self {
        Self {
            geometry,
            boreholes,
            points,
        }
    }

    /// Writes the geometry to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`BheMeshError::Io`](crate::error::BheMeshError::Io) if writing fails.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "#POINTS")?;
        for (id, c) in self.geometry.corners().iter().enumerate() {
            writeln!(out, "{id} {}", coords(c))?;
        }

        let mut next = 8;
        for b in self.boreholes {
            writeln!(out, "{next} {} $NAME BHE{}_top", coords(&b.top()), b.id)?;
            writeln!(out, "{} {} $NAME BHE{}_bottom", next + 1, coords(&b.bottom()), b.id)?;
            next += 2;
        }
        for (i, p) in self.points.iter().enumerate() {
            writeln!(out, "{next} {} $NAME P{}", coords(&p.position()), i + 1)?;
            next += 1;
        }

        for (name, ids) in BOUNDARY_POLYLINES {
            write_polyline(out, &format!("ply_{name}"), &ids)?;
        }
        for (i, b) in self.boreholes.iter().enumerate() {
            write_polyline(out, &format!("ply_BHE{}", b.id), &[8 + 2 * i, 9 + 2 * i])?;
        }

        for (name, _) in BOUNDARY_POLYLINES {
            writeln!(out, "#SURFACE")?;
            writeln!(out, "$NAME")?;
            writeln!(out, "{name}")?;
            writeln!(out, "$POLYLINES")?;
            writeln!(out, "ply_{name}")?;
        }
        writeln!(out, "#STOP")?;

        Ok(())
    }

    /// Writes the geometry to a file, conventionally `<project>.gli`.
    ///
    /// # Errors
    ///
    /// Returns [`BheMeshError::Io`](crate::error::BheMeshError::Io) if the
    /// file cannot be created or written.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut out = BufWriter::new(File::create(path)?);
        self.write_to(&mut out)?;
        out.flush()?;
        info!(path = %path.display(), "geometry written");
        Ok(())
    }
}

fn coords(p: &Point3) -> String {
    format!("{} {} {}", format_number(p.x), format_number(p.y), format_number(p.z))
}

fn write_polyline<W: Write>(out: &mut W, name: &str, ids: &[usize]) -> std::io::Result<()> {
    writeln!(out, "#POLYLINE")?;
    writeln!(out, "$NAME")?;
    writeln!(out, "{name}")?;
    writeln!(out, "$POINTS")?;
    for id in ids {
        writeln!(out, "{id}")?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn render(boreholes: &[BoreholeSpec], points: &[AdditionalPoint]) -> String {
        let geometry = ModelGeometry::new(20.0, 50.0, 100.0);
        let mut buf = Vec::new();
        GliWriter::new(&geometry, boreholes, points)
            .write_to(&mut buf)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn points_section_lists_corners_then_boreholes() {
        let boreholes = [
            BoreholeSpec::new(1, 0.0, 10.0, -0.5, -80.0, 0.063),
            BoreholeSpec::new(2, 2.5, 10.0, -0.5, -80.0, 0.063),
        ];
        let text = render(&boreholes, &[AdditionalPoint::new(1.0, 2.0, 0.5)]);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(
            &lines[..14],
            &[
                "#POINTS",
                "0 -10 0 0",
                "1 10 0 0",
                "2 10 50 0",
                "3 -10 50 0",
                "4 -10 0 -100",
                "5 10 0 -100",
                "6 10 50 -100",
                "7 -10 50 -100",
                "8 0 10 -0.5 $NAME BHE1_top",
                "9 0 10 -80 $NAME BHE1_bottom",
                "10 2.5 10 -0.5 $NAME BHE2_top",
                "11 2.5 10 -80 $NAME BHE2_bottom",
                "12 1 2 0 $NAME P1",
            ]
        );
    }

    #[test]
    fn borehole_polylines_reference_their_points() {
        let boreholes = [
            BoreholeSpec::new(3, 0.0, 10.0, 0.0, -80.0, 0.063),
            BoreholeSpec::new(9, 2.5, 10.0, 0.0, -80.0, 0.063),
        ];
        let text = render(&boreholes, &[]);
        assert!(text.contains("#POLYLINE\n$NAME\nply_BHE3\n$POINTS\n8\n9\n"));
        assert!(text.contains("#POLYLINE\n$NAME\nply_BHE9\n$POINTS\n10\n11\n#SURFACE"));
    }

    #[test]
    fn surfaces_close_the_file() {
        let text = render(&[BoreholeSpec::new(1, 0.0, 10.0, 0.0, -80.0, 0.063)], &[]);
        assert!(text.contains("#POLYLINE\n$NAME\nply_outflow\n$POINTS\n3\n2\n6\n7\n3\n"));
        assert!(text.ends_with("#SURFACE\n$NAME\noutflow\n$POLYLINES\nply_outflow\n#STOP\n"));
        assert_eq!(text.matches("#SURFACE").count(), 6);
    }
}
