//! Solids built from sketches: linear extrusion, multi-section lofts and
//! profile sweeps along closed outlines.

use crate::errors::{GridfinityError, Result};
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::sketch::Sketch;
use crate::sketch::shapes::mitre_ring;
use crate::traits::CSGOps;
use geo::{Polygon as GeoPolygon, TriangulateEarcut};
use nalgebra::{Point2, Point3};

impl Sketch {
    /// Extrude along +Z from `z` to `z + height`. A negative height extrudes
    /// downward; zero height yields an empty mesh.
    pub fn extrude(&self, z: Real, height: Real) -> Mesh {
        if height == 0.0 || self.is_empty() {
            return Mesh::new();
        }
        let (z0, z1) = if height > 0.0 {
            (z, z + height)
        } else {
            (z + height, z)
        };

        let mut triangles = Vec::new();
        for polygon in &self.geometry {
            triangles.extend(cap_triangles(polygon, z0, false));
            triangles.extend(cap_triangles(polygon, z1, true));
        }
        for ring in self.rings() {
            for (a, b) in ring.iter().zip(ring.iter().cycle().skip(1)) {
                let (a0, b0) = (lift(a, z0), lift(b, z0));
                let (a1, b1) = (lift(a, z1), lift(b, z1));
                triangles.push([a0, b0, b1]);
                triangles.push([a0, b1, a1]);
            }
        }
        Mesh::from_triangles(triangles)
    }

    /// Treat the sketch as lying in the XZ plane (sketch Y is world Z) and
    /// extrude it along +Y by `length`.
    pub fn extrude_xz(&self, length: Real) -> Mesh {
        self.extrude(0.0, length)
            .rotate(90.0, 0.0, 0.0)
            .translate(0.0, length, 0.0)
    }

    /// Skin a stack of `(sketch, z)` sections into one solid, capped by the
    /// first and last sections.
    ///
    /// Every section must have the same ring structure (same number of rings
    /// with the same vertex counts) and the heights must not decrease.
    pub fn loft(sections: &[(Sketch, Real)]) -> Result<Mesh> {
        let [(first, z_first), .., (last, z_last)] = sections else {
            return Err(GridfinityError::LoftMismatch(
                "at least two sections are required".into(),
            ));
        };
        let structure = first.structure();
        if structure.is_empty() {
            return Err(GridfinityError::LoftMismatch("empty section".into()));
        }
        for pair in sections.windows(2) {
            if pair[1].1 < pair[0].1 {
                return Err(GridfinityError::LoftMismatch(format!(
                    "section heights decrease from {} to {}",
                    pair[0].1, pair[1].1
                )));
            }
            if pair[1].0.structure() != structure {
                return Err(GridfinityError::LoftMismatch(format!(
                    "ring structure {:?} differs from {:?}",
                    pair[1].0.structure(),
                    structure
                )));
            }
        }

        let mut triangles = Vec::new();
        for polygon in &first.geometry {
            triangles.extend(cap_triangles(polygon, *z_first, false));
        }
        for polygon in &last.geometry {
            triangles.extend(cap_triangles(polygon, *z_last, true));
        }
        for pair in sections.windows(2) {
            let (lower, z0) = (&pair[0].0, pair[0].1);
            let (upper, z1) = (&pair[1].0, pair[1].1);
            for (a, b) in lower.rings().iter().zip(upper.rings().iter()) {
                let a: Vec<Point3<Real>> = a.iter().map(|p| lift(p, z0)).collect();
                let b: Vec<Point3<Real>> = b.iter().map(|p| lift(p, z1)).collect();
                stitch(&a, &b, &mut triangles);
            }
        }
        Ok(Mesh::from_triangles(triangles))
    }

    /// Sweep a closed cross-section around every ring of this sketch.
    ///
    /// `profile` holds `(inset, z)` pairs: `inset` is measured from the path
    /// into the material (positive moves inward), `z` is absolute height.
    /// Each path ring is mitre-offset per profile point, so straight runs stay
    /// exact and rounded corners shrink or grow with the inset.
    pub fn sweep(&self, profile: &[[Real; 2]]) -> Result<Mesh> {
        if profile.len() < 3 {
            return Err(GridfinityError::Degenerate(
                "sweep profile needs at least three points".into(),
            ));
        }
        let paths = self.rings();
        if paths.is_empty() {
            return Err(GridfinityError::Degenerate("sweep path is empty".into()));
        }

        let mut triangles = Vec::new();
        for path in &paths {
            let layers: Vec<Vec<Point3<Real>>> = profile
                .iter()
                .map(|&[inset, z]| {
                    mitre_ring(path, inset)
                        .iter()
                        .map(|p| lift(p, z))
                        .collect()
                })
                .collect();
            for (a, b) in layers.iter().zip(layers.iter().cycle().skip(1)) {
                stitch(a, b, &mut triangles);
            }
        }

        let mesh = Mesh::from_triangles(triangles);
        if mesh.volume() < 0.0 {
            Ok(mesh.inverse())
        } else {
            Ok(mesh)
        }
    }
}

#[inline]
fn lift(p: &Point2<Real>, z: Real) -> Point3<Real> {
    Point3::new(p.x, p.y, z)
}

/// Band of triangles between two rings of equal length.
fn stitch(a: &[Point3<Real>], b: &[Point3<Real>], out: &mut Vec<[Point3<Real>; 3]>) {
    let n = a.len().min(b.len());
    for i in 0..n {
        let j = (i + 1) % n;
        out.push([a[i], a[j], b[j]]);
        out.push([a[i], b[j], b[i]]);
    }
}

/// Ear-clipped cap of a polygon at height `z`, facing +Z when `up`.
fn cap_triangles(polygon: &GeoPolygon<Real>, z: Real, up: bool) -> Vec<[Point3<Real>; 3]> {
    let triangulation = polygon.earcut_triangles_raw();
    let vertices = triangulation.vertices;
    let point = |i: usize| Point3::new(vertices[2 * i], vertices[2 * i + 1], z);

    triangulation
        .triangle_indices
        .chunks_exact(3)
        .filter_map(|tri| {
            let (a, b, c) = (point(tri[0]), point(tri[1]), point(tri[2]));
            let doubled_area = (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y);
            if doubled_area == 0.0 {
                None
            } else if (doubled_area > 0.0) == up {
                Some([a, b, c])
            } else {
                Some([a, c, b])
            }
        })
        .collect()
}
