//! `Mesh` struct and implementations of the `CSGOps` trait for `Mesh`

use crate::errors::{GridfinityError, Result};
use crate::float_types::{
    Real,
    parry3d::bounding_volume::{Aabb, BoundingVolume},
    tolerance,
};
use crate::mesh::{bsp::Node, polygon::Polygon, vertex::Vertex};
use crate::traits::CSGOps;
use nalgebra::{Matrix4, Point3, Vector3};
use std::sync::OnceLock;

pub mod bsp;
#[cfg(feature = "hashmap")]
pub mod manifold;
pub mod plane;
pub mod polygon;
pub mod shapes;
pub mod vertex;

/// A closed solid as a soup of convex planar polygons.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    /// 3D polygons for volumetric shapes
    pub polygons: Vec<Polygon>,

    /// Lazily calculated AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,
}

impl Mesh {
    /// Build a Mesh from an existing polygon list
    pub fn from_polygons(polygons: &[Polygon]) -> Self {
        Self::from_polygon_vec(polygons.to_vec())
    }

    pub fn from_polygon_vec(polygons: Vec<Polygon>) -> Self {
        Mesh {
            polygons,
            bounding_box: OnceLock::new(),
        }
    }

    /// Build a Mesh from triangles given as position triples, counter-clockwise
    /// seen from outside. Triangles with (near) zero area are dropped.
    pub fn from_triangles(triangles: Vec<[Point3<Real>; 3]>) -> Self {
        let min_area = tolerance();
        let polygons = triangles
            .into_iter()
            .filter(|[a, b, c]| (b - a).cross(&(c - a)).norm() * 0.5 > min_area)
            .filter_map(|tri| Polygon::from_points(&tri))
            .collect();
        Self::from_polygon_vec(polygons)
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Every vertex of every polygon (shared corners repeat).
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .flat_map(|p| p.vertices.iter().cloned())
            .collect()
    }

    /// Split every polygon into triangles.
    pub fn triangulate(&self) -> Mesh {
        let polygons = self
            .polygons
            .iter()
            .flat_map(|poly| {
                let plane = poly.plane.clone();
                poly.triangulate()
                    .into_iter()
                    .map(move |tri| Polygon::with_plane(tri.to_vec(), plane.clone()))
            })
            .collect();
        Mesh::from_polygon_vec(polygons)
    }

    /// Triangles as position triples.
    pub fn triangles(&self) -> Vec<[Point3<Real>; 3]> {
        self.polygons
            .iter()
            .flat_map(Polygon::triangulate)
            .map(|[a, b, c]| [a.pos, b.pos, c.pos])
            .collect()
    }

    pub fn triangle_count(&self) -> usize {
        self.polygons
            .iter()
            .map(|p| p.vertices.len().saturating_sub(2))
            .sum()
    }

    /// Enclosed volume. Positive when faces wind outward.
    pub fn volume(&self) -> Real {
        self.polygons.iter().map(Polygon::signed_volume).sum()
    }

    pub fn surface_area(&self) -> Real {
        self.polygons.iter().map(Polygon::area).sum()
    }

    /// Reset every vertex normal to its face normal.
    pub fn renormalize(&mut self) {
        self.polygons.iter_mut().for_each(Polygon::set_new_normal);
    }

    /// Put the polygons of two meshes side by side without any clipping.
    /// Only valid for solids that do not overlap.
    pub fn concat(&self, other: &Mesh) -> Mesh {
        let mut polygons = self.polygons.clone();
        polygons.extend_from_slice(&other.polygons);
        Mesh::from_polygon_vec(polygons)
    }

    /// Union of every mesh in `meshes`. An empty list yields an empty mesh.
    pub fn union_all<'a>(meshes: impl IntoIterator<Item = &'a Mesh>) -> Mesh {
        meshes
            .into_iter()
            .fold(Mesh::new(), |acc, mesh| acc.union(mesh))
    }

    /// Union of one copy of `self` per offset.
    pub fn copy_and_translate(&self, offsets: &[Vector3<Real>]) -> Result<Mesh> {
        if offsets.is_empty() {
            return Err(GridfinityError::EmptyTranslationList);
        }
        let copies: Vec<Mesh> = offsets.iter().map(|v| self.translate_vector(*v)).collect();
        Ok(Mesh::union_all(&copies))
    }

    fn bbox_overlaps(&self, other: &Mesh) -> bool {
        !self.is_empty() && !other.is_empty() && self.bounding_box().intersects(&other.bounding_box())
    }
}

impl CSGOps for Mesh {
    /// Returns a new empty Mesh
    fn new() -> Self {
        Mesh::default()
    }

    /// Return a new Mesh representing union of the two Meshes.
    ///
    /// ```text
    /// let c = a.union(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |       +----+
    ///     +----+--+    |       +----+       |
    ///          |   b   |            |   c   |
    ///          |       |            |       |
    ///          +-------+            +-------+
    /// ```
    fn union(&self, other: &Mesh) -> Mesh {
        if !self.bbox_overlaps(other) {
            return self.concat(other);
        }

        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());

        Mesh::from_polygon_vec(a.all_polygons())
    }

    /// Return a new Mesh representing difference of the two Meshes.
    ///
    /// ```text
    /// let c = a.difference(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |    +--+
    ///     +----+--+    |       +----+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    fn difference(&self, other: &Mesh) -> Mesh {
        if !self.bbox_overlaps(other) {
            return self.clone();
        }

        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());
        a.invert();

        Mesh::from_polygon_vec(a.all_polygons())
    }

    /// Return a new Mesh representing intersection of the two Meshes.
    ///
    /// ```text
    /// let c = a.intersection(b);
    ///     +-------+
    ///     |       |
    ///     |   a   |
    ///     |    +--+----+   =   +--+
    ///     +----+--+    |       +--+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    fn intersection(&self, other: &Mesh) -> Mesh {
        if !self.bbox_overlaps(other) {
            return Mesh::new();
        }

        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.invert();
        b.clip_to(&a);
        b.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        a.build(&b.all_polygons());
        a.invert();

        Mesh::from_polygon_vec(a.all_polygons())
    }

    /// Apply an affine transform. Planes are recomputed from the moved
    /// vertices and mirroring transforms reverse the winding so faces keep
    /// pointing outward.
    fn transform(&self, mat: &Matrix4<Real>) -> Mesh {
        let mirrors = mat.fixed_view::<3, 3>(0, 0).determinant() < 0.0;
        let polygons = self
            .polygons
            .iter()
            .filter_map(|poly| {
                let mut vertices: Vec<Vertex> = poly
                    .vertices
                    .iter()
                    .map(|v| Vertex::new(mat.transform_point(&v.pos), v.normal))
                    .collect();
                if mirrors {
                    vertices.reverse();
                }
                let mut moved = Polygon::new(vertices)?;
                moved.set_new_normal();
                Some(moved)
            })
            .collect();
        Mesh::from_polygon_vec(polygons)
    }

    /// Returns a parry [`Aabb`] indicating the 3D bounds of all `polygons`.
    /// An empty mesh reports a degenerate box at the origin.
    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut points = self
                .polygons
                .iter()
                .flat_map(|p| p.vertices.iter().map(|v| v.pos));
            let Some(first) = points.next() else {
                return Aabb::new(Point3::origin(), Point3::origin());
            };
            let (mins, maxs) = points.fold((first, first), |(mins, maxs), p| {
                (mins.inf(&p), maxs.sup(&p))
            });
            Aabb::new(mins, maxs)
        })
    }

    /// Invalidates object's cached bounding box.
    fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }

    /// Invert this Mesh (flip inside vs. outside)
    fn inverse(&self) -> Mesh {
        let mut mesh = self.clone();
        mesh.polygons.iter_mut().for_each(Polygon::flip);
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_spans_every_vertex() {
        assert_eq!(Mesh::new().bounding_box().maxs, Point3::origin());

        let a = Mesh::cuboid(Vector3::new(1.0, 2.0, 3.0), Point3::new(-1.0, 0.0, 0.0));
        let bb = a.bounding_box();
        assert_eq!(bb.mins, Point3::new(-1.0, 0.0, 0.0));
        assert_eq!(bb.maxs, Point3::new(0.0, 2.0, 3.0));
        assert!((bb.extents().z - 3.0).abs() < 1e-12);

        // touching boxes still go through the tree
        let touching = a.translate(1.0, 0.0, 0.0);
        assert!(a.bbox_overlaps(&touching));
        assert!(!a.bbox_overlaps(&a.translate(1.5, 0.0, 0.0)));
    }

    #[test]
    fn disjoint_difference_is_identity() {
        let a = Mesh::cuboid(Vector3::new(1.0, 1.0, 1.0), Point3::origin());
        let b = a.translate(5.0, 0.0, 0.0);
        let c = a.difference(&b);
        assert_eq!(c.polygons.len(), a.polygons.len());
        assert!((c.volume() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn mirror_keeps_volume_positive() {
        let a = Mesh::cuboid(Vector3::new(1.0, 2.0, 3.0), Point3::origin());
        let m = a.mirror_axis(0);
        assert!((m.volume() - 6.0).abs() < 1e-9);
        assert!((m.bounding_box().mins.x + 1.0).abs() < 1e-12);
    }

    #[test]
    fn copy_and_translate_rejects_empty_list() {
        let a = Mesh::cuboid(Vector3::new(1.0, 1.0, 1.0), Point3::origin());
        assert!(matches!(
            a.copy_and_translate(&[]),
            Err(GridfinityError::EmptyTranslationList)
        ));
        let row = a
            .copy_and_translate(&[Vector3::zeros(), Vector3::new(2.0, 0.0, 0.0)])
            .expect("two copies");
        assert!((row.volume() - 2.0).abs() < 1e-9);
    }
}
