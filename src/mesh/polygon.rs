//! Convex planar polygons, the unit the BSP tree splits and classifies.

use crate::float_types::Real;
use crate::mesh::plane::Plane;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};

/// A convex, planar polygon wound counter-clockwise when seen from outside
/// the solid it bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Vertex>,
    pub plane: Plane,
}

impl Polygon {
    /// Build a polygon from vertices, computing its plane.
    /// Returns `None` for degenerate (collinear or repeated) loops.
    pub fn new(vertices: Vec<Vertex>) -> Option<Self> {
        let plane = Plane::from_vertices(&vertices)?;
        Some(Polygon { vertices, plane })
    }

    /// Build a polygon whose plane is already known (split results).
    pub(crate) const fn with_plane(vertices: Vec<Vertex>, plane: Plane) -> Self {
        Polygon { vertices, plane }
    }

    /// Polygon from bare positions; every vertex gets the face normal.
    pub fn from_points(points: &[Point3<Real>]) -> Option<Self> {
        let vertices: Vec<Vertex> = points
            .iter()
            .map(|p| Vertex::new(*p, Vector3::zeros()))
            .collect();
        let mut polygon = Self::new(vertices)?;
        polygon.set_new_normal();
        Some(polygon)
    }

    /// Reverse winding, vertex normals and plane.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.vertices.iter_mut().for_each(Vertex::flip);
        self.plane.flip();
    }

    /// Assign the plane normal to every vertex.
    pub fn set_new_normal(&mut self) {
        let normal = self.plane.normal();
        for v in &mut self.vertices {
            v.normal = normal;
        }
    }

    /// Fan triangulation. Valid because kernel polygons are convex.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        if self.vertices.len() < 3 {
            return Vec::new();
        }
        let anchor = &self.vertices[0];
        self.vertices[1..]
            .windows(2)
            .map(|pair| [anchor.clone(), pair[0].clone(), pair[1].clone()])
            .collect()
    }

    /// Surface area.
    pub fn area(&self) -> Real {
        let anchor = self.vertices[0].pos;
        self.vertices[1..]
            .windows(2)
            .map(|pair| (pair[0].pos - anchor).cross(&(pair[1].pos - anchor)).norm())
            .sum::<Real>()
            * 0.5
    }

    /// Contribution of this face to the enclosed volume (divergence theorem).
    pub fn signed_volume(&self) -> Real {
        let anchor = self.vertices[0].pos.coords;
        self.vertices[1..]
            .windows(2)
            .map(|pair| anchor.dot(&pair[0].pos.coords.cross(&pair[1].pos.coords)))
            .sum::<Real>()
            / 6.0
    }
}
