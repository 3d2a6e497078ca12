//! 3D primitives as `Mesh`s

use crate::errors::Result;
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::mesh::polygon::Polygon;
use crate::sketch::Sketch;
use nalgebra::{Point3, Vector3};

impl Mesh {
    /// Axis-aligned box spanning `origin .. origin + size`.
    ///
    /// ```text
    ///     7-------6
    ///    /|      /|
    ///   4-------5 |
    ///   | 3-----|-2
    ///   |/      |/
    ///   0-------1
    /// ```
    /// Faces are wound counter-clockwise seen from outside.
    pub fn cuboid(size: Vector3<Real>, origin: Point3<Real>) -> Mesh {
        let (x0, y0, z0) = (origin.x, origin.y, origin.z);
        let (x1, y1, z1) = (x0 + size.x, y0 + size.y, z0 + size.z);
        let corners = [
            Point3::new(x0, y0, z0),
            Point3::new(x1, y0, z0),
            Point3::new(x1, y1, z0),
            Point3::new(x0, y1, z0),
            Point3::new(x0, y0, z1),
            Point3::new(x1, y0, z1),
            Point3::new(x1, y1, z1),
            Point3::new(x0, y1, z1),
        ];
        let faces = [
            [0, 3, 2, 1], // bottom
            [4, 5, 6, 7], // top
            [0, 1, 5, 4], // front
            [3, 7, 6, 2], // back
            [0, 4, 7, 3], // left
            [1, 2, 6, 5], // right
        ];
        let polygons = faces
            .iter()
            .filter_map(|face| Polygon::from_points(&face.map(|i| corners[i])))
            .collect();
        Mesh::from_polygon_vec(polygons)
    }

    /// Upright cylinder with its base circle centred on `base_center`.
    /// A negative height grows downward from the base.
    pub fn cylinder(
        radius: Real,
        height: Real,
        base_center: Point3<Real>,
        segments: usize,
    ) -> Mesh {
        Sketch::circle(radius, segments)
            .translate(base_center.x, base_center.y)
            .extrude(base_center.z, height)
    }

    /// Truncated cone from `bottom_radius` at the base to `top_radius` at
    /// `base_center.z + height`.
    pub fn cone_frustum(
        bottom_radius: Real,
        top_radius: Real,
        height: Real,
        base_center: Point3<Real>,
        segments: usize,
    ) -> Result<Mesh> {
        let ring = |r: Real| Sketch::circle(r, segments).translate(base_center.x, base_center.y);
        let (z0, z1) = (base_center.z, base_center.z + height);
        if height >= 0.0 {
            Sketch::loft(&[(ring(bottom_radius), z0), (ring(top_radius), z1)])
        } else {
            Sketch::loft(&[(ring(top_radius), z1), (ring(bottom_radius), z0)])
        }
    }

    /// Straight prism of `sketch` between `z` and `z + height`.
    pub fn prism(sketch: &Sketch, z: Real, height: Real) -> Mesh {
        sketch.extrude(z, height)
    }
}
