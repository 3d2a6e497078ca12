//! Oriented planes and polygon classification for the BSP kernel.

use crate::float_types::{EPSILON, Real};
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};

// Plane classification flags. SPANNING is FRONT | BACK.
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// Oriented plane `normal · p = w` with a unit normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub normal: Vector3<Real>,
    pub w: Real,
}

impl Plane {
    /// Plane with the given (not necessarily unit) normal through `point`.
    pub fn from_normal(normal: Vector3<Real>, point: &Point3<Real>) -> Option<Self> {
        let normal = normal.try_normalize(Real::EPSILON)?;
        Some(Plane {
            w: normal.dot(&point.coords),
            normal,
        })
    }

    /// Plane through three points, normal following the right-hand rule.
    pub fn from_points(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Option<Self> {
        Self::from_normal((b - a).cross(&(c - a)), a)
    }

    /// Best-fit plane of a vertex loop using Newell's method, which stays
    /// stable when the first few vertices are nearly collinear.
    pub fn from_vertices(vertices: &[Vertex]) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let mut normal = Vector3::zeros();
        let mut centroid = Vector3::zeros();
        for (current, next) in vertices.iter().zip(vertices.iter().cycle().skip(1)) {
            normal += current.pos.coords.cross(&next.pos.coords);
            centroid += current.pos.coords;
        }
        centroid /= vertices.len() as Real;
        Self::from_normal(normal, &Point3::from(centroid))
    }

    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    pub const fn offset(&self) -> Real {
        self.w
    }

    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    pub fn flipped(&self) -> Self {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Signed distance of `point` from the plane.
    #[inline]
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classify a point as FRONT, BACK or COPLANAR within [`EPSILON`].
    #[inline]
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let distance = self.signed_distance(point);
        if distance < -EPSILON {
            BACK
        } else if distance > EPSILON {
            FRONT
        } else {
            COPLANAR
        }
    }

    /// Bitwise union of the classification of every vertex.
    pub fn classify_polygon(&self, polygon: &Polygon) -> i8 {
        polygon
            .vertices
            .iter()
            .fold(COPLANAR, |acc, v| acc | self.orient_point(&v.pos))
    }

    /// Splits a polygon by this plane, returning four buckets:
    /// `(coplanar_front, coplanar_back, front, back)`.
    ///
    /// Pieces of a spanning polygon keep the plane of the original polygon.
    #[allow(clippy::type_complexity)]
    pub fn split_polygon(
        &self,
        polygon: &Polygon,
    ) -> (Vec<Polygon>, Vec<Polygon>, Vec<Polygon>, Vec<Polygon>) {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        let types: Vec<i8> = polygon
            .vertices
            .iter()
            .map(|v| self.orient_point(&v.pos))
            .collect();
        let polygon_type = types.iter().fold(COPLANAR, |acc, &t| acc | t);

        match polygon_type {
            COPLANAR => {
                if self.normal.dot(&polygon.plane.normal) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            },
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let count = polygon.vertices.len();
                let mut split_front = Vec::with_capacity(count + 1);
                let mut split_back = Vec::with_capacity(count + 1);

                for i in 0..count {
                    let j = (i + 1) % count;
                    let (type_i, type_j) = (types[i], types[j]);
                    let vertex_i = &polygon.vertices[i];
                    let vertex_j = &polygon.vertices[j];

                    if type_i != BACK {
                        split_front.push(vertex_i.clone());
                    }
                    if type_i != FRONT {
                        split_back.push(vertex_i.clone());
                    }
                    if (type_i | type_j) == SPANNING {
                        let denom = self.normal.dot(&(vertex_j.pos - vertex_i.pos));
                        if denom.abs() > Real::EPSILON {
                            let t = (self.w - self.normal.dot(&vertex_i.pos.coords)) / denom;
                            let vertex_new = vertex_i.interpolate(vertex_j, t);
                            split_front.push(vertex_new.clone());
                            split_back.push(vertex_new);
                        }
                    }
                }

                if split_front.len() >= 3 {
                    front.push(Polygon::with_plane(split_front, polygon.plane.clone()));
                }
                if split_back.len() >= 3 {
                    back.push(Polygon::with_plane(split_back, polygon.plane.clone()));
                }
            },
        }

        (coplanar_front, coplanar_back, front, back)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::polygon::Polygon;

    fn square_at_x(x: Real) -> Polygon {
        Polygon::from_points(&[
            Point3::new(x, -1.0, -1.0),
            Point3::new(x, 1.0, -1.0),
            Point3::new(x, 1.0, 1.0),
            Point3::new(x, -1.0, 1.0),
        ])
        .expect("square is planar")
    }

    #[test]
    fn orient_point_uses_epsilon_band() {
        let plane = Plane::from_normal(Vector3::z(), &Point3::origin()).unwrap();
        assert_eq!(plane.orient_point(&Point3::new(0.0, 0.0, 1.0)), FRONT);
        assert_eq!(plane.orient_point(&Point3::new(0.0, 0.0, -1.0)), BACK);
        assert_eq!(plane.orient_point(&Point3::new(5.0, 5.0, EPSILON / 2.0)), COPLANAR);
    }

    #[test]
    fn split_spanning_polygon_keeps_area() {
        let plane = Plane::from_normal(Vector3::y(), &Point3::new(0.0, 0.25, 0.0)).unwrap();
        let polygon = square_at_x(0.0);
        let (cf, cb, front, back) = plane.split_polygon(&polygon);
        assert!(cf.is_empty() && cb.is_empty());
        assert_eq!(front.len(), 1);
        assert_eq!(back.len(), 1);
        let total = front[0].area() + back[0].area();
        assert!((total - polygon.area()).abs() < 1e-12);
        assert!((front[0].area() - 1.5).abs() < 1e-12);
        // pieces keep the original plane
        assert_eq!(front[0].plane, polygon.plane);
    }

    #[test]
    fn coplanar_polygons_sorted_by_facing() {
        let polygon = square_at_x(2.0);
        let same = Plane::from_normal(polygon.plane.normal, &Point3::new(2.0, 0.0, 0.0)).unwrap();
        let (cf, cb, _, _) = same.split_polygon(&polygon);
        assert_eq!((cf.len(), cb.len()), (1, 0));
        let (cf, cb, _, _) = same.flipped().split_polygon(&polygon);
        assert_eq!((cf.len(), cb.len()), (0, 1));
    }
}
