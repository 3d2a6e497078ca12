//! 2D profiles (`Sketch`) and the operations that turn them into solids.
//!
//! A sketch is a [`geo::MultiPolygon`] kept in canonical orientation:
//! exteriors counter-clockwise, holes clockwise. Every solid builder in the
//! crate starts from one of these.

use crate::float_types::Real;
use geo::{
    Area, BooleanOps, Coord, LineString, MapCoords, MultiPolygon, Orient, Point,
    Polygon as GeoPolygon, Rotate, Translate, orient::Direction,
};
use nalgebra::Point2;

pub mod extrude;
pub mod shapes;

#[derive(Clone, Debug, PartialEq)]
pub struct Sketch {
    pub geometry: MultiPolygon<Real>,
}

impl Default for Sketch {
    fn default() -> Self {
        Self::new()
    }
}

impl Sketch {
    /// Returns an empty sketch
    pub fn new() -> Self {
        Sketch {
            geometry: MultiPolygon::new(Vec::new()),
        }
    }

    /// Wrap geo geometry, normalising ring orientation.
    pub fn from_geo(geometry: MultiPolygon<Real>) -> Self {
        Sketch {
            geometry: geometry.orient(Direction::Default),
        }
    }

    pub fn from_polygon(polygon: GeoPolygon<Real>) -> Self {
        Self::from_geo(MultiPolygon::new(vec![polygon]))
    }

    /// Single polygon from an open point loop.
    pub fn from_points(points: &[Point2<Real>]) -> Self {
        if points.len() < 3 {
            return Sketch::new();
        }
        Self::from_polygon(GeoPolygon::new(line_string(points), Vec::new()))
    }

    /// Single polygon with holes, each given as an open point loop.
    pub fn from_rings(exterior: &[Point2<Real>], holes: &[Vec<Point2<Real>>]) -> Self {
        if exterior.len() < 3 {
            return Sketch::new();
        }
        let interiors = holes.iter().map(|hole| line_string(hole)).collect();
        Self::from_polygon(GeoPolygon::new(line_string(exterior), interiors))
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.0.is_empty()
    }

    /// Enclosed area (holes subtracted).
    pub fn area(&self) -> Real {
        self.geometry.unsigned_area()
    }

    pub fn translate(&self, dx: Real, dy: Real) -> Self {
        Sketch {
            geometry: Translate::translate(&self.geometry, dx, dy),
        }
    }

    /// Rotate counter-clockwise about the origin.
    pub fn rotate(&self, degrees: Real) -> Self {
        Sketch {
            geometry: self
                .geometry
                .rotate_around_point(degrees, Point::new(0.0, 0.0)),
        }
    }

    /// Mirror across the Y axis (`x -> -x`).
    pub fn mirror_x(&self) -> Self {
        Self::from_geo(self.geometry.map_coords(|c| Coord { x: -c.x, y: c.y }))
    }

    /// Mirror across the X axis (`y -> -y`).
    pub fn mirror_y(&self) -> Self {
        Self::from_geo(self.geometry.map_coords(|c| Coord { x: c.x, y: -c.y }))
    }

    pub fn union(&self, other: &Sketch) -> Self {
        Self::from_geo(self.geometry.union(&other.geometry))
    }

    pub fn difference(&self, other: &Sketch) -> Self {
        Self::from_geo(self.geometry.difference(&other.geometry))
    }

    /// Open point loops of every ring, polygon by polygon, exterior first.
    pub fn rings(&self) -> Vec<Vec<Point2<Real>>> {
        self.geometry
            .iter()
            .flat_map(|polygon| {
                std::iter::once(polygon.exterior()).chain(polygon.interiors().iter())
            })
            .map(open_ring)
            .collect()
    }

    /// Per polygon, the vertex count of each ring. Two sketches with the same
    /// structure can be lofted into each other.
    pub fn structure(&self) -> Vec<Vec<usize>> {
        self.geometry
            .iter()
            .map(|polygon| {
                std::iter::once(polygon.exterior())
                    .chain(polygon.interiors().iter())
                    .map(|ring| open_ring(ring).len())
                    .collect()
            })
            .collect()
    }
}

/// Closed geo ring from an open point loop. The first point is always
/// repeated at the end, so a loop whose last point happens to coincide with
/// its first keeps its vertex count.
pub(crate) fn line_string(points: &[Point2<Real>]) -> LineString<Real> {
    let mut coords: Vec<Coord<Real>> = points.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    if let Some(first) = coords.first().copied() {
        coords.push(first);
    }
    LineString::from(coords)
}

/// Ring points without the closing duplicate.
pub(crate) fn open_ring(ring: &LineString<Real>) -> Vec<Point2<Real>> {
    let mut points: Vec<Point2<Real>> = ring.coords().map(|c| Point2::new(c.x, c.y)).collect();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sketch_is_empty() {
        assert!(Sketch::default().geometry.0.is_empty());
        assert_eq!(Sketch::default(), Sketch::new());
    }

    fn unit_square() -> Vec<Point2<Real>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
        ]
    }

    #[test]
    fn clockwise_input_is_reoriented() {
        let sketch = Sketch::from_points(&unit_square());
        let ring = &sketch.rings()[0];
        let doubled: Real = ring
            .iter()
            .zip(ring.iter().cycle().skip(1))
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum();
        assert!(doubled > 0.0);
        assert_eq!(sketch.structure(), vec![vec![4]]);
    }

    #[test]
    fn mirror_preserves_area() {
        let sketch = Sketch::from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(0.0, 2.0),
        ]);
        assert!((sketch.mirror_x().area() - 3.0).abs() < 1e-12);
        assert!((sketch.mirror_y().translate(5.0, 5.0).area() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn hole_is_subtracted_from_area() {
        let outer: Vec<_> = unit_square().iter().map(|p| Point2::new(p.x * 4.0, p.y * 4.0)).collect();
        let hole: Vec<_> = unit_square().iter().map(|p| Point2::new(p.x + 1.0, p.y + 1.0)).collect();
        let sketch = Sketch::from_rings(&outer, &[hole]);
        assert!((sketch.area() - 15.0).abs() < 1e-12);
        assert_eq!(sketch.rings().len(), 2);
    }
}
