//! 2D shapes as `Sketch`s, plus the corner-rounding helpers the profiles use.

use crate::float_types::{Real, SMALL_NUMBER, TAU};
use crate::sketch::Sketch;
use nalgebra::{Point2, Rotation2, Vector2};

/// Dimensions of an L footprint with its inner corner at `(x2, y2)`.
///
/// The outline runs `(0,0) -> (0,y1) -> (x2,y1) -> (x2,y2) -> (x1,y2) -> (x1,0)`,
/// so `x2 < x1` and `y2 < y1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LShapeData {
    pub x1: Real,
    pub y1: Real,
    pub x2: Real,
    pub y2: Real,
}

impl Sketch {
    /// Axis-aligned rectangle centred on the origin.
    pub fn rectangle(x_width: Real, y_width: Real) -> Self {
        let (hx, hy) = (x_width / 2.0, y_width / 2.0);
        Sketch::from_points(&[
            Point2::new(-hx, -hy),
            Point2::new(hx, -hy),
            Point2::new(hx, hy),
            Point2::new(-hx, hy),
        ])
    }

    /// Rectangle centred on the origin with every corner rounded by `radius`.
    ///
    /// The radius is clamped into `[SMALL_NUMBER, min(x_width, y_width) / 2]`,
    /// so every rounded rectangle built with the same `segments` has the same
    /// vertex count and can be lofted into any other.
    pub fn rounded_rectangle(x_width: Real, y_width: Real, radius: Real, segments: usize) -> Self {
        Self::rounded_rectangle_corners(x_width, y_width, [radius; 4], segments)
    }

    /// Rounded rectangle with individual radii, ordered bottom-left,
    /// bottom-right, top-right, top-left.
    pub fn rounded_rectangle_corners(
        x_width: Real,
        y_width: Real,
        radii: [Real; 4],
        segments: usize,
    ) -> Self {
        let (hx, hy) = (x_width / 2.0, y_width / 2.0);
        let limit = hx.min(hy);
        let corners = [
            Point2::new(-hx, -hy),
            Point2::new(hx, -hy),
            Point2::new(hx, hy),
            Point2::new(-hx, hy),
        ];
        let mut points = Vec::with_capacity(4 * (segments + 1));
        for (i, corner) in corners.iter().enumerate() {
            let prev = corners[(i + 3) % 4];
            let next = corners[(i + 1) % 4];
            let radius = clamp_radius(radii[i], limit);
            points.extend(corner_arc(&prev, corner, &next, radius, segments));
        }
        Sketch::from_points(&points)
    }

    /// Circle approximated by `segments` vertices, first vertex on +X.
    pub fn circle(radius: Real, segments: usize) -> Self {
        Self::regular_polygon(segments.max(3), radius)
    }

    /// Regular polygon with the given circumradius, first vertex on +X.
    pub fn regular_polygon(sides: usize, circumradius: Real) -> Self {
        let sides = sides.max(3);
        let points: Vec<Point2<Real>> = (0..sides)
            .map(|i| {
                let theta = TAU * i as Real / sides as Real;
                Point2::new(circumradius * theta.cos(), circumradius * theta.sin())
            })
            .collect();
        Sketch::from_points(&points)
    }

    /// Arbitrary simple polygon.
    pub fn polygon(points: &[[Real; 2]]) -> Self {
        let points: Vec<Point2<Real>> = points.iter().map(|&[x, y]| Point2::new(x, y)).collect();
        Sketch::from_points(&points)
    }

    /// L footprint offset by `(x_offset, y_offset)` with every corner rounded.
    /// The five outer corners and the inner corner share one radius.
    pub fn rounded_l(
        data: LShapeData,
        x_offset: Real,
        y_offset: Real,
        radius: Real,
        segments: usize,
    ) -> Self {
        let corners = [
            Point2::new(0.0, 0.0),
            Point2::new(data.x1, 0.0),
            Point2::new(data.x1, data.y2),
            Point2::new(data.x2, data.y2),
            Point2::new(data.x2, data.y1),
            Point2::new(0.0, data.y1),
        ];
        let points = fillet_ring(&corners, &[radius; 6], segments);
        Sketch::from_points(&points).translate(x_offset, y_offset)
    }

    /// Round every corner of every ring. Corners that point out of the
    /// material get `convex_radius`, re-entrant corners `concave_radius`.
    /// Radii below [`SMALL_NUMBER`] are raised to it, so outlines of the
    /// same layout keep one ring structure whatever the radii.
    pub fn rounded_corners(
        &self,
        convex_radius: Real,
        concave_radius: Real,
        segments: usize,
    ) -> Self {
        let convex_radius = convex_radius.max(SMALL_NUMBER);
        let concave_radius = concave_radius.max(SMALL_NUMBER);
        let map_ring = |ring: Vec<Point2<Real>>| {
            let radii: Vec<Real> = (0..ring.len())
                .map(|i| {
                    let (prev, corner, next) = neighbours(&ring, i);
                    if turn_angle(&prev, &corner, &next) >= 0.0 {
                        convex_radius
                    } else {
                        concave_radius
                    }
                })
                .collect();
            fillet_ring(&ring, &radii, segments)
        };

        let mut result = Sketch::new();
        for polygon in &self.geometry {
            let exterior = map_ring(crate::sketch::open_ring(polygon.exterior()));
            let holes: Vec<Vec<Point2<Real>>> = polygon
                .interiors()
                .iter()
                .map(|ring| map_ring(crate::sketch::open_ring(ring)))
                .collect();
            let piece = Sketch::from_rings(&exterior, &holes);
            result.geometry.0.extend(piece.geometry.0);
        }
        result
    }

    /// Every corner rounded with one radius.
    pub fn rounded_outline(&self, radius: Real, segments: usize) -> Self {
        self.rounded_corners(radius, radius, segments)
    }

    /// Move every edge `distance` into the material (negative grows the
    /// shape), joining edges with mitres. Exact for outlines made of straight
    /// edges whose offsets do not collide.
    pub fn offset_mitre(&self, distance: Real) -> Self {
        let mut result = Sketch::new();
        for polygon in &self.geometry {
            let exterior = mitre_ring(&crate::sketch::open_ring(polygon.exterior()), distance);
            let holes: Vec<Vec<Point2<Real>>> = polygon
                .interiors()
                .iter()
                .map(|ring| mitre_ring(&crate::sketch::open_ring(ring), distance))
                .collect();
            let piece = Sketch::from_rings(&exterior, &holes);
            result.geometry.0.extend(piece.geometry.0);
        }
        result
    }
}

/// Radius clamped so that opposite arcs on a side of width `2 * limit` never
/// overlap, and never below [`SMALL_NUMBER`].
pub fn clamp_radius(radius: Real, limit: Real) -> Real {
    radius.min(limit).max(SMALL_NUMBER)
}

fn neighbours(ring: &[Point2<Real>], i: usize) -> (Point2<Real>, Point2<Real>, Point2<Real>) {
    let n = ring.len();
    (ring[(i + n - 1) % n], ring[i], ring[(i + 1) % n])
}

/// Signed turning angle at `corner`. Positive is a left turn.
fn turn_angle(prev: &Point2<Real>, corner: &Point2<Real>, next: &Point2<Real>) -> Real {
    let a = corner - prev;
    let b = next - corner;
    a.perp(&b).atan2(a.dot(&b))
}

/// Left-hand unit normal of a direction.
#[inline]
pub(crate) fn left_normal(direction: &Vector2<Real>) -> Vector2<Real> {
    Vector2::new(-direction.y, direction.x)
}

/// Replace a corner with a tangent arc of `radius` sampled into
/// `segments + 1` points. Collinear corners stay a single point.
///
/// The tangent length is clamped to half of the shorter adjacent edge.
pub fn corner_arc(
    prev: &Point2<Real>,
    corner: &Point2<Real>,
    next: &Point2<Real>,
    radius: Real,
    segments: usize,
) -> Vec<Point2<Real>> {
    tangent_arc(prev, corner, next, radius, segments, [0.5, 0.5])
}

/// Corner arc whose tangent may use at most `edge_share[0]` of the incoming
/// and `edge_share[1]` of the outgoing edge.
fn tangent_arc(
    prev: &Point2<Real>,
    corner: &Point2<Real>,
    next: &Point2<Real>,
    radius: Real,
    segments: usize,
    edge_share: [Real; 2],
) -> Vec<Point2<Real>> {
    let incoming = corner - prev;
    let outgoing = next - corner;
    let (Some(a), Some(b)) = (
        incoming.try_normalize(Real::EPSILON),
        outgoing.try_normalize(Real::EPSILON),
    ) else {
        return vec![*corner];
    };
    let theta = a.perp(&b).atan2(a.dot(&b));
    if theta.abs() < 1e-9 || radius <= 0.0 {
        return vec![*corner];
    }

    let half_tan = (theta.abs() / 2.0).tan();
    let max_tangent =
        (incoming.norm() * edge_share[0]).min(outgoing.norm() * edge_share[1]);
    let tangent = (radius * half_tan).min(max_tangent);
    let radius = tangent / half_tan;

    let start = corner - a * tangent;
    let center = start + left_normal(&a) * radius * theta.signum();
    let spoke = start - center;
    let segments = segments.max(1);
    (0..=segments)
        .map(|k| center + Rotation2::new(theta * k as Real / segments as Real) * spoke)
        .collect()
}

/// Fillet every vertex of a closed ring with its own radius (`0` keeps it
/// sharp). An edge between two rounded corners is shared half and half; a
/// corner next to a sharp one may use the whole edge.
pub fn fillet_ring(ring: &[Point2<Real>], radii: &[Real], segments: usize) -> Vec<Point2<Real>> {
    let n = ring.len();
    let rounded = |i: usize| radii.get(i).copied().unwrap_or(0.0) > 0.0;
    let share = |i: usize| if rounded(i) { 0.5 } else { 1.0 };
    let mut points = Vec::with_capacity(n * (segments + 1));
    for i in 0..n {
        let (prev, corner, next) = neighbours(ring, i);
        let radius = radii.get(i).copied().unwrap_or(0.0);
        let edge_share = [share((i + n - 1) % n), share((i + 1) % n)];
        points.extend(tangent_arc(&prev, &corner, &next, radius, segments, edge_share));
    }
    points
}

/// Fillet a single vertex of a closed ring.
pub fn fillet_corner(
    ring: &[Point2<Real>],
    index: usize,
    radius: Real,
    segments: usize,
) -> Vec<Point2<Real>> {
    let mut radii = vec![0.0; ring.len()];
    if let Some(r) = radii.get_mut(index) {
        *r = radius;
    }
    fillet_ring(ring, &radii, segments)
}

/// Points of the circular arc from `start` through `mid` to `end`, both ends
/// included. Collinear input yields the straight chord.
pub fn arc_through(
    start: Point2<Real>,
    mid: Point2<Real>,
    end: Point2<Real>,
    segments: usize,
) -> Vec<Point2<Real>> {
    let Some(center) = circumcenter(&start, &mid, &end) else {
        return vec![start, end];
    };
    let angle = |p: &Point2<Real>| (p.y - center.y).atan2(p.x - center.x);
    let a0 = angle(&start);
    let to_mid = (angle(&mid) - a0).rem_euclid(TAU);
    let to_end = (angle(&end) - a0).rem_euclid(TAU);
    let sweep = if to_mid < to_end { to_end } else { to_end - TAU };

    let spoke = start - center;
    let segments = segments.max(1);
    let mut points: Vec<Point2<Real>> = (0..segments)
        .map(|k| center + Rotation2::new(sweep * k as Real / segments as Real) * spoke)
        .collect();
    points.push(end);
    points
}

fn circumcenter(a: &Point2<Real>, b: &Point2<Real>, c: &Point2<Real>) -> Option<Point2<Real>> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < 1e-12 {
        return None;
    }
    let (a2, b2, c2) = (a.coords.norm_squared(), b.coords.norm_squared(), c.coords.norm_squared());
    Some(Point2::new(
        (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
        (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
    ))
}

/// Mitre offset of a closed ring towards its left side.
pub(crate) fn mitre_ring(ring: &[Point2<Real>], distance: Real) -> Vec<Point2<Real>> {
    (0..ring.len())
        .map(|i| {
            let (prev, corner, next) = neighbours(ring, i);
            corner + mitre_vector(&prev, &corner, &next) * distance
        })
        .collect()
}

/// Unit-offset displacement of `corner` so both adjacent edges move one unit
/// to their left. Zero-length edges fall back to the other edge.
pub(crate) fn mitre_vector(
    prev: &Point2<Real>,
    corner: &Point2<Real>,
    next: &Point2<Real>,
) -> Vector2<Real> {
    let a = (corner - prev).try_normalize(Real::EPSILON);
    let b = (next - corner).try_normalize(Real::EPSILON);
    match (a, b) {
        (Some(a), Some(b)) => {
            let denominator = 1.0 + a.dot(&b);
            if denominator.abs() < 1e-9 {
                left_normal(&a)
            } else {
                (left_normal(&a) + left_normal(&b)) / denominator
            }
        },
        (Some(a), None) => left_normal(&a),
        (None, Some(b)) => left_normal(&b),
        (None, None) => Vector2::zeros(),
    }
}
