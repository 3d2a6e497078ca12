//! Gridfinity features, one module per part of a bin or baseplate.
//!
//! Every builder takes a validated config and returns a solid placed in bin
//! coordinates: cell `(0, 0)` centred on the origin, the rim at `z = 0` and
//! the bottom at `z = -total_height`. Cutting tools overshoot the faces they
//! open by [`OVERLAP`] so no boolean ever works on coplanar touching faces.

use crate::errors::Result;
use crate::float_types::Real;
use crate::layout::Layout;
use crate::mesh::Mesh;
use crate::sketch::Sketch;
use crate::traits::CSGOps;
use nalgebra::Vector3;

pub mod base;
pub mod baseplate;
pub mod compartments;
pub mod eco;
pub mod holes;
pub mod label_shelf;
pub mod scoop;
pub mod stacking_lip;

/// How far cutting tools reach past the faces they open.
pub const OVERLAP: Real = 0.5;

/// Rounded rectangle centred on the origin, extruded from `z` by `height`.
pub fn rounded_rectangle_extrude(
    x_width: Real,
    y_width: Real,
    z: Real,
    height: Real,
    radius: Real,
    segments: usize,
) -> Mesh {
    Sketch::rounded_rectangle(x_width, y_width, radius, segments).extrude(z, height)
}

/// Chamfered block: a rounded rectangle at `z` growing by `2 * height` in
/// width and `height` in radius up to `z + height` (a 45 degree slope).
pub fn rounded_rectangle_chamfer(
    x_width: Real,
    y_width: Real,
    z: Real,
    height: Real,
    radius: Real,
    segments: usize,
) -> Result<Mesh> {
    Sketch::loft(&[
        (Sketch::rounded_rectangle(x_width, y_width, radius, segments), z),
        (
            Sketch::rounded_rectangle(
                x_width + 2.0 * height,
                y_width + 2.0 * height,
                radius + height,
                segments,
            ),
            z + height,
        ),
    ])
}

/// Centre of every occupied cell.
pub(crate) fn cell_offsets(layout: &Layout, grid_size: Real) -> Vec<Vector3<Real>> {
    layout
        .cells()
        .into_iter()
        .map(|(x, y)| Vector3::new(x as Real * grid_size, y as Real * grid_size, 0.0))
        .collect()
}

/// The four hole centres around the origin at `position` along each axis.
pub(crate) fn corner_offsets(position: Real) -> [Vector3<Real>; 4] {
    [
        Vector3::new(-position, -position, 0.0),
        Vector3::new(position, -position, 0.0),
        Vector3::new(-position, position, 0.0),
        Vector3::new(position, position, 0.0),
    ]
}

/// Copies of a solid at each offset, without clipping. The copies must not
/// overlap.
pub(crate) fn place_disjoint(mesh: &Mesh, offsets: &[Vector3<Real>]) -> Mesh {
    let polygons = offsets
        .iter()
        .flat_map(|offset| mesh.translate_vector(*offset).polygons)
        .collect();
    Mesh::from_polygon_vec(polygons)
}

/// Loft through `(width, radius, z)` stations of centred rounded squares.
pub(crate) fn rounded_square_loft(stations: &[(Real, Real, Real)], segments: usize) -> Result<Mesh> {
    let sections: Vec<(Sketch, Real)> = stations
        .iter()
        .map(|&(width, radius, z)| (Sketch::rounded_rectangle(width, width, radius, segments), z))
        .collect();
    Sketch::loft(&sections)
}
