//! Magnet and screw holes in the bottom of a bin, four per cell.

use crate::config::{BinConfig, MagnetHoleShape};
use crate::errors::Result;
use crate::features::{OVERLAP, cell_offsets, corner_offsets, place_disjoint};
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::sketch::Sketch;
use crate::sketch::shapes::arc_through;
use crate::traits::CSGOps;
use nalgebra::{Point2, Point3, Vector3};
use tracing::debug;

/// Every bottom hole of the bin, ready to be subtracted.
pub fn make_bottom_holes(cfg: &BinConfig) -> Result<Mesh> {
    if !cfg.magnet_holes && !cfg.screw_holes {
        return Ok(Mesh::new());
    }
    let tool = hole_tool(cfg);
    let position = cfg.grid_size / 2.0 - cfg.magnet_hole_distance_from_edge;
    let offsets: Vec<Vector3<Real>> = cell_offsets(&cfg.layout(), cfg.grid_size)
        .into_iter()
        .flat_map(|cell| corner_offsets(position).map(|corner| cell + corner))
        .collect();
    debug!(
        holes = offsets.len(),
        magnets = cfg.magnet_holes,
        screws = cfg.screw_holes,
        "bottom holes"
    );
    Ok(place_disjoint(&tool, &offsets))
}

/// One hole centred on the Z axis, opening through the bin bottom.
///
/// With both magnets and screws the screw hole is bridged by two printed
/// layers: a slot across the magnet one layer deep, then a square the width
/// of the screw one layer deeper.
fn hole_tool(cfg: &BinConfig) -> Mesh {
    let bottom = -cfg.total_height() - OVERLAP;
    let circle_segments = 4 * cfg.segments;
    let mut parts = Vec::new();

    if cfg.magnet_holes {
        let magnet = match cfg.magnet_hole_shape {
            // Circumradius of a hexagon whose flats are the magnet diameter.
            MagnetHoleShape::Hex => {
                Sketch::regular_polygon(6, cfg.magnet_hole_diameter / Real::sqrt(3.0))
            },
            MagnetHoleShape::Round => {
                Sketch::circle(cfg.magnet_hole_diameter / 2.0, circle_segments)
            },
        };
        parts.push(magnet.extrude(bottom, cfg.magnet_hole_depth + OVERLAP));
    }
    if cfg.screw_holes {
        parts.push(Mesh::cylinder(
            cfg.screw_hole_diameter / 2.0,
            cfg.screw_hole_depth + OVERLAP,
            Point3::new(0.0, 0.0, bottom),
            circle_segments,
        ));
    }
    if cfg.magnet_holes && cfg.screw_holes {
        let layer = cfg.sequential_bridging_layer_height;
        let side = cfg.screw_hole_diameter;
        parts.push(Mesh::cuboid(
            Vector3::new(side, side, cfg.magnet_hole_depth + 2.0 * layer + OVERLAP),
            Point3::new(-side / 2.0, -side / 2.0, bottom),
        ));
        parts.push(
            bridge_slot(cfg.magnet_hole_diameter / 2.0, side / 2.0, cfg.segments)
                .extrude(bottom, cfg.magnet_hole_depth + layer + OVERLAP),
        );
    }
    Mesh::union_all(&parts)
}

/// Magnet circle of `radius` clipped to the band `|y| <= half_width`.
fn bridge_slot(radius: Real, half_width: Real, segments: usize) -> Sketch {
    let x = (radius * radius - half_width * half_width).sqrt();
    let mut points = arc_through(
        Point2::new(x, -half_width),
        Point2::new(radius, 0.0),
        Point2::new(x, half_width),
        segments,
    );
    points.extend(arc_through(
        Point2::new(-x, half_width),
        Point2::new(-radius, 0.0),
        Point2::new(-x, -half_width),
        segments,
    ));
    Sketch::from_points(&points)
}
