//! Eco bins: thin walls and a hollowed base, so each cell prints with a
//! fraction of the material of a storage bin.

use crate::config::BinConfig;
use crate::errors::Result;
use crate::features::compartments::{
    CompartmentGrid, CutterSpan, RIM_OVERSHOOT, compartment_void, full_height,
};
use crate::features::{OVERLAP, cell_offsets, place_disjoint, rounded_square_loft};
use crate::float_types::{PI, Real, SMALL_NUMBER};
use crate::mesh::Mesh;
use crate::traits::CSGOps;
use nalgebra::{Point3, Vector3};
use tracing::debug;

/// Height of the small chamfer at the bottom of every base pocket.
const POCKET_CHAMFER: Real = 0.4;

/// Everything removed from an eco bin: the compartments down to a floor
/// just above the base profile, and a pocket in the base under every cell.
pub fn make_eco_bin_cut(cfg: &BinConfig) -> Result<Mesh> {
    let floor = -cfg.total_height() + cfg.base_profile_height() + cfg.base_wall_thickness;
    let divider_top = |height: Real| -cfg.total_height() + full_height(cfg, height);
    let span = CutterSpan {
        floor,
        bottom_fillet: 0.0,
        x_divider_top: divider_top(cfg.x_divider_height),
        y_divider_top: divider_top(cfg.y_divider_height),
    };
    let compartments = compartment_void(cfg, &span)?;

    let pocket = base_pocket(cfg)?;
    let offsets = cell_offsets(&cfg.layout(), cfg.grid_size);
    let z0 = -cfg.total_height() - 1.0;
    let footprint = cfg
        .outline(cfg.wall_thickness)?
        .extrude(z0, RIM_OVERSHOOT - z0);
    let mut pockets = place_disjoint(&pocket, &offsets).intersection(&footprint);
    for divider in divider_walls(cfg, &span) {
        pockets = pockets.difference(&divider);
    }
    debug!(cells = offsets.len(), floor, "eco cut");
    Ok(compartments.union(&pockets))
}

/// Hollow inside the base profile of one cell, following the profile at
/// `base_wall_thickness` from the outside. With magnet holes the pocket
/// starts above them.
fn base_pocket(cfg: &BinConfig) -> Result<Mesh> {
    let wall = cfg.base_wall_thickness;
    let unit = cfg.bin_unit();
    let bottom_chamfer = cfg.base_profile_bottom_chamfer;
    let vertical = cfg.base_profile_vertical_section;
    let top_chamfer = cfg.base_profile_top_chamfer;

    let slope_offset = wall * (PI / 8.0).tan();
    let vertical_width = unit - 2.0 * top_chamfer - 2.0 * wall;
    let bottom_width = vertical_width - 2.0 * POCKET_CHAMFER;
    let vertical_radius = (cfg.bin_vertical_radius - wall).max(SMALL_NUMBER);
    let bottom_radius = (cfg.bin_vertical_radius - POCKET_CHAMFER - wall).max(SMALL_NUMBER);

    let (magnet, top_step) = if cfg.magnet_holes {
        let excess = cfg.magnet_hole_depth + wall - (bottom_chamfer + vertical + slope_offset);
        (cfg.magnet_hole_depth, excess.max(0.0))
    } else {
        (0.0, 0.0)
    };

    let bottom = -cfg.total_height();
    let z_bottom = bottom + wall + magnet;
    let z_vertical = z_bottom + POCKET_CHAMFER;
    let z_vertical_top = bottom + bottom_chamfer + vertical + slope_offset + magnet;
    let z_top_chamfer = bottom + bottom_chamfer + vertical + slope_offset + top_step;
    let rise = top_chamfer + wall - top_step;

    let mut stations = Vec::new();
    if z_top_chamfer > z_bottom {
        stations.push((bottom_width, bottom_radius, z_bottom));
    }
    if z_top_chamfer >= z_vertical {
        stations.push((vertical_width, vertical_radius, z_vertical));
        stations.push((vertical_width, vertical_radius, z_top_chamfer));
    } else {
        // The top chamfer starts inside the bottom chamfer.
        let t = ((z_top_chamfer - z_bottom) / POCKET_CHAMFER).max(0.0);
        stations.push((
            bottom_width + t * (vertical_width - bottom_width),
            bottom_radius + t * (vertical_radius - bottom_radius),
            z_top_chamfer,
        ));
    }
    if top_step > 0.0 {
        stations.push((vertical_width + top_step, vertical_radius, z_top_chamfer));
    }
    stations.push((
        vertical_width + top_step + 2.0 * rise,
        vertical_radius + rise,
        z_top_chamfer + rise,
    ));
    let pocket = rounded_square_loft(&stations, cfg.segments)?;

    if z_vertical_top > z_top_chamfer + rise {
        let lower = rounded_square_loft(
            &[
                (bottom_width, bottom_radius, z_bottom),
                (vertical_width, vertical_radius, z_vertical),
                (vertical_width, vertical_radius, z_vertical_top),
            ],
            cfg.segments,
        )?;
        return Ok(pocket.union(&lower));
    }
    Ok(pocket)
}

/// Full-length slabs where the dividers continue down through the base
/// pockets, stopping just above the compartment floor.
fn divider_walls(cfg: &BinConfig, span: &CutterSpan) -> Vec<Mesh> {
    let grid = CompartmentGrid::new(cfg);
    let z0 = -cfg.total_height() - OVERLAP;
    let cap = span.floor + 1.0;
    let (x0, x1) = (grid.x_min - cfg.wall_thickness - 1.0, grid.x_max + cfg.wall_thickness + 1.0);
    let (y0, y1) = (grid.y_min - cfg.wall_thickness - 1.0, grid.y_max + cfg.wall_thickness + 1.0);

    let mut walls = Vec::new();
    let x_top = span.x_divider_top.min(cap);
    if x_top > z0 {
        for k in 0..grid.x_count - 1 {
            let x = grid.x_start(k) + grid.x_width;
            walls.push(Mesh::cuboid(
                Vector3::new(grid.divider, y1 - y0, x_top - z0),
                Point3::new(x, y0, z0),
            ));
        }
    }
    let y_top = span.y_divider_top.min(cap);
    if y_top > z0 {
        for k in 0..grid.y_count - 1 {
            let y = grid.y_start(k) + grid.y_width;
            walls.push(Mesh::cuboid(
                Vector3::new(x1 - x0, grid.divider, y_top - z0),
                Point3::new(x0, y, z0),
            ));
        }
    }
    walls
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eco(x_dividers: usize) -> BinConfig {
        BinConfig {
            x_grid_units: 1,
            y_grid_units: 1,
            height_units: 3,
            x_dividers,
            segments: 3,
            ..BinConfig::eco_bin()
        }
    }

    #[test]
    fn pocket_reaches_down_to_the_base_wall() {
        let cfg = eco(0);
        let cut = make_eco_bin_cut(&cfg).expect("cut");
        let bb = cut.bounding_box();
        assert!((bb.mins.z - (-cfg.total_height() + cfg.base_wall_thickness)).abs() < 1e-9);
        assert!((bb.maxs.z - RIM_OVERSHOOT).abs() < 1e-9);
        let inner = cfg.x_total_width() - 2.0 * cfg.wall_thickness;
        assert!(bb.extents().x <= inner + 1e-9);
    }

    #[test]
    fn magnets_raise_the_pocket() {
        let cfg = BinConfig {
            magnet_holes: true,
            ..eco(0)
        };
        let bb = base_pocket(&cfg).expect("pocket").bounding_box();
        let floor = -cfg.total_height() + cfg.base_wall_thickness + cfg.magnet_hole_depth;
        assert!((bb.mins.z - floor).abs() < 1e-9);
    }

    #[test]
    fn pocket_widens_to_the_cell() {
        let cfg = eco(0);
        let bb = base_pocket(&cfg).expect("pocket").bounding_box();
        assert!((bb.extents().x - cfg.bin_unit()).abs() < 1e-9);
    }

    #[test]
    fn divider_leaves_material_in_the_base() {
        let open = make_eco_bin_cut(&eco(0)).expect("cut");
        let divided = make_eco_bin_cut(&eco(1)).expect("cut");
        assert!(divided.volume() < open.volume());
    }
}
