//! Stepped base profile under every cell, and the solid body above it.

use crate::config::BinConfig;
use crate::errors::Result;
use crate::features::{OVERLAP, cell_offsets, place_disjoint, rounded_square_loft};
use crate::mesh::Mesh;
use tracing::debug;

/// Base profile of one cell centred on the origin.
///
/// Bottom chamfer, vertical section and top chamfer form a single loft. The
/// loft continues [`OVERLAP`] straight up into the body so the two solids
/// overlap instead of touching.
fn base_cell(cfg: &BinConfig) -> Result<Mesh> {
    let unit = cfg.bin_unit();
    let bottom_chamfer = cfg.base_profile_bottom_chamfer;
    let vertical = cfg.base_profile_vertical_section;
    let top_chamfer = cfg.base_profile_top_chamfer;
    let vertical_width = unit - 2.0 * top_chamfer;
    let bottom_width = vertical_width - 2.0 * bottom_chamfer;
    let bottom_radius = cfg.bin_bottom_radius;
    let vertical_radius = cfg.bin_vertical_radius;

    let z0 = -cfg.total_height();
    let z_top = z0 + cfg.base_profile_height();
    rounded_square_loft(
        &[
            (bottom_width, bottom_radius, z0),
            (vertical_width, bottom_radius + bottom_chamfer, z0 + bottom_chamfer),
            (vertical_width, vertical_radius, z0 + bottom_chamfer),
            (vertical_width, vertical_radius, z0 + bottom_chamfer + vertical),
            (unit, vertical_radius + top_chamfer, z_top),
            (unit, vertical_radius + top_chamfer, z_top + OVERLAP),
        ],
        cfg.segments,
    )
}

/// Base profile under every occupied cell.
pub fn make_bin_base(cfg: &BinConfig) -> Result<Mesh> {
    let cell = base_cell(cfg)?;
    let offsets = cell_offsets(&cfg.layout(), cfg.grid_size);
    debug!(cells = offsets.len(), "bin base");
    Ok(place_disjoint(&cell, &offsets))
}

/// Solid block from the top of the base profile up to the rim.
pub fn make_bin_body(cfg: &BinConfig) -> Result<Mesh> {
    let z0 = -cfg.total_height() + cfg.base_profile_height();
    Ok(cfg.outline(0.0)?.extrude(z0, -z0))
}
