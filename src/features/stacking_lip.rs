//! Stacking lip: the rim profile a bin placed on top locks into.

use crate::config::BinConfig;
use crate::errors::Result;
use crate::features::OVERLAP;
use crate::float_types::Real;
use crate::mesh::Mesh;
use tracing::debug;

/// `(inset, z)` cross-section of the lip, measured from the outer wall.
///
/// Above the rim it mirrors the base profile with a top ledge. Below the rim
/// a 45 degree support runs from the lip back into the wall so it prints
/// without overhang. The section reaches [`OVERLAP`] down into the body.
pub fn lip_profile(cfg: &BinConfig) -> Vec<[Real; 2]> {
    let ledge = cfg.stacking_lip_top_ledge;
    let top_chamfer = cfg.stacking_lip_top_chamfer;
    let vertical = cfg.stacking_lip_vertical_section;
    let bottom_chamfer = cfg.stacking_lip_bottom_chamfer;
    let inset = cfg.stacking_lip_inset();
    let wall = cfg.wall_thickness;
    let top = bottom_chamfer + vertical + top_chamfer;
    vec![
        [0.0, -OVERLAP],
        [0.0, top],
        [ledge, top],
        [ledge + top_chamfer, bottom_chamfer + vertical],
        [ledge + top_chamfer, bottom_chamfer],
        [inset, 0.0],
        [inset, -vertical],
        [wall, -vertical - (inset - wall)],
        [wall, -OVERLAP],
    ]
}

/// Lip swept along the outer wall of the whole footprint.
pub fn make_stacking_lip(cfg: &BinConfig) -> Result<Mesh> {
    let profile = lip_profile(cfg);
    debug!(inset = cfg.stacking_lip_inset(), "stacking lip");
    cfg.outline(0.0)?.sweep(&profile)
}
