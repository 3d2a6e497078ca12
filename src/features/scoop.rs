//! Scoop: a concave ramp along the right wall of each compartment column so
//! small parts can be swept out with a finger.

use crate::config::BinConfig;
use crate::errors::Result;
use crate::features::OVERLAP;
use crate::features::compartments::{CompartmentGrid, RIM_OVERSHOOT};
use crate::float_types::{FRAC_PI_4, Real};
use crate::mesh::Mesh;
use crate::sketch::Sketch;
use crate::sketch::shapes::{arc_through, fillet_ring};
use crate::traits::CSGOps;
use nalgebra::Point2;
use tracing::{debug, warn};

/// Gap kept between the filler's fillets and the lip edge they run along.
const FILLET_MARGIN: Real = 0.01;

/// Largest radius that still fits the compartments, or `None` when nothing
/// fits.
pub fn scoop_radius(cfg: &BinConfig) -> Option<Real> {
    let requested = cfg.scoop_radius;
    let mut radius = requested;
    let above_floor = cfg.x_divider_height - cfg.height_unit_value;
    if cfg.x_divider_height != 0.0 && requested > above_floor {
        radius = radius.min(above_floor - 1.0);
    }
    let x_comp = cfg.x_compartment_width();
    if cfg.x_dividers > 0 && requested > x_comp {
        radius = radius.min(x_comp - 2.0);
    }
    let usable = cfg.usable_height();
    if usable > 0.0 && requested > usable {
        radius = radius.min(usable);
    }
    (radius > 0.0).then_some(radius)
}

/// Scoop material added back into the compartment void. Returns `None`,
/// with a warning, when the compartments leave no room for a scoop.
pub fn make_scoop(cfg: &BinConfig) -> Result<Option<Mesh>> {
    let Some(radius) = scoop_radius(cfg) else {
        warn!(
            scoop_radius = cfg.scoop_radius,
            "scoop could not be made with these bin parameters"
        );
        return Ok(None);
    };

    let grid = CompartmentGrid::new(cfg);
    let x_wall = grid.x_max;
    let floor = -cfg.usable_height();
    let ramp = ramp_profile(x_wall, floor, radius, cfg.segments)
        .extrude_xz(grid.y_max - grid.y_min + 2.0 * OVERLAP)
        .translate(0.0, grid.y_min - OVERLAP, 0.0);

    // The rightmost scoop starts at the lip edge, lip or not, and a filler
    // closes the gap to the wall.
    let lip_overhang = cfg.stacking_lip_inset() - cfg.wall_thickness;
    let mut pieces = Vec::with_capacity(grid.x_count + 1);
    pieces.push(ramp.translate(-lip_overhang, 0.0, 0.0));
    for k in 1..grid.x_count {
        pieces.push(ramp.translate(-(k as Real) * (grid.x_width + grid.divider), 0.0, 0.0));
    }
    if lip_overhang > 0.0 {
        pieces.push(lip_filler(&grid, lip_overhang, floor, cfg.segments));
    }
    debug!(radius, columns = grid.x_count, "scoop");
    Ok(Some(Mesh::union_all(&pieces)))
}

/// Quarter-round ramp filling the corner between the floor and the wall at
/// `x_wall`, reaching past both faces by [`OVERLAP`].
fn ramp_profile(x_wall: Real, floor: Real, radius: Real, segments: usize) -> Sketch {
    let top = Point2::new(x_wall, floor + radius);
    let foot = Point2::new(x_wall - radius, floor);
    let mid = Point2::new(
        x_wall - radius + radius * FRAC_PI_4.sin(),
        floor + radius - radius * FRAC_PI_4.sin(),
    );
    let mut points = vec![
        top,
        Point2::new(x_wall + OVERLAP, floor + radius),
        Point2::new(x_wall + OVERLAP, floor - OVERLAP),
        Point2::new(x_wall - radius, floor - OVERLAP),
    ];
    let arc = arc_through(foot, mid, top, segments);
    points.extend_from_slice(&arc[..arc.len() - 1]);
    Sketch::from_points(&points)
}

/// Solid under the lip along the right wall, its two inner vertical edges
/// rounded.
fn lip_filler(grid: &CompartmentGrid, overhang: Real, floor: Real, segments: usize) -> Mesh {
    let x0 = grid.x_max - overhang;
    let x1 = grid.x_max + OVERLAP;
    let corners = [
        Point2::new(x0, grid.y_min),
        Point2::new(x1, grid.y_min),
        Point2::new(x1, grid.y_max),
        Point2::new(x0, grid.y_max),
    ];
    let radius = overhang - FILLET_MARGIN;
    let points = fillet_ring(&corners, &[radius, 0.0, 0.0, radius], segments);
    let z0 = floor - OVERLAP;
    Sketch::from_points(&points).extrude(z0, RIM_OVERSHOOT + OVERLAP - z0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BinStyle;

    fn scoop_bin() -> BinConfig {
        BinConfig {
            style: BinStyle::Storage,
            scoop: true,
            x_grid_units: 1,
            y_grid_units: 1,
            height_units: 3,
            segments: 4,
            ..BinConfig::default()
        }
    }

    #[test]
    fn radius_is_limited_by_usable_height() {
        let cfg = scoop_bin();
        assert_eq!(scoop_radius(&cfg), Some(cfg.usable_height()));
        let tall = BinConfig {
            height_units: 6,
            ..scoop_bin()
        };
        assert_eq!(scoop_radius(&tall), Some(21.0));
    }

    #[test]
    fn radius_is_limited_by_compartment_width() {
        let cfg = BinConfig {
            x_dividers: 3,
            height_units: 8,
            ..scoop_bin()
        };
        let radius = scoop_radius(&cfg).expect("radius");
        assert!((radius - (cfg.x_compartment_width() - 2.0)).abs() < 1e-9);
    }

    #[test]
    fn low_divider_leaves_no_room() {
        let cfg = BinConfig {
            x_dividers: 1,
            x_divider_height: 7.5,
            ..scoop_bin()
        };
        assert_eq!(scoop_radius(&cfg), None);
        assert!(make_scoop(&cfg).expect("scoop").is_none());
    }

    #[test]
    fn ramp_meets_floor_and_wall() {
        let cfg = scoop_bin();
        let scoop = make_scoop(&cfg).expect("scoop").expect("some scoop");
        let grid = CompartmentGrid::new(&cfg);
        let bb = scoop.bounding_box();
        assert!((bb.mins.z - (-cfg.usable_height() - OVERLAP)).abs() < 1e-9);
        assert!((bb.maxs.x - (grid.x_max + OVERLAP)).abs() < 1e-9);
        // Ramp of the only column starts at the lip edge.
        let overhang = cfg.stacking_lip_inset() - cfg.wall_thickness;
        let radius = cfg.usable_height();
        assert!((bb.mins.x - (grid.x_max - overhang - radius)).abs() < 1e-9);
    }

    #[test]
    fn scoop_without_lip_keeps_the_filler() {
        let with_lip = scoop_bin();
        let without = BinConfig {
            stacking_lip: false,
            ..scoop_bin()
        };
        let a = make_scoop(&with_lip).expect("scoop").expect("some scoop").bounding_box();
        let b = make_scoop(&without).expect("scoop").expect("some scoop").bounding_box();
        assert!((a.mins.x - b.mins.x).abs() < 1e-9);
        // filler still reaches above the rim
        assert!((b.maxs.z - (RIM_OVERSHOOT + OVERLAP)).abs() < 1e-9);
    }
}
