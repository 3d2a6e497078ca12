//! Baseplates: a frame of receptacles bins sit in, optionally with magnets
//! or screw holes for joining plates.
//!
//! Baseplate coordinates match bins: cell `(0, 0)` centred on the origin,
//! the top edge at `z = 0`, the bottom at `z = -total_height`.

use crate::config::BaseplateConfig;
use crate::errors::Result;
use crate::features::{OVERLAP, cell_offsets, corner_offsets, place_disjoint, rounded_square_loft};
use crate::float_types::{FRAC_PI_4, Real};
use crate::mesh::Mesh;
use crate::sketch::Sketch;
use crate::sketch::shapes::arc_through;
use crate::traits::CSGOps;
use nalgebra::{Point2, Point3, Vector3};
use tracing::debug;

/// Solid block covering the layout, before any pocket is cut.
pub fn make_baseplate_body(cfg: &BaseplateConfig) -> Result<Mesh> {
    let outline = cfg
        .layout()
        .outline(cfg.grid_size)?
        .rounded_outline(cfg.outer_radius, cfg.segments);
    Ok(outline.extrude(-cfg.total_height(), cfg.total_height()))
}

/// Receptacle of one cell: the bin base profile in negative, opening up to
/// the full grid size at the top edge.
fn receptacle(cfg: &BaseplateConfig) -> Result<Mesh> {
    let grid = cfg.grid_size;
    let bottom_chamfer = cfg.profile_bottom_chamfer;
    let vertical = cfg.profile_vertical_section;
    let top_chamfer = cfg.profile_top_chamfer;
    let vertical_width = grid - 2.0 * top_chamfer;
    let bottom_width = vertical_width - 2.0 * bottom_chamfer;
    let profile = cfg.profile_height();
    let top_radius = cfg.vertical_radius + top_chamfer;

    let mut stations = Vec::with_capacity(7);
    if cfg.base_thickness() <= 0.0 {
        // Nothing below the profile: open the pocket through the bottom.
        stations.push((bottom_width, cfg.bottom_radius, -profile - OVERLAP));
    }
    stations.extend([
        (bottom_width, cfg.bottom_radius, -profile),
        (
            vertical_width,
            cfg.bottom_radius + bottom_chamfer,
            -profile + bottom_chamfer,
        ),
        (vertical_width, cfg.vertical_radius, -profile + bottom_chamfer),
        (vertical_width, cfg.vertical_radius, -profile + bottom_chamfer + vertical),
        (grid, top_radius, 0.0),
        (grid + 2.0 * OVERLAP, top_radius + OVERLAP, OVERLAP),
    ]);
    rounded_square_loft(&stations, cfg.segments)
}

/// Receptacles of every cell, split into two checkerboard groups. The
/// flared tops of neighbouring cells overlap above the plate, so only
/// pockets within one group may share a mesh.
pub fn make_baseplate_cutout(cfg: &BaseplateConfig) -> Result<Vec<Mesh>> {
    let pocket = receptacle(cfg)?;
    let (even, odd): (Vec<_>, Vec<_>) = cfg
        .layout()
        .cells()
        .into_iter()
        .partition(|(x, y)| (x + y) % 2 == 0);
    let place = |cells: Vec<(usize, usize)>| {
        let offsets: Vec<Vector3<Real>> = cells
            .into_iter()
            .map(|(x, y)| Vector3::new(x as Real * cfg.grid_size, y as Real * cfg.grid_size, 0.0))
            .collect();
        place_disjoint(&pocket, &offsets)
    };
    Ok([place(even), place(odd)]
        .into_iter()
        .filter(|group| !group.is_empty())
        .collect())
}

/// Cut through the floor of each receptacle, keeping a rim around the four
/// magnet holes.
pub fn make_baseplate_center_cut(cfg: &BaseplateConfig) -> Mesh {
    let outline = Sketch::from_points(&center_cut_ring(cfg));
    let z0 = -cfg.total_height() - OVERLAP;
    let cut = outline.extrude(z0, 2.0 * OVERLAP + cfg.total_height());
    place_disjoint(&cut, &cell_offsets(&cfg.layout(), cfg.grid_size))
}

/// Outline of the centre cut, built from its lower-left quarter.
fn center_cut_ring(cfg: &BaseplateConfig) -> Vec<Point2<Real>> {
    let half = cfg.grid_size / 2.0;
    let fillet = cfg.small_fillet;
    let frame = half - cfg.profile_top_chamfer - cfg.profile_bottom_chamfer - cfg.top_ledge_width;
    let hole = cfg.hole_position();
    let keep = cfg.magnet_hole_diameter / 2.0 + cfg.magnet_edge_thickness;
    let hole_edge = hole - keep;
    let s45 = FRAC_PI_4.sin();
    let frame_arc = frame - fillet + fillet * s45;
    let hole_arc = hole_edge - fillet + fillet * s45;
    let rim_arc = hole - keep * s45;

    let mut quarter = vec![Point2::new(0.0, -frame)];
    quarter.extend(arc_through(
        Point2::new(-(hole_edge - fillet), -frame),
        Point2::new(-hole_arc, -frame_arc),
        Point2::new(-hole_edge, -(frame - fillet)),
        cfg.segments,
    ));
    quarter.extend(arc_through(
        Point2::new(-hole_edge, -hole),
        Point2::new(-rim_arc, -rim_arc),
        Point2::new(-hole, -hole_edge),
        cfg.segments,
    ));
    quarter.extend(arc_through(
        Point2::new(-(frame - fillet), -hole_edge),
        Point2::new(-frame_arc, -hole_arc),
        Point2::new(-frame, -(hole_edge - fillet)),
        cfg.segments,
    ));
    quarter.push(Point2::new(-frame, 0.0));

    // Each quarter runs from one axis to the next; its last point starts
    // the following quarter.
    let n = quarter.len() - 1;
    let mirrored = |fx: Real, fy: Real, reverse: bool| {
        let mut points: Vec<Point2<Real>> =
            quarter.iter().map(|p| Point2::new(fx * p.x, fy * p.y)).collect();
        if reverse {
            points.reverse();
        }
        points.truncate(n);
        points
    };
    let mut ring = mirrored(1.0, 1.0, false);
    ring.extend(mirrored(1.0, -1.0, true));
    ring.extend(mirrored(-1.0, -1.0, false));
    ring.extend(mirrored(-1.0, 1.0, true));
    ring
}

/// Magnet pockets sunk into each receptacle floor.
pub fn make_baseplate_magnet_holes(cfg: &BaseplateConfig) -> Mesh {
    let hole = magnet_hole(cfg);
    place_disjoint(&hole, &hole_offsets(cfg))
}

fn magnet_hole(cfg: &BaseplateConfig) -> Mesh {
    Mesh::cylinder(
        cfg.magnet_hole_diameter / 2.0,
        cfg.magnet_hole_depth + OVERLAP,
        Point3::new(0.0, 0.0, -cfg.profile_height() - cfg.magnet_hole_depth),
        4 * cfg.segments,
    )
}

fn hole_offsets(cfg: &BaseplateConfig) -> Vec<Vector3<Real>> {
    cell_offsets(&cfg.layout(), cfg.grid_size)
        .into_iter()
        .flat_map(|cell| corner_offsets(cfg.hole_position()).map(|corner| cell + corner))
        .collect()
}

/// Holes of a screw-together plate: magnet pockets with a countersunk screw
/// through each, plus the horizontal holes joining neighbouring plates,
/// one along every row and column.
pub fn make_screw_together_holes(cfg: &BaseplateConfig) -> Result<Vec<Mesh>> {
    let bottom = -cfg.total_height() - OVERLAP;
    let circle_segments = 4 * cfg.segments;
    let screw_radius = cfg.screw_hole_diameter / 2.0;
    let screw = Mesh::cylinder(
        screw_radius,
        cfg.total_height() - cfg.profile_height() - cfg.magnet_hole_depth + 2.0 * OVERLAP,
        Point3::new(0.0, 0.0, bottom),
        circle_segments,
    );
    let half_angle = (cfg.countersink_angle / 2.0).to_radians();
    let sink_height = (cfg.countersink_diameter - cfg.screw_hole_diameter) / 2.0 / half_angle.tan();
    let countersink = Mesh::cone_frustum(
        cfg.countersink_diameter / 2.0 + OVERLAP * half_angle.tan(),
        screw_radius,
        sink_height + OVERLAP,
        Point3::new(0.0, 0.0, bottom),
        circle_segments,
    )?;
    let hole = Mesh::union_all([&magnet_hole(cfg), &screw, &countersink]);

    let mut tools = vec![place_disjoint(&hole, &hole_offsets(cfg))];
    tools.extend(connection_holes(cfg));
    debug!(tools = tools.len(), "screw-together holes");
    Ok(tools)
}

/// Horizontal holes through the base, centred in its thickness.
fn connection_holes(cfg: &BaseplateConfig) -> Vec<Mesh> {
    let grid = cfg.grid_size;
    let layout = cfg.layout();
    let radius = cfg.connection_hole_diameter / 2.0;
    let z = -cfg.profile_height() - cfg.screw_together_base_thickness / 2.0;
    let start = -grid / 2.0 - OVERLAP;
    let rod = |length: Real| {
        Mesh::cylinder(radius, length + 2.0 * OVERLAP, Point3::origin(), 4 * cfg.segments)
    };

    let along_x = rod(cfg.x_total_width()).rotate(0.0, 90.0, 0.0);
    let along_y = rod(cfg.y_total_width()).rotate(-90.0, 0.0, 0.0);
    let mut holes = Vec::new();
    for y in 0..layout.y_units() {
        if (0..layout.x_units()).any(|x| layout.is_occupied(x, y)) {
            holes.push(along_x.translate(start, y as Real * grid, z));
        }
    }
    for x in 0..layout.x_units() {
        if (0..layout.y_units()).any(|y| layout.is_occupied(x, y)) {
            holes.push(along_y.translate(x as Real * grid, start, z));
        }
    }
    holes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaseplateStyle;

    fn small(style: BaseplateStyle) -> BaseplateConfig {
        BaseplateConfig {
            style,
            x_grid_units: 1,
            y_grid_units: 1,
            segments: 3,
            ..BaseplateConfig::default()
        }
    }

    #[test]
    fn simple_receptacle_opens_through_the_bottom() {
        let cfg = small(BaseplateStyle::Simple);
        let bb = receptacle(&cfg).expect("pocket").bounding_box();
        assert!((bb.mins.z - (-cfg.total_height() - OVERLAP)).abs() < 1e-9);
        assert!((bb.extents().x - (cfg.grid_size + 2.0 * OVERLAP)).abs() < 1e-9);
    }

    #[test]
    fn magnet_receptacle_keeps_a_floor() {
        let cfg = small(BaseplateStyle::Magnet);
        let bb = receptacle(&cfg).expect("pocket").bounding_box();
        assert!((bb.mins.z + cfg.profile_height()).abs() < 1e-9);
        assert!(bb.mins.z > -cfg.total_height());
    }

    #[test]
    fn checkerboard_groups_cover_every_cell() {
        let cfg = BaseplateConfig {
            x_grid_units: 3,
            y_grid_units: 2,
            ..small(BaseplateStyle::Simple)
        };
        let groups = make_baseplate_cutout(&cfg).expect("cutout");
        assert_eq!(groups.len(), 2);
        let single = receptacle(&cfg).expect("pocket").volume();
        let total: Real = groups.iter().map(Mesh::volume).sum();
        assert!((total - 6.0 * single).abs() < 1e-6);
    }

    #[test]
    fn center_cut_ring_is_symmetric() {
        let cfg = small(BaseplateStyle::Magnet);
        let ring = center_cut_ring(&cfg);
        let sketch = Sketch::from_points(&ring);
        let frame = cfg.grid_size / 2.0
            - cfg.profile_top_chamfer
            - cfg.profile_bottom_chamfer
            - cfg.top_ledge_width;
        assert!(sketch.area() > 0.0);
        assert!(sketch.area() < (2.0 * frame).powi(2));
        let max_x = ring.iter().map(|p| p.x).fold(Real::MIN, Real::max);
        let min_x = ring.iter().map(|p| p.x).fold(Real::MAX, Real::min);
        assert!((max_x - frame).abs() < 1e-9);
        assert!((min_x + frame).abs() < 1e-9);
    }

    #[test]
    fn center_cut_clears_the_magnets() {
        let cfg = small(BaseplateStyle::Magnet);
        let cut = make_baseplate_center_cut(&cfg);
        let magnets = make_baseplate_magnet_holes(&cfg);
        assert!(cut.intersection(&magnets).volume().abs() < 1e-6);
    }

    #[test]
    fn connection_holes_follow_rows_and_columns() {
        let cfg = BaseplateConfig {
            x_grid_units: 2,
            y_grid_units: 3,
            ..small(BaseplateStyle::ScrewTogether)
        };
        let tools = make_screw_together_holes(&cfg).expect("holes");
        // Corner holes, then three rows and two columns.
        assert_eq!(tools.len(), 1 + 3 + 2);
        let bb = tools[1].bounding_box();
        assert!((bb.extents().x - (cfg.x_total_width() + 2.0 * OVERLAP)).abs() < 1e-9);
        let z = -cfg.profile_height() - cfg.screw_together_base_thickness / 2.0;
        assert!((bb.center().z - z).abs() < 1e-9);
    }
}
