//! Label shelves: the ledge along the left wall of each compartment, and
//! standalone shelves for gluing into other bins.

use crate::config::{BinConfig, LabelShelfConfig, LabelShelfPlacement, LabelShelfStyle};
use crate::errors::Result;
use crate::features::compartments::CompartmentGrid;
use crate::features::{OVERLAP, place_disjoint};
use crate::float_types::{FRAC_PI_4, Real};
use crate::mesh::Mesh;
use crate::sketch::Sketch;
use crate::sketch::shapes::{arc_through, fillet_corner};
use crate::traits::CSGOps;
use nalgebra::{Point2, Point3, Vector3};
use tracing::debug;

/// Gap kept between the front fillet and the bottom edge it runs into.
const FILLET_MARGIN: Real = 0.01;

/// Shelf material added back into the compartment void.
///
/// The shelf starts at the left inner wall of every compartment column and
/// reaches `label_shelf_width` past the inner edge of the stacking lip. Its
/// top sits `label_shelf_stacking_offset` below the rim when there is a lip.
pub fn make_label_shelf(cfg: &BinConfig) -> Result<Mesh> {
    let grid = CompartmentGrid::new(cfg);
    let to_wall = grid.x_min;
    let to_label_end = -cfg.bin_unit() / 2.0 + cfg.stacking_lip_inset() + cfg.label_shelf_width;
    let top = if cfg.has_stacking_lip() {
        -cfg.label_shelf_stacking_offset
    } else {
        0.0
    };

    let (angle, mut placement) = match cfg.label_shelf_style {
        LabelShelfStyle::Overhang => (0.0, LabelShelfPlacement::FullWidth),
        _ => (cfg.label_shelf_angle, cfg.label_shelf_placement),
    };
    if cfg.label_shelf_length > grid.y_width {
        placement = LabelShelfPlacement::FullWidth;
    }

    let thickness = cfg.label_shelf_vertical_thickness;
    let slope_drop = (to_wall - to_label_end).abs() * angle.to_radians().tan();
    let corners = [
        Point2::new(to_wall, top),
        Point2::new(to_label_end, top),
        Point2::new(to_label_end, top - thickness),
        Point2::new(to_wall, top - thickness - slope_drop),
    ];
    let profile = Sketch::from_points(&fillet_corner(
        &corners,
        2,
        thickness - FILLET_MARGIN,
        cfg.segments,
    ));

    let column = |i: usize| i as Real * (grid.x_width + grid.divider);
    let row = |j: usize| j as Real * (grid.y_width + grid.divider);
    let (length, offsets): (Real, Vec<Vector3<Real>>) = match placement {
        LabelShelfPlacement::FullWidth => (
            grid.y_max - grid.y_min,
            (0..grid.x_count)
                .map(|i| Vector3::new(column(i), grid.y_min, 0.0))
                .collect(),
        ),
        placement => {
            let start = match placement {
                LabelShelfPlacement::Center => {
                    grid.y_min + grid.y_width / 2.0 - cfg.label_shelf_length / 2.0
                },
                LabelShelfPlacement::Right => {
                    grid.y_min + grid.y_width - cfg.label_shelf_length
                },
                _ => grid.y_min,
            };
            (
                cfg.label_shelf_length,
                (0..grid.x_count)
                    .flat_map(|i| {
                        (0..grid.y_count).map(move |j| Vector3::new(column(i), start + row(j), 0.0))
                    })
                    .collect(),
            )
        },
    };
    debug!(?placement, pieces = offsets.len(), "label shelf");
    let shelf = place_disjoint(&profile.extrude_xz(length), &offsets);

    let height = thickness + slope_drop;
    let floor = -cfg.usable_height();
    if height > cfg.usable_height() {
        // Keep a steep shelf from reaching through the floor.
        let z1 = floor + top;
        let z0 = z1 - height - OVERLAP;
        let trim = Mesh::cuboid(
            Vector3::new(
                grid.x_max - grid.x_min + 2.0 * OVERLAP,
                grid.y_max - grid.y_min + 2.0 * OVERLAP,
                z1 - z0,
            ),
            Point3::new(grid.x_min - OVERLAP, grid.y_min - OVERLAP, z0),
        );
        return Ok(shelf.difference(&trim));
    }
    Ok(shelf)
}

/// Shelf with its top back edge along the Y axis at `z = 0`, reaching
/// `width` along +X. The front is `thickness` tall with a rounded lower
/// edge, the back `height` tall. With `center` the shelf is centred on the
/// origin along Y, otherwise it runs from `y = 0` to `length`.
pub fn from_dimensions(
    length: Real,
    width: Real,
    thickness: Real,
    height: Real,
    center: bool,
    segments: usize,
) -> Mesh {
    let corners = [
        Point2::new(0.0, 0.0),
        Point2::new(width, 0.0),
        Point2::new(width, -thickness),
        Point2::new(0.0, -height),
    ];
    let profile = Sketch::from_points(&fillet_corner(
        &corners,
        2,
        thickness - FILLET_MARGIN,
        segments,
    ));
    let y_offset = if center { -length / 2.0 } else { 0.0 };
    profile.extrude_xz(length).translate(0.0, y_offset, 0.0)
}

/// Shelf whose underside slopes down towards the back by `angle` degrees.
pub fn from_angle(
    length: Real,
    width: Real,
    thickness: Real,
    angle: Real,
    center: bool,
    segments: usize,
) -> Mesh {
    let height = thickness + angle.to_radians().tan() * width;
    from_dimensions(length, width, thickness, height, center, segments)
}

/// Material outside a quarter circle of `radius` in the corner at the
/// origin, extended by [`OVERLAP`] past both corner edges.
fn corner_spandrel(radius: Real, segments: usize) -> Sketch {
    let inset = radius - radius * FRAC_PI_4.sin();
    let mut points = vec![
        Point2::new(-OVERLAP, -OVERLAP),
        Point2::new(-OVERLAP, radius),
    ];
    points.extend(arc_through(
        Point2::new(0.0, radius),
        Point2::new(inset, inset),
        Point2::new(radius, 0.0),
        segments,
    ));
    points.push(Point2::new(radius, -OVERLAP));
    Sketch::from_points(&points)
}

/// Round the two corners of a shelf that stick out past a bin's corner:
/// one at `(offset, offset)` and one at `(offset, y_width)`, cut through
/// `height` below `z = 0`.
pub fn outside_fillet(
    shelf: &Mesh,
    offset: Real,
    radius: Real,
    height: Real,
    y_width: Real,
    segments: usize,
) -> Mesh {
    let spandrel = corner_spandrel(radius, segments);
    let cut = |sketch: Sketch| sketch.extrude(OVERLAP, -(height + 2.0 * OVERLAP));
    let left = cut(spandrel.translate(offset, offset));
    let right = cut(spandrel.rotate(-90.0).translate(offset, y_width));
    shelf.difference(&left).difference(&right)
}

/// Standalone shelf from its config.
pub fn standalone(cfg: &LabelShelfConfig) -> Mesh {
    let height = cfg.back_height();
    let shelf = from_dimensions(cfg.length, cfg.width, cfg.thickness, height, false, cfg.segments);
    let shelf = match cfg.outside_fillet {
        Some(fillet) => outside_fillet(
            &shelf,
            fillet.offset,
            fillet.radius,
            height,
            cfg.length,
            cfg.segments,
        ),
        None => shelf,
    };
    if cfg.center {
        shelf.translate(0.0, -cfg.length / 2.0, 0.0)
    } else {
        shelf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BinStyle;

    #[test]
    fn flat_shelf_volume_is_profile_times_length() {
        let shelf = from_dimensions(42.0, 12.0, 2.0, 2.0, false, 6);
        // Rounded front edge removes a little of the 12 x 2 section.
        assert!(shelf.volume() < 42.0 * 24.0);
        assert!(shelf.volume() > 42.0 * 23.0);
        let bb = shelf.bounding_box();
        assert!((bb.maxs.z).abs() < 1e-9);
        assert!((bb.mins.z + 2.0).abs() < 1e-9);
        assert!((bb.maxs.y - 42.0).abs() < 1e-9);
    }

    #[test]
    fn angled_shelf_is_taller_at_the_back() {
        let shelf = from_angle(20.0, 10.0, 2.0, 45.0, true, 4);
        let bb = shelf.bounding_box();
        assert!((bb.mins.z + 12.0).abs() < 1e-9);
        assert!((bb.mins.y + 10.0).abs() < 1e-9);
    }

    #[test]
    fn outside_fillet_removes_material() {
        let shelf = from_dimensions(30.0, 12.0, 2.0, 2.0, false, 6);
        let rounded = outside_fillet(&shelf, 0.0, 4.0, 2.0, 30.0, 8);
        assert!(rounded.volume() < shelf.volume());
        // Two spandrels of (1 - pi/4) r^2, 2 mm deep, roughly.
        let removed = shelf.volume() - rounded.volume();
        let expected = 2.0 * (1.0 - std::f64::consts::FRAC_PI_4) * 16.0 * 2.0;
        assert!((removed - expected).abs() < 0.2 * expected);
    }

    #[test]
    fn shelf_pieces_per_compartment() {
        let cfg = BinConfig {
            style: BinStyle::Storage,
            x_grid_units: 2,
            y_grid_units: 2,
            x_dividers: 1,
            y_dividers: 1,
            label_shelf_style: LabelShelfStyle::Standard,
            label_shelf_placement: LabelShelfPlacement::Left,
            label_shelf_length: 20.0,
            segments: 3,
            ..BinConfig::default()
        };
        let shelf = make_label_shelf(&cfg).expect("shelf");
        let one = make_label_shelf(&BinConfig {
            x_dividers: 0,
            y_dividers: 0,
            x_grid_units: 1,
            y_grid_units: 1,
            ..cfg.clone()
        })
        .expect("shelf");
        assert!((shelf.volume() - 4.0 * one.volume()).abs() < 1e-6);
        let bb = shelf.bounding_box();
        assert!((bb.maxs.z + cfg.label_shelf_stacking_offset).abs() < 1e-9);
    }

    fn one_compartment(
        style: LabelShelfStyle,
        placement: LabelShelfPlacement,
        length: Real,
        angle: Real,
    ) -> BinConfig {
        BinConfig {
            style: BinStyle::Storage,
            x_grid_units: 1,
            y_grid_units: 1,
            height_units: 3,
            label_shelf_style: style,
            label_shelf_placement: placement,
            label_shelf_length: length,
            label_shelf_angle: angle,
            segments: 3,
            ..BinConfig::default()
        }
    }

    #[test]
    fn overhang_is_flat_and_spans_the_compartment() {
        let cfg = one_compartment(LabelShelfStyle::Overhang, LabelShelfPlacement::Left, 20.0, 30.0);
        let grid = CompartmentGrid::new(&cfg);
        let bb = make_label_shelf(&cfg).expect("shelf").bounding_box();
        let top = -cfg.label_shelf_stacking_offset;
        assert!((bb.maxs.z - top).abs() < 1e-9);
        assert!((bb.mins.z - (top - cfg.label_shelf_vertical_thickness)).abs() < 1e-9);
        assert!((bb.mins.y - grid.y_min).abs() < 1e-9);
        assert!((bb.maxs.y - grid.y_max).abs() < 1e-9);
    }

    #[test]
    fn right_and_center_placements() {
        let length = 20.0;
        let right = one_compartment(LabelShelfStyle::Standard, LabelShelfPlacement::Right, length, 0.0);
        let grid = CompartmentGrid::new(&right);
        let bb = make_label_shelf(&right).expect("shelf").bounding_box();
        assert!((bb.maxs.y - (grid.y_min + grid.y_width)).abs() < 1e-9);
        assert!((bb.mins.y - (grid.y_min + grid.y_width - length)).abs() < 1e-9);

        let center = BinConfig {
            label_shelf_placement: LabelShelfPlacement::Center,
            ..right
        };
        let bb = make_label_shelf(&center).expect("shelf").bounding_box();
        let mid = grid.y_min + grid.y_width / 2.0;
        assert!((bb.center().y - mid).abs() < 1e-9);
        assert!((bb.extents().y - length).abs() < 1e-9);
    }

    #[test]
    fn long_shelf_falls_back_to_full_width() {
        let cfg = one_compartment(LabelShelfStyle::Standard, LabelShelfPlacement::Right, 100.0, 0.0);
        let grid = CompartmentGrid::new(&cfg);
        let bb = make_label_shelf(&cfg).expect("shelf").bounding_box();
        assert!((bb.mins.y - grid.y_min).abs() < 1e-9);
        assert!((bb.maxs.y - grid.y_max).abs() < 1e-9);
    }

    #[test]
    fn steep_shelf_stops_at_the_floor() {
        let cfg = one_compartment(LabelShelfStyle::Standard, LabelShelfPlacement::FullWidth, 42.0, 80.0);
        let top = -cfg.label_shelf_stacking_offset;
        let bb = make_label_shelf(&cfg).expect("shelf").bounding_box();
        assert!((bb.maxs.z - top).abs() < 1e-9);
        assert!((bb.mins.z - (top - cfg.usable_height())).abs() < 1e-6);
    }
}
