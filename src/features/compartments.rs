//! Compartment cutter: the void removed from a bin body, with dividers left
//! standing between compartments.

use crate::config::BinConfig;
use crate::errors::Result;
use crate::float_types::{FRAC_PI_2, Real, SMALL_NUMBER};
use crate::mesh::Mesh;
use crate::sketch::Sketch;
use crate::traits::CSGOps;
use nalgebra::{Point3, Vector3};
use tracing::debug;

/// Height the cutter reaches above the rim.
pub(crate) const RIM_OVERSHOOT: Real = 1.0;

/// Vertical extent and fillets of a cutter.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CutterSpan {
    /// Compartment floor.
    pub floor: Real,
    /// Radius rounding the floor into the walls. `0` leaves a sharp edge.
    pub bottom_fillet: Real,
    /// Top of the dividers between x compartments.
    pub x_divider_top: Real,
    /// Top of the dividers between y compartments.
    pub y_divider_top: Real,
}

/// Compartment void of a storage bin, from the floor at `-usable_height`
/// to above the rim.
pub fn make_compartments(cfg: &BinConfig) -> Result<Mesh> {
    let offset = if cfg.has_stacking_lip() {
        -cfg.label_shelf_stacking_offset
    } else {
        0.0
    };
    let divider_top = |height: Real| -cfg.total_height() + full_height(cfg, height) + offset;
    let span = CutterSpan {
        floor: -cfg.usable_height(),
        bottom_fillet: cfg.inside_fillet_radius,
        x_divider_top: divider_top(cfg.x_divider_height),
        y_divider_top: divider_top(cfg.y_divider_height),
    };
    debug!(
        x_dividers = cfg.x_dividers,
        y_dividers = cfg.y_dividers,
        "compartments"
    );
    compartment_void(cfg, &span)
}

/// A divider height of zero means full height.
pub(crate) fn full_height(cfg: &BinConfig, height: Real) -> Real {
    if height > 0.0 { height } else { cfg.total_height() }
}

/// Void for `span`: one cavity when there are no dividers, otherwise one
/// pocket per compartment plus the space above any lowered divider.
pub(crate) fn compartment_void(cfg: &BinConfig, span: &CutterSpan) -> Result<Mesh> {
    if cfg.x_dividers == 0 && cfg.y_dividers == 0 {
        let sections = fillet_stations(span, cfg.segments)
            .into_iter()
            .map(|(inset, z)| Ok((cfg.outline(cfg.wall_thickness + inset)?, z)))
            .collect::<Result<Vec<_>>>()?;
        return Sketch::loft(&sections);
    }

    // Pockets are separated by dividers, so they never overlap.
    let grid = CompartmentGrid::new(cfg);
    let mut void = Mesh::new();
    for i in 0..grid.x_count {
        for j in 0..grid.y_count {
            void = void.concat(&grid.pocket(cfg, span, i, j)?);
        }
    }
    for opening in grid.divider_openings(cfg, span) {
        void = void.union(&opening);
    }
    Ok(void)
}

/// `(inset, z)` stations of a floor fillet, finishing above the rim.
fn fillet_stations(span: &CutterSpan, segments: usize) -> Vec<(Real, Real)> {
    let radius = span.bottom_fillet;
    let mut stations = Vec::new();
    if radius > SMALL_NUMBER {
        let steps = segments.max(1);
        for k in 0..=steps {
            let phi = FRAC_PI_2 * k as Real / steps as Real;
            stations.push((radius * (1.0 - phi.sin()), span.floor + radius * (1.0 - phi.cos())));
        }
    } else {
        stations.push((0.0, span.floor));
    }
    stations.push((0.0, RIM_OVERSHOOT));
    stations
}

/// Compartment rectangles of a rectangular bin with dividers.
pub(crate) struct CompartmentGrid {
    pub x_count: usize,
    pub y_count: usize,
    pub x_width: Real,
    pub y_width: Real,
    /// Inner wall faces.
    pub x_min: Real,
    pub y_min: Real,
    pub x_max: Real,
    pub y_max: Real,
    pub divider: Real,
}

impl CompartmentGrid {
    pub fn new(cfg: &BinConfig) -> Self {
        let x_min = -cfg.bin_unit() / 2.0 + cfg.wall_thickness;
        let y_min = x_min;
        CompartmentGrid {
            x_count: cfg.x_dividers + 1,
            y_count: cfg.y_dividers + 1,
            x_width: cfg.x_compartment_width(),
            y_width: cfg.y_compartment_width(),
            x_min,
            y_min,
            x_max: x_min + cfg.x_total_width() - 2.0 * cfg.wall_thickness,
            y_max: y_min + cfg.y_total_width() - 2.0 * cfg.wall_thickness,
            divider: cfg.divider_thickness,
        }
    }

    /// Left edge of compartment column `i`.
    pub fn x_start(&self, i: usize) -> Real {
        self.x_min + i as Real * (self.x_width + self.divider)
    }

    /// Bottom edge of compartment row `j`.
    pub fn y_start(&self, j: usize) -> Real {
        self.y_min + j as Real * (self.y_width + self.divider)
    }

    /// Compartment `(i, j)` as a loft with the floor fillet. Corners of the
    /// whole cavity keep the wall radius, corners against a divider get the
    /// inside fillet radius.
    fn pocket(&self, cfg: &BinConfig, span: &CutterSpan, i: usize, j: usize) -> Result<Mesh> {
        let wall = cfg.bin_outer_radius - cfg.wall_thickness;
        let fillet = cfg.inside_fillet_radius;
        let (left, right) = (i == 0, i + 1 == self.x_count);
        let (bottom, top) = (j == 0, j + 1 == self.y_count);
        let pick = |outer: bool| if outer { wall } else { fillet };
        let radii = [
            pick(left && bottom),
            pick(right && bottom),
            pick(right && top),
            pick(left && top),
        ];
        let cx = self.x_start(i) + self.x_width / 2.0;
        let cy = self.y_start(j) + self.y_width / 2.0;

        let sections: Vec<(Sketch, Real)> = fillet_stations(span, cfg.segments)
            .into_iter()
            .map(|(inset, z)| {
                let sketch = Sketch::rounded_rectangle_corners(
                    self.x_width - 2.0 * inset,
                    self.y_width - 2.0 * inset,
                    radii.map(|r| (r - inset).max(SMALL_NUMBER)),
                    cfg.segments,
                );
                (sketch.translate(cx, cy), z)
            })
            .collect();
        Sketch::loft(&sections)
    }

    /// Boxes clearing the dividers above their tops. Each box also covers
    /// the divider's vertical fillets, which stop where the divider does.
    fn divider_openings(&self, cfg: &BinConfig, span: &CutterSpan) -> Vec<Mesh> {
        let fillet = cfg.inside_fillet_radius;
        let lowest = span.floor + span.bottom_fillet;
        let lowered = |top: Real| top < -1e-9;
        let opening = |x0: Real, x1: Real, y0: Real, y1: Real, z0: Real| {
            let z0 = z0.max(lowest);
            Mesh::cuboid(
                Vector3::new(x1 - x0, y1 - y0, RIM_OVERSHOOT - z0),
                Point3::new(x0, y0, z0),
            )
        };

        let mut openings = Vec::new();
        for k in 0..self.x_count - 1 {
            let x0 = self.x_start(k) + self.x_width;
            if lowered(span.x_divider_top) {
                for j in 0..self.y_count {
                    let y0 = self.y_start(j);
                    openings.push(opening(
                        x0 - fillet,
                        x0 + self.divider + fillet,
                        y0,
                        y0 + self.y_width,
                        span.x_divider_top,
                    ));
                }
            }
            // Where dividers cross, the taller one decides.
            let crossing_top = span.x_divider_top.max(span.y_divider_top);
            if lowered(crossing_top) {
                for m in 0..self.y_count - 1 {
                    let y0 = self.y_start(m) + self.y_width;
                    openings.push(opening(x0, x0 + self.divider, y0, y0 + self.divider, crossing_top));
                }
            }
        }
        if lowered(span.y_divider_top) {
            for m in 0..self.y_count - 1 {
                let y0 = self.y_start(m) + self.y_width;
                for i in 0..self.x_count {
                    let x0 = self.x_start(i);
                    openings.push(opening(
                        x0,
                        x0 + self.x_width,
                        y0 - fillet,
                        y0 + self.divider + fillet,
                        span.y_divider_top,
                    ));
                }
            }
        }
        openings
    }
}
