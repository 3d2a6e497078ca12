//! Parameter sets for every model the crate builds.
//!
//! All structs deserialise with `#[serde(default)]`, so a JSON file only
//! needs the values that differ from the standard Gridfinity dimensions.

use crate::errors::{GridfinityError, Result, ensure_positive, ensure_radius_fits};
use crate::float_types::Real;
use crate::layout::Layout;
use crate::sketch::Sketch;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which parts of a bin are built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinStyle {
    /// Solid body on the base profile.
    #[default]
    Blank,
    /// Base profile with a solid body and no stacking lip.
    Base,
    /// Hollow bin with compartments, label shelf and scoop.
    Storage,
    /// Thin-walled bin with a hollowed base.
    Eco,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MagnetHoleShape {
    #[default]
    Round,
    /// Hexagon whose flats are `magnet_hole_diameter` apart, so the
    /// circumradius is `d / sqrt(3)`, not `d / 2`.
    Hex,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelShelfStyle {
    #[default]
    Off,
    Standard,
    /// Flat shelf spanning the whole bin, sticking out over the lip.
    Overhang,
}

/// Where a label shelf sits along the compartment's Y extent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelShelfPlacement {
    #[default]
    FullWidth,
    Center,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseplateStyle {
    #[default]
    Simple,
    Magnet,
    ScrewTogether,
}

/// Storage bin parameters. Lengths in millimetres, angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinConfig {
    pub style: BinStyle,

    // grid
    pub x_grid_units: usize,
    pub y_grid_units: usize,
    pub height_units: u32,
    pub grid_size: Real,
    pub height_unit_value: Real,
    /// Gap left on each side between neighbouring bins.
    pub clearance: Real,
    /// Custom footprint. Overrides the grid units when set.
    pub layout: Option<Layout>,

    // base profile
    pub base_profile_bottom_chamfer: Real,
    pub base_profile_vertical_section: Real,
    pub base_profile_top_chamfer: Real,
    pub bin_outer_radius: Real,
    pub bin_vertical_radius: Real,
    pub bin_bottom_radius: Real,

    // walls and compartments
    pub wall_thickness: Real,
    pub inside_fillet_radius: Real,
    pub divider_thickness: Real,
    pub x_dividers: usize,
    pub y_dividers: usize,
    /// 0 means full height.
    pub x_divider_height: Real,
    /// 0 means full height.
    pub y_divider_height: Real,

    // stacking lip
    pub stacking_lip: bool,
    pub stacking_lip_top_ledge: Real,
    pub stacking_lip_top_chamfer: Real,
    pub stacking_lip_vertical_section: Real,
    pub stacking_lip_bottom_chamfer: Real,

    // bottom holes
    pub magnet_holes: bool,
    pub magnet_hole_shape: MagnetHoleShape,
    pub magnet_hole_diameter: Real,
    pub magnet_hole_depth: Real,
    pub magnet_hole_distance_from_edge: Real,
    pub screw_holes: bool,
    pub screw_hole_diameter: Real,
    pub screw_hole_depth: Real,
    /// Layer height of the printed bridge over a magnet hole when screw
    /// holes continue below it.
    pub sequential_bridging_layer_height: Real,

    // label shelf
    pub label_shelf_style: LabelShelfStyle,
    pub label_shelf_placement: LabelShelfPlacement,
    pub label_shelf_width: Real,
    pub label_shelf_length: Real,
    pub label_shelf_vertical_thickness: Real,
    pub label_shelf_angle: Real,
    /// How far the shelf and dividers sit below the rim when a lip is present.
    pub label_shelf_stacking_offset: Real,

    // scoop
    pub scoop: bool,
    pub scoop_radius: Real,

    // eco
    pub base_wall_thickness: Real,

    /// Segments per quarter circle on rounded corners.
    pub segments: usize,
}

/// Baseplate parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseplateConfig {
    pub style: BaseplateStyle,

    pub x_grid_units: usize,
    pub y_grid_units: usize,
    pub grid_size: Real,
    pub layout: Option<Layout>,

    pub profile_bottom_chamfer: Real,
    pub profile_vertical_section: Real,
    pub profile_top_chamfer: Real,
    pub outer_radius: Real,
    pub vertical_radius: Real,
    pub bottom_radius: Real,
    pub top_ledge_width: Real,

    // magnet style
    /// Floor under the magnet holes.
    pub magnet_base_thickness: Real,
    pub magnet_hole_diameter: Real,
    pub magnet_hole_depth: Real,
    pub magnet_hole_distance_from_edge: Real,
    /// Material kept between a magnet hole and the centre cut.
    pub magnet_edge_thickness: Real,
    pub small_fillet: Real,

    // screw-together style
    pub screw_together_base_thickness: Real,
    pub screw_hole_diameter: Real,
    pub countersink_diameter: Real,
    pub countersink_angle: Real,
    pub connection_hole_diameter: Real,

    pub segments: usize,
}

/// Rounds the outer corners of a standalone shelf.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutsideFillet {
    /// Distance of the rounded corners from the shelf's back edge.
    pub offset: Real,
    pub radius: Real,
}

/// Standalone label shelf, for gluing into third party bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelShelfConfig {
    pub length: Real,
    pub width: Real,
    /// Height of the front edge.
    pub thickness: Real,
    /// Height of the back edge. Derived from `angle` when unset.
    pub height: Option<Real>,
    pub angle: Real,
    /// Centre the shelf on the origin along Y.
    pub center: bool,
    pub outside_fillet: Option<OutsideFillet>,
    pub segments: usize,
}

impl BinConfig {
    /// Solid bin with a stacking lip.
    pub fn bin_blank() -> Self {
        BinConfig::default()
    }

    /// One unit tall base without a lip.
    pub fn bin_base() -> Self {
        BinConfig {
            style: BinStyle::Base,
            height_units: 1,
            stacking_lip: false,
            ..BinConfig::default()
        }
    }

    pub fn simple_storage_bin() -> Self {
        BinConfig {
            style: BinStyle::Storage,
            ..BinConfig::default()
        }
    }

    pub fn eco_bin() -> Self {
        BinConfig {
            style: BinStyle::Eco,
            wall_thickness: 0.8,
            inside_fillet_radius: 1.5,
            divider_thickness: 0.8,
            magnet_holes: false,
            ..BinConfig::default()
        }
    }

    /// Storage bin with a label shelf and a scoop.
    pub fn parts_bin() -> Self {
        BinConfig {
            style: BinStyle::Storage,
            label_shelf_style: LabelShelfStyle::Standard,
            scoop: true,
            ..BinConfig::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }

    /// Footprint in grid cells, from `layout` or the grid units.
    pub fn layout(&self) -> Layout {
        self.layout
            .clone()
            .unwrap_or_else(|| Layout::rectangle(self.x_grid_units, self.y_grid_units))
    }

    pub fn x_units(&self) -> usize {
        self.layout.as_ref().map_or(self.x_grid_units, Layout::x_units)
    }

    pub fn y_units(&self) -> usize {
        self.layout.as_ref().map_or(self.y_grid_units, Layout::y_units)
    }

    /// True for a footprint that is not a plain rectangle.
    pub fn is_custom_shape(&self) -> bool {
        !self.layout().is_rectangular()
    }

    /// Footprint of a single cell.
    pub fn bin_unit(&self) -> Real {
        self.grid_size - 2.0 * self.clearance
    }

    pub fn x_total_width(&self) -> Real {
        self.x_units() as Real * self.grid_size - 2.0 * self.clearance
    }

    pub fn y_total_width(&self) -> Real {
        self.y_units() as Real * self.grid_size - 2.0 * self.clearance
    }

    pub fn total_height(&self) -> Real {
        self.height_units as Real * self.height_unit_value
    }

    /// Depth available inside the bin, from the rim down to the floor.
    pub fn usable_height(&self) -> Real {
        self.total_height() - self.height_unit_value
    }

    pub fn base_profile_height(&self) -> Real {
        self.base_profile_bottom_chamfer
            + self.base_profile_vertical_section
            + self.base_profile_top_chamfer
    }

    /// Horizontal depth of the stacking lip measured from the outer wall.
    pub fn stacking_lip_inset(&self) -> Real {
        self.stacking_lip_top_ledge + self.stacking_lip_top_chamfer + self.stacking_lip_bottom_chamfer
    }

    pub fn has_stacking_lip(&self) -> bool {
        self.stacking_lip && self.style != BinStyle::Base
    }

    pub fn x_compartment_width(&self) -> Real {
        (self.x_total_width() - 2.0 * self.wall_thickness
            - self.x_dividers as Real * self.divider_thickness)
            / (self.x_dividers + 1) as Real
    }

    pub fn y_compartment_width(&self) -> Real {
        (self.y_total_width() - 2.0 * self.wall_thickness
            - self.y_dividers as Real * self.divider_thickness)
            / (self.y_dividers + 1) as Real
    }

    /// Outer wall outline at `inset` from the outside, with convex corners
    /// rounded by `bin_outer_radius - inset` and re-entrant ones by
    /// `bin_outer_radius + inset`.
    pub fn outline(&self, inset: Real) -> Result<Sketch> {
        let sharp = self.layout().inset_rings(self.grid_size, self.clearance + inset)?;
        Ok(sharp.rounded_corners(
            self.bin_outer_radius - inset,
            self.bin_outer_radius + inset,
            self.segments,
        ))
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("grid_size", self.grid_size)?;
        ensure_positive("height_unit_value", self.height_unit_value)?;
        ensure_positive("height_units", self.height_units as Real)?;
        if self.clearance < 0.0 {
            return Err(GridfinityError::InvalidParameter(format!(
                "clearance must not be negative, got {}",
                self.clearance
            )));
        }
        if self.segments == 0 {
            return Err(GridfinityError::InvalidParameter(
                "segments must be at least 1".into(),
            ));
        }
        let layout = self.layout();
        layout.validate()?;

        let unit = self.bin_unit();
        ensure_positive("bin_unit", unit)?;
        ensure_positive("base_profile_bottom_chamfer", self.base_profile_bottom_chamfer)?;
        ensure_positive("base_profile_vertical_section", self.base_profile_vertical_section)?;
        ensure_positive("base_profile_top_chamfer", self.base_profile_top_chamfer)?;
        ensure_positive("bin_outer_radius", self.bin_outer_radius)?;
        ensure_positive("bin_vertical_radius", self.bin_vertical_radius)?;
        ensure_positive("bin_bottom_radius", self.bin_bottom_radius)?;
        ensure_positive("wall_thickness", self.wall_thickness)?;
        ensure_radius_fits("bin_outer_radius", self.bin_outer_radius, unit)?;

        let vertical_width = unit - 2.0 * self.base_profile_top_chamfer;
        ensure_positive("base vertical width", vertical_width)?;
        ensure_radius_fits("bin_vertical_radius", self.bin_vertical_radius, vertical_width)?;
        let bottom_width = vertical_width - 2.0 * self.base_profile_bottom_chamfer;
        ensure_positive("base bottom width", bottom_width)?;
        ensure_radius_fits("bin_bottom_radius", self.bin_bottom_radius, bottom_width)?;

        if self.total_height() <= self.base_profile_height() {
            return Err(GridfinityError::InvalidParameter(format!(
                "total height {} leaves no body above the {} base profile",
                self.total_height(),
                self.base_profile_height()
            )));
        }
        if 2.0 * self.wall_thickness >= unit {
            return Err(GridfinityError::InvalidParameter(format!(
                "wall thickness {} leaves no room inside a {unit} cell",
                self.wall_thickness
            )));
        }

        if self.has_stacking_lip() {
            ensure_positive("stacking_lip_top_ledge", self.stacking_lip_top_ledge)?;
            ensure_positive("stacking_lip_top_chamfer", self.stacking_lip_top_chamfer)?;
            ensure_positive("stacking_lip_vertical_section", self.stacking_lip_vertical_section)?;
            ensure_positive("stacking_lip_bottom_chamfer", self.stacking_lip_bottom_chamfer)?;
            if self.stacking_lip_inset() <= self.wall_thickness {
                return Err(GridfinityError::InvalidParameter(format!(
                    "stacking lip inset {} must exceed the wall thickness {}",
                    self.stacking_lip_inset(),
                    self.wall_thickness
                )));
            }
            if self.stacking_lip_inset() >= self.bin_outer_radius {
                return Err(GridfinityError::InvalidParameter(format!(
                    "stacking lip inset {} must stay inside the outer radius {}",
                    self.stacking_lip_inset(),
                    self.bin_outer_radius
                )));
            }
        }

        if self.magnet_holes {
            ensure_positive("magnet_hole_diameter", self.magnet_hole_diameter)?;
            ensure_positive("magnet_hole_depth", self.magnet_hole_depth)?;
            ensure_positive("magnet_hole_distance_from_edge", self.magnet_hole_distance_from_edge)?;
            self.ensure_hole_fits(self.magnet_hole_diameter)?;
        }
        if self.screw_holes {
            ensure_positive("screw_hole_diameter", self.screw_hole_diameter)?;
            ensure_positive("screw_hole_depth", self.screw_hole_depth)?;
            ensure_positive("magnet_hole_distance_from_edge", self.magnet_hole_distance_from_edge)?;
            self.ensure_hole_fits(self.screw_hole_diameter)?;
        }
        if self.magnet_holes && self.screw_holes {
            ensure_positive(
                "sequential_bridging_layer_height",
                self.sequential_bridging_layer_height,
            )?;
        }

        match self.style {
            BinStyle::Blank | BinStyle::Base => Ok(()),
            BinStyle::Storage => {
                self.validate_compartments(&layout)?;
                self.validate_label_shelf()?;
                if self.scoop && self.scoop_radius < 0.0 {
                    return Err(GridfinityError::NonPositive {
                        name: "scoop_radius",
                        value: self.scoop_radius,
                    });
                }
                Ok(())
            },
            BinStyle::Eco => {
                self.validate_compartments(&layout)?;
                ensure_positive("base_wall_thickness", self.base_wall_thickness)?;
                ensure_positive(
                    "eco pocket width",
                    vertical_width - 2.0 * self.base_wall_thickness - 0.8,
                )
            },
        }
    }

    fn validate_compartments(&self, layout: &Layout) -> Result<()> {
        ensure_positive("usable_height", self.usable_height())?;
        let dividers = self.x_dividers > 0 || self.y_dividers > 0;
        if dividers && !layout.is_rectangular() {
            return Err(GridfinityError::InvalidParameter(
                "dividers need a rectangular layout".into(),
            ));
        }
        if dividers {
            ensure_positive("divider_thickness", self.divider_thickness)?;
        }
        if self.inside_fillet_radius < 0.0 {
            return Err(GridfinityError::NonPositive {
                name: "inside_fillet_radius",
                value: self.inside_fillet_radius,
            });
        }
        if self.x_divider_height < 0.0 || self.y_divider_height < 0.0 {
            return Err(GridfinityError::InvalidParameter(
                "divider heights must not be negative".into(),
            ));
        }
        let x_comp = self.x_compartment_width();
        let y_comp = self.y_compartment_width();
        ensure_positive("x compartment width", x_comp)?;
        ensure_positive("y compartment width", y_comp)?;
        ensure_radius_fits("inside_fillet_radius", self.inside_fillet_radius, x_comp.min(y_comp))?;
        ensure_radius_fits(
            "inside_fillet_radius",
            self.inside_fillet_radius,
            self.usable_height() * 2.0,
        )
    }

    fn validate_label_shelf(&self) -> Result<()> {
        if self.label_shelf_style == LabelShelfStyle::Off {
            return Ok(());
        }
        ensure_positive("label_shelf_width", self.label_shelf_width)?;
        ensure_positive("label_shelf_length", self.label_shelf_length)?;
        ensure_positive("label_shelf_vertical_thickness", self.label_shelf_vertical_thickness)?;
        if !(0.0..90.0).contains(&self.label_shelf_angle) {
            return Err(GridfinityError::InvalidParameter(format!(
                "label shelf angle must be in [0, 90), got {}",
                self.label_shelf_angle
            )));
        }
        if self.label_shelf_style == LabelShelfStyle::Standard {
            let shelf = self.stacking_lip_inset() + self.label_shelf_width - self.wall_thickness;
            if shelf > self.x_compartment_width() {
                return Err(GridfinityError::InvalidParameter(format!(
                    "label shelf of depth {shelf} does not fit a {} wide compartment",
                    self.x_compartment_width()
                )));
            }
        }
        Ok(())
    }

    fn ensure_hole_fits(&self, diameter: Real) -> Result<()> {
        let position = self.grid_size / 2.0 - self.magnet_hole_distance_from_edge;
        if position <= 0.0 || self.magnet_hole_distance_from_edge - diameter / 2.0 <= 0.0 {
            return Err(GridfinityError::InvalidParameter(format!(
                "hole of diameter {diameter} at {} from the edge does not fit a {} cell",
                self.magnet_hole_distance_from_edge, self.grid_size
            )));
        }
        Ok(())
    }
}

impl BaseplateConfig {
    pub fn baseplate() -> Self {
        BaseplateConfig::default()
    }

    pub fn magnet_baseplate() -> Self {
        BaseplateConfig {
            style: BaseplateStyle::Magnet,
            ..BaseplateConfig::default()
        }
    }

    pub fn screw_together_baseplate() -> Self {
        BaseplateConfig {
            style: BaseplateStyle::ScrewTogether,
            ..BaseplateConfig::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }

    pub fn layout(&self) -> Layout {
        self.layout
            .clone()
            .unwrap_or_else(|| Layout::rectangle(self.x_grid_units, self.y_grid_units))
    }

    pub fn x_total_width(&self) -> Real {
        self.layout.as_ref().map_or(self.x_grid_units, Layout::x_units) as Real * self.grid_size
    }

    pub fn y_total_width(&self) -> Real {
        self.layout.as_ref().map_or(self.y_grid_units, Layout::y_units) as Real * self.grid_size
    }

    pub fn profile_height(&self) -> Real {
        self.profile_bottom_chamfer + self.profile_vertical_section + self.profile_top_chamfer
    }

    /// Thickness of material under the pockets.
    pub fn base_thickness(&self) -> Real {
        match self.style {
            BaseplateStyle::Simple => 0.0,
            BaseplateStyle::Magnet => self.magnet_hole_depth + self.magnet_base_thickness,
            BaseplateStyle::ScrewTogether => self.screw_together_base_thickness,
        }
    }

    pub fn total_height(&self) -> Real {
        self.profile_height() + self.base_thickness()
    }

    /// Offset of the four hole centres from a cell centre along each axis.
    pub fn hole_position(&self) -> Real {
        self.grid_size / 2.0 - self.magnet_hole_distance_from_edge
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("grid_size", self.grid_size)?;
        ensure_positive("profile_bottom_chamfer", self.profile_bottom_chamfer)?;
        ensure_positive("profile_vertical_section", self.profile_vertical_section)?;
        ensure_positive("profile_top_chamfer", self.profile_top_chamfer)?;
        ensure_positive("outer_radius", self.outer_radius)?;
        ensure_positive("vertical_radius", self.vertical_radius)?;
        ensure_positive("bottom_radius", self.bottom_radius)?;
        if self.segments == 0 {
            return Err(GridfinityError::InvalidParameter(
                "segments must be at least 1".into(),
            ));
        }
        self.layout().validate()?;

        ensure_radius_fits("outer_radius", self.outer_radius, self.grid_size)?;
        let vertical_width = self.grid_size - 2.0 * self.profile_top_chamfer;
        ensure_positive("pocket vertical width", vertical_width)?;
        ensure_radius_fits("vertical_radius", self.vertical_radius, vertical_width)?;
        let bottom_width = vertical_width - 2.0 * self.profile_bottom_chamfer;
        ensure_positive("pocket bottom width", bottom_width)?;
        ensure_radius_fits("bottom_radius", self.bottom_radius, bottom_width)?;

        if self.style == BaseplateStyle::Simple {
            return Ok(());
        }
        ensure_positive("magnet_hole_diameter", self.magnet_hole_diameter)?;
        ensure_positive("magnet_hole_depth", self.magnet_hole_depth)?;
        ensure_positive("magnet_edge_thickness", self.magnet_edge_thickness)?;
        ensure_positive("hole position", self.hole_position())?;
        ensure_positive(
            "magnet hole clearance",
            self.magnet_hole_distance_from_edge - self.magnet_hole_diameter / 2.0,
        )?;
        match self.style {
            BaseplateStyle::Magnet => {
                ensure_positive("magnet_base_thickness", self.magnet_base_thickness)?;
                ensure_positive("small_fillet", self.small_fillet)?;
                let hole_edge = self.hole_position()
                    - self.magnet_hole_diameter / 2.0
                    - self.magnet_edge_thickness;
                ensure_positive("centre cut between the magnets", hole_edge - self.small_fillet)?;
                let frame = self.grid_size / 2.0
                    - self.profile_top_chamfer
                    - self.profile_bottom_chamfer
                    - self.top_ledge_width;
                if frame <= self.hole_position() {
                    return Err(GridfinityError::InvalidParameter(format!(
                        "magnet holes at {} from the centre reach past the pocket floor {frame}",
                        self.hole_position()
                    )));
                }
                Ok(())
            },
            BaseplateStyle::ScrewTogether => {
                ensure_positive("screw_hole_diameter", self.screw_hole_diameter)?;
                ensure_positive("connection_hole_diameter", self.connection_hole_diameter)?;
                if self.countersink_diameter <= self.screw_hole_diameter {
                    return Err(GridfinityError::InvalidParameter(format!(
                        "countersink diameter {} must exceed the screw diameter {}",
                        self.countersink_diameter, self.screw_hole_diameter
                    )));
                }
                if !(0.0..180.0).contains(&self.countersink_angle) || self.countersink_angle == 0.0 {
                    return Err(GridfinityError::InvalidParameter(format!(
                        "countersink angle must be in (0, 180), got {}",
                        self.countersink_angle
                    )));
                }
                let floor = self.screw_together_base_thickness - self.magnet_hole_depth;
                ensure_positive("floor under the magnet holes", floor)?;
                if self.connection_hole_diameter >= floor {
                    return Err(GridfinityError::InvalidParameter(format!(
                        "connection hole of diameter {} does not fit the {floor} floor",
                        self.connection_hole_diameter
                    )));
                }
                Ok(())
            },
            BaseplateStyle::Simple => Ok(()),
        }
    }
}

impl LabelShelfConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }

    /// Back edge height, from `height` or else from `angle`.
    pub fn back_height(&self) -> Real {
        self.height.unwrap_or_else(|| {
            self.thickness + self.angle.to_radians().tan() * self.width
        })
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("length", self.length)?;
        ensure_positive("width", self.width)?;
        ensure_positive("thickness", self.thickness)?;
        if !(0.0..90.0).contains(&self.angle) {
            return Err(GridfinityError::InvalidParameter(format!(
                "angle must be in [0, 90), got {}",
                self.angle
            )));
        }
        if self.back_height() < self.thickness {
            return Err(GridfinityError::InvalidParameter(format!(
                "back height {} is lower than the front thickness {}",
                self.back_height(),
                self.thickness
            )));
        }
        if let Some(fillet) = self.outside_fillet {
            ensure_positive("outside fillet radius", fillet.radius)?;
            ensure_radius_fits("outside fillet radius", fillet.radius, self.length)?;
        }
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), "loading configuration");
    Ok(serde_json::from_str(&text)?)
}

// --- Default ---

impl Default for BinConfig {
    fn default() -> Self {
        Self {
            style: BinStyle::Blank,
            x_grid_units: 2,
            y_grid_units: 2,
            height_units: 6,
            grid_size: 42.0,
            height_unit_value: 7.0,
            clearance: 0.25,
            layout: None,
            base_profile_bottom_chamfer: 0.8,
            base_profile_vertical_section: 1.8,
            base_profile_top_chamfer: 2.15,
            bin_outer_radius: 3.75,
            bin_vertical_radius: 3.2,
            bin_bottom_radius: 1.6,
            wall_thickness: 1.0,
            inside_fillet_radius: 1.85,
            divider_thickness: 1.2,
            x_dividers: 0,
            y_dividers: 0,
            x_divider_height: 0.0,
            y_divider_height: 0.0,
            stacking_lip: true,
            stacking_lip_top_ledge: 0.4,
            stacking_lip_top_chamfer: 1.9,
            stacking_lip_vertical_section: 1.8,
            stacking_lip_bottom_chamfer: 0.7,
            magnet_holes: true,
            magnet_hole_shape: MagnetHoleShape::Round,
            magnet_hole_diameter: 6.5,
            magnet_hole_depth: 2.4,
            magnet_hole_distance_from_edge: 8.0,
            screw_holes: false,
            screw_hole_diameter: 3.0,
            screw_hole_depth: 6.0,
            sequential_bridging_layer_height: 0.2,
            label_shelf_style: LabelShelfStyle::Off,
            label_shelf_placement: LabelShelfPlacement::FullWidth,
            label_shelf_width: 12.0,
            label_shelf_length: 42.0,
            label_shelf_vertical_thickness: 2.0,
            label_shelf_angle: 0.0,
            label_shelf_stacking_offset: 0.4,
            scoop: false,
            scoop_radius: 21.0,
            base_wall_thickness: 0.8,
            segments: 8,
        }
    }
}

impl Default for BaseplateConfig {
    fn default() -> Self {
        Self {
            style: BaseplateStyle::Simple,
            x_grid_units: 2,
            y_grid_units: 2,
            grid_size: 42.0,
            layout: None,
            profile_bottom_chamfer: 0.7,
            profile_vertical_section: 1.8,
            profile_top_chamfer: 2.15,
            outer_radius: 4.0,
            vertical_radius: 1.9,
            bottom_radius: 0.8,
            top_ledge_width: 0.4,
            magnet_base_thickness: 0.4,
            magnet_hole_diameter: 6.5,
            magnet_hole_depth: 2.4,
            magnet_hole_distance_from_edge: 8.0,
            magnet_edge_thickness: 1.2,
            small_fillet: 1.0,
            screw_together_base_thickness: 6.4,
            screw_hole_diameter: 3.0,
            countersink_diameter: 6.0,
            countersink_angle: 90.0,
            connection_hole_diameter: 3.2,
            segments: 8,
        }
    }
}

impl Default for LabelShelfConfig {
    fn default() -> Self {
        Self {
            length: 42.0,
            width: 12.0,
            thickness: 2.0,
            height: None,
            angle: 0.0,
            center: false,
            outside_fillet: None,
            segments: 8,
        }
    }
}
