//! Complete models: every feature of a bin or baseplate combined into one
//! printable solid.

use crate::config::{
    BaseplateConfig, BaseplateStyle, BinConfig, BinStyle, LabelShelfConfig, LabelShelfStyle,
};
use crate::errors::Result;
use crate::features::{
    base, baseplate, compartments, eco, holes, label_shelf, scoop, stacking_lip,
};
use crate::mesh::Mesh;
use crate::traits::CSGOps;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Any model the crate can build, tagged by `type` in JSON:
///
/// ```json
/// { "type": "bin", "style": "storage", "x_grid_units": 3, "scoop": true }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Model {
    Bin(BinConfig),
    Baseplate(BaseplateConfig),
    LabelShelf(LabelShelfConfig),
}

impl Model {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Short name, used for STL solid names and default file names.
    pub fn name(&self) -> &'static str {
        match self {
            Model::Bin(_) => "bin",
            Model::Baseplate(_) => "baseplate",
            Model::LabelShelf(_) => "label_shelf",
        }
    }

    pub fn build(&self) -> Result<Mesh> {
        match self {
            Model::Bin(cfg) => build_bin(cfg),
            Model::Baseplate(cfg) => build_baseplate(cfg),
            Model::LabelShelf(cfg) => build_label_shelf(cfg),
        }
    }
}

/// Bin solid for `cfg`: base and body, hollowed per style, topped by the
/// stacking lip, with holes in the bottom.
pub fn build_bin(cfg: &BinConfig) -> Result<Mesh> {
    cfg.validate()?;
    info!(
        style = ?cfg.style,
        x_units = cfg.x_units(),
        y_units = cfg.y_units(),
        height_units = cfg.height_units,
        "building bin"
    );

    let mut bin = base::make_bin_body(cfg)?.union(&base::make_bin_base(cfg)?);
    match cfg.style {
        BinStyle::Blank | BinStyle::Base => {},
        BinStyle::Storage => bin = bin.difference(&storage_void(cfg)?),
        BinStyle::Eco => bin = bin.difference(&eco::make_eco_bin_cut(cfg)?),
    }
    if cfg.has_stacking_lip() {
        bin = bin.union(&stacking_lip::make_stacking_lip(cfg)?);
    }
    if cfg.magnet_holes || cfg.screw_holes {
        bin = bin.difference(&holes::make_bottom_holes(cfg)?);
    }
    Ok(bin)
}

/// Compartment void of a storage bin with the label shelf and scoop
/// material taken back out of it.
fn storage_void(cfg: &BinConfig) -> Result<Mesh> {
    let mut void = compartments::make_compartments(cfg)?;
    let wants_extras = cfg.label_shelf_style != LabelShelfStyle::Off || cfg.scoop;
    if cfg.is_custom_shape() {
        if wants_extras {
            warn!("label shelf and scoop need a rectangular layout, skipping them");
        }
        return Ok(void);
    }
    if cfg.label_shelf_style != LabelShelfStyle::Off {
        void = void.difference(&label_shelf::make_label_shelf(cfg)?);
    }
    if cfg.scoop {
        if let Some(scoop) = scoop::make_scoop(cfg)? {
            void = void.difference(&scoop);
        }
    }
    Ok(void)
}

/// Baseplate solid for `cfg`.
pub fn build_baseplate(cfg: &BaseplateConfig) -> Result<Mesh> {
    cfg.validate()?;
    info!(style = ?cfg.style, height = cfg.total_height(), "building baseplate");

    let mut plate = baseplate::make_baseplate_body(cfg)?;
    for pockets in baseplate::make_baseplate_cutout(cfg)? {
        plate = plate.difference(&pockets);
    }
    match cfg.style {
        BaseplateStyle::Simple => {},
        BaseplateStyle::Magnet => {
            plate = plate
                .difference(&baseplate::make_baseplate_magnet_holes(cfg))
                .difference(&baseplate::make_baseplate_center_cut(cfg));
        },
        BaseplateStyle::ScrewTogether => {
            for tool in baseplate::make_screw_together_holes(cfg)? {
                plate = plate.difference(&tool);
            }
        },
    }
    Ok(plate)
}

/// Standalone label shelf for `cfg`.
pub fn build_label_shelf(cfg: &LabelShelfConfig) -> Result<Mesh> {
    cfg.validate()?;
    info!(length = cfg.length, width = cfg.width, "building label shelf");
    Ok(label_shelf::standalone(cfg))
}
