mod support;

use gridfinity::{
    Model,
    bins::{build_bin, build_label_shelf},
    config::{BinConfig, BinStyle, LabelShelfConfig, LabelShelfStyle, MagnetHoleShape},
    float_types::{PI, Real},
    layout::Layout,
    traits::CSGOps,
};

use crate::support::{approx_eq, bounding_box, small_bin};

fn lip_height(cfg: &BinConfig) -> Real {
    cfg.stacking_lip_bottom_chamfer + cfg.stacking_lip_vertical_section + cfg.stacking_lip_top_chamfer
}

#[test]
fn blank_bin_fills_its_footprint() {
    let cfg = BinConfig {
        magnet_holes: false,
        ..small_bin(BinConfig::bin_blank())
    };
    let bin = build_bin(&cfg).expect("bin");
    let bb = bounding_box(&bin);
    let half = cfg.grid_size / 2.0 - cfg.clearance;
    assert!(approx_eq(bb[0], -half, 1e-9));
    assert!(approx_eq(bb[3], half, 1e-9));
    assert!(approx_eq(bb[2], -cfg.total_height(), 1e-9));
    assert!(approx_eq(bb[5], lip_height(&cfg), 1e-9));
}

#[test]
fn bin_base_has_no_lip() {
    let cfg = BinConfig {
        segments: 2,
        magnet_holes: false,
        ..BinConfig::bin_base()
    };
    let bin = build_bin(&cfg).expect("base");
    let bb = bounding_box(&bin);
    assert!(approx_eq(bb[5], 0.0, 1e-9));
    assert!(approx_eq(bb[2], -cfg.height_unit_value, 1e-9));
    assert!(approx_eq(bb[3] - bb[0], cfg.x_total_width(), 1e-9));
}

#[test]
fn magnets_remove_four_holes_per_cell() {
    let solid = small_bin(BinConfig {
        magnet_holes: false,
        stacking_lip: false,
        ..BinConfig::bin_blank()
    });
    let magnets = BinConfig {
        magnet_holes: true,
        ..solid.clone()
    };
    let plain = build_bin(&solid).expect("bin").volume();
    let drilled = build_bin(&magnets).expect("bin").volume();

    let n = 4 * solid.segments;
    let r = magnets.magnet_hole_diameter / 2.0;
    let disc = 0.5 * n as Real * r * r * (2.0 * PI / n as Real).sin();
    let expected = 4.0 * disc * magnets.magnet_hole_depth;
    assert!(approx_eq(plain - drilled, expected, 1e-4));
}

#[test]
fn hex_magnets_remove_more_than_round_ones() {
    let round = small_bin(BinConfig {
        stacking_lip: false,
        ..BinConfig::bin_blank()
    });
    let hex = BinConfig {
        magnet_hole_shape: MagnetHoleShape::Hex,
        ..round.clone()
    };
    let round = build_bin(&round).expect("bin").volume();
    let hex = build_bin(&hex).expect("bin").volume();
    assert!(hex < round);
}

#[test]
fn storage_bin_is_hollow() {
    let blank = small_bin(BinConfig {
        magnet_holes: false,
        ..BinConfig::bin_blank()
    });
    let storage = BinConfig {
        style: BinStyle::Storage,
        ..blank.clone()
    };
    let full = build_bin(&blank).expect("blank").volume();
    let hollow = build_bin(&storage).expect("storage");
    assert!(hollow.volume() < 0.5 * full);
    let bb = bounding_box(&hollow);
    assert!(approx_eq(bb[5], lip_height(&storage), 1e-9));
}

#[test]
fn shelf_and_scoop_add_material_back() {
    let storage = small_bin(BinConfig {
        magnet_holes: false,
        ..BinConfig::simple_storage_bin()
    });
    let parts = BinConfig {
        label_shelf_style: LabelShelfStyle::Standard,
        scoop: true,
        ..storage.clone()
    };
    let empty = build_bin(&storage).expect("storage").volume();
    let with_extras = build_bin(&parts).expect("parts").volume();
    assert!(with_extras > empty);
}

#[test]
fn dividers_add_walls() {
    let open = small_bin(BinConfig {
        x_grid_units: 2,
        magnet_holes: false,
        ..BinConfig::simple_storage_bin()
    });
    let divided = BinConfig {
        x_dividers: 1,
        ..open.clone()
    };
    let open = build_bin(&open).expect("open").volume();
    let divided = build_bin(&divided).expect("divided").volume();
    assert!(divided > open);
}

#[test]
fn eco_bin_uses_less_material_than_storage() {
    let storage = small_bin(BinConfig {
        magnet_holes: false,
        ..BinConfig::simple_storage_bin()
    });
    let eco = small_bin(BinConfig::eco_bin());
    let storage = build_bin(&storage).expect("storage").volume();
    let eco = build_bin(&eco).expect("eco").volume();
    assert!(eco < storage);
}

#[test]
fn custom_layout_covers_only_its_cells() {
    let cfg = BinConfig {
        layout: Some(Layout::parse("#.\n##").expect("layout")),
        height_units: 3,
        magnet_holes: false,
        segments: 2,
        ..BinConfig::bin_blank()
    };
    let l_bin = build_bin(&cfg).expect("bin").volume();
    let square = BinConfig {
        layout: None,
        x_grid_units: 2,
        y_grid_units: 2,
        ..cfg.clone()
    };
    let square = build_bin(&square).expect("bin").volume();
    assert!(l_bin < square);
    assert!(l_bin > 0.5 * square);
}

#[test]
fn invalid_configs_fail_with_a_message() {
    let cfg = BinConfig {
        x_dividers: 1,
        layout: Some(Layout::parse("#.\n##").expect("layout")),
        ..BinConfig::simple_storage_bin()
    };
    let err = build_bin(&cfg).expect_err("dividers on a custom layout");
    assert!(err.to_string().contains("rectangular"));

    let cfg = BinConfig {
        height_units: 0,
        ..BinConfig::default()
    };
    assert!(build_bin(&cfg).is_err());
}

#[test]
fn model_file_round_trips_through_json() {
    let model = Model::Bin(BinConfig::parts_bin());
    let json = serde_json::to_string(&model).expect("json");
    assert!(json.contains(r#""type":"bin""#));
    assert_eq!(Model::from_json_str(&json).expect("model"), model);
}

#[cfg(feature = "hashmap")]
#[test]
fn manifold_check_on_assembled_models() {
    // a standalone shelf is a single extrusion
    let shelf = build_label_shelf(&LabelShelfConfig {
        segments: 2,
        ..LabelShelfConfig::default()
    })
    .expect("shelf");
    assert!(shelf.is_manifold());

    // drilled bins come out of the BSP with T-junctions around the holes
    let drilled = build_bin(&small_bin(BinConfig {
        stacking_lip: false,
        ..BinConfig::bin_blank()
    }))
    .expect("bin");
    assert!(!drilled.is_manifold());
}
