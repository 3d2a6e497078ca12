mod support;

use gridfinity::{
    Model,
    bins::build_baseplate,
    config::{BaseplateConfig, BaseplateStyle},
    features::baseplate::make_baseplate_body,
    layout::Layout,
    traits::CSGOps,
};

use crate::support::{approx_eq, bounding_box, small_baseplate};

#[test]
fn simple_baseplate_is_a_frame() {
    let cfg = small_baseplate(BaseplateConfig::baseplate(), 2, 1);
    let plate = build_baseplate(&cfg).expect("plate");
    let bb = bounding_box(&plate);
    assert!(approx_eq(bb[3] - bb[0], 2.0 * cfg.grid_size, 1e-9));
    assert!(approx_eq(bb[4] - bb[1], cfg.grid_size, 1e-9));
    assert!(approx_eq(bb[2], -cfg.profile_height(), 1e-9));
    assert!(approx_eq(bb[5], 0.0, 1e-9));

    let body = make_baseplate_body(&cfg).expect("body").volume();
    // open pockets leave well under a quarter of the block
    assert!(plate.volume() < 0.25 * body);
}

#[test]
fn magnet_baseplate_keeps_its_floor() {
    let cfg = small_baseplate(BaseplateConfig::magnet_baseplate(), 1, 1);
    let plate = build_baseplate(&cfg).expect("plate");
    let bb = bounding_box(&plate);
    assert!(approx_eq(bb[2], -cfg.total_height(), 1e-9));
    assert!(approx_eq(
        cfg.total_height(),
        cfg.profile_height() + cfg.magnet_hole_depth + cfg.magnet_base_thickness,
        1e-12
    ));

    let simple = BaseplateConfig {
        style: BaseplateStyle::Simple,
        ..cfg.clone()
    };
    let simple = build_baseplate(&simple).expect("plate").volume();
    assert!(plate.volume() > simple);
}

#[test]
fn screw_together_baseplate_builds() {
    let cfg = small_baseplate(BaseplateConfig::screw_together_baseplate(), 2, 1);
    let plate = build_baseplate(&cfg).expect("plate");
    let bb = bounding_box(&plate);
    assert!(approx_eq(bb[2], -cfg.total_height(), 1e-9));
    let body = make_baseplate_body(&cfg).expect("body").volume();
    assert!(plate.volume() < body);
}

#[test]
fn custom_layout_plate() {
    let cfg = BaseplateConfig {
        layout: Some(Layout::parse("##\n#.").expect("layout")),
        segments: 2,
        ..BaseplateConfig::baseplate()
    };
    let plate = build_baseplate(&cfg).expect("plate");
    let bb = bounding_box(&plate);
    assert!(approx_eq(bb[3] - bb[0], 2.0 * cfg.grid_size, 1e-9));
    assert!(plate.volume() > 0.0);
}

#[test]
fn magnets_must_fit_inside_the_pocket_floor() {
    let cfg = BaseplateConfig {
        magnet_hole_distance_from_edge: 3.0,
        ..BaseplateConfig::magnet_baseplate()
    };
    assert!(build_baseplate(&cfg).is_err());
}

#[test]
fn baseplate_model_from_json() {
    let model = Model::from_json_str(
        r#"{ "type": "baseplate", "style": "screw_together", "x_grid_units": 3, "segments": 2 }"#,
    )
    .expect("model");
    let Model::Baseplate(cfg) = &model else {
        panic!("expected a baseplate, got {model:?}");
    };
    assert_eq!(cfg.style, BaseplateStyle::ScrewTogether);
    assert_eq!(cfg.x_grid_units, 3);
    assert_eq!(cfg.y_grid_units, 2);
}
