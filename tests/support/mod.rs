//! Test support library
//! Small configs that build quickly, and float comparisons.

#![allow(dead_code)]

use gridfinity::{
    config::{BaseplateConfig, BinConfig},
    float_types::Real,
    mesh::Mesh,
    traits::CSGOps,
};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// `[min_x, min_y, min_z, max_x, max_y, max_z]` of a mesh.
pub fn bounding_box(mesh: &Mesh) -> [Real; 6] {
    let bb = mesh.bounding_box();
    [bb.mins.x, bb.mins.y, bb.mins.z, bb.maxs.x, bb.maxs.y, bb.maxs.z]
}

/// Coarse bin: one cell, three units tall, two segments per quarter circle.
pub fn small_bin(base: BinConfig) -> BinConfig {
    BinConfig {
        x_grid_units: 1,
        y_grid_units: 1,
        height_units: 3,
        segments: 2,
        ..base
    }
}

/// Coarse baseplate over an `x` by `y` grid.
pub fn small_baseplate(base: BaseplateConfig, x: usize, y: usize) -> BaseplateConfig {
    BaseplateConfig {
        x_grid_units: x,
        y_grid_units: y,
        segments: 2,
        ..base
    }
}
