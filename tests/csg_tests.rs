mod support;

use gridfinity::{
    float_types::{PI, Real},
    mesh::{Mesh, polygon::Polygon},
    sketch::Sketch,
    traits::CSGOps,
};
use nalgebra::{Point3, Vector3};

use crate::support::{approx_eq, bounding_box};

fn cube(size: Real, origin: [Real; 3]) -> Mesh {
    Mesh::cuboid(
        Vector3::new(size, size, size),
        Point3::new(origin[0], origin[1], origin[2]),
    )
}

#[test]
fn union() {
    let a = cube(2.0, [-1.0, -1.0, -1.0]);
    let b = cube(1.0, [0.5, 0.5, 0.5]);

    let union = a.union(&b);
    assert!(!union.polygons.is_empty());
    let bb = bounding_box(&union);
    assert!(approx_eq(bb[0], -1.0, 1e-8));
    assert!(approx_eq(bb[5], 1.5, 1e-8));
    // 8 + 1 - overlap of 0.125
    assert!(approx_eq(union.volume(), 8.875, 1e-9));
}

#[test]
fn difference() {
    let big = cube(2.0, [-1.0, -1.0, -1.0]);
    let small = cube(1.0, [0.5, 0.5, -0.5]);
    let result = big.difference(&small);
    // the small cube pokes out of one corner; only 0.5 x 0.5 x 1 of it is inside
    assert!(approx_eq(result.volume(), 7.75, 1e-9));
    let bb = bounding_box(&result);
    assert!(approx_eq(bb[3], 1.0, 1e-8));
}

#[test]
fn difference_of_a_contained_cube() {
    let big = cube(2.0, [-1.0, -1.0, -1.0]);
    let inner = cube(1.0, [-0.5, -0.5, -0.5]);
    let result = big.difference(&inner);
    assert!(approx_eq(result.volume(), 7.0, 1e-9));
    assert_eq!(
        bounding_box(&result).map(|v| (v * 1e6).round() / 1e6),
        [-1.0, -1.0, -1.0, 1.0, 1.0, 1.0]
    );
}

#[test]
fn intersection() {
    let a = cube(2.0, [0.0, 0.0, 0.0]);
    let b = cube(2.0, [1.0, 1.0, 1.0]);
    let result = a.intersection(&b);
    assert!(approx_eq(result.volume(), 1.0, 1e-9));
    let bb = bounding_box(&result);
    assert_eq!(bb.map(|v| (v * 1e6).round() / 1e6), [1.0, 1.0, 1.0, 2.0, 2.0, 2.0]);
}

#[test]
fn disjoint_operands_skip_the_tree() {
    let a = cube(1.0, [0.0, 0.0, 0.0]);
    let b = cube(1.0, [5.0, 0.0, 0.0]);

    let union = a.union(&b);
    assert_eq!(union.polygons.len(), 12);
    assert!(approx_eq(union.volume(), 2.0, 1e-12));

    assert_eq!(a.difference(&b).polygons.len(), a.polygons.len());
    assert!(a.intersection(&b).is_empty());
}

#[test]
fn union_all_of_overlapping_tools() {
    let tools: Vec<Mesh> = (0..3)
        .map(|i| cube(2.0, [i as Real, 0.0, 0.0]))
        .collect();
    let merged = Mesh::union_all(&tools);
    assert!(approx_eq(merged.volume(), 4.0 * 2.0 * 2.0, 1e-9));
}

#[test]
fn inverse_flips_the_volume_sign() {
    let c = cube(1.0, [0.0, 0.0, 0.0]);
    assert!(approx_eq(c.inverse().volume(), -1.0, 1e-12));
}

#[test]
fn copy_and_translate_places_every_copy() {
    let c = cube(1.0, [0.0, 0.0, 0.0]);
    let copies = c
        .copy_and_translate(&[Vector3::zeros(), Vector3::new(3.0, 0.0, 0.0)])
        .expect("copies");
    assert!(approx_eq(copies.volume(), 2.0, 1e-12));
    assert!(approx_eq(bounding_box(&copies)[3], 4.0, 1e-12));
    assert!(c.copy_and_translate(&[]).is_err());
}

#[test]
fn rotations_follow_the_right_hand_rule() {
    let column = cube(1.0, [0.0, 0.0, 0.0]).translate(0.0, 0.0, 1.0);
    // z maps onto +x
    let bb = bounding_box(&column.rotate(0.0, 90.0, 0.0));
    assert!(approx_eq(bb[3], 2.0, 1e-9));
    // z maps onto +y
    let bb = bounding_box(&column.rotate(-90.0, 0.0, 0.0));
    assert!(approx_eq(bb[4], 2.0, 1e-9));
}

#[test]
fn cylinder_difference_cuts_a_hole() {
    let block = cube(10.0, [-5.0, -5.0, 0.0]);
    let segments = 16;
    let hole = Mesh::cylinder(2.0, 12.0, Point3::new(0.0, 0.0, -1.0), segments);
    let drilled = block.difference(&hole);
    let disc = 0.5 * segments as Real * 4.0 * (2.0 * PI / segments as Real).sin();
    assert!(approx_eq(drilled.volume(), 1000.0 - 10.0 * disc, 1e-6));
}

#[test]
fn degenerate_polygons_are_rejected() {
    let collinear = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
    ];
    assert!(Polygon::from_points(&collinear).is_none());
}

#[cfg(feature = "hashmap")]
#[test]
fn primitives_are_closed() {
    assert!(cube(1.0, [0.0, 0.0, 0.0]).is_manifold());
    let ring = Sketch::rounded_rectangle(10.0, 6.0, 2.0, 4)
        .difference(&Sketch::rectangle(4.0, 2.0));
    assert!(ring.extrude(0.0, 3.0).is_manifold());
}

#[cfg(feature = "hashmap")]
#[test]
fn split_faces_leave_t_junctions() {
    let block = cube(2.0, [-1.0, -1.0, -1.0]);
    let pocket = Mesh::cuboid(Vector3::new(1.0, 1.0, 2.0), Point3::new(-0.5, -0.5, 0.0));
    let cut = block.difference(&pocket);
    assert!(approx_eq(cut.volume(), 7.0, 1e-9));
    // the top face is split along full-length lines that the pocket walls
    // only meet in part
    assert!(!cut.is_manifold());
}
