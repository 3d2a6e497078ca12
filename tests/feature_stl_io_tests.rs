#![cfg(feature = "stl-io")]

use gridfinity::{
    bins::build_label_shelf,
    config::LabelShelfConfig,
    io::StlFormat,
    mesh::Mesh,
};
use nalgebra::{Point3, Vector3};

fn unit_cube() -> Mesh {
    Mesh::cuboid(Vector3::new(1.0, 1.0, 1.0), Point3::origin())
}

#[test]
fn mesh_to_stl_ascii() {
    let cube = unit_cube();
    let stl = cube.to_stl_ascii("test_cube");
    assert!(stl.starts_with("solid test_cube"));
    assert!(stl.trim_end().ends_with("endsolid test_cube"));
    assert_eq!(stl.matches("facet normal").count(), 12);
    assert_eq!(stl.matches("vertex").count(), 36);
}

#[test]
fn binary_stl_has_one_record_per_triangle() {
    let cube = unit_cube();
    let bytes = cube.to_stl_binary("cube").expect("stl");
    assert_eq!(bytes.len(), 84 + 50 * cube.triangle_count());
    let count = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]);
    assert_eq!(count as usize, 12);
}

#[test]
fn write_stl_round_trips_through_stl_io() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("shelf.stl");
    let shelf = build_label_shelf(&LabelShelfConfig {
        segments: 2,
        ..LabelShelfConfig::default()
    })?;
    shelf.write_stl(&path, StlFormat::Binary)?;

    let mut file = std::fs::File::open(&path)?;
    let read = stl_io::read_stl(&mut file)?;
    assert_eq!(read.faces.len(), shelf.triangle_count());
    Ok(())
}

#[test]
fn ascii_file_is_named_after_the_path() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("cube.stl");
    unit_cube().write_stl(&path, StlFormat::Ascii)?;
    let text = std::fs::read_to_string(&path)?;
    assert!(text.starts_with("solid cube"));
    Ok(())
}
