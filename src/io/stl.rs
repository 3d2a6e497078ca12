use crate::errors::Result;
use crate::mesh::Mesh;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::Path;

/// STL flavour written by [`Mesh::write_stl`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StlFormat {
    #[default]
    Binary,
    Ascii,
}

impl Mesh {
    /// ASCII STL text of this mesh, as a solid called `name`.
    ///
    /// ```rust
    /// # use gridfinity::mesh::Mesh;
    /// # use nalgebra::{Point3, Vector3};
    /// let mesh = Mesh::cuboid(Vector3::new(1.0, 1.0, 1.0), Point3::origin());
    /// let text = mesh.to_stl_ascii("my_solid");
    /// assert!(text.starts_with("solid my_solid"));
    /// ```
    pub fn to_stl_ascii(&self, name: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!("solid {name}\n"));

        for poly in &self.polygons {
            let n = poly.plane.normal();
            for tri in poly.triangulate() {
                out.push_str(&format!(
                    "  facet normal {:.6} {:.6} {:.6}\n",
                    n.x, n.y, n.z
                ));
                out.push_str("    outer loop\n");
                for v in &tri {
                    out.push_str(&format!(
                        "      vertex {:.6} {:.6} {:.6}\n",
                        v.pos.x, v.pos.y, v.pos.z
                    ));
                }
                out.push_str("    endloop\n");
                out.push_str("  endfacet\n");
            }
        }

        out.push_str(&format!("endsolid {name}\n"));
        out
    }

    /// Export to BINARY STL (returns `Vec<u8>`)
    ///
    /// Binary STL has no room for a solid name; `_name` keeps the signature
    /// symmetric with [`Mesh::to_stl_ascii`].
    pub fn to_stl_binary(&self, _name: &str) -> std::io::Result<Vec<u8>> {
        use stl_io::{Normal, Triangle, Vertex, write_stl};

        let mut triangles = Vec::<Triangle>::with_capacity(self.triangle_count());
        for poly in &self.polygons {
            let n = poly.plane.normal();
            for tri in poly.triangulate() {
                triangles.push(Triangle {
                    normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                    vertices: tri.map(|v| {
                        Vertex::new([v.pos.x as f32, v.pos.y as f32, v.pos.z as f32])
                    }),
                });
            }
        }

        let mut cursor = Cursor::new(Vec::new());
        write_stl(&mut cursor, triangles.iter())?;
        Ok(cursor.into_inner())
    }

    /// Write the mesh to `path` in the requested format.
    pub fn write_stl(&self, path: impl AsRef<Path>, format: StlFormat) -> Result<()> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("gridfinity");
        let bytes = match format {
            StlFormat::Binary => self.to_stl_binary(name)?,
            StlFormat::Ascii => self.to_stl_ascii(name).into_bytes(),
        };
        std::fs::write(path, bytes)?;
        tracing::debug!(path = %path.display(), ?format, triangles = self.triangle_count(), "wrote STL");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    #[test]
    fn binary_stl_has_one_facet_per_triangle() {
        let cube = Mesh::cuboid(Vector3::new(1.0, 1.0, 1.0), Point3::origin());
        let bytes = cube.to_stl_binary("cube").expect("stl");
        // 80 byte header, u32 count, 50 bytes per facet
        assert_eq!(bytes.len(), 84 + 12 * 50);
        let mut reader = Cursor::new(bytes);
        let read = stl_io::read_stl(&mut reader).expect("parse");
        assert_eq!(read.faces.len(), 12);
    }

    #[test]
    fn ascii_stl_counts_facets() {
        let cube = Mesh::cuboid(Vector3::new(1.0, 1.0, 1.0), Point3::origin());
        let text = cube.to_stl_ascii("cube");
        assert_eq!(text.matches("facet normal").count(), 12);
        assert!(text.trim_end().ends_with("endsolid cube"));
    }
}
