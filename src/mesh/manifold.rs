use crate::float_types::Real;
use crate::mesh::Mesh;
use hashbrown::HashMap;
use nalgebra::Point3;

const QUANTIZATION_FACTOR: Real = 1e7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct QuantizedPoint(i64, i64, i64);

fn quantize_point(p: &Point3<Real>) -> QuantizedPoint {
    QuantizedPoint(
        (p.x * QUANTIZATION_FACTOR).round() as i64,
        (p.y * QUANTIZATION_FACTOR).round() as i64,
        (p.z * QUANTIZATION_FACTOR).round() as i64,
    )
}

impl Mesh {
    /// Checks if the Mesh is a closed, consistently oriented surface.
    ///
    /// ### Returns
    /// Returns `true` if every directed triangle edge appears exactly once and
    /// its reverse appears exactly once.
    ///
    /// ### Notes:
    /// - Coordinates are welded with a fixed `QUANTIZATION_FACTOR`.
    /// - Boolean results contain T-junctions where faces were split, so this
    ///   is meant for primitive solids, not CSG output.
    pub fn is_manifold(&self) -> bool {
        let mut edge_counts: HashMap<(QuantizedPoint, QuantizedPoint), u32> = HashMap::new();

        for [a, b, c] in self.triangles() {
            let (a, b, c) = (quantize_point(&a), quantize_point(&b), quantize_point(&c));
            for (p0, p1) in [(a, b), (b, c), (c, a)] {
                if p0 == p1 {
                    return false;
                }
                *edge_counts.entry((p0, p1)).or_insert(0) += 1;
            }
        }

        edge_counts
            .iter()
            .all(|(&(p0, p1), &count)| count == 1 && edge_counts.get(&(p1, p0)) == Some(&1))
    }
}
