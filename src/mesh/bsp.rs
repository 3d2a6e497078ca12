//! [BSP](https://en.wikipedia.org/wiki/Binary_space_partitioning) tree node structure and operations

use crate::float_types::Real;
use crate::mesh::plane::{BACK, COPLANAR, FRONT, Plane};
use crate::mesh::polygon::Polygon;

/// A BSP tree node, containing polygons plus optional front/back subtrees
#[derive(Debug, Clone, Default)]
pub struct Node {
    /// Splitting plane for this node *or* **None** for a leaf that
    /// only stores polygons.
    pub plane: Option<Plane>,

    /// Polygons in *front* half‑spaces.
    pub front: Option<Box<Node>>,

    /// Polygons in *back* half‑spaces.
    pub back: Option<Box<Node>>,

    /// Polygons that lie *exactly* on `plane`
    /// (after the node has been built).
    pub polygons: Vec<Polygon>,
}

impl Node {
    /// Create a new empty BSP node
    pub const fn new() -> Self {
        Self {
            plane: None,
            front: None,
            back: None,
            polygons: Vec::new(),
        }
    }

    /// Creates a new BSP node from polygons
    pub fn from_polygons(polygons: &[Polygon]) -> Self {
        let mut node = Self::new();
        if !polygons.is_empty() {
            node.build(polygons);
        }
        node
    }

    /// Convert solid space to empty space and empty space to solid space.
    pub fn invert(&mut self) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            node.polygons.iter_mut().for_each(Polygon::flip);
            if let Some(plane) = node.plane.as_mut() {
                plane.flip();
            }
            std::mem::swap(&mut node.front, &mut node.back);
            if let Some(front) = node.front.as_deref_mut() {
                stack.push(front);
            }
            if let Some(back) = node.back.as_deref_mut() {
                stack.push(back);
            }
        }
    }

    /// Choose a splitting plane among the first polygons, trading off the number
    /// of polygons it would split against front/back balance.
    fn pick_best_splitting_plane(polygons: &[Polygon]) -> Plane {
        const K_SPANS: Real = 8.0;
        const K_BALANCE: Real = 1.0;

        let mut best_plane = polygons[0].plane.clone();
        let mut best_score = Real::MAX;

        for candidate in polygons.iter().take(20) {
            let plane = &candidate.plane;
            let (mut num_front, mut num_back, mut num_spanning) = (0i64, 0i64, 0i64);

            for poly in polygons {
                match plane.classify_polygon(poly) {
                    COPLANAR => {},
                    FRONT => num_front += 1,
                    BACK => num_back += 1,
                    _ => num_spanning += 1,
                }
            }

            let score = K_SPANS * num_spanning as Real
                + K_BALANCE * ((num_front - num_back) as Real).abs();
            if score < best_score {
                best_score = score;
                best_plane = plane.clone();
            }
        }
        best_plane
    }

    /// Remove all polygons in `polygons` that are inside this BSP tree.
    pub fn clip_polygons(&self, polygons: &[Polygon]) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack = vec![(self, polygons.to_vec())];

        while let Some((node, polys)) = stack.pop() {
            let Some(plane) = node.plane.as_ref() else {
                result.extend(polys);
                continue;
            };

            let mut front_polys = Vec::with_capacity(polys.len());
            let mut back_polys = Vec::with_capacity(polys.len());

            for polygon in &polys {
                let (coplanar_front, coplanar_back, front_parts, back_parts) =
                    plane.split_polygon(polygon);
                front_polys.extend(coplanar_front);
                front_polys.extend(front_parts);
                back_polys.extend(coplanar_back);
                back_polys.extend(back_parts);
            }

            match &node.front {
                Some(front_node) if !front_polys.is_empty() => {
                    stack.push((&**front_node, front_polys))
                },
                Some(_) => {},
                None => result.extend(front_polys),
            }

            // Without a back child everything behind the plane is solid.
            if let Some(back_node) = &node.back {
                if !back_polys.is_empty() {
                    stack.push((&**back_node, back_polys));
                }
            }
        }
        result
    }

    /// Remove all polygons in this BSP tree that are inside the other BSP tree
    pub fn clip_to(&mut self, bsp: &Node) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            node.polygons = bsp.clip_polygons(&node.polygons);
            if let Some(front) = node.front.as_deref_mut() {
                stack.push(front);
            }
            if let Some(back) = node.back.as_deref_mut() {
                stack.push(back);
            }
        }
    }

    /// Return all polygons in this BSP tree
    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            result.extend_from_slice(&node.polygons);
            stack.extend(
                [&node.front, &node.back]
                    .into_iter()
                    .filter_map(|child| child.as_deref()),
            );
        }
        result
    }

    /// Build a BSP tree from the given polygons. Calling it on an existing tree
    /// filters the new polygons down into it.
    pub fn build(&mut self, polygons: &[Polygon]) {
        if polygons.is_empty() {
            return;
        }

        let mut stack = vec![(self, polygons.to_vec())];

        while let Some((node, polys)) = stack.pop() {
            if polys.is_empty() {
                continue;
            }

            let plane = node
                .plane
                .get_or_insert_with(|| Self::pick_best_splitting_plane(&polys))
                .clone();

            let mut front = Vec::with_capacity(polys.len() / 2);
            let mut back = Vec::with_capacity(polys.len() / 2);

            for polygon in &polys {
                let (coplanar_front, coplanar_back, front_parts, back_parts) =
                    plane.split_polygon(polygon);
                node.polygons.extend(coplanar_front);
                node.polygons.extend(coplanar_back);
                front.extend(front_parts);
                back.extend(back_parts);
            }

            if !front.is_empty() {
                let front_node = node.front.get_or_insert_with(|| Box::new(Node::new()));
                stack.push((front_node.as_mut(), front));
            }
            if !back.is_empty() {
                let back_node = node.back.get_or_insert_with(|| Box::new(Node::new()));
                stack.push((back_node.as_mut(), back));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Node;
    use crate::mesh::polygon::Polygon;
    use nalgebra::Point3;

    fn triangle(z: f64) -> Polygon {
        Polygon::from_points(&[
            Point3::new(0.0, 0.0, z),
            Point3::new(1.0, 0.0, z),
            Point3::new(0.5, 1.0, z),
        ])
        .expect("valid triangle")
    }

    #[test]
    fn build_keeps_every_polygon() {
        let node = Node::from_polygons(&[triangle(0.0), triangle(1.0), triangle(-1.0)]);
        assert_eq!(node.all_polygons().len(), 3);
    }

    #[test]
    fn invert_twice_is_identity() {
        let mut node = Node::from_polygons(&[triangle(0.0), triangle(2.0)]);
        let before = node.all_polygons();
        node.invert();
        node.invert();
        let after = node.all_polygons();
        assert_eq!(before.len(), after.len());
        for p in &before {
            assert!(after.contains(p));
        }
    }
}
