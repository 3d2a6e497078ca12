//! Occupancy grids for custom-shaped bins and baseplates.
//!
//! A [`Layout`] marks which grid cells a model covers. Cell `(0, 0)` is
//! centred on the origin and cell `(x, y)` on `(x * grid_size, y * grid_size)`.

use crate::errors::{GridfinityError, Result};
use crate::float_types::Real;
use crate::sketch::Sketch;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Occupied grid cells, indexed `cells[x][y]`.
///
/// Serialises as text rows, top row first: `#` is an occupied cell, `.` an
/// empty one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Layout {
    cells: Vec<Vec<bool>>,
}

impl Layout {
    /// Fully occupied `x_units` by `y_units` grid.
    pub fn rectangle(x_units: usize, y_units: usize) -> Self {
        Layout {
            cells: vec![vec![true; y_units]; x_units],
        }
    }

    /// Parse text rows, top row first. `#`/`x`/`X` mark occupied cells,
    /// `.`/space/`_` empty ones. Short rows are padded with empty cells.
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .collect();
        Self::from_rows(&rows)
    }

    fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let y_units = rows.len();
        let x_units = rows
            .iter()
            .map(|row| row.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        let mut cells = vec![vec![false; y_units]; x_units];
        for (row_index, row) in rows.iter().enumerate() {
            let y = y_units - 1 - row_index;
            for (x, c) in row.as_ref().chars().enumerate() {
                cells[x][y] = match c {
                    '#' | 'x' | 'X' => true,
                    '.' | ' ' | '_' => false,
                    other => {
                        return Err(GridfinityError::InvalidParameter(format!(
                            "unexpected layout character {other:?}"
                        )));
                    },
                };
            }
        }
        Ok(Layout { cells })
    }

    /// Text rows, top row first.
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.y_units())
            .rev()
            .map(|y| {
                (0..self.x_units())
                    .map(|x| if self.is_occupied(x, y) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    pub fn x_units(&self) -> usize {
        self.cells.len()
    }

    pub fn y_units(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.cells
            .get(x)
            .and_then(|column| column.get(y))
            .copied()
            .unwrap_or(false)
    }

    fn is_occupied_signed(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && self.is_occupied(x as usize, y as usize)
    }

    /// Occupied cells in column-major order.
    pub fn cells(&self) -> Vec<(usize, usize)> {
        (0..self.x_units())
            .flat_map(|x| (0..self.y_units()).map(move |y| (x, y)))
            .filter(|&(x, y)| self.is_occupied(x, y))
            .collect()
    }

    /// True when every cell of the bounding grid is occupied.
    pub fn is_rectangular(&self) -> bool {
        self.x_units() > 0 && self.y_units() > 0 && self.cells.iter().flatten().all(|&c| c)
    }

    /// Reject layouts that cannot become a single solid: no cells, cells
    /// touching only at a corner, or several disconnected islands.
    pub fn validate(&self) -> Result<()> {
        let cells = self.cells();
        let Some(&start) = cells.first() else {
            return Err(GridfinityError::EmptyLayout);
        };

        for x in 0..self.x_units().saturating_sub(1) {
            for y in 0..self.y_units().saturating_sub(1) {
                let a = self.is_occupied(x, y);
                let b = self.is_occupied(x + 1, y);
                let c = self.is_occupied(x, y + 1);
                let d = self.is_occupied(x + 1, y + 1);
                if (a && d && !b && !c) || (b && c && !a && !d) {
                    return Err(GridfinityError::InvalidParameter(format!(
                        "layout cells around ({x}, {y}) touch only at a corner"
                    )));
                }
            }
        }

        let mut seen = vec![vec![false; self.y_units()]; self.x_units()];
        let mut queue = VecDeque::from([start]);
        seen[start.0][start.1] = true;
        let mut reached = 0;
        while let Some((x, y)) = queue.pop_front() {
            reached += 1;
            let neighbours = [
                (x.wrapping_sub(1), y),
                (x + 1, y),
                (x, y.wrapping_sub(1)),
                (x, y + 1),
            ];
            for (nx, ny) in neighbours {
                if self.is_occupied(nx, ny) && !seen[nx][ny] {
                    seen[nx][ny] = true;
                    queue.push_back((nx, ny));
                }
            }
        }
        if reached != cells.len() {
            return Err(GridfinityError::InvalidParameter(
                "layout cells must form one edge-connected group".into(),
            ));
        }
        Ok(())
    }

    /// Sharp outline of the occupied cells as a sketch: one exterior ring
    /// (counter-clockwise) plus one clockwise ring per enclosed gap.
    /// Collinear points are merged.
    pub fn outline(&self, grid_size: Real) -> Result<Sketch> {
        self.validate()?;

        // Boundary edges on the corner lattice, each with its cell on the left.
        let mut next: BTreeMap<(i64, i64), (i64, i64)> = BTreeMap::new();
        for (x, y) in self.cells() {
            let (x, y) = (x as i64, y as i64);
            if !self.is_occupied_signed(x, y - 1) {
                next.insert((x, y), (x + 1, y));
            }
            if !self.is_occupied_signed(x + 1, y) {
                next.insert((x + 1, y), (x + 1, y + 1));
            }
            if !self.is_occupied_signed(x, y + 1) {
                next.insert((x + 1, y + 1), (x, y + 1));
            }
            if !self.is_occupied_signed(x - 1, y) {
                next.insert((x, y + 1), (x, y));
            }
        }

        let mut loops: Vec<Vec<(i64, i64)>> = Vec::new();
        while let Some((&start, _)) = next.iter().next() {
            let mut ring = vec![start];
            let mut current = start;
            while let Some(end) = next.remove(&current) {
                if end == start {
                    break;
                }
                ring.push(end);
                current = end;
            }
            loops.push(merge_collinear(ring));
        }

        let to_world = |ring: &[(i64, i64)]| -> Vec<Point2<Real>> {
            ring.iter()
                .map(|&(i, j)| {
                    Point2::new(
                        i as Real * grid_size - grid_size / 2.0,
                        j as Real * grid_size - grid_size / 2.0,
                    )
                })
                .collect()
        };

        let (exteriors, holes): (Vec<_>, Vec<_>) =
            loops.iter().partition(|ring| lattice_area(ring) > 0);
        let Some(exterior) = exteriors.first() else {
            return Err(GridfinityError::EmptyLayout);
        };
        let holes: Vec<Vec<Point2<Real>>> = holes.iter().map(|ring| to_world(ring)).collect();
        Ok(Sketch::from_rings(&to_world(exterior), &holes))
    }

    /// Outline moved `distance` into the material (negative grows it).
    pub fn inset_rings(&self, grid_size: Real, distance: Real) -> Result<Sketch> {
        Ok(self.outline(grid_size)?.offset_mitre(distance))
    }
}

fn merge_collinear(ring: Vec<(i64, i64)>) -> Vec<(i64, i64)> {
    let n = ring.len();
    (0..n)
        .filter(|&i| {
            let (px, py) = ring[(i + n - 1) % n];
            let (cx, cy) = ring[i];
            let (nx, ny) = ring[(i + 1) % n];
            (cx - px) * (ny - cy) - (cy - py) * (nx - cx) != 0
        })
        .map(|i| ring[i])
        .collect()
}

/// Twice the signed area of a lattice ring.
fn lattice_area(ring: &[(i64, i64)]) -> i64 {
    ring.iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(a, b)| a.0 * b.1 - b.0 * a.1)
        .sum()
}

impl TryFrom<Vec<String>> for Layout {
    type Error = GridfinityError;

    fn try_from(rows: Vec<String>) -> Result<Self> {
        Layout::from_rows(&rows)
    }
}

impl From<Layout> for Vec<String> {
    fn from(layout: Layout) -> Self {
        layout.to_rows()
    }
}
