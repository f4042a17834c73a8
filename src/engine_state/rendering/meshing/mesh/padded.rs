//! The padded reachability map.
//!
//! A dense cube of visited flags over a chunk grown by one cell on every
//! side. Padded coordinate `p` corresponds to real voxel `p - 1`, so the
//! outer ring stands for the air around the chunk.

use bitvec::prelude::BitVec;
use cgmath::{Point3, Vector3};

/// Visited flags over a `dimension³` padded coordinate space.
///
/// Storage is one flat bit vector indexed `x + y * dimension + z * dimension²`,
/// zeroed on construction.
pub struct PaddedArray {
    dimension: usize,
    cells: BitVec,
}

impl PaddedArray {
    /// Creates a map with every cell unvisited.
    pub fn new(dimension: usize) -> Self {
        let volume = dimension * dimension * dimension;
        let mut cells = BitVec::with_capacity(volume);
        cells.resize(volume, false);
        PaddedArray { dimension, cells }
    }

    /// Edge length of the padded space.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    fn index(&self, cell: Point3<usize>) -> usize {
        debug_assert!(self.contains(cell));
        cell.x + cell.y * self.dimension + cell.z * self.dimension * self.dimension
    }

    /// Whether `cell` lies inside the padded space.
    #[inline]
    pub fn contains(&self, cell: Point3<usize>) -> bool {
        cell.x < self.dimension && cell.y < self.dimension && cell.z < self.dimension
    }

    /// The neighbour of `cell` one step along `step`, or `None` when that
    /// neighbour falls outside the padded space.
    #[inline]
    pub fn step(&self, cell: Point3<usize>, step: Vector3<i32>) -> Option<Point3<usize>> {
        let x = cell.x.checked_add_signed(step.x as isize)?;
        let y = cell.y.checked_add_signed(step.y as isize)?;
        let z = cell.z.checked_add_signed(step.z as isize)?;
        let neighbour = Point3::new(x, y, z);
        self.contains(neighbour).then_some(neighbour)
    }

    /// Reads the flag at `cell`. `cell` must be inside the padded space.
    #[inline]
    pub fn get(&self, cell: Point3<usize>) -> bool {
        self.cells[self.index(cell)]
    }

    /// Writes the flag at `cell`. `cell` must be inside the padded space.
    #[inline]
    pub fn set(&mut self, cell: Point3<usize>, value: bool) {
        let index = self.index(cell);
        self.cells.set(index, value);
    }

    /// Number of cells currently flagged.
    pub fn count_set(&self) -> usize {
        self.cells.count_ones()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_cleared() {
        let map = PaddedArray::new(5);
        assert_eq!(map.count_set(), 0);
        assert!(!map.get(Point3::new(4, 4, 4)));
    }

    #[test]
    fn set_and_get_are_independent_per_cell() {
        let mut map = PaddedArray::new(4);
        map.set(Point3::new(1, 2, 3), true);
        assert!(map.get(Point3::new(1, 2, 3)));
        assert!(!map.get(Point3::new(3, 2, 1)));
        assert_eq!(map.count_set(), 1);
    }

    #[test]
    fn step_stays_in_bounds() {
        let map = PaddedArray::new(3);
        let corner = Point3::new(0, 0, 0);
        assert_eq!(map.step(corner, Vector3::new(-1, 0, 0)), None);
        assert_eq!(map.step(corner, Vector3::new(0, 0, 1)), Some(Point3::new(0, 0, 1)));
        assert_eq!(map.step(Point3::new(2, 1, 1), Vector3::new(1, 0, 0)), None);
    }
}
