//! Occupancy lookup for the mesher.

use cgmath::Point3;

use crate::engine_state::voxels::chunk::Chunk;

/// Read-only solid/empty answers over real voxel coordinates.
///
/// The mesher only calls `is_solid` with every component in
/// `[0, chunk_size)`.
pub trait OccupancySource {
    /// Whether the voxel at `(x, y, z)` is solid.
    fn is_solid(&self, x: usize, y: usize, z: usize) -> bool;
}

impl OccupancySource for Chunk {
    #[inline]
    fn is_solid(&self, x: usize, y: usize, z: usize) -> bool {
        self.is_block_solid(x, y, z)
    }
}

impl<F> OccupancySource for F
where
    F: Fn(usize, usize, usize) -> bool,
{
    #[inline]
    fn is_solid(&self, x: usize, y: usize, z: usize) -> bool {
        self(x, y, z)
    }
}

/// Answers occupancy queries in padded coordinates.
///
/// Padded `(px, py, pz)` maps to real `(px - 1, py - 1, pz - 1)`. Anything
/// that maps outside `[0, chunk_size)` on an axis is empty, so the source is
/// never asked about a coordinate it does not have.
pub struct PaddedOccupancy<'a, S: OccupancySource + ?Sized> {
    source: &'a S,
    chunk_size: usize,
}

impl<'a, S: OccupancySource + ?Sized> PaddedOccupancy<'a, S> {
    /// Wraps `source`, a grid of `chunk_size³` voxels.
    pub fn new(source: &'a S, chunk_size: usize) -> Self {
        PaddedOccupancy { source, chunk_size }
    }

    /// The real voxel coordinate behind a padded one, if it lies in the chunk.
    #[inline]
    pub fn to_real(&self, padded: Point3<usize>) -> Option<Point3<usize>> {
        let inside = |c: usize| (1..=self.chunk_size).contains(&c);
        (inside(padded.x) && inside(padded.y) && inside(padded.z))
            .then(|| Point3::new(padded.x - 1, padded.y - 1, padded.z - 1))
    }

    /// The real coordinate of the padded cell if it holds a solid voxel.
    #[inline]
    pub fn solid_voxel(&self, padded: Point3<usize>) -> Option<Point3<usize>> {
        self.to_real(padded)
            .filter(|real| self.source.is_solid(real.x, real.y, real.z))
    }

    /// Whether the padded cell holds a solid voxel.
    #[inline]
    pub fn is_solid(&self, padded: Point3<usize>) -> bool {
        self.solid_voxel(padded).is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn padding_ring_is_empty_and_never_queried() {
        let queries = Cell::new(0);
        let source = |_x: usize, _y: usize, _z: usize| {
            queries.set(queries.get() + 1);
            true
        };
        let padded = PaddedOccupancy::new(&source, 2);

        for ring in [
            Point3::new(0, 1, 1),
            Point3::new(3, 1, 1),
            Point3::new(1, 0, 1),
            Point3::new(1, 3, 1),
            Point3::new(1, 1, 0),
            Point3::new(1, 1, 3),
        ] {
            assert!(!padded.is_solid(ring));
        }
        assert_eq!(queries.get(), 0);

        assert!(padded.is_solid(Point3::new(2, 2, 2)));
        assert_eq!(queries.get(), 1);
    }

    #[test]
    fn padded_cells_map_to_shifted_real_cells() {
        let source = |x: usize, y: usize, z: usize| (x, y, z) == (0, 1, 2);
        let padded = PaddedOccupancy::new(&source, 3);
        assert!(padded.is_solid(Point3::new(1, 2, 3)));
        assert!(!padded.is_solid(Point3::new(0, 1, 2)));
        assert_eq!(padded.to_real(Point3::new(1, 1, 1)), Some(Point3::new(0, 0, 0)));
        assert_eq!(padded.to_real(Point3::new(4, 1, 1)), None);
    }
}
