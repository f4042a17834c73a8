//! # Block Module
//!
//! Per-voxel data for the mesher. A voxel is either solid or empty; the
//! mesher never needs anything richer than that.

pub mod block_side;

/// Occupancy state of a single voxel.
///
/// The numeric values match the `1 = solid, 0 = empty` encoding used by
/// occupancy grids handed to the mesher.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Occupancy {
    /// Open air. Flood fill travels through empty voxels.
    #[default]
    Empty = 0,

    /// Solid matter. Faces are emitted where solid voxels border reachable air.
    Solid = 1,
}

impl Occupancy {
    /// Returns `true` for [`Occupancy::Solid`].
    #[inline]
    pub fn is_solid(self) -> bool {
        self == Occupancy::Solid
    }
}

impl From<bool> for Occupancy {
    fn from(solid: bool) -> Self {
        if solid {
            Occupancy::Solid
        } else {
            Occupancy::Empty
        }
    }
}
