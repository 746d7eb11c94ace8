use serde::{Deserialize, Serialize};

use crate::util::{IVec2, IVec3};

/// X and Z dimensions of chunks (taken from Minecraft)
pub const CHUNK_SIZE: i32 = 16;
pub const CHUNK_SIZE_USIZE: usize = CHUNK_SIZE as usize;

/// Number of columns in a chunk footprint.
pub const CHUNK_AREA: usize = CHUNK_SIZE_USIZE * CHUNK_SIZE_USIZE;

/// Identifies a 16x16 column of the world.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoordinate {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoordinate {
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The chunk containing the given block position (worldspace).
    #[inline]
    pub fn containing(pos: IVec3) -> Self {
        Self::new(pos.x >> 4, pos.z >> 4)
    }

    /// World-space (x, z) of this chunk's lowest corner.
    #[inline]
    pub fn block_origin(self) -> IVec2 {
        na::vector![self.x.wrapping_mul(CHUNK_SIZE), self.z.wrapping_mul(CHUNK_SIZE)]
    }

    /// Returns the (x, z) offset of a world-space position inside this chunk, or `None` if it lies
    /// outside of this chunk's footprint.
    #[inline]
    pub fn local(self, world_x: i32, world_z: i32) -> Option<(usize, usize)> {
        let origin = self.block_origin();
        let lx = world_x - origin.x;
        let lz = world_z - origin.y;

        if (0..CHUNK_SIZE).contains(&lx) && (0..CHUNK_SIZE).contains(&lz) {
            Some((lx as usize, lz as usize))
        } else {
            None
        }
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self::new(self.x.wrapping_add(dx), self.z.wrapping_add(dz))
    }
}

impl std::fmt::Display for ChunkCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.z)
    }
}

impl From<IVec2> for ChunkCoordinate {
    fn from(v: IVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<ChunkCoordinate> for IVec2 {
    fn from(c: ChunkCoordinate) -> Self {
        na::vector![c.x, c.z]
    }
}
