use crate::block::BlockId;
use crate::chunk::ChunkPrimer;
use crate::coords::ChunkCoordinate;
use crate::error::BoundsError;
use crate::util::IVec3;

use super::{BlockVolume, Bounds3D, MutableBlockVolume};

/// Worldspace view over the scratch column of the chunk being generated.
///
/// The buffer doesn't own any blocks, it borrows the primer for as long as the terrain phase runs and
/// translates worldspace positions into the primer's chunkspace.
pub struct BlockVolumeBuffer<'a> {
    primer: &'a mut ChunkPrimer,
    coord: ChunkCoordinate,
    origin: IVec3,
}

impl<'a> BlockVolumeBuffer<'a> {
    pub fn new(primer: &'a mut ChunkPrimer, coord: ChunkCoordinate) -> Self {
        let origin = coord.block_origin();

        Self {
            origin: na::vector![origin.x, 0, origin.y],
            primer,
            coord,
        }
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoordinate {
        self.coord
    }

    #[inline]
    fn to_chunkspace(&self, pos: IVec3) -> IVec3 {
        pos - self.origin
    }
}

impl<'a> Bounds3D for BlockVolumeBuffer<'a> {
    #[inline]
    fn min(&self) -> IVec3 {
        self.origin + self.primer.min_cs()
    }

    #[inline]
    fn max(&self) -> IVec3 {
        self.origin + self.primer.max_cs()
    }
}

impl<'a> BlockVolume for BlockVolumeBuffer<'a> {
    #[inline]
    fn block(&self, pos: IVec3) -> Result<BlockId, BoundsError> {
        self.primer
            .get(self.to_chunkspace(pos))
            .map_err(|_| self.out_of_bounds(pos))
    }
}

impl<'a> MutableBlockVolume for BlockVolumeBuffer<'a> {
    #[inline]
    fn set_block(&mut self, pos: IVec3, block: BlockId) -> Result<BlockId, BoundsError> {
        let cs = self.to_chunkspace(pos);

        match self.primer.set(cs, block) {
            Ok(old) => Ok(old),
            Err(_) => Err(self.out_of_bounds(pos)),
        }
    }
}
