//! Uniform read/write access to blocks, regardless of what's storing them.
//!
//! Terrain stages write into a [`BlockVolumeBuffer`] (a view over the scratch column of the chunk being
//! generated), decoration stages write into a finished [`Chunk`](crate::chunk::Chunk). Both are
//! addressed in worldspace.

mod buffer;

use std::cmp::{max, min};

pub use buffer::BlockVolumeBuffer;

use crate::block::BlockId;
use crate::error::BoundsError;
use crate::util::IVec3;

pub trait Bounds3D {
    /// Smallest position inside the bounds.
    fn min(&self) -> IVec3;
    /// Position just past the largest position inside the bounds.
    fn max(&self) -> IVec3;

    fn contains(&self, pos: IVec3) -> bool {
        let min = self.min();
        let max = self.max();

        min.x <= pos.x
            && pos.x < max.x
            && min.y <= pos.y
            && pos.y < max.y
            && min.z <= pos.z
            && pos.z < max.z
    }

    fn out_of_bounds(&self, pos: IVec3) -> BoundsError {
        BoundsError {
            pos,
            min: self.min(),
            max: self.max(),
        }
    }
}

pub trait BlockVolume: Bounds3D {
    fn block(&self, pos: IVec3) -> Result<BlockId, BoundsError>;
}

pub trait MutableBlockVolume: BlockVolume {
    /// Place a block and return the one it replaced.
    fn set_block(&mut self, pos: IVec3, block: BlockId) -> Result<BlockId, BoundsError>;

    /// Fill the box `[min, max)` with `block`. Fails without writing anything if the box sticks out of the volume.
    fn fill(&mut self, min: IVec3, max: IVec3, block: BlockId) -> Result<(), BoundsError> {
        if min.x >= max.x || min.y >= max.y || min.z >= max.z {
            return Ok(());
        }

        if !self.contains(min) {
            return Err(self.out_of_bounds(min));
        }

        let last = max - IVec3::repeat(1);
        if !self.contains(last) {
            return Err(self.out_of_bounds(last));
        }

        for x in min.x..max.x {
            for y in min.y..max.y {
                for z in min.z..max.z {
                    self.set_block(na::vector![x, y, z], block)?;
                }
            }
        }

        Ok(())
    }
}

impl Bounds3D for std::ops::Range<IVec3> {
    fn min(&self) -> IVec3 {
        na::vector![
            min(self.start.x, self.end.x),
            min(self.start.y, self.end.y),
            min(self.start.z, self.end.z)
        ]
    }

    fn max(&self) -> IVec3 {
        na::vector![
            max(self.start.x, self.end.x),
            max(self.start.y, self.end.y),
            max(self.start.z, self.end.z)
        ]
    }
}
