use crate::block::BlockId;
use crate::coords::CHUNK_SIZE_USIZE;
use crate::error::BoundsError;
use crate::util::{cast_vec2, IVec3};

use super::basic::ChunkPrimer;

impl ChunkPrimer {
    #[inline]
    pub fn within_bounds_cs(&self, v: IVec3) -> bool {
        (0..CHUNK_SIZE_USIZE as i32).contains(&v.x)
            && (0..CHUNK_SIZE_USIZE as i32).contains(&v.z)
            && self.bounds.contains_y(v.y)
    }

    #[inline]
    fn out_of_bounds(&self, v: IVec3) -> BoundsError {
        BoundsError {
            pos: v,
            min: self.min_cs(),
            max: self.max_cs(),
        }
    }

    /// Splits a chunkspace position into the index of its section and the position within that section.
    #[inline]
    fn locate(&self, v: IVec3) -> Result<(usize, [usize; 3]), BoundsError> {
        if !self.within_bounds_cs(v) {
            return Err(self.out_of_bounds(v));
        }

        // Only x and z are cast, y can be negative and is taken relative to the bottom of the column.
        let index_y = self.chunk_y_to_index_y(v.y);
        let [x, z]: [usize; 2] = cast_vec2::<usize, i32>(v.xz())
            .ok_or_else(|| self.out_of_bounds(v))?
            .into();

        Ok((
            index_y / CHUNK_SIZE_USIZE,
            [x, index_y % CHUNK_SIZE_USIZE, z],
        ))
    }

    /// Get the block ID at the given position (chunkspace).
    /// Returns a [`BoundsError`] if the position is out of bounds for this column.
    #[inline]
    pub fn get(&self, v: IVec3) -> Result<BlockId, BoundsError> {
        let (section_idx, [x, y, z]) = self.locate(v)?;

        self.sections[section_idx]
            .get(x, y, z)
            .ok_or_else(|| self.out_of_bounds(v))
    }

    /// Sets the block ID at the given position (chunkspace) to the new block ID, and returns the old one.
    /// The section containing the position is initialized on demand.
    #[inline]
    pub fn set(&mut self, v: IVec3, id: BlockId) -> Result<BlockId, BoundsError> {
        let (section_idx, [x, y, z]) = self.locate(v)?;

        match self.sections[section_idx].swap(x, y, z, id) {
            Some(old) => Ok(old),
            None => Err(self.out_of_bounds(v)),
        }
    }

    /// Y of the highest non-air block in the given column, or `None` if the column is empty.
    pub fn highest_block_y(&self, x: usize, z: usize) -> Option<i32> {
        for (section_idx, section) in self.sections.iter().enumerate().rev() {
            if section.is_empty() {
                continue;
            }

            for y in (0..CHUNK_SIZE_USIZE).rev() {
                match section.get(x, y, z) {
                    Some(block) if !block.is_air() => {
                        return Some(
                            self.min_y() + (section_idx * CHUNK_SIZE_USIZE + y) as i32,
                        )
                    }
                    _ => continue,
                }
            }
        }

        None
    }
}
