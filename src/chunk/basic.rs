use crate::block::BlockId;
use crate::coords::{CHUNK_SIZE, CHUNK_SIZE_USIZE};
use crate::error::ConfigurationError;
use crate::util::IVec3;

use super::section::ChunkSection;

/// Vertical extent of a chunk column, always a whole number of sections.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VerticalBounds {
    min_y: i32,
    max_y: i32,
}

impl VerticalBounds {
    /// Bounds are rounded outwards to the nearest multiple of the section size, so
    /// `-62..338` becomes `-64..352`.
    pub fn try_new(min_y: i32, max_y: i32) -> Result<Self, ConfigurationError> {
        if min_y >= max_y {
            return Err(ConfigurationError::InvalidWorldHeight { min_y, max_y });
        }

        let min_y = min_y.div_euclid(CHUNK_SIZE) * CHUNK_SIZE;
        let max_y = (max_y + CHUNK_SIZE - 1).div_euclid(CHUNK_SIZE) * CHUNK_SIZE;

        Ok(Self { min_y, max_y })
    }

    #[inline]
    pub fn min_y(&self) -> i32 {
        self.min_y
    }

    #[inline]
    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    #[inline]
    pub fn abs_height(&self) -> i32 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn sections(&self) -> usize {
        (self.abs_height() / CHUNK_SIZE) as usize
    }

    #[inline]
    pub fn contains_y(&self, y: i32) -> bool {
        self.min_y <= y && y < self.max_y
    }
}

/// Scratch storage for one chunk column while its terrain is being generated.
/// Positions are chunkspace: x and z in `0..16`, y in `min_y..max_y`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkPrimer {
    pub(super) sections: Vec<ChunkSection>,
    pub(super) bounds: VerticalBounds,
    pub(super) default: BlockId,
}

impl ChunkPrimer {
    pub fn new(bounds: VerticalBounds, default: BlockId) -> Self {
        let sections = vec![ChunkSection::new_uninitialized(default); bounds.sections()];

        debug_assert!(sections.len() * CHUNK_SIZE_USIZE == bounds.abs_height() as usize);

        Self {
            sections,
            bounds,
            default,
        }
    }

    pub fn try_new(min_y: i32, max_y: i32, default: BlockId) -> Result<Self, ConfigurationError> {
        Ok(Self::new(VerticalBounds::try_new(min_y, max_y)?, default))
    }

    #[inline]
    pub fn bounds(&self) -> VerticalBounds {
        self.bounds
    }

    #[inline]
    pub fn min_y(&self) -> i32 {
        self.bounds.min_y()
    }

    #[inline]
    pub fn max_y(&self) -> i32 {
        self.bounds.max_y()
    }

    #[inline]
    pub fn abs_height(&self) -> i32 {
        self.bounds.abs_height()
    }

    #[inline]
    pub fn default_id(&self) -> BlockId {
        self.default
    }

    #[inline]
    pub fn sections(&self) -> &[ChunkSection] {
        &self.sections
    }

    #[inline]
    pub(super) fn chunk_y_to_index_y(&self, y: i32) -> usize {
        (y - self.min_y()) as usize
    }

    /// Chunkspace minimum corner (inclusive).
    #[inline]
    pub fn min_cs(&self) -> IVec3 {
        na::vector![0, self.min_y(), 0]
    }

    /// Chunkspace maximum corner (exclusive).
    #[inline]
    pub fn max_cs(&self) -> IVec3 {
        na::vector![CHUNK_SIZE, self.max_y(), CHUNK_SIZE]
    }
}
