use crate::block::BlockId;
use crate::coords::CHUNK_SIZE_USIZE;

pub const SECTION_VOLUME: usize = CHUNK_SIZE_USIZE * CHUNK_SIZE_USIZE * CHUNK_SIZE_USIZE;

type ChunkSectionStorage = Box<[BlockId; SECTION_VOLUME]>;

#[inline]
fn section_index(x: usize, y: usize, z: usize) -> usize {
    (y * CHUNK_SIZE_USIZE + z) * CHUNK_SIZE_USIZE + x
}

/// A 16x16x16 cube of voxels/blocks.
/// Storage is only allocated on the first write, until then every block reads as the default.
#[derive(Clone, Debug)]
pub struct ChunkSection {
    default: BlockId,
    volume: Option<ChunkSectionStorage>,
}

impl ChunkSection {
    #[inline]
    pub fn new_uninitialized(default: BlockId) -> Self {
        Self {
            default,
            volume: None,
        }
    }

    #[inline]
    pub fn new_initialized(default: BlockId) -> Self {
        let mut new = Self::new_uninitialized(default);
        new.initialize();
        new
    }

    #[inline]
    fn initialize(&mut self) -> &mut ChunkSectionStorage {
        let default = self.default;
        // Only fills if we're uninitialized so we avoid wiping any existing data.
        self.volume
            .get_or_insert_with(|| Box::new([default; SECTION_VOLUME]))
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.volume.is_some()
    }

    #[inline]
    pub fn default_id(&self) -> BlockId {
        self.default
    }

    #[inline]
    pub fn contains(x: usize, y: usize, z: usize) -> bool {
        x < CHUNK_SIZE_USIZE && y < CHUNK_SIZE_USIZE && z < CHUNK_SIZE_USIZE
    }

    /// Get the block at the given section-local position, `None` if it's outside of the section.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<BlockId> {
        if !Self::contains(x, y, z) {
            return None;
        }

        match self.volume {
            Some(ref v) => Some(v[section_index(x, y, z)]),
            None => Some(self.default),
        }
    }

    /// Set the block at the given section-local position and return the old one.
    /// Setting the default block in an uninitialized section doesn't allocate.
    #[inline]
    pub fn swap(&mut self, x: usize, y: usize, z: usize, id: BlockId) -> Option<BlockId> {
        if !Self::contains(x, y, z) {
            return None;
        }

        if !self.is_initialized() && id == self.default {
            return Some(self.default);
        }

        let slot = &mut self.initialize()[section_index(x, y, z)];
        Some(std::mem::replace(slot, id))
    }

    /// Whether every block in this section is air.
    pub fn is_empty(&self) -> bool {
        match self.volume {
            Some(ref v) => v.iter().all(|b| b.is_air()),
            None => self.default.is_air(),
        }
    }
}

impl std::cmp::PartialEq for ChunkSection {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        match (&self.volume, &other.volume) {
            (None, None) => self.default == other.default,
            _ => (0..SECTION_VOLUME).all(|i| {
                let (x, z, y) = (
                    i % CHUNK_SIZE_USIZE,
                    (i / CHUNK_SIZE_USIZE) % CHUNK_SIZE_USIZE,
                    i / (CHUNK_SIZE_USIZE * CHUNK_SIZE_USIZE),
                );
                self.get(x, y, z) == other.get(x, y, z)
            }),
        }
    }
}

impl Eq for ChunkSection {}
