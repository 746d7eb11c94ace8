use crate::biome::BiomeId;
use crate::block::BlockId;
use crate::coords::{ChunkCoordinate, CHUNK_AREA, CHUNK_SIZE_USIZE};
use crate::error::{BoundsError, ConfigurationError};
use crate::util::{boxes_overlap, IVec3};
use crate::volume::{BlockVolume, Bounds3D, MutableBlockVolume};

use super::basic::ChunkPrimer;

/// How far along a column is. A column that doesn't exist yet is simply not generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChunkStatus {
    TerrainGenerated,
    Populated,
}

/// Something a decoration stage placed in a chunk, with the worldspace box `[min, max)` it occupies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureMarker {
    pub kind: String,
    pub min: IVec3,
    pub max: IVec3,
}

impl FeatureMarker {
    pub fn new(kind: impl Into<String>, min: IVec3, max: IVec3) -> Self {
        Self {
            kind: kind.into(),
            min,
            max,
        }
    }

    #[inline]
    pub fn overlaps(&self, min: IVec3, max: IVec3) -> bool {
        boxes_overlap(self.min, self.max, min, max)
    }
}

/// A creature seeded into the chunk during decoration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntitySpawn {
    pub entity: String,
    pub pos: IVec3,
}

/// A fully generated chunk column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    coord: ChunkCoordinate,
    blocks: ChunkPrimer,
    biomes: Box<[BiomeId]>,
    height_map: Box<[i32]>,
    status: ChunkStatus,
    features: Vec<FeatureMarker>,
    entities: Vec<EntitySpawn>,
}

impl Chunk {
    /// Assemble a chunk from generated terrain and the biome array of its footprint (indexed `z * 16 + x`).
    pub fn from_primer(
        coord: ChunkCoordinate,
        blocks: ChunkPrimer,
        biomes: Box<[BiomeId]>,
    ) -> Result<Self, ConfigurationError> {
        if biomes.len() != CHUNK_AREA {
            return Err(ConfigurationError::BiomeArrayLength {
                len: biomes.len(),
                expected: CHUNK_AREA,
            });
        }

        let mut chunk = Self {
            coord,
            blocks,
            biomes,
            height_map: vec![0; CHUNK_AREA].into_boxed_slice(),
            status: ChunkStatus::TerrainGenerated,
            features: Vec::new(),
            entities: Vec::new(),
        };
        chunk.recalculate_height_map();

        Ok(chunk)
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoordinate {
        self.coord
    }

    #[inline]
    pub fn status(&self) -> ChunkStatus {
        self.status
    }

    #[inline]
    pub fn is_populated(&self) -> bool {
        self.status == ChunkStatus::Populated
    }

    #[inline]
    pub(crate) fn mark_populated(&mut self) {
        self.status = ChunkStatus::Populated;
    }

    #[inline]
    pub fn blocks(&self) -> &ChunkPrimer {
        &self.blocks
    }

    #[inline]
    pub fn min_y(&self) -> i32 {
        self.blocks.min_y()
    }

    #[inline]
    pub fn max_y(&self) -> i32 {
        self.blocks.max_y()
    }

    #[inline]
    pub fn biome_array(&self) -> &[BiomeId] {
        &self.biomes
    }

    /// Biome at a chunk-local column.
    #[inline]
    pub fn biome_at(&self, x: usize, z: usize) -> Option<BiomeId> {
        if x < CHUNK_SIZE_USIZE && z < CHUNK_SIZE_USIZE {
            Some(self.biomes[z * CHUNK_SIZE_USIZE + x])
        } else {
            None
        }
    }

    /// Biome at the center column, which decides the decoration of the whole chunk.
    #[inline]
    pub fn dominant_biome(&self) -> BiomeId {
        let center = CHUNK_SIZE_USIZE / 2;
        self.biomes[center * CHUNK_SIZE_USIZE + center]
    }

    /// Biome at a worldspace column, `None` if it's outside of this chunk.
    #[inline]
    pub fn biome_ws(&self, x: i32, z: i32) -> Option<BiomeId> {
        let (lx, lz) = self.coord.local(x, z)?;
        self.biome_at(lx, lz)
    }

    /// The first Y above the highest non-air block in a chunk-local column.
    #[inline]
    pub fn height_at(&self, x: usize, z: usize) -> Option<i32> {
        if x < CHUNK_SIZE_USIZE && z < CHUNK_SIZE_USIZE {
            Some(self.height_map[z * CHUNK_SIZE_USIZE + x])
        } else {
            None
        }
    }

    pub fn height_ws(&self, x: i32, z: i32) -> Option<i32> {
        let (lx, lz) = self.coord.local(x, z)?;
        self.height_at(lx, lz)
    }

    pub fn recalculate_height_map(&mut self) {
        for z in 0..CHUNK_SIZE_USIZE {
            for x in 0..CHUNK_SIZE_USIZE {
                self.height_map[z * CHUNK_SIZE_USIZE + x] = match self.blocks.highest_block_y(x, z) {
                    Some(y) => y + 1,
                    None => self.min_y(),
                };
            }
        }
    }

    #[inline]
    pub fn features(&self) -> &[FeatureMarker] {
        &self.features
    }

    pub fn add_feature(&mut self, marker: FeatureMarker) {
        self.features.push(marker);
    }

    /// Whether any feature already placed in this chunk intersects the worldspace box `[min, max)`.
    pub fn overlaps_feature(&self, min: IVec3, max: IVec3) -> bool {
        self.features.iter().any(|f| f.overlaps(min, max))
    }

    #[inline]
    pub fn entities(&self) -> &[EntitySpawn] {
        &self.entities
    }

    pub fn add_entity(&mut self, entity: impl Into<String>, pos: IVec3) {
        self.entities.push(EntitySpawn {
            entity: entity.into(),
            pos,
        });
    }

    #[inline]
    fn origin(&self) -> IVec3 {
        let origin = self.coord.block_origin();
        na::vector![origin.x, 0, origin.y]
    }
}

impl Bounds3D for Chunk {
    #[inline]
    fn min(&self) -> IVec3 {
        self.origin() + self.blocks.min_cs()
    }

    #[inline]
    fn max(&self) -> IVec3 {
        self.origin() + self.blocks.max_cs()
    }
}

impl BlockVolume for Chunk {
    #[inline]
    fn block(&self, pos: IVec3) -> Result<BlockId, BoundsError> {
        self.blocks
            .get(pos - self.origin())
            .map_err(|_| self.out_of_bounds(pos))
    }
}

impl MutableBlockVolume for Chunk {
    #[inline]
    fn set_block(&mut self, pos: IVec3, block: BlockId) -> Result<BlockId, BoundsError> {
        let cs = pos - self.origin();

        match self.blocks.set(cs, block) {
            Ok(old) => Ok(old),
            Err(_) => Err(self.out_of_bounds(pos)),
        }
    }
}
