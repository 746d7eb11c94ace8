use crate::{biome::BiomeId, coords::ChunkCoordinate, util::IVec3};

/// Invalid setup handed to the provider or one of its collaborators. These are never transient.
#[derive(Debug, Clone, PartialEq, te::Error)]
pub enum ConfigurationError {
    #[error("invalid vertical bounds, min_y ({min_y}) must be below max_y ({max_y})")]
    InvalidWorldHeight { min_y: i32, max_y: i32 },
    #[error("biome {0} is not registered")]
    UnknownBiome(BiomeId),
    #[error("biome {0} is already registered")]
    DuplicateBiome(BiomeId),
    #[error("biome height range is inverted ({min} > {max})")]
    InvalidHeightRange { min: f32, max: f32 },
    #[error("no biomes are registered")]
    EmptyRegistry,
    #[error("biome buffer of size {width}x{depth} doesn't match a chunk footprint")]
    BufferSizeMismatch { width: usize, depth: usize },
    #[error("biome array holds {len} entries, a chunk footprint needs {expected}")]
    BiomeArrayLength { len: usize, expected: usize },
    #[error("spawn weights of biome {0} don't fit in a signed 32 bit total")]
    InvalidSpawnWeights(BiomeId),
}

/// Access to a block volume outside of the region it covers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, te::Error)]
pub struct BoundsError {
    pub pos: IVec3,
    pub min: IVec3,
    pub max: IVec3,
}

impl std::fmt::Display for BoundsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [px, py, pz]: [i32; 3] = self.pos.into();
        let [ax, ay, az]: [i32; 3] = self.min.into();
        let [bx, by, bz]: [i32; 3] = self.max.into();

        write!(
            f,
            "position ({px}, {py}, {pz}) is outside of the volume ({ax}, {ay}, {az})..({bx}, {by}, {bz})"
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, te::Error)]
pub enum BiomeBufferError {
    #[error("biome index ({x}, {z}) is outside of the {width}x{depth} buffer")]
    IndexOutOfBounds {
        x: i32,
        z: i32,
        width: usize,
        depth: usize,
    },
    #[error("biome buffer is detached, call reuse() before accessing it")]
    Detached,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Terrain,
    Decoration,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Terrain => f.write_str("terrain"),
            Self::Decoration => f.write_str("decoration"),
        }
    }
}

#[derive(Debug, te::Error)]
pub enum GenerationError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Bounds(#[from] BoundsError),
    #[error(transparent)]
    BiomeBuffer(#[from] BiomeBufferError),
    #[error("{phase} stage '{stage}' failed on chunk {coord}: {source}")]
    Stage {
        coord: ChunkCoordinate,
        phase: Phase,
        stage: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("chunk {0} is not present in the chunk store")]
    ChunkNotFound(ChunkCoordinate),
    #[error("chunk {0} has already been populated")]
    AlreadyPopulated(ChunkCoordinate),
}

pub type GenerationResult<T> = Result<T, GenerationError>;
