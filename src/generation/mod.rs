//! Generation stages and the context they run in.
//!
//! Terrain is produced by [`GeneratorPopulator`]s writing into a block volume before a chunk exists,
//! decoration by [`Populator`]s writing into the finished [`Chunk`].

pub mod stages;
pub mod vanilla;

use serde::{Deserialize, Serialize};

use crate::biome::ImmutableBiomeArea;
use crate::block::BlockId;
use crate::chunk::{Chunk, ChunkStore, VerticalBounds};
use crate::coords::ChunkCoordinate;
use crate::error::ConfigurationError;
use crate::random::{chunk_seed, JavaRandom};
use crate::volume::MutableBlockVolume;

/// Settings of the world being generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSettings {
    pub seed: u64,
    pub min_y: i32,
    pub max_y: i32,
    /// Block every position starts out as.
    pub default_block: BlockId,
    pub sea_level: i32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            min_y: 0,
            max_y: 256,
            default_block: BlockId::AIR,
            sea_level: 63,
        }
    }
}

impl WorldSettings {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    #[inline]
    pub fn bounds(&self) -> Result<VerticalBounds, ConfigurationError> {
        VerticalBounds::try_new(self.min_y, self.max_y)
    }
}

/// Everything a stage knows about the world it's generating for. Handed to every stage invocation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GenerationContext {
    settings: WorldSettings,
    bounds: VerticalBounds,
}

impl GenerationContext {
    pub fn new(settings: WorldSettings) -> Result<Self, ConfigurationError> {
        Ok(Self {
            bounds: settings.bounds()?,
            settings,
        })
    }

    #[inline]
    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.settings.seed
    }

    #[inline]
    pub fn bounds(&self) -> VerticalBounds {
        self.bounds
    }

    #[inline]
    pub fn default_block(&self) -> BlockId {
        self.settings.default_block
    }

    #[inline]
    pub fn sea_level(&self) -> i32 {
        self.settings.sea_level
    }

    /// A random source for one stage in one chunk, derived from the world seed, the chunk and a
    /// per-stage salt so stages don't see each other's sequences.
    pub fn stage_random(&self, coord: ChunkCoordinate, salt: i64) -> JavaRandom {
        JavaRandom::new(chunk_seed(coord) ^ (self.settings.seed as i64) ^ salt)
    }
}

/// Terrain-phase stage. Writes blocks straight into the volume of the chunk being generated.
pub trait GeneratorPopulator: Send + Sync {
    fn populate(
        &self,
        ctx: &GenerationContext,
        volume: &mut dyn MutableBlockVolume,
        biomes: &ImmutableBiomeArea,
    ) -> anyhow::Result<()>;

    /// Name used in logs and errors.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Decoration-phase stage. Runs against a finished chunk with the RNG of the current `populate` call.
pub trait Populator: dc::DowncastSync {
    fn populate(
        &self,
        ctx: &GenerationContext,
        chunk: &mut Chunk,
        rng: &mut JavaRandom,
    ) -> anyhow::Result<()>;

    /// Called by the provider instead of [`Populator::populate`]. Stages that coordinate with each other
    /// through flags, or need to look at neighbouring chunks, override this.
    fn populate_flagged(
        &self,
        ctx: &GenerationContext,
        _store: &dyn ChunkStore,
        chunk: &mut Chunk,
        rng: &mut JavaRandom,
        _flags: &mut PopulatorFlags,
    ) -> anyhow::Result<()> {
        self.populate(ctx, chunk, rng)
    }

    /// Name used in logs and errors.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

dc::impl_downcast!(sync Populator);

/// Notes left by populators for the ones after them in the same `populate` call.
/// Flags keep the order they were raised in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PopulatorFlags {
    flags: Vec<String>,
}

impl PopulatorFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise a flag. Raising a flag twice keeps the first position.
    pub fn raise(&mut self, flag: impl Into<String>) {
        let flag = flag.into();
        if !self.contains(&flag) {
            self.flags.push(flag);
        }
    }

    #[inline]
    pub fn contains(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    /// Whether any flag starting with `prefix` was raised.
    pub fn any_with_prefix(&self, prefix: &str) -> bool {
        self.flags.iter().any(|f| f.starts_with(prefix))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}
