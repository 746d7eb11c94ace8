//! The chunk provider: turns chunk coordinates into finished chunks, then decorates them.
//!
//! Generation happens in two phases. [`ChunkProvider::provide_chunk`] builds the terrain of a single column
//! from scratch. [`ChunkProvider::populate`] decorates a column that is already in a [`ChunkStore`], once the
//! owning world decides its neighbours exist.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::biome::{
    BiomeBuffer, BiomeGenerationSettings, BiomeGenerator, BiomeId, BiomeRegistry, ImmutableBiomeArea,
    SpawnEntry,
};
use crate::chunk::{Chunk, ChunkPrimer, ChunkStore};
use crate::coords::{ChunkCoordinate, CHUNK_SIZE_USIZE};
use crate::error::{ConfigurationError, GenerationError, GenerationResult, Phase};
use crate::generation::{GenerationContext, GeneratorPopulator, Populator, PopulatorFlags, WorldSettings};
use crate::random::JavaRandom;
use crate::util::IVec3;
use crate::volume::{BlockVolumeBuffer, MutableBlockVolume};

#[cfg(test)]
mod tests;

/// Gets told about every `populate` call. Observers can look, but what they're handed has already been
/// decided: the populators run regardless of what an observer does.
pub trait PopulateObserver: Send + Sync {
    /// Called with the resolved populator list right before it runs.
    fn pre_populate(&self, _chunk: &Chunk, _populators: &[Arc<dyn Populator>]) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called after every populator ran and the chunk was marked populated.
    fn post_populate(&self, _chunk: &Chunk) -> anyhow::Result<()> {
        Ok(())
    }
}

struct ProviderConfig {
    base: Arc<dyn GeneratorPopulator>,
    generator_populators: Vec<Arc<dyn GeneratorPopulator>>,
    populators: Vec<Arc<dyn Populator>>,
    biome_generator: Arc<dyn BiomeGenerator>,
    overrides: HashMap<BiomeId, BiomeGenerationSettings>,
}

pub struct ChunkProvider {
    ctx: GenerationContext,
    registry: BiomeRegistry,
    config: RwLock<ProviderConfig>,
    cached_biomes: Mutex<BiomeBuffer>,
    observers: Vec<Arc<dyn PopulateObserver>>,
}

impl ChunkProvider {
    pub fn new(
        world: WorldSettings,
        base: Arc<dyn GeneratorPopulator>,
        biome_generator: Arc<dyn BiomeGenerator>,
        registry: BiomeRegistry,
    ) -> Result<Self, ConfigurationError> {
        if registry.is_empty() {
            return Err(ConfigurationError::EmptyRegistry);
        }

        Ok(Self {
            ctx: GenerationContext::new(world)?,
            registry,
            config: RwLock::new(ProviderConfig {
                base,
                generator_populators: Vec::new(),
                populators: Vec::new(),
                biome_generator,
                overrides: HashMap::new(),
            }),
            cached_biomes: Mutex::new(BiomeBuffer::for_chunk()),
            observers: Vec::new(),
        })
    }

    /// Attach an observer that gets notified around every `populate` call.
    pub fn with_observer(mut self, observer: Arc<dyn PopulateObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn add_observer(&mut self, observer: Arc<dyn PopulateObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub fn context(&self) -> &GenerationContext {
        &self.ctx
    }

    #[inline]
    pub fn registry(&self) -> &BiomeRegistry {
        &self.registry
    }

    // Generation never leaves the configuration half-written, so a poisoned lock is still usable.
    fn read_config(&self) -> RwLockReadGuard<'_, ProviderConfig> {
        self.config.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_config(&self) -> RwLockWriteGuard<'_, ProviderConfig> {
        self.config.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn base_generator(&self) -> Arc<dyn GeneratorPopulator> {
        Arc::clone(&self.read_config().base)
    }

    pub fn set_base_generator(&self, base: Arc<dyn GeneratorPopulator>) {
        log::info!("replacing base generator with {}", base.name());
        self.write_config().base = base;
    }

    /// Terrain stages run after the base generator, in order.
    pub fn generator_populators(&self) -> Vec<Arc<dyn GeneratorPopulator>> {
        self.read_config().generator_populators.clone()
    }

    pub fn set_generator_populators(&self, stages: Vec<Arc<dyn GeneratorPopulator>>) {
        log::info!("replacing generator populators ({} stages)", stages.len());
        self.write_config().generator_populators = stages;
    }

    pub fn add_generator_populator(&self, stage: Arc<dyn GeneratorPopulator>) {
        self.write_config().generator_populators.push(stage);
    }

    /// Decoration stages run before the biome's own populators, in order.
    pub fn populators(&self) -> Vec<Arc<dyn Populator>> {
        self.read_config().populators.clone()
    }

    pub fn set_populators(&self, stages: Vec<Arc<dyn Populator>>) {
        log::info!("replacing populators ({} stages)", stages.len());
        self.write_config().populators = stages;
    }

    pub fn add_populator(&self, stage: Arc<dyn Populator>) {
        self.write_config().populators.push(stage);
    }

    pub fn biome_generator(&self) -> Arc<dyn BiomeGenerator> {
        Arc::clone(&self.read_config().biome_generator)
    }

    pub fn set_biome_generator(&self, biome_generator: Arc<dyn BiomeGenerator>) {
        log::info!("replacing biome generator");
        self.write_config().biome_generator = biome_generator;
    }

    pub fn biome_override(&self, biome: BiomeId) -> Option<BiomeGenerationSettings> {
        self.read_config().overrides.get(&biome).cloned()
    }

    pub fn is_biome_overridden(&self, biome: BiomeId) -> bool {
        self.read_config().overrides.contains_key(&biome)
    }

    /// Use `settings` instead of the biome's own defaults wherever the biome shows up.
    pub fn set_biome_override(
        &self,
        biome: BiomeId,
        settings: BiomeGenerationSettings,
    ) -> Result<(), ConfigurationError> {
        self.registry.require(biome)?;

        log::info!("overriding generation settings of biome {biome}");
        self.write_config().overrides.insert(biome, settings);
        Ok(())
    }

    /// Set several overrides at once. Nothing is changed if any of the biomes is unknown.
    pub fn set_biome_overrides<I>(&self, overrides: I) -> Result<(), ConfigurationError>
    where
        I: IntoIterator<Item = (BiomeId, BiomeGenerationSettings)>,
    {
        let overrides = overrides.into_iter().collect::<Vec<_>>();
        for (biome, _) in &overrides {
            self.registry.require(*biome)?;
        }

        log::info!("overriding generation settings of {} biomes", overrides.len());
        self.write_config().overrides.extend(overrides);
        Ok(())
    }

    pub fn remove_biome_override(&self, biome: BiomeId) -> Option<BiomeGenerationSettings> {
        self.write_config().overrides.remove(&biome)
    }

    /// Generate the terrain of a chunk. This uses the provider's own biome buffer, so concurrent calls
    /// on the same provider wait for each other. Use [`ChunkProvider::provide_chunk_with_buffer`] to
    /// generate in parallel.
    pub fn provide_chunk(&self, coord: ChunkCoordinate) -> GenerationResult<Chunk> {
        let mut buffer = self
            .cached_biomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        self.provide_chunk_with_buffer(coord, &mut buffer)
    }

    /// Generate the terrain of the chunk containing a block position (worldspace).
    pub fn provide_chunk_at(&self, pos: IVec3) -> GenerationResult<Chunk> {
        self.provide_chunk(ChunkCoordinate::containing(pos))
    }

    /// Generate the terrain of a chunk using the caller's biome buffer, which must cover exactly one chunk.
    pub fn provide_chunk_with_buffer(
        &self,
        coord: ChunkCoordinate,
        buffer: &mut BiomeBuffer,
    ) -> GenerationResult<Chunk> {
        if buffer.width() != CHUNK_SIZE_USIZE || buffer.depth() != CHUNK_SIZE_USIZE {
            return Err(ConfigurationError::BufferSizeMismatch {
                width: buffer.width(),
                depth: buffer.depth(),
            }
            .into());
        }

        let config = self.read_config();

        buffer.reuse(coord.block_origin());
        config
            .biome_generator
            .generate_biomes(buffer)
            .map_err(|source| GenerationError::Stage {
                coord,
                phase: Phase::Terrain,
                stage: "biome generator".to_owned(),
                source,
            })?;

        let biomes = buffer.immutable_copy()?;
        let mut primer = ChunkPrimer::new(self.ctx.bounds(), self.ctx.default_block());

        {
            let mut volume = BlockVolumeBuffer::new(&mut primer, coord);

            self.run_terrain_stage(coord, &config.base, &mut volume, &biomes)?;
            for stage in &config.generator_populators {
                self.run_terrain_stage(coord, stage, &mut volume, &biomes)?;
            }

            let unique = buffer.unique_biomes()?;
            for biome in &unique {
                let stages = match config.overrides.get(biome) {
                    Some(settings) => settings.generator_populators(),
                    None => self
                        .registry
                        .require(*biome)?
                        .generation_settings()
                        .generator_populators(),
                };

                for stage in stages {
                    self.run_terrain_stage(coord, stage, &mut volume, &biomes)?;
                }
            }

            log::debug!("generated terrain of chunk {coord} ({} unique biomes)", unique.len());
        }

        let chunk = Chunk::from_primer(coord, primer, buffer.detach()?)?;
        Ok(chunk)
    }

    fn run_terrain_stage(
        &self,
        coord: ChunkCoordinate,
        stage: &Arc<dyn GeneratorPopulator>,
        volume: &mut dyn MutableBlockVolume,
        biomes: &ImmutableBiomeArea,
    ) -> GenerationResult<()> {
        log::trace!("running terrain stage {} on chunk {coord}", stage.name());

        stage
            .populate(&self.ctx, volume, biomes)
            .map_err(|source| GenerationError::Stage {
                coord,
                phase: Phase::Terrain,
                stage: stage.name().to_owned(),
                source,
            })
    }

    /// The populators that will decorate a chunk whose dominant biome is `biome`: the global populators
    /// followed by the biome's override, or its defaults if there is no override.
    pub fn resolve_populators(&self, biome: BiomeId) -> GenerationResult<Vec<Arc<dyn Populator>>> {
        self.resolve_with(&self.read_config(), biome)
    }

    fn resolve_with(
        &self,
        config: &ProviderConfig,
        biome: BiomeId,
    ) -> GenerationResult<Vec<Arc<dyn Populator>>> {
        let biome_populators = match config.overrides.get(&biome) {
            Some(settings) => settings.populators(),
            None => self
                .registry
                .require(biome)?
                .generation_settings()
                .populators(),
        };

        Ok(config
            .populators
            .iter()
            .chain(biome_populators)
            .cloned()
            .collect())
    }

    /// Decorate a chunk that's already in the store.
    ///
    /// The chunk is taken out of the store while its populators run, they can still look at its
    /// neighbours through the store. If a populator fails the half-decorated chunk is dropped and has to
    /// be generated again.
    pub fn populate(&self, store: &mut dyn ChunkStore, coord: ChunkCoordinate) -> GenerationResult<()> {
        let mut chunk = store
            .remove(coord)
            .ok_or(GenerationError::ChunkNotFound(coord))?;

        if chunk.is_populated() {
            store.insert(chunk);
            return Err(GenerationError::AlreadyPopulated(coord));
        }

        self.populate_chunk(&*store, &mut chunk)?;
        store.insert(chunk);

        Ok(())
    }

    /// Decorate the chunk containing a block position (worldspace).
    pub fn populate_at(&self, store: &mut dyn ChunkStore, pos: IVec3) -> GenerationResult<()> {
        self.populate(store, ChunkCoordinate::containing(pos))
    }

    fn populate_chunk(&self, store: &dyn ChunkStore, chunk: &mut Chunk) -> GenerationResult<()> {
        let coord = chunk.coord();
        let mut rng = JavaRandom::for_chunk(coord);

        // Held for the whole call so the configuration can't change halfway through.
        let config = self.read_config();
        let populators = self.resolve_with(&config, chunk.dominant_biome())?;

        for observer in &self.observers {
            if let Err(error) = observer.pre_populate(chunk, &populators) {
                log::warn!("pre-populate observer failed on chunk {coord}: {error}");
            }
        }

        let mut flags = PopulatorFlags::new();
        for populator in &populators {
            log::trace!("running populator {} on chunk {coord}", populator.name());

            populator
                .populate_flagged(&self.ctx, store, chunk, &mut rng, &mut flags)
                .map_err(|source| GenerationError::Stage {
                    coord,
                    phase: Phase::Decoration,
                    stage: populator.name().to_owned(),
                    source,
                })?;
        }

        chunk.recalculate_height_map();
        chunk.mark_populated();

        log::debug!(
            "populated chunk {coord} ({} populators, flags: {:?})",
            populators.len(),
            flags.iter().collect::<Vec<_>>()
        );

        for observer in &self.observers {
            if let Err(error) = observer.post_populate(chunk) {
                log::warn!("post-populate observer failed on chunk {coord}: {error}");
            }
        }

        Ok(())
    }

    /// Creatures that may spawn at a block position, going by the biome the position is in.
    /// `None` if the chunk holding the position isn't in the store.
    pub fn possible_creatures<'a>(&'a self, store: &dyn ChunkStore, pos: IVec3) -> Option<&'a [SpawnEntry]> {
        let chunk = store.get(ChunkCoordinate::containing(pos))?;
        let biome = chunk.biome_ws(pos.x, pos.z)?;

        self.registry.get(biome).map(|biome| biome.spawns())
    }
}
