use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::biome::{
    BiomeBuffer, BiomeGenerationSettings, BiomeGenerator, BiomeId, BiomeRegistry, BiomeType,
    ImmutableBiomeArea, SingleBiomeGenerator, SpawnEntry,
};
use crate::block::BlockId;
use crate::chunk::{Chunk, ChunkMap, ChunkStatus, ChunkStore};
use crate::coords::{ChunkCoordinate, CHUNK_AREA};
use crate::error::{ConfigurationError, GenerationError, Phase};
use crate::generation::stages::{DungeonPopulator, FlatTerrain, DUNGEON_FLAG};
use crate::generation::vanilla::{self, GeneratorSettings};
use crate::generation::{GenerationContext, GeneratorPopulator, Populator, PopulatorFlags, WorldSettings};
use crate::random::JavaRandom;
use crate::util::{boxes_overlap, IVec3};
use crate::volume::{BlockVolume, Bounds3D, MutableBlockVolume};

use super::{ChunkProvider, PopulateObserver};

const PLAINS: BiomeId = BiomeId(1);
const DESERT: BiomeId = BiomeId(2);

/// Places one block at a chunk-local position.
struct Place {
    local: IVec3,
    block: BlockId,
}

impl Place {
    fn new(local: IVec3, block: BlockId) -> Arc<Self> {
        Arc::new(Self { local, block })
    }
}

impl GeneratorPopulator for Place {
    fn populate(
        &self,
        _ctx: &GenerationContext,
        volume: &mut dyn MutableBlockVolume,
        _biomes: &ImmutableBiomeArea,
    ) -> anyhow::Result<()> {
        let min = volume.min();
        volume.set_block(na::vector![min.x, 0, min.z] + self.local, self.block)?;
        Ok(())
    }
}

struct Failing;

impl GeneratorPopulator for Failing {
    fn populate(
        &self,
        _ctx: &GenerationContext,
        _volume: &mut dyn MutableBlockVolume,
        _biomes: &ImmutableBiomeArea,
    ) -> anyhow::Result<()> {
        anyhow::bail!("terrain stage blew up")
    }
}

impl Populator for Failing {
    fn populate(
        &self,
        _ctx: &GenerationContext,
        _chunk: &mut Chunk,
        _rng: &mut JavaRandom,
    ) -> anyhow::Result<()> {
        anyhow::bail!("populator blew up")
    }
}

/// Remembers the first value it draws from the RNG and what flags it saw.
#[derive(Default)]
struct Recorder {
    draws: Mutex<Vec<i64>>,
    flags: Mutex<Vec<String>>,
}

impl Populator for Recorder {
    fn populate(
        &self,
        _ctx: &GenerationContext,
        _chunk: &mut Chunk,
        rng: &mut JavaRandom,
    ) -> anyhow::Result<()> {
        self.draws.lock().unwrap().push(rng.next_long());
        Ok(())
    }

    fn populate_flagged(
        &self,
        ctx: &GenerationContext,
        _store: &dyn ChunkStore,
        chunk: &mut Chunk,
        rng: &mut JavaRandom,
        flags: &mut PopulatorFlags,
    ) -> anyhow::Result<()> {
        self.flags
            .lock()
            .unwrap()
            .extend(flags.iter().map(str::to_owned));
        self.populate(ctx, chunk, rng)
    }
}

/// Raises a flag for the populators after it.
struct Flagger(&'static str);

impl Populator for Flagger {
    fn populate(
        &self,
        _ctx: &GenerationContext,
        _chunk: &mut Chunk,
        _rng: &mut JavaRandom,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    fn populate_flagged(
        &self,
        _ctx: &GenerationContext,
        _store: &dyn ChunkStore,
        _chunk: &mut Chunk,
        _rng: &mut JavaRandom,
        flags: &mut PopulatorFlags,
    ) -> anyhow::Result<()> {
        flags.raise(self.0);
        Ok(())
    }
}

/// Counts how many of the 8 surrounding chunks are in the store.
#[derive(Default)]
struct NeighbourCounter {
    seen: Mutex<Vec<usize>>,
}

impl Populator for NeighbourCounter {
    fn populate(
        &self,
        _ctx: &GenerationContext,
        _chunk: &mut Chunk,
        _rng: &mut JavaRandom,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    fn populate_flagged(
        &self,
        _ctx: &GenerationContext,
        store: &dyn ChunkStore,
        chunk: &mut Chunk,
        _rng: &mut JavaRandom,
        _flags: &mut PopulatorFlags,
    ) -> anyhow::Result<()> {
        let coord = chunk.coord();
        let mut count = 0;
        for dx in -1..=1 {
            for dz in -1..=1 {
                if (dx, dz) != (0, 0) && store.contains(coord.offset(dx, dz)) {
                    count += 1;
                }
            }
        }

        // The chunk being decorated isn't visible through the store.
        assert!(!store.contains(coord));
        self.seen.lock().unwrap().push(count);
        Ok(())
    }
}

#[derive(Default)]
struct Inspector {
    pre: Mutex<Vec<usize>>,
    saw_recorder: AtomicBool,
    post: Mutex<Vec<ChunkStatus>>,
}

impl PopulateObserver for Inspector {
    fn pre_populate(&self, _chunk: &Chunk, populators: &[Arc<dyn Populator>]) -> anyhow::Result<()> {
        self.pre.lock().unwrap().push(populators.len());
        if populators.iter().any(|p| p.is::<Recorder>()) {
            self.saw_recorder.store(true, Ordering::SeqCst);
        }
        Ok(())
    }

    fn post_populate(&self, chunk: &Chunk) -> anyhow::Result<()> {
        self.post.lock().unwrap().push(chunk.status());
        Ok(())
    }
}

struct BrokenObserver;

impl PopulateObserver for BrokenObserver {
    fn pre_populate(&self, _chunk: &Chunk, _populators: &[Arc<dyn Populator>]) -> anyhow::Result<()> {
        anyhow::bail!("observer is broken")
    }

    fn post_populate(&self, _chunk: &Chunk) -> anyhow::Result<()> {
        anyhow::bail!("observer is still broken")
    }
}

/// Plains put grass at local (0, 20, 0) by default, deserts sand at (1, 20, 1).
fn registry() -> BiomeRegistry {
    let mut registry = BiomeRegistry::new();
    registry
        .register(
            BiomeType::new(PLAINS, "plains", 0.8, 0.4)
                .with_settings(
                    BiomeGenerationSettings::builder()
                        .generator_populators([
                            Place::new(na::vector![0, 20, 0], BlockId::GRASS) as Arc<dyn GeneratorPopulator>
                        ])
                        .build()
                        .unwrap(),
                )
                .with_spawns(vec![SpawnEntry::new("sheep", 12, 4, 4)]),
        )
        .unwrap();
    registry
        .register(
            BiomeType::new(DESERT, "desert", 2.0, 0.0).with_settings(
                BiomeGenerationSettings::builder()
                    .generator_populators([
                        Place::new(na::vector![1, 20, 1], BlockId::SAND) as Arc<dyn GeneratorPopulator>
                    ])
                    .build()
                    .unwrap(),
            ),
        )
        .unwrap();
    registry
}

fn provider_with(biome_generator: Arc<dyn BiomeGenerator>) -> ChunkProvider {
    ChunkProvider::new(
        WorldSettings::with_seed(42),
        Arc::new(FlatTerrain::stone(16)),
        biome_generator,
        registry(),
    )
    .unwrap()
}

fn provider() -> ChunkProvider {
    provider_with(Arc::new(SingleBiomeGenerator(PLAINS)))
}

/// Plains everywhere except a desert strip at local z = 15.
struct Striped;

impl BiomeGenerator for Striped {
    fn generate_biomes(&self, buffer: &mut BiomeBuffer) -> anyhow::Result<()> {
        buffer.fill(PLAINS)?;
        for x in 0..buffer.width() as i32 {
            buffer.set_biome(x, 15, DESERT)?;
        }
        Ok(())
    }
}

fn blocks(chunk: &Chunk) -> Vec<BlockId> {
    let min = chunk.min();
    let max = chunk.max();
    let mut blocks = Vec::new();

    for x in min.x..max.x {
        for z in min.z..max.z {
            for y in min.y..max.y {
                blocks.push(chunk.block(na::vector![x, y, z]).unwrap());
            }
        }
    }

    blocks
}

#[test]
fn generation_is_deterministic() {
    let settings = GeneratorSettings::default();
    let provider = vanilla::build_provider(WorldSettings::with_seed(1234), &settings).unwrap();

    for coord in [
        ChunkCoordinate::new(0, 0),
        ChunkCoordinate::new(-7, 3),
        ChunkCoordinate::new(120, -45),
    ] {
        let first = provider.provide_chunk(coord).unwrap();
        let second = provider.provide_chunk(coord).unwrap();

        assert_eq!(first.status(), ChunkStatus::TerrainGenerated);
        assert_eq!(first, second);
    }

    // Another provider with the same configuration agrees too.
    let other = vanilla::build_provider(WorldSettings::with_seed(1234), &settings).unwrap();
    assert_eq!(
        provider.provide_chunk(ChunkCoordinate::new(5, 5)).unwrap(),
        other.provide_chunk(ChunkCoordinate::new(5, 5)).unwrap()
    );
}

#[test]
fn populating_is_deterministic() {
    let settings = GeneratorSettings::default();
    let provider = vanilla::build_provider(WorldSettings::with_seed(99), &settings).unwrap();

    let mut first = ChunkMap::new();
    let mut second = ChunkMap::new();
    for store in [&mut first, &mut second] {
        for x in 0..3 {
            let coord = ChunkCoordinate::new(x, 0);
            store.insert(provider.provide_chunk(coord).unwrap());
            provider.populate(store, coord).unwrap();
        }
    }

    for x in 0..3 {
        let coord = ChunkCoordinate::new(x, 0);
        let a = first.get(coord).unwrap();
        let b = second.get(coord).unwrap();

        assert!(a.is_populated());
        assert_eq!(a, b);
    }
}

#[test]
fn biome_array_matches_buffer() {
    let provider = provider_with(Arc::new(Striped));
    let coord = ChunkCoordinate::new(-3, 9);

    let mut buffer = BiomeBuffer::for_chunk();
    let chunk = provider.provide_chunk_with_buffer(coord, &mut buffer).unwrap();
    assert!(!buffer.is_attached());

    let mut expected = BiomeBuffer::new(coord.block_origin(), 16, 16);
    Striped.generate_biomes(&mut expected).unwrap();
    let expected = expected.detach().unwrap();

    assert_eq!(chunk.biome_array().len(), CHUNK_AREA);
    assert_eq!(chunk.biome_array(), &expected[..]);
    assert_eq!(chunk.biome_at(4, 15), Some(DESERT));
    assert_eq!(chunk.biome_at(4, 14), Some(PLAINS));
}

#[test]
fn unique_biomes_run_their_defaults() {
    let provider = provider_with(Arc::new(Striped));
    let chunk = provider.provide_chunk(ChunkCoordinate::new(2, 2)).unwrap();

    assert_eq!(chunk.block(na::vector![32, 20, 32]), Ok(BlockId::GRASS));
    assert_eq!(chunk.block(na::vector![33, 20, 33]), Ok(BlockId::SAND));
}

#[test]
fn empty_override_suppresses_defaults() {
    let coord = ChunkCoordinate::new(4, -4);

    let overridden = provider();
    overridden
        .set_biome_override(PLAINS, BiomeGenerationSettings::empty())
        .unwrap();
    assert!(overridden.is_biome_overridden(PLAINS));

    // Same base, no biome defaults at all.
    let mut bare = BiomeRegistry::new();
    bare.register(BiomeType::new(PLAINS, "plains", 0.8, 0.4))
        .unwrap();
    let base_only = ChunkProvider::new(
        WorldSettings::with_seed(42),
        Arc::new(FlatTerrain::stone(16)),
        Arc::new(SingleBiomeGenerator(PLAINS)),
        bare,
    )
    .unwrap();

    let chunk = overridden.provide_chunk(coord).unwrap();
    assert_eq!(blocks(&chunk), blocks(&base_only.provide_chunk(coord).unwrap()));
    assert_eq!(chunk.block(na::vector![64, 20, -64]), Ok(BlockId::AIR));

    // The override doesn't touch the global chain.
    overridden.add_generator_populator(Place::new(na::vector![0, 30, 0], BlockId::LOG));
    let chunk = overridden.provide_chunk(coord).unwrap();
    assert_eq!(chunk.block(na::vector![64, 30, -64]), Ok(BlockId::LOG));

    // Without the override the default comes back.
    assert!(overridden.remove_biome_override(PLAINS).is_some());
    let chunk = overridden.provide_chunk(coord).unwrap();
    assert_eq!(chunk.block(na::vector![64, 20, -64]), Ok(BlockId::GRASS));
}

#[test]
fn later_stages_win() {
    let provider = provider();
    provider.set_generator_populators(vec![
        Place::new(na::vector![5, 40, 5], BlockId::DIRT),
        Place::new(na::vector![5, 40, 5], BlockId::LOG),
    ]);

    let chunk = provider.provide_chunk(ChunkCoordinate::new(0, 0)).unwrap();
    assert_eq!(chunk.block(na::vector![5, 40, 5]), Ok(BlockId::LOG));

    // Biome defaults run after the global chain.
    provider.set_generator_populators(vec![Place::new(na::vector![0, 20, 0], BlockId::LOG)]);
    let chunk = provider.provide_chunk(ChunkCoordinate::new(0, 0)).unwrap();
    assert_eq!(chunk.block(na::vector![0, 20, 0]), Ok(BlockId::GRASS));
}

#[test]
fn populate_rng_is_seeded_from_coordinates() {
    let provider = provider();
    let recorder = Arc::new(Recorder::default());
    provider.set_populators(vec![recorder.clone()]);

    let coord = ChunkCoordinate::new(3, 4);
    let mut store = ChunkMap::new();
    store.insert(provider.provide_chunk(coord).unwrap());
    provider.populate(&mut store, coord).unwrap();

    let expected = JavaRandom::new(1_557_211_336_300).next_long();
    assert_eq!(*recorder.draws.lock().unwrap(), vec![expected]);
}

#[test]
fn flags_flow_down_the_chain() {
    let provider = provider();
    let recorder = Arc::new(Recorder::default());
    provider.set_populators(vec![
        Arc::new(Flagger("first")),
        Arc::new(Flagger("second")),
        recorder.clone(),
    ]);

    let mut store = ChunkMap::new();
    for x in 0..2 {
        let coord = ChunkCoordinate::new(x, 0);
        store.insert(provider.provide_chunk(coord).unwrap());
        provider.populate(&mut store, coord).unwrap();
    }

    // Flags don't leak from one populate call into the next.
    assert_eq!(
        *recorder.flags.lock().unwrap(),
        vec!["first", "second", "first", "second"]
    );
}

#[test]
fn repeated_dungeons_never_overlap() {
    let provider = ChunkProvider::new(
        WorldSettings::with_seed(42),
        Arc::new(FlatTerrain::stone(64)),
        Arc::new(SingleBiomeGenerator(PLAINS)),
        registry(),
    )
    .unwrap();

    let dungeons = Arc::new(DungeonPopulator::new(16));
    provider.set_populators(vec![dungeons.clone(), dungeons]);

    let mut store = ChunkMap::new();
    let mut placed = 0;
    for x in 0..8 {
        let coord = ChunkCoordinate::new(x, 1);
        store.insert(provider.provide_chunk(coord).unwrap());
        provider.populate(&mut store, coord).unwrap();

        let features = store.get(coord).unwrap().features();
        for (i, a) in features.iter().enumerate() {
            assert_eq!(a.kind, DUNGEON_FLAG);
            for b in &features[i + 1..] {
                assert!(!boxes_overlap(a.min, a.max, b.min, b.max));
            }
        }
        placed += features.len();
    }

    assert!(placed > 0);
}

#[test]
fn terrain_failure_is_fatal() {
    let provider = provider();
    provider.add_generator_populator(Arc::new(Failing));

    let error = provider.provide_chunk(ChunkCoordinate::new(1, 1)).unwrap_err();
    match error {
        GenerationError::Stage {
            coord,
            phase,
            ref stage,
            ..
        } => {
            assert_eq!(coord, ChunkCoordinate::new(1, 1));
            assert_eq!(phase, Phase::Terrain);
            assert!(stage.ends_with("Failing"));
        }
        other => panic!("unexpected error: {other}"),
    }

    // The cached buffer is still usable afterwards.
    provider.set_generator_populators(Vec::new());
    assert!(provider.provide_chunk(ChunkCoordinate::new(1, 1)).is_ok());
}

#[test]
fn decoration_failure_is_fatal() {
    let provider = provider();
    provider.set_populators(vec![Arc::new(Failing)]);

    let coord = ChunkCoordinate::new(0, 0);
    let mut store = ChunkMap::new();
    store.insert(provider.provide_chunk(coord).unwrap());

    assert!(matches!(
        provider.populate(&mut store, coord),
        Err(GenerationError::Stage {
            phase: Phase::Decoration,
            ..
        })
    ));
    // No half-decorated chunk is left behind.
    assert!(!store.contains(coord));
}

#[test]
fn populate_state_checks() {
    let provider = provider();
    let coord = ChunkCoordinate::new(8, 8);
    let mut store = ChunkMap::new();

    assert!(matches!(
        provider.populate(&mut store, coord),
        Err(GenerationError::ChunkNotFound(c)) if c == coord
    ));

    store.insert(provider.provide_chunk(coord).unwrap());
    provider.populate_at(&mut store, na::vector![130, 64, 140]).unwrap();
    assert_eq!(store.get(coord).unwrap().status(), ChunkStatus::Populated);

    assert!(matches!(
        provider.populate(&mut store, coord),
        Err(GenerationError::AlreadyPopulated(c)) if c == coord
    ));
    // Refusing doesn't lose the chunk.
    assert!(store.contains(coord));
}

#[test]
fn observers_see_resolved_populators() {
    let inspector = Arc::new(Inspector::default());
    let provider = provider().with_observer(inspector.clone());

    provider.set_populators(vec![
        Arc::new(Recorder::default()),
        Arc::new(Flagger("x")),
    ]);
    let biome_populator = Arc::new(Flagger("biome")) as Arc<dyn Populator>;
    provider
        .set_biome_override(
            PLAINS,
            BiomeGenerationSettings::builder()
                .populators([biome_populator])
                .build()
                .unwrap(),
        )
        .unwrap();

    let coord = ChunkCoordinate::new(0, 0);
    let mut store = ChunkMap::new();
    store.insert(provider.provide_chunk(coord).unwrap());
    provider.populate(&mut store, coord).unwrap();

    assert_eq!(*inspector.pre.lock().unwrap(), vec![3]);
    assert!(inspector.saw_recorder.load(Ordering::SeqCst));
    assert_eq!(*inspector.post.lock().unwrap(), vec![ChunkStatus::Populated]);
}

#[test]
fn observer_failures_are_swallowed() {
    let provider = provider().with_observer(Arc::new(BrokenObserver));
    let coord = ChunkCoordinate::new(0, 0);
    let mut store = ChunkMap::new();
    store.insert(provider.provide_chunk(coord).unwrap());

    provider.populate(&mut store, coord).unwrap();
    assert!(store.get(coord).unwrap().is_populated());
}

#[test]
fn populators_see_neighbours() {
    let provider = provider();
    let counter = Arc::new(NeighbourCounter::default());
    provider.set_populators(vec![counter.clone()]);

    let mut store = ChunkMap::new();
    for x in -1..=1 {
        for z in -1..=1 {
            store.insert(provider.provide_chunk(ChunkCoordinate::new(x, z)).unwrap());
        }
    }

    provider.populate(&mut store, ChunkCoordinate::new(0, 0)).unwrap();
    provider.populate(&mut store, ChunkCoordinate::new(1, 1)).unwrap();

    assert_eq!(*counter.seen.lock().unwrap(), vec![8, 3]);
}

#[test]
fn configuration_errors() {
    assert!(matches!(
        ChunkProvider::new(
            WorldSettings::default(),
            Arc::new(FlatTerrain::stone(16)),
            Arc::new(SingleBiomeGenerator(PLAINS)),
            BiomeRegistry::new(),
        ),
        Err(ConfigurationError::EmptyRegistry)
    ));

    let world = WorldSettings {
        min_y: 10,
        max_y: -10,
        ..WorldSettings::default()
    };
    assert!(matches!(
        ChunkProvider::new(
            world,
            Arc::new(FlatTerrain::stone(16)),
            Arc::new(SingleBiomeGenerator(PLAINS)),
            registry(),
        ),
        Err(ConfigurationError::InvalidWorldHeight { .. })
    ));

    let provider = provider();
    assert_eq!(
        provider.set_biome_override(BiomeId(77), BiomeGenerationSettings::empty()),
        Err(ConfigurationError::UnknownBiome(BiomeId(77)))
    );
    assert!(provider
        .set_biome_overrides([
            (PLAINS, BiomeGenerationSettings::empty()),
            (BiomeId(78), BiomeGenerationSettings::empty()),
        ])
        .is_err());
    // Nothing was applied.
    assert!(!provider.is_biome_overridden(PLAINS));

    let mut wide = BiomeBuffer::new(na::vector![0, 0], 32, 16);
    assert!(matches!(
        provider.provide_chunk_with_buffer(ChunkCoordinate::new(0, 0), &mut wide),
        Err(GenerationError::Configuration(
            ConfigurationError::BufferSizeMismatch { width: 32, depth: 16 }
        ))
    ));

    let mut narrow = BiomeBuffer::new(na::vector![0, 0], 8, 8);
    assert!(matches!(
        provider.provide_chunk_with_buffer(ChunkCoordinate::new(0, 0), &mut narrow),
        Err(GenerationError::Configuration(
            ConfigurationError::BufferSizeMismatch { width: 8, depth: 8 }
        ))
    ));
}

#[test]
fn worlds_below_zero_round_trip() {
    let world = WorldSettings {
        min_y: -64,
        max_y: 320,
        ..WorldSettings::with_seed(42)
    };
    let provider = ChunkProvider::new(
        world,
        Arc::new(FlatTerrain::stone(16)),
        Arc::new(SingleBiomeGenerator(PLAINS)),
        registry(),
    )
    .unwrap();

    let coord = ChunkCoordinate::new(-2, 3);
    let chunk = provider.provide_chunk(coord).unwrap();
    assert_eq!(chunk.min().y, -64);
    assert_eq!(chunk.block(na::vector![-32, -64, 48]), Ok(BlockId::BEDROCK));
    assert_eq!(chunk.block(na::vector![-17, -49, 63]), Ok(BlockId::STONE));
    assert_eq!(chunk.block(na::vector![-17, -48, 63]), Ok(BlockId::AIR));
    assert_eq!(chunk.block(na::vector![-32, 20, 48]), Ok(BlockId::GRASS));
    assert!(chunk.block(na::vector![-32, -65, 48]).is_err());

    let mut store = ChunkMap::new();
    store.insert(chunk);
    provider.populate(&mut store, coord).unwrap();
    assert!(store.get(coord).unwrap().is_populated());
}

#[test]
fn far_chunks_generate() {
    let provider = provider();

    for coord in [
        ChunkCoordinate::new(1 << 28, 0),
        ChunkCoordinate::new(-(1 << 28), 1 << 28),
    ] {
        let chunk = provider.provide_chunk(coord).unwrap();
        assert_eq!(chunk.coord(), coord);

        let mut store = ChunkMap::new();
        store.insert(chunk);
        provider.populate(&mut store, coord).unwrap();
        assert!(store.get(coord).unwrap().is_populated());
    }
}

#[test]
fn unknown_biome_from_generator_fails() {
    let provider = provider_with(Arc::new(SingleBiomeGenerator(BiomeId(200))));

    assert!(matches!(
        provider.provide_chunk(ChunkCoordinate::new(0, 0)),
        Err(GenerationError::Configuration(ConfigurationError::UnknownBiome(BiomeId(200))))
    ));
}

#[test]
fn provide_by_position() {
    let provider = provider();
    let chunk = provider.provide_chunk_at(na::vector![-1, 70, 16]).unwrap();

    assert_eq!(chunk.coord(), ChunkCoordinate::new(-1, 1));
}

#[test]
fn possible_creatures_follow_biome() {
    let provider = provider_with(Arc::new(Striped));
    let mut store = ChunkMap::new();
    store.insert(provider.provide_chunk(ChunkCoordinate::new(0, 0)).unwrap());

    let plains = provider
        .possible_creatures(&store, na::vector![3, 64, 3])
        .unwrap();
    assert_eq!(plains[0].entity, "sheep");

    let desert = provider
        .possible_creatures(&store, na::vector![3, 64, 15])
        .unwrap();
    assert!(desert.is_empty());

    assert!(provider
        .possible_creatures(&store, na::vector![100, 64, 3])
        .is_none());
}

#[test]
fn accessors_round_trip() {
    let provider = provider();

    let base = provider.base_generator();
    assert!(base.name().ends_with("FlatTerrain"));

    provider.set_base_generator(Arc::new(FlatTerrain::stone(4)));
    let chunk = provider.provide_chunk(ChunkCoordinate::new(0, 0)).unwrap();
    assert_eq!(chunk.block(na::vector![3, 8, 3]), Ok(BlockId::AIR));

    provider.add_populator(Arc::new(Flagger("a")));
    assert_eq!(provider.populators().len(), 1);
    assert!(provider.generator_populators().is_empty());

    provider.set_biome_generator(Arc::new(SingleBiomeGenerator(DESERT)));
    let chunk = provider.provide_chunk(ChunkCoordinate::new(0, 0)).unwrap();
    assert_eq!(chunk.dominant_biome(), DESERT);

    let resolved = provider.resolve_populators(DESERT).unwrap();
    assert_eq!(resolved.len(), 1);
}
