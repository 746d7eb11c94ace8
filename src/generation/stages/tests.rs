use crate::biome::{BiomeBuffer, BiomeId, BiomeRegistry, BiomeType, SpawnEntry};
use crate::block::BlockId;
use crate::chunk::{Chunk, ChunkMap, ChunkPrimer};
use crate::coords::{ChunkCoordinate, CHUNK_AREA};
use crate::generation::{GenerationContext, GeneratorPopulator, Populator, PopulatorFlags, WorldSettings};
use crate::random::JavaRandom;
use crate::util::boxes_overlap;
use crate::volume::{BlockVolume, BlockVolumeBuffer};

use super::*;

/// A chunk of flat stone up to (but not including) y = 64.
fn stone_chunk(ctx: &GenerationContext, coord: ChunkCoordinate, biome: BiomeId) -> Chunk {
    let mut primer = ChunkPrimer::new(ctx.bounds(), BlockId::AIR);
    let mut biomes = BiomeBuffer::new(coord.block_origin(), 16, 16);
    biomes.fill(biome).unwrap();

    FlatTerrain::stone(64)
        .populate(
            ctx,
            &mut BlockVolumeBuffer::new(&mut primer, coord),
            &biomes.immutable_copy().unwrap(),
        )
        .unwrap();

    Chunk::from_primer(coord, primer, vec![biome; CHUNK_AREA].into_boxed_slice()).unwrap()
}

fn assert_no_overlaps(chunk: &Chunk) {
    let features = chunk.features();
    for (i, a) in features.iter().enumerate() {
        for b in &features[i + 1..] {
            assert!(
                !boxes_overlap(a.min, a.max, b.min, b.max),
                "{a:?} overlaps {b:?}"
            );
        }
    }
}

#[test]
fn dungeon_attempts_never_overlap() {
    let ctx = GenerationContext::new(WorldSettings::default()).unwrap();
    let store = ChunkMap::new();
    let dungeons = DungeonPopulator::new(64);

    let mut placed_any = false;
    for x in 0..8 {
        let mut chunk = stone_chunk(&ctx, ChunkCoordinate::new(x, 0), BiomeId(1));
        let mut rng = JavaRandom::for_chunk(chunk.coord());
        let mut flags = PopulatorFlags::new();

        dungeons
            .populate_flagged(&ctx, &store, &mut chunk, &mut rng, &mut flags)
            .unwrap();

        assert_no_overlaps(&chunk);
        // Far more attempts than fit into a chunk, so some had to be suppressed.
        assert!(chunk.features().len() < 64);

        if !chunk.features().is_empty() {
            placed_any = true;
            assert!(flags.contains(DUNGEON_FLAG));

            let dungeon = &chunk.features()[0];
            let corner = chunk.block(dungeon.min).unwrap();
            assert!(corner == BlockId::COBBLESTONE || corner == BlockId::MOSSY_COBBLESTONE);
        }
    }

    assert!(placed_any);
}

#[test]
fn lakes_skip_chunks_with_structures() {
    let ctx = GenerationContext::new(WorldSettings::default()).unwrap();
    let store = ChunkMap::new();
    let lakes = LakePopulator::water(1);

    let mut flags = PopulatorFlags::new();
    flags.raise(StructureKind::Village.flag());

    for x in 0..16 {
        let mut chunk = stone_chunk(&ctx, ChunkCoordinate::new(x, 3), BiomeId(1));
        let mut rng = JavaRandom::for_chunk(chunk.coord());

        lakes
            .populate_flagged(&ctx, &store, &mut chunk, &mut rng, &mut flags)
            .unwrap();
        assert!(chunk.features().is_empty());
    }
}

#[test]
fn lakes_never_overlap_existing_features() {
    let ctx = GenerationContext::new(WorldSettings::default()).unwrap();
    let store = ChunkMap::new();
    let dungeons = DungeonPopulator::new(16);
    let lakes = LakePopulator::water(1);

    let mut lakes_placed = 0;
    for x in 0..32 {
        let mut chunk = stone_chunk(&ctx, ChunkCoordinate::new(x, -5), BiomeId(1));
        let mut rng = JavaRandom::for_chunk(chunk.coord());
        let mut flags = PopulatorFlags::new();

        dungeons
            .populate_flagged(&ctx, &store, &mut chunk, &mut rng, &mut flags)
            .unwrap();
        lakes
            .populate_flagged(&ctx, &store, &mut chunk, &mut rng, &mut flags)
            .unwrap();

        lakes_placed += chunk
            .features()
            .iter()
            .filter(|f| f.kind == "water_lake")
            .count();
        assert_no_overlaps(&chunk);
    }

    assert!(lakes_placed > 0);
}

#[test]
fn ore_only_replaces_stone() {
    let ctx = GenerationContext::new(WorldSettings::default()).unwrap();
    let mut chunk = stone_chunk(&ctx, ChunkCoordinate::new(0, 0), BiomeId(1));
    let mut rng = JavaRandom::new(1);

    OrePopulator::new(BlockId::ORE_IRON, 40, 12, 128)
        .populate(&ctx, &mut chunk, &mut rng)
        .unwrap();

    let mut ore = 0;
    for x in 0..16 {
        for z in 0..16 {
            assert_eq!(chunk.block(na::vector![x, 0, z]), Ok(BlockId::BEDROCK));
            for y in 64..128 {
                assert_eq!(chunk.block(na::vector![x, y, z]), Ok(BlockId::AIR));
            }
            for y in 1..64 {
                if chunk.block(na::vector![x, y, z]) == Ok(BlockId::ORE_IRON) {
                    ore += 1;
                }
            }
        }
    }

    assert!(ore > 0);
}

#[test]
fn animals_follow_the_dominant_biome() {
    let mut registry = BiomeRegistry::new();
    registry
        .register(
            BiomeType::new(BiomeId(1), "plains", 0.8, 0.4)
                .with_spawns(vec![SpawnEntry::new("sheep", 1, 2, 4)]),
        )
        .unwrap();
    registry
        .register(BiomeType::new(BiomeId(2), "void", 0.5, 0.5))
        .unwrap();

    let ctx = GenerationContext::new(WorldSettings::default()).unwrap();
    let animals = AnimalPopulator::new(&registry);

    let mut seeded = 0;
    for x in 0..64 {
        let mut chunk = stone_chunk(&ctx, ChunkCoordinate::new(x, 0), BiomeId(1));
        let mut rng = JavaRandom::for_chunk(chunk.coord());
        animals.populate(&ctx, &mut chunk, &mut rng).unwrap();

        for spawn in chunk.entities() {
            assert_eq!(spawn.entity, "sheep");
            assert_eq!(spawn.pos.y, 64);
        }
        seeded += chunk.entities().len();

        let mut barren = stone_chunk(&ctx, ChunkCoordinate::new(x, 1), BiomeId(2));
        animals.populate(&ctx, &mut barren, &mut rng).unwrap();
        assert!(barren.entities().is_empty());
    }

    assert!(seeded > 0);
}

#[test]
fn structure_decorator_raises_flag() {
    let ctx = GenerationContext::new(WorldSettings::default()).unwrap();
    let store = ChunkMap::new();
    let generator = StructureGenerator::new(StructureKind::Temple);
    let decorator = generator.decorator();

    let coord = (0..10_000)
        .map(|i| ChunkCoordinate::new(i % 100, i / 100))
        .find(|&coord| generator.placement(&ctx, coord).is_some())
        .unwrap();

    let mut chunk = stone_chunk(&ctx, coord, BiomeId(1));
    let mut rng = JavaRandom::for_chunk(coord);
    let mut flags = PopulatorFlags::new();

    decorator
        .populate_flagged(&ctx, &store, &mut chunk, &mut rng, &mut flags)
        .unwrap();

    assert!(flags.contains("structure:temple"));
    assert_eq!(chunk.features().len(), 1);
    assert_eq!(chunk.features()[0].kind, "temple");
}
