use std::collections::HashMap;

use crate::biome::{BiomeId, BiomeRegistry, SpawnEntry};
use crate::chunk::Chunk;
use crate::coords::CHUNK_SIZE;
use crate::generation::{GenerationContext, Populator};
use crate::random::JavaRandom;

/// Chance for each additional group of creatures to spawn in a chunk.
const SPAWN_CHANCE: f32 = 0.1;

/// Seeds the chunk with creatures native to its biome.
#[derive(Clone, Debug)]
pub struct AnimalPopulator {
    spawns: HashMap<BiomeId, Vec<SpawnEntry>>,
}

impl AnimalPopulator {
    pub fn new(registry: &BiomeRegistry) -> Self {
        Self {
            spawns: registry
                .iter()
                .map(|biome| (biome.id(), biome.spawns().to_vec()))
                .collect(),
        }
    }

    fn pick<'a>(entries: &'a [SpawnEntry], rng: &mut JavaRandom) -> Option<&'a SpawnEntry> {
        let total = SpawnEntry::total_weight(entries).filter(|&total| total > 0)?;

        let mut roll = rng.next_int_bounded(total) as u32;
        for entry in entries {
            if roll < entry.weight {
                return Some(entry);
            }
            roll -= entry.weight;
        }

        None
    }
}

impl Populator for AnimalPopulator {
    fn populate(
        &self,
        _ctx: &GenerationContext,
        chunk: &mut Chunk,
        rng: &mut JavaRandom,
    ) -> anyhow::Result<()> {
        let entries = match self.spawns.get(&chunk.dominant_biome()) {
            Some(entries) if !entries.is_empty() => entries,
            _ => return Ok(()),
        };

        let origin = chunk.coord().block_origin();

        while rng.next_float() < SPAWN_CHANCE {
            let entry = match Self::pick(entries, rng) {
                Some(entry) => entry,
                None => break,
            };

            let spread = entry.max_group.saturating_sub(entry.min_group) as i32 + 1;
            let group = entry.min_group as i32 + rng.next_int_bounded(spread);

            for _ in 0..group {
                let x = rng.next_int_bounded(CHUNK_SIZE) as usize;
                let z = rng.next_int_bounded(CHUNK_SIZE) as usize;
                if let Some(y) = chunk.height_at(x, z) {
                    let pos = na::vector![origin.x + x as i32, y, origin.y + z as i32];
                    chunk.add_entity(entry.entity.clone(), pos);
                }
            }
        }

        Ok(())
    }
}
