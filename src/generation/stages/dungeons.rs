use crate::block::BlockId;
use crate::chunk::{Chunk, ChunkStore, FeatureMarker};
use crate::coords::CHUNK_SIZE;
use crate::generation::{GenerationContext, Populator, PopulatorFlags};
use crate::random::JavaRandom;
use crate::util::IVec3;
use crate::volume::{BlockVolume, MutableBlockVolume};

pub const DUNGEON_FLAG: &str = "dungeon";
const DUNGEON_HEIGHT: i32 = 6;

/// Cobblestone rooms with a spawner and a chest. Every attempt that would overlap something already in
/// the chunk, including a dungeon from an earlier attempt, is dropped.
#[derive(Copy, Clone, Debug)]
pub struct DungeonPopulator {
    attempts: u32,
}

impl DungeonPopulator {
    pub fn new(attempts: u32) -> Self {
        Self { attempts }
    }

    #[inline]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    fn attempt(
        &self,
        ctx: &GenerationContext,
        chunk: &mut Chunk,
        rng: &mut JavaRandom,
    ) -> anyhow::Result<bool> {
        let bounds = ctx.bounds();
        let origin = chunk.coord().block_origin();

        let width = rng.next_int_bounded(2) * 2 + 7;
        let depth = rng.next_int_bounded(2) * 2 + 7;
        let x = origin.x + rng.next_int_bounded(CHUNK_SIZE - width + 1);
        let z = origin.y + rng.next_int_bounded(CHUNK_SIZE - depth + 1);
        let y = bounds.min_y() + rng.next_int_bounded(bounds.abs_height());

        let min: IVec3 = na::vector![x, y, z];
        let max: IVec3 = min + na::vector![width, DUNGEON_HEIGHT, depth];

        if y <= bounds.min_y() || max.y > bounds.max_y() {
            return Ok(false);
        }

        if chunk.overlaps_feature(min, max) {
            log::trace!("dungeon at {min:?} in chunk {} suppressed", chunk.coord());
            return Ok(false);
        }

        // Dungeons are dug into solid ground, not floating in caves or the sky.
        let below = na::vector![x + width / 2, y - 1, z + depth / 2];
        if !chunk.block(below)?.is_solid() {
            return Ok(false);
        }

        for bx in min.x..max.x {
            for bz in min.z..max.z {
                for by in min.y..max.y {
                    let shell = bx == min.x
                        || bx == max.x - 1
                        || bz == min.z
                        || bz == max.z - 1
                        || by == min.y
                        || by == max.y - 1;

                    let block = if !shell {
                        BlockId::AIR
                    } else if by == min.y && rng.next_int_bounded(4) == 0 {
                        BlockId::MOSSY_COBBLESTONE
                    } else {
                        BlockId::COBBLESTONE
                    };
                    chunk.set_block(na::vector![bx, by, bz], block)?;
                }
            }
        }

        let floor = y + 1;
        chunk.set_block(na::vector![x + width / 2, floor, z + depth / 2], BlockId::SPAWNER)?;
        chunk.set_block(na::vector![x + 1, floor, z + 1], BlockId::CHEST)?;
        chunk.add_feature(FeatureMarker::new(DUNGEON_FLAG, min, max));

        Ok(true)
    }
}

impl Populator for DungeonPopulator {
    fn populate(
        &self,
        ctx: &GenerationContext,
        chunk: &mut Chunk,
        rng: &mut JavaRandom,
    ) -> anyhow::Result<()> {
        for _ in 0..self.attempts {
            self.attempt(ctx, chunk, rng)?;
        }

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
        for _ in 0..self.attempts {
            if self.attempt(ctx, chunk, rng)? {
                flags.raise(DUNGEON_FLAG);
            }
        }

        Ok(())
    }
}
