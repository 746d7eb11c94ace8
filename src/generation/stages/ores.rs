use crate::block::BlockId;
use crate::chunk::Chunk;
use crate::coords::CHUNK_SIZE;
use crate::generation::{GenerationContext, Populator};
use crate::random::JavaRandom;
use crate::volume::{BlockVolume, Bounds3D, MutableBlockVolume};

/// Veins of ore grown through stone by a short random walk.
#[derive(Copy, Clone, Debug)]
pub struct OrePopulator {
    ore: BlockId,
    veins: u32,
    vein_size: u32,
    /// Veins start at most this many blocks above the bottom of the world.
    max_height: i32,
}

impl OrePopulator {
    pub fn new(ore: BlockId, veins: u32, vein_size: u32, max_height: i32) -> Self {
        Self {
            ore,
            veins,
            vein_size,
            max_height: max_height.max(1),
        }
    }

    pub fn coal() -> Self {
        Self::new(BlockId::ORE_COAL, 20, 16, 128)
    }

    pub fn iron() -> Self {
        Self::new(BlockId::ORE_IRON, 20, 8, 64)
    }

    #[inline]
    pub fn ore(&self) -> BlockId {
        self.ore
    }
}

impl Populator for OrePopulator {
    fn populate(
        &self,
        ctx: &GenerationContext,
        chunk: &mut Chunk,
        rng: &mut JavaRandom,
    ) -> anyhow::Result<()> {
        let origin = chunk.coord().block_origin();
        let min_y = ctx.bounds().min_y();
        let max_height = self.max_height.min(ctx.bounds().abs_height());

        for _ in 0..self.veins {
            let mut pos = na::vector![
                origin.x + rng.next_int_bounded(CHUNK_SIZE),
                min_y + rng.next_int_bounded(max_height),
                origin.y + rng.next_int_bounded(CHUNK_SIZE)
            ];

            for _ in 0..self.vein_size {
                if chunk.contains(pos) && chunk.block(pos)? == BlockId::STONE {
                    chunk.set_block(pos, self.ore)?;
                }

                match rng.next_int_bounded(6) {
                    0 => pos.x += 1,
                    1 => pos.x -= 1,
                    2 => pos.y += 1,
                    3 => pos.y -= 1,
                    4 => pos.z += 1,
                    _ => pos.z -= 1,
                }
            }
        }

        Ok(())
    }
}
