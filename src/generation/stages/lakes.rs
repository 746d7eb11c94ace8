use crate::block::BlockId;
use crate::chunk::{Chunk, ChunkStore, FeatureMarker};
use crate::generation::{GenerationContext, Populator, PopulatorFlags};
use crate::random::JavaRandom;
use crate::util::IVec3;
use crate::volume::{BlockVolume, MutableBlockVolume};

const LAKE_WIDTH: i32 = 8;
const LAKE_HEIGHT: i32 = 4;

/// Small pools of water or lava. Lakes never share space with anything placed before them, and
/// don't appear at all in a chunk that already got a structure during the same pass.
#[derive(Copy, Clone, Debug)]
pub struct LakePopulator {
    fluid: BlockId,
    /// One in this many chunks gets a lake.
    chance: i32,
}

impl LakePopulator {
    pub fn water(chance: i32) -> Self {
        Self {
            fluid: BlockId::WATER,
            chance: chance.max(1),
        }
    }

    pub fn lava(chance: i32) -> Self {
        Self {
            fluid: BlockId::LAVA,
            chance: chance.max(1),
        }
    }

    #[inline]
    pub fn fluid(&self) -> BlockId {
        self.fluid
    }

    fn marker_kind(&self) -> &'static str {
        if self.fluid == BlockId::LAVA {
            "lava_lake"
        } else {
            "water_lake"
        }
    }

    fn place(
        &self,
        ctx: &GenerationContext,
        chunk: &mut Chunk,
        rng: &mut JavaRandom,
    ) -> anyhow::Result<()> {
        if rng.next_int_bounded(self.chance) != 0 {
            return Ok(());
        }

        let bounds = ctx.bounds();
        let origin = chunk.coord().block_origin();
        let x = origin.x + rng.next_int_bounded(LAKE_WIDTH + 1);
        let z = origin.y + rng.next_int_bounded(LAKE_WIDTH + 1);
        let y = if self.fluid == BlockId::LAVA {
            let height = rng.next_int_bounded((bounds.abs_height() - 8).max(1)) + 8;
            bounds.min_y() + rng.next_int_bounded(height)
        } else {
            bounds.min_y() + rng.next_int_bounded(bounds.abs_height())
        };

        // Lava lakes above sea level are rare.
        if self.fluid == BlockId::LAVA && y >= ctx.sea_level() && rng.next_int_bounded(10) != 0 {
            return Ok(());
        }

        let min: IVec3 = na::vector![x, y, z];
        let max: IVec3 = min + na::vector![LAKE_WIDTH, LAKE_HEIGHT, LAKE_WIDTH];

        if y <= bounds.min_y() || max.y > bounds.max_y() {
            return Ok(());
        }

        if chunk.overlaps_feature(min, max) {
            log::trace!("{} at {min:?} suppressed by an existing feature", self.marker_kind());
            return Ok(());
        }

        // Needs something to hold the liquid.
        let center = na::vector![x + LAKE_WIDTH / 2, y - 1, z + LAKE_WIDTH / 2];
        if !chunk.block(center)?.is_solid() {
            return Ok(());
        }

        let half = LAKE_WIDTH as f64 / 2.0;
        for dx in 0..LAKE_WIDTH {
            for dz in 0..LAKE_WIDTH {
                let fx = dx as f64 + 0.5 - half;
                let fz = dz as f64 + 0.5 - half;
                if fx * fx + fz * fz > half * half {
                    continue;
                }

                for dy in 0..LAKE_HEIGHT {
                    let block = if dy < LAKE_HEIGHT / 2 {
                        self.fluid
                    } else {
                        BlockId::AIR
                    };
                    chunk.set_block(min + na::vector![dx, dy, dz], block)?;
                }
            }
        }

        chunk.add_feature(FeatureMarker::new(self.marker_kind(), min, max));
        Ok(())
    }
}

impl Populator for LakePopulator {
    fn populate(
        &self,
        ctx: &GenerationContext,
        chunk: &mut Chunk,
        rng: &mut JavaRandom,
    ) -> anyhow::Result<()> {
        self.place(ctx, chunk, rng)
    }

    fn populate_flagged(
        &self,
        ctx: &GenerationContext,
        _store: &dyn ChunkStore,
        chunk: &mut Chunk,
        rng: &mut JavaRandom,
        flags: &mut PopulatorFlags,
    ) -> anyhow::Result<()> {
        if flags.any_with_prefix("structure:") {
            return Ok(());
        }

        self.place(ctx, chunk, rng)
    }
}
