use std::collections::HashMap;

use bracket_noise::prelude::*;

use crate::biome::{BiomeGenerationSettings, BiomeId, BiomeRegistry, GroundCoverLayer, ImmutableBiomeArea};
use crate::block::BlockId;
use crate::generation::{GenerationContext, GeneratorPopulator};
use crate::volume::MutableBlockVolume;

/// How many blocks one unit of biome height moves the surface.
const HEIGHT_SCALE: f32 = 32.0;

/// Flat layers of blocks, bottom to top. Mostly useful for tests and superflat-style worlds.
#[derive(Clone, Debug)]
pub struct FlatTerrain {
    layers: Vec<(BlockId, u32)>,
}

impl FlatTerrain {
    pub fn new(layers: Vec<(BlockId, u32)>) -> Self {
        Self { layers }
    }

    /// Bedrock at the bottom of the world with stone on top, up to `height` blocks in total.
    pub fn stone(height: u32) -> Self {
        Self::new(vec![(BlockId::BEDROCK, 1), (BlockId::STONE, height.saturating_sub(1))])
    }
}

impl GeneratorPopulator for FlatTerrain {
    fn populate(
        &self,
        _ctx: &GenerationContext,
        volume: &mut dyn MutableBlockVolume,
        _biomes: &ImmutableBiomeArea,
    ) -> anyhow::Result<()> {
        let min = volume.min();
        let max = volume.max();
        let mut y = min.y;

        for &(block, depth) in &self.layers {
            let top = (y + depth as i32).min(max.y);
            volume.fill(
                na::vector![min.x, y, min.z],
                na::vector![max.x, top, max.z],
                block,
            )?;
            y = top;
        }

        Ok(())
    }
}

/// Base terrain: a stone heightfield driven by simplex noise, with each biome's height range deciding
/// how far the surface can stray from sea level. Oceans fill up with water.
pub struct NoiseTerrain {
    noise: FastNoise,
    heights: HashMap<BiomeId, (f32, f32)>,
}

impl NoiseTerrain {
    pub fn new(seed: u64, registry: &BiomeRegistry) -> Self {
        let mut noise = FastNoise::seeded(seed);
        noise.set_noise_type(NoiseType::SimplexFractal);
        noise.set_fractal_type(FractalType::FBM);
        noise.set_fractal_octaves(5);
        noise.set_frequency(0.01);

        let heights = registry
            .iter()
            .map(|biome| {
                let settings = biome.generation_settings();
                (biome.id(), (settings.min_height(), settings.max_height()))
            })
            .collect();

        Self { noise, heights }
    }

    fn heights(&self, biome: BiomeId) -> (f32, f32) {
        self.heights.get(&biome).copied().unwrap_or_else(|| {
            let defaults = BiomeGenerationSettings::default();
            (defaults.min_height(), defaults.max_height())
        })
    }

    /// Y of the top stone block in a worldspace column.
    pub fn surface(&self, ctx: &GenerationContext, biome: BiomeId, x: i32, z: i32) -> i32 {
        let (min_height, max_height) = self.heights(biome);
        let n = (self.noise.get_noise(x as f32, z as f32) + 1.0) * 0.5;
        let height = min_height + (max_height - min_height) * n.clamp(0.0, 1.0);

        ctx.sea_level() + (height * HEIGHT_SCALE).round() as i32
    }
}

impl GeneratorPopulator for NoiseTerrain {
    fn populate(
        &self,
        ctx: &GenerationContext,
        volume: &mut dyn MutableBlockVolume,
        biomes: &ImmutableBiomeArea,
    ) -> anyhow::Result<()> {
        let min = volume.min();
        let max = volume.max();

        for x in min.x..max.x {
            for z in min.z..max.z {
                let biome = biomes.get_biome(x, z)?;
                let surface = self.surface(ctx, biome, x, z).clamp(min.y, max.y - 1);

                volume.set_block(na::vector![x, min.y, z], BlockId::BEDROCK)?;
                for y in (min.y + 1)..=surface {
                    volume.set_block(na::vector![x, y, z], BlockId::STONE)?;
                }
                for y in (surface + 1)..ctx.sea_level().min(max.y) {
                    volume.set_block(na::vector![x, y, z], BlockId::WATER)?;
                }
            }
        }

        Ok(())
    }
}

/// Replaces the top of the stone in every column of one biome with that biome's ground cover.
#[derive(Clone, Debug)]
pub struct GroundCover {
    biome: BiomeId,
    layers: Vec<GroundCoverLayer>,
}

impl GroundCover {
    pub fn new(biome: BiomeId, layers: Vec<GroundCoverLayer>) -> Self {
        Self { biome, layers }
    }

    #[inline]
    pub fn biome(&self) -> BiomeId {
        self.biome
    }

    fn cover_column(&self, volume: &mut dyn MutableBlockVolume, x: i32, z: i32) -> anyhow::Result<()> {
        let min_y = volume.min().y;
        let mut y = volume.max().y - 1;

        // Find the top stone, anything else on top of it (water, air) stays.
        while y >= min_y && volume.block(na::vector![x, y, z])? != BlockId::STONE {
            y -= 1;
        }

        for layer in &self.layers {
            for _ in 0..layer.depth {
                if y < min_y || volume.block(na::vector![x, y, z])? != BlockId::STONE {
                    return Ok(());
                }

                volume.set_block(na::vector![x, y, z], layer.block)?;
                y -= 1;
            }
        }

        Ok(())
    }
}

impl GeneratorPopulator for GroundCover {
    fn populate(
        &self,
        _ctx: &GenerationContext,
        volume: &mut dyn MutableBlockVolume,
        biomes: &ImmutableBiomeArea,
    ) -> anyhow::Result<()> {
        let min = volume.min();
        let max = volume.max();

        for x in min.x..max.x {
            for z in min.z..max.z {
                if biomes.contains(x, z) && biomes.get_biome(x, z)? == self.biome {
                    self.cover_column(volume, x, z)?;
                }
            }
        }

        Ok(())
    }
}
