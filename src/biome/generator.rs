use bracket_noise::prelude::*;

use crate::error::BiomeBufferError;

use super::{BiomeBuffer, BiomeId, BiomeRegistry};

/// Fills a biome buffer for whatever footprint it's currently attached to.
pub trait BiomeGenerator: Send + Sync {
    fn generate_biomes(&self, buffer: &mut BiomeBuffer) -> anyhow::Result<()>;
}

/// Covers the whole world with a single biome.
#[derive(Copy, Clone, Debug)]
pub struct SingleBiomeGenerator(pub BiomeId);

impl BiomeGenerator for SingleBiomeGenerator {
    fn generate_biomes(&self, buffer: &mut BiomeBuffer) -> anyhow::Result<()> {
        buffer.fill(self.0)?;
        Ok(())
    }
}

/// Picks, for every column, the registered biome whose temperature and rainfall are closest to
/// two smooth noise fields.
pub struct ClimateBiomeGenerator {
    temperature: FastNoise,
    rainfall: FastNoise,
    candidates: Vec<(BiomeId, f32, f32)>,
}

impl ClimateBiomeGenerator {
    pub fn new(seed: u64, registry: &BiomeRegistry) -> Self {
        Self {
            temperature: climate_noise(seed.wrapping_mul(9871)),
            rainfall: climate_noise(seed.wrapping_mul(39811)),
            candidates: registry
                .iter()
                .map(|biome| (biome.id(), biome.temperature(), biome.rainfall()))
                .collect(),
        }
    }

    /// Temperature and rainfall at a worldspace column, both roughly in `0.0..=2.0` and `0.0..=1.0`.
    pub fn climate(&self, x: i32, z: i32) -> (f32, f32) {
        let temperature = (self.temperature.get_noise(x as f32, z as f32) + 1.0).clamp(0.0, 2.0);
        let rainfall = ((self.rainfall.get_noise(x as f32, z as f32) + 1.0) * 0.5).clamp(0.0, 1.0);

        (temperature, rainfall)
    }

    fn closest(&self, temperature: f32, rainfall: f32) -> Option<BiomeId> {
        let mut best: Option<(BiomeId, f32)> = None;

        // Candidates are sorted by ID so ties always resolve the same way.
        for &(id, t, r) in &self.candidates {
            let distance = (t - temperature).powi(2) + (r - rainfall).powi(2);
            match best {
                Some((_, best_distance)) if best_distance <= distance => {}
                _ => best = Some((id, distance)),
            }
        }

        best.map(|(id, _)| id)
    }
}

fn climate_noise(seed: u64) -> FastNoise {
    let mut noise = FastNoise::seeded(seed);
    noise.set_noise_type(NoiseType::SimplexFractal);
    noise.set_fractal_type(FractalType::FBM);
    noise.set_fractal_octaves(4);
    noise.set_frequency(0.004);
    noise
}

impl BiomeGenerator for ClimateBiomeGenerator {
    fn generate_biomes(&self, buffer: &mut BiomeBuffer) -> anyhow::Result<()> {
        let origin = buffer.origin().ok_or(BiomeBufferError::Detached)?;

        for x in 0..buffer.width() as i32 {
            for z in 0..buffer.depth() as i32 {
                let (temperature, rainfall) = self.climate(origin.x + x, origin.y + z);
                let biome = self
                    .closest(temperature, rainfall)
                    .ok_or_else(|| anyhow::anyhow!("no biomes to pick from"))?;

                buffer.set_biome(x, z, biome)?;
            }
        }

        Ok(())
    }
}
