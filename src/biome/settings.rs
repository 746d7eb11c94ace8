use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::block::BlockId;
use crate::error::ConfigurationError;
use crate::generation::{GeneratorPopulator, Populator};

use super::BiomeType;

const DEFAULT_MIN_HEIGHT: f32 = 0.1;
const DEFAULT_MAX_HEIGHT: f32 = 0.2;

/// A layer of blocks placed on top of the terrain, e.g. one grass over three dirt.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundCoverLayer {
    pub block: BlockId,
    pub depth: u32,
}

impl GroundCoverLayer {
    pub const fn new(block: BlockId, depth: u32) -> Self {
        Self { block, depth }
    }
}

/// The stages a biome runs when it appears in a chunk.
///
/// Every biome carries a default set of these, and the provider can override them per biome.
#[derive(Clone)]
pub struct BiomeGenerationSettings {
    min_height: f32,
    max_height: f32,
    ground_cover: Vec<GroundCoverLayer>,
    generator_populators: Vec<Arc<dyn GeneratorPopulator>>,
    populators: Vec<Arc<dyn Populator>>,
}

impl Default for BiomeGenerationSettings {
    fn default() -> Self {
        Self {
            min_height: DEFAULT_MIN_HEIGHT,
            max_height: DEFAULT_MAX_HEIGHT,
            ground_cover: Vec::new(),
            generator_populators: Vec::new(),
            populators: Vec::new(),
        }
    }
}

impl BiomeGenerationSettings {
    pub fn builder() -> BiomeGenerationSettingsBuilder {
        BiomeGenerationSettingsBuilder::new()
    }

    /// Settings that run nothing at all. Registering these as an override suppresses a biome's defaults.
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn min_height(&self) -> f32 {
        self.min_height
    }

    #[inline]
    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    #[inline]
    pub fn ground_cover_layers(&self) -> &[GroundCoverLayer] {
        &self.ground_cover
    }

    #[inline]
    pub fn generator_populators(&self) -> &[Arc<dyn GeneratorPopulator>] {
        &self.generator_populators
    }

    #[inline]
    pub fn populators(&self) -> &[Arc<dyn Populator>] {
        &self.populators
    }

    pub fn generator_populators_mut(&mut self) -> &mut Vec<Arc<dyn GeneratorPopulator>> {
        &mut self.generator_populators
    }

    pub fn populators_mut(&mut self) -> &mut Vec<Arc<dyn Populator>> {
        &mut self.populators
    }
}

impl std::fmt::Debug for BiomeGenerationSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BiomeGenerationSettings")
            .field("min_height", &self.min_height)
            .field("max_height", &self.max_height)
            .field("ground_cover", &self.ground_cover)
            .field(
                "generator_populators",
                &self
                    .generator_populators
                    .iter()
                    .map(|g| g.name())
                    .collect::<Vec<_>>(),
            )
            .field(
                "populators",
                &self.populators.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[derive(Clone, Default)]
pub struct BiomeGenerationSettingsBuilder {
    settings: BiomeGenerationSettings,
}

impl BiomeGenerationSettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_height(mut self, height: f32) -> Self {
        self.settings.min_height = height;
        self
    }

    pub fn max_height(mut self, height: f32) -> Self {
        self.settings.max_height = height;
        self
    }

    pub fn ground_cover_layers<I>(mut self, layers: I) -> Self
    where
        I: IntoIterator<Item = GroundCoverLayer>,
    {
        self.settings.ground_cover = layers.into_iter().collect();
        self
    }

    pub fn generator_populators<I>(mut self, stages: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn GeneratorPopulator>>,
    {
        self.settings.generator_populators = stages.into_iter().collect();
        self
    }

    pub fn populators<I>(mut self, stages: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Populator>>,
    {
        self.settings.populators = stages.into_iter().collect();
        self
    }

    /// Forget everything set so far.
    pub fn reset(mut self) -> Self {
        self.settings = BiomeGenerationSettings::default();
        self
    }

    /// Start over from the default settings of the given biome.
    pub fn reset_from(mut self, biome: &BiomeType) -> Self {
        self.settings = biome.generation_settings().clone();
        self
    }

    pub fn build(self) -> Result<BiomeGenerationSettings, ConfigurationError> {
        let BiomeGenerationSettings {
            min_height,
            max_height,
            ..
        } = self.settings;

        if min_height > max_height {
            return Err(ConfigurationError::InvalidHeightRange {
                min: min_height,
                max: max_height,
            });
        }

        Ok(self.settings)
    }
}
