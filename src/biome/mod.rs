mod buffer;
mod generator;
mod settings;

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use buffer::{BiomeBuffer, ImmutableBiomeArea};
pub use generator::{BiomeGenerator, ClimateBiomeGenerator, SingleBiomeGenerator};
pub use settings::{BiomeGenerationSettings, BiomeGenerationSettingsBuilder, GroundCoverLayer};

use crate::block::BlockId;
use crate::error::ConfigurationError;

#[derive(Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BiomeId(pub u8);

impl std::fmt::Display for BiomeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Debug for BiomeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BiomeId({})", self.0)
    }
}

impl From<u8> for BiomeId {
    fn from(n: u8) -> Self {
        Self(n)
    }
}

impl From<BiomeId> for u8 {
    fn from(id: BiomeId) -> Self {
        id.0
    }
}

/// A creature that may be spawned in a biome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnEntry {
    pub entity: String,
    pub weight: u32,
    pub min_group: u32,
    pub max_group: u32,
}

impl SpawnEntry {
    pub fn new(entity: impl Into<String>, weight: u32, min_group: u32, max_group: u32) -> Self {
        Self {
            entity: entity.into(),
            weight,
            min_group,
            max_group,
        }
    }

    /// Combined weight of a spawn list, or `None` if it doesn't fit in an `i32`.
    pub fn total_weight(entries: &[SpawnEntry]) -> Option<i32> {
        let total = entries
            .iter()
            .try_fold(0u32, |total, entry| total.checked_add(entry.weight))?;

        i32::try_from(total).ok()
    }
}

/// A classification of a world region. The biome controls which stages run by default when
/// it shows up in a chunk, and what the ground looks like.
#[derive(Clone, Debug)]
pub struct BiomeType {
    id: BiomeId,
    name: String,
    temperature: f32,
    rainfall: f32,
    settings: BiomeGenerationSettings,
    spawns: Vec<SpawnEntry>,
}

impl BiomeType {
    pub fn new(id: BiomeId, name: impl Into<String>, temperature: f32, rainfall: f32) -> Self {
        Self {
            id,
            name: name.into(),
            temperature,
            rainfall,
            settings: BiomeGenerationSettings::default(),
            spawns: Vec::new(),
        }
    }

    pub fn with_settings(mut self, settings: BiomeGenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_spawns(mut self, spawns: Vec<SpawnEntry>) -> Self {
        self.spawns = spawns;
        self
    }

    #[inline]
    pub fn id(&self) -> BiomeId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    #[inline]
    pub fn rainfall(&self) -> f32 {
        self.rainfall
    }

    /// Default stages for this biome, used whenever no override is registered.
    #[inline]
    pub fn generation_settings(&self) -> &BiomeGenerationSettings {
        &self.settings
    }

    #[inline]
    pub fn spawns(&self) -> &[SpawnEntry] {
        &self.spawns
    }

    /// Block placed at the very top of a column in this biome.
    pub fn top_block(&self) -> BlockId {
        self.settings
            .ground_cover_layers()
            .first()
            .map(|layer| layer.block)
            .unwrap_or(BlockId::STONE)
    }
}

/// All biomes known to a world. This is handed to the provider explicitly instead of being looked up
/// from some global game state.
#[derive(Clone, Debug, Default)]
pub struct BiomeRegistry {
    biomes: HashMap<BiomeId, Arc<BiomeType>>,
}

impl BiomeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, biome: BiomeType) -> Result<(), ConfigurationError> {
        use std::collections::hash_map::Entry;

        if SpawnEntry::total_weight(biome.spawns()).is_none() {
            return Err(ConfigurationError::InvalidSpawnWeights(biome.id()));
        }

        match self.biomes.entry(biome.id()) {
            Entry::Occupied(entry) => Err(ConfigurationError::DuplicateBiome(*entry.key())),
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(biome));
                Ok(())
            }
        }
    }

    #[inline]
    pub fn get(&self, id: BiomeId) -> Option<&Arc<BiomeType>> {
        self.biomes.get(&id)
    }

    #[inline]
    pub fn contains(&self, id: BiomeId) -> bool {
        self.biomes.contains_key(&id)
    }

    pub fn require(&self, id: BiomeId) -> Result<&Arc<BiomeType>, ConfigurationError> {
        self.get(id).ok_or(ConfigurationError::UnknownBiome(id))
    }

    /// Every registered biome, ordered by ID.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<BiomeType>> {
        let mut biomes = self.biomes.values().collect::<Vec<_>>();
        biomes.sort_by_key(|b| b.id());
        biomes.into_iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }
}
