//! The vanilla overworld: its biomes and the order its stages run in.

use std::sync::Arc;

use enum_ordinalize::Ordinalize;
use serde::{Deserialize, Serialize};

use crate::biome::{
    BiomeGenerationSettings, BiomeId, BiomeRegistry, BiomeType, ClimateBiomeGenerator,
    GroundCoverLayer, SpawnEntry,
};
use crate::block::BlockId;
use crate::error::ConfigurationError;
use crate::provider::ChunkProvider;

use super::stages::{
    AnimalPopulator, Caves, DungeonPopulator, GroundCover, LakePopulator, NoiseTerrain,
    OrePopulator, Ravines, StructureGenerator, StructureKind,
};
use super::{GeneratorPopulator, Populator, WorldSettings};

/// Feature toggles of the vanilla overworld.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub use_caves: bool,
    pub use_ravines: bool,
    pub use_mineshafts: bool,
    pub use_villages: bool,
    pub use_strongholds: bool,
    pub use_temples: bool,
    pub use_monuments: bool,
    pub use_water_lakes: bool,
    pub use_lava_lakes: bool,
    pub use_dungeons: bool,
    /// Master switch for every structure.
    pub map_features_enabled: bool,
    pub water_lake_chance: i32,
    pub lava_lake_chance: i32,
    pub dungeon_attempts: u32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            use_caves: true,
            use_ravines: true,
            use_mineshafts: true,
            use_villages: true,
            use_strongholds: true,
            use_temples: true,
            use_monuments: true,
            use_water_lakes: true,
            use_lava_lakes: true,
            use_dungeons: true,
            map_features_enabled: true,
            water_lake_chance: 4,
            lava_lake_chance: 8,
            dungeon_attempts: 8,
        }
    }
}

impl GeneratorSettings {
    /// Structure kinds enabled by these settings, in the order they run.
    pub fn structures(&self) -> Vec<StructureKind> {
        if !self.map_features_enabled {
            return Vec::new();
        }

        StructureKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                StructureKind::Mineshaft => self.use_mineshafts,
                StructureKind::Village => self.use_villages,
                StructureKind::Stronghold => self.use_strongholds,
                StructureKind::Temple => self.use_temples,
                StructureKind::Monument => self.use_monuments,
            })
            .collect()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Ordinalize)]
#[repr(u8)]
pub enum VanillaBiome {
    Ocean,
    Plains,
    Desert,
    ExtremeHills,
    Forest,
    Taiga,
    Swampland,
    River,
}

impl VanillaBiome {
    #[inline]
    pub fn id(self) -> BiomeId {
        BiomeId(self.ordinal())
    }

    pub fn from_id(id: BiomeId) -> Option<Self> {
        Self::from_ordinal(id.0)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Ocean => "ocean",
            Self::Plains => "plains",
            Self::Desert => "desert",
            Self::ExtremeHills => "extreme_hills",
            Self::Forest => "forest",
            Self::Taiga => "taiga",
            Self::Swampland => "swampland",
            Self::River => "river",
        }
    }

    /// Temperature and rainfall.
    fn climate(self) -> (f32, f32) {
        match self {
            Self::Ocean | Self::River => (0.5, 0.5),
            Self::Plains => (0.8, 0.4),
            Self::Desert => (2.0, 0.0),
            Self::ExtremeHills => (0.2, 0.3),
            Self::Forest => (0.7, 0.8),
            Self::Taiga => (0.25, 0.8),
            Self::Swampland => (0.8, 0.9),
        }
    }

    fn heights(self) -> (f32, f32) {
        match self {
            Self::Ocean => (-1.0, -0.8),
            Self::Plains => (0.1, 0.25),
            Self::Desert => (0.125, 0.175),
            Self::ExtremeHills => (1.0, 1.5),
            Self::Forest => (0.1, 0.3),
            Self::Taiga => (0.2, 0.4),
            Self::Swampland => (-0.2, -0.1),
            Self::River => (-0.5, -0.45),
        }
    }

    fn ground_cover(self) -> Vec<GroundCoverLayer> {
        match self {
            Self::Ocean => vec![
                GroundCoverLayer::new(BlockId::GRAVEL, 1),
                GroundCoverLayer::new(BlockId::DIRT, 3),
            ],
            Self::Desert => vec![
                GroundCoverLayer::new(BlockId::SAND, 4),
                GroundCoverLayer::new(BlockId::SANDSTONE, 3),
            ],
            Self::River => vec![
                GroundCoverLayer::new(BlockId::SAND, 1),
                GroundCoverLayer::new(BlockId::DIRT, 2),
            ],
            _ => vec![
                GroundCoverLayer::new(BlockId::GRASS, 1),
                GroundCoverLayer::new(BlockId::DIRT, 3),
            ],
        }
    }

    fn spawns(self) -> Vec<SpawnEntry> {
        let passive = || {
            vec![
                SpawnEntry::new("sheep", 12, 4, 4),
                SpawnEntry::new("pig", 10, 4, 4),
                SpawnEntry::new("chicken", 10, 4, 4),
                SpawnEntry::new("cow", 8, 4, 4),
            ]
        };

        match self {
            Self::Ocean | Self::River => vec![SpawnEntry::new("squid", 10, 1, 4)],
            Self::Desert => vec![SpawnEntry::new("rabbit", 4, 2, 3)],
            Self::Plains => {
                let mut spawns = passive();
                spawns.push(SpawnEntry::new("horse", 5, 2, 6));
                spawns
            }
            Self::Forest | Self::Taiga => {
                let mut spawns = passive();
                spawns.push(SpawnEntry::new("wolf", 5, 4, 4));
                spawns
            }
            Self::ExtremeHills | Self::Swampland => passive(),
        }
    }

    fn populators(self) -> Vec<Arc<dyn Populator>> {
        let mut populators: Vec<Arc<dyn Populator>> =
            vec![Arc::new(OrePopulator::coal()), Arc::new(OrePopulator::iron())];

        if self == Self::Swampland {
            populators.push(Arc::new(LakePopulator::water(2)));
        }

        populators
    }

    pub fn biome_type(self) -> Result<BiomeType, ConfigurationError> {
        let (temperature, rainfall) = self.climate();
        let (min_height, max_height) = self.heights();
        let layers = self.ground_cover();

        let settings = BiomeGenerationSettings::builder()
            .min_height(min_height)
            .max_height(max_height)
            .ground_cover_layers(layers.iter().copied())
            .generator_populators([
                Arc::new(GroundCover::new(self.id(), layers)) as Arc<dyn GeneratorPopulator>
            ])
            .populators(self.populators())
            .build()?;

        Ok(BiomeType::new(self.id(), self.name(), temperature, rainfall)
            .with_settings(settings)
            .with_spawns(self.spawns()))
    }
}

/// Every vanilla biome with its default settings.
pub fn biomes() -> Result<BiomeRegistry, ConfigurationError> {
    let mut registry = BiomeRegistry::new();
    for biome in VanillaBiome::variants() {
        registry.register(biome.biome_type()?)?;
    }

    Ok(registry)
}

/// Terrain stages that run after the base terrain, in order.
pub fn generator_populators(
    settings: &GeneratorSettings,
    structures: &[Arc<StructureGenerator>],
) -> Vec<Arc<dyn GeneratorPopulator>> {
    let mut stages: Vec<Arc<dyn GeneratorPopulator>> = Vec::new();

    if settings.use_caves {
        stages.push(Arc::new(Caves::default()));
    }

    if settings.use_ravines {
        stages.push(Arc::new(Ravines::default()));
    }

    for structure in structures {
        stages.push(Arc::new(structure.carver()));
    }

    stages
}

/// Decoration stages that run before the biome's own populators, in order.
pub fn populators(
    settings: &GeneratorSettings,
    structures: &[Arc<StructureGenerator>],
    registry: &BiomeRegistry,
) -> Vec<Arc<dyn Populator>> {
    let mut stages: Vec<Arc<dyn Populator>> = Vec::new();

    for structure in structures {
        stages.push(Arc::new(structure.decorator()));
    }

    if settings.use_water_lakes {
        stages.push(Arc::new(LakePopulator::water(settings.water_lake_chance)));
    }

    if settings.use_lava_lakes {
        stages.push(Arc::new(LakePopulator::lava(settings.lava_lake_chance)));
    }

    if settings.use_dungeons {
        stages.push(Arc::new(DungeonPopulator::new(settings.dungeon_attempts)));
    }

    stages.push(Arc::new(AnimalPopulator::new(registry)));
    stages
}

/// A provider generating the vanilla overworld.
pub fn build_provider(
    world: WorldSettings,
    settings: &GeneratorSettings,
) -> Result<ChunkProvider, ConfigurationError> {
    let registry = biomes()?;

    let structures = settings
        .structures()
        .into_iter()
        .map(StructureGenerator::new)
        .collect::<Vec<_>>();

    let terrain = generator_populators(settings, &structures);
    let decoration = populators(settings, &structures, &registry);

    let provider = ChunkProvider::new(
        world,
        Arc::new(NoiseTerrain::new(world.seed, &registry)),
        Arc::new(ClimateBiomeGenerator::new(world.seed, &registry)),
        registry,
    )?;
    provider.set_generator_populators(terrain);
    provider.set_populators(decoration);

    Ok(provider)
}
