//! Built-in generation stages.

mod animals;
mod carvers;
mod dungeons;
mod lakes;
mod ores;
mod structures;
mod terrain;

pub use animals::AnimalPopulator;
pub use carvers::{Caves, Ravines};
pub use dungeons::{DungeonPopulator, DUNGEON_FLAG};
pub use lakes::LakePopulator;
pub use ores::OrePopulator;
pub use structures::{
    StructureCarver, StructureDecorator, StructureGenerator, StructureKind, StructurePlacement,
};
pub use terrain::{FlatTerrain, GroundCover, NoiseTerrain};

#[cfg(test)]
mod tests;
