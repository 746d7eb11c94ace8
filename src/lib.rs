//! Deterministic, staged chunk generation.
//!
//! A [`ChunkProvider`] turns a chunk coordinate into a finished [`Chunk`] in two phases:
//! terrain (`provide_chunk`) and decoration (`populate`). Both phases are made of ordered,
//! swappable stages, and every biome can have its default stages overridden.

extern crate downcast_rs as dc;
extern crate nalgebra as na;
extern crate thiserror as te;

pub mod biome;
pub mod block;
pub mod chunk;
pub mod coords;
pub mod error;
pub mod generation;
pub mod pool;
pub mod provider;
pub mod random;
pub mod util;
pub mod volume;

pub use biome::{BiomeBuffer, BiomeGenerationSettings, BiomeGenerator, BiomeId, BiomeRegistry};
pub use block::BlockId;
pub use chunk::{Chunk, ChunkMap, ChunkStatus, ChunkStore};
pub use coords::ChunkCoordinate;
pub use error::{BoundsError, ConfigurationError, GenerationError};
pub use generation::{GenerationContext, GeneratorPopulator, Populator, PopulatorFlags, WorldSettings};
pub use pool::{GeneratedChunk, GenerationOutput, GenerationPool};
pub use provider::{ChunkProvider, PopulateObserver};
pub use volume::{BlockVolume, BlockVolumeBuffer, MutableBlockVolume};
