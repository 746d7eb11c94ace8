mod access;
mod basic;
mod column;
mod section;
mod store;

pub use basic::{ChunkPrimer, VerticalBounds};
pub use column::{Chunk, ChunkStatus, EntitySpawn, FeatureMarker};
pub use section::{ChunkSection, SECTION_VOLUME};
pub use store::{ChunkMap, ChunkStore};
