use std::collections::HashMap;

use crate::coords::ChunkCoordinate;

use super::column::Chunk;

/// Where finished chunks live between generation and decoration.
///
/// Decoration stages get read-only access to the store so they can look at neighbouring chunks, the chunk
/// being decorated is taken out of the store for the duration.
pub trait ChunkStore: Send + Sync {
    fn get(&self, coord: ChunkCoordinate) -> Option<&Chunk>;
    fn get_mut(&mut self, coord: ChunkCoordinate) -> Option<&mut Chunk>;
    fn insert(&mut self, chunk: Chunk) -> Option<Chunk>;
    fn remove(&mut self, coord: ChunkCoordinate) -> Option<Chunk>;

    #[inline]
    fn contains(&self, coord: ChunkCoordinate) -> bool {
        self.get(coord).is_some()
    }
}

/// Plain in-memory chunk store.
#[derive(Clone, Debug, Default)]
pub struct ChunkMap {
    chunks: HashMap<ChunkCoordinate, Chunk>,
}

impl ChunkMap {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }
}

impl ChunkStore for ChunkMap {
    #[inline]
    fn get(&self, coord: ChunkCoordinate) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    #[inline]
    fn get_mut(&mut self, coord: ChunkCoordinate) -> Option<&mut Chunk> {
        self.chunks.get_mut(&coord)
    }

    #[inline]
    fn insert(&mut self, chunk: Chunk) -> Option<Chunk> {
        self.chunks.insert(chunk.coord(), chunk)
    }

    #[inline]
    fn remove(&mut self, coord: ChunkCoordinate) -> Option<Chunk> {
        self.chunks.remove(&coord)
    }
}
