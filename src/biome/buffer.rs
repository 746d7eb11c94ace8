use std::sync::Arc;

use crate::coords::CHUNK_SIZE_USIZE;
use crate::error::BiomeBufferError;
use crate::util::IVec2;

use super::BiomeId;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum BufferState {
    /// The buffer covers the footprint starting at `origin` (worldspace x, z).
    Attached { origin: IVec2 },
    /// The buffer's contents have been handed off and may not be used until it's reused.
    Detached,
}

/// A reusable 2D grid of biome IDs for one footprint.
///
/// The buffer keeps its backing storage across [`BiomeBuffer::reuse`] calls so generating a chunk
/// doesn't need to allocate. Contents are only meaningful while the buffer is attached. Reusing
/// does not clear the old contents, so whoever reuses it has to overwrite every cell.
#[derive(Clone, Debug)]
pub struct BiomeBuffer {
    biomes: Box<[BiomeId]>,
    width: usize,
    depth: usize,
    state: BufferState,
}

impl BiomeBuffer {
    /// A new attached buffer covering `width` x `depth` columns starting at `origin`.
    pub fn new(origin: IVec2, width: usize, depth: usize) -> Self {
        Self {
            biomes: vec![BiomeId::default(); width * depth].into_boxed_slice(),
            width,
            depth,
            state: BufferState::Attached { origin },
        }
    }

    /// A new buffer sized for one chunk footprint, detached until its first [`BiomeBuffer::reuse`].
    pub fn for_chunk() -> Self {
        let mut buffer = Self::new(IVec2::zeros(), CHUNK_SIZE_USIZE, CHUNK_SIZE_USIZE);
        buffer.state = BufferState::Detached;
        buffer
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width * self.depth
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        matches!(self.state, BufferState::Attached { .. })
    }

    /// Worldspace (x, z) of the first column, or `None` while detached.
    #[inline]
    pub fn origin(&self) -> Option<IVec2> {
        match self.state {
            BufferState::Attached { origin } => Some(origin),
            BufferState::Detached => None,
        }
    }

    /// Rebind the same storage to a new footprint. Existing contents are kept as-is.
    #[inline]
    pub fn reuse(&mut self, origin: IVec2) {
        self.state = BufferState::Attached { origin };
    }

    #[inline]
    fn index(&self, x: i32, z: i32) -> Result<usize, BiomeBufferError> {
        if !self.is_attached() {
            return Err(BiomeBufferError::Detached);
        }

        if x < 0 || z < 0 || x as usize >= self.width || z as usize >= self.depth {
            return Err(BiomeBufferError::IndexOutOfBounds {
                x,
                z,
                width: self.width,
                depth: self.depth,
            });
        }

        Ok(z as usize * self.width + x as usize)
    }

    /// Biome at the given buffer-local column.
    #[inline]
    pub fn get_biome(&self, x: i32, z: i32) -> Result<BiomeId, BiomeBufferError> {
        Ok(self.biomes[self.index(x, z)?])
    }

    #[inline]
    pub fn set_biome(&mut self, x: i32, z: i32, biome: BiomeId) -> Result<(), BiomeBufferError> {
        let idx = self.index(x, z)?;
        self.biomes[idx] = biome;
        Ok(())
    }

    /// Set the biome at a worldspace column inside the current footprint.
    #[inline]
    pub fn set_biome_ws(&mut self, x: i32, z: i32, biome: BiomeId) -> Result<(), BiomeBufferError> {
        let origin = self.origin().ok_or(BiomeBufferError::Detached)?;
        self.set_biome(x - origin.x, z - origin.y, biome)
    }

    #[inline]
    pub fn get_biome_ws(&self, x: i32, z: i32) -> Result<BiomeId, BiomeBufferError> {
        let origin = self.origin().ok_or(BiomeBufferError::Detached)?;
        self.get_biome(x - origin.x, z - origin.y)
    }

    /// Fill every cell of the footprint with the same biome.
    pub fn fill(&mut self, biome: BiomeId) -> Result<(), BiomeBufferError> {
        if !self.is_attached() {
            return Err(BiomeBufferError::Detached);
        }

        self.biomes.iter_mut().for_each(|b| *b = biome);
        Ok(())
    }

    /// Distinct biomes in the footprint, in the order they're first seen when scanning
    /// x-major (for each x, every z).
    pub fn unique_biomes(&self) -> Result<Vec<BiomeId>, BiomeBufferError> {
        let mut unique = Vec::new();

        for x in 0..self.width as i32 {
            for z in 0..self.depth as i32 {
                let biome = self.get_biome(x, z)?;
                if !unique.contains(&biome) {
                    unique.push(biome);
                }
            }
        }

        Ok(unique)
    }

    /// Read-only copy of the current footprint, handed to generation stages.
    pub fn immutable_copy(&self) -> Result<ImmutableBiomeArea, BiomeBufferError> {
        let origin = self.origin().ok_or(BiomeBufferError::Detached)?;

        Ok(ImmutableBiomeArea {
            origin,
            width: self.width,
            depth: self.depth,
            biomes: Arc::from(&self.biomes[..]),
        })
    }

    /// Hand off the contents as an owned snapshot (indexed `z * width + x`) and detach the buffer.
    /// Any access except [`BiomeBuffer::reuse`] fails until the buffer is reused.
    pub fn detach(&mut self) -> Result<Box<[BiomeId]>, BiomeBufferError> {
        if !self.is_attached() {
            return Err(BiomeBufferError::Detached);
        }

        self.state = BufferState::Detached;
        Ok(self.biomes.clone())
    }
}

/// Immutable view of the biomes over a footprint, addressed in worldspace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImmutableBiomeArea {
    origin: IVec2,
    width: usize,
    depth: usize,
    biomes: Arc<[BiomeId]>,
}

impl ImmutableBiomeArea {
    #[inline]
    pub fn origin(&self) -> IVec2 {
        self.origin
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn contains(&self, x: i32, z: i32) -> bool {
        let lx = x - self.origin.x;
        let lz = z - self.origin.y;

        lx >= 0 && lz >= 0 && (lx as usize) < self.width && (lz as usize) < self.depth
    }

    /// Biome at a worldspace column.
    pub fn get_biome(&self, x: i32, z: i32) -> Result<BiomeId, BiomeBufferError> {
        if !self.contains(x, z) {
            return Err(BiomeBufferError::IndexOutOfBounds {
                x: x - self.origin.x,
                z: z - self.origin.y,
                width: self.width,
                depth: self.depth,
            });
        }

        let lx = (x - self.origin.x) as usize;
        let lz = (z - self.origin.y) as usize;
        Ok(self.biomes[lz * self.width + lx])
    }

    #[inline]
    pub fn as_slice(&self) -> &[BiomeId] {
        &self.biomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(origin: IVec2) -> BiomeBuffer {
        let mut buffer = BiomeBuffer::new(origin, 16, 16);
        for x in 0..16 {
            for z in 0..16 {
                buffer.set_biome(x, z, BiomeId((x + z) as u8)).unwrap();
            }
        }
        buffer
    }

    #[test]
    fn reads_back_writes() {
        let buffer = filled(na::vector![32, -16]);

        assert_eq!(buffer.get_biome(3, 4), Ok(BiomeId(7)));
        assert_eq!(buffer.get_biome_ws(32 + 15, -16), Ok(BiomeId(15)));
    }

    #[test]
    fn out_of_bounds_is_an_index_error() {
        let buffer = filled(na::vector![0, 0]);

        assert!(matches!(
            buffer.get_biome(16, 0),
            Err(BiomeBufferError::IndexOutOfBounds { x: 16, z: 0, .. })
        ));
        assert!(matches!(
            buffer.get_biome(0, -1),
            Err(BiomeBufferError::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn detach_snapshot_and_lockout() {
        let mut buffer = filled(na::vector![0, 0]);
        let snapshot = buffer.detach().unwrap();

        assert_eq!(snapshot.len(), 256);
        assert_eq!(snapshot[4 * 16 + 3], BiomeId(7));

        assert_eq!(buffer.get_biome(0, 0), Err(BiomeBufferError::Detached));
        assert_eq!(
            buffer.set_biome(0, 0, BiomeId(1)),
            Err(BiomeBufferError::Detached)
        );
        assert_eq!(buffer.detach(), Err(BiomeBufferError::Detached));
        assert!(buffer.immutable_copy().is_err());
        assert_eq!(buffer.origin(), None);
    }

    #[test]
    fn reuse_behaves_like_fresh_buffer() {
        let mut buffer = filled(na::vector![0, 0]);
        buffer.detach().unwrap();

        buffer.reuse(na::vector![160, 320]);
        buffer.fill(BiomeId(9)).unwrap();
        buffer.set_biome_ws(161, 322, BiomeId(3)).unwrap();

        let mut fresh = BiomeBuffer::new(na::vector![160, 320], 16, 16);
        fresh.fill(BiomeId(9)).unwrap();
        fresh.set_biome_ws(161, 322, BiomeId(3)).unwrap();

        assert_eq!(buffer.detach().unwrap(), fresh.detach().unwrap());
    }

    #[test]
    fn snapshot_is_decoupled_from_reuse() {
        let mut buffer = filled(na::vector![0, 0]);
        let snapshot = buffer.detach().unwrap();

        buffer.reuse(na::vector![16, 0]);
        buffer.fill(BiomeId(200)).unwrap();

        assert_eq!(snapshot[0], BiomeId(0));
    }

    #[test]
    fn unique_biomes_keep_first_seen_order() {
        let mut buffer = BiomeBuffer::new(na::vector![0, 0], 16, 16);
        buffer.fill(BiomeId(4)).unwrap();
        buffer.set_biome(0, 5, BiomeId(2)).unwrap();
        buffer.set_biome(1, 0, BiomeId(8)).unwrap();

        assert_eq!(
            buffer.unique_biomes().unwrap(),
            vec![BiomeId(4), BiomeId(2), BiomeId(8)]
        );
    }

    #[test]
    fn immutable_area_is_worldspace() {
        let buffer = filled(na::vector![-16, 16]);
        let area = buffer.immutable_copy().unwrap();

        assert_eq!(area.get_biome(-16, 16), Ok(BiomeId(0)));
        assert_eq!(area.get_biome(-1, 31), Ok(BiomeId(30)));
        assert!(area.get_biome(0, 16).is_err());
    }
}
