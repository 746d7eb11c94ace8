use std::sync::Arc;

use crate::biome::ImmutableBiomeArea;
use crate::block::BlockId;
use crate::chunk::{Chunk, ChunkStore, FeatureMarker};
use crate::coords::{ChunkCoordinate, CHUNK_SIZE};
use crate::generation::{GenerationContext, GeneratorPopulator, Populator, PopulatorFlags};
use crate::random::JavaRandom;
use crate::util::IVec3;
use crate::volume::{Bounds3D, MutableBlockVolume};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StructureKind {
    Mineshaft,
    Village,
    Stronghold,
    Temple,
    Monument,
}

impl StructureKind {
    pub const ALL: [StructureKind; 5] = [
        Self::Mineshaft,
        Self::Village,
        Self::Stronghold,
        Self::Temple,
        Self::Monument,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Mineshaft => "mineshaft",
            Self::Village => "village",
            Self::Stronghold => "stronghold",
            Self::Temple => "temple",
            Self::Monument => "monument",
        }
    }

    /// Flag raised during decoration when a structure of this kind was placed.
    pub fn flag(self) -> &'static str {
        match self {
            Self::Mineshaft => "structure:mineshaft",
            Self::Village => "structure:village",
            Self::Stronghold => "structure:stronghold",
            Self::Temple => "structure:temple",
            Self::Monument => "structure:monument",
        }
    }

    /// One in this many chunks holds a structure of this kind.
    fn rarity(self) -> i32 {
        match self {
            Self::Mineshaft => 25,
            Self::Village => 40,
            Self::Stronghold => 120,
            Self::Temple => 60,
            Self::Monument => 80,
        }
    }

    /// Width, height and depth of the structure's box.
    fn size(self) -> [i32; 3] {
        match self {
            Self::Mineshaft => [14, 5, 5],
            Self::Village => [11, 6, 11],
            Self::Stronghold => [13, 7, 13],
            Self::Temple => [9, 8, 9],
            Self::Monument => [16, 10, 16],
        }
    }

    fn salt(self) -> i64 {
        0x57C7_0000 + self as i64
    }

    /// Floor and wall blocks.
    fn palette(self) -> (BlockId, BlockId) {
        match self {
            Self::Mineshaft => (BlockId::PLANKS, BlockId::LOG),
            Self::Village => (BlockId::COBBLESTONE, BlockId::PLANKS),
            Self::Stronghold => (BlockId::MOSSY_COBBLESTONE, BlockId::COBBLESTONE),
            Self::Temple => (BlockId::SANDSTONE, BlockId::SANDSTONE),
            Self::Monument => (BlockId::COBBLESTONE, BlockId::STONE),
        }
    }

    fn base_y(self, ctx: &GenerationContext, rng: &mut JavaRandom) -> i32 {
        let min_y = ctx.bounds().min_y();
        let sea_level = ctx.sea_level();

        match self {
            Self::Mineshaft => min_y + 10 + rng.next_int_bounded((sea_level - min_y - 20).max(1)),
            Self::Stronghold => min_y + 5 + rng.next_int_bounded(20),
            Self::Village | Self::Temple => sea_level,
            Self::Monument => sea_level - self.size()[1],
        }
    }
}

/// Where a structure sits, as a worldspace box `[min, max)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StructurePlacement {
    pub kind: StructureKind,
    pub min: IVec3,
    pub max: IVec3,
}

impl StructurePlacement {
    #[inline]
    fn contains(&self, pos: IVec3) -> bool {
        Bounds3D::contains(&(self.min..self.max), pos)
    }

    fn is_shell(&self, pos: IVec3) -> bool {
        pos.x == self.min.x
            || pos.x == self.max.x - 1
            || pos.z == self.min.z
            || pos.z == self.max.z - 1
            || pos.y == self.max.y - 1
    }

    fn floor_center(&self) -> IVec3 {
        na::vector![
            (self.min.x + self.max.x) / 2,
            self.min.y + 1,
            (self.min.z + self.max.z) / 2
        ]
    }
}

/// Decides where structures of one kind go. Both the terrain and the decoration side of a structure
/// ask the same generator, so they always agree on placement.
#[derive(Debug)]
pub struct StructureGenerator {
    kind: StructureKind,
}

impl StructureGenerator {
    pub fn new(kind: StructureKind) -> Arc<Self> {
        Arc::new(Self { kind })
    }

    #[inline]
    pub fn kind(&self) -> StructureKind {
        self.kind
    }

    /// The structure starting in the given chunk, if there is one. Structures never leave their chunk.
    pub fn placement(&self, ctx: &GenerationContext, coord: ChunkCoordinate) -> Option<StructurePlacement> {
        let mut rng = ctx.stage_random(coord, self.kind.salt());
        if rng.next_int_bounded(self.kind.rarity()) != 0 {
            return None;
        }

        let [width, height, depth] = self.kind.size();
        let corner = coord.block_origin();
        let x = corner.x + rng.next_int_bounded(CHUNK_SIZE - width + 1);
        let z = corner.y + rng.next_int_bounded(CHUNK_SIZE - depth + 1);
        let y = self.kind.base_y(ctx, &mut rng);

        let bounds = ctx.bounds();
        if y < bounds.min_y() || y + height > bounds.max_y() {
            return None;
        }

        Some(StructurePlacement {
            kind: self.kind,
            min: na::vector![x, y, z],
            max: na::vector![x + width, y + height, z + depth],
        })
    }

    pub fn carver(self: &Arc<Self>) -> StructureCarver {
        StructureCarver(Arc::clone(self))
    }

    pub fn decorator(self: &Arc<Self>) -> StructureDecorator {
        StructureDecorator(Arc::clone(self))
    }
}

/// Terrain side of a structure: carves out its shell.
#[derive(Clone, Debug)]
pub struct StructureCarver(Arc<StructureGenerator>);

impl StructureCarver {
    #[inline]
    pub fn generator(&self) -> &Arc<StructureGenerator> {
        &self.0
    }
}

impl GeneratorPopulator for StructureCarver {
    fn populate(
        &self,
        ctx: &GenerationContext,
        volume: &mut dyn MutableBlockVolume,
        _biomes: &ImmutableBiomeArea,
    ) -> anyhow::Result<()> {
        let coord = ChunkCoordinate::containing(volume.min());
        let placement = match self.0.placement(ctx, coord) {
            Some(placement) => placement,
            None => return Ok(()),
        };

        let (floor, wall) = placement.kind.palette();

        for x in placement.min.x..placement.max.x {
            for z in placement.min.z..placement.max.z {
                for y in placement.min.y..placement.max.y {
                    let pos = na::vector![x, y, z];
                    if !volume.contains(pos) {
                        continue;
                    }

                    let block = if y == placement.min.y {
                        floor
                    } else if placement.is_shell(pos) {
                        wall
                    } else {
                        BlockId::AIR
                    };
                    volume.set_block(pos, block)?;
                }
            }
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        self.0.kind.name()
    }
}

/// Decoration side of a structure: records the structure in the chunk, furnishes it and raises the
/// structure's flag for the populators that come after.
#[derive(Clone, Debug)]
pub struct StructureDecorator(Arc<StructureGenerator>);

impl StructureDecorator {
    #[inline]
    pub fn generator(&self) -> &Arc<StructureGenerator> {
        &self.0
    }

    fn decorate(&self, ctx: &GenerationContext, chunk: &mut Chunk) -> anyhow::Result<bool> {
        let placement = match self.0.placement(ctx, chunk.coord()) {
            Some(placement) => placement,
            None => return Ok(false),
        };

        let inside = placement.floor_center();
        debug_assert!(placement.contains(inside));

        match placement.kind {
            StructureKind::Village => chunk.add_entity("villager", inside),
            StructureKind::Monument => chunk.add_entity("guardian", inside),
            StructureKind::Stronghold => {
                chunk.set_block(inside, BlockId::SPAWNER)?;
            }
            StructureKind::Mineshaft | StructureKind::Temple => {
                chunk.set_block(inside, BlockId::CHEST)?;
            }
        }

        chunk.add_feature(FeatureMarker::new(
            placement.kind.name(),
            placement.min,
            placement.max,
        ));

        Ok(true)
    }
}

impl Populator for StructureDecorator {
    fn populate(
        &self,
        ctx: &GenerationContext,
        chunk: &mut Chunk,
        _rng: &mut JavaRandom,
    ) -> anyhow::Result<()> {
        self.decorate(ctx, chunk)?;
        Ok(())
    }

    fn populate_flagged(
        &self,
        ctx: &GenerationContext,
        _store: &dyn ChunkStore,
        chunk: &mut Chunk,
        _rng: &mut JavaRandom,
        flags: &mut PopulatorFlags,
    ) -> anyhow::Result<()> {
        if self.decorate(ctx, chunk)? {
            flags.raise(self.0.kind.flag());
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        self.0.kind.name()
    }
}
