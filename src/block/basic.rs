use serde::{Deserialize, Serialize};

#[derive(Default, Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
pub struct BlockId(u32);

impl BlockId {
    pub const AIR: Self = Self::new(0);
    pub const STONE: Self = Self::new(1);
    pub const GRASS: Self = Self::new(2);
    pub const DIRT: Self = Self::new(3);
    pub const COBBLESTONE: Self = Self::new(4);
    pub const PLANKS: Self = Self::new(5);
    pub const BEDROCK: Self = Self::new(7);
    pub const WATER: Self = Self::new(9);
    pub const LAVA: Self = Self::new(11);
    pub const SAND: Self = Self::new(12);
    pub const GRAVEL: Self = Self::new(13);
    pub const ORE_IRON: Self = Self::new(15);
    pub const ORE_COAL: Self = Self::new(16);
    pub const LOG: Self = Self::new(17);
    pub const LEAVES: Self = Self::new(18);
    pub const SANDSTONE: Self = Self::new(24);
    pub const MOSSY_COBBLESTONE: Self = Self::new(48);
    pub const SPAWNER: Self = Self::new(52);
    pub const CHEST: Self = Self::new(54);
    pub const SNOW: Self = Self::new(78);
    pub const ICE: Self = Self::new(79);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self == Self::AIR
    }

    #[inline]
    pub fn is_liquid(self) -> bool {
        self == Self::WATER || self == Self::LAVA
    }

    /// Whether this block counts as solid ground for the purpose of placing things on top of it.
    #[inline]
    pub fn is_solid(self) -> bool {
        !self.is_air() && !self.is_liquid() && self != Self::LEAVES && self != Self::SNOW
    }
}

impl From<u32> for BlockId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<BlockId> for u32 {
    fn from(val: BlockId) -> Self {
        val.0
    }
}
