use std::f64::consts::{PI, TAU};

use crate::biome::ImmutableBiomeArea;
use crate::block::BlockId;
use crate::coords::{ChunkCoordinate, CHUNK_SIZE};
use crate::generation::{GenerationContext, GeneratorPopulator};
use crate::random::JavaRandom;
use crate::volume::MutableBlockVolume;

/// Tunnels started this many chunks away can still reach into the chunk being generated.
const CARVER_RANGE: i32 = 4;

/// Below this many blocks above the world floor carved space fills up with lava.
const LAVA_DEPTH: i32 = 10;

const CAVE_SALT: i64 = 0x5EED_CA7E;
const RAVINE_SALT: i64 = 0x5EED_AB15;

type DVec3 = na::Vector3<f64>;

/// One tunnel being carved: a chain of ellipsoids following a wandering direction.
struct Tunnel {
    pos: DVec3,
    yaw: f64,
    pitch: f64,
    width: f64,
    length: i32,
    /// Vertical radius relative to the horizontal one.
    stretch: f64,
}

/// Walks every chunk within [`CARVER_RANGE`] of the one being generated and lets `start` decide which
/// tunnels begin there. Seeding per origin chunk means a tunnel looks the same from every chunk it passes.
fn for_each_origin<F>(
    ctx: &GenerationContext,
    volume: &mut dyn MutableBlockVolume,
    salt: i64,
    mut start: F,
) -> anyhow::Result<()>
where
    F: FnMut(&mut dyn MutableBlockVolume, &mut JavaRandom, ChunkCoordinate) -> anyhow::Result<()>,
{
    let target = ChunkCoordinate::containing(volume.min());

    for dx in -CARVER_RANGE..=CARVER_RANGE {
        for dz in -CARVER_RANGE..=CARVER_RANGE {
            let origin = target.offset(dx, dz);
            let mut rng = ctx.stage_random(origin, salt);
            start(volume, &mut rng, origin)?;
        }
    }

    Ok(())
}

/// A random position inside the given chunk, `y` between `min_y` and `min_y + height`.
fn random_start(rng: &mut JavaRandom, origin: ChunkCoordinate, min_y: i32, height: i32) -> DVec3 {
    let corner = origin.block_origin();
    let x = corner.x + rng.next_int_bounded(CHUNK_SIZE);
    let y = min_y + rng.next_int_bounded(height.max(1));
    let z = corner.y + rng.next_int_bounded(CHUNK_SIZE);

    na::vector![x as f64, y as f64, z as f64]
}

fn carve_tunnel(
    ctx: &GenerationContext,
    volume: &mut dyn MutableBlockVolume,
    rng: &mut JavaRandom,
    mut tunnel: Tunnel,
) -> anyhow::Result<()> {
    for step in 0..tunnel.length {
        let radius = 1.5 + (step as f64 * PI / tunnel.length as f64).sin() * tunnel.width;

        tunnel.pos += na::vector![
            tunnel.yaw.cos() * tunnel.pitch.cos(),
            tunnel.pitch.sin(),
            tunnel.yaw.sin() * tunnel.pitch.cos()
        ];
        tunnel.pitch *= 0.7;
        tunnel.pitch += (rng.next_float() - rng.next_float()) as f64 * 0.1;
        tunnel.yaw += (rng.next_float() - rng.next_float()) as f64 * 0.3;

        carve_ellipsoid(ctx, volume, tunnel.pos, radius, radius * tunnel.stretch)?;
    }

    Ok(())
}

/// Hollows out the part of an ellipsoid that falls inside the volume. Bedrock and liquids are left alone.
fn carve_ellipsoid(
    ctx: &GenerationContext,
    volume: &mut dyn MutableBlockVolume,
    center: DVec3,
    radius: f64,
    vradius: f64,
) -> anyhow::Result<()> {
    let min = volume.min();
    let max = volume.max();

    let lo = |c: f64, r: f64, bound: i32| ((c - r).floor() as i32).max(bound);
    let hi = |c: f64, r: f64, bound: i32| ((c + r).ceil() as i32 + 1).min(bound);

    let (x0, x1) = (lo(center.x, radius, min.x), hi(center.x, radius, max.x));
    let (y0, y1) = (lo(center.y, vradius, min.y + 1), hi(center.y, vradius, max.y));
    let (z0, z1) = (lo(center.z, radius, min.z), hi(center.z, radius, max.z));

    if x0 >= x1 || y0 >= y1 || z0 >= z1 {
        return Ok(());
    }

    let lava_level = ctx.bounds().min_y() + LAVA_DEPTH;

    for x in x0..x1 {
        let dx = (x as f64 + 0.5 - center.x) / radius;
        for z in z0..z1 {
            let dz = (z as f64 + 0.5 - center.z) / radius;
            for y in y0..y1 {
                let dy = (y as f64 + 0.5 - center.y) / vradius;
                if dx * dx + dy * dy + dz * dz >= 1.0 {
                    continue;
                }

                let pos = na::vector![x, y, z];
                let block = volume.block(pos)?;
                if block == BlockId::BEDROCK || block.is_liquid() || block.is_air() {
                    continue;
                }

                let fill = if y < lava_level {
                    BlockId::LAVA
                } else {
                    BlockId::AIR
                };
                volume.set_block(pos, fill)?;
            }
        }
    }

    Ok(())
}

/// Winding cave systems.
#[derive(Copy, Clone, Debug)]
pub struct Caves {
    /// One in this many chunks starts caves at all.
    pub rarity: i32,
}

impl Default for Caves {
    fn default() -> Self {
        Self { rarity: 7 }
    }
}

impl GeneratorPopulator for Caves {
    fn populate(
        &self,
        ctx: &GenerationContext,
        volume: &mut dyn MutableBlockVolume,
        _biomes: &ImmutableBiomeArea,
    ) -> anyhow::Result<()> {
        let bounds = ctx.bounds();
        let rarity = self.rarity.max(1);

        for_each_origin(ctx, volume, CAVE_SALT, |volume, rng, origin| {
            let spread = rng.next_int_bounded(15) + 1;
            let spread = rng.next_int_bounded(spread) + 1;
            let count = rng.next_int_bounded(spread);
            if rng.next_int_bounded(rarity) != 0 {
                return Ok(());
            }

            for _ in 0..count {
                let height = rng.next_int_bounded((bounds.abs_height() / 2 - 8).max(1)) + 8;
                let tunnel = Tunnel {
                    pos: random_start(rng, origin, bounds.min_y(), height),
                    yaw: rng.next_float() as f64 * TAU,
                    pitch: (rng.next_float() as f64 - 0.5) * 0.25,
                    width: rng.next_float() as f64 * 2.0 + rng.next_float() as f64,
                    length: 40 + rng.next_int_bounded(60),
                    stretch: 1.0,
                };
                carve_tunnel(ctx, volume, rng, tunnel)?;
            }

            Ok(())
        })
    }
}

/// Long, narrow and very tall cuts through the terrain.
#[derive(Copy, Clone, Debug)]
pub struct Ravines {
    pub rarity: i32,
}

impl Default for Ravines {
    fn default() -> Self {
        Self { rarity: 50 }
    }
}

impl GeneratorPopulator for Ravines {
    fn populate(
        &self,
        ctx: &GenerationContext,
        volume: &mut dyn MutableBlockVolume,
        _biomes: &ImmutableBiomeArea,
    ) -> anyhow::Result<()> {
        let bounds = ctx.bounds();
        let rarity = self.rarity.max(1);

        for_each_origin(ctx, volume, RAVINE_SALT, |volume, rng, origin| {
            if rng.next_int_bounded(rarity) != 0 {
                return Ok(());
            }

            let height = rng.next_int_bounded((bounds.abs_height() / 4).max(1)) + bounds.abs_height() / 8;
            let tunnel = Tunnel {
                pos: random_start(rng, origin, bounds.min_y() + 20, height),
                yaw: rng.next_float() as f64 * TAU,
                pitch: (rng.next_float() as f64 - 0.5) * 0.125,
                width: (rng.next_float() as f64 * 2.0 + rng.next_float() as f64) * 2.0,
                length: 60 + rng.next_int_bounded(40),
                stretch: 3.0,
            };

            carve_tunnel(ctx, volume, rng, tunnel)
        })
    }
}
