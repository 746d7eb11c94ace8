use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use worldgen::{
    generation::vanilla::{self, GeneratorSettings},
    ChunkCoordinate, ChunkMap, ChunkStore, GenerationPool, WorldSettings,
};

const DEFAULT_RADIUS: i32 = 4;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(seed) => seed.parse::<u64>().context("seed must be an unsigned integer")?,
        None => 0,
    };
    let radius = match args.next() {
        Some(radius) => radius.parse::<i32>().context("radius must be an integer")?,
        None => DEFAULT_RADIUS,
    };

    let provider = Arc::new(vanilla::build_provider(
        WorldSettings::with_seed(seed),
        &GeneratorSettings::default(),
    )?);

    let coords = (-radius..=radius)
        .flat_map(|x| (-radius..=radius).map(move |z| ChunkCoordinate::new(x, z)))
        .collect::<Vec<_>>();

    let start = Instant::now();
    let (pool, output) = GenerationPool::new(Arc::clone(&provider));
    pool.submit_all(coords.iter().copied());
    pool.join();

    let mut store = ChunkMap::new();
    for generated in output.iter_poll() {
        store.insert(generated.into_result()?);
    }
    log::info!(
        "generated terrain of {} chunks in {:?}",
        store.len(),
        start.elapsed()
    );

    // The outer ring only exists so the interior has neighbours to look at.
    let start = Instant::now();
    let mut populated = 0;
    for coord in &coords {
        if coord.x.abs() < radius && coord.z.abs() < radius {
            provider.populate(&mut store, *coord)?;
            populated += 1;
        }
    }

    let (features, entities) = store.iter().fold((0, 0), |(f, e), chunk| {
        (f + chunk.features().len(), e + chunk.entities().len())
    });
    log::info!(
        "populated {populated} chunks in {:?}: {features} features, {entities} creatures",
        start.elapsed()
    );

    Ok(())
}
