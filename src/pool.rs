use std::cell::RefCell;
use std::sync::{
    mpsc::{self, Receiver, Sender},
    Arc, Mutex, MutexGuard, PoisonError,
};

use threadpool::ThreadPool;

use crate::biome::BiomeBuffer;
use crate::chunk::Chunk;
use crate::coords::ChunkCoordinate;
use crate::error::GenerationResult;
use crate::provider::ChunkProvider;

thread_local! {
    // Every worker keeps its own buffer so terrain generation never contends on the provider's.
    static BIOMES: RefCell<BiomeBuffer> = RefCell::new(BiomeBuffer::for_chunk());
}

/// Terrain of one chunk, or why it couldn't be generated.
#[derive(Debug)]
pub struct GeneratedChunk {
    pub coord: ChunkCoordinate,
    pub result: GenerationResult<Chunk>,
}

impl GeneratedChunk {
    pub fn into_result(self) -> GenerationResult<Chunk> {
        self.result
    }
}

pub struct GenerationOutput(Mutex<Receiver<GeneratedChunk>>);

impl From<Receiver<GeneratedChunk>> for GenerationOutput {
    fn from(rx: Receiver<GeneratedChunk>) -> Self {
        Self(Mutex::new(rx))
    }
}

impl GenerationOutput {
    fn lock(&self) -> MutexGuard<'_, Receiver<GeneratedChunk>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock the internal mutex and poll the channel once.
    /// This locks once every call so try not to call it too much.
    pub fn poll(&self) -> Option<GeneratedChunk> {
        self.lock().try_recv().ok()
    }

    /// Locks the internal mutex and returns an iterator over everything that's finished so far.
    /// This is preferred over [`GenerationOutput::poll`] whenever possible due to performance.
    pub fn iter_poll(&self) -> GeneratedIter<'_> {
        GeneratedIter {
            channel: self.lock(),
        }
    }
}

pub struct GeneratedIter<'a> {
    channel: MutexGuard<'a, Receiver<GeneratedChunk>>,
}

impl<'a> Iterator for GeneratedIter<'a> {
    type Item = GeneratedChunk;

    fn next(&mut self) -> Option<Self::Item> {
        self.channel.try_recv().ok()
    }
}

/// Generates chunk terrain on a pool of worker threads. Results arrive in no particular order.
///
/// Only the terrain phase runs here. Populating needs the neighbours of a chunk, so it's left to
/// whoever owns the [`ChunkStore`](crate::chunk::ChunkStore).
pub struct GenerationPool {
    provider: Arc<ChunkProvider>,
    pool: Mutex<ThreadPool>,
    tx: Mutex<Sender<GeneratedChunk>>,
}

impl GenerationPool {
    /// A pool with one worker per CPU.
    pub fn new(provider: Arc<ChunkProvider>) -> (Self, GenerationOutput) {
        Self::with_pool(provider, ThreadPool::default())
    }

    pub fn with_threads(provider: Arc<ChunkProvider>, threads: usize) -> (Self, GenerationOutput) {
        let pool = threadpool::Builder::new()
            .num_threads(threads.max(1))
            .thread_name("worldgen-worker".into())
            .build();

        Self::with_pool(provider, pool)
    }

    fn with_pool(provider: Arc<ChunkProvider>, pool: ThreadPool) -> (Self, GenerationOutput) {
        let (tx, rx) = mpsc::channel();

        (
            Self {
                provider,
                pool: Mutex::new(pool),
                tx: Mutex::new(tx),
            },
            rx.into(),
        )
    }

    #[inline]
    pub fn provider(&self) -> &Arc<ChunkProvider> {
        &self.provider
    }

    pub fn submit(&self, coord: ChunkCoordinate) {
        let tx = self
            .tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let provider = Arc::clone(&self.provider);

        self.pool
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .execute(move || {
                let result = BIOMES
                    .with(|biomes| provider.provide_chunk_with_buffer(coord, &mut biomes.borrow_mut()));

                if tx.send(GeneratedChunk { coord, result }).is_err() {
                    log::warn!("generation output was dropped, discarding chunk {coord}");
                }
            });
    }

    pub fn submit_all<I>(&self, coords: I)
    where
        I: IntoIterator<Item = ChunkCoordinate>,
    {
        for coord in coords {
            self.submit(coord);
        }
    }

    /// Number of jobs that haven't finished yet.
    pub fn pending(&self) -> usize {
        let pool = self.pool.lock().unwrap_or_else(PoisonError::into_inner);
        pool.queued_count() + pool.active_count()
    }

    /// Block until every submitted job has finished.
    pub fn join(&self) {
        self.pool
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .join();
    }
}
