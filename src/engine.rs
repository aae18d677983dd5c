use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;
use tracing::trace;

use crate::life::Generation;
use crate::life::Life;
use crate::rule;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Evolves a [`Life`] grid one generation at a time, splitting the work in square tiles that
/// are computed concurrently.
pub struct Engine {
    life: Life,

    /// Side length of a tile
    tile: usize,

    pool: ThreadPool,

    /// Number of generations committed so far
    generation: u64,
}

impl Engine {
    /// Take ownership of `life`.
    ///
    /// # Panics
    ///
    /// If `tile` is zero, or does not divide both dimensions of the grid.
    pub fn new(life: Life, tile: usize, threads: Option<usize>) -> Result<Self, EngineError> {
        let extent = life.extent();

        assert!(tile > 0, "tile size must be positive");
        assert!(
            extent.width % tile == 0 && extent.height % tile == 0,
            "tile size {tile} must divide the grid extent {}x{}",
            extent.width,
            extent.height
        );

        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("life-tile-{i}"));
        if let Some(threads) = threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build()?;

        debug!(
            width = extent.width,
            height = extent.height,
            tile,
            threads = pool.current_num_threads(),
            "engine ready"
        );

        Ok(Self {
            life,
            tile,
            pool,
            generation: 0,
        })
    }

    pub fn life(&self) -> &Life {
        &self.life
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advance the grid by a single generation.
    ///
    /// Returns once every tile has been computed and the new generation is committed.
    pub fn evolve(&mut self) {
        let tile = self.tile;
        let (current, next) = self.life.split_mut();
        let tiles = Tile::split(next, current, tile);
        let count = tiles.len();

        // The parallel iterator only returns once all tiles are done, so nothing below can see a
        // half computed generation.
        self.pool
            .install(|| tiles.into_par_iter().for_each(|t| t.evolve(current)));

        self.life.commit();
        self.generation += 1;

        trace!(generation = self.generation, tiles = count, "generation committed");
    }
}

/// A square region of the next generation, handed to a single task.
struct Tile<'a> {
    /// Grid coordinates of the top left cell
    x: usize,
    y: usize,

    /// One span of `next` per row of the tile
    rows: Vec<&'a mut [bool]>,
}

impl<'a> Tile<'a> {
    /// Cut `next` into tiles of side `side`, in row-major tile order.
    fn split(next: &'a mut [bool], current: Generation<'_>, side: usize) -> Vec<Tile<'a>> {
        let width = current.extent().width;
        let height = current.extent().height;
        let (across, down) = (width / side, height / side);

        let mut tiles: Vec<Tile<'a>> = (0..across * down)
            .map(|i| Tile {
                x: (i % across) * side,
                y: (i / across) * side,
                rows: Vec::with_capacity(side),
            })
            .collect();

        for (y, row) in next.chunks_mut(width).enumerate() {
            for (i, span) in row.chunks_mut(side).enumerate() {
                tiles[(y / side) * across + i].rows.push(span);
            }
        }

        tiles
    }

    fn evolve(self, current: Generation<'_>) {
        for (dy, row) in self.rows.into_iter().enumerate() {
            let y = self.y + dy;

            for (dx, cell) in row.iter_mut().enumerate() {
                let x = self.x + dx;

                *cell = rule::next_state(current.is_alive(x, y), current.alive_neighbors(x, y));
            }
        }
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::config::Extent;

    const GLIDER: [(usize, usize); 5] = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];

    fn engine(life: Life, tile: usize) -> Engine {
        Engine::new(life, tile, Some(2)).unwrap()
    }

    fn alive_cells(life: &Life) -> Vec<(usize, usize)> {
        let extent = life.extent();

        (0..extent.height)
            .flat_map(|y| (0..extent.width).map(move |x| (x, y)))
            .filter(|&(x, y)| life.is_alive(x, y))
            .collect()
    }

    /// Evolve the whole grid in a single sequential pass.
    fn reference_step(life: &Life) -> Life {
        let extent = life.extent();
        let current = life.current();
        let mut next = Life::new(extent);

        for y in 0..extent.height {
            for x in 0..extent.width {
                let alive = rule::next_state(current.is_alive(x, y), current.alive_neighbors(x, y));
                next.set(x, y, alive);
            }
        }

        next
    }

    #[test]
    fn glider_moves_diagonally() {
        let extent = Extent::new(16, 16);
        let start = Life::with_cells(extent, GLIDER.map(|(x, y)| (x + 5, y + 5)));
        let mut engine = engine(start, 8);

        for lap in 1..=4 {
            for _ in 0..4 {
                engine.evolve();
            }

            let mut expected: Vec<_> = GLIDER
                .iter()
                .map(|&(x, y)| ((x + 5 + lap) % 16, (y + 5 + lap) % 16))
                .collect();
            expected.sort_by_key(|&(x, y)| (y, x));

            assert_eq!(alive_cells(engine.life()), expected, "after {} ticks", lap * 4);
        }

        assert_eq!(engine.generation(), 16);
    }

    #[test]
    fn glider_intermediate_phase() {
        // Generation 1 of the glider, hand computed:
        //   . . .
        //   o . o
        //   . o o
        //   . o .
        let extent = Extent::new(16, 16);
        let mut engine = engine(Life::with_cells(extent, GLIDER), 8);
        engine.evolve();

        assert_eq!(
            alive_cells(engine.life()),
            vec![(0, 1), (2, 1), (1, 2), (2, 2), (1, 3)]
        );
    }

    #[test]
    fn glider_crosses_the_edge() {
        let extent = Extent::new(16, 16);
        let start = Life::with_cells(extent, GLIDER.map(|(x, y)| (x + 14, y + 14)));
        let mut engine = engine(start, 8);

        for _ in 0..4 {
            engine.evolve();
        }

        let mut expected: Vec<_> = GLIDER
            .iter()
            .map(|&(x, y)| ((x + 15) % 16, (y + 15) % 16))
            .collect();
        expected.sort_by_key(|&(x, y)| (y, x));

        assert_eq!(alive_cells(engine.life()), expected);
    }

    #[test]
    fn corner_cells_are_adjacent() {
        let extent = Extent::new(8, 8);
        let life = Life::with_cells(extent, [(0, 0), (7, 0), (0, 7), (7, 7)]);
        let mut engine = engine(life, 8);
        engine.evolve();

        // The four corners form a block across the seams, which is still life
        assert_eq!(alive_cells(engine.life()), vec![(0, 0), (7, 0), (0, 7), (7, 7)]);
    }

    #[test]
    fn blinker_rotates() {
        let extent = Extent::new(8, 8);
        let life = Life::with_cells(extent, [(3, 4), (4, 4), (5, 4)]);
        let mut engine = engine(life, 4);

        engine.evolve();
        assert_eq!(alive_cells(engine.life()), vec![(4, 3), (4, 4), (4, 5)]);

        engine.evolve();
        assert_eq!(alive_cells(engine.life()), vec![(3, 4), (4, 4), (5, 4)]);
    }

    #[test]
    #[should_panic(expected = "must divide")]
    fn indivisible_tile_panics() {
        let _ = Engine::new(Life::new(Extent::new(16, 16)), 3, Some(1));
    }

    proptest! {
        #[test]
        fn tiles_match_single_pass(
            tile in prop::sample::select(vec![1usize, 2, 4, 8]),
            across in 1usize..4,
            down in 1usize..4,
            seed in any::<u64>(),
            steps in 1usize..4,
        ) {
            let extent = Extent::new(8 * across, 8 * down);
            let mut rng = StdRng::seed_from_u64(seed);
            let mut reference = Life::new(extent);
            for y in 0..extent.height {
                for x in 0..extent.width {
                    reference.set(x, y, rng.random_bool(0.4));
                }
            }

            let mut engine = engine(reference.clone(), tile);

            for _ in 0..steps {
                reference = reference_step(&reference);
                engine.evolve();

                prop_assert_eq!(alive_cells(engine.life()), alive_cells(&reference));
            }
        }
    }
}
