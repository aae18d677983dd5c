use rand::Rng;

use crate::config::Extent;
use crate::seed::Density;
use crate::shapes::Shape;

/// How a shape is laid down on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Normal,

    /// Flipped horizontally
    Mirrored,
}

/// A double buffered toroidal grid.
///
/// `current` always holds the last committed generation. `next` is scratch space the engine
/// overwrites completely before swapping it in.
#[derive(Debug, Clone)]
pub struct Life {
    extent: Extent,
    current: Vec<bool>,
    next: Vec<bool>,
}

impl Life {
    /// Create an empty grid
    pub fn new(extent: Extent) -> Self {
        assert!(extent.height % 2 == 0, "height must be even");

        Self {
            extent,
            current: vec![false; extent.area()],
            next: vec![false; extent.area()],
        }
    }

    /// Create a grid with the given cells alive. Coordinates wrap around.
    pub fn with_cells<I>(extent: Extent, cells: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut life = Self::new(extent);

        for (x, y) in cells {
            life.set(x, y, true);
        }

        life
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// A read-only view of the committed generation.
    pub fn current(&self) -> Generation<'_> {
        Generation {
            extent: self.extent,
            cells: &self.current,
        }
    }

    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.current().is_alive(x, y)
    }

    /// Set a cell of the current generation. Coordinates wrap around.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        let i = (y % self.extent.height) * self.extent.width + x % self.extent.width;
        self.current[i] = alive;
    }

    pub fn clear(&mut self) {
        self.current.fill(false);
    }

    /// Number of live cells in the current generation
    pub fn population(&self) -> usize {
        self.current.iter().filter(|&&alive| alive).count()
    }

    /// Borrow the current generation for reading and the next one for writing.
    pub(crate) fn split_mut(&mut self) -> (Generation<'_>, &mut [bool]) {
        let current = Generation {
            extent: self.extent,
            cells: &self.current,
        };

        (current, &mut self.next)
    }

    /// Make the next generation the current one.
    pub(crate) fn commit(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    /// Bring every cell to life with probability `density`.
    pub fn fill_random<R: Rng + ?Sized>(&mut self, density: Density, rng: &mut R) {
        let p = density.get();

        for cell in self.current.iter_mut() {
            *cell = rng.random_bool(p);
        }
    }

    /// Copy `shape` with its top left corner at `(x, y)`. The shape wraps around the edges, and
    /// overwrites whatever was below it.
    pub fn add_shape(&mut self, x: usize, y: usize, shape: &Shape, orientation: Orientation) {
        for dy in 0..shape.height {
            for dx in 0..shape.width {
                let sx = match orientation {
                    Orientation::Normal => dx,
                    Orientation::Mirrored => shape.width - 1 - dx,
                };

                self.set(x + dx, y + dy, shape.is_alive(sx, dy));
            }
        }
    }
}

/// A committed generation. Reads wrap around the edges of the grid.
#[derive(Debug, Clone, Copy)]
pub struct Generation<'a> {
    extent: Extent,
    cells: &'a [bool],
}

impl<'a> Generation<'a> {
    pub fn extent(&self) -> Extent {
        self.extent
    }

    #[inline]
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.extent.width + x]
    }

    /// Count the live cells among the 8 neighbors of `(x, y)`, on a torus.
    #[inline]
    pub fn alive_neighbors(&self, x: usize, y: usize) -> u8 {
        let Extent { width, height } = self.extent;

        // Offsets of -1, 0 and 1, shifted to stay unsigned
        let xs = [(x + width - 1) % width, x, (x + 1) % width];
        let ys = [(y + height - 1) % height, y, (y + 1) % height];

        let mut n = 0;
        for (j, &ny) in ys.iter().enumerate() {
            for (i, &nx) in xs.iter().enumerate() {
                if (i, j) == (1, 1) {
                    continue;
                }

                n += self.is_alive(nx, ny) as u8;
            }
        }

        n
    }

    /// Rows of the generation, top to bottom
    pub fn rows(self) -> impl Iterator<Item = &'a [bool]> {
        self.cells.chunks(self.extent.width)
    }
}
