use crate::AGE_STEP;
use crate::Age;
use crate::MAX_AGE;
use crate::color::LinearColor;
use crate::color::age_to_color;
use crate::config::Extent;
use crate::life::Generation;

/// Block characters used to draw two rows of cells in a single terminal row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Space,
    Upper,
    Lower,
    Full,
}

impl Glyph {
    pub const fn as_char(self) -> char {
        match self {
            Glyph::Space => ' ',
            Glyph::Upper => '\u{2580}',
            Glyph::Lower => '\u{2584}',
            Glyph::Full => '\u{2588}',
        }
    }
}

/// One of the two automaton cells packed in a terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubCell {
    pub alive: bool,

    /// Ticks since death, in steps of [`AGE_STEP`]. Zero while alive.
    pub age: Age,
}

impl SubCell {
    /// A cell that has been dead for as long as we care to remember
    pub const FADED: Self = Self {
        alive: false,
        age: MAX_AGE,
    };

    pub fn update(&mut self, alive: bool) {
        self.alive = alive;

        if alive {
            self.age = 0;
        } else {
            self.age = self.age.saturating_add(AGE_STEP).min(MAX_AGE);
        }
    }
}

/// How a terminal cell is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub glyph: Glyph,
    pub fg: LinearColor,
    pub bg: LinearColor,
}

/// Foreground of the sub-cell a half block depicts
fn depicted(sub: SubCell) -> LinearColor {
    if sub.age == 0 {
        LinearColor::WHITE
    } else {
        age_to_color(sub.age)
    }
}

/// Choose the glyph and colors for a pair of sub-cells.
///
/// Live sub-cells are drawn in white. When both halves are dead, the one that died most recently
/// becomes the foreground half block (the lower one on ties), so trails stay visible. Only once
/// both halves have fully faded is the cell left blank.
pub fn compose(top: SubCell, bottom: SubCell) -> Appearance {
    let (glyph, fg, bg) = match (top.alive, bottom.alive) {
        (true, true) => (Glyph::Full, LinearColor::WHITE, LinearColor::WHITE),
        (true, false) => (Glyph::Upper, depicted(top), age_to_color(bottom.age)),
        (false, true) => (Glyph::Lower, depicted(bottom), age_to_color(top.age)),
        (false, false) if top.age == MAX_AGE && bottom.age == MAX_AGE => {
            let bg = age_to_color(top.age.min(bottom.age));
            (Glyph::Space, bg, bg)
        }
        (false, false) if top.age < bottom.age => {
            (Glyph::Upper, depicted(top), age_to_color(bottom.age))
        }
        (false, false) => (Glyph::Lower, depicted(bottom), age_to_color(top.age)),
    };

    Appearance { glyph, fg, bg }
}

/// A terminal cell: two sub-cells and how they are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub top: SubCell,
    pub bottom: SubCell,
    pub look: Appearance,
}

impl Cell {
    pub fn new() -> Self {
        let (top, bottom) = (SubCell::FADED, SubCell::FADED);

        Self {
            top,
            bottom,
            look: compose(top, bottom),
        }
    }

    pub fn update(&mut self, top: bool, bottom: bool) {
        self.top.update(top);
        self.bottom.update(bottom);
        self.look = compose(self.top, self.bottom);
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}

/// The terminal's view of the automaton. Every terminal cell covers two rows of the grid.
pub struct World {
    /// Terminal cells per row
    width: usize,

    cells: Vec<Cell>,
}

impl World {
    pub fn new(extent: Extent) -> Self {
        assert!(extent.height % 2 == 0, "height must be even");

        Self {
            width: extent.width,
            cells: vec![Cell::new(); extent.width * extent.rows()],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of terminal rows
    pub fn height(&self) -> usize {
        self.cells.len() / self.width
    }

    pub fn cell(&self, x: usize, row: usize) -> &Cell {
        &self.cells[row * self.width + x]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Age every sub-cell and recompute glyphs from a committed generation.
    pub fn ingest(&mut self, generation: Generation<'_>) {
        debug_assert_eq!(generation.extent().width, self.width);
        debug_assert_eq!(generation.extent().rows(), self.height());

        let mut pairs = generation.rows();

        for cells in self.cells.chunks_mut(self.width) {
            let (Some(top), Some(bottom)) = (pairs.next(), pairs.next()) else {
                unreachable!("the generation has two rows per terminal row")
            };

            for ((cell, &t), &b) in cells.iter_mut().zip(top).zip(bottom) {
                cell.update(t, b);
            }
        }
    }
}
