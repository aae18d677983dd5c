use std::time::Duration;

use clap::Parser;
use clap::builder::RangedU64ValueParser;
use thiserror::Error;

use crate::seed::Density;
use crate::seed::Pattern;

/// Side length of the square tiles the engine evolves concurrently.
pub const TILE_SIZE: usize = 8;

/// Time between two generations.
pub const TICK: Duration = Duration::from_millis(60);

/// Columns reserved for the left and right border.
const COLUMN_MARGIN: usize = 2;

/// Sub-rows reserved for the top and bottom border. Each border line takes a full terminal row,
/// which is two sub-rows.
const ROW_MARGIN: usize = 4;

/// Two sub-rows are packed per terminal row, so the height has to stay a multiple of twice the
/// tile size for every terminal row to hold a full tile row.
const HEIGHT_MULTIPLE: usize = 2 * TILE_SIZE;

/// Size of the automaton, in cells.
///
/// `height` counts logical rows, that is, two per terminal row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub width: usize,
    pub height: usize,
}

impl Extent {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    /// Number of terminal rows needed to show this extent
    pub const fn rows(&self) -> usize {
        self.height / 2
    }
}

/// The usable part of the terminal, in columns and sub-rows. The automaton is centered in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Terminal of {cols}x{rows} is too small, need at least {min_cols}x{min_rows}")]
    TooSmall {
        cols: u16,
        rows: u16,
        min_cols: usize,
        min_rows: usize,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Extent of the automaton
    pub extent: Extent,

    /// Area the automaton is centered in
    pub window: Window,

    /// Side of the tiles evolved concurrently
    pub tile: usize,

    /// Pacing between generations
    pub tick: Duration,

    /// Worker threads for the engine. `None` lets the pool decide.
    pub threads: Option<usize>,
}

impl Config {
    /// Derive the automaton extent from a terminal of `cols` columns and `rows` rows.
    pub fn from_terminal(cols: u16, rows: u16) -> Result<Self, ConfigError> {
        let width = (cols as usize).saturating_sub(COLUMN_MARGIN);
        let height = (rows as usize * 2).saturating_sub(ROW_MARGIN);

        let extent = Extent::new(
            width - width % TILE_SIZE,
            height - height % HEIGHT_MULTIPLE,
        );

        if extent.width == 0 || extent.height == 0 {
            return Err(ConfigError::TooSmall {
                cols,
                rows,
                min_cols: TILE_SIZE + COLUMN_MARGIN,
                min_rows: (HEIGHT_MULTIPLE + ROW_MARGIN) / 2,
            });
        }

        Ok(Self {
            extent,
            window: Window { width, height },
            tile: TILE_SIZE,
            tick: TICK,
            threads: None,
        })
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }
}

/// Game of Life with fading trails, drawn in the terminal.
#[derive(Debug, Clone, Parser)]
#[command(name = "lifetrail", version)]
pub struct Options {
    /// Seed pattern, by name or menu index. Prompts when left out
    #[arg(short, long)]
    pub pattern: Option<Pattern>,

    /// Fill density of the random pattern, in [0, 1]
    #[arg(short, long, default_value = "0.5")]
    pub density: Density,

    /// Seed for the random number generator
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Engine worker threads
    #[arg(short, long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub threads: Option<usize>,
}

#[cfg(test)]
mod test {
    use std::error::Error as _;

    use clap::error::ErrorKind;

    use super::*;
    use crate::seed::SeedError;

    #[test]
    fn extent_rounds_down_to_tiles() {
        let config = Config::from_terminal(80, 24).unwrap();

        // 78 columns -> 72, 44 sub-rows -> 32
        assert_eq!(config.extent, Extent::new(72, 32));
        assert_eq!(config.window, Window { width: 78, height: 44 });
        assert_eq!(config.extent.rows(), 16);
        assert_eq!(config.tile, TILE_SIZE);
    }

    #[test]
    fn bordered_frame_fits_terminal() {
        for (cols, rows) in [(80, 24), (10, 10), (203, 57), (120, 41)] {
            let config = Config::from_terminal(cols, rows).unwrap();
            let frame_rows = (config.window.height - config.extent.height) / 4
                + config.extent.rows()
                + 2;
            let frame_cols = (config.window.width - config.extent.width) / 2
                + config.extent.width
                + 2;

            assert!(frame_rows <= rows as usize, "{cols}x{rows}");
            assert!(frame_cols <= cols as usize, "{cols}x{rows}");
        }
    }

    #[test]
    fn tiny_terminal_is_rejected() {
        assert!(matches!(
            Config::from_terminal(9, 24),
            Err(ConfigError::TooSmall { .. })
        ));
        assert!(matches!(
            Config::from_terminal(80, 9),
            Err(ConfigError::TooSmall { .. })
        ));
    }

    fn parse(args: &str) -> Result<Options, clap::Error> {
        Options::try_parse_from(std::iter::once("lifetrail").chain(args.split_whitespace()))
    }

    #[test]
    fn parse_options() {
        let options = parse("--pattern gun --density 0.25 --seed 7 -t 3").unwrap();

        assert_eq!(options.pattern, Some(Pattern::Gun));
        assert_eq!(options.density.get(), 0.25);
        assert_eq!(options.seed, Some(7));
        assert_eq!(options.threads, Some(3));
    }

    #[test]
    fn parse_attached_values() {
        let options = parse("--density=0.3 -p1 --threads=2").unwrap();

        assert_eq!(options.density.get(), 0.3);
        assert_eq!(options.pattern, Some(Pattern::Gun));
        assert_eq!(options.threads, Some(2));
    }

    #[test]
    fn default_options() {
        let options = parse("").unwrap();

        assert_eq!(options.pattern, None);
        assert_eq!(options.density.get(), 0.5);
        assert_eq!(options.seed, None);
        assert_eq!(options.threads, None);
    }

    #[test]
    fn help_is_available() {
        assert_eq!(parse("--help").unwrap_err().kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn reject_bad_options() {
        let err = parse("--density 1.5").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert_eq!(
            err.source().and_then(|e| e.downcast_ref::<SeedError>()),
            Some(&SeedError::Density { got: 1.5 })
        );

        let err = parse("--density lots").unwrap_err();
        assert!(matches!(
            err.source().and_then(|e| e.downcast_ref::<SeedError>()),
            Some(SeedError::NotANumber { .. })
        ));

        assert_eq!(parse("--density").unwrap_err().kind(), ErrorKind::InvalidValue);
        assert_eq!(parse("--threads 0").unwrap_err().kind(), ErrorKind::ValueValidation);
        assert_eq!(parse("--pattern 5").unwrap_err().kind(), ErrorKind::ValueValidation);
        assert_eq!(parse("--fast").unwrap_err().kind(), ErrorKind::UnknownArgument);
    }
}
