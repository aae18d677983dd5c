use std::fmt;
use std::str::FromStr;

use rand::Rng;
use thiserror::Error;
use tracing::debug;
use tracing::info;

use crate::life::Life;
use crate::life::Orientation;
use crate::rle::RleError;
use crate::shapes;

/// Where the gun is placed
const GUN_ORIGIN: (usize, usize) = (16, 16);

/// Rows left free above each ship
const SHIP_SPACING: usize = 8;

#[derive(Debug, Error, PartialEq)]
pub enum SeedError {
    #[error("Density {got} is outside of [0, 1]")]
    Density { got: f64 },

    #[error("Density '{got}' is not a number")]
    NotANumber { got: String },

    #[error("Bad shape table: {0}")]
    Shape(#[from] RleError),
}

/// Probability of a cell starting alive in the random pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density(f64);

impl Density {
    pub const HALF: Self = Self(0.5);

    pub fn new(p: f64) -> Result<Self, SeedError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(SeedError::Density { got: p });
        }

        Ok(Self(p))
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}

impl FromStr for Density {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let p = s.trim().parse().map_err(|_| SeedError::NotANumber {
            got: s.to_string(),
        })?;

        Self::new(p)
    }
}

/// Initial state of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Random,
    Gun,
    Ships,
}

impl Pattern {
    pub const ALL: [Pattern; 3] = [Pattern::Random, Pattern::Gun, Pattern::Ships];

    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Random => "random",
            Pattern::Gun => "gun",
            Pattern::Ships => "ships",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown pattern '{got}', expected one of 0-2, random, gun or ships")]
pub struct PatternError {
    got: String,
}

impl FromStr for Pattern {
    type Err = PatternError;

    /// Accepts either the menu index or the name of a pattern.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(i) = s.parse::<usize>() {
            return Pattern::ALL.get(i).copied().ok_or_else(|| PatternError {
                got: s.to_string(),
            });
        }

        Pattern::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| PatternError { got: s.to_string() })
    }
}

fn orientation<R: Rng + ?Sized>(rng: &mut R) -> Orientation {
    if rng.random() {
        Orientation::Mirrored
    } else {
        Orientation::Normal
    }
}

/// Lay down `pattern` on `life`.
pub fn plant<R: Rng + ?Sized>(
    life: &mut Life,
    pattern: Pattern,
    density: Density,
    rng: &mut R,
) -> Result<(), SeedError> {
    match pattern {
        Pattern::Random => life.fill_random(density, rng),
        Pattern::Gun => {
            let gun = shapes::gosper_glider_gun()?;
            let (x, y) = GUN_ORIGIN;

            life.add_shape(x, y, &gun, orientation(rng));
        }
        Pattern::Ships => {
            let ships = shapes::ships()?;
            let extent = life.extent();
            let mut next = 0;

            loop {
                let ship = &ships[rng.random_range(0..ships.len())];
                if next + ship.height + SHIP_SPACING > extent.height {
                    break;
                }

                let x = rng.random_range(0..extent.width);
                let y = next + SHIP_SPACING;

                debug!(ship = %ship.name, x, y, "placing ship");
                life.add_shape(x, y, ship, orientation(rng));

                next += ship.height + SHIP_SPACING;
            }
        }
    }

    info!(%pattern, population = life.population(), "seeded");

    Ok(())
}
