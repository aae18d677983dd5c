pub mod color;
pub mod config;
pub mod engine;
pub mod game;
pub mod io;
pub mod life;
pub mod render;
pub mod rle;
pub mod rule;
pub mod seed;
pub mod shapes;
pub mod world;

/// Ticks since a cell died, counted in steps of [`AGE_STEP`]
pub type Age = u8;

/// Oldest age we track. Cells older than this all look the same.
pub const MAX_AGE: Age = 255;

/// Age gained per tick spent dead
pub const AGE_STEP: Age = 2;
