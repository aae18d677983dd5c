//! Rules of Conway's Game of Life.
//!
//! Births and survivals are stored as bit sets over neighbor counts: if bit `i` is on, a cell
//! with `i` live neighbors is born (or survives).
//!
//! ```notrust
//! b3:  0000_0000_0000_1000
//! s23: 0000_0000_0000_1100
//! ```
//!
//! See: https://conwaylife.com/wiki/Rulestring

/// Neighbor counts giving birth to a dead cell
pub const BIRTHS: u16 = 0b1000;

/// Neighbor counts keeping a live cell alive
pub const SURVIVALS: u16 = 0b1100;

/// State of a cell in the next generation, given its current state and the number of live cells
/// around it.
#[inline]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    debug_assert!(neighbors <= 8, "a cell has 8 neighbors");

    let mask = if alive { SURVIVALS } else { BIRTHS };

    mask & (1 << neighbors) != 0
}
