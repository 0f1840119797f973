//! Game rules for connect-four.
//!
//! Pure functions over a borrowed [`Board`](crate::Board). Rules are kept
//! apart from the engine so each can be tested on hand-built boards.

pub mod drop;
pub mod win;

pub use drop::{Landing, resolve};
pub use win::{Direction, WinOutcome, run_from, scan};
