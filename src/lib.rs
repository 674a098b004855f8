//! Local search over caller-defined problems: steepest-ascent hill climbing and
//! simulated annealing with pluggable temperature schedules.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod callback;
pub mod counter;
mod error;
mod model;
pub mod optim;
pub mod problems;
pub mod schedule;
pub mod utils;

pub use error::LocalSearchError;
pub use model::{NeighborhoodModel, OptModel, RandomNeighborModel};
pub use optim::{hill_climb, simulated_annealing};

#[cfg(test)]
mod tests;
