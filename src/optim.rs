//! Optimization Algorithms

mod base;
mod hill_climbing;
pub mod metropolis;
mod simulated_annealing;

pub use base::{LocalSearchOptimizer, OptReport, Termination};
pub use hill_climbing::{DEFAULT_MAX_ITERATIONS, HillClimbingOptimizer};
pub use simulated_annealing::{DEFAULT_TEMPERATURE_FLOOR, SimulatedAnnealingOptimizer};

use crate::{LocalSearchError, NeighborhoodModel, RandomNeighborModel, schedule::Schedule};

/// Steepest-ascent hill climbing from a random initial state.
///
/// Stops at a local optimum or after `max_iterations` moves, whichever comes first,
/// and returns the state reached.
pub fn hill_climb<M: NeighborhoodModel>(model: &mut M, max_iterations: usize) -> M::StateType {
    let optimizer = HillClimbingOptimizer::new(max_iterations);
    let initial_state = model.initial_random_state();
    let initial_cost = model.cost(&initial_state);
    let (state, _, _) = optimizer.optimize(model, initial_state, initial_cost, &mut |_| {});
    state
}

/// Simulated annealing from a random initial state.
///
/// When `schedule` is None, the schedule is synthesised from the model
/// (see [`Schedule::default_for`]). Returns the state held when the temperature drops
/// below `temperature_floor` or the schedule runs out.
pub fn simulated_annealing<M: RandomNeighborModel>(
    model: &mut M,
    schedule: Option<Schedule>,
    temperature_floor: f64,
) -> Result<M::StateType, LocalSearchError> {
    let optimizer = SimulatedAnnealingOptimizer::new(schedule, temperature_floor);
    let (state, _, _) = optimizer.run(model, None, &mut |_| {})?;
    Ok(state)
}
