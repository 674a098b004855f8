use ordered_float::OrderedFloat;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{NeighborhoodModel, callback::OptProgress};

use super::{LocalSearchOptimizer, OptReport, Termination};

/// Default iteration budget of [`HillClimbingOptimizer`]
pub const DEFAULT_MAX_ITERATIONS: usize = 1_000_000;

/// Optimizer that implements steepest-ascent hill climbing
///
/// Every iteration evaluates the whole neighborhood and moves to its cheapest member,
/// stopping as soon as that member does not strictly improve the current cost. Ties go
/// to the first neighbor in enumeration order, so a run is deterministic once the
/// initial state is fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HillClimbingOptimizer {
    max_iterations: usize,
}

impl Default for HillClimbingOptimizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITERATIONS)
    }
}

impl HillClimbingOptimizer {
    /// Constructor of HillClimbingOptimizer
    ///
    /// - `max_iterations` : the optimizer stops after this number of moves
    ///   even if the state can still be improved
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    /// Iteration budget
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }
}

impl<M: NeighborhoodModel> LocalSearchOptimizer<M> for HillClimbingOptimizer {
    /// Start optimization
    ///
    /// - `model` : the model to optimize
    /// - `initial_state` : the state to start from
    /// - `initial_cost` : cost of `initial_state`
    /// - `callback` : callback function that will be invoked after each move
    fn optimize(
        &self,
        model: &mut M,
        initial_state: M::StateType,
        initial_cost: f64,
        callback: &mut dyn FnMut(OptProgress<'_, M::StateType>),
    ) -> (M::StateType, f64, OptReport) {
        let mut current_state = initial_state;
        let mut current_cost = initial_cost;
        let mut termination = Termination::IterationLimit;
        let mut iterations = 0;

        debug!(
            max_iterations = self.max_iterations,
            initial_cost, "starting hill climbing"
        );

        while iterations < self.max_iterations {
            let best_neighbor = model
                .all_neighbors(&current_state)
                .map(|state| {
                    let cost = model.cost(&state);
                    (state, cost)
                })
                .min_by_key(|(_, cost)| OrderedFloat(*cost));

            // an empty neighborhood leaves nowhere to go
            let Some((neighbor, neighbor_cost)) = best_neighbor else {
                termination = Termination::LocalOptimum;
                break;
            };
            if neighbor_cost >= current_cost || neighbor_cost.is_nan() {
                termination = Termination::LocalOptimum;
                break;
            }

            trace!(iter = iterations, from = current_cost, to = neighbor_cost, "improved");
            current_state = neighbor;
            current_cost = neighbor_cost;

            callback(OptProgress {
                iter: iterations,
                accepted_count: iterations + 1,
                state: &current_state,
                cost: current_cost,
                temperature: None,
                acceptance_ratio: 1.0,
            });
            iterations += 1;
        }

        debug!(
            iterations,
            final_cost = current_cost,
            ?termination,
            "hill climbing finished"
        );

        let report = OptReport {
            iterations,
            accepted_count: iterations,
            termination,
        };
        (current_state, current_cost, report)
    }
}
