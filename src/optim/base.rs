use auto_impl::auto_impl;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{LocalSearchError, OptModel, callback::OptProgress};

/// Why an optimization run stopped. None of these is an error: the caller judges
/// quality from the cost of the returned state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Termination {
    /// No neighbor improves on the returned state, or the neighborhood was empty
    LocalOptimum,
    /// The iteration budget was used up
    IterationLimit,
    /// The temperature dropped below the floor
    TemperatureFloor,
    /// The temperature schedule ran out of values
    ScheduleExhausted,
}

/// Summary of an optimization run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptReport {
    /// number of completed iterations
    pub iterations: usize,
    /// number of accepted transitions
    pub accepted_count: usize,
    /// reason the run stopped
    pub termination: Termination,
}

/// Optimizer that implements local search algorithm
#[auto_impl(&, Box, Rc, Arc)]
pub trait LocalSearchOptimizer<M: OptModel> {
    /// Check the optimizer parameters
    fn validate(&self) -> Result<(), LocalSearchError> {
        Ok(())
    }

    /// Start optimization from a given state
    ///
    /// - `model` : the model to optimize
    /// - `initial_state` : the state to start from
    /// - `initial_cost` : cost of `initial_state`
    /// - `callback` : callback function that will be invoked at the end of each iteration
    fn optimize(
        &self,
        model: &mut M,
        initial_state: M::StateType,
        initial_cost: f64,
        callback: &mut dyn FnMut(OptProgress<'_, M::StateType>),
    ) -> (M::StateType, f64, OptReport);

    /// Validate the parameters, then start optimization
    ///
    /// - `model` : the model to optimize
    /// - `initial_state` : the state to start from. If None, a random state will be generated.
    /// - `callback` : callback function that will be invoked at the end of each iteration
    fn run(
        &self,
        model: &mut M,
        initial_state: Option<M::StateType>,
        callback: &mut dyn FnMut(OptProgress<'_, M::StateType>),
    ) -> Result<(M::StateType, f64, OptReport), LocalSearchError> {
        self.validate()?;
        let initial_state = match initial_state {
            Some(state) => state,
            None => model.initial_random_state(),
        };
        let initial_cost = model.cost(&initial_state);
        Ok(self.optimize(model, initial_state, initial_cost, callback))
    }
}
