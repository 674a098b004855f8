use auto_impl::auto_impl;

/// OptModel is a trait that defines requirements to be used with optimization algorithm
///
/// The engines never look inside a state. They only ask the model for new states and
/// compare their costs, lower being better.
#[auto_impl(&mut, Box)]
pub trait OptModel {
    /// Type of the State
    type StateType: Clone;

    /// Randomly generate a starting state.
    /// Repeated calls must give independent results.
    fn initial_random_state(&mut self) -> Self::StateType;

    /// Cost of a state. Must be deterministic for a given state.
    fn cost(&self, state: &Self::StateType) -> f64;

    /// Number of components of a state.
    /// The adaptive temperature estimate draws `10 * dimension` samples.
    fn dimension(&self) -> usize;
}

/// A model whose neighborhood can be enumerated, required by hill climbing
pub trait NeighborhoodModel: OptModel {
    /// Lazily enumerate every state reachable by one elementary move.
    ///
    /// The sequence must be finite. Its order decides ties: the first neighbor
    /// reaching the minimum cost wins.
    fn all_neighbors<'a>(
        &'a self,
        state: &'a Self::StateType,
    ) -> Box<dyn Iterator<Item = Self::StateType> + 'a>;
}

/// A model that can draw a single random neighbor, required by simulated annealing
pub trait RandomNeighborModel: OptModel {
    /// Draw one neighbor of `state`, ideally uniformly over the neighborhood.
    fn random_neighbor(&mut self, state: &Self::StateType) -> Self::StateType;
}

// Forwarding impls equivalent to `#[auto_impl(&mut, Box)]`, written by hand because the
// macro's generated where-bounds shadow the supertrait's associated type on newer rustc
// (rust-lang/rust#152409).
impl<T: NeighborhoodModel + ?Sized> NeighborhoodModel for &mut T {
    fn all_neighbors<'a>(
        &'a self,
        state: &'a Self::StateType,
    ) -> Box<dyn Iterator<Item = Self::StateType> + 'a> {
        (**self).all_neighbors(state)
    }
}

impl<T: NeighborhoodModel + ?Sized> NeighborhoodModel for Box<T> {
    fn all_neighbors<'a>(
        &'a self,
        state: &'a Self::StateType,
    ) -> Box<dyn Iterator<Item = Self::StateType> + 'a> {
        (**self).all_neighbors(state)
    }
}

impl<T: RandomNeighborModel + ?Sized> RandomNeighborModel for &mut T {
    fn random_neighbor(&mut self, state: &Self::StateType) -> Self::StateType {
        (**self).random_neighbor(state)
    }
}

impl<T: RandomNeighborModel + ?Sized> RandomNeighborModel for Box<T> {
    fn random_neighbor(&mut self, state: &Self::StateType) -> Self::StateType {
        (**self).random_neighbor(state)
    }
}
