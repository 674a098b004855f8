//! Callback of Optimization Iteration

/// OptProgress expresses Optimization Progress that is passed to the callback
/// at the end of every iteration
///
/// Example
///
/// ```rust
/// let pb = ProgressBar::new(n_iter);
/// let mut callback = |op: OptProgress<'_, Vec<usize>>| {
///     pb.set_message(format!(
///         "cost {:.4e}, acceptance ratio {:.2e}",
///         op.cost, op.acceptance_ratio
///     ));
///     pb.set_position(op.iter as u64);
/// };
/// ```
#[derive(Debug, Clone, Copy)]
pub struct OptProgress<'a, S> {
    /// current iteration step, 0-based
    pub iter: usize,
    /// number of accepted transitions so far
    pub accepted_count: usize,
    /// current state
    pub state: &'a S,
    /// cost of the current state
    pub cost: f64,
    /// temperature of this step, `None` for algorithms without one
    pub temperature: Option<f64>,
    /// acceptance ratio over the recent window
    pub acceptance_ratio: f64,
}
