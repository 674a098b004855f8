/// Metropolis acceptance probability of a move.
///
/// - `delta_cost` : `current_cost - candidate_cost`, positive means the candidate is better
/// - `temperature` : current temperature
///
/// Improving moves are always accepted. Otherwise the probability is
/// `exp(delta_cost / temperature)`, which saturates to 0 instead of faulting for
/// extreme arguments. The result always lies in `[0, 1]`.
pub fn acceptance_probability(delta_cost: f64, temperature: f64) -> f64 {
    if delta_cost > 0.0 {
        return 1.0;
    }
    if temperature.is_nan() || delta_cost.is_nan() || temperature <= 0.0 {
        return 0.0;
    }
    let p = (delta_cost / temperature).exp();
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}
