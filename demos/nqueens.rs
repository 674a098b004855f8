use std::time::Instant;

use anyhow::Result;
use hillanneal::{
    OptModel,
    optim::{HillClimbingOptimizer, LocalSearchOptimizer, SimulatedAnnealingOptimizer},
    problems::NQueens,
    schedule::Schedule,
};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing_subscriber::EnvFilter;

fn hill_climbing_trials(n: usize, trials: usize) -> Result<()> {
    let mut model = NQueens::new(n);
    let opt = HillClimbingOptimizer::default();

    println!("\n{:^10}{:^60}{:^10}", "trial", "state", "cost");
    for trial in 0..trials {
        let (state, cost, _) = opt.run(&mut model, None, &mut |_| {})?;
        println!("{:^10}{:^60}{:^10}", trial, format!("{state:?}"), cost);
    }
    Ok(())
}

fn annealing(n: usize) -> Result<()> {
    let mut model = NQueens::new(n);
    let (k, delta, floor): (f64, f64, f64) = (100.0, 7e-4, 1e-3);
    let n_iter = ((k / floor).ln() / delta) as u64 + 1;

    let pb = ProgressBar::new(n_iter);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} (eta={eta}) {msg} ",
            )?
            .progress_chars("#>-"),
    );
    pb.set_draw_target(ProgressDrawTarget::stderr_with_hz(10));

    let opt = SimulatedAnnealingOptimizer::default()
        .with_schedule(Schedule::exponential(k, delta))
        .with_temperature_floor(floor);
    let (state, cost, report) = opt.run(&mut model, None, &mut |op| {
        pb.set_message(format!(
            "cost {}, T {:.3e}, acceptance ratio {:.2}",
            op.cost,
            op.temperature.unwrap_or_default(),
            op.acceptance_ratio
        ));
        pb.set_position(op.iter as u64);
    })?;
    pb.finish_and_clear();

    println!("\nsimulated annealing, T(i) = {k} exp(-{delta} i)");
    println!("cost: {cost} ({:?} after {} steps)", report.termination, report.iterations);
    println!("state: {state:?}");
    debug_assert_eq!(cost, model.cost(&state));
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let n = std::env::args()
        .nth(1)
        .map(|arg| arg.parse())
        .transpose()?
        .unwrap_or(16);

    let start = Instant::now();
    hill_climbing_trials(n, 10)?;
    println!("elapsed: {:?}", start.elapsed());

    let start = Instant::now();
    annealing(n)?;
    println!("elapsed: {:?}", start.elapsed());
    Ok(())
}
