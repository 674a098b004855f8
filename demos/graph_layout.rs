use std::time::Instant;

use anyhow::Result;
use hillanneal::{
    OptModel,
    optim::{LocalSearchOptimizer, SimulatedAnnealingOptimizer},
    problems::GraphLayout,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let vertices = ["A", "B", "C", "D", "E", "F", "G", "H"];
    let edges = [
        ("B", "G"),
        ("E", "F"),
        ("H", "E"),
        ("D", "B"),
        ("H", "G"),
        ("A", "E"),
        ("C", "F"),
        ("H", "B"),
        ("F", "A"),
        ("C", "B"),
        ("H", "F"),
    ];
    let mut model = GraphLayout::new(&vertices, &edges, 400)?;

    let initial_state = model.initial_random_state();
    let initial_cost = model.cost(&initial_state);
    println!("random layout cost: {initial_cost:.4}");

    let start = Instant::now();
    let opt = SimulatedAnnealingOptimizer::default();
    let (state, cost, report) = opt.run(&mut model, Some(initial_state), &mut |_| {})?;
    println!("\nwith the default schedule");
    println!("final cost: {cost:.4} after {} steps", report.iterations);
    println!(
        "crossings: {}, separation: {:.4}, angles: {:.4}",
        model.crossings(&state),
        model.separation(&state),
        model.angles(&state)
    );
    println!("elapsed: {:?}", start.elapsed());

    for (name, (x, y)) in model.vertices().iter().zip(model.positions(&state)) {
        println!("{name}: ({x}, {y})");
    }
    Ok(())
}
