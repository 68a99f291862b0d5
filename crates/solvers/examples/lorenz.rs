//! Integrates the Lorenz system and prints the trajectory.
//!
//! # Usage
//!
//! ```text
//! cargo run --example lorenz
//! cargo run --example lorenz -- 1e-9
//! ```
//!
//! The optional argument sets both tolerances (default `1e-6`). The
//! trajectory is sampled at 0.1 time units with the 5th- and 8th-order
//! steppers side by side, followed by the work each one did.

use std::error::Error;

use dopri_core::Stepper;
use dopri_solvers::{Control, Dopri, Dopri5, Dopri853, Statistics, systems::lorenz};

const T_END: f64 = 10.0;
const Y0: [f64; 3] = [10.0, 1.0, 1.0];

fn main() -> Result<(), Box<dyn Error>> {
    let tolerance = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<f64>())
        .transpose()?
        .unwrap_or(1e-6);
    let control = Control::default().with_tolerance(tolerance);

    let times: Vec<f64> = (0..=100).map(|i| f64::from(i) * T_END / 100.0).collect();
    let (low, low_stats) = solve::<Dopri5>(&control, &times)?;
    let (high, high_stats) = solve::<Dopri853>(&control, &times)?;

    println!("{:>6} {:>36} {:>36}", "t", "dopri5", "dopri853");
    for ((t, a), b) in times.iter().zip(&low).zip(&high) {
        println!(
            "{t:>6.2} {:>11.5} {:>11.5} {:>11.5}  {:>11.5} {:>11.5} {:>11.5}",
            a[0], a[1], a[2], b[0], b[1], b[2]
        );
    }

    println!();
    report("dopri5", &low_stats);
    report("dopri853", &high_stats);
    Ok(())
}

fn solve<S: Stepper>(
    control: &Control,
    times: &[f64],
) -> Result<(Vec<Vec<f64>>, Statistics), Box<dyn Error>> {
    let mut solver = Dopri::<S, _>::new(lorenz(), Y0.len(), control.clone())?;
    solver.initialise(0.0, &Y0)?;
    let rows = solver.run(T_END)?.at(times);
    Ok((rows, solver.statistics()))
}

fn report(name: &str, stats: &Statistics) {
    println!(
        "{name}: {} evaluations, {} steps ({} accepted, {} rejected)",
        stats.n_eval, stats.n_steps, stats.n_steps_accepted, stats.n_steps_rejected
    );
}
