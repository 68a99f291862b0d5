//! One-shot entry points: create a solver, initialise it, run it, and hand
//! back the solution as a function of query times.

use dopri_core::Stepper;

use crate::{Control, Dde, Dopri, Dopri5, Error};

/// A right-hand side tagged with its calling convention.
pub enum Rhs {
    /// `rhs(t, y, dy)`.
    Ode(Box<dyn Fn(f64, &[f64], &mut [f64])>),

    /// `rhs(t, y, dy, past)`.
    Delayed(Box<dyn Fn(f64, &[f64], &mut [f64], &dyn Fn(f64) -> Vec<f64>)>),
}

/// An output function tagged with its calling convention.
pub enum Output {
    /// `output(t, y)`.
    Ode(Box<dyn Fn(f64, &[f64]) -> Vec<f64>>),

    /// `output(t, y, past)`.
    Delayed(Box<dyn Fn(f64, &[f64], &dyn Fn(f64) -> Vec<f64>) -> Vec<f64>>),
}

/// Integrates an ODE from `t0` to `t1` with [`Dopri5`].
///
/// The returned function owns the solver and evaluates the solution at
/// non-decreasing query times.
///
/// # Errors
///
/// Returns an error if `control` is invalid or the integration fails.
pub fn integrate_dopri<F>(
    rhs: F,
    y0: &[f64],
    t0: f64,
    t1: f64,
    control: Control,
) -> Result<impl Fn(&[f64]) -> Vec<Vec<f64>> + use<F>, Error>
where
    F: Fn(f64, &[f64], &mut [f64]),
{
    solve_ode(Dopri::<Dopri5, F>::new(rhs, y0.len(), control)?, y0, t0, t1)
}

/// Integrates a DDE from `t0` to `t1` with [`Dopri5`].
///
/// Lookups before `t0` return `y0`.
///
/// # Errors
///
/// Returns an error if `control` is invalid or the integration fails.
pub fn integrate_dde<F>(
    rhs: F,
    y0: &[f64],
    t0: f64,
    t1: f64,
    control: Control,
) -> Result<impl Fn(&[f64]) -> Vec<Vec<f64>> + use<F>, Error>
where
    F: Fn(f64, &[f64], &mut [f64], &dyn Fn(f64) -> Vec<f64>),
{
    solve_dde(Dde::<Dopri5, F>::new(rhs, y0.len(), control)?, y0, t0, t1)
}

/// Integrates with the driver that matches the tag of `rhs`.
///
/// # Errors
///
/// Returns [`Error::OutputMismatch`] if `output` uses the other calling
/// convention, or any error from the chosen driver.
pub fn integrate(
    rhs: Rhs,
    y0: &[f64],
    t0: f64,
    t1: f64,
    control: Control,
    output: Option<Output>,
) -> Result<Box<dyn Fn(&[f64]) -> Vec<Vec<f64>>>, Error> {
    let n = y0.len();
    match (rhs, output) {
        (Rhs::Ode(rhs), None) => Ok(Box::new(integrate_dopri(rhs, y0, t0, t1, control)?)),
        (Rhs::Ode(rhs), Some(Output::Ode(output))) => {
            let solver = Dopri::<Dopri5, _>::new(rhs, n, control)?.with_output(output);
            Ok(Box::new(solve_ode(solver, y0, t0, t1)?))
        }
        (Rhs::Ode(_), Some(Output::Delayed(_))) => Err(Error::OutputMismatch {
            reason: "can't use delayed output with non-delayed rhs",
        }),
        (Rhs::Delayed(rhs), None) => Ok(Box::new(integrate_dde(rhs, y0, t0, t1, control)?)),
        (Rhs::Delayed(rhs), Some(Output::Delayed(output))) => {
            let solver = Dde::<Dopri5, _>::new(rhs, n, control)?.with_output(output);
            Ok(Box::new(solve_dde(solver, y0, t0, t1)?))
        }
        (Rhs::Delayed(_), Some(Output::Ode(_))) => Err(Error::OutputMismatch {
            reason: "can't use non-delayed output with delayed rhs",
        }),
    }
}

fn solve_ode<S, F, O>(
    mut solver: Dopri<S, F, O>,
    y0: &[f64],
    t0: f64,
    t1: f64,
) -> Result<impl Fn(&[f64]) -> Vec<Vec<f64>> + use<S, F, O>, Error>
where
    S: Stepper,
    F: Fn(f64, &[f64], &mut [f64]),
    O: Fn(f64, &[f64]) -> Vec<f64>,
{
    solver.initialise(t0, y0)?;
    solver.run(t1)?;
    Ok(move |times: &[f64]| solver.solution().at(times))
}

fn solve_dde<S, F, O>(
    mut solver: Dde<S, F, O>,
    y0: &[f64],
    t0: f64,
    t1: f64,
) -> Result<impl Fn(&[f64]) -> Vec<Vec<f64>> + use<S, F, O>, Error>
where
    S: Stepper,
    F: Fn(f64, &[f64], &mut [f64], &dyn Fn(f64) -> Vec<f64>),
    O: Fn(f64, &[f64], &dyn Fn(f64) -> Vec<f64>) -> Vec<f64>,
{
    solver.initialise(t0, y0)?;
    solver.run(t1)?;
    Ok(move |times: &[f64]| solver.solution().at(times))
}
