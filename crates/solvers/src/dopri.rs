use dopri_core::{HistoryElement, Observer, Stepper};

use crate::{Action, Control, Error, Event, Integrator, Interpolator, Solution, Statistics, Status};

/// The default output type of a [`Dopri`] without an output function.
pub type NoOutput = fn(f64, &[f64]) -> Vec<f64>;

/// Integrates an ordinary differential equation `dy/dt = rhs(t, y)`.
///
/// The right-hand side writes the derivative into its last argument. An
/// optional output function derives extra columns from `(t, y)` that are
/// appended to each row of the [`Solution`].
///
/// # Example
///
/// ```
/// use dopri_solvers::{Control, Dopri, Dopri5};
///
/// let rhs = |_t: f64, y: &[f64], dy: &mut [f64]| dy[0] = -y[0];
/// let mut solver = Dopri::<Dopri5, _>::new(rhs, 1, Control::default()).unwrap();
/// solver.initialise(0.0, &[1.0]).unwrap();
///
/// let solution = solver.run(1.0).unwrap();
/// let y = solution.at(&[1.0]);
/// assert!((y[0][0] - (-1.0_f64).exp()).abs() < 1e-5);
/// ```
#[derive(Debug, Clone)]
pub struct Dopri<S, F, O = NoOutput> {
    rhs: F,
    output: Option<O>,
    integrator: Integrator<S>,
    status: Status,
}

impl<S, F> Dopri<S, F>
where
    S: Stepper,
    F: Fn(f64, &[f64], &mut [f64]),
{
    /// Creates a solver for a system of dimension `n`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidControl`] if `control` fails validation.
    pub fn new(rhs: F, n: usize, control: Control) -> Result<Self, Error> {
        Ok(Self {
            rhs,
            output: None,
            integrator: Integrator::new(n, control)?,
            status: Status::Complete,
        })
    }
}

impl<S, F, O> Dopri<S, F, O>
where
    S: Stepper,
    F: Fn(f64, &[f64], &mut [f64]),
    O: Fn(f64, &[f64]) -> Vec<f64>,
{
    /// Appends `output(t, y)` to every row of the solution.
    #[must_use]
    pub fn with_output<P>(self, output: P) -> Dopri<S, F, P>
    where
        P: Fn(f64, &[f64]) -> Vec<f64>,
    {
        Dopri {
            rhs: self.rhs,
            output: Some(output),
            integrator: self.integrator,
            status: self.status,
        }
    }

    /// Sets the initial time and state, discarding any previous run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `y` has the wrong length.
    pub fn initialise(&mut self, t: f64, y: &[f64]) -> Result<&mut Self, Error> {
        let rhs = &self.rhs;
        let mut f = |t: f64, y: &[f64], dy: &mut [f64], _: &[HistoryElement]| rhs(t, y, dy);
        self.integrator.initialise(&mut f, t, y)?;
        self.status = Status::Complete;
        Ok(self)
    }

    /// Advances by one accepted step.
    ///
    /// # Errors
    ///
    /// See [`Integrator::step`].
    pub fn step(&mut self) -> Result<Event, Error> {
        let rhs = &self.rhs;
        let mut f = |t: f64, y: &[f64], dy: &mut [f64], _: &[HistoryElement]| rhs(t, y, dy);
        self.integrator.step(&mut f)
    }

    /// Integrates to `t_end` and returns the solution so far.
    ///
    /// # Errors
    ///
    /// See [`Integrator::run`].
    pub fn run(&mut self, t_end: f64) -> Result<Solution<'_, S::Dense, &O>, Error> {
        self.run_observed(t_end, ())
    }

    /// Integrates to `t_end`, passing an [`Event`] to `observer` after each
    /// accepted step.
    ///
    /// # Errors
    ///
    /// See [`Integrator::run`].
    pub fn run_observed<Obs>(
        &mut self,
        t_end: f64,
        observer: Obs,
    ) -> Result<Solution<'_, S::Dense, &O>, Error>
    where
        Obs: Observer<Event, Action>,
    {
        let rhs = &self.rhs;
        let mut f = |t: f64, y: &[f64], dy: &mut [f64], _: &[HistoryElement]| rhs(t, y, dy);
        self.status = self.integrator.run(&mut f, t_end, observer)?;
        Ok(self.solution())
    }

    /// Returns the solution over the steps taken so far.
    #[must_use]
    pub fn solution(&self) -> Solution<'_, S::Dense, &O> {
        let interpolator = Interpolator::new(self.integrator.history(), self.integrator.dense());
        Solution::new(
            self.status,
            interpolator,
            self.integrator.state(),
            self.output.as_ref(),
        )
    }

    #[must_use]
    pub fn statistics(&self) -> Statistics {
        self.integrator.statistics()
    }

    #[must_use]
    pub fn history(&self) -> &[HistoryElement] {
        self.integrator.history()
    }

    /// Returns the time reached.
    #[must_use]
    pub fn t(&self) -> f64 {
        self.integrator.t()
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &[f64] {
        self.integrator.state()
    }
}
