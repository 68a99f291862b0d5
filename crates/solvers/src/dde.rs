use dopri_core::{DenseOutput, HistoryElement, Observer, Stepper, search};

use crate::{Action, Control, Error, Event, Integrator, Interpolator, Solution, Statistics, Status};

/// The default output type of a [`Dde`] without an output function.
pub type NoDelayedOutput = fn(f64, &[f64], &dyn Fn(f64) -> Vec<f64>) -> Vec<f64>;

/// Integrates a delay differential equation `dy/dt = rhs(t, y, past)`.
///
/// `past(s)` returns the solution at an earlier time `s`. It is answered
/// from the steps accepted so far, then from any past history supplied to
/// [`Dde::initialise_with_history`], and finally falls back to the initial
/// state for times before all known history.
///
/// # Example
///
/// ```
/// use dopri_solvers::{Control, Dde, Dopri5};
///
/// // y' = -y(t - 1), with y = 1 before t = 0.
/// let rhs = |t: f64, _y: &[f64], dy: &mut [f64], past: &dyn Fn(f64) -> Vec<f64>| {
///     dy[0] = -past(t - 1.0)[0];
/// };
/// let control = Control::default().with_tcrit([1.0]);
/// let mut solver = Dde::<Dopri5, _>::new(rhs, 1, control).unwrap();
/// solver.initialise(0.0, &[1.0]).unwrap();
///
/// let solution = solver.run(1.0).unwrap();
/// assert!(solution.at(&[1.0])[0][0].abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct Dde<S, F, O = NoDelayedOutput> {
    rhs: F,
    output: Option<O>,
    integrator: Integrator<S>,
    y0: Vec<f64>,
    past: Vec<HistoryElement>,
    status: Status,
}

/// Resolves `past(s)` lookups over the combined history.
struct Lookup<'a, D> {
    current: &'a [HistoryElement],
    past: &'a [HistoryElement],
    y0: &'a [f64],
    dense: D,
}

impl<D: DenseOutput> Lookup<'_, D> {
    fn at(&self, t: f64) -> Vec<f64> {
        for history in [self.current, self.past] {
            if let Some(i) = search(history, |el| el.t() > t) {
                return self.dense.interpolate(t, &history[i]);
            }
        }
        self.y0.to_vec()
    }
}

/// Adapts a delayed right-hand side to the integrator's history-aware form.
fn delayed<'a, F, D>(
    rhs: &'a F,
    past: &'a [HistoryElement],
    y0: &'a [f64],
    dense: D,
) -> impl FnMut(f64, &[f64], &mut [f64], &[HistoryElement]) + 'a
where
    F: Fn(f64, &[f64], &mut [f64], &dyn Fn(f64) -> Vec<f64>),
    D: DenseOutput + Copy + 'a,
{
    move |t: f64, y: &[f64], dy: &mut [f64], current: &[HistoryElement]| {
        let lookup = Lookup {
            current,
            past,
            y0,
            dense,
        };
        rhs(t, y, dy, &|s: f64| lookup.at(s));
    }
}

impl<S, F> Dde<S, F>
where
    S: Stepper,
    F: Fn(f64, &[f64], &mut [f64], &dyn Fn(f64) -> Vec<f64>),
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
            y0: Vec::new(),
            past: Vec::new(),
            status: Status::Complete,
        })
    }
}

impl<S, F, O> Dde<S, F, O>
where
    S: Stepper,
    F: Fn(f64, &[f64], &mut [f64], &dyn Fn(f64) -> Vec<f64>),
    O: Fn(f64, &[f64], &dyn Fn(f64) -> Vec<f64>) -> Vec<f64>,
{
    /// Appends `output(t, y, past)` to every row of the solution.
    #[must_use]
    pub fn with_output<P>(self, output: P) -> Dde<S, F, P>
    where
        P: Fn(f64, &[f64], &dyn Fn(f64) -> Vec<f64>) -> Vec<f64>,
    {
        Dde {
            rhs: self.rhs,
            output: Some(output),
            integrator: self.integrator,
            y0: self.y0,
            past: self.past,
            status: self.status,
        }
    }

    /// Sets the initial time and state with no history before `t`.
    ///
    /// Lookups before `t` return `y`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `y` has the wrong length.
    pub fn initialise(&mut self, t: f64, y: &[f64]) -> Result<&mut Self, Error> {
        self.initialise_with_history(t, y, Vec::new())
    }

    /// Sets the initial time and state, continuing from `past`.
    ///
    /// `past` is typically the history of an earlier run that ended at `t`.
    /// Lookups before `t` are answered from it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `y` has the wrong length.
    pub fn initialise_with_history(
        &mut self,
        t: f64,
        y: &[f64],
        past: Vec<HistoryElement>,
    ) -> Result<&mut Self, Error> {
        self.y0 = y.to_vec();
        self.past = past;

        {
            let mut f = delayed(&self.rhs, &self.past, &self.y0, self.integrator.dense());
            self.integrator.initialise(&mut f, t, y)?;
        }
        self.status = Status::Complete;
        Ok(self)
    }

    /// Advances by one accepted step.
    ///
    /// # Errors
    ///
    /// See [`Integrator::step`].
    pub fn step(&mut self) -> Result<Event, Error> {
        let mut f = delayed(&self.rhs, &self.past, &self.y0, self.integrator.dense());
        self.integrator.step(&mut f)
    }

    /// Integrates to `t_end` and returns the solution so far.
    ///
    /// # Errors
    ///
    /// See [`Integrator::run`].
    pub fn run(
        &mut self,
        t_end: f64,
    ) -> Result<Solution<'_, S::Dense, impl Fn(f64, &[f64]) -> Vec<f64>>, Error> {
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
    ) -> Result<Solution<'_, S::Dense, impl Fn(f64, &[f64]) -> Vec<f64>>, Error>
    where
        Obs: Observer<Event, Action>,
    {
        let mut f = delayed(&self.rhs, &self.past, &self.y0, self.integrator.dense());
        self.status = self.integrator.run(&mut f, t_end, observer)?;
        Ok(self.solution())
    }

    /// Returns the solution over the steps taken so far.
    ///
    /// The output function, if any, sees the same `past` as the right-hand
    /// side did.
    #[must_use]
    pub fn solution(&self) -> Solution<'_, S::Dense, impl Fn(f64, &[f64]) -> Vec<f64>> {
        let output = self
            .output
            .as_ref()
            .map(|output| move |t: f64, y: &[f64]| output(t, y, &|s: f64| self.lookup(s)));
        let interpolator = Interpolator::new(self.integrator.history(), self.integrator.dense());
        Solution::new(self.status, interpolator, self.integrator.state(), output)
    }

    /// Returns the solution at time `t` as seen by the right-hand side.
    ///
    /// Searches this run's history, then the past history, and falls back to
    /// the initial state.
    #[must_use]
    pub fn lookup(&self, t: f64) -> Vec<f64> {
        Lookup {
            current: self.integrator.history(),
            past: &self.past,
            y0: &self.y0,
            dense: self.integrator.dense(),
        }
        .at(t)
    }

    #[must_use]
    pub fn statistics(&self) -> Statistics {
        self.integrator.statistics()
    }

    /// Returns the accepted steps of this run, excluding any past history.
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
