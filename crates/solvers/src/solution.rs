use dopri_core::{DenseOutput, HistoryElement};

use crate::Interpolator;

/// Indicates how a run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// Reached the requested end time.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The continuous result of a run.
///
/// Borrows the driver's history, so it stays valid until the driver is
/// stepped again. Rows returned by [`Solution::at`] hold the state followed
/// by the values of the output function, if one was configured.
///
/// A run that took no steps (`t_end` at or before the initial time) is the
/// single point it started from, and every query returns that state.
#[derive(Debug, Clone)]
pub struct Solution<'a, D, G> {
    status: Status,
    interpolator: Interpolator<'a, D>,
    state: &'a [f64],
    output: Option<G>,
}

impl<'a, D, G> Solution<'a, D, G>
where
    D: DenseOutput,
    G: Fn(f64, &[f64]) -> Vec<f64>,
{
    /// `state` is the driver's current state, used when `interpolator` has
    /// no history to read from.
    pub(crate) fn new(
        status: Status,
        interpolator: Interpolator<'a, D>,
        state: &'a [f64],
        output: Option<G>,
    ) -> Self {
        Self {
            status,
            interpolator,
            state,
            output,
        }
    }

    /// Evaluates the solution at non-decreasing `times`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `times` is not non-decreasing.
    #[must_use]
    pub fn at(&self, times: &[f64]) -> Vec<Vec<f64>> {
        if self.history().is_empty() {
            return times.iter().map(|&t| self.constant_row(t)).collect();
        }
        match &self.output {
            Some(output) => self.interpolator.interpolate_with(times, output),
            None => self.interpolator.interpolate(times),
        }
    }

    /// How the run terminated.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// The accepted steps backing this solution.
    #[must_use]
    pub fn history(&self) -> &'a [HistoryElement] {
        self.interpolator.history()
    }

    fn constant_row(&self, t: f64) -> Vec<f64> {
        let mut row = self.state.to_vec();
        if let Some(output) = &self.output {
            let extra = output(t, self.state);
            row.extend(extra);
        }
        row
    }
}
