//! Adaptive step-size control shared by the ODE and DDE drivers.
//!
//! # Algorithm
//!
//! Each call to [`Integrator::step`] advances by exactly one accepted step:
//!
//! 1. Skip critical times already reached.
//! 2. Check the step budget and the step-size bounds.
//! 3. Shorten the step so that it lands on the next critical time.
//! 4. Take a trial step and compute the scaled error norm `err`.
//! 5. If `err <= 1` accept the step: commit it to the stepper, record the
//!    history element, run the stiffness monitor, and propose the next step
//!    size. Otherwise shrink `h` and go back to 2.
//!
//! The next step size uses the Lund-stabilized controller
//!
//! ```text
//! fac   = clamp(err^constant / err_old^beta / factor_safe, 1/factor_max, 1/factor_min)
//! h_new = h / fac
//! ```
//!
//! with the constants of the stepper's [`StepControl`](dopri_core::StepControl).
//! After a rejection the step size is not allowed to grow on the step that
//! finally succeeds.

mod stiffness;

#[cfg(test)]
mod tests;

use dopri_core::{HistoryElement, Observer, Stepper};
use log::{debug, trace, warn};

use crate::{Action, Control, ControlError, Error, Event, Statistics, Status};

use self::stiffness::Stiffness;

/// Floor applied to the previous error norm in the step-size controller.
const STEP_FACTOR_MIN: f64 = 1e-4;

/// Drives a [`Stepper`] with adaptive step-size control.
///
/// The integrator owns the stepper, the validated [`Control`], the run state
/// and the history of accepted steps. The right-hand side is passed into
/// each call as `rhs(t, y, dy, history)`, where `history` is a read-only view
/// of the elements accepted so far. This lets delayed right-hand sides look
/// up past values while a step is in progress.
#[derive(Debug, Clone)]
pub struct Integrator<S> {
    stepper: S,
    control: Control,
    step_size_min: f64,
    step_size_max: f64,
    t: f64,
    h: f64,
    tcrit_next: usize,
    n_steps: usize,
    n_steps_accepted: usize,
    n_steps_rejected: usize,
    stiffness: Stiffness,
    last_error: f64,
    initialised: bool,
    history: Vec<HistoryElement>,
}

impl<S: Stepper> Integrator<S> {
    /// Creates an integrator for a system of dimension `n`.
    ///
    /// Unset step-size bounds in `control` fall back to the stepper's own.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidControl`] if `control` fails validation or the
    /// effective minimum step size exceeds the effective maximum.
    pub fn new(n: usize, control: Control) -> Result<Self, Error> {
        let control = control.validate()?;
        let stepper = S::new(n);

        let defaults = stepper.step_control();
        let step_size_min = control.step_size_min.unwrap_or(defaults.size_min);
        let step_size_max = control.step_size_max.unwrap_or(defaults.size_max);
        if step_size_min > step_size_max {
            return Err(ControlError::StepSizeRange.into());
        }

        Ok(Self {
            stepper,
            control,
            step_size_min,
            step_size_max,
            t: 0.0,
            h: 0.0,
            tcrit_next: 0,
            n_steps: 0,
            n_steps_accepted: 0,
            n_steps_rejected: 0,
            stiffness: Stiffness::default(),
            last_error: 0.0,
            initialised: false,
            history: Vec::new(),
        })
    }

    /// Sets the initial state and estimates the first step size.
    ///
    /// Clears all counters and the history, so an integrator can be reused
    /// for a fresh integration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `y` has the wrong length.
    pub fn initialise<F>(&mut self, rhs: &mut F, t: f64, y: &[f64]) -> Result<(), Error>
    where
        F: FnMut(f64, &[f64], &mut [f64], &[HistoryElement]),
    {
        let expected = self.stepper.n();
        if y.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                actual: y.len(),
            });
        }

        self.n_steps = 0;
        self.n_steps_accepted = 0;
        self.n_steps_rejected = 0;
        self.stiffness = Stiffness::default();
        self.last_error = 0.0;
        self.tcrit_next = 0;
        self.history.clear();

        let history = &self.history;
        let mut f = |t: f64, y: &[f64], dy: &mut [f64]| rhs(t, y, dy, history);

        self.stepper.reset(&mut f, t, y);
        self.h = self.stepper.initial_step_size(
            &mut f,
            t,
            self.control.atol,
            self.control.rtol,
            self.step_size_max,
        );
        self.t = t;
        self.initialised = true;

        debug!("initialised at t = {t} with initial step size {:e}", self.h);
        Ok(())
    }

    /// Advances the solution by one accepted step.
    ///
    /// Rejected trial steps are retried internally with a smaller step size.
    /// On success the new history element has been appended and the returned
    /// [`Event`] describes the accepted step.
    ///
    /// # Errors
    ///
    /// Returns an error if the integrator has not been initialised, the step
    /// budget is exhausted, the step size drops below its minimum or vanishes
    /// relative to `t`, or the problem is detected to be stiff. The history
    /// up to [`Integrator::t`] stays valid, but further steps fail with
    /// [`Error::NotInitialised`] until the integrator is initialised again.
    pub fn step<F>(&mut self, rhs: &mut F) -> Result<Event, Error>
    where
        F: FnMut(f64, &[f64], &mut [f64], &[HistoryElement]),
    {
        if !self.initialised {
            return Err(Error::NotInitialised);
        }

        let t = self.t;
        let mut h = self.h;
        let fac_old = self.last_error.max(STEP_FACTOR_MIN);
        let sc = *self.stepper.step_control();
        let Control {
            max_steps,
            atol,
            rtol,
            stiff_check,
            step_size_min_allow,
            ..
        } = self.control;

        let tcrit = &self.control.tcrit;
        while tcrit.get(self.tcrit_next).is_some_and(|&tc| tc <= t) {
            self.tcrit_next += 1;
        }
        let tcrit = tcrit.get(self.tcrit_next).copied();

        let history = &self.history;
        let mut f = |t: f64, y: &[f64], dy: &mut [f64]| rhs(t, y, dy, history);

        let mut rejected = false;
        let (element, err, landing) = loop {
            if self.n_steps > max_steps {
                return Err(abort(&mut self.initialised, Error::TooManySteps { t }));
            }

            let mut forced = false;
            if h < self.step_size_min {
                if !step_size_min_allow {
                    return Err(abort(&mut self.initialised, Error::StepTooSmall { t, h }));
                }
                warn!(
                    "step size {h:e} at t = {t} is below the minimum; forcing {:e}",
                    self.step_size_min
                );
                h = self.step_size_min;
                forced = true;
            }

            if h <= t.abs() * f64::EPSILON {
                return Err(abort(&mut self.initialised, Error::StepSizeVanished { t, h }));
            }

            let landing = match tcrit {
                Some(tc) if t + h > tc => {
                    h = tc - t;
                    Some(tc)
                }
                _ => None,
            };

            self.stepper.step(&mut f, t, h);
            self.n_steps += 1;

            let err = self.stepper.error(atol, rtol);
            let fac11 = err.powf(sc.constant);

            if err <= 1.0 || forced {
                self.n_steps_accepted += 1;
                let element = self.stepper.step_complete(&mut f, t, h);

                if self.stiffness.due(self.n_steps_accepted, stiff_check)
                    && self.stiffness.record(self.stepper.is_stiff(h))
                {
                    return Err(abort(&mut self.initialised, Error::Stiff { t }));
                }

                let fac = (fac11 / fac_old.powf(sc.beta) / sc.factor_safe)
                    .clamp(1.0 / sc.factor_max, 1.0 / sc.factor_min);
                let h_new = h / fac;
                self.h = if rejected {
                    h_new.min(h)
                } else {
                    h_new.min(self.step_size_max)
                };

                break (element, err, landing);
            }

            rejected = true;
            if self.n_steps_accepted >= 1 {
                self.n_steps_rejected += 1;
            }
            h /= (1.0 / sc.factor_min).min(fac11 / sc.factor_safe);
            debug!("rejected step at t = {t} (error {err:.3e}); retrying with h = {h:e}");
        };

        self.t = landing.unwrap_or(t + h);
        self.last_error = err;
        self.history.push(element);

        trace!("accepted step to t = {} (h = {h:e}, error {err:.3e})", self.t);
        Ok(Event {
            step: self.n_steps_accepted,
            t: self.t,
            h,
            error: err,
            h_next: self.h,
        })
    }

    /// Steps until `t >= t_end`, emitting an [`Event`] after each step.
    ///
    /// The last step usually overshoots `t_end`; the dense output covers the
    /// overshoot. List `t_end` in [`Control::tcrit`] to land on it exactly.
    ///
    /// # Errors
    ///
    /// Returns an error if the integrator has not been initialised or any
    /// step fails. See [`Integrator::step`].
    pub fn run<F, Obs>(
        &mut self,
        rhs: &mut F,
        t_end: f64,
        mut observer: Obs,
    ) -> Result<Status, Error>
    where
        F: FnMut(f64, &[f64], &mut [f64], &[HistoryElement]),
        Obs: Observer<Event, Action>,
    {
        if !self.initialised {
            return Err(Error::NotInitialised);
        }

        debug!("integrating from t = {} to t = {t_end}", self.t);
        while self.t < t_end {
            let event = self.step(rhs)?;
            if let Some(Action::StopEarly) = observer.observe(&event) {
                debug!("stopped by observer at t = {}", self.t);
                return Ok(Status::StoppedByObserver);
            }
        }

        debug!(
            "reached t = {} after {} steps ({} accepted, {} rejected)",
            self.t, self.n_steps, self.n_steps_accepted, self.n_steps_rejected
        );
        Ok(Status::Complete)
    }

    /// Returns the work counters of the current integration.
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        Statistics {
            n_eval: self.stepper.n_eval(),
            n_steps: self.n_steps,
            n_steps_accepted: self.n_steps_accepted,
            n_steps_rejected: self.n_steps_rejected,
            stiff_n_stiff: self.stiffness.n_stiff,
            stiff_n_nonstiff: self.stiffness.n_nonstiff,
            last_error: self.last_error,
        }
    }

    /// Returns the accepted steps so far, in time order.
    #[must_use]
    pub fn history(&self) -> &[HistoryElement] {
        &self.history
    }

    /// Returns the dense-output evaluator matching the history elements.
    #[must_use]
    pub fn dense(&self) -> S::Dense {
        self.stepper.dense()
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &[f64] {
        self.stepper.state()
    }

    /// Returns the validated control.
    #[must_use]
    pub fn control(&self) -> &Control {
        &self.control
    }

    /// Returns the time reached.
    #[must_use]
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Returns the step size that the next step will try first.
    #[must_use]
    pub fn h(&self) -> f64 {
        self.h
    }

    /// Returns the dimension of the system.
    #[must_use]
    pub fn n(&self) -> usize {
        self.stepper.n()
    }

    /// Whether [`Integrator::initialise`] has been called.
    #[must_use]
    pub fn is_initialised(&self) -> bool {
        self.initialised
    }
}

/// Logs a fatal integration error and marks the integrator as needing a
/// fresh [`Integrator::initialise`].
///
/// The stepper may already hold the rejected or uncommitted step, so its
/// state can no longer be trusted to continue from `t`.
fn abort(initialised: &mut bool, err: Error) -> Error {
    *initialised = false;
    warn!("{err}");
    err
}
