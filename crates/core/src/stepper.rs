use crate::HistoryElement;

/// Step-size control constants for one stepper order.
///
/// These tune the asymptotic step-size controller: the next step is
/// `h / clamp(err^constant / err_old^beta / factor_safe, 1/factor_max, 1/factor_min)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepControl {
    /// Smallest step the integrator takes unless configured otherwise.
    pub size_min: f64,
    /// Largest step the integrator takes unless configured otherwise.
    pub size_max: f64,
    /// Safety factor applied to every proposed step.
    pub factor_safe: f64,
    /// Smallest allowed ratio between consecutive step sizes.
    pub factor_min: f64,
    /// Largest allowed ratio between consecutive step sizes.
    pub factor_max: f64,
    /// Lund stabilization exponent.
    pub beta: f64,
    /// Error exponent, derived from `beta` and the stepper order.
    pub constant: f64,
}

/// Evaluates a stored step at an arbitrary time inside its span.
///
/// Implementations are small `Copy` values (typically just the dimension)
/// so they can be handed to the delay extension while the stepper itself is
/// mutably borrowed mid-step.
pub trait DenseOutput {
    /// Evaluates the dense-output polynomial of `element` at time `t`.
    ///
    /// Reproduces the accepted-step values exactly at the start and end of
    /// the element. Times outside the element extrapolate the polynomial.
    fn interpolate(&self, t: f64, element: &HistoryElement) -> Vec<f64>;
}

/// An embedded Runge–Kutta formula with dense output and stiffness detection.
///
/// A stepper owns the current state and all work buffers for one integration.
/// The right-hand side `f(t, y, dy)` is passed into each call rather than
/// stored, which lets callers hand it views of data (such as the history)
/// that live alongside the stepper.
///
/// The integrator drives a stepper through this cycle:
///
/// 1. [`reset`](Stepper::reset) and [`initial_step_size`](Stepper::initial_step_size)
///    once per integration.
/// 2. [`step`](Stepper::step) followed by [`error`](Stepper::error) for each
///    trial step size.
/// 3. [`step_complete`](Stepper::step_complete) once a trial is accepted,
///    then [`is_stiff`](Stepper::is_stiff) if the stiffness monitor asks.
pub trait Stepper {
    /// Dense-output evaluator for elements produced by this stepper.
    type Dense: DenseOutput + Copy;

    /// Creates a stepper for a system of dimension `n`.
    fn new(n: usize) -> Self
    where
        Self: Sized;

    /// Dimension of the state vector.
    fn n(&self) -> usize;

    /// Order of the formula, which is also the number of coefficient blocks
    /// stored per history element.
    fn order(&self) -> usize;

    /// Step-size control constants for this order.
    fn step_control(&self) -> &StepControl;

    /// Returns the dense-output evaluator for this stepper.
    fn dense(&self) -> Self::Dense;

    /// Number of right-hand side evaluations since the last reset.
    fn n_eval(&self) -> usize;

    /// Current (last committed) state.
    fn state(&self) -> &[f64];

    /// Sets the state to `y` at time `t` and evaluates the initial derivative.
    fn reset<F>(&mut self, rhs: &mut F, t: f64, y: &[f64])
    where
        F: FnMut(f64, &[f64], &mut [f64]);

    /// Estimates a starting step size from the current state.
    ///
    /// Takes one explicit Euler trial step and estimates the second
    /// derivative so that `h^order * max(|f|, |f'|) ≈ 0.01`, with the result
    /// clamped to `size_max` and to 100 times the Euler estimate.
    fn initial_step_size<F>(
        &mut self,
        rhs: &mut F,
        t: f64,
        atol: f64,
        rtol: f64,
        size_max: f64,
    ) -> f64
    where
        F: FnMut(f64, &[f64], &mut [f64]);

    /// Computes a trial step of width `h` from `t` without committing it.
    fn step<F>(&mut self, rhs: &mut F, t: f64, h: f64)
    where
        F: FnMut(f64, &[f64], &mut [f64]);

    /// Commits the last trial step and returns its history element.
    ///
    /// The returned element owns a copy of the dense-output coefficients.
    fn step_complete<F>(&mut self, rhs: &mut F, t: f64, h: f64) -> HistoryElement
    where
        F: FnMut(f64, &[f64], &mut [f64]);

    /// Scaled RMS norm of the local error estimate of the last trial step.
    ///
    /// A value of at most 1 means the step satisfies the tolerances.
    fn error(&self, atol: f64, rtol: f64) -> f64;

    /// Whether the last committed step shows signs of stiffness.
    fn is_stiff(&self, h: f64) -> bool;
}
