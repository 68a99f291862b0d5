/// The record of one accepted integration step.
///
/// Holds the start time `t`, the step width `h`, and the dense-output
/// coefficients needed to reconstruct the solution anywhere in `[t, t + h]`.
/// The coefficient layout belongs to the stepper that produced the element,
/// so an element can only be evaluated by a [`DenseOutput`] of the same
/// stepper type and dimension.
///
/// Elements are immutable once created. Steppers build them by copying out of
/// their reusable scratch space, so a stored element never aliases buffers
/// that the next step will overwrite.
///
/// [`DenseOutput`]: crate::DenseOutput
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryElement {
    t: f64,
    h: f64,
    data: Vec<f64>,
}

impl HistoryElement {
    /// Creates an element covering `[t, t + h]` with the given coefficients.
    #[must_use]
    pub fn new(t: f64, h: f64, data: Vec<f64>) -> Self {
        Self { t, h, data }
    }

    /// Start time of the step.
    #[must_use]
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Width of the step.
    #[must_use]
    pub fn h(&self) -> f64 {
        self.h
    }

    /// End time of the step, `t + h`.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.t + self.h
    }

    /// Dense-output coefficients.
    #[must_use]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Normalized position of `t` within the step.
    ///
    /// Returns 0 at the start of the step and 1 at its end.
    #[must_use]
    pub fn theta(&self, t: f64) -> f64 {
        (t - self.t) / self.h
    }
}
