/// Event emitted after each accepted step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Number of accepted steps so far, counting this one.
    pub step: usize,

    /// Time reached at the end of the step.
    pub t: f64,

    /// Width of the accepted step.
    pub h: f64,

    /// Scaled error norm of the accepted step.
    pub error: f64,

    /// Step size proposed for the next step.
    pub h_next: f64,
}
