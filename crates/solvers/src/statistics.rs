/// Counters describing the work done by an integration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Statistics {
    /// Right-hand side evaluations, including the initial ones.
    pub n_eval: usize,

    /// Attempted steps, accepted or not.
    pub n_steps: usize,

    /// Accepted steps.
    pub n_steps_accepted: usize,

    /// Rejected steps, counted only once a first step has been accepted.
    pub n_steps_rejected: usize,

    /// Length of the current run of stiffness detections.
    pub stiff_n_stiff: usize,

    /// Non-stiff checks since the current stiffness run began.
    pub stiff_n_nonstiff: usize,

    /// Error norm of the last accepted step.
    pub last_error: f64,
}
