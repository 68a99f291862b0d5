use thiserror::Error;

/// Tuning parameters for an integration.
///
/// Every field has a sensible default, so the usual way to build one is
/// `Control::default()` followed by the `with_*` methods for the fields that
/// matter. Drivers call [`Control::validate`] once on construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Control {
    /// Maximum number of step attempts (accepted or rejected) before the
    /// integration gives up.
    pub max_steps: usize,

    /// Per-step absolute tolerance.
    pub atol: f64,

    /// Per-step relative tolerance.
    pub rtol: f64,

    /// Check for stiffness every `stiff_check` accepted steps.
    ///
    /// Zero disables periodic checks. Once a check has reported stiffness,
    /// every following step is checked until the problem recovers.
    pub stiff_check: usize,

    /// Times the solver must land on exactly and never step across.
    pub tcrit: Vec<f64>,

    /// Smallest allowed step size, or `None` for the stepper's own limit.
    pub step_size_min: Option<f64>,

    /// Largest allowed step size, or `None` for the stepper's own limit.
    pub step_size_max: Option<f64>,

    /// Keep going at `step_size_min` instead of failing when the error
    /// estimate asks for a smaller step.
    ///
    /// Accuracy requested by `atol` and `rtol` is then no longer guaranteed.
    pub step_size_min_allow: bool,
}

/// Errors that can occur when validating a [`Control`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ControlError {
    #[error("max_steps must be at least 1")]
    MaxSteps,

    #[error("atol must be finite and strictly positive")]
    Atol,

    #[error("rtol must be finite and strictly positive")]
    Rtol,

    #[error("step_size_min must be finite and strictly positive")]
    StepSizeMin,

    #[error("step_size_max must be strictly positive")]
    StepSizeMax,

    #[error("step_size_min must not exceed step_size_max")]
    StepSizeRange,

    #[error("tcrit entries must be finite")]
    Tcrit,
}

impl Default for Control {
    fn default() -> Self {
        Self {
            max_steps: 10_000,
            atol: 1e-6,
            rtol: 1e-6,
            stiff_check: 0,
            tcrit: Vec::new(),
            step_size_min: None,
            step_size_max: None,
            step_size_min_allow: false,
        }
    }
}

impl Control {
    /// Sets the maximum number of step attempts.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Sets the absolute tolerance.
    #[must_use]
    pub fn with_atol(mut self, atol: f64) -> Self {
        self.atol = atol;
        self
    }

    /// Sets the relative tolerance.
    #[must_use]
    pub fn with_rtol(mut self, rtol: f64) -> Self {
        self.rtol = rtol;
        self
    }

    /// Sets both tolerances to the same value.
    #[must_use]
    pub fn with_tolerance(self, tol: f64) -> Self {
        self.with_atol(tol).with_rtol(tol)
    }

    /// Sets the stiffness check interval.
    #[must_use]
    pub fn with_stiff_check(mut self, stiff_check: usize) -> Self {
        self.stiff_check = stiff_check;
        self
    }

    /// Sets the critical times.
    #[must_use]
    pub fn with_tcrit(mut self, tcrit: impl Into<Vec<f64>>) -> Self {
        self.tcrit = tcrit.into();
        self
    }

    /// Sets the minimum step size.
    #[must_use]
    pub fn with_step_size_min(mut self, step_size_min: f64) -> Self {
        self.step_size_min = Some(step_size_min);
        self
    }

    /// Sets the maximum step size.
    #[must_use]
    pub fn with_step_size_max(mut self, step_size_max: f64) -> Self {
        self.step_size_max = Some(step_size_max);
        self
    }

    /// Sets whether steps may be forced to the minimum step size.
    #[must_use]
    pub fn with_step_size_min_allow(mut self, allow: bool) -> Self {
        self.step_size_min_allow = allow;
        self
    }

    /// Checks every parameter and returns the normalized control.
    ///
    /// The returned control has `tcrit` sorted in ascending order.
    ///
    /// # Errors
    ///
    /// Returns a [`ControlError`] naming the first invalid parameter.
    pub fn validate(mut self) -> Result<Self, ControlError> {
        if self.max_steps < 1 {
            return Err(ControlError::MaxSteps);
        }
        if !is_positive(self.atol) {
            return Err(ControlError::Atol);
        }
        if !is_positive(self.rtol) {
            return Err(ControlError::Rtol);
        }
        if self.step_size_min.is_some_and(|min| !is_positive(min)) {
            return Err(ControlError::StepSizeMin);
        }
        // An infinite maximum is the same as no maximum.
        if self.step_size_max.is_some_and(|max| max.is_nan() || max <= 0.0) {
            return Err(ControlError::StepSizeMax);
        }
        if let (Some(min), Some(max)) = (self.step_size_min, self.step_size_max) {
            if min > max {
                return Err(ControlError::StepSizeRange);
            }
        }
        if self.tcrit.iter().any(|t| !t.is_finite()) {
            return Err(ControlError::Tcrit);
        }

        self.tcrit.sort_by(f64::total_cmp);
        Ok(self)
    }
}

fn is_positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}
