//! Core traits and types for Dormand–Prince solvers.
//!
//! This crate defines the shared abstractions that steppers, integrators, and
//! observers build on:
//!
//! - [`Stepper`] — one embedded Runge–Kutta formula with dense output
//! - [`DenseOutput`] — evaluates a stored step anywhere inside its span
//! - [`StepControl`] — per-order step-size control constants
//! - [`HistoryElement`] — the immutable record of one accepted step
//! - [`Observer`] — receives solver events and optionally returns control actions
//! - [`search`] — rightmost element not satisfying a monotone predicate

mod history;
mod observer;
mod search;
mod stepper;

pub use history::HistoryElement;
pub use observer::Observer;
pub use search::search;
pub use stepper::{DenseOutput, StepControl, Stepper};
