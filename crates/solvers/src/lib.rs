//! Dormand–Prince solvers for ordinary and delay differential equations.
//!
//! The solvers advance `dy/dt = f(t, y)` with adaptive step-size control and
//! keep a dense-output record of every accepted step, so the solution can be
//! evaluated anywhere in the integrated range:
//!
//! - [`Dopri5`], [`Dopri853`] — the 5(4) and 8(5,3) embedded formulas
//! - [`Integrator`] — accept/reject loop, step-size controller, and stiffness monitor
//! - [`Dopri`] — driver for ordinary differential equations
//! - [`Dde`] — driver for delay differential equations, whose right-hand side
//!   can look up the solution at earlier times
//! - [`Solution`], [`Interpolator`] — evaluate a run at batches of query times
//! - [`integrate_dopri`], [`integrate_dde`], [`integrate`] — one-shot entry points
//! - [`systems`] — reference right-hand sides
//!
//! # Example
//!
//! ```
//! use dopri_solvers::{Control, integrate_dopri, systems};
//!
//! let solution = integrate_dopri(
//!     systems::exponential(vec![-0.5]),
//!     &[1.0],
//!     0.0,
//!     2.0,
//!     Control::default(),
//! )
//! .unwrap();
//!
//! let y = solution(&[0.0, 1.0, 2.0]);
//! assert!((y[2][0] - (-1.0_f64).exp()).abs() < 1e-5);
//! ```

mod action;
mod control;
mod dde;
mod dopri;
mod error;
mod event;
mod integrate;
mod integrator;
mod interpolator;
mod solution;
mod statistics;
mod stepper;

pub mod systems;

pub use action::Action;
pub use control::{Control, ControlError};
pub use dde::{Dde, NoDelayedOutput};
pub use dopri::{Dopri, NoOutput};
pub use error::Error;
pub use event::Event;
pub use integrate::{Output, Rhs, integrate, integrate_dde, integrate_dopri};
pub use integrator::Integrator;
pub use interpolator::Interpolator;
pub use solution::{Solution, Status};
pub use statistics::Statistics;
pub use stepper::{Dopri5, Dopri5Dense, Dopri853, Dopri853Dense};
