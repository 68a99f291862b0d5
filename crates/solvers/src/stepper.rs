//! Dormand–Prince steppers.
//!
//! - [`Dopri5`] — the 5(4) pair with Shampine's 4th-order dense output
//! - [`Dopri853`] — the 8(5,3) pair with Hairer's 7th-order dense output
//!
//! Both implement [`dopri_core::Stepper`] and own all of their work buffers.

mod dopri5;
mod dopri853;

pub use dopri5::{Dopri5, Dopri5Dense};
pub use dopri853::{Dopri853, Dopri853Dense};

/// Scratch buffers used while estimating the initial step size.
pub(crate) struct Scratch<'a> {
    /// Receives `f(t, y)`.
    pub f0: &'a mut [f64],
    /// Receives `f(t + h, y + h f0)`.
    pub f1: &'a mut [f64],
    /// Receives the explicit Euler state `y + h f0`.
    pub y1: &'a mut [f64],
}

/// Estimates a starting step size for a method of the given order.
///
/// Follows Hairer, Nørsett and Wanner: pick `h` so that an explicit Euler
/// step changes `y` by about 1% of its scaled norm, estimate the second
/// derivative from that trial step, then choose `h` so that
/// `h^order * max(|f|, |f'|) = 0.01`.
///
/// Makes two right-hand side evaluations.
#[allow(clippy::too_many_arguments)]
pub(crate) fn initial_step_size<F>(
    rhs: &mut F,
    t: f64,
    y: &[f64],
    scratch: Scratch<'_>,
    order: usize,
    atol: f64,
    rtol: f64,
    size_max: f64,
) -> f64
where
    F: FnMut(f64, &[f64], &mut [f64]),
{
    let Scratch { f0, f1, y1 } = scratch;

    rhs(t, y, f0);

    let mut norm_f: f64 = 0.0;
    let mut norm_y: f64 = 0.0;
    for (&yi, &fi) in y.iter().zip(f0.iter()) {
        let sk = atol + rtol * yi.abs();
        norm_f += square(fi / sk);
        norm_y += square(yi / sk);
    }

    let h = if norm_f <= 1e-10 || norm_y <= 1e-10 {
        1e-6
    } else {
        (norm_y / norm_f).sqrt() * 0.01
    };
    let h = h.min(size_max);

    // Explicit Euler step.
    for ((y1i, &yi), &fi) in y1.iter_mut().zip(y).zip(f0.iter()) {
        *y1i = yi + h * fi;
    }
    rhs(t + h, y1, f1);

    let mut der2: f64 = 0.0;
    for ((&yi, &f0i), &f1i) in y.iter().zip(f0.iter()).zip(f1.iter()) {
        let sk = atol + rtol * yi.abs();
        der2 += square((f1i - f0i) / sk);
    }
    let der2 = der2.sqrt() / h;

    let der12 = der2.abs().max(norm_f.sqrt());
    let h1 = if der12 <= 1e-15 {
        (h.abs() * 1e-3).max(1e-6)
    } else {
        (0.01 / der12).powf(1.0 / order as f64)
    };

    (100.0 * h.abs()).min(h1).min(size_max)
}

/// Scaled RMS norm shared by both steppers.
///
/// `sk = atol + rtol * max(|y|, |y_next|)`.
pub(crate) fn scale(atol: f64, rtol: f64, y: f64, y_next: f64) -> f64 {
    atol + rtol * y.abs().max(y_next.abs())
}

pub(crate) fn square(x: f64) -> f64 {
    x * x
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn initial_step_size_for_zero_state_falls_back() {
        // y = 0 and f = 0: both norms vanish, so h starts at 1e-6 and the
        // second-derivative estimate is also zero, giving h1 = 1e-6.
        let mut rhs = |_t: f64, _y: &[f64], dy: &mut [f64]| dy[0] = 0.0;
        let (mut f0, mut f1, mut y1) = ([0.0], [0.0], [0.0]);

        let h = initial_step_size(
            &mut rhs,
            0.0,
            &[0.0],
            Scratch {
                f0: &mut f0,
                f1: &mut f1,
                y1: &mut y1,
            },
            5,
            1e-6,
            1e-6,
            f64::MAX,
        );

        assert_relative_eq!(h, 1e-6);
    }

    #[test]
    fn initial_step_size_respects_size_max() {
        let mut rhs = |_t: f64, y: &[f64], dy: &mut [f64]| dy[0] = y[0];
        let (mut f0, mut f1, mut y1) = ([0.0], [0.0], [0.0]);

        let h = initial_step_size(
            &mut rhs,
            0.0,
            &[1.0],
            Scratch {
                f0: &mut f0,
                f1: &mut f1,
                y1: &mut y1,
            },
            5,
            1e-6,
            1e-6,
            1e-5,
        );

        assert!(h <= 1e-5);
        assert!(h > 0.0);
    }

    #[test]
    fn initial_step_size_for_growth() {
        // dy/dt = y from y = 1 with tight tolerances: the Euler guess is
        // 0.01 and f' = f, so h1 = (0.01 / |f|)^(1/5) in scaled units.
        let mut rhs = |_t: f64, y: &[f64], dy: &mut [f64]| dy[0] = y[0];
        let (mut f0, mut f1, mut y1) = ([0.0], [0.0], [0.0]);

        let h = initial_step_size(
            &mut rhs,
            0.0,
            &[1.0],
            Scratch {
                f0: &mut f0,
                f1: &mut f1,
                y1: &mut y1,
            },
            5,
            1e-6,
            1e-6,
            f64::MAX,
        );

        let sk: f64 = 1e-6 + 1e-6;
        let expected = (0.01 * sk).powf(0.2);
        assert_relative_eq!(h, expected, max_relative = 1e-12);
        assert_relative_eq!(f0[0], 1.0);
        assert_relative_eq!(y1[0], 1.01);
    }
}
