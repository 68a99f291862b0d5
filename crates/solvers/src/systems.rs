//! Reference right-hand sides with known behavior.
//!
//! These are small, well-understood systems used to exercise the solvers:
//! exponential growth and decay, logistic growth, the Lorenz attractor, and
//! a flame-propagation model that becomes stiff.

/// Independent exponential growth, `dy_i/dt = r_i y_i`.
pub fn exponential(r: Vec<f64>) -> impl Fn(f64, &[f64], &mut [f64]) {
    move |_t: f64, y: &[f64], dy: &mut [f64]| {
        for ((dy, y), r) in dy.iter_mut().zip(y).zip(&r) {
            *dy = y * r;
        }
    }
}

/// Analytic solution of [`exponential`], one row per time.
#[must_use]
pub fn exponential_solution(r: &[f64], y0: &[f64], times: &[f64]) -> Vec<Vec<f64>> {
    times
        .iter()
        .map(|&t| y0.iter().zip(r).map(|(y, r)| y * (r * t).exp()).collect())
        .collect()
}

/// Logistic growth with rate `r` and carrying capacity `k`.
pub fn logistic(r: f64, k: f64) -> impl Fn(f64, &[f64], &mut [f64]) {
    move |_t: f64, y: &[f64], dy: &mut [f64]| {
        let n = y[0];
        dy[0] = r * n * (1.0 - n / k);
    }
}

/// Analytic solution of [`logistic`] starting from `y0` at `t = 0`.
#[must_use]
pub fn logistic_solution(r: f64, k: f64, y0: f64, times: &[f64]) -> Vec<f64> {
    times
        .iter()
        .map(|&t| k / (1.0 + (k / y0 - 1.0) * (-r * t).exp()))
        .collect()
}

/// The Lorenz system with the classic parameters `σ = 10`, `R = 28`, `b = 8/3`.
pub fn lorenz() -> impl Fn(f64, &[f64], &mut [f64]) {
    const SIGMA: f64 = 10.0;
    const R: f64 = 28.0;
    const B: f64 = 8.0 / 3.0;

    |_t: f64, y: &[f64], dy: &mut [f64]| {
        let (y1, y2, y3) = (y[0], y[1], y[2]);
        dy[0] = SIGMA * (y2 - y1);
        dy[1] = R * y1 - y2 - y1 * y3;
        dy[2] = -B * y3 + y1 * y2;
    }
}

/// Flame propagation, `dy/dt = y^2 - y^3`.
///
/// Starting from a small radius `δ` and run to `2/δ`, the problem is stiff
/// once the flame has ignited.
pub fn flame(_t: f64, y: &[f64], dy: &mut [f64]) {
    dy[0] = y[0].powi(2) - y[0].powi(3);
}
