use dopri_core::{DenseOutput, HistoryElement, StepControl, Stepper};

use super::{Scratch, initial_step_size, scale, square};

const ORDER: usize = 5;
const BETA: f64 = 0.04;

const CONTROL: StepControl = StepControl {
    size_min: 1e-8,
    size_max: f64::MAX,
    factor_safe: 0.9,
    // From dopri5.f and retard.f.
    factor_min: 0.2,
    factor_max: 10.0,
    beta: BETA,
    constant: 0.2 - 0.75 * BETA,
};

const C2: f64 = 0.2;
const C3: f64 = 0.3;
const C4: f64 = 0.8;
const C5: f64 = 8.0 / 9.0;
const A21: f64 = 0.2;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;
const A71: f64 = 35.0 / 384.0;
const A73: f64 = 500.0 / 1113.0;
const A74: f64 = 125.0 / 192.0;
const A75: f64 = -2187.0 / 6784.0;
const A76: f64 = 11.0 / 84.0;
const E1: f64 = 71.0 / 57600.0;
const E3: f64 = -71.0 / 16695.0;
const E4: f64 = 71.0 / 1920.0;
const E5: f64 = -17253.0 / 339200.0;
const E6: f64 = 22.0 / 525.0;
const E7: f64 = -1.0 / 40.0;

// Dense output of Shampine (1986).
const D1: f64 = -12715105075.0 / 11282082432.0;
const D3: f64 = 87487479700.0 / 32700410799.0;
const D4: f64 = -10690763975.0 / 1880347072.0;
const D5: f64 = 701980252875.0 / 199316789632.0;
const D6: f64 = -1453857185.0 / 822651844.0;
const D7: f64 = 69997945.0 / 29380423.0;

/// The Dormand–Prince 5(4) stepper.
///
/// Seven stages per step with the first-same-as-last property, so an
/// attempted step costs six right-hand side evaluations. Each history
/// element stores five coefficient blocks for Shampine's quartic dense output.
#[derive(Debug, Clone)]
pub struct Dopri5 {
    n: usize,
    y: Vec<f64>,
    y_next: Vec<f64>,
    y_stiff: Vec<f64>,
    k1: Vec<f64>,
    k2: Vec<f64>,
    k3: Vec<f64>,
    k4: Vec<f64>,
    k5: Vec<f64>,
    k6: Vec<f64>,
    coefficients: Vec<f64>,
    n_eval: usize,
}

/// Dense-output evaluator for elements produced by [`Dopri5`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dopri5Dense {
    n: usize,
}

impl DenseOutput for Dopri5Dense {
    fn interpolate(&self, t: f64, element: &HistoryElement) -> Vec<f64> {
        let n = self.n;
        let d = element.data();
        debug_assert_eq!(d.len(), ORDER * n, "element from a different stepper");

        let theta = element.theta(t);
        let theta1 = 1.0 - theta;

        (0..n)
            .map(|i| {
                d[i] + theta
                    * (d[n + i]
                        + theta1 * (d[2 * n + i] + theta * (d[3 * n + i] + theta1 * d[4 * n + i])))
            })
            .collect()
    }
}

impl Stepper for Dopri5 {
    type Dense = Dopri5Dense;

    fn new(n: usize) -> Self {
        Self {
            n,
            y: vec![0.0; n],
            y_next: vec![0.0; n],
            y_stiff: vec![0.0; n],
            k1: vec![0.0; n],
            k2: vec![0.0; n],
            k3: vec![0.0; n],
            k4: vec![0.0; n],
            k5: vec![0.0; n],
            k6: vec![0.0; n],
            coefficients: vec![0.0; ORDER * n],
            n_eval: 0,
        }
    }

    fn n(&self) -> usize {
        self.n
    }

    fn order(&self) -> usize {
        ORDER
    }

    fn step_control(&self) -> &StepControl {
        &CONTROL
    }

    fn dense(&self) -> Dopri5Dense {
        Dopri5Dense { n: self.n }
    }

    fn n_eval(&self) -> usize {
        self.n_eval
    }

    fn state(&self) -> &[f64] {
        &self.y
    }

    fn reset<F>(&mut self, rhs: &mut F, t: f64, y: &[f64])
    where
        F: FnMut(f64, &[f64], &mut [f64]),
    {
        self.y.copy_from_slice(y);
        rhs(t, &self.y, &mut self.k1);
        self.n_eval = 1;
    }

    fn initial_step_size<F>(
        &mut self,
        rhs: &mut F,
        t: f64,
        atol: f64,
        rtol: f64,
        size_max: f64,
    ) -> f64
    where
        F: FnMut(f64, &[f64], &mut [f64]),
    {
        // Leaves k1 = f(t, y), which is what the first step needs anyway.
        let scratch = Scratch {
            f0: &mut self.k1,
            f1: &mut self.k2,
            y1: &mut self.k3,
        };
        let h = initial_step_size(rhs, t, &self.y, scratch, ORDER, atol, rtol, size_max);
        self.n_eval += 2;
        h
    }

    fn step<F>(&mut self, rhs: &mut F, t: f64, h: f64)
    where
        F: FnMut(f64, &[f64], &mut [f64]),
    {
        let Self {
            n,
            y,
            y_next,
            y_stiff,
            k1,
            k2,
            k3,
            k4,
            k5,
            k6,
            coefficients,
            n_eval,
        } = self;
        let n = *n;

        for i in 0..n {
            y_next[i] = y[i] + h * A21 * k1[i];
        }
        rhs(t + C2 * h, y_next, k2);

        for i in 0..n {
            y_next[i] = y[i] + h * (A31 * k1[i] + A32 * k2[i]);
        }
        rhs(t + C3 * h, y_next, k3);

        for i in 0..n {
            y_next[i] = y[i] + h * (A41 * k1[i] + A42 * k2[i] + A43 * k3[i]);
        }
        rhs(t + C4 * h, y_next, k4);

        for i in 0..n {
            y_next[i] = y[i] + h * (A51 * k1[i] + A52 * k2[i] + A53 * k3[i] + A54 * k4[i]);
        }
        rhs(t + C5 * h, y_next, k5);

        for i in 0..n {
            y_stiff[i] = y[i]
                + h * (A61 * k1[i] + A62 * k2[i] + A63 * k3[i] + A64 * k4[i] + A65 * k5[i]);
        }
        let t_next = t + h;
        rhs(t_next, y_stiff, k6);

        for i in 0..n {
            y_next[i] = y[i]
                + h * (A71 * k1[i] + A73 * k3[i] + A74 * k4[i] + A75 * k5[i] + A76 * k6[i]);
        }
        // FSAL: k2 now holds f(t + h, y_next).
        rhs(t_next, y_next, k2);

        for i in 0..n {
            coefficients[4 * n + i] = h
                * (D1 * k1[i] + D3 * k3[i] + D4 * k4[i] + D5 * k5[i] + D6 * k6[i] + D7 * k2[i]);
        }

        // k4 is reused for the local error estimate.
        for i in 0..n {
            k4[i] = h
                * (E1 * k1[i] + E3 * k3[i] + E4 * k4[i] + E5 * k5[i] + E6 * k6[i] + E7 * k2[i]);
        }

        *n_eval += 6;
    }

    fn step_complete<F>(&mut self, _rhs: &mut F, t: f64, h: f64) -> HistoryElement
    where
        F: FnMut(f64, &[f64], &mut [f64]),
    {
        let n = self.n;
        let d = &mut self.coefficients;
        for i in 0..n {
            let y_diff = self.y_next[i] - self.y[i];
            let bspl = h * self.k1[i] - y_diff;
            d[i] = self.y[i];
            d[n + i] = y_diff;
            d[2 * n + i] = bspl;
            d[3 * n + i] = -h * self.k2[i] + y_diff - bspl;
        }
        let element = HistoryElement::new(t, h, d.clone());

        self.k1.copy_from_slice(&self.k2);
        self.y.copy_from_slice(&self.y_next);

        element
    }

    fn error(&self, atol: f64, rtol: f64) -> f64 {
        let sum: f64 = (0..self.n)
            .map(|i| square(self.k4[i] / scale(atol, rtol, self.y[i], self.y_next[i])))
            .sum();
        (sum / self.n as f64).sqrt()
    }

    fn is_stiff(&self, h: f64) -> bool {
        let mut stnum: f64 = 0.0;
        let mut stden: f64 = 0.0;
        for i in 0..self.n {
            stnum += square(self.k2[i] - self.k6[i]);
            stden += square(self.y_next[i] - self.y_stiff[i]);
        }
        stden > 0.0 && h.abs() * (stnum / stden).sqrt() > 3.25
    }
}
