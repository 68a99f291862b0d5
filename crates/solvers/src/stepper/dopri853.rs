mod coefficients;

use dopri_core::{DenseOutput, HistoryElement, StepControl, Stepper};

use self::coefficients::*;
use super::{Scratch, initial_step_size, scale, square};

const ORDER: usize = 8;
const BETA: f64 = 0.0;

const CONTROL: StepControl = StepControl {
    size_min: 1e-8,
    size_max: f64::MAX,
    factor_safe: 0.9,
    // From dop853.f.
    factor_min: 0.333,
    factor_max: 6.0,
    beta: BETA,
    constant: 1.0 / 8.0 - 0.2 * BETA,
};

/// The Dormand–Prince 8(5,3) stepper.
///
/// Twelve stages per attempted step, eleven of them new evaluations. An
/// accepted step costs four more: the derivative at the new point (reused as
/// the first stage of the next step) and three stages that only feed the
/// seventh-order dense output. Each history element stores eight coefficient
/// blocks.
///
/// The error estimate blends the fifth- and third-order embedded solutions.
#[derive(Debug, Clone)]
pub struct Dopri853 {
    n: usize,
    y: Vec<f64>,
    /// Stage scratch state; holds the twelfth-stage state after a step.
    y_stage: Vec<f64>,
    k1: Vec<f64>,
    k2: Vec<f64>,
    k3: Vec<f64>,
    k4: Vec<f64>,
    /// Holds the proposed new state after a step.
    k5: Vec<f64>,
    k6: Vec<f64>,
    k7: Vec<f64>,
    k8: Vec<f64>,
    k9: Vec<f64>,
    k10: Vec<f64>,
    coefficients: Vec<f64>,
    stiff_num: f64,
    stiff_den: f64,
    n_eval: usize,
}

/// Dense-output evaluator for elements produced by [`Dopri853`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dopri853Dense {
    n: usize,
}

impl DenseOutput for Dopri853Dense {
    fn interpolate(&self, t: f64, element: &HistoryElement) -> Vec<f64> {
        let n = self.n;
        let d = element.data();
        debug_assert_eq!(d.len(), ORDER * n, "element from a different stepper");

        let theta = element.theta(t);
        let theta1 = 1.0 - theta;

        (0..n)
            .map(|i| {
                let inner = d[4 * n + i]
                    + theta * (d[5 * n + i] + theta1 * (d[6 * n + i] + theta * d[7 * n + i]));
                d[i] + theta
                    * (d[n + i]
                        + theta1 * (d[2 * n + i] + theta * (d[3 * n + i] + theta1 * inner)))
            })
            .collect()
    }
}

impl Stepper for Dopri853 {
    type Dense = Dopri853Dense;

    fn new(n: usize) -> Self {
        Self {
            n,
            y: vec![0.0; n],
            y_stage: vec![0.0; n],
            k1: vec![0.0; n],
            k2: vec![0.0; n],
            k3: vec![0.0; n],
            k4: vec![0.0; n],
            k5: vec![0.0; n],
            k6: vec![0.0; n],
            k7: vec![0.0; n],
            k8: vec![0.0; n],
            k9: vec![0.0; n],
            k10: vec![0.0; n],
            coefficients: vec![0.0; ORDER * n],
            stiff_num: 0.0,
            stiff_den: 0.0,
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

    fn dense(&self) -> Dopri853Dense {
        Dopri853Dense { n: self.n }
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
        self.stiff_num = 0.0;
        self.stiff_den = 0.0;
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
            y_stage: ys,
            k1,
            k2,
            k3,
            k4,
            k5,
            k6,
            k7,
            k8,
            k9,
            k10,
            n_eval,
            ..
        } = self;
        let n = *n;

        for i in 0..n {
            ys[i] = y[i] + h * A21 * k1[i];
        }
        rhs(t + C2 * h, ys, k2);

        for i in 0..n {
            ys[i] = y[i] + h * (A31 * k1[i] + A32 * k2[i]);
        }
        rhs(t + C3 * h, ys, k3);

        for i in 0..n {
            ys[i] = y[i] + h * (A41 * k1[i] + A43 * k3[i]);
        }
        rhs(t + C4 * h, ys, k4);

        for i in 0..n {
            ys[i] = y[i] + h * (A51 * k1[i] + A53 * k3[i] + A54 * k4[i]);
        }
        rhs(t + C5 * h, ys, k5);

        for i in 0..n {
            ys[i] = y[i] + h * (A61 * k1[i] + A64 * k4[i] + A65 * k5[i]);
        }
        rhs(t + C6 * h, ys, k6);

        for i in 0..n {
            ys[i] = y[i] + h * (A71 * k1[i] + A74 * k4[i] + A75 * k5[i] + A76 * k6[i]);
        }
        rhs(t + C7 * h, ys, k7);

        for i in 0..n {
            ys[i] = y[i]
                + h * (A81 * k1[i] + A84 * k4[i] + A85 * k5[i] + A86 * k6[i] + A87 * k7[i]);
        }
        rhs(t + C8 * h, ys, k8);

        for i in 0..n {
            ys[i] = y[i]
                + h * (A91 * k1[i]
                    + A94 * k4[i]
                    + A95 * k5[i]
                    + A96 * k6[i]
                    + A97 * k7[i]
                    + A98 * k8[i]);
        }
        rhs(t + C9 * h, ys, k9);

        for i in 0..n {
            ys[i] = y[i]
                + h * (A101 * k1[i]
                    + A104 * k4[i]
                    + A105 * k5[i]
                    + A106 * k6[i]
                    + A107 * k7[i]
                    + A108 * k8[i]
                    + A109 * k9[i]);
        }
        rhs(t + C10 * h, ys, k10);

        for i in 0..n {
            ys[i] = y[i]
                + h * (A111 * k1[i]
                    + A114 * k4[i]
                    + A115 * k5[i]
                    + A116 * k6[i]
                    + A117 * k7[i]
                    + A118 * k8[i]
                    + A119 * k9[i]
                    + A1110 * k10[i]);
        }
        rhs(t + C11 * h, ys, k2);

        let t_next = t + h;
        for i in 0..n {
            ys[i] = y[i]
                + h * (A121 * k1[i]
                    + A124 * k4[i]
                    + A125 * k5[i]
                    + A126 * k6[i]
                    + A127 * k7[i]
                    + A128 * k8[i]
                    + A129 * k9[i]
                    + A1210 * k10[i]
                    + A1211 * k2[i]);
        }
        rhs(t_next, ys, k3);

        // k4 takes the weighted slope and k5 the proposed new state.
        for i in 0..n {
            k4[i] = B1 * k1[i]
                + B6 * k6[i]
                + B7 * k7[i]
                + B8 * k8[i]
                + B9 * k9[i]
                + B10 * k10[i]
                + B11 * k2[i]
                + B12 * k3[i];
            k5[i] = y[i] + h * k4[i];
        }

        *n_eval += 11;
    }

    fn step_complete<F>(&mut self, rhs: &mut F, t: f64, h: f64) -> HistoryElement
    where
        F: FnMut(f64, &[f64], &mut [f64]),
    {
        let Self {
            n,
            y,
            y_stage: ys,
            k1,
            k2,
            k3,
            k4,
            k5,
            k6,
            k7,
            k8,
            k9,
            k10,
            coefficients: d,
            stiff_num,
            stiff_den,
            n_eval,
            ..
        } = self;
        let n = *n;

        // FSAL: k4 becomes the first stage of the next step.
        rhs(t + h, k5, k4);

        // Capture the stiffness quotient before the dense stages reuse k3
        // and the stage state.
        *stiff_num = 0.0;
        *stiff_den = 0.0;
        for i in 0..n {
            *stiff_num += square(k4[i] - k3[i]);
            *stiff_den += square(k5[i] - ys[i]);
        }

        for i in 0..n {
            let y_diff = k5[i] - y[i];
            let bspl = h * k1[i] - y_diff;
            d[i] = y[i];
            d[n + i] = y_diff;
            d[2 * n + i] = bspl;
            d[3 * n + i] = y_diff - h * k4[i] - bspl;
            d[4 * n + i] = D41 * k1[i]
                + D46 * k6[i]
                + D47 * k7[i]
                + D48 * k8[i]
                + D49 * k9[i]
                + D410 * k10[i]
                + D411 * k2[i]
                + D412 * k3[i];
            d[5 * n + i] = D51 * k1[i]
                + D56 * k6[i]
                + D57 * k7[i]
                + D58 * k8[i]
                + D59 * k9[i]
                + D510 * k10[i]
                + D511 * k2[i]
                + D512 * k3[i];
            d[6 * n + i] = D61 * k1[i]
                + D66 * k6[i]
                + D67 * k7[i]
                + D68 * k8[i]
                + D69 * k9[i]
                + D610 * k10[i]
                + D611 * k2[i]
                + D612 * k3[i];
            d[7 * n + i] = D71 * k1[i]
                + D76 * k6[i]
                + D77 * k7[i]
                + D78 * k8[i]
                + D79 * k9[i]
                + D710 * k10[i]
                + D711 * k2[i]
                + D712 * k3[i];
        }

        // Three extra stages for the dense output.
        for i in 0..n {
            ys[i] = y[i]
                + h * (A141 * k1[i]
                    + A147 * k7[i]
                    + A148 * k8[i]
                    + A149 * k9[i]
                    + A1410 * k10[i]
                    + A1411 * k2[i]
                    + A1412 * k3[i]
                    + A1413 * k4[i]);
        }
        rhs(t + C14 * h, ys, k10);

        for i in 0..n {
            ys[i] = y[i]
                + h * (A151 * k1[i]
                    + A156 * k6[i]
                    + A157 * k7[i]
                    + A158 * k8[i]
                    + A1511 * k2[i]
                    + A1512 * k3[i]
                    + A1513 * k4[i]
                    + A1514 * k10[i]);
        }
        rhs(t + C15 * h, ys, k2);

        for i in 0..n {
            ys[i] = y[i]
                + h * (A161 * k1[i]
                    + A166 * k6[i]
                    + A167 * k7[i]
                    + A168 * k8[i]
                    + A169 * k9[i]
                    + A1613 * k4[i]
                    + A1614 * k10[i]
                    + A1615 * k2[i]);
        }
        rhs(t + C16 * h, ys, k3);

        *n_eval += 4;

        for i in 0..n {
            d[4 * n + i] = h
                * (d[4 * n + i] + D413 * k4[i] + D414 * k10[i] + D415 * k2[i] + D416 * k3[i]);
            d[5 * n + i] = h
                * (d[5 * n + i] + D513 * k4[i] + D514 * k10[i] + D515 * k2[i] + D516 * k3[i]);
            d[6 * n + i] = h
                * (d[6 * n + i] + D613 * k4[i] + D614 * k10[i] + D615 * k2[i] + D616 * k3[i]);
            d[7 * n + i] = h
                * (d[7 * n + i] + D713 * k4[i] + D714 * k10[i] + D715 * k2[i] + D716 * k3[i]);
        }
        let element = HistoryElement::new(t, h, d.clone());

        k1.copy_from_slice(k4);
        y.copy_from_slice(k5);

        element
    }

    fn error(&self, atol: f64, rtol: f64) -> f64 {
        let mut err: f64 = 0.0;
        let mut err2: f64 = 0.0;
        for i in 0..self.n {
            let sk = scale(atol, rtol, self.y[i], self.k5[i]);
            let e3 = self.k4[i] - BHH1 * self.k1[i] - BHH2 * self.k9[i] - BHH3 * self.k3[i];
            err2 += square(e3 / sk);
            let e5 = ER1 * self.k1[i]
                + ER6 * self.k6[i]
                + ER7 * self.k7[i]
                + ER8 * self.k8[i]
                + ER9 * self.k9[i]
                + ER10 * self.k10[i]
                + ER11 * self.k2[i]
                + ER12 * self.k3[i];
            err += square(e5 / sk);
        }

        let deno = err + 0.01 * err2;
        let deno = if deno > 0.0 { deno } else { 1.0 };
        err * (1.0 / (self.n as f64 * deno)).sqrt()
    }

    fn is_stiff(&self, h: f64) -> bool {
        self.stiff_den > 0.0 && h.abs() * (self.stiff_num / self.stiff_den).sqrt() > 6.1
    }
}
