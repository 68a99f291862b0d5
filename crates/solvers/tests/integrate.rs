use approx::assert_relative_eq;
use dopri_solvers::{Control, Error, Output, Rhs, integrate, systems::exponential};

fn times() -> Vec<f64> {
    (0..=10).map(|i| f64::from(i) * 0.2).collect()
}

#[test]
fn dispatches_ordinary_rhs() {
    let rhs = Rhs::Ode(Box::new(exponential(vec![-1.0])));
    let solution = integrate(rhs, &[2.0], 0.0, 2.0, Control::default(), None).unwrap();

    for (row, t) in solution(&times()).iter().zip(times()) {
        assert_eq!(row.len(), 1);
        assert_relative_eq!(row[0], 2.0 * (-t).exp(), max_relative = 1e-5);
    }
}

#[test]
fn dispatches_ordinary_rhs_with_output() {
    let rhs = Rhs::Ode(Box::new(exponential(vec![-1.0])));
    let output = Output::Ode(Box::new(|_t: f64, y: &[f64]| vec![y[0] * y[0]]));
    let solution = integrate(rhs, &[2.0], 0.0, 2.0, Control::default(), Some(output)).unwrap();

    for row in solution(&times()) {
        assert_eq!(row.len(), 2);
        assert_relative_eq!(row[1], row[0] * row[0]);
    }
}

#[test]
fn dispatches_delayed_rhs_with_output() {
    let rhs = Rhs::Delayed(Box::new(
        |t: f64, _y: &[f64], dy: &mut [f64], past: &dyn Fn(f64) -> Vec<f64>| {
            dy[0] = -past(t - 1.0)[0];
        },
    ));
    let output = Output::Delayed(Box::new(
        |t: f64, _y: &[f64], past: &dyn Fn(f64) -> Vec<f64>| past(t - 1.0),
    ));
    let control = Control::default().with_tcrit([1.0]);
    let solution = integrate(rhs, &[1.0], 0.0, 2.0, control, Some(output)).unwrap();

    let rows = solution(&[0.5, 1.5]);
    assert_relative_eq!(rows[0][0], 0.5, epsilon = 1e-8);
    assert_eq!(rows[0][1], 1.0);
    assert_relative_eq!(rows[1][1], 0.5, epsilon = 1e-8);
}

#[test]
fn dispatches_delayed_rhs_without_output() {
    let rhs = Rhs::Delayed(Box::new(
        |_t: f64, y: &[f64], dy: &mut [f64], _past: &dyn Fn(f64) -> Vec<f64>| {
            dy[0] = -y[0];
        },
    ));
    let solution = integrate(rhs, &[1.0], 0.0, 1.0, Control::default(), None).unwrap();

    assert_relative_eq!(solution(&[1.0])[0][0], (-1.0_f64).exp(), max_relative = 1e-5);
}

#[test]
fn end_time_at_or_before_start_returns_initial_state() {
    for t1 in [1.0, 0.5] {
        let rhs = Rhs::Ode(Box::new(exponential(vec![-1.0])));
        let output = Output::Ode(Box::new(|t: f64, _y: &[f64]| vec![t]));
        let solution = integrate(rhs, &[2.0, 3.0], 1.0, t1, Control::default(), Some(output))
            .unwrap();

        assert_eq!(solution(&[0.0, 1.0]), vec![vec![2.0, 3.0, 0.0], vec![2.0, 3.0, 1.0]]);
    }

    let rhs = Rhs::Delayed(Box::new(
        |t: f64, _y: &[f64], dy: &mut [f64], past: &dyn Fn(f64) -> Vec<f64>| {
            dy[0] = -past(t - 1.0)[0];
        },
    ));
    let solution = integrate(rhs, &[1.0], 0.0, 0.0, Control::default(), None).unwrap();
    assert_eq!(solution(&[0.0, 5.0]), vec![vec![1.0], vec![1.0]]);
}

#[test]
fn rejects_delayed_output_for_ordinary_rhs() {
    let rhs = Rhs::Ode(Box::new(exponential(vec![1.0])));
    let output = Output::Delayed(Box::new(
        |t: f64, _y: &[f64], past: &dyn Fn(f64) -> Vec<f64>| past(t),
    ));

    let Err(err) = integrate(rhs, &[1.0], 0.0, 1.0, Control::default(), Some(output)) else {
        panic!("mismatched output should be rejected");
    };
    assert!(matches!(err, Error::OutputMismatch { .. }));
    assert_eq!(err.to_string(), "can't use delayed output with non-delayed rhs");
}

#[test]
fn rejects_ordinary_output_for_delayed_rhs() {
    let rhs = Rhs::Delayed(Box::new(
        |_t: f64, _y: &[f64], dy: &mut [f64], _past: &dyn Fn(f64) -> Vec<f64>| dy[0] = 0.0,
    ));
    let output = Output::Ode(Box::new(|_t: f64, y: &[f64]| y.to_vec()));

    let Err(err) = integrate(rhs, &[1.0], 0.0, 1.0, Control::default(), Some(output)) else {
        panic!("mismatched output should be rejected");
    };
    assert_eq!(err.to_string(), "can't use non-delayed output with delayed rhs");
}

#[test]
fn reports_invalid_control() {
    let rhs = Rhs::Ode(Box::new(exponential(vec![1.0])));
    let control = Control::default().with_atol(-1.0);

    let Err(err) = integrate(rhs, &[1.0], 0.0, 1.0, control, None) else {
        panic!("negative atol should be rejected");
    };
    assert!(matches!(err, Error::InvalidControl(_)));
}

#[test]
fn reports_integration_failure() {
    let rhs = Rhs::Ode(Box::new(exponential(vec![1.0])));
    let control = Control::default().with_max_steps(2);

    let Err(err) = integrate(rhs, &[1.0], 0.0, 100.0, control, None) else {
        panic!("step budget should be exhausted");
    };
    assert!(matches!(err, Error::TooManySteps { .. }));
}
