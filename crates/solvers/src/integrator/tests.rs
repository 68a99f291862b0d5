use approx::assert_relative_eq;
use dopri_core::HistoryElement;

use crate::{
    Action, Control, Dopri5, Error, Event, Status,
    systems::{exponential, flame, lorenz},
};

use super::Integrator;

/// Adapts an ordinary right-hand side to the integrator's history-aware form.
fn ode<F>(f: F) -> impl FnMut(f64, &[f64], &mut [f64], &[HistoryElement])
where
    F: Fn(f64, &[f64], &mut [f64]),
{
    move |t: f64, y: &[f64], dy: &mut [f64], _history: &[HistoryElement]| f(t, y, dy)
}

fn constant(_t: f64, _y: &[f64], dy: &mut [f64]) {
    dy[0] = 1.0;
}

fn integrator(n: usize, control: Control) -> Integrator<Dopri5> {
    Integrator::new(n, control).expect("valid control")
}

#[test]
fn stepping_requires_initialisation() {
    let mut integrator = integrator(1, Control::default());
    let mut rhs = ode(flame);

    assert!(matches!(integrator.step(&mut rhs), Err(Error::NotInitialised)));
    assert!(matches!(
        integrator.run(&mut rhs, 1.0, ()),
        Err(Error::NotInitialised)
    ));
}

#[test]
fn rejects_state_of_wrong_length() {
    let mut integrator = integrator(3, Control::default());
    let mut rhs = ode(lorenz());

    assert_eq!(
        integrator.initialise(&mut rhs, 0.0, &[1.0]),
        Err(Error::DimensionMismatch {
            expected: 3,
            actual: 1
        })
    );
    assert!(integrator.initialise(&mut rhs, 0.0, &[1.0, 1.0, 1.0]).is_ok());
}

#[test]
fn rejects_inconsistent_step_size_bounds() {
    let control = Control::default().with_step_size_max(1e-9);
    let result = Integrator::<Dopri5>::new(1, control);

    assert!(matches!(result, Err(Error::InvalidControl(_))));
}

#[test]
fn statistics_through_a_run() {
    let mut integrator = integrator(3, Control::default());
    let mut rhs = ode(lorenz());

    let stats = integrator.statistics();
    assert_eq!(stats.n_eval, 0);
    assert_eq!(stats.n_steps, 0);
    assert_eq!(stats.n_steps_accepted, 0);
    assert_eq!(stats.n_steps_rejected, 0);
    assert_eq!(stats.stiff_n_stiff, 0);
    assert_eq!(stats.stiff_n_nonstiff, 0);

    integrator
        .initialise(&mut rhs, 0.0, &[10.0, 1.0, 1.0])
        .expect("valid state");
    let stats = integrator.statistics();
    assert_eq!(stats.n_eval, 3);
    assert_eq!(stats.n_steps, 0);
    assert_eq!(stats.n_steps_accepted, 0);
    assert_eq!(stats.n_steps_rejected, 0);

    let status = integrator.run(&mut rhs, 10.0, ()).expect("should integrate");
    assert_eq!(status, Status::Complete);

    let stats = integrator.statistics();
    assert_eq!(stats.n_eval, 2091);
    assert_eq!(stats.n_steps, 348);
    assert_eq!(stats.n_steps_accepted, 340);
    assert_eq!(stats.n_steps_rejected, 8);
    assert_eq!(stats.stiff_n_stiff, 0);
    assert_eq!(stats.stiff_n_nonstiff, 0);

    // Bootstrap plus six evaluations per attempted step.
    assert_eq!(stats.n_eval, 3 + 6 * stats.n_steps);
    assert_eq!(integrator.history().len(), stats.n_steps_accepted);
}

#[test]
fn history_is_contiguous() {
    let mut integrator = integrator(3, Control::default());
    let mut rhs = ode(lorenz());
    integrator
        .initialise(&mut rhs, 0.0, &[10.0, 1.0, 1.0])
        .expect("valid state");
    integrator.run(&mut rhs, 2.0, ()).expect("should integrate");

    let history = integrator.history();
    assert_relative_eq!(history[0].t(), 0.0);
    for pair in history.windows(2) {
        assert_relative_eq!(pair[0].end(), pair[1].t(), max_relative = 1e-14);
        assert_eq!(pair[0].data().len(), 15);
    }
    assert!(integrator.t() >= 2.0);
}

#[test]
fn too_many_steps() {
    let mut integrator = integrator(1, Control::default().with_max_steps(5));
    let mut rhs = ode(flame);
    integrator.initialise(&mut rhs, 0.0, &[0.1]).expect("valid state");

    let err = integrator.run(&mut rhs, 100.0, ()).unwrap_err();
    assert!(matches!(err, Error::TooManySteps { .. }));
    assert!(err.to_string().contains("too many steps"));
}

#[test]
fn step_too_small() {
    let mut integrator = integrator(1, Control::default().with_step_size_min(0.1));
    let mut rhs = ode(flame);
    integrator.initialise(&mut rhs, 0.0, &[0.1]).expect("valid state");

    let err = integrator.run(&mut rhs, 100.0, ()).unwrap_err();
    assert!(matches!(err, Error::StepTooSmall { .. }));
    assert!(err.to_string().contains("step too small"));
}

#[test]
fn step_size_min_can_be_forced() {
    let control = Control::default()
        .with_step_size_min(0.01)
        .with_step_size_min_allow(true);
    let mut integrator = integrator(3, control);
    let mut rhs = ode(lorenz());
    integrator
        .initialise(&mut rhs, 0.0, &[10.0, 1.0, 1.0])
        .expect("valid state");
    integrator.run(&mut rhs, 1.0, ()).expect("should integrate");

    let history = integrator.history();
    assert!(history.iter().all(|el| el.h() >= 0.01));

    let smallest = history.iter().map(HistoryElement::h).fold(f64::INFINITY, f64::min);
    assert_relative_eq!(smallest, 0.01);
}

#[test]
fn step_size_vanished() {
    let h = 1e-8;
    let mut integrator = integrator(1, Control::default());
    let mut rhs = ode(exponential(vec![0.5]));

    // At this t, h is exactly one unit of roundoff.
    integrator
        .initialise(&mut rhs, h / f64::EPSILON, &[0.1])
        .expect("valid state");

    integrator.h = h;
    let err = integrator.step(&mut rhs).unwrap_err();
    assert!(matches!(err, Error::StepSizeVanished { .. }));
    assert!(err.to_string().contains("step size vanished"));

    integrator.h = 2.0 * h;
    assert!(integrator.step(&mut rhs).is_ok());
}

#[test]
fn detects_stiff_problem() {
    let delta = 0.001;
    let mut integrator = integrator(1, Control::default().with_stiff_check(1));
    let mut rhs = ode(flame);
    integrator.initialise(&mut rhs, 0.0, &[delta]).expect("valid state");

    let err = integrator.run(&mut rhs, 2.0 / delta, ()).unwrap_err();
    assert!(matches!(err, Error::Stiff { .. }));
    assert!(err.to_string().contains("problem became stiff"));
}

#[test]
fn fatal_error_requires_reinitialisation() {
    let delta = 0.001;
    let mut integrator = integrator(1, Control::default().with_stiff_check(1));
    let mut rhs = ode(flame);
    integrator.initialise(&mut rhs, 0.0, &[delta]).expect("valid state");

    let Err(Error::Stiff { t }) = integrator.run(&mut rhs, 2.0 / delta, ()) else {
        panic!("flame front should be detected as stiff");
    };

    assert_relative_eq!(integrator.t(), t);
    let last = integrator.history().last().expect("some steps were accepted");
    assert_relative_eq!(last.end(), t, max_relative = 1e-14);
    assert!(matches!(integrator.step(&mut rhs), Err(Error::NotInitialised)));
    assert!(matches!(
        integrator.run(&mut rhs, 2.0 / delta, ()),
        Err(Error::NotInitialised)
    ));

    integrator.initialise(&mut rhs, 0.0, &[delta]).expect("valid state");
    assert!(integrator.step(&mut rhs).is_ok());
}

#[test]
fn step_budget_exhaustion_requires_reinitialisation() {
    let mut integrator = integrator(1, Control::default().with_max_steps(5));
    let mut rhs = ode(flame);
    integrator.initialise(&mut rhs, 0.0, &[0.1]).expect("valid state");

    assert!(integrator.run(&mut rhs, 100.0, ()).is_err());
    assert!(matches!(integrator.step(&mut rhs), Err(Error::NotInitialised)));
}

#[test]
fn stiff_streak_resets_after_nonstiff_steps() {
    let mut integrator = integrator(1, Control::default());
    let mut rhs = ode(exponential(vec![0.5]));
    integrator.initialise(&mut rhs, 0.0, &[0.1]).expect("valid state");
    integrator.run(&mut rhs, 10.0, ()).expect("should integrate");

    integrator.control.stiff_check = 1;
    integrator.stiffness.n_stiff = 3;

    for i in 0..6 {
        integrator.step(&mut rhs).expect("should step");
        assert_eq!(integrator.statistics().stiff_n_nonstiff, i + 1);
    }

    integrator.step(&mut rhs).expect("should step");
    let stats = integrator.statistics();
    assert_eq!(stats.stiff_n_stiff, 0);
    assert_eq!(stats.stiff_n_nonstiff, 0);
}

#[test]
fn only_rejections_after_first_success_are_counted() {
    let mut integrator = integrator(3, Control::default());
    let mut rhs = ode(lorenz());
    integrator
        .initialise(&mut rhs, 0.0, &[1.0, 2.0, 3.0])
        .expect("valid state");

    integrator.h = 10.0;
    integrator.step(&mut rhs).expect("should step");

    let stats = integrator.statistics();
    assert_eq!(stats.n_steps_accepted, 1);
    assert_eq!(stats.n_steps_rejected, 0);
    assert!(stats.n_steps > 1);
}

#[test]
fn lands_on_critical_time() {
    let mut integrator = integrator(1, Control::default().with_tcrit([1.0]));
    let mut rhs = ode(constant);
    integrator.initialise(&mut rhs, 0.0, &[1.0]).expect("valid state");
    integrator.run(&mut rhs, 1.0, ()).expect("should integrate");
    assert_eq!(integrator.t(), 1.0);

    let mut integrator = self::integrator(1, Control::default());
    integrator.initialise(&mut rhs, 0.0, &[1.0]).expect("valid state");
    integrator.run(&mut rhs, 1.0, ()).expect("should integrate");
    assert!(integrator.t() > 1.0);
}

#[test]
fn lands_on_every_critical_time_in_order() {
    let control = Control::default().with_tcrit([0.5, 0.25]);
    let mut integrator = integrator(1, control);
    let mut rhs = ode(constant);
    integrator.initialise(&mut rhs, 0.0, &[0.0]).expect("valid state");
    integrator.run(&mut rhs, 1.0, ()).expect("should integrate");

    let starts: Vec<f64> = integrator.history().iter().map(HistoryElement::t).collect();
    assert!(starts.contains(&0.25));
    assert!(starts.contains(&0.5));
}

#[test]
fn observer_sees_each_accepted_step() {
    let mut integrator = integrator(3, Control::default());
    let mut rhs = ode(lorenz());
    integrator
        .initialise(&mut rhs, 0.0, &[10.0, 1.0, 1.0])
        .expect("valid state");

    let mut events = Vec::new();
    let status = integrator
        .run(&mut rhs, 1.0, |event: &Event| {
            events.push(*event);
            None
        })
        .expect("should integrate");

    assert_eq!(status, Status::Complete);
    assert_eq!(events.len(), integrator.history().len());
    for (i, (event, el)) in events.iter().zip(integrator.history()).enumerate() {
        assert_eq!(event.step, i + 1);
        assert_relative_eq!(event.h, el.h());
        assert_relative_eq!(event.t, el.end(), max_relative = 1e-14);
        assert!(event.error <= 1.0);
        assert!(event.h_next > 0.0);
    }
}

#[test]
fn combined_observers_share_events() {
    let mut integrator = integrator(3, Control::default());
    let mut rhs = ode(lorenz());
    integrator
        .initialise(&mut rhs, 0.0, &[10.0, 1.0, 1.0])
        .expect("valid state");

    let mut steps = Vec::new();
    let recorder = |event: &Event| -> Option<Action> {
        steps.push(event.step);
        None
    };
    let stopper = |event: &Event| (event.t > 0.1).then_some(Action::StopEarly);

    let status = integrator
        .run(&mut rhs, 10.0, (Some(recorder), stopper))
        .expect("should stop early");

    assert_eq!(status, Status::StoppedByObserver);
    assert_eq!(steps.len(), integrator.history().len());
    assert_eq!(steps.last(), Some(&integrator.history().len()));
}

#[test]
fn observer_can_stop_early() {
    let mut integrator = integrator(3, Control::default());
    let mut rhs = ode(lorenz());
    integrator
        .initialise(&mut rhs, 0.0, &[10.0, 1.0, 1.0])
        .expect("valid state");

    let status = integrator
        .run(&mut rhs, 10.0, |event: &Event| {
            (event.step >= 3).then_some(Action::StopEarly)
        })
        .expect("should stop early");

    assert_eq!(status, Status::StoppedByObserver);
    assert_eq!(integrator.history().len(), 3);
    assert!(integrator.t() < 10.0);
}

#[test]
fn initialise_starts_afresh() {
    let mut integrator = integrator(3, Control::default());
    let mut rhs = ode(lorenz());
    integrator
        .initialise(&mut rhs, 0.0, &[10.0, 1.0, 1.0])
        .expect("valid state");
    integrator.run(&mut rhs, 1.0, ()).expect("should integrate");

    integrator
        .initialise(&mut rhs, 5.0, &[1.0, 1.0, 1.0])
        .expect("valid state");

    let stats = integrator.statistics();
    assert_eq!(stats.n_eval, 3);
    assert_eq!(stats.n_steps, 0);
    assert!(integrator.history().is_empty());
    assert_relative_eq!(integrator.t(), 5.0);
    assert_eq!(integrator.state(), &[1.0, 1.0, 1.0]);
}
