/// Watches the accepted steps of an integration and may steer it.
///
/// A solver calls [`Observer::observe`] once for every accepted step, passing
/// an event that describes the step. Returning `Some(action)` hands the
/// solver an action to carry out (stopping early, for instance). Returning
/// `None` leaves the run alone.
///
/// Implementations provided here:
///
/// - `FnMut(&E) -> Option<A>` closures
/// - `()` — never acts
/// - `Option<O>` — forwards to `O` when present, so an observer can be
///   chosen at runtime
/// - `(O1, O2)` — both observers see every event; the first one's action
///   takes precedence
pub trait Observer<E, A> {
    /// Called after each accepted step.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

impl<E, A, O> Observer<E, A> for Option<O>
where
    O: Observer<E, A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.as_mut().and_then(|observer| observer.observe(event))
    }
}

impl<E, A, O1, O2> Observer<E, A> for (O1, O2)
where
    O1: Observer<E, A>,
    O2: Observer<E, A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        let first = self.0.observe(event);
        let second = self.1.observe(event);
        first.or(second)
    }
}
