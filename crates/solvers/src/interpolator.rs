use dopri_core::{DenseOutput, HistoryElement};

/// Evaluates a run's dense output at batches of query times.
///
/// Queries are answered with a forward-only cursor over the history, so the
/// times in each batch must be non-decreasing. Times before the first step
/// or after the last one evaluate the nearest element's polynomial, which
/// extrapolates and carries no accuracy guarantee.
#[derive(Debug, Clone, Copy)]
pub struct Interpolator<'a, D> {
    history: &'a [HistoryElement],
    dense: D,
}

impl<'a, D: DenseOutput> Interpolator<'a, D> {
    /// Creates an interpolator over `history`, evaluated by `dense`.
    #[must_use]
    pub fn new(history: &'a [HistoryElement], dense: D) -> Self {
        Self { history, dense }
    }

    /// Returns the state at each of `times`.
    ///
    /// An empty history yields no rows.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `times` is not non-decreasing.
    #[must_use]
    pub fn interpolate(&self, times: &[f64]) -> Vec<Vec<f64>> {
        self.rows(times, |_, _| {})
    }

    /// Returns the state at each of `times` followed by `output(t, y)`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `times` is not non-decreasing.
    #[must_use]
    pub fn interpolate_with<G>(&self, times: &[f64], output: G) -> Vec<Vec<f64>>
    where
        G: Fn(f64, &[f64]) -> Vec<f64>,
    {
        self.rows(times, |t, row| {
            let extra = output(t, row.as_slice());
            row.extend(extra);
        })
    }

    /// Returns the history the interpolator reads from.
    #[must_use]
    pub fn history(&self) -> &'a [HistoryElement] {
        self.history
    }

    fn rows(&self, times: &[f64], mut extend: impl FnMut(f64, &mut Vec<f64>)) -> Vec<Vec<f64>> {
        let Some(last) = self.history.len().checked_sub(1) else {
            return Vec::new();
        };
        debug_assert!(
            times.windows(2).all(|pair| pair[0] <= pair[1]),
            "query times must be non-decreasing"
        );

        let mut i = 0;
        times
            .iter()
            .map(|&t| {
                while i < last && self.history[i].end() < t {
                    i += 1;
                }
                let mut row = self.dense.interpolate(t, &self.history[i]);
                extend(t, &mut row);
                row
            })
            .collect()
    }
}
