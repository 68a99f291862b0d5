/// Number of consecutive stiff detections tolerated before the run aborts.
const MAX_STIFF: usize = 15;

/// Number of non-stiff checks after which an open stiff streak is forgotten.
const MAX_NONSTIFF: usize = 6;

/// Tracks streaks of stiffness detections across accepted steps.
///
/// A single detection is not fatal. The run aborts only once detections keep
/// coming without enough non-stiff checks in between to reset the streak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct Stiffness {
    pub(super) n_stiff: usize,
    pub(super) n_nonstiff: usize,
}

impl Stiffness {
    /// Whether the step just accepted should be checked.
    ///
    /// An open streak is checked on every step regardless of `interval`.
    pub(super) fn due(&self, n_accepted: usize, interval: usize) -> bool {
        self.n_stiff > 0 || (interval > 0 && n_accepted % interval == 0)
    }

    /// Records one check and returns `true` if the problem is now deemed stiff.
    pub(super) fn record(&mut self, stiff: bool) -> bool {
        if stiff {
            self.n_nonstiff = 0;
            let previous = self.n_stiff;
            self.n_stiff += 1;
            return previous >= MAX_STIFF;
        }

        if self.n_stiff > 0 {
            let previous = self.n_nonstiff;
            self.n_nonstiff += 1;
            if previous >= MAX_NONSTIFF {
                *self = Self::default();
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checks_on_interval_or_open_streak() {
        let mut monitor = Stiffness::default();

        assert!(!monitor.due(3, 0));
        assert!(!monitor.due(3, 2));
        assert!(monitor.due(4, 2));

        monitor.record(true);
        assert!(monitor.due(3, 0));
    }

    #[test]
    fn sixteenth_consecutive_detection_is_fatal() {
        let mut monitor = Stiffness::default();

        for _ in 0..MAX_STIFF {
            assert!(!monitor.record(true));
        }
        assert_eq!(monitor.n_stiff, MAX_STIFF);
        assert!(monitor.record(true));
    }

    #[test]
    fn nonstiff_checks_without_streak_are_ignored() {
        let mut monitor = Stiffness::default();
        monitor.record(false);
        assert_eq!(monitor, Stiffness::default());
    }

    #[test]
    fn streak_resets_after_enough_nonstiff_checks() {
        let mut monitor = Stiffness {
            n_stiff: 3,
            n_nonstiff: 0,
        };

        for i in 0..MAX_NONSTIFF {
            assert!(!monitor.record(false));
            assert_eq!(monitor.n_stiff, 3);
            assert_eq!(monitor.n_nonstiff, i + 1);
        }

        monitor.record(false);
        assert_eq!(monitor, Stiffness::default());
    }

    #[test]
    fn detection_clears_nonstiff_count() {
        let mut monitor = Stiffness {
            n_stiff: 2,
            n_nonstiff: 4,
        };
        monitor.record(true);

        assert_eq!(monitor.n_stiff, 3);
        assert_eq!(monitor.n_nonstiff, 0);
    }
}
