/// Finds the last element that does not satisfy a monotone predicate.
///
/// `compare` must be monotone over `items`: once it returns `true` for some
/// element it returns `true` for every later one. A typical predicate for a
/// time-ordered sequence is `|el| el.t() > target`, which makes this return
/// the last element starting at or before `target`.
///
/// Returns:
///
/// - `None` if `items` is empty or `compare` holds for the first element
///   (the target precedes everything),
/// - the last index if `compare` holds for no element (the target is at or
///   past the final element),
/// - otherwise the index `i` with `compare(items[i]) == false` and
///   `compare(items[i + 1]) == true`.
///
/// Runs in `O(log n)` predicate calls.
pub fn search<T>(items: &[T], compare: impl Fn(&T) -> bool) -> Option<usize> {
    let (Some(first), Some(last)) = (items.first(), items.last()) else {
        return None;
    };
    if compare(first) {
        return None;
    }

    let mut hi = items.len() - 1;
    if !compare(last) {
        return Some(hi);
    }

    // Invariant: compare(items[lo]) is false, compare(items[hi]) is true.
    let mut lo = 0;
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if compare(&items[mid]) {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    Some(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    const XS: [f64; 6] = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];

    fn find(target: f64) -> Option<usize> {
        search(&XS, |&x| x > target)
    }

    #[test]
    fn between_elements() {
        assert_eq!(find(1.5), Some(1));
        assert_eq!(find(4.999), Some(4));
    }

    #[test]
    fn exact_match_returns_that_element() {
        assert_eq!(find(1.0), Some(1));
        assert_eq!(find(0.0), Some(0));
    }

    #[test]
    fn before_all_elements() {
        assert_eq!(find(-0.5), None);
    }

    #[test]
    fn at_or_past_the_end() {
        assert_eq!(find(5.0), Some(5));
        assert_eq!(find(6.0), Some(5));
    }

    #[test]
    fn empty_and_single() {
        let empty: [f64; 0] = [];
        assert_eq!(search(&empty, |&x| x > 1.0), None);
        assert_eq!(search(&[2.0], |&x| x > 1.0), None);
        assert_eq!(search(&[2.0], |&x| x > 3.0), Some(0));
    }

    #[test]
    fn agrees_with_linear_scan() {
        let xs: Vec<f64> = (0_i32..37).map(|i| f64::from(i) * 0.25).collect();
        for k in -4_i32..44 {
            let target = f64::from(k) * 0.23;
            let expected = xs.iter().rposition(|&x| x <= target);
            assert_eq!(search(&xs, |&x| x > target), expected, "target {target}");
        }
    }
}
