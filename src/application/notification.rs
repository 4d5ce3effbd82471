//! Growth detection for "new listings" notifications.

/// Number of listings that appeared between two fetches of the same filter.
///
/// Growth is only reported against a non-empty baseline: the first fetch of a
/// filter (`previous == 0`) never counts as new listings, and shrinking or
/// unchanged results are ignored.
#[must_use]
pub fn detect_growth(previous: usize, current: usize) -> Option<usize> {
    (previous > 0 && current > previous).then(|| current - previous)
}
