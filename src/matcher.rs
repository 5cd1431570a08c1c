use geo::{CoordFloat, Coordinate, Line};

/// Class tag for two-class (red/blue) matching.
///
/// Two-class matchers only ever test pairs of differing color; a pair
/// sharing a color is skipped before any geometric test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Blue,
}

/// A strategy for computing all intersection points among one set of
/// segments.
///
/// Every strategy reports each intersection point of each unordered pair
/// exactly once, so the point sets of all strategies are identical (the
/// order in which points are found is strategy specific).
pub trait Matcher<T: CoordFloat> {
    /// Compute the intersection points among `segments`.
    ///
    /// Zero or one segments yield an empty result.
    fn find_intersections(&self, segments: &[Line<T>]) -> Vec<Coordinate<T>>;
}

/// A strategy for computing all intersection points between a red and a
/// blue segment set, never within a set.
pub trait TwoClassMatcher<T: CoordFloat> {
    /// Compute the intersection points between `red` and `blue`.
    ///
    /// An empty class yields an empty result.
    fn find_intersections_rb(&self, red: &[Line<T>], blue: &[Line<T>]) -> Vec<Coordinate<T>>;
}

/// Thread-parallel form of [`Matcher`].
///
/// The strategy's outer iteration space is partitioned by striding over
/// `nthreads` workers; each worker writes to a private buffer while sharing
/// the inputs (and any prebuilt index) read-only. The buffers come back
/// unmerged, in worker order — merging, sorting and deduplication are the
/// caller's concern. The union of the buffers equals the sequential result
/// as a set; no ordering across workers is guaranteed.
pub trait ParallelMatcher<T: CoordFloat>: Matcher<T> {
    fn find_intersections_par(
        &self,
        segments: &[Line<T>],
        nthreads: usize,
    ) -> Vec<Vec<Coordinate<T>>>;
}

/// Thread-parallel form of [`TwoClassMatcher`].
///
/// Same partitioning and output contract as [`ParallelMatcher`].
pub trait ParallelTwoClassMatcher<T: CoordFloat>: TwoClassMatcher<T> {
    fn find_intersections_rb_par(
        &self,
        red: &[Line<T>],
        blue: &[Line<T>],
        nthreads: usize,
    ) -> Vec<Vec<Coordinate<T>>>;
}
