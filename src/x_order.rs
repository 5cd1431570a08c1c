//! X-ordered scan with early-termination pruning.

use geo::{CoordFloat, Coordinate, Line};
use log::trace;

use crate::{
    intersection::{intersect_pairwise, SegmentRelation},
    parallel::fork_join,
    utils::{canonical, y_interval_overlap},
    Color, Matcher, ParallelMatcher, ParallelTwoClassMatcher, SweepPoint, TwoClassMatcher,
};

/// Sorts canonicalized copies of the segments by their left end-point and
/// scans left to right with an early-stop rule: once a candidate starts to
/// the right of the current segment's right end, no later candidate can
/// overlap it in x.
///
/// Worst-case O(n²), but very competitive on data whose segments are short
/// relative to the x-range.
#[derive(Debug, Clone, Copy, Default)]
pub struct XOrder;

impl XOrder {
    /// One-set scan that keeps only points whose y falls in the half-open
    /// window `[y_min, y_max)`.
    ///
    /// The tiling matcher runs this per band; consecutive windows share
    /// their bounds, so a band-boundary point is owned by exactly one band.
    pub fn find_intersections_within<T: CoordFloat>(
        &self,
        segments: &[Line<T>],
        y_min: T,
        y_max: T,
    ) -> Vec<Coordinate<T>> {
        let ordered = sort_left_right(segments);
        let mut ipts = Vec::new();
        scan(&ordered, 0, 1, Some((y_min, y_max)), &mut ipts);
        ipts
    }

    /// Two-class form of [`XOrder::find_intersections_within`].
    pub fn find_intersections_rb_within<T: CoordFloat>(
        &self,
        red: &[Line<T>],
        blue: &[Line<T>],
        y_min: T,
        y_max: T,
    ) -> Vec<Coordinate<T>> {
        let ordered = sort_left_right_rb(red, blue);
        let mut ipts = Vec::new();
        scan_rb(&ordered, 0, 1, Some((y_min, y_max)), &mut ipts);
        ipts
    }
}

impl<T: CoordFloat> Matcher<T> for XOrder {
    fn find_intersections(&self, segments: &[Line<T>]) -> Vec<Coordinate<T>> {
        let ordered = sort_left_right(segments);
        trace!("x-order: scanning {} segments", ordered.len());

        let mut ipts = Vec::new();
        scan(&ordered, 0, 1, None, &mut ipts);
        ipts
    }
}

impl<T: CoordFloat> TwoClassMatcher<T> for XOrder {
    fn find_intersections_rb(&self, red: &[Line<T>], blue: &[Line<T>]) -> Vec<Coordinate<T>> {
        let ordered = sort_left_right_rb(red, blue);
        trace!(
            "x-order: scanning {} red + {} blue segments",
            red.len(),
            blue.len()
        );

        let mut ipts = Vec::new();
        scan_rb(&ordered, 0, 1, None, &mut ipts);
        ipts
    }
}

impl<T: CoordFloat + Send + Sync> ParallelMatcher<T> for XOrder {
    fn find_intersections_par(
        &self,
        segments: &[Line<T>],
        nthreads: usize,
    ) -> Vec<Vec<Coordinate<T>>> {
        // sort once; workers stride the outer index over the shared vector
        let ordered = sort_left_right(segments);
        let ordered = &ordered;

        fork_join(nthreads, move |t| {
            let mut ipts = Vec::new();
            scan(ordered, t, nthreads, None, &mut ipts);
            ipts
        })
    }
}

impl<T: CoordFloat + Send + Sync> ParallelTwoClassMatcher<T> for XOrder {
    fn find_intersections_rb_par(
        &self,
        red: &[Line<T>],
        blue: &[Line<T>],
        nthreads: usize,
    ) -> Vec<Vec<Coordinate<T>>> {
        let ordered = sort_left_right_rb(red, blue);
        let ordered = &ordered;

        fork_join(nthreads, move |t| {
            let mut ipts = Vec::new();
            scan_rb(ordered, t, nthreads, None, &mut ipts);
            ipts
        })
    }
}

fn segment_key<T: CoordFloat>(s: &Line<T>) -> (SweepPoint<T>, SweepPoint<T>) {
    (SweepPoint::from(s.start), SweepPoint::from(s.end))
}

/// Canonicalized copies of the input, sorted by left end-point.
fn sort_left_right<T: CoordFloat>(segments: &[Line<T>]) -> Vec<Line<T>> {
    let mut ordered: Vec<_> = segments.iter().map(canonical).collect();
    ordered.sort_by(|a, b| segment_key(a).cmp(&segment_key(b)));
    ordered
}

/// Both classes merged into one left-right ordered, color-tagged sequence.
fn sort_left_right_rb<T: CoordFloat>(
    red: &[Line<T>],
    blue: &[Line<T>],
) -> Vec<(Line<T>, Color)> {
    let mut ordered: Vec<_> = red
        .iter()
        .map(|s| (canonical(s), Color::Red))
        .chain(blue.iter().map(|s| (canonical(s), Color::Blue)))
        .collect();
    ordered.sort_by(|a, b| segment_key(&a.0).cmp(&segment_key(&b.0)));
    ordered
}

/// Scan outer indices `start`, `start + stride`, ... over the ordered
/// segments.
fn scan<T: CoordFloat>(
    ordered: &[Line<T>],
    start: usize,
    stride: usize,
    window: Option<(T, T)>,
    ipts: &mut Vec<Coordinate<T>>,
) {
    for i in (start..ordered.len()).step_by(stride) {
        let current = &ordered[i];

        for next in &ordered[i + 1..] {
            // Sorted by left end-point: once `next` starts right of
            // `current`'s right end, nothing later can overlap it in x.
            if current.end.x < next.start.x {
                break;
            }

            if !y_interval_overlap(current, next) {
                continue;
            }

            push_relation(intersect_pairwise(current, next), window, ipts);
        }
    }
}

/// Same scan over a color-tagged sequence, skipping same-color pairs.
fn scan_rb<T: CoordFloat>(
    ordered: &[(Line<T>, Color)],
    start: usize,
    stride: usize,
    window: Option<(T, T)>,
    ipts: &mut Vec<Coordinate<T>>,
) {
    for i in (start..ordered.len()).step_by(stride) {
        let (current, color) = &ordered[i];

        for (next, next_color) in &ordered[i + 1..] {
            if current.end.x < next.start.x {
                break;
            }

            // same color: not a candidate pair
            if color == next_color {
                continue;
            }

            if !y_interval_overlap(current, next) {
                continue;
            }

            push_relation(intersect_pairwise(current, next), window, ipts);
        }
    }
}

/// Collect the relation's point(s), applying the y-window filter if one is
/// given.
fn push_relation<T: CoordFloat>(
    rel: SegmentRelation<T>,
    window: Option<(T, T)>,
    ipts: &mut Vec<Coordinate<T>>,
) {
    let keep = |p: &Coordinate<T>| match window {
        Some((lo, hi)) => p.y >= lo && p.y < hi,
        None => true,
    };

    match rel {
        SegmentRelation::Disjoint => {}
        SegmentRelation::Cross(p) | SegmentRelation::Touch(p) => {
            if keep(&p) {
                ipts.push(p);
            }
        }
        SegmentRelation::Overlap(p, q) => {
            if keep(&p) {
                ipts.push(p);
            }
            if keep(&q) {
                ipts.push(q);
            }
        }
    }
}
