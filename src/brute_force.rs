//! All-pairs matching.

use geo::{CoordFloat, Coordinate, Line};
use itertools::Itertools;

use crate::{
    intersection::{intersect_pairwise, SegmentRelation},
    parallel::fork_join,
    utils::bbox_overlap,
    Matcher, ParallelMatcher, ParallelTwoClassMatcher, TwoClassMatcher,
};

/// The O(n²) baseline: test every pair, pruned only by the bounding-box
/// check.
///
/// Simple enough to be obviously correct — this is the oracle the other
/// strategies are validated against.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForce;

impl<T: CoordFloat> Matcher<T> for BruteForce {
    fn find_intersections(&self, segments: &[Line<T>]) -> Vec<Coordinate<T>> {
        let mut ipts = Vec::new();

        for (s1, s2) in segments.iter().tuple_combinations() {
            test_pair(s1, s2, &mut ipts);
        }

        ipts
    }
}

impl<T: CoordFloat> TwoClassMatcher<T> for BruteForce {
    fn find_intersections_rb(&self, red: &[Line<T>], blue: &[Line<T>]) -> Vec<Coordinate<T>> {
        let mut ipts = Vec::new();

        for r in red {
            for b in blue {
                test_pair(r, b, &mut ipts);
            }
        }

        ipts
    }
}

impl<T: CoordFloat + Send + Sync> ParallelMatcher<T> for BruteForce {
    fn find_intersections_par(
        &self,
        segments: &[Line<T>],
        nthreads: usize,
    ) -> Vec<Vec<Coordinate<T>>> {
        fork_join(nthreads, |t| {
            let mut ipts = Vec::new();
            for i in (t..segments.len()).step_by(nthreads) {
                let s1 = &segments[i];
                for s2 in &segments[i + 1..] {
                    test_pair(s1, s2, &mut ipts);
                }
            }
            ipts
        })
    }
}

impl<T: CoordFloat + Send + Sync> ParallelTwoClassMatcher<T> for BruteForce {
    fn find_intersections_rb_par(
        &self,
        red: &[Line<T>],
        blue: &[Line<T>],
        nthreads: usize,
    ) -> Vec<Vec<Coordinate<T>>> {
        fork_join(nthreads, |t| {
            let mut ipts = Vec::new();
            for r in red.iter().skip(t).step_by(nthreads) {
                for b in blue {
                    test_pair(r, b, &mut ipts);
                }
            }
            ipts
        })
    }
}

/// Prune by bounding box, then collect the pair's intersection point(s).
fn test_pair<T: CoordFloat>(s1: &Line<T>, s2: &Line<T>, ipts: &mut Vec<Coordinate<T>>) {
    if !bbox_overlap(s1, s2) {
        return;
    }

    match intersect_pairwise(s1, s2) {
        SegmentRelation::Disjoint => {}
        SegmentRelation::Cross(p) | SegmentRelation::Touch(p) => ipts.push(p),
        SegmentRelation::Overlap(p, q) => {
            ipts.push(p);
            ipts.push(q);
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::SweepPoint;

    fn line(a: (f64, f64), b: (f64, f64)) -> Line<f64> {
        Line::from([a, b])
    }

    fn point_set(pts: Vec<Coordinate<f64>>) -> Vec<SweepPoint<f64>> {
        pts.into_iter().map(SweepPoint::from).sorted().dedup().collect()
    }

    #[test]
    fn empty_and_singleton_input() {
        assert!(Matcher::<f64>::find_intersections(&BruteForce, &[]).is_empty());
        assert!(BruteForce
            .find_intersections(&[line((0., 0.), (1., 1.))])
            .is_empty());
    }

    #[test]
    fn all_pairs_crossing_in_one_point() {
        let input = vec![
            line((1., 0.), (0., 1.)),
            line((0., 0.5), (1., 0.5)),
            line((0., 0.), (1., 1.)),
        ];

        let ipts = BruteForce.find_intersections(&input);
        // three pairs, one crossing each
        assert_eq!(ipts.len(), 3);
        assert_eq!(point_set(ipts).len(), 1);
    }

    #[test]
    fn overlap_contributes_both_bounds() {
        let input = vec![line((0., 0.), (10., 0.)), line((3., 0.), (7., 0.))];
        let ipts = BruteForce.find_intersections(&input);
        assert_eq!(ipts, vec![(3., 0.).into(), (7., 0.).into()]);
    }

    #[test]
    fn two_class_ignores_same_class_pairs() {
        // the two red segments cross each other, but only the red/blue
        // crossings count
        let red = vec![line((0., 0.), (2., 2.)), line((0., 2.), (2., 0.))];
        let blue = vec![line((0.5, -1.), (0.5, 3.))];

        let ipts = BruteForce.find_intersections_rb(&red, &blue);
        assert_eq!(
            point_set(ipts),
            vec![
                SweepPoint::from(Coordinate::from((0.5, 0.5))),
                SweepPoint::from(Coordinate::from((0.5, 1.5))),
            ]
        );
    }

    #[test]
    fn two_class_with_an_empty_class() {
        let red = vec![line((0., 0.), (2., 2.)), line((0., 2.), (2., 0.))];
        assert!(BruteForce.find_intersections_rb(&red, &[]).is_empty());
        assert!(BruteForce.find_intersections_rb(&[], &red).is_empty());
    }

    #[test]
    fn parallel_buffers_union_to_the_sequential_result() {
        let input = vec![
            line((1., 0.), (0., 1.)),
            line((0., 0.5), (1., 0.5)),
            line((0., 0.), (1., 1.)),
            line((0.2, 0.), (0.2, 1.)),
        ];
        let expected = point_set(BruteForce.find_intersections(&input));

        for nthreads in [1, 2, 3, 8, 64].iter() {
            let buffers = BruteForce.find_intersections_par(&input, *nthreads);
            assert_eq!(buffers.len(), *nthreads);
            let merged = point_set(buffers.into_iter().flatten().collect());
            assert_eq!(merged, expected);
        }
    }

    #[test]
    fn parallel_two_class_matches_sequential() {
        let red = vec![line((0., 0.), (4., 4.)), line((0., 4.), (4., 0.))];
        let blue = vec![line((1., -1.), (1., 5.)), line((3., -1.), (3., 5.))];
        let expected = point_set(BruteForce.find_intersections_rb(&red, &blue));

        for nthreads in [1, 2, 7].iter() {
            let buffers = BruteForce.find_intersections_rb_par(&red, &blue, *nthreads);
            let merged = point_set(buffers.into_iter().flatten().collect());
            assert_eq!(merged, expected);
        }
    }
}
