//! Uniform-grid two-class matching.

use std::collections::HashMap;

use geo::{CoordFloat, Coordinate, Line, Rect};
use log::debug;
use smallvec::SmallVec;

use crate::{
    intersection::{intersect_pairwise, SegmentRelation},
    parallel::fork_join,
    utils::bbox_overlap,
    ParallelTwoClassMatcher, TwoClassMatcher,
};

/// Sparse multimap from cell id to the indices of the blue segments whose
/// bounding box spans the cell.
type CellIndex = HashMap<usize, SmallVec<[usize; 4]>>;

/// Buckets the blue segments into a sparse 2-D cell multimap and probes it
/// with each red segment's cell span.
///
/// A candidate pair can share several cells, so a computed point is kept
/// only in the cell that owns it (the `is_in_cell` test); each pair's
/// intersection is thereby reported exactly once per run. The index is
/// rebuilt on every call — it is derived state, not a persisted entity.
#[derive(Debug, Clone, Copy)]
pub struct FixedGrid<T: CoordFloat> {
    dx: T,
    dy: T,
    bounds: Rect<T>,
}

impl<T: CoordFloat> FixedGrid<T> {
    /// A grid over `bounds` with cells of width `dx` and height `dy`.
    ///
    /// Panics if a cell size is not strictly positive or `bounds` is
    /// degenerate. Segments handed to the matcher must lie within
    /// `bounds`.
    pub fn new(dx: T, dy: T, bounds: Rect<T>) -> Self {
        let zero = T::zero();
        assert!(
            dx > zero && dy > zero,
            "grid cell sizes must be strictly positive"
        );
        assert!(
            bounds.width() > zero && bounds.height() > zero,
            "grid bounds must not be degenerate"
        );

        FixedGrid { dx, dy, bounds }
    }

    fn num_rows(&self) -> usize {
        (self.bounds.height() / self.dy)
            .ceil()
            .to_usize()
            .expect("grid row count not representable")
    }

    /// Column and row of a coordinate; `None` left of or below the bounds.
    fn cell_of(&self, c: &Coordinate<T>) -> Option<(usize, usize)> {
        let col = ((c.x - self.bounds.min().x) / self.dx).floor().to_usize()?;
        let row = ((c.y - self.bounds.min().y) / self.dy).floor().to_usize()?;
        Some((col, row))
    }

    /// Inclusive column and row span of a segment's bounding box.
    fn cell_span(&self, seg: &Line<T>) -> (usize, usize, usize, usize) {
        let (c1, r1) = self
            .cell_of(&seg.start)
            .unwrap_or_else(|| panic!("segment end-point outside the grid bounds"));
        let (c2, r2) = self
            .cell_of(&seg.end)
            .unwrap_or_else(|| panic!("segment end-point outside the grid bounds"));

        (c1.min(c2), c1.max(c2), r1.min(r2), r1.max(r2))
    }

    /// The dedup rule: does the querying cell own this point?
    fn is_in_cell(&self, col: usize, row: usize, p: &Coordinate<T>) -> bool {
        self.cell_of(p) == Some((col, row))
    }

    fn build_blue_index(&self, nrows: usize, blue: &[Line<T>]) -> CellIndex {
        let mut cells = CellIndex::new();

        for (i, seg) in blue.iter().enumerate() {
            let (col_lo, col_hi, row_lo, row_hi) = self.cell_span(seg);
            for col in col_lo..=col_hi {
                let offset = col * nrows;
                for row in row_lo..=row_hi {
                    cells.entry(row + offset).or_default().push(i);
                }
            }
        }

        debug!(
            "grid: indexed {} blue segments into {} occupied cells",
            blue.len(),
            cells.len()
        );
        cells
    }

    /// Probe the blue index with one red segment's cell span.
    fn probe(
        &self,
        nrows: usize,
        red: &Line<T>,
        blue_segments: &[Line<T>],
        cells: &CellIndex,
        ipts: &mut Vec<Coordinate<T>>,
    ) {
        let (col_lo, col_hi, row_lo, row_hi) = self.cell_span(red);

        for col in col_lo..=col_hi {
            let offset = col * nrows;

            for row in row_lo..=row_hi {
                let candidates = match cells.get(&(row + offset)) {
                    Some(c) => c,
                    None => continue,
                };

                for &blue_idx in candidates.iter() {
                    let blue = &blue_segments[blue_idx];

                    if !bbox_overlap(red, blue) {
                        continue;
                    }

                    match intersect_pairwise(red, blue) {
                        SegmentRelation::Disjoint => {}
                        SegmentRelation::Cross(p) | SegmentRelation::Touch(p) => {
                            if self.is_in_cell(col, row, &p) {
                                ipts.push(p);
                            }
                        }
                        SegmentRelation::Overlap(p, q) => {
                            if self.is_in_cell(col, row, &p) {
                                ipts.push(p);
                            }
                            if self.is_in_cell(col, row, &q) {
                                ipts.push(q);
                            }
                        }
                    }
                }
            }
        }
    }
}

impl<T: CoordFloat> TwoClassMatcher<T> for FixedGrid<T> {
    fn find_intersections_rb(&self, red: &[Line<T>], blue: &[Line<T>]) -> Vec<Coordinate<T>> {
        let nrows = self.num_rows();
        let cells = self.build_blue_index(nrows, blue);

        let mut ipts = Vec::new();
        for r in red {
            self.probe(nrows, r, blue, &cells, &mut ipts);
        }
        ipts
    }
}

impl<T: CoordFloat + Send + Sync> ParallelTwoClassMatcher<T> for FixedGrid<T> {
    fn find_intersections_rb_par(
        &self,
        red: &[Line<T>],
        blue: &[Line<T>],
        nthreads: usize,
    ) -> Vec<Vec<Coordinate<T>>> {
        // the index is built once, before any worker is spawned, and only
        // read afterwards
        let nrows = self.num_rows();
        let cells = self.build_blue_index(nrows, blue);
        let cells = &cells;

        fork_join(nthreads, move |t| {
            let mut ipts = Vec::new();
            for r in red.iter().skip(t).step_by(nthreads) {
                self.probe(nrows, r, blue, cells, &mut ipts);
            }
            ipts
        })
    }
}

#[cfg(test)]
mod tests {
    use geo::Rect;
    use itertools::Itertools;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{random::uniform_segments, utils::enclosing_rect, BruteForce, SweepPoint};

    fn init_log() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn line(a: (f64, f64), b: (f64, f64)) -> Line<f64> {
        Line::from([a, b])
    }

    fn point_set(pts: Vec<Coordinate<f64>>) -> Vec<SweepPoint<f64>> {
        pts.into_iter().map(SweepPoint::from).sorted().dedup().collect()
    }

    #[test]
    fn crossing_on_a_cell_corner_is_reported_once() {
        // unit cells; the crossing sits exactly on the corner shared by
        // four cells, and the pair is indexed into several of them
        let grid = FixedGrid::new(1., 1., Rect::new([0., 0.], [10., 10.]));
        let red = vec![line((2., 2.), (4., 4.))];
        let blue = vec![line((2., 4.), (4., 2.))];

        let ipts = grid.find_intersections_rb(&red, &blue);
        assert_eq!(ipts, vec![(3., 3.).into()]);
    }

    #[test]
    fn empty_classes_yield_empty_results() {
        let grid = FixedGrid::new(1., 1., Rect::new([0., 0.], [10., 10.]));
        let red = vec![line((0., 0.), (5., 5.))];

        assert!(grid.find_intersections_rb(&red, &[]).is_empty());
        assert!(grid.find_intersections_rb(&[], &red).is_empty());
    }

    #[test]
    fn matches_the_brute_force_oracle() {
        init_log();

        let mut rng = StdRng::seed_from_u64(23);
        let bounds = Rect::new([0., 0.], [360., 180.]);
        let red = uniform_segments(&mut rng, bounds, 2., 10., 300);
        let blue = uniform_segments(&mut rng, bounds, 2., 10., 300);

        let extent =
            enclosing_rect(&[red.as_slice(), blue.as_slice()].concat()).unwrap();
        let grid = FixedGrid::new(12., 12., extent);

        assert_eq!(
            point_set(grid.find_intersections_rb(&red, &blue)),
            point_set(BruteForce.find_intersections_rb(&red, &blue)),
        );
    }

    #[test]
    fn parallel_buffers_union_to_the_sequential_result() {
        let mut rng = StdRng::seed_from_u64(29);
        let bounds = Rect::new([0., 0.], [100., 100.]);
        let red = uniform_segments(&mut rng, bounds, 2., 10., 200);
        let blue = uniform_segments(&mut rng, bounds, 2., 10., 200);

        let extent =
            enclosing_rect(&[red.as_slice(), blue.as_slice()].concat()).unwrap();
        let grid = FixedGrid::new(8., 8., extent);

        let expected = point_set(grid.find_intersections_rb(&red, &blue));
        for nthreads in [1, 2, 5, 64].iter() {
            let buffers = grid.find_intersections_rb_par(&red, &blue, *nthreads);
            assert_eq!(buffers.len(), *nthreads);
            let merged = point_set(buffers.into_iter().flatten().collect());
            assert_eq!(merged, expected);
        }
    }

    #[test]
    #[should_panic(expected = "strictly positive")]
    fn zero_cell_size_is_a_contract_violation() {
        FixedGrid::new(0., 1., Rect::new([0., 0.], [10., 10.]));
    }
}
