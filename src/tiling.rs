//! Horizontal-band (row tiling) matching.

use geo::{CoordFloat, Coordinate, Line};
use log::debug;

use crate::{
    parallel::fork_join, Matcher, ParallelMatcher, ParallelTwoClassMatcher, TwoClassMatcher,
    XOrder,
};

/// Partitions the y-range into horizontal bands and runs the x-order scan
/// independently inside each band.
///
/// A segment is assigned to every band its y-extent touches, so a pair can
/// be scanned in more than one band; each band only keeps the points its
/// half-open window `[start, start + dy)` owns, which reports every point
/// exactly once. One extra band past the top of the range owns points
/// exactly at `y_max`.
#[derive(Debug, Clone, Copy)]
pub struct Tiling<T: CoordFloat> {
    dy: T,
    y_min: T,
    y_max: T,
}

impl<T: CoordFloat> Tiling<T> {
    /// A tiling of `[y_min, y_max]` into bands of height `dy`.
    ///
    /// Panics if `dy` is not strictly positive, the range is empty, or any
    /// parameter is not finite. Segments handed to the matcher must lie
    /// within the y-range.
    pub fn new(dy: T, y_min: T, y_max: T) -> Self {
        assert!(
            dy.is_finite() && y_min.is_finite() && y_max.is_finite(),
            "tiling parameters must be finite"
        );
        assert!(dy > T::zero(), "tiling band height must be strictly positive");
        assert!(y_min < y_max, "tiling y-range must not be empty");

        Tiling { dy, y_min, y_max }
    }

    fn num_rows(&self) -> usize {
        ((self.y_max - self.y_min) / self.dy)
            .ceil()
            .to_usize()
            .expect("tiling band count not representable")
    }

    fn band_start(&self, row: usize) -> T {
        self.y_min + self.dy * T::from(row).expect("band row not representable")
    }

    /// Half-open ownership window of a band.
    fn window(&self, row: usize) -> (T, T) {
        (self.band_start(row), self.band_start(row + 1))
    }

    /// Row of the band whose window contains `y`.
    ///
    /// Starts from the floor of `(y - y_min) / dy` and nudges the result
    /// against the actual window bounds: the division can land one band off
    /// when `y` sits within an ulp of a boundary, and band assignment must
    /// agree exactly with the window filter.
    fn row_of(&self, y: T) -> usize {
        let mut row = ((y - self.y_min) / self.dy)
            .floor()
            .to_usize()
            .unwrap_or_else(|| panic!("segment y-coordinate below the tiling range"));

        while row > 0 && y < self.band_start(row) {
            row -= 1;
        }
        while y >= self.band_start(row + 1) {
            row += 1;
        }
        row
    }

    /// Distribute segments over the bands their y-extents touch.
    fn build_bands(&self, segments: &[Line<T>]) -> Vec<Vec<Line<T>>> {
        let mut bands = vec![Vec::new(); self.num_rows() + 1];

        for seg in segments {
            let r1 = self.row_of(seg.start.y);
            let r2 = self.row_of(seg.end.y);
            let (lo, hi) = if r1 < r2 { (r1, r2) } else { (r2, r1) };
            assert!(
                hi < bands.len(),
                "segment y-coordinate above the tiling range"
            );

            for row in lo..=hi {
                bands[row].push(*seg);
            }
        }

        debug!(
            "tiling: {} segments over {} bands",
            segments.len(),
            bands.len()
        );
        bands
    }
}

impl<T: CoordFloat> Matcher<T> for Tiling<T> {
    fn find_intersections(&self, segments: &[Line<T>]) -> Vec<Coordinate<T>> {
        let bands = self.build_bands(segments);

        let mut ipts = Vec::new();
        for (row, band) in bands.iter().enumerate() {
            let (lo, hi) = self.window(row);
            ipts.extend(XOrder.find_intersections_within(band, lo, hi));
        }
        ipts
    }
}

impl<T: CoordFloat> TwoClassMatcher<T> for Tiling<T> {
    fn find_intersections_rb(&self, red: &[Line<T>], blue: &[Line<T>]) -> Vec<Coordinate<T>> {
        let red_bands = self.build_bands(red);
        let blue_bands = self.build_bands(blue);

        let mut ipts = Vec::new();
        for (row, (r_band, b_band)) in red_bands.iter().zip(blue_bands.iter()).enumerate() {
            let (lo, hi) = self.window(row);
            ipts.extend(XOrder.find_intersections_rb_within(r_band, b_band, lo, hi));
        }
        ipts
    }
}

impl<T: CoordFloat + Send + Sync> ParallelMatcher<T> for Tiling<T> {
    fn find_intersections_par(
        &self,
        segments: &[Line<T>],
        nthreads: usize,
    ) -> Vec<Vec<Coordinate<T>>> {
        // band lists are built once, before any worker is spawned
        let bands = self.build_bands(segments);
        let bands = &bands;

        fork_join(nthreads, move |t| {
            let mut ipts = Vec::new();
            for row in (t..bands.len()).step_by(nthreads) {
                let (lo, hi) = self.window(row);
                ipts.extend(XOrder.find_intersections_within(&bands[row], lo, hi));
            }
            ipts
        })
    }
}

impl<T: CoordFloat + Send + Sync> ParallelTwoClassMatcher<T> for Tiling<T> {
    fn find_intersections_rb_par(
        &self,
        red: &[Line<T>],
        blue: &[Line<T>],
        nthreads: usize,
    ) -> Vec<Vec<Coordinate<T>>> {
        let red_bands = self.build_bands(red);
        let blue_bands = self.build_bands(blue);
        let red_bands = &red_bands;
        let blue_bands = &blue_bands;

        fork_join(nthreads, move |t| {
            let mut ipts = Vec::new();
            for row in (t..red_bands.len()).step_by(nthreads) {
                let (lo, hi) = self.window(row);
                ipts.extend(XOrder.find_intersections_rb_within(
                    &red_bands[row],
                    &blue_bands[row],
                    lo,
                    hi,
                ));
            }
            ipts
        })
    }
}
