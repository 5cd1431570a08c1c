use std::f64::consts::PI;

use geo::{Coordinate, Line, Rect};

use rand::Rng;
use rand_distr::Uniform;

/// A point uniformly sampled from `bounds`.
#[inline]
pub fn uniform_point<R: Rng>(rng: &mut R, bounds: Rect<f64>) -> Coordinate<f64> {
    Coordinate {
        x: rng.gen_range(bounds.min().x..bounds.max().x),
        y: rng.gen_range(bounds.min().y..bounds.max().y),
    }
}

/// A segment with both end-points uniformly sampled from `bounds`.
#[inline]
#[allow(dead_code)]
pub fn uniform_segment<R: Rng>(rng: &mut R, bounds: Rect<f64>) -> Line<f64> {
    Line::new(uniform_point(rng, bounds), uniform_point(rng, bounds))
}

/// A segment of the given length, anchored uniformly in `bounds` with a
/// uniform direction.
#[inline]
pub fn uniform_segment_with_length<R: Rng>(
    rng: &mut R,
    bounds: Rect<f64>,
    length: f64,
) -> Line<f64> {
    let start = uniform_point(rng, bounds);
    let angle = rng.gen_range(0.0..(2. * PI));
    let end = Coordinate {
        x: start.x + length * angle.cos(),
        y: start.y + length * angle.sin(),
    };
    Line::new(start, end)
}

/// `n` segments anchored in `bounds` with lengths uniform in
/// `[min_length, max_length)` — the shape of the benchmark workload.
pub fn uniform_segments<R: Rng>(
    rng: &mut R,
    bounds: Rect<f64>,
    min_length: f64,
    max_length: f64,
    n: usize,
) -> Vec<Line<f64>> {
    let length = Uniform::new(min_length, max_length);
    (0..n)
        .map(|_| {
            let len = rng.sample(length);
            uniform_segment_with_length(rng, bounds, len)
        })
        .collect()
}
