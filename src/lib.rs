//! Competing strategies for computing all intersection points among a set
//! of 2-D line segments, and between two labeled ("red"/"blue") sets.
//!
//! 1. [Strategies](#strategies)
//! 1. [Two-class matching](#two-class-matching)
//! 1. [Parallel execution](#parallel-execution)
//!
//! # Strategies
//!
//! Four implementations of the same [`Matcher`] capability, all built on a
//! single pairwise predicate ([`intersect`]) and therefore producing
//! identical point sets:
//!
//! - [`BruteForce`] — the O(n²) all-pairs baseline and correctness oracle;
//! - [`XOrder`] — x-sorted scan that stops early once no further candidate
//!   can overlap the current segment;
//! - [`FixedGrid`] — uniform 2-D cell index over the blue set, probed per
//!   red segment (two-class only);
//! - [`Tiling`] — horizontal bands, each scanned with [`XOrder`].
//!
//! The spatial strategies test some pairs in more than one bucket; each
//! assigns every computed point to exactly one owning bucket, so no point
//! is reported twice for a pair.
//!
//! ## Usage
//!
//! ```rust
//! use geo::Line;
//! use geo_intersections::{BruteForce, Matcher, XOrder};
//!
//! let input = vec![
//!     Line::from([(1., 0.), (0., 1.)]),
//!     Line::from([(0., 0.5), (1., 0.5)]),
//!     Line::from([(0., 0.), (1., 1.)]),
//! ];
//! // All pairs intersect.
//! assert_eq!(BruteForce.find_intersections(&input).len(), 3);
//! assert_eq!(XOrder.find_intersections(&input).len(), 3);
//! ```
//!
//! # Two-class matching
//!
//! [`TwoClassMatcher`] finds intersections only between members of two
//! disjoint sets, never within a set:
//!
//! ```rust
//! use geo::Line;
//! use geo_intersections::{BruteForce, TwoClassMatcher};
//!
//! let red = vec![Line::from([(0., 0.), (2., 2.)])];
//! let blue = vec![Line::from([(0., 2.), (2., 0.)])];
//! let pts = BruteForce.find_intersections_rb(&red, &blue);
//! assert_eq!(pts, vec![(1., 1.).into()]);
//! ```
//!
//! # Parallel execution
//!
//! The `*_par` forms fork a fixed number of scoped worker threads that
//! stride the strategy's outer loop against shared, read-only inputs and
//! return one buffer per worker, unmerged:
//!
//! ```rust
//! use geo::Line;
//! use geo_intersections::{Matcher, ParallelMatcher, XOrder};
//!
//! let input = vec![
//!     Line::from([(0., 0.), (1., 1.)]),
//!     Line::from([(1., 0.), (0., 1.)]),
//! ];
//! let buffers = XOrder.find_intersections_par(&input, 2);
//! let merged: usize = buffers.iter().map(|b| b.len()).sum();
//! assert_eq!(merged, XOrder.find_intersections(&input).len());
//! ```
//!
//! [`intersect`]: intersection::intersect

mod sweep_point;
pub use sweep_point::SweepPoint;

pub mod intersection;
pub use intersection::{intersect, SegmentRelation};

mod matcher;
pub use matcher::{Color, Matcher, ParallelMatcher, ParallelTwoClassMatcher, TwoClassMatcher};

mod brute_force;
pub use brute_force::BruteForce;

mod x_order;
pub use x_order::XOrder;

mod grid;
pub use grid::FixedGrid;

mod tiling;
pub use tiling::Tiling;

mod parallel;

pub mod utils;

#[cfg(test)]
#[path = "../benches/utils/random.rs"]
pub mod random;
