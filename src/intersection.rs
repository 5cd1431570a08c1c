//! The pairwise segment-intersection predicate.
//!
//! Every matching strategy in this crate is built on the single
//! [`intersect`] function; the strategies only differ in how they choose
//! which pairs to hand to it.

use geo::{CoordFloat, Coordinate, Line};

use crate::{utils::canonical, SweepPoint};

/// The spatial relation between two line segments.
///
/// The intersection geometry travels with the variant: a crossing and an
/// end-point touch carry their single point, a collinear overlap carries
/// the two points bounding the shared sub-segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentRelation<T: CoordFloat> {
    /// The segments have no intersection point.
    Disjoint,
    /// The segments cross in a single point.
    Cross(Coordinate<T>),
    /// Two collinear segments share exactly one end-point.
    Touch(Coordinate<T>),
    /// Two collinear segments share a sub-segment, bounded by the two
    /// points.
    Overlap(Coordinate<T>, Coordinate<T>),
}

/// Classify the spatial relation of two segments and compute the
/// intersection point(s) if there are any.
///
/// Uses the parametric form of Franklin Antonio (Graphics Gems III):
/// writing `s1` as `p1 + alpha (p2 - p1)` and `s2` as `p3 + beta (p4 - p3)`,
/// the denominator of `alpha` and `beta` vanishes exactly when the segments
/// are parallel, which routes to the collinear handling; otherwise the
/// numerators are range-checked against the (sign-adjusted) denominator
/// before any division takes place.
///
/// Total over finite, non-NaN inputs. A degenerate segment (equal
/// end-points) does not fail but yields a meaningless relation; callers
/// should filter such input before matching.
///
/// ```rust
/// use geo::Line;
/// use geo_intersections::{intersect, SegmentRelation};
///
/// let s1 = Line::from([(0., 0.), (10., 10.)]);
/// let s2 = Line::from([(0., 10.), (10., 0.)]);
/// assert_eq!(intersect(&s1, &s2), SegmentRelation::Cross((5., 5.).into()));
/// ```
pub fn intersect<T: CoordFloat>(s1: &Line<T>, s2: &Line<T>) -> SegmentRelation<T> {
    let zero = T::zero();

    let ax = s1.end.x - s1.start.x;
    let ay = s1.end.y - s1.start.y;

    let bx = s2.start.x - s2.end.x;
    let by = s2.start.y - s2.end.y;

    let den = ay * bx - ax * by;

    // are they collinear?
    if den == zero {
        return collinear_relation(s1, s2);
    }

    let cx = s1.start.x - s2.start.x;
    let cy = s1.start.y - s2.start.y;

    // is alpha within [0..1]?
    let num_alpha = by * cx - bx * cy;
    if den > zero {
        if num_alpha < zero || num_alpha > den {
            return SegmentRelation::Disjoint;
        }
    } else if num_alpha > zero || num_alpha < den {
        return SegmentRelation::Disjoint;
    }

    // is beta within [0..1]?
    let num_beta = ax * cy - ay * cx;
    if den > zero {
        if num_beta < zero || num_beta > den {
            return SegmentRelation::Disjoint;
        }
    } else if num_beta > zero || num_beta < den {
        return SegmentRelation::Disjoint;
    }

    let alpha = num_alpha / den;

    SegmentRelation::Cross(Coordinate {
        x: s1.start.x + alpha * (s1.end.x - s1.start.x),
        y: s1.start.y + alpha * (s1.end.y - s1.start.y),
    })
}

/// Relation of two segments with a vanishing denominator.
///
/// If any end-point of one segment lies within the other's bounding
/// interval the segments share a sub-segment: sorting the four end-points
/// lexicographically puts its bounds in the middle. Equal middle points
/// collapse the overlap to an end-point touch.
fn collinear_relation<T: CoordFloat>(s1: &Line<T>, s2: &Line<T>) -> SegmentRelation<T> {
    if !collinear_segments_intersect(s1, s2) {
        return SegmentRelation::Disjoint;
    }

    let mut pts = [
        SweepPoint::from(s1.start),
        SweepPoint::from(s1.end),
        SweepPoint::from(s2.start),
        SweepPoint::from(s2.end),
    ];
    pts.sort();

    if pts[1] == pts[2] {
        SegmentRelation::Touch(pts[1].coord())
    } else {
        SegmentRelation::Overlap(pts[1].coord(), pts[2].coord())
    }
}

/// Test if two collinear segments share at least one point.
fn collinear_segments_intersect<T: CoordFloat>(s1: &Line<T>, s2: &Line<T>) -> bool {
    is_collinear_point_on_segment(&s1.start, s2)
        || is_collinear_point_on_segment(&s1.end, s2)
        || is_collinear_point_on_segment(&s2.start, s1)
        || is_collinear_point_on_segment(&s2.end, s1)
}

/// Test if a point collinear with `s` lies within its bounding interval
/// (end-points included).
fn is_collinear_point_on_segment<T: CoordFloat>(p: &Coordinate<T>, s: &Line<T>) -> bool {
    // to the left of s?
    if p.x < s.start.x && p.x < s.end.x {
        return false;
    }

    // to the right of s?
    if p.x > s.start.x && p.x > s.end.x {
        return false;
    }

    // below s?
    if p.y < s.start.y && p.y < s.end.y {
        return false;
    }

    // above s?
    !(p.y > s.start.y && p.y > s.end.y)
}

/// Evaluate [`intersect`] on the canonical forms of both segments, with the
/// pair itself in lexicographic order.
///
/// Matchers route every unordered pair through here so that the same pair
/// produces bit-identical coordinates in every strategy; comparing the
/// strategies against each other relies on exact point equality.
pub(crate) fn intersect_pairwise<T: CoordFloat>(s1: &Line<T>, s2: &Line<T>) -> SegmentRelation<T> {
    let a = canonical(s1);
    let b = canonical(s2);

    let key = |s: &Line<T>| (SweepPoint::from(s.start), SweepPoint::from(s.end));
    if key(&a) <= key(&b) {
        intersect(&a, &b)
    } else {
        intersect(&b, &a)
    }
}
