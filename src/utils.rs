use geo::{CoordFloat, Coordinate, Line, Rect};

use crate::SweepPoint;

/// Rewrite a segment so that `start` is the lexicographically smaller
/// end-point (by `x`, then `y`).
///
/// This is a derived form: matchers canonicalize copies wherever left-right
/// ordering matters and never mutate their input.
pub fn canonical<T: CoordFloat>(seg: &Line<T>) -> Line<T> {
    let start = SweepPoint::from(seg.start);
    let end = SweepPoint::from(seg.end);
    if start <= end {
        *seg
    } else {
        Line::new(seg.end, seg.start)
    }
}

/// Test if the bounding boxes of two segments overlap.
///
/// Conservative: never rejects a pair with a true intersection. Used ahead
/// of the full predicate to keep the common case cheap.
pub fn bbox_overlap<T: CoordFloat>(s1: &Line<T>, s2: &Line<T>) -> bool {
    let (x1_min, x1_max) = min_max(s1.start.x, s1.end.x);
    let (x2_min, x2_max) = min_max(s2.start.x, s2.end.x);

    // s1 to the right or to the left of s2?
    if x1_min > x2_max || x1_max < x2_min {
        return false;
    }

    y_interval_overlap(s1, s2)
}

/// Test if the y-projections of two segments overlap.
///
/// The x-order scan guarantees x-overlap by construction and only needs
/// this half of the bounding-box test.
pub fn y_interval_overlap<T: CoordFloat>(s1: &Line<T>, s2: &Line<T>) -> bool {
    let (y1_min, y1_max) = min_max(s1.start.y, s1.end.y);
    let (y2_min, y2_max) = min_max(s2.start.y, s2.end.y);

    // s1 above or below s2?
    y1_min <= y2_max && y1_max >= y2_min
}

#[inline]
fn min_max<T: CoordFloat>(a: T, b: T) -> (T, T) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Bounding rectangle of all segment end-points, or `None` for an empty
/// slice.
///
/// Folds from an inverted-infinity rectangle so that any point unions
/// correctly. Handy for deriving the enclosing rectangle the grid matcher
/// and the y-range the tiling matcher are configured with.
pub fn enclosing_rect<T: CoordFloat>(segments: &[Line<T>]) -> Option<Rect<T>> {
    if segments.is_empty() {
        return None;
    }

    let inf = T::infinity();
    let mut ll = Coordinate { x: inf, y: inf };
    let mut ur = Coordinate { x: -inf, y: -inf };

    for seg in segments {
        for pt in [seg.start, seg.end].iter() {
            ll.x = ll.x.min(pt.x);
            ll.y = ll.y.min(pt.y);
            ur.x = ur.x.max(pt.x);
            ur.y = ur.y.max(pt.y);
        }
    }

    Some(Rect::new(ll, ur))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(a: (f64, f64), b: (f64, f64)) -> Line<f64> {
        Line::from([a, b])
    }

    #[test]
    fn canonical_orders_endpoints() {
        let seg = line((5., 1.), (0., 3.));
        let c = canonical(&seg);
        assert_eq!(c.start, (0., 3.).into());
        assert_eq!(c.end, (5., 1.).into());

        // vertical segments break the tie on y
        let vert = line((2., 7.), (2., -1.));
        let c = canonical(&vert);
        assert_eq!(c.start, (2., -1.).into());
        assert_eq!(c.end, (2., 7.).into());

        // already canonical segments come back unchanged
        let seg = line((0., 0.), (1., 1.));
        assert_eq!(canonical(&seg), seg);
    }

    #[test]
    fn bbox_overlap_rejects_separated_boxes() {
        let s = line((0., 0.), (2., 2.));
        assert!(!bbox_overlap(&s, &line((3., 0.), (5., 2.))));
        assert!(!bbox_overlap(&s, &line((0., 3.), (2., 5.))));
        assert!(!bbox_overlap(&line((3., 0.), (5., 2.)), &s));
    }

    #[test]
    fn bbox_overlap_accepts_touching_boxes() {
        let s = line((0., 0.), (2., 2.));
        assert!(bbox_overlap(&s, &line((2., 2.), (4., 4.))));
        assert!(bbox_overlap(&s, &line((1., 1.), (3., 0.))));
    }

    #[test]
    fn y_interval_overlap_ignores_x() {
        let s = line((0., 0.), (1., 2.));
        // far away in x, overlapping in y
        assert!(y_interval_overlap(&s, &line((100., 1.), (101., 3.))));
        assert!(!y_interval_overlap(&s, &line((0., 3.), (1., 5.))));
    }

    #[test]
    fn enclosing_rect_bounds_all_endpoints() {
        let segments = vec![line((1., 2.), (3., -4.)), line((-2., 0.), (5., 7.))];
        let rect = enclosing_rect(&segments).unwrap();
        assert_eq!(rect.min(), (-2., -4.).into());
        assert_eq!(rect.max(), (5., 7.).into());
    }

    #[test]
    fn enclosing_rect_of_nothing() {
        assert_eq!(enclosing_rect::<f64>(&[]), None);
    }
}
