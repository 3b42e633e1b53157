//! Curved-edge geometry in canvas coordinates

use crate::core::layout::Point;

/// Lengths below this are treated as zero
const EPSILON: f64 = 1e-9;

/// Vector from `a` to `b`
fn sub(b: Point, a: Point) -> Point {
    Point::new(b.x - a.x, b.y - a.y)
}

/// Unit vector in the direction of `v`, or `fallback` when `v` is (near) zero
fn unit_or(v: Point, fallback: Point) -> Point {
    let len = v.x.hypot(v.y);
    if len < EPSILON {
        fallback
    } else {
        Point::new(v.x / len, v.y / len)
    }
}

/// `p + v * t`
fn offset(p: Point, v: Point, t: f64) -> Point {
    Point::new(v.x.mul_add(t, p.x), v.y.mul_add(t, p.y))
}

/// A quadratic Bézier arrow between two node circles
#[derive(Debug, Clone, PartialEq)]
pub struct CurvedArrow {
    /// Where the line leaves the source circle
    pub start: Point,
    /// Bézier control point
    pub control: Point,
    /// Where the line meets the arrowhead base
    pub end: Point,
    /// Arrowhead triangle: tip, then the two base corners
    pub head: [Point; 3],
    /// Point on the curve at `t = 0.5`
    pub midpoint: Point,
    /// Unit normal pointing to the convex side of the curve
    pub normal: Point,
}

impl CurvedArrow {
    /// Build an arrow from `from` to `to`
    ///
    /// The control point sits at `mid + curvature * (dy, -dx)`, so two edges
    /// between the same pair in opposite directions bend to opposite sides.
    /// The curve is trimmed by `node_radius` at both ends and the arrowhead
    /// of length `head_length` ends on the target circle.
    #[must_use]
    pub fn between(
        from: Point,
        to: Point,
        curvature: f64,
        node_radius: f64,
        head_length: f64,
    ) -> Self {
        let chord = sub(to, from);
        let mid = Point::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0);
        let control = Point::new(
            curvature.mul_add(chord.y, mid.x),
            curvature.mul_add(-chord.x, mid.y),
        );

        let forward = unit_or(chord, Point::new(1.0, 0.0));
        let perpendicular = Point::new(forward.y, -forward.x);

        let out_dir = unit_or(sub(control, from), forward);
        let in_dir = unit_or(sub(to, control), forward);

        let start = offset(from, out_dir, node_radius);
        let tip = offset(to, in_dir, -node_radius);
        let end = offset(tip, in_dir, -head_length);

        let half_width = head_length * 0.45;
        let side = Point::new(-in_dir.y, in_dir.x);
        let head = [
            tip,
            offset(end, side, half_width),
            offset(end, side, -half_width),
        ];

        let midpoint = Point::new(
            0.25 * from.x + 0.5 * control.x + 0.25 * to.x,
            0.25 * from.y + 0.5 * control.y + 0.25 * to.y,
        );
        let normal = unit_or(sub(control, mid), perpendicular);

        Self {
            start,
            control,
            end,
            head,
            midpoint,
            normal,
        }
    }

    /// Where to anchor a label: the curve midpoint pushed `distance` outward
    #[must_use]
    pub fn label_anchor(&self, distance: f64) -> Point {
        offset(self.midpoint, self.normal, distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_arrow_is_trimmed_by_radius() {
        let arrow =
            CurvedArrow::between(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 0.0, 10.0, 8.0);
        assert!((arrow.start.x - 10.0).abs() < 1e-9);
        assert!((arrow.head[0].x - 90.0).abs() < 1e-9);
        assert!((arrow.end.x - 82.0).abs() < 1e-9);
        assert!((arrow.midpoint.x - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_opposite_edges_bend_to_opposite_sides() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 0.0);
        let forward = CurvedArrow::between(a, b, 0.2, 10.0, 8.0);
        let backward = CurvedArrow::between(b, a, 0.2, 10.0, 8.0);
        assert!(forward.control.y * backward.control.y < 0.0);
        assert!(forward.label_anchor(5.0).distance(backward.label_anchor(5.0)) > 10.0);
    }

    #[test]
    fn test_label_anchor_is_offset_from_curve() {
        let arrow =
            CurvedArrow::between(Point::new(0.0, 0.0), Point::new(0.0, 100.0), 0.15, 10.0, 8.0);
        let anchor = arrow.label_anchor(6.0);
        assert!((anchor.distance(arrow.midpoint) - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_coincident_endpoints_do_not_produce_nan() {
        let p = Point::new(3.0, 3.0);
        let arrow = CurvedArrow::between(p, p, 0.15, 10.0, 8.0);
        for q in arrow.head {
            assert!(q.x.is_finite() && q.y.is_finite());
        }
    }
}
