use crate::foundation::core::{BezPath, Point};

/// Straight-segment polyline through `points` in order.
///
/// Non-finite points are kept; the serializer writes them through so a malformed datum shows up
/// as a broken path rather than silently disappearing.
pub fn line_path(points: impl IntoIterator<Item = Point>) -> BezPath {
    let mut path = BezPath::new();
    for (i, p) in points.into_iter().enumerate() {
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    #[test]
    fn first_point_moves_rest_line() {
        let path = line_path([
            Point::new(0.0, 0.0),
            Point::new(1.0, 2.0),
            Point::new(3.0, 1.0),
        ]);
        let els = path.elements();
        assert_eq!(els.len(), 3);
        assert!(matches!(els[0], PathEl::MoveTo(_)));
        assert!(matches!(els[2], PathEl::LineTo(p) if p == Point::new(3.0, 1.0)));
    }

    #[test]
    fn empty_input_is_empty_path() {
        assert!(line_path(Vec::new()).elements().is_empty());
    }
}
