use kurbo::{BezPath, Circle, Rect, Shape};

pub use kurbo::Point;

/// Flattening tolerance when converting curved shapes to bezier paths.
const PATH_TOLERANCE: f64 = 0.1;

/// The clip shapes a step can paint through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
}

/// Builds the clip path for one step.
///
/// The meaning of `extent` depends on the shape: radius for circles, side
/// length for squares, height for triangles. All three are centered on
/// `center` so successive shrinking shapes nest visually.
pub fn clip_path(shape: ShapeKind, center: Point, extent: f64) -> BezPath {
    match shape {
        ShapeKind::Circle => Circle::new(center, extent).to_path(PATH_TOLERANCE),
        ShapeKind::Square => {
            Rect::from_center_size(center, (extent, extent)).to_path(PATH_TOLERANCE)
        }
        ShapeKind::Triangle => {
            let [a, b, c] = triangle_vertices(center, extent);
            let mut path = BezPath::new();
            path.move_to(a);
            path.line_to(b);
            path.line_to(c);
            path.close_path();
            path
        }
    }
}

/// Vertices of an apex-down equilateral triangle of height `height` whose
/// centroid is `center`.
///
/// The centroid of an equilateral triangle sits `height/3` from the base,
/// so the base corners land at `center.y - height/3` and the apex at
/// `center.y + 2*height/3` (y grows downward). `side = height / (sqrt(3)/2)`.
pub fn triangle_vertices(center: Point, height: f64) -> [Point; 3] {
    let side = height / (3.0_f64.sqrt() / 2.0);
    let base_y = center.y - height / 3.0;
    [
        Point::new(center.x - side / 2.0, base_y),
        Point::new(center.x + side / 2.0, base_y),
        Point::new(center.x, center.y + 2.0 * height / 3.0),
    ]
}

/// Starting extent for the step loop, derived from the first image's
/// dimensions: half the short side for circles (a radius), the short side
/// for squares, the image height for triangles.
pub fn initial_extent(shape: ShapeKind, width: u32, height: u32) -> f64 {
    let (w, h) = (f64::from(width), f64::from(height));
    match shape {
        ShapeKind::Circle => w.min(h) / 2.0,
        ShapeKind::Square => w.min(h),
        ShapeKind::Triangle => h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < EPS, "{a} != {b}");
    }

    #[test]
    fn triangle_side_matches_height_ratio() {
        let h = 120.0;
        let [a, b, _] = triangle_vertices(Point::new(0.0, 0.0), h);
        let side = a.distance(b);
        assert_close(side, h / (3.0_f64.sqrt() / 2.0));
    }

    #[test]
    fn triangle_vertices_are_equilateral() {
        let [a, b, c] = triangle_vertices(Point::new(64.0, 64.0), 90.0);
        assert_close(a.distance(b), b.distance(c));
        assert_close(b.distance(c), c.distance(a));
    }

    #[test]
    fn triangle_centroid_sits_at_center() {
        let center = Point::new(100.0, 80.0);
        let [a, b, c] = triangle_vertices(center, 75.0);
        assert_close((a.x + b.x + c.x) / 3.0, center.x);
        assert_close((a.y + b.y + c.y) / 3.0, center.y);
    }

    #[test]
    fn triangle_apex_points_down() {
        let center = Point::new(50.0, 50.0);
        let h = 60.0;
        let [a, b, c] = triangle_vertices(center, h);
        assert_close(a.y, center.y - h / 3.0);
        assert_close(b.y, center.y - h / 3.0);
        assert_close(c.y, center.y + 2.0 * h / 3.0);
        assert!(c.y > a.y);
    }

    #[test]
    fn circle_path_bounds_match_radius() {
        let center = Point::new(100.0, 100.0);
        let r = 40.0;
        let bbox = clip_path(ShapeKind::Circle, center, r).bounding_box();
        // Bezier approximation, so compare within the flattening tolerance.
        assert!((bbox.x0 - (center.x - r)).abs() < 0.5);
        assert!((bbox.x1 - (center.x + r)).abs() < 0.5);
        assert!((bbox.y0 - (center.y - r)).abs() < 0.5);
        assert!((bbox.y1 - (center.y + r)).abs() < 0.5);
    }

    #[test]
    fn square_path_bounds_are_exact() {
        let bbox = clip_path(ShapeKind::Square, Point::new(50.0, 50.0), 30.0).bounding_box();
        assert_close(bbox.x0, 35.0);
        assert_close(bbox.x1, 65.0);
        assert_close(bbox.y0, 35.0);
        assert_close(bbox.y1, 65.0);
    }

    #[test]
    fn initial_extent_per_shape() {
        assert_close(initial_extent(ShapeKind::Circle, 200, 100), 50.0);
        assert_close(initial_extent(ShapeKind::Square, 200, 100), 100.0);
        assert_close(initial_extent(ShapeKind::Triangle, 200, 100), 100.0);
    }
}
