//! Joint geometry in pixel space
//!
//! Angles, distances and point-to-line distances used by every pose
//! analyzer. Inputs must share one coordinate space; the analyzers
//! de-normalize landmarks to pixels before calling in here.

/// 2D point (x, y)
pub type Point = (f32, f32);

/// Interior angle at `b` formed by `a`-`b`-`c`, in degrees (0-180)
///
/// Difference of the two `atan2` bearings, reflected when it exceeds
/// 180° so that the interior angle is returned. Coincident points give
/// an arbitrary (but finite) angle.
pub fn angle(a: Point, b: Point, c: Point) -> f32 {
    let radians = (c.1 - b.1).atan2(c.0 - b.0) - (a.1 - b.1).atan2(a.0 - b.0);
    let degrees = radians.to_degrees().abs();

    if degrees > 180.0 {
        360.0 - degrees
    } else {
        degrees
    }
}

/// Euclidean distance between two points
pub fn distance(p1: Point, p2: Point) -> f32 {
    let dx = p2.0 - p1.0;
    let dy = p2.1 - p1.1;
    (dx * dx + dy * dy).sqrt()
}

/// Perpendicular distance from `point` to the line through the segment
///
/// A zero-length segment falls back to the distance from `seg_start`.
pub fn point_to_segment_distance(point: Point, seg_start: Point, seg_end: Point) -> f32 {
    let line = (seg_end.0 - seg_start.0, seg_end.1 - seg_start.1);
    let to_point = (point.0 - seg_start.0, point.1 - seg_start.1);

    let line_len = (line.0 * line.0 + line.1 * line.1).sqrt();
    if line_len == 0.0 {
        return distance(point, seg_start);
    }

    // Project onto the line direction
    let unit = (line.0 / line_len, line.1 / line_len);
    let proj_len = to_point.0 * unit.0 + to_point.1 * unit.1;
    let proj = (seg_start.0 + proj_len * unit.0, seg_start.1 + proj_len * unit.1);

    distance(point, proj)
}

/// Midpoint of a left/right landmark pair
pub fn midpoint(a: Point, b: Point) -> Point {
    ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample_points() -> Vec<Point> {
        let mut points = Vec::new();
        for i in 0..6 {
            for j in 0..6 {
                points.push((i as f32 * 37.5 - 80.0, j as f32 * 21.0 - 40.0));
            }
        }
        points
    }

    #[test]
    fn test_straight_line() {
        let angle = angle((0.0, 0.0), (0.5, 0.0), (1.0, 0.0));
        assert_abs_diff_eq!(angle, 180.0, epsilon = 1e-3);
    }

    #[test]
    fn test_right_angle() {
        let angle = angle((0.0, 0.0), (0.5, 0.0), (0.5, 0.5));
        assert_abs_diff_eq!(angle, 90.0, epsilon = 1e-3);
    }

    #[test]
    fn test_reflex_bearing_is_reflected() {
        // Bearings of -170° and +170° differ by 340°, the interior angle is 20°
        let b = (0.0, 0.0);
        let a = ((-170f32).to_radians().cos(), (-170f32).to_radians().sin());
        let c = (170f32.to_radians().cos(), 170f32.to_radians().sin());
        assert_abs_diff_eq!(angle(a, b, c), 20.0, epsilon = 1e-3);
    }

    #[test]
    fn test_angle_range_and_symmetry() {
        let points = sample_points();
        let b = (3.0, -7.0);
        for &a in &points {
            for &c in &points {
                let forward = angle(a, b, c);
                let backward = angle(c, b, a);
                assert!((0.0..=180.0).contains(&forward), "angle {forward} out of range");
                assert_abs_diff_eq!(forward, backward, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn test_coincident_points_are_finite() {
        let p = (4.0, 4.0);
        assert!(angle(p, p, p).is_finite());
    }

    #[test]
    fn test_distance() {
        assert_abs_diff_eq!(distance((0.0, 0.0), (3.0, 4.0)), 5.0);
        assert_abs_diff_eq!(distance((2.0, 2.0), (2.0, 2.0)), 0.0);
    }

    #[test]
    fn test_point_to_line_perpendicular() {
        // Infinite line: points beyond the segment end still project onto it
        let d = point_to_segment_distance((10.0, 3.0), (0.0, 0.0), (1.0, 0.0));
        assert_abs_diff_eq!(d, 3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_zero_length_segment_falls_back_to_distance() {
        for &p in &sample_points() {
            let s = (12.0, -5.0);
            assert_abs_diff_eq!(point_to_segment_distance(p, s, s), distance(p, s));
        }
    }

    #[test]
    fn test_midpoint() {
        assert_eq!(midpoint((0.0, 2.0), (4.0, 6.0)), (2.0, 4.0));
    }
}
