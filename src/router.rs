//! Rounded orthogonal edge paths.
//!
//! A routed path leaves the source along the axis with the larger
//! displacement, turns once through a quadratic corner and runs straight into
//! the target. Output is an SVG path description and is fully determined by
//! the inputs.

use serde::{Deserialize, Serialize};

use crate::workflow::node::Position;

/// Which leg is drawn first.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Orientation {
    HorizontalFirst,
    VerticalFirst,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RoutedPath {
    /// SVG path data
    pub d: String,
    pub orientation: Orientation,
    /// where the two legs meet; also a sensible label anchor
    pub corner: Position,
    /// radius actually used after clamping
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathRouter {
    radius: f64,
}

impl Default for PathRouter {
    fn default() -> Self {
        Self {
            radius: 8.0,
        }
    }
}

impl PathRouter {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn route(
        &self,
        source: Position,
        target: Position,
    ) -> RoutedPath {
        route(source, target, self.radius)
    }
}

/// Routes `source -> target` with a corner of at most `radius`.
///
/// The radius is clamped to half of the shorter leg so the curve never
/// overshoots a segment; a zero-length leg degrades to a straight line.
pub fn route(
    source: Position,
    target: Position,
    radius: f64,
) -> RoutedPath {
    let dx = target.x - source.x;
    let dy = target.y - source.y;
    let orientation = if dx.abs() >= dy.abs() { Orientation::HorizontalFirst } else { Orientation::VerticalFirst };

    let corner = match orientation {
        Orientation::HorizontalFirst => Position::new(target.x, source.y),
        Orientation::VerticalFirst => Position::new(source.x, target.y),
    };
    let shorter_leg = dx.abs().min(dy.abs());
    let r = radius.max(0.0).min(shorter_leg / 2.0);

    if r <= 0.0 {
        return RoutedPath {
            d: format!("M {} {} L {} {} L {} {}", source.x, source.y, corner.x, corner.y, target.x, target.y),
            orientation,
            corner,
            radius: 0.0,
        };
    }

    let (sx, sy) = (dx.signum(), dy.signum());
    let (before, after) = match orientation {
        Orientation::HorizontalFirst => (Position::new(corner.x - sx * r, corner.y), Position::new(corner.x, corner.y + sy * r)),
        Orientation::VerticalFirst => (Position::new(corner.x, corner.y - sy * r), Position::new(corner.x + sx * r, corner.y)),
    };

    RoutedPath {
        d: format!(
            "M {} {} L {} {} Q {} {} {} {} L {} {}",
            source.x, source.y, before.x, before.y, corner.x, corner.y, after.x, after.y, target.x, target.y
        ),
        orientation,
        corner,
        radius: r,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(
        x: f64,
        y: f64,
    ) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_horizontal_first_when_dx_dominates() {
        let path = route(p(0.0, 0.0), p(100.0, 40.0), 8.0);
        assert_eq!(path.orientation, Orientation::HorizontalFirst);
        assert_eq!(path.corner, p(100.0, 0.0));
        assert_eq!(path.d, "M 0 0 L 92 0 Q 100 0 100 8 L 100 40");
    }

    #[test]
    fn test_vertical_first_when_dy_dominates() {
        let path = route(p(0.0, 0.0), p(-30.0, -90.0), 8.0);
        assert_eq!(path.orientation, Orientation::VerticalFirst);
        assert_eq!(path.d, "M 0 0 L 0 -82 Q 0 -90 -8 -90 L -30 -90");
    }

    #[test]
    fn test_radius_is_clamped_to_half_the_shorter_leg() {
        let path = route(p(0.0, 0.0), p(100.0, 10.0), 20.0);
        assert_eq!(path.radius, 5.0);
        assert_eq!(path.d, "M 0 0 L 95 0 Q 100 0 100 5 L 100 10");
    }

    #[test]
    fn test_aligned_points_give_straight_line() {
        let path = route(p(0.0, 0.0), p(50.0, 0.0), 8.0);
        assert_eq!(path.radius, 0.0);
        assert!(!path.d.contains('Q'));
    }

    #[test]
    fn test_negative_radius_is_treated_as_zero() {
        let path = route(p(0.0, 0.0), p(40.0, 30.0), -3.0);
        assert_eq!(path.radius, 0.0);
    }

    #[test]
    fn test_route_is_deterministic() {
        let router = PathRouter::new(12.0);
        let a = router.route(p(13.5, -7.25), p(-210.0, 66.0));
        let b = router.route(p(13.5, -7.25), p(-210.0, 66.0));
        assert_eq!(a, b);
    }
}
