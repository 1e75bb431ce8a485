// Pointer-to-element proximity.
// Bounds are read fresh from the layout every frame — layout can shift
// between frames (scrolling, the element's own float motion), so nothing
// here is cached.

use glam::Vec2;

/// Viewport-space bounding box of a tracked element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ElementBounds {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    /// True if the point lies within the box (edges inclusive).
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left
            && point.x <= self.left + self.width
            && point.y >= self.top
            && point.y <= self.top + self.height
    }

    /// Zero-area boxes come from elements that are not laid out yet.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Pointer position relative to an element center.
///
/// Invariant: `distance == (dx² + dy²).sqrt()`. Always recomputed via
/// `between`, never stored stale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proximity {
    pub dx: f32,
    pub dy: f32,
    pub distance: f32,
}

impl Proximity {
    /// No displacement and no direction. Every direction-dependent mapper
    /// maps this to a no-op transform.
    pub const NEUTRAL: Proximity = Proximity { dx: 0.0, dy: 0.0, distance: 0.0 };

    /// Compute proximity of `pointer` to the element's center. Unmounted or
    /// zero-sized elements yield `NEUTRAL` (no attraction).
    pub fn between(bounds: Option<&ElementBounds>, pointer: Vec2) -> Self {
        let Some(bounds) = bounds else {
            return Self::NEUTRAL;
        };
        if bounds.is_degenerate() {
            return Self::NEUTRAL;
        }

        let delta = pointer - bounds.center();
        Self {
            dx: delta.x,
            dy: delta.y,
            distance: delta.length(),
        }
    }

    /// Displacement vector from element center to pointer.
    pub fn vector(&self) -> Vec2 {
        Vec2::new(self.dx, self.dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn distance_matches_vector_norm() {
        let bounds = ElementBounds::new(100.0, 100.0, 40.0, 20.0);
        // center = (120, 110)
        let p = Proximity::between(Some(&bounds), Vec2::new(123.0, 114.0));
        assert_abs_diff_eq!(p.dx, 3.0);
        assert_abs_diff_eq!(p.dy, 4.0);
        assert_abs_diff_eq!(p.distance, 5.0);
    }

    #[test]
    fn missing_or_degenerate_bounds_are_neutral() {
        let pointer = Vec2::new(500.0, 500.0);
        assert_eq!(Proximity::between(None, pointer), Proximity::NEUTRAL);

        let flat = ElementBounds::new(0.0, 0.0, 100.0, 0.0);
        assert_eq!(Proximity::between(Some(&flat), pointer), Proximity::NEUTRAL);
    }

    #[test]
    fn contains_is_edge_inclusive() {
        let bounds = ElementBounds::new(10.0, 10.0, 30.0, 20.0);
        assert!(bounds.contains(Vec2::new(10.0, 10.0)));
        assert!(bounds.contains(Vec2::new(40.0, 30.0)));
        assert!(!bounds.contains(Vec2::new(40.1, 30.0)));
    }
}
