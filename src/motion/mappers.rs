// Force/transform mappers — pure functions from pointer geometry to visual
// transform values. Each mapper encodes one falloff law.
//
// All outputs are finite and clamped to their configured maxima. The one
// singular input, distance == 0 with a zero direction vector, maps to a
// zero offset (direction undefined), never NaN.

use glam::Vec2;

use super::proximity::{ElementBounds, Proximity};

const EPSILON: f32 = 1e-5;

// ============================================================================
// PROXIMITY FACTOR
// ============================================================================

/// Normalized closeness in [0, 1]: 1 at zero distance, exactly 0 at and
/// beyond `radius`. Monotonically non-increasing in `distance`.
#[inline]
pub fn proximity_factor(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / radius).max(0.0)
}

// ============================================================================
// MAGNETIC PULL
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct MagneticConfig {
    /// Pull is zero at and beyond this distance (px).
    pub radius: f32,
    /// Offset magnitude at distance 0 (px).
    pub strength: f32,
}

impl Default for MagneticConfig {
    fn default() -> Self {
        Self { radius: 150.0, strength: 25.0 }
    }
}

/// Offset pulling an element toward the pointer.
///
/// Magnitude = `(1 - d/R) * strength`, direction = normalized pointer
/// vector. Linear ramp: exactly 0 at `d == R`, `strength` as `d → 0`.
pub fn magnetic_pull(p: &Proximity, cfg: &MagneticConfig) -> Vec2 {
    if cfg.radius <= 0.0 || p.distance >= cfg.radius {
        return Vec2::ZERO;
    }
    if p.distance <= EPSILON {
        // Pointer sits on the center: direction undefined, no pull.
        return Vec2::ZERO;
    }
    let pull = (1.0 - p.distance / cfg.radius) * cfg.strength;
    p.vector() / p.distance * pull
}

// ============================================================================
// PROXIMITY TILT
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct TiltConfig {
    /// Distance at which the tilt response starts (px).
    pub detection_radius: f32,
    /// Tilt cap per axis (degrees).
    pub max_degrees: f32,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self { detection_radius: 250.0, max_degrees: 20.0 }
    }
}

/// 3D tilt toward the pointer, in degrees: `x` rotates around the horizontal
/// axis (driven by dy), `y` around the vertical axis (driven by dx, negated
/// so the face leans toward the cursor). Per-axis displacement is scaled by
/// the element dimension so small elements don't over-rotate, then by the
/// proximity factor, and finally clamped to `±max_degrees`.
pub fn tilt_angles(p: &Proximity, bounds: &ElementBounds, cfg: &TiltConfig) -> Vec2 {
    if bounds.is_degenerate() {
        return Vec2::ZERO;
    }
    let factor = proximity_factor(p.distance, cfg.detection_radius);
    if factor <= 0.0 {
        return Vec2::ZERO;
    }
    let rx = (p.dy / bounds.height) * factor * cfg.max_degrees;
    let ry = -(p.dx / bounds.width) * factor * cfg.max_degrees;
    Vec2::new(
        rx.clamp(-cfg.max_degrees, cfg.max_degrees),
        ry.clamp(-cfg.max_degrees, cfg.max_degrees),
    )
}

// ============================================================================
// GLOW
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct GlowConfig {
    /// Glow is fully off at and beyond this distance (px).
    pub radius: f32,
    /// Opacity at distance 0, in [0, 1].
    pub base_intensity: f32,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self { radius: 300.0, base_intensity: 1.0 }
    }
}

/// Glow/shadow opacity: `proximity_factor * base_intensity`. Monotonically
/// decreasing with distance, 0 outside the radius.
#[inline]
pub fn glow_opacity(distance: f32, cfg: &GlowConfig) -> f32 {
    proximity_factor(distance, cfg.radius) * cfg.base_intensity
}

// ============================================================================
// PARALLAX
// ============================================================================

/// Depth-layer intensity: layer n moves `(n+1) * base_unit` px across a full
/// viewport traversal, so deeper layers move strictly more.
#[inline]
pub fn layer_intensity(layer: usize, base_unit: f32) -> f32 {
    (layer as f32 + 1.0) * base_unit
}

/// Offset for one parallax layer: pointer position normalized to
/// `[-0.5, 0.5]` per axis, times the layer intensity. Zero at viewport
/// center and whenever the viewport is degenerate.
pub fn parallax_offset(pointer: Vec2, viewport: Vec2, intensity: f32) -> Vec2 {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        (pointer.x / viewport.x - 0.5) * intensity,
        (pointer.y / viewport.y - 0.5) * intensity,
    )
}

// ============================================================================
// EDGE SHIFT
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct EdgeShiftConfig {
    /// Distance from an edge (px) at which the shift response starts.
    pub threshold: f32,
    /// Maximum displacement (px) when the pointer sits on an edge.
    pub strength: f32,
}

impl Default for EdgeShiftConfig {
    fn default() -> Self {
        Self { threshold: 100.0, strength: 30.0 }
    }
}

/// Displacement away from whichever viewport edge the pointer approaches.
///
/// Each edge gets a proximity ratio `min(dist_to_edge, threshold) /
/// threshold` (0 = on the edge, 1 = at least `threshold` away); the shift
/// on an axis is `(far_side - near_side) * strength`. Zero with the pointer
/// centered, `±strength` with the pointer on an exact edge.
pub fn edge_shift(pointer: Vec2, viewport: Vec2, cfg: &EdgeShiftConfig) -> Vec2 {
    if viewport.x <= 0.0 || viewport.y <= 0.0 || cfg.threshold <= 0.0 {
        return Vec2::ZERO;
    }
    let ratio = |d: f32| (d.max(0.0)).min(cfg.threshold) / cfg.threshold;

    let from_left = ratio(pointer.x);
    let from_right = ratio(viewport.x - pointer.x);
    let from_top = ratio(pointer.y);
    let from_bottom = ratio(viewport.y - pointer.y);

    Vec2::new(
        (from_right - from_left) * cfg.strength,
        (from_bottom - from_top) * cfg.strength,
    )
}

// ============================================================================
// LIGHT ANGLE
// ============================================================================

/// Pointer position as viewport percentages (0–100 per axis). Drives the
/// radial-glow hotspot that follows the cursor across an item's face.
pub fn light_angle(pointer: Vec2, viewport: Vec2) -> Vec2 {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Vec2::splat(50.0);
    }
    Vec2::new(
        (pointer.x / viewport.x * 100.0).clamp(0.0, 100.0),
        (pointer.y / viewport.y * 100.0).clamp(0.0, 100.0),
    )
}
