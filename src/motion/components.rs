// Per-item ECS components for the motion engine.
// Each animated item owns its whole state — phase, damping, interaction,
// configs — so nothing leaks across items or outlives a despawn.

use bevy_ecs::prelude::*;
use glam::{Vec2, Vec3};

use super::animator::{FloatAnimator, SpinAnimator};
use super::interaction::Interaction;
use super::mappers::{EdgeShiftConfig, GlowConfig, MagneticConfig, TiltConfig};
use super::proximity::ElementBounds;

/// Anchor and size of an item in viewport coordinates. The live bounding
/// box is derived per frame from the anchor plus the current motion offset.
#[derive(Component, Debug, Clone, Copy)]
pub struct ItemLayout {
    /// Center anchor the item drifts around.
    pub base: Vec2,
    pub size: Vec2,
}

impl ItemLayout {
    pub fn new(base: Vec2, size: Vec2) -> Self {
        Self { base, size }
    }

    /// Bounding box with the given motion offset applied.
    pub fn bounds_at(&self, offset: Vec2) -> ElementBounds {
        let center = self.base + offset;
        ElementBounds::new(
            center.x - self.size.x * 0.5,
            center.y - self.size.y * 0.5,
            self.size.x,
            self.size.y,
        )
    }
}

/// Autonomous drift + spin for one item. Phases are independent per item so
/// sibling animations stay decorrelated.
#[derive(Component, Clone)]
pub struct FloatMotion {
    pub float: FloatAnimator,
    pub spin: SpinAnimator,
}

/// Pointer reactivity for one interactive item: the hover/click state
/// machine plus the mapper configs evaluated against it each frame.
#[derive(Component)]
pub struct Hoverable {
    pub interaction: Interaction,
    pub magnet: MagneticConfig,
    pub tilt: TiltConfig,
    pub glow: GlowConfig,
    /// Scale gain at full proximity (1.0 + factor * scale_boost).
    pub scale_boost: f32,
}

impl Hoverable {
    pub fn new(interaction: Interaction) -> Self {
        Self {
            interaction,
            magnet: MagneticConfig::default(),
            tilt: TiltConfig::default(),
            glow: GlowConfig::default(),
            scale_boost: 0.05,
        }
    }
}

/// Background layer moved by the parallax mapper. Larger `depth` moves
/// strictly more, producing the depth ordering.
#[derive(Component, Debug, Clone, Copy)]
pub struct ParallaxLayer {
    pub depth: usize,
    pub base_unit: f32,
}

impl ParallaxLayer {
    pub fn new(depth: usize) -> Self {
        Self { depth, base_unit: 15.0 }
    }
}

/// Element displaced away from whichever viewport edge the pointer nears.
#[derive(Component, Debug, Clone, Copy)]
pub struct EdgeShifted {
    pub config: EdgeShiftConfig,
}

/// Render-boundary values for one item, recomposed every frame. A renderer
/// binds these to its transform properties; the engine never renders.
#[derive(Component, Debug, Clone, Copy)]
pub struct VisualOutput {
    /// Position offset from the item's anchor (px).
    pub offset: Vec2,
    /// Proximity tilt (degrees, x/y axes).
    pub tilt_deg: Vec2,
    /// Continuous spin rotation (degrees, x/y/z axes).
    pub spin_deg: Vec3,
    pub scale: f32,
    /// Glow opacity in [0, 1].
    pub glow: f32,
    /// Glow hotspot as viewport percentages (0–100).
    pub light: Vec2,
    /// Click-cycle rotation (degrees, 0 outside a cycle).
    pub click_rotation: f32,
    /// Palette position in [0, 1] from the spin animator.
    pub color_phase: f32,
}

impl Default for VisualOutput {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            tilt_deg: Vec2::ZERO,
            spin_deg: Vec3::ZERO,
            scale: 1.0,
            glow: 0.0,
            light: Vec2::splat(50.0),
            click_rotation: 0.0,
            color_phase: 0.5,
        }
    }
}
