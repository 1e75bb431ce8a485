// Continuous time-based animators — floating drift and slow 3D spin.
//
// Animators own no timers: they only move when `advance` is called with a
// frame delta, so dropping the owning item stops all of its motion with no
// handle to leak. Output is a pure function of the accumulated phase,
// which keeps the math reproducible under a virtual clock.

use glam::{Vec2, Vec3};

// ============================================================================
// FLOAT ANIMATOR
// ============================================================================

/// Amplitudes and frequencies for the organic drift path. Two sine terms
/// per axis with incommensurate frequencies produce a non-repeating wander
/// over short windows instead of a visible loop.
#[derive(Debug, Clone, Copy)]
pub struct FloatConfig {
    /// Phase advance in radians per second at damping 1.
    pub speed: f32,
    /// Primary/secondary amplitude on x (px).
    pub amp_x: (f32, f32),
    /// Primary/secondary amplitude on y (px).
    pub amp_y: (f32, f32),
}

impl Default for FloatConfig {
    fn default() -> Self {
        Self {
            speed: 0.3,
            amp_x: (40.0, 30.0),
            amp_y: (35.0, 25.0),
        }
    }
}

/// Drifting position offset driven by a monotonic phase accumulator.
#[derive(Debug, Clone)]
pub struct FloatAnimator {
    config: FloatConfig,
    phase: f32,
}

impl FloatAnimator {
    pub fn new(config: FloatConfig) -> Self {
        Self { config, phase: 0.0 }
    }

    /// Start at a given phase so sibling items are decorrelated.
    pub fn with_phase(config: FloatConfig, phase: f32) -> Self {
        Self { config, phase }
    }

    /// Advance the phase: `phase += dt * speed * damping`. Damping 0 freezes
    /// the animator in place; damping 1 is full speed.
    pub fn advance(&mut self, dt: f32, damping: f32) {
        self.phase += dt * self.config.speed * damping.clamp(0.0, 1.0);
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Offset at the current phase.
    pub fn offset(&self) -> Vec2 {
        Self::offset_at(self.phase, &self.config)
    }

    /// Pure drift function: exactly reproducible for a given phase.
    pub fn offset_at(phase: f32, config: &FloatConfig) -> Vec2 {
        let t = phase;
        Vec2::new(
            t.sin() * config.amp_x.0 + (t * 0.7).sin() * config.amp_x.1,
            (t * 0.9).cos() * config.amp_y.0 + (t * 0.6).sin() * config.amp_y.1,
        )
    }
}

// ============================================================================
// SPIN ANIMATOR
// ============================================================================

/// Slow continuous 3D rotation with a color phase derived from the yaw,
/// so the palette cycles as the item turns front-to-back.
#[derive(Debug, Clone, Copy)]
pub struct SpinConfig {
    /// Phase advance in radians per second at damping 1.
    pub speed: f32,
    /// Rotation amplitude on x/y (degrees).
    pub max_xy_degrees: f32,
    /// Rotation amplitude on z (degrees). Kept small — z roll reads as
    /// wobble rather than depth.
    pub max_z_degrees: f32,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            speed: 0.5,
            max_xy_degrees: 45.0,
            max_z_degrees: 15.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpinAnimator {
    config: SpinConfig,
    phase: f32,
}

impl SpinAnimator {
    pub fn new(config: SpinConfig) -> Self {
        Self { config, phase: 0.0 }
    }

    pub fn with_phase(config: SpinConfig, phase: f32) -> Self {
        Self { config, phase }
    }

    pub fn advance(&mut self, dt: f32, damping: f32) {
        self.phase += dt * self.config.speed * damping.clamp(0.0, 1.0);
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Rotation in degrees (x, y, z) at the current phase.
    pub fn rotation(&self) -> Vec3 {
        Self::rotation_at(self.phase, &self.config)
    }

    pub fn rotation_at(phase: f32, config: &SpinConfig) -> Vec3 {
        let t = phase;
        Vec3::new(
            (t * 0.8).sin() * config.max_xy_degrees,
            (t * 1.1).cos() * config.max_xy_degrees,
            (t * 0.3).sin() * config.max_z_degrees,
        )
    }

    /// Palette position in [0, 1], following the yaw rotation: 0.5 when the
    /// item faces forward, extremes at full left/right turn.
    pub fn color_phase(&self) -> f32 {
        let ry = self.rotation().y.to_radians();
        (ry.sin() + 1.0) * 0.5
    }
}
