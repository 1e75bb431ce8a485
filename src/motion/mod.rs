// Motion engine — cursor-reactive animation core.
// Pointer tracking, proximity math, pure transform mappers, continuous
// animators, and the per-item hover/click state machine.

pub mod animator;
pub mod components;
pub mod interaction;
pub mod mappers;
pub mod pointer;
pub mod proximity;
pub mod systems;

// Re-export commonly used items
pub use animator::{FloatAnimator, FloatConfig, SpinAnimator, SpinConfig};
pub use components::*;
pub use interaction::{ClickAction, Interaction, InteractionConfig, InteractionState, Navigator};
pub use mappers::{EdgeShiftConfig, GlowConfig, MagneticConfig, TiltConfig};
pub use pointer::PointerTracker;
pub use proximity::{ElementBounds, Proximity};
