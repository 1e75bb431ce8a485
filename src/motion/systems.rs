// Per-frame update passes over the item World.
//
// Fixed order, one upstream-to-downstream propagation per frame:
//   1. PointerTracker::commit_frame (caller side, before any pass)
//   2. pointer_react_pass  — proximity + hover/approach state transitions
//   3. advance_pass        — animators, watchdog, restore ramp, click cycle
//   4. compose_output_pass — mapper evaluation into VisualOutput
//
// Passes are short straight-line loops; there is no re-entrancy and no
// scheduling — the host calls them once per frame.

use bevy_ecs::prelude::*;
use glam::{Vec2, Vec3};

use super::components::*;
use super::interaction::{InteractionState, Navigator};
use super::mappers::{
    edge_shift, glow_opacity, layer_intensity, light_angle, magnetic_pull, parallax_offset,
    proximity_factor, tilt_angles,
};
use super::pointer::PointerTracker;
use super::proximity::Proximity;

/// Recompute proximity for every hoverable item against the committed
/// pointer position and drive the hover state transitions. Bounds are
/// derived fresh from each item's current drift offset — never cached.
pub fn pointer_react_pass(world: &mut World, tracker: &PointerTracker) {
    let pointer = tracker.position();
    let active = tracker.is_active();

    let mut query = world.query::<(&ItemLayout, &FloatMotion, &mut Hoverable)>();
    for (layout, motion, mut hoverable) in query.iter_mut(world) {
        let bounds = layout.bounds_at(motion.float.offset());
        let proximity = Proximity::between(Some(&bounds), pointer);
        // Only an active pointer can occupy an item; a stale position from
        // before the pointer left the surface must not hold a hover.
        let inside = active && bounds.contains(pointer);
        hoverable.interaction.pointer_update(&proximity, inside);
    }
}

/// Pointer left the tracked surface entirely. Items that were hovered get
/// their exit restoration even though no move event placed the pointer
/// outside their bounds.
pub fn pointer_left_pass(world: &mut World) {
    let mut query = world.query::<&mut Hoverable>();
    for mut hoverable in query.iter_mut(world) {
        hoverable.interaction.pointer_left_surface();
    }
}

/// Advance all time-based state by `dt`: interaction clocks first (they
/// decide this frame's damping), then the animators scaled by it.
pub fn advance_pass(world: &mut World, dt: f32, navigator: &mut dyn Navigator) {
    let mut query = world.query::<(&mut FloatMotion, Option<&mut Hoverable>)>();
    for (mut motion, hoverable) in query.iter_mut(world) {
        let damping = match hoverable {
            Some(mut hoverable) => {
                hoverable.interaction.advance(dt, navigator);
                hoverable.interaction.damping()
            }
            // Non-interactive drifters always run at full speed.
            None => 1.0,
        };
        motion.float.advance(dt, damping);
        motion.spin.advance(dt, damping);
    }
}

/// Evaluate the mappers and compose each item's `VisualOutput`, arbitrating
/// by interaction state: a direct hover or click cycle suppresses the
/// proximity effects and presents the fixed calm/click values instead.
pub fn compose_output_pass(world: &mut World, tracker: &PointerTracker) {
    let pointer = tracker.position();
    let viewport = tracker.viewport();
    let light = light_angle(pointer, viewport);

    // Floating interactive items.
    let mut query = world.query::<(&ItemLayout, &FloatMotion, &Hoverable, &mut VisualOutput)>();
    for (layout, motion, hoverable, mut output) in query.iter_mut(world) {
        let drift = motion.float.offset();
        let bounds = layout.bounds_at(drift);
        let proximity = Proximity::between(Some(&bounds), pointer);
        let interaction = &hoverable.interaction;

        output.light = light;
        output.color_phase = motion.spin.color_phase();
        output.click_rotation = interaction.click_rotation();

        if interaction.suppresses_hover_effects() {
            output.offset = drift;
            output.tilt_deg = Vec2::ZERO;
            output.scale = 1.0;
            output.glow = interaction.glow();
            // Hard-stop contract: a hovered item presents no rotation at
            // all, not just a frozen one.
            output.spin_deg = if interaction.state() == InteractionState::DirectHover {
                Vec3::ZERO
            } else {
                motion.spin.rotation()
            };
        } else {
            let factor = proximity_factor(proximity.distance, hoverable.tilt.detection_radius);
            output.offset = drift + magnetic_pull(&proximity, &hoverable.magnet);
            output.tilt_deg = tilt_angles(&proximity, &bounds, &hoverable.tilt);
            output.scale = 1.0 + factor * hoverable.scale_boost;
            output.glow = glow_opacity(proximity.distance, &hoverable.glow)
                .max(interaction.glow());
            output.spin_deg = motion.spin.rotation();
        }
    }

    // Parallax background layers.
    let mut query = world.query::<(&ParallaxLayer, &mut VisualOutput)>();
    for (layer, mut output) in query.iter_mut(world) {
        let intensity = layer_intensity(layer.depth, layer.base_unit);
        output.offset = parallax_offset(pointer, viewport, intensity);
    }

    // Edge-shifted elements.
    let mut query = world.query::<(&EdgeShifted, &mut VisualOutput)>();
    for (shifted, mut output) in query.iter_mut(world) {
        output.offset = edge_shift(pointer, viewport, &shifted.config);
    }
}

/// Hit-test `point` against the interactive items and start the click cycle
/// on the first hit. Returns true if an item was activated.
pub fn activate_at(world: &mut World, point: Vec2) -> bool {
    let mut query = world.query::<(&ItemLayout, &FloatMotion, &mut Hoverable)>();
    for (layout, motion, mut hoverable) in query.iter_mut(world) {
        if layout.bounds_at(motion.float.offset()).contains(point) {
            hoverable.interaction.begin_click();
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::animator::{FloatAnimator, FloatConfig, SpinAnimator, SpinConfig};
    use crate::motion::interaction::{ClickAction, Interaction};
    use crate::motion::mappers::EdgeShiftConfig;
    use anyhow::Result;

    const FRAME: f32 = 1.0 / 60.0;

    struct NullNavigator;

    impl Navigator for NullNavigator {
        fn scroll_to(&mut self, _selector: &str) -> Result<()> {
            Ok(())
        }
        fn open_external(&mut self, _url: &str) -> Result<()> {
            Ok(())
        }
    }

    fn spawn_item(world: &mut World, base: Vec2) -> Entity {
        world
            .spawn((
                ItemLayout::new(base, Vec2::new(120.0, 60.0)),
                FloatMotion {
                    float: FloatAnimator::new(FloatConfig::default()),
                    spin: SpinAnimator::new(SpinConfig::default()),
                },
                Hoverable::new(Interaction::new(ClickAction::ScrollTo("#projects".into()))),
                VisualOutput::default(),
            ))
            .id()
    }

    fn tracker_with_pointer(x: f32, y: f32) -> PointerTracker {
        let mut tracker = PointerTracker::new();
        tracker.set_viewport(1280.0, 720.0);
        tracker.record_move(x, y);
        tracker.commit_frame();
        tracker
    }

    fn run_frame(world: &mut World, tracker: &PointerTracker, navigator: &mut dyn Navigator) {
        pointer_react_pass(world, tracker);
        advance_pass(world, FRAME, navigator);
        compose_output_pass(world, tracker);
    }

    #[test]
    fn hovering_an_item_freezes_it_within_one_frame() {
        let mut world = World::new();
        // At phase 0 the float offset is (0, 35): the drift starts on the
        // cosine term. Park the pointer on the drifted center.
        let entity = spawn_item(&mut world, Vec2::new(400.0, 265.0));
        let tracker = tracker_with_pointer(400.0, 300.0);
        let mut navigator = NullNavigator;

        run_frame(&mut world, &tracker, &mut navigator);

        let hoverable = world.get::<Hoverable>(entity).unwrap();
        assert_eq!(hoverable.interaction.state(), InteractionState::DirectHover);
        assert_eq!(hoverable.interaction.damping(), 0.0);

        let output = world.get::<VisualOutput>(entity).unwrap();
        assert_eq!(output.tilt_deg, Vec2::ZERO);
        assert_eq!(output.spin_deg, Vec3::ZERO);
        assert_eq!(output.scale, 1.0);
    }

    #[test]
    fn nearby_pointer_applies_tilt_and_pull() {
        let mut world = World::new();
        let entity = spawn_item(&mut world, Vec2::new(400.0, 300.0));
        // ~100 px to the right of the drifted item, well within radii.
        let tracker = tracker_with_pointer(500.0, 335.0);
        let mut navigator = NullNavigator;

        run_frame(&mut world, &tracker, &mut navigator);

        let output = world.get::<VisualOutput>(entity).unwrap();
        assert!(output.offset.x > 0.0, "magnetic pull should lean toward the pointer");
        assert!(output.tilt_deg != Vec2::ZERO);
        assert!(output.scale > 1.0);
        assert!(output.glow > 0.0);
    }

    #[test]
    fn distant_pointer_leaves_item_idle_and_drifting() {
        let mut world = World::new();
        let entity = spawn_item(&mut world, Vec2::new(100.0, 100.0));
        let tracker = tracker_with_pointer(1200.0, 700.0);
        let mut navigator = NullNavigator;

        let mut phases = Vec::new();
        for _ in 0..3 {
            run_frame(&mut world, &tracker, &mut navigator);
            phases.push(world.get::<FloatMotion>(entity).unwrap().float.phase());
        }

        let hoverable = world.get::<Hoverable>(entity).unwrap();
        assert_eq!(hoverable.interaction.state(), InteractionState::Idle);
        assert!(phases[0] < phases[1] && phases[1] < phases[2], "drift must keep running");
    }

    #[test]
    fn parallax_layers_keep_depth_ordering() {
        let mut world = World::new();
        let mut entities = Vec::new();
        for depth in 0..4 {
            let id = world
                .spawn((ParallaxLayer::new(depth), VisualOutput::default()))
                .id();
            entities.push(id);
        }
        let tracker = tracker_with_pointer(1280.0, 100.0);

        compose_output_pass(&mut world, &tracker);

        let mut last = 0.0;
        for id in entities {
            let magnitude = world.get::<VisualOutput>(id).unwrap().offset.length();
            assert!(magnitude > last);
            last = magnitude;
        }
    }

    #[test]
    fn edge_shift_pushes_away_from_the_near_edge() {
        let mut world = World::new();
        let entity = world
            .spawn((
                EdgeShifted { config: EdgeShiftConfig::default() },
                VisualOutput::default(),
            ))
            .id();
        let tracker = tracker_with_pointer(0.0, 360.0);

        compose_output_pass(&mut world, &tracker);

        let output = world.get::<VisualOutput>(entity).unwrap();
        assert!(output.offset.x > 0.0, "pointer on left edge pushes element right");
    }

    #[test]
    fn despawned_item_receives_no_further_updates() {
        let mut world = World::new();
        let entity = spawn_item(&mut world, Vec2::new(400.0, 300.0));
        let tracker = tracker_with_pointer(400.0, 300.0);
        let mut navigator = NullNavigator;

        run_frame(&mut world, &tracker, &mut navigator);
        world.despawn(entity);

        // All state went with the entity; further frames touch nothing.
        run_frame(&mut world, &tracker, &mut navigator);
        assert!(world.get::<Hoverable>(entity).is_none());
        assert_eq!(world.query::<&Hoverable>().iter(&world).count(), 0);
    }

    #[test]
    fn activation_hits_only_items_under_the_point() {
        let mut world = World::new();
        let hit = spawn_item(&mut world, Vec2::new(200.0, 235.0));
        let missed = spawn_item(&mut world, Vec2::new(900.0, 235.0));

        // Float offset at phase 0 is (0, 35) → hit item centered (200, 270).
        assert!(activate_at(&mut world, Vec2::new(200.0, 270.0)));

        assert_eq!(
            world.get::<Hoverable>(hit).unwrap().interaction.state(),
            InteractionState::Clicking
        );
        assert_eq!(
            world.get::<Hoverable>(missed).unwrap().interaction.state(),
            InteractionState::Idle
        );

        assert!(!activate_at(&mut world, Vec2::new(50.0, 600.0)));
    }
}
