//! Headless app builder
//!
//! Builds a windowless Bevy app running the full simulation schedule, for
//! integration tests and the `simulate` binary. No render systems, no
//! pointer input; callers drive throws by writing the projectile slot
//! directly or by calling the aim functions.

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use std::time::Duration;

use crate::aim::AimPhase;
use crate::catalog::{AimAssist, CurrentTarget, EquippedThrowable, Hype};
use crate::collision::{PendingClear, detect_impacts, tick_pending_clear};
use crate::effects::{EffectPools, advance_effects};
use crate::events::{EventBuffer, EventBus, drain_bus_to_buffer, update_event_bus_time};
use crate::flight::{ActiveProjectile, Trail, advance_projectile};
use crate::layout::StageGeometry;
use crate::mood::{ScreenShake, TargetAnimation, advance_target_animation};
use crate::tuning::EngineTweaks;

/// Builder for headless engine apps
pub struct HeadlessAppBuilder {
    surface: Vec2,
    fps: f32,
    minimal_threads: bool,
    events_enabled: bool,
}

impl HeadlessAppBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            surface: crate::constants::DEFAULT_SURFACE_SIZE,
            fps: 60.0,
            minimal_threads: false,
            events_enabled: true,
        }
    }

    /// Set the simulated surface size
    pub fn with_surface(mut self, width: f32, height: f32) -> Self {
        self.surface = Vec2::new(width, height);
        self
    }

    /// Set the target FPS (default: 60)
    pub fn with_fps(mut self, fps: f32) -> Self {
        self.fps = fps;
        self
    }

    /// Enable minimal thread mode (task pools = 1)
    ///
    /// Use this when running many apps in parallel to avoid hitting OS
    /// thread limits.
    pub fn with_minimal_threads(mut self) -> Self {
        self.minimal_threads = true;
        self
    }

    /// Drop all bus events (for runs that only inspect final state)
    pub fn without_events(mut self) -> Self {
        self.events_enabled = false;
        self
    }

    /// Build the app with minimal plugins, engine resources and the full
    /// simulation schedule (no rendering, no input).
    pub fn build(self) -> App {
        let mut app = App::new();

        if self.minimal_threads {
            app.add_plugins(
                MinimalPlugins
                    .set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f32(
                        1.0 / self.fps,
                    )))
                    .set(TaskPoolPlugin {
                        task_pool_options: TaskPoolOptions::with_num_threads(1),
                    }),
            );
        } else {
            app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(
                Duration::from_secs_f32(1.0 / self.fps),
            )));
        }

        let target = CurrentTarget::default();
        app.insert_resource(StageGeometry::for_target(
            self.surface.x,
            self.surface.y,
            &target,
        ));
        app.insert_resource(target);
        app.init_resource::<EngineTweaks>();
        app.init_resource::<EquippedThrowable>();
        app.init_resource::<AimAssist>();
        app.init_resource::<Hype>();
        app.init_resource::<AimPhase>();
        app.init_resource::<ActiveProjectile>();
        app.init_resource::<Trail>();
        app.init_resource::<PendingClear>();
        app.init_resource::<TargetAnimation>();
        app.init_resource::<ScreenShake>();
        app.init_resource::<EffectPools>();
        app.insert_resource(if self.events_enabled {
            EventBus::new()
        } else {
            EventBus::disabled()
        });
        let mut buffer = EventBuffer::new();
        buffer.start_session();
        app.insert_resource(buffer);

        app.add_systems(
            Update,
            (
                update_event_bus_time,
                advance_projectile,
                detect_impacts,
                tick_pending_clear,
                advance_target_animation,
                advance_effects,
                drain_bus_to_buffer,
            )
                .chain(),
        );

        app
    }
}

impl Default for HeadlessAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_creates_app() {
        let app = HeadlessAppBuilder::new().build();
        // Just verify it doesn't panic and has expected resources
        assert!(app.world().contains_resource::<ActiveProjectile>());
        assert!(app.world().contains_resource::<TargetAnimation>());
        assert!(app.world().contains_resource::<EventBus>());
        assert!(app.world().contains_resource::<EventBuffer>());
        assert!(app.world().contains_resource::<StageGeometry>());
    }

    #[test]
    fn test_minimal_threads_creates_app() {
        let app = HeadlessAppBuilder::new().with_minimal_threads().build();
        assert!(app.world().contains_resource::<EngineTweaks>());
    }

    #[test]
    fn test_disabled_events() {
        let app = HeadlessAppBuilder::new().without_events().build();
        assert!(!app.world().resource::<EventBus>().is_enabled());
    }

    #[test]
    fn test_full_throw_reaches_an_outcome() {
        use crate::aim::resolve_launch;
        use crate::events::EngineEvent;
        use crate::flight::Projectile;

        let mut app = HeadlessAppBuilder::new().with_minimal_threads().build();

        let solution = {
            let world = app.world();
            let layout = world.resource::<StageGeometry>().0;
            let tweaks = world.resource::<EngineTweaks>();
            let equipped = world.resource::<EquippedThrowable>();
            let point = layout.anchor + Vec2::new(-120.0, 90.0);
            resolve_launch(
                point,
                &layout,
                equipped.arc,
                equipped.weight,
                &equipped.physics,
                tweaks.aim_assist_blend,
                tweaks,
            )
            .expect("pull above minimum resolves")
        };
        app.world_mut().resource_mut::<ActiveProjectile>().0 =
            Some(Projectile::from_solution(&solution));

        // Plenty of updates for any flight to terminate (dt is clamped, so
        // each update advances at least a fraction of an ideal frame)
        for _ in 0..800 {
            app.update();
        }

        assert!(!app.world().resource::<ActiveProjectile>().is_live());
        // The outcome event landed in the session buffer
        let buffer = app.world().resource::<EventBuffer>();
        assert!(buffer.events().iter().any(|(_, e)| matches!(
            e,
            EngineEvent::Hit { .. } | EngineEvent::Missed { .. }
        )));
        assert!(!app.world().resource::<EventBus>().has_pending());
    }
}
