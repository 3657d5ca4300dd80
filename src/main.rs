//! Flingshot - A pointer-driven slingshot projectile engine built with Bevy
//!
//! Main entry point: app setup and system registration.

use bevy::prelude::*;
use flingshot::{
    AimAssist, AimPhase, AmbienceSprite, BackgroundSprite, EngineConfig, EngineTweaks,
    EventLogConfig, EventLogger, GroundSprite, Hype, LauncherSprite, ProjectileSprite, StageArt,
    StageGeometry, TargetSprite, aim, collision, constants::*, effects, events, flight, layout,
    mood, render, tuning,
};

fn main() {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let no_log = args.iter().any(|a| a == "--no-log");
    let assist_on = args.iter().any(|a| a == "--aim-assist");

    // Check for --hype <0..1> override
    let hype = args
        .iter()
        .position(|a| a == "--hype")
        .and_then(|i| args.get(i + 1).and_then(|s| s.parse::<f32>().ok()))
        .unwrap_or(0.5);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                // Set scale_factor_override to 1.0 so pointer coordinates map
                // 1:1 onto surface space on HiDPI displays
                resolution: bevy::window::WindowResolution::new(
                    DEFAULT_SURFACE_SIZE.x as u32,
                    DEFAULT_SURFACE_SIZE.y as u32,
                )
                .with_scale_factor_override(1.0),
                title: "Flingshot".into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .init_resource::<EngineTweaks>()
        .init_resource::<StageGeometry>()
        .init_resource::<flingshot::CurrentTarget>()
        .init_resource::<flingshot::EquippedThrowable>()
        .insert_resource(AimAssist(assist_on))
        .insert_resource(Hype(hype))
        .init_resource::<AimPhase>()
        .init_resource::<flingshot::ActiveProjectile>()
        .init_resource::<flingshot::Trail>()
        .init_resource::<flingshot::PendingClear>()
        .init_resource::<flingshot::TargetAnimation>()
        .init_resource::<flingshot::ScreenShake>()
        .init_resource::<flingshot::EffectPools>()
        .insert_resource(events::EventBus::new())
        .insert_resource(EventLogger::new(EventLogConfig {
            enabled: !no_log,
            ..default()
        }))
        .init_resource::<StageArt>()
        // Tuning file first so the logged config snapshot reflects it
        .add_systems(
            Startup,
            (tuning::load_global_tuning_system, setup, start_logging).chain(),
        )
        // Simulation step, in dependency order: geometry -> input -> flight ->
        // impact -> reaction -> effects -> event drain
        .add_systems(
            Update,
            (
                events::update_event_bus_time,
                layout::refresh_stage_layout,
                aim::capture_pointer,
                flight::advance_projectile,
                collision::detect_impacts,
                collision::tick_pending_clear,
                mood::advance_target_animation,
                effects::advance_effects,
                events::drain_bus_to_logger,
                events::close_log_on_exit,
            )
                .chain(),
        )
        // Render pass: whole-frame shake first, then sprite layers, then
        // gizmo overlays
        .add_systems(
            Update,
            (
                render::apply_screen_shake,
                render::sync_stage_sprites,
                render::update_target_sprite,
                render::update_projectile_sprite,
                render::draw_overlays,
            )
                .chain(),
        )
        .run();
}

/// Spawn the camera and the fixed stage sprites. Sizes and positions are
/// filled in by the render sync systems on the first frame.
fn setup(mut commands: Commands) {
    commands.spawn((Camera2d, Transform::from_xyz(0.0, 0.0, 0.0)));

    commands.spawn((
        Sprite::from_color(BACKGROUND_COLOR, DEFAULT_SURFACE_SIZE),
        Transform::default(),
        BackgroundSprite,
    ));
    commands.spawn((
        Sprite::from_color(AMBIENCE_COLOR, Vec2::ONE),
        Transform::default(),
        AmbienceSprite,
    ));
    commands.spawn((
        Sprite::from_color(GROUND_COLOR, Vec2::ONE),
        Transform::default(),
        GroundSprite,
    ));
    commands.spawn((
        Sprite::from_color(LAUNCHER_COLOR, Vec2::ONE),
        Transform::default(),
        LauncherSprite,
    ));
    commands.spawn((
        Sprite::from_color(TARGET_BASE_COLOR, Vec2::ONE),
        Transform::default(),
        TargetSprite,
    ));
    commands.spawn((
        Sprite::from_color(PROJECTILE_COLOR, Vec2::splat(PROJECTILE_RADIUS * 2.0)),
        Transform::default(),
        Visibility::Visible,
        ProjectileSprite,
    ));
}

/// Open the session log and record the active configuration
fn start_logging(mut logger: ResMut<EventLogger>, tweaks: Res<EngineTweaks>) {
    logger.start_session();
    logger.log_config(EngineConfig::snapshot(&tweaks));
}
