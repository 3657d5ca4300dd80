//! Flingshot - A pointer-driven slingshot projectile engine built with Bevy
//!
//! This crate provides all engine resources, pure step functions, and systems
//! organized into modules.

// Core modules
pub mod constants;
pub mod events;
pub mod sim;
pub mod tuning;

// Engine logic modules
pub mod aim;
pub mod catalog;
pub mod collision;
pub mod effects;
pub mod flight;
pub mod layout;
pub mod mood;
pub mod render;

// Re-export commonly used types for convenience
pub use aim::{AimPhase, LaunchSolution, capture_pointer, clamp_aim_point, resolve_launch};
pub use catalog::{
    AimAssist, ArcClass, CurrentTarget, EquippedThrowable, Hype, ThrowablePhysics, WeightClass,
};
pub use collision::{
    FlightOutcome, PendingClear, check_projectile, detect_impacts, tick_pending_clear,
};
pub use constants::*;
pub use effects::{EffectPools, Particle, Shockwave, advance_effects};
pub use events::{
    BusEvent, EngineConfig, EngineEvent, EventBuffer, EventBus, EventLogConfig, EventLogger,
    close_log_on_exit, drain_bus_to_buffer, drain_bus_to_logger, serialize_event,
    update_event_bus_time,
};
pub use flight::{
    ActiveProjectile, Projectile, Trail, advance_projectile, frame_step, predict_path,
    step_projectile,
};
pub use layout::{
    StageGeometry, StageLayout, TargetBox, compute_stage_layout, refresh_stage_layout,
};
pub use mood::{
    Mood, ScreenShake, TargetAnimation, advance_target_animation, apply_impact, step_animation,
};
pub use render::{
    AmbienceSprite, BackgroundSprite, GroundSprite, LauncherSprite, ProjectileSprite, StageArt,
    TargetSprite, apply_screen_shake, draw_overlays, surface_to_world, sync_stage_sprites,
    update_projectile_sprite, update_target_sprite,
};
pub use sim::HeadlessAppBuilder;
pub use tuning::{
    EngineTuning, EngineTweaks, apply_global_tuning, load_engine_tuning_from_file,
    load_global_tuning_system,
};
