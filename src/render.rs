//! Render orchestration
//!
//! Draws the stage back-to-front every frame: background → ambience →
//! ground → launcher → target (bob/tilt/squash transform, mood tint) →
//! contact shadow → sling cord → prediction dots or motion trail →
//! projectile → shockwaves → particles. A whole-frame shake offset is
//! applied through the camera before any layer and re-randomized per frame.
//!
//! Simulation state is in surface space (y-down); this module owns the
//! conversion into Bevy's y-up world space.

use bevy::prelude::*;
use rand::Rng;

use crate::aim::{AimPhase, resolve_launch};
use crate::catalog::{AimAssist, EquippedThrowable, Hype};
use crate::constants::*;
use crate::effects::EffectPools;
use crate::flight::{ActiveProjectile, Trail, predict_path};
use crate::layout::{StageGeometry, StageLayout};
use crate::mood::{Mood, ScreenShake, TargetAnimation};
use crate::tuning::EngineTweaks;

// Sprite z-layers, back to front
pub const Z_BACKGROUND: f32 = 0.0;
pub const Z_AMBIENCE: f32 = 1.0;
pub const Z_GROUND: f32 = 2.0;
pub const Z_LAUNCHER: f32 = 3.0;
pub const Z_TARGET: f32 = 4.0;
pub const Z_PROJECTILE: f32 = 6.0;

/// Marker components for the fixed stage sprites
#[derive(Component)]
pub struct BackgroundSprite;
#[derive(Component)]
pub struct AmbienceSprite;
#[derive(Component)]
pub struct GroundSprite;
#[derive(Component)]
pub struct LauncherSprite;
#[derive(Component)]
pub struct TargetSprite;
#[derive(Component)]
pub struct ProjectileSprite;

/// Renderable art provided by collaborators. `None` (or a still-decoding
/// handle) falls back to placeholder shapes; later frames retry.
#[derive(Resource, Default)]
pub struct StageArt {
    pub target_image: Option<Handle<Image>>,
    pub projectile_image: Option<Handle<Image>>,
}

/// Surface space (y-down, top-left origin) to world space (y-up, centered)
pub fn surface_to_world(layout: &StageLayout, p: Vec2) -> Vec2 {
    Vec2::new(p.x - layout.width / 2.0, layout.height / 2.0 - p.y)
}

/// Re-randomize the shake offset within the current magnitude and apply it
/// to the camera, shifting the entire frame.
pub fn apply_screen_shake(
    mut shake: ResMut<ScreenShake>,
    mut cameras: Query<&mut Transform, With<Camera2d>>,
) {
    let mut rng = rand::thread_rng();
    shake.offset = if shake.magnitude > 0.0 {
        Vec2::new(
            rng.gen_range(-shake.magnitude..shake.magnitude),
            rng.gen_range(-shake.magnitude..shake.magnitude),
        )
    } else {
        Vec2::ZERO
    };

    for mut transform in &mut cameras {
        transform.translation.x = shake.offset.x;
        transform.translation.y = shake.offset.y;
    }
}

/// Keep the fixed stage sprites in sync with the current layout
pub fn sync_stage_sprites(
    geometry: Res<StageGeometry>,
    mut sprites: ParamSet<(
        Query<(&mut Transform, &mut Sprite), With<BackgroundSprite>>,
        Query<(&mut Transform, &mut Sprite), With<AmbienceSprite>>,
        Query<(&mut Transform, &mut Sprite), With<GroundSprite>>,
        Query<(&mut Transform, &mut Sprite), With<LauncherSprite>>,
    )>,
) {
    if !geometry.is_changed() {
        return;
    }
    let layout = geometry.0;

    for (mut transform, mut sprite) in sprites.p0().iter_mut() {
        sprite.custom_size = Some(Vec2::new(layout.width, layout.height));
        transform.translation = Vec3::new(0.0, 0.0, Z_BACKGROUND);
    }

    // Ambience band behind the target (crowd silhouette strip)
    let band_height = layout.height * 0.22;
    for (mut transform, mut sprite) in sprites.p1().iter_mut() {
        sprite.custom_size = Some(Vec2::new(layout.width, band_height));
        let center = surface_to_world(
            &layout,
            Vec2::new(layout.width / 2.0, layout.ground_y - band_height / 2.0),
        );
        transform.translation = center.extend(Z_AMBIENCE);
    }

    let ground_height = layout.height - layout.ground_y;
    for (mut transform, mut sprite) in sprites.p2().iter_mut() {
        sprite.custom_size = Some(Vec2::new(layout.width, ground_height));
        let center = surface_to_world(
            &layout,
            Vec2::new(layout.width / 2.0, layout.ground_y + ground_height / 2.0),
        );
        transform.translation = center.extend(Z_GROUND);
    }

    for (mut transform, mut sprite) in sprites.p3().iter_mut() {
        sprite.custom_size = Some(Vec2::new(10.0, LAUNCHER_POST_HEIGHT));
        let center = surface_to_world(
            &layout,
            Vec2::new(layout.anchor.x, layout.anchor.y + LAUNCHER_POST_HEIGHT / 2.0),
        );
        transform.translation = center.extend(Z_LAUNCHER);
    }
}

/// Position and tint the target: idle bob and sway, impact tilt, squash
/// deformation and mood-dependent color.
pub fn update_target_sprite(
    time: Res<Time>,
    geometry: Res<StageGeometry>,
    anim: Res<TargetAnimation>,
    art: Res<StageArt>,
    images: Res<Assets<Image>>,
    mut targets: Query<(&mut Transform, &mut Sprite), With<TargetSprite>>,
) {
    let layout = geometry.0;
    let target = layout.target;
    let (bob, sway) = anim.idle_motion(time.elapsed_secs());

    for (mut transform, mut sprite) in &mut targets {
        let center = surface_to_world(&layout, target.center() + Vec2::new(0.0, bob));
        transform.translation = center.extend(Z_TARGET);
        // Surface-space tilt is clockwise-positive; world space flips it
        transform.rotation = Quat::from_rotation_z(-(anim.tilt + sway));
        transform.scale = Vec3::new(
            1.0 + anim.squash * 0.18,
            1.0 - anim.squash * 0.28,
            1.0,
        );

        let loaded = art
            .target_image
            .as_ref()
            .filter(|handle| images.contains(*handle));
        let base = match loaded {
            Some(handle) => {
                sprite.image = handle.clone();
                Color::WHITE
            }
            None => TARGET_BASE_COLOR, // Placeholder until the image decodes
        };
        sprite.custom_size = Some(Vec2::new(target.width, target.height));

        let base_rgba = base.to_srgba();
        let mood_tinted = match anim.mood {
            Mood::Idle => base_rgba,
            Mood::Flinch => Srgba::new(
                base_rgba.red,
                base_rgba.green * 0.8,
                base_rgba.blue * 0.8,
                base_rgba.alpha,
            ),
            Mood::Stunned => Srgba::new(
                base_rgba.red * 0.75,
                base_rgba.green * 0.75,
                base_rgba.blue,
                base_rgba.alpha,
            ),
        };
        // Hit flash blends toward white
        let f = anim.hit_flash.clamp(0.0, 1.0);
        sprite.color = Color::srgba(
            mood_tinted.red + (1.0 - mood_tinted.red) * f,
            mood_tinted.green + (1.0 - mood_tinted.green) * f,
            mood_tinted.blue + (1.0 - mood_tinted.blue) * f,
            mood_tinted.alpha,
        );
    }
}

/// Position the projectile sprite: in flight it faces its velocity, while
/// aiming it rides the pouch, otherwise it rests loaded in the sling.
pub fn update_projectile_sprite(
    geometry: Res<StageGeometry>,
    slot: Res<ActiveProjectile>,
    phase: Res<AimPhase>,
    equipped: Res<EquippedThrowable>,
    art: Res<StageArt>,
    images: Res<Assets<Image>>,
    mut sprites: Query<(&mut Transform, &mut Sprite, &mut Visibility), With<ProjectileSprite>>,
) {
    let layout = geometry.0;

    for (mut transform, mut sprite, mut visibility) in &mut sprites {
        let (pos, rotation) = match (&slot.0, *phase) {
            (Some(projectile), _) => {
                let world_dir = Vec2::new(projectile.vel.x, -projectile.vel.y);
                let angle = if projectile.active && world_dir.length_squared() > 1e-6 {
                    world_dir.y.atan2(world_dir.x)
                } else {
                    0.0
                };
                (projectile.pos, angle)
            }
            (None, AimPhase::Aiming { point }) => (point, 0.0),
            (None, AimPhase::Idle) => (layout.rest_point, 0.0),
        };

        *visibility = Visibility::Visible;
        transform.translation = surface_to_world(&layout, pos).extend(Z_PROJECTILE);
        transform.rotation = Quat::from_rotation_z(rotation);

        let size = equipped
            .sprite_size
            .unwrap_or(Vec2::splat(PROJECTILE_RADIUS * 2.0));
        sprite.custom_size = Some(size);
        match art
            .projectile_image
            .as_ref()
            .filter(|handle| images.contains(*handle))
        {
            Some(handle) => {
                sprite.image = handle.clone();
                sprite.color = Color::WHITE;
            }
            None => sprite.color = PROJECTILE_COLOR,
        }
    }
}

/// Gizmo overlays, drawn in back-to-front order: contact shadow, sling
/// cord, prediction dots or motion trail, shockwaves, particles.
pub fn draw_overlays(
    mut gizmos: Gizmos,
    geometry: Res<StageGeometry>,
    tweaks: Res<EngineTweaks>,
    equipped: Res<EquippedThrowable>,
    assist: Res<AimAssist>,
    hype: Res<Hype>,
    phase: Res<AimPhase>,
    slot: Res<ActiveProjectile>,
    trail: Res<Trail>,
    pools: Res<EffectPools>,
) {
    let layout = geometry.0;
    let hype = hype.clamped();

    // Target contact shadow on the ground line
    let shadow_center = surface_to_world(
        &layout,
        Vec2::new(layout.target.center().x, layout.ground_y),
    );
    gizmos.ellipse_2d(
        Isometry2d::from_translation(shadow_center),
        Vec2::new(layout.target.width * 0.55, 6.0),
        SHADOW_COLOR,
    );

    // Sling cord: both fork tips to the pouch (live pointer while aiming,
    // rest point otherwise)
    let pouch = match *phase {
        AimPhase::Aiming { point } => point,
        AimPhase::Idle => layout.rest_point,
    };
    let pouch_w = surface_to_world(&layout, pouch);
    gizmos.line_2d(surface_to_world(&layout, layout.fork_left), pouch_w, CORD_COLOR);
    gizmos.line_2d(surface_to_world(&layout, layout.fork_right), pouch_w, CORD_COLOR);

    // While aiming: dotted prediction path. While in flight: motion trail.
    if let AimPhase::Aiming { point } = *phase {
        let blend = if assist.0 { tweaks.aim_assist_blend } else { 0.0 };
        if let Some(solution) = resolve_launch(
            point,
            &layout,
            equipped.arc,
            equipped.weight,
            &equipped.physics,
            blend,
            &tweaks,
        ) {
            for (i, p) in predict_path(&solution, &layout, tweaks.gravity)
                .iter()
                .enumerate()
            {
                // Every third step keeps the preview dotted
                if i % 3 == 0 {
                    gizmos.circle_2d(surface_to_world(&layout, *p), 2.5, PREDICTION_DOT_COLOR);
                }
            }
        }
    } else if slot.0.as_ref().is_some_and(|p| p.active) {
        let len = trail.len().max(1) as f32;
        let max_alpha = 0.2 + 0.5 * hype;
        for (i, p) in trail.iter().enumerate() {
            let fade = (i as f32 + 1.0) / len;
            gizmos.circle_2d(
                surface_to_world(&layout, *p),
                PROJECTILE_RADIUS * 0.45 * fade,
                PROJECTILE_COLOR.with_alpha(max_alpha * fade),
            );
        }
    }

    // Shockwaves: expanding, fading rings. Gizmos alpha-blend, so the
    // additive glow is approximated by pushing lightness up while the ring
    // is young.
    for wave in pools.shockwaves() {
        let color = Color::hsla(
            wave.weight.particle_hue(),
            0.8,
            0.6 + 0.2 * hype + 0.15 * wave.opacity(),
            wave.opacity() * 0.8,
        );
        gizmos.circle_2d(surface_to_world(&layout, wave.origin), wave.radius(), color);
    }

    // Particles: small filled-ish dots, brightness modulated by hype and
    // remaining life (same alpha-blend stand-in as the rings)
    for particle in pools.particles() {
        let life_left = 1.0 - (particle.age / particle.life).clamp(0.0, 1.0);
        let color = Color::hsla(
            particle.hue,
            0.85,
            0.45 + 0.3 * hype + 0.1 * life_left,
            0.15 + 0.85 * life_left,
        );
        gizmos.circle_2d(
            surface_to_world(&layout, particle.pos),
            particle.size * 0.5,
            color,
        );
    }
}
