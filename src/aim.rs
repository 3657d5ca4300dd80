//! Aiming: pointer capture and launch resolution
//!
//! Pointer input funnels into an explicit two-state machine: `Idle` until a
//! pointer-down is accepted, `Aiming` (which always carries the current
//! clamped pouch point) until release or cancel. Release converts the final
//! point into a `LaunchSolution`; a pull below the minimum is a cancelled
//! aim, not an error.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::catalog::{AimAssist, ArcClass, EquippedThrowable, ThrowablePhysics, WeightClass};
use crate::collision::PendingClear;
use crate::constants::*;
use crate::events::{EngineEvent, EventBus};
use crate::flight::{ActiveProjectile, Projectile, Trail};
use crate::layout::{StageGeometry, StageLayout};
use crate::tuning::EngineTweaks;

/// Everything needed to instantiate a projectile, computed once per throw
#[derive(Debug, Clone, Copy)]
pub struct LaunchSolution {
    pub start: Vec2,
    pub velocity: Vec2,
    pub lift: f32,
    pub drag: f32,
    pub wobble: f32,
}

/// Pointer-capture state machine. `Aiming` always has a valid pouch point.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub enum AimPhase {
    #[default]
    Idle,
    Aiming {
        point: Vec2,
    },
}

impl AimPhase {
    pub fn is_aiming(&self) -> bool {
        matches!(self, AimPhase::Aiming { .. })
    }
}

/// Clamp a raw pointer point to the aiming envelope around the anchor.
///
/// The point is limited to a maximum radius and to an anchor-relative
/// rectangle, so the sling visual and pull length stay within design limits
/// however far the pointer is dragged off-surface.
pub fn clamp_aim_point(raw: Vec2, layout: &StageLayout) -> Vec2 {
    let mut rel = raw - layout.anchor;
    let len = rel.length();
    if len > AIM_CLAMP_RADIUS {
        rel *= AIM_CLAMP_RADIUS / len;
    }
    rel.x = rel.x.clamp(-AIM_ENVELOPE_LEFT, AIM_ENVELOPE_RIGHT);
    rel.y = rel.y.clamp(-AIM_ENVELOPE_UP, AIM_ENVELOPE_DOWN);
    layout.anchor + rel
}

/// Resolve a release point into a launch solution.
///
/// Returns `None` when the pull is below the minimum (too-weak aim).
/// Direction gets the arc-class bias first, then the optional aim-assist
/// blend toward the target center; velocity is the negated pull direction
/// scaled by power, so pulling back and down launches forward and up.
pub fn resolve_launch(
    point: Vec2,
    layout: &StageLayout,
    arc: ArcClass,
    weight: WeightClass,
    physics: &ThrowablePhysics,
    assist_blend: f32,
    tweaks: &EngineTweaks,
) -> Option<LaunchSolution> {
    let pull = point - layout.anchor;
    let len = pull.length();
    if len < tweaks.min_pull {
        return None;
    }
    let clamped_len = len.min(tweaks.max_pull);

    let (bias_x, bias_y) = arc.bias();
    let mut dir = pull / len;
    dir.x *= bias_x;
    dir.y *= bias_y;
    dir = dir.normalize_or_zero();

    // Slingshot convention: flight direction opposes the pull
    let mut flight_dir = -dir;
    if assist_blend > 0.0 {
        let to_center = (layout.target.center() - layout.anchor).normalize_or_zero();
        flight_dir = flight_dir.lerp(to_center, assist_blend).normalize_or_zero();
    }

    let power = tweaks.base_power * weight.launch_modifier() * physics.power * clamped_len;

    Some(LaunchSolution {
        start: layout.anchor,
        velocity: flight_dir * power,
        lift: physics.lift,
        drag: physics.drag,
        wobble: physics.wobble,
    })
}

/// Pointer capture: drives the Idle/Aiming machine and launches on release.
///
/// Pointer-down is ignored entirely while a projectile is live. Escape (or a
/// release with no readable cursor) cancels the aim with no launch and no
/// event. A successful launch supersedes any pending delayed clear.
pub fn capture_pointer(
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    geometry: Res<StageGeometry>,
    tweaks: Res<EngineTweaks>,
    equipped: Res<EquippedThrowable>,
    assist: Res<AimAssist>,
    mut phase: ResMut<AimPhase>,
    mut slot: ResMut<ActiveProjectile>,
    mut trail: ResMut<Trail>,
    mut pending: ResMut<PendingClear>,
    mut bus: ResMut<EventBus>,
) {
    let layout = geometry.0;
    let cursor = windows.single().ok().and_then(|w| w.cursor_position());

    // Cancel event: aim discarded, nothing launched, nothing emitted
    if keyboard.just_pressed(KeyCode::Escape) && phase.is_aiming() {
        *phase = AimPhase::Idle;
        return;
    }

    match *phase {
        AimPhase::Idle => {
            if mouse.just_pressed(MouseButton::Left) && !slot.is_live() {
                if let Some(raw) = cursor {
                    let point = clamp_aim_point(raw, &layout);
                    *phase = AimPhase::Aiming { point };
                    bus.emit(EngineEvent::DrawStarted {
                        x: point.x,
                        y: point.y,
                    });
                }
            }
        }
        AimPhase::Aiming { point } => {
            let point = match cursor {
                Some(raw) => clamp_aim_point(raw, &layout),
                None => point, // Pointer off-surface: hold the last clamped point
            };

            if !mouse.just_released(MouseButton::Left) {
                *phase = AimPhase::Aiming { point };
                return;
            }

            *phase = AimPhase::Idle;
            if cursor.is_none() {
                return; // Released outside the surface: aborted aim
            }

            let blend = if assist.0 { tweaks.aim_assist_blend } else { 0.0 };
            let Some(solution) = resolve_launch(
                point,
                &layout,
                equipped.arc,
                equipped.weight,
                &equipped.physics,
                blend,
                &tweaks,
            ) else {
                return; // Below minimum pull: silently ignored
            };

            // Fresh launch supersedes a still-pending clear
            pending.0 = None;
            trail.clear();
            slot.0 = Some(Projectile::from_solution(&solution));
            bus.emit(EngineEvent::Launched {
                item_id: equipped.id.clone(),
                weight: equipped.weight,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{StageGeometry, compute_stage_layout};
    use bevy::math::DVec2;

    /// Minimal app around `capture_pointer` with the cursor parked at `cursor`
    /// and the left button freshly pressed.
    fn pointer_app(cursor: Vec2) -> bevy::app::App {
        let mut app = bevy::app::App::new();
        app.init_resource::<StageGeometry>();
        app.init_resource::<EngineTweaks>();
        app.init_resource::<EquippedThrowable>();
        app.init_resource::<AimAssist>();
        app.init_resource::<AimPhase>();
        app.init_resource::<ActiveProjectile>();
        app.init_resource::<Trail>();
        app.init_resource::<PendingClear>();
        app.insert_resource(EventBus::new());
        app.init_resource::<ButtonInput<KeyCode>>();

        let mut mouse = ButtonInput::<MouseButton>::default();
        mouse.press(MouseButton::Left);
        app.insert_resource(mouse);

        let mut window = Window::default();
        window.set_physical_cursor_position(Some(DVec2::new(cursor.x as f64, cursor.y as f64)));
        app.world_mut().spawn((window, bevy::window::PrimaryWindow));

        app.add_systems(bevy::app::Update, capture_pointer);
        app
    }

    #[test]
    fn pointer_down_with_free_slot_begins_an_aim() {
        let layout = StageGeometry::default().0;
        let cursor = layout.anchor + Vec2::new(-80.0, 120.0);
        let mut app = pointer_app(cursor);

        app.update();

        match *app.world().resource::<AimPhase>() {
            AimPhase::Aiming { point } => assert!((point - cursor).length() < 1e-3),
            AimPhase::Idle => panic!("press with a free slot should begin an aim"),
        }
        let bus = app.world().resource::<EventBus>();
        assert!(bus
            .peek()
            .iter()
            .any(|e| matches!(e.event, EngineEvent::DrawStarted { .. })));
    }

    #[test]
    fn pointer_down_while_projectile_is_live_is_a_no_op() {
        let layout = StageGeometry::default().0;
        let cursor = layout.anchor + Vec2::new(-80.0, 120.0);
        let mut app = pointer_app(cursor);

        let in_flight = Projectile {
            pos: Vec2::new(300.0, 200.0),
            vel: Vec2::new(14.0, -9.0),
            lift: 0.0,
            drag: 0.0,
            wobble: 0.0,
            age: 8.0,
            active: true,
        };
        app.world_mut().resource_mut::<ActiveProjectile>().0 = Some(in_flight);
        app.world_mut().resource_mut::<Trail>().push(in_flight.pos);

        app.update();

        // The gate swallowed the press: no aim, no events, flight untouched
        assert_eq!(*app.world().resource::<AimPhase>(), AimPhase::Idle);
        assert!(!app.world().resource::<EventBus>().has_pending());
        let slot = app.world().resource::<ActiveProjectile>();
        let projectile = slot.0.expect("projectile still in the slot");
        assert!(projectile.active);
        assert_eq!(projectile.pos, in_flight.pos);
        assert_eq!(projectile.vel, in_flight.vel);
        assert_eq!(app.world().resource::<Trail>().len(), 1);
    }

    fn default_setup() -> (StageLayout, EngineTweaks, ThrowablePhysics) {
        (
            compute_stage_layout(960.0, 600.0, 1.5),
            EngineTweaks::default(),
            ThrowablePhysics::default(),
        )
    }

    #[test]
    fn below_min_pull_yields_no_launch() {
        let (layout, tweaks, physics) = default_setup();
        let point = layout.anchor + Vec2::new(0.0, 5.0); // Pull distance 5 < MIN_PULL
        let solution = resolve_launch(
            point,
            &layout,
            ArcClass::Medium,
            WeightClass::Medium,
            &physics,
            0.0,
            &tweaks,
        );
        assert!(solution.is_none());
    }

    #[test]
    fn pull_straight_down_launches_straight_up() {
        let (layout, tweaks, physics) = default_setup();
        let point = layout.anchor + Vec2::new(0.0, 200.0);
        let solution = resolve_launch(
            point,
            &layout,
            ArcClass::Medium,
            WeightClass::Medium,
            &physics,
            0.0,
            &tweaks,
        )
        .unwrap();
        // Upward is negative y in surface space
        assert!(solution.velocity.y < 0.0);
        assert!(solution.velocity.x.abs() < 1e-4);
    }

    #[test]
    fn pull_length_is_clamped_to_max() {
        let (layout, tweaks, physics) = default_setup();
        let dir = Vec2::new(-0.6, 0.8);
        let near = resolve_launch(
            layout.anchor + dir * tweaks.max_pull,
            &layout,
            ArcClass::Medium,
            WeightClass::Medium,
            &physics,
            0.0,
            &tweaks,
        )
        .unwrap();
        let far = resolve_launch(
            layout.anchor + dir * (tweaks.max_pull * 3.0),
            &layout,
            ArcClass::Medium,
            WeightClass::Medium,
            &physics,
            0.0,
            &tweaks,
        )
        .unwrap();
        assert!((near.velocity.length() - far.velocity.length()).abs() < 1e-3);
    }

    #[test]
    fn power_scales_with_weight_class() {
        let (layout, tweaks, physics) = default_setup();
        let point = layout.anchor + Vec2::new(-80.0, 120.0);
        let speed = |weight| {
            resolve_launch(point, &layout, ArcClass::Medium, weight, &physics, 0.0, &tweaks)
                .unwrap()
                .velocity
                .length()
        };
        assert!(speed(WeightClass::Light) < speed(WeightClass::Medium));
        assert!(speed(WeightClass::Medium) < speed(WeightClass::Heavy));
    }

    #[test]
    fn high_arc_is_steeper_than_low_arc() {
        let (layout, tweaks, physics) = default_setup();
        let point = layout.anchor + Vec2::new(-100.0, 100.0);
        let slope = |arc| {
            let v = resolve_launch(point, &layout, arc, WeightClass::Medium, &physics, 0.0, &tweaks)
                .unwrap()
                .velocity;
            (v.y / v.x).abs()
        };
        assert!(slope(ArcClass::High) > slope(ArcClass::Medium));
        assert!(slope(ArcClass::Medium) > slope(ArcClass::Low));
    }

    #[test]
    fn aim_assist_nudges_toward_target_center() {
        let (layout, tweaks, physics) = default_setup();
        // Deliberately aim well above the target
        let point = layout.anchor + Vec2::new(-60.0, 160.0);
        let to_center = (layout.target.center() - layout.anchor).normalize();

        let raw = resolve_launch(
            point, &layout, ArcClass::Medium, WeightClass::Medium, &physics, 0.0, &tweaks,
        )
        .unwrap();
        let assisted = resolve_launch(
            point, &layout, ArcClass::Medium, WeightClass::Medium, &physics, AIM_ASSIST_BLEND,
            &tweaks,
        )
        .unwrap();

        let raw_dot = raw.velocity.normalize().dot(to_center);
        let assisted_dot = assisted.velocity.normalize().dot(to_center);
        assert!(assisted_dot > raw_dot);
        // Nudged, not auto-aimed
        assert!(assisted_dot < 0.999);
    }

    #[test]
    fn clamp_respects_radius_and_envelope() {
        let (layout, _, _) = default_setup();

        let far = layout.anchor + Vec2::new(0.0, 5000.0);
        let clamped = clamp_aim_point(far, &layout);
        assert!((clamped - layout.anchor).length() <= AIM_CLAMP_RADIUS + 1e-3);
        assert!(clamped.y - layout.anchor.y <= AIM_ENVELOPE_DOWN + 1e-3);

        let left = layout.anchor + Vec2::new(-5000.0, 0.0);
        let clamped = clamp_aim_point(left, &layout);
        assert!(layout.anchor.x - clamped.x <= AIM_ENVELOPE_LEFT + 1e-3);

        // A point inside the envelope is untouched
        let near = layout.anchor + Vec2::new(-40.0, 60.0);
        assert_eq!(clamp_aim_point(near, &layout), near);
    }
}
