//! Collision and projectile lifecycle
//!
//! Each frame the live projectile is tested against the target's bounding
//! box and the ground line. Either event deactivates it and schedules a
//! short delayed clear so the sprite lingers at the impact point before the
//! sling reloads. A fresh launch supersedes a still-pending clear.

use bevy::prelude::*;

use crate::catalog::{CurrentTarget, EquippedThrowable};
use crate::events::{EngineEvent, EventBus};
use crate::flight::{ActiveProjectile, Projectile, Trail};
use crate::layout::{StageGeometry, StageLayout};
use crate::mood::{self, ScreenShake, TargetAnimation};
use crate::effects::EffectPools;
use crate::tuning::EngineTweaks;

/// What ended a projectile's flight this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightOutcome {
    HitTarget,
    HitGround,
}

/// Countdown (seconds) until the resting projectile is cleared and the
/// sling reloads. `None` when nothing is scheduled.
#[derive(Resource, Default, Debug)]
pub struct PendingClear(pub Option<f32>);

/// Pure flight-termination test: target box first, then ground line
pub fn check_projectile(projectile: &Projectile, layout: &StageLayout) -> Option<FlightOutcome> {
    if layout.target.contains(projectile.pos) {
        Some(FlightOutcome::HitTarget)
    } else if projectile.pos.y >= layout.ground_y {
        Some(FlightOutcome::HitGround)
    } else {
        None
    }
}

/// Detect impacts, trigger the reaction layers and emit outward events
pub fn detect_impacts(
    geometry: Res<StageGeometry>,
    tweaks: Res<EngineTweaks>,
    equipped: Res<EquippedThrowable>,
    target: Res<CurrentTarget>,
    mut slot: ResMut<ActiveProjectile>,
    mut anim: ResMut<TargetAnimation>,
    mut shake: ResMut<ScreenShake>,
    mut pools: ResMut<EffectPools>,
    mut pending: ResMut<PendingClear>,
    mut bus: ResMut<EventBus>,
) {
    let Some(projectile) = slot.0.as_mut() else {
        return;
    };
    if !projectile.active {
        return;
    }

    let layout = geometry.0;
    let Some(outcome) = check_projectile(projectile, &layout) else {
        return;
    };

    projectile.active = false;
    pending.0 = Some(tweaks.clear_delay_secs);

    match outcome {
        FlightOutcome::HitTarget => {
            let impact = projectile.pos;
            let side = impact.x - layout.target.center().x;
            mood::apply_impact(&mut anim, &mut shake, equipped.weight, side, &tweaks);
            pools.spawn_burst(impact, equipped.weight, &mut rand::thread_rng());

            let time_ms = bus.elapsed_ms();
            bus.emit(EngineEvent::Hit {
                target_id: target.id.clone(),
                item_id: equipped.id.clone(),
                weight: equipped.weight,
                x: impact.x,
                y: impact.y,
                time_ms,
            });
        }
        FlightOutcome::HitGround => {
            // A miss: rest on the ground line, no reaction, no hit event
            projectile.pos.y = layout.ground_y;
            bus.emit(EngineEvent::Missed {
                item_id: equipped.id.clone(),
                x: projectile.pos.x,
            });
        }
    }
}

/// Tick the delayed clear; when it fires, free the slot and the trail
pub fn tick_pending_clear(
    time: Res<Time>,
    mut pending: ResMut<PendingClear>,
    mut slot: ResMut<ActiveProjectile>,
    mut trail: ResMut<Trail>,
) {
    let Some(remaining) = pending.0.as_mut() else {
        return;
    };
    *remaining -= time.delta_secs();
    if *remaining <= 0.0 {
        pending.0 = None;
        slot.0 = None;
        trail.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_stage_layout;

    fn projectile_at(pos: Vec2) -> Projectile {
        Projectile {
            pos,
            vel: Vec2::new(10.0, 2.0),
            lift: 0.0,
            drag: 0.0,
            wobble: 0.0,
            age: 5.0,
            active: true,
        }
    }

    #[test]
    fn detects_target_hit_inside_box() {
        let layout = compute_stage_layout(960.0, 600.0, 1.5);
        let p = projectile_at(layout.target.center());
        assert_eq!(check_projectile(&p, &layout), Some(FlightOutcome::HitTarget));
    }

    #[test]
    fn detects_ground_contact_below_line() {
        let layout = compute_stage_layout(960.0, 600.0, 1.5);
        let p = projectile_at(Vec2::new(100.0, layout.ground_y + 2.0));
        assert_eq!(check_projectile(&p, &layout), Some(FlightOutcome::HitGround));
    }

    #[test]
    fn mid_air_projectile_keeps_flying() {
        let layout = compute_stage_layout(960.0, 600.0, 1.5);
        let p = projectile_at(Vec2::new(300.0, 120.0));
        assert_eq!(check_projectile(&p, &layout), None);
    }

    #[test]
    fn target_hit_wins_over_ground_at_the_base() {
        let layout = compute_stage_layout(960.0, 600.0, 1.5);
        // The target's bottom edge sits on the ground line
        let base = Vec2::new(layout.target.center().x, layout.ground_y);
        let p = projectile_at(base);
        assert_eq!(check_projectile(&p, &layout), Some(FlightOutcome::HitTarget));
    }

    #[test]
    fn live_projectile_blocks_new_aim() {
        let mut slot = ActiveProjectile::default();
        assert!(!slot.is_live());
        slot.0 = Some(projectile_at(Vec2::new(10.0, 10.0)));
        assert!(slot.is_live());
        // Once deactivated (resting before clear), a new aim may begin
        slot.0.as_mut().unwrap().active = false;
        assert!(!slot.is_live());
    }
}
