//! Throw Simulation Tool - Headless batch throws for tuning
//!
//! Runs randomized pulls through the full launch/flight/collision pipeline
//! without rendering and prints hit statistics per weight class.
//!
//! Usage:
//!   cargo run --bin simulate -- --throws 500
//!   cargo run --bin simulate -- --throws 200 --assist
//!   cargo run --bin simulate -- --arc high

use bevy::math::Vec2;
use rand::Rng;

use flingshot::catalog::{ArcClass, ThrowablePhysics, WeightClass};
use flingshot::collision::{FlightOutcome, check_projectile};
use flingshot::constants::*;
use flingshot::flight::{Projectile, step_projectile};
use flingshot::layout::compute_stage_layout;
use flingshot::tuning::EngineTweaks;
use flingshot::{clamp_aim_point, resolve_launch};

/// Safety bound on steps per throw (ideal frames)
const MAX_FLIGHT_STEPS: usize = 600;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let throws = args
        .iter()
        .position(|a| a == "--throws")
        .and_then(|i| args.get(i + 1).and_then(|s| s.parse::<usize>().ok()))
        .unwrap_or(200);
    let assist = args.iter().any(|a| a == "--assist");
    let arc = args
        .iter()
        .position(|a| a == "--arc")
        .and_then(|i| args.get(i + 1))
        .map(|s| match s.as_str() {
            "low" => ArcClass::Low,
            "high" => ArcClass::High,
            _ => ArcClass::Medium,
        })
        .unwrap_or(ArcClass::Medium);

    let layout = compute_stage_layout(DEFAULT_SURFACE_SIZE.x, DEFAULT_SURFACE_SIZE.y, 1.5);
    let tweaks = EngineTweaks::default();
    let physics = ThrowablePhysics::default();
    let blend = if assist { tweaks.aim_assist_blend } else { 0.0 };

    let mut rng = rand::thread_rng();

    println!(
        "Simulating {} throws per weight class (arc: {}, assist: {})",
        throws,
        arc.name(),
        assist
    );

    for weight in WeightClass::ALL {
        let mut hits = 0usize;
        let mut misses = 0usize;
        let mut too_weak = 0usize;
        let mut flew_off = 0usize;

        for _ in 0..throws {
            // Random pull somewhere back and down of the anchor, the way a
            // player would draw
            let raw = layout.anchor
                + Vec2::new(
                    rng.gen_range(-AIM_ENVELOPE_LEFT..0.0),
                    rng.gen_range(0.0..AIM_ENVELOPE_DOWN),
                );
            let point = clamp_aim_point(raw, &layout);

            let Some(solution) =
                resolve_launch(point, &layout, arc, weight, &physics, blend, &tweaks)
            else {
                too_weak += 1;
                continue;
            };

            let mut projectile = Projectile::from_solution(&solution);
            let mut outcome = None;
            for _ in 0..MAX_FLIGHT_STEPS {
                step_projectile(&mut projectile, tweaks.gravity, 1.0);
                outcome = check_projectile(&projectile, &layout);
                if outcome.is_some() || projectile.pos.x > layout.width || projectile.pos.x < 0.0 {
                    break;
                }
            }

            match outcome {
                Some(FlightOutcome::HitTarget) => hits += 1,
                Some(FlightOutcome::HitGround) => misses += 1,
                None => flew_off += 1,
            }
        }

        let landed = hits + misses + flew_off;
        let rate = if landed > 0 {
            100.0 * hits as f32 / landed as f32
        } else {
            0.0
        };
        println!(
            "  {:>6}: {:>5.1}% hit ({} hit / {} ground / {} off-surface / {} too weak)",
            weight.name(),
            rate,
            hits,
            misses,
            flew_off,
            too_weak
        );
    }
}
