//! Event bus - the engine's single outward channel
//!
//! Throw systems push `EngineEvent`s here; once per frame a sink system
//! takes everything pending (the file logger in the windowed app, the
//! in-memory buffer in headless runs). Events are fire-and-forget: nothing
//! flows back into the simulation. A disabled bus drops emissions outright
//! for runs that only inspect final state.

use bevy::prelude::*;

use super::types::EngineEvent;

/// An emitted event stamped with session-relative time
#[derive(Debug, Clone)]
pub struct BusEvent {
    /// Milliseconds since session start
    pub time_ms: u32,
    pub event: EngineEvent,
}

/// Outward notification queue, drained once per frame by a sink
#[derive(Resource, Default)]
pub struct EventBus {
    pending: Vec<BusEvent>,
    elapsed_ms: u32,
    enabled: bool,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    /// A bus that silently drops every emission
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Refresh the timestamp applied to subsequent emissions
    pub fn update_time(&mut self, elapsed_secs: f32) {
        self.elapsed_ms = (elapsed_secs * 1000.0) as u32;
    }

    /// Queue an event, stamped with the current session time
    pub fn emit(&mut self, event: EngineEvent) {
        if !self.enabled {
            return;
        }
        self.pending.push(BusEvent {
            time_ms: self.elapsed_ms,
            event,
        });
    }

    /// Look at what is queued without consuming it
    pub fn peek(&self) -> &[BusEvent] {
        &self.pending
    }

    /// Take everything pending as (time_ms, event) pairs, emptying the queue
    pub fn take_events(&mut self) -> Vec<(u32, EngineEvent)> {
        std::mem::take(&mut self.pending)
            .into_iter()
            .map(|e| (e.time_ms, e.event))
            .collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Session time of the most recent `update_time` call
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }
}

/// Keep the bus clock in step with app time. Runs ahead of every emitter.
pub fn update_event_bus_time(mut bus: ResMut<EventBus>, time: Res<Time>) {
    bus.update_time(time.elapsed_secs());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WeightClass;

    #[test]
    fn emissions_carry_the_session_clock() {
        let mut bus = EventBus::new();

        bus.update_time(0.75);
        bus.emit(EngineEvent::DrawStarted { x: 140.0, y: 390.0 });
        bus.update_time(2.25);
        bus.emit(EngineEvent::Launched {
            item_id: "default-shoe".to_string(),
            weight: WeightClass::Medium,
        });

        let events = bus.take_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].0, 750);
        assert_eq!(events[1].0, 2250);
        assert!(!bus.has_pending());
    }

    #[test]
    fn peek_does_not_consume() {
        let mut bus = EventBus::new();
        bus.emit(EngineEvent::Missed {
            item_id: "default-shoe".to_string(),
            x: 812.0,
        });
        assert_eq!(bus.peek().len(), 1);
        assert_eq!(bus.peek().len(), 1);
        assert!(bus.has_pending());
    }

    #[test]
    fn disabled_bus_drops_everything() {
        let mut bus = EventBus::disabled();
        assert!(!bus.is_enabled());
        bus.emit(EngineEvent::DrawStarted { x: 10.0, y: 20.0 });
        assert!(!bus.has_pending());
        assert!(bus.take_events().is_empty());
    }

    #[test]
    fn hit_payload_survives_the_queue() {
        let mut bus = EventBus::new();
        bus.emit(EngineEvent::Hit {
            target_id: "target-0".to_string(),
            item_id: "default-shoe".to_string(),
            weight: WeightClass::Heavy,
            x: 640.0,
            y: 410.0,
            time_ms: 0,
        });

        let events = bus.take_events();
        match &events[0].1 {
            EngineEvent::Hit { target_id, weight, x, .. } => {
                assert_eq!(target_id, "target-0");
                assert_eq!(*weight, WeightClass::Heavy);
                assert_eq!(*x, 640.0);
            }
            other => panic!("expected a hit event, got {:?}", other),
        }
    }
}
