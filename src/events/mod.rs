//! Engine event system: outward notifications and session logging

pub mod bus;
pub mod logger;
pub mod types;

pub use bus::{BusEvent, EventBus, update_event_bus_time};
pub use logger::{
    EventBuffer, EventLogConfig, EventLogger, close_log_on_exit, drain_bus_to_buffer,
    drain_bus_to_logger, serialize_event,
};
pub use types::{EngineConfig, EngineEvent};
