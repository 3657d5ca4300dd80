//! Event logger
//!
//! Persists bus events as JSON lines, one session per file. The in-memory
//! `EventBuffer` variant serves headless simulation runs with no file I/O.

use bevy::prelude::*;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use uuid::Uuid;

use super::bus::EventBus;
use super::types::{EngineConfig, EngineEvent};

/// One event as a compact JSONL line
pub fn serialize_event(time_ms: u32, event: &EngineEvent) -> String {
    serde_json::json!({
        "t": time_ms,
        "c": event.type_code(),
        "e": event,
    })
    .to_string()
}

/// Configuration for event logging
#[derive(Resource, Clone)]
pub struct EventLogConfig {
    /// Directory for log files
    pub log_dir: PathBuf,
    /// Whether logging is enabled
    pub enabled: bool,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            enabled: true,
        }
    }
}

/// Active event logger with file handle
#[derive(Resource)]
pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    session_id: String,
    config: EventLogConfig,
}

impl EventLogger {
    /// Create a new event logger (but don't open a file yet)
    pub fn new(config: EventLogConfig) -> Self {
        Self {
            writer: None,
            session_id: String::new(),
            config,
        }
    }

    /// Start a new log session: fresh UUID, fresh file, SessionStart line
    pub fn start_session(&mut self) {
        if !self.config.enabled {
            return;
        }

        self.session_id = Uuid::new_v4().to_string();
        let timestamp = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();

        if let Err(e) = std::fs::create_dir_all(&self.config.log_dir) {
            warn!("Failed to create log directory: {}", e);
            return;
        }

        let filename = format!(
            "{}_{}.evlog",
            chrono::Local::now().format("%Y%m%d_%H%M%S"),
            &self.session_id[..8]
        );
        let path = self.config.log_dir.join(filename);

        match OpenOptions::new().create(true).write(true).truncate(true).open(&path) {
            Ok(file) => {
                self.writer = Some(BufWriter::new(file));
                info!(
                    "Event logging started: {} (session: {})",
                    path.display(),
                    &self.session_id[..8]
                );
                self.log(
                    0,
                    &EngineEvent::SessionStart {
                        session_id: self.session_id.clone(),
                        timestamp,
                    },
                );
            }
            Err(e) => {
                warn!("Failed to open event log: {}", e);
            }
        }
    }

    /// Log the engine configuration (call after start_session)
    pub fn log_config(&mut self, config: EngineConfig) {
        self.log(0, &EngineEvent::Config(config));
    }

    /// Get the current session ID
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// End the current log session
    pub fn end_session(&mut self) {
        if let Some(mut writer) = self.writer.take()
            && let Err(e) = writer.flush()
        {
            warn!("Failed to flush event log: {}", e);
        }
    }

    /// Log a single event
    pub fn log(&mut self, time_ms: u32, event: &EngineEvent) {
        let Some(writer) = &mut self.writer else {
            return;
        };
        if let Err(e) = writeln!(writer, "{}", serialize_event(time_ms, event)) {
            warn!("Failed to write event: {}", e);
        }
    }

    /// Check if logging is active
    pub fn is_active(&self) -> bool {
        self.writer.is_some()
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(EventLogConfig::default())
    }
}

/// Drain the bus into the logger each frame
pub fn drain_bus_to_logger(mut bus: ResMut<EventBus>, mut logger: ResMut<EventLogger>) {
    if !bus.has_pending() {
        return;
    }
    for (time_ms, event) in bus.take_events() {
        logger.log(time_ms, &event);
    }
}

/// Flush and close the log when the app is shutting down
pub fn close_log_on_exit(mut exits: MessageReader<AppExit>, mut logger: ResMut<EventLogger>) {
    if exits.read().next().is_some() {
        logger.end_session();
    }
}

/// Simple in-memory event buffer for simulation (no file I/O)
#[derive(Resource, Default)]
pub struct EventBuffer {
    events: Vec<(u32, EngineEvent)>,
    session_id: String,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session with a fresh UUID
    pub fn start_session(&mut self) {
        self.clear();
        self.session_id = Uuid::new_v4().to_string();
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.session_id.clear();
    }

    pub fn log(&mut self, time_ms: u32, event: EngineEvent) {
        self.events.push((time_ms, event));
    }

    pub fn events(&self) -> &[(u32, EngineEvent)] {
        &self.events
    }

    /// Import events from the bus
    pub fn import_events(&mut self, events: Vec<(u32, EngineEvent)>) {
        self.events.extend(events);
    }

    /// Serialize all events to a log string
    pub fn serialize(&self) -> String {
        self.events
            .iter()
            .map(|(ts, e)| serialize_event(*ts, e))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Drain the bus into the in-memory buffer each frame (headless runs)
pub fn drain_bus_to_buffer(mut bus: ResMut<EventBus>, mut buffer: ResMut<EventBuffer>) {
    if bus.has_pending() {
        buffer.import_events(bus.take_events());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WeightClass;

    #[test]
    fn serialized_line_is_valid_json_with_code() {
        let event = EngineEvent::Launched {
            item_id: "boot".to_string(),
            weight: WeightClass::Light,
        };
        let line = serialize_event(420, &event);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["t"], 420);
        assert_eq!(value["c"], "L");
        assert!(value["e"]["Launched"]["item_id"] == "boot");
    }

    #[test]
    fn buffer_imports_bus_events() {
        let mut bus = EventBus::new();
        let mut buffer = EventBuffer::new();
        buffer.start_session();

        bus.update_time(2.0);
        bus.emit(EngineEvent::DrawStarted { x: 1.0, y: 2.0 });
        buffer.import_events(bus.take_events());

        assert_eq!(buffer.events().len(), 1);
        assert_eq!(buffer.events()[0].0, 2000);
        assert!(!buffer.session_id().is_empty());
        assert!(!bus.has_pending());

        // The buffer serializes to the same JSONL shape as the file log
        let value: serde_json::Value = serde_json::from_str(&buffer.serialize()).unwrap();
        assert_eq!(value["c"], "DS");
    }

    #[test]
    fn end_session_flushes_and_closes_the_file() {
        let dir = std::env::temp_dir().join(format!("flingshot-log-{}", Uuid::new_v4()));
        let mut logger = EventLogger::new(EventLogConfig {
            log_dir: dir.clone(),
            enabled: true,
        });

        logger.start_session();
        assert!(logger.is_active());
        logger.log(
            120,
            &EngineEvent::Launched {
                item_id: "boot".to_string(),
                weight: WeightClass::Medium,
            },
        );
        logger.end_session();
        assert!(!logger.is_active());

        // Everything logged before end_session is on disk
        let file = std::fs::read_dir(&dir)
            .unwrap()
            .next()
            .unwrap()
            .unwrap()
            .path();
        let contents = std::fs::read_to_string(file).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("SessionStart"));
        assert!(lines[1].contains("Launched"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
