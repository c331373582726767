//! In-memory log capture for the TUI log strip.
//!
//! [`LogStore`] is a `tracing` layer that keeps the most recent events in a
//! bounded buffer; [`LogView`] is a cloneable read handle the TUI polls on
//! every redraw.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// A single captured log line.
#[derive(Debug, Clone)]
pub struct LogLine {
    /// Seconds since the store was created.
    pub elapsed_secs: f64,
    /// Log level.
    pub level: Level,
    /// Target module path.
    pub target: String,
    /// The formatted message.
    pub message: String,
}

#[derive(Debug)]
struct Shared {
    lines: VecDeque<LogLine>,
    capacity: usize,
    start: Instant,
}

impl Shared {
    fn push(&mut self, level: Level, target: String, message: String) {
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(LogLine {
            elapsed_secs: self.start.elapsed().as_secs_f64(),
            level,
            target,
            message,
        });
    }
}

/// A `tracing` layer that retains the most recent log lines in memory.
#[derive(Debug, Clone)]
pub struct LogStore {
    shared: Arc<Mutex<Shared>>,
}

impl LogStore {
    /// Create a new store that retains up to `capacity` lines.
    pub fn new(capacity: usize) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                lines: VecDeque::with_capacity(capacity),
                capacity,
                start: Instant::now(),
            })),
        }
    }

    /// Get a read handle over the captured lines.
    pub fn view(&self) -> LogView {
        LogView {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: Subscriber> Layer<S> for LogStore {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = *metadata.level();
        let target = metadata.target().to_string();

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        if let Ok(mut shared) = self.shared.lock() {
            shared.push(level, target, visitor.message);
        }
    }
}

/// A read handle over the captured log lines.
#[derive(Debug, Clone)]
pub struct LogView {
    shared: Arc<Mutex<Shared>>,
}

impl LogView {
    /// The last `n` lines, oldest first.
    pub fn recent(&self, n: usize) -> Vec<LogLine> {
        self.shared
            .lock()
            .map(|shared| {
                shared
                    .lines
                    .iter()
                    .skip(shared.lines.len().saturating_sub(n))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The number of lines currently retained.
    pub fn len(&self) -> usize {
        self.shared.lock().map(|shared| shared.lines.len()).unwrap_or(0)
    }

    /// Whether nothing has been captured yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Visitor that extracts the `message` field from a tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}
