//! Bridge from `tracing` events into a [`Logger`]

use std::fmt;

use tracing::field::{Field as TracingField, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::field::Field;
use crate::level::Level;
use crate::logger::Logger;
use crate::sink::Caller;
use crate::{registry, trace};

/// Events from this crate are never forwarded
const OWN_TARGET: &str = "fanlog";

/// `tracing_subscriber` layer forwarding events to a logger
///
/// The event's `message` becomes the record message and every other field a
/// record field. Without an explicit logger the active default logger is
/// used at the time of each event.
///
/// ```no_run
/// use tracing_subscriber::prelude::*;
///
/// tracing_subscriber::registry()
///     .with(fanlog::LoggerLayer::default())
///     .init();
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoggerLayer {
    logger: Option<Logger>,
}

impl LoggerLayer {
    /// Forward to `logger`
    pub fn new(logger: Logger) -> Self {
        Self {
            logger: Some(logger),
        }
    }
}

impl<S: Subscriber> Layer<S> for LoggerLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if meta.target().starts_with(OWN_TARGET) {
            return;
        }

        let level = level_from(*meta.level());
        if level == Level::Trace && !trace::trace_enabled() {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let caller = meta
            .file()
            .zip(meta.line())
            .map(|(file, line)| Caller { file, line });
        let emit = |logger: &Logger| {
            logger.log_record(
                level,
                caller,
                meta.module_path(),
                format_args!("{}", visitor.message),
                &visitor.fields,
            );
        };

        match &self.logger {
            Some(logger) => emit(logger),
            None => registry::with_default(emit),
        }
    }
}

fn level_from(level: tracing::Level) -> Level {
    match level {
        tracing::Level::TRACE => Level::Trace,
        tracing::Level::DEBUG => Level::Debug,
        tracing::Level::INFO => Level::Info,
        tracing::Level::WARN => Level::Warn,
        _ => Level::Error,
    }
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: Vec<Field>,
}

impl EventVisitor {
    fn push(&mut self, field: &TracingField, value: impl Into<serde_json::Value>) {
        self.fields.push(Field::new(field.name(), value));
    }
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &TracingField, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push(field, value);
        }
    }

    fn record_i64(&mut self, field: &TracingField, value: i64) {
        self.push(field, value);
    }

    fn record_u64(&mut self, field: &TracingField, value: u64) {
        self.push(field, value);
    }

    fn record_f64(&mut self, field: &TracingField, value: f64) {
        self.push(field, value);
    }

    fn record_bool(&mut self, field: &TracingField, value: bool) {
        self.push(field, value);
    }

    fn record_debug(&mut self, field: &TracingField, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push(field, format!("{value:?}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputConfig;
    use crate::logger::Options;
    use crate::writer::build_sink;
    use parking_lot::Mutex;
    use std::io::{self, Write};
    use std::sync::Arc;
    use tracing_subscriber::fmt::writer::BoxMakeWriter;
    use tracing_subscriber::layer::SubscriberExt;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn json_logger() -> (Logger, Buffer) {
        let buf = Buffer::default();
        let writer = buf.clone();
        let output = OutputConfig {
            formatter: "json".to_string(),
            format_config: crate::config::FormatConfig {
                function_key: "F".to_string(),
                ..Default::default()
            },
            ..OutputConfig::new("memory")
        };
        let sink = build_sink(&output, BoxMakeWriter::new(move || writer.clone())).unwrap();
        (Logger::from_sinks([sink], Options::default()), buf)
    }

    #[test]
    fn forwards_message_and_fields() {
        let (logger, buf) = json_logger();
        let subscriber = tracing_subscriber::registry().with(LoggerLayer::new(logger));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "app::db", rows = 3_u64, table = "users", "slow query");
        });

        let line = String::from_utf8(buf.0.lock().clone()).unwrap();
        let obj: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(obj["L"], "WARN");
        assert_eq!(obj["M"], "slow query");
        assert_eq!(obj["rows"], 3);
        assert_eq!(obj["table"], "users");
        assert!(obj["F"].as_str().unwrap().ends_with("layer::tests"));
        assert!(obj["C"].as_str().unwrap().contains("layer.rs:"));
    }

    #[test]
    fn own_events_are_skipped() {
        let (logger, buf) = json_logger();
        let subscriber = tracing_subscriber::registry().with(LoggerLayer::new(logger));

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(target: "fanlog::internal", "feedback");
        });

        assert!(buf.0.lock().is_empty());
    }
}
