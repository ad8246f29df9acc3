//! Integration tests for fanlog
//!
//! These tests drive composition, dispatch and plugins through the public
//! API. The default logger is process-wide, so tests touching it hold
//! `TEST_LOCK`.

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, Mutex};

use fanlog::decoder::{ConfigDecoder, OutputDecoder};
use fanlog::plugin::{self, Decoder, Factory, LOG_PLUGIN_TYPE, downcast_decoder};
use fanlog::writer::{self, build_sink};
use fanlog::{Config, Level, LogContext, LogError, LogResult, Logger, OutputConfig, registry};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

// Serialization lock for tests using the default logger
static TEST_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

static NEXT_WRITER: AtomicUsize = AtomicUsize::new(0);

#[derive(Clone, Default)]
struct Buffer(Arc<parking_lot::Mutex<Vec<u8>>>);

impl Buffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().clone()).unwrap()
    }

    fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer plugin capturing output in memory
struct MemoryWriter(Buffer);

impl Factory for MemoryWriter {
    fn type_name(&self) -> &str {
        LOG_PLUGIN_TYPE
    }

    fn setup(&self, _name: &str, decoder: &mut dyn Decoder) -> LogResult<()> {
        let decoder = downcast_decoder::<OutputDecoder>(decoder)?;
        let mut output = OutputConfig::default();
        decoder.decode(&mut output)?;

        let buf = self.0.clone();
        decoder.set_sink(build_sink(&output, BoxMakeWriter::new(move || buf.clone()))?);
        Ok(())
    }
}

/// Register a fresh memory writer and return its name and buffer
fn memory_writer() -> (String, Buffer) {
    let name = format!("memory-{}", NEXT_WRITER.fetch_add(1, Ordering::Relaxed));
    let buf = Buffer::default();
    writer::register_writer(&name, Arc::new(MemoryWriter(buf.clone())));
    (name, buf)
}

fn output(writer: &str, level: &str) -> OutputConfig {
    OutputConfig {
        level: level.to_string(),
        ..OutputConfig::new(writer)
    }
}

#[test]
fn test_fan_out_to_every_output() {
    let (console, console_buf) = memory_writer();
    let (json, json_buf) = memory_writer();
    let config = Config::new([
        output(&console, "debug"),
        OutputConfig {
            formatter: "json".to_string(),
            ..output(&json, "warn")
        },
    ]);

    let logger = Logger::from_config(&config).unwrap();
    assert_eq!(logger.sink_count(), config.len());

    logger.debug("debug line");
    logger.warnf(format_args!("disk at {}%", 91));

    assert_eq!(console_buf.lines().len(), 2);
    let json_lines = json_buf.lines();
    assert_eq!(json_lines.len(), 1);
    let obj: serde_json::Value = serde_json::from_str(&json_lines[0]).unwrap();
    assert_eq!(obj["M"], "disk at 91%");
    assert_eq!(obj["L"], "WARN");
}

#[test]
fn test_unregistered_writer_fails_composition() {
    let (name, buf) = memory_writer();
    let config = Config::new([output(&name, "debug"), output("not-registered", "debug")]);

    let err = Logger::from_config(&config).unwrap_err();
    assert!(matches!(err, LogError::WriterNotFound(ref w) if w == "not-registered"));
    assert!(err.is_config_error());
    assert!(buf.contents().is_empty());
}

#[test]
fn test_runtime_level_control() {
    let (a, a_buf) = memory_writer();
    let (b, b_buf) = memory_writer();
    let logger = Logger::from_config(&Config::new([output(&a, "info"), output(&b, "info")])).unwrap();

    logger.set_level("1", Level::Error);
    logger.set_level("7", Level::Error);
    logger.set_level("x", Level::Error);
    logger.info("hello");

    assert_eq!(logger.get_level("0"), Level::Info);
    assert_eq!(logger.get_level("1"), Level::Error);
    assert_eq!(logger.get_level("7"), Level::Debug);
    assert!(a_buf.contents().contains("hello"));
    assert!(b_buf.contents().is_empty());
}

#[test]
fn test_default_logger_last_registration_wins() {
    let _guard = TEST_LOCK.lock().unwrap();
    let (first, first_buf) = memory_writer();
    let (second, second_buf) = memory_writer();

    fanlog::init_with(&Config::new([output(&first, "debug")])).unwrap();
    fanlog::init_with(&Config::new([output(&second, "debug")])).unwrap();

    fanlog::info("to the active default");
    fanlog::errorln("with newline");

    assert!(first_buf.contents().is_empty());
    let out = second_buf.contents();
    assert!(out.contains("to the active default"));
    assert!(out.contains("with newline\n"));
    assert!(out.contains("integration_tests.rs:"), "{out}");
    assert_eq!(
        registry::get(registry::DEFAULT_LOGGER_NAME).map(|l| l.sink_count()),
        Some(1)
    );
}

#[test]
fn test_free_level_functions_use_default() {
    let _guard = TEST_LOCK.lock().unwrap();
    let (name, buf) = memory_writer();
    fanlog::set_default(Logger::from_config(&Config::new([output(&name, "info")])).unwrap());

    fanlog::debug("filtered");
    fanlog::set_level("0", Level::Debug);
    assert_eq!(fanlog::get_level("0"), Level::Debug);
    fanlog::debug("accepted");
    fanlog::with([("request", "r-1")]).info("scoped");

    let out = buf.contents();
    assert!(!out.contains("filtered"));
    assert!(out.contains("accepted"));
    assert!(out.contains(r#"{"request":"r-1"}"#));
    assert_eq!(
        fanlog::with_fields(&[]).caller_skip(),
        fanlog::default_logger().caller_skip() - 1
    );
}

#[test]
fn test_context_variants() {
    let _guard = TEST_LOCK.lock().unwrap();
    let (default_name, default_buf) = memory_writer();
    let (scoped_name, scoped_buf) = memory_writer();
    fanlog::set_default(Logger::from_config(&Config::new([output(&default_name, "debug")])).unwrap());
    let scoped = Logger::from_config(&Config::new([output(&scoped_name, "debug")])).unwrap();

    let ctx = LogContext::with_logger(scoped.clone());
    fanlog::info_context(&ctx, "inside request");
    fanlog::warnf_context(&LogContext::new(), format_args!("outside {}", "request"));
    fanlog::with_context(&ctx, [("user", 7)]).info("scoped fields");

    assert!(scoped_buf.contents().contains("inside request"));
    assert!(scoped_buf.contents().contains(r#"{"user":7}"#));
    assert!(default_buf.contents().contains("outside request"));
    assert!(!default_buf.contents().contains("inside request"));
    assert_eq!(
        fanlog::with_fields_context(&ctx, &[]).caller_skip(),
        scoped.caller_skip() - 1
    );
}

#[test]
fn test_macros_record_module() {
    let _guard = TEST_LOCK.lock().unwrap();
    let (name, buf) = memory_writer();
    let config = Config::new([OutputConfig {
        formatter: "json".to_string(),
        format_config: fanlog::FormatConfig {
            function_key: "func".to_string(),
            ..Default::default()
        },
        ..output(&name, "debug")
    }]);
    let logger = Logger::from_config(&config).unwrap();
    fanlog::set_default(logger.clone());

    let port = 8080;
    fanlog::info!("listening on {port}");
    fanlog::warn!(logger: logger, "explicit {}", "logger");
    fanlog::error!(ctx: &LogContext::with_logger(logger.clone()), "from context");

    let lines = buf.lines();
    assert_eq!(lines.len(), 3);
    for (line, msg) in lines.iter().zip(["listening on 8080", "explicit logger", "from context"]) {
        let obj: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(obj["M"], msg);
        assert_eq!(obj["func"], "integration_tests");
    }
}

#[test]
fn test_trace_gate_closed_by_default() {
    if fanlog::trace::trace_enabled() {
        return;
    }
    let (name, buf) = memory_writer();
    let logger = Logger::from_config(&Config::new([output(&name, "trace")])).unwrap();
    let ctx = LogContext::with_logger(logger.clone());

    logger.trace("method");
    logger.tracef(format_args!("formatted"));
    fanlog::trace_context(&ctx, "context");
    fanlog::trace!(logger: logger, "macro");
    logger.debug("debug still flows");

    assert_eq!(buf.lines().len(), 1);
}

#[test]
fn test_logger_plugin_registers_named_logger() {
    let (name, buf) = memory_writer();
    let factory = plugin::get(LOG_PLUGIN_TYPE, registry::DEFAULT_LOGGER_NAME).unwrap();

    let mut decoder = ConfigDecoder::new(Config::new([output(&name, "info")]));
    factory.setup("plugin-built", &mut decoder).unwrap();

    let logger = registry::get("plugin-built").unwrap();
    logger.info("via plugin");
    assert!(buf.contents().contains("via plugin"));

    let mut decoder = ConfigDecoder::new(Config::new([output(&name, "info")]));
    assert!(matches!(
        factory.setup("plugin-built", &mut decoder),
        Err(LogError::DuplicateLogger(_))
    ));
}

#[test]
#[should_panic(expected = "registered twice")]
fn test_duplicate_named_registration_panics() {
    fanlog::register("integration-dup", Logger::noop());
    fanlog::register("integration-dup", Logger::noop());
}

/// Business writer configured through `remote_config`
struct PrefixWriter {
    seen: Arc<parking_lot::Mutex<Option<String>>>,
    buf: Buffer,
}

#[derive(Debug, Deserialize)]
struct PrefixSettings {
    channel: String,
}

impl Factory for PrefixWriter {
    fn type_name(&self) -> &str {
        LOG_PLUGIN_TYPE
    }

    fn setup(&self, _name: &str, decoder: &mut dyn Decoder) -> LogResult<()> {
        let decoder = downcast_decoder::<OutputDecoder>(decoder)?;
        let mut output = OutputConfig::default();
        decoder.decode(&mut output)?;

        let settings: PrefixSettings = output.remote_config()?;
        *self.seen.lock() = Some(settings.channel);

        let buf = self.buf.clone();
        decoder.set_sink(build_sink(&output, BoxMakeWriter::new(move || buf.clone()))?);
        Ok(())
    }
}

#[test]
fn test_business_writer_reads_remote_config() {
    let seen = Arc::new(parking_lot::Mutex::new(None));
    let buf = Buffer::default();
    writer::register_writer(
        "integration-remote",
        Arc::new(PrefixWriter {
            seen: Arc::clone(&seen),
            buf: buf.clone(),
        }),
    );

    let config: Config = serde_json::from_value(serde_json::json!([
        {"writer": "integration-remote", "remote_config": {"channel": "alerts"}}
    ]))
    .unwrap();
    let logger = Logger::from_config(&config).unwrap();
    logger.error("paged");

    assert_eq!(seen.lock().as_deref(), Some("alerts"));
    assert!(buf.contents().contains("paged"));

    let bad: Config = serde_json::from_value(serde_json::json!([
        {"writer": "integration-remote", "remote_config": {"topic": 1}}
    ]))
    .unwrap();
    assert!(matches!(
        Logger::from_config(&bad),
        Err(LogError::Setup { ref writer, .. }) if writer == "integration-remote"
    ));
}

#[test]
fn test_file_output_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let config: Config = serde_json::from_value(serde_json::json!([{
        "writer": "file",
        "formatter": "json",
        "level": "info",
        "writer_config": {
            "log_path": dir.path(),
            "file_name": "service.log",
            "write_mode": "sync",
            "roll_type": "size"
        }
    }]))
    .unwrap();

    let logger = Logger::from_config(&config).unwrap();
    logger.with([("attempt", 2)]).info("written to disk");
    logger.sync().unwrap();

    let contents = std::fs::read_to_string(dir.path().join("service.log")).unwrap();
    let obj: serde_json::Value = serde_json::from_str(contents.trim()).unwrap();
    assert_eq!(obj["M"], "written to disk");
    assert_eq!(obj["attempt"], 2);
}

#[test]
fn test_invalid_write_mode_fails_composition() {
    let dir = tempfile::tempdir().unwrap();
    let mut file = OutputConfig::new("file");
    file.writer_config.log_path = dir.path().to_path_buf();
    file.writer_config.file_name = "x.log".to_string();
    file.writer_config.write_mode = "eventually".to_string();

    let err = Logger::from_config(&Config::new([file])).unwrap_err();
    assert!(matches!(
        err,
        LogError::Setup { ref writer, ref source } if writer == "file"
            && matches!(**source, LogError::InvalidWriteMode(_))
    ));
}

#[test]
fn test_sync_flushes_registered_loggers() {
    let _guard = TEST_LOCK.lock().unwrap();
    let (name, _buf) = memory_writer();
    let _ = fanlog::try_register(
        "integration-sync",
        Logger::from_config(&Config::new([output(&name, "info")])).unwrap(),
    );
    fanlog::sync();
}
