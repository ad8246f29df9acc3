//! Loading logger configuration from YAML

use fanlog::config::{RollType, TimeUnit, WriteMode};
use fanlog::{Config, Level, LogError, Logger};
use pretty_assertions::assert_eq;

const YAML: &str = r#"
- writer: console
  level: info
  enable_color: true
  caller_skip: 3
  format_config:
    time_format: "[hour]:[minute]:[second]"
- writer: file
  formatter: json
  level: warn
  writer_config:
    log_path: /tmp/fanlog
    file_name: app.log
    write_mode: async
    roll_type: size
    max_size: 100
    max_backups: 5
    time_unit: hour
  format_config:
    message_key: msg
    function_key: func
- writer: kafka
  remote_config:
    brokers: [a, b]
    topic: logs
"#;

#[test]
fn test_yaml_outputs_in_order() {
    let config: Config = serde_yaml::from_str(YAML).unwrap();
    assert_eq!(config.len(), 3);

    let console = &config[0];
    assert_eq!(console.writer, "console");
    assert_eq!(console.min_level(), Level::Info);
    assert!(console.enable_color);
    assert_eq!(console.caller_skip, 3);
    assert_eq!(console.format_config.time_format, "[hour]:[minute]:[second]");

    let file = &config[1];
    assert_eq!(file.formatter, "json");
    assert_eq!(file.writer_config.write_mode().unwrap(), WriteMode::Async);
    assert_eq!(file.writer_config.roll_type(), RollType::BySize);
    assert_eq!(file.writer_config.time_unit, TimeUnit::Hour);
    assert_eq!(file.writer_config.max_backups, 5);
    assert_eq!(
        file.writer_config.file_path().unwrap(),
        std::path::Path::new("/tmp/fanlog/app.log")
    );
    assert_eq!(file.format_config.message_key, "msg");

    let remote = &config[2];
    assert_eq!(remote.remote_config["topic"], "logs");
    assert_eq!(remote.min_level(), Level::Debug);
}

#[test]
fn test_yaml_with_unknown_writer_does_not_compose() {
    let config: Config = serde_yaml::from_str(YAML).unwrap();
    let only_kafka = Config::new([config[2].clone()]);
    assert!(matches!(
        Logger::from_config(&only_kafka),
        Err(LogError::WriterNotFound(name)) if name == "kafka"
    ));
}

#[test]
fn test_yaml_console_output_composes() -> anyhow::Result<()> {
    let config: Config = serde_yaml::from_str(YAML)?;
    let logger = Logger::from_config(&Config::new([config[0].clone()]))?;
    assert_eq!(logger.sink_count(), 1);
    assert_eq!(logger.get_level("0"), Level::Info);
    assert_eq!(logger.caller_skip(), 3);
    Ok(())
}

#[test]
fn test_bad_time_pattern_fails_composition() {
    let config: Config = serde_yaml::from_str(
        r#"
- writer: console
  format_config:
    time_format: "[hour"
"#,
    )
    .unwrap();
    let err = Logger::from_config(&config).unwrap_err();
    assert!(err.to_string().contains("invalid time pattern"), "{err}");
}

#[cfg(feature = "file")]
#[test]
fn test_yaml_size_limited_file_is_rejected() {
    let config: Config = serde_yaml::from_str(YAML).unwrap();
    let err = Logger::from_config(&Config::new([config[1].clone()])).unwrap_err();
    assert!(matches!(
        err,
        LogError::Setup { ref writer, ref source } if writer == "file"
            && matches!(**source, LogError::Config(_))
    ));
}
