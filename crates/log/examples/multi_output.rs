//! Console plus rolling JSON file, with a runtime level change
//!
//! ```sh
//! FANLOG_TRACE=1 cargo run --example multi_output
//! ```

use fanlog::prelude::*;
use fanlog::{LoggerLayer, WriterConfig};
use tracing_subscriber::prelude::*;

fn main() -> LogResult<()> {
    let dir = std::env::temp_dir().join("fanlog-demo");
    let config = Config::new([
        OutputConfig {
            level: "trace".to_string(),
            enable_color: true,
            ..OutputConfig::new("console")
        },
        OutputConfig {
            formatter: "json".to_string(),
            level: "info".to_string(),
            writer_config: WriterConfig {
                log_path: dir.clone(),
                file_name: "demo.log".to_string(),
                write_mode: "async".to_string(),
                time_unit: "hour".into(),
                max_backups: 3,
                ..WriterConfig::default()
            },
            ..OutputConfig::new("file")
        },
    ]);

    let logger = fanlog::init_with(&config)?;
    tracing_subscriber::registry()
        .with(LoggerLayer::default())
        .init();

    trace!("only on the console, and only with FANLOG_TRACE set");
    info!("written to {} outputs", logger.sink_count());
    tracing::warn!(retries = 3, "events from tracing are forwarded too");

    let request = LogContext::with_logger(logger.named("request").with([("id", "r-42")]));
    fanlog::info_context(&request, "handling request");

    fanlog::set_level("1", Level::Error);
    info!("console only now, file output is at {}", fanlog::get_level("1"));

    fanlog::sync();
    println!("file output in {}", dir.display());
    Ok(())
}
