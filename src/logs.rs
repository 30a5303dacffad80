use std::{fs, path::Path};

use anyhow::{Context, Result};
use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    {ContentLimit, FileRotate},
};
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};

/// Logs to stderr, and to a rotating file under `log_dir` when given.
pub fn init(log_dir: Option<&Path>, level: LevelFilter) -> Result<()> {
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(log_dir) = log_dir {
        fs::create_dir_all(log_dir)
            .with_context(|| format!("failed to create {:?}", log_dir))?;
        let log = FileRotate::new(
            log_dir.join("gsd_trips.log"),
            AppendTimestamp::default(FileLimit::MaxFiles(3)),
            ContentLimit::Lines(1000),
            Compression::None,
            #[cfg(unix)]
            None,
        );
        loggers.push(WriteLogger::new(level, config, log));
    }

    CombinedLogger::init(loggers)?;
    Ok(())
}
