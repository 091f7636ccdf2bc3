use crate::error::{Result, ScraperError};
use chrono::Local;
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Per-run log file: `<log_dir>/log-<run stamp>.log`
pub fn log_file_path(log_dir: &Path, run_stamp: &str) -> PathBuf {
    log_dir.join(format!("log-{}.log", run_stamp))
}

/// Route the `log` facade into the run's log file (append mode)
pub fn init(log_dir: &Path, run_stamp: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(log_dir)?;
    let path = log_file_path(log_dir, run_stamp);

    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} : {}",
                record.level(),
                Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| ScraperError::Logger(e.to_string()))?;

    log::info!("Logger initialized.");
    Ok(path)
}
