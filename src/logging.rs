//! JSON-lines file logger for the `log` facade.
//!
//! The terminal belongs to the game while it runs, so records go to the file
//! named by `APPLES_LOG_PATH`, one JSON object per line. Without that
//! variable no logger is installed and every `log` macro is a no-op.
//!
//! `APPLES_LOG_LEVEL` (`error`..`trace`, default `info`) sets the threshold.

use std::env;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::{LevelFilter, Log, Metadata, Record};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub path: Option<PathBuf>,
    pub level: LevelFilter,
}

impl LogConfig {
    pub fn from_env() -> Self {
        let path = env::var("APPLES_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        let level = env::var("APPLES_LOG_LEVEL")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(LevelFilter::Info);

        Self { path, level }
    }
}

#[derive(Serialize)]
struct LogLine<'a> {
    ts_ms: u64,
    level: &'a str,
    target: &'a str,
    msg: String,
}

struct Sink {
    file: File,
    buf: Vec<u8>,
}

pub struct JsonLineLogger {
    level: LevelFilter,
    sink: Mutex<Sink>,
}

impl JsonLineLogger {
    pub fn open(path: &Path, level: LevelFilter) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        Ok(Self {
            level,
            sink: Mutex::new(Sink {
                file,
                buf: Vec::with_capacity(512),
            }),
        })
    }
}

impl Log for JsonLineLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = LogLine {
            ts_ms: now_ms(),
            level: record.level().as_str(),
            target: record.target(),
            msg: record.args().to_string(),
        };

        // Poisoned lock or failed write: drop the record.
        let Ok(mut sink) = self.sink.lock() else {
            return;
        };
        let Sink { file, buf } = &mut *sink;
        buf.clear();
        if serde_json::to_writer(&mut *buf, &line).is_err() {
            return;
        }
        buf.push(b'\n');
        let _ = file.write_all(buf);
    }

    fn flush(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.file.flush();
        }
    }
}

/// Install the file logger when configured. Returns whether one was installed.
pub fn init(config: &LogConfig) -> Result<bool> {
    let Some(path) = config.path.as_deref() else {
        return Ok(false);
    };
    let logger = JsonLineLogger::open(path, config.level)?;
    log::set_boxed_logger(Box::new(logger)).context("installing logger")?;
    log::set_max_level(config.level);
    Ok(true)
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
