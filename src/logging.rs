use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io::Write;
use std::panic::Location;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};

use chrono::Local;
use serde_json::{json, Map, Value as JsonValue};

use crate::error::{SortError, SortResult};

/// Log levels, quietest first. Each has a Scots alias an' aw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Off => "OFF",
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    pub fn parse_level(s: &str) -> Option<LogLevel> {
        match s.trim().to_lowercase().as_str() {
            "off" | "none" | "wheesht" => Some(LogLevel::Off),
            "error" | "roar" => Some(LogLevel::Error),
            "warn" | "warning" | "holler" => Some(LogLevel::Warn),
            "info" | "blether" => Some(LogLevel::Info),
            "debug" | "mutter" => Some(LogLevel::Debug),
            "trace" | "whisper" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
    Compact,
}

impl LogFormat {
    pub fn parse_format(s: &str) -> Option<LogFormat> {
        match s.trim().to_lowercase().as_str() {
            "text" => Some(LogFormat::Text),
            "json" => Some(LogFormat::Json),
            "compact" => Some(LogFormat::Compact),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogFilter {
    pub default: LogLevel,
    pub rules: Vec<(String, LogLevel)>,
}

impl LogFilter {
    fn level_for_target(&self, target: &str) -> LogLevel {
        let mut best: Option<(usize, LogLevel)> = None;
        for (rule_target, level) in &self.rules {
            if rule_target.is_empty() {
                continue;
            }
            if target.starts_with(rule_target) {
                let len = rule_target.len();
                if best.map(|(best_len, _)| len > best_len).unwrap_or(true) {
                    best = Some((len, *level));
                }
            }
        }
        best.map(|(_, level)| level).unwrap_or(self.default)
    }
}

static LOG_FILTER: OnceLock<Mutex<LogFilter>> = OnceLock::new();

fn filter_state() -> &'static Mutex<LogFilter> {
    LOG_FILTER.get_or_init(|| {
        Mutex::new(LogFilter {
            default: LogLevel::Warn,
            rules: Vec::new(),
        })
    })
}

/// Parse a filter like `info,sortbench::harness=debug`.
pub fn parse_filter(spec: &str) -> SortResult<LogFilter> {
    let invalid = || SortError::InvalidLogFilter {
        spec: spec.to_string(),
    };
    let mut default = None;
    let mut rules = Vec::new();
    for part in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if let Some((target, level_str)) = part.split_once('=') {
            let level = LogLevel::parse_level(level_str).ok_or_else(invalid)?;
            rules.push((target.trim().to_string(), level));
        } else {
            let level = LogLevel::parse_level(part).ok_or_else(invalid)?;
            default = Some(level);
        }
    }

    Ok(LogFilter {
        default: default.unwrap_or(LogLevel::Warn),
        rules,
    })
}

pub fn set_filter(spec: &str) -> SortResult<()> {
    let filter = parse_filter(spec)?;
    let mut guard = filter_state().lock().unwrap_or_else(|e| e.into_inner());
    *guard = filter;
    Ok(())
}

pub fn log_enabled(level: LogLevel, target: &str) -> bool {
    if level == LogLevel::Off {
        return false;
    }
    let filter = filter_state().lock().unwrap_or_else(|e| e.into_inner());
    let effective = filter.level_for_target(target);
    (level as u8) <= (effective as u8)
}

/// Change the default level, keepin' any per-target rules.
pub fn set_global_log_level(level: LogLevel) {
    let mut guard = filter_state().lock().unwrap_or_else(|e| e.into_inner());
    guard.default = level;
}

#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub target: String,
    pub file: String,
    pub line: u32,
    pub fields: Vec<(String, JsonValue)>,
    pub span_path: Vec<String>,
}

#[derive(Debug)]
pub enum LogSink {
    Stderr,
    File {
        path: String,
        append: bool,
        file: Option<std::fs::File>,
    },
    Memory {
        entries: Vec<String>,
        max: usize,
    },
}

#[derive(Debug)]
pub struct LoggerCore {
    pub format: LogFormat,
    pub timestamps: bool,
    pub sinks: Vec<LogSink>,
}

impl LoggerCore {
    pub fn new() -> Self {
        LoggerCore {
            format: LogFormat::Text,
            timestamps: true,
            sinks: vec![LogSink::Stderr],
        }
    }

    pub fn log(&mut self, record: &LogRecord) {
        let formatted = self.format_record(record);
        for sink in &mut self.sinks {
            match sink {
                LogSink::Stderr => {
                    eprintln!("{}", formatted);
                }
                LogSink::File { path, append, file } => {
                    if file.is_none() {
                        let mut opts = OpenOptions::new();
                        opts.create(true).write(true);
                        if *append {
                            opts.append(true);
                        } else {
                            opts.truncate(true);
                        }
                        match opts.open(path.as_str()) {
                            Ok(handle) => {
                                *file = Some(handle);
                            }
                            Err(err) => {
                                eprintln!("Warning: Couldnae open log file '{}': {}", path, err);
                            }
                        }
                    }
                    if let Some(handle) = file {
                        let _ = writeln!(handle, "{}", formatted);
                    }
                }
                LogSink::Memory { entries, max } => {
                    entries.push(formatted.clone());
                    if entries.len() > *max {
                        let drain = entries.len() - *max;
                        entries.drain(0..drain);
                    }
                }
            }
        }
    }

    /// Lines held by any in-memory sinks, oldest first.
    pub fn memory_entries(&self) -> Vec<String> {
        self.sinks
            .iter()
            .filter_map(|sink| match sink {
                LogSink::Memory { entries, .. } => Some(entries.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    fn format_record(&self, record: &LogRecord) -> String {
        match self.format {
            LogFormat::Json => self.format_json(record),
            LogFormat::Compact => self.format_compact(record),
            LogFormat::Text => self.format_text(record),
        }
    }

    fn format_text(&self, record: &LogRecord) -> String {
        let mut parts = Vec::new();
        parts.push(format!("[{:5}]", record.level.name()));
        if self.timestamps {
            parts.push(timestamp_string());
        }
        if !record.target.is_empty() {
            parts.push(record.target.clone());
        }
        parts.push(format!("{}:{}", record.file, record.line));

        format!("{} | {}", parts.join(" "), message_with_context(record))
    }

    fn format_compact(&self, record: &LogRecord) -> String {
        format!("[{}] {}", record.level.name(), message_with_context(record))
    }

    fn format_json(&self, record: &LogRecord) -> String {
        let mut obj = Map::new();
        if self.timestamps {
            obj.insert("ts".to_string(), JsonValue::String(timestamp_string()));
        }
        obj.insert(
            "level".to_string(),
            JsonValue::String(record.level.name().to_string()),
        );
        obj.insert(
            "target".to_string(),
            JsonValue::String(record.target.clone()),
        );
        obj.insert("file".to_string(), JsonValue::String(record.file.clone()));
        obj.insert("line".to_string(), json!(record.line));
        obj.insert("msg".to_string(), JsonValue::String(record.message.clone()));

        let fields: Map<String, JsonValue> = record.fields.iter().cloned().collect();
        obj.insert("fields".to_string(), JsonValue::Object(fields));
        obj.insert(
            "span".to_string(),
            JsonValue::Array(
                record
                    .span_path
                    .iter()
                    .cloned()
                    .map(JsonValue::String)
                    .collect(),
            ),
        );

        JsonValue::Object(obj).to_string()
    }
}

impl Default for LoggerCore {
    fn default() -> Self {
        Self::new()
    }
}

fn message_with_context(record: &LogRecord) -> String {
    let mut msg = record.message.clone();
    if !record.fields.is_empty() {
        msg = format!("{} {}", msg, format_fields(&record.fields));
    }
    if !record.span_path.is_empty() {
        msg = format!("{} span={}", msg, record.span_path.join(">"));
    }
    msg
}

fn format_fields(fields: &[(String, JsonValue)]) -> String {
    fields
        .iter()
        .map(|(k, v)| match v {
            JsonValue::String(s) => format!("{}={}", k, s),
            other => format!("{}={}", k, other),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

static LOGGER: OnceLock<Mutex<LoggerCore>> = OnceLock::new();

fn logger() -> &'static Mutex<LoggerCore> {
    LOGGER.get_or_init(|| Mutex::new(LoggerCore::new()))
}

/// Run `f` against the process-wide logger.
pub fn with_logger<R>(f: impl FnOnce(&mut LoggerCore) -> R) -> R {
    let mut guard = logger().lock().unwrap_or_else(|e| e.into_inner());
    f(&mut guard)
}

/// Emit a record through the global logger if the filter lets it through.
#[track_caller]
pub fn log(
    level: LogLevel,
    target: &str,
    message: impl Into<String>,
    fields: Vec<(String, JsonValue)>,
) {
    if !log_enabled(level, target) {
        return;
    }
    let location = Location::caller();
    let record = LogRecord {
        level,
        message: message.into(),
        target: target.to_string(),
        file: location.file().to_string(),
        line: location.line(),
        fields,
        span_path: span_path(),
    };
    with_logger(|core| core.log(&record));
}

/// Set up logging from `SORTBENCH_LOG` (a filter spec) or `SORTBENCH_LOG_LEVEL`,
/// plus `SORTBENCH_LOG_FORMAT` an' `SORTBENCH_LOG_FILE`.
pub fn init_from_env() -> SortResult<()> {
    if let Ok(spec) = std::env::var("SORTBENCH_LOG") {
        set_filter(&spec)?;
    } else if let Ok(level_str) = std::env::var("SORTBENCH_LOG_LEVEL") {
        let level = LogLevel::parse_level(&level_str)
            .ok_or(SortError::InvalidLogFilter { spec: level_str })?;
        set_global_log_level(level);
    }

    let format = match std::env::var("SORTBENCH_LOG_FORMAT") {
        Ok(raw) => match LogFormat::parse_format(&raw) {
            Some(format) => Some(format),
            None => {
                return Err(SortError::InvalidEnv {
                    key: "SORTBENCH_LOG_FORMAT".to_string(),
                    value: raw,
                })
            }
        },
        Err(_) => None,
    };
    let file = std::env::var("SORTBENCH_LOG_FILE").ok();

    with_logger(|core| {
        if let Some(format) = format {
            core.format = format;
        }
        if let Some(path) = file {
            core.sinks = vec![LogSink::File {
                path,
                append: true,
                file: None,
            }];
        }
    });
    Ok(())
}

#[derive(Debug)]
pub struct LogSpan {
    pub id: u64,
    pub name: String,
}

thread_local! {
    static LOG_SPAN_STACK: RefCell<Vec<LogSpan>> = const { RefCell::new(Vec::new()) };
}

static LOG_SPAN_ID: AtomicU64 = AtomicU64::new(1);

/// Keeps a span on the stack until dropped.
#[derive(Debug)]
pub struct SpanGuard {
    id: u64,
}

impl Drop for SpanGuard {
    fn drop(&mut self) {
        LOG_SPAN_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(pos) = stack.iter().rposition(|s| s.id == self.id) {
                stack.truncate(pos);
            }
        });
    }
}

pub fn span_enter(name: impl Into<String>) -> SpanGuard {
    let id = LOG_SPAN_ID.fetch_add(1, Ordering::Relaxed);
    LOG_SPAN_STACK.with(|stack| {
        stack.borrow_mut().push(LogSpan {
            id,
            name: name.into(),
        })
    });
    SpanGuard { id }
}

pub fn span_path() -> Vec<String> {
    LOG_SPAN_STACK.with(|stack| stack.borrow().iter().map(|s| s.name.clone()).collect())
}

pub fn timestamp_string() -> String {
    format!("{}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(level: LogLevel, fields: Vec<(String, JsonValue)>) -> LogRecord {
        LogRecord {
            level,
            message: "sorted".to_string(),
            target: "sortbench::harness".to_string(),
            file: "harness.rs".to_string(),
            line: 7,
            fields,
            span_path: vec!["round".to_string()],
        }
    }

    #[test]
    fn test_parse_level_aliases() {
        assert_eq!(LogLevel::parse_level("blether"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse_level("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse_level("wheesht"), Some(LogLevel::Off));
        assert_eq!(LogLevel::parse_level("loud"), None);
    }

    #[test]
    fn test_parse_filter_rules() {
        let filter = parse_filter("info, sortbench::harness=trace, sortbench=roar").unwrap();
        assert_eq!(filter.default, LogLevel::Info);
        assert_eq!(filter.level_for_target("sortbench::harness"), LogLevel::Trace);
        assert_eq!(filter.level_for_target("sortbench::session"), LogLevel::Error);
        assert_eq!(filter.level_for_target("other"), LogLevel::Info);
    }

    #[test]
    fn test_parse_filter_rejects_bad_level() {
        let err = parse_filter("info,sortbench=shouty").unwrap_err();
        assert!(matches!(err, SortError::InvalidLogFilter { .. }));
    }

    #[test]
    fn test_compact_format() {
        let mut core = LoggerCore::new();
        core.format = LogFormat::Compact;
        let line = core.format_record(&record(
            LogLevel::Info,
            vec![
                ("algorithm".to_string(), json!("Merge")),
                ("n".to_string(), json!(10)),
            ],
        ));
        assert_eq!(line, "[INFO] sorted algorithm=Merge n=10 span=round");
    }

    #[test]
    fn test_text_format_without_timestamp() {
        let mut core = LoggerCore::new();
        core.timestamps = false;
        let line = core.format_record(&record(LogLevel::Warn, Vec::new()));
        assert_eq!(
            line,
            "[WARN ] sortbench::harness harness.rs:7 | sorted span=round"
        );
    }

    #[test]
    fn test_json_format() {
        let mut core = LoggerCore::new();
        core.format = LogFormat::Json;
        let line = core.format_record(&record(
            LogLevel::Debug,
            vec![("n".to_string(), json!(3))],
        ));
        let parsed: JsonValue = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["level"], "DEBUG");
        assert_eq!(parsed["fields"]["n"], 3);
        assert_eq!(parsed["span"][0], "round");
    }

    #[test]
    fn test_memory_sink_is_bounded() {
        let mut core = LoggerCore::new();
        core.format = LogFormat::Compact;
        core.sinks = vec![LogSink::Memory {
            entries: Vec::new(),
            max: 2,
        }];
        for _ in 0..5 {
            core.log(&record(LogLevel::Info, Vec::new()));
        }
        assert_eq!(core.memory_entries().len(), 2);
    }

    #[test]
    fn test_file_sink_writes_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sortbench.log");
        let mut core = LoggerCore::new();
        core.format = LogFormat::Compact;
        core.sinks = vec![LogSink::File {
            path: path.to_string_lossy().to_string(),
            append: false,
            file: None,
        }];
        core.log(&record(LogLevel::Error, Vec::new()));
        core.log(&record(LogLevel::Error, Vec::new()));
        drop(core);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.starts_with("[ERROR] sorted"));
    }

    #[test]
    fn test_span_guard_pops_on_drop() {
        assert!(span_path().is_empty());
        {
            let _outer = span_enter("session");
            let _inner = span_enter("round");
            assert_eq!(span_path(), vec!["session".to_string(), "round".to_string()]);
        }
        assert!(span_path().is_empty());
    }

    #[test]
    fn test_global_level_keeps_target_rules() {
        set_filter("warn,sortbench::harness=debug").unwrap();
        set_global_log_level(LogLevel::Error);
        assert!(log_enabled(LogLevel::Debug, "sortbench::harness"));
        assert!(!log_enabled(LogLevel::Warn, "sortbench::session"));
        assert!(log_enabled(LogLevel::Error, "sortbench::session"));
        set_filter("warn").unwrap();
    }

    #[test]
    fn test_off_is_never_enabled() {
        assert!(!log_enabled(LogLevel::Off, "sortbench"));
    }
}
