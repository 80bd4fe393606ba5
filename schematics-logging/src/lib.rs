//! Logging setup shared by the Schematics CLI and anything embedding the client.
//!
//! Behaviour is driven by environment variables:
//!
//! | variable                | values                          | default                   |
//! |-------------------------|---------------------------------|---------------------------|
//! | `SCHEMATICS_LOG_LEVEL`  | any `EnvFilter` directive       | `warn`                    |
//! | `SCHEMATICS_LOG_FORMAT` | `human`, `json`                 | `human`                   |
//! | `SCHEMATICS_LOG_OUTPUT` | `console`, `file`, `both`, `none` | `console`               |
//! | `SCHEMATICS_LOG_FILE`   | path of the rolling log file    | `<tmp>/schematics.log`    |
//!
//! `RUST_LOG` still takes precedence over `SCHEMATICS_LOG_LEVEL` when set.
//! Console output goes to stderr so it never mixes with command output.

use std::{
    env,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt::MakeWriter, prelude::*, registry, EnvFilter};

// --- Tee writer: one event, two sinks ---
struct Tee<A, B> {
    a: A,
    b: B,
}

impl<A, B> Write for Tee<A, B>
where
    A: Write,
    B: Write,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let res_a = self.a.write(buf);
        let res_b = self.b.write(buf);
        res_a.or(res_b)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.a.flush()?;
        self.b.flush()
    }
}

#[derive(Clone)]
struct MakeTee<A, B> {
    make_a: A,
    make_b: B,
}

impl<'a, A, B, W1, W2> MakeWriter<'a> for MakeTee<A, B>
where
    A: MakeWriter<'a, Writer = W1>,
    B: MakeWriter<'a, Writer = W2>,
    W1: Write + 'a,
    W2: Write + 'a,
{
    type Writer = Tee<W1, W2>;
    fn make_writer(&'a self) -> Self::Writer {
        Tee {
            a: self.make_a.make_writer(),
            b: self.make_b.make_writer(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Human,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Console,
    File,
    Both,
    None,
}

impl LogOutput {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => LogOutput::File,
            "both" => LogOutput::Both,
            "none" | "off" => LogOutput::None,
            _ => LogOutput::Console,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
    pub output: LogOutput,
    pub file_path: PathBuf,
}

fn default_level() -> String {
    env::var("SCHEMATICS_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string())
}

fn default_format() -> LogFormat {
    match env::var("SCHEMATICS_LOG_FORMAT") {
        Ok(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
        _ => LogFormat::Human,
    }
}

fn default_output() -> LogOutput {
    env::var("SCHEMATICS_LOG_OUTPUT")
        .map(|v| LogOutput::parse(&v))
        .unwrap_or(LogOutput::Console)
}

fn default_file_path() -> PathBuf {
    env::var("SCHEMATICS_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir().join("schematics.log"))
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            output: default_output(),
            file_path: default_file_path(),
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Override the level, e.g. from a `--verbose` flag.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    fn env_filter(&self) -> EnvFilter {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));
        ["hyper=warn", "reqwest=warn", "rustls=warn"]
            .iter()
            .filter_map(|d| d.parse().ok())
            .fold(filter, |f, directive| f.add_directive(directive))
    }
}

/// Initializes the global tracing subscriber from environment variables.
///
/// The returned guard flushes the file writer on drop and must be kept alive
/// for as long as logging is wanted. Calling this twice is harmless; the
/// second call leaves the first subscriber in place.
pub fn init_subscriber() -> Option<WorkerGuard> {
    init_with(&LogConfig::from_env())
}

pub fn init_with(config: &LogConfig) -> Option<WorkerGuard> {
    let subscriber = registry().with(config.env_filter());
    let is_json = config.format == LogFormat::Json;

    let log_dir = config
        .file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(env::temp_dir);
    let log_filename = config
        .file_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "schematics.log".into());

    let mut guard: Option<WorkerGuard> = None;

    // try_init only fails when a global subscriber already exists.
    let _ = match config.output {
        LogOutput::Both => {
            let file_appender = tracing_appender::rolling::daily(&log_dir, &log_filename);
            let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
            guard = Some(file_guard);

            let tee_writer = MakeTee {
                make_a: std::io::stderr,
                make_b: non_blocking,
            };
            let fmt_layer = tracing_subscriber::fmt::layer().with_writer(tee_writer);
            if is_json {
                subscriber.with(fmt_layer.json()).try_init()
            } else {
                subscriber.with(fmt_layer.with_ansi(false)).try_init()
            }
        }
        LogOutput::Console => {
            let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
            if is_json {
                subscriber.with(fmt_layer.json()).try_init()
            } else {
                subscriber.with(fmt_layer).try_init()
            }
        }
        LogOutput::File => {
            let file_appender = tracing_appender::rolling::daily(&log_dir, &log_filename);
            let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
            guard = Some(file_guard);

            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking);
            if is_json {
                subscriber.with(fmt_layer.json()).try_init()
            } else {
                subscriber.with(fmt_layer).try_init()
            }
        }
        LogOutput::None => subscriber.try_init(),
    };

    guard
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "SCHEMATICS_LOG_LEVEL",
        "SCHEMATICS_LOG_FORMAT",
        "SCHEMATICS_LOG_OUTPUT",
        "SCHEMATICS_LOG_FILE",
    ];

    fn clear() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear();
        let config = LogConfig::from_env();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Human);
        assert_eq!(config.output, LogOutput::Console);
        assert!(config.file_path.ends_with("schematics.log"));
    }

    #[test]
    #[serial]
    fn test_reads_environment() {
        clear();
        env::set_var("SCHEMATICS_LOG_LEVEL", "schematics=debug");
        env::set_var("SCHEMATICS_LOG_FORMAT", "JSON");
        env::set_var("SCHEMATICS_LOG_OUTPUT", "both");
        env::set_var("SCHEMATICS_LOG_FILE", "/var/log/schematics/client.log");

        let config = LogConfig::from_env();
        assert_eq!(config.level, "schematics=debug");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.output, LogOutput::Both);
        assert_eq!(
            config.file_path,
            PathBuf::from("/var/log/schematics/client.log")
        );
        clear();
    }

    #[test]
    fn test_output_parse() {
        assert_eq!(LogOutput::parse("FILE"), LogOutput::File);
        assert_eq!(LogOutput::parse("off"), LogOutput::None);
        assert_eq!(LogOutput::parse("garbage"), LogOutput::Console);
    }

    #[test]
    #[serial]
    fn test_init_twice_does_not_panic() {
        clear();
        let config = LogConfig::from_env().with_level("error");
        let _first = init_with(&config);
        let _second = init_with(&config);
    }
}
