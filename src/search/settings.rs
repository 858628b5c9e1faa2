//! Search configuration.
//!
//! Settings are built in code with the `with_*` setters. Modes and
//! threading also parse from, and display as, short text forms:
//!
//! * mode: `fixed:4`, `iterative:6`, `timed:1500ms` or `timed:2s`
//! * threading: `single`, `per-core` or a worker count such as `4`

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use super::error::SearchError;
use super::CAPTURES_DEPTH;

#[derive(Error, Debug, PartialEq)]
pub enum SettingsError {
    #[error("unknown search mode `{0}`, expected fixed:<depth>, iterative:<depth> or timed:<duration>")]
    UnknownMode(String),
    #[error("invalid depth `{0}`")]
    InvalidDepth(String),
    #[error("invalid duration `{0}`, expected a number of milliseconds or seconds such as 500ms or 2s")]
    InvalidDuration(String),
    #[error("unknown threading mode `{0}`, expected single, per-core or a worker count")]
    UnknownThreading(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMode {
    /// Search exactly this deep, giving up at [`SearchSettings::timeout`] if set.
    FixedDepth(u8),
    /// Deepen one ply at a time up to this depth.
    IterativeDepth(u8),
    /// Deepen one ply at a time until the time budget runs out.
    TimedIterative(Duration),
}

impl Default for SearchMode {
    fn default() -> Self {
        SearchMode::FixedDepth(4)
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::FixedDepth(depth) => write!(f, "fixed:{}", depth),
            SearchMode::IterativeDepth(depth) => write!(f, "iterative:{}", depth),
            SearchMode::TimedIterative(limit) => write!(f, "timed:{}ms", limit.as_millis()),
        }
    }
}

fn parse_depth(value: &str) -> Result<u8, SettingsError> {
    value
        .parse()
        .map_err(|_| SettingsError::InvalidDepth(value.to_string()))
}

fn parse_duration(value: &str) -> Result<Duration, SettingsError> {
    let invalid = || SettingsError::InvalidDuration(value.to_string());
    if let Some(millis) = value.strip_suffix("ms") {
        millis.parse().map(Duration::from_millis).map_err(|_| invalid())
    } else if let Some(seconds) = value.strip_suffix('s') {
        seconds.parse().map(Duration::from_secs).map_err(|_| invalid())
    } else {
        value.parse().map(Duration::from_millis).map_err(|_| invalid())
    }
}

impl FromStr for SearchMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once(':') {
            Some(("fixed", depth)) => Ok(SearchMode::FixedDepth(parse_depth(depth)?)),
            Some(("iterative", depth)) => Ok(SearchMode::IterativeDepth(parse_depth(depth)?)),
            Some(("timed", limit)) => Ok(SearchMode::TimedIterative(parse_duration(limit)?)),
            _ => Err(SettingsError::UnknownMode(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThreadingMode {
    Single,
    /// One worker per available core.
    PerCore,
    Fixed(usize),
}

impl Default for ThreadingMode {
    fn default() -> Self {
        ThreadingMode::PerCore
    }
}

impl ThreadingMode {
    /// Number of workers for a root move list of `move_count` moves.
    pub fn worker_count(&self, move_count: usize) -> usize {
        let workers = match self {
            ThreadingMode::Single => 1,
            ThreadingMode::PerCore => std::thread::available_parallelism()
                .map(|cores| cores.get())
                .unwrap_or(1),
            ThreadingMode::Fixed(workers) => *workers,
        };
        workers.min(move_count).max(1)
    }
}

impl fmt::Display for ThreadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreadingMode::Single => write!(f, "single"),
            ThreadingMode::PerCore => write!(f, "per-core"),
            ThreadingMode::Fixed(workers) => write!(f, "{}", workers),
        }
    }
}

impl FromStr for ThreadingMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "single" => Ok(ThreadingMode::Single),
            "per-core" => Ok(ThreadingMode::PerCore),
            other => other
                .parse::<usize>()
                .ok()
                .filter(|&workers| workers > 0)
                .map(ThreadingMode::Fixed)
                .ok_or_else(|| SettingsError::UnknownThreading(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchSettings {
    pub mode: SearchMode,
    /// Deadline for [`SearchMode::FixedDepth`]; the iterative modes ignore it.
    pub timeout: Option<Duration>,
    pub threading: ThreadingMode,
    pub transposition_table: bool,
    /// Search one ply deeper when the reply side is in check.
    pub check_extension: bool,
    /// Extension budget along a single line.
    pub captures_depth: u8,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            mode: SearchMode::default(),
            timeout: None,
            threading: ThreadingMode::default(),
            transposition_table: true,
            check_extension: false,
            captures_depth: CAPTURES_DEPTH,
        }
    }
}

impl SearchSettings {
    pub fn new(mode: SearchMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_threading(mut self, threading: ThreadingMode) -> Self {
        self.threading = threading;
        self
    }

    pub fn with_transposition_table(mut self, enabled: bool) -> Self {
        self.transposition_table = enabled;
        self
    }

    pub fn with_check_extension(mut self, enabled: bool) -> Self {
        self.check_extension = enabled;
        self
    }

    pub fn with_captures_depth(mut self, captures_depth: u8) -> Self {
        self.captures_depth = captures_depth;
        self
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        match self.mode {
            SearchMode::FixedDepth(0) | SearchMode::IterativeDepth(0) => Err(SearchError::DepthTooLow),
            SearchMode::TimedIterative(limit) if limit.is_zero() => Err(SearchError::ZeroTimeLimit),
            _ => match self.timeout {
                Some(timeout) if timeout.is_zero() => Err(SearchError::ZeroTimeLimit),
                _ => Ok(()),
            },
        }
    }
}
