use candid::CandidType;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{
    collections::VecDeque,
    sync::{Mutex, PoisonError},
};

///
/// Level
///

#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, CandidType, Display, Serialize, Deserialize,
)]
pub enum Level {
    Debug, // least severe
    Info,
    Ok,
    Warn,
    Error, // most severe
}

///
/// Topic
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum Topic {
    Access,
    Audit,
    Config,
    Cut,
    Dispatch,
    Init,
    Registry,
}

///
/// LogEntry
///

#[derive(CandidType, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct LogEntry {
    pub crate_name: String,
    pub topic: Option<String>,
    pub level: Level,
    pub message: String,
}

#[macro_export]
macro_rules! log {
    // =========================================
    // INTERNAL
    // =========================================
    (@inner $topic:expr, $level:expr, $fmt:expr $(, $arg:expr)*) => {{
        let level = $level;
        let topic: Option<String> = $topic.map(|t| t.to_string());
        let message = format!($fmt $(, $arg)*);

        // append entry, print if above the console threshold
        let crate_name = env!("CARGO_PKG_NAME");
        if $crate::log::__append(crate_name, topic.as_deref(), level, &message) {
            let final_msg = match topic.as_deref() {
                Some(t) => format!("[{t}] {message}"),
                None => message,
            };

            let (color, reset) = match level {
                $crate::log::Level::Ok    => ("\x1b[32m", "\x1b[0m"),
                $crate::log::Level::Info  => ("\x1b[34m", "\x1b[0m"),
                $crate::log::Level::Warn  => ("\x1b[33m", "\x1b[0m"),
                $crate::log::Level::Error => ("\x1b[31m", "\x1b[0m"),
                $crate::log::Level::Debug => ("", ""),
            };

            let label = format!("{color}{:^5}{reset}", level.to_string().to_uppercase());
            let origin = $crate::utils::format::ellipsize_middle(crate_name, 12, 5, 6);

            println!("{label}|{origin:^12}| {final_msg}");
        }
    }};

    // =========================================
    // (1) With topic (normal + trailing comma)
    // =========================================
    ($topic:expr, $level:ident, $fmt:expr $(, $arg:expr)* $(,)?) => {{
        $crate::log!(@inner Some($topic), $crate::log::Level::$level, $fmt $(, $arg)*);
    }};

    // =========================================
    // (2) No topic (normal + trailing comma)
    // =========================================
    ($level:ident, $fmt:expr $(, $arg:expr)* $(,)?) => {{
        $crate::log!(@inner None::<$crate::log::Topic>, $crate::log::Level::$level, $fmt $(, $arg)*);
    }};
}

//
// Buffer
//

pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

struct LogBuffer {
    entries: VecDeque<LogEntry>,
    max_entries: usize,
    console_level: Level,
}

static LOG_BUFFER: Mutex<LogBuffer> = Mutex::new(LogBuffer {
    entries: VecDeque::new(),
    max_entries: DEFAULT_MAX_ENTRIES,
    console_level: Level::Info,
});

/// Apply retention and console settings. Existing entries beyond the new
/// capacity are evicted oldest first.
pub fn configure(max_entries: usize, console_level: Level) {
    let mut buf = LOG_BUFFER.lock().unwrap_or_else(PoisonError::into_inner);

    buf.max_entries = max_entries;
    buf.console_level = console_level;
    while buf.entries.len() > buf.max_entries {
        buf.entries.pop_front();
    }
}

/// Snapshot of retained entries, oldest first.
#[must_use]
pub fn entries() -> Vec<LogEntry> {
    LOG_BUFFER
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .entries
        .iter()
        .cloned()
        .collect()
}

///
/// Helpers
///

/// Append an entry; returns true when it should also reach the console.
#[doc(hidden)]
pub fn __append(crate_name: &str, topic: Option<&str>, level: Level, message: &str) -> bool {
    let mut buf = LOG_BUFFER.lock().unwrap_or_else(PoisonError::into_inner);

    if buf.max_entries > 0 {
        while buf.entries.len() >= buf.max_entries {
            buf.entries.pop_front();
        }

        buf.entries.push_back(LogEntry {
            crate_name: crate_name.to_string(),
            topic: topic.map(str::to_string),
            level,
            message: message.to_string(),
        });
    }

    level >= buf.console_level
}

///
/// TESTS
///
