//! Timestamp provider
//!
//! Records carry their creation/edit stamps as text in the fixed
//! `yyyy-MM-dd-HH-mm-ss` layout.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// `chrono` pattern for `yyyy-MM-dd-HH-mm-ss`.
pub const STAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Source of "now" for the services.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    /// Current time rendered with [`STAMP_FORMAT`].
    fn stamp(&self) -> String {
        format_stamp(&self.now())
    }
}

pub type SharedClock = Arc<dyn Clock>;

/// Wall clock in the server's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock pinned to a single instant. Handy in tests and fixtures.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl FixedClock {
    /// Build from a naive local time; `None` if it does not exist locally
    /// (DST gap) or is ambiguous.
    pub fn at(naive: NaiveDateTime) -> Option<Self> {
        Local.from_local_datetime(&naive).single().map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

pub fn format_stamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(STAMP_FORMAT).to_string()
}

/// `true` when `value` has exactly the stamp layout and is a real date/time.
pub fn is_valid_stamp(value: &str) -> bool {
    value.len() == 19 && NaiveDateTime::parse_from_str(value, STAMP_FORMAT).is_ok()
}
