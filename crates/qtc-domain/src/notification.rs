//! Notification identifiers

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Correlation id stamped on every log line and report of one inbound email
///
/// Ids are UUIDv7, so a run that processes several mailbox deliveries at once
/// can still be read back in arrival order by sorting on the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationId(uuid::Uuid);

impl NotificationId {
    /// Mint the id for a notification that has just been received
    ///
    /// ```
    /// use qtc_domain::NotificationId;
    ///
    /// let first = NotificationId::new();
    /// let second = NotificationId::new();
    /// assert_ne!(first, second);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Unix time in milliseconds at which the notification was picked up
    pub fn received_at_millis(&self) -> u64 {
        self.0
            .get_timestamp()
            .map(|ts| {
                let (secs, nanos) = ts.to_unix();
                secs * 1000 + u64::from(nanos) / 1_000_000
            })
            .unwrap_or(0)
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses the id back out of a processing report or a log line field.
///
/// ```
/// use qtc_domain::NotificationId;
///
/// let id = NotificationId::new();
/// let from_report: NotificationId = id.to_string().parse().unwrap();
/// assert_eq!(from_report, id);
/// ```
impl FromStr for NotificationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for NotificationId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
