use chrono::{DateTime, Duration, Utc};

/// Where session start/end stamps come from.
///
/// Only the stamps on `Session` and `SessionSummary` read it. The countdown is
/// driven by ticks and never looks at wall time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    /// Always reports the same instant.
    Frozen(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn frozen(at: DateTime<Utc>) -> Self {
        Self::Frozen(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Frozen(at) => *at,
        }
    }
}

/// Seconds after the Unix epoch of the instant tests stamp sessions with
/// (2023-11-14T22:13:20Z).
pub const TEST_INSTANT_SECS: i64 = 1_700_000_000;

/// The test instant as a timestamp.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(TEST_INSTANT_SECS)
}

/// A clock frozen at [`fixed_now`].
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::frozen(fixed_now())
}
