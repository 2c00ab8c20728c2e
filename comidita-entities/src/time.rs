use std::{fmt, time::Duration};

use time::{format_description::well_known::Rfc3339, OffsetDateTime};

pub trait InnerTimestampConverter: Clone + Copy + PartialEq + Eq + PartialOrd + Ord {
    fn into_inner(ts: OffsetDateTime) -> i64;

    fn from_inner(ts: i64) -> OffsetDateTime;

    fn units_per_second() -> i64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SecondsTimestampConverter;

impl InnerTimestampConverter for SecondsTimestampConverter {
    fn into_inner(ts: OffsetDateTime) -> i64 {
        ts.unix_timestamp()
    }

    fn from_inner(ts: i64) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(ts).unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }

    fn units_per_second() -> i64 {
        1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MillisecondsTimestampConverter;

impl InnerTimestampConverter for MillisecondsTimestampConverter {
    fn into_inner(ts: OffsetDateTime) -> i64 {
        (ts.unix_timestamp_nanos() / 1_000_000) as i64
    }

    fn from_inner(ts: i64) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(ts) * 1_000_000)
            .unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }

    fn units_per_second() -> i64 {
        1_000
    }
}

/// A generic UTC timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenericTimestamp<C: InnerTimestampConverter>(i64, std::marker::PhantomData<C>);

impl<C: InnerTimestampConverter> GenericTimestamp<C> {
    pub fn now() -> Self {
        OffsetDateTime::now_utc().into()
    }

    pub const fn from_inner(from: i64) -> Self {
        Self(from, std::marker::PhantomData)
    }

    pub const fn into_inner(self) -> i64 {
        self.0
    }

    pub fn from_seconds(seconds: i64) -> Self {
        Self::from_inner(seconds * C::units_per_second())
    }

    pub fn from_milliseconds(milliseconds: i64) -> Self {
        Self::from_inner(milliseconds * C::units_per_second() / 1_000)
    }

    pub fn into_seconds(self) -> i64 {
        self.0 / C::units_per_second()
    }

    pub fn into_milliseconds(self) -> i64 {
        self.0 * 1_000 / C::units_per_second()
    }

    /// Elapsed time between `earlier` and `self`, zero if `earlier` lies in the future.
    pub fn duration_since(self, earlier: Self) -> Duration {
        let delta_ms = (self.into_milliseconds() - earlier.into_milliseconds()).max(0);
        Duration::from_millis(delta_ms as u64)
    }

    pub fn checked_add(self, duration: Duration) -> Option<Self> {
        let units = i64::try_from(duration.as_millis())
            .ok()?
            .checked_mul(C::units_per_second())?
            / 1_000;
        self.0.checked_add(units).map(Self::from_inner)
    }
}

impl<C: InnerTimestampConverter> From<OffsetDateTime> for GenericTimestamp<C> {
    fn from(from: OffsetDateTime) -> Self {
        Self::from_inner(C::into_inner(from))
    }
}

impl<C: InnerTimestampConverter> From<GenericTimestamp<C>> for OffsetDateTime {
    fn from(from: GenericTimestamp<C>) -> Self {
        C::from_inner(from.0)
    }
}

impl<C: InnerTimestampConverter> fmt::Display for GenericTimestamp<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), std::fmt::Error> {
        let dt = OffsetDateTime::from(*self);
        match dt.format(&Rfc3339) {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

pub type Timestamp = GenericTimestamp<SecondsTimestampConverter>;

pub type TimestampMs = GenericTimestamp<MillisecondsTimestampConverter>;

impl From<TimestampMs> for Timestamp {
    fn from(from: TimestampMs) -> Self {
        Self::from_milliseconds(from.into_milliseconds())
    }
}
