//! Durations and time points (`spec.md` §3 "duration" and "time point"; wire
//! format §6: "duration = tick count only", "time point = duration since
//! epoch").
//!
//! The reference implementation (`paralogi/memserial`) represents a
//! duration as a tick count plus a `std::ratio`-style compile-time
//! numerator/denominator, and ships one named metatype per common ratio
//! (`nanoseconds`, `milliseconds`, `seconds`, ...). Rust const generics let
//! one [`Duration`] type cover the whole family instead of one type per
//! ratio; the `type_aliases` module below supplies the same named
//! shorthands for ergonomics.

use core::marker::PhantomData;

use crate::cursor::{ReadCursor, WriteCursor};
use crate::endian::ByteOrder;
use crate::error::Result;
use crate::hash::StructuralHasher;
use crate::shape::{Decode, Encode, Family, Shape};
use crate::sink::{Print, Sink};

/// A tick count scaled by a compile-time `NUM/DENOM` ratio relative to
/// seconds, e.g. `Duration<i64, 1, 1_000_000_000>` is a count of
/// nanoseconds.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Duration<Rep, const NUM: i64 = 1, const DENOM: i64 = 1> {
    ticks: Rep,
}

impl<Rep, const NUM: i64, const DENOM: i64> Duration<Rep, NUM, DENOM> {
    /// Builds a duration from a raw tick count.
    pub const fn from_ticks(ticks: Rep) -> Duration<Rep, NUM, DENOM> {
        Duration { ticks }
    }

    /// Returns the raw tick count.
    pub const fn ticks(&self) -> Rep
    where
        Rep: Copy,
    {
        self.ticks
    }
}

impl<Rep: Shape, const NUM: i64, const DENOM: i64> Shape for Duration<Rep, NUM, DENOM> {
    const FAMILY: Family = Family::Duration;
    const ALIAS: &'static str = "duration";

    fn structural_hash(hasher: &mut StructuralHasher) {
        hasher
            .fold(Self::FAMILY as u32)
            .fold(NUM as u32)
            .fold(DENOM as u32);
        hasher.nested(|h| Rep::structural_hash(h));
    }

    fn static_size() -> Option<usize> {
        Rep::static_size()
    }
}

impl<Rep: Encode, const NUM: i64, const DENOM: i64> Encode for Duration<Rep, NUM, DENOM> {
    fn byte_size(&self) -> usize {
        self.ticks.byte_size()
    }

    fn encode<O: ByteOrder>(&self, cursor: &mut WriteCursor<'_, O>) -> Result<()> {
        self.ticks.encode(cursor)
    }
}

impl<'de, Rep: Decode<'de>, const NUM: i64, const DENOM: i64> Decode<'de> for Duration<Rep, NUM, DENOM> {
    fn validate<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<()> {
        Rep::validate(cursor)
    }

    fn decode<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<Self> {
        Ok(Duration { ticks: Rep::decode(cursor)? })
    }
}

impl<Rep: Print, const NUM: i64, const DENOM: i64> Print for Duration<Rep, NUM, DENOM> {
    fn print<S: Sink>(&self, sink: &mut S, indent: usize) -> Result<()> {
        self.ticks.print(sink, indent)?;
        sink.write_str("@")?;
        sink.write_int(NUM as i128)?;
        sink.write_str("/")?;
        sink.write_int(DENOM as i128)
    }
}

/// Named ratio aliases matching the reference implementation's
/// `nanoseconds`/`milliseconds`/... metatypes.
pub mod type_aliases {
    use super::Duration;

    pub type Nanos<Rep = i64> = Duration<Rep, 1, 1_000_000_000>;
    pub type Micros<Rep = i64> = Duration<Rep, 1, 1_000_000>;
    pub type Millis<Rep = i64> = Duration<Rep, 1, 1_000>;
    pub type Seconds<Rep = i64> = Duration<Rep, 1, 1>;
    pub type Minutes<Rep = i64> = Duration<Rep, 60, 1>;
    pub type Hours<Rep = i64> = Duration<Rep, 3_600, 1>;
}

/// A point in time relative to a [`Clock`]'s epoch, stored as a
/// [`Duration`] since that epoch (`spec.md` §3: "time point = duration
/// since epoch").
pub trait Clock {
    /// Identifies this clock in the structural hash, so a
    /// `TimePoint<SystemClock, _>` and a `TimePoint<SteadyClock, _>` of
    /// otherwise identical representation never compare compatible.
    const CLOCK_ID: u32;
}

/// Wall-clock time, matching the reference implementation's
/// `std::chrono::system_clock`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SystemClock;

impl Clock for SystemClock {
    const CLOCK_ID: u32 = 1;
}

/// Monotonic time, matching the reference implementation's
/// `std::chrono::steady_clock`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SteadyClock;

impl Clock for SteadyClock {
    const CLOCK_ID: u32 = 2;
}

/// A point in time: a [`Duration`] measured from `C`'s epoch.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimePoint<C, Rep, const NUM: i64 = 1, const DENOM: i64 = 1_000_000_000> {
    since_epoch: Duration<Rep, NUM, DENOM>,
    _clock: PhantomData<C>,
}

impl<C, Rep, const NUM: i64, const DENOM: i64> TimePoint<C, Rep, NUM, DENOM> {
    /// Builds a time point from a duration since its clock's epoch.
    pub const fn from_duration_since_epoch(since_epoch: Duration<Rep, NUM, DENOM>) -> Self {
        TimePoint { since_epoch, _clock: PhantomData }
    }

    /// Returns the duration since this clock's epoch.
    pub fn duration_since_epoch(&self) -> Duration<Rep, NUM, DENOM>
    where
        Rep: Copy,
    {
        self.since_epoch
    }
}

impl<C: Clock, Rep: Shape, const NUM: i64, const DENOM: i64> Shape for TimePoint<C, Rep, NUM, DENOM> {
    const FAMILY: Family = Family::TimePoint;
    const ALIAS: &'static str = "time_point";

    fn structural_hash(hasher: &mut StructuralHasher) {
        hasher.fold(Self::FAMILY as u32).fold(C::CLOCK_ID);
        hasher.nested(|h| Duration::<Rep, NUM, DENOM>::structural_hash(h));
    }

    fn static_size() -> Option<usize> {
        Duration::<Rep, NUM, DENOM>::static_size()
    }
}

impl<C: Clock, Rep: Encode, const NUM: i64, const DENOM: i64> Encode for TimePoint<C, Rep, NUM, DENOM> {
    fn byte_size(&self) -> usize {
        self.since_epoch.byte_size()
    }

    fn encode<O: ByteOrder>(&self, cursor: &mut WriteCursor<'_, O>) -> Result<()> {
        self.since_epoch.encode(cursor)
    }
}

impl<'de, C: Clock, Rep: Decode<'de>, const NUM: i64, const DENOM: i64> Decode<'de>
    for TimePoint<C, Rep, NUM, DENOM>
{
    fn validate<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<()> {
        Duration::<Rep, NUM, DENOM>::validate(cursor)
    }

    fn decode<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<Self> {
        Ok(TimePoint {
            since_epoch: Duration::decode(cursor)?,
            _clock: PhantomData,
        })
    }
}

impl<C: Clock, Rep: Print, const NUM: i64, const DENOM: i64> Print for TimePoint<C, Rep, NUM, DENOM> {
    fn print<S: Sink>(&self, sink: &mut S, indent: usize) -> Result<()> {
        self.since_epoch.print(sink, indent)?;
        sink.write_str(" since epoch")
    }
}
