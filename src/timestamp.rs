use std::fmt;
use anyhow::Result;
use crate::errors::SubtitleError;

// @module: Timestamp value type and carry/borrow normalization

/// Microseconds in one second
pub const MICROS_PER_SECOND: i64 = 1_000_000;

/// Microseconds in one full 24-hour day
pub const MICROS_PER_DAY: u64 = 24 * 3_600 * 1_000_000;

/// A point in time on a 24-hour wraparound clock at microsecond resolution.
///
/// Fields are signed on purpose: applying an offset can drive any field
/// negative or past its modulus, and only [`Timestamp::normalize`] restores
/// the canonical bounds (hour 0-23, minute/second 0-59, microsecond
/// 0-999999). A `Timestamp` is a plain value, copied freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timestamp {
    // @field: Hour on the 24-hour clock
    pub hour: i64,

    // @field: Minute within the hour
    pub minute: i64,

    // @field: Second within the minute
    pub second: i64,

    // @field: Microsecond within the second
    pub microsecond: i64,
}

impl Timestamp {
    /// Create a timestamp from raw field values, normalized or not
    pub fn new(hour: i64, minute: i64, second: i64, microsecond: i64) -> Self {
        Timestamp {
            hour,
            minute,
            second,
            microsecond,
        }
    }

    /// Parse an SRT timestamp token in `HH:MM:SS,mmm` form.
    ///
    /// Strict policy: a token with fewer than three colon-separated groups,
    /// or any group that fails numeric conversion, is an error. A missing
    /// `,mmm` part is accepted as zero milliseconds (bound arguments such
    /// as `01:30:00` are common); when present it must be exactly three
    /// digits and is stored scaled to microseconds.
    pub fn parse(token: &str) -> Result<Self> {
        let trimmed = token.trim_end_matches(['\r', '\n']).trim();

        let mut groups = trimmed.splitn(3, ':');
        let (hour_text, minute_text, rest) = match (groups.next(), groups.next(), groups.next()) {
            (Some(h), Some(m), Some(rest)) => (h, m, rest),
            _ => return Err(SubtitleError::MalformedTimestamp(trimmed.to_string()).into()),
        };

        let (second_text, millis_text) = match rest.split_once(',') {
            Some((sec, millis)) => (sec, Some(millis)),
            None => (rest, None),
        };

        let hour: i64 = hour_text
            .parse()
            .map_err(|_| component_error("hours", trimmed))?;
        let minute: i64 = minute_text
            .parse()
            .map_err(|_| component_error("minutes", trimmed))?;
        let second: i64 = second_text
            .parse()
            .map_err(|_| component_error("seconds", trimmed))?;

        let microsecond = match millis_text {
            Some(millis) => {
                if millis.len() != 3 {
                    return Err(SubtitleError::MalformedTimestamp(trimmed.to_string()).into());
                }
                let millis: i64 = millis
                    .parse()
                    .map_err(|_| component_error("milliseconds", trimmed))?;
                millis * 1_000
            }
            None => 0,
        };

        Ok(Timestamp {
            hour,
            minute,
            second,
            microsecond,
        })
    }

    /// Normalize the timestamp and return it together with its absolute
    /// offset in microseconds since midnight.
    ///
    /// Carries run from the finest field to the coarsest: microseconds
    /// overflow into seconds, seconds into minutes, minutes into hours.
    /// The hour never borrows further; it wraps on the 24-hour clock.
    /// Total over any integer input, no error path.
    pub fn normalize(&self) -> (Timestamp, u64) {
        let mut t = *self;

        t.microsecond = carry_into(t.microsecond, MICROS_PER_SECOND, &mut t.second);
        t.second = carry_into(t.second, 60, &mut t.minute);
        t.minute = carry_into(t.minute, 60, &mut t.hour);
        t.hour = wrap_hour(t.hour);

        // Totals accumulate from the final field values, not the raw input
        let total = t.microsecond as u64
            + t.second as u64 * 1_000_000
            + t.minute as u64 * 60_000_000
            + t.hour as u64 * 3_600_000_000;

        (t, total)
    }

    /// Absolute offset in microseconds since midnight, after normalization
    pub fn total_micros(&self) -> u64 {
        self.normalize().1
    }

    /// Return a normalized copy shifted by whole seconds plus microseconds.
    ///
    /// Both parts may be negative; the result wraps on the 24-hour clock.
    pub fn shifted(&self, whole_seconds: i64, micros: i64) -> Timestamp {
        let shifted = Timestamp {
            hour: self.hour,
            minute: self.minute,
            second: self.second + whole_seconds,
            microsecond: self.microsecond + micros,
        };
        shifted.normalize().0
    }
}

// Carry or borrow one field into the next coarser field.
// Invariant: the returned value is in 0..modulus for any i64 input.
fn carry_into(value: i64, modulus: i64, coarser: &mut i64) -> i64 {
    if value < 0 {
        let borrow = (-value) / modulus;
        let remainder = (-value) % modulus;
        if remainder == 0 {
            // Exact-modulus borrow lands on zero with the plain carry
            *coarser -= borrow;
            0
        } else {
            *coarser -= borrow + 1;
            modulus - remainder
        }
    } else {
        *coarser += value / modulus;
        value % modulus
    }
}

// Hour wraps on the 24-hour clock instead of borrowing further
fn wrap_hour(hour: i64) -> i64 {
    if hour < 0 {
        let wrapped = (-hour) % 24;
        if wrapped == 0 { 0 } else { 24 - wrapped }
    } else {
        hour % 24
    }
}

fn component_error(component: &'static str, token: &str) -> SubtitleError {
    SubtitleError::InvalidComponent {
        component,
        token: token.to_string(),
    }
}

impl fmt::Display for Timestamp {
    /// Render as `HH:MM:SS,mmm`. Sub-millisecond precision is truncated.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02},{:03}",
            self.hour,
            self.minute,
            self.second,
            self.microsecond / 1_000
        )
    }
}
