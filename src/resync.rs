use std::io::Write;
use anyhow::{Context, Result};
use log::debug;

use crate::cue_matcher::{HEADER_SEPARATOR, LineMatcher};
use crate::timestamp::Timestamp;

// @module: Constant-offset resynchronisation of header lines

/// Shifts every header line of a stream by a constant signed offset.
///
/// The float offset is split once at construction: whole seconds by
/// `floor`, the remaining fraction rounded to microseconds. Both parts are
/// applied identically to the start and end timestamp of each header line,
/// then re-normalized on the 24-hour clock. Non-header lines, and header
/// lines whose start falls outside the optional bounds window, pass
/// through byte-identical.
#[derive(Debug)]
pub struct ResyncEngine {
    // @field: Line shape matcher, owned per engine
    matcher: LineMatcher,

    // @field: floor(offset) in seconds, may be negative
    whole_seconds: i64,

    // @field: Rounded fractional part in microseconds, always 0..1_000_000
    fractional_micros: i64,

    // @field: Inclusive window on the start timestamp, in total microseconds
    bounds: Option<(u64, u64)>,
}

impl ResyncEngine {
    /// Create an engine for the given signed fractional-second offset
    pub fn new(offset_seconds: f64) -> Self {
        let whole = offset_seconds.floor();
        let fractional_micros = ((offset_seconds - whole) * 1_000_000.0).round() as i64;

        ResyncEngine {
            matcher: LineMatcher::new(),
            whole_seconds: whole as i64,
            fractional_micros,
            bounds: None,
        }
    }

    /// Restrict the shift to header lines whose start timestamp falls
    /// inside `[begin, end]`; anything outside passes through unshifted
    pub fn with_bounds(mut self, begin: Timestamp, end: Timestamp) -> Self {
        self.bounds = Some((begin.total_micros(), end.total_micros()));
        self
    }

    /// Transform a single raw line.
    ///
    /// Returns `Ok(None)` when the line must be copied unchanged (not a
    /// header line, or start outside the bounds window). Returns the
    /// re-rendered line otherwise, with the original tail after the arrow
    /// pattern reattached verbatim.
    pub fn resync_line(&self, line: &str) -> Result<Option<String>> {
        let Some(parts) = self.matcher.match_header(line) else {
            return Ok(None);
        };

        let start = Timestamp::parse(parts.start)?;

        if let Some((low, high)) = self.bounds {
            let at = start.total_micros();
            if at < low || at > high {
                debug!("Header outside bounds window, left unshifted: {}", parts.start);
                return Ok(None);
            }
        }

        let end = Timestamp::parse(parts.end)?;

        let start = start.shifted(self.whole_seconds, self.fractional_micros);
        let end = end.shifted(self.whole_seconds, self.fractional_micros);

        Ok(Some(format!(
            "{}{}{}{}",
            start, HEADER_SEPARATOR, end, parts.tail
        )))
    }

    /// Stream lines through the engine into a sink, one line at a time.
    ///
    /// Returns the number of header lines that were shifted.
    pub fn resync<I, W>(&self, lines: I, sink: &mut W) -> Result<usize>
    where
        I: IntoIterator<Item = String>,
        W: Write,
    {
        let mut shifted = 0;

        for line in lines {
            match self.resync_line(&line)? {
                Some(rendered) => {
                    sink.write_all(rendered.as_bytes())
                        .context("Failed to write resynced header line")?;
                    shifted += 1;
                }
                None => {
                    sink.write_all(line.as_bytes())
                        .context("Failed to write passthrough line")?;
                }
            }
        }

        Ok(shifted)
    }
}
