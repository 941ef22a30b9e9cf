use std::fmt;
use anyhow::Result;

use crate::cue_matcher::LineMatcher;
use crate::errors::SubtitleError;
use crate::timestamp::Timestamp;

// @module: Streaming detection of timestamp ordering violations

/// The two classes of ordering violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapKind {
    /// A cue whose end precedes its own start
    IntraEntryInversion,

    /// A cue that starts before the previous cue has ended
    CrossEntryInversion,
}

impl OverlapKind {
    /// Stable machine-distinguishable discriminator on the report line
    pub fn tag(&self) -> u8 {
        match self {
            OverlapKind::IntraEntryInversion => 1,
            OverlapKind::CrossEntryInversion => 2,
        }
    }
}

/// One detected violation.
///
/// `conflicting_end` is the cue's own end for an intra-entry inversion and
/// the previous cue's end for a cross-entry inversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapReport {
    /// Which class of inversion was detected
    pub kind: OverlapKind,

    /// Counter of the cue the violation belongs to
    pub counter: u64,

    /// Start timestamp of the offending cue
    pub start: Timestamp,

    /// The end timestamp the start collides with
    pub conflicting_end: Timestamp,
}

impl fmt::Display for OverlapReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {}: {} overlaps {}.",
            self.kind.tag(),
            self.counter,
            self.start,
            self.conflicting_end
        )
    }
}

/// Single-pass scanner over the lines of one SRT file.
///
/// State is one previous end timestamp plus the most recent counter line;
/// detection is strictly local to the immediately preceding cue. The
/// counter read from a counter line labels the *next* header line, the way
/// a counter precedes its header in the SRT structure. One scanner serves
/// one run; build a fresh one per file.
#[derive(Debug)]
pub struct OverlapScanner {
    // @field: Line shape matcher, owned per scanner
    matcher: LineMatcher,

    // @field: End of the most recently scanned cue, starts at midnight
    previous_end: Timestamp,

    // @field: Counter that will label the next header line
    pending_counter: u64,
}

impl OverlapScanner {
    /// Create a scanner with epoch state
    pub fn new() -> Self {
        OverlapScanner {
            matcher: LineMatcher::new(),
            previous_end: Timestamp::default(),
            pending_counter: 0,
        }
    }

    /// Feed one raw line; returns zero, one, or two reports.
    ///
    /// Counter lines update the pending counter and never report. Lines
    /// that are neither counters nor headers are skipped. A header line is
    /// checked for both inversion classes against normalized
    /// total-microseconds order, then its end becomes the previous end.
    pub fn scan_line(&mut self, line: &str) -> Result<Vec<OverlapReport>> {
        if self.matcher.is_counter_line(line) {
            let digits = line.trim_end_matches(['\r', '\n']);
            self.pending_counter = digits
                .parse()
                .map_err(|_| SubtitleError::InvalidCounter(digits.to_string()))?;
            return Ok(Vec::new());
        }

        let Some(parts) = self.matcher.match_header(line) else {
            return Ok(Vec::new());
        };

        let start = Timestamp::parse(parts.start)?;
        let end = Timestamp::parse(parts.end)?;

        let mut reports = Vec::new();

        if end.total_micros() < start.total_micros() {
            reports.push(OverlapReport {
                kind: OverlapKind::IntraEntryInversion,
                counter: self.pending_counter,
                start,
                conflicting_end: end,
            });
        }

        if start.total_micros() < self.previous_end.total_micros() {
            reports.push(OverlapReport {
                kind: OverlapKind::CrossEntryInversion,
                counter: self.pending_counter,
                start,
                conflicting_end: self.previous_end,
            });
        }

        self.previous_end = end;

        Ok(reports)
    }

    /// Scan a whole line sequence and collect every report in order
    pub fn scan<I>(&mut self, lines: I) -> Result<Vec<OverlapReport>>
    where
        I: IntoIterator<Item = String>,
    {
        let mut reports = Vec::new();
        for line in lines {
            reports.extend(self.scan_line(&line)?);
        }
        Ok(reports)
    }
}

impl Default for OverlapScanner {
    fn default() -> Self {
        Self::new()
    }
}
