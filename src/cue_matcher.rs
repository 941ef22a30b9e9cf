use regex::Regex;

// @module: Recognition of SRT counter lines and timestamp header lines

/// Literal separator between the two timestamps of a header line
pub const HEADER_SEPARATOR: &str = " --> ";

/// The two tokens of a header line plus whatever followed them.
///
/// `tail` is the raw byte tail after the fixed arrow pattern: positioning
/// or styling text and the original line terminator, preserved verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderParts<'a> {
    /// Start timestamp token (`HH:MM:SS,mmm`)
    pub start: &'a str,

    /// End timestamp token (`HH:MM:SS,mmm`)
    pub end: &'a str,

    /// Everything after the arrow pattern, terminator included
    pub tail: &'a str,
}

/// Matcher for the two line shapes the core interprets.
///
/// Holds its compiled patterns; construct once and reuse for a whole run.
/// No global state is involved, each engine or scanner owns its own.
#[derive(Debug)]
pub struct LineMatcher {
    header: Regex,
    counter: Regex,
}

impl LineMatcher {
    /// Compile the header and counter patterns
    pub fn new() -> Self {
        // Fixed patterns, compilation cannot fail
        LineMatcher {
            header: Regex::new(r"^(\d{2}:\d{2}:\d{2},\d{3}) --> (\d{2}:\d{2}:\d{2},\d{3})")
                .unwrap(),
            counter: Regex::new(r"^\d+\r?\n?$").unwrap(),
        }
    }

    /// True iff the line begins with `HH:MM:SS,mmm --> HH:MM:SS,mmm`.
    ///
    /// Prefix match: trailing content does not affect the decision.
    pub fn is_header_line(&self, line: &str) -> bool {
        self.header.is_match(line)
    }

    /// True iff the line is decimal digits followed only by its terminator
    pub fn is_counter_line(&self, line: &str) -> bool {
        self.counter.is_match(line)
    }

    /// Split a header-shaped string on the arrow separator.
    ///
    /// The second half has its line terminator trimmed. Returns `None`
    /// when the separator is absent.
    pub fn split_header<'a>(&self, header: &'a str) -> Option<(&'a str, &'a str)> {
        let (start, rest) = header.split_once(HEADER_SEPARATOR)?;
        Some((start, rest.trim_end_matches(['\r', '\n'])))
    }

    /// Match a raw line against the header pattern and break it apart.
    ///
    /// Returns `None` for non-header lines. For header lines, the start and
    /// end tokens come from the matched prefix only, so trailing styling
    /// text never bleeds into the end token; it lands in `tail` instead.
    pub fn match_header<'a>(&self, line: &'a str) -> Option<HeaderParts<'a>> {
        let matched = self.header.find(line)?;
        let (start, end) = self.split_header(&line[..matched.end()])?;
        Some(HeaderParts {
            start,
            end,
            tail: &line[matched.end()..],
        })
    }
}

impl Default for LineMatcher {
    fn default() -> Self {
        Self::new()
    }
}
