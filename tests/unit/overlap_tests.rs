/*!
 * Tests for the streaming overlap scanner
 */

use anyhow::Result;
use srtfix::overlap::{OverlapKind, OverlapScanner};
use srtfix::timestamp::Timestamp;

/// A cue whose end precedes its own start reports an intra-entry
/// inversion labelled with the counter of its preceding counter line
#[test]
fn test_scan_withEndBeforeStart_shouldReportIntraEntryInversion() -> Result<()> {
    let mut scanner = OverlapScanner::new();

    assert!(scanner.scan_line("7\n")?.is_empty());
    let reports = scanner.scan_line("00:00:05,000 --> 00:00:03,000\n")?;

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].kind, OverlapKind::IntraEntryInversion);
    assert_eq!(reports[0].counter, 7);
    assert_eq!(reports[0].to_string(), "1 7: 00:00:05,000 overlaps 00:00:03,000.");
    Ok(())
}

/// A cue starting before the previous cue has ended reports a
/// cross-entry inversion against the retained previous end
#[test]
fn test_scan_withStartBeforePreviousEnd_shouldReportCrossEntryInversion() -> Result<()> {
    let mut scanner = OverlapScanner::new();

    assert!(scanner.scan_line("1\n")?.is_empty());
    assert!(scanner.scan_line("00:00:01,000 --> 00:00:10,000\n")?.is_empty());
    assert!(scanner.scan_line("First cue text.\n")?.is_empty());
    assert!(scanner.scan_line("\n")?.is_empty());
    assert!(scanner.scan_line("2\n")?.is_empty());

    let reports = scanner.scan_line("00:00:08,000 --> 00:00:12,000\n")?;
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].kind, OverlapKind::CrossEntryInversion);
    assert_eq!(reports[0].to_string(), "2 2: 00:00:08,000 overlaps 00:00:10,000.");
    Ok(())
}

/// Strictly increasing, non-overlapping cues produce no reports
#[test]
fn test_scan_withWellOrderedCues_shouldReportNothing() -> Result<()> {
    let lines = [
        "1\n",
        "00:00:01,000 --> 00:00:04,000\n",
        "First.\n",
        "\n",
        "2\n",
        "00:00:05,000 --> 00:00:09,000\n",
        "Second.\n",
        "\n",
        "3\n",
        "00:00:10,000 --> 00:00:14,000\n",
        "Third.\n",
    ];

    let mut scanner = OverlapScanner::new();
    let reports = scanner.scan(lines.iter().map(|s| s.to_string()))?;
    assert!(reports.is_empty());
    Ok(())
}

/// Back-to-back cues sharing a boundary instant are not inversions;
/// both checks are strict
#[test]
fn test_scan_withTouchingCues_shouldReportNothing() -> Result<()> {
    let mut scanner = OverlapScanner::new();
    assert!(scanner.scan_line("00:00:01,000 --> 00:00:04,000\n")?.is_empty());
    assert!(scanner.scan_line("00:00:04,000 --> 00:00:06,000\n")?.is_empty());
    // Zero-length cue: end equals start, still no report
    assert!(scanner.scan_line("00:00:06,000 --> 00:00:06,000\n")?.is_empty());
    Ok(())
}

/// A cue can trip both checks at once: intra-entry first, then
/// cross-entry, both under the same counter
#[test]
fn test_scan_withBothInversions_shouldReportBothInOrder() -> Result<()> {
    let mut scanner = OverlapScanner::new();
    assert!(scanner.scan_line("00:00:01,000 --> 00:00:10,000\n")?.is_empty());
    assert!(scanner.scan_line("5\n")?.is_empty());

    let reports = scanner.scan_line("00:00:08,000 --> 00:00:02,000\n")?;
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].to_string(), "1 5: 00:00:08,000 overlaps 00:00:02,000.");
    assert_eq!(reports[1].to_string(), "2 5: 00:00:08,000 overlaps 00:00:10,000.");
    Ok(())
}

/// The previous end advances to this cue's end even when it reported,
/// so detection stays local to the immediately preceding cue
#[test]
fn test_scan_withRecoveredOrdering_shouldCompareAgainstLatestEnd() -> Result<()> {
    let mut scanner = OverlapScanner::new();
    assert!(scanner.scan_line("00:00:01,000 --> 00:00:07,000\n")?.is_empty());

    // Inverted cue, ends early at 6 s
    let reports = scanner.scan_line("00:00:08,000 --> 00:00:06,000\n")?;
    assert_eq!(reports.len(), 1);

    // 7 s is after the new previous end of 6 s: clean
    assert!(scanner.scan_line("00:00:07,000 --> 00:00:09,000\n")?.is_empty());
    Ok(())
}

/// Counter lines label the next header line, not the current one
#[test]
fn test_scan_withCounterBetweenHeaders_shouldLabelNextHeader() -> Result<()> {
    let mut scanner = OverlapScanner::new();
    assert!(scanner.scan_line("3\n")?.is_empty());
    assert!(scanner.scan_line("00:00:01,000 --> 00:00:10,000\n")?.is_empty());
    assert!(scanner.scan_line("12\r\n")?.is_empty());

    let reports = scanner.scan_line("00:00:04,000 --> 00:00:11,000\n")?;
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].counter, 12);
    Ok(())
}

/// Without any counter line the reports carry counter zero
#[test]
fn test_scan_withNoCounterLines_shouldUseZeroCounter() -> Result<()> {
    let mut scanner = OverlapScanner::new();
    let reports = scanner.scan_line("00:00:05,000 --> 00:00:03,000\n")?;
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].counter, 0);
    assert_eq!(reports[0].start, Timestamp::new(0, 0, 5, 0));
    Ok(())
}
