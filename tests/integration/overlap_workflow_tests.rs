/*!
 * Integration tests for the end-to-end overlap scan workflow
 */

use anyhow::Result;

use srtfix::app_controller::Controller;
use crate::common;

/// Scanning a file with both inversion classes yields one diagnostic line
/// per violation, in file order
#[test]
fn test_overlap_withInvertedCues_shouldReportEachViolation() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_overlapping_subtitle(&dir, "movie.srt")?;

    let controller = Controller::new()?;
    let mut sink = Vec::new();
    let found = controller.run_overlap(&input, &mut sink)?;

    let report = String::from_utf8(sink)?;
    assert_eq!(found, 3);
    assert_eq!(
        report,
        "2 2: 00:00:08,000 overlaps 00:00:10,000.\n\
         1 7: 00:00:05,000 overlaps 00:00:03,000.\n\
         2 7: 00:00:05,000 overlaps 00:00:12,000.\n"
    );
    Ok(())
}

/// A well-ordered file produces an empty report and a zero count
#[test]
fn test_overlap_withCleanFile_shouldReportNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_subtitle(&dir, "movie.srt")?;

    let controller = Controller::new()?;
    let mut sink = Vec::new();
    let found = controller.run_overlap(&input, &mut sink)?;

    assert_eq!(found, 0);
    assert!(sink.is_empty());
    Ok(())
}

/// Text and blank lines never trip the scanner; only headers count
#[test]
fn test_overlap_withDecoyTextLines_shouldIgnoreThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    let input = common::create_test_file(
        &dir,
        "movie.srt",
        "1\n\
         00:00:01,000 --> 00:00:04,000\n\
         Text mentioning 00:00:99 times\n\
         and --> arrows in prose.\n\
         \n\
         2\n\
         00:00:05,000 --> 00:00:09,000\n\
         More text.\n",
    )?;

    let controller = Controller::new()?;
    let mut sink = Vec::new();
    assert_eq!(controller.run_overlap(&input, &mut sink)?, 0);
    Ok(())
}

/// Directory mode totals the violations across all files
#[test]
fn test_overlap_withDirectory_shouldSumAcrossFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    common::create_test_subtitle(&dir, "clean.srt")?;
    common::create_overlapping_subtitle(&dir, "broken.srt")?;

    let controller = Controller::new()?;
    let mut sink = Vec::new();
    let total = controller.run_overlap_directory(&dir, &mut sink)?;

    assert_eq!(total, 3);
    Ok(())
}

/// A non-subtitle path is rejected before scanning
#[test]
fn test_overlap_withWrongExtension_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_file(&dir, "movie.txt", "1\n")?;

    let controller = Controller::new()?;
    let mut sink = Vec::new();
    assert!(controller.run_overlap(&input, &mut sink).is_err());
    Ok(())
}
