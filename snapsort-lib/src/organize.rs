//! Classifies album media by game and copies it into per-game folders.
//!
//! The card lays media out as `YYYY/MM/DD/<stem>.<ext>`, and each stem packs
//! the capture time and the game's canonical title id into fixed-width
//! fields:
//!
//! ```text
//! 2023061514302200-ABCDEF...          (offsets 0-13 timestamp, 17.. title id)
//! ```
//!
//! Those offsets are the device's naming convention; any change breaks
//! compatibility with real cards.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local, TimeZone};
use thiserror::Error;

use snapsort_core::sanitize::{UNKNOWN_TITLE, folder_name};
use snapsort_db::TitleDb;

/// Name of the folder created under the album root.
pub const ORGANIZED_DIR: &str = "Organized";

/// Offset of the title id within a capture stem.
const TITLE_ID_OFFSET: usize = 17;

/// The two media types the console records, processed as separate batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Screenshot,
    Video,
}

impl MediaKind {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Screenshot => "jpg",
            Self::Video => "mp4",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Screenshot => "screenshots",
            Self::Video => "videos",
        }
    }
}

/// Errors that stop an organize batch outright.
///
/// Per-file problems (bad stems, copy failures) never surface here; they
/// are collected in [`OrganizeSummary`] and the batch continues.
#[derive(Debug, Error)]
pub enum OrganizeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a single file's name could not be parsed.
#[derive(Debug, Error)]
pub enum StemError {
    #[error("file name too short to carry a timestamp and title id")]
    TooShort,

    #[error("non-numeric timestamp field {0:?}")]
    BadField(String),

    #[error("timestamp fields do not form a valid local time")]
    BadTimestamp,
}

/// Capture metadata parsed out of a media file's base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureStem {
    pub taken_at: DateTime<Local>,
    pub title_id: String,
}

impl CaptureStem {
    /// Parse the fixed-width stem fields: year `[0..4]`, month `[4..6]`,
    /// day `[6..8]`, hour `[8..10]`, minute `[10..12]`, second `[12..14]`,
    /// title id `[17..]`.
    pub fn parse(stem: &str) -> Result<Self, StemError> {
        if stem.len() <= TITLE_ID_OFFSET {
            return Err(StemError::TooShort);
        }

        let year = field(stem, 0, 4)?;
        let month = field(stem, 4, 6)?;
        let day = field(stem, 6, 8)?;
        let hour = field(stem, 8, 10)?;
        let minute = field(stem, 10, 12)?;
        let second = field(stem, 12, 14)?;

        let taken_at = Local
            .with_ymd_and_hms(year as i32, month, day, hour, minute, second)
            .single()
            .ok_or(StemError::BadTimestamp)?;

        let title_id = stem
            .get(TITLE_ID_OFFSET..)
            .ok_or(StemError::TooShort)?
            .to_string();

        Ok(Self { taken_at, title_id })
    }
}

fn field(stem: &str, start: usize, end: usize) -> Result<u32, StemError> {
    let digits = stem.get(start..end).ok_or(StemError::TooShort)?;
    digits
        .parse()
        .map_err(|_| StemError::BadField(digits.to_string()))
}

/// Options controlling organize behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrganizeOptions {
    /// Keep the ` (REGION)` suffix on destination folder names.
    pub include_regions: bool,
    /// Replace destination files that already exist.
    pub overwrite: bool,
}

/// Progress information for callbacks.
#[derive(Debug, Clone)]
pub enum OrganizeProgress {
    /// A file finished, whether copied or skipped as already present.
    FileDone {
        file_name: String,
        file_index: usize,
        total: usize,
        skipped: usize,
    },
    /// A file's name could not be parsed and the file was passed over.
    SkippedInvalid { file_name: String, reason: String },
    /// The batch is finished.
    Done,
}

/// Outcome counters for one organize batch.
#[derive(Debug, Clone, Default)]
pub struct OrganizeSummary {
    /// Files examined.
    pub processed: usize,
    /// Files copied into place.
    pub copied: usize,
    /// Files left alone because the destination already existed.
    pub skipped: usize,
    /// Files with unparseable names.
    pub invalid: usize,
    /// Per-file copy/timestamp failures.
    pub errors: Vec<String>,
}

/// Enumerate one batch of media under the fixed date-partitioned layout.
///
/// Only `YYYY/MM/DD` directory chains (all digits, fixed widths) are
/// descended into, so the `Organized` output folder is never rescanned.
/// The result is sorted lexically, which the date-prefixed naming makes
/// chronological.
pub fn scan_media(album_root: &Path, kind: MediaKind) -> Result<Vec<PathBuf>, OrganizeError> {
    let mut files = Vec::new();
    for year in numeric_dirs(album_root, 4)? {
        for month in numeric_dirs(&year, 2)? {
            for day in numeric_dirs(&month, 2)? {
                for entry in fs::read_dir(&day)? {
                    let path = entry?.path();
                    if path.is_file()
                        && path.extension().and_then(|e| e.to_str()) == Some(kind.extension())
                    {
                        files.push(path);
                    }
                }
            }
        }
    }
    files.sort();
    Ok(files)
}

fn numeric_dirs(parent: &Path, width: usize) -> Result<Vec<PathBuf>, OrganizeError> {
    let mut dirs = Vec::new();
    if !parent.is_dir() {
        return Ok(dirs);
    }
    for entry in fs::read_dir(parent)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.len() == width
            && name.bytes().all(|b| b.is_ascii_digit())
            && entry.path().is_dir()
        {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Copy one batch of media files into per-game folders under
/// `<album_root>/Organized`, restoring each file's capture time.
///
/// Files whose names don't parse are reported through `progress`, counted,
/// and skipped; the batch never aborts for a single file.
pub fn organize_media(
    album_root: &Path,
    files: &[PathBuf],
    db: &TitleDb,
    options: OrganizeOptions,
    progress: &dyn Fn(OrganizeProgress),
) -> Result<OrganizeSummary, OrganizeError> {
    let mut summary = OrganizeSummary::default();
    let total = files.len();

    for path in files {
        summary.processed += 1;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let capture = match CaptureStem::parse(&stem) {
            Ok(capture) => capture,
            Err(e) => {
                log::warn!("invalid media name {file_name:?}: {e}");
                summary.invalid += 1;
                progress(OrganizeProgress::SkippedInvalid {
                    file_name,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let folder = destination_folder(db, &capture.title_id, options.include_regions);
        let dest_dir = album_root.join(ORGANIZED_DIR).join(&folder);
        fs::create_dir_all(&dest_dir)?;

        let dest = dest_dir.join(&file_name);
        if dest.exists() && !options.overwrite {
            summary.skipped += 1;
        } else if let Err(e) = copy_with_capture_time(path, &dest, capture.taken_at) {
            log::warn!("failed to copy {file_name:?}: {e}");
            summary.errors.push(format!("{file_name}: {e}"));
        } else {
            summary.copied += 1;
        }

        progress(OrganizeProgress::FileDone {
            file_name,
            file_index: summary.processed,
            total,
            skipped: summary.skipped,
        });
    }

    progress(OrganizeProgress::Done);
    Ok(summary)
}

/// Resolve a title id to its destination folder name.
fn destination_folder(db: &TitleDb, title_id: &str, include_regions: bool) -> String {
    match db.lookup(title_id) {
        Some(display) => {
            let name = folder_name(display, include_regions);
            if name.is_empty() {
                // A display name made entirely of stripped characters.
                UNKNOWN_TITLE.to_string()
            } else {
                name
            }
        }
        None => UNKNOWN_TITLE.to_string(),
    }
}

/// Copy bytes, then set both file times to the capture timestamp.
fn copy_with_capture_time(
    source: &Path,
    dest: &Path,
    taken_at: DateTime<Local>,
) -> std::io::Result<()> {
    fs::copy(source, dest)?;
    let when = SystemTime::from(taken_at);
    let times = fs::FileTimes::new().set_accessed(when).set_modified(when);
    fs::File::options().write(true).open(dest)?.set_times(times)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_capture_stem() {
        let stem = "2023061514302200-0123456789ABCDEF0123456789ABCDEF";
        let capture = CaptureStem::parse(stem).unwrap();
        assert_eq!(capture.title_id, "0123456789ABCDEF0123456789ABCDEF");
        assert_eq!(
            capture.taken_at,
            Local.with_ymd_and_hms(2023, 6, 15, 14, 30, 22).unwrap()
        );
    }

    #[test]
    fn stems_keep_whatever_follows_the_offset() {
        // The id tail is not validated here; lookup misses resolve later.
        let capture = CaptureStem::parse("2023061514302200-X").unwrap();
        assert_eq!(capture.title_id, "X");
    }

    #[test]
    fn short_stems_are_rejected() {
        assert!(matches!(
            CaptureStem::parse("20230615143022"),
            Err(StemError::TooShort)
        ));
        assert!(matches!(CaptureStem::parse(""), Err(StemError::TooShort)));
        // Exactly at the offset still has no id tail.
        assert!(matches!(
            CaptureStem::parse("2023061514302200-"),
            Err(StemError::TooShort)
        ));
    }

    #[test]
    fn non_numeric_fields_are_rejected() {
        assert!(matches!(
            CaptureStem::parse("2023x61514302200-0123456789ABCDEF"),
            Err(StemError::BadField(_))
        ));
    }

    #[test]
    fn impossible_dates_are_rejected() {
        // Month 13.
        assert!(matches!(
            CaptureStem::parse("2023131514302200-0123456789ABCDEF"),
            Err(StemError::BadTimestamp)
        ));
        // Hour 25.
        assert!(matches!(
            CaptureStem::parse("2023061525302200-0123456789ABCDEF"),
            Err(StemError::BadTimestamp)
        ));
    }

    #[test]
    fn media_kind_extensions() {
        assert_eq!(MediaKind::Screenshot.extension(), "jpg");
        assert_eq!(MediaKind::Video.extension(), "mp4");
    }
}
