//! snapsort CLI
//!
//! Organizes and timestamps the screenshots and clips a console writes to
//! its album folder, sorting them into per-game directories.

use std::path::{Path, PathBuf};

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use snapsort_core::keys::SecretKey;
use snapsort_db::{DbError, TitleDb};
use snapsort_lib::{
    MediaKind, OrganizeOptions, OrganizeProgress, OrganizeSummary, organize_media, scan_media,
};

#[derive(Parser)]
#[command(name = "snapsort", version)]
#[command(
    about = "Automatically organize and timestamp your console screenshots and clips",
    long_about = None
)]
struct Cli {
    /// The 'Nintendo/Album' folder from your SD card
    #[arg(value_name = "ALBUMPATH")]
    album_path: PathBuf,

    /// Update the cached games list via the online database (requires the key file)
    #[arg(short = 'u', long)]
    update_cache: bool,

    /// Include the game region - USA, JPN, etc. - in the folder name
    #[arg(short = 'r', long)]
    include_regions: bool,

    /// Overwrite destination files that already exist
    #[arg(long)]
    overwrite: bool,

    /// Do not organize video (.mp4) files
    #[arg(long)]
    no_videos: bool,

    /// Do not organize screenshot (.jpg) files
    #[arg(long)]
    no_screenshots: bool,

    /// Don't print progress to the console
    #[arg(short, long)]
    quiet: bool,

    /// Path to the decryption key file
    #[arg(long, default_value = "key.txt")]
    key: PathBuf,

    /// Path to the cached title database
    #[arg(long, default_value = "gameids.json")]
    db: PathBuf,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let console = Console { quiet: cli.quiet };

    if cli.no_screenshots && cli.no_videos {
        console.say("Not transferring screenshots or videos. Exiting.");
        return;
    }

    let db = match load_title_db(&cli, &console) {
        Ok(db) => db,
        Err(message) => {
            eprintln!(
                "{} {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                message,
            );
            std::process::exit(1);
        }
    };

    // Users often point at the card's Nintendo/ folder; descend into Album/
    // when it's there.
    let album_root = {
        let nested = cli.album_path.join("Album");
        if nested.is_dir() { nested } else { cli.album_path.clone() }
    };

    let options = OrganizeOptions {
        include_regions: cli.include_regions,
        overwrite: cli.overwrite,
    };

    if !cli.no_screenshots {
        run_batch(MediaKind::Screenshot, &album_root, &db, options, &console);
    }
    if !cli.no_videos {
        run_batch(MediaKind::Video, &album_root, &db, options, &console);
    }

    console.say("Done!");
}

/// Stdout reporting that honors --quiet. Errors always go to stderr.
struct Console {
    quiet: bool,
}

impl Console {
    fn say(&self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }
}

/// Load the cached database, refreshing it from the remote catalog when
/// requested. Returns a user-facing message on fatal problems.
fn load_title_db(cli: &Cli, console: &Console) -> Result<TitleDb, String> {
    console.say("Reading cached title database...");

    let mut db = match TitleDb::load(&cli.db) {
        Ok(db) => db,
        Err(e) => {
            if !cli.update_cache {
                return Err(format!(
                    "{e}\nRerun with --update-cache (with the key file at {}) to rebuild it.",
                    cli.key.display(),
                ));
            }
            match e {
                DbError::Missing(_) | DbError::Corrupt { .. } => {
                    log::warn!("{e}; rebuilding from the remote catalog");
                    TitleDb::new()
                }
                other => return Err(other.to_string()),
            }
        }
    };

    if cli.update_cache {
        console.say("Updating the title database from the remote catalog...");
        let key = SecretKey::load(&cli.key).map_err(|e| e.to_string())?;
        let incoming = snapsort_catalog::fetch_title_map(&key).map_err(|e| e.to_string())?;
        let added = db.merge_updates(incoming);
        db.persist(&cli.db).map_err(|e| e.to_string())?;
        console.say(&format!(
            "{} Database updated: {} new titles ({} total).",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            added,
            db.len(),
        ));
    }

    Ok(db)
}

/// Scan and organize one media batch, rendering progress as it goes.
fn run_batch(
    kind: MediaKind,
    album_root: &Path,
    db: &TitleDb,
    options: OrganizeOptions,
    console: &Console,
) {
    let files = match scan_media(album_root, kind) {
        Ok(files) => files,
        Err(e) => {
            eprintln!(
                "{} Failed to scan for {}: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                kind.label(),
                e,
            );
            std::process::exit(1);
        }
    };

    if files.is_empty() {
        console.say(&format!("No {} found!", kind.label()));
        return;
    }

    console.say(&format!("Organizing {} {}...", files.len(), kind.label()));

    let bar = if console.quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("  [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("=> "),
        );
        bar
    };

    let progress = |event: OrganizeProgress| match event {
        OrganizeProgress::FileDone { skipped, .. } => {
            bar.inc(1);
            if skipped > 0 {
                bar.set_message(format!("({skipped} skipped; already exist)"));
            }
        }
        OrganizeProgress::SkippedInvalid { file_name, reason } => {
            bar.inc(1);
            bar.println(format!("Invalid media name {file_name:?}: {reason}"));
        }
        OrganizeProgress::Done => {}
    };

    match organize_media(album_root, &files, db, options, &progress) {
        Ok(summary) => {
            bar.finish_and_clear();
            report_summary(kind, &summary, console);
        }
        Err(e) => {
            bar.finish_and_clear();
            eprintln!(
                "{} Organizing {} failed: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                kind.label(),
                e,
            );
            std::process::exit(1);
        }
    }
}

fn report_summary(kind: MediaKind, summary: &OrganizeSummary, console: &Console) {
    console.say(&format!(
        "{} Organized {} of {} {} ({} skipped; already exist).",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        summary.copied,
        summary.processed,
        kind.label(),
        summary.skipped,
    ));
    if summary.invalid > 0 {
        console.say(&format!(
            "  {} file(s) had unparseable names and were left in place.",
            summary.invalid,
        ));
    }
    for error in &summary.errors {
        eprintln!("  {error}");
    }
}
