//! Event parser for the remote release catalog.

use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::CatalogError;

/// A single `<release>` element from the catalog.
///
/// Only the three fields the organizer needs are kept; the rest of the
/// schema is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRelease {
    /// Raw encrypted title-id list, as stored: possibly comma- or `+`-joined,
    /// possibly carrying `(vXXXXX)` version annotations.
    pub title_ids: Option<String>,
    /// Declared region string (e.g., "USA", "JPN").
    pub region: Option<String>,
    /// Declared name, including whatever revision noise the catalog stores.
    pub name: Option<String>,
}

/// Parse every `<release>` element out of a catalog document.
pub fn parse_catalog<R: BufRead>(reader: R) -> Result<Vec<CatalogRelease>, CatalogError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut releases = Vec::new();
    let mut current: Option<CatalogRelease> = None;
    let mut current_tag = String::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if tag_name == "release" {
                    current = Some(CatalogRelease::default());
                } else {
                    current_tag = tag_name;
                }
            }
            Event::Text(ref e) => {
                if let Some(ref mut release) = current {
                    let text = e.unescape()?.to_string();
                    match current_tag.as_str() {
                        "titleid" => release.title_ids = Some(text),
                        "region" => release.region = Some(text),
                        "name" => release.name = Some(text),
                        _ => {}
                    }
                }
            }
            Event::End(ref e) => {
                if e.name().as_ref() == b"release" {
                    if let Some(release) = current.take() {
                        releases.push(release);
                    }
                } else {
                    current_tag.clear();
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(releases)
}

/// Parse a catalog document from a file path.
pub fn parse_catalog_file(path: &std::path::Path) -> Result<Vec<CatalogRelease>, CatalogError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    parse_catalog(reader)
}
