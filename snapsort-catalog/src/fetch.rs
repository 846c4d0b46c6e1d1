//! Download and decode of the remote title catalog.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use snapsort_core::keys::SecretKey;
use snapsort_core::titleid;

use crate::clean::{clean_release_name, split_title_ids};
use crate::error::CatalogError;
use crate::release::{CatalogRelease, parse_catalog_file};

/// Where the catalog lives. A single unauthenticated GET, no retry.
pub const CATALOG_URL: &str = "http://nswdb.com/xml.php";

/// Region code used when a release doesn't declare one.
const REGION_FALLBACK: &str = "UNK";

/// Download the catalog, decrypt every title id in it, and return the
/// canonical-id → `"Name (REGION)"` mapping ready to merge into the local
/// database.
///
/// The document is parsed from a temp file which is removed afterwards
/// whether or not parsing succeeded.
pub fn fetch_title_map(key: &SecretKey) -> Result<BTreeMap<String, String>, CatalogError> {
    let tmp = std::env::temp_dir().join("snapsort-catalog.xml");
    download(CATALOG_URL, &tmp)?;
    let result = title_map_from_file(&tmp, key);
    let _ = fs::remove_file(&tmp);
    result
}

fn download(url: &str, dest: &Path) -> Result<(), CatalogError> {
    log::debug!("downloading catalog from {url}");
    let response = reqwest::blocking::get(url)
        .map_err(|e| CatalogError::download(format!("GET {url}: {e}")))?;
    if !response.status().is_success() {
        return Err(CatalogError::download(format!(
            "HTTP {} for {url}",
            response.status()
        )));
    }
    let bytes = response
        .bytes()
        .map_err(|e| CatalogError::download(format!("reading response body: {e}")))?;
    fs::write(dest, &bytes)?;
    Ok(())
}

/// Parse a downloaded catalog document and run the decrypt loop over it.
pub fn title_map_from_file(
    path: &Path,
    key: &SecretKey,
) -> Result<BTreeMap<String, String>, CatalogError> {
    let releases = parse_catalog_file(path)?;
    Ok(title_map_from_releases(&releases, key))
}

/// Build the canonical-id mapping from parsed releases.
///
/// Later releases overwrite earlier ones for the same canonical id — that
/// policy applies within one fetch only; the persisted database applies its
/// own existing-wins merge on top. An id that fails to decrypt is skipped
/// without affecting the release's remaining ids.
pub fn title_map_from_releases(
    releases: &[CatalogRelease],
    key: &SecretKey,
) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();

    for release in releases {
        // Blank releases exist in the catalog.
        let Some(ref id_list) = release.title_ids else {
            continue;
        };
        let Some(ref raw_name) = release.name else {
            log::warn!("release with title ids {id_list:?} has no name, skipping");
            continue;
        };

        let name = clean_release_name(raw_name);
        let region = release.region.as_deref().unwrap_or(REGION_FALLBACK);

        for raw_id in split_title_ids(id_list) {
            match titleid::decrypt_title_id(key, &raw_id) {
                Ok(canonical) => {
                    map.insert(canonical, format!("{name} ({region})"));
                }
                Err(e) => {
                    log::warn!("skipping title id {raw_id:?} for {name:?}: {e}");
                }
            }
        }
    }

    map
}
