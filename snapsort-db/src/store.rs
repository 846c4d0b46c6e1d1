//! Persistent mapping from canonical title ids to display names.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::DbError;

/// The on-disk title database.
///
/// Keys are 32-character canonical title ids, values are display names
/// (usually carrying a ` (REGION)` suffix). Stored as pretty-printed JSON
/// with sorted keys so refreshes diff cleanly; non-ASCII names are written
/// literally, not escaped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleDb {
    entries: BTreeMap<String, String>,
}

impl TitleDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the database from `path`.
    ///
    /// A missing file ([`DbError::Missing`]) and one that fails to parse
    /// ([`DbError::Corrupt`]) are distinct failures, and both are different
    /// from an empty-but-valid database. The caller decides whether a
    /// remote refresh can recover.
    pub fn load(path: &Path) -> Result<Self, DbError> {
        if !path.exists() {
            return Err(DbError::Missing(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        let entries: BTreeMap<String, String> =
            serde_json::from_str(&contents).map_err(|e| DbError::Corrupt {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(Self { entries })
    }

    /// Look up the display name for a canonical title id.
    ///
    /// A miss is a normal outcome, not an error.
    pub fn lookup(&self, title_id: &str) -> Option<&str> {
        self.entries.get(title_id).map(String::as_str)
    }

    /// Fold freshly fetched entries into the database.
    ///
    /// Ids already present keep their current name; only ids absent from the
    /// database are added. Returns the number of entries added.
    pub fn merge_updates(&mut self, incoming: BTreeMap<String, String>) -> usize {
        let before = self.entries.len();
        for (id, name) in incoming {
            self.entries.entry(id).or_insert(name);
        }
        self.entries.len() - before
    }

    /// Write the database to `path`, syncing to disk before returning.
    pub fn persist(&self, path: &Path) -> Result<(), DbError> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for TitleDb {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
