//! The remote title catalog: download, XML parsing, name cleanup, and the
//! decrypt loop that turns the catalog's encrypted title ids into canonical
//! ones ready to merge into the local database.

pub mod clean;
pub mod error;
pub mod fetch;
pub mod release;

pub use clean::{clean_release_name, split_title_ids};
pub use error::CatalogError;
pub use fetch::{CATALOG_URL, fetch_title_map, title_map_from_file, title_map_from_releases};
pub use release::{CatalogRelease, parse_catalog, parse_catalog_file};
