//! Shared primitives for snapsort: the album decryption key, the title-id
//! cipher transform, region tags, and folder-name sanitization.

pub mod keys;
pub mod region;
pub mod sanitize;
pub mod titleid;

pub use keys::{KeyError, SecretKey};
pub use region::{RegionTag, strip_region_suffix};
pub use sanitize::{UNKNOWN_TITLE, folder_name};
pub use titleid::{CANONICAL_TITLE_ID_LEN, RAW_TITLE_ID_LEN, TitleIdError, decrypt_title_id};
