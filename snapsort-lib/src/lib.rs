//! Organize operations over a console album directory.

pub mod organize;

pub use organize::{
    CaptureStem, MediaKind, ORGANIZED_DIR, OrganizeError, OrganizeOptions, OrganizeProgress,
    OrganizeSummary, StemError, organize_media, scan_media,
};
