//! Filesystem-safe folder names for organized media.

use crate::region::strip_region_suffix;

/// Folder used when a title id has no database entry.
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Characters other than alphanumerics that survive sanitization.
const KEEP: [char; 3] = [' ', '.', '_'];

/// Turn a display name into a folder name.
///
/// The region suffix comes off first; with `include_region` it is re-appended
/// after the rest of the name has been reduced to alphanumerics, spaces,
/// periods, and underscores with trailing whitespace removed. Idempotent for
/// either flag value.
pub fn folder_name(display: &str, include_region: bool) -> String {
    let (base, tag) = strip_region_suffix(display);

    let mut name: String = base
        .chars()
        .filter(|c| c.is_alphanumeric() || KEEP.contains(c))
        .collect();
    name.truncate(name.trim_end().len());

    if include_region {
        if let Some(tag) = tag {
            name.push_str(" (");
            name.push_str(tag.code());
            name.push(')');
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_suffix_is_dropped_by_default() {
        assert_eq!(folder_name("Test Game (USA)", false), "Test Game");
    }

    #[test]
    fn region_suffix_survives_when_requested() {
        assert_eq!(folder_name("Test Game (USA)", true), "Test Game (USA)");
    }

    #[test]
    fn unsafe_characters_are_removed() {
        assert_eq!(
            folder_name("Zelda: Breath / of *the* Wild?", false),
            "Zelda Breath  of the Wild"
        );
        assert_eq!(folder_name("v1.2_beta", false), "v1.2_beta");
    }

    #[test]
    fn trailing_whitespace_is_trimmed() {
        assert_eq!(folder_name("Game!!!", false), "Game");
        assert_eq!(folder_name("Game   ", false), "Game");
    }

    #[test]
    fn non_ascii_letters_are_kept() {
        assert_eq!(folder_name("ゼルダの伝説 (JPN)", false), "ゼルダの伝説");
        assert_eq!(folder_name("ゼルダの伝説 (JPN)", true), "ゼルダの伝説 (JPN)");
    }

    #[test]
    fn sanitization_is_idempotent() {
        for include_region in [false, true] {
            for name in ["Test Game (USA)", "Mario + Rabbids!", "ゼルダの伝説 (JPN)", ""] {
                let once = folder_name(name, include_region);
                let twice = folder_name(&once, include_region);
                assert_eq!(once, twice, "not idempotent for {name:?}");
            }
        }
    }

    #[test]
    fn unknown_parentheticals_lose_only_their_parens() {
        // Not a region tag, so the parenthetical is sanitized like any text.
        assert_eq!(folder_name("Test Game (Demo)", false), "Test Game Demo");
    }
}
