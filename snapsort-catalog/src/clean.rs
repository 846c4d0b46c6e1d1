//! Cleanup of the noise the catalog stores around names and title-id lists.

/// Strip release-metadata noise from a catalog name.
///
/// Drops bracketed revision/version annotations like `[Rev 1]`, `[v1.01]`,
/// or `[Rev - A]`, and `(rev0)`-style parenthesized tokens, then trims the
/// ends. Other bracketed or parenthesized content is kept as-is.
pub fn clean_release_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut rest = name;

    while let Some(open) = rest.find(['[', '(']) {
        let (before, tail) = rest.split_at(open);
        out.push_str(before);

        let close = match tail.as_bytes()[0] {
            b'[' => tail.find(']'),
            _ => tail.find(')'),
        };
        match close {
            Some(end) => {
                let content = &tail[1..end];
                let drop = match tail.as_bytes()[0] {
                    b'[' => is_bracket_revision(content),
                    _ => is_paren_revision(content),
                };
                if !drop {
                    out.push_str(&tail[..=end]);
                }
                rest = &tail[end + 1..];
            }
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out.trim().to_string()
}

/// Strip `(vXXXXX)` version tokens from a title-id list and split it into
/// individual raw ids on `,` and `+`.
pub fn split_title_ids(list: &str) -> Vec<String> {
    strip_version_tokens(list)
        .split([',', '+'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Bracketed tags of the shape `Rev ...` / `v...` (revision or version
/// annotations) get dropped; everything else stays.
fn is_bracket_revision(content: &str) -> bool {
    let rest = if let Some(r) = content.strip_prefix("Rev") {
        r.strip_prefix(' ').unwrap_or(r)
    } else if let Some(r) = content.strip_prefix('v') {
        r
    } else {
        return false;
    };
    // Doubled marker, e.g. "[Rev v1.2]".
    let rest = rest.strip_prefix('v').unwrap_or(rest);
    !rest.is_empty()
        && rest
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | ',' | '_' | '-' | ' '))
}

/// Parenthesized `revN` tokens, lowercase with digits only.
fn is_paren_revision(content: &str) -> bool {
    content
        .strip_prefix("rev")
        .is_some_and(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
}

fn strip_version_tokens(list: &str) -> String {
    let mut out = String::with_capacity(list.len());
    let mut rest = list;

    while let Some(open) = rest.find('(') {
        let (before, tail) = rest.split_at(open);
        out.push_str(before);
        match tail.find(')') {
            Some(end) if tail[1..end].starts_with('v') => {
                rest = &tail[end + 1..];
            }
            Some(end) => {
                out.push_str(&tail[..=end]);
                rest = &tail[end + 1..];
            }
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_release_name() {
        assert_eq!(clean_release_name("Test Game [Rev 1]"), "Test Game");
        assert_eq!(clean_release_name("Test Game [v1.01]"), "Test Game");
        assert_eq!(clean_release_name("Test Game [Rev - A]"), "Test Game");
        assert_eq!(clean_release_name("Test Game (rev2)"), "Test Game");
        assert_eq!(clean_release_name("Test Game [Rev 1] (rev2)"), "Test Game");
    }

    #[test]
    fn clean_keeps_ordinary_tags() {
        assert_eq!(clean_release_name("Test Game (USA)"), "Test Game (USA)");
        assert_eq!(clean_release_name("Test Game [UPDATE]"), "Test Game [UPDATE]");
        assert_eq!(clean_release_name("Rev of Legends"), "Rev of Legends");
        assert_eq!(clean_release_name("Game (Revenge)"), "Game (Revenge)");
    }

    #[test]
    fn clean_handles_unbalanced_input() {
        assert_eq!(clean_release_name("Broken [Rev 1"), "Broken [Rev 1");
        assert_eq!(clean_release_name("Broken (rev2"), "Broken (rev2");
    }

    #[test]
    fn test_split_title_ids() {
        assert_eq!(
            split_title_ids("ABCDEF0102030405+1122334455667788(v131072)"),
            vec!["ABCDEF0102030405", "1122334455667788"]
        );
        assert_eq!(
            split_title_ids("ABCDEF0102030405, 1122334455667788"),
            vec!["ABCDEF0102030405", "1122334455667788"]
        );
        assert_eq!(
            split_title_ids("ABCDEF0102030405 + 1122334455667788"),
            vec!["ABCDEF0102030405", "1122334455667788"]
        );
        assert_eq!(split_title_ids("ABCDEF0102030405"), vec!["ABCDEF0102030405"]);
    }

    #[test]
    fn split_drops_empty_segments() {
        assert_eq!(split_title_ids(""), Vec::<String>::new());
        assert_eq!(split_title_ids("(v65536)"), Vec::<String>::new());
        assert_eq!(
            split_title_ids("ABCDEF0102030405,"),
            vec!["ABCDEF0102030405"]
        );
    }

    #[test]
    fn version_tokens_anywhere_in_the_list_come_off() {
        assert_eq!(
            split_title_ids("ABCDEF0102030405(v131072)+1122334455667788"),
            vec!["ABCDEF0102030405", "1122334455667788"]
        );
    }
}
