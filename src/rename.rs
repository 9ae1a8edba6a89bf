use std::borrow::Cow;

use crate::playlist::Track;

/// Test if a character cannot be used in a file name.
fn invalid(c: char) -> bool {
    matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') || c.is_control()
}

/// Sanitize a string for use as a file name.
///
/// Characters which are invalid on common filesystems are replaced with
/// `_`. The input is returned as-is when nothing needs to be replaced.
pub fn sanitize(s: &str) -> Cow<'_, str> {
    let Some(first) = s.find(invalid) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..first]);

    for c in s[first..].chars() {
        out.push(if invalid(c) { '_' } else { c });
    }

    Cow::Owned(out)
}

/// Build the output file name for a track.
///
/// Tracks with a known artist are named `Artist - Title`, the rest just
/// `Title`, followed by the given extension.
pub fn file_name(track: &Track, ext: Option<&str>) -> String {
    let base = match &track.artist {
        Some(artist) => format!("{artist} - {}", track.title),
        None => track.title.clone(),
    };

    let mut name = sanitize(&base).into_owned();

    if let Some(ext) = ext {
        name.push('.');
        name.push_str(ext);
    }

    name
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use crate::playlist::Track;

    use super::{file_name, sanitize};

    fn track(title: &str, artist: Option<&str>) -> Track {
        Track {
            title: title.to_owned(),
            id: "id".to_owned(),
            artist: artist.map(str::to_owned),
        }
    }

    #[test]
    fn sanitize_borrows_clean_input() {
        assert!(matches!(sanitize("Plain Name"), Cow::Borrowed("Plain Name")));
    }

    #[test]
    fn sanitize_replaces_invalid_characters() {
        assert_eq!(sanitize("a/b\\c:d|e?f*g<h>i\"j"), "a_b_c_d_e_f_g_h_i_j");
        assert_eq!(sanitize("tab\there"), "tab_here");
        assert_eq!(sanitize("AC/DC - Back In Black"), "AC_DC - Back In Black");
    }

    #[test]
    fn file_name_includes_artist() {
        assert_eq!(
            file_name(&track("Song", Some("A/B")), Some("mp3")),
            "A_B - Song.mp3"
        );
    }

    #[test]
    fn file_name_without_artist() {
        assert_eq!(file_name(&track("Song", None), Some("webma")), "Song.webma");
    }

    #[test]
    fn file_name_without_extension() {
        assert_eq!(file_name(&track("Song", None), None), "Song");
    }
}
