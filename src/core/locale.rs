// src/core/locale.rs

//! Active locale detection.
//!
//! The locale is read once at startup and then handed to the editor, which passes it
//! to every key-file write that produces localized keys (`Name[de_DE]=...`).

/// Picks the locale tag for localized keys.
///
/// A configured value wins; otherwise the first usable language reported by
/// `freedesktop_desktop_entry::get_languages_from_env` is used.
pub fn detect_locale(configured: Option<&str>) -> Option<String> {
    if let Some(value) = configured {
        return normalize(value);
    }
    first_usable(freedesktop_desktop_entry::get_languages_from_env())
}

/// The first candidate that names a real locale. Key-files are written with a single
/// `Key[locale]` variant, so the rest of the fallback list is dropped.
fn first_usable(candidates: impl IntoIterator<Item = String>) -> Option<String> {
    candidates
        .into_iter()
        .find_map(|candidate| normalize(&candidate))
}

/// Turns `lang_COUNTRY.ENCODING@MODIFIER` into the key-file form
/// `lang_COUNTRY@MODIFIER`. `C` and `POSIX` mean "no locale".
pub fn normalize(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let (base, modifier) = match raw.split_once('@') {
        Some((base, modifier)) => (base, Some(modifier)),
        None => (raw, None),
    };
    let base = base.split_once('.').map_or(base, |(lang, _encoding)| lang);

    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }

    Some(match modifier {
        Some(m) if !m.is_empty() => format!("{base}@{m}"),
        _ => base.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_encoding() {
        assert_eq!(normalize("de_DE.UTF-8").as_deref(), Some("de_DE"));
        assert_eq!(normalize("sr_YU.UTF-8@Latn").as_deref(), Some("sr_YU@Latn"));
        assert_eq!(normalize("fr").as_deref(), Some("fr"));
    }

    #[test]
    fn test_normalize_rejects_c_locale() {
        assert_eq!(normalize("C"), None);
        assert_eq!(normalize("C.UTF-8"), None);
        assert_eq!(normalize("POSIX"), None);
        assert_eq!(normalize(""), None);
    }

    #[test]
    fn test_first_usable_skips_c_locale() {
        let candidates = vec!["C.UTF-8".to_string(), "fr_CA.UTF-8".to_string(), "fr".to_string()];
        assert_eq!(first_usable(candidates).as_deref(), Some("fr_CA"));
        assert_eq!(first_usable(vec!["POSIX".to_string()]), None);
    }

    #[test]
    fn test_configured_locale_wins() {
        assert_eq!(detect_locale(Some("pt_BR.UTF-8")).as_deref(), Some("pt_BR"));
    }
}
