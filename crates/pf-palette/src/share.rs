//! Share links.
//!
//! A palette travels as a single `colors` query parameter holding the hex
//! digits of each color, joined by `-`:
//!
//! ```text
//! https://example.com/?colors=264653-2A9D8F-E9C46A
//! ```
//!
//! Decoding is forgiving: entries that are not six hex digits, with or
//! without a leading `#`, are dropped, and a parameter with no usable entry yields no palette at all.

use pf_color::hex_to_rgb;
use url::Url;
use url::form_urlencoded;

/// Query parameter carrying the palette.
pub const COLORS_PARAM: &str = "colors";

/// Encode colors as the `colors` parameter value.
#[must_use]
pub fn encode_colors(colors: &[String]) -> String {
    colors
        .iter()
        .map(|c| c.trim_start_matches('#').to_uppercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Build a share link for `colors` on top of `base`.
///
/// Any existing `colors` parameter on `base` is replaced; other parameters
/// are kept.
///
/// # Errors
///
/// Returns an error if `base` is not an absolute URL.
pub fn share_url(base: &str, colors: &[String]) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base)?;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != COLORS_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    {
        let mut query = url.query_pairs_mut();
        query.clear();
        query.extend_pairs(&kept);
        query.append_pair(COLORS_PARAM, &encode_colors(colors));
    }
    Ok(url)
}

/// Decode a `colors` parameter value into canonical `#RRGGBB` strings.
///
/// Returns `None` when no entry is a valid color.
#[must_use]
pub fn parse_colors_param(value: &str) -> Option<Vec<String>> {
    let colors: Vec<String> = value
        .split('-')
        .filter_map(|part| hex_to_rgb(part).map(|rgb| rgb.to_hex()))
        .collect();
    (!colors.is_empty()).then_some(colors)
}

/// Extract the palette from a raw query string (with or without `?`).
#[must_use]
pub fn colors_from_query(query: &str) -> Option<Vec<String>> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == COLORS_PARAM)
        .and_then(|(_, v)| parse_colors_param(&v))
}

/// Extract the palette from a full share link.
#[must_use]
pub fn colors_from_url(url: &Url) -> Option<Vec<String>> {
    url.query().and_then(colors_from_query)
}

/// Extract the palette from whatever the user pasted: a full link, a query
/// string, or a bare `RRGGBB-RRGGBB` value.
#[must_use]
pub fn colors_from_link(link: &str) -> Option<Vec<String>> {
    let link = link.trim();
    match Url::parse(link) {
        Ok(url) => colors_from_url(&url),
        Err(_) => colors_from_query(link).or_else(|| parse_colors_param(link)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn palette() -> Vec<String> {
        vec!["#264653".into(), "#2a9d8f".into(), "#E9C46A".into()]
    }

    #[test]
    fn encode_strips_hash_and_uppercases() {
        assert_eq!(encode_colors(&palette()), "264653-2A9D8F-E9C46A");
        assert_eq!(encode_colors(&[]), "");
    }

    #[test]
    fn share_url_appends_param() {
        let url = share_url("https://example.com/app", &palette()).unwrap();
        assert_eq!(url.as_str(), "https://example.com/app?colors=264653-2A9D8F-E9C46A");
    }

    #[test]
    fn share_url_replaces_existing_colors_and_keeps_others() {
        let url = share_url("https://example.com/?theme=dark&colors=000000", &palette()).unwrap();
        assert_eq!(url.query(), Some("theme=dark&colors=264653-2A9D8F-E9C46A"));
    }

    #[test]
    fn share_url_rejects_relative_base() {
        assert!(share_url("not a url", &palette()).is_err());
    }

    #[test]
    fn parse_param_canonicalizes() {
        assert_eq!(
            parse_colors_param("264653-2a9d8f-e9c46a"),
            Some(vec!["#264653".to_owned(), "#2A9D8F".to_owned(), "#E9C46A".to_owned()])
        );
    }

    #[test]
    fn parse_param_drops_invalid_entries() {
        assert_eq!(
            parse_colors_param("264653-XYZXYZ-12345-1234567-##ABCDEF-E9C46A"),
            Some(vec!["#264653".to_owned(), "#E9C46A".to_owned()])
        );
    }

    #[test]
    fn parse_param_keeps_hash_prefixed_entries() {
        assert_eq!(
            parse_colors_param("#abcdef-112233"),
            Some(vec!["#ABCDEF".to_owned(), "#112233".to_owned()])
        );
    }

    #[test]
    fn query_with_encoded_hashes() {
        assert_eq!(
            colors_from_query("colors=%23ABCDEF-%23112233"),
            Some(vec!["#ABCDEF".to_owned(), "#112233".to_owned()])
        );
        assert_eq!(
            colors_from_link("https://example.com/?colors=%23ABCDEF-112233"),
            Some(vec!["#ABCDEF".to_owned(), "#112233".to_owned()])
        );
    }

    #[test]
    fn parse_param_with_nothing_valid_is_none() {
        assert_eq!(parse_colors_param(""), None);
        assert_eq!(parse_colors_param("nope-zzzzzz"), None);
    }

    #[test]
    fn query_lookup() {
        assert_eq!(
            colors_from_query("?a=1&colors=FF0000-00FF00"),
            Some(vec!["#FF0000".to_owned(), "#00FF00".to_owned()])
        );
        assert_eq!(colors_from_query("a=1"), None);
    }

    #[test]
    fn link_accepts_any_pasted_form() {
        let expected = Some(vec!["#FF0000".to_owned(), "#00FF00".to_owned()]);
        assert_eq!(colors_from_link("https://example.com/?colors=ff0000-00ff00"), expected);
        assert_eq!(colors_from_link("?colors=FF0000-00FF00"), expected);
        assert_eq!(colors_from_link("  FF0000-00FF00\n"), expected);
        assert_eq!(colors_from_link("https://example.com/"), None);
    }

    #[test]
    fn url_roundtrip() {
        let url = share_url("https://example.com/", &palette()).unwrap();
        let decoded = colors_from_url(&url).unwrap();
        assert_eq!(decoded, vec!["#264653".to_owned(), "#2A9D8F".to_owned(), "#E9C46A".to_owned()]);
    }
}
