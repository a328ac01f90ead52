//! Canonical URL assembly.
//!
//! Both directions between a [`Url`] and its parts live here: [`build_url`]
//! assembles, [`UrlComponents::decompose`] takes apart. Neither performs I/O.

use url::Url;

use crate::query::QueryItem;

/// Assemble `scheme://host/path?query`.
///
/// An absent or empty `path` becomes `/`; an empty item list produces a URL
/// without a query component. Item values are form-urlencoded.
///
/// Returns `None` for an empty or malformed scheme, an empty host, a host with
/// characters outside the URI host grammar, or any other combination the URL
/// parser rejects.
///
/// # Examples
///
/// ```
/// use core_bridge::{build_url, QueryItem};
///
/// let url = build_url("fbauth2", "dialog", Some("/share"), &[QueryItem::new("version", "20")]).unwrap();
/// assert_eq!(url.as_str(), "fbauth2://dialog/share?version=20");
///
/// assert!(build_url("", "dialog", None, &[]).is_none());
/// ```
pub fn build_url(
    scheme: &str,
    host: &str,
    path: Option<&str>,
    query_items: &[QueryItem],
) -> Option<Url> {
    if !is_valid_scheme(scheme) || !is_valid_host(host) {
        return None;
    }

    let mut url = Url::parse(&format!("{}://{}", scheme, host)).ok()?;
    if url.cannot_be_a_base() || url.host_str().map_or(true, str::is_empty) {
        return None;
    }

    match path.filter(|path| !path.is_empty()) {
        Some(path) if path.starts_with('/') => url.set_path(path),
        Some(path) => url.set_path(&format!("/{}", path)),
        None => url.set_path("/"),
    }

    if query_items.is_empty() {
        url.set_query(None);
    } else {
        let mut pairs = url.query_pairs_mut();
        for item in query_items {
            pairs.append_pair(&item.name, &item.value);
        }
    }

    Some(url)
}

/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Unreserved, sub-delims, percent escapes, plus `:` and brackets for ports
/// and IPv6 literals.
fn is_valid_host(host: &str) -> bool {
    !host.is_empty()
        && host.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || matches!(
                    c,
                    '-' | '.'
                        | '_'
                        | '~'
                        | '!'
                        | '$'
                        | '&'
                        | '\''
                        | '('
                        | ')'
                        | '*'
                        | '+'
                        | ','
                        | ';'
                        | '='
                        | '%'
                        | ':'
                        | '['
                        | ']'
                )
        })
}

/// A URL split into the parts bridge requests rebuild from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlComponents {
    pub scheme: String,
    /// Host, including `:port` when the URL carries an explicit port
    pub host: String,
    /// Percent-encoded path
    pub path: String,
    /// Decoded query items in URL order
    pub query_items: Vec<QueryItem>,
}

impl UrlComponents {
    /// Split `url`; `None` when it has no host (e.g. `mailto:` or `data:` URLs).
    pub fn decompose(url: &Url) -> Option<Self> {
        if url.cannot_be_a_base() {
            return None;
        }

        let host = url.host_str().filter(|host| !host.is_empty())?;
        let host = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        let query_items = url
            .query_pairs()
            .map(|(name, value)| QueryItem::new(name.into_owned(), value.into_owned()))
            .collect();

        Some(Self {
            scheme: url.scheme().to_string(),
            host,
            path: url.path().to_string(),
            query_items,
        })
    }

    /// Reassemble with [`build_url`].
    pub fn build(&self) -> Option<Url> {
        build_url(&self.scheme, &self.host, Some(&self.path), &self.query_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_path_and_query() {
        let url = build_url(
            "https",
            "example.com",
            Some("/v1/dialog/share"),
            &[QueryItem::new("a", "1"), QueryItem::new("b", "x y&z")],
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "https://example.com/v1/dialog/share?a=1&b=x+y%26z"
        );
    }

    #[test]
    fn test_empty_path_defaults_to_root() {
        let url = build_url("https", "example.com", Some(""), &[]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/");

        let url = build_url("web", "example.com", None, &[]).unwrap();
        assert_eq!(url.path(), "/");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_relative_path_is_rooted() {
        let url = build_url("fbauth2", "dialog", Some("share"), &[]).unwrap();
        assert_eq!(url.as_str(), "fbauth2://dialog/share");
    }

    #[test]
    fn test_duplicate_items_are_kept() {
        let url = build_url(
            "https",
            "example.com",
            None,
            &[QueryItem::new("a", "1"), QueryItem::new("a", "2")],
        )
        .unwrap();
        assert_eq!(url.query(), Some("a=1&a=2"));
    }

    #[test]
    fn test_rejects_bad_scheme() {
        assert!(build_url("", "example.com", None, &[]).is_none());
        assert!(build_url("1abc", "example.com", None, &[]).is_none());
        assert!(build_url("ht tp", "example.com", None, &[]).is_none());
        assert!(build_url("fb_auth", "example.com", None, &[]).is_none());
    }

    #[test]
    fn test_rejects_bad_host() {
        assert!(build_url("https", "", None, &[]).is_none());
        assert!(build_url("https", "exa mple.com", None, &[]).is_none());
        assert!(build_url("https", "example.com/path", None, &[]).is_none());
        assert!(build_url("https", "user@example.com", None, &[]).is_none());
        assert!(build_url("https", "example.com?x=1", None, &[]).is_none());
    }

    #[test]
    fn test_host_with_port() {
        let url = build_url("http", "localhost:8080", Some("/x"), &[]).unwrap();
        assert_eq!(url.port(), Some(8080));

        let components = UrlComponents::decompose(&url).unwrap();
        assert_eq!(components.host, "localhost:8080");
        assert_eq!(components.build().unwrap(), url);
    }

    #[test]
    fn test_decompose() {
        let url = Url::parse("fbauth2://dialog/share?version=20&bridge_args=%7B%7D").unwrap();
        let components = UrlComponents::decompose(&url).unwrap();

        assert_eq!(components.scheme, "fbauth2");
        assert_eq!(components.host, "dialog");
        assert_eq!(components.path, "/share");
        assert_eq!(
            components.query_items,
            vec![
                QueryItem::new("version", "20"),
                QueryItem::new("bridge_args", "{}"),
            ]
        );
    }

    #[test]
    fn test_decompose_rejects_hostless_urls() {
        let mailto = Url::parse("mailto:someone@example.com").unwrap();
        assert!(UrlComponents::decompose(&mailto).is_none());

        let file = Url::parse("file:///tmp/x").unwrap();
        assert!(UrlComponents::decompose(&file).is_none());
    }

    #[test]
    fn test_decompose_then_build_preserves_items() {
        let url = Url::parse("https://example.com/a%20b?bar=baz&q=a+b").unwrap();
        let rebuilt = UrlComponents::decompose(&url).unwrap().build().unwrap();

        assert_eq!(rebuilt.path(), "/a%20b");
        assert_eq!(rebuilt.query(), Some("bar=baz&q=a+b"));
    }
}
