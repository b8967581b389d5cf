//! URL helper functions

use lazy_static::lazy_static;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Asset directories served outside the language-prefixed routes
const ASSET_DIRS: [&str; 3] = ["illustrations", "images", "assets"];

lazy_static! {
    /// One rewrite per asset directory, applied in this order
    static ref LANG_PREFIXED_ASSETS: [(Regex, &'static str); 3] = [
        (
            Regex::new(r"^/[^/]+/images/").expect("valid asset regex"),
            "/images/"
        ),
        (
            Regex::new(r"^/[^/]+/illustrations/").expect("valid asset regex"),
            "/illustrations/"
        ),
        (
            Regex::new(r"^/[^/]+/assets/").expect("valid asset regex"),
            "/assets/"
        ),
    ];
}

/// Build the URL path of a content page
///
/// # Examples
/// ```ignore
/// page_url("en", "docs", &["guides", "setup"]) // -> "/en/docs/guides/setup"
/// ```
pub fn page_url(lang: &str, route: &str, slugs: &[String]) -> String {
    let mut url = format!("/{}", lang);

    let route = route.trim_matches('/');
    if !route.is_empty() {
        url.push('/');
        url.push_str(route);
    }

    for slug in slugs {
        url.push('/');
        url.push_str(&utf8_percent_encode(slug, SEGMENT).to_string());
    }

    url
}

/// Drop a language prefix from an asset path
///
/// # Examples
/// ```ignore
/// normalize_image_url("/en/images/cover.png") // -> "/images/cover.png"
/// ```
pub fn normalize_image_url(image: &str) -> String {
    LANG_PREFIXED_ASSETS
        .iter()
        .fold(image.to_string(), |url, (re, dir)| {
            re.replace(&url, *dir).into_owned()
        })
}

/// Whether an image points at one of the site's own asset directories
pub fn is_local_illustration(image: &str) -> bool {
    ASSET_DIRS
        .iter()
        .any(|dir| image.starts_with(&format!("/{}/", dir)))
}
