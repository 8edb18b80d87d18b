//! Narrow extractors for the non-post export categories.
//!
//! They share the tree adapter and text normalizer but not the graf model
//! (highlights aside, which reuse the classifier for their quoted grafs).

pub mod anchors;
pub mod blocked;
pub mod bookmarks;
pub mod claps;
pub mod following;
pub mod highlights;
pub mod interests;
pub mod ips;
pub mod labels;
pub mod lists;
pub mod post;
pub mod profile;
pub mod sessions;

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

static ID_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-([a-z0-9]+)$").unwrap());
static ID_PATH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/p/([a-z0-9]+)$").unwrap());
static BASE_URL: LazyLock<Url> =
    LazyLock::new(|| Url::parse("https://medium.com/").unwrap());

fn parse_url(s: &str) -> Option<Url> {
    Url::parse(s).or_else(|_| BASE_URL.join(s)).ok()
}

/// Post id from a post URL; every post URL ends with it.
///
/// ```text
/// https://medium.com/p/my-slug-5940ded906e7 -> 5940ded906e7
/// https://medium.com/p/5940ded906e7         -> 5940ded906e7
/// ```
pub fn parse_medium_id(s: &str) -> String {
    let Some(url) = parse_url(s) else {
        return String::new();
    };
    let path = url.path();

    ID_SUFFIX_RE
        .captures(path)
        .or_else(|| ID_PATH_RE.captures(path))
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

/// Username from `medium.com/@username` or `username.medium.com`.
///
/// Custom-domain publications also match the subdomain form and produce a
/// name that is not a username.
pub fn parse_medium_username(s: &str) -> String {
    let Some(url) = parse_url(s) else {
        return String::new();
    };

    if let Some(name) = url
        .path()
        .split('/')
        .nth(1)
        .and_then(|seg| seg.strip_prefix('@'))
    {
        return name.to_string();
    }

    let host = url.host_str().unwrap_or_default();
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() > 2 {
        return labels[0].to_string();
    }

    String::new()
}
