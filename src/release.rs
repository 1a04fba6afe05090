//! Splitting an existing changelog back into its releases, and putting a new
//! one in front of them.

use log::debug;
use regex::Match;
use serde::{Deserialize, Serialize};

/// One release of a changelog document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseSection {
    /// `major.minor.patch` without a `v`, only set when the heading is
    /// nothing but the version
    pub version: Option<String>,
    /// Everything between this heading and the next one, trimmed
    pub body: String,
}

/// `##` (or deeper) headings mentioning a version, with the heading text
fn release_headings(document: &str) -> impl Iterator<Item = (Match<'_>, &str)> {
    regex!(r"(?m)^#{2,}[ \t]+(.*?\d+\.\d+\.\d+.*?)[ \t]*\r?$")
        .captures_iter(document)
        .filter_map(|caps| Some((caps.get(0)?, caps.get(1)?.as_str())))
}

fn bare_version(title: &str) -> Option<String> {
    regex!(r"^v?(\d+\.\d+\.\d+)$")
        .captures(title.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}

/// Splits a changelog into releases, in document order. A document without
/// any release heading gives an empty list.
///
/// # Example
///
/// ```
/// # use chlog::release::parse_releases;
/// let releases = parse_releases("## v1.2.3\nbodyA\n## v1.3.0\nbodyB");
///
/// assert_eq!(releases[0].version.as_deref(), Some("1.2.3"));
/// assert_eq!(releases[1].body, "bodyB");
/// ```
pub fn parse_releases(document: &str) -> Vec<ReleaseSection> {
    let headings: Vec<_> = release_headings(document).collect();

    headings
        .iter()
        .enumerate()
        .map(|(i, (heading, title))| {
            let end = headings
                .get(i + 1)
                .map_or(document.len(), |(next, _)| next.start());
            ReleaseSection {
                version: bare_version(title),
                body: document[heading.end()..end].trim().to_owned(),
            }
        })
        .collect()
}

/// Puts `release` under a `## v{version}` heading in front of the newest
/// release of `document`. If `document` already has a heading for that
/// version (prereleases included) it is returned unchanged.
pub fn prepend_release(document: &str, version: &str, release: &str) -> String {
    let version = version.trim().trim_start_matches('v');
    if release_headings(document).any(|(_, title)| title.trim_start_matches('v') == version) {
        debug!("changelog already has v{version}, leaving it alone");
        return document.to_owned();
    }

    let entry = format!("## v{version}\n\n{}\n", release.trim());
    match release_headings(document).next() {
        Some((first, _)) => {
            let (head, tail) = document.split_at(first.start());
            format!("{head}{entry}\n{tail}")
        }
        None if document.trim().is_empty() => format!("# Changelog\n\n{entry}"),
        None => format!("{}\n\n{entry}", document.trim_end()),
    }
}
