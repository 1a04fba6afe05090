use strum::{Display, EnumString};

/// Determines the hyperlink style used in reference, compare and profile
/// links. Defaults to `LinkStyle::Github`
///
/// # Example
///
/// ```no_run
/// # use chlog::{LinkStyle, Changelog};
/// let chlog = Changelog::new().link_style(LinkStyle::Gitlab);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum LinkStyle {
    #[default]
    Github,
    Gitlab,
    Stash,
    Cgit,
    Gitweb,
}

fn base(repo: &str) -> Option<&str> {
    match repo.trim_end_matches('/') {
        "" => None,
        link => Some(link),
    }
}

impl LinkStyle {
    /// Gets a hyperlink url to an issue in the specified format, or `None`
    /// when there is no repository or the style has no issue tracker.
    ///
    /// # Example
    ///
    /// ```
    /// # use chlog::LinkStyle;
    /// let link = LinkStyle::Github;
    /// let issue = link.issue_link("141", "https://github.com/thoughtram/clog");
    ///
    /// assert_eq!(Some("https://github.com/thoughtram/clog/issues/141".into()), issue);
    /// ```
    pub fn issue_link<S: AsRef<str>>(&self, issue: S, repo: S) -> Option<String> {
        let link = base(repo.as_ref())?;
        let issue = issue.as_ref();
        match *self {
            LinkStyle::Github => Some(format!("{link}/issues/{issue}")),
            LinkStyle::Gitlab => Some(format!("{link}/-/issues/{issue}")),
            // stash, cgit and gitweb do not track issues
            LinkStyle::Stash | LinkStyle::Cgit | LinkStyle::Gitweb => None,
        }
    }

    /// Gets a hyperlink url to a pull (or merge) request.
    ///
    /// # Example
    ///
    /// ```
    /// # use chlog::LinkStyle;
    /// let link = LinkStyle::Gitlab;
    /// let mr = link.pull_request_link("7", "https://gitlab.com/foo/bar");
    ///
    /// assert_eq!(Some("https://gitlab.com/foo/bar/-/merge_requests/7".into()), mr);
    /// ```
    pub fn pull_request_link<S: AsRef<str>>(&self, pr: S, repo: S) -> Option<String> {
        let link = base(repo.as_ref())?;
        let pr = pr.as_ref();
        match *self {
            LinkStyle::Github => Some(format!("{link}/pull/{pr}")),
            LinkStyle::Gitlab => Some(format!("{link}/-/merge_requests/{pr}")),
            LinkStyle::Stash => Some(format!("{link}/pull-requests/{pr}")),
            LinkStyle::Cgit | LinkStyle::Gitweb => None,
        }
    }

    /// Gets a hyperlink url to a commit in the specified format.
    ///
    /// # Example
    ///
    /// Note that for `LinkStyle::Gitweb` the actual repository name has to be
    /// given as part of the parameter string of the URL:
    ///
    /// ```
    /// # use chlog::LinkStyle;
    /// let link = LinkStyle::Gitweb;
    /// let commit = link.commit_link("deadbeef", "http://example.com/gitweb/?p=foo.git");
    ///
    /// assert_eq!(Some("http://example.com/gitweb/?p=foo.git;a=commit;h=deadbeef".into()), commit);
    /// ```
    pub fn commit_link<S: AsRef<str>>(&self, hash: S, repo: S) -> Option<String> {
        let link = base(repo.as_ref())?;
        let hash = hash.as_ref();
        Some(match *self {
            LinkStyle::Github | LinkStyle::Gitlab => format!("{link}/commit/{hash}"),
            LinkStyle::Stash => format!("{link}/commits/{hash}"),
            LinkStyle::Cgit => format!("{link}/commit/?id={hash}"),
            LinkStyle::Gitweb => format!("{link};a=commit;h={hash}"),
        })
    }

    /// Gets a hyperlink url comparing two revisions.
    ///
    /// # Example
    ///
    /// ```
    /// # use chlog::LinkStyle;
    /// let link = LinkStyle::Github;
    /// let cmp = link.compare_link("v1.0.0", "v1.1.0", "https://github.com/foo/bar");
    ///
    /// assert_eq!(Some("https://github.com/foo/bar/compare/v1.0.0...v1.1.0".into()), cmp);
    /// ```
    pub fn compare_link<S: AsRef<str>>(&self, from: S, to: S, repo: S) -> Option<String> {
        let link = base(repo.as_ref())?;
        let (from, to) = (from.as_ref(), to.as_ref());
        Some(match *self {
            LinkStyle::Github => format!("{link}/compare/{from}...{to}"),
            LinkStyle::Gitlab => format!("{link}/-/compare/{from}...{to}"),
            LinkStyle::Stash => format!("{link}/compare/diff?targetBranch={from}&sourceBranch={to}"),
            LinkStyle::Cgit => format!("{link}/diff/?id={to}&id2={from}"),
            LinkStyle::Gitweb => format!("{link};a=commitdiff;h={to};hp={from}"),
        })
    }

    /// Gets the profile page of a user handle on the hosting platform.
    pub fn profile_link(&self, handle: &str) -> Option<String> {
        match *self {
            LinkStyle::Github => Some(format!("https://github.com/{handle}")),
            LinkStyle::Gitlab => Some(format!("https://gitlab.com/{handle}")),
            _ => None,
        }
    }
}

/// The first eight characters of a commit hash
pub(crate) fn short_hash(hash: &str) -> &str {
    hash.get(0..8).unwrap_or(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gitweb_commit_link() {
        let link = LinkStyle::Gitweb;
        let hash = "deadbeef";
        let commit = link.commit_link(hash, "http://example.com/gitweb/?p=foo.git");
        assert_eq!(
            Some(format!("http://example.com/gitweb/?p=foo.git;a=commit;h={}", &hash)),
            commit
        );
    }

    #[test]
    fn test_gitweb_issue_link() {
        let link = LinkStyle::Gitweb;
        let issue = link.issue_link("42", "http://example.com/gitweb/?p=foo.git");
        assert_eq!(None, issue);
    }

    #[test]
    fn test_empty_repo_has_no_links() {
        let link = LinkStyle::Github;
        assert_eq!(None, link.issue_link("42", ""));
        assert_eq!(None, link.pull_request_link("42", ""));
        assert_eq!(None, link.compare_link("a", "b", ""));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let link = LinkStyle::Github;
        assert_eq!(
            Some("https://github.com/foo/bar/pull/3".to_owned()),
            link.pull_request_link("3", "https://github.com/foo/bar/")
        );
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("gitlab".parse::<LinkStyle>(), Ok(LinkStyle::Gitlab));
        assert_eq!("GITHUB".parse::<LinkStyle>(), Ok(LinkStyle::Github));
        assert!("svn".parse::<LinkStyle>().is_err());
    }

    #[test]
    fn test_short_hash() {
        assert_eq!("0123abcd", short_hash("0123abcdef4567"));
        assert_eq!("abc", short_hash("abc"));
    }
}
