use std::hash::Hash;

use indexmap::IndexMap;

use crate::git::Commit;

/// Commits of a single type, split up by scope. `None` holds the unscoped
/// commits.
pub type ScopeMap<'a> = IndexMap<Option<&'a str>, Vec<&'a Commit>>;

/// A struct which holds commit types -> commits
pub struct SectionMap<'a> {
    /// Keyed by commit type in first-seen order. Within each bucket commits
    /// keep their input order.
    pub sections: IndexMap<&'a str, Vec<&'a Commit>>,
}

impl<'a> SectionMap<'a> {
    /// Creates a section map from a slice of commits, which we can then
    /// iterate through and write. Commits without a type are dropped.
    ///
    /// # Example
    ///
    /// ```
    /// # use chlog::{git::Commit, SectionMap};
    /// let commits = vec![
    ///     Commit::new("feat", "one"),
    ///     Commit::new("fix", "two"),
    ///     Commit::new("feat", "three"),
    /// ];
    /// let sm = SectionMap::from_commits(&commits);
    ///
    /// let feats: Vec<_> = sm.get("feat").iter().map(|c| &c.description[..]).collect();
    /// assert_eq!(feats, ["one", "three"]);
    /// ```
    pub fn from_commits(commits: &'a [Commit]) -> SectionMap<'a> {
        SectionMap {
            sections: group_by(
                commits.iter().filter(|c| !c.commit_type.trim().is_empty()),
                |c| c.commit_type.trim(),
            ),
        }
    }

    /// The commits of a type, empty if none were seen
    pub fn get(&self, commit_type: &str) -> &[&'a Commit] {
        self.sections
            .get(commit_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Splits commits by their scope, keeping their relative order
pub fn group_by_scope<'a, I>(commits: I) -> ScopeMap<'a>
where
    I: IntoIterator<Item = &'a Commit>,
{
    group_by(commits, Commit::scope_str)
}

fn group_by<'a, I, K, F>(commits: I, key: F) -> IndexMap<K, Vec<&'a Commit>>
where
    I: IntoIterator<Item = &'a Commit>,
    K: Hash + Eq,
    F: Fn(&'a Commit) -> K,
{
    let mut map: IndexMap<K, Vec<&'a Commit>> = IndexMap::new();
    for commit in commits {
        map.entry(key(commit)).or_default().push(commit);
    }
    map
}
