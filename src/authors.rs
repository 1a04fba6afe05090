use std::time::Duration;

use futures::future::join_all;
use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};

use crate::{
    config::Config,
    error::{Error, Result},
    git::{Author, Commit},
    lookup::IdentityLookup,
};

/// Everything known about one contributor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorAggregate {
    /// Distinct emails in the order they were first seen
    pub emails: IndexSet<String>,
    /// Platform username, if a lookup found one
    pub handle: Option<String>,
}

impl AuthorAggregate {
    /// The first email that isn't a forge `noreply` address
    pub fn contact_email(&self) -> Option<&str> {
        self.emails
            .iter()
            .map(String::as_str)
            .find(|e| !e.contains("noreply"))
    }
}

/// The contributors of a release, keyed by normalized display name in the
/// order they were first seen
#[derive(Debug, Clone, Default)]
pub struct Authors {
    entries: IndexMap<String, AuthorAggregate>,
}

impl Authors {
    /// Collects the credited authors of `commits`. Bots and anybody matching
    /// `config.exclude_authors` are skipped.
    pub fn from_commits(commits: &[Commit], config: &Config) -> Self {
        let mut entries: IndexMap<String, AuthorAggregate> = IndexMap::new();

        for author in commits.iter().filter_map(|c| c.author.as_ref()) {
            let name = format_name(&author.name);
            if name.is_empty() || name.contains("[bot]") {
                continue;
            }
            if config.is_excluded(&name, &author.email)
                || config.is_excluded(&author.name, &author.email)
            {
                trace!("excluding author {name}");
                continue;
            }

            let entry = entries.entry(name).or_default();
            if !author.email.is_empty() {
                entry.emails.insert(author.email.clone());
            }
        }

        debug!("collected {} authors", entries.len());
        Authors { entries }
    }

    /// Tries to find a handle for every author. Authors are looked up
    /// concurrently; the emails of a single author are tried one after the
    /// other until one resolves. Failures only leave the handle unset.
    ///
    /// A `timeout` needs to run inside a tokio runtime with the time driver
    /// enabled.
    pub async fn resolve<L>(&mut self, lookup: &L, timeout: Option<Duration>)
    where
        L: IdentityLookup + ?Sized,
    {
        let handles = join_all(
            self.entries
                .iter()
                .map(|(name, agg)| resolve_one(name, &agg.emails, lookup, timeout)),
        )
        .await;

        for (agg, handle) in self.entries.values_mut().zip(handles) {
            agg.handle = handle;
        }
    }

    pub fn get(&self, name: &str) -> Option<&AuthorAggregate> {
        self.entries.get(name)
    }

    /// The aggregate that saw `email`, if any. Never falls back to the email
    /// itself.
    pub fn find_by_email(&self, email: &str) -> Option<(&str, &AuthorAggregate)> {
        self.entries
            .iter()
            .find(|(_, agg)| agg.emails.contains(email))
            .map(|(name, agg)| (name.as_str(), agg))
    }

    /// The resolved handle of a commit author, matched by name and then by
    /// email
    pub fn handle_for(&self, author: &Author) -> Option<&str> {
        self.get(&format_name(&author.name))
            .or_else(|| self.find_by_email(&author.email).map(|(_, agg)| agg))
            .and_then(|agg| agg.handle.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AuthorAggregate)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

async fn resolve_one<L>(
    name: &str,
    emails: &IndexSet<String>,
    lookup: &L,
    timeout: Option<Duration>,
) -> Option<String>
where
    L: IdentityLookup + ?Sized,
{
    for email in emails {
        match lookup_with_timeout(lookup, email, timeout).await {
            Ok(Some(handle)) => {
                debug!("resolved {name} <{email}> to @{handle}");
                return Some(handle);
            }
            Ok(None) => trace!("no user found for {email}"),
            Err(e) => debug!("lookup for {email} failed: {e}"),
        }
    }
    None
}

async fn lookup_with_timeout<L>(
    lookup: &L,
    email: &str,
    timeout: Option<Duration>,
) -> Result<Option<String>>
where
    L: IdentityLookup + ?Sized,
{
    match timeout {
        Some(t) => tokio::time::timeout(t, lookup.find_username(email))
            .await
            .map_err(|_| Error::Lookup(format!("timed out after {t:?}")))?,
        None => lookup.find_username(email).await,
    }
}

/// Upper-cases the first character of every whitespace separated word and
/// joins them with single spaces, i.e. `jane  doe` becomes `Jane Doe`
pub fn format_name(name: &str) -> String {
    name.split_whitespace()
        .map(upper_first)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-cases the first character, leaving the rest untouched
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
