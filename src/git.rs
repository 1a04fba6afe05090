use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The kind of a commit reference
#[derive(Copy, Clone, PartialEq, Eq, Debug, EnumString, Display, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceKind {
    PullRequest,
    Issue,
    Hash,
    #[serde(other)]
    Other,
}

/// Something a commit points at, i.e. `#141` or a commit hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "type")]
    pub kind: ReferenceKind,
    pub value: String,
}

impl Reference {
    pub fn pull_request<S: Into<String>>(value: S) -> Self {
        Reference {
            kind: ReferenceKind::PullRequest,
            value: value.into(),
        }
    }

    pub fn issue<S: Into<String>>(value: S) -> Self {
        Reference {
            kind: ReferenceKind::Issue,
            value: value.into(),
        }
    }

    pub fn hash<S: Into<String>>(value: S) -> Self {
        Reference {
            kind: ReferenceKind::Hash,
            value: value.into(),
        }
    }

    /// The value without any leading `#`
    pub fn number(&self) -> &str {
        self.value.trim_start_matches('#')
    }
}

/// The author of a commit as recorded by git
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Author {
    pub fn new<S: Into<String>>(name: S, email: S) -> Self {
        Author {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// The struct representation of a parsed `Commit`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    /// The commit type, i.e. `feat`
    #[serde(rename = "type")]
    pub commit_type: String,
    /// The scope (if any)
    #[serde(default)]
    pub scope: Option<String>,
    /// The commit subject without type and scope
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_breaking: bool,
    #[serde(default)]
    pub author: Option<Author>,
    /// Pull requests, issues and hashes this commit references, in the order
    /// they were found
    #[serde(default)]
    pub references: Vec<Reference>,
}

impl Commit {
    pub fn new<S: Into<String>>(commit_type: S, description: S) -> Self {
        Commit {
            commit_type: commit_type.into(),
            description: description.into(),
            ..Commit::default()
        }
    }

    pub fn scope<S: Into<String>>(mut self, s: S) -> Self {
        self.scope = Some(s.into());
        self
    }

    pub fn breaking(mut self, b: bool) -> Self {
        self.is_breaking = b;
        self
    }

    pub fn author(mut self, a: Author) -> Self {
        self.author = Some(a);
        self
    }

    pub fn reference(mut self, r: Reference) -> Self {
        self.references.push(r);
        self
    }

    /// The trimmed scope, `None` when missing or blank
    pub fn scope_str(&self) -> Option<&str> {
        self.scope
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
