use std::{fs, path::Path, time::Duration};

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use strum::{Display, EnumString};

use crate::{
    error::{Error, Result},
    link_style::LinkStyle,
};

/// How commits inside a type section are laid out
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum GroupingMode {
    /// One line per commit, scope shown inline as `**scope:**`
    #[default]
    Flat,
    /// Commits are further split into one sub-heading per scope
    Scoped,
}

/// The section heading used for a commit type
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeConfig {
    pub title: String,
}

impl TypeConfig {
    pub fn new<S: Into<String>>(title: S) -> Self {
        TypeConfig {
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCfg {
    #[serde(default)]
    pub chlog: RawChlogCfg,
    #[serde(default)]
    pub types: IndexMap<String, TypeConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RawChlogCfg {
    pub repository: Option<String>,
    pub link_style: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub new_version: Option<String>,
    pub exclude_authors: Vec<String>,
    pub grouping: Option<String>,
    /// In milliseconds
    pub lookup_timeout: Option<u64>,
}

/// Everything the renderer needs to know besides the commits themselves
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Commit type -> section heading. Declaration order is section order, and
    /// commits with a type missing here are left out of the typed sections.
    pub types: IndexMap<String, TypeConfig>,
    /// The repository used for the base of hyper-links
    pub repo: Option<String>,
    pub link_style: LinkStyle,
    /// Start of the compared range
    pub from: Option<String>,
    /// End of the compared range (Defaults to `HEAD`)
    pub to: String,
    /// The version being released, without a leading `v`
    pub new_version: Option<String>,
    /// Authors whose name or email contain any of these are not credited
    pub exclude_authors: Vec<String>,
    pub grouping: GroupingMode,
    pub lookup_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        debug!("Creating default config");
        Config {
            types: default_types(),
            repo: None,
            link_style: LinkStyle::Github,
            from: None,
            to: "HEAD".to_owned(),
            new_version: None,
            exclude_authors: vec![],
            grouping: GroupingMode::Flat,
            lookup_timeout: None,
        }
    }
}

/// The conventional commit types and their headings, in rendering order
pub fn default_types() -> IndexMap<String, TypeConfig> {
    [
        ("feat", "🚀 Enhancements"),
        ("perf", "🔥 Performance"),
        ("fix", "🩹 Fixes"),
        ("refactor", "💅 Refactors"),
        ("docs", "📖 Documentation"),
        ("build", "📦 Build"),
        ("types", "🌊 Types"),
        ("chore", "🏡 Chore"),
        ("examples", "🏀 Examples"),
        ("test", "✅ Tests"),
        ("style", "🎨 Styles"),
        ("ci", "🤖 CI"),
    ]
    .into_iter()
    .map(|(k, t)| (k.to_owned(), TypeConfig::new(t)))
    .collect()
}

impl Config {
    /// Reads a TOML configuration file, i.e. `.chlog.toml`
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        debug!("Trying to use config file: {:?}", file.as_ref());
        let toml_s = fs::read_to_string(file.as_ref())?;
        let raw: RawCfg = toml::from_str(&toml_s).map_err(|e| {
            debug!("toml error: {e}");
            Error::ConfigParse(file.as_ref().to_path_buf())
        })?;
        Config::try_from(raw)
    }

    pub fn from_toml_str(toml_s: &str) -> Result<Self> {
        let raw: RawCfg =
            toml::from_str(toml_s).map_err(|e| Error::ConfigFormat(e.message().to_owned()))?;
        Config::try_from(raw)
    }

    /// The target of the compare link: the new version's tag if one is being
    /// released, `to` otherwise
    pub fn compare_target(&self) -> String {
        match self.new_version {
            Some(ref v) => format!("v{}", v.trim_start_matches('v')),
            None => self.to.clone(),
        }
    }

    /// Whether an author with this (normalized) name and email is excluded
    /// from being credited
    pub fn is_excluded(&self, name: &str, email: &str) -> bool {
        self.exclude_authors
            .iter()
            .filter(|v| !v.is_empty())
            .any(|v| name.contains(v.as_str()) || email.contains(v.as_str()))
    }
}

impl TryFrom<RawCfg> for Config {
    type Error = Error;

    fn try_from(raw: RawCfg) -> Result<Self> {
        let mut cfg = Config::default();
        let RawCfg { chlog, types } = raw;

        if !types.is_empty() {
            cfg.types = types;
        }
        if let Some(ls) = chlog.link_style {
            cfg.link_style = ls.parse().map_err(|_| Error::LinkStyle(ls))?;
        }
        if let Some(g) = chlog.grouping {
            cfg.grouping = g.parse().map_err(|_| Error::Grouping(g))?;
        }
        if let Some(to) = chlog.to {
            cfg.to = to;
        }

        cfg.repo = chlog.repository.filter(|r| !r.is_empty());
        cfg.from = chlog.from;
        cfg.new_version = chlog.new_version;
        cfg.exclude_authors = chlog.exclude_authors;
        cfg.lookup_timeout = chlog.lookup_timeout.map(Duration::from_millis);

        debug!("Returning config:\n{:?}", cfg);
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config() {
        let cfg = r#"
[chlog]
repository = "https://gitlab.com/foo/bar"
link-style = "gitlab"
from = "v0.1.0"
new-version = "0.2.0"
exclude-authors = ["renovate", "@example.org"]
grouping = "scoped"
lookup-timeout = 2500

[types]
fix = { title = "Bug Fixes" }
feat = { title = "Features" }
"#;
        let res = Config::from_toml_str(cfg);
        assert!(res.is_ok(), "{res:?}");
        let cfg = res.unwrap();

        assert_eq!(cfg.repo, Some("https://gitlab.com/foo/bar".into()));
        assert_eq!(cfg.link_style, LinkStyle::Gitlab);
        assert_eq!(cfg.from, Some("v0.1.0".into()));
        assert_eq!(cfg.to, "HEAD");
        assert_eq!(cfg.compare_target(), "v0.2.0");
        assert_eq!(cfg.grouping, GroupingMode::Scoped);
        assert_eq!(cfg.lookup_timeout, Some(Duration::from_millis(2500)));
        assert_eq!(
            cfg.types.keys().collect::<Vec<_>>(),
            vec!["fix", "feat"],
            "declared order is kept"
        );
        assert_eq!(cfg.types["feat"].title, "Features");
    }

    #[test]
    fn dogfood_config() {
        let cfg = include_str!("../.chlog.toml");
        let res = Config::from_toml_str(cfg);
        assert!(res.is_ok(), "{res:?}");
        let cfg = res.unwrap();

        assert_eq!(cfg.repo, Some("https://github.com/clog-tool/chlog".into()));
        assert_eq!(cfg.link_style, LinkStyle::Github);
        assert_eq!(cfg.types, default_types());
    }

    #[test]
    fn bad_link_style() {
        let res = Config::from_toml_str("[chlog]\nlink-style = \"svn\"\n");
        assert!(matches!(res, Err(Error::LinkStyle(s)) if s == "svn"));
    }

    #[test]
    fn bad_toml() {
        let res = Config::from_toml_str("[chlog\n");
        assert!(matches!(res, Err(Error::ConfigFormat(_))));
    }

    #[test]
    fn empty_config_is_default() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn exclusion_matches_name_or_email() {
        let cfg = Config {
            exclude_authors: vec!["Renovate".into(), "@corp.com".into()],
            ..Config::default()
        };
        assert!(cfg.is_excluded("Renovate Bot", "x@y.z"));
        assert!(cfg.is_excluded("Jane Doe", "jane@corp.com"));
        assert!(!cfg.is_excluded("Jane Doe", "jane@home.net"));
    }

    #[test]
    fn compare_target_defaults_to_to() {
        let cfg = Config::default();
        assert_eq!(cfg.compare_target(), "HEAD");
        let cfg = Config {
            new_version: Some("v1.2.3".into()),
            ..Config::default()
        };
        assert_eq!(cfg.compare_target(), "v1.2.3");
    }
}
