use std::{path::Path, time::Duration};

use log::debug;

use crate::{
    authors::Authors,
    config::{Config, GroupingMode, TypeConfig},
    error::{Error, Result},
    fmt::{FormatWriter, MarkdownWriter},
    git::Commit,
    gitmoji,
    link_style::LinkStyle,
    lookup::IdentityLookup,
    release::prepend_release,
    sectionmap::SectionMap,
    DEFAULT_CONFIG_FILE,
};

/// The base struct used to set options and render changelogs.
#[derive(Debug, Clone, Default)]
pub struct Changelog {
    pub config: Config,
}

impl Changelog {
    /// Creates a `Changelog` with the default commit types and no repository
    ///
    /// # Example
    ///
    /// ```
    /// # use chlog::Changelog;
    /// let chlog = Changelog::new();
    /// ```
    pub fn new() -> Self {
        Changelog::default()
    }

    pub fn with_config(config: Config) -> Self {
        Changelog { config }
    }

    /// Creates a `Changelog` from a TOML configuration file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use chlog::Changelog;
    /// let chlog = Changelog::from_file("/myproject/chlog_conf.toml").unwrap();
    /// ```
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        debug!("Creating changelog with \n\tfile: {:?}", file.as_ref());
        Config::from_file(file).map(Changelog::with_config)
    }

    /// Creates a `Changelog` using the `.chlog.toml` inside `dir` when there
    /// is one, the defaults otherwise.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use chlog::Changelog;
    /// let chlog = Changelog::from_dir("/myproject").unwrap();
    /// ```
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let cfg_file = dir.as_ref().join(DEFAULT_CONFIG_FILE);
        if cfg_file.is_file() {
            Changelog::from_file(cfg_file)
        } else {
            debug!("{:?} not found, using defaults", cfg_file);
            Ok(Changelog::new())
        }
    }

    /// Sets the repository used for the base of hyper-links
    ///
    /// **NOTE:** Leave off the trailing `.git`
    ///
    /// # Example
    ///
    /// ```
    /// # use chlog::Changelog;
    /// let chlog = Changelog::new().repository("https://github.com/thoughtram/clog");
    /// ```
    pub fn repository<S: Into<String>>(mut self, r: S) -> Changelog {
        self.config.repo = Some(r.into());
        self
    }

    /// Sets the link style to use for hyper-links
    pub fn link_style(mut self, l: LinkStyle) -> Changelog {
        self.config.link_style = l;
        self
    }

    /// Sets the version being released
    ///
    /// # Example
    ///
    /// ```
    /// # use chlog::Changelog;
    /// let chlog = Changelog::new().version("0.2.1");
    /// ```
    pub fn version<S: Into<String>>(mut self, v: S) -> Changelog {
        self.config.new_version = Some(v.into());
        self
    }

    /// Sets where the compared range starts, i.e. the previous tag
    pub fn from<S: Into<String>>(mut self, f: S) -> Changelog {
        self.config.from = Some(f.into());
        self
    }

    /// Sets where the compared range ends (Defaults to `HEAD`)
    pub fn to<S: Into<String>>(mut self, t: S) -> Changelog {
        self.config.to = t.into();
        self
    }

    /// Replaces the commit types and their section titles. Sections are
    /// written in the order given here.
    ///
    /// # Example
    ///
    /// ```
    /// # use chlog::Changelog;
    /// let chlog = Changelog::new().types([("feat", "Features"), ("fix", "Bug Fixes")]);
    /// ```
    pub fn types<I, K, T>(mut self, types: I) -> Changelog
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<String>,
    {
        self.config.types = types
            .into_iter()
            .map(|(k, t)| (k.into(), TypeConfig::new(t)))
            .collect();
        self
    }

    /// Leaves authors whose name or email contain `a` out of the credits
    pub fn exclude_author<S: Into<String>>(mut self, a: S) -> Changelog {
        self.config.exclude_authors.push(a.into());
        self
    }

    pub fn grouping(mut self, g: GroupingMode) -> Changelog {
        self.config.grouping = g;
        self
    }

    /// Gives up on a single identity lookup after `t`
    pub fn lookup_timeout(mut self, t: Duration) -> Changelog {
        self.config.lookup_timeout = Some(t);
        self
    }

    /// Renders the Markdown changelog for `commits`.
    ///
    /// Contributor handles are resolved through `lookup` first; a failing
    /// lookup only costs the link.
    ///
    /// # Example
    ///
    /// ```
    /// # use chlog::{Changelog, NoLookup, git::Commit};
    /// # futures::executor::block_on(async {
    /// let commits = vec![Commit::new("feat", ":sparkles: add x")];
    /// let md = Changelog::new().render(&commits, &NoLookup).await.unwrap();
    ///
    /// assert!(md.contains("- ✨ add x"));
    /// # });
    /// ```
    pub async fn render<L>(&self, commits: &[Commit], lookup: &L) -> Result<String>
    where
        L: IdentityLookup + ?Sized,
    {
        let mut authors = Authors::from_commits(commits, &self.config);
        authors.resolve(lookup, self.config.lookup_timeout).await;

        let mut out = Vec::new();
        self.write_changelog_with(commits, &authors, &mut MarkdownWriter::new(&mut out))?;

        let md = gitmoji::convert(&String::from_utf8_lossy(&out), true);
        Ok(md.trim().to_owned())
    }

    /// Writes a changelog with a specified `FormatWriter` format, using
    /// contributors that have already been resolved
    pub fn write_changelog_with<W>(&self, commits: &[Commit], authors: &Authors, writer: &mut W) -> Result<()>
    where
        W: FormatWriter,
    {
        debug!("Writing changelog for {} commits", commits.len());
        let sm = SectionMap::from_commits(commits);

        writer.write_changelog(&self.config, &sm, authors)
    }

    /// Renders the release for `commits` and puts it in front of the releases
    /// already in `document`. Needs a version to be set.
    pub async fn update<L>(&self, document: &str, commits: &[Commit], lookup: &L) -> Result<String>
    where
        L: IdentityLookup + ?Sized,
    {
        let version = self
            .config
            .new_version
            .as_deref()
            .ok_or(Error::MissingVersion)?;
        let release = self.render(commits, lookup).await?;
        Ok(prepend_release(document, version, &release))
    }
}

/// Renders `commits` with `config`, see [`Changelog::render`]
pub async fn render<L>(commits: &[Commit], config: &Config, lookup: &L) -> Result<String>
where
    L: IdentityLookup + ?Sized,
{
    Changelog::with_config(config.clone())
        .render(commits, lookup)
        .await
}
