use std::io;

use crate::{
    authors::{format_name, upper_first, Authors},
    config::{Config, GroupingMode},
    error::Result,
    fmt::FormatWriter,
    git::{Commit, Reference, ReferenceKind},
    link_style::short_hash,
    sectionmap::{group_by_scope, SectionMap},
};

/// Wraps a `std::io::Write` object to write `chlog` output in a Markdown format
///
/// # Example
///
/// ```
/// # use chlog::{authors::Authors, config::Config, git::Commit, SectionMap};
/// # use chlog::fmt::{FormatWriter, MarkdownWriter};
/// let commits = vec![Commit::new("fix", "handle empty input")];
/// let config = Config::default();
/// let sm = SectionMap::from_commits(&commits);
/// let authors = Authors::from_commits(&commits, &config);
///
/// let mut out = Vec::new();
/// MarkdownWriter::new(&mut out)
///     .write_changelog(&config, &sm, &authors)
///     .unwrap();
///
/// assert!(String::from_utf8(out).unwrap().contains("- Handle empty input"));
/// ```
pub struct MarkdownWriter<'a>(&'a mut dyn io::Write);

impl<'a> MarkdownWriter<'a> {
    /// Creates a new instance of the `MarkdownWriter` struct using a
    /// `std::io::Write` object.
    pub fn new<T: io::Write + 'a>(writer: &'a mut T) -> MarkdownWriter<'a> {
        MarkdownWriter(writer)
    }

    fn write_header(&mut self, config: &Config) -> Result<()> {
        writeln!(self.0, "## What's Changed")?;

        if let (Some(repo), Some(from)) = (config.repo.as_deref(), config.from.as_deref()) {
            let to = config.compare_target();
            if let Some(url) = config.link_style.compare_link(from, to.as_str(), repo) {
                writeln!(self.0, "\n[compare changes]({url})")?;
            }
        }
        Ok(())
    }

    /// Writes one type section, returning the lines of breaking commits
    fn write_section(
        &mut self,
        config: &Config,
        authors: &Authors,
        title: &str,
        entries: &[&Commit],
    ) -> Result<Vec<String>> {
        let mut breaking = vec![];
        if entries.is_empty() {
            return Ok(breaking);
        }

        writeln!(self.0, "\n### {title}")?;

        match config.grouping {
            GroupingMode::Flat => {
                writeln!(self.0)?;
                for entry in entries.iter().rev() {
                    let line = format_commit(entry, config, authors, true);
                    writeln!(self.0, "{line}")?;
                    if entry.is_breaking {
                        breaking.push(line);
                    }
                }
            }
            GroupingMode::Scoped => {
                let mut scopes = group_by_scope(entries.iter().rev().copied());

                // unscoped lines go right under the type heading, before any
                // scope heading could claim them
                if let Some(unscoped) = scopes.shift_remove(&None::<&str>) {
                    writeln!(self.0)?;
                    self.write_scoped_lines(config, authors, &unscoped, &mut breaking)?;
                }
                for (scope, scoped) in scopes {
                    writeln!(self.0, "\n#### {}\n", scope.unwrap_or_default())?;
                    self.write_scoped_lines(config, authors, &scoped, &mut breaking)?;
                }
            }
        }

        Ok(breaking)
    }

    fn write_scoped_lines(
        &mut self,
        config: &Config,
        authors: &Authors,
        entries: &[&Commit],
        breaking: &mut Vec<String>,
    ) -> Result<()> {
        for entry in entries {
            writeln!(self.0, "{}", format_commit(entry, config, authors, false))?;
            if entry.is_breaking {
                // the breaking list has no scope headings to lean on
                breaking.push(format_commit(entry, config, authors, true));
            }
        }
        Ok(())
    }

    fn write_breaking(&mut self, lines: &[String]) -> Result<()> {
        if lines.is_empty() {
            return Ok(());
        }
        writeln!(self.0, "\n#### ⚠️ Breaking Changes\n")?;
        for line in lines {
            writeln!(self.0, "{line}")?;
        }
        Ok(())
    }

    fn write_contributors(&mut self, config: &Config, authors: &Authors) -> Result<()> {
        if authors.is_empty() {
            return Ok(());
        }
        writeln!(self.0, "\n### ❤️ Contributors\n")?;
        for (name, agg) in authors.iter() {
            let contact = match (agg.handle.as_deref(), agg.contact_email()) {
                (Some(handle), _) => Some(profile(config, handle)),
                (None, Some(email)) => Some(format!("<{email}>")),
                (None, None) => None,
            };
            match contact {
                Some(contact) => writeln!(self.0, "- {name} ({contact})")?,
                None => writeln!(self.0, "- {name}")?,
            }
        }
        Ok(())
    }
}

impl<'a> FormatWriter for MarkdownWriter<'a> {
    fn write_changelog(&mut self, config: &Config, sm: &SectionMap, authors: &Authors) -> Result<()> {
        self.write_header(config)?;

        // Sections in the order of `config.types`, unconfigured types are left out
        let mut breaking = vec![];
        for (commit_type, type_cfg) in config.types.iter() {
            breaking.extend(self.write_section(
                config,
                authors,
                &type_cfg.title,
                sm.get(commit_type),
            )?);
        }

        self.write_breaking(&breaking)?;
        self.write_contributors(config, authors)?;

        self.0.flush().map_err(Into::into)
    }
}

fn profile(config: &Config, handle: &str) -> String {
    match config.link_style.profile_link(handle) {
        Some(url) => format!("[@{handle}]({url})"),
        None => format!("@{handle}"),
    }
}

/// Formats a single changelog line:
/// `- **scope:** ⚠️ Description by author (refs)`
///
/// The author is linked only when a handle was resolved for them, otherwise
/// their display name is written as plain text.
pub fn format_commit(commit: &Commit, config: &Config, authors: &Authors, with_scope: bool) -> String {
    let mut line = String::from("- ");

    if with_scope {
        if let Some(scope) = commit.scope_str() {
            line.push_str(&format!("**{scope}:** "));
        }
    }
    if commit.is_breaking {
        line.push_str("⚠️ ");
    }
    line.push_str(&upper_first(commit.description.trim()));

    if let Some(author) = commit.author.as_ref() {
        let by = match authors.handle_for(author) {
            Some(handle) => profile(config, handle),
            None => format_name(&author.name),
        };
        if !by.is_empty() {
            line.push_str(&format!(" by {by}"));
        }
    }

    line.push_str(&format_references(&commit.references, config));
    line
}

/// Formats the references of a commit as ` (pr, pr, issue)`. Pull requests
/// come first, then issues. Without any of those only the first other
/// reference is shown; without any reference the result is empty.
pub fn format_references(references: &[Reference], config: &Config) -> String {
    let typed = references
        .iter()
        .filter(|r| r.kind == ReferenceKind::PullRequest)
        .chain(references.iter().filter(|r| r.kind == ReferenceKind::Issue))
        .map(|r| format_reference(r, config))
        .collect::<Vec<_>>();

    if !typed.is_empty() {
        format!(" ({})", typed.join(", "))
    } else if let Some(first) = references.first() {
        format!(" ({})", format_reference(first, config))
    } else {
        String::new()
    }
}

/// Formats a single reference as a Markdown link when the repository allows
pub fn format_reference(reference: &Reference, config: &Config) -> String {
    let repo = config.repo.as_deref().unwrap_or_default();
    let style = config.link_style;

    let (text, url) = match reference.kind {
        ReferenceKind::PullRequest => {
            let n = reference.number();
            (format!("#{n}"), style.pull_request_link(n, repo))
        }
        ReferenceKind::Issue => {
            let n = reference.number();
            (format!("#{n}"), style.issue_link(n, repo))
        }
        ReferenceKind::Hash => (
            short_hash(&reference.value).to_owned(),
            style.commit_link(reference.value.as_str(), repo),
        ),
        ReferenceKind::Other => (reference.value.clone(), None),
    };

    match url {
        Some(url) => format!("[{text}]({url})"),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;
    use crate::{config::TypeConfig, git::Author, link_style::LinkStyle, lookup::TableLookup};

    fn config() -> Config {
        Config {
            repo: Some("https://github.com/foo/bar".into()),
            types: IndexMap::from([
                ("feat".to_owned(), TypeConfig::new("Features")),
                ("fix".to_owned(), TypeConfig::new("Fixes")),
            ]),
            ..Config::default()
        }
    }

    fn write(commits: &[Commit], config: &Config, authors: &Authors) -> String {
        let sm = SectionMap::from_commits(commits);
        let mut out = Vec::new();
        MarkdownWriter::new(&mut out)
            .write_changelog(config, &sm, authors)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn references_prs_before_issues() {
        let refs = vec![
            Reference::issue("#3"),
            Reference::pull_request("#1"),
            Reference::hash("abcdef0123456789"),
            Reference::pull_request("#2"),
        ];
        assert_eq!(
            format_references(&refs, &config()),
            " ([#1](https://github.com/foo/bar/pull/1), \
             [#2](https://github.com/foo/bar/pull/2), \
             [#3](https://github.com/foo/bar/issues/3))"
        );
    }

    #[test]
    fn references_fall_back_to_first_untyped() {
        let refs = vec![Reference::hash("abcdef0123456789"), Reference::hash("0000000011111111")];
        assert_eq!(
            format_references(&refs, &config()),
            " ([abcdef01](https://github.com/foo/bar/commit/abcdef0123456789))"
        );
        assert_eq!(format_references(&[], &config()), "");
    }

    #[test]
    fn references_without_repo_are_plain() {
        let refs = vec![Reference::pull_request("7"), Reference::issue("8")];
        assert_eq!(format_references(&refs, &Config::default()), " (#7, #8)");
    }

    #[test]
    fn commit_line_segments() {
        let commit = Commit::new("feat", "add x")
            .scope("cli")
            .breaking(true)
            .author(Author::new("jane doe", "j@x.com"))
            .reference(Reference::pull_request("#4"));
        assert_eq!(
            format_commit(&commit, &config(), &Authors::default(), true),
            "- **cli:** ⚠️ Add x by Jane Doe ([#4](https://github.com/foo/bar/pull/4))"
        );
        assert_eq!(
            format_commit(&Commit::new("fix", "bare"), &config(), &Authors::default(), true),
            "- Bare"
        );
    }

    #[test]
    fn unresolved_single_word_author_is_not_linked() {
        let commit = Commit::new("fix", "x").author(Author::new("octocat", "octo@x.com"));
        assert_eq!(
            format_commit(&commit, &config(), &Authors::default(), true),
            "- X by Octocat"
        );
    }

    #[test]
    fn sections_follow_config_order_and_reverse_commits() {
        let commits = vec![
            Commit::new("fix", "first fix"),
            Commit::new("feat", "first feat"),
            Commit::new("chore", "not configured"),
            Commit::new("fix", "second fix"),
        ];
        let out = write(&commits, &config(), &Authors::default());
        assert_eq!(
            out,
            "## What's Changed\n\
             \n### Features\n\n- First feat\n\
             \n### Fixes\n\n- Second fix\n- First fix\n"
        );
    }

    #[test]
    fn compare_link_needs_repo_and_from() {
        let mut cfg = config();
        let out = write(&[], &cfg, &Authors::default());
        assert!(!out.contains("compare changes"));

        cfg.from = Some("v1.0.0".into());
        cfg.new_version = Some("1.1.0".into());
        let out = write(&[], &cfg, &Authors::default());
        assert!(out.contains(
            "[compare changes](https://github.com/foo/bar/compare/v1.0.0...v1.1.0)"
        ));
    }

    #[test]
    fn breaking_lines_repeated_in_order() {
        let commits = vec![
            Commit::new("feat", "a").breaking(true),
            Commit::new("feat", "b"),
            Commit::new("fix", "c").scope("io").breaking(true),
            Commit::new("feat", "d").breaking(true),
        ];
        let out = write(&commits, &config(), &Authors::default());
        let (_, breaking) = out.split_once("#### ⚠️ Breaking Changes\n\n").unwrap();
        assert_eq!(breaking, "- ⚠️ D\n- ⚠️ A\n- **io:** ⚠️ C\n");
    }

    #[test]
    fn scoped_grouping() {
        let mut cfg = config();
        cfg.grouping = GroupingMode::Scoped;
        let commits = vec![
            Commit::new("feat", "a").scope("cli"),
            Commit::new("feat", "b"),
            Commit::new("feat", "c").scope("cli").breaking(true),
        ];
        let out = write(&commits, &cfg, &Authors::default());
        assert_eq!(
            out,
            "## What's Changed\n\
             \n### Features\n\
             \n- B\n\
             \n#### cli\n\n- ⚠️ C\n- A\n\
             \n#### ⚠️ Breaking Changes\n\n- **cli:** ⚠️ C\n"
        );
    }

    #[test]
    fn scoped_grouping_keeps_unscoped_out_of_scope_headings() {
        let mut cfg = config();
        cfg.grouping = GroupingMode::Scoped;
        let commits = vec![
            Commit::new("feat", "unscoped"),
            Commit::new("feat", "scoped").scope("cli"),
            Commit::new("feat", "other").scope("core"),
        ];
        let out = write(&commits, &cfg, &Authors::default());

        let unscoped = out.find("- Unscoped").unwrap();
        let first_scope = out.find("#### ").unwrap();
        assert!(unscoped < first_scope);
        assert!(out.contains("\n#### core\n\n- Other\n\n#### cli\n\n- Scoped\n"));
    }

    #[tokio::test]
    async fn contributors_prefer_handle_then_email() {
        let commits = vec![
            Commit::new("feat", "a").author(Author::new("Jane Doe", "j@x.com")),
            Commit::new("feat", "b").author(Author::new("John Roe", "1+jr@users.noreply.github.com")),
            Commit::new("feat", "c").author(Author::new("Ann Lee", "ann@x.com")),
        ];
        let mut cfg = config();
        cfg.link_style = LinkStyle::Github;
        let mut authors = Authors::from_commits(&commits, &cfg);
        authors
            .resolve(&TableLookup::new(&[("ann@x.com", "annlee")]), None)
            .await;

        let out = write(&commits, &cfg, &authors);

        assert!(out.contains("- C by [@annlee](https://github.com/annlee)\n"));
        assert!(out.contains("- A by Jane Doe\n"));
        assert!(out.ends_with(
            "### ❤️ Contributors\n\n\
             - Jane Doe (<j@x.com>)\n\
             - John Roe\n\
             - Ann Lee ([@annlee](https://github.com/annlee))\n"
        ));
    }

    #[test]
    fn profile_without_link_style_support() {
        let mut cfg = config();
        cfg.link_style = LinkStyle::Cgit;
        assert_eq!(profile(&cfg, "jd"), "@jd");
    }
}
