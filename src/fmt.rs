mod md_writer;

pub use self::md_writer::{format_commit, format_reference, format_references, MarkdownWriter};
use crate::{authors::Authors, config::Config, error::Result, sectionmap::SectionMap};

/// A trait that allows writing the results of a `chlog` run in an arbitrary
/// format. The single required function `write_changelog()` accepts a
/// `chlog::SectionMap` which can be thought of similiar to a `chlog` "AST" of
/// sorts, plus the already resolved contributors.
///
/// Writers are synchronous; every identity lookup has finished before one is
/// called.
pub trait FormatWriter {
    /// Writes a changelog from a given `chlog::SectionMap`
    fn write_changelog(
        &mut self,
        config: &Config,
        section_map: &SectionMap,
        authors: &Authors,
    ) -> Result<()>;
}
